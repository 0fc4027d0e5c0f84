#![forbid(unsafe_code)]

//! Terminal session lifecycle guard.
//!
//! RAII management of raw mode and the optional terminal features the engine
//! uses (alternate screen, mouse capture). All state changes are tracked and
//! undone in reverse order on drop, so the terminal is restored on normal
//! return, `?` propagation, and panic unwinding.
//!
//! A process-wide panic hook and (on unix) a signal listener provide
//! best-effort restoration on the exit paths `Drop` cannot reach: the hook
//! runs before the default panic printer so the message lands on a sane
//! screen, and SIGINT/SIGTERM trigger cleanup before the process exits with
//! the conventional `128 + signal` status.

use std::io::{self, Write};
use std::sync::OnceLock;

use crate::event::Event;

#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM, SIGWINCH};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// Terminal session configuration options.
///
/// All options default to `false`; a default session is raw mode only.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Enable the alternate screen buffer (`CSI ? 1049 h`).
    ///
    /// The terminal switches to a separate buffer, preserving the user's
    /// scrollback; the original screen is restored on exit.
    pub alternate_screen: bool,

    /// Enable mouse capture with SGR encoding (`CSI ? 1000;1002;1006 h`).
    ///
    /// Needed for wheel-scroll events to reach the event stream.
    pub mouse_capture: bool,
}

/// A terminal session that owns raw mode and cleanup.
///
/// # Contract
///
/// - Only one `TerminalSession` should exist at a time; concurrent sessions
///   leave the terminal in an undefined state.
/// - Creating a session enters raw mode immediately.
/// - Dropping the session disables every mode that was enabled, shows the
///   cursor, and exits raw mode last.
#[derive(Debug)]
pub struct TerminalSession {
    options: SessionOptions,
    /// Track what was enabled so drop only disables what it must.
    alternate_screen_enabled: bool,
    mouse_enabled: bool,
    #[cfg(unix)]
    signal_guard: Option<SignalGuard>,
}

impl TerminalSession {
    /// Enter raw mode and enable the requested features.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode or a requested feature cannot be
    /// enabled. Raw mode is rolled back if a later step fails.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        install_panic_hook();

        crossterm::terminal::enable_raw_mode()?;
        tracing::debug!("terminal raw mode enabled");

        let mut session = Self {
            options: options.clone(),
            alternate_screen_enabled: false,
            mouse_enabled: false,
            #[cfg(unix)]
            signal_guard: None,
        };

        #[cfg(unix)]
        {
            match SignalGuard::new() {
                Ok(guard) => session.signal_guard = Some(guard),
                Err(err) => {
                    session.cleanup();
                    return Err(err);
                }
            }
        }

        let mut stdout = io::stdout();

        if options.alternate_screen {
            if let Err(err) = crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)
            {
                session.cleanup();
                return Err(err);
            }
            session.alternate_screen_enabled = true;
            tracing::debug!("alternate screen enabled");
        }

        if options.mouse_capture {
            if let Err(err) = crossterm::execute!(stdout, crossterm::event::EnableMouseCapture) {
                session.cleanup();
                return Err(err);
            }
            session.mouse_enabled = true;
            tracing::debug!("mouse capture enabled");
        }

        Ok(session)
    }

    /// Create a minimal session (raw mode only).
    pub fn minimal() -> io::Result<Self> {
        Self::new(SessionOptions::default())
    }

    /// Current terminal size as (columns, rows).
    pub fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    /// Poll for an event with a timeout.
    ///
    /// Returns `Ok(true)` if an event is ready to read, `Ok(false)` on
    /// timeout.
    pub fn poll_event(&self, timeout: std::time::Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    /// Read the next event, blocking until one arrives.
    ///
    /// Returns `Ok(None)` when the backend event has no canonical
    /// representation (unmapped keys, key releases, focus changes).
    pub fn read_event(&self) -> io::Result<Option<Event>> {
        let event = crossterm::event::read()?;
        Ok(Event::from_crossterm(event))
    }

    /// Show the cursor.
    pub fn show_cursor(&self) -> io::Result<()> {
        crossterm::execute!(io::stdout(), crossterm::cursor::Show)
    }

    /// Hide the cursor.
    pub fn hide_cursor(&self) -> io::Result<()> {
        crossterm::execute!(io::stdout(), crossterm::cursor::Hide)
    }

    /// The options this session was created with.
    #[must_use]
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Shared cleanup path for drop and failed construction.
    fn cleanup(&mut self) {
        #[cfg(unix)]
        let _ = self.signal_guard.take();

        let mut stdout = io::stdout();

        // Disable features in reverse order of enabling.
        if self.mouse_enabled {
            let _ = crossterm::execute!(stdout, crossterm::event::DisableMouseCapture);
            self.mouse_enabled = false;
            tracing::debug!("mouse capture disabled");
        }

        // Always show the cursor before leaving.
        let _ = crossterm::execute!(stdout, crossterm::cursor::Show);

        if self.alternate_screen_enabled {
            let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
            self.alternate_screen_enabled = false;
            tracing::debug!("alternate screen disabled");
        }

        // Exit raw mode last.
        let _ = crossterm::terminal::disable_raw_mode();
        tracing::debug!("terminal raw mode disabled");

        let _ = stdout.flush();
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();

    let _ = crossterm::execute!(stdout, crossterm::event::DisableMouseCapture);
    let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
    let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = stdout.flush();
}

/// Background listener that restores the terminal on termination signals.
///
/// SIGWINCH is observed but not acted on here; resizes are delivered through
/// the normal event stream by the backend.
#[cfg(unix)]
#[derive(Debug)]
struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalGuard {
    fn new() -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM, SIGWINCH]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::spawn(move || {
            for signal in signals.forever() {
                match signal {
                    SIGWINCH => {
                        tracing::debug!("SIGWINCH received");
                    }
                    SIGINT | SIGTERM => {
                        tracing::warn!(signal, "termination signal received, cleaning up");
                        best_effort_cleanup();
                        std::process::exit(128 + signal);
                    }
                    _ => {}
                }
            }
        });
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
