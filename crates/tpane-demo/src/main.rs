#![forbid(unsafe_code)]

//! Tpane demo binary.
//!
//! A scrolling log fed by a synthetic producer thread, a key-reference pane,
//! and a command line at the bottom. Escape quits. Set `TPANE_LOG` to a file
//! path to capture diagnostics without corrupting the raw-mode screen.
//!
//! Commands: `/help`, `/clear`, `/rate N` (producer lines per second);
//! anything else is echoed back into the log.

use std::env;
use std::fs::File;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tpane::prelude::*;
use tpane::StopSignal;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs a file-backed tracing subscriber when `TPANE_LOG` names a path.
///
/// Stdout belongs to the renderer while the session is live, so diagnostics
/// go to a file or nowhere.
fn init_tracing() {
    let Ok(path) = env::var("TPANE_LOG") else {
        return;
    };
    let log_file = match File::create(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("tpane-demo: cannot create log file {path}: {err}");
            return;
        }
    };
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into());
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Arc::new(log_file)).with_ansi(false))
        .with(env_filter)
        .init();
}

fn spawn_producer<S>(
    screen: Arc<Screen<S>>,
    period_ms: Arc<AtomicU64>,
    signal: StopSignal,
) -> thread::JoinHandle<()>
where
    S: Surface + 'static,
{
    thread::spawn(move || {
        let mut seq = 0u64;
        loop {
            let period = Duration::from_millis(period_ms.load(Ordering::Relaxed).max(1));
            if signal.wait_timeout(period) {
                break;
            }
            seq += 1;
            screen.log_line(&format!("synthetic event #{seq}"));
        }
        tracing::debug!(produced = seq, "producer stopped");
    })
}

fn spawn_command_loop<S>(
    screen: Arc<Screen<S>>,
    commits: mpsc::Receiver<String>,
    period_ms: Arc<AtomicU64>,
    signal: StopSignal,
) -> thread::JoinHandle<()>
where
    S: Surface + 'static,
{
    thread::spawn(move || {
        while !signal.is_stopped() {
            match commits.recv_timeout(Duration::from_millis(100)) {
                Ok(text) => handle_command(&screen, &period_ms, &text),
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

fn handle_command<S: Surface>(screen: &Screen<S>, period_ms: &AtomicU64, text: &str) {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return;
    }
    tracing::debug!(command = trimmed, "input committed");

    if trimmed == "/help" {
        screen.log_line("commands: /help /clear /rate N, Escape quits");
    } else if trimmed == "/clear" {
        screen.log().clear();
    } else if let Some(rate) = trimmed.strip_prefix("/rate ") {
        match rate.trim().parse::<u64>() {
            Ok(per_sec) if per_sec > 0 => {
                period_ms.store((1000 / per_sec).max(1), Ordering::Relaxed);
                screen.log_line(&format!("producer rate set to {per_sec} lines/sec"));
            }
            _ => screen.log_line("usage: /rate N  (N > 0)"),
        }
    } else if trimmed.starts_with('/') {
        screen.log_line(&format!("unknown command: {trimmed}"));
    } else {
        screen.log_line(&format!("> {trimmed}"));
    }
}

fn run_demo() -> tpane::Result<()> {
    let session = TerminalSession::new(SessionOptions {
        alternate_screen: true,
        mouse_capture: true,
    })
    .map_err(|err| Error::terminal("terminal session setup failed", err))?;
    let (width, height) = session.size()?;
    let surface = Arc::new(AnsiSurface::stdout(width, height));

    let (screen, commits) = Screen::new(surface, width, height);
    let screen = Arc::new(screen);
    screen.set_title("Enter command ...");
    screen.help_line("");
    screen.help_line("Text command");
    screen.help_line(" /help   : command list");
    screen.help_line(" /clear  : wipe the log");
    screen.help_line(" /rate N : lines per sec");
    screen.log_line("demo started, Escape quits");

    let period_ms = Arc::new(AtomicU64::new(500));
    let (signal, trigger) = StopSignal::new();
    let producer = spawn_producer(Arc::clone(&screen), Arc::clone(&period_ms), signal.clone());
    let commands = spawn_command_loop(
        Arc::clone(&screen),
        commits,
        Arc::clone(&period_ms),
        signal.clone(),
    );

    let result = run(&session, Arc::clone(&screen), RuntimeConfig::default());

    trigger.stop();
    let _ = producer.join();
    let _ = commands.join();
    drop(session);
    result.map_err(tpane::Error::from)
}

fn main() {
    init_tracing();
    if let Err(err) = run_demo() {
        eprintln!("tpane-demo: {err}");
        std::process::exit(1);
    }
}
