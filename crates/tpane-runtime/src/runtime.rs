//! The two run-loop tasks: render ticker and input dispatch.

#![forbid(unsafe_code)]

use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tpane_core::session::TerminalSession;
use tpane_render::Surface;

use crate::screen::{Dispatch, Screen};
use crate::stop::StopSignal;

/// Tuning for [`run`].
#[derive(Debug, Clone, Copy)]
pub struct RuntimeConfig {
    /// Render tick period. Each tick renders whatever is dirty.
    pub tick: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(50),
        }
    }
}

/// Drives the screen until the user quits.
///
/// Spawns a background render ticker that calls [`Screen::render_all`] every
/// `config.tick`, then blocks the calling thread on [`TerminalSession::read_event`],
/// feeding each event through [`Screen::handle_event`]. When dispatch returns
/// [`Dispatch::Quit`] or the event stream errors out, the ticker is stopped
/// and joined before returning.
///
/// The two tasks coordinate only through the widgets' internal locks and the
/// stop signal; producer threads may keep appending to the log throughout.
pub fn run<S>(
    session: &TerminalSession,
    screen: Arc<Screen<S>>,
    config: RuntimeConfig,
) -> io::Result<()>
where
    S: Surface + 'static,
{
    let (signal, trigger) = StopSignal::new();

    let ticker = {
        let screen = Arc::clone(&screen);
        thread::spawn(move || {
            while !signal.wait_timeout(config.tick) {
                if let Err(err) = screen.render_all() {
                    tracing::error!(%err, "render failed, stopping ticker");
                    break;
                }
            }
        })
    };

    let result = loop {
        match session.read_event() {
            Ok(Some(event)) => {
                if screen.handle_event(event) == Dispatch::Quit {
                    break Ok(());
                }
            }
            Ok(None) => {}
            Err(err) => break Err(err),
        }
    };

    trigger.stop();
    let _ = ticker.join();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tick_is_fifty_millis() {
        assert_eq!(RuntimeConfig::default().tick, Duration::from_millis(50));
    }
}
