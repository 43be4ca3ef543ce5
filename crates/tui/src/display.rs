//! Terminal implementation of the player's display capability.
//!
//! "Fullscreen" in the terminal means the play surface takes the whole
//! frame. Every state change, local or external, is announced on the
//! notification channel the way a browser fires `fullscreenchange`.

use gamehub_core::{DisplayCapability, DisplayError, FullscreenChange, Orientation};
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub struct TerminalDisplay {
    fullscreen: bool,
    notify: mpsc::Sender<FullscreenChange>,
}

impl TerminalDisplay {
    pub fn new(notify: mpsc::Sender<FullscreenChange>) -> Self {
        Self {
            fullscreen: false,
            notify,
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// The user's own exit gesture (Esc), outside the player's toggle.
    pub fn platform_exit(&mut self) {
        if self.fullscreen {
            debug!("Platform exit gesture");
            self.set(false);
        }
    }

    fn set(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
        if let Err(err) = self.notify.try_send(FullscreenChange { fullscreen }) {
            warn!(%err, "Dropped fullscreen notification");
        }
    }
}

impl DisplayCapability for TerminalDisplay {
    fn request_fullscreen(&mut self) -> Result<(), DisplayError> {
        if !self.fullscreen {
            self.set(true);
        }
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), DisplayError> {
        if !self.fullscreen {
            return Err(DisplayError::Rejected("document is not fullscreen".to_string()));
        }
        self.set(false);
        Ok(())
    }

    fn lock_orientation(&mut self, _orientation: Orientation) -> Result<(), DisplayError> {
        Err(DisplayError::Unsupported("orientation lock"))
    }

    fn unlock_orientation(&mut self) -> Result<(), DisplayError> {
        Err(DisplayError::Unsupported("orientation unlock"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn announces_every_change() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut display = TerminalDisplay::new(tx);

        display.request_fullscreen().expect("fullscreen");
        display.request_fullscreen().expect("already fullscreen");
        display.platform_exit();
        display.platform_exit();

        assert_eq!(rx.try_recv().ok(), Some(FullscreenChange { fullscreen: true }));
        assert_eq!(rx.try_recv().ok(), Some(FullscreenChange { fullscreen: false }));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn orientation_is_unsupported() {
        let (tx, _rx) = mpsc::channel(1);
        let mut display = TerminalDisplay::new(tx);
        assert!(matches!(
            display.lock_orientation(Orientation::Portrait),
            Err(DisplayError::Unsupported(_))
        ));
        assert!(display.exit_fullscreen().is_err());
    }
}
