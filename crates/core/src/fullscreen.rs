//! Fullscreen state for the embedded play surface.
//!
//! The machine has two states. Transitions come either from the local toggle
//! or from platform notifications (for example the platform's own exit
//! gesture); notifications are authoritative.

use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Visual state of the play surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FullscreenState {
    /// Normal layout with header and details panel.
    #[default]
    Normal,
    /// Play surface fills the screen.
    Fullscreen,
}

/// Screen orientation requested while fullscreen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Taller than wide.
    Portrait,
}

/// Rejection from the display platform.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DisplayError {
    /// The platform has no such capability.
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),
    /// The platform refused the request.
    #[error("request rejected: {0}")]
    Rejected(String),
}

/// Notification from the platform that fullscreen state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullscreenChange {
    /// Whether the platform is now fullscreen.
    pub fullscreen: bool,
}

/// Display capabilities consumed by the player view.
pub trait DisplayCapability {
    /// Ask the platform to go fullscreen.
    fn request_fullscreen(&mut self) -> Result<(), DisplayError>;
    /// Ask the platform to leave fullscreen.
    fn exit_fullscreen(&mut self) -> Result<(), DisplayError>;
    /// Lock the screen orientation.
    fn lock_orientation(&mut self, orientation: Orientation) -> Result<(), DisplayError>;
    /// Release an orientation lock.
    fn unlock_orientation(&mut self) -> Result<(), DisplayError>;
}

/// Result of a fire-and-forget platform call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BestEffort {
    /// The platform accepted the call.
    Done,
    /// The platform rejected the call; the rejection was logged and dropped.
    Ignored(String),
}

impl BestEffort {
    /// Fold a platform result into an outcome, logging any rejection.
    pub fn from_result(operation: &str, result: Result<(), DisplayError>) -> Self {
        match result {
            Ok(()) => BestEffort::Done,
            Err(err) => {
                info!(operation, %err, "Ignoring display rejection");
                BestEffort::Ignored(err.to_string())
            }
        }
    }

    /// Whether the call went through.
    pub fn is_done(&self) -> bool {
        matches!(self, BestEffort::Done)
    }
}

/// Fullscreen state machine for one player view.
#[derive(Debug, Clone, Default)]
pub struct FullscreenMachine {
    state: FullscreenState,
    last_orientation: Option<BestEffort>,
}

impl FullscreenMachine {
    /// Start in the normal state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> FullscreenState {
        self.state
    }

    /// Whether the surface is fullscreen.
    pub fn is_fullscreen(&self) -> bool {
        self.state == FullscreenState::Fullscreen
    }

    /// Outcome of the most recent orientation lock or unlock.
    pub fn last_orientation(&self) -> Option<&BestEffort> {
        self.last_orientation.as_ref()
    }

    /// Flip the state, issuing the platform requests for the new state.
    ///
    /// Platform failures never block the visual transition.
    pub fn toggle(&mut self, display: &mut dyn DisplayCapability) -> FullscreenState {
        match self.state {
            FullscreenState::Normal => self.enter(display),
            FullscreenState::Fullscreen => self.exit(display),
        }
        self.state
    }

    fn enter(&mut self, display: &mut dyn DisplayCapability) {
        if let Err(err) = display.request_fullscreen() {
            error!(%err, "Error attempting to enable full-screen mode");
        }
        self.last_orientation = Some(BestEffort::from_result(
            "lock_orientation",
            display.lock_orientation(Orientation::Portrait),
        ));
        self.state = FullscreenState::Fullscreen;
        debug!("Entered fullscreen");
    }

    fn exit(&mut self, display: &mut dyn DisplayCapability) {
        self.last_orientation = Some(BestEffort::from_result(
            "unlock_orientation",
            display.unlock_orientation(),
        ));
        if let Err(err) = display.exit_fullscreen() {
            warn!(%err, "Error leaving full-screen mode");
        }
        self.state = FullscreenState::Normal;
        debug!("Left fullscreen");
    }

    /// Reconcile with a platform notification. Returns `true` if the state moved.
    pub fn on_platform_change(&mut self, change: FullscreenChange) -> bool {
        let next = if change.fullscreen {
            FullscreenState::Fullscreen
        } else {
            FullscreenState::Normal
        };
        if next == self.state {
            return false;
        }
        debug!(?next, "Fullscreen changed by platform");
        self.state = next;
        true
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records calls and can be told to reject some of them.
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedDisplay {
        pub fullscreen: bool,
        pub locked: bool,
        pub reject_fullscreen: bool,
        pub orientation_supported: bool,
        pub calls: Vec<&'static str>,
    }

    impl DisplayCapability for ScriptedDisplay {
        fn request_fullscreen(&mut self) -> Result<(), DisplayError> {
            self.calls.push("request_fullscreen");
            if self.reject_fullscreen {
                return Err(DisplayError::Rejected("not allowed".to_string()));
            }
            self.fullscreen = true;
            Ok(())
        }

        fn exit_fullscreen(&mut self) -> Result<(), DisplayError> {
            self.calls.push("exit_fullscreen");
            self.fullscreen = false;
            Ok(())
        }

        fn lock_orientation(&mut self, _orientation: Orientation) -> Result<(), DisplayError> {
            self.calls.push("lock_orientation");
            if !self.orientation_supported {
                return Err(DisplayError::Unsupported("orientation lock"));
            }
            self.locked = true;
            Ok(())
        }

        fn unlock_orientation(&mut self) -> Result<(), DisplayError> {
            self.calls.push("unlock_orientation");
            if !self.orientation_supported {
                return Err(DisplayError::Unsupported("orientation unlock"));
            }
            self.locked = false;
            Ok(())
        }
    }

    #[test]
    fn toggling_twice_returns_to_normal() {
        let mut display = ScriptedDisplay {
            orientation_supported: true,
            ..Default::default()
        };
        let mut machine = FullscreenMachine::new();

        assert_eq!(machine.toggle(&mut display), FullscreenState::Fullscreen);
        assert!(display.fullscreen && display.locked);
        assert_eq!(machine.last_orientation(), Some(&BestEffort::Done));

        assert_eq!(machine.toggle(&mut display), FullscreenState::Normal);
        assert!(!display.fullscreen && !display.locked);
        assert_eq!(
            display.calls,
            [
                "request_fullscreen",
                "lock_orientation",
                "unlock_orientation",
                "exit_fullscreen"
            ]
        );
    }

    #[test]
    fn orientation_rejection_is_ignored() {
        let mut display = ScriptedDisplay::default();
        let mut machine = FullscreenMachine::new();

        assert_eq!(machine.toggle(&mut display), FullscreenState::Fullscreen);
        assert!(matches!(
            machine.last_orientation(),
            Some(BestEffort::Ignored(_))
        ));
    }

    #[test]
    fn fullscreen_rejection_still_changes_visual_state() {
        let mut display = ScriptedDisplay {
            reject_fullscreen: true,
            ..Default::default()
        };
        let mut machine = FullscreenMachine::new();
        assert_eq!(machine.toggle(&mut display), FullscreenState::Fullscreen);
        assert!(!display.fullscreen);
        assert_eq!(machine.toggle(&mut display), FullscreenState::Normal);
    }

    #[test]
    fn platform_exit_is_authoritative() {
        let mut display = ScriptedDisplay::default();
        let mut machine = FullscreenMachine::new();
        machine.toggle(&mut display);

        assert!(machine.on_platform_change(FullscreenChange { fullscreen: false }));
        assert_eq!(machine.state(), FullscreenState::Normal);
        assert!(!machine.on_platform_change(FullscreenChange { fullscreen: false }));

        // next toggle enters again rather than exiting
        assert_eq!(machine.toggle(&mut display), FullscreenState::Fullscreen);
    }

    #[test]
    fn platform_can_enter_without_local_toggle() {
        let mut machine = FullscreenMachine::new();
        assert!(machine.on_platform_change(FullscreenChange { fullscreen: true }));
        assert!(machine.is_fullscreen());
    }
}
