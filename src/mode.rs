//! Operating-mode state machine
//!
//! The OI accepts actuator commands only after the device has been walked
//! through its mode sequence: start (128) enters Passive, then Safe (131) or
//! Full (132) enable motion/LED/display commands. Stop (173) turns the OI
//! off from any mode. The device never self-promotes; transitions happen
//! only through explicit requests here.
//!
//! Every actuator operation goes through the single [`ModeStateMachine::gate`]
//! check rather than per-command mode tests.

use crate::error::{Error, Result};
use crate::protocol::encode::{encode_mode, encode_start, encode_stop};

/// OI operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OiMode {
    /// OI not started; only start is meaningful
    Off,
    /// OI started, sensors readable, actuators locked out
    Passive,
    /// Actuators enabled with safety reflexes (cliff/wheel-drop) active
    Safe,
    /// Actuators enabled, safety reflexes off
    Full,
}

/// Tracks the commanded operating mode and emits mode-change bytes
#[derive(Debug)]
pub struct ModeStateMachine {
    current: OiMode,
}

impl ModeStateMachine {
    /// Create a state machine in the initial Off mode
    pub fn new() -> Self {
        Self {
            current: OiMode::Off,
        }
    }

    /// Current commanded mode
    pub fn current(&self) -> OiMode {
        self.current
    }

    /// Request OI start: Off -> Passive, emitting the start byte
    ///
    /// Returns `None` (no byte to write) if the OI is already started.
    pub fn request_start(&mut self) -> Option<[u8; 1]> {
        if self.current != OiMode::Off {
            return None;
        }
        self.current = OiMode::Passive;
        Some(encode_start())
    }

    /// Request a transition to Safe or Full
    ///
    /// No-op (returns `None`) if the target equals the current mode or is
    /// Passive/Off - the device cannot be commanded back to Passive, and Off
    /// is reached only through [`Self::request_stop`].
    pub fn request_mode(&mut self, target: OiMode) -> Option<[u8; 1]> {
        if target == self.current || matches!(target, OiMode::Passive | OiMode::Off) {
            return None;
        }
        self.current = target;
        Some(encode_mode(target))
    }

    /// Request OI stop: always emits the stop byte and resets to Off
    pub fn request_stop(&mut self) -> [u8; 1] {
        self.current = OiMode::Off;
        encode_stop()
    }

    /// Gate for actuator/display/motion commands
    ///
    /// Succeeds only in Safe or Full; otherwise the command must be rejected
    /// before any byte reaches the transport.
    pub fn gate(&self) -> Result<()> {
        match self.current {
            OiMode::Safe | OiMode::Full => Ok(()),
            mode => Err(Error::NotReady(mode)),
        }
    }
}

impl Default for ModeStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_from_off() {
        let mut sm = ModeStateMachine::new();
        assert_eq!(sm.current(), OiMode::Off);
        assert_eq!(sm.request_start(), Some([128]));
        assert_eq!(sm.current(), OiMode::Passive);
        // Already started - no byte
        assert_eq!(sm.request_start(), None);
    }

    #[test]
    fn test_mode_transitions() {
        let mut sm = ModeStateMachine::new();
        sm.request_start();

        assert_eq!(sm.request_mode(OiMode::Safe), Some([131]));
        assert_eq!(sm.current(), OiMode::Safe);

        // Same mode is a no-op
        assert_eq!(sm.request_mode(OiMode::Safe), None);

        assert_eq!(sm.request_mode(OiMode::Full), Some([132]));
        assert_eq!(sm.current(), OiMode::Full);

        // Cannot be commanded back to Passive
        assert_eq!(sm.request_mode(OiMode::Passive), None);
        assert_eq!(sm.current(), OiMode::Full);
    }

    #[test]
    fn test_stop_from_any_mode() {
        let mut sm = ModeStateMachine::new();
        assert_eq!(sm.request_stop(), [173]);
        assert_eq!(sm.current(), OiMode::Off);

        sm.request_start();
        sm.request_mode(OiMode::Full);
        assert_eq!(sm.request_stop(), [173]);
        assert_eq!(sm.current(), OiMode::Off);
    }

    #[test]
    fn test_gate() {
        let mut sm = ModeStateMachine::new();
        assert!(matches!(sm.gate(), Err(Error::NotReady(OiMode::Off))));

        sm.request_start();
        assert!(matches!(sm.gate(), Err(Error::NotReady(OiMode::Passive))));

        sm.request_mode(OiMode::Safe);
        assert!(sm.gate().is_ok());

        sm.request_mode(OiMode::Full);
        assert!(sm.gate().is_ok());

        sm.request_stop();
        assert!(matches!(sm.gate(), Err(Error::NotReady(OiMode::Off))));
    }
}
