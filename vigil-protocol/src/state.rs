//! Motion states announced to the peer

/// Motion states the pendant announces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateCode {
    /// Wearer at rest
    Idle,
    /// Wearer walking
    Walking,
    /// Fall detected
    Falling,
}

// Wire format values
const STATE_IDLE: i32 = 1;
const STATE_WALKING: i32 = 3;
const STATE_FALLING: i32 = 4;

impl StateCode {
    /// Map a model label to its announced state
    ///
    /// Labels with no peer-facing meaning ("uncertain", anything the model
    /// was never trained on) map to no state at all rather than a reserved
    /// code, so they can never reach the wire.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "idle" => Some(StateCode::Idle),
            "walking" => Some(StateCode::Walking),
            "falling" => Some(StateCode::Falling),
            _ => None,
        }
    }

    /// Wire value carried in the GATT characteristic
    pub fn to_wire(self) -> i32 {
        match self {
            StateCode::Idle => STATE_IDLE,
            StateCode::Walking => STATE_WALKING,
            StateCode::Falling => STATE_FALLING,
        }
    }

    /// Parse a wire value
    pub fn from_wire(value: i32) -> Option<Self> {
        match value {
            STATE_IDLE => Some(StateCode::Idle),
            STATE_WALKING => Some(StateCode::Walking),
            STATE_FALLING => Some(StateCode::Falling),
            _ => None,
        }
    }

    /// Little-endian characteristic encoding
    pub fn to_le_bytes(self) -> [u8; 4] {
        self.to_wire().to_le_bytes()
    }

    /// Returns true for states that should raise attention on the peer
    pub fn is_alert(self) -> bool {
        matches!(self, StateCode::Falling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_roundtrip() {
        let states = [StateCode::Idle, StateCode::Walking, StateCode::Falling];

        for state in states {
            let wire = state.to_wire();
            let parsed = StateCode::from_wire(wire).unwrap();
            assert_eq!(state, parsed);
        }
    }

    #[test]
    fn test_unknown_wire_value() {
        // 0 is the characteristic's power-on value, 2 was never assigned
        for value in [0, -1, 2, 5, 100, i32::MIN, i32::MAX] {
            assert!(StateCode::from_wire(value).is_none());
        }
    }

    #[test]
    fn test_label_mapping() {
        assert_eq!(StateCode::from_label("idle"), Some(StateCode::Idle));
        assert_eq!(StateCode::from_label("walking"), Some(StateCode::Walking));
        assert_eq!(StateCode::from_label("falling"), Some(StateCode::Falling));
    }

    #[test]
    fn test_unknown_label() {
        assert!(StateCode::from_label("uncertain").is_none());
        assert!(StateCode::from_label("").is_none());
        assert!(StateCode::from_label("jogging").is_none());
        // Labels are matched exactly, not case-folded
        assert!(StateCode::from_label("Idle").is_none());
    }

    #[test]
    fn test_label_mapping_is_stable() {
        // Same label in, same state out, every time
        for label in ["idle", "walking", "falling", "uncertain"] {
            assert_eq!(StateCode::from_label(label), StateCode::from_label(label));
        }
    }

    #[test]
    fn test_le_encoding() {
        assert_eq!(StateCode::Idle.to_le_bytes(), [1, 0, 0, 0]);
        assert_eq!(StateCode::Walking.to_le_bytes(), [3, 0, 0, 0]);
        assert_eq!(StateCode::Falling.to_le_bytes(), [4, 0, 0, 0]);
    }

    #[test]
    fn test_short_reads_still_decode() {
        // Peers reading only the first two bytes as a LE u16 must see the
        // same code
        for state in [StateCode::Idle, StateCode::Walking, StateCode::Falling] {
            let bytes = state.to_le_bytes();
            let short = u16::from_le_bytes([bytes[0], bytes[1]]);
            assert_eq!(i32::from(short), state.to_wire());
        }
    }

    #[test]
    fn test_is_alert() {
        assert!(StateCode::Falling.is_alert());
        assert!(!StateCode::Idle.is_alert());
        assert!(!StateCode::Walking.is_alert());
    }
}
