//! Core types for lanes, lamp states and directives.

/// One of the four approaches of the intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LaneId {
    /// Northbound approach, wire code `N`.
    North,
    /// Eastbound approach, wire code `E`.
    East,
    /// Southbound approach, wire code `S`.
    South,
    /// Westbound approach, wire code `W`.
    West,
}

impl LaneId {
    /// All lanes in wire order.
    pub const ALL: [LaneId; 4] = [LaneId::North, LaneId::East, LaneId::South, LaneId::West];

    /// Decodes a wire lane code. Codes are case-sensitive.
    #[inline]
    pub fn decode(code: u8) -> Option<Self> {
        match code {
            b'N' => Some(LaneId::North),
            b'E' => Some(LaneId::East),
            b'S' => Some(LaneId::South),
            b'W' => Some(LaneId::West),
            _ => None,
        }
    }

    /// Returns the wire code for this lane.
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            LaneId::North => b'N',
            LaneId::East => b'E',
            LaneId::South => b'S',
            LaneId::West => b'W',
        }
    }

    /// Position of this lane in [`LaneId::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            LaneId::North => 0,
            LaneId::East => 1,
            LaneId::South => 2,
            LaneId::West => 3,
        }
    }
}

/// A single lamp of a signal head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lamp {
    Red,
    Yellow,
    Green,
}

/// The state a lane is displaying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightState {
    /// Red lamp lit. The fail-safe startup state.
    #[default]
    Red,
    /// Yellow lamp lit.
    Yellow,
    /// Green lamp lit.
    Green,
    /// All lamps dark.
    Off,
}

impl LightState {
    /// Returns the lamp that is lit in this state, if any.
    #[inline]
    pub fn lamp(self) -> Option<Lamp> {
        match self {
            LightState::Red => Some(Lamp::Red),
            LightState::Yellow => Some(Lamp::Yellow),
            LightState::Green => Some(Lamp::Green),
            LightState::Off => None,
        }
    }

    /// Returns the wire code for lit states. `Off` has no wire code.
    #[inline]
    pub fn code(self) -> Option<u8> {
        match self {
            LightState::Red => Some(b'R'),
            LightState::Yellow => Some(b'Y'),
            LightState::Green => Some(b'G'),
            LightState::Off => None,
        }
    }
}

/// A requested state as decoded from the wire.
///
/// Decoding never fails: any byte that is not `R`, `Y` or `G` becomes
/// [`StateCode::Unrecognized`], which lanes resolve to [`LightState::Off`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateCode {
    Red,
    Yellow,
    Green,
    /// Any other byte, kept for diagnostics.
    Unrecognized(u8),
}

impl StateCode {
    /// Decodes a wire state code. Codes are case-sensitive.
    #[inline]
    pub fn decode(code: u8) -> Self {
        match code {
            b'R' => StateCode::Red,
            b'Y' => StateCode::Yellow,
            b'G' => StateCode::Green,
            other => StateCode::Unrecognized(other),
        }
    }

    /// Resolves the state a lane should display for this request.
    #[inline]
    pub fn resolve(self) -> LightState {
        match self {
            StateCode::Red => LightState::Red,
            StateCode::Yellow => LightState::Yellow,
            StateCode::Green => LightState::Green,
            StateCode::Unrecognized(_) => LightState::Off,
        }
    }

    /// Returns the raw wire byte.
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            StateCode::Red => b'R',
            StateCode::Yellow => b'Y',
            StateCode::Green => b'G',
            StateCode::Unrecognized(byte) => byte,
        }
    }

    /// Returns true if this request falls back to all lamps off.
    #[inline]
    pub fn is_unrecognized(self) -> bool {
        matches!(self, StateCode::Unrecognized(_))
    }
}

impl From<LightState> for StateCode {
    /// `Off` has no wire code and maps to `Unrecognized(b'O')`, which resolves back to `Off`.
    fn from(state: LightState) -> Self {
        match state {
            LightState::Red => StateCode::Red,
            LightState::Yellow => StateCode::Yellow,
            LightState::Green => StateCode::Green,
            LightState::Off => StateCode::Unrecognized(b'O'),
        }
    }
}

/// A parsed instruction to set one lane to one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Directive {
    pub lane: LaneId,
    pub state: StateCode,
}

impl Directive {
    /// Creates a directive.
    #[inline]
    pub fn new(lane: LaneId, state: StateCode) -> Self {
        Self { lane, state }
    }
}

impl core::fmt::Display for Directive {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}:{}",
            char::from(self.lane.code()),
            char::from(self.state.code())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lane_codes_are_case_sensitive() {
        assert_eq!(LaneId::decode(b'N'), Some(LaneId::North));
        assert_eq!(LaneId::decode(b'W'), Some(LaneId::West));
        assert_eq!(LaneId::decode(b'n'), None);
        assert_eq!(LaneId::decode(b'X'), None);
    }

    #[test]
    fn lane_index_matches_all_order() {
        for (i, lane) in LaneId::ALL.iter().enumerate() {
            assert_eq!(lane.index(), i);
            assert_eq!(LaneId::decode(lane.code()), Some(*lane));
        }
    }

    #[test]
    fn unknown_state_codes_resolve_to_off() {
        assert_eq!(StateCode::decode(b'G').resolve(), LightState::Green);
        assert_eq!(StateCode::decode(b'g'), StateCode::Unrecognized(b'g'));
        assert_eq!(StateCode::decode(b'O').resolve(), LightState::Off);
        assert!(StateCode::decode(b'Z').is_unrecognized());
    }

    #[test]
    fn off_state_round_trips_through_state_code() {
        assert_eq!(StateCode::from(LightState::Off).resolve(), LightState::Off);
        assert_eq!(StateCode::from(LightState::Yellow), StateCode::Yellow);
    }
}
