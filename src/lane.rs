//! Lane model and the lamp hardware abstraction.
//!
//! Provides [`Lane`], which owns the three lamps of one approach and records the
//! state it is displaying, and the [`SignalLamps`] trait implemented by lamp
//! hardware.

use crate::types::{Lamp, LaneId, LightState, StateCode};

/// Trait for abstracting the three lamps of a signal head.
///
/// Implement this for your lamp hardware (GPIO lines, an RGB LED, a relay board)
/// to allow a [`Lane`] to drive it.
pub trait SignalLamps {
    /// Lights `lit` and darkens the other two lamps, or darkens all three for `None`.
    ///
    /// Implementations must switch the other lamps off before switching the new
    /// one on, so two lamps are never lit at the same time. Handle any hardware
    /// errors internally - this method cannot fail.
    fn show(&mut self, lit: Option<Lamp>);
}

impl<T: SignalLamps + ?Sized> SignalLamps for &mut T {
    fn show(&mut self, lit: Option<Lamp>) {
        (**self).show(lit);
    }
}

/// Result of applying a requested state to a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// State displayed before the request.
    pub from: LightState,
    /// State displayed after the request.
    pub to: LightState,
    /// Set when the requested code was not recognised and the lane fell back to `Off`.
    pub fallback: Option<u8>,
}

impl Transition {
    /// Returns true if the displayed state changed.
    #[inline]
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// One approach of the intersection: its identity, its lamps and its displayed state.
pub struct Lane<L: SignalLamps> {
    id: LaneId,
    lamps: L,
    state: LightState,
}

impl<L: SignalLamps> Lane<L> {
    /// Creates a lane and drives its lamps to red.
    pub fn new(id: LaneId, lamps: L) -> Self {
        let mut lane = Self {
            id,
            lamps,
            state: LightState::Red,
        };
        lane.force(LightState::Red);
        lane
    }

    /// Applies a requested state.
    ///
    /// Unrecognised codes resolve to [`LightState::Off`] and are reported through
    /// [`Transition::fallback`]. Re-applying the displayed state leaves the lamps
    /// untouched.
    pub fn set_state(&mut self, request: StateCode) -> Transition {
        let from = self.state;
        let to = request.resolve();

        if to != from {
            self.lamps.show(to.lamp());
            self.state = to;
        }

        Transition {
            from,
            to,
            fallback: match request {
                StateCode::Unrecognized(code) => Some(code),
                _ => None,
            },
        }
    }

    /// Drives the lamps to `state` even if it is already displayed.
    pub fn force(&mut self, state: LightState) {
        self.lamps.show(state.lamp());
        self.state = state;
    }

    /// Returns the lane identity.
    pub fn id(&self) -> LaneId {
        self.id
    }

    /// Returns the displayed state.
    pub fn state(&self) -> LightState {
        self.state
    }

    /// Returns a reference to the lamp hardware.
    pub fn lamps(&self) -> &L {
        &self.lamps
    }

    /// Consumes the lane, returning the lamp hardware.
    pub fn into_lamps(self) -> L {
        self.lamps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    struct MockLamps {
        history: Vec<Option<Lamp>, 16>,
    }

    impl MockLamps {
        fn new() -> Self {
            Self {
                history: Vec::new(),
            }
        }
    }

    impl SignalLamps for MockLamps {
        fn show(&mut self, lit: Option<Lamp>) {
            let _ = self.history.push(lit);
        }
    }

    #[test]
    fn new_lane_drives_red() {
        let lane = Lane::new(LaneId::North, MockLamps::new());
        assert_eq!(lane.state(), LightState::Red);
        assert_eq!(lane.lamps().history.as_slice(), &[Some(Lamp::Red)]);
    }

    #[test]
    fn set_state_lights_matching_lamp() {
        let mut lane = Lane::new(LaneId::East, MockLamps::new());

        let transition = lane.set_state(StateCode::Green);
        assert!(transition.changed());
        assert_eq!(transition.to, LightState::Green);
        assert_eq!(transition.fallback, None);
        assert_eq!(lane.lamps().history.last(), Some(&Some(Lamp::Green)));
    }

    #[test]
    fn repeated_state_does_not_touch_lamps() {
        let mut lane = Lane::new(LaneId::South, MockLamps::new());
        lane.set_state(StateCode::Yellow);
        let writes = lane.lamps().history.len();

        let transition = lane.set_state(StateCode::Yellow);
        assert!(!transition.changed());
        assert_eq!(lane.lamps().history.len(), writes);
        assert_eq!(lane.state(), LightState::Yellow);
    }

    #[test]
    fn unrecognized_code_darkens_all_lamps() {
        let mut lane = Lane::new(LaneId::West, MockLamps::new());

        let transition = lane.set_state(StateCode::Unrecognized(b'Z'));
        assert_eq!(transition.to, LightState::Off);
        assert_eq!(transition.fallback, Some(b'Z'));
        assert_eq!(lane.lamps().history.last(), Some(&None));
    }

    #[test]
    fn force_redrives_current_state() {
        let mut lane = Lane::new(LaneId::North, MockLamps::new());
        lane.force(LightState::Red);
        assert_eq!(lane.lamps().history.len(), 2);
    }
}
