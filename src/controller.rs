//! Intersection controller.
//!
//! Provides [`Controller`], which owns the four lanes of the intersection and
//! applies parsed directives to them, reporting echoes and diagnostics on a
//! [`StatusSink`].

use crate::lane::{Lane, SignalLamps, Transition};
use crate::parser::parse_line;
use crate::status::{Diagnostic, StatusEvent, StatusSink};
use crate::types::{Directive, LaneId, LightState};

/// Number of lanes at the intersection.
pub const LANE_COUNT: usize = 4;

/// Runtime options for what the controller reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    /// Echo every received line before applying it.
    pub echo_lines: bool,
    /// Report every lane state change.
    pub report_transitions: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            echo_lines: true,
            report_transitions: false,
        }
    }
}

/// Summary of applying one command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineReport {
    /// Directives applied, including those that fell back to `Off`.
    pub applied: usize,
    /// Segments skipped because they were malformed or named an unknown lane.
    pub rejected: usize,
    /// Directives whose state code was not recognised.
    pub fallbacks: usize,
}

impl LineReport {
    /// Number of diagnostics emitted for the line.
    pub fn diagnostics(&self) -> usize {
        self.rejected + self.fallbacks
    }
}

/// Drives the four lanes of an intersection.
///
/// All lanes show red as soon as the controller is created. Directives are
/// applied one at a time in the order received, so when a line names the same
/// lane twice the later segment wins.
///
/// # Type Parameters
/// * `L` - Lamp implementation type (same for all lanes)
pub struct Controller<L: SignalLamps> {
    lanes: [Lane<L>; LANE_COUNT],
    config: ControllerConfig,
}

impl<L: SignalLamps> Controller<L> {
    /// Creates a controller with the default configuration.
    ///
    /// `lamps` are given in [`LaneId::ALL`] order: north, east, south, west.
    pub fn new(lamps: [L; LANE_COUNT]) -> Self {
        Self::with_config(lamps, ControllerConfig::default())
    }

    /// Creates a controller with an explicit configuration.
    pub fn with_config(lamps: [L; LANE_COUNT], config: ControllerConfig) -> Self {
        let [north, east, south, west] = lamps;

        Self {
            lanes: [
                Lane::new(LaneId::North, north),
                Lane::new(LaneId::East, east),
                Lane::new(LaneId::South, south),
                Lane::new(LaneId::West, west),
            ],
            config,
        }
    }

    /// Applies one directive to its lane.
    ///
    /// An unrecognised state code switches the lane off and reports
    /// [`Diagnostic::UnknownState`].
    pub fn apply_directive<S: StatusSink>(
        &mut self,
        directive: Directive,
        status: &mut S,
    ) -> Transition {
        let lane = &mut self.lanes[directive.lane.index()];
        let transition = lane.set_state(directive.state);

        if let Some(code) = transition.fallback {
            status.report(StatusEvent::Diagnostic(Diagnostic::UnknownState {
                lane: directive.lane,
                code,
            }));
        }

        if self.config.report_transitions && transition.changed() {
            status.report(StatusEvent::Transition {
                lane: directive.lane,
                transition,
            });
        }

        transition
    }

    /// Parses and applies a complete command line, terminator stripped.
    ///
    /// Rejected segments are reported and skipped; the rest of the line is
    /// still applied. An empty line changes nothing.
    pub fn apply_line<S: StatusSink>(&mut self, line: &[u8], status: &mut S) -> LineReport {
        if self.config.echo_lines {
            status.report(StatusEvent::Received(line));
        }

        let mut report = LineReport::default();
        for segment in parse_line(line) {
            match segment {
                Ok(directive) => {
                    let transition = self.apply_directive(directive, status);
                    report.applied += 1;
                    if transition.fallback.is_some() {
                        report.fallbacks += 1;
                    }
                }
                Err(err) => {
                    status.report(StatusEvent::Diagnostic(err.into()));
                    report.rejected += 1;
                }
            }
        }

        report
    }

    /// Drives every lane back to red.
    pub fn reset(&mut self) {
        for lane in &mut self.lanes {
            lane.force(LightState::Red);
        }
    }

    /// Returns the state displayed by `lane`.
    pub fn state(&self, lane: LaneId) -> LightState {
        self.lanes[lane.index()].state()
    }

    /// Returns the states of all lanes in [`LaneId::ALL`] order.
    pub fn states(&self) -> [LightState; LANE_COUNT] {
        core::array::from_fn(|i| self.lanes[i].state())
    }

    /// Returns a lane.
    pub fn lane(&self, lane: LaneId) -> &Lane<L> {
        &self.lanes[lane.index()]
    }

    /// Returns the active configuration.
    pub fn config(&self) -> ControllerConfig {
        self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: ControllerConfig) {
        self.config = config;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::NoStatus;
    use crate::types::{Lamp, StateCode};

    #[derive(Default)]
    struct CountingLamps {
        lit: Option<Lamp>,
        writes: usize,
    }

    impl SignalLamps for CountingLamps {
        fn show(&mut self, lit: Option<Lamp>) {
            self.lit = lit;
            self.writes += 1;
        }
    }

    fn controller() -> Controller<CountingLamps> {
        Controller::new(Default::default())
    }

    #[test]
    fn starts_all_red() {
        let controller = controller();
        assert_eq!(controller.states(), [LightState::Red; LANE_COUNT]);
        for lane in LaneId::ALL {
            assert_eq!(controller.lane(lane).lamps().lit, Some(Lamp::Red));
        }
    }

    #[test]
    fn apply_directive_only_touches_its_lane() {
        let mut controller = controller();
        controller.apply_directive(Directive::new(LaneId::South, StateCode::Green), &mut NoStatus);

        assert_eq!(
            controller.states(),
            [
                LightState::Red,
                LightState::Red,
                LightState::Green,
                LightState::Red
            ]
        );
    }

    #[test]
    fn line_report_counts_outcomes() {
        let mut controller = controller();
        let report = controller.apply_line(b"N:G,X:R,E:Z,bad,W:Y", &mut NoStatus);

        assert_eq!(report.applied, 3);
        assert_eq!(report.rejected, 2);
        assert_eq!(report.fallbacks, 1);
        assert_eq!(report.diagnostics(), 3);
    }

    #[test]
    fn reset_redrives_every_lane() {
        let mut controller = controller();
        controller.apply_line(b"N:G,E:Y", &mut NoStatus);
        controller.reset();

        assert_eq!(controller.states(), [LightState::Red; LANE_COUNT]);
        assert_eq!(controller.lane(LaneId::West).lamps().writes, 2);
    }
}
