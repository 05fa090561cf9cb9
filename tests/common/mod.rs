//! Shared test infrastructure for traffic-signal integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use traffic_signal::{
    ByteSource, CommandLink, Controller, ControllerConfig, Diagnostic, Lamp, LaneId, LightState,
    RgbLed, SignalLamps, Srgb, StatusEvent, StatusSink,
};

// ============================================================================
// Mock Lamps
// ============================================================================

/// Mock signal head that records every lamp change for testing
pub struct MockLamps {
    lit: Option<Lamp>,
    history: heapless::Vec<Option<Lamp>, 64>,
}

impl MockLamps {
    pub fn new() -> Self {
        Self {
            lit: None,
            history: heapless::Vec::new(),
        }
    }

    pub fn lit(&self) -> Option<Lamp> {
        self.lit
    }

    pub fn history(&self) -> &[Option<Lamp>] {
        &self.history
    }
}

impl SignalLamps for MockLamps {
    fn show(&mut self, lit: Option<Lamp>) {
        self.lit = lit;
        let _ = self.history.push(lit);
    }
}

// ============================================================================
// Mock RGB LED
// ============================================================================

/// Mock RGB LED that records all color changes for testing
pub struct MockLed {
    current_color: Srgb,
    color_history: heapless::Vec<Srgb, 32>,
}

impl MockLed {
    pub fn new() -> Self {
        Self {
            current_color: Srgb::new(0.0, 0.0, 0.0),
            color_history: heapless::Vec::new(),
        }
    }

    pub fn get_last_color(&self) -> Srgb {
        self.current_color
    }

    pub fn color_history(&self) -> &[Srgb] {
        &self.color_history
    }
}

impl RgbLed for MockLed {
    fn set_color(&mut self, color: Srgb) {
        self.current_color = color;
        let _ = self.color_history.push(color);
    }
}

// ============================================================================
// Recording Status Sink
// ============================================================================

/// Owned copy of a status event
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Received(heapless::Vec<u8, 64>),
    Diagnostic(Diagnostic),
    Transition(LaneId, LightState),
}

/// Status sink that keeps every event for inspection
pub struct RecordingStatus {
    events: heapless::Vec<Recorded, 64>,
}

impl RecordingStatus {
    pub fn new() -> Self {
        Self {
            events: heapless::Vec::new(),
        }
    }

    pub fn events(&self) -> &[Recorded] {
        &self.events
    }

    pub fn diagnostics(&self) -> heapless::Vec<Diagnostic, 64> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Recorded::Diagnostic(diagnostic) => Some(*diagnostic),
                _ => None,
            })
            .collect()
    }

    pub fn echoes(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Recorded::Received(_)))
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl StatusSink for RecordingStatus {
    fn report(&mut self, event: StatusEvent<'_>) {
        let recorded = match event {
            StatusEvent::Received(line) => {
                Recorded::Received(heapless::Vec::from_slice(line).unwrap_or_default())
            }
            StatusEvent::Diagnostic(diagnostic) => Recorded::Diagnostic(diagnostic),
            StatusEvent::Transition { lane, transition } => {
                Recorded::Transition(lane, transition.to)
            }
        };
        let _ = self.events.push(recorded);
    }
}

// ============================================================================
// Mock Serial Receiver
// ============================================================================

/// Byte source that hands out a fixed script, optionally in bursts
pub struct ScriptedSource<'a> {
    bytes: &'a [u8],
    position: usize,
    burst: usize,
    remaining_in_burst: usize,
}

impl<'a> ScriptedSource<'a> {
    /// Every byte is available on the first poll
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_burst(bytes, usize::MAX)
    }

    /// At most `burst` bytes are available per poll
    pub fn with_burst(bytes: &'a [u8], burst: usize) -> Self {
        Self {
            bytes,
            position: 0,
            burst,
            remaining_in_burst: burst,
        }
    }

    pub fn is_drained(&self) -> bool {
        self.position >= self.bytes.len()
    }
}

impl ByteSource for ScriptedSource<'_> {
    fn read_byte(&mut self) -> Option<u8> {
        if self.remaining_in_burst == 0 {
            // Next poll gets a fresh burst
            self.remaining_in_burst = self.burst;
            return None;
        }
        let byte = *self.bytes.get(self.position)?;
        self.position += 1;
        self.remaining_in_burst -= 1;
        Some(byte)
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub fn lamps() -> [MockLamps; 4] {
    [
        MockLamps::new(),
        MockLamps::new(),
        MockLamps::new(),
        MockLamps::new(),
    ]
}

pub fn controller() -> Controller<MockLamps> {
    Controller::new(lamps())
}

pub fn controller_with(config: ControllerConfig) -> Controller<MockLamps> {
    Controller::with_config(lamps(), config)
}

pub fn link() -> CommandLink<MockLamps> {
    CommandLink::new(controller())
}

/// Compare two colors with floating-point tolerance
pub fn colors_equal(a: Srgb, b: Srgb) -> bool {
    const EPSILON: f32 = 0.001;
    (a.red - b.red).abs() < EPSILON
        && (a.green - b.green).abs() < EPSILON
        && (a.blue - b.blue).abs() < EPSILON
}
