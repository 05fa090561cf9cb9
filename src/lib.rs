#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`LineAccumulator`**: Assembles serial bytes into newline-terminated lines in a fixed buffer
//! - **`parse_line`**: Splits a line into `<lane>:<state>` segments without modifying it
//! - **`Directive`**: One parsed instruction to set one lane to one state
//! - **`Controller`**: Owns the four lanes and applies directives to them
//! - **`Lane`**: One approach of the intersection and the state it displays
//! - **`SignalLamps`**: Trait to implement for your lamp hardware
//! - **`StatusSink`**: Trait to implement for your status channel
//! - **`ByteSource`**: Trait to implement for your serial receiver
//! - **`CommandLink`**: Polling glue from a `ByteSource` to a `Controller`
//!
//! Every fault in the command stream is recoverable: bad segments are skipped,
//! unknown states switch a lane off, over-long lines are dropped. No input can
//! leave a lane without a defined state.

pub mod accumulator;
pub mod colors;
pub mod controller;
pub mod encoder;
pub mod lane;
pub mod link;
pub mod parser;
pub mod status;
pub mod types;

pub use accumulator::{LineAccumulator, MAX_LINE_LEN, Push, SERIAL_BUFFER_SIZE};
pub use colors::{RgbLed, RgbSignalHead, SignalColors};
pub use controller::{Controller, ControllerConfig, LANE_COUNT, LineReport};
pub use encoder::{EncodeError, encode_line};
pub use lane::{Lane, SignalLamps, Transition};
pub use link::{ByteSource, CommandLink, DEFAULT_BAUD_RATE};
pub use parser::{SegmentError, parse_line, parse_segment};
pub use status::{Diagnostic, NoStatus, StatusEvent, StatusSink, TextStatus};
pub use types::{Directive, Lamp, LaneId, LightState, StateCode};

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;
