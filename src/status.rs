//! Status channel: diagnostics and echoes reported back to the command producer.

use crate::lane::Transition;
use crate::parser::SegmentError;
use crate::types::LaneId;
use core::fmt::Write;

/// Recoverable faults detected while handling the command stream.
///
/// None of these halt the control loop or leave a lane without a defined state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Diagnostic {
    /// A line exceeded the buffer capacity and was dropped.
    Overflow {
        /// Payload limit that was exceeded.
        limit: usize,
    },

    /// A segment was rejected and skipped.
    Segment(SegmentError),

    /// A state code was not recognised; the lane was switched off.
    UnknownState {
        /// Lane the request targeted.
        lane: LaneId,
        /// The unrecognised wire byte.
        code: u8,
    },
}

impl core::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Diagnostic::Overflow { limit } => {
                write!(f, "overflow: line longer than {} bytes dropped", limit)
            }
            Diagnostic::Segment(err) if err.is_malformed() => {
                write!(f, "malformed segment: {}", err)
            }
            Diagnostic::Segment(err) => write!(f, "rejected segment: {}", err),
            Diagnostic::UnknownState { lane, code } => {
                write!(
                    f,
                    "unknown state {:?} for lane {}, lamps off",
                    char::from(*code),
                    char::from(lane.code())
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Diagnostic {}

impl From<SegmentError> for Diagnostic {
    fn from(err: SegmentError) -> Self {
        Diagnostic::Segment(err)
    }
}

/// An event reported on the status channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent<'a> {
    /// Echo of a received line, terminator stripped.
    Received(&'a [u8]),
    /// A recoverable fault.
    Diagnostic(Diagnostic),
    /// A lane changed state.
    Transition { lane: LaneId, transition: Transition },
}

/// Trait for abstracting the outbound status channel.
///
/// Reporting is observability only and cannot fail; implementations drop
/// events they cannot deliver.
pub trait StatusSink {
    /// Reports one event.
    fn report(&mut self, event: StatusEvent<'_>);
}

impl<T: StatusSink + ?Sized> StatusSink for &mut T {
    fn report(&mut self, event: StatusEvent<'_>) {
        (**self).report(event);
    }
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStatus;

impl StatusSink for NoStatus {
    fn report(&mut self, _event: StatusEvent<'_>) {}
}

/// Renders status events as text lines on any [`core::fmt::Write`].
///
/// Echoes start with `> `, diagnostics with `! ` and transitions with `= `,
/// so a reader can tell them apart without parsing the rest of the line.
pub struct TextStatus<W: Write> {
    writer: W,
}

impl<W: Write> TextStatus<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns a reference to the writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Consumes the sink, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_event(&mut self, event: StatusEvent<'_>) -> core::fmt::Result {
        match event {
            StatusEvent::Received(line) => {
                self.writer.write_str("> ")?;
                for &byte in line {
                    // Non-printable bytes are shown escaped so the echo stays on one line.
                    if byte.is_ascii_graphic() || byte == b' ' {
                        self.writer.write_char(char::from(byte))?;
                    } else {
                        write!(self.writer, "\\x{:02x}", byte)?;
                    }
                }
                self.writer.write_str("\r\n")
            }
            StatusEvent::Diagnostic(diagnostic) => write!(self.writer, "! {}\r\n", diagnostic),
            StatusEvent::Transition { lane, transition } => write!(
                self.writer,
                "= {}:{:?}\r\n",
                char::from(lane.code()),
                transition.to
            ),
        }
    }
}

impl<W: Write> StatusSink for TextStatus<W> {
    fn report(&mut self, event: StatusEvent<'_>) {
        let _ = self.write_event(event);
    }
}
