//! Command line parsing.
//!
//! A line is a comma-separated list of `<lane>:<state>` segments, for example
//! `N:G,E:R,S:R,W:R`. Each segment is validated on its own, so one bad segment
//! never hides the ones after it. Parsing borrows the line and never modifies it.

use crate::types::{Directive, LaneId, StateCode};

/// Separator between segments.
pub const SEGMENT_SEPARATOR: u8 = b',';

/// Separator between lane and state inside a segment.
pub const FIELD_SEPARATOR: u8 = b':';

/// Exact length of a segment.
pub const SEGMENT_LEN: usize = 3;

/// Reasons a segment is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SegmentError {
    /// Segment is not exactly three bytes long.
    WrongLength(usize),

    /// Second byte is not `:`.
    MissingSeparator(u8),

    /// Lane code is not one of `N`, `E`, `S`, `W`.
    UnknownLane(u8),
}

impl SegmentError {
    /// Returns true for syntax errors, false for a well-formed segment naming an unknown lane.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, SegmentError::UnknownLane(_))
    }
}

impl core::fmt::Display for SegmentError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SegmentError::WrongLength(len) => {
                write!(f, "segment must be {} bytes, got {}", SEGMENT_LEN, len)
            }
            SegmentError::MissingSeparator(found) => {
                write!(f, "expected ':' after lane code, found {:?}", char::from(*found))
            }
            SegmentError::UnknownLane(code) => {
                write!(f, "unknown lane code {:?}", char::from(*code))
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SegmentError {}

/// Parses one segment.
///
/// The state byte is not validated here: unknown state codes are forwarded as
/// [`StateCode::Unrecognized`].
pub fn parse_segment(segment: &[u8]) -> Result<Directive, SegmentError> {
    let [lane, separator, state] = segment else {
        return Err(SegmentError::WrongLength(segment.len()));
    };

    if *separator != FIELD_SEPARATOR {
        return Err(SegmentError::MissingSeparator(*separator));
    }

    let lane = LaneId::decode(*lane).ok_or(SegmentError::UnknownLane(*lane))?;
    Ok(Directive::new(lane, StateCode::decode(*state)))
}

/// Splits a line into parsed segments.
///
/// A single trailing carriage return is ignored. Empty segments, such as those
/// produced by `,,` or an empty line, are skipped without an error.
pub fn parse_line(line: &[u8]) -> Segments<'_> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    Segments {
        rest: line,
        finished: line.is_empty(),
    }
}

/// Iterator over the segments of a line, in order.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a [u8],
    finished: bool,
}

impl<'a> Segments<'a> {
    fn next_raw(&mut self) -> Option<&'a [u8]> {
        if self.finished {
            return None;
        }

        match self.rest.iter().position(|&b| b == SEGMENT_SEPARATOR) {
            Some(at) => {
                let (segment, tail) = self.rest.split_at(at);
                self.rest = &tail[1..];
                Some(segment)
            }
            None => {
                self.finished = true;
                Some(self.rest)
            }
        }
    }
}

impl Iterator for Segments<'_> {
    type Item = Result<Directive, SegmentError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let segment = self.next_raw()?;
            if !segment.is_empty() {
                return Some(parse_segment(segment));
            }
        }
    }
}

impl core::iter::FusedIterator for Segments<'_> {}
