//! Building command lines on the producer side of the link.

use crate::accumulator::{LINE_TERMINATOR, MAX_LINE_LEN, SERIAL_BUFFER_SIZE};
use crate::parser::{FIELD_SEPARATOR, SEGMENT_SEPARATOR};
use crate::types::{LaneId, LightState};
use heapless::String;

/// A terminated command line ready to be written to the serial port.
pub type CommandString = String<SERIAL_BUFFER_SIZE>;

/// Errors that can occur while encoding a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// No lane states were given, so there is nothing to send.
    Empty,

    /// The line would exceed the controller's payload limit.
    TooLong,
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EncodeError::Empty => write!(f, "no lane states to encode"),
            EncodeError::TooLong => {
                write!(f, "command line exceeds {} bytes", MAX_LINE_LEN)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}

/// Encodes lane states as a newline-terminated command line, e.g. `N:G,E:R\n`.
///
/// A state without a wire code (`Off`) is sent as red, so the producer never
/// asks the controller for anything less safe than red.
pub fn encode_line<I>(states: I) -> Result<CommandString, EncodeError>
where
    I: IntoIterator<Item = (LaneId, LightState)>,
{
    let mut line = CommandString::new();

    for (lane, state) in states {
        let code = state.code().unwrap_or(b'R');
        if !line.is_empty() {
            push(&mut line, SEGMENT_SEPARATOR)?;
        }
        push(&mut line, lane.code())?;
        push(&mut line, FIELD_SEPARATOR)?;
        push(&mut line, code)?;
    }

    if line.is_empty() {
        return Err(EncodeError::Empty);
    }

    line.push(char::from(LINE_TERMINATOR))
        .map_err(|_| EncodeError::TooLong)?;
    Ok(line)
}

fn push(line: &mut CommandString, byte: u8) -> Result<(), EncodeError> {
    if line.len() >= MAX_LINE_LEN {
        return Err(EncodeError::TooLong);
    }
    line.push(char::from(byte)).map_err(|_| EncodeError::TooLong)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_all_lanes_in_given_order() {
        let line = encode_line([
            (LaneId::North, LightState::Green),
            (LaneId::East, LightState::Red),
            (LaneId::South, LightState::Yellow),
            (LaneId::West, LightState::Red),
        ])
        .unwrap();
        assert_eq!(line.as_str(), "N:G,E:R,S:Y,W:R\n");
    }

    #[test]
    fn off_is_sent_as_red() {
        let line = encode_line([(LaneId::West, LightState::Off)]).unwrap();
        assert_eq!(line.as_str(), "W:R\n");
    }

    #[test]
    fn empty_input_is_rejected() {
        let none: [(LaneId, LightState); 0] = [];
        assert_eq!(encode_line(none), Err(EncodeError::Empty));
    }

    #[test]
    fn overlong_line_is_rejected() {
        let states = LaneId::ALL
            .iter()
            .cycle()
            .take(20)
            .map(|&lane| (lane, LightState::Green));
        assert_eq!(encode_line(states), Err(EncodeError::TooLong));
    }
}
