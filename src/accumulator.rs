//! Bounded assembly of serial bytes into command lines.

use heapless::Vec;

/// Capacity of the serial line buffer, including the reserved terminator slot.
pub const SERIAL_BUFFER_SIZE: usize = 64;

/// Longest line payload accepted by a default-sized accumulator.
pub const MAX_LINE_LEN: usize = SERIAL_BUFFER_SIZE - 1;

/// Byte that terminates a command line.
pub const LINE_TERMINATOR: u8 = b'\n';

/// A complete command line, without its terminator.
pub type Line<const N: usize = SERIAL_BUFFER_SIZE> = Vec<u8, N>;

/// Outcome of pushing one byte into a [`LineAccumulator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Push<const N: usize = SERIAL_BUFFER_SIZE> {
    /// Byte stored, line not complete yet.
    Accumulating,
    /// Terminator received. The buffer has been reset and the line handed out.
    LineReady(Line<N>),
    /// Line exceeded capacity. The buffer has been cleared and the rest of the
    /// line will be dropped up to its terminator.
    Overflow,
    /// Byte dropped because it belongs to an over-long line.
    Discarded,
    /// Terminator of an over-long line received. Accumulation starts afresh.
    Resynced,
}

/// Collects bytes into newline-terminated lines in a fixed-size buffer.
///
/// Holds at most `N - 1` payload bytes; one slot is reserved for the
/// terminator. The buffer never grows.
#[derive(Debug, Clone, Default)]
pub struct LineAccumulator<const N: usize = SERIAL_BUFFER_SIZE> {
    buffer: Vec<u8, N>,
    discarding: bool,
}

impl<const N: usize> LineAccumulator<N> {
    /// Payload limit of this accumulator.
    pub const LIMIT: usize = N.saturating_sub(1);

    /// Creates an empty accumulator.
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            discarding: false,
        }
    }

    /// Consumes one byte.
    pub fn push(&mut self, byte: u8) -> Push<N> {
        if byte == LINE_TERMINATOR {
            if self.discarding {
                self.discarding = false;
                return Push::Resynced;
            }
            return Push::LineReady(core::mem::replace(&mut self.buffer, Vec::new()));
        }

        if self.discarding {
            return Push::Discarded;
        }

        if self.buffer.len() >= Self::LIMIT || self.buffer.push(byte).is_err() {
            self.buffer.clear();
            self.discarding = true;
            return Push::Overflow;
        }

        Push::Accumulating
    }

    /// Returns the bytes accumulated so far.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Returns true while the rest of an over-long line is being dropped.
    pub fn is_discarding(&self) -> bool {
        self.discarding
    }

    /// Drops any partial line and leaves the discarding state.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.discarding = false;
    }
}
