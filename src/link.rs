//! Serial command link: the polling glue between a byte transport and the controller.

use crate::accumulator::{LineAccumulator, Push, SERIAL_BUFFER_SIZE};
use crate::controller::{Controller, LineReport};
use crate::lane::SignalLamps;
use crate::status::{Diagnostic, StatusEvent, StatusSink};

/// Baud rate expected by the host-side command producer.
///
/// Both ends must agree; the rate is fixed at integration time.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Trait for abstracting a non-blocking serial receiver.
pub trait ByteSource {
    /// Returns the next received byte, or `None` if nothing is available right now.
    ///
    /// Must not block. Receive errors (framing, noise) are handled internally
    /// and reported as `None`.
    fn read_byte(&mut self) -> Option<u8>;
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }
}

/// Couples a [`LineAccumulator`] with a [`Controller`].
///
/// Each complete line is parsed and applied before the next byte is taken, so
/// lanes are only ever mutated from the single polling loop.
///
/// # Type Parameters
/// * `L` - Lamp implementation type
/// * `N` - Line buffer capacity, including the reserved terminator slot
pub struct CommandLink<L: SignalLamps, const N: usize = SERIAL_BUFFER_SIZE> {
    accumulator: LineAccumulator<N>,
    controller: Controller<L>,
}

impl<L: SignalLamps, const N: usize> CommandLink<L, N> {
    /// Creates a link around a controller.
    pub fn new(controller: Controller<L>) -> Self {
        Self {
            accumulator: LineAccumulator::new(),
            controller,
        }
    }

    /// Consumes one byte, applying a line when its terminator arrives.
    ///
    /// # Returns
    /// * `Some(LineReport)` - A line was completed and applied
    /// * `None` - Still accumulating, or an over-long line was dropped
    pub fn feed<S: StatusSink>(&mut self, byte: u8, status: &mut S) -> Option<LineReport> {
        match self.accumulator.push(byte) {
            Push::LineReady(line) => Some(self.controller.apply_line(&line, status)),
            Push::Overflow => {
                status.report(StatusEvent::Diagnostic(Diagnostic::Overflow {
                    limit: LineAccumulator::<N>::LIMIT,
                }));
                None
            }
            Push::Accumulating | Push::Discarded | Push::Resynced => None,
        }
    }

    /// Feeds a run of bytes. Returns the number of lines applied.
    pub fn feed_all<S: StatusSink>(&mut self, bytes: &[u8], status: &mut S) -> usize {
        let mut lines = 0;
        for &byte in bytes {
            if self.feed(byte, status).is_some() {
                lines += 1;
            }
        }
        lines
    }

    /// Drains every byte currently available from `source`.
    ///
    /// Returns as soon as the source reports no data; call again on the next
    /// loop iteration. Returns the number of lines applied.
    pub fn poll<B: ByteSource, S: StatusSink>(&mut self, source: &mut B, status: &mut S) -> usize {
        let mut lines = 0;
        while let Some(byte) = source.read_byte() {
            if self.feed(byte, status).is_some() {
                lines += 1;
            }
        }
        lines
    }

    /// Returns the controller.
    pub fn controller(&self) -> &Controller<L> {
        &self.controller
    }

    /// Returns the controller mutably.
    pub fn controller_mut(&mut self) -> &mut Controller<L> {
        &mut self.controller
    }

    /// Returns the line accumulator.
    pub fn accumulator(&self) -> &LineAccumulator<N> {
        &self.accumulator
    }

    /// Consumes the link, returning the controller.
    pub fn into_controller(self) -> Controller<L> {
        self.controller
    }
}
