use core::fmt::Write;

use embedded_hal::serial::Read;
use rtt_target::rprintln;
use traffic_signal::{ByteSource, StatusEvent, StatusSink, TextStatus};

/// Non-blocking byte source over a HAL serial receiver
///
/// Receive errors (overrun, framing, noise) are logged over RTT and the byte
/// is dropped; the line accumulator resynchronises on the next terminator.
pub struct SerialByteSource<R: Read<u8>> {
    rx: R,
}

impl<R: Read<u8>> SerialByteSource<R> {
    pub fn new(rx: R) -> Self {
        Self { rx }
    }
}

impl<R: Read<u8>> ByteSource for SerialByteSource<R> {
    fn read_byte(&mut self) -> Option<u8> {
        match self.rx.read() {
            Ok(byte) => Some(byte),
            Err(nb::Error::WouldBlock) => None,
            Err(nb::Error::Other(_)) => {
                rprintln!("serial receive error, byte dropped");
                None
            }
        }
    }
}

/// Status sink that mirrors every event to RTT and writes it back over the serial link
pub struct SerialStatus<W: Write> {
    text: TextStatus<W>,
}

impl<W: Write> SerialStatus<W> {
    pub fn new(tx: W) -> Self {
        Self {
            text: TextStatus::new(tx),
        }
    }
}

impl<W: Write> StatusSink for SerialStatus<W> {
    fn report(&mut self, event: StatusEvent<'_>) {
        match event {
            StatusEvent::Received(line) => rprintln!("rx {} bytes", line.len()),
            StatusEvent::Diagnostic(diagnostic) => rprintln!("diagnostic: {}", diagnostic),
            StatusEvent::Transition { lane, transition } => {
                rprintln!("{:?}: {:?} -> {:?}", lane, transition.from, transition.to)
            }
        }
        self.text.report(event);
    }
}
