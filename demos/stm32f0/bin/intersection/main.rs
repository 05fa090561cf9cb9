#![no_std]
#![no_main]

use cortex_m_rt::entry;
use panic_halt as _;
use rtt_target::{rprintln, rtt_init_print};

use stm32f0_demos::serial_link::{SerialByteSource, SerialStatus};
use traffic_signal::{CommandLink, Controller, ControllerConfig};

mod hardware_setup;

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("=== Traffic Signal Controller ===");

    // Initialize all hardware
    let hw = hardware_setup::init_hardware();

    // All lanes go red before the first byte is read
    let controller = Controller::with_config(
        hw.heads,
        ControllerConfig {
            echo_lines: true,
            report_transitions: true,
        },
    );
    let mut link: CommandLink<hardware_setup::Head> = CommandLink::new(controller);

    let mut source = SerialByteSource::new(hw.rx);
    let mut status = SerialStatus::new(hw.tx);

    rprintln!("=== System Ready ===");
    rprintln!("Send lines like N:G,E:R,S:R,W:R");

    loop {
        link.poll(&mut source, &mut status);
    }
}
