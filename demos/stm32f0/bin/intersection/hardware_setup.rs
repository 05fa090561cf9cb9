use rtt_target::rprintln;
use stm32f0xx_hal::{
    gpio::{Output, Pin, PushPull},
    pac,
    prelude::*,
    serial::{Rx, Serial, Tx},
    time::Bps,
};

use stm32f0_demos::signal_head::GpioSignalHead;
use traffic_signal::DEFAULT_BAUD_RATE;

/// Type-erased lamp output so all four heads share one type
pub type LampPin = Pin<Output<PushPull>>;

/// Signal head type used for every lane
pub type Head = GpioSignalHead<LampPin>;

/// Serial halves of USART2 (ST-LINK virtual COM port on Nucleo boards)
pub type SerialTx = Tx<pac::USART2>;
pub type SerialRx = Rx<pac::USART2>;

/// Lamp drivers on the demo board are active-high
const LAMPS_ACTIVE_LOW: bool = false;

/// Container for all initialized hardware peripherals
pub struct HardwareContext {
    /// Signal heads in north, east, south, west order
    pub heads: [Head; 4],
    pub tx: SerialTx,
    pub rx: SerialRx,
}

/// Initialize all hardware peripherals
///
/// This function handles all hardware initialization in one place:
/// - System clock configuration
/// - GPIO port initialization
/// - Signal head outputs
/// - USART2 at the command link baud rate
///
/// # Returns
/// A `HardwareContext` containing all initialized peripherals ready for use
pub fn init_hardware() -> HardwareContext {
    let mut dp = pac::Peripherals::take().unwrap();

    let mut rcc = dp.RCC.configure().sysclk(48.mhz()).freeze(&mut dp.FLASH);
    rprintln!("System clock configured: {} Hz", rcc.clocks.sysclk().0);

    let gpioa = dp.GPIOA.split(&mut rcc);
    let gpiob = dp.GPIOB.split(&mut rcc);
    let gpioc = dp.GPIOC.split(&mut rcc);

    let (heads, serial_pins) = cortex_m::interrupt::free(|cs| {
        let north = GpioSignalHead::new(
            gpioa.pa0.into_push_pull_output(cs).downgrade(),
            gpioa.pa1.into_push_pull_output(cs).downgrade(),
            gpioa.pa4.into_push_pull_output(cs).downgrade(),
            LAMPS_ACTIVE_LOW,
        );
        let east = GpioSignalHead::new(
            gpiob.pb0.into_push_pull_output(cs).downgrade(),
            gpiob.pb1.into_push_pull_output(cs).downgrade(),
            gpiob.pb2.into_push_pull_output(cs).downgrade(),
            LAMPS_ACTIVE_LOW,
        );
        let south = GpioSignalHead::new(
            gpioc.pc0.into_push_pull_output(cs).downgrade(),
            gpioc.pc1.into_push_pull_output(cs).downgrade(),
            gpioc.pc2.into_push_pull_output(cs).downgrade(),
            LAMPS_ACTIVE_LOW,
        );
        let west = GpioSignalHead::new(
            gpioc.pc3.into_push_pull_output(cs).downgrade(),
            gpioc.pc4.into_push_pull_output(cs).downgrade(),
            gpioc.pc5.into_push_pull_output(cs).downgrade(),
            LAMPS_ACTIVE_LOW,
        );

        let serial_pins = (
            gpioa.pa2.into_alternate_af1(cs),
            gpioa.pa3.into_alternate_af1(cs),
        );

        ([north, east, south, west], serial_pins)
    });
    rprintln!("Signal heads configured (N: PA0/1/4, E: PB0/1/2, S: PC0/1/2, W: PC3/4/5)");

    let serial = Serial::usart2(dp.USART2, serial_pins, Bps(DEFAULT_BAUD_RATE), &mut rcc);
    let (tx, rx) = serial.split();
    rprintln!("USART2 configured at {} baud (PA2/PA3)", DEFAULT_BAUD_RATE);

    HardwareContext { heads, tx, rx }
}
