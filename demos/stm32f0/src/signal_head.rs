use embedded_hal::digital::v2::OutputPin;
use traffic_signal::{Lamp, SignalLamps};

/// Signal head built from three discrete lamps on GPIO lines
///
/// This wrapper implements the SignalLamps trait required by the controller,
/// handling the active-high/active-low wiring of the lamp drivers.
pub struct GpioSignalHead<P: OutputPin> {
    red: P,
    yellow: P,
    green: P,
    active_low: bool,
}

impl<P: OutputPin> GpioSignalHead<P> {
    /// Create a new signal head with every lamp dark
    ///
    /// # Arguments
    /// * `red` - GPIO line for the red lamp
    /// * `yellow` - GPIO line for the yellow lamp
    /// * `green` - GPIO line for the green lamp
    /// * `active_low` - true when a low level lights the lamp (sinking drivers, common anode)
    pub fn new(red: P, yellow: P, green: P, active_low: bool) -> Self {
        let mut head = Self {
            red,
            yellow,
            green,
            active_low,
        };
        head.show(None);
        head
    }

    fn drive(pin: &mut P, on: bool, active_low: bool) {
        // GPIO writes on this HAL are infallible; a failed write leaves the lamp as it was
        let _ = if on != active_low {
            pin.set_high()
        } else {
            pin.set_low()
        };
    }
}

impl<P: OutputPin> SignalLamps for GpioSignalHead<P> {
    fn show(&mut self, lit: Option<Lamp>) {
        let active_low = self.active_low;

        // Darken the other lamps first so two are never lit together
        if lit != Some(Lamp::Red) {
            Self::drive(&mut self.red, false, active_low);
        }
        if lit != Some(Lamp::Yellow) {
            Self::drive(&mut self.yellow, false, active_low);
        }
        if lit != Some(Lamp::Green) {
            Self::drive(&mut self.green, false, active_low);
        }

        match lit {
            Some(Lamp::Red) => Self::drive(&mut self.red, true, active_low),
            Some(Lamp::Yellow) => Self::drive(&mut self.yellow, true, active_low),
            Some(Lamp::Green) => Self::drive(&mut self.green, true, active_low),
            None => {}
        }
    }
}
