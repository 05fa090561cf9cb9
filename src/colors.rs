//! Signal heads built from a single RGB LED.
//!
//! Boards without discrete red/yellow/green lamps can show a lane's state on one
//! RGB LED. [`RgbSignalHead`] adapts any [`RgbLed`] to [`SignalLamps`].
//!
//! All colors are `palette::Srgb` in the 0.0-1.0 range.

use crate::lane::SignalLamps;
use crate::types::Lamp;
use palette::{FromColor, Hsv, Srgb};

/// All channels dark.
pub const LAMP_OFF: Srgb = Srgb::new(0.0, 0.0, 0.0);

/// Signal red.
pub const SIGNAL_RED: Srgb = Srgb::new(1.0, 0.0, 0.0);

/// Signal green, with a touch of blue as on LED signal heads.
pub const SIGNAL_GREEN: Srgb = Srgb::new(0.0, 1.0, 0.25);

/// Hue of the amber lamp in degrees.
pub const AMBER_HUE: f32 = 40.0;

/// Creates an RGB color from HSV (Hue, Saturation, Value) components.
#[inline]
pub fn hsv(hue: f32, saturation: f32, value: f32) -> Srgb {
    Srgb::from_color(Hsv::new(hue, saturation, value))
}

/// Scales every channel by `brightness`, clamped to 0.0-1.0.
#[inline]
pub fn dimmed(color: Srgb, brightness: f32) -> Srgb {
    let b = brightness.clamp(0.0, 1.0);
    Srgb::new(color.red * b, color.green * b, color.blue * b)
}

/// Trait for abstracting RGB LED hardware.
pub trait RgbLed {
    /// Sets the LED to the specified RGB color.
    ///
    /// Color components are in the range 0.0-1.0. Implementations should
    /// convert these to their hardware's native format (e.g., PWM duty cycles).
    fn set_color(&mut self, color: Srgb);
}

/// Colors used by an [`RgbSignalHead`] for each lamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalColors {
    pub red: Srgb,
    pub yellow: Srgb,
    pub green: Srgb,
}

impl SignalColors {
    /// Returns the color shown for `lit`.
    pub fn color(&self, lit: Option<Lamp>) -> Srgb {
        match lit {
            Some(Lamp::Red) => self.red,
            Some(Lamp::Yellow) => self.yellow,
            Some(Lamp::Green) => self.green,
            None => LAMP_OFF,
        }
    }

    /// Returns the same colors at a different brightness.
    pub fn dimmed(&self, brightness: f32) -> Self {
        Self {
            red: dimmed(self.red, brightness),
            yellow: dimmed(self.yellow, brightness),
            green: dimmed(self.green, brightness),
        }
    }
}

impl Default for SignalColors {
    fn default() -> Self {
        Self {
            red: SIGNAL_RED,
            yellow: hsv(AMBER_HUE, 1.0, 1.0),
            green: SIGNAL_GREEN,
        }
    }
}

/// Shows a lane's lamps on a single RGB LED.
pub struct RgbSignalHead<L: RgbLed> {
    led: L,
    colors: SignalColors,
}

impl<L: RgbLed> RgbSignalHead<L> {
    /// Creates a signal head with the default colors. The LED is switched off.
    pub fn new(led: L) -> Self {
        Self::with_colors(led, SignalColors::default())
    }

    /// Creates a signal head with custom colors. The LED is switched off.
    pub fn with_colors(mut led: L, colors: SignalColors) -> Self {
        led.set_color(LAMP_OFF);
        Self { led, colors }
    }

    /// Returns a reference to the LED.
    pub fn led(&self) -> &L {
        &self.led
    }

    /// Returns the colors in use.
    pub fn colors(&self) -> &SignalColors {
        &self.colors
    }
}

impl<L: RgbLed> SignalLamps for RgbSignalHead<L> {
    fn show(&mut self, lit: Option<Lamp>) {
        // A single LED cannot show two lamps at once.
        self.led.set_color(self.colors.color(lit));
    }
}
