use core::time::Duration;

use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::{Config, Error};

/// Drives the power key and reset lines of the module.
///
/// Both lines are driven low on construction and again when the controller
/// is dropped, so the module is never left with a line held high, whichever
/// way the owner exits.
pub struct PowerController<P, R, D>
where
    P: OutputPin,
    R: OutputPin,
    D: DelayNs,
{
    power: P,
    reset: R,
    delay: D,
    pulse: Duration,
    boot_delay: Duration,
}

impl<P, R, D> PowerController<P, R, D>
where
    P: OutputPin,
    R: OutputPin,
    D: DelayNs,
{
    pub fn new(power: P, reset: R, delay: D, config: &Config) -> Result<Self, Error> {
        let mut controller = Self {
            power,
            reset,
            delay,
            pulse: config.power_pulse,
            boot_delay: config.boot_delay,
        };
        controller.power_down()?;
        Ok(controller)
    }

    /// Toggle the module by pulsing the power key, then wait for it to boot.
    ///
    /// Whether the module actually came up is only known from the next
    /// command it answers.
    pub fn reset(&mut self) -> Result<(), Error> {
        debug!("Reset (duration ~{}ms)", (self.pulse + self.boot_delay).as_millis());

        self.power.set_high().map_err(|_| Error::Power)?;
        self.delay.delay_ms(as_millis(self.pulse));
        self.power.set_low().map_err(|_| Error::Power)?;
        self.delay.delay_ms(as_millis(self.boot_delay));
        Ok(())
    }

    /// Drive both lines low.
    pub fn power_down(&mut self) -> Result<(), Error> {
        self.power.set_low().map_err(|_| Error::Power)?;
        self.reset.set_low().map_err(|_| Error::Power)
    }
}

impl<P, R, D> Drop for PowerController<P, R, D>
where
    P: OutputPin,
    R: OutputPin,
    D: DelayNs,
{
    fn drop(&mut self) {
        if self.power_down().is_err() {
            error!("Failed to drive power lines low");
        }
    }
}

fn as_millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}
