use core::time::Duration;

/// Timing and retry parameters of the driver.
///
/// The defaults match a SIM800 module on a 9600 baud link.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct Config {
    pub(crate) command_timeout: Duration,
    pub(crate) inter_byte_timeout: Duration,
    pub(crate) handshake_attempts: u8,
    pub(crate) handshake_cycles: u8,
    pub(crate) power_pulse: Duration,
    pub(crate) boot_delay: Duration,
    pub(crate) sms_timeout: Duration,
    pub(crate) sms_inter_byte_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command_timeout: Duration::from_millis(500),
            inter_byte_timeout: Duration::from_millis(100),
            handshake_attempts: 5,
            handshake_cycles: 2,
            power_pulse: Duration::from_millis(1200),
            boot_delay: Duration::from_secs(5),
            sms_timeout: Duration::from_secs(11),
            sms_inter_byte_timeout: Duration::from_millis(1200),
        }
    }
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time to wait for the first byte of an ordinary response.
    #[must_use]
    pub const fn command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// Idle time after which an ordinary response is considered complete.
    #[must_use]
    pub const fn inter_byte_timeout(mut self, timeout: Duration) -> Self {
        self.inter_byte_timeout = timeout;
        self
    }

    /// Attempts per `AT` probe while turning the module on.
    #[must_use]
    pub const fn handshake_attempts(mut self, attempts: u8) -> Self {
        self.handshake_attempts = attempts;
        self
    }

    /// Probe cycles while turning the module on. Every cycle but the last one
    /// power cycles the module when it stays silent.
    #[must_use]
    pub const fn handshake_cycles(mut self, cycles: u8) -> Self {
        self.handshake_cycles = cycles;
        self
    }

    #[must_use]
    pub const fn power_pulse(mut self, pulse: Duration) -> Self {
        self.power_pulse = pulse;
        self
    }

    #[must_use]
    pub const fn boot_delay(mut self, delay: Duration) -> Self {
        self.boot_delay = delay;
        self
    }

    #[must_use]
    pub const fn sms_timeout(mut self, timeout: Duration, inter_byte_timeout: Duration) -> Self {
        self.sms_timeout = timeout;
        self.sms_inter_byte_timeout = inter_byte_timeout;
        self
    }
}
