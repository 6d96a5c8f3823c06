//! A blocking driver for SIM800 series cellular modules, speaking the textual
//! AT command set over a serial link.
//!
//! The driver is split in layers:
//!
//! - [`Client`] performs a single command exchange: it writes an
//!   [`AtCommand`], collects the response lines until the line goes idle and
//!   classifies the last one into an [`AtResult`].
//! - [`parser`] extracts fields from response lines.
//! - [`Sim800`] builds the module operations (identity and network queries,
//!   clock, SMS) on top of the client, and owns the bring-up handshake.
//! - [`PowerController`] drives the power key and reset lines through
//!   [`embedded_hal`] pins.
//!
//! The serial link is anything implementing [`Transport`]. With the `serial`
//! feature, [`SerialTransport`] provides one on top of the `serialport`
//! crate.
//!
//! Negative answers from the module are never errors: a command that is not
//! answered, answered with the wrong terminal line or with an unparsable
//! payload yields `None` or `false`. [`Error`] is reserved for transport and
//! GPIO failures, using a session that is not ready, and a module that never
//! answers the handshake.
//!
//! # Examples
//!
//! ```ignore
//! use sim800::{Config, PowerController, SerialTransport, Sim800};
//!
//! let config = Config::new();
//! let transport = SerialTransport::open("/dev/ttyAMA0", 9600)?;
//! let power = PowerController::new(power_pin, reset_pin, delay, &config)?;
//!
//! let mut sim = Sim800::new(transport, power, config);
//! sim.turn_on()?;
//! sim.set_echo_off()?;
//!
//! if let Some(rssi) = sim.rssi()? {
//!     println!("Signal: {} bars", rssi.bars());
//! }
//! sim.send_sms("+441234567890", "Hello World!")?;
//! // Dropping `sim` drives the power lines low
//! ```
//!
//! # Optional Cargo Features
//!
//! - **`log`** *(disabled by default)* — Logs every command, the received
//!   lines and the handshake progress through the `log` facade.
//! - **`serial`** *(disabled by default)* — Enables [`SerialTransport`].

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

mod client;
mod command;
mod config;
mod device;
mod error;
mod helpers;
pub mod parser;
mod power;
mod response;
#[cfg(feature = "serial")]
mod serial;
mod transport;
#[cfg(test)]
mod transport_mock;
mod types;

pub use self::client::Client;
pub use self::command::{AtCommand, Terminator, MAX_COMMAND_LEN};
pub use self::config::Config;
pub use self::device::{SessionState, Sim800};
pub use self::error::Error;
pub use self::helpers::LossyStr;
pub use self::power::PowerController;
pub use self::response::AtResult;
#[cfg(feature = "serial")]
pub use self::serial::SerialTransport;
pub use self::transport::Transport;
pub use self::types::{NetworkStatus, Rssi, SmsMessageFormat, CLOCK_FORMAT};

pub use embedded_hal;
pub use embedded_io;
