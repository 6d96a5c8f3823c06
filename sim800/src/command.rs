use core::fmt::Write as _;
use core::time::Duration;

use heapless::String;

use crate::Error;

/// Capacity of the command buffer, in bytes.
pub const MAX_COMMAND_LEN: usize = 256;

/// How a command is terminated on the wire.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum Terminator {
    /// Ordinary commands end with a single carriage return.
    CarriageReturn,
    /// Text entered after a `> ` prompt ends with CR LF and SUB (Ctrl-Z).
    CtrlZ,
}

impl Terminator {
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::CarriageReturn => b"\r",
            Self::CtrlZ => b"\r\n\x1a",
        }
    }
}

/// A single AT command exchange: what to write, which terminal line to
/// expect, and how long to wait for it.
///
/// Timeouts left unset fall back to the client [`Config`](crate::Config).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtCommand<'a> {
    text: String<MAX_COMMAND_LEN>,
    terminator: Terminator,
    expected: &'a str,
    timeout: Option<Duration>,
    inter_byte_timeout: Option<Duration>,
    attempts: u8,
}

impl<'a> AtCommand<'a> {
    pub fn new(text: &str, expected: &'a str) -> Result<Self, Error> {
        Self::format(format_args!("{}", text), expected)
    }

    /// Build the command text from format arguments, e.g.
    /// `AtCommand::format(format_args!("AT+CLTS={}", 1), "OK")`.
    pub fn format(args: core::fmt::Arguments<'_>, expected: &'a str) -> Result<Self, Error> {
        let mut text = String::new();
        text.write_fmt(args).map_err(|_| Error::Overflow)?;
        Ok(Self {
            text,
            terminator: Terminator::CarriageReturn,
            expected,
            timeout: None,
            inter_byte_timeout: None,
            attempts: 1,
        })
    }

    /// Text written after a prompt, terminated with CR LF and Ctrl-Z.
    pub fn payload(text: &str, expected: &'a str) -> Result<Self, Error> {
        let mut cmd = Self::new(text, expected)?;
        if cmd.text.len() + Terminator::CtrlZ.as_bytes().len() > MAX_COMMAND_LEN {
            return Err(Error::Overflow);
        }
        cmd.terminator = Terminator::CtrlZ;
        Ok(cmd)
    }

    #[must_use]
    pub const fn timeouts(mut self, timeout: Duration, inter_byte_timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self.inter_byte_timeout = Some(inter_byte_timeout);
        self
    }

    /// Number of times the command is written while nothing is received.
    /// Always at least one.
    #[must_use]
    pub fn attempts(mut self, attempts: u8) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub const fn terminator(&self) -> Terminator {
        self.terminator
    }

    pub const fn expected(&self) -> &'a str {
        self.expected
    }

    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub const fn inter_byte_timeout(&self) -> Option<Duration> {
        self.inter_byte_timeout
    }

    pub const fn attempt_count(&self) -> u8 {
        self.attempts
    }
}
