use crate::device::SessionState;

/// Errors returned by the crate
///
/// Negative answers from the module are not errors; they are reported as
/// [`AtResult`](crate::AtResult) variants, `None` or `false` by the operation
/// that received them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Serial read error
    Read,
    /// Serial write error
    Write,
    /// The transport rejected the requested timeouts
    Configure,
    /// Command does not fit in the command buffer
    Overflow,
    /// A power or reset line could not be driven
    Power,
    /// The operation requires a ready session
    NotReady(SessionState),
    /// The module did not answer `AT` after all power cycles
    HandshakeExhausted,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Read => write!(f, "Serial read failed"),
            Self::Write => write!(f, "Serial write failed"),
            Self::Configure => write!(f, "Serial timeouts could not be configured"),
            Self::Overflow => write!(f, "Command too long"),
            Self::Power => write!(f, "Power line could not be driven"),
            Self::NotReady(state) => write!(f, "Session not ready ({:?})", state),
            Self::HandshakeExhausted => write!(f, "Module failed to respond after reset"),
        }
    }
}

impl std::error::Error for Error {}
