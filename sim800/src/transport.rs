use core::time::Duration;

/// Line based, half duplex serial link to the module.
///
/// Writes go through [`embedded_io::Write`]. Reads collect everything the
/// module sends until the link has been idle for the inter-byte timeout,
/// waiting at most the read timeout for the first byte.
pub trait Transport: embedded_io::Write {
    /// Configure the timeouts used by subsequent calls to [`read_lines`].
    ///
    /// [`read_lines`]: Transport::read_lines
    fn set_timeouts(
        &mut self,
        timeout: Duration,
        inter_byte_timeout: Duration,
    ) -> Result<(), Self::Error>;

    /// Read all lines available before the timeouts elapse. Lines are
    /// returned raw, including any line terminators; an empty result means
    /// nothing was received.
    fn read_lines(&mut self) -> Result<Vec<Vec<u8>>, Self::Error>;
}
