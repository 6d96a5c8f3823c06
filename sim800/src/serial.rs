use core::time::Duration;
use std::io;

use serialport::SerialPort;

use crate::transport::Transport;

/// [`Transport`] over a host serial port.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    timeout: Duration,
    inter_byte_timeout: Duration,
}

impl SerialTransport {
    /// Open `path` at `baud_rate`, 8N1 without flow control.
    pub fn open(path: &str, baud_rate: u32) -> Result<Self, serialport::Error> {
        let port = serialport::new(path, baud_rate)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .flow_control(serialport::FlowControl::None)
            .open()?;
        Ok(Self::new(port))
    }

    pub fn new(port: Box<dyn SerialPort>) -> Self {
        Self {
            port,
            timeout: Duration::from_millis(500),
            inter_byte_timeout: Duration::from_millis(100),
        }
    }

    pub fn into_inner(self) -> Box<dyn SerialPort> {
        self.port
    }
}

impl embedded_io::ErrorType for SerialTransport {
    type Error = io::Error;
}

impl embedded_io::Write for SerialTransport {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        io::Write::write(&mut self.port, buf)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        io::Write::flush(&mut self.port)
    }
}

impl Transport for SerialTransport {
    fn set_timeouts(
        &mut self,
        timeout: Duration,
        inter_byte_timeout: Duration,
    ) -> Result<(), Self::Error> {
        self.timeout = timeout;
        self.inter_byte_timeout = inter_byte_timeout;
        Ok(())
    }

    fn read_lines(&mut self) -> Result<Vec<Vec<u8>>, Self::Error> {
        let mut received = Vec::new();
        let mut chunk = [0u8; 64];

        // The first byte may take up to the full timeout, after that the
        // response ends as soon as the line goes idle.
        self.port.set_timeout(self.timeout)?;
        let mut idle_timeout_set = false;

        loop {
            match io::Read::read(&mut self.port, &mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    received.extend_from_slice(&chunk[..n]);
                    if !idle_timeout_set {
                        self.port.set_timeout(self.inter_byte_timeout)?;
                        idle_timeout_set = true;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::TimedOut => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }

        Ok(received
            .split_inclusive(|&b| b == b'\n')
            .map(<[u8]>::to_vec)
            .collect())
    }
}
