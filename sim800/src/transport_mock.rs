use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use core::time::Duration;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Once;

use crate::transport::Transport;

static INIT: Once = Once::new();

pub fn setup_log() {
    INIT.call_once(|| {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace"))
            .is_test(true)
            .try_init();
    });
}

#[derive(Debug)]
pub struct IoError;

impl embedded_io::Error for IoError {
    fn kind(&self) -> embedded_io::ErrorKind {
        embedded_io::ErrorKind::Other
    }
}

type Responder = Box<dyn FnMut(&str) -> Vec<String>>;

/// Everything the mock transport observed.
#[derive(Debug, Default)]
pub struct MockLog {
    /// One entry per flushed command, terminator included
    pub written: Vec<String>,
    pub timeouts: Vec<(Duration, Duration)>,
}

/// Scripted [`Transport`]. Every flushed command is passed to a responder,
/// whose lines are returned by the next `read_lines`.
pub struct TransportMock {
    buf: Vec<u8>,
    pending: Vec<String>,
    responder: Responder,
    fail_writes: bool,
    log: Rc<RefCell<MockLog>>,
}

impl TransportMock {
    pub fn with_responder(
        responder: impl FnMut(&str) -> Vec<String> + 'static,
    ) -> (Self, Rc<RefCell<MockLog>>) {
        let log = Rc::new(RefCell::new(MockLog::default()));
        (
            Self {
                buf: Vec::new(),
                pending: Vec::new(),
                responder: Box::new(responder),
                fail_writes: false,
                log: log.clone(),
            },
            log,
        )
    }

    /// Answer the n-th command with the n-th entry of `responses`, and with
    /// silence once they run out.
    pub fn scripted(responses: &[&[&str]]) -> (Self, Rc<RefCell<MockLog>>) {
        let mut queue: VecDeque<Vec<String>> = responses
            .iter()
            .map(|lines| lines.iter().map(|l| l.to_string()).collect())
            .collect();
        Self::with_responder(move |_| queue.pop_front().unwrap_or_default())
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }
}

impl embedded_io::ErrorType for TransportMock {
    type Error = IoError;
}

impl embedded_io::Write for TransportMock {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.fail_writes {
            return Err(IoError);
        }
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        let cmd = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        self.pending = (self.responder)(&cmd);
        self.log.borrow_mut().written.push(cmd);
        Ok(())
    }
}

impl Transport for TransportMock {
    fn set_timeouts(
        &mut self,
        timeout: Duration,
        inter_byte_timeout: Duration,
    ) -> Result<(), Self::Error> {
        self.log
            .borrow_mut()
            .timeouts
            .push((timeout, inter_byte_timeout));
        Ok(())
    }

    fn read_lines(&mut self) -> Result<Vec<Vec<u8>>, Self::Error> {
        // Frame every line the way the module does
        Ok(self
            .pending
            .drain(..)
            .map(|line| format!("{}\r\n", line).into_bytes())
            .collect())
    }
}

/// Output pin recording every level it was driven to.
pub struct PinMock {
    levels: Rc<RefCell<Vec<bool>>>,
}

impl PinMock {
    pub fn new() -> (Self, Rc<RefCell<Vec<bool>>>) {
        let levels = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                levels: levels.clone(),
            },
            levels,
        )
    }
}

impl embedded_hal::digital::ErrorType for PinMock {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for PinMock {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut().push(true);
        Ok(())
    }
}

/// Delay that returns immediately, summing the requested time.
pub struct DelayMock {
    waited_ns: Rc<Cell<u64>>,
}

impl DelayMock {
    pub fn new() -> (Self, Rc<Cell<u64>>) {
        let waited_ns = Rc::new(Cell::new(0));
        (
            Self {
                waited_ns: waited_ns.clone(),
            },
            waited_ns,
        )
    }
}

impl embedded_hal::delay::DelayNs for DelayMock {
    fn delay_ns(&mut self, ns: u32) {
        self.waited_ns.set(self.waited_ns.get() + u64::from(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waited_ns
            .set(self.waited_ns.get() + u64::from(ms) * 1_000_000);
    }
}
