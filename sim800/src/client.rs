use crate::{
    helpers::LossyStr,
    parser::{clean_lines, extract_field},
    transport::Transport,
    AtCommand, AtResult, Config, Error,
};

/// Client responsible for the command exchange with the module: writing a
/// command, collecting the response lines within the command timeouts and
/// classifying the terminal line.
///
/// Only one command is ever in flight. Every method blocks until the module
/// has answered or the timeouts have elapsed.
pub struct Client<T>
where
    T: Transport,
{
    transport: T,
    config: Config,
}

impl<T> Client<T>
where
    T: Transport,
{
    pub fn new(transport: T, config: Config) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send a command and check its terminal line, ignoring any payload.
    ///
    /// The command is written again only while nothing at all is received,
    /// up to the command's attempt count. A wrong terminal line is reported
    /// as [`AtResult::Mismatch`] right away.
    pub fn send(&mut self, cmd: &AtCommand<'_>) -> Result<AtResult, Error> {
        self.configure(cmd)?;

        for attempt in 1..=cmd.attempt_count() {
            debug!("Attempt {}", attempt);

            let lines = self.exchange(cmd)?;
            if lines.is_empty() {
                continue;
            }
            return Ok(AtResult::classify(lines, cmd.expected(), false));
        }

        debug!("No response to {:?}", cmd.text());
        Ok(AtResult::NoResponse)
    }

    /// Send a command once and return the lines preceding its terminal line
    /// as payload.
    pub fn send_with_payload(&mut self, cmd: &AtCommand<'_>) -> Result<AtResult, Error> {
        self.configure(cmd)?;
        let lines = self.exchange(cmd)?;
        Ok(AtResult::classify(lines, cmd.expected(), true))
    }

    /// Send a command expecting exactly one payload line, and return that line.
    pub fn single_line(&mut self, cmd: &AtCommand<'_>) -> Result<Option<String>, Error> {
        Ok(match self.send_with_payload(cmd)?.into_payload() {
            Some(mut lines) if lines.len() == 1 => lines.pop(),
            Some(lines) => {
                debug!("Expected a single line, got {}", lines.len());
                None
            }
            None => None,
        })
    }

    /// Send a command expecting exactly one payload line, and extract a field
    /// from it with [`extract_field`].
    pub fn single_field(
        &mut self,
        cmd: &AtCommand<'_>,
        prefix: &str,
        divider: char,
        index: usize,
    ) -> Result<Option<String>, Error> {
        Ok(self.single_line(cmd)?.and_then(|line| {
            trace!("Parse reply: {:?}, {:?}, {:?}, {}", line, prefix, divider, index);
            extract_field(&line, prefix, divider, index).map(str::to_string)
        }))
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn release(self) -> T {
        self.transport
    }

    fn configure(&mut self, cmd: &AtCommand<'_>) -> Result<(), Error> {
        let timeout = cmd.timeout().unwrap_or(self.config.command_timeout);
        let inter_byte_timeout = cmd
            .inter_byte_timeout()
            .unwrap_or(self.config.inter_byte_timeout);

        self.transport
            .set_timeouts(timeout, inter_byte_timeout)
            .map_err(|_| Error::Configure)
    }

    /// Write the command and return the cleaned response lines.
    fn exchange(&mut self, cmd: &AtCommand<'_>) -> Result<Vec<String>, Error> {
        let text = cmd.text().as_bytes();
        if text.len() < 50 {
            debug!("Sending command: {:?}", LossyStr(text));
        } else {
            debug!("Sending command with long payload ({} bytes)", text.len());
        }

        self.transport.write_all(text).map_err(|_| Error::Write)?;
        self.transport
            .write_all(cmd.terminator().as_bytes())
            .map_err(|_| Error::Write)?;
        self.transport.flush().map_err(|_| Error::Write)?;

        let raw = self.transport.read_lines().map_err(|_| Error::Read)?;
        let lines = clean_lines(&raw);
        trace!("Lines: {:?}", lines);
        Ok(lines)
    }
}
