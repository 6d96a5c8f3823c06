use chrono::NaiveDateTime;
use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::{
    client::Client,
    power::PowerController,
    transport::Transport,
    types::{parse_clock, NetworkStatus, Rssi, SmsMessageFormat, CLOCK_FORMAT},
    AtCommand, AtResult, Config, Error,
};

const OK: &str = "OK";
const SMS_PROMPT: &str = "> ";
const SMS_SENT: &str = "+CMGS";

/// Where the session is in its bring-up.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum SessionState {
    /// Resources are bound, but the module has not answered yet.
    Uninitialized,
    /// The module answered the `AT` handshake.
    Ready,
    /// The handshake was exhausted without an answer.
    Failed,
}

/// A session with a SIM800 module.
///
/// Created from an already opened transport and a [`PowerController`]; both
/// are released when the session is dropped, which drives the power lines
/// low. Call [`turn_on`] before anything else.
///
/// [`turn_on`]: Sim800::turn_on
pub struct Sim800<T, P, R, D>
where
    T: Transport,
    P: OutputPin,
    R: OutputPin,
    D: DelayNs,
{
    client: Client<T>,
    power: PowerController<P, R, D>,
    state: SessionState,
}

impl<T, P, R, D> Sim800<T, P, R, D>
where
    T: Transport,
    P: OutputPin,
    R: OutputPin,
    D: DelayNs,
{
    pub fn new(transport: T, power: PowerController<P, R, D>, config: Config) -> Self {
        debug!("Setup");
        Self {
            client: Client::new(transport, config),
            power,
            state: SessionState::Uninitialized,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Power cycle the module. The session has to be turned on again
    /// afterwards.
    pub fn reset(&mut self) -> Result<(), Error> {
        self.state = SessionState::Uninitialized;
        self.power.reset()
    }

    /// Check whether the module is on and answering, power cycling it if it
    /// stays silent.
    ///
    /// Each cycle probes with `AT`, writing it again while nothing comes back.
    /// A silent module is reset before every cycle but the last; a module
    /// answering with something other than `OK` (wrong baud rate?) is probed
    /// again without a reset.
    pub fn turn_on(&mut self) -> Result<(), Error> {
        debug!("Turn on");
        let config = *self.client.config();
        let probe = AtCommand::new("AT", OK)?.attempts(config.handshake_attempts);

        for cycle in 1..=config.handshake_cycles {
            match self.client.send(&probe)? {
                AtResult::Matched(_) => {
                    info!("GSM module ready");
                    self.state = SessionState::Ready;
                    return Ok(());
                }
                AtResult::Mismatch(line) => {
                    warn!("GSM module returned invalid response {:?}, check baud rate?", line);
                }
                AtResult::NoResponse if cycle < config.handshake_cycles => {
                    warn!("GSM module is not responding, resetting...");
                    self.power.reset()?;
                }
                AtResult::NoResponse => {
                    error!("GSM module failed to respond after reset!");
                }
            }
        }

        self.state = SessionState::Failed;
        Err(Error::HandshakeExhausted)
    }

    /// Switch off command echo. The first `ATE0` may still be answered with
    /// an echo, so it is sent twice and only the second answer counts.
    pub fn set_echo_off(&mut self) -> Result<bool, Error> {
        self.ensure_ready()?;
        debug!("Set echo off");

        let cmd = AtCommand::new("ATE0", OK)?;
        self.client.send(&cmd)?;
        Ok(self.client.send(&cmd)?.is_matched())
    }

    /// Reason for the last failed call or network operation.
    pub fn last_error(&mut self) -> Result<Option<String>, Error> {
        self.ensure_ready()?;
        debug!("Get last error");

        let cmd = AtCommand::new("AT+CEER", OK)?;
        self.client.single_field(&cmd, "+CEER: ", ',', 0)
    }

    /// International Mobile Equipment Identity of the module.
    pub fn imei(&mut self) -> Result<Option<String>, Error> {
        self.ensure_ready()?;
        debug!("Get International Mobile Equipment Identity (IMEI)");

        let cmd = AtCommand::new("AT+GSN", OK)?;
        self.client.single_line(&cmd)
    }

    /// Firmware revision of the module.
    pub fn firmware_version(&mut self) -> Result<Option<String>, Error> {
        self.ensure_ready()?;
        debug!("Get TA revision identification of software release");

        let cmd = AtCommand::new("AT+CGMR", OK)?;
        self.client.single_field(&cmd, "Revision", ':', 1)
    }

    /// Integrated Circuit Card Identifier of the inserted SIM.
    pub fn sim_ccid(&mut self) -> Result<Option<String>, Error> {
        self.ensure_ready()?;
        debug!("Get SIM Integrated Circuit Card Identifier (ICCID)");

        let cmd = AtCommand::new("AT+CCID", OK)?;
        self.client.single_line(&cmd)
    }

    pub fn network_status(&mut self) -> Result<Option<NetworkStatus>, Error> {
        self.ensure_ready()?;
        debug!("Get network status");

        let cmd = AtCommand::new("AT+CREG?", OK)?;
        let status = self.client.single_field(&cmd, "+CREG: ", ',', 1)?;
        Ok(status
            .and_then(|s| s.trim().parse::<u8>().ok())
            .and_then(|v| NetworkStatus::try_from(v).ok()))
    }

    /// Raw signal quality, as reported by `AT+CSQ`.
    pub fn signal_quality(&mut self) -> Result<Option<u8>, Error> {
        self.ensure_ready()?;
        debug!("Get signal quality");

        let cmd = AtCommand::new("AT+CSQ", OK)?;
        let csq = self.client.single_field(&cmd, "+CSQ: ", ',', 0)?;
        Ok(csq.and_then(|s| s.trim().parse().ok()))
    }

    /// Signal strength in bars.
    pub fn rssi(&mut self) -> Result<Option<Rssi>, Error> {
        debug!("Get Received Signal Strength Indication (RSSI)");
        Ok(self.signal_quality()?.and_then(|csq| {
            let rssi = Rssi::from_csq(csq);
            if rssi.is_none() {
                warn!("Unrecognized CSQ value {}", csq);
            }
            rssi
        }))
    }

    pub fn enable_network_time_sync(&mut self, enable: bool) -> Result<bool, Error> {
        self.ensure_ready()?;
        debug!("Enable network time synchronisation: {}", enable);

        let cmd = AtCommand::format(format_args!("AT+CLTS={}", u8::from(enable)), OK)?;
        Ok(self.client.send(&cmd)?.is_matched())
    }

    /// Current time of the module clock, read as UTC.
    pub fn time(&mut self) -> Result<Option<NaiveDateTime>, Error> {
        self.ensure_ready()?;
        debug!("Get the current time");

        let cmd = AtCommand::new("AT+CCLK?", OK)?;
        let time = self.client.single_field(&cmd, "+CCLK: ", '\'', 0)?;
        Ok(time.and_then(|t| parse_clock(&t)))
    }

    /// Set the module clock. `time` is taken as UTC; sub-second precision is
    /// dropped.
    pub fn set_time(&mut self, time: &NaiveDateTime) -> Result<bool, Error> {
        self.ensure_ready()?;
        debug!("Set the current time: {}", time);

        let cmd = AtCommand::format(format_args!("AT+CCLK={}", time.format(CLOCK_FORMAT)), OK)?;
        Ok(self.client.send(&cmd)?.is_matched())
    }

    pub fn set_sms_message_format(&mut self, format: SmsMessageFormat) -> Result<bool, Error> {
        self.ensure_ready()?;

        let cmd = AtCommand::format(format_args!("AT+CMGF={}", format as u8), OK)?;
        Ok(self.client.send(&cmd)?.is_matched())
    }

    /// Send `message` as a text mode SMS to `number`.
    ///
    /// The module is switched to text mode, asked for a prompt for
    /// `number`, and then given the message. Succeeds only when the module
    /// answers the message with a `+CMGS` line and `OK`. A failure in any
    /// step returns `false` without touching the module further.
    pub fn send_sms(&mut self, number: &str, message: &str) -> Result<bool, Error> {
        self.ensure_ready()?;
        debug!("Send SMS: {} {:?}", number, message);

        let config = *self.client.config();
        let recipient = AtCommand::format(format_args!("AT+CMGS=\"{}\"", number), SMS_PROMPT)?;
        let text = AtCommand::payload(message, OK)?
            .timeouts(config.sms_timeout, config.sms_inter_byte_timeout);

        if !self.set_sms_message_format(SmsMessageFormat::Text)? {
            return Ok(false);
        }

        if !self.client.send(&recipient)?.is_matched() {
            debug!("No SMS prompt");
            return Ok(false);
        }

        match self.client.send_with_payload(&text)? {
            AtResult::Matched(lines) => match lines.iter().find(|l| is_sms_sent(l)) {
                Some(line) => {
                    info!("SMS sent: {}", line);
                    Ok(true)
                }
                None => {
                    debug!("SMS not confirmed: {:?}", lines);
                    Ok(false)
                }
            },
            r => {
                debug!("SMS failed: {:?}", r);
                Ok(false)
            }
        }
    }

    /// Release the transport and the power controller. Dropping the
    /// returned controller drives the power lines low.
    pub fn release(self) -> (T, PowerController<P, R, D>) {
        (self.client.release(), self.power)
    }

    fn ensure_ready(&self) -> Result<(), Error> {
        match self.state {
            SessionState::Ready => Ok(()),
            state => Err(Error::NotReady(state)),
        }
    }
}

/// `+CMGS`, optionally followed by the message reference (`+CMGS: 12`).
fn is_sms_sent(line: &str) -> bool {
    line.strip_prefix(SMS_SENT)
        .map_or(false, |rest| rest.is_empty() || rest.starts_with(':'))
}
