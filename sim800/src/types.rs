use chrono::NaiveDateTime;

/// Clock format used by `AT+CCLK`, quotes included. The module is assumed to
/// run on UTC, so the quarter-hour offset is always `+00`.
pub const CLOCK_FORMAT: &str = "\"%y/%m/%d,%H:%M:%S+00\"";

/// Received Signal Strength Indication as "bars", bucketed from the
/// `AT+CSQ` value:
///
/// | CSQ | RSSI | Bars |
/// |---|---|---|
/// | 99 | not known or not detectable | `ZeroBars` |
/// | 0 | -115 dBm or less | `OneBar` |
/// | 1 | -111 dBm | `TwoBars` |
/// | 2..=30 | -110 to -54 dBm | `ThreeBars` |
/// | 31 | -52 dBm or greater | `FourBars` |
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rssi {
    ZeroBars = 0,
    OneBar = 1,
    TwoBars = 2,
    ThreeBars = 3,
    FourBars = 4,
}

impl Rssi {
    /// Bucket a raw CSQ value. Values the module does not define (32..=98,
    /// 100 and up) are not recognized.
    pub const fn from_csq(csq: u8) -> Option<Self> {
        match csq {
            99 => Some(Self::ZeroBars),
            0 => Some(Self::OneBar),
            1 => Some(Self::TwoBars),
            2..=30 => Some(Self::ThreeBars),
            31 => Some(Self::FourBars),
            _ => None,
        }
    }

    pub const fn bars(self) -> u8 {
        self as u8
    }
}

/// Network registration state reported by `AT+CREG?`.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum NetworkStatus {
    NotRegistered = 0,
    RegisteredHome = 1,
    Searching = 2,
    Denied = 3,
    Unknown = 4,
    RegisteredRoaming = 5,
}

impl NetworkStatus {
    pub const fn is_registered(self) -> bool {
        matches!(self, Self::RegisteredHome | Self::RegisteredRoaming)
    }
}

impl TryFrom<u8> for NetworkStatus {
    type Error = u8;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::NotRegistered),
            1 => Ok(Self::RegisteredHome),
            2 => Ok(Self::Searching),
            3 => Ok(Self::Denied),
            4 => Ok(Self::Unknown),
            5 => Ok(Self::RegisteredRoaming),
            v => Err(v),
        }
    }
}

impl core::fmt::Display for NetworkStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotRegistered => write!(f, "Not registered"),
            Self::RegisteredHome => write!(f, "Registered, home network"),
            Self::Searching => write!(f, "Searching"),
            Self::Denied => write!(f, "Registration denied"),
            Self::Unknown => write!(f, "Unknown"),
            Self::RegisteredRoaming => write!(f, "Registered, roaming"),
        }
    }
}

/// SMS message format selected with `AT+CMGF`.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum SmsMessageFormat {
    Pdu = 0,
    Text = 1,
}

pub(crate) fn parse_clock(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, CLOCK_FORMAT).ok()
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn rssi_from_csq() {
        assert_eq!(Rssi::from_csq(0), Some(Rssi::OneBar));
        assert_eq!(Rssi::from_csq(1), Some(Rssi::TwoBars));
        for csq in 2..=30 {
            assert_eq!(Rssi::from_csq(csq), Some(Rssi::ThreeBars));
        }
        assert_eq!(Rssi::from_csq(31), Some(Rssi::FourBars));
        assert_eq!(Rssi::from_csq(99), Some(Rssi::ZeroBars));
    }

    #[test]
    fn rssi_undefined_csq() {
        // The module never reports these; they are left unrecognized
        assert_eq!(Rssi::from_csq(32), None);
        assert_eq!(Rssi::from_csq(98), None);
        assert_eq!(Rssi::from_csq(100), None);
    }

    #[test]
    fn rssi_bars() {
        assert_eq!(Rssi::ZeroBars.bars(), 0);
        assert_eq!(Rssi::FourBars.bars(), 4);
        assert!(Rssi::OneBar < Rssi::ThreeBars);
    }

    #[test]
    fn network_status() {
        assert_eq!(NetworkStatus::try_from(0), Ok(NetworkStatus::NotRegistered));
        assert_eq!(NetworkStatus::try_from(1), Ok(NetworkStatus::RegisteredHome));
        assert_eq!(NetworkStatus::try_from(4), Ok(NetworkStatus::Unknown));
        assert_eq!(NetworkStatus::try_from(5), Ok(NetworkStatus::RegisteredRoaming));
        assert_eq!(NetworkStatus::try_from(6), Err(6));

        assert!(NetworkStatus::RegisteredRoaming.is_registered());
        assert!(!NetworkStatus::Searching.is_registered());
    }

    #[test]
    fn clock_round_trip() {
        let time = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 30)
            .unwrap();

        let formatted = time.format(CLOCK_FORMAT).to_string();
        assert_eq!(formatted, "\"24/03/09,14:05:30+00\"");
        assert_eq!(parse_clock(&formatted), Some(time));
    }

    #[test]
    fn clock_rejects_other_formats() {
        assert_eq!(parse_clock("24/03/09,14:05:30+00"), None);
        assert_eq!(parse_clock("\"24/03/09,14:05:30+08\""), None);
        assert_eq!(parse_clock("\"garbage\""), None);
    }
}
