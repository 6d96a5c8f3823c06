/// Outcome of a single command exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtResult {
    /// Nothing was received before the timeout.
    NoResponse,
    /// A terminal line was received, but not the expected one. Carries the
    /// line that was received.
    Mismatch(String),
    /// The expected terminal line was received. Carries the payload lines
    /// that preceded it, in reading order.
    Matched(Vec<String>),
}

impl AtResult {
    /// Classify the cleaned lines of a response. The last line is the
    /// terminal line; the lines before it are kept as payload only when
    /// `keep_payload` is set.
    pub(crate) fn classify(
        mut lines: Vec<String>,
        expected: &str,
        keep_payload: bool,
    ) -> Self {
        let terminal = match lines.pop() {
            Some(terminal) if !terminal.trim().is_empty() => terminal,
            _ => return Self::NoResponse,
        };

        if terminal == expected.trim() {
            if !keep_payload {
                lines.clear();
            }
            Self::Matched(lines)
        } else {
            Self::Mismatch(terminal)
        }
    }

    pub const fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    /// Payload lines, if the response matched.
    pub fn payload(&self) -> Option<&[String]> {
        match self {
            Self::Matched(lines) => Some(lines),
            _ => None,
        }
    }

    pub fn into_payload(self) -> Option<Vec<String>> {
        match self {
            Self::Matched(lines) => Some(lines),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn lines(l: &[&str]) -> Vec<String> {
        l.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_is_no_response() {
        assert_eq!(AtResult::classify(Vec::new(), "OK", true), AtResult::NoResponse);
        assert_eq!(AtResult::classify(lines(&["  "]), "OK", true), AtResult::NoResponse);
    }

    #[test]
    fn terminal_is_last_line() {
        assert_eq!(
            AtResult::classify(lines(&["+CSQ: 15,0", "OK"]), "OK", true),
            AtResult::Matched(lines(&["+CSQ: 15,0"]))
        );
        assert_eq!(
            AtResult::classify(lines(&["OK", "ERROR"]), "OK", true),
            AtResult::Mismatch("ERROR".to_string())
        );
    }

    #[test]
    fn payload_dropped_unless_requested() {
        assert_eq!(
            AtResult::classify(lines(&["ECHO", "OK"]), "OK", false),
            AtResult::Matched(Vec::new())
        );
    }

    #[test]
    fn prompt_compared_trimmed() {
        assert!(AtResult::classify(lines(&[">"]), "> ", false).is_matched());
    }

    #[test]
    fn payload_accessors() {
        let matched = AtResult::Matched(lines(&["a", "b"]));
        assert_eq!(matched.payload(), Some(&lines(&["a", "b"])[..]));
        assert_eq!(AtResult::NoResponse.payload(), None);
        assert_eq!(AtResult::Mismatch("ERROR".into()).into_payload(), None);
    }
}
