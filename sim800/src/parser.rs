//! Line filtering and field extraction for AT responses.

/// Decode raw response lines, trim them and drop the blank ones.
pub fn clean_lines<L: AsRef<[u8]>>(raw: &[L]) -> Vec<String> {
    raw.iter()
        .map(|line| String::from_utf8_lossy(line.as_ref()).trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Extract a single field from a response line.
///
/// The line must start with `prefix`. The remainder is split on `divider` and
/// the token at `index` is returned.
///
/// ```
/// use sim800::parser::extract_field;
///
/// assert_eq!(extract_field("+CREG: 0,1", "+CREG: ", ',', 1), Some("1"));
/// assert_eq!(extract_field("+CREG: 0,1", "+CSQ: ", ',', 0), None);
/// ```
pub fn extract_field<'a>(line: &'a str, prefix: &str, divider: char, index: usize) -> Option<&'a str> {
    line.strip_prefix(prefix)?.split(divider).nth(index)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clean() {
        let raw: [&[u8]; 6] = [b"\r\n", b"AT\r\r\n", b"  \t\r\n", b"+CSQ: 15,0\r\n", b"\r\n", b"OK\r\n"];
        assert_eq!(clean_lines(&raw), vec!["AT", "+CSQ: 15,0", "OK"]);
    }

    #[test]
    fn clean_invalid_utf8() {
        let raw: [&[u8]; 1] = [b"\xffOK\r\n"];
        assert_eq!(clean_lines(&raw), vec!["\u{fffd}OK"]);
    }

    #[test]
    fn field_by_index() {
        assert_eq!(extract_field("+CREG: 0,1", "+CREG: ", ',', 1), Some("1"));
        assert_eq!(extract_field("+CSQ: 15,0", "+CSQ: ", ',', 0), Some("15"));
        assert_eq!(extract_field("+CEER: No cause", "+CEER: ", ',', 0), Some("No cause"));
    }

    #[test]
    fn field_prefix_mismatch() {
        assert_eq!(extract_field("+CREG: 0,1", "+CSQ: ", ',', 0), None);
        assert_eq!(extract_field("CREG: 0,1", "+CREG: ", ',', 0), None);
    }

    #[test]
    fn field_out_of_range() {
        assert_eq!(extract_field("+CREG: 0,1", "+CREG: ", ',', 2), None);
    }

    #[test]
    fn revision_field() {
        assert_eq!(
            extract_field("Revision:1418B04SIM800L24", "Revision", ':', 1),
            Some("1418B04SIM800L24")
        );
    }

    #[test]
    fn clock_field_keeps_quotes() {
        assert_eq!(
            extract_field("+CCLK: \"24/03/09,14:05:30+00\"", "+CCLK: ", '\'', 0),
            Some("\"24/03/09,14:05:30+00\"")
        );
    }
}
