//! Index pair strings used by `lines_between` and `relationships_between`.

use crate::error::{FloaterError, Result};

/// Parse `"01"` (two single digits) or `"10-12"` / `"10:12"` / `"10,12"`
pub fn parse_pair(text: &str) -> Result<(usize, usize)> {
    let malformed = || FloaterError::MalformedPair(text.to_string());
    let trimmed = text.trim();

    if let Some((first, second)) = trimmed.split_once(['-', ':', ',']) {
        let first = first.trim().parse().map_err(|_| malformed())?;
        let second = second.trim().parse().map_err(|_| malformed())?;
        return Ok((first, second));
    }

    let digits: Vec<usize> = trimmed
        .chars()
        .map(|c| c.to_digit(10).map(|d| d as usize))
        .collect::<Option<_>>()
        .ok_or_else(malformed)?;
    match digits[..] {
        [first, second] => Ok((first, second)),
        _ => Err(malformed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_digit_form() {
        assert_eq!(parse_pair("01"), Ok((0, 1)));
        assert_eq!(parse_pair("93"), Ok((9, 3)));
        assert_eq!(parse_pair(" 12 "), Ok((1, 2)));
    }

    #[test]
    fn test_separated_form() {
        assert_eq!(parse_pair("10-12"), Ok((10, 12)));
        assert_eq!(parse_pair("3:14"), Ok((3, 14)));
        assert_eq!(parse_pair("0, 7"), Ok((0, 7)));
    }

    #[test]
    fn test_malformed_pairs() {
        for text in ["", "1", "123", "a1", "1-", "-2", "1-2-3", "x:y"] {
            assert_eq!(
                parse_pair(text),
                Err(FloaterError::MalformedPair(text.to_string())),
                "{:?} should be rejected",
                text
            );
        }
    }
}
