//! YYMMDD date validation and repair.
//!
//! Dates inside the zone carry two-digit years; chrono's `%y` handles the
//! century split (00-68 map to 2000s, 69-99 to 1900s), month lengths and
//! leap years, so it is the single source of truth here.

use chrono::NaiveDate;

use crate::processing::normalize::LineNormalizer;

pub const MRZ_DATE_FORMAT: &str = "%y%m%d";

/// True when `text` is six digits forming a real calendar date.
pub fn is_valid_date(text: &str) -> bool {
    text.len() == 6
        && text.chars().all(|c| c.is_ascii_digit())
        && NaiveDate::parse_from_str(text, MRZ_DATE_FORMAT).is_ok()
}

/// Single-pass repair for recognizer confusion inside a date field:
/// rewrite lookalike letters as digits, keep the result only if it then
/// forms a valid date. Anything deeper than character confusion is not
/// guessed at.
pub fn repair_date(text: &str) -> Option<String> {
    let repaired = LineNormalizer::correct_letters_in_numeric_zone(text);
    if is_valid_date(&repaired) {
        Some(repaired)
    } else {
        None
    }
}

/// Validates `text` as-is, falling back to one repair attempt. Returns the
/// six digits that passed, or `None` when the field is unusable.
pub fn validate_or_repair_date(text: &str) -> Option<String> {
    if is_valid_date(text) {
        Some(text.to_string())
    } else {
        repair_date(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_real_dates() {
        assert!(is_valid_date("740812"));
        assert!(is_valid_date("120415"));
        assert!(is_valid_date("000229")); // 2000 was a leap year
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(!is_valid_date("991301")); // month 13
        assert!(!is_valid_date("990230")); // Feb 30
        assert!(!is_valid_date("990100")); // day 0
        assert!(!is_valid_date("010229")); // 2001 was not a leap year
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(!is_valid_date("74081"));
        assert!(!is_valid_date("7408122"));
        assert!(!is_valid_date("74O812"));
        assert!(!is_valid_date("<<<<<<"));
    }

    #[test]
    fn repairs_confused_characters() {
        assert_eq!(repair_date("74O812").as_deref(), Some("740812"));
        assert_eq!(repair_date("I2O4I5").as_deref(), Some("120415"));
    }

    #[test]
    fn repair_refuses_to_invent_dates() {
        // Digits are already digits and the date is still impossible.
        assert_eq!(repair_date("991301"), None);
        // 'X' has no digit counterpart.
        assert_eq!(repair_date("74X812"), None);
    }

    #[test]
    fn validate_or_repair_prefers_the_original() {
        assert_eq!(validate_or_repair_date("740812").as_deref(), Some("740812"));
        assert_eq!(validate_or_repair_date("74O812").as_deref(), Some("740812"));
        assert_eq!(validate_or_repair_date("999999"), None);
    }
}
