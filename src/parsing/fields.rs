// Field extraction helpers shared by the fixed-offset parsers. Every
// parser works on pre-normalized lines, so these helpers never search;
// they only cut zones, verify digits and tidy the results.

use std::ops::Range;

use crate::models::{DocumentFormat, ParsePolicy, Sex};
use crate::processing::normalize::{LineNormalizer, FILLER};
use crate::utils::MrzError;
use crate::validation::{check_digit, date};

/// Guards a parser against short input. Callers treat the error as "try
/// the next strategy", never as fatal.
pub(crate) fn require_lines(lines: &[String], format: DocumentFormat) -> Result<(), MrzError> {
    let expected = format.line_count();
    if lines.len() < expected {
        return Err(MrzError::InsufficientLines {
            format,
            expected,
            found: lines.len(),
        });
    }

    let required = format.line_length();
    for (index, line) in lines.iter().take(expected).enumerate() {
        let length = line.chars().count();
        if length < required {
            return Err(MrzError::LineTooShort {
                index,
                length,
                required,
            });
        }
    }
    Ok(())
}

/// Cuts `range` out of `line` by character position.
pub(crate) fn zone(line: &str, range: Range<usize>) -> String {
    line.chars()
        .skip(range.start)
        .take(range.end - range.start)
        .collect()
}

pub(crate) fn zone_char(line: &str, index: usize) -> char {
    line.chars().nth(index).unwrap_or(FILLER)
}

/// Check positions are numeric-only zones; a lookalike letter there reads
/// as its digit before comparison. Filler passes through untouched.
fn check_char(line: &str, index: usize) -> char {
    LineNormalizer::letter_to_digit(zone_char(line, index))
}

/// Strips filler and whitespace from a fixed-width field.
pub(crate) fn clean_field(field: &str) -> String {
    field.replace(FILLER, " ").trim().replace(' ', "")
}

/// Splits a name zone into surname and given names.
///
/// The zone separates the two halves with "<<" and words inside a half
/// with single fillers. A zone with no separator is all surname.
pub(crate) fn parse_name_zone(name_zone: &str) -> (String, String) {
    let trimmed = name_zone.trim_end_matches(FILLER);
    match trimmed.split_once("<<") {
        Some((surname, given_names)) => (format_name_part(surname), format_name_part(given_names)),
        None => (format_name_part(trimmed), String::new()),
    }
}

fn format_name_part(part: &str) -> String {
    part.split(FILLER)
        .filter(|word| !word.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// 'M' and 'F' decode to the obvious values, filler and 'X' mean not
/// specified, and anything else rides along as read.
pub(crate) fn parse_sex(c: char) -> Sex {
    match c {
        'M' => Sex::Male,
        'F' => Sex::Female,
        '<' | 'X' => Sex::Unspecified,
        other => Sex::Other(other),
    }
}

/// Document number zone plus its check digit. A mismatch aborts a strict
/// parse; a lenient parse logs it and keeps the number as read.
pub(crate) fn checked_number(
    line: &str,
    number: Range<usize>,
    check_index: usize,
    policy: ParsePolicy,
) -> Result<(String, bool), MrzError> {
    let raw = zone(line, number);
    let valid = check_digit::verify_check_digit(&raw, check_char(line, check_index));
    if !valid {
        if policy == ParsePolicy::Strict {
            return Err(MrzError::CheckDigitMismatch {
                field: "document number",
            });
        }
        log::warn!("document number check digit mismatch, keeping {raw:?} as read");
    }
    Ok((clean_field(&raw), valid))
}

/// Date zone plus its check digit. An unreadable date fails the parse
/// under either policy after one confusion-repair attempt; a check digit
/// mismatch follows the policy.
pub(crate) fn checked_date(
    line: &str,
    digits: Range<usize>,
    check_index: usize,
    field: &'static str,
    policy: ParsePolicy,
) -> Result<(String, bool), MrzError> {
    let raw = zone(line, digits);
    let value = date::validate_or_repair_date(&raw).ok_or_else(|| MrzError::InvalidDate {
        field,
        value: raw.clone(),
    })?;

    let valid = check_digit::verify_check_digit(&value, check_char(line, check_index));
    if !valid {
        if policy == ParsePolicy::Strict {
            return Err(MrzError::CheckDigitMismatch { field });
        }
        log::warn!("{field} check digit mismatch, keeping {value:?} as read");
    }
    Ok((value, valid))
}

/// Optional data zone, with or without its own check digit. Never aborts:
/// these zones are frequently blank and their checks cover filler.
pub(crate) fn optional_field(
    line: &str,
    data: Range<usize>,
    check_index: Option<usize>,
) -> (Option<String>, bool) {
    let raw = zone(line, data);
    let valid = match check_index {
        Some(index) => {
            let ok = check_digit::verify_check_digit(&raw, check_char(line, index));
            if !ok {
                log::warn!("optional data check digit mismatch");
            }
            ok
        }
        None => true,
    };

    let cleaned = clean_field(&raw);
    ((!cleaned.is_empty()).then_some(cleaned), valid)
}

/// Composite check over the concatenated checked zones. Informational in
/// both policies; the verdict lands in the report.
pub(crate) fn composite_check(data: &str, expected: char) -> bool {
    let valid = check_digit::verify_check_digit(data, LineNormalizer::letter_to_digit(expected));
    if !valid {
        log::warn!("composite check digit mismatch");
    }
    valid
}
