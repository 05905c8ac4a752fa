//! Structural plausibility checks for recognizer output lines.
//!
//! These checks decide whether a line of text is worth handing to the
//! parsers at all. They are deliberately tolerant of OCR damage: a line
//! only needs the right shape, not valid content.

use lazy_static::lazy_static;
use regex::Regex;

use crate::processing::normalize::FILLER;

lazy_static! {
    // First line of a passport booklet, type character plus issuing state.
    static ref PASSPORT_LINE1_PREFIX: Regex = Regex::new(r"^P[<O0]").unwrap();
    // ID card first lines, including the common misreads of "I<".
    static ref ID_CARD_PREFIX: Regex = Regex::new(r"^(?:I<|ID|I0|A<|AC|C<)").unwrap();
    // Visa first lines.
    static ref VISA_PREFIX: Regex = Regex::new(r"^V[<0]").unwrap();
    // Exit-Entry Permit lines; 5, 8 and $ are what OCR makes of a worn S.
    static ref EEP_PREFIX: Regex = Regex::new(r"^C[S58$<]").unwrap();
}

const MIN_LINE_LENGTH: usize = 28;
const MAX_LINE_LENGTH: usize = 46;

/// Minimum share of characters drawn from A-Z, 0-9 and '<'.
const ALPHABET_DENSITY: f32 = 0.85;

/// Filler share above which a line is accepted without a structural match.
/// Blank optional zones produce lines that are almost entirely '<'.
const FILLER_DENSITY: f32 = 0.90;

fn strip_spaces(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

fn digit_count(text: &str) -> usize {
    text.chars().filter(char::is_ascii_digit).count()
}

fn filler_count(text: &str) -> usize {
    text.chars().filter(|c| *c == FILLER).count()
}

/// Shape-level gatekeeper between raw recognizer candidates and the
/// extraction pipeline.
pub struct LineClassifier;

impl LineClassifier {
    /// True when `text` plausibly is one line of a machine readable zone.
    ///
    /// Requires a workable length, a mostly-MRZ character set, and one of
    /// several structural silhouettes. Lines dominated by filler are
    /// accepted even without a silhouette match.
    pub fn is_mrz_line(text: &str) -> bool {
        let line = strip_spaces(text);
        let length = line.chars().count();

        if !(MIN_LINE_LENGTH..=MAX_LINE_LENGTH).contains(&length) {
            return false;
        }

        let in_alphabet = line
            .chars()
            .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == FILLER)
            .count();
        if (in_alphabet as f32) < length as f32 * ALPHABET_DENSITY {
            return false;
        }

        let digits = digit_count(&line);
        let fillers = filler_count(&line);

        let structural = (EEP_PREFIX.is_match(&line) && digits >= 10)
            || (PASSPORT_LINE1_PREFIX.is_match(&line) && line.contains("<<"))
            // Passport second lines are digit-heavy with filler padding.
            || (digits >= 10 && fillers >= 1)
            || ID_CARD_PREFIX.is_match(&line)
            || VISA_PREFIX.is_match(&line)
            || (line.contains("<<") && length >= 30)
            || (digits >= 6 && fillers >= 1);

        if structural {
            return true;
        }

        fillers as f32 >= length as f32 * FILLER_DENSITY
    }

    /// True when `text` looks like the single line of an Exit-Entry Permit.
    pub fn is_eep_line(text: &str) -> bool {
        let line = strip_spaces(text);
        let length = line.chars().count();

        (MIN_LINE_LENGTH..=32).contains(&length)
            && EEP_PREFIX.is_match(&line)
            && line.contains(FILLER)
            && digit_count(&line) >= 10
    }

    /// True when `text` begins with an Exit-Entry Permit document type,
    /// canonical or damaged.
    pub fn has_eep_prefix(text: &str) -> bool {
        EEP_PREFIX.is_match(text)
    }

    /// Full validation of a normalized Exit-Entry Permit line: exact
    /// width, canonical prefix, and a digit or filler in every
    /// check-digit position.
    pub fn validate_eep_line(text: &str) -> bool {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() != 30 || !text.starts_with("CS") {
            return false;
        }

        const CHECK_POSITIONS: [usize; 5] = [11, 18, 26, 28, 29];
        CHECK_POSITIONS
            .iter()
            .all(|&i| chars[i].is_ascii_digit() || chars[i] == FILLER)
    }
}
