// OCR text normalization for machine readable zones.
//
// Raw recognizer output arrives with lookalike symbols, stray punctuation
// and the odd lowercase run; the rest of the pipeline wants lines made of
// A-Z, 0-9 and '<' only, at a fixed width per format.

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::models::DocumentFormat;

/// The padding / absent-data character of every MRZ format.
pub const FILLER: char = '<';

lazy_static! {
    /// Symbols the recognizer commonly produces in place of printed MRZ
    /// characters, keyed by what it read, valued by what the document says.
    static ref SYMBOL_SUBSTITUTIONS: HashMap<char, char> = {
        let mut m = HashMap::new();
        // Filler lookalikes: angle quotes and bar-shaped glyphs
        m.insert('«', '<');
        m.insert('‹', '<');
        m.insert('〈', '<');
        m.insert('《', '<');
        m.insert('＜', '<');
        m.insert('|', '<');
        m.insert('¦', '<');
        // 'C' lookalikes
        m.insert('(', 'C');
        m.insert('¢', 'C');
        m.insert('©', 'C');
        m.insert('Ç', 'C');
        m.insert('Ć', 'C');
        m.insert('Č', 'C');
        // 'S' lookalikes, currency and section signs included
        m.insert('$', 'S');
        m.insert('§', 'S');
        m.insert('Š', 'S');
        m.insert('Ś', 'S');
        m.insert('Ş', 'S');
        m
    };

    /// Letters the recognizer confuses with digits, for positions known to
    /// be numeric.
    static ref LETTER_TO_DIGIT: HashMap<char, char> = {
        let mut m = HashMap::new();
        m.insert('O', '0');
        m.insert('Q', '0');
        m.insert('D', '0');
        m.insert('I', '1');
        m.insert('L', '1');
        m.insert('Z', '2');
        m.insert('S', '5');
        m.insert('B', '8');
        m
    };

    /// Digits the recognizer confuses with letters, for positions known to
    /// be alphabetic.
    static ref DIGIT_TO_LETTER: HashMap<char, char> = {
        let mut m = HashMap::new();
        m.insert('0', 'O');
        m.insert('1', 'I');
        m.insert('2', 'Z');
        m.insert('5', 'S');
        m.insert('8', 'B');
        m
    };
}

/// Zone classes across the 30 positions of an Exit-Entry Permit line.
/// Mixed zones (the alphanumeric document number, plain filler) are left
/// exactly as read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EepZone {
    Letters,
    Digits,
    Mixed,
}

#[rustfmt::skip]
const EEP_ZONES: [EepZone; 30] = [
    EepZone::Letters, EepZone::Letters,                   // document type
    EepZone::Mixed, EepZone::Mixed, EepZone::Mixed,       // document number
    EepZone::Mixed, EepZone::Mixed, EepZone::Mixed,
    EepZone::Mixed, EepZone::Mixed, EepZone::Mixed,
    EepZone::Digits,                                      // number check digit
    EepZone::Letters,                                     // nationality indicator
    EepZone::Digits, EepZone::Digits, EepZone::Digits,    // expiry date
    EepZone::Digits, EepZone::Digits, EepZone::Digits,
    EepZone::Digits,                                      // expiry check digit
    EepZone::Letters,                                     // sex
    EepZone::Digits, EepZone::Digits, EepZone::Digits,    // date of birth
    EepZone::Digits, EepZone::Digits, EepZone::Digits,
    EepZone::Digits,                                      // birth check digit
    EepZone::Mixed,                                       // filler
    EepZone::Digits,                                      // composite check digit
];

/// Reduces recognizer text to canonical MRZ lines. All functions are pure;
/// zone-aware corrections are only applied by callers that know whether a
/// position is alphabetic or numeric, never guessed here.
pub struct LineNormalizer;

impl LineNormalizer {
    /// Uppercase, substitute known lookalike symbols, and drop everything
    /// that still falls outside the MRZ alphabet.
    pub fn clean_line(text: &str) -> String {
        text.to_uppercase()
            .chars()
            .map(|c| *SYMBOL_SUBSTITUTIONS.get(&c).unwrap_or(&c))
            .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == FILLER)
            .collect()
    }

    /// Pad with filler or truncate so the result is exactly `target`
    /// characters. Never errors; idempotent.
    pub fn normalize_length(text: &str, target: usize) -> String {
        let mut line: String = text.chars().take(target).collect();
        while line.chars().count() < target {
            line.push(FILLER);
        }
        line
    }

    pub fn letter_to_digit(c: char) -> char {
        *LETTER_TO_DIGIT.get(&c).unwrap_or(&c)
    }

    pub fn digit_to_letter(c: char) -> char {
        *DIGIT_TO_LETTER.get(&c).unwrap_or(&c)
    }

    /// For zones that can only hold digits (dates, check digits).
    pub fn correct_letters_in_numeric_zone(text: &str) -> String {
        text.chars().map(Self::letter_to_digit).collect()
    }

    /// For zones that can only hold letters (names, country codes).
    pub fn correct_digits_in_alpha_zone(text: &str) -> String {
        text.chars().map(Self::digit_to_letter).collect()
    }

    /// Exit-Entry Permit cleanup: clean, fix the width to 30, repair a
    /// corrupted "CS" document-type prefix, then walk the fixed layout
    /// correcting digit/letter confusion zone by zone.
    pub fn clean_eep_line(text: &str) -> String {
        let cleaned = Self::clean_line(text);
        let mut line = Self::normalize_length(&cleaned, DocumentFormat::EEP.line_length());

        // "C$" already folds to "CS" during symbol substitution.
        if line.starts_with("C5") || line.starts_with("C8") {
            line.replace_range(0..2, "CS");
        }

        line.chars()
            .zip(EEP_ZONES.iter())
            .map(|(c, zone)| match zone {
                EepZone::Letters => Self::digit_to_letter(c),
                EepZone::Digits => Self::letter_to_digit(c),
                EepZone::Mixed => c,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_line_substitutes_lookalike_symbols() {
        assert_eq!(LineNormalizer::clean_line("P«UTO"), "P<UTO");
        assert_eq!(LineNormalizer::clean_line("C$C012"), "CSC012");
        assert_eq!(LineNormalizer::clean_line("ab|cd"), "AB<CD");
        assert_eq!(LineNormalizer::clean_line("ÇŠ§"), "CSS");
    }

    #[test]
    fn clean_line_drops_foreign_characters() {
        assert_eq!(LineNormalizer::clean_line("P< UTO\t9303!"), "P<UTO9303");
        assert_eq!(LineNormalizer::clean_line("名前P<"), "P<");
    }

    #[test]
    fn normalize_length_pads_and_truncates() {
        assert_eq!(LineNormalizer::normalize_length("ABC", 5), "ABC<<");
        assert_eq!(LineNormalizer::normalize_length("ABCDEFG", 5), "ABCDE");
        assert_eq!(LineNormalizer::normalize_length("", 3), "<<<");
    }

    #[test]
    fn normalize_length_is_idempotent() {
        let once = LineNormalizer::normalize_length("P<UTOERIKSSON", 44);
        let twice = LineNormalizer::normalize_length(&once, 44);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 44);
    }

    #[test]
    fn zone_corrections_map_known_confusions() {
        assert_eq!(
            LineNormalizer::correct_letters_in_numeric_zone("74O8I2"),
            "740812"
        );
        assert_eq!(
            LineNormalizer::correct_letters_in_numeric_zone("QDLZSB"),
            "001258"
        );
        assert_eq!(
            LineNormalizer::correct_digits_in_alpha_zone("SM1TH"),
            "SMITH"
        );
        assert_eq!(
            LineNormalizer::correct_digits_in_alpha_zone("ER1K550N"),
            "ERIKSSON"
        );
    }

    #[test]
    fn zone_corrections_leave_unambiguous_characters_alone() {
        assert_eq!(
            LineNormalizer::correct_letters_in_numeric_zone("123456"),
            "123456"
        );
        assert_eq!(LineNormalizer::correct_digits_in_alpha_zone("ANNA"), "ANNA");
    }

    #[test]
    fn eep_cleanup_repairs_the_prefix() {
        let line = "C5C012345672<2612317<9001011<6";
        assert!(LineNormalizer::clean_eep_line(line).starts_with("CS"));
        let line = "C8C012345672<2612317<9001011<6";
        assert!(LineNormalizer::clean_eep_line(line).starts_with("CS"));
        let line = "C$C012345672<2612317<9001011<6";
        assert!(LineNormalizer::clean_eep_line(line).starts_with("CS"));
    }

    #[test]
    fn eep_cleanup_corrects_date_zones_digit_by_digit() {
        // 'O' and 'I' inside the expiry and birth zones read back as digits.
        let corrupted = "CSC012345672<26I23I7<9OO1O11<6";
        let repaired = LineNormalizer::clean_eep_line(corrupted);
        assert_eq!(repaired, "CSC012345672<2612317<9001011<6");
    }

    #[test]
    fn eep_cleanup_fixes_width_first() {
        let short = "CSC01234567";
        let repaired = LineNormalizer::clean_eep_line(short);
        assert_eq!(repaired.len(), 30);
        assert!(repaired.ends_with('<'));
    }
}
