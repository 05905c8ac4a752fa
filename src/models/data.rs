use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Physical MRZ layouts this crate understands. The first five are the
/// ICAO Doc 9303 classes; EEP is China's Exit-Entry Permit for Hong Kong
/// and Macao, a single-line format outside the ICAO families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DocumentFormat {
    TD1,  // ID card, 3 lines x 30
    TD2,  // Other travel document, 2 lines x 36
    TD3,  // Passport, 2 lines x 44
    MRVA, // Visa format-A, TD3 line shape
    MRVB, // Visa format-B, TD2 line shape
    EEP,  // Exit-Entry Permit, 1 line x 30
}

impl DocumentFormat {
    pub fn line_count(&self) -> usize {
        match self {
            DocumentFormat::TD1 => 3,
            DocumentFormat::TD2 => 2,
            DocumentFormat::TD3 => 2,
            DocumentFormat::MRVA => 2,
            DocumentFormat::MRVB => 2,
            DocumentFormat::EEP => 1,
        }
    }

    pub fn line_length(&self) -> usize {
        match self {
            DocumentFormat::TD1 => 30,
            DocumentFormat::TD2 => 36,
            DocumentFormat::TD3 => 44,
            DocumentFormat::MRVA => 44,
            DocumentFormat::MRVB => 36,
            DocumentFormat::EEP => 30,
        }
    }

    /// Human-readable name of the format family.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentFormat::TD1 => "ID Card",
            DocumentFormat::TD2 => "Travel Document",
            DocumentFormat::TD3 => "Passport",
            DocumentFormat::MRVA => "Visa",
            DocumentFormat::MRVB => "Visa",
            DocumentFormat::EEP => "Exit-Entry Permit",
        }
    }
}

/// How hard to push back when a check digit fails verification. Camera text
/// earns leniency because optical noise routinely corrupts one digit; text
/// lifted from the contactless chip has no such excuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePolicy {
    Lenient,
    Strict,
}

/// One recognized line as delivered by the text-recognition collaborator.
///
/// Vertical position follows the recognizer's coordinate convention: a
/// larger value sits higher on the physical document, so sorting descending
/// yields reading order. Confidence is the recognizer's own score in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextCandidate {
    pub text: String,
    pub vertical_position: f32,
    pub confidence: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sex {
    Male,
    Female,
    Unspecified,
    /// Whatever character the sex position actually held. A bad read never
    /// sinks an otherwise good parse.
    Other(char),
}

impl Sex {
    pub fn label(&self) -> String {
        match self {
            Sex::Male => "Male".to_string(),
            Sex::Female => "Female".to_string(),
            Sex::Unspecified => "Unspecified".to_string(),
            Sex::Other(c) => c.to_string(),
        }
    }
}

/// Which check digits verified against their fields. Lenient parses return
/// fields exactly as read even when a digit fails, so the verdicts travel
/// alongside the data. A field whose layout carries no check digit, or whose
/// check position holds filler, reports true.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckDigitReport {
    pub document_number: bool,
    pub date_of_birth: bool,
    pub expiry_date: bool,
    pub personal_number: bool,
    pub composite: bool,
}

impl CheckDigitReport {
    pub fn all_valid(&self) -> bool {
        self.document_number
            && self.date_of_birth
            && self.expiry_date
            && self.personal_number
            && self.composite
    }
}

/// The decoded document. Immutable once constructed; one instance per
/// successful parse. Dates stay in the YYMMDD form printed in the zone, with
/// calendar accessors for callers that want real dates.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDocument {
    pub document_format: DocumentFormat,
    pub country_code: String,
    pub surname: String,
    pub given_names: String,
    pub document_number: String,
    pub nationality: String,
    /// YYMMDD as printed.
    pub date_of_birth: String,
    pub sex: Sex,
    /// YYMMDD as printed.
    pub expiry_date: String,
    pub personal_number: Option<String>,
    /// The width-normalized lines the fields were decoded from.
    pub raw_lines: Vec<String>,
    pub check_digits: CheckDigitReport,
}

impl ParsedDocument {
    /// Two-digit years resolve per chrono's %y convention: 00-68 land in the
    /// 2000s, 69-99 in the 1900s.
    pub fn date_of_birth_parsed(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date_of_birth, "%y%m%d").ok()
    }

    pub fn expiry_date_parsed(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.expiry_date, "%y%m%d").ok()
    }

    /// None when the expiry field does not read as a calendar date. The
    /// caller supplies the reference day; the library never consults a clock.
    pub fn is_expired_at(&self, today: NaiveDate) -> Option<bool> {
        self.expiry_date_parsed().map(|expiry| expiry < today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_constants_are_fixed() {
        let expectations = [
            (DocumentFormat::TD1, 3, 30),
            (DocumentFormat::TD2, 2, 36),
            (DocumentFormat::TD3, 2, 44),
            (DocumentFormat::MRVA, 2, 44),
            (DocumentFormat::MRVB, 2, 36),
            (DocumentFormat::EEP, 1, 30),
        ];
        for (format, lines, length) in expectations {
            assert_eq!(format.line_count(), lines, "{format:?} line count");
            assert_eq!(format.line_length(), length, "{format:?} line length");
        }
    }

    #[test]
    fn every_format_has_a_label() {
        for format in [
            DocumentFormat::TD1,
            DocumentFormat::TD2,
            DocumentFormat::TD3,
            DocumentFormat::MRVA,
            DocumentFormat::MRVB,
            DocumentFormat::EEP,
        ] {
            assert!(!format.label().is_empty());
        }
    }

    #[test]
    fn expiry_comparison_uses_supplied_day() {
        let document = ParsedDocument {
            document_format: DocumentFormat::TD3,
            country_code: "UTO".to_string(),
            surname: "Eriksson".to_string(),
            given_names: "Anna Maria".to_string(),
            document_number: "L898902C3".to_string(),
            nationality: "UTO".to_string(),
            date_of_birth: "740812".to_string(),
            sex: Sex::Female,
            expiry_date: "120415".to_string(),
            personal_number: None,
            raw_lines: Vec::new(),
            check_digits: CheckDigitReport {
                document_number: true,
                date_of_birth: true,
                expiry_date: true,
                personal_number: true,
                composite: true,
            },
        };

        let before = NaiveDate::from_ymd_opt(2012, 4, 14).unwrap();
        let after = NaiveDate::from_ymd_opt(2012, 4, 16).unwrap();
        assert_eq!(document.is_expired_at(before), Some(false));
        assert_eq!(document.is_expired_at(after), Some(true));
        assert_eq!(
            document.date_of_birth_parsed(),
            NaiveDate::from_ymd_opt(1974, 8, 12)
        );
    }
}
