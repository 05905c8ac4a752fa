// TD1: credit-card sized documents, three lines of 30 characters. The
// composite check digit spans zones from the first two lines; the third
// line is all name.

use crate::models::{CheckDigitReport, DocumentFormat, ParsePolicy, ParsedDocument};
use crate::parsing::fields;
use crate::utils::MrzError;

pub fn parse(lines: &[String], policy: ParsePolicy) -> Result<ParsedDocument, MrzError> {
    fields::require_lines(lines, DocumentFormat::TD1)?;
    let line1 = &lines[0];
    let line2 = &lines[1];
    let line3 = &lines[2];

    // Line 1: positions 1-2 document type, 3-5 issuing state,
    // 6-15 document number + check, 16-30 optional data.
    let country_code = fields::clean_field(&fields::zone(line1, 2..5));
    let (document_number, number_valid) = fields::checked_number(line1, 5..14, 14, policy)?;
    let (personal_number, personal_valid) = fields::optional_field(line1, 15..30, None);

    // Line 2: positions 1-7 date of birth + check, 8 sex, 9-15 expiry +
    // check, 16-18 nationality, 19-29 optional data, 30 composite check.
    let (date_of_birth, birth_valid) =
        fields::checked_date(line2, 0..6, 6, "birth date", policy)?;
    let sex = fields::parse_sex(fields::zone_char(line2, 7));
    let (expiry_date, expiry_valid) =
        fields::checked_date(line2, 8..14, 14, "expiry date", policy)?;
    let nationality = fields::clean_field(&fields::zone(line2, 15..18));

    let composite_data = format!(
        "{}{}{}{}",
        fields::zone(line1, 5..30),
        fields::zone(line2, 0..7),
        fields::zone(line2, 8..15),
        fields::zone(line2, 18..29),
    );
    let composite_valid =
        fields::composite_check(&composite_data, fields::zone_char(line2, 29));

    // Line 3: names only.
    let (surname, given_names) = fields::parse_name_zone(&fields::zone(line3, 0..30));

    Ok(ParsedDocument {
        document_format: DocumentFormat::TD1,
        country_code,
        surname,
        given_names,
        document_number,
        nationality,
        date_of_birth,
        sex,
        expiry_date,
        personal_number,
        raw_lines: lines[..3].to_vec(),
        check_digits: CheckDigitReport {
            document_number: number_valid,
            date_of_birth: birth_valid,
            expiry_date: expiry_valid,
            personal_number: personal_valid,
            composite: composite_valid,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sex;

    fn specimen() -> Vec<String> {
        vec![
            "I<UTOD231458907<<<<<<<<<<<<<<<".to_string(),
            "7408122F1204159UTO<<<<<<<<<<<6".to_string(),
            "ERIKSSON<<ANNA<MARIA<<<<<<<<<<".to_string(),
        ]
    }

    #[test]
    fn parses_the_doc_9303_specimen() {
        let document = parse(&specimen(), ParsePolicy::Lenient).unwrap();

        assert_eq!(document.document_format, DocumentFormat::TD1);
        assert_eq!(document.country_code, "UTO");
        assert_eq!(document.surname, "Eriksson");
        assert_eq!(document.given_names, "Anna Maria");
        assert_eq!(document.document_number, "D23145890");
        assert_eq!(document.nationality, "UTO");
        assert_eq!(document.date_of_birth, "740812");
        assert_eq!(document.sex, Sex::Female);
        assert_eq!(document.expiry_date, "120415");
        assert_eq!(document.personal_number, None);
        assert_eq!(document.raw_lines.len(), 3);
        assert!(document.check_digits.all_valid());
    }

    #[test]
    fn optional_data_on_line_one_becomes_the_personal_number() {
        let mut lines = specimen();
        lines[0] = "I<UTOD231458907A1B2C3D4E5<<<<<".to_string();
        let document = parse(&lines, ParsePolicy::Lenient).unwrap();
        assert_eq!(document.personal_number.as_deref(), Some("A1B2C3D4E5"));
        // The tampered optional zone shows up in the composite verdict.
        assert!(!document.check_digits.composite);
    }

    #[test]
    fn corrupted_expiry_check_follows_the_policy() {
        let mut lines = specimen();
        lines[1].replace_range(14..15, "0");

        assert!(matches!(
            parse(&lines, ParsePolicy::Strict),
            Err(MrzError::CheckDigitMismatch {
                field: "expiry date"
            })
        ));

        let document = parse(&lines, ParsePolicy::Lenient).unwrap();
        assert_eq!(document.expiry_date, "120415");
        assert!(!document.check_digits.expiry_date);
    }

    #[test]
    fn two_lines_are_not_enough() {
        let lines = vec![specimen()[0].clone(), specimen()[1].clone()];
        assert!(matches!(
            parse(&lines, ParsePolicy::Lenient),
            Err(MrzError::InsufficientLines { .. })
        ));
    }
}
