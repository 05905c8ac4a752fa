// TD2: two lines of 36 characters, used by smaller travel documents.
// MRV-B visas share the shape and parse here under their own tag. The
// optional data zone has no dedicated check digit in this layout.

use crate::models::{CheckDigitReport, DocumentFormat, ParsePolicy, ParsedDocument};
use crate::parsing::fields;
use crate::utils::MrzError;

pub fn parse(lines: &[String], policy: ParsePolicy) -> Result<ParsedDocument, MrzError> {
    parse_as(DocumentFormat::TD2, lines, policy)
}

pub(crate) fn parse_as(
    format: DocumentFormat,
    lines: &[String],
    policy: ParsePolicy,
) -> Result<ParsedDocument, MrzError> {
    fields::require_lines(lines, format)?;
    let line1 = &lines[0];
    let line2 = &lines[1];

    // Line 1: positions 1-2 document type, 3-5 issuing state, 6-36 names.
    let country_code = fields::clean_field(&fields::zone(line1, 2..5));
    let (surname, given_names) = fields::parse_name_zone(&fields::zone(line1, 5..36));

    // Line 2: positions 1-10 document number + check, 11-13 nationality,
    // 14-20 date of birth + check, 21 sex, 22-28 expiry + check,
    // 29-35 optional data, 36 composite check.
    let (document_number, number_valid) = fields::checked_number(line2, 0..9, 9, policy)?;
    let nationality = fields::clean_field(&fields::zone(line2, 10..13));
    let (date_of_birth, birth_valid) =
        fields::checked_date(line2, 13..19, 19, "birth date", policy)?;
    let sex = fields::parse_sex(fields::zone_char(line2, 20));
    let (expiry_date, expiry_valid) =
        fields::checked_date(line2, 21..27, 27, "expiry date", policy)?;
    let (personal_number, personal_valid) = fields::optional_field(line2, 28..35, None);

    let composite_data = format!(
        "{}{}{}",
        fields::zone(line2, 0..10),
        fields::zone(line2, 13..20),
        fields::zone(line2, 21..35),
    );
    let composite_valid =
        fields::composite_check(&composite_data, fields::zone_char(line2, 35));

    Ok(ParsedDocument {
        document_format: format,
        country_code,
        surname,
        given_names,
        document_number,
        nationality,
        date_of_birth,
        sex,
        expiry_date,
        personal_number,
        raw_lines: lines[..2].to_vec(),
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
            "I<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<".to_string(),
            "D231458907UTO7408122F1204159<<<<<<<6".to_string(),
        ]
    }

    #[test]
    fn parses_the_doc_9303_specimen() {
        let document = parse(&specimen(), ParsePolicy::Lenient).unwrap();

        assert_eq!(document.document_format, DocumentFormat::TD2);
        assert_eq!(document.country_code, "UTO");
        assert_eq!(document.surname, "Eriksson");
        assert_eq!(document.given_names, "Anna Maria");
        assert_eq!(document.document_number, "D23145890");
        assert_eq!(document.nationality, "UTO");
        assert_eq!(document.date_of_birth, "740812");
        assert_eq!(document.sex, Sex::Female);
        assert_eq!(document.expiry_date, "120415");
        assert_eq!(document.personal_number, None);
        assert!(document.check_digits.all_valid());
    }

    #[test]
    fn visa_b_reuses_the_layout_under_its_own_tag() {
        let mut lines = specimen();
        lines[0].replace_range(0..1, "V");
        let document = parse_as(DocumentFormat::MRVB, &lines, ParsePolicy::Lenient).unwrap();
        assert_eq!(document.document_format, DocumentFormat::MRVB);
        assert_eq!(document.surname, "Eriksson");
        assert_eq!(document.date_of_birth, "740812");
    }

    #[test]
    fn optional_data_populates_the_personal_number() {
        let lines = vec![
            specimen()[0].clone(),
            "D231458907UTO7408122F1204159ABC12345".to_string(),
        ];
        let document = parse(&lines, ParsePolicy::Lenient).unwrap();
        assert_eq!(document.personal_number.as_deref(), Some("ABC1234"));
        // No dedicated check digit covers this zone.
        assert!(document.check_digits.personal_number);
        assert!(document.check_digits.composite);
    }

    #[test]
    fn strict_mode_rejects_a_corrupted_birth_check() {
        let mut lines = specimen();
        lines[1].replace_range(19..20, "9");

        assert!(matches!(
            parse(&lines, ParsePolicy::Strict),
            Err(MrzError::CheckDigitMismatch {
                field: "birth date"
            })
        ));

        let document = parse(&lines, ParsePolicy::Lenient).unwrap();
        assert_eq!(document.date_of_birth, "740812");
        assert!(!document.check_digits.date_of_birth);
    }
}
