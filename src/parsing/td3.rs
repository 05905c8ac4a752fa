// TD3: passport booklets, two lines of 44 characters. MRV-A visas print
// the same line shape, so they parse here under their own format tag.

use crate::models::{CheckDigitReport, DocumentFormat, ParsePolicy, ParsedDocument};
use crate::parsing::fields;
use crate::utils::MrzError;

pub fn parse(lines: &[String], policy: ParsePolicy) -> Result<ParsedDocument, MrzError> {
    parse_as(DocumentFormat::TD3, lines, policy)
}

pub(crate) fn parse_as(
    format: DocumentFormat,
    lines: &[String],
    policy: ParsePolicy,
) -> Result<ParsedDocument, MrzError> {
    fields::require_lines(lines, format)?;
    let line1 = &lines[0];
    let line2 = &lines[1];

    // Line 1: positions 1-2 document type, 3-5 issuing state, 6-44 names.
    let country_code = fields::clean_field(&fields::zone(line1, 2..5));
    let (surname, given_names) = fields::parse_name_zone(&fields::zone(line1, 5..44));

    // Line 2: positions 1-10 document number + check, 11-13 nationality,
    // 14-20 date of birth + check, 21 sex, 22-28 expiry + check,
    // 29-43 personal number + check, 44 composite check.
    let (document_number, number_valid) = fields::checked_number(line2, 0..9, 9, policy)?;
    let nationality = fields::clean_field(&fields::zone(line2, 10..13));
    let (date_of_birth, birth_valid) =
        fields::checked_date(line2, 13..19, 19, "birth date", policy)?;
    let sex = fields::parse_sex(fields::zone_char(line2, 20));
    let (expiry_date, expiry_valid) =
        fields::checked_date(line2, 21..27, 27, "expiry date", policy)?;
    let (personal_number, personal_valid) = fields::optional_field(line2, 28..42, Some(42));

    let composite_data = format!(
        "{}{}{}",
        fields::zone(line2, 0..10),
        fields::zone(line2, 13..20),
        fields::zone(line2, 21..43),
    );
    let composite_valid =
        fields::composite_check(&composite_data, fields::zone_char(line2, 43));

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
