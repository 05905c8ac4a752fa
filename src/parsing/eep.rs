// China Exit-Entry Permit: one line of 30 characters, outside the ICAO
// layout families. The line carries no name, sex or country zones; both
// country fields decode to the issuing state's fixed code.

use crate::models::{CheckDigitReport, DocumentFormat, ParsePolicy, ParsedDocument, Sex};
use crate::parsing::fields;
use crate::utils::MrzError;

const ISSUING_STATE: &str = "CHN";

pub fn parse(lines: &[String], policy: ParsePolicy) -> Result<ParsedDocument, MrzError> {
    fields::require_lines(lines, DocumentFormat::EEP)?;
    let line = &lines[0];

    // Positions 1-2 document type, 3-11 document number, 12 check,
    // 13 filler, 14-19 expiry, 20 check, 21 filler, 22-27 date of birth,
    // 28 check, 29 filler, 30 composite check.
    let (document_number, number_valid) = fields::checked_number(line, 2..11, 11, policy)?;
    let (expiry_date, expiry_valid) =
        fields::checked_date(line, 13..19, 19, "expiry date", policy)?;
    let (date_of_birth, birth_valid) =
        fields::checked_date(line, 21..27, 27, "birth date", policy)?;

    let composite_data = format!(
        "{}{}{}",
        fields::zone(line, 2..12),
        fields::zone(line, 13..20),
        fields::zone(line, 21..28),
    );
    let composite_valid =
        fields::composite_check(&composite_data, fields::zone_char(line, 29));

    Ok(ParsedDocument {
        document_format: DocumentFormat::EEP,
        country_code: ISSUING_STATE.to_string(),
        surname: String::new(),
        given_names: String::new(),
        document_number,
        nationality: ISSUING_STATE.to_string(),
        date_of_birth,
        sex: Sex::Unspecified,
        expiry_date,
        personal_number: None,
        raw_lines: lines[..1].to_vec(),
        check_digits: CheckDigitReport {
            document_number: number_valid,
            date_of_birth: birth_valid,
            expiry_date: expiry_valid,
            personal_number: true,
            composite: composite_valid,
        },
    })
}
