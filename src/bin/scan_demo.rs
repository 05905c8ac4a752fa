// Runs the parsing pipeline on synthetic recognizer output, no camera
// required. Shows the lenient path absorbing OCR damage and the permit
// priority rule picking a single line out of a noisy frame.

use mrzscan::models::{ParsePolicy, TextCandidate};
use mrzscan::MrzParser;

fn candidate(text: &str, vertical_position: f32, confidence: f32) -> TextCandidate {
    TextCandidate {
        text: text.to_string(),
        vertical_position,
        confidence,
    }
}

fn main() {
    println!("MRZ Scan Demo");
    println!("-------------");

    // A passport frame as a recognizer typically delivers it: page text
    // above the zone, lookalike symbols and lowercase inside it.
    println!("\nFrame 1: passport with recognition noise");
    let frame = vec![
        candidate("REPUBLIC OF UTOPIA PASSPORT", 31.0, 0.52),
        candidate("eriksson, anna maria", 24.0, 0.61),
        candidate("p«uto eriksson<<anna<maria<<<<<<<<<<<<<<<<<<<", 9.0, 0.88),
        candidate("L898902C36UTO74O8122F12O4159ZE184226B<<<<<10", 4.0, 0.85),
    ];

    match MrzParser::parse_candidates(&frame, ParsePolicy::Lenient) {
        Some(document) => {
            println!("  Format: {}", document.document_format.label());
            println!("  Holder: {}, {}", document.surname, document.given_names);
            println!("  Number: {}", document.document_number);
            println!("  Born:   {}", document.date_of_birth);
            println!("  Expiry: {}", document.expiry_date);
            println!(
                "  Checks: {}",
                if document.check_digits.all_valid() {
                    "all digits verified"
                } else {
                    "some digits failed, fields kept as read"
                }
            );
        }
        None => println!("  No machine readable zone found"),
    }

    // A permit frame: the single 30-character line hides among text that
    // also looks vaguely zone-shaped.
    println!("\nFrame 2: Exit-Entry Permit in a cluttered frame");
    let frame = vec![
        candidate("EXIT-ENTRY PERMIT FOR TRAVELLING", 28.0, 0.47),
        candidate("C5C012345672<2612317<9001011<6", 3.0, 0.74),
    ];

    match MrzParser::parse_candidates(&frame, ParsePolicy::Lenient) {
        Some(document) => {
            println!("  Format: {}", document.document_format.label());
            println!("  Number: {}", document.document_number);
            println!("  Born:   {}", document.date_of_birth);
            println!("  Expiry: {}", document.expiry_date);
        }
        None => println!("  No machine readable zone found"),
    }

    // The strict path, as used for chip-sourced text: no OCR noise, so a
    // failed check digit means the data is wrong, not the optics.
    println!("\nFrame 3: strict parse of chip-sourced lines");
    let lines = vec![
        "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<".to_string(),
        "L898902C30UTO7408122F1204159ZE184226B<<<<<10".to_string(),
    ];

    match MrzParser::parse_mrz_strict(&lines) {
        Ok(document) => println!("  Accepted: {}", document.document_number),
        Err(err) => println!("  Rejected: {err}"),
    }
}
