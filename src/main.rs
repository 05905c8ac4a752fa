// MRZ scanning front end
// Feeds recognized text lines through the parsing pipeline and reports
// the decoded document

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::Parser;
use mrzscan::{
    models::{ParsePolicy, ParsedDocument, TextCandidate},
    MrzParser,
};

/// Decode a machine readable zone from recognized text.
#[derive(Parser)]
#[command(name = "mrzscan", version, about)]
struct Args {
    /// File with one recognized line per row; reads stdin when omitted.
    input: Option<PathBuf>,

    /// JSON array of positioned candidates
    /// ({"text", "verticalPosition", "confidence"}) from a recognizer.
    #[arg(long, value_name = "FILE", conflicts_with = "input")]
    candidates: Option<PathBuf>,

    /// Abort when a document number or date check digit fails.
    #[arg(long)]
    strict: bool,

    /// Print the parsed document as JSON instead of the report.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let policy = if args.strict {
        ParsePolicy::Strict
    } else {
        ParsePolicy::Lenient
    };

    let document = if let Some(path) = &args.candidates {
        let candidates = match read_candidates(path) {
            Ok(candidates) => candidates,
            Err(message) => {
                eprintln!("Error: {message}");
                return ExitCode::FAILURE;
            }
        };
        MrzParser::parse_candidates(&candidates, policy)
    } else {
        let lines = match read_input_lines(args.input.as_ref()) {
            Ok(lines) => lines,
            Err(err) => {
                eprintln!("Error reading input: {err}");
                return ExitCode::FAILURE;
            }
        };
        if args.strict {
            match MrzParser::parse_mrz_strict(&lines) {
                Ok(document) => Some(document),
                Err(err) => {
                    eprintln!("Error: {err}");
                    return ExitCode::FAILURE;
                }
            }
        } else {
            MrzParser::parse_mrz(&lines)
        }
    };

    match document {
        Some(document) => {
            if args.json {
                match serde_json::to_string_pretty(&document) {
                    Ok(json) => println!("{json}"),
                    Err(err) => {
                        eprintln!("Error encoding result: {err}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print_parse_report(&document);
            }
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("No machine readable zone found");
            ExitCode::FAILURE
        }
    }
}

fn read_input_lines(path: Option<&PathBuf>) -> io::Result<Vec<String>> {
    let text = match path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    Ok(text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect())
}

fn read_candidates(path: &PathBuf) -> Result<Vec<TextCandidate>, String> {
    let text = fs::read_to_string(path)
        .map_err(|err| format!("cannot read {}: {err}", path.display()))?;
    serde_json::from_str(&text)
        .map_err(|err| format!("bad candidate JSON in {}: {err}", path.display()))
}

// Print a readable summary of a parsed document
fn print_parse_report(document: &ParsedDocument) {
    println!("\n===============================================");
    println!("        MACHINE READABLE ZONE REPORT");
    println!("===============================================\n");

    println!("DOCUMENT INFORMATION:");
    println!("  Document Type: {}", document.document_format.label());
    println!("  Issuing Country: {}", document.country_code);
    println!("  Document Number: {}", document.document_number);
    println!("  Surname: {}", document.surname);
    println!("  Given Names: {}", document.given_names);
    println!("  Nationality: {}", document.nationality);
    println!(
        "  Date of Birth: {}",
        format_date(document.date_of_birth_parsed(), &document.date_of_birth)
    );
    println!("  Sex: {}", document.sex.label());
    println!(
        "  Date of Expiry: {}",
        format_date(document.expiry_date_parsed(), &document.expiry_date)
    );
    println!("  Personal Number: {:?}", document.personal_number);

    println!("\nCHECK DIGITS:");
    let checks = &document.check_digits;
    println!("  1. Document Number: {}", verdict(checks.document_number));
    println!("  2. Date of Birth: {}", verdict(checks.date_of_birth));
    println!("  3. Date of Expiry: {}", verdict(checks.expiry_date));
    println!("  4. Personal Number: {}", verdict(checks.personal_number));
    println!("  5. Composite: {}", verdict(checks.composite));

    match document.is_expired_at(Local::now().date_naive()) {
        Some(true) => println!("\nSTATUS: EXPIRED"),
        Some(false) => println!("\nSTATUS: IN VALIDITY PERIOD"),
        None => println!("\nSTATUS: EXPIRY UNREADABLE"),
    }

    println!("\nRAW LINES:");
    for line in &document.raw_lines {
        println!("  {line}");
    }
}

fn verdict(valid: bool) -> &'static str {
    if valid {
        "PASSED"
    } else {
        "FAILED"
    }
}

fn format_date(parsed: Option<NaiveDate>, raw: &str) -> String {
    match parsed {
        Some(date) => date.format("%d %b %Y").to_string(),
        None => raw.to_string(),
    }
}
