pub mod models;
pub mod mrz_parser;
pub mod parsing;
pub mod processing;
pub mod utils;
pub mod validation;

pub use models::{
    CheckDigitReport, DocumentFormat, ParsePolicy, ParsedDocument, Sex, TextCandidate,
};
pub use mrz_parser::MrzParser;
pub use utils::MrzError;
