pub mod data;

pub use data::{
    CheckDigitReport, DocumentFormat, ParsePolicy, ParsedDocument, Sex, TextCandidate,
};
