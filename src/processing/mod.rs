// Processing layer: text normalization and candidate selection.

pub mod extract;
pub mod normalize;

pub use extract::CandidateExtractor;
pub use normalize::{LineNormalizer, FILLER};
