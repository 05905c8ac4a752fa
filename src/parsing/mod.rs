// Fixed-offset parsers, one per physical layout. Every parser consumes
// pre-normalized lines and cuts fields by position only; searching and
// pattern matching belong to the layers above.

pub mod eep;
mod fields;
pub mod td1;
pub mod td2;
pub mod td3;
