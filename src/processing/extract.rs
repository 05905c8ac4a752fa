// Candidate selection: turns an unordered bag of recognizer lines into an
// ordered MRZ block plus the format it appears to belong to.

use std::cmp::Ordering;

use crate::models::{DocumentFormat, TextCandidate};
use crate::processing::normalize::LineNormalizer;
use crate::validation::LineClassifier;

pub struct CandidateExtractor;

impl CandidateExtractor {
    /// Selects the most plausible MRZ block from `candidates`.
    ///
    /// Exit-Entry Permit candidates are handled before anything else: a
    /// permit line starts with 'C' and would otherwise be swallowed by the
    /// ID card path. When no permit is present, remaining candidates are
    /// put into reading order (vertical position descending), the format
    /// is inferred from the top line, and one spare line is kept to absorb
    /// recognizer noise above the true block.
    pub fn extract(candidates: &[TextCandidate]) -> Option<(Vec<String>, DocumentFormat)> {
        // Step 1: partition into permit-shaped and general MRZ lines.
        let mut permits: Vec<&TextCandidate> = Vec::new();
        let mut general: Vec<&TextCandidate> = Vec::new();
        for candidate in candidates {
            if LineClassifier::is_eep_line(&candidate.text) {
                permits.push(candidate);
            } else if LineClassifier::is_mrz_line(&candidate.text) {
                general.push(candidate);
            }
        }

        // Step 2: permit priority. The single best permit candidate either
        // produces the result or ends the extraction; falling through would
        // only let the ID card rules misread the same line.
        if let Some(&first) = permits.first() {
            let mut best = first;
            for &candidate in permits.iter().skip(1) {
                if candidate.confidence > best.confidence {
                    best = candidate;
                }
            }
            let line = LineNormalizer::clean_eep_line(&best.text);
            if LineClassifier::validate_eep_line(&line) || LineClassifier::has_eep_prefix(&line) {
                return Some((vec![line], DocumentFormat::EEP));
            }
            return None;
        }

        // Step 3: reading order. Higher vertical position means higher on
        // the document; the sort is stable so equal positions keep their
        // input order.
        general.sort_by(|a, b| {
            b.vertical_position
                .partial_cmp(&a.vertical_position)
                .unwrap_or(Ordering::Equal)
        });

        let first = general.first()?;
        let first_line = LineNormalizer::clean_line(&first.text);
        let format = Self::infer_format(&first_line, general.len())?;

        // Step 4: keep one spare line, normalize, then drop the surplus
        // from the front. Recognizer noise sits above the zone, so the
        // tail is the trustworthy part.
        let line_count = format.line_count();
        let line_length = format.line_length();
        let mut lines: Vec<String> = general
            .iter()
            .take(line_count + 1)
            .map(|c| {
                let cleaned = LineNormalizer::clean_line(&c.text);
                LineNormalizer::normalize_length(&cleaned, line_length)
            })
            .collect();

        if lines.len() < line_count.min(2) {
            return None;
        }
        while lines.len() > line_count {
            lines.remove(0);
        }

        Some((lines, format))
    }

    /// Format inference from the top line. Rules are ordered; the first
    /// match wins and later rules never reconsider it.
    fn infer_format(first_line: &str, available: usize) -> Option<DocumentFormat> {
        let length = first_line.chars().count();

        if LineClassifier::has_eep_prefix(first_line) && (28..=32).contains(&length) {
            return Some(DocumentFormat::EEP);
        }
        if first_line.starts_with('P') && (42..=46).contains(&length) {
            return Some(DocumentFormat::TD3);
        }
        if first_line.starts_with('V') && (42..=46).contains(&length) {
            return Some(DocumentFormat::MRVA);
        }
        if matches!(first_line.chars().next(), Some('I') | Some('A') | Some('C'))
            && (28..=32).contains(&length)
        {
            return Some(DocumentFormat::TD1);
        }
        if (34..=38).contains(&length) {
            return Some(if first_line.starts_with('V') {
                DocumentFormat::MRVB
            } else {
                DocumentFormat::TD2
            });
        }

        // Last resort: shape alone, no prefix evidence.
        if available >= 2 && length >= 42 {
            return Some(DocumentFormat::TD3);
        }
        if available >= 2 && length >= 34 {
            return Some(DocumentFormat::TD2);
        }
        if (28..=32).contains(&length) {
            return Some(if available == 1 {
                DocumentFormat::EEP
            } else {
                DocumentFormat::TD1
            });
        }

        None
    }
}
