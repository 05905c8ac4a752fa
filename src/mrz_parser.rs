// Parse orchestration. The manager turns caller text into candidates,
// runs extraction, dispatches to the right layout parser and falls back
// to a direct scan when extraction comes up empty.

use std::ops::RangeInclusive;

use crate::models::{DocumentFormat, ParsePolicy, ParsedDocument, TextCandidate};
use crate::parsing::{eep, td1, td2, td3};
use crate::processing::{CandidateExtractor, LineNormalizer};
use crate::utils::MrzError;
use crate::validation::LineClassifier;

/// Entry point for every parse. Stateless; all methods may be called from
/// any number of threads at once.
pub struct MrzParser;

impl MrzParser {
    /// Parses recognizer or chip lines leniently: check digit mismatches
    /// are reported in the result, not fatal. Absence of a readable zone
    /// is the normal outcome for most camera frames, hence `Option`.
    pub fn parse_mrz(lines: &[String]) -> Option<ParsedDocument> {
        Self::parse_with_policy(lines, ParsePolicy::Lenient).ok()
    }

    /// Strict variant for text with no optical noise to excuse mismatches,
    /// such as MRZ read back from the contactless chip. Fails on the first
    /// document number or date check digit that does not verify.
    pub fn parse_mrz_strict(lines: &[String]) -> Result<ParsedDocument, MrzError> {
        Self::parse_with_policy(lines, ParsePolicy::Strict)
    }

    /// Parses positioned candidates straight from a text recognizer.
    pub fn parse_candidates(
        candidates: &[TextCandidate],
        policy: ParsePolicy,
    ) -> Option<ParsedDocument> {
        if let Some((block, format)) = CandidateExtractor::extract(candidates) {
            if let Ok(document) = Self::parse_by_document_type(format, &block, policy) {
                return Some(document);
            }
        }
        let lines: Vec<String> = candidates.iter().map(|c| c.text.clone()).collect();
        Self::direct_parse(&lines, policy).ok()
    }

    /// Normalizes `lines` for `format` and runs the matching parser.
    pub fn parse_by_document_type(
        format: DocumentFormat,
        lines: &[String],
        policy: ParsePolicy,
    ) -> Result<ParsedDocument, MrzError> {
        let lines: Vec<String> = match format {
            DocumentFormat::EEP => lines
                .iter()
                .map(|line| LineNormalizer::clean_eep_line(line))
                .collect(),
            _ => lines
                .iter()
                .map(|line| {
                    LineNormalizer::normalize_length(
                        &LineNormalizer::clean_line(line),
                        format.line_length(),
                    )
                })
                .collect(),
        };

        match format {
            DocumentFormat::TD1 => td1::parse(&lines, policy),
            DocumentFormat::TD2 => td2::parse(&lines, policy),
            DocumentFormat::TD3 => td3::parse(&lines, policy),
            DocumentFormat::MRVA => td3::parse_as(DocumentFormat::MRVA, &lines, policy),
            DocumentFormat::MRVB => td2::parse_as(DocumentFormat::MRVB, &lines, policy),
            DocumentFormat::EEP => eep::parse(&lines, policy),
        }
    }

    fn parse_with_policy(lines: &[String], policy: ParsePolicy) -> Result<ParsedDocument, MrzError> {
        let candidates = Self::as_candidates(lines);
        if let Some((block, format)) = CandidateExtractor::extract(&candidates) {
            match Self::parse_by_document_type(format, &block, policy) {
                Ok(document) => return Ok(document),
                // Keep the more specific failure if the direct scan also
                // comes up empty.
                Err(primary) => return Self::direct_parse(lines, policy).map_err(|_| primary),
            }
        }
        Self::direct_parse(lines, policy)
    }

    /// Wraps plain lines as candidates. Positions descend with the index
    /// so input order survives the extractor's reading-order sort.
    fn as_candidates(lines: &[String]) -> Vec<TextCandidate> {
        let count = lines.len();
        lines
            .iter()
            .enumerate()
            .map(|(index, text)| TextCandidate {
                text: text.clone(),
                vertical_position: (count - index) as f32,
                confidence: 1.0,
            })
            .collect()
    }

    /// Last-resort scan over cleaned lines, cheapest shapes first. Each
    /// search takes the first line matching the prefix rule plus its
    /// immediate successors; there is no backtracking.
    fn direct_parse(lines: &[String], policy: ParsePolicy) -> Result<ParsedDocument, MrzError> {
        let cleaned: Vec<String> = lines
            .iter()
            .map(|line| LineNormalizer::clean_line(line))
            .collect();

        // An Exit-Entry Permit is a single short line and wins outright.
        if let Some(line) = cleaned.iter().find(|line| Self::eep_shaped(line)) {
            return Self::parse_by_document_type(
                DocumentFormat::EEP,
                std::slice::from_ref(line),
                policy,
            );
        }

        if let Some(block) = Self::find_lines(&cleaned, 2, 42..=46, |line| line.starts_with('P')) {
            return Self::parse_by_document_type(DocumentFormat::TD3, &block, policy);
        }

        if let Some(block) = Self::find_lines(&cleaned, 3, 28..=32, |line| {
            matches!(line.chars().next(), Some('I') | Some('A') | Some('C'))
                && !LineClassifier::has_eep_prefix(line)
        }) {
            return Self::parse_by_document_type(DocumentFormat::TD1, &block, policy);
        }

        if let Some(block) = Self::find_lines(&cleaned, 2, 34..=38, |line| {
            matches!(
                line.chars().next(),
                Some('P') | Some('I') | Some('A') | Some('C') | Some('V')
            )
        }) {
            return Self::parse_by_document_type(DocumentFormat::TD2, &block, policy);
        }

        Err(MrzError::NoMrzFound)
    }

    fn eep_shaped(line: &str) -> bool {
        LineClassifier::has_eep_prefix(line) && (28..=32).contains(&line.chars().count())
    }

    fn find_lines<F>(
        lines: &[String],
        count: usize,
        lengths: RangeInclusive<usize>,
        prefix: F,
    ) -> Option<Vec<String>>
    where
        F: Fn(&str) -> bool,
    {
        let start = lines
            .iter()
            .position(|line| prefix(line) && lengths.contains(&line.chars().count()))?;

        let block = lines.get(start..start + count)?;
        if block
            .iter()
            .all(|line| lengths.contains(&line.chars().count()))
        {
            Some(block.to_vec())
        } else {
            None
        }
    }
}
