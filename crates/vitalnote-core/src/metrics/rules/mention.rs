//! Keyword-anchored mention matching for weight and height.

use regex::Regex;

use super::patterns::{HEIGHT_PATTERN, WEIGHT_PATTERN};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::metric::Dimension;

/// Raw captures of one mention: the number as written and the unit token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    pub number: String,
    pub unit_token: String,
}

/// Mention extractor for a single dimension.
pub struct MentionExtractor {
    dimension: Dimension,
}

impl MentionExtractor {
    pub fn new(dimension: Dimension) -> Self {
        Self { dimension }
    }

    pub fn weight() -> Self {
        Self::new(Dimension::Weight)
    }

    pub fn height() -> Self {
        Self::new(Dimension::Height)
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    fn pattern(&self) -> &'static Regex {
        match self.dimension {
            Dimension::Weight => &*WEIGHT_PATTERN,
            Dimension::Height => &*HEIGHT_PATTERN,
        }
    }

    fn to_match(caps: regex::Captures<'_>) -> Option<ExtractionMatch<Mention>> {
        let full_match = caps.get(0)?;
        let mention = Mention {
            number: caps.get(1)?.as_str().to_string(),
            unit_token: caps.get(2)?.as_str().to_string(),
        };

        Some(
            ExtractionMatch::new(mention, full_match.as_str())
                .with_position(full_match.start(), full_match.end()),
        )
    }
}

impl FieldExtractor for MentionExtractor {
    type Output = ExtractionMatch<Mention>;

    // Only the leftmost mention is ever reported.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.pattern().captures(text).and_then(Self::to_match)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.pattern()
            .captures_iter(text)
            .filter_map(Self::to_match)
            .collect()
    }
}
