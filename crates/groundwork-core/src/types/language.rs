//! `Accept-Language` parsing shared by the localizer and the outbound
//! communicator.

use std::fmt;

/// One language range with its quality weight.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRange {
    /// Language tag as sent, e.g. `en-US` or `*`.
    pub tag: String,
    /// Quality between 0.0 and 1.0.
    pub quality: f32,
}

impl fmt::Display for LanguageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (self.quality - 1.0).abs() < f32::EPSILON {
            write!(f, "{}", self.tag)
        } else {
            write!(f, "{};q={}", self.tag, self.quality)
        }
    }
}

/// Parse an `Accept-Language` value into ranges, keeping header order.
///
/// A missing or unparsable `q` leaves the quality at 1.0. Empty entries
/// are dropped.
pub fn parse_accept_language(header: &str) -> Vec<LanguageRange> {
    header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() {
                return None;
            }
            let quality = parts
                .next()
                .map(str::trim)
                .and_then(|p| p.strip_prefix("q="))
                .and_then(|q| q.trim().parse::<f32>().ok())
                .filter(|q| (0.0..=1.0).contains(q))
                .unwrap_or(1.0);
            Some(LanguageRange {
                tag: tag.to_string(),
                quality,
            })
        })
        .collect()
}

/// Serialize ranges back into a header value.
pub fn format_accept_language(ranges: &[LanguageRange]) -> String {
    ranges
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Ranges ordered by descending quality; ties keep header order.
pub fn preferred(ranges: &[LanguageRange]) -> Vec<&LanguageRange> {
    let mut sorted: Vec<&LanguageRange> = ranges.iter().filter(|r| r.quality > 0.0).collect();
    sorted.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    sorted
}
