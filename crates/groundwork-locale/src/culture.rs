//! Culture names, fallback chains and `Accept-Language` negotiation.

use std::fmt;

use groundwork_core::types::language::{parse_accept_language, preferred};

/// A normalized culture name such as `en` or `fr-ca`.
///
/// Names are compared case-insensitively, so they are stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Culture(String);

impl Culture {
    /// Normalize a culture name. `_` separators are accepted as `-`.
    pub fn new(name: &str) -> Self {
        Self(name.trim().replace('_', "-").to_ascii_lowercase())
    }

    /// The normalized name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The culture one level up, e.g. `fr` for `fr-ca`.
    pub fn parent(&self) -> Option<Culture> {
        self.0
            .rsplit_once('-')
            .map(|(parent, _)| Culture(parent.to_string()))
    }

    /// This culture, its ancestors, then `default`, without duplicates.
    pub fn fallback_chain(&self, default: &Culture) -> Vec<Culture> {
        let mut chain = vec![self.clone()];
        let mut current = self.parent();
        while let Some(culture) = current {
            current = culture.parent();
            chain.push(culture);
        }
        if !chain.contains(default) {
            chain.push(default.clone());
        }
        chain
    }

    /// Pick the best supported culture for an `Accept-Language` header.
    ///
    /// Ranges are tried by descending quality. A range matches a supported
    /// culture exactly or through its parent (`fr-CA` → `fr`). Wildcards and
    /// unknown languages are skipped; with no match the default is returned.
    pub fn negotiate(accept_language: Option<&str>, supported: &[Culture], default: &Culture) -> Culture {
        let Some(header) = accept_language else {
            return default.clone();
        };
        let ranges = parse_accept_language(header);

        for range in preferred(&ranges) {
            if range.tag == "*" {
                continue;
            }
            let requested = Culture::new(&range.tag);
            let found = requested
                .fallback_chain(&requested)
                .into_iter()
                .find(|candidate| supported.contains(candidate));
            if let Some(culture) = found {
                return culture;
            }
        }
        default.clone()
    }
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Culture {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cultures(names: &[&str]) -> Vec<Culture> {
        names.iter().map(|n| Culture::new(n)).collect()
    }

    #[test]
    fn test_normalizes_name() {
        assert_eq!(Culture::new(" fr_CA ").as_str(), "fr-ca");
    }

    #[test]
    fn test_fallback_chain() {
        let chain = Culture::new("zh-Hant-TW").fallback_chain(&Culture::new("en"));
        let names: Vec<&str> = chain.iter().map(Culture::as_str).collect();
        assert_eq!(names, vec!["zh-hant-tw", "zh-hant", "zh", "en"]);
    }

    #[test]
    fn test_fallback_chain_does_not_repeat_default() {
        let chain = Culture::new("en-GB").fallback_chain(&Culture::new("en"));
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_negotiate_picks_highest_quality_supported() {
        let supported = cultures(&["en", "fr", "de"]);
        let culture = Culture::negotiate(
            Some("it, de;q=0.5, fr;q=0.9"),
            &supported,
            &Culture::new("en"),
        );
        assert_eq!(culture.as_str(), "fr");
    }

    #[test]
    fn test_negotiate_falls_back_to_parent() {
        let supported = cultures(&["en", "fr"]);
        let culture = Culture::negotiate(Some("fr-CA"), &supported, &Culture::new("en"));
        assert_eq!(culture.as_str(), "fr");
    }

    #[test]
    fn test_negotiate_defaults() {
        let supported = cultures(&["en", "fr"]);
        let default = Culture::new("en");
        assert_eq!(Culture::negotiate(None, &supported, &default), default);
        assert_eq!(Culture::negotiate(Some("*, ja"), &supported, &default), default);
        assert_eq!(Culture::negotiate(Some("fr;q=0"), &supported, &default), default);
    }
}
