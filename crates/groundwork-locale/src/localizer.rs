//! String localizers.

use std::fmt;
use std::sync::Arc;

use groundwork_core::config::localization::LocalizationConfig;
use groundwork_core::result::AppResult;

use crate::culture::Culture;
use crate::resource::ResourceSet;

/// The outcome of a lookup.
///
/// A miss is not an error: `resource_not_found` is set and `value` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedString {
    /// Key that was looked up.
    pub name: String,
    /// Resolved text, empty on a miss.
    pub value: String,
    /// Set when no culture in the chain defines `name`.
    pub resource_not_found: bool,
}

impl LocalizedString {
    /// A hit.
    pub fn found(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            resource_not_found: false,
        }
    }

    /// A miss for `name`.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            resource_not_found: true,
        }
    }
}

impl fmt::Display for LocalizedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Lookup of localized strings by name and culture.
pub trait StringLocalizer: Send + Sync + 'static {
    /// Look up `name` defined for exactly `culture`, without fallback.
    fn lookup(&self, name: &str, culture: &Culture) -> Option<String>;

    /// Culture that closes every fallback chain.
    fn default_culture(&self) -> &Culture;

    /// Look up `name` for `culture`, walking `fr-ca` → `fr` → default.
    fn get(&self, name: &str, culture: &Culture) -> LocalizedString {
        culture
            .fallback_chain(self.default_culture())
            .iter()
            .find_map(|c| self.lookup(name, c))
            .map(|value| LocalizedString::found(name, value))
            .unwrap_or_else(|| LocalizedString::not_found(name))
    }

    /// Every string available for `culture`. With `include_ancestors`,
    /// strings only defined for parent cultures are included too.
    fn all_strings(&self, culture: &Culture, include_ancestors: bool) -> Vec<LocalizedString>;

    /// Look up `name` and substitute `{0}`, `{1}`, ... with `args`.
    fn get_with(&self, name: &str, args: &[&dyn fmt::Display], culture: &Culture) -> LocalizedString {
        let mut found = self.get(name, culture);
        if !found.resource_not_found {
            found.value = format_positional(&found.value, args);
        }
        found
    }
}

/// Replace `{n}` placeholders with the matching argument.
///
/// Placeholders without an argument are left as they are.
pub fn format_positional(template: &str, args: &[&dyn fmt::Display]) -> String {
    args.iter()
        .enumerate()
        .fold(template.to_string(), |text, (i, arg)| {
            text.replace(&format!("{{{i}}}"), &arg.to_string())
        })
}

/// Localizer over a single [`ResourceSet`] with culture fallback.
#[derive(Debug, Clone)]
pub struct ResourceLocalizer {
    set: ResourceSet,
    default_culture: Culture,
}

impl ResourceLocalizer {
    /// Localizer over `set`, falling back to `default_culture`.
    pub fn new(set: ResourceSet, default_culture: Culture) -> Self {
        Self {
            set,
            default_culture,
        }
    }

    /// Underlying set.
    pub fn set(&self) -> &ResourceSet {
        &self.set
    }
}

impl StringLocalizer for ResourceLocalizer {
    fn lookup(&self, name: &str, culture: &Culture) -> Option<String> {
        self.set.get(culture, name).map(str::to_string)
    }

    fn default_culture(&self) -> &Culture {
        &self.default_culture
    }

    fn all_strings(&self, culture: &Culture, include_ancestors: bool) -> Vec<LocalizedString> {
        let chain = if include_ancestors {
            culture.fallback_chain(culture)
        } else {
            vec![culture.clone()]
        };

        let mut strings: Vec<LocalizedString> = Vec::new();
        for c in &chain {
            let Some(entries) = self.set.strings(c) else {
                continue;
            };
            let mut names: Vec<&String> = entries.keys().collect();
            names.sort();
            for name in names {
                if strings.iter().all(|s| &s.name != name) {
                    strings.push(LocalizedString::found(name.as_str(), entries[name].as_str()));
                }
            }
        }
        strings
    }
}

/// Two-tier localizer over the application's custom set and the shared
/// generic set.
///
/// Each culture of the fallback chain is tried in both tiers, custom first,
/// before moving to the next culture. A generic `fr` string therefore beats
/// a custom string that only exists in the default culture.
#[derive(Clone)]
pub struct MultipleStringLocalizer {
    custom: Arc<dyn StringLocalizer>,
    generic: Arc<dyn StringLocalizer>,
    default_culture: Culture,
}

impl MultipleStringLocalizer {
    /// Combine two tiers. The chain ends at the generic tier's default culture.
    pub fn new(custom: Arc<dyn StringLocalizer>, generic: Arc<dyn StringLocalizer>) -> Self {
        let default_culture = generic.default_culture().clone();
        Self {
            custom,
            generic,
            default_culture,
        }
    }

    /// Load both sets from the configured resources directory.
    pub fn from_config(config: &LocalizationConfig) -> AppResult<Self> {
        let default = Culture::new(&config.default_culture);
        let custom = ResourceSet::load(&config.resources_dir, &config.custom_set)?;
        let generic = ResourceSet::load(&config.resources_dir, &config.generic_set)?;
        Ok(Self::new(
            Arc::new(ResourceLocalizer::new(custom, default.clone())),
            Arc::new(ResourceLocalizer::new(generic, default)),
        ))
    }
}

impl fmt::Debug for MultipleStringLocalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultipleStringLocalizer").finish_non_exhaustive()
    }
}

impl StringLocalizer for MultipleStringLocalizer {
    fn lookup(&self, name: &str, culture: &Culture) -> Option<String> {
        self.custom
            .lookup(name, culture)
            .or_else(|| self.generic.lookup(name, culture))
    }

    fn default_culture(&self) -> &Culture {
        &self.default_culture
    }

    fn all_strings(&self, culture: &Culture, include_ancestors: bool) -> Vec<LocalizedString> {
        let mut strings = self.generic.all_strings(culture, include_ancestors);
        strings.extend(self.custom.all_strings(culture, include_ancestors));
        strings
    }
}
