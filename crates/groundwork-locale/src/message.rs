//! User-facing messages for business codes.

use std::sync::Arc;

use crate::culture::Culture;
use crate::localizer::StringLocalizer;

/// Resolves message codes to localized text.
#[derive(Clone)]
pub struct AppMessageFactory {
    localizer: Arc<dyn StringLocalizer>,
}

impl AppMessageFactory {
    /// Factory over `localizer`.
    pub fn new(localizer: Arc<dyn StringLocalizer>) -> Self {
        Self { localizer }
    }

    /// The localized message for `code`, or `None` if no set defines it.
    pub fn message(&self, code: &str, culture: &Culture) -> Option<String> {
        let found = self.localizer.get(code, culture);
        (!found.resource_not_found).then_some(found.value)
    }

    /// Underlying localizer.
    pub fn localizer(&self) -> &Arc<dyn StringLocalizer> {
        &self.localizer
    }
}

impl std::fmt::Debug for AppMessageFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppMessageFactory").finish_non_exhaustive()
    }
}
