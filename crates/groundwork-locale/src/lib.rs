//! # groundwork-locale
//!
//! Localized strings for Groundwork. Resource sets are flat JSON maps
//! stored per culture; a [`MultipleStringLocalizer`] walks the culture
//! fallback chain and, per culture, consults the application's custom set
//! before the shared generic set, and
//! [`AppMessageFactory`] turns message codes into user-facing text.

#![warn(missing_docs)]

pub mod culture;
pub mod localizer;
pub mod message;
pub mod resource;

pub use culture::Culture;
pub use localizer::{LocalizedString, MultipleStringLocalizer, ResourceLocalizer, StringLocalizer};
pub use message::AppMessageFactory;
pub use resource::ResourceSet;
