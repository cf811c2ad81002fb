//! Language tables and user-facing strings.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported languages and their aliases
//! - `language`: Type-safe `Language` handle validated against the registry
//! - `strings`: Centralized user-facing strings
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::Language;
//!
//! let russian = Language::resolve("русский");
//! assert_eq!(russian.map(|l| l.code()), Some("ru"));
//! ```

mod language;
mod registry;
mod strings;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry, ShadowedAlias};
pub use strings::BotStrings;
