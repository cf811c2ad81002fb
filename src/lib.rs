//! Telegram inline bot that translates "language + text" queries.
//!
//! A query such as `ru Hello` is split by [`query::QueryParser`] into a target
//! language, resolved through the alias tables in [`i18n`], and translated by a
//! [`translation::Translator`]. [`bot::Bot`] turns the outcome into inline
//! results, and [`server`] exposes a health endpoint for uptime monitors.

pub mod bot;
pub mod config;
pub mod i18n;
pub mod query;
pub mod server;
pub mod telegram;
pub mod translation;
