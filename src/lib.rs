//! Glosscheck - terminology glossary auditor for gettext catalogs
//!
//! Glosscheck checks the translations in `.po` catalogs against a glossary of
//! canonical terms and produces ready-to-apply corrections for every
//! violation, either printed, written as JSON for a review bot, or applied
//! in place.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands and actions)
//! - `config`: Configuration file loading and parsing
//! - `core`: Audit engine (glossary, catalogs, classification, patches)
//! - `issues`: Issue type definitions and reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
