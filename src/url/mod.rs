//! URL helpers for Partner-Scout
//!
//! This module provides domain extraction for directory self-link exclusion
//! and display-name derivation from profile URL slugs.

mod domain;
mod slug;

pub use domain::{extract_domain, site_domain};
pub use slug::name_from_slug;
