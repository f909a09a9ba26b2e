//! Profile page information extraction
//!
//! Both extractors are deterministic and stateless: they take page content
//! produced by a [`crate::browser::Page`] and never touch the network.

mod email;
mod website;

pub use email::EmailExtractor;
pub use website::WebsiteSelector;
