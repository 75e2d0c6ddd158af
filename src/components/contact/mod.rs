//! Obfuscated contact link in the page footer.

mod address;
mod component;

pub use address::{ContactConfig, ContactLabel, PLACEHOLDER, mailto_href, reveal_address};
pub use component::ContactLink;
