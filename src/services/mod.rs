//! Browser-side collaborators: analytics, local storage, the CAPTCHA widget,
//! the DNS resolver, and the email-delivery library.
//!
//! Each is reached through a small trait so page logic can be exercised with
//! the in-memory doubles in `fakes`.

pub mod analytics;
pub mod captcha;
pub mod clock;
pub mod dns;
pub mod emailjs;
pub mod storage;

#[cfg(test)]
pub mod fakes;
