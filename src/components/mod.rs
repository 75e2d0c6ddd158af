//! Page components.

pub mod booking;
pub mod contact;
pub mod particles;
pub mod theme;

mod listener;
