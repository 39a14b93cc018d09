pub mod badge;
pub mod checkbox;
pub mod input;

pub use badge::{Badge, StatusBadge};
pub use checkbox::Checkbox;
pub use input::Input;
