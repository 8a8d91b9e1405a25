//! Tags

pub mod string;
