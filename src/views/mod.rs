//! Views
//!
//! UI-independent state for the restaurant listing and the menu page.

pub mod listing;
pub mod menu;
