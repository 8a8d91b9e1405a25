//! Navigation intents
//!
//! The core never routes. It hands these intents to whatever UI layer sits on top.

use std::fmt;

/// A request to move to another view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Restaurant listing
    Catalog,

    /// A restaurant's menu
    Restaurant(String),

    /// The cart
    Cart,

    /// Checkout
    Checkout,

    /// Profile and order history
    OrderHistory,
}

impl Intent {
    /// Conventional path for the intent.
    pub fn path(&self) -> String {
        match self {
            Intent::Catalog => "/".to_string(),
            Intent::Restaurant(id) => format!("/restaurant/{id}"),
            Intent::Cart => "/cart".to_string(),
            Intent::Checkout => "/checkout".to_string(),
            Intent::OrderHistory => "/profile-orders".to_string(),
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
