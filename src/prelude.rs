//! Larder prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine},
    catalog::{
        ALL_CATEGORIES, CatalogError, CatalogFilter, CatalogStore, MenuItem, Restaurant,
        RestaurantSummary, store::StaticCatalog,
    },
    checkout::{
        Checkout, CheckoutError, CheckoutStage, Confirmation,
        address::{Address, AddressFieldError, NewAddressForm},
        payment::{PaymentKind, PaymentMethod},
    },
    fixtures::{Fixture, FixtureError},
    loading::{DeferredLoad, LoadError},
    navigation::Intent,
    orders::{
        ActiveOrder, BadgeVariant, Order, OrderHistoryStore, OrderLine, OrderStatus,
        store::StaticOrderHistory,
        tracking::{OrderTracker, StepState},
    },
    prices::{Amount, Price},
    pricing::{PriceBreakdown, PricingPolicy},
    profile::{ProfileEditor, ProfileError, UserProfile},
    receipt::{CartReceipt, ReceiptError},
    storefront::Storefront,
    tags::string::StringTagSet,
    views::{
        listing::ListingView,
        menu::{DishDialog, MenuState, MenuView},
    },
};
