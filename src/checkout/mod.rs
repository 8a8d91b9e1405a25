//! Checkout
//!
//! The checkout workflow tracks two independent requirements, a delivery address
//! and a payment method. Once both are met an order can be placed, which moves the
//! workflow to its terminal confirmed stage.

use jiff::{Zoned, civil::Date};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    cart::Cart,
    navigation::Intent,
    orders::{Order, OrderLine, OrderStatus},
    pricing::{PriceBreakdown, PricingPolicy},
};

pub mod address;
pub mod payment;

use address::{Address, AddressFieldErrors, NewAddressForm};
use payment::PaymentMethod;

/// Errors raised by the checkout workflow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Neither a saved address nor a valid new address is available.
    #[error("Please select or enter a valid delivery address.")]
    MissingAddress,

    /// No payment method is selected.
    #[error("Please select a payment method.")]
    MissingPayment,

    /// There is nothing to order.
    #[error("Your cart is empty. Please add items before proceeding to checkout.")]
    EmptyCart,

    /// The order has already been placed.
    #[error("The order has already been placed")]
    AlreadyConfirmed,

    /// No saved address has the id.
    #[error("Unknown address: {0}")]
    UnknownAddress(String),

    /// No payment method has the id.
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    /// The new-address form is not open.
    #[error("The new address form is not open")]
    AddressFormClosed,

    /// The new-address form has field errors.
    #[error("The new address is invalid ({} field errors)", .0.len())]
    InvalidAddress(AddressFieldErrors),

    /// The total does not fit in minor units.
    #[error("Order total cannot be represented")]
    TotalOverflow,
}

/// Where the workflow is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    /// No usable address yet
    SelectingAddress,

    /// An address is ready but no payment method is selected
    SelectingPayment,

    /// Both requirements are met
    ReadyToPlace,

    /// The order was placed
    Confirmed,
}

/// The result of placing an order.
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    order: Order,
    breakdown: PriceBreakdown,
    address: Address,
    payment_method: PaymentMethod,
}

impl Confirmation {
    /// The order that was placed.
    pub fn order(&self) -> &Order {
        &self.order
    }

    /// The priced cart at the time the order was placed.
    pub fn breakdown(&self) -> &PriceBreakdown {
        &self.breakdown
    }

    /// The address the order is delivered to.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The payment method charged.
    pub fn payment_method(&self) -> &PaymentMethod {
        &self.payment_method
    }

    /// Where the user can go from the confirmation: order history or the catalog.
    pub fn next_intents(&self) -> [Intent; 2] {
        [Intent::OrderHistory, Intent::Catalog]
    }
}

/// Checkout workflow
#[derive(Debug, Clone)]
pub struct Checkout {
    addresses: Vec<Address>,
    selected_address: Option<String>,
    address_form: Option<NewAddressForm>,
    payment_methods: Vec<PaymentMethod>,
    selected_payment: Option<String>,
    confirmation: Option<Confirmation>,
}

impl Checkout {
    /// Enter checkout with the user's saved addresses and the available payment
    /// methods.
    ///
    /// The first saved address and the first payment method start out selected.
    /// Without saved addresses the new-address form opens straight away.
    pub fn new(addresses: Vec<Address>, payment_methods: Vec<PaymentMethod>) -> Self {
        let selected_address = addresses.first().map(|address| address.id.clone());
        let selected_payment = payment_methods.first().map(|method| method.id.clone());
        let address_form = addresses.is_empty().then(NewAddressForm::default);

        Self {
            addresses,
            selected_address,
            address_form,
            payment_methods,
            selected_payment,
            confirmation: None,
        }
    }

    /// Current stage.
    pub fn stage(&self) -> CheckoutStage {
        if self.confirmation.is_some() {
            CheckoutStage::Confirmed
        } else if !self.address_ready() {
            CheckoutStage::SelectingAddress
        } else if !self.payment_ready() {
            CheckoutStage::SelectingPayment
        } else {
            CheckoutStage::ReadyToPlace
        }
    }

    /// Whether a saved address is selected or a valid new address is pending.
    pub fn address_ready(&self) -> bool {
        self.selected_address.is_some()
            || self.address_form.as_ref().is_some_and(NewAddressForm::is_valid)
    }

    /// Whether a payment method is selected.
    pub fn payment_ready(&self) -> bool {
        self.selected_payment.is_some()
    }

    /// Saved and newly created addresses, in the order they were added.
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    /// The selected address, if any.
    pub fn selected_address(&self) -> Option<&Address> {
        let id = self.selected_address.as_deref()?;

        self.addresses.iter().find(|address| address.id == id)
    }

    /// Payment methods on offer.
    pub fn payment_methods(&self) -> &[PaymentMethod] {
        &self.payment_methods
    }

    /// The selected payment method, if any.
    pub fn selected_payment_method(&self) -> Option<&PaymentMethod> {
        let id = self.selected_payment.as_deref()?;

        self.payment_methods.iter().find(|method| method.id == id)
    }

    /// The confirmation, once the order has been placed.
    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    fn ensure_open(&self) -> Result<(), CheckoutError> {
        if self.confirmation.is_some() {
            return Err(CheckoutError::AlreadyConfirmed);
        }

        Ok(())
    }

    /// Select an address by id. Closes the new-address form.
    ///
    /// # Errors
    ///
    /// Returns an error if no address has the id or the order was already placed.
    #[tracing::instrument(skip(self))]
    pub fn select_address(&mut self, id: &str) -> Result<(), CheckoutError> {
        self.ensure_open()?;

        if !self.addresses.iter().any(|address| address.id == id) {
            warn!("unknown address");

            return Err(CheckoutError::UnknownAddress(id.to_string()));
        }

        self.selected_address = Some(id.to_string());
        self.address_form = None;

        info!("address selected");

        Ok(())
    }

    /// Open a blank new-address form. The current address selection is cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if the order was already placed.
    pub fn open_new_address_form(&mut self) -> Result<&mut NewAddressForm, CheckoutError> {
        self.ensure_open()?;

        self.selected_address = None;

        info!("new address form opened");

        Ok(self.address_form.insert(NewAddressForm::default()))
    }

    /// Close the new-address form without saving. No address becomes selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the order was already placed.
    pub fn cancel_new_address_form(&mut self) -> Result<(), CheckoutError> {
        self.ensure_open()?;

        self.address_form = None;

        Ok(())
    }

    /// Whether the new-address form is open.
    pub fn is_creating_address(&self) -> bool {
        self.address_form.is_some()
    }

    /// The open new-address form.
    pub fn new_address_form(&self) -> Option<&NewAddressForm> {
        self.address_form.as_ref()
    }

    /// Edit the open new-address form.
    ///
    /// # Errors
    ///
    /// Returns an error if the form is closed or the order was already placed.
    pub fn new_address_form_mut(&mut self) -> Result<&mut NewAddressForm, CheckoutError> {
        self.ensure_open()?;

        self.address_form
            .as_mut()
            .ok_or(CheckoutError::AddressFormClosed)
    }

    /// Save the new-address form as an address and select it.
    ///
    /// # Errors
    ///
    /// Returns the field errors if the form is invalid, and leaves the form open.
    #[tracing::instrument(skip(self))]
    pub fn submit_new_address(&mut self) -> Result<&Address, CheckoutError> {
        self.ensure_open()?;

        let form = self
            .address_form
            .as_ref()
            .ok_or(CheckoutError::AddressFormClosed)?;

        let address = form
            .validate(format!("addr-{}", Uuid::new_v4()))
            .map_err(|errors| {
                warn!(errors = errors.len(), "new address rejected");

                CheckoutError::InvalidAddress(errors)
            })?;

        info!(address_id = %address.id, "new address saved");

        self.selected_address = Some(address.id.clone());
        self.address_form = None;
        self.addresses.push(address);

        self.addresses
            .last()
            .ok_or(CheckoutError::MissingAddress)
    }

    /// Select a payment method by id.
    ///
    /// # Errors
    ///
    /// Returns an error if no method has the id or the order was already placed.
    #[tracing::instrument(skip(self))]
    pub fn select_payment_method(&mut self, id: &str) -> Result<(), CheckoutError> {
        self.ensure_open()?;

        if !self.payment_methods.iter().any(|method| method.id == id) {
            warn!("unknown payment method");

            return Err(CheckoutError::UnknownPaymentMethod(id.to_string()));
        }

        self.selected_payment = Some(id.to_string());

        info!("payment method selected");

        Ok(())
    }

    /// Place the order, dated today.
    ///
    /// # Errors
    ///
    /// See [`Checkout::place_order_on`].
    pub fn place_order(
        &mut self,
        cart: &Cart,
        policy: &PricingPolicy,
    ) -> Result<&Confirmation, CheckoutError> {
        self.place_order_on(cart, policy, Zoned::now().date())
    }

    /// Place the order with the given date.
    ///
    /// A valid pending new-address form is saved first. The cart is not modified.
    ///
    /// # Errors
    ///
    /// Returns a guard error if the cart is empty, no usable address exists, or no
    /// payment method is selected. Nothing changes in that case.
    #[tracing::instrument(skip_all, fields(lines = cart.len()))]
    pub fn place_order_on(
        &mut self,
        cart: &Cart,
        policy: &PricingPolicy,
        date: Date,
    ) -> Result<&Confirmation, CheckoutError> {
        self.ensure_open()?;

        if cart.is_empty() {
            warn!("order blocked, cart is empty");

            return Err(CheckoutError::EmptyCart);
        }

        if !self.address_ready() {
            warn!("order blocked, no delivery address");

            return Err(CheckoutError::MissingAddress);
        }

        let payment_method = self
            .selected_payment_method()
            .cloned()
            .ok_or_else(|| {
                warn!("order blocked, no payment method");

                CheckoutError::MissingPayment
            })?;

        let breakdown = cart.breakdown(policy);
        let total = breakdown
            .total_price()
            .ok_or(CheckoutError::TotalOverflow)?;

        if self.selected_address.is_none() {
            self.submit_new_address()?;
        }

        let address = self
            .selected_address()
            .cloned()
            .ok_or(CheckoutError::MissingAddress)?;

        let order = Order {
            id: Uuid::new_v4().to_string(),
            date,
            total,
            status: OrderStatus::Confirmed,
            restaurant: restaurant_names(cart),
            items: cart
                .lines()
                .iter()
                .map(|line| OrderLine {
                    id: line.item_id().to_string(),
                    name: line.name().to_string(),
                    quantity: line.quantity(),
                    unit_price: *line.unit_price(),
                })
                .collect(),
            delivery_address: address.summary(),
        };

        info!(order_id = %order.id, total = %order.total, "order placed");

        Ok(&*self.confirmation.insert(Confirmation {
            order,
            breakdown,
            address,
            payment_method,
        }))
    }
}

/// Distinct restaurant names on the cart, in line order.
fn restaurant_names(cart: &Cart) -> String {
    let mut names: Vec<&str> = Vec::new();

    for name in cart.lines().iter().filter_map(|line| line.restaurant()) {
        if !names.contains(&name) {
            names.push(name);
        }
    }

    names.join(", ")
}
