//! Delivery addresses

use std::fmt;

use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;

/// A saved or newly entered delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Address {
    /// Address id
    pub id: String,

    /// Label such as "Home" or "Work"
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// Street address
    pub line1: String,

    /// Apartment, suite, etc.
    #[serde(default)]
    pub line2: Option<String>,

    /// City
    pub city: String,

    /// State
    pub state: String,

    /// Zip code
    pub zip: String,

    /// Country
    pub country: String,
}

impl Address {
    /// Short form used on orders, "line1, city".
    pub fn summary(&self) -> String {
        format!("{}, {}", self.line1, self.city)
    }

    /// "city, state zip"
    pub fn locality(&self) -> String {
        format!("{}, {} {}", self.city, self.state, self.zip)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line1)?;

        if let Some(line2) = self.line2.as_deref().filter(|line| !line.is_empty()) {
            write!(f, ", {line2}")?;
        }

        write!(f, ", {}, {}", self.locality(), self.country)
    }
}

/// Address form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    /// Street address
    Line1,

    /// City
    City,

    /// State
    State,

    /// Zip code
    Zip,

    /// Country
    Country,
}

/// A field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressFieldError {
    /// Street address is blank
    #[error("Street address is required")]
    MissingLine1,

    /// City is blank
    #[error("City is required")]
    MissingCity,

    /// State is blank
    #[error("State is required")]
    MissingState,

    /// Zip code has fewer than five characters
    #[error("Zip code must be at least 5 characters")]
    ShortZip,

    /// Country is blank
    #[error("Country is required")]
    MissingCountry,
}

impl AddressFieldError {
    /// The field the error belongs to.
    pub fn field(&self) -> AddressField {
        match self {
            AddressFieldError::MissingLine1 => AddressField::Line1,
            AddressFieldError::MissingCity => AddressField::City,
            AddressFieldError::MissingState => AddressField::State,
            AddressFieldError::ShortZip => AddressField::Zip,
            AddressFieldError::MissingCountry => AddressField::Country,
        }
    }
}

/// Every field error found on a form.
pub type AddressFieldErrors = SmallVec<[AddressFieldError; 5]>;

/// The "add new address" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddressForm {
    /// Label, "Home" by default
    pub kind: Option<String>,

    /// Street address
    pub line1: String,

    /// Apartment, suite, etc.
    pub line2: Option<String>,

    /// City
    pub city: String,

    /// State
    pub state: String,

    /// Zip code
    pub zip: String,

    /// Country, "USA" by default
    pub country: String,
}

impl Default for NewAddressForm {
    fn default() -> Self {
        Self {
            kind: Some("Home".to_string()),
            line1: String::new(),
            line2: None,
            city: String::new(),
            state: String::new(),
            zip: String::new(),
            country: "USA".to_string(),
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl NewAddressForm {
    /// Collect every field error. An empty list means the form is valid.
    pub fn errors(&self) -> AddressFieldErrors {
        let mut errors = AddressFieldErrors::new();

        if is_blank(&self.line1) {
            errors.push(AddressFieldError::MissingLine1);
        }

        if is_blank(&self.city) {
            errors.push(AddressFieldError::MissingCity);
        }

        if is_blank(&self.state) {
            errors.push(AddressFieldError::MissingState);
        }

        if self.zip.trim().chars().count() < 5 {
            errors.push(AddressFieldError::ShortZip);
        }

        if is_blank(&self.country) {
            errors.push(AddressFieldError::MissingCountry);
        }

        errors
    }

    /// Whether the form would be accepted.
    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Turn a valid form into an address with the given id.
    ///
    /// # Errors
    ///
    /// Returns every field error if the form is invalid.
    pub fn validate(&self, id: impl Into<String>) -> Result<Address, AddressFieldErrors> {
        let errors = self.errors();

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Address {
            id: id.into(),
            kind: self
                .kind
                .as_deref()
                .map(str::trim)
                .filter(|kind| !kind.is_empty())
                .map(ToString::to_string),
            line1: self.line1.trim().to_string(),
            line2: self
                .line2
                .as_deref()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(ToString::to_string),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            zip: self.zip.trim().to_string(),
            country: self.country.trim().to_string(),
        })
    }
}
