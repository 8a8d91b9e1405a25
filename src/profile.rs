//! User profile

use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{info, warn};

/// Contact details shown on the profile page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    /// Full name
    pub name: String,

    /// Email address
    pub email: String,

    /// Phone number
    #[serde(default)]
    pub phone: Option<String>,
}

/// A profile field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// Name is shorter than two characters
    #[error("Name must be at least 2 characters.")]
    NameTooShort,

    /// Email is not an address
    #[error("Invalid email address.")]
    InvalidEmail,
}

/// Every field error found on a profile.
pub type ProfileErrors = SmallVec<[ProfileError; 2]>;

/// Loose address check: one `@`, a non-empty local part and a dotted domain.
fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, _)| !host.is_empty())
        && !domain.ends_with('.')
}

impl UserProfile {
    /// Collect every field error. An empty list means the profile is valid.
    pub fn errors(&self) -> ProfileErrors {
        let mut errors = ProfileErrors::new();

        if self.name.trim().chars().count() < 2 {
            errors.push(ProfileError::NameTooShort);
        }

        if !is_email(self.email.trim()) {
            errors.push(ProfileError::InvalidEmail);
        }

        errors
    }

    /// The profile with surrounding whitespace removed and a blank phone dropped.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self
                .phone
                .as_deref()
                .map(str::trim)
                .filter(|phone| !phone.is_empty())
                .map(ToString::to_string),
        }
    }
}

/// The profile page's view and edit modes.
#[derive(Debug, Clone)]
pub struct ProfileEditor {
    profile: UserProfile,
    draft: Option<UserProfile>,
}

impl ProfileEditor {
    /// Show a profile, not in edit mode.
    pub fn new(profile: UserProfile) -> Self {
        Self {
            profile,
            draft: None,
        }
    }

    /// The saved profile
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Whether the form is in edit mode.
    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Enter edit mode with a draft of the saved profile, or leave it and discard
    /// the draft.
    pub fn toggle_edit(&mut self) {
        self.draft = match self.draft {
            Some(_) => None,
            None => Some(self.profile.clone()),
        };
    }

    /// The draft being edited.
    pub fn draft_mut(&mut self) -> Option<&mut UserProfile> {
        self.draft.as_mut()
    }

    /// Save the draft.
    ///
    /// A valid draft replaces the profile and leaves edit mode. An invalid one
    /// stays in place and its field errors are returned. Outside edit mode this
    /// does nothing.
    ///
    /// # Errors
    ///
    /// Returns every field error of an invalid draft.
    pub fn submit(&mut self) -> Result<&UserProfile, ProfileErrors> {
        let Some(draft) = &self.draft else {
            return Ok(&self.profile);
        };

        let errors = draft.errors();

        if !errors.is_empty() {
            warn!(errors = errors.len(), "profile update rejected");

            return Err(errors);
        }

        self.profile = draft.normalized();
        self.draft = None;

        info!("profile updated");

        Ok(&self.profile)
    }
}
