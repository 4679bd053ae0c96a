//! Form state for the add/edit user screen.
//!
//! # Design
//! The selected user and the two text fields live in one serializable value
//! instead of loose mutable fields, so the create-versus-update decision can
//! be tested without a screen or a network.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::types::{User, UserInput};

/// Whether submitting the form creates a user or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update(u64),
}

/// A validated form, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(UserInput),
    Update { id: u64, input: UserInput },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSession {
    #[serde(default)]
    pub selected: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to editing `user`, pre-filling both fields.
    pub fn select(&mut self, user: &User) {
        self.selected = Some(user.id);
        self.name = user.name.clone();
        self.email = user.email.clone();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn mode(&self) -> FormMode {
        match self.selected {
            Some(id) => FormMode::Update(id),
            None => FormMode::Create,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode() {
            FormMode::Create => "Add user",
            FormMode::Update(_) => "Update user",
        }
    }

    pub fn submission(&self) -> Result<Submission, ApiError> {
        let input = UserInput::new(self.name.as_str(), self.email.as_str());
        input.validate()?;
        Ok(match self.mode() {
            FormMode::Create => Submission::Create(input),
            FormMode::Update(id) => Submission::Update { id, input },
        })
    }

    /// Clear both fields and drop the selection.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
