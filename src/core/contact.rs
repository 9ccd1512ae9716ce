//! Contact form state machine.
//!
//! The form moves `Idle -> Submitting -> Success | Error`. Success schedules
//! a delayed reset that clears the fields; error keeps them so the visitor
//! can resubmit. The HTTP round-trip itself lives in the web layer.

use super::constants::{CONTACT_ERROR_MESSAGE, CONTACT_SUCCESS_MESSAGE};
use serde::Serialize;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Company,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Company, Field::Message];

    /// The `name` attribute of the matching input.
    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Company => "company",
            Field::Message => "message",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn is_required(self) -> bool {
        matches!(self, Field::Name | Field::Email)
    }
}

/// Request body for `POST /api/contact`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Company => &self.company,
            Field::Message => &self.message,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Company => &mut self.company,
            Field::Message => &mut self.message,
        }
    }

    pub fn to_json(&self) -> Result<String, ContactError> {
        serde_json::to_string(self).map_err(|e| ContactError::Encode(e.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitStatus {
    Idle,
    Submitting,
    Success,
    Error,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("a submission is already in flight")]
    AlreadySubmitting,
    #[error("the form has been unmounted")]
    Detached,
    #[error("required field `{0}` is empty")]
    MissingField(&'static str),
    #[error("could not encode request body: {0}")]
    Encode(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Status(u16),
}

/// Ticket for one submission; the delayed reset only applies to the
/// submission it was issued for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitTicket(u64);

#[derive(Debug)]
pub struct ContactForm {
    fields: ContactFields,
    status: SubmitStatus,
    status_message: Option<&'static str>,
    generation: u64,
    detached: bool,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            fields: ContactFields::default(),
            status: SubmitStatus::Idle,
            status_message: None,
            generation: 0,
            detached: false,
        }
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.fields.slot(field) = value.into();
    }

    /// Overwrite every field `read` has a value for. Picks up values the
    /// browser restored or pre-filled without firing `input` events.
    pub fn sync_fields(&mut self, mut read: impl FnMut(Field) -> Option<String>) {
        for field in Field::ALL {
            if let Some(value) = read(field) {
                *self.fields.slot(field) = value;
            }
        }
    }

    /// Cut the form loose from its UI. Outstanding tickets go stale, so a
    /// request still in flight neither records its outcome nor schedules a
    /// reset.
    pub fn detach(&mut self) {
        self.detached = true;
        self.generation += 1;
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn status_message(&self) -> Option<&'static str> {
        self.status_message
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    /// Enter `Submitting` and return the body to send.
    pub fn begin_submit(&mut self) -> Result<(SubmitTicket, String), ContactError> {
        if self.detached {
            return Err(ContactError::Detached);
        }
        if self.is_submitting() {
            return Err(ContactError::AlreadySubmitting);
        }
        if let Some(missing) = Field::ALL
            .into_iter()
            .find(|f| f.is_required() && self.fields.get(*f).trim().is_empty())
        {
            return Err(ContactError::MissingField(missing.name()));
        }
        let body = self.fields.to_json()?;
        self.generation += 1;
        self.status = SubmitStatus::Submitting;
        self.status_message = None;
        Ok((SubmitTicket(self.generation), body))
    }

    /// Record the outcome of the request started with `ticket`.
    ///
    /// Returns `true` when the caller should schedule [`Self::reset_after_success`].
    pub fn finish(&mut self, ticket: SubmitTicket, outcome: Result<(), ContactError>) -> bool {
        if ticket.0 != self.generation || !self.is_submitting() {
            return false;
        }
        match outcome {
            Ok(()) => {
                self.status = SubmitStatus::Success;
                self.status_message = Some(CONTACT_SUCCESS_MESSAGE);
                true
            }
            Err(e) => {
                log::error!("[contact] error sending message: {}", e);
                self.status = SubmitStatus::Error;
                self.status_message = Some(CONTACT_ERROR_MESSAGE);
                false
            }
        }
    }

    /// Delayed post-success reset. Ignored if another submission started
    /// since `ticket` was issued.
    pub fn reset_after_success(&mut self, ticket: SubmitTicket) -> bool {
        if ticket.0 != self.generation || self.status != SubmitStatus::Success {
            return false;
        }
        self.fields = ContactFields::default();
        self.status = SubmitStatus::Idle;
        self.status_message = None;
        true
    }
}

/// Map an HTTP status to an outcome; only 2xx means delivered.
#[inline]
pub fn outcome_for_status(status: u16) -> Result<(), ContactError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ContactError::Status(status))
    }
}
