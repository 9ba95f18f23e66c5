//! [`Contact`] definitions.

use std::fmt;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{Display, Error, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{property, user};

/// Inbound message from a prospective client, tracked through a status
/// workflow.
#[derive(Clone, Debug)]
pub struct Contact {
    /// ID of this [`Contact`].
    pub id: Id,

    /// First name of the sender.
    pub first_name: String,

    /// Last name of the sender.
    pub last_name: String,

    /// Email address of the sender.
    pub email: String,

    /// Phone number of the sender.
    pub phone: Option<String>,

    /// Subject of the message.
    pub subject: Option<String>,

    /// Body of the message.
    pub message: String,

    /// [`Property`] the message is about, if any.
    ///
    /// [`Property`]: crate::domain::Property
    pub property_id: Option<property::Id>,

    /// [`Status`] of this [`Contact`].
    pub status: Status,

    /// Free-text notes left by the back-office.
    pub notes: Option<String>,

    /// [`DateTime`] when this [`Contact`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Contact`] was last updated.
    pub updated_at: UpdateDateTime,
}

/// ID of a [`Contact`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

define_kind! {
    #[doc = "Workflow status of a [`Contact`]."]
    enum Status {
        #[doc = "Freshly received, nobody looked at it yet."]
        New = 1,

        #[doc = "Being handled by the back-office."]
        InProgress = 2,

        #[doc = "Handled successfully."]
        Completed = 3,

        #[doc = "Dismissed without follow-up."]
        Cancelled = 4,
    }
}

/// Raw submission of the public contact form.
///
/// Nothing is trusted here: [`Form::validate()`] collects every violation
/// before anything is persisted.
#[derive(Clone, Debug, Default)]
pub struct Form {
    /// First name of the sender.
    pub first_name: Option<String>,

    /// Last name of the sender.
    pub last_name: Option<String>,

    /// Email address of the sender.
    pub email: Option<String>,

    /// Phone number of the sender.
    pub phone: Option<String>,

    /// Subject of the message.
    pub subject: Option<String>,

    /// Body of the message.
    pub message: Option<String>,

    /// [`Property`] the message is about, if any.
    ///
    /// [`Property`]: crate::domain::Property
    pub property_id: Option<property::Id>,
}

impl Form {
    /// Minimum length of an acceptable message body.
    const MIN_MESSAGE_LEN: usize = 10;

    /// Validates this [`Form`], collecting every violation instead of
    /// stopping at the first one.
    ///
    /// # Errors
    ///
    /// Returns all the found [`Violations`] at once.
    pub fn validate(&self) -> Result<(), Violations> {
        let mut violations = Vec::new();

        if self.first_name.as_deref().map_or(true, str::is_empty) {
            violations.push("Le prénom est requis");
        }
        if self.last_name.as_deref().map_or(true, str::is_empty) {
            violations.push("Le nom est requis");
        }
        match self.email.as_deref() {
            None | Some("") => violations.push("L'email est requis"),
            Some(email) if !user::Email::check(email) => {
                violations.push("L'email n'est pas valide");
            }
            Some(_) => {}
        }
        match self.message.as_deref() {
            None | Some("") => violations.push("Le message est requis"),
            Some(m) if m.chars().count() < Self::MIN_MESSAGE_LEN => {
                violations
                    .push("Le message doit contenir au moins 10 caractères");
            }
            Some(_) => {}
        }
        if let Some(phone) = self.phone.as_deref() {
            if !phone.is_empty() && !user::Phone::check(phone) {
                violations.push("Le numéro de téléphone n'est pas valide");
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(Violations(violations))
        }
    }
}

/// Violations found in a [`Form`].
///
/// Displayed as a single comma-separated string, the way the public API
/// reports them.
#[derive(Clone, Debug, Error)]
pub struct Violations(#[error(not(source))] Vec<&'static str>);

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

/// [`DateTime`] when a [`Contact`] was created.
pub type CreationDateTime = DateTimeOf<(Contact, unit::Creation)>;

/// [`DateTime`] when a [`Contact`] was last updated.
pub type UpdateDateTime = DateTimeOf<(Contact, unit::Update)>;

#[cfg(test)]
mod spec {
    use super::Form;

    fn filled() -> Form {
        Form {
            first_name: Some("Jean".into()),
            last_name: Some("Dupont".into()),
            email: Some("jean@example.cm".into()),
            phone: None,
            subject: Some("Visite".into()),
            message: Some("Je souhaite visiter ce bien.".into()),
            property_id: None,
        }
    }

    #[test]
    fn accepts_a_complete_form() {
        assert!(filled().validate().is_ok());
    }

    #[test]
    fn message_must_be_at_least_ten_characters() {
        let mut form = filled();
        form.message = Some("123456789".into());
        assert!(form.validate().is_err());

        form.message = Some("1234567890".into());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn collects_every_violation_comma_separated() {
        let form = Form {
            first_name: Some("A".into()),
            last_name: Some("B".into()),
            email: Some("bad-email".into()),
            message: Some("short".into()),
            ..Form::default()
        };

        let violations = form.validate().unwrap_err().to_string();
        assert_eq!(
            violations,
            "L'email n'est pas valide, \
             Le message doit contenir au moins 10 caractères",
        );
    }

    #[test]
    fn empty_form_reports_required_fields() {
        let violations = Form::default().validate().unwrap_err().to_string();
        assert_eq!(
            violations,
            "Le prénom est requis, Le nom est requis, L'email est requis, \
             Le message est requis",
        );
    }

    #[test]
    fn phone_is_optional_but_shape_checked() {
        let mut form = filled();
        form.phone = Some(String::new());
        assert!(form.validate().is_ok());

        form.phone = Some("abc".into());
        assert!(form.validate().is_err());

        form.phone = Some("+237 699 00 11 22".into());
        assert!(form.validate().is_ok());
    }
}
