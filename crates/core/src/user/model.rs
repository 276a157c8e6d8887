//! User model definitions

use serde::{Deserialize, Serialize};

use crate::codec::{Record, TextFields};
use crate::Result;

/// An account that owns tasks and categories.
///
/// `password` holds whatever the caller stored; the server writes a salted
/// hash here, never the plain password.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    #[serde(rename = "ID")]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Copy of the user safe to hand back to a client
    pub fn without_password(&self) -> Self {
        Self {
            password: String::new(),
            ..self.clone()
        }
    }
}

impl Record for User {
    const KIND: &'static str = "user";
    const LABELS: &'static [&'static str] = &["id", "name", "email", "password"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn text_values(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.password.clone(),
        ]
    }

    fn from_text(fields: &TextFields<'_>) -> Result<Self> {
        Ok(Self {
            id: fields.int("id")?,
            name: fields.string("name")?,
            email: fields.string("email")?,
            password: fields.string("password")?,
        })
    }
}
