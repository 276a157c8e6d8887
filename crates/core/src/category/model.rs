//! Category model definitions

use serde::{Deserialize, Serialize};

use crate::codec::{Record, TextFields};
use crate::Result;

/// A user-defined label that tasks can be grouped under
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Category {
    #[serde(rename = "ID")]
    pub id: i64,
    pub title: String,
    pub color: String,
    #[serde(rename = "UserID")]
    pub user_id: i64,
}

impl Category {
    pub fn new(title: impl Into<String>, color: impl Into<String>, user_id: i64) -> Self {
        Self {
            id: 0,
            title: title.into(),
            color: color.into(),
            user_id,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }
}

impl Record for Category {
    const KIND: &'static str = "category";
    const LABELS: &'static [&'static str] = &["id", "title", "color", "userID"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn text_values(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.color.clone(),
            self.user_id.to_string(),
        ]
    }

    fn from_text(fields: &TextFields<'_>) -> Result<Self> {
        Ok(Self {
            id: fields.int("id")?,
            title: fields.string("title")?,
            color: fields.string("color")?,
            user_id: fields.int("userID")?,
        })
    }
}
