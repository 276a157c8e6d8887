//! Task model definitions

use serde::{Deserialize, Serialize};

use crate::codec::{Record, TextFields};
use crate::Result;

/// A task owned by a user, optionally filed under a category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Task {
    #[serde(rename = "ID")]
    pub id: i64,
    pub title: String,
    /// Free-form, never parsed as a date
    pub due_date: String,
    #[serde(rename = "CategoryID")]
    pub category_id: i64,
    pub is_done: bool,
    #[serde(rename = "UserID")]
    pub user_id: i64,
}

impl Task {
    /// Create a new, not yet persisted task with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = due_date.into();
        self
    }

    /// Set the category id
    pub fn with_category_id(mut self, category_id: i64) -> Self {
        self.category_id = category_id;
        self
    }

    /// Set the owning user id
    pub fn with_user_id(mut self, user_id: i64) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_done(mut self, is_done: bool) -> Self {
        self.is_done = is_done;
        self
    }
}

impl Record for Task {
    const KIND: &'static str = "task";
    const LABELS: &'static [&'static str] =
        &["id", "title", "dueDate", "categoryID", "isDone", "userID"];

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
            self.due_date.clone(),
            self.category_id.to_string(),
            self.is_done.to_string(),
            self.user_id.to_string(),
        ]
    }

    fn from_text(fields: &TextFields<'_>) -> Result<Self> {
        Ok(Self {
            id: fields.int("id")?,
            title: fields.string("title")?,
            due_date: fields.string("dueDate")?,
            category_id: fields.int("categoryID")?,
            is_done: fields.boolean("isDone")?,
            user_id: fields.int("userID")?,
        })
    }
}
