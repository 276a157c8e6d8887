//! Wire protocol
//!
//! One JSON `Request` per connection. The reply is the JSON-encoded
//! response on success or the bare error text on failure; there is no
//! envelope and no framing beyond the single read.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::{
    CreateCategoryRequest, CreateTaskRequest, CreateUserRequest, ListCategoriesRequest,
    ListTasksRequest, LoginRequest,
};

/// Commands the server dispatches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CreateTask,
    ListTasks,
    CreateCategory,
    ListCategories,
    CreateUser,
    Login,
    ListUsers,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Command::CreateTask,
        Command::ListTasks,
        Command::CreateCategory,
        Command::ListCategories,
        Command::CreateUser,
        Command::Login,
        Command::ListUsers,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateTask => "create-task",
            Self::ListTasks => "list-tasks",
            Self::CreateCategory => "create-category",
            Self::ListCategories => "list-categories",
            Self::CreateUser => "create-user",
            Self::Login => "login",
            Self::ListUsers => "list-users",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown command '{0}'")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.as_str() == value)
            .ok_or_else(|| UnknownCommand(value.to_string()))
    }
}

/// A client request. Only the sub-request matching `command` is read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Request {
    pub command: String,
    /// Acting user for create and list commands
    #[serde(rename = "UserID")]
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_task_request: Option<CreateTaskRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_tasks_request: Option<ListTasksRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_category_request: Option<CreateCategoryRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_categories_request: Option<ListCategoriesRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_user_request: Option<CreateUserRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_request: Option<LoginRequest>,
}

impl Request {
    pub fn new(command: Command) -> Self {
        Self {
            command: command.as_str().to_string(),
            ..Self::default()
        }
    }

    pub fn with_user_id(mut self, user_id: i64) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn decode(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    pub fn encode(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
