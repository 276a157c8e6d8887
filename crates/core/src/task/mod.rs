//! Task module
//!
//! This module contains task-related types and storage.

mod model;
mod repository;

pub use model::*;
pub use repository::TaskRepository;
