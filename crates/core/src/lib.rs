//! Core library for the flat-file todo service
//!
//! This crate contains the storage side of the service:
//! - Line store over plain text files
//! - Entity codec (text and JSON)
//! - Generic repository plus task, category and user models

pub mod codec;
pub mod error;
pub mod repository;
pub mod store;

pub mod category;
pub mod task;
pub mod user;

pub use codec::Format;
pub use error::Error;
pub use repository::{FileRepository, IdStrategy};
pub type Result<T> = std::result::Result<T, Error>;
