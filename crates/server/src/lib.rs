//! TCP front end for the flat-file todo service
//!
//! Exposes the services, the wire protocol and the listener so the client
//! binary and tests can reuse them.

pub mod auth;
pub mod config;
pub mod protocol;
pub mod server;
pub mod services;
pub mod state;
