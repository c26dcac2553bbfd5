//! Multi-user entry tracker: register, log in for a bearer token, then keep
//! private text entries.

pub mod app;
pub mod auth;
pub mod config;
pub mod entries;
pub mod error;
pub mod state;
pub mod store;
