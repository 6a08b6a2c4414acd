//! Notemark — save-to-Notion bookmark clipper core.
//!
//! This library crate exposes all modules for use by the binaries and
//! integration tests.

pub mod app;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod storage;
pub mod types;
