//! # Routine Server Library
//!
//! Wires configuration, the database pool, the Shaku module and the REST
//! router into a running server.

pub mod app;
pub mod di;
pub mod startup;
