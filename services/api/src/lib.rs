//! Interview API Library Crate
//!
//! This library contains the logic for the interview web service: the
//! application state, configuration, API handlers and routing. The binaries
//! in `bin/` are thin wrappers around it.

pub mod config;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
