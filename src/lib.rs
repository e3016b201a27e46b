//! To-do service library.
//!
//! Layers, from the inside out:
//!
//! - [`domain`]: the `TodoItem` aggregate and its identity
//! - [`application`]: validation, the create pipeline and its response envelope
//! - [`infrastructure`]: repository port and backends, configuration
//! - [`api`]: HTTP routes and handlers

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
