//! orgenda - Query and edit org-style outline files
//!
//! Tasks, agenda views and template captures over plain-text org files,
//! from the command line or through a line-delimited JSON tool server.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod server;

pub use error::OrgendaError;
