//! Utility functions for code generation, URL validation and error classification.
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_validator`] - Long URL validation
//! - [`db_error`] - SQLx error classification
//! - [`client_ip`] - Client address extraction for click events

pub mod client_ip;
pub mod code_generator;
pub mod db_error;
pub mod url_validator;
