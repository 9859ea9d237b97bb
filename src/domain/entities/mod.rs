//! Core domain entities.
//!
//! - [`Link`] - A shortened URL mapping
//! - [`Click`] - A recorded visit to a short link
//!
//! Creation inputs live in separate structs ([`NewLink`], [`NewClick`]) since ids
//! are assigned by storage.

pub mod click;
pub mod link;

pub use click::{Click, NewClick};
pub use link::{Link, NewLink};
