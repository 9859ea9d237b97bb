//! Repository trait definitions for the domain layer.
//!
//! These traits are the storage collaborator contract consumed by the link
//! service and the click workers. Implementations live in
//! `crate::infrastructure::persistence`; `mockall` mocks are generated for unit
//! tests.
//!
//! - [`LinkRepository`] - Short link creation and lookup
//! - [`ClickRepository`] - Click recording and counting

pub mod click_repository;
pub mod link_repository;

pub use click_repository::ClickRepository;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
