//! Domain layer containing business entities and the click pipeline.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Storage contract traits
//! - [`click_event`] - Click tracking event model
//! - [`click_queue`] - Bounded, drop-on-full event queue
//! - [`click_worker`] - Worker pool persisting click events
//!
//! # Click Processing Flow
//!
//! 1. HTTP handler resolves the short code and answers with a redirect
//! 2. A [`click_event::ClickEvent`] is offered to the [`click_queue::ClickQueue`]
//!    without blocking; a full queue drops it
//! 3. One of the [`click_worker::ClickWorkerPool`] workers takes the event
//! 4. The click is persisted via [`repositories::ClickRepository`]; failures are
//!    logged and skipped

pub mod click_event;
pub mod click_queue;
pub mod click_worker;
pub mod entities;
pub mod repositories;
