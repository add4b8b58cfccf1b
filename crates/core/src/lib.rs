//! WhiteBox e-learning platform domain logic.
//!
//! This crate holds everything the platform client computes without
//! touching the network:
//!
//! - entity types shared with the backend API ([`course`], [`lesson`],
//!   [`survey`], [`notification`], [`certificate`], [`user`]),
//! - derived view state (module locks, progress percentages, section
//!   trees, status badges),
//! - form drafts and the explicit payload-shaping functions applied at
//!   submit time ([`forms`]),
//! - pure state for the optimistic notification feed.
//!
//! There are no I/O dependencies here; the `whitebox-client` crate
//! layers the HTTP transport on top.

pub mod certificate;
pub mod course;
pub mod forms;
pub mod lesson;
pub mod module;
pub mod notification;
pub mod progress;
pub mod survey;
pub mod types;
pub mod user;

pub use types::{EntityId, ObjectOrId, Timestamp};
