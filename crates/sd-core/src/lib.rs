//! # sd-core
//!
//! Core types and error types for sprintdesk.
//!
//! This crate provides the foundational types shared across all sprintdesk crates:
//! - Entity structs mirroring the backend's JSON representations
//! - Closed enums (roles, statuses, priorities, report types) with their wire spellings
//! - Drafts and partial-update patches for every writable entity
//! - The list envelope that tolerates both paginated and bare-array responses
//! - The [`Resource`] trait tying an entity to its REST collection
//! - Cross-cutting error types

pub mod drafts;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod estimate;
pub mod resource;
pub mod responses;

pub use errors::CoreError;
pub use resource::{EntityId, Resource, ResourceKind};
