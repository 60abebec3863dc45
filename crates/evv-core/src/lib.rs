//! # evv-core
//!
//! Core types, status machines, and error types for the EVV logger.
//!
//! This crate provides the foundational types shared across all EVV crates:
//! - Entity structs for schedules (visits) and their care tasks
//! - Status enums with the visit and task transition rules
//! - The service error taxonomy surfaced to callers
//! - Response envelopes returned by the presentation adapter
//! - Schedule list filters and pagination arithmetic
//! - Request context carrying cancellation and deadlines
//! - Structural validation helpers shared by request types

pub mod context;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod filter;
pub mod requests;
pub mod responses;
pub mod validation;
