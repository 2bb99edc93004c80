//! Core types for the clinic billing service.
//!
//! This crate provides the domain types shared by consumers of the billing
//! service:
//!
//! - **Records**: [`BillingRecord`]
//! - **Classification**: [`Priority`]
//!
//! The record payload is owned by the billing service's API contract; beyond
//! the identifier and priority classification its fields are treated as opaque
//! and carried through unmodified.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod priority;
pub mod record;

pub use priority::Priority;
pub use record::BillingRecord;
