//! # steward-core
//!
//! Core types, compliance rules, and error taxonomy for Site Steward.
//!
//! This crate provides the foundational types shared across all Steward crates:
//! - Entity structs for assets, move records, projects, subcontractors,
//!   compliance documents, users, and audit entries
//! - The pure document status and aggregation rules (`compliance`)
//! - An injectable `Clock` so "today" is never read inside a rule
//! - ID prefix constants
//! - The stable error taxonomy (`ErrorKind`) callers map to transport codes
//! - Response shapes returned to the API / CLI layer
//! - Audit detail sub-types

pub mod audit_detail;
pub mod clock;
pub mod compliance;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
