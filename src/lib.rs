//! Matchmaker Hub - customer registry and partner matching for matchmakers
//!
//! Matchmakers manage customer profiles; for any customer the service derives
//! a rule-based partner filter and runs it, paginated, against the
//! matchmaker's own customers.

pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{build_partner_filter, Matcher, PageInfo, PageRequest};
pub use crate::errors::AppError;
pub use crate::models::{Customer, CustomerInput, MatchesResponse, PartnerFilter};
