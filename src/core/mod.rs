// Core algorithm exports
pub mod filters;
pub mod introductions;
pub mod matcher;
pub mod pagination;
pub mod predicate;
pub mod validation;

pub use filters::{contains_ignore_case, eq_ignore_case};
pub use introductions::{generate_insights, load_pair, send_match, ProfileLinks};
pub use matcher::{MatchResult, Matcher};
pub use pagination::{PageError, PageInfo, PageLimits, PageRequest};
pub use predicate::{build_partner_filter, cultural_constraint, shift_years, CulturalConstraint};
pub use validation::check_importance;
