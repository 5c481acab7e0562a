use serde::{Deserialize, Serialize};

use crate::core::pagination::PageInfo;
use crate::models::domain::Customer;

/// Response for the match query endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchesResponse {
    pub partners: Vec<Customer>,
    #[serde(flatten)]
    pub page: PageInfo,
}

/// One page of a matchmaker's customers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPageResponse {
    pub customers: Vec<Customer>,
    #[serde(flatten)]
    pub page: PageInfo,
}

/// Compatibility insights for a customer/partner pair
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    pub insights: String,
}

/// Outcome of notifying both parties of a match
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMatchResponse {
    pub success: bool,
    pub message: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
