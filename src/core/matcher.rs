use uuid::Uuid;

use crate::core::pagination::{PageInfo, PageLimits, PageRequest};
use crate::core::predicate::build_partner_filter;
use crate::errors::AppError;
use crate::models::Customer;
use crate::services::CustomerStore;

/// Result of one match query
#[derive(Debug)]
pub struct MatchResult {
    pub partners: Vec<Customer>,
    pub page: PageInfo,
}

/// Match query executor.
///
/// # Steps
/// 1. Load the seeker, scoped to the requesting matchmaker
/// 2. Derive the partner filter from the seeker's current record
/// 3. Run the count and the page fetch with that same filter
#[derive(Debug, Clone)]
pub struct Matcher {
    limits: PageLimits,
}

impl Matcher {
    pub fn new(limits: PageLimits) -> Self {
        Self { limits }
    }

    pub fn with_default_limits() -> Self {
        Self {
            limits: PageLimits::default(),
        }
    }

    pub fn limits(&self) -> &PageLimits {
        &self.limits
    }

    /// Find candidate partners for `seeker_id`.
    ///
    /// Returns `NotFound` without building a filter when the seeker does not
    /// exist or belongs to another matchmaker.
    pub async fn find_partners(
        &self,
        store: &dyn CustomerStore,
        matchmaker_id: Uuid,
        seeker_id: Uuid,
        page: PageRequest,
    ) -> Result<MatchResult, AppError> {
        let seeker = store
            .find_owned(matchmaker_id, seeker_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Couldn't find the customer".to_string()))?;

        let filter = build_partner_filter(&seeker);
        tracing::debug!("Partner filter for {}: {:?}", seeker_id, filter);

        let (partners, total) = tokio::try_join!(
            store.find_partners(&filter, page),
            store.count_partners(&filter)
        )?;

        tracing::info!(
            "Found {} partners for customer {} (page {}, {} returned)",
            total,
            seeker_id,
            page.page(),
            partners.len()
        );

        Ok(MatchResult {
            partners,
            page: PageInfo::new(total, page),
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_limits()
    }
}
