use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::core::pagination::PageRequest;
use crate::models::{AccountStatus, Customer, PartnerFilter};

/// Errors that can occur at the data-access boundary
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Customer persistence, always scoped to the owning matchmaker except for
/// public profile lookups.
///
/// Every listing method returns rows in a deterministic order: newest join
/// date first, ties broken by id.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Fetch a customer only if `matchmaker_id` owns it
    async fn find_owned(&self, matchmaker_id: Uuid, id: Uuid) -> Result<Option<Customer>, StoreError>;

    /// Fetch a customer regardless of owner (public profile links)
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, StoreError>;

    async fn count_partners(&self, filter: &PartnerFilter) -> Result<u64, StoreError>;

    async fn find_partners(
        &self,
        filter: &PartnerFilter,
        page: PageRequest,
    ) -> Result<Vec<Customer>, StoreError>;

    /// One page of a matchmaker's customers plus the total count
    async fn list(
        &self,
        matchmaker_id: Uuid,
        page: PageRequest,
    ) -> Result<(Vec<Customer>, u64), StoreError>;

    /// Case-insensitive substring search over first name, last name, email,
    /// phone and city
    async fn search(
        &self,
        matchmaker_id: Uuid,
        term: &str,
        page: PageRequest,
    ) -> Result<(Vec<Customer>, u64), StoreError>;

    /// Whether another customer already uses this email or phone
    async fn contact_taken(
        &self,
        email: &str,
        phone: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, StoreError>;

    async fn insert(&self, customer: Customer) -> Result<Customer, StoreError>;

    /// Replace a stored record; `NotFound` if the owner does not match
    async fn update(&self, customer: Customer) -> Result<Customer, StoreError>;

    /// Delete and return the record, `None` if not owned
    async fn delete(&self, matchmaker_id: Uuid, id: Uuid) -> Result<Option<Customer>, StoreError>;

    /// Set the account status of every listed customer owned by `matchmaker_id`
    async fn set_status(
        &self,
        matchmaker_id: Uuid,
        ids: &[Uuid],
        status: AccountStatus,
    ) -> Result<u64, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}
