use std::cmp::Ordering;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::filters::contains_ignore_case;
use crate::core::pagination::PageRequest;
use crate::models::{AccountStatus, Customer, PartnerFilter};
use crate::services::store::{CustomerStore, StoreError};

/// In-process customer store.
///
/// Evaluates the same [`PartnerFilter`] the PostgreSQL store translates to
/// SQL, so it doubles as a reference implementation in tests.
#[derive(Default)]
pub struct MemoryStore {
    customers: RwLock<Vec<Customer>>,
}

fn newest_first(a: &Customer, b: &Customer) -> Ordering {
    b.join_date.cmp(&a.join_date).then_with(|| a.id.cmp(&b.id))
}

fn paginate(mut rows: Vec<Customer>, page: PageRequest) -> Vec<Customer> {
    rows.sort_by(newest_first);
    rows.into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect()
}

fn matches_search(c: &Customer, term: &str) -> bool {
    [&c.first_name, &c.last_name, &c.email, &c.phone, &c.city]
        .iter()
        .any(|field| contains_ignore_case(field, term))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customers(customers: Vec<Customer>) -> Self {
        Self {
            customers: RwLock::new(customers),
        }
    }

    pub async fn len(&self) -> usize {
        self.customers.read().await.len()
    }
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn find_owned(&self, matchmaker_id: Uuid, id: Uuid) -> Result<Option<Customer>, StoreError> {
        let customers = self.customers.read().await;
        Ok(customers
            .iter()
            .find(|c| c.id == id && c.matchmaker_id == matchmaker_id)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, StoreError> {
        let customers = self.customers.read().await;
        Ok(customers.iter().find(|c| c.id == id).cloned())
    }

    async fn count_partners(&self, filter: &PartnerFilter) -> Result<u64, StoreError> {
        let customers = self.customers.read().await;
        Ok(customers.iter().filter(|c| filter.matches(c)).count() as u64)
    }

    async fn find_partners(
        &self,
        filter: &PartnerFilter,
        page: PageRequest,
    ) -> Result<Vec<Customer>, StoreError> {
        let customers = self.customers.read().await;
        let rows = customers.iter().filter(|c| filter.matches(c)).cloned().collect();
        Ok(paginate(rows, page))
    }

    async fn list(
        &self,
        matchmaker_id: Uuid,
        page: PageRequest,
    ) -> Result<(Vec<Customer>, u64), StoreError> {
        let customers = self.customers.read().await;
        let rows: Vec<Customer> = customers
            .iter()
            .filter(|c| c.matchmaker_id == matchmaker_id)
            .cloned()
            .collect();
        let total = rows.len() as u64;
        Ok((paginate(rows, page), total))
    }

    async fn search(
        &self,
        matchmaker_id: Uuid,
        term: &str,
        page: PageRequest,
    ) -> Result<(Vec<Customer>, u64), StoreError> {
        let customers = self.customers.read().await;
        let rows: Vec<Customer> = customers
            .iter()
            .filter(|c| c.matchmaker_id == matchmaker_id && matches_search(c, term))
            .cloned()
            .collect();
        let total = rows.len() as u64;
        Ok((paginate(rows, page), total))
    }

    async fn contact_taken(
        &self,
        email: &str,
        phone: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, StoreError> {
        let customers = self.customers.read().await;
        Ok(customers
            .iter()
            .filter(|c| Some(c.id) != exclude_id)
            .any(|c| c.email == email || c.phone == phone))
    }

    async fn insert(&self, customer: Customer) -> Result<Customer, StoreError> {
        let mut customers = self.customers.write().await;
        if customers
            .iter()
            .any(|c| c.email == customer.email || c.phone == customer.phone)
        {
            return Err(StoreError::Conflict(
                "A customer with the same email or phone exists".to_string(),
            ));
        }
        customers.push(customer.clone());
        Ok(customer)
    }

    async fn update(&self, customer: Customer) -> Result<Customer, StoreError> {
        let mut customers = self.customers.write().await;
        let slot = customers
            .iter_mut()
            .find(|c| c.id == customer.id && c.matchmaker_id == customer.matchmaker_id)
            .ok_or_else(|| StoreError::NotFound(format!("Customer {} not found", customer.id)))?;
        *slot = customer.clone();
        Ok(customer)
    }

    async fn delete(&self, matchmaker_id: Uuid, id: Uuid) -> Result<Option<Customer>, StoreError> {
        let mut customers = self.customers.write().await;
        let position = customers
            .iter()
            .position(|c| c.id == id && c.matchmaker_id == matchmaker_id);
        Ok(position.map(|i| customers.remove(i)))
    }

    async fn set_status(
        &self,
        matchmaker_id: Uuid,
        ids: &[Uuid],
        status: AccountStatus,
    ) -> Result<u64, StoreError> {
        let mut customers = self.customers.write().await;
        let mut updated = 0;
        for c in customers
            .iter_mut()
            .filter(|c| c.matchmaker_id == matchmaker_id && ids.contains(&c.id))
        {
            c.account_status = status;
            updated += 1;
        }
        Ok(updated)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
