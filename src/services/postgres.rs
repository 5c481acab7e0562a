use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Encode, PgPool, Postgres, QueryBuilder, Type};
use std::time::Duration;
use uuid::Uuid;

use crate::config::DatabaseSettings;
use crate::core::pagination::PageRequest;
use crate::models::{AccountStatus, Bounds, Customer, PartnerFilter};
use crate::services::store::{CustomerStore, StoreError};

const CUSTOMER_COLUMNS: &str = "id, matchmaker_id, first_name, last_name, gender, date_of_birth, \
    country, city, height, email, phone, college, degree, income, employment_type, company, \
    designation, marital_status, languages, hobbies, siblings, caste, religion, want_kids, \
    open_to_relocate, open_to_pets, account_status, avatar, join_date, bio, family_size, \
    importance_of_caste, importance_of_religion";

const ORDER_NEWEST_FIRST: &str = " ORDER BY join_date DESC, id ASC";

/// Append `AND column >= min AND column <= max` for whichever bounds are set
fn push_bounds<T>(qb: &mut QueryBuilder<'static, Postgres>, column: &str, bounds: &Bounds<T>)
where
    T: 'static + Encode<'static, Postgres> + Type<Postgres> + Send + Copy,
{
    if let Some(min) = bounds.min {
        qb.push(format!(" AND {} >= ", column)).push_bind(min);
    }
    if let Some(max) = bounds.max {
        qb.push(format!(" AND {} <= ", column)).push_bind(max);
    }
}

/// Translate a [`PartnerFilter`] into a SQL `WHERE` clause
fn push_partner_filter(qb: &mut QueryBuilder<'static, Postgres>, filter: &PartnerFilter) {
    qb.push(" WHERE matchmaker_id = ").push_bind(filter.matchmaker_id);
    qb.push(" AND gender = ").push_bind(filter.gender);

    qb.push(" AND marital_status IN (");
    let mut statuses = qb.separated(", ");
    for status in &filter.marital_statuses {
        statuses.push_bind(*status);
    }
    statuses.push_unseparated(")");

    push_bounds(qb, "height", &filter.height_cm);
    push_bounds(qb, "date_of_birth", &filter.date_of_birth);
    push_bounds(qb, "income", &filter.income);

    qb.push(" AND LOWER(country) = LOWER(")
        .push_bind(filter.country.clone())
        .push(")");

    if let Some(religion) = filter.religion {
        qb.push(" AND religion = ").push_bind(religion);
    }

    if let Some(caste) = &filter.caste {
        qb.push(" AND LOWER(caste) = LOWER(")
            .push_bind(caste.clone())
            .push(")");
    }
}

fn push_search(qb: &mut QueryBuilder<'static, Postgres>, matchmaker_id: Uuid, term: &str) {
    let pattern = format!("%{}%", escape_like(term));
    qb.push(" WHERE matchmaker_id = ").push_bind(matchmaker_id);
    qb.push(" AND (");
    let mut any = qb.separated(" OR ");
    for column in ["first_name", "last_name", "email", "phone", "city"] {
        any.push(format!("{} ILIKE ", column))
            .push_bind_unseparated(pattern.clone());
    }
    any.push_unseparated(")");
}

/// Escape LIKE wildcards so the search term matches literally
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn map_write_error(err: sqlx::Error) -> StoreError {
    let unique = err
        .as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false);
    if unique {
        StoreError::Conflict("A customer with the same email or phone exists".to_string())
    } else {
        StoreError::SqlxError(err)
    }
}

/// PostgreSQL-backed customer store
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Connect, then run embedded migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn from_settings(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            &settings.url,
            settings.max_connections.unwrap_or(10),
            settings.min_connections.unwrap_or(1),
            Duration::from_secs(settings.acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(settings.idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    async fn fetch_page(
        &self,
        mut qb: QueryBuilder<'static, Postgres>,
        page: PageRequest,
    ) -> Result<Vec<Customer>, StoreError> {
        qb.push(ORDER_NEWEST_FIRST);
        qb.push(" LIMIT ").push_bind(page.limit() as i64);
        qb.push(" OFFSET ").push_bind(page.offset() as i64);

        let rows = qb.build_query_as::<Customer>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn fetch_count(&self, mut qb: QueryBuilder<'static, Postgres>) -> Result<u64, StoreError> {
        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count.max(0) as u64)
    }
}

fn select_customers() -> QueryBuilder<'static, Postgres> {
    QueryBuilder::new(format!("SELECT {} FROM customers", CUSTOMER_COLUMNS))
}

fn count_customers() -> QueryBuilder<'static, Postgres> {
    QueryBuilder::new("SELECT COUNT(*) FROM customers")
}

#[async_trait]
impl CustomerStore for PostgresClient {
    async fn find_owned(&self, matchmaker_id: Uuid, id: Uuid) -> Result<Option<Customer>, StoreError> {
        let query = format!(
            "SELECT {} FROM customers WHERE id = $1 AND matchmaker_id = $2",
            CUSTOMER_COLUMNS
        );
        let customer = sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(matchmaker_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(customer)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, StoreError> {
        let query = format!("SELECT {} FROM customers WHERE id = $1", CUSTOMER_COLUMNS);
        let customer = sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(customer)
    }

    async fn count_partners(&self, filter: &PartnerFilter) -> Result<u64, StoreError> {
        let mut qb = count_customers();
        push_partner_filter(&mut qb, filter);
        self.fetch_count(qb).await
    }

    async fn find_partners(
        &self,
        filter: &PartnerFilter,
        page: PageRequest,
    ) -> Result<Vec<Customer>, StoreError> {
        let mut qb = select_customers();
        push_partner_filter(&mut qb, filter);
        self.fetch_page(qb, page).await
    }

    async fn list(
        &self,
        matchmaker_id: Uuid,
        page: PageRequest,
    ) -> Result<(Vec<Customer>, u64), StoreError> {
        let mut rows = select_customers();
        rows.push(" WHERE matchmaker_id = ").push_bind(matchmaker_id);
        let mut count = count_customers();
        count.push(" WHERE matchmaker_id = ").push_bind(matchmaker_id);

        let (customers, total) = tokio::try_join!(self.fetch_page(rows, page), self.fetch_count(count))?;
        Ok((customers, total))
    }

    async fn search(
        &self,
        matchmaker_id: Uuid,
        term: &str,
        page: PageRequest,
    ) -> Result<(Vec<Customer>, u64), StoreError> {
        let mut rows = select_customers();
        push_search(&mut rows, matchmaker_id, term);
        let mut count = count_customers();
        push_search(&mut count, matchmaker_id, term);

        let (customers, total) = tokio::try_join!(self.fetch_page(rows, page), self.fetch_count(count))?;
        Ok((customers, total))
    }

    async fn contact_taken(
        &self,
        email: &str,
        phone: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, StoreError> {
        let query = r#"
            SELECT EXISTS (
                SELECT 1 FROM customers
                WHERE (email = $1 OR phone = $2)
                  AND ($3::uuid IS NULL OR id <> $3)
            )
        "#;

        let taken: bool = sqlx::query_scalar(query)
            .bind(email)
            .bind(phone)
            .bind(exclude_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(taken)
    }

    async fn insert(&self, c: Customer) -> Result<Customer, StoreError> {
        let query = format!(
            "INSERT INTO customers ({cols}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, \
             $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, \
             $27, $28, $29, $30, $31, $32, $33) RETURNING {cols}",
            cols = CUSTOMER_COLUMNS
        );

        let inserted = sqlx::query_as::<_, Customer>(&query)
            .bind(c.id)
            .bind(c.matchmaker_id)
            .bind(&c.first_name)
            .bind(&c.last_name)
            .bind(c.gender)
            .bind(c.date_of_birth)
            .bind(&c.country)
            .bind(&c.city)
            .bind(c.height)
            .bind(&c.email)
            .bind(&c.phone)
            .bind(&c.college)
            .bind(&c.degree)
            .bind(c.income)
            .bind(c.employment_type)
            .bind(&c.company)
            .bind(&c.designation)
            .bind(c.marital_status)
            .bind(&c.languages)
            .bind(&c.hobbies)
            .bind(c.siblings)
            .bind(&c.caste)
            .bind(c.religion)
            .bind(c.want_kids)
            .bind(c.open_to_relocate)
            .bind(c.open_to_pets)
            .bind(c.account_status)
            .bind(&c.avatar)
            .bind(c.join_date)
            .bind(&c.bio)
            .bind(c.family_size)
            .bind(c.importance_of_caste)
            .bind(c.importance_of_religion)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)?;

        tracing::debug!("Inserted customer {} for matchmaker {}", inserted.id, inserted.matchmaker_id);
        Ok(inserted)
    }

    async fn update(&self, c: Customer) -> Result<Customer, StoreError> {
        let query = format!(
            r#"
            UPDATE customers SET
                first_name = $3, last_name = $4, gender = $5, date_of_birth = $6,
                country = $7, city = $8, height = $9, email = $10, phone = $11,
                college = $12, degree = $13, income = $14, employment_type = $15,
                company = $16, designation = $17, marital_status = $18,
                languages = $19, hobbies = $20, siblings = $21, caste = $22,
                religion = $23, want_kids = $24, open_to_relocate = $25,
                open_to_pets = $26, account_status = $27, avatar = $28, bio = $29,
                family_size = $30, importance_of_caste = $31, importance_of_religion = $32
            WHERE id = $1 AND matchmaker_id = $2
            RETURNING {}
            "#,
            CUSTOMER_COLUMNS
        );

        let updated = sqlx::query_as::<_, Customer>(&query)
            .bind(c.id)
            .bind(c.matchmaker_id)
            .bind(&c.first_name)
            .bind(&c.last_name)
            .bind(c.gender)
            .bind(c.date_of_birth)
            .bind(&c.country)
            .bind(&c.city)
            .bind(c.height)
            .bind(&c.email)
            .bind(&c.phone)
            .bind(&c.college)
            .bind(&c.degree)
            .bind(c.income)
            .bind(c.employment_type)
            .bind(&c.company)
            .bind(&c.designation)
            .bind(c.marital_status)
            .bind(&c.languages)
            .bind(&c.hobbies)
            .bind(c.siblings)
            .bind(&c.caste)
            .bind(c.religion)
            .bind(c.want_kids)
            .bind(c.open_to_relocate)
            .bind(c.open_to_pets)
            .bind(c.account_status)
            .bind(&c.avatar)
            .bind(&c.bio)
            .bind(c.family_size)
            .bind(c.importance_of_caste)
            .bind(c.importance_of_religion)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)?;

        updated.ok_or_else(|| StoreError::NotFound(format!("Customer {} not found", c.id)))
    }

    async fn delete(&self, matchmaker_id: Uuid, id: Uuid) -> Result<Option<Customer>, StoreError> {
        let query = format!(
            "DELETE FROM customers WHERE id = $1 AND matchmaker_id = $2 RETURNING {}",
            CUSTOMER_COLUMNS
        );
        let deleted = sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(matchmaker_id)
            .fetch_optional(&self.pool)
            .await?;

        if deleted.is_some() {
            tracing::info!("Deleted customer {} for matchmaker {}", id, matchmaker_id);
        }
        Ok(deleted)
    }

    async fn set_status(
        &self,
        matchmaker_id: Uuid,
        ids: &[Uuid],
        status: AccountStatus,
    ) -> Result<u64, StoreError> {
        let query = r#"
            UPDATE customers
            SET account_status = $1
            WHERE matchmaker_id = $2 AND id = ANY($3)
        "#;

        let result = sqlx::query(query)
            .bind(status)
            .bind(matchmaker_id)
            .bind(ids)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
