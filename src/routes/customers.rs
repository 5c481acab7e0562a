use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::core::PageInfo;
use crate::errors::AppError;
use crate::models::{CustomerInput, CustomerPageResponse, PageQuery, PublicProfile, SearchQuery};
use crate::routes::AppState;
use crate::services::AuthenticatedMatchmaker;

/// Configure customer CRUD and public profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/profiles/{id}", web::get().to(get_public_profile))
        .route("/customers", web::post().to(create_customer))
        .route("/customers", web::get().to(list_customers))
        .route("/customers/search", web::get().to(search_customers))
        .route("/customers/{id}", web::get().to(get_customer))
        .route("/customers/{id}", web::put().to(update_customer))
        .route("/customers/{id}", web::delete().to(delete_customer));
}

fn not_found() -> AppError {
    AppError::NotFound("Customer not found".to_string())
}

/// POST /api/v1/customers
async fn create_customer(
    state: web::Data<AppState>,
    who: AuthenticatedMatchmaker,
    body: web::Json<CustomerInput>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner().normalized();
    input.validate()?;

    if state.store.contact_taken(&input.email, &input.phone, None).await? {
        return Err(AppError::Conflict(
            "A customer with the same email or phone exists".to_string(),
        ));
    }

    let customer = state.store.insert(input.into_customer(who.id)).await?;
    tracing::info!("Matchmaker {} created customer {}", who.id, customer.id);

    Ok(HttpResponse::Created().json(customer))
}

/// GET /api/v1/customers?page={page}
async fn list_customers(
    state: web::Data<AppState>,
    who: AuthenticatedMatchmaker,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = state.matcher.limits().request(query.page, query.page_size)?;
    let (customers, total) = state.store.list(who.id, page).await?;

    Ok(HttpResponse::Ok().json(CustomerPageResponse {
        customers,
        page: PageInfo::new(total, page),
    }))
}

/// GET /api/v1/customers/search?q={term}&page={page}
async fn search_customers(
    state: web::Data<AppState>,
    who: AuthenticatedMatchmaker,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;
    let term = query.q.trim();
    if term.is_empty() {
        return Err(AppError::Validation("search term must not be blank".to_string()));
    }

    let page = state.matcher.limits().request(query.page, None)?;
    let (customers, total) = state.store.search(who.id, term, page).await?;

    tracing::debug!("Search {:?} for matchmaker {} matched {}", term, who.id, total);

    Ok(HttpResponse::Ok().json(CustomerPageResponse {
        customers,
        page: PageInfo::new(total, page),
    }))
}

/// GET /api/v1/customers/{id}
async fn get_customer(
    state: web::Data<AppState>,
    who: AuthenticatedMatchmaker,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let customer = state
        .store
        .find_owned(who.id, path.into_inner())
        .await?
        .ok_or_else(not_found)?;

    Ok(HttpResponse::Ok().json(customer))
}

/// PUT /api/v1/customers/{id}
async fn update_customer(
    state: web::Data<AppState>,
    who: AuthenticatedMatchmaker,
    path: web::Path<Uuid>,
    body: web::Json<CustomerInput>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let existing = state.store.find_owned(who.id, id).await?.ok_or_else(not_found)?;

    let input = body.into_inner().normalized();
    input.validate()?;

    if state
        .store
        .contact_taken(&input.email, &input.phone, Some(id))
        .await?
    {
        return Err(AppError::Conflict(
            "Email/Phone used by another customer".to_string(),
        ));
    }

    let updated = state.store.update(input.apply_to(&existing)).await?;
    tracing::info!("Matchmaker {} updated customer {}", who.id, id);

    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/v1/customers/{id}
async fn delete_customer(
    state: web::Data<AppState>,
    who: AuthenticatedMatchmaker,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let deleted = state
        .store
        .delete(who.id, path.into_inner())
        .await?
        .ok_or_else(not_found)?;

    Ok(HttpResponse::Ok().json(deleted))
}

/// GET /api/v1/profiles/{id}
///
/// Public view linked from match emails; contact details are omitted.
async fn get_public_profile(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let customer = state
        .store
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    Ok(HttpResponse::Ok().json(PublicProfile::from(&customer)))
}
