use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::core::introductions;
use crate::errors::AppError;
use crate::models::{InsightsResponse, MatchPairRequest, MatchesResponse, PageQuery, SendMatchResponse};
use crate::routes::AppState;
use crate::services::AuthenticatedMatchmaker;

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/customers/{id}/matches", web::get().to(find_matches))
        .route("/matches/insights", web::post().to(generate_insights))
        .route("/matches/send", web::post().to(send_match));
}

/// Find partners endpoint
///
/// GET /api/v1/customers/{id}/matches?page=1&pageSize=10
async fn find_matches(
    state: web::Data<AppState>,
    who: AuthenticatedMatchmaker,
    path: web::Path<Uuid>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let seeker_id = path.into_inner();
    let page = state.matcher.limits().request(query.page, query.page_size)?;

    let result = state
        .matcher
        .find_partners(state.store.as_ref(), who.id, seeker_id, page)
        .await?;

    Ok(HttpResponse::Ok().json(MatchesResponse {
        partners: result.partners,
        page: result.page,
    }))
}

/// Compatibility insights endpoint
///
/// POST /api/v1/matches/insights
///
/// Request body:
/// ```json
/// { "customerId": "uuid", "partnerId": "uuid" }
/// ```
async fn generate_insights(
    state: web::Data<AppState>,
    who: AuthenticatedMatchmaker,
    req: web::Json<MatchPairRequest>,
) -> Result<HttpResponse, AppError> {
    let insights = introductions::generate_insights(
        state.store.as_ref(),
        state.insights.as_ref(),
        who.id,
        req.customer_id,
        req.partner_id,
    )
    .await?;

    Ok(HttpResponse::Ok().json(InsightsResponse { insights }))
}

/// Send match endpoint: notifies both customers and marks them matched
///
/// POST /api/v1/matches/send
async fn send_match(
    state: web::Data<AppState>,
    who: AuthenticatedMatchmaker,
    req: web::Json<MatchPairRequest>,
) -> Result<HttpResponse, AppError> {
    introductions::send_match(
        state.store.as_ref(),
        state.mailer.as_ref(),
        &state.links,
        who.id,
        req.customer_id,
        req.partner_id,
    )
    .await?;

    Ok(HttpResponse::Ok().json(SendMatchResponse {
        success: true,
        message: "Match emails sent".to_string(),
    }))
}
