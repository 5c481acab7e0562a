use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{AccountStatus, Customer, PublicProfile};
use crate::services::email::match_email;
use crate::services::{CustomerStore, InsightGenerator, Mailer};

/// Builds public profile URLs for outgoing emails
#[derive(Debug, Clone)]
pub struct ProfileLinks {
    base_url: String,
}

impl ProfileLinks {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn profile(&self, id: Uuid) -> String {
        format!("{}/profile/{}", self.base_url, id)
    }
}

/// Load a customer and a prospective partner, both owned by `matchmaker_id`
pub async fn load_pair(
    store: &dyn CustomerStore,
    matchmaker_id: Uuid,
    customer_id: Uuid,
    partner_id: Uuid,
) -> Result<(Customer, Customer), AppError> {
    if customer_id == partner_id {
        return Err(AppError::Validation(
            "A customer cannot be matched with themselves".to_string(),
        ));
    }

    let (customer, partner) = tokio::try_join!(
        store.find_owned(matchmaker_id, customer_id),
        store.find_owned(matchmaker_id, partner_id)
    )?;

    let customer = customer.ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;
    let partner = partner.ok_or_else(|| AppError::NotFound("Partner not found".to_string()))?;
    Ok((customer, partner))
}

/// Ask the LLM for a compatibility write-up of two customers
pub async fn generate_insights(
    store: &dyn CustomerStore,
    generator: &dyn InsightGenerator,
    matchmaker_id: Uuid,
    customer_id: Uuid,
    partner_id: Uuid,
) -> Result<String, AppError> {
    let (customer, partner) = load_pair(store, matchmaker_id, customer_id, partner_id).await?;

    let insights = generator
        .generate_insights(&PublicProfile::from(&customer), &PublicProfile::from(&partner))
        .await?;

    tracing::info!("Generated insights for {} and {}", customer_id, partner_id);
    Ok(insights)
}

/// Email both parties a link to the other's profile, then mark both matched.
///
/// If either email fails nothing is updated.
pub async fn send_match(
    store: &dyn CustomerStore,
    mailer: &dyn Mailer,
    links: &ProfileLinks,
    matchmaker_id: Uuid,
    customer_id: Uuid,
    partner_id: Uuid,
) -> Result<(), AppError> {
    let (customer, partner) = load_pair(store, matchmaker_id, customer_id, partner_id).await?;

    let to_customer = match_email(
        &customer.email,
        &customer.full_name(),
        &partner.full_name(),
        &links.profile(partner.id),
    );
    let to_partner = match_email(
        &partner.email,
        &partner.full_name(),
        &customer.full_name(),
        &links.profile(customer.id),
    );

    let (first, second) = tokio::join!(mailer.send(&to_customer), mailer.send(&to_partner));
    first?;
    second?;

    let updated = store
        .set_status(matchmaker_id, &[customer.id, partner.id], AccountStatus::Matched)
        .await?;

    tracing::info!(
        "Sent match emails for {} and {} ({} records marked matched)",
        customer_id,
        partner_id,
        updated
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_links() {
        let links = ProfileLinks::new("https://app.example.com/");
        let id = Uuid::nil();
        assert_eq!(
            links.profile(id),
            "https://app.example.com/profile/00000000-0000-0000-0000-000000000000"
        );
    }
}
