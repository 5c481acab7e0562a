use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::core::validation::validate_partner_preferences;
use crate::models::domain::{
    AccountStatus, Choice, Customer, EmploymentType, Gender, Importance, MaritalStatus, Religion,
};

/// Customer profile as submitted on create and update
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_partner_preferences", skip_on_field_errors = false))]
pub struct CustomerInput {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    #[validate(length(min = 1))]
    pub country: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(range(min = 1))]
    pub height: i32,
    #[validate(email)]
    pub email: String,
    #[validate(length(equal = 10))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub college: String,
    #[validate(length(min = 1))]
    pub degree: String,
    #[validate(range(min = 0))]
    pub income: i64,
    pub employment_type: EmploymentType,
    #[serde(default)]
    pub company: Option<String>,
    #[validate(length(min = 1))]
    pub designation: String,
    pub marital_status: MaritalStatus,
    #[validate(length(min = 1))]
    pub languages: Vec<String>,
    #[validate(length(min = 1))]
    pub hobbies: Vec<String>,
    #[validate(range(min = 0))]
    pub siblings: i32,
    #[validate(length(min = 1))]
    pub caste: String,
    pub religion: Religion,
    pub want_kids: Choice,
    pub open_to_relocate: Choice,
    pub open_to_pets: Choice,
    #[serde(default)]
    pub account_status: AccountStatus,
    #[serde(default)]
    #[validate(url)]
    pub avatar: Option<String>,
    #[validate(length(min = 10))]
    pub bio: String,
    #[validate(range(min = 1))]
    pub family_size: i32,
    #[serde(rename = "importanceOfCasteOfThePartner")]
    pub importance_of_caste: Importance,
    #[serde(rename = "importanceOfReligionOfThePartner")]
    pub importance_of_religion: Importance,
}

impl CustomerInput {
    /// Trim surrounding whitespace from every free-text field
    pub fn normalized(mut self) -> Self {
        fn trim(s: &mut String) {
            let t = s.trim();
            if t.len() != s.len() {
                *s = t.to_string();
            }
        }

        for field in [
            &mut self.first_name,
            &mut self.last_name,
            &mut self.country,
            &mut self.city,
            &mut self.email,
            &mut self.phone,
            &mut self.college,
            &mut self.degree,
            &mut self.designation,
            &mut self.caste,
            &mut self.bio,
        ] {
            trim(field);
        }
        if let Some(company) = self.company.as_mut() {
            trim(company);
        }
        self.company = self.company.filter(|c| !c.is_empty());
        self.avatar = self.avatar.filter(|a| !a.trim().is_empty());
        self.languages.iter_mut().for_each(trim);
        self.hobbies.iter_mut().for_each(trim);
        self.languages.retain(|l| !l.is_empty());
        self.hobbies.retain(|h| !h.is_empty());
        self
    }

    /// Materialize a new customer record owned by `matchmaker_id`
    pub fn into_customer(self, matchmaker_id: Uuid) -> Customer {
        Customer {
            id: Uuid::new_v4(),
            matchmaker_id,
            join_date: Utc::now(),
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender,
            date_of_birth: self.date_of_birth,
            country: self.country,
            city: self.city,
            height: self.height,
            email: self.email,
            phone: self.phone,
            college: self.college,
            degree: self.degree,
            income: self.income,
            employment_type: self.employment_type,
            company: self.company,
            designation: self.designation,
            marital_status: self.marital_status,
            languages: self.languages,
            hobbies: self.hobbies,
            siblings: self.siblings,
            caste: self.caste,
            religion: self.religion,
            want_kids: self.want_kids,
            open_to_relocate: self.open_to_relocate,
            open_to_pets: self.open_to_pets,
            account_status: self.account_status,
            avatar: self.avatar,
            bio: self.bio,
            family_size: self.family_size,
            importance_of_caste: self.importance_of_caste,
            importance_of_religion: self.importance_of_religion,
        }
    }

    /// Overwrite the editable fields of an existing record, keeping its
    /// identity, owner and join date
    pub fn apply_to(self, existing: &Customer) -> Customer {
        let mut updated = self.into_customer(existing.matchmaker_id);
        updated.id = existing.id;
        updated.join_date = existing.join_date;
        updated
    }
}

/// Pagination query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
}

/// Substring search over a matchmaker's customers
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(min = 1))]
    pub q: String,
    #[serde(default)]
    pub page: Option<u32>,
}

/// Identifies a seeker and one of their candidate partners
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPairRequest {
    pub customer_id: Uuid,
    pub partner_id: Uuid,
}
