use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Customer gender. Matching is only defined for this binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gender")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "marital_status")]
pub enum MaritalStatus {
    NeverMarried,
    Divorced,
}

/// How strongly a customer cares about a partner attribute.
///
/// Variants are declared in ascending order so `Ord` reads naturally:
/// `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "importance", rename_all = "UPPERCASE")]
pub enum Importance {
    Low,
    Medium,
    High,
}

impl Importance {
    /// Row/column index into the cultural decision table.
    pub(crate) fn index(self) -> usize {
        match self {
            Importance::Low => 0,
            Importance::Medium => 1,
            Importance::High => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "religion")]
pub enum Religion {
    Hindu,
    Muslim,
    Sikh,
    Christian,
    Buddhist,
    Jain,
    #[serde(rename = "Parsi (Zoroastrian)")]
    #[sqlx(rename = "Parsi (Zoroastrian)")]
    Parsi,
    #[serde(rename = "No Religion / Atheist")]
    #[sqlx(rename = "No Religion / Atheist")]
    NoReligion,
    #[serde(rename = "Spiritual (but not religious)")]
    #[sqlx(rename = "Spiritual (but not religious)")]
    Spiritual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "account_status", rename_all = "lowercase")]
pub enum AccountStatus {
    Unmatched,
    Matched,
    Paused,
}

impl Default for AccountStatus {
    fn default() -> Self {
        AccountStatus::Unmatched
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "employment_type")]
pub enum EmploymentType {
    Government,
    Private,
}

/// Yes/No/Maybe answer used by the lifestyle questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "choice")]
pub enum Choice {
    Yes,
    No,
    Maybe,
}

/// A customer profile owned by exactly one matchmaker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    #[serde(rename = "userId")]
    pub matchmaker_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub country: String,
    pub city: String,
    pub height: i32,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub degree: String,
    pub income: i64,
    pub employment_type: EmploymentType,
    pub company: Option<String>,
    pub designation: String,
    pub marital_status: MaritalStatus,
    pub languages: Vec<String>,
    pub hobbies: Vec<String>,
    pub siblings: i32,
    pub caste: String,
    pub religion: Religion,
    pub want_kids: Choice,
    pub open_to_relocate: Choice,
    pub open_to_pets: Choice,
    pub account_status: AccountStatus,
    pub avatar: Option<String>,
    pub join_date: DateTime<Utc>,
    pub bio: String,
    pub family_size: i32,
    #[serde(rename = "importanceOfCasteOfThePartner")]
    pub importance_of_caste: Importance,
    #[serde(rename = "importanceOfReligionOfThePartner")]
    pub importance_of_religion: Importance,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Customer data safe to show outside the owning matchmaker's dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub country: String,
    pub city: String,
    pub height: i32,
    pub college: String,
    pub degree: String,
    pub employment_type: EmploymentType,
    pub company: Option<String>,
    pub designation: String,
    pub marital_status: MaritalStatus,
    pub languages: Vec<String>,
    pub hobbies: Vec<String>,
    pub siblings: i32,
    pub caste: String,
    pub religion: Religion,
    pub want_kids: Choice,
    pub open_to_relocate: Choice,
    pub open_to_pets: Choice,
    pub avatar: Option<String>,
    pub bio: String,
    pub family_size: i32,
}

impl From<&Customer> for PublicProfile {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id,
            first_name: c.first_name.clone(),
            last_name: c.last_name.clone(),
            gender: c.gender,
            date_of_birth: c.date_of_birth,
            country: c.country.clone(),
            city: c.city.clone(),
            height: c.height,
            college: c.college.clone(),
            degree: c.degree.clone(),
            employment_type: c.employment_type,
            company: c.company.clone(),
            designation: c.designation.clone(),
            marital_status: c.marital_status,
            languages: c.languages.clone(),
            hobbies: c.hobbies.clone(),
            siblings: c.siblings,
            caste: c.caste.clone(),
            religion: c.religion,
            want_kids: c.want_kids,
            open_to_relocate: c.open_to_relocate,
            open_to_pets: c.open_to_pets,
            avatar: c.avatar.clone(),
            bio: c.bio.clone(),
            family_size: c.family_size,
        }
    }
}

/// Inclusive range with optional bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub fn between(min: T, max: T) -> Self {
        Self { min: Some(min), max: Some(max) }
    }

    pub fn at_least(min: T) -> Self {
        Self { min: Some(min), max: None }
    }

    #[inline]
    pub fn contains(&self, value: T) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// Declarative description of acceptable partners for one seeker.
///
/// Built by [`crate::core::predicate::build_partner_filter`] and executed
/// either as SQL by the PostgreSQL store or in memory via
/// [`PartnerFilter::matches`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerFilter {
    pub matchmaker_id: Uuid,
    pub gender: Gender,
    pub marital_statuses: Vec<MaritalStatus>,
    pub height_cm: Bounds<i32>,
    pub date_of_birth: Bounds<NaiveDate>,
    pub income: Bounds<i64>,
    /// Compared case-insensitively
    pub country: String,
    pub religion: Option<Religion>,
    /// Compared case-insensitively
    pub caste: Option<String>,
}
