// Unit tests for Matchmaker Hub

use chrono::{NaiveDate, TimeZone, Utc};
use matchmaker_hub::core::{
    build_partner_filter, check_importance, cultural_constraint, shift_years, CulturalConstraint,
    PageInfo, PageLimits, PageRequest,
};
use matchmaker_hub::models::{
    AccountStatus, Bounds, Choice, Customer, CustomerInput, EmploymentType, Gender, Importance,
    MaritalStatus, PublicProfile, Religion,
};
use uuid::Uuid;
use validator::Validate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn create_customer(matchmaker_id: Uuid, gender: Gender) -> Customer {
    Customer {
        id: Uuid::new_v4(),
        matchmaker_id,
        first_name: "Priya".to_string(),
        last_name: "Sharma".to_string(),
        gender,
        date_of_birth: date(1995, 1, 1),
        country: "India".to_string(),
        city: "Delhi".to_string(),
        height: 180,
        email: format!("{}@example.com", Uuid::new_v4()),
        phone: "9000000000".to_string(),
        college: "DU".to_string(),
        degree: "B.Com".to_string(),
        income: 1_000_000,
        employment_type: EmploymentType::Government,
        company: None,
        designation: "Officer".to_string(),
        marital_status: MaritalStatus::NeverMarried,
        languages: vec!["Hindi".to_string()],
        hobbies: vec!["Music".to_string()],
        siblings: 2,
        caste: "X".to_string(),
        religion: Religion::Hindu,
        want_kids: Choice::Yes,
        open_to_relocate: Choice::No,
        open_to_pets: Choice::Maybe,
        account_status: AccountStatus::Unmatched,
        avatar: None,
        join_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        bio: "Loves music and travel".to_string(),
        family_size: 5,
        importance_of_caste: Importance::Low,
        importance_of_religion: Importance::Low,
    }
}

fn create_input() -> CustomerInput {
    serde_json::from_value(serde_json::json!({
        "firstName": "  Rahul ",
        "lastName": "Verma",
        "gender": "Male",
        "dateOfBirth": "1994-05-20",
        "country": "India",
        "city": "Mumbai",
        "height": 175,
        "email": "rahul@example.com",
        "phone": "9876543210",
        "college": "IIT Bombay",
        "degree": "B.Tech",
        "income": 1800000,
        "employmentType": "Private",
        "designation": "Engineer",
        "maritalStatus": "NeverMarried",
        "languages": ["Hindi", "English"],
        "hobbies": ["Cricket"],
        "siblings": 1,
        "caste": "Y",
        "religion": "Hindu",
        "wantKids": "Yes",
        "openToRelocate": "Maybe",
        "openToPets": "No",
        "bio": "Engineer who enjoys cricket",
        "familySize": 4,
        "importanceOfCasteOfThePartner": "LOW",
        "importanceOfReligionOfThePartner": "HIGH"
    }))
    .unwrap()
}

// ---------------------------------------------------------------------------
// Predicate
// ---------------------------------------------------------------------------

#[test]
fn test_male_seeker_height_window() {
    let seeker = create_customer(Uuid::new_v4(), Gender::Male);
    let filter = build_partner_filter(&seeker);

    assert_eq!(filter.gender, Gender::Female);
    assert!(filter.height_cm.contains(163));
    assert!(filter.height_cm.contains(180));
    assert!(!filter.height_cm.contains(162));
    assert!(!filter.height_cm.contains(181));
}

#[test]
fn test_female_seeker_has_no_upper_bounds() {
    let seeker = create_customer(Uuid::new_v4(), Gender::Female);
    let filter = build_partner_filter(&seeker);

    assert_eq!(filter.gender, Gender::Male);
    assert_eq!(filter.height_cm.max, None);
    assert_eq!(filter.income.max, None);
    assert!(filter.income.contains(i64::MAX));
    assert!(!filter.income.contains(999_999));
}

#[test]
fn test_age_window_is_five_years_older_two_younger() {
    let seeker = create_customer(Uuid::new_v4(), Gender::Male);
    let filter = build_partner_filter(&seeker);

    assert_eq!(filter.date_of_birth, Bounds::between(date(1990, 1, 1), date(1997, 1, 1)));
    assert!(filter.date_of_birth.contains(date(1990, 1, 1)));
    assert!(!filter.date_of_birth.contains(date(1989, 12, 31)));
    assert!(!filter.date_of_birth.contains(date(1997, 1, 2)));
}

#[test]
fn test_filter_is_scoped_to_matchmaker_and_country() {
    let matchmaker = Uuid::new_v4();
    let seeker = create_customer(matchmaker, Gender::Male);
    let filter = build_partner_filter(&seeker);

    assert_eq!(filter.matchmaker_id, matchmaker);
    assert_eq!(filter.country, "India");
}

#[test]
fn test_cultural_constraint_table() {
    use Importance::*;
    assert_eq!(cultural_constraint(Low, Low), CulturalConstraint::Unconstrained);
    assert_eq!(cultural_constraint(Low, Medium), CulturalConstraint::ReligionOnly);
    assert_eq!(cultural_constraint(Medium, High), CulturalConstraint::ReligionOnly);
    assert_eq!(cultural_constraint(High, High), CulturalConstraint::CasteAndReligion);
}

#[test]
fn test_religion_only_leaves_caste_open() {
    let mut seeker = create_customer(Uuid::new_v4(), Gender::Female);
    seeker.importance_of_religion = Importance::Medium;
    let filter = build_partner_filter(&seeker);

    assert_eq!(filter.religion, Some(Religion::Hindu));
    assert_eq!(filter.caste, None);
}

#[test]
fn test_shift_years_end_of_february() {
    assert_eq!(shift_years(date(2000, 2, 29), -5), date(1995, 3, 1));
    assert_eq!(shift_years(date(2000, 2, 28), 2), date(2002, 2, 28));
}

// ---------------------------------------------------------------------------
// In-memory filter evaluation
// ---------------------------------------------------------------------------

#[test]
fn test_filter_matches_compatible_candidate() {
    let matchmaker = Uuid::new_v4();
    let seeker = create_customer(matchmaker, Gender::Male);
    let mut candidate = create_customer(matchmaker, Gender::Female);
    candidate.height = 165;
    candidate.income = 400_000;
    candidate.date_of_birth = date(1996, 3, 10);

    let filter = build_partner_filter(&seeker);
    assert!(filter.matches(&candidate));
}

#[test]
fn test_filter_country_is_case_insensitive() {
    let matchmaker = Uuid::new_v4();
    let seeker = create_customer(matchmaker, Gender::Male);
    let mut candidate = create_customer(matchmaker, Gender::Female);
    candidate.height = 170;
    candidate.country = "INDIA".to_string();

    assert!(build_partner_filter(&seeker).matches(&candidate));
}

#[test]
fn test_filter_rejects_other_matchmakers_customers() {
    let seeker = create_customer(Uuid::new_v4(), Gender::Male);
    let mut candidate = create_customer(Uuid::new_v4(), Gender::Female);
    candidate.height = 170;

    assert!(!build_partner_filter(&seeker).matches(&candidate));
}

#[test]
fn test_filter_rejects_divorced_for_never_married_seeker() {
    let matchmaker = Uuid::new_v4();
    let seeker = create_customer(matchmaker, Gender::Male);
    let mut candidate = create_customer(matchmaker, Gender::Female);
    candidate.height = 170;
    candidate.marital_status = MaritalStatus::Divorced;

    assert!(!build_partner_filter(&seeker).matches(&candidate));
}

#[test]
fn test_filter_caste_and_religion() {
    let matchmaker = Uuid::new_v4();
    let mut seeker = create_customer(matchmaker, Gender::Female);
    seeker.height = 160;
    seeker.income = 100_000;
    seeker.importance_of_caste = Importance::High;
    seeker.importance_of_religion = Importance::High;

    let mut candidate = create_customer(matchmaker, Gender::Male);
    candidate.caste = "x".to_string();
    let filter = build_partner_filter(&seeker);
    assert!(filter.matches(&candidate));

    candidate.caste = "Z".to_string();
    assert!(!filter.matches(&candidate));

    candidate.caste = "X".to_string();
    candidate.religion = Religion::Sikh;
    assert!(!filter.matches(&candidate));
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[test]
fn test_page_info_for_last_partial_page() {
    let info = PageInfo::new(25, PageRequest::new(3, 10).unwrap());
    assert_eq!(info.total_pages, 3);
    assert_eq!(info.current_page, 3);
    assert!(!info.has_next_page);
    assert!(info.has_previous_page);
}

#[test]
fn test_page_info_serializes_camel_case() {
    let info = PageInfo::new(5, PageRequest::new(1, 10).unwrap());
    let json = serde_json::to_value(info).unwrap();
    assert_eq!(json["totalCount"], 5);
    assert_eq!(json["totalPages"], 1);
    assert_eq!(json["hasNextPage"], false);
}

#[test]
fn test_page_limits_from_defaults() {
    let limits = PageLimits::default();
    let request = limits.request(Some(4), None).unwrap();
    assert_eq!(request.offset(), 30);
    assert_eq!(request.limit(), 10);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn test_check_importance() {
    assert!(check_importance(Importance::Low, Importance::High).is_ok());
    assert!(check_importance(Importance::High, Importance::High).is_ok());
    assert!(check_importance(Importance::Medium, Importance::Low).is_err());
    assert!(check_importance(Importance::High, Importance::Medium).is_err());
}

#[test]
fn test_valid_input_passes() {
    let input = create_input().normalized();
    assert_eq!(input.first_name, "Rahul");
    assert!(input.validate().is_ok());
}

#[test]
fn test_caste_importance_above_religion_rejected() {
    let mut input = create_input();
    input.importance_of_caste = Importance::Medium;
    input.importance_of_religion = Importance::Low;
    assert!(input.validate().is_err());
}

#[test]
fn test_field_rules_rejected() {
    let mut input = create_input();
    input.phone = "12345".to_string();
    assert!(input.validate().is_err());

    let mut input = create_input();
    input.email = "not-an-email".to_string();
    assert!(input.validate().is_err());

    let mut input = create_input();
    input.bio = "short".to_string();
    assert!(input.validate().is_err());
}

#[test]
fn test_height_must_be_positive() {
    let mut input = create_input();
    input.height = 0;
    assert!(input.validate().is_err());

    input.height = 1;
    assert!(input.validate().is_ok());
}

#[test]
fn test_into_customer_defaults_status() {
    let matchmaker = Uuid::new_v4();
    let customer = create_input().normalized().into_customer(matchmaker);
    assert_eq!(customer.matchmaker_id, matchmaker);
    assert_eq!(customer.account_status, AccountStatus::Unmatched);
    assert_eq!(customer.full_name(), "Rahul Verma");
}

#[test]
fn test_customer_json_field_names() {
    let customer = create_customer(Uuid::new_v4(), Gender::Female);
    let json = serde_json::to_value(&customer).unwrap();
    assert_eq!(json["userId"], customer.matchmaker_id.to_string());
    assert_eq!(json["importanceOfCasteOfThePartner"], "LOW");
    assert_eq!(json["accountStatus"], "unmatched");
}

#[test]
fn test_public_profile_omits_contact_details() {
    let customer = create_customer(Uuid::new_v4(), Gender::Female);
    let json = serde_json::to_value(PublicProfile::from(&customer)).unwrap();
    assert!(json.get("email").is_none());
    assert!(json.get("phone").is_none());
    assert!(json.get("userId").is_none());
    assert_eq!(json["firstName"], "Priya");
}
