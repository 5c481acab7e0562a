use chrono::{Datelike, NaiveDate};

use crate::models::{Bounds, Customer, Gender, Importance, MaritalStatus, PartnerFilter};

/// Largest height gap a male seeker accepts (7 inches ≈ 17.78 cm)
pub const MAX_HEIGHT_GAP_CM: i32 = 17;

/// Partner birth dates may fall this many years before the seeker's
pub const AGE_WINDOW_YEARS_BEFORE: i32 = 5;

/// Partner birth dates may fall this many years after the seeker's
pub const AGE_WINDOW_YEARS_AFTER: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeightRule {
    /// Partner no taller than the seeker and at most `gap` cm shorter
    ShorterWithin(i32),
    /// Partner at least as tall as the seeker
    AtLeastAsTall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IncomeRule {
    /// Partner earns between zero and the seeker's income
    UpTo,
    /// Partner earns at least the seeker's income
    AtLeast,
}

#[derive(Debug, Clone, Copy)]
struct GenderPolicy {
    partner: Gender,
    height: HeightRule,
    income: IncomeRule,
}

const MALE_SEEKER: GenderPolicy = GenderPolicy {
    partner: Gender::Female,
    height: HeightRule::ShorterWithin(MAX_HEIGHT_GAP_CM),
    income: IncomeRule::UpTo,
};

const FEMALE_SEEKER: GenderPolicy = GenderPolicy {
    partner: Gender::Male,
    height: HeightRule::AtLeastAsTall,
    income: IncomeRule::AtLeast,
};

fn policy_for(gender: Gender) -> &'static GenderPolicy {
    match gender {
        Gender::Male => &MALE_SEEKER,
        Gender::Female => &FEMALE_SEEKER,
    }
}

/// What a seeker's caste/religion preferences require of a partner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CulturalConstraint {
    Unconstrained,
    ReligionOnly,
    CasteAndReligion,
}

use CulturalConstraint::{CasteAndReligion, ReligionOnly, Unconstrained};

/// Indexed `[caste importance][religion importance]`, LOW..HIGH on both axes
const CULTURAL_TABLE: [[CulturalConstraint; 3]; 3] = [
    // caste LOW: religion decides
    [Unconstrained, ReligionOnly, ReligionOnly],
    // caste MEDIUM: religion always
    [ReligionOnly, ReligionOnly, ReligionOnly],
    // caste HIGH: caste and religion
    [CasteAndReligion, CasteAndReligion, CasteAndReligion],
];

pub fn cultural_constraint(caste: Importance, religion: Importance) -> CulturalConstraint {
    CULTURAL_TABLE[caste.index()][religion.index()]
}

/// Shift a date by whole calendar years.
///
/// 29 February landing in a non-leap year rolls over to 1 March.
pub fn shift_years(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(date)
}

fn acceptable_marital_statuses(seeker: MaritalStatus) -> Vec<MaritalStatus> {
    match seeker {
        MaritalStatus::NeverMarried => vec![MaritalStatus::NeverMarried],
        MaritalStatus::Divorced => vec![MaritalStatus::NeverMarried, MaritalStatus::Divorced],
    }
}

/// Derive the filter describing acceptable partners for `seeker`.
///
/// Candidates are always restricted to the seeker's own matchmaker. The
/// filter is never relaxed: an empty result is a valid answer.
pub fn build_partner_filter(seeker: &Customer) -> PartnerFilter {
    let policy = policy_for(seeker.gender);

    let height_cm = match policy.height {
        HeightRule::ShorterWithin(gap) => Bounds::between(seeker.height - gap, seeker.height),
        HeightRule::AtLeastAsTall => Bounds::at_least(seeker.height),
    };

    let income = match policy.income {
        IncomeRule::UpTo => Bounds::between(0, seeker.income),
        IncomeRule::AtLeast => Bounds::at_least(seeker.income),
    };

    let date_of_birth = Bounds::between(
        shift_years(seeker.date_of_birth, -AGE_WINDOW_YEARS_BEFORE),
        shift_years(seeker.date_of_birth, AGE_WINDOW_YEARS_AFTER),
    );

    let (religion, caste) =
        match cultural_constraint(seeker.importance_of_caste, seeker.importance_of_religion) {
            Unconstrained => (None, None),
            ReligionOnly => (Some(seeker.religion), None),
            CasteAndReligion => (Some(seeker.religion), Some(seeker.caste.clone())),
        };

    PartnerFilter {
        matchmaker_id: seeker.matchmaker_id,
        gender: policy.partner,
        marital_statuses: acceptable_marital_statuses(seeker.marital_status),
        height_cm,
        date_of_birth,
        income,
        country: seeker.country.clone(),
        religion,
        caste,
    }
}
