use crate::models::{Customer, PartnerFilter};

/// Case-insensitive equality matching SQL `LOWER(a) = LOWER(b)`
#[inline]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Case-insensitive substring test used by customer search
#[inline]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl PartnerFilter {
    /// Evaluate the filter against one candidate, with the same semantics the
    /// SQL translation has: inclusive bounds, case-insensitive text.
    pub fn matches(&self, candidate: &Customer) -> bool {
        if candidate.matchmaker_id != self.matchmaker_id {
            return false;
        }

        if candidate.gender != self.gender {
            return false;
        }

        if !self.marital_statuses.contains(&candidate.marital_status) {
            return false;
        }

        if !self.height_cm.contains(candidate.height)
            || !self.date_of_birth.contains(candidate.date_of_birth)
            || !self.income.contains(candidate.income)
        {
            return false;
        }

        if !eq_ignore_case(&candidate.country, &self.country) {
            return false;
        }

        if let Some(religion) = self.religion {
            if candidate.religion != religion {
                return false;
            }
        }

        if let Some(caste) = &self.caste {
            if !eq_ignore_case(&candidate.caste, caste) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bounds, Gender, MaritalStatus, Religion};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn filter(owner: Uuid) -> PartnerFilter {
        PartnerFilter {
            matchmaker_id: owner,
            gender: Gender::Female,
            marital_statuses: vec![MaritalStatus::NeverMarried],
            height_cm: Bounds::between(163, 180),
            date_of_birth: Bounds::between(
                NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(1997, 1, 1).unwrap(),
            ),
            income: Bounds::between(0, 1_000_000),
            country: "India".to_string(),
            religion: Some(Religion::Hindu),
            caste: Some("Brahmin".to_string()),
        }
    }

    #[test]
    fn test_case_insensitive_helpers() {
        assert!(eq_ignore_case("INDIA", "india"));
        assert!(!eq_ignore_case("India", "Indiana"));
        assert!(contains_ignore_case("Priya Sharma", "SHAR"));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let f = filter(Uuid::new_v4());
        assert!(f.height_cm.contains(163));
        assert!(f.height_cm.contains(180));
        assert!(!f.height_cm.contains(181));
        assert!(!f.height_cm.contains(162));
        assert!(f.income.contains(0));
        assert!(!f.income.contains(1_000_001));
    }

    #[test]
    fn test_open_upper_bound() {
        let b = Bounds::at_least(170);
        assert!(b.contains(i32::MAX));
        assert!(!b.contains(169));
    }
}
