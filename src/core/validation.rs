use validator::ValidationError;

use crate::models::{CustomerInput, Importance};

/// A customer cannot care more about a partner's caste than about their
/// religion: HIGH caste importance requires HIGH religion importance, MEDIUM
/// requires at least MEDIUM.
///
/// The match predicate assumes every stored record satisfies this.
pub fn check_importance(caste: Importance, religion: Importance) -> Result<(), ValidationError> {
    if caste <= religion {
        return Ok(());
    }

    let mut err = ValidationError::new("importance_of_caste");
    err.message = Some(
        format!(
            "importance of caste ({:?}) cannot exceed importance of religion ({:?})",
            caste, religion
        )
        .into(),
    );
    Err(err)
}

/// Struct-level validator hooked into [`CustomerInput`]
pub fn validate_partner_preferences(input: &CustomerInput) -> Result<(), ValidationError> {
    check_importance(input.importance_of_caste, input.importance_of_religion)
}
