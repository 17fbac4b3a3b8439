use crate::errors::AppError;
use crate::models::{AgeGroup, FamilyBackground, ScoreRequest};

/// The in-progress lead: a mutable working copy of the pre-score fields.
///
/// Numeric inputs are held as text, matching form-input semantics; they are
/// parsed only when the draft is turned into a scoring request. Field writes
/// are plain mutation with no cross-field validation.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadDraft {
    pub phone_number: String,
    pub email: String,
    pub credit_score: String,
    pub age_group: AgeGroup,
    pub family_background: FamilyBackground,
    pub income: String,
    pub comments: String,
    pub consent: bool,
}

impl Default for LeadDraft {
    fn default() -> Self {
        Self {
            phone_number: String::new(),
            email: String::new(),
            credit_score: String::new(),
            age_group: AgeGroup::From18To25,
            family_background: FamilyBackground::Single,
            income: String::new(),
            comments: String::new(),
            consent: false,
        }
    }
}

impl LeadDraft {
    /// Restores every field to its default, including forcing consent back
    /// to `false`. Idempotent.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether the draft is untouched (all fields at their defaults).
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Builds the scoring request from the draft.
    ///
    /// Enforces only presence and numeric parse on the required fields; no
    /// range validation is applied to credit score or income.
    pub fn to_request(&self) -> Result<ScoreRequest, AppError> {
        require_present("Phone number", &self.phone_number)?;
        require_present("Email", &self.email)?;
        let credit_score = parse_required_number("Credit score", &self.credit_score)?;
        let income = parse_required_number("Income", &self.income)?;

        Ok(ScoreRequest {
            phone_number: self.phone_number.clone(),
            email: self.email.clone(),
            credit_score,
            age_group: self.age_group,
            family_background: self.family_background,
            income,
            comments: self.comments.clone(),
            consent: self.consent,
        })
    }
}

fn require_present(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

fn parse_required_number(field: &str, value: &str) -> Result<i64, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    value
        .parse()
        .map_err(|_| AppError::Validation(format!("{} must be a number", field)))
}
