use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============ Domain Models ============

/// Age bracket offered by the intake form.
///
/// Wire names match the scoring service's expected labels exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "18-25")]
    From18To25,
    #[serde(rename = "26-35")]
    From26To35,
    #[serde(rename = "36-50")]
    From36To50,
    #[serde(rename = "51+")]
    FiftyOnePlus,
}

impl AgeGroup {
    /// All selectable options, in display order.
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::From18To25,
        AgeGroup::From26To35,
        AgeGroup::From36To50,
        AgeGroup::FiftyOnePlus,
    ];

    /// The wire/display label for this bracket.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::From18To25 => "18-25",
            AgeGroup::From26To35 => "26-35",
            AgeGroup::From36To50 => "36-50",
            AgeGroup::FiftyOnePlus => "51+",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgeGroup::ALL
            .iter()
            .find(|g| g.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown age group: {}", s))
    }
}

/// Family situation offered by the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FamilyBackground {
    Single,
    Married,
    #[serde(rename = "Married with Kids")]
    MarriedWithKids,
}

impl FamilyBackground {
    /// All selectable options, in display order.
    pub const ALL: [FamilyBackground; 3] = [
        FamilyBackground::Single,
        FamilyBackground::Married,
        FamilyBackground::MarriedWithKids,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FamilyBackground::Single => "Single",
            FamilyBackground::Married => "Married",
            FamilyBackground::MarriedWithKids => "Married with Kids",
        }
    }
}

impl fmt::Display for FamilyBackground {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FamilyBackground {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FamilyBackground::ALL
            .iter()
            .find(|b| b.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown family background: {}", s))
    }
}

/// A fully scored lead as returned by the scoring service.
///
/// Both score fields are assigned server-side; a `Lead` value only exists
/// once the remote call has succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Contact phone number, as entered.
    pub phone_number: String,
    /// Contact email address.
    pub email: String,
    /// Self-reported credit score.
    pub credit_score: i64,
    /// Age bracket.
    pub age_group: AgeGroup,
    /// Family situation.
    pub family_background: FamilyBackground,
    /// Self-reported income.
    pub income: i64,
    /// Free-text comments; optional on the wire.
    #[serde(default)]
    pub comments: String,
    /// Whether the prospect consented to data processing.
    pub consent: bool,
    /// Score assigned by the scoring model.
    pub initial_score: f64,
    /// Score after the service's re-ranking pass.
    pub reranked_score: f64,
}

// ============ API Request/Response Models ============

/// Request body for `POST /score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub phone_number: String,
    pub email: String,
    pub credit_score: i64,
    pub age_group: AgeGroup,
    pub family_background: FamilyBackground,
    pub income: i64,
    pub comments: String,
    pub consent: bool,
}

/// Optional error body the scoring service attaches to failure statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}
