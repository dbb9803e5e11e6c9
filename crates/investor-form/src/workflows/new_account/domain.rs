use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Risk tolerance options offered by the checkbox group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InvestmentRisk {
    High,
    Medium,
    Low,
}

impl InvestmentRisk {
    pub const fn ordered() -> [Self; 3] {
        [Self::High, Self::Medium, Self::Low]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for InvestmentRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Selected risk levels. Membership is toggled by value, so a level is present at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskSelection(BTreeSet<InvestmentRisk>);

impl RiskSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `risk`, returning `true` when it is now selected.
    pub fn toggle(&mut self, risk: InvestmentRisk) -> bool {
        if self.0.remove(&risk) {
            false
        } else {
            self.0.insert(risk);
            true
        }
    }

    pub fn insert(&mut self, risk: InvestmentRisk) -> bool {
        self.0.insert(risk)
    }

    pub fn remove(&mut self, risk: InvestmentRisk) -> bool {
        self.0.remove(&risk)
    }

    pub fn contains(&self, risk: InvestmentRisk) -> bool {
        self.0.contains(&risk)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = InvestmentRisk> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<InvestmentRisk> for RiskSelection {
    fn from_iter<I: IntoIterator<Item = InvestmentRisk>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The record under edit. Every field is always populated; `Default` is the blank form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentDetails {
    pub full_name: String,
    pub initial_investment: f64,
    pub investment_risk: RiskSelection,
    pub comment_about_investment_risk: String,
    pub dependents: i32,
    pub accepted_terms_and_conditions: bool,
}

impl InvestmentDetails {
    pub fn has_high_risk(&self) -> bool {
        self.investment_risk.contains(InvestmentRisk::High)
    }
}

/// Field identifiers, serialized with the same camelCase keys as [`InvestmentDetails`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    FullName,
    InitialInvestment,
    InvestmentRisk,
    CommentAboutInvestmentRisk,
    Dependents,
    AcceptedTermsAndConditions,
}

impl FieldName {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::FullName,
            Self::InitialInvestment,
            Self::InvestmentRisk,
            Self::CommentAboutInvestmentRisk,
            Self::Dependents,
            Self::AcceptedTermsAndConditions,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::InitialInvestment => "initialInvestment",
            Self::InvestmentRisk => "investmentRisk",
            Self::CommentAboutInvestmentRisk => "commentAboutInvestmentRisk",
            Self::Dependents => "dependents",
            Self::AcceptedTermsAndConditions => "acceptedTermsAndConditions",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single renderer edit. `InvestmentRisk` toggles the carried value instead of replacing
/// the whole selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldUpdate {
    FullName(String),
    InitialInvestment(f64),
    InvestmentRisk(InvestmentRisk),
    CommentAboutInvestmentRisk(String),
    Dependents(i32),
    AcceptedTermsAndConditions(bool),
}

impl FieldUpdate {
    pub const fn field(&self) -> FieldName {
        match self {
            Self::FullName(_) => FieldName::FullName,
            Self::InitialInvestment(_) => FieldName::InitialInvestment,
            Self::InvestmentRisk(_) => FieldName::InvestmentRisk,
            Self::CommentAboutInvestmentRisk(_) => FieldName::CommentAboutInvestmentRisk,
            Self::Dependents(_) => FieldName::Dependents,
            Self::AcceptedTermsAndConditions(_) => FieldName::AcceptedTermsAndConditions,
        }
    }

    pub(crate) fn apply(self, record: &mut InvestmentDetails) {
        match self {
            Self::FullName(value) => record.full_name = value,
            Self::InitialInvestment(value) => record.initial_investment = value,
            Self::InvestmentRisk(value) => {
                record.investment_risk.toggle(value);
            }
            Self::CommentAboutInvestmentRisk(value) => record.comment_about_investment_risk = value,
            Self::Dependents(value) => record.dependents = value,
            Self::AcceptedTermsAndConditions(value) => {
                record.accepted_terms_and_conditions = value
            }
        }
    }
}

/// Submission lifecycle of the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
}

impl SubmissionState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Submitting => "Submitting",
        }
    }
}

/// Identifier assigned to each accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub String);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
