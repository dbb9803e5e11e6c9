use super::super::domain::{FieldName, InvestmentDetails};
use super::config::SchemaLimits;

type RuleCheck = fn(&InvestmentDetails, &SchemaLimits) -> Option<String>;

/// One entry of the rule table: the field it reports against and the check run over the
/// whole record snapshot.
pub(crate) struct FieldRule {
    pub field: FieldName,
    check: RuleCheck,
}

impl FieldRule {
    pub fn evaluate(&self, record: &InvestmentDetails, limits: &SchemaLimits) -> Option<String> {
        (self.check)(record, limits)
    }
}

pub(crate) static RULES: [FieldRule; 6] = [
    FieldRule {
        field: FieldName::FullName,
        check: full_name,
    },
    FieldRule {
        field: FieldName::InitialInvestment,
        check: initial_investment,
    },
    FieldRule {
        field: FieldName::InvestmentRisk,
        check: investment_risk,
    },
    FieldRule {
        field: FieldName::CommentAboutInvestmentRisk,
        check: comment_about_investment_risk,
    },
    FieldRule {
        field: FieldName::Dependents,
        check: dependents,
    },
    FieldRule {
        field: FieldName::AcceptedTermsAndConditions,
        check: accepted_terms,
    },
];

pub(crate) fn rule_for(field: FieldName) -> &'static FieldRule {
    // RULES is declared in FieldName::ordered() order.
    &RULES[field as usize]
}

fn length_violation(field: FieldName, value: &str, min: usize, max: usize) -> Option<String> {
    let chars = value.chars().count();
    if chars < min {
        Some(format!("{field} must be at least {min} characters"))
    } else if chars > max {
        Some(format!("{field} must be at most {max} characters"))
    } else {
        None
    }
}

fn full_name(record: &InvestmentDetails, limits: &SchemaLimits) -> Option<String> {
    if record.full_name.is_empty() {
        return Some("Name is required".to_string());
    }

    length_violation(
        FieldName::FullName,
        &record.full_name,
        limits.full_name_min_chars,
        limits.full_name_max_chars,
    )
}

fn initial_investment(record: &InvestmentDetails, limits: &SchemaLimits) -> Option<String> {
    let amount = record.initial_investment;
    if !amount.is_finite() {
        return Some(format!(
            "{} must be a `number` type",
            FieldName::InitialInvestment
        ));
    }

    if amount < limits.minimum_investment {
        return Some(format!(
            "{} must be greater than or equal to {}",
            FieldName::InitialInvestment,
            limits.minimum_investment
        ));
    }

    None
}

fn investment_risk(record: &InvestmentDetails, _limits: &SchemaLimits) -> Option<String> {
    if record.investment_risk.is_empty() {
        Some(format!(
            "{} field must have at least 1 items",
            FieldName::InvestmentRisk
        ))
    } else {
        None
    }
}

/// Required when High risk is selected; otherwise optional, with the same length bounds
/// whenever a comment is present.
fn comment_about_investment_risk(
    record: &InvestmentDetails,
    limits: &SchemaLimits,
) -> Option<String> {
    let comment = &record.comment_about_investment_risk;

    if comment.is_empty() {
        return if record.has_high_risk() {
            Some(format!(
                "{} is a required field",
                FieldName::CommentAboutInvestmentRisk
            ))
        } else {
            None
        };
    }

    length_violation(
        FieldName::CommentAboutInvestmentRisk,
        comment,
        limits.comment_min_chars,
        limits.comment_max_chars,
    )
}

fn dependents(record: &InvestmentDetails, limits: &SchemaLimits) -> Option<String> {
    if record.dependents < limits.min_dependents {
        Some(format!(
            "{} must be greater than or equal to {}",
            FieldName::Dependents,
            limits.min_dependents
        ))
    } else if record.dependents > limits.max_dependents {
        Some(format!(
            "{} must be less than or equal to {}",
            FieldName::Dependents,
            limits.max_dependents
        ))
    } else {
        None
    }
}

fn accepted_terms(record: &InvestmentDetails, _limits: &SchemaLimits) -> Option<String> {
    if record.accepted_terms_and_conditions {
        None
    } else {
        Some(format!(
            "{} must be one of the following values: true",
            FieldName::AcceptedTermsAndConditions
        ))
    }
}
