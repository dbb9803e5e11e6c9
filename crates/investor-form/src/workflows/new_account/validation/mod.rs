mod config;
mod rules;

pub use config::SchemaLimits;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{FieldName, InvestmentDetails};
use rules::{rule_for, RULES};

/// Stateless validator applying the rule table to a record snapshot.
#[derive(Debug, Clone, Default)]
pub struct SchemaValidator {
    limits: SchemaLimits,
}

impl SchemaValidator {
    pub fn new(limits: SchemaLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &SchemaLimits {
        &self.limits
    }

    /// Evaluate every rule against `record`. Never fails; an empty set means the record is
    /// ready to submit.
    pub fn validate(&self, record: &InvestmentDetails) -> ErrorSet {
        RULES
            .iter()
            .filter_map(|rule| {
                rule.evaluate(record, &self.limits)
                    .map(|message| FieldValidationError::new(rule.field, message))
            })
            .collect()
    }

    /// Evaluate the rule for a single field, still against the whole record.
    pub fn validate_field(
        &self,
        record: &InvestmentDetails,
        field: FieldName,
    ) -> Option<FieldValidationError> {
        rule_for(field)
            .evaluate(record, &self.limits)
            .map(|message| FieldValidationError::new(field, message))
    }
}

/// A field that currently violates its rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldValidationError {
    pub field: FieldName,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Field name to message. A missing key means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorSet(BTreeMap<FieldName, String>);

impl ErrorSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.0.contains_key(&field)
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = FieldValidationError> + '_ {
        self.0
            .iter()
            .map(|(field, message)| FieldValidationError::new(*field, message.clone()))
    }
}

impl FromIterator<FieldValidationError> for ErrorSet {
    fn from_iter<I: IntoIterator<Item = FieldValidationError>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|error| (error.field, error.message))
                .collect(),
        )
    }
}
