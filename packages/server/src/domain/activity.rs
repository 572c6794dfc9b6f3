//! Activity reports and their impact annotation.

use serde::{Deserialize, Serialize};

use super::{
    emission::EmissionFactorTable,
    entity::UserIdentity,
    error::ValidationError,
    value_object::{ActivityCategory, Timestamp, UserId},
};

const DESCRIPTION_MAX_LEN: usize = 1000;

/// A raw activity report as sent by a client. Nothing is trusted yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityReport {
    pub category: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub description: Option<String>,
}

/// A report that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidActivity {
    pub category: ActivityCategory,
    pub quantity: f64,
    pub unit: String,
    pub description: Option<String>,
}

impl ActivityReport {
    /// Validate the report.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a missing field, an unrecognized
    /// category, a quantity that is not a positive finite number, or an
    /// oversized description.
    pub fn validate(self) -> Result<ValidActivity, ValidationError> {
        let category = self
            .category
            .ok_or(ValidationError::MissingField("category"))?;
        let category = category
            .parse::<ActivityCategory>()
            .map_err(|_| ValidationError::UnknownCategory(category))?;

        let quantity = self
            .quantity
            .ok_or(ValidationError::MissingField("quantity"))?;
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(ValidationError::NonPositiveQuantity(quantity));
        }

        let unit = self
            .unit
            .map(|unit| unit.trim().to_string())
            .filter(|unit| !unit.is_empty())
            .ok_or(ValidationError::MissingField("unit"))?;

        let description = self
            .description
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        if let Some(text) = &description {
            let len = text.chars().count();
            if len > DESCRIPTION_MAX_LEN {
                return Err(ValidationError::DescriptionTooLong {
                    max: DESCRIPTION_MAX_LEN,
                    actual: len,
                });
            }
        }

        Ok(ValidActivity {
            category,
            quantity,
            unit,
            description,
        })
    }
}

/// A validated activity annotated with its computed impact (kg CO2e).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedActivity {
    pub user_id: UserId,
    pub display_name: String,
    pub category: ActivityCategory,
    pub quantity: f64,
    pub unit: String,
    pub impact: f64,
    pub description: Option<String>,
    pub timestamp: Timestamp,
}

impl ValidActivity {
    /// Compute the impact and attach the reporting user.
    pub fn annotate(
        self,
        identity: &UserIdentity,
        factors: &EmissionFactorTable,
        timestamp: Timestamp,
    ) -> EnrichedActivity {
        let impact = factors.impact(self.category, &self.unit, self.quantity);
        EnrichedActivity {
            user_id: identity.id.clone(),
            display_name: identity.display_name.as_str().to_string(),
            category: self.category,
            quantity: self.quantity,
            unit: self.unit,
            impact,
            description: self.description,
            timestamp,
        }
    }
}
