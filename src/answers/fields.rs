//! Closed field sets of the answer store

use serde::{Deserialize, Serialize};

/// Free-text and single-choice fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    FirstName,
    Email,
    BirthYear,
    BiologicalSex,
    MedicationInput,
    ConditionInput,
    AllergyInput,
    CulturalBackground,
    HealthConcerns,
    HasProvider,
    ProviderEmail,
}

/// Boolean checkbox fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagField {
    HipaaConsent,
    TermsConsent,
    DataConsent,
    ShareWithProvider,
}

/// Multi-choice and free-entry list fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListField {
    CurrentMedications,
    HealthConditions,
    Allergies,
    Traditions,
    DietaryPreferences,
    PrimaryGoals,
}

impl TextField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextField::FirstName => "first_name",
            TextField::Email => "email",
            TextField::BirthYear => "birth_year",
            TextField::BiologicalSex => "biological_sex",
            TextField::MedicationInput => "medication_input",
            TextField::ConditionInput => "condition_input",
            TextField::AllergyInput => "allergy_input",
            TextField::CulturalBackground => "cultural_background",
            TextField::HealthConcerns => "health_concerns",
            TextField::HasProvider => "has_provider",
            TextField::ProviderEmail => "provider_email",
        }
    }
}

impl FlagField {
    pub const CONSENTS: [FlagField; 3] = [
        FlagField::HipaaConsent,
        FlagField::TermsConsent,
        FlagField::DataConsent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlagField::HipaaConsent => "hipaa_consent",
            FlagField::TermsConsent => "terms_consent",
            FlagField::DataConsent => "data_consent",
            FlagField::ShareWithProvider => "share_with_provider",
        }
    }
}

impl ListField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListField::CurrentMedications => "current_medications",
            ListField::HealthConditions => "health_conditions",
            ListField::Allergies => "allergies",
            ListField::Traditions => "traditions",
            ListField::DietaryPreferences => "dietary_preferences",
            ListField::PrimaryGoals => "primary_goals",
        }
    }

    /// Text field that holds the pending entry for free-entry lists
    pub fn scratch(&self) -> Option<TextField> {
        match self {
            ListField::CurrentMedications => Some(TextField::MedicationInput),
            ListField::HealthConditions => Some(TextField::ConditionInput),
            ListField::Allergies => Some(TextField::AllergyInput),
            ListField::Traditions | ListField::DietaryPreferences | ListField::PrimaryGoals => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_names_match_as_str() {
        let json = serde_json::to_string(&TextField::HasProvider).unwrap();
        assert_eq!(json, format!("\"{}\"", TextField::HasProvider.as_str()));

        let field: ListField = serde_json::from_str("\"primary_goals\"").unwrap();
        assert_eq!(field, ListField::PrimaryGoals);
    }

    #[test]
    fn test_scratch_fields() {
        assert_eq!(ListField::Allergies.scratch(), Some(TextField::AllergyInput));
        assert_eq!(ListField::Traditions.scratch(), None);
    }
}
