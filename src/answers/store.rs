//! Answer store
//!
//! Fixed-field record holding everything a flow collects. Every update
//! returns a fresh store and leaves the receiver untouched, so the owner
//! swaps the whole value in one assignment.

use crate::answers::fields::{FlagField, ListField, TextField};
use crate::classification::Dosha;
use crate::errors::{Result, WisdomError};
use serde::Serialize;
use std::collections::BTreeMap;

/// All fields collected across the steps of a flow
///
/// Only serialized for output. Stores are built through the update methods
/// so the list invariants always hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnswerStore {
    // Consent
    hipaa_consent: bool,
    terms_consent: bool,
    data_consent: bool,

    // Basic info
    first_name: String,
    email: String,
    birth_year: String,
    biological_sex: String,

    // Health background
    current_medications: Vec<String>,
    medication_input: String,
    health_conditions: Vec<String>,
    condition_input: String,
    allergies: Vec<String>,
    allergy_input: String,

    // Constitutional quiz
    quiz_answers: BTreeMap<String, Dosha>,

    // Cultural alignment
    cultural_background: String,
    traditions: Vec<String>,
    dietary_preferences: Vec<String>,

    // Goals
    primary_goals: Vec<String>,
    health_concerns: String,

    // Provider
    has_provider: String,
    provider_email: String,
    share_with_provider: bool,
}

impl AnswerStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text value, empty when unset
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::FirstName => &self.first_name,
            TextField::Email => &self.email,
            TextField::BirthYear => &self.birth_year,
            TextField::BiologicalSex => &self.biological_sex,
            TextField::MedicationInput => &self.medication_input,
            TextField::ConditionInput => &self.condition_input,
            TextField::AllergyInput => &self.allergy_input,
            TextField::CulturalBackground => &self.cultural_background,
            TextField::HealthConcerns => &self.health_concerns,
            TextField::HasProvider => &self.has_provider,
            TextField::ProviderEmail => &self.provider_email,
        }
    }

    /// Current flag value, false when unset
    pub fn flag(&self, field: FlagField) -> bool {
        match field {
            FlagField::HipaaConsent => self.hipaa_consent,
            FlagField::TermsConsent => self.terms_consent,
            FlagField::DataConsent => self.data_consent,
            FlagField::ShareWithProvider => self.share_with_provider,
        }
    }

    /// Current list entries, empty when unset
    pub fn list(&self, field: ListField) -> &[String] {
        match field {
            ListField::CurrentMedications => &self.current_medications,
            ListField::HealthConditions => &self.health_conditions,
            ListField::Allergies => &self.allergies,
            ListField::Traditions => &self.traditions,
            ListField::DietaryPreferences => &self.dietary_preferences,
            ListField::PrimaryGoals => &self.primary_goals,
        }
    }

    /// Quiz answers keyed by question id
    pub fn quiz_answers(&self) -> &BTreeMap<String, Dosha> {
        &self.quiz_answers
    }

    fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::FirstName => &mut self.first_name,
            TextField::Email => &mut self.email,
            TextField::BirthYear => &mut self.birth_year,
            TextField::BiologicalSex => &mut self.biological_sex,
            TextField::MedicationInput => &mut self.medication_input,
            TextField::ConditionInput => &mut self.condition_input,
            TextField::AllergyInput => &mut self.allergy_input,
            TextField::CulturalBackground => &mut self.cultural_background,
            TextField::HealthConcerns => &mut self.health_concerns,
            TextField::HasProvider => &mut self.has_provider,
            TextField::ProviderEmail => &mut self.provider_email,
        }
    }

    fn flag_mut(&mut self, field: FlagField) -> &mut bool {
        match field {
            FlagField::HipaaConsent => &mut self.hipaa_consent,
            FlagField::TermsConsent => &mut self.terms_consent,
            FlagField::DataConsent => &mut self.data_consent,
            FlagField::ShareWithProvider => &mut self.share_with_provider,
        }
    }

    fn list_mut(&mut self, field: ListField) -> &mut Vec<String> {
        match field {
            ListField::CurrentMedications => &mut self.current_medications,
            ListField::HealthConditions => &mut self.health_conditions,
            ListField::Allergies => &mut self.allergies,
            ListField::Traditions => &mut self.traditions,
            ListField::DietaryPreferences => &mut self.dietary_preferences,
            ListField::PrimaryGoals => &mut self.primary_goals,
        }
    }

    /// Replace a text field
    #[must_use]
    pub fn set_text(&self, field: TextField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        *next.text_mut(field) = value.into();
        next
    }

    /// Replace a flag
    #[must_use]
    pub fn set_flag(&self, field: FlagField, value: bool) -> Self {
        let mut next = self.clone();
        *next.flag_mut(field) = value;
        next
    }

    /// Replace a whole list; repeated entries collapse onto the first occurrence
    #[must_use]
    pub fn set_list<I, S>(&self, field: ListField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_list_capped(field, values, None)
    }

    /// Replace a whole list, keeping at most `cap` distinct entries
    #[must_use]
    pub fn set_list_capped<I, S>(&self, field: ListField, values: I, cap: Option<usize>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut next = self.clone();
        let list = next.list_mut(field);
        list.clear();
        for value in values {
            if cap.map_or(false, |cap| list.len() >= cap) {
                break;
            }
            let value = value.into();
            if !list.contains(&value) {
                list.push(value);
            }
        }
        next
    }

    /// Record the answer to one quiz question
    #[must_use]
    pub fn set_quiz_answer(&self, question_id: impl Into<String>, answer: Dosha) -> Self {
        let mut next = self.clone();
        next.quiz_answers.insert(question_id.into(), answer);
        next
    }

    /// Append a trimmed entry to a list and clear the list's scratch field
    ///
    /// Blank input is a no-op. An entry already in the list is not added a
    /// second time, but the scratch field is still cleared.
    #[must_use]
    pub fn append_to_list(&self, field: ListField, value: &str) -> Self {
        self.append_to_list_capped(field, value, None)
    }

    /// Append like [`append_to_list`](Self::append_to_list), refusing a new
    /// entry once the list holds `cap` entries
    ///
    /// A refused entry leaves the store untouched, scratch field included.
    #[must_use]
    pub fn append_to_list_capped(&self, field: ListField, value: &str, cap: Option<usize>) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return self.clone();
        }

        let list = self.list(field);
        let present = list.iter().any(|v| v == trimmed);
        if !present && cap.map_or(false, |cap| list.len() >= cap) {
            return self.clone();
        }

        let mut next = self.clone();
        if !present {
            next.list_mut(field).push(trimmed.to_string());
        }
        if let Some(scratch) = field.scratch() {
            next.text_mut(scratch).clear();
        }
        next
    }

    /// Append whatever is pending in the list's scratch field
    #[must_use]
    pub fn append_from_scratch(&self, field: ListField) -> Self {
        self.append_from_scratch_capped(field, None)
    }

    /// Append the pending scratch entry, subject to `cap`
    #[must_use]
    pub fn append_from_scratch_capped(&self, field: ListField, cap: Option<usize>) -> Self {
        match field.scratch() {
            Some(scratch) => self.append_to_list_capped(field, self.text(scratch), cap),
            None => self.clone(),
        }
    }

    /// Remove the entry at `index`
    pub fn remove_from_list(&self, field: ListField, index: usize) -> Result<Self> {
        let len = self.list(field).len();
        if index >= len {
            return Err(WisdomError::IndexOutOfRange {
                field: field.as_str().to_string(),
                index,
                len,
            });
        }

        let mut next = self.clone();
        next.list_mut(field).remove(index);
        Ok(next)
    }

    /// Select or deselect a multi-choice token
    ///
    /// Deselecting always works. Selecting is refused once the list already
    /// holds `cap` entries.
    #[must_use]
    pub fn toggle_in_list(&self, field: ListField, token: &str, cap: Option<usize>) -> Self {
        let mut next = self.clone();
        let list = next.list_mut(field);
        if let Some(pos) = list.iter().position(|v| v == token) {
            list.remove(pos);
        } else if !cap.map_or(false, |cap| list.len() >= cap) {
            list.push(token.to_string());
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_fields_return_zero_values() {
        let store = AnswerStore::new();
        assert_eq!(store.text(TextField::FirstName), "");
        assert!(!store.flag(FlagField::HipaaConsent));
        assert!(store.list(ListField::Traditions).is_empty());
        assert!(store.quiz_answers().is_empty());
    }

    #[test]
    fn test_set_leaves_original_untouched() {
        let store = AnswerStore::new();
        let next = store.set_text(TextField::Email, "a@b.co");
        assert_eq!(next.text(TextField::Email), "a@b.co");
        assert_eq!(store.text(TextField::Email), "");
        assert_eq!(next.set_text(TextField::Email, "a@b.co"), next);
    }

    #[test]
    fn test_set_other_fields_unchanged() {
        let store = AnswerStore::new()
            .set_text(TextField::FirstName, "Mira")
            .set_flag(FlagField::DataConsent, true);
        let next = store.set_text(TextField::BirthYear, "1990");
        assert_eq!(next.text(TextField::FirstName), "Mira");
        assert!(next.flag(FlagField::DataConsent));
    }

    #[test]
    fn test_append_blank_is_noop() {
        let store = AnswerStore::new().set_text(TextField::AllergyInput, "   ");
        assert_eq!(store.append_to_list(ListField::Allergies, ""), store);
        assert_eq!(store.append_to_list(ListField::Allergies, "   "), store);
        assert_eq!(store.append_from_scratch(ListField::Allergies), store);
    }

    #[test]
    fn test_append_trims_and_clears_scratch() {
        let store = AnswerStore::new().set_text(TextField::MedicationInput, "  Metformin ");
        let next = store.append_from_scratch(ListField::CurrentMedications);
        assert_eq!(next.list(ListField::CurrentMedications), &["Metformin".to_string()]);
        assert_eq!(next.text(TextField::MedicationInput), "");
    }

    #[test]
    fn test_append_does_not_duplicate() {
        let store = AnswerStore::new()
            .append_to_list(ListField::HealthConditions, "asthma")
            .set_text(TextField::ConditionInput, "asthma");
        let next = store.append_from_scratch(ListField::HealthConditions);
        assert_eq!(next.list(ListField::HealthConditions).len(), 1);
        assert_eq!(next.text(TextField::ConditionInput), "");
    }

    #[test]
    fn test_remove_valid_and_invalid_index() {
        let store = AnswerStore::new().set_list(ListField::Allergies, ["pollen", "nuts", "dust"]);
        let next = store.remove_from_list(ListField::Allergies, 1).unwrap();
        assert_eq!(next.list(ListField::Allergies), &["pollen".to_string(), "dust".to_string()]);

        let err = store.remove_from_list(ListField::Allergies, 3).unwrap_err();
        assert!(matches!(err, WisdomError::IndexOutOfRange { index: 3, len: 3, .. }));
    }

    #[test]
    fn test_set_list_deduplicates() {
        let store = AnswerStore::new().set_list(ListField::Traditions, ["tcm", "unani", "tcm"]);
        assert_eq!(store.list(ListField::Traditions), &["tcm".to_string(), "unani".to_string()]);
    }

    #[test]
    fn test_toggle_respects_cap() {
        let mut store = AnswerStore::new();
        for goal in ["stress", "sleep", "energy", "pain"] {
            store = store.toggle_in_list(ListField::PrimaryGoals, goal, Some(3));
        }
        assert_eq!(store.list(ListField::PrimaryGoals).len(), 3);
        assert!(!store.list(ListField::PrimaryGoals).contains(&"pain".to_string()));

        let store = store.toggle_in_list(ListField::PrimaryGoals, "sleep", Some(3));
        assert_eq!(store.list(ListField::PrimaryGoals).len(), 2);

        let store = store.toggle_in_list(ListField::PrimaryGoals, "pain", Some(3));
        assert!(store.list(ListField::PrimaryGoals).contains(&"pain".to_string()));
    }

    #[test]
    fn test_quiz_answer_overwrites() {
        let store = AnswerStore::new()
            .set_quiz_answer("sleep", Dosha::Vata)
            .set_quiz_answer("sleep", Dosha::Kapha);
        assert_eq!(store.quiz_answers().len(), 1);
        assert_eq!(store.quiz_answers().get("sleep"), Some(&Dosha::Kapha));
    }

    #[test]
    fn test_capped_list_growth() {
        let full = AnswerStore::new()
            .set_list(ListField::PrimaryGoals, ["stress", "sleep", "energy"])
            .set_text(TextField::HealthConcerns, "kept");

        assert_eq!(full.append_to_list_capped(ListField::PrimaryGoals, "pain", Some(3)), full);
        // Already present: accepted, nothing grows
        let again = full.append_to_list_capped(ListField::PrimaryGoals, " sleep ", Some(3));
        assert_eq!(again.list(ListField::PrimaryGoals).len(), 3);

        let replaced = full.set_list_capped(
            ListField::PrimaryGoals,
            ["pain", "pain", "focus", "mood", "immunity"],
            Some(3),
        );
        assert_eq!(
            replaced.list(ListField::PrimaryGoals),
            &["pain".to_string(), "focus".to_string(), "mood".to_string()]
        );
    }

    #[test]
    fn test_refused_scratch_append_keeps_input() {
        let store = AnswerStore::new()
            .set_list(ListField::Allergies, ["pollen"])
            .set_text(TextField::AllergyInput, "latex");
        let next = store.append_from_scratch_capped(ListField::Allergies, Some(1));
        assert_eq!(next, store);
        assert_eq!(next.text(TextField::AllergyInput), "latex");
    }
}
