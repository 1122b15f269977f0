//! Single input events against the answer store

use crate::answers::fields::{FlagField, ListField, TextField};
use crate::answers::store::AnswerStore;
use crate::classification::{quiz, Dosha};
use crate::errors::{Result, WisdomError};
use serde::{Deserialize, Serialize};

/// One user input, as emitted by a step view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerUpdate {
    SetText { field: TextField, value: String },
    SetFlag { field: FlagField, value: bool },
    SetList { field: ListField, values: Vec<String> },
    SetQuizAnswer { question: String, answer: Dosha },
    Append { field: ListField, value: String },
    AppendFromScratch { field: ListField },
    Remove { field: ListField, index: usize },
    Toggle { field: ListField, token: String },
}

impl AnswerUpdate {
    /// Apply the update, producing the next store
    ///
    /// `cap` bounds how many entries any list-growing update may leave in
    /// the target list. Quiz answers must name a question from the bank.
    pub fn apply(&self, store: &AnswerStore, cap: Option<usize>) -> Result<AnswerStore> {
        let next = match self {
            AnswerUpdate::SetText { field, value } => store.set_text(*field, value.clone()),
            AnswerUpdate::SetFlag { field, value } => store.set_flag(*field, *value),
            AnswerUpdate::SetList { field, values } => {
                store.set_list_capped(*field, values.iter().cloned(), cap)
            }
            AnswerUpdate::SetQuizAnswer { question, answer } => {
                if quiz::question(question).is_none() {
                    return Err(WisdomError::UnknownQuestion(question.clone()));
                }
                store.set_quiz_answer(question.clone(), *answer)
            }
            AnswerUpdate::Append { field, value } => store.append_to_list_capped(*field, value, cap),
            AnswerUpdate::AppendFromScratch { field } => {
                store.append_from_scratch_capped(*field, cap)
            }
            AnswerUpdate::Remove { field, index } => store.remove_from_list(*field, *index)?,
            AnswerUpdate::Toggle { field, token } => store.toggle_in_list(*field, token, cap),
        };
        Ok(next)
    }

    /// Name of the field the update touches
    pub fn field_name(&self) -> &str {
        match self {
            AnswerUpdate::SetText { field, .. } => field.as_str(),
            AnswerUpdate::SetFlag { field, .. } => field.as_str(),
            AnswerUpdate::SetQuizAnswer { .. } => "quiz_answers",
            AnswerUpdate::SetList { field, .. }
            | AnswerUpdate::Append { field, .. }
            | AnswerUpdate::AppendFromScratch { field }
            | AnswerUpdate::Remove { field, .. }
            | AnswerUpdate::Toggle { field, .. } => field.as_str(),
        }
    }

    /// List targeted by the update, if any
    pub fn list_field(&self) -> Option<ListField> {
        match self {
            AnswerUpdate::SetList { field, .. }
            | AnswerUpdate::Append { field, .. }
            | AnswerUpdate::AppendFromScratch { field }
            | AnswerUpdate::Remove { field, .. }
            | AnswerUpdate::Toggle { field, .. } => Some(*field),
            _ => None,
        }
    }
}
