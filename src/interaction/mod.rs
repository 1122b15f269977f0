//! Personal interaction matrix
//!
//! Pairwise grid over a user's active interventions. A pair is flagged when
//! the first word of any interaction keyword on the row appears in the
//! column's name (both lowercased). This is keyword matching over supplied
//! data, not a pharmacological check.

use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tradition an intervention comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tradition {
    Tcm,
    Ayurveda,
    Unani,
    Western,
    Lifestyle,
}

/// Lifecycle of an intervention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterventionStatus {
    Active,
    Completed,
    Paused,
}

/// A practice, herb or medication the user follows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intervention {
    pub id: String,
    pub name: String,
    pub status: InterventionStatus,
    pub tradition: Tradition,
    #[serde(default)]
    pub interactions: Vec<String>,
}

impl Intervention {
    /// Load a JSON array of interventions
    pub fn load_all(path: &Path) -> Result<Vec<Intervention>> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn keywords(&self) -> impl Iterator<Item = String> + '_ {
        self.interactions
            .iter()
            .filter_map(|k| k.split_whitespace().next())
            .map(str::to_lowercase)
    }

    /// Whether any of this intervention's keywords names `other`
    ///
    /// Each keyword contributes its first whitespace-separated word, so a
    /// leading space is ignored and a blank keyword never matches.
    pub fn interacts_with(&self, other: &Intervention) -> bool {
        let name = other.name.to_lowercase();
        self.keywords().any(|k| name.contains(&k))
    }
}

/// One cell of the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixCell {
    /// Diagonal
    SelfPair,
    /// Keyword match
    Potential,
    /// No known interaction
    Clear,
}

/// Square grid over active interventions
#[derive(Debug, Clone, Serialize)]
pub struct InteractionMatrix {
    labels: Vec<String>,
    cells: Vec<Vec<MatrixCell>>,
}

impl InteractionMatrix {
    /// Build the grid from every active intervention in `interventions`
    pub fn build(interventions: &[Intervention]) -> Self {
        let active: Vec<&Intervention> = interventions
            .iter()
            .filter(|i| i.status == InterventionStatus::Active)
            .collect();

        let cells = active
            .iter()
            .enumerate()
            .map(|(r, row)| {
                active
                    .iter()
                    .enumerate()
                    .map(|(c, col)| {
                        if r == c {
                            MatrixCell::SelfPair
                        } else if row.interacts_with(col) {
                            MatrixCell::Potential
                        } else {
                            MatrixCell::Clear
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            labels: active.iter().map(|i| i.name.clone()).collect(),
            cells,
        }
    }

    /// Row/column names in order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Cell at (row, col), `None` outside the grid
    pub fn cell(&self, row: usize, col: usize) -> Option<MatrixCell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Row-major grid
    pub fn rows(&self) -> &[Vec<MatrixCell>] {
        &self.cells
    }

    /// Every flagged (row, col) pair by name
    ///
    /// The relation is directional, so (a, b) may be flagged without (b, a).
    pub fn flagged_pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::new();
        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if *cell == MatrixCell::Potential {
                    pairs.push((self.labels[r].as_str(), self.labels[c].as_str()));
                }
            }
        }
        pairs
    }
}
