use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// One source's share of a day's spend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEntry {
    pub source_id: String,
    pub cost: f64,
}

/// One calendar day's aggregated usage entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub id: String,
    /// Calendar date as `YYYY-MM-DD`, no time component. One record per date
    /// by convention, not enforced.
    pub date: String,
    #[serde(default)]
    pub cost_entries: Vec<CostEntry>,
    #[serde(default)]
    pub image_count: u32,
    /// Derived: always recomputed from `cost_entries` at save time, never
    /// trusted from input.
    #[serde(default)]
    pub total_cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DailyRecord {
    /// Build a record with a fresh id. The stored total is derived, not taken
    /// from the caller.
    pub fn new(
        date: impl Into<String>,
        cost_entries: Vec<CostEntry>,
        image_count: u32,
        notes: Option<String>,
    ) -> Self {
        let mut record = Self {
            id: Uuid::new_v4().to_string(),
            date: date.into(),
            cost_entries,
            image_count,
            total_cost: 0.0,
            notes,
        };
        record.normalize();
        record
    }

    /// Prune non-positive entries and recompute the stored total.
    pub fn normalize(&mut self) {
        self.cost_entries.retain(|entry| entry.cost > 0.0);
        self.total_cost = self.cost_entries.iter().map(|entry| entry.cost).sum();
    }

    /// Entry-time validation: the date must be a real calendar date and every
    /// cost finite and non-negative. Invalid input is rejected here so the
    /// aggregation layer can assume well-formed fields.
    pub fn validate(&self) -> AppResult<()> {
        if self.parsed_date().is_none() {
            return Err(AppError::Validation(format!(
                "Invalid date: {:?}",
                self.date
            )));
        }
        for entry in &self.cost_entries {
            if !entry.cost.is_finite() || entry.cost < 0.0 {
                return Err(AppError::Validation(format!(
                    "Invalid cost {} for source {}",
                    entry.cost, entry.source_id
                )));
            }
        }
        Ok(())
    }

    /// Parsed calendar date, if well-formed.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// This record's cost for one source, if it has an entry for it.
    pub fn cost_for(&self, source_id: &str) -> Option<f64> {
        self.cost_entries
            .iter()
            .find(|entry| entry.source_id == source_id)
            .map(|entry| entry.cost)
    }

    pub fn notes_text(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }
}
