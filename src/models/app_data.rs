use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::models::{CostSource, DailyRecord};

/// The aggregate root: source definitions plus the full record list, with the
/// optional version/timestamp stamps carried by published snapshots.
///
/// Every mutation here is a pure replace-whole-value operation: the input is
/// left untouched and a fresh `AppData` comes back. Callers swap their copy
/// wholesale and hand it to the store for persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub sources: Vec<CostSource>,
    #[serde(default)]
    pub records: Vec<DailyRecord>,
}

impl AppData {
    /// Parse a persisted or fetched JSON document. A missing or non-array
    /// `sources`/`records` field is repaired to an empty list instead of
    /// failing the whole document.
    pub fn from_json(raw: &str) -> AppResult<Self> {
        let mut value: Value = serde_json::from_str(raw)?;

        if let Some(object) = value.as_object_mut() {
            for field in ["sources", "records"] {
                let ok = object.get(field).map(Value::is_array).unwrap_or(false);
                if !ok {
                    object.insert(field.to_string(), json!([]));
                }
            }
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Replace-by-id or append, then re-sort by date descending. The record
    /// is validated and normalized (zero entries pruned, total recomputed)
    /// before it lands in the list.
    pub fn upsert_record(&self, record: DailyRecord) -> AppResult<AppData> {
        record.validate()?;
        let mut record = record;
        record.normalize();

        let mut records = self.records.clone();
        match records.iter().position(|r| r.id == record.id) {
            Some(index) => records[index] = record,
            None => records.push(record),
        }
        // Stable sort keeps insertion order for equal dates.
        records.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(AppData {
            records,
            ..self.clone()
        })
    }

    /// Remove the record with the given id. Not an error if absent.
    pub fn delete_record(&self, id: &str) -> AppData {
        let records = self
            .records
            .iter()
            .filter(|record| record.id != id)
            .cloned()
            .collect();
        AppData {
            records,
            ..self.clone()
        }
    }

    pub fn add_source(&self, source: CostSource) -> AppData {
        let mut sources = self.sources.clone();
        sources.push(source);
        AppData {
            sources,
            ..self.clone()
        }
    }

    /// Remove a source definition and cascade: strip its cost entries from
    /// every record and recompute each record's total from what remains.
    pub fn remove_source(&self, source_id: &str) -> AppData {
        let sources = self
            .sources
            .iter()
            .filter(|source| source.id != source_id)
            .cloned()
            .collect();

        let records = self
            .records
            .iter()
            .map(|record| {
                let mut record = record.clone();
                record
                    .cost_entries
                    .retain(|entry| entry.source_id != source_id);
                record.total_cost = record.cost_entries.iter().map(|entry| entry.cost).sum();
                record
            })
            .collect();

        AppData {
            sources,
            records,
            ..self.clone()
        }
    }

    /// Empty the record list, keeping the source definitions.
    pub fn clear_records(&self) -> AppData {
        AppData {
            records: Vec::new(),
            ..self.clone()
        }
    }
}
