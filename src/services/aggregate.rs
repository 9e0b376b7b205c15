use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::warn;

use crate::models::{CostSource, DailyRecord};

/// One chart-ready point, either a day or a month bucket. `per_source` is
/// keyed by source id; display-name lookup happens at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    /// Stable sort key: the ISO date for daily points, `YYYY-MM` for monthly.
    pub key: String,
    pub label: String,
    pub total_cost: f64,
    pub image_count: u64,
    pub per_source: HashMap<String, f64>,
}

/// One point per record, ascending by date. An entry whose source is no
/// longer configured is left out of `per_source`; consumers treat the missing
/// key as 0.
pub fn build_daily_series(records: &[DailyRecord], sources: &[CostSource]) -> Vec<ChartPoint> {
    let mut sorted: Vec<&DailyRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    sorted
        .into_iter()
        .map(|record| {
            let per_source = record
                .cost_entries
                .iter()
                .filter(|entry| sources.iter().any(|s| s.id == entry.source_id))
                .map(|entry| (entry.source_id.clone(), entry.cost))
                .collect();

            ChartPoint {
                key: record.date.clone(),
                label: format_date_label(&record.date),
                total_cost: record.total_cost,
                image_count: u64::from(record.image_count),
                per_source,
            }
        })
        .collect()
}

/// Month buckets keyed `YYYY-MM`, ascending. Costs summed within a bucket are
/// rounded to two decimal places, half away from zero, to keep floating-point
/// noise out of chart labels.
pub fn build_monthly_series(records: &[DailyRecord], sources: &[CostSource]) -> Vec<ChartPoint> {
    struct Bucket {
        total_cost: f64,
        image_count: u64,
        per_source: HashMap<String, f64>,
    }

    let mut buckets: HashMap<String, Bucket> = HashMap::new();

    for record in records {
        let Some(date) = record.parsed_date() else {
            warn!(date = %record.date, "Skipping record with unparseable date");
            continue;
        };
        let month_key = date.format("%Y-%m").to_string();

        let bucket = buckets.entry(month_key).or_insert_with(|| Bucket {
            total_cost: 0.0,
            image_count: 0,
            per_source: HashMap::new(),
        });

        bucket.total_cost += record.total_cost;
        bucket.image_count += u64::from(record.image_count);
        for entry in &record.cost_entries {
            if sources.iter().any(|s| s.id == entry.source_id) {
                *bucket
                    .per_source
                    .entry(entry.source_id.clone())
                    .or_insert(0.0) += entry.cost;
            }
        }
    }

    let mut points: Vec<ChartPoint> = buckets
        .into_iter()
        .map(|(key, bucket)| ChartPoint {
            label: format_month_label(&key),
            total_cost: round2(bucket.total_cost),
            image_count: bucket.image_count,
            per_source: bucket
                .per_source
                .into_iter()
                .map(|(id, cost)| (id, round2(cost)))
                .collect(),
            key,
        })
        .collect();

    // Lexicographic order on YYYY-MM equals chronological order.
    points.sort_by(|a, b| a.key.cmp(&b.key));
    points
}

/// Cumulative spend across records.
pub fn total_cost(records: &[DailyRecord]) -> f64 {
    records.iter().map(|record| record.total_cost).sum()
}

/// Cumulative generated-image count across records.
pub fn total_images(records: &[DailyRecord]) -> u64 {
    records
        .iter()
        .map(|record| u64::from(record.image_count))
        .sum()
}

/// Round half away from zero to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn format_date_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%b %-d").to_string())
        .unwrap_or_else(|_| date.to_string())
}

fn format_month_label(month_key: &str) -> String {
    NaiveDate::parse_from_str(&format!("{}-01", month_key), "%Y-%m-%d")
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|_| month_key.to_string())
}
