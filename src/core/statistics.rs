//! Aggregate counts over stored responses
//!
//! Counts are kept in first-appearance order, which is the order the
//! statistics table lists them in.

use crate::types::{Record, SurveyError};
use serde::Serialize;
use std::io::Write;

/// Response counts by region and by occupation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Number of responses
    pub total: usize,
    /// Count per region, first appearance first
    pub by_region: Vec<(String, usize)>,
    /// Count per occupation, first appearance first
    pub by_occupation: Vec<(String, usize)>,
}

fn tally(counts: &mut Vec<(String, usize)>, key: &str) {
    match counts.iter_mut().find(|(k, _)| k == key) {
        Some((_, count)) => *count += 1,
        None => counts.push((key.to_string(), 1)),
    }
}

fn lookup(counts: &[(String, usize)], key: &str) -> usize {
    counts
        .iter()
        .find(|(k, _)| k == key)
        .map_or(0, |(_, count)| *count)
}

impl Statistics {
    /// Tally a dataset
    pub fn from_records(records: &[Record]) -> Self {
        let mut stats = Statistics {
            total: records.len(),
            ..Default::default()
        };

        for record in records {
            tally(&mut stats.by_region, &record.region);
            tally(&mut stats.by_occupation, &record.occupation);
        }

        stats
    }

    /// Responses from `region`
    pub fn region_count(&self, region: &str) -> usize {
        lookup(&self.by_region, region)
    }

    /// Responses with `occupation`
    pub fn occupation_count(&self, occupation: &str) -> usize {
        lookup(&self.by_occupation, occupation)
    }
}

/// One row of the statistics table
#[derive(Debug, Serialize)]
struct StatisticsRow<'a> {
    #[serde(rename = "分類")]
    category: &'a str,
    #[serde(rename = "項目")]
    label: &'a str,
    #[serde(rename = "回覆數")]
    count: usize,
}

/// Write statistics as CSV
///
/// Columns: category, label, count. The total comes first, then one row per
/// region, then one row per occupation.
pub fn write_statistics_csv(stats: &Statistics, output: &mut dyn Write) -> Result<(), SurveyError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.serialize(StatisticsRow {
        category: "總計",
        label: "總回覆數",
        count: stats.total,
    })?;

    for (region, count) in &stats.by_region {
        writer.serialize(StatisticsRow {
            category: "地區",
            label: region,
            count: *count,
        })?;
    }

    for (occupation, count) in &stats.by_occupation {
        writer.serialize(StatisticsRow {
            category: "職業類型",
            label: occupation,
            count: *count,
        })?;
    }

    writer.flush()?;
    Ok(())
}
