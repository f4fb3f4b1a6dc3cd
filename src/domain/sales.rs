use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::types::date_only;

/// Sales total for a single day. Days without sales have no entry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SalesByDay {
    #[serde(with = "date_only")]
    pub date: NaiveDate,
    pub total: f64,
}

/// Backend-computed client rankings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopClients {
    pub highest_volume_client: Client,
    pub highest_average_client: Client,
    pub highest_frequency_client: Client,
}

/// Aggregates shown on the dashboard header.
#[derive(Clone, Debug, PartialEq)]
pub struct SalesSummary {
    /// Sum of every daily total.
    pub total: f64,
    /// Mean daily total over the days that had sales; `0.0` without data.
    pub average: f64,
    /// Day with the highest total.
    pub best_day: Option<SalesByDay>,
    /// Number of days that had sales.
    pub active_days: usize,
}

impl SalesSummary {
    pub fn from_days(days: &[SalesByDay]) -> Self {
        let total: f64 = days.iter().map(|day| day.total).sum();
        let average = if days.is_empty() {
            0.0
        } else {
            total / days.len() as f64
        };
        let best_day = days
            .iter()
            .max_by(|a, b| a.total.total_cmp(&b.total))
            .cloned();

        Self {
            total,
            average,
            best_day,
            active_days: days.len(),
        }
    }
}

/// Expands a sparse series into one entry per calendar day.
///
/// The result spans the earliest to the latest date, ascending, with `0.0`
/// for days that had no entry. Entries sharing a date are summed.
pub fn fill_missing_days(days: &[SalesByDay]) -> Vec<SalesByDay> {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for day in days {
        *totals.entry(day.date).or_insert(0.0) += day.total;
    }

    let (Some(first), Some(last)) = (
        totals.keys().next().copied(),
        totals.keys().next_back().copied(),
    ) else {
        return Vec::new();
    };

    first
        .iter_days()
        .take_while(|date| *date <= last)
        .map(|date| SalesByDay {
            date,
            total: totals.get(&date).copied().unwrap_or(0.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32, total: f64) -> SalesByDay {
        SalesByDay {
            date: NaiveDate::from_ymd_opt(2024, 1, d).unwrap(),
            total,
        }
    }

    #[test]
    fn summary_aggregates_days() {
        let days = vec![day(1, 100.0), day(2, 50.0), day(4, 150.0)];

        let summary = SalesSummary::from_days(&days);

        assert_eq!(summary.total, 300.0);
        assert_eq!(summary.average, 100.0);
        assert_eq!(summary.best_day, Some(day(4, 150.0)));
        assert_eq!(summary.active_days, 3);
    }

    #[test]
    fn summary_of_no_days_is_zeroed() {
        let summary = SalesSummary::from_days(&[]);

        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.best_day, None);
        assert_eq!(summary.active_days, 0);
    }

    #[test]
    fn fill_missing_days_inserts_zero_entries_in_order() {
        let days = vec![day(4, 10.0), day(1, 5.0), day(1, 2.5)];

        let filled = fill_missing_days(&days);

        assert_eq!(
            filled,
            vec![day(1, 7.5), day(2, 0.0), day(3, 0.0), day(4, 10.0)]
        );
    }

    #[test]
    fn fill_missing_days_of_empty_series_is_empty() {
        assert!(fill_missing_days(&[]).is_empty());
    }

    #[test]
    fn sales_by_day_reads_datetime_dates() {
        let parsed: SalesByDay =
            serde_json::from_str(r#"{"date":"2024-01-03T00:00:00Z","total":12.5}"#).unwrap();

        assert_eq!(parsed, day(3, 12.5));
    }
}
