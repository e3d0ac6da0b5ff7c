//! Category counts for the distribution charts.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::models::view::EmployeeView;
use crate::roster::query::Field;

/// Slices under this share of the total get no percentage label.
const MIN_LABELLED_SHARE: f64 = 3.0;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AggregateError {
    #[error("no data to chart with the current filters")]
    NoData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub label: String,
    pub count: usize,
    pub share: f64,
}

impl ChartSlice {
    pub fn share_label(&self) -> Option<String> {
        if self.share < MIN_LABELLED_SHARE {
            return None;
        }
        Some(format!("{:.1}%", self.share))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub field: Field,
    pub month_mode: bool,
    pub slices: Vec<ChartSlice>,
}

impl Chart {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }
}

/// Groups `records` by `field` (by month name when `month_mode` is set and the
/// field is a date). Records without a category are skipped.
///
/// With `label_order`, only those labels appear, in that order, and labels
/// nobody falls into are dropped. Without it, observed labels are sorted.
pub fn aggregate(
    records: &[EmployeeView],
    field: Field,
    month_mode: bool,
    label_order: Option<&[&str]>,
) -> Result<Chart, AggregateError> {
    let month_mode = month_mode && field.is_date();

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        if let Some(category) = field.category(record, month_mode) {
            *counts.entry(category).or_insert(0) += 1;
        }
    }

    let labelled: Vec<(String, usize)> = match label_order {
        Some(order) => order
            .iter()
            .filter_map(|label| counts.get(*label).map(|count| (label.to_string(), *count)))
            .collect(),
        None => counts.into_iter().collect(),
    };

    if labelled.is_empty() {
        return Err(AggregateError::NoData);
    }

    let total: usize = labelled.iter().map(|(_, count)| count).sum();
    let slices = labelled
        .into_iter()
        .map(|(label, count)| ChartSlice {
            label,
            count,
            share: count as f64 * 100.0 / total as f64,
        })
        .collect();

    Ok(Chart {
        field,
        month_mode,
        slices,
    })
}

pub fn chart(records: &[EmployeeView], field: Field, month_mode: bool) -> Result<Chart, AggregateError> {
    let order = field.label_order(month_mode && field.is_date());
    aggregate(records, field, month_mode, order.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::view::AgeBucket;
    use chrono::NaiveDate;

    fn record(department: &str, age_bucket: Option<AgeBucket>, hire_month: Option<u32>) -> EmployeeView {
        EmployeeView {
            id: Some(1),
            name: "X".to_string(),
            role: String::new(),
            department: department.to_string(),
            unit: String::new(),
            contract_type: String::new(),
            birth_date: None,
            hire_date: hire_month
                .and_then(|m| NaiveDate::from_ymd_opt(2020, m, 1))
                .and_then(|d| d.and_hms_opt(12, 0, 0)),
            age: None,
            tenure_years: None,
            age_bucket,
            tenure_bucket: None,
        }
    }

    fn labels(chart: &Chart) -> Vec<&str> {
        chart.slices.iter().map(|s| s.label.as_str()).collect()
    }

    #[test]
    fn test_alphabetical_without_order() {
        let records = vec![record("WEB", None, None), record("ADM", None, None), record("", None, None), record("WEB", None, None)];

        let chart = aggregate(&records, Field::Department, false, None).unwrap();
        assert_eq!(labels(&chart), vec!["ADM", "WEB"]);
        assert_eq!(chart.slices[1].count, 2);
        assert_eq!(chart.total(), 3);
    }

    #[test]
    fn test_fixed_order_drops_zero_counts() {
        let records = vec![
            record("DEV", Some(AgeBucket::From55), None),
            record("DEV", Some(AgeBucket::UpTo24), None),
            record("DEV", Some(AgeBucket::From55), None),
        ];

        let chart = chart(&records, Field::AgeBucket, false).unwrap();
        assert_eq!(labels(&chart), vec!["Até 24 anos", "55 anos ou mais"]);
        assert_eq!(chart.slices[1].count, 2);
    }

    #[test]
    fn test_order_restricts_to_listed_labels() {
        let records = vec![record("DEV", None, None), record("MKT", None, None)];

        let chart = aggregate(&records, Field::Department, false, Some(&["MKT", "ISM"])).unwrap();
        assert_eq!(labels(&chart), vec!["MKT"]);
    }

    #[test]
    fn test_month_mode_uses_calendar_order() {
        let records = vec![record("DEV", None, Some(12)), record("DEV", None, Some(2)), record("DEV", None, None)];

        let chart = chart(&records, Field::HireDate, true).unwrap();
        assert_eq!(labels(&chart), vec!["Fevereiro", "Dezembro"]);
        assert!(chart.month_mode);
    }

    #[test]
    fn test_no_data() {
        let records = vec![record("", None, None)];
        assert_eq!(aggregate(&records, Field::Department, false, None), Err(AggregateError::NoData));
        assert_eq!(chart(&[], Field::BirthDate, true), Err(AggregateError::NoData));
    }

    #[test]
    fn test_share_label_hides_small_slices() {
        let mut records: Vec<EmployeeView> = (0..40).map(|_| record("DEV", None, None)).collect();
        records.push(record("ISM", None, None));

        let chart = aggregate(&records, Field::Department, false, None).unwrap();
        assert_eq!(chart.slices[0].share_label().as_deref(), Some("97.6%"));
        assert_eq!(chart.slices[1].share_label(), None);
    }
}
