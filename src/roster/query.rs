//! Filtering and sorting of derived records.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::models::catalog::{month_name, ContractType, Department, Unit, MONTHS};
use crate::models::view::{AgeBucket, EmployeeView, TenureBucket};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "ID")]
    Id,
    #[serde(rename = "NOME")]
    Name,
    #[serde(rename = "CARGO")]
    Role,
    #[serde(rename = "SETOR")]
    Department,
    #[serde(rename = "Unidade")]
    Unit,
    #[serde(rename = "Tipo de Contrato")]
    ContractType,
    #[serde(rename = "Data Nasc.")]
    BirthDate,
    #[serde(rename = "Data Adm.")]
    HireDate,
    #[serde(rename = "Idade")]
    Age,
    #[serde(rename = "Tempo de Empresa")]
    Tenure,
    #[serde(rename = "Faixa Etária")]
    AgeBucket,
    #[serde(rename = "Faixa Tempo Empresa")]
    TenureBucket,
}

enum Value<'a> {
    Text(&'a str),
    Number(Option<f64>),
    Date(Option<NaiveDateTime>),
}

impl Field {
    pub fn is_date(&self) -> bool {
        matches!(self, Field::BirthDate | Field::HireDate)
    }

    fn value<'a>(&self, record: &'a EmployeeView) -> Value<'a> {
        match self {
            Field::Id => Value::Number(record.id.map(|id| id as f64)),
            Field::Name => Value::Text(&record.name),
            Field::Role => Value::Text(&record.role),
            Field::Department => Value::Text(&record.department),
            Field::Unit => Value::Text(&record.unit),
            Field::ContractType => Value::Text(&record.contract_type),
            Field::BirthDate => Value::Date(record.birth_date),
            Field::HireDate => Value::Date(record.hire_date),
            Field::Age => Value::Number(record.age.map(f64::from)),
            Field::Tenure => Value::Number(record.tenure_years),
            // Buckets sort by their position, not alphabetically.
            Field::AgeBucket => Value::Number(record.age_bucket.map(|b| b as u8 as f64)),
            Field::TenureBucket => Value::Number(record.tenure_bucket.map(|b| b as u8 as f64)),
        }
    }

    /// Category label used for grouping and option lists. With `month_mode`,
    /// date fields group by month name; other fields ignore the flag.
    pub fn category(&self, record: &EmployeeView, month_mode: bool) -> Option<String> {
        let label = match self {
            Field::AgeBucket => record.age_bucket.map(|b| b.label().to_string()),
            Field::TenureBucket => record.tenure_bucket.map(|b| b.label().to_string()),
            Field::Age => record.age.map(|a| a.to_string()),
            _ => match self.value(record) {
                Value::Text(text) => Some(text.to_string()),
                Value::Number(n) => n.map(|n| n.to_string()),
                Value::Date(date) if month_mode => date.and_then(|d| month_name(d.month())).map(str::to_string),
                Value::Date(date) => date.map(|d| d.date().to_string()),
            },
        };
        label.filter(|l| !l.trim().is_empty())
    }

    pub fn label_order(&self, month_mode: bool) -> Option<Vec<&'static str>> {
        match self {
            Field::BirthDate | Field::HireDate if month_mode => Some(MONTHS.to_vec()),
            Field::ContractType => Some(ContractType::ALL.iter().map(|c| c.as_str()).collect()),
            Field::AgeBucket => Some(AgeBucket::ALL.iter().map(|b| b.label()).collect()),
            Field::TenureBucket => Some(TenureBucket::ALL.iter().map(|b| b.label()).collect()),
            _ => None,
        }
    }
}

pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Missing numbers come first.
pub fn compare_number(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Missing dates count as the earliest instant.
pub fn compare_date(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> Ordering {
    a.cmp(&b)
}

pub fn compare(field: Field, a: &EmployeeView, b: &EmployeeView) -> Ordering {
    match (field.value(a), field.value(b)) {
        (Value::Text(a), Value::Text(b)) => compare_text(a, b),
        (Value::Number(a), Value::Number(b)) => compare_number(a, b),
        (Value::Date(a), Value::Date(b)) => compare_date(a, b),
        // A field always yields the same shape for every record.
        _ => Ordering::Equal,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRule {
    pub field: Field,
    pub direction: Direction,
}

impl SortRule {
    pub fn asc(field: Field) -> Self {
        SortRule { field, direction: Direction::Asc }
    }

    pub fn toggle(current: Option<&SortRule>, field: Field) -> Self {
        let direction = match current {
            Some(rule) if rule.field == field && rule.direction == Direction::Asc => Direction::Desc,
            _ => Direction::Asc,
        };
        SortRule { field, direction }
    }
}

/// Stable: records comparing equal keep their relative order.
pub fn sort(records: &mut [EmployeeView], rule: &SortRule) {
    records.sort_by(|a, b| {
        let ord = compare(rule.field, a, b);
        match rule.direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    });
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub search: Option<String>,
    pub department: Option<Department>,
    pub unit: Option<Unit>,
    pub contract_type: Option<ContractType>,
    pub age_bucket: Option<AgeBucket>,
    pub tenure_bucket: Option<TenureBucket>,
    pub birth_month: Option<u32>,
    pub hire_month: Option<u32>,
}

impl Filter {
    pub fn matches(&self, record: &EmployeeView) -> bool {
        if let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) {
            if !record.name.to_lowercase().contains(&term.to_lowercase()) {
                return false;
            }
        }
        if let Some(department) = self.department {
            if record.department != department.as_str() {
                return false;
            }
        }
        if let Some(unit) = self.unit {
            if record.unit != unit.as_str() {
                return false;
            }
        }
        if let Some(contract_type) = self.contract_type {
            if record.contract_type != contract_type.as_str() {
                return false;
            }
        }
        if self.age_bucket.is_some() && record.age_bucket != self.age_bucket {
            return false;
        }
        if self.tenure_bucket.is_some() && record.tenure_bucket != self.tenure_bucket {
            return false;
        }
        if let Some(month) = self.birth_month {
            if record.birth_date.map(|d| d.month()) != Some(month) {
                return false;
            }
        }
        if let Some(month) = self.hire_month {
            if record.hire_date.map(|d| d.month()) != Some(month) {
                return false;
            }
        }
        true
    }
}

pub fn filter(records: &[EmployeeView], criteria: &Filter) -> Vec<EmployeeView> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

pub fn distinct_values(records: &[EmployeeView], field: Field) -> Vec<String> {
    let values: BTreeSet<String> = records
        .iter()
        .filter_map(|record| field.category(record, false))
        .collect();
    values.into_iter().collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filter: Filter,
    pub sort: Option<SortRule>,
}

impl Query {
    pub fn apply(&self, records: &[EmployeeView]) -> Vec<EmployeeView> {
        let mut result = filter(records, &self.filter);
        if let Some(rule) = &self.sort {
            sort(&mut result, rule);
        }
        result
    }
}
