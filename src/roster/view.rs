//! The roster screen's state: the loaded collection plus the active filter
//! and sort. It has a single owner and changes only through these methods.

use chrono::NaiveDateTime;

use crate::models::view::EmployeeView;
use crate::roster::aggregate::{self, AggregateError, Chart};
use crate::roster::query::{self, Field, Filter, Query, SortRule};
use crate::roster::service::RosterService;

pub const LOAD_FAILED_NOTICE: &str = "Could not load the employee data.";

#[derive(Debug, Default)]
pub struct RosterView {
    records: Vec<EmployeeView>,
    query: Query,
    notice: Option<String>,
}

impl RosterView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the collection with a fresh load. A failed load leaves an
    /// empty collection and a notice for the user; it never errors.
    pub fn reload(&mut self, service: &RosterService, now: NaiveDateTime) {
        match service.load_views(now) {
            Ok(records) => {
                self.records = records;
                self.notice = None;
            }
            Err(err) => {
                log::error!("Failed to load employees: {}", err);
                self.records.clear();
                self.notice = Some(LOAD_FAILED_NOTICE.to_string());
            }
        }
    }

    pub fn records(&self) -> &[EmployeeView] {
        &self.records
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn filter(&self) -> &Filter {
        &self.query.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.query.filter = filter;
    }

    pub fn sort_rule(&self) -> Option<&SortRule> {
        self.query.sort.as_ref()
    }

    pub fn set_sort(&mut self, rule: Option<SortRule>) {
        self.query.sort = rule;
    }

    pub fn sort_by(&mut self, field: Field) {
        self.query.sort = Some(SortRule::toggle(self.query.sort.as_ref(), field));
    }

    pub fn clear_filters(&mut self) {
        self.query = Query::default();
    }

    pub fn visible(&self) -> Vec<EmployeeView> {
        self.query.apply(&self.records)
    }

    pub fn chart(&self, field: Field, month_mode: bool) -> Result<Chart, AggregateError> {
        aggregate::chart(&self.visible(), field, month_mode)
    }

    pub fn options(&self, field: Field) -> Vec<String> {
        query::distinct_values(&self.records, field)
    }
}
