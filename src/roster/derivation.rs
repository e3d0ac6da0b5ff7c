//! Values computed from a record on every load.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::models::employee::Employee;
use crate::models::view::{AgeBucket, EmployeeView, TenureBucket};
use crate::utils::date_codec;

const MS_PER_YEAR: f64 = 365.25 * 86_400_000.0;

/// Calendar-year difference. A birthday later in the current year is not
/// taken into account, so this can be one year ahead of the exact age.
pub fn compute_age(birth_date: Option<NaiveDate>, today: NaiveDate) -> Option<i32> {
    birth_date.map(|birth| today.year() - birth.year())
}

pub fn compute_tenure_years(hire_date: Option<NaiveDateTime>, now: NaiveDateTime) -> Option<f64> {
    let elapsed = now.signed_duration_since(hire_date?);
    Some(elapsed.num_milliseconds() as f64 / MS_PER_YEAR)
}

pub fn age_bucket(age: Option<i32>) -> Option<AgeBucket> {
    let bucket = match age? {
        a if a <= 24 => AgeBucket::UpTo24,
        a if a <= 34 => AgeBucket::From25To34,
        a if a <= 44 => AgeBucket::From35To44,
        a if a <= 54 => AgeBucket::From45To54,
        _ => AgeBucket::From55,
    };
    Some(bucket)
}

/// Buckets on completed years, so 39.9 years is still "30 a 39 anos".
pub fn tenure_bucket(years: Option<f64>) -> Option<TenureBucket> {
    let years = years.filter(|y| y.is_finite())?.floor();
    let bucket = match years {
        y if y < 1.0 => TenureBucket::UnderOne,
        y if y <= 4.0 => TenureBucket::From1To4,
        y if y <= 9.0 => TenureBucket::From5To9,
        y if y <= 19.0 => TenureBucket::From10To19,
        y if y <= 29.0 => TenureBucket::From20To29,
        y if y <= 39.0 => TenureBucket::From30To39,
        _ => TenureBucket::From40,
    };
    Some(bucket)
}

pub fn derive(employee: &Employee, now: NaiveDateTime) -> EmployeeView {
    let birth_date = employee.birth_date.and_then(date_codec::from_serial);
    let hire_date = employee.hire_date.and_then(date_codec::from_serial);

    let age = compute_age(birth_date.map(|d| d.date()), now.date());
    let tenure_years = compute_tenure_years(hire_date, now);

    EmployeeView {
        id: employee.id,
        name: employee.name.clone(),
        role: employee.role.clone(),
        department: employee.department.clone(),
        unit: employee.unit.clone(),
        contract_type: employee.contract_type.clone(),
        birth_date,
        hire_date,
        age,
        tenure_years,
        age_bucket: age_bucket(age),
        tenure_bucket: tenure_bucket(tenure_years),
    }
}

pub fn derive_all(employees: &[Employee], now: NaiveDateTime) -> Vec<EmployeeView> {
    employees.iter().map(|employee| derive(employee, now)).collect()
}
