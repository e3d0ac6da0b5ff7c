use actix_web::{web, HttpResponse};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use super::AppState;
use crate::errors::AppError;
use crate::models::catalog::{ContractType, Department, Unit};
use crate::models::employee::{Employee, EmployeeUpdate, NewEmployee};
use crate::models::view::{AgeBucket, EmployeeView, TenureBucket};
use crate::roster::query::{Direction, Field, Filter, SortRule};
use crate::roster::RosterView;
use crate::utils::validation::validate_payload;

#[derive(Serialize)]
struct EmployeeResponse {
    message: String,
    employee: Employee,
}

#[derive(Serialize)]
struct EmployeeListResponse {
    employees: Vec<EmployeeView>,
    total: usize,
    /// Set when the roster could not be read; the list is then empty.
    notice: Option<String>,
}

#[derive(Deserialize)]
pub struct DeleteParams {
    id: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct EmployeeQueryParams {
    search: Option<String>,
    department: Option<Department>,
    unit: Option<Unit>,
    contract_type: Option<ContractType>,
    age_bucket: Option<AgeBucket>,
    tenure_bucket: Option<TenureBucket>,
    #[validate(range(min = 1, max = 12))]
    birth_month: Option<u32>,
    #[validate(range(min = 1, max = 12))]
    hire_month: Option<u32>,
    sort: Option<Field>,
    direction: Option<Direction>,
}

impl EmployeeQueryParams {
    fn filter(&self) -> Filter {
        Filter {
            search: self.search.clone(),
            department: self.department,
            unit: self.unit,
            contract_type: self.contract_type,
            age_bucket: self.age_bucket,
            tenure_bucket: self.tenure_bucket,
            birth_month: self.birth_month,
            hire_month: self.hire_month,
        }
    }

    fn sort_rule(&self) -> Option<SortRule> {
        self.sort.map(|field| SortRule {
            field,
            direction: self.direction.unwrap_or(Direction::Asc),
        })
    }
}

#[derive(Deserialize)]
pub struct ChartParams {
    field: Field,
    #[serde(default)]
    month: bool,
}

#[derive(Deserialize)]
pub struct OptionsParams {
    field: Field,
}

async fn load_view(state: &web::Data<AppState>) -> Result<RosterView, AppError> {
    let service = state.roster.clone();
    let view = web::block(move || {
        let mut view = RosterView::new();
        view.reload(&service, Local::now().naive_local());
        view
    })
    .await?;
    Ok(view)
}

pub async fn create_employee(
    state: web::Data<AppState>,
    new_employee: web::Json<NewEmployee>,
) -> Result<HttpResponse, AppError> {
    let new_employee = new_employee.into_inner();

    let _guard = state.writes.lock().await;
    let service = state.roster.clone();
    let employee = web::block(move || service.create(new_employee)).await??;

    Ok(HttpResponse::Ok().json(EmployeeResponse {
        message: "Employee saved successfully".to_string(),
        employee,
    }))
}

pub async fn update_employee(
    state: web::Data<AppState>,
    updates: web::Json<EmployeeUpdate>,
) -> Result<HttpResponse, AppError> {
    let updates = updates.into_inner();

    let _guard = state.writes.lock().await;
    let service = state.roster.clone();
    let employee = web::block(move || service.update(updates)).await??;

    Ok(HttpResponse::Ok().json(EmployeeResponse {
        message: "Employee updated successfully".to_string(),
        employee,
    }))
}

pub async fn delete_employee(
    state: web::Data<AppState>,
    query: web::Query<DeleteParams>,
) -> Result<HttpResponse, AppError> {
    let raw_id = query
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Employee ID not provided".to_string()))?;

    let id: i64 = raw_id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid employee ID: {}", raw_id)))?;

    let _guard = state.writes.lock().await;
    let service = state.roster.clone();
    web::block(move || service.delete(id)).await??;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deleted successfully",
    })))
}

pub async fn get_employees(
    state: web::Data<AppState>,
    query: web::Query<EmployeeQueryParams>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*query)?;

    let mut view = load_view(&state).await?;
    view.set_filter(query.filter());
    view.set_sort(query.sort_rule());

    let employees = view.visible();
    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        total: employees.len(),
        employees,
        notice: view.notice().map(str::to_string),
    }))
}

pub async fn get_employee_chart(
    state: web::Data<AppState>,
    query: web::Query<EmployeeQueryParams>,
    chart: web::Query<ChartParams>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*query)?;

    let mut view = load_view(&state).await?;
    view.set_filter(query.filter());

    let chart = view.chart(chart.field, chart.month)?;
    Ok(HttpResponse::Ok().json(chart))
}

pub async fn get_employee_options(
    state: web::Data<AppState>,
    query: web::Query<OptionsParams>,
) -> Result<HttpResponse, AppError> {
    let view = load_view(&state).await?;
    Ok(HttpResponse::Ok().json(view.options(query.field)))
}
