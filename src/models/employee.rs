use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::{Cell, Sheet};
use crate::models::catalog::{ContractType, Department, Unit};
use crate::utils::date_codec;
use crate::utils::validation::not_blank;

pub const COL_ID: &str = "ID";
pub const COL_NAME: &str = "NOME";
pub const COL_ROLE: &str = "CARGO";
pub const COL_DEPARTMENT: &str = "SETOR";
pub const COL_UNIT: &str = "Unidade";
pub const COL_CONTRACT: &str = "Tipo de Contrato";
pub const COL_BIRTH_DATE: &str = "Data Nasc.";
pub const COL_HIRE_DATE: &str = "Data Adm.";

/// Column order of a written document. Columns the document already had but
/// this list does not name follow in the order they were first seen.
pub const COLUMNS: [&str; 8] = [
    COL_ID,
    COL_NAME,
    COL_DEPARTMENT,
    COL_UNIT,
    COL_CONTRACT,
    COL_BIRTH_DATE,
    COL_HIRE_DATE,
    COL_ROLE,
];

/// One roster row as persisted. Dates stay as spreadsheet serials here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    /// `None` only for legacy rows written before ids were assigned.
    #[serde(rename = "ID")]
    pub id: Option<i64>,
    #[serde(rename = "NOME")]
    pub name: String,
    #[serde(rename = "CARGO")]
    pub role: String,
    #[serde(rename = "SETOR")]
    pub department: String,
    #[serde(rename = "Unidade")]
    pub unit: String,
    #[serde(rename = "Tipo de Contrato")]
    pub contract_type: String,
    #[serde(rename = "Data Nasc.")]
    pub birth_date: Option<f64>,
    #[serde(rename = "Data Adm.")]
    pub hire_date: Option<f64>,
    /// Cells under headers this model does not know, kept so a rewrite does
    /// not drop them.
    #[serde(skip)]
    pub extra: Vec<(String, Cell)>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NewEmployee {
    #[serde(rename = "NOME", default)]
    #[validate(custom(function = "not_blank", message = "NOME is required"))]
    pub name: String,
    #[serde(rename = "CARGO", default)]
    pub role: Option<String>,
    #[serde(rename = "SETOR", default)]
    pub department: Option<Department>,
    #[serde(rename = "Unidade", default)]
    pub unit: Option<Unit>,
    #[serde(rename = "Tipo de Contrato", default)]
    pub contract_type: Option<ContractType>,
    /// `YYYY-MM-DD`, as the date input sends it.
    #[serde(rename = "Data Nasc.", default)]
    pub birth_date: Option<String>,
    #[serde(rename = "Data Adm.", default)]
    #[validate(custom(function = "not_blank", message = "Data Adm. is required"))]
    pub hire_date: String,
}

/// Partial edit. Absent fields are left alone; a supplied date is re-encoded
/// and an empty date string clears it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmployeeUpdate {
    #[serde(rename = "ID", default)]
    pub id: Option<i64>,
    #[serde(rename = "NOME", default)]
    pub name: Option<String>,
    #[serde(rename = "CARGO", default)]
    pub role: Option<String>,
    #[serde(rename = "SETOR", default)]
    pub department: Option<Department>,
    #[serde(rename = "Unidade", default)]
    pub unit: Option<Unit>,
    #[serde(rename = "Tipo de Contrato", default)]
    pub contract_type: Option<ContractType>,
    #[serde(rename = "Data Nasc.", default)]
    pub birth_date: Option<String>,
    #[serde(rename = "Data Adm.", default)]
    pub hire_date: Option<String>,
}

impl Employee {
    pub fn from_new(id: i64, input: &NewEmployee) -> Self {
        Employee {
            id: Some(id),
            name: input.name.clone(),
            role: input.role.clone().unwrap_or_default(),
            department: input.department.map(|d| d.as_str().to_string()).unwrap_or_default(),
            unit: input.unit.map(|u| u.as_str().to_string()).unwrap_or_default(),
            contract_type: input
                .contract_type
                .map(|c| c.as_str().to_string())
                .unwrap_or_default(),
            birth_date: input.birth_date.as_deref().and_then(date_codec::parse_to_serial),
            hire_date: date_codec::parse_to_serial(&input.hire_date),
            extra: Vec::new(),
        }
    }

    /// Field-by-field merge of a partial edit. The id never changes.
    pub fn apply_update(&mut self, update: &EmployeeUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(role) = &update.role {
            self.role = role.clone();
        }
        if let Some(department) = update.department {
            self.department = department.as_str().to_string();
        }
        if let Some(unit) = update.unit {
            self.unit = unit.as_str().to_string();
        }
        if let Some(contract_type) = update.contract_type {
            self.contract_type = contract_type.as_str().to_string();
        }
        if let Some(birth_date) = &update.birth_date {
            self.birth_date = date_codec::parse_to_serial(birth_date);
        }
        if let Some(hire_date) = &update.hire_date {
            self.hire_date = date_codec::parse_to_serial(hire_date);
        }
    }

    pub fn from_row(header: &[String], row: &[Cell]) -> Option<Self> {
        if row.iter().all(Cell::is_empty) {
            return None;
        }

        let mut employee = Employee {
            id: None,
            name: String::new(),
            role: String::new(),
            department: String::new(),
            unit: String::new(),
            contract_type: String::new(),
            birth_date: None,
            hire_date: None,
            extra: Vec::new(),
        };

        for (title, cell) in header.iter().zip(row.iter()) {
            match title.as_str() {
                COL_ID => {
                    // A fractional id would collide with its truncation.
                    employee.id = cell
                        .as_number()
                        .filter(|n| n.fract() == 0.0 && n.abs() < 1.0e15)
                        .map(|n| n as i64);
                    if employee.id.is_none() && !cell.is_empty() {
                        employee.extra.push((COL_ID.to_string(), cell.clone()));
                    }
                }
                COL_NAME => employee.name = cell.as_text(),
                COL_ROLE => employee.role = cell.as_text(),
                COL_DEPARTMENT => employee.department = cell.as_text(),
                COL_UNIT => employee.unit = cell.as_text(),
                COL_CONTRACT => employee.contract_type = cell.as_text(),
                COL_BIRTH_DATE => employee.birth_date = cell.as_number(),
                COL_HIRE_DATE => employee.hire_date = cell.as_number(),
                "" => {}
                other => employee.extra.push((other.to_string(), cell.clone())),
            }
        }

        Some(employee)
    }

    fn cell(&self, column: &str) -> Cell {
        match column {
            COL_ID => match self.id {
                Some(id) => Cell::Number(id as f64),
                None => self.extra_cell(COL_ID),
            },
            COL_NAME => Cell::from(self.name.as_str()),
            COL_ROLE => Cell::from(self.role.as_str()),
            COL_DEPARTMENT => Cell::from(self.department.as_str()),
            COL_UNIT => Cell::from(self.unit.as_str()),
            COL_CONTRACT => Cell::from(self.contract_type.as_str()),
            COL_BIRTH_DATE => Cell::from(self.birth_date),
            COL_HIRE_DATE => Cell::from(self.hire_date),
            other => self.extra_cell(other),
        }
    }

    fn extra_cell(&self, column: &str) -> Cell {
        self.extra
            .iter()
            .find(|(title, _)| title == column)
            .map(|(_, cell)| cell.clone())
            .unwrap_or(Cell::Empty)
    }
}

pub fn employees_from_sheet(sheet: &Sheet) -> Vec<Employee> {
    sheet
        .rows
        .iter()
        .filter_map(|row| Employee::from_row(&sheet.header, row))
        .collect()
}

pub fn employees_to_sheet(name: &str, employees: &[Employee]) -> Sheet {
    let mut header: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    for employee in employees {
        for (title, _) in &employee.extra {
            if !header.contains(title) {
                header.push(title.clone());
            }
        }
    }

    let rows = employees
        .iter()
        .map(|employee| header.iter().map(|column| employee.cell(column)).collect())
        .collect();

    Sheet {
        name: name.to_string(),
        header,
        rows,
    }
}
