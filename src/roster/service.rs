//! Create/update/delete over the whole-document store.
//!
//! Every mutation loads the full collection, changes it in memory and writes
//! it back. Nothing here locks: two overlapping mutations can lose one of the
//! writes, so callers must run them one at a time.

use chrono::NaiveDateTime;
use std::sync::Arc;

use crate::db::{DocumentStore, StoreError};
use crate::errors::ServiceError;
use crate::models::employee::{employees_from_sheet, employees_to_sheet, Employee, EmployeeUpdate, NewEmployee};
use crate::models::view::EmployeeView;
use crate::roster::derivation;
use crate::utils::validation::validate_payload;

#[derive(Clone)]
pub struct RosterService {
    store: Arc<dyn DocumentStore>,
}

struct Loaded {
    sheet_name: String,
    employees: Vec<Employee>,
}

impl RosterService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        RosterService { store }
    }

    fn load(&self) -> Result<Loaded, StoreError> {
        let sheet = self.store.load()?;
        Ok(Loaded {
            employees: employees_from_sheet(&sheet),
            sheet_name: sheet.name,
        })
    }

    /// Loads for update/delete, where a missing document means there is
    /// nothing to change.
    fn load_existing(&self) -> Result<Loaded, ServiceError> {
        match self.load() {
            Ok(loaded) => Ok(loaded),
            Err(StoreError::Missing(path)) => {
                Err(ServiceError::NotFound(format!("Employee file {} not found", path)))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn persist(&self, loaded: &Loaded) -> Result<(), ServiceError> {
        let sheet = employees_to_sheet(&loaded.sheet_name, &loaded.employees);
        self.store.save(&sheet)?;
        Ok(())
    }

    pub fn create(&self, input: NewEmployee) -> Result<Employee, ServiceError> {
        validate_payload(&input)?;

        let mut loaded = match self.load() {
            Ok(loaded) => loaded,
            Err(StoreError::Missing(path)) => {
                log::info!("Employee file {} not found, a new one will be created", path);
                Loaded {
                    sheet_name: self.store.default_sheet_name().to_string(),
                    employees: Vec::new(),
                }
            }
            // An unreadable file is not recreated: that would wipe the roster.
            Err(err) => return Err(err.into()),
        };

        let new_id = next_id(&loaded.employees);
        let employee = Employee::from_new(new_id, &input);
        loaded.employees.push(employee.clone());

        self.persist(&loaded)?;
        log::info!("Created employee {} ({})", new_id, employee.name);

        Ok(employee)
    }

    pub fn update(&self, input: EmployeeUpdate) -> Result<Employee, ServiceError> {
        let id = input
            .id
            .filter(|id| *id > 0)
            .ok_or_else(|| ServiceError::Validation("Employee data or ID missing".to_string()))?;

        let mut loaded = self.load_existing()?;
        let employee = loaded
            .employees
            .iter_mut()
            .find(|employee| employee.id == Some(id))
            .ok_or_else(|| ServiceError::NotFound("Employee not found".to_string()))?;

        employee.apply_update(&input);
        let updated = employee.clone();

        self.persist(&loaded)?;
        log::info!("Updated employee {}", id);

        Ok(updated)
    }

    pub fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let mut loaded = self.load_existing()?;

        let initial_len = loaded.employees.len();
        loaded.employees.retain(|employee| employee.id != Some(id));
        if loaded.employees.len() == initial_len {
            return Err(ServiceError::NotFound("Employee not found for deletion".to_string()));
        }

        self.persist(&loaded)?;
        log::info!("Deleted employee {}", id);

        Ok(())
    }

    /// Stored records, without derived values. A missing document is empty.
    pub fn employees(&self) -> Result<Vec<Employee>, ServiceError> {
        match self.load() {
            Ok(loaded) => Ok(loaded.employees),
            Err(StoreError::Missing(_)) => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn load_views(&self, now: NaiveDateTime) -> Result<Vec<EmployeeView>, ServiceError> {
        Ok(derivation::derive_all(&self.employees()?, now))
    }
}

fn next_id(employees: &[Employee]) -> i64 {
    employees
        .iter()
        .filter_map(|employee| employee.id)
        .fold(0, i64::max)
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Cell, MemoryStore, Sheet};
    use crate::models::catalog::{ContractType, Department, Unit};

    fn new_employee(name: &str) -> NewEmployee {
        NewEmployee {
            name: name.to_string(),
            role: None,
            department: Some(Department::Dev),
            unit: Some(Unit::Cm),
            contract_type: Some(ContractType::Clt),
            birth_date: Some("1990-05-10".to_string()),
            hire_date: "2020-01-15".to_string(),
        }
    }

    fn sheet_with_ids(ids: &[i64]) -> Sheet {
        Sheet {
            name: "Planilha1".to_string(),
            header: vec!["ID".to_string(), "NOME".to_string()],
            rows: ids
                .iter()
                .map(|id| vec![Cell::Number(*id as f64), Cell::Text(format!("E{}", id))])
                .collect(),
        }
    }

    fn setup(store: MemoryStore) -> (RosterService, Arc<MemoryStore>) {
        let store = Arc::new(store);
        (RosterService::new(store.clone()), store)
    }

    #[test]
    fn test_create_into_missing_store_starts_at_one() {
        let (service, store) = setup(MemoryStore::new());

        let employee = service.create(new_employee("Ana")).unwrap();
        assert_eq!(employee.id, Some(1));

        let sheet = store.snapshot().unwrap();
        assert_eq!(sheet.name, "Funcionarios");
        assert_eq!(sheet.rows.len(), 1);
    }

    #[test]
    fn test_create_uses_max_id_plus_one() {
        let (service, store) = setup(MemoryStore::with_sheet(sheet_with_ids(&[3, 7, 2])));

        let employee = service.create(new_employee("Ana")).unwrap();
        assert_eq!(employee.id, Some(8));

        let sheet = store.snapshot().unwrap();
        assert_eq!(sheet.name, "Planilha1");
        assert_eq!(sheet.rows.len(), 4);
    }

    #[test]
    fn test_create_requires_name_and_hire_date() {
        let (service, store) = setup(MemoryStore::new());

        let mut input = new_employee("");
        input.hire_date = String::new();
        assert!(matches!(service.create(input), Err(ServiceError::Validation(_))));
        assert!(store.snapshot().is_none());
    }

    #[test]
    fn test_create_does_not_overwrite_corrupt_store() {
        let (service, store) = setup(MemoryStore::corrupt());

        let result = service.create(new_employee("Ana"));
        assert!(matches!(result, Err(ServiceError::Storage(StoreError::Corrupt { .. }))));
        assert!(store.snapshot().is_none());
    }

    #[test]
    fn test_update_merges_only_supplied_fields() {
        let (service, _store) = setup(MemoryStore::new());
        let created = service.create(new_employee("Ana")).unwrap();

        let updated = service
            .update(EmployeeUpdate {
                id: Some(1),
                department: Some(Department::Mkt),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.department, "MKT");
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.birth_date, created.birth_date);
        assert_eq!(updated.hire_date, created.hire_date);
        assert_eq!(service.employees().unwrap(), vec![updated]);
    }

    #[test]
    fn test_update_is_idempotent() {
        let (service, store) = setup(MemoryStore::new());
        service.create(new_employee("Ana")).unwrap();

        let update = EmployeeUpdate {
            id: Some(1),
            name: Some("Ana Maria".to_string()),
            hire_date: Some("2021-06-01".to_string()),
            ..Default::default()
        };
        service.update(update.clone()).unwrap();
        let first = store.snapshot();
        service.update(update).unwrap();

        assert_eq!(store.snapshot(), first);
    }

    #[test]
    fn test_update_errors() {
        let (service, _store) = setup(MemoryStore::new());
        let missing_store = service.update(EmployeeUpdate {
            id: Some(1),
            ..Default::default()
        });
        assert!(matches!(missing_store, Err(ServiceError::NotFound(_))));

        service.create(new_employee("Ana")).unwrap();
        let unknown = service.update(EmployeeUpdate {
            id: Some(99),
            ..Default::default()
        });
        assert!(matches!(unknown, Err(ServiceError::NotFound(_))));

        let no_id = service.update(EmployeeUpdate::default());
        assert!(matches!(no_id, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn test_delete_unknown_id_leaves_store_untouched() {
        let (service, store) = setup(MemoryStore::with_sheet(sheet_with_ids(&[1, 2])));
        let before = store.snapshot();

        assert!(matches!(service.delete(5), Err(ServiceError::NotFound(_))));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_delete_removes_record() {
        let (service, _store) = setup(MemoryStore::with_sheet(sheet_with_ids(&[1, 2, 3])));

        service.delete(2).unwrap();
        let ids: Vec<_> = service.employees().unwrap().iter().filter_map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_delete_on_missing_store_is_not_found() {
        let (service, _store) = setup(MemoryStore::new());
        assert!(matches!(service.delete(1), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn test_reads_treat_missing_store_as_empty() {
        let (service, _store) = setup(MemoryStore::new());
        assert!(service.employees().unwrap().is_empty());

        let (corrupt, _store) = setup(MemoryStore::corrupt());
        assert!(corrupt.employees().is_err());
    }

    #[test]
    fn test_update_rejects_non_positive_id() {
        let (service, _store) = setup(MemoryStore::new());
        service.create(new_employee("Ana")).unwrap();

        for id in [0, -3] {
            let result = service.update(EmployeeUpdate {
                id: Some(id),
                ..Default::default()
            });
            assert!(matches!(result, Err(ServiceError::Validation(_))));
        }
    }

    #[test]
    fn test_fractional_id_row_is_not_targeted() {
        let sheet = Sheet {
            name: "Funcionarios".to_string(),
            header: vec!["ID".to_string(), "NOME".to_string()],
            rows: vec![
                vec![Cell::Number(1.0), Cell::Text("A".to_string())],
                vec![Cell::Number(1.7), Cell::Text("B".to_string())],
            ],
        };
        let (service, store) = setup(MemoryStore::with_sheet(sheet));

        service.delete(1).unwrap();
        let remaining = store.snapshot().unwrap();
        assert_eq!(remaining.rows.len(), 1);
        assert_eq!(remaining.rows[0][0], Cell::Number(1.7));
        assert_eq!(service.employees().unwrap()[0].name, "B");

        assert_eq!(service.create(new_employee("C")).unwrap().id, Some(1));
    }
}
