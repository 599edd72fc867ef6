mod common;

use common::{count_rows, employee_store, hire, set_manager};
use orgbook_core::{
    ConstraintKind, EmployeeDraft, EmployeeRepository, EmployeeService, RepoError,
    SqliteEmployeeRepository, ValidationError,
};

#[test]
fn create_and_get_roundtrip() {
    let conn = employee_store();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let boss = repo
        .create_employee(&EmployeeDraft::new("Anna", "Operations", "Director"))
        .unwrap();
    let id = repo
        .create_employee(
            &EmployeeDraft::new("Ivan", "Operations", "Analyst").with_manager(Some(boss)),
        )
        .unwrap();

    let loaded = repo.get_employee(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.name, "Ivan");
    assert_eq!(loaded.department, "Operations");
    assert_eq!(loaded.position, "Analyst");
    assert_eq!(loaded.manager_id, Some(boss));
}

#[test]
fn manager_sentinel_zero_is_stored_as_no_manager() {
    let conn = employee_store();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let mut draft = EmployeeDraft::new("Root", "Board", "Chair");
    draft.manager_id = Some(0);
    let id = repo.create_employee(&draft).unwrap();

    assert_eq!(repo.get_employee(id).unwrap().unwrap().manager_id, None);
}

#[test]
fn update_replaces_fields_and_reports_affected_rows() {
    let conn = employee_store();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();
    let id = hire(&conn, "Bob", None);

    let changed = repo
        .update_employee(id, &EmployeeDraft::new("Robert", "Finance", "Controller"))
        .unwrap();
    assert_eq!(changed, 1);

    let loaded = repo.get_employee(id).unwrap().unwrap();
    assert_eq!(loaded.name, "Robert");
    assert_eq!(loaded.department, "Finance");
}

#[test]
fn update_and_delete_missing_id_affect_zero_rows() {
    let conn = employee_store();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();
    hire(&conn, "Only", None);

    let draft = EmployeeDraft::new("Ghost", "None", "None");
    assert_eq!(repo.update_employee(404, &draft).unwrap(), 0);
    assert_eq!(repo.delete_employee(404).unwrap(), 0);
    assert_eq!(count_rows(&conn, "employees"), 1);
    assert!(repo.get_employee(404).unwrap().is_none());
}

#[test]
fn delete_manager_turns_reports_into_roots() {
    let conn = employee_store();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();
    let manager = hire(&conn, "Manager", None);
    let report = hire(&conn, "Report", Some(manager));

    assert_eq!(repo.delete_employee(manager).unwrap(), 1);

    let orphan = repo.get_employee(report).unwrap().unwrap();
    assert_eq!(orphan.manager_id, None);
    assert!(repo.list_direct_reports(manager).unwrap().is_empty());
}

#[test]
fn manager_must_exist() {
    let conn = employee_store();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let err = repo
        .create_employee(&EmployeeDraft::new("Lost", "Eng", "Dev").with_manager(Some(77)))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Constraint {
            kind: ConstraintKind::ForeignKey,
            ..
        }
    ));
    assert_eq!(count_rows(&conn, "employees"), 0);
}

#[test]
fn blank_fields_are_rejected_before_storage() {
    let conn = employee_store();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let err = repo
        .create_employee(&EmployeeDraft::new("   ", "Eng", "Dev"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::BlankField("name"))
    ));
    assert_eq!(count_rows(&conn, "employees"), 0);
}

#[test]
fn direct_reports_follow_row_order() {
    let conn = employee_store();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();
    let lead = hire(&conn, "Lead", None);
    let zed = hire(&conn, "Zed", Some(lead));
    let amy = hire(&conn, "Amy", Some(lead));
    let outsider = hire(&conn, "Outsider", None);

    let reports = repo
        .list_direct_reports(lead)
        .unwrap()
        .into_iter()
        .map(|employee| employee.id)
        .collect::<Vec<_>>();
    assert_eq!(reports, vec![zed, amy]);

    set_manager(&conn, outsider, Some(lead));
    assert_eq!(repo.list_direct_reports(lead).unwrap().len(), 3);
}

#[test]
fn service_lists_all_employees() {
    let conn = employee_store();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());

    let first = service
        .add_employee(&EmployeeDraft::new("First", "A", "B"))
        .unwrap();
    let second = service
        .add_employee(&EmployeeDraft::new("Second", "A", "B").with_manager(Some(first)))
        .unwrap();

    let all = service.list_employees().unwrap();
    assert_eq!(
        all.iter().map(|employee| employee.id).collect::<Vec<_>>(),
        vec![first, second]
    );
    assert_eq!(service.delete_employee(second).unwrap(), 1);
    assert_eq!(service.list_employees().unwrap().len(), 1);
}
