mod common;

use common::{employee_store, hire, set_manager};
use orgbook_core::{
    render_hierarchy, HierarchyEntryKind, HierarchyService, SqliteEmployeeRepository,
    CIRCULAR_REFERENCE_LABEL,
};
use std::collections::HashSet;

#[test]
fn acyclic_tree_visits_each_reachable_employee_once_in_pre_order() {
    let conn = employee_store();
    let ceo = hire(&conn, "Grace", None);
    let cto = hire(&conn, "Linus", Some(ceo));
    let cfo = hire(&conn, "Ada", Some(ceo));
    let dev = hire(&conn, "Ken", Some(cto));
    let ops = hire(&conn, "Dennis", Some(cto));
    let clerk = hire(&conn, "Barbara", Some(cfo));
    let _unrelated = hire(&conn, "Outside", None);

    let service = HierarchyService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());
    let entries = service.resolve_hierarchy(ceo).unwrap();

    let ids = entries
        .iter()
        .map(|entry| entry.employee_id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![cto, dev, ops, cfo, clerk]);
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());
    assert!(entries
        .iter()
        .all(|entry| entry.kind == HierarchyEntryKind::Report));

    assert_eq!(
        render_hierarchy(&entries),
        "Linus\n  Ken\n  Dennis\nAda\n  Barbara"
    );
}

#[test]
fn subtree_root_resolves_only_its_reports() {
    let conn = employee_store();
    let ceo = hire(&conn, "Root", None);
    let mid = hire(&conn, "Mid", Some(ceo));
    let leaf = hire(&conn, "Leaf", Some(mid));

    let service = HierarchyService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());
    let entries = service.resolve_hierarchy(mid).unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].as_pair(), ("Leaf", leaf));
    assert_eq!(entries[0].depth, 0);
    assert!(service.resolve_hierarchy(leaf).unwrap().is_empty());
}

#[test]
fn two_person_cycle_terminates_with_marker() {
    let conn = employee_store();
    let a = hire(&conn, "A", None);
    let b = hire(&conn, "B", Some(a));
    set_manager(&conn, a, Some(b));

    let service = HierarchyService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());
    let entries = service.resolve_hierarchy(a).unwrap();

    let pairs = entries
        .iter()
        .map(|entry| entry.as_pair())
        .collect::<Vec<_>>();
    assert_eq!(
        pairs,
        vec![("B", b), ("  A", a), (CIRCULAR_REFERENCE_LABEL, a)]
    );
    assert_eq!(
        entries
            .iter()
            .filter(|entry| entry.is_circular_reference())
            .count(),
        1
    );
}

#[test]
fn cycle_below_root_is_caught_once() {
    let conn = employee_store();
    let root = hire(&conn, "Root", None);
    let x = hire(&conn, "X", Some(root));
    let y = hire(&conn, "Y", Some(x));
    let z = hire(&conn, "Z", Some(y));
    set_manager(&conn, x, Some(z));

    // Root -> X is gone now (X reports to Z), so enter the loop from Y.
    let service = HierarchyService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());
    assert!(service.resolve_hierarchy(root).unwrap().is_empty());

    let entries = service.resolve_hierarchy(y).unwrap();
    let pairs = entries
        .iter()
        .map(|entry| entry.as_pair())
        .collect::<Vec<_>>();
    assert_eq!(
        pairs,
        vec![
            ("Z", z),
            ("  X", x),
            ("    Y", y),
            (CIRCULAR_REFERENCE_LABEL, y)
        ]
    );
    assert_eq!(entries[3].depth, 3);
}

#[test]
fn unknown_root_yields_no_entries() {
    let conn = employee_store();
    hire(&conn, "Someone", None);

    let service = HierarchyService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());
    assert!(service.resolve_hierarchy(9_999).unwrap().is_empty());
}
