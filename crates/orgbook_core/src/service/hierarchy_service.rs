//! Manager/report hierarchy resolution.
//!
//! # Responsibility
//! - Rebuild the report tree below one employee from flat `manager_id` rows.
//! - Detect manager cycles and terminate on them.
//!
//! # Invariants
//! - Output is depth-first pre-order: a manager's line precedes its reports'
//!   lines, and siblings keep repository order.
//! - One visited set spans the whole traversal; an id is expanded at most
//!   once, so the walk ends after at most one expansion per distinct id.
//! - A revisited id yields exactly one `CircularReference` entry for that
//!   branch and nothing below it.
//! - Traversal uses an explicit stack; depth does not grow the call stack.

use crate::model::employee::{Employee, EmployeeId};
use crate::repo::employee_repo::EmployeeRepository;
use crate::repo::RepoError;
use log::debug;
use serde::Serialize;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Label emitted in place of a branch that loops back.
pub const CIRCULAR_REFERENCE_LABEL: &str = "Circular Reference Detected";
/// Indentation unit per depth level.
pub const INDENT: &str = "  ";

/// Whether an entry is a real report line or a cycle marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HierarchyEntryKind {
    Report,
    CircularReference,
}

/// One line of a resolved hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyEntry {
    /// Indented display name, or [`CIRCULAR_REFERENCE_LABEL`] for markers.
    pub label: String,
    pub employee_id: EmployeeId,
    /// Zero for direct reports of the root.
    pub depth: usize,
    pub kind: HierarchyEntryKind,
}

impl HierarchyEntry {
    fn report(employee: &Employee, depth: usize) -> Self {
        Self {
            label: format!("{}{}", INDENT.repeat(depth), employee.name),
            employee_id: employee.id,
            depth,
            kind: HierarchyEntryKind::Report,
        }
    }

    fn circular_reference(employee_id: EmployeeId, depth: usize) -> Self {
        Self {
            label: CIRCULAR_REFERENCE_LABEL.to_string(),
            employee_id,
            depth,
            kind: HierarchyEntryKind::CircularReference,
        }
    }

    /// `(display-name, id)` view of this entry.
    pub fn as_pair(&self) -> (&str, EmployeeId) {
        (self.label.as_str(), self.employee_id)
    }

    pub fn is_circular_reference(&self) -> bool {
        self.kind == HierarchyEntryKind::CircularReference
    }
}

/// Joins entry labels into newline-separated text.
pub fn render_hierarchy(entries: &[HierarchyEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.label.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug)]
pub enum HierarchyError {
    Repo(RepoError),
}

impl Display for HierarchyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for HierarchyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for HierarchyError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

enum Step {
    /// Emit the report line for `Employee` at `depth`.
    Emit(Employee, usize),
    /// Look up reports of the id; their lines go at `depth`.
    Expand(EmployeeId, usize),
}

/// Hierarchy resolver over any employee repository.
pub struct HierarchyService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> HierarchyService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Resolves every employee reachable below `root_id`.
    ///
    /// The root itself is not emitted. An unknown root or a root without
    /// reports yields an empty list.
    pub fn resolve_hierarchy(
        &self,
        root_id: EmployeeId,
    ) -> Result<Vec<HierarchyEntry>, HierarchyError> {
        let started_at = Instant::now();
        let mut visited: HashSet<EmployeeId> = HashSet::new();
        let mut stack = vec![Step::Expand(root_id, 0)];
        let mut entries = Vec::new();
        let mut cycles = 0usize;

        while let Some(step) = stack.pop() {
            match step {
                Step::Emit(employee, depth) => {
                    entries.push(HierarchyEntry::report(&employee, depth));
                }
                Step::Expand(employee_id, depth) => {
                    if !visited.insert(employee_id) {
                        cycles += 1;
                        entries.push(HierarchyEntry::circular_reference(employee_id, depth));
                        continue;
                    }

                    let reports = self.repo.list_direct_reports(employee_id)?;
                    // Reverse push keeps the first sibling on top of the stack.
                    for report in reports.into_iter().rev() {
                        stack.push(Step::Expand(report.id, depth + 1));
                        stack.push(Step::Emit(report, depth));
                    }
                }
            }
        }

        debug!(
            "event=hierarchy_resolve module=service status=ok root_id={} entries={} cycles={} duration_ms={}",
            root_id,
            entries.len(),
            cycles,
            started_at.elapsed().as_millis()
        );
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::{render_hierarchy, HierarchyService, CIRCULAR_REFERENCE_LABEL};
    use crate::model::employee::{Employee, EmployeeDraft, EmployeeId};
    use crate::repo::employee_repo::EmployeeRepository;
    use crate::repo::RepoResult;
    use std::cell::Cell;
    use std::collections::HashMap;

    /// Flat row list standing in for the employees table.
    struct RowsRepo {
        rows: Vec<Employee>,
        by_manager: HashMap<EmployeeId, Vec<Employee>>,
        lookups: Cell<usize>,
    }

    impl RowsRepo {
        fn new(rows: &[(EmployeeId, &str, Option<EmployeeId>)]) -> Self {
            let rows = rows
                .iter()
                .map(|(id, name, manager_id)| Employee {
                    id: *id,
                    name: name.to_string(),
                    department: "Eng".to_string(),
                    position: "Staff".to_string(),
                    manager_id: *manager_id,
                })
                .collect::<Vec<_>>();
            let mut by_manager: HashMap<EmployeeId, Vec<Employee>> = HashMap::new();
            for row in &rows {
                if let Some(manager_id) = row.manager_id {
                    by_manager.entry(manager_id).or_default().push(row.clone());
                }
            }
            Self {
                rows,
                by_manager,
                lookups: Cell::new(0),
            }
        }
    }

    impl EmployeeRepository for RowsRepo {
        fn create_employee(&self, _draft: &EmployeeDraft) -> RepoResult<EmployeeId> {
            Ok(0)
        }

        fn update_employee(&self, _id: EmployeeId, _draft: &EmployeeDraft) -> RepoResult<usize> {
            Ok(0)
        }

        fn delete_employee(&self, _id: EmployeeId) -> RepoResult<usize> {
            Ok(0)
        }

        fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
            Ok(self.rows.iter().find(|row| row.id == id).cloned())
        }

        fn list_employees(&self) -> RepoResult<Vec<Employee>> {
            Ok(self.rows.clone())
        }

        fn list_direct_reports(&self, manager_id: EmployeeId) -> RepoResult<Vec<Employee>> {
            self.lookups.set(self.lookups.get() + 1);
            Ok(self.by_manager.get(&manager_id).cloned().unwrap_or_default())
        }
    }

    fn pairs(service: &HierarchyService<RowsRepo>, root: EmployeeId) -> Vec<(String, EmployeeId)> {
        service
            .resolve_hierarchy(root)
            .unwrap()
            .into_iter()
            .map(|entry| (entry.label, entry.employee_id))
            .collect()
    }

    #[test]
    fn acyclic_tree_is_pre_order_with_two_space_indent() {
        let service = HierarchyService::new(RowsRepo::new(&[
            (1, "Ceo", None),
            (2, "Cto", Some(1)),
            (3, "Cfo", Some(1)),
            (4, "Dev", Some(2)),
            (5, "Intern", Some(4)),
            (6, "Accountant", Some(3)),
        ]));

        assert_eq!(
            pairs(&service, 1),
            vec![
                ("Cto".to_string(), 2),
                ("  Dev".to_string(), 4),
                ("    Intern".to_string(), 5),
                ("Cfo".to_string(), 3),
                ("  Accountant".to_string(), 6),
            ]
        );
    }

    #[test]
    fn mutual_managers_emit_one_marker_and_stop() {
        let service = HierarchyService::new(RowsRepo::new(&[(1, "A", Some(2)), (2, "B", Some(1))]));

        assert_eq!(
            pairs(&service, 1),
            vec![
                ("B".to_string(), 2),
                ("  A".to_string(), 1),
                (CIRCULAR_REFERENCE_LABEL.to_string(), 1),
            ]
        );
    }

    #[test]
    fn self_managed_employee_is_reported_once_then_marked() {
        let service = HierarchyService::new(RowsRepo::new(&[(7, "Loop", Some(7))]));
        let entries = service.resolve_hierarchy(7).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].as_pair(), ("Loop", 7));
        assert!(entries[1].is_circular_reference());
        assert_eq!(entries[1].employee_id, 7);
    }

    #[test]
    fn each_id_is_expanded_at_most_once() {
        let service = HierarchyService::new(RowsRepo::new(&[
            (1, "A", Some(3)),
            (2, "B", Some(1)),
            (3, "C", Some(2)),
            (4, "D", Some(2)),
        ]));
        let entries = service.resolve_hierarchy(1).unwrap();
        let markers = entries
            .iter()
            .filter(|entry| entry.is_circular_reference())
            .count();
        assert_eq!(markers, 1);
        assert!(service.repo.lookups.get() <= 4);
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        let rows = (1..=5_000)
            .map(|id| (id, "E", (id > 1).then(|| id - 1)))
            .collect::<Vec<_>>();
        let service = HierarchyService::new(RowsRepo::new(&rows));

        let entries = service.resolve_hierarchy(1).unwrap();
        assert_eq!(entries.len(), 4_999);
        assert_eq!(entries[0].employee_id, 2);
        assert_eq!(entries[4_998].depth, 4_998);
        assert!(entries.iter().all(|entry| !entry.is_circular_reference()));
    }

    #[test]
    fn entries_serialize_with_snake_case_kind() {
        let service = HierarchyService::new(RowsRepo::new(&[(1, "A", Some(2)), (2, "B", Some(1))]));
        let entries = service.resolve_hierarchy(1).unwrap();

        let value = serde_json::to_value(&entries).unwrap();
        assert_eq!(value[0]["label"], "B");
        assert_eq!(value[0]["employee_id"], 2);
        assert_eq!(value[0]["depth"], 0);
        assert_eq!(value[0]["kind"], "report");
        assert_eq!(value[2]["label"], CIRCULAR_REFERENCE_LABEL);
        assert_eq!(value[2]["kind"], "circular_reference");
    }

    #[test]
    fn unknown_root_yields_empty_output() {
        let service = HierarchyService::new(RowsRepo::new(&[(1, "Solo", None)]));
        let entries = service.resolve_hierarchy(42).unwrap();
        assert!(entries.is_empty());
        assert_eq!(render_hierarchy(&entries), "");
    }
}
