//! Task and assignment use-case service.
//!
//! # Responsibility
//! - Provide dashboard task CRUD and task-to-user assignment entry points.
//! - Convert raw form input into typed drafts before persistence.
//!
//! # Invariants
//! - Out-of-domain priority/status/date input is rejected before any SQL.
//! - Updating or deleting a missing task reports zero affected rows.

use crate::model::assignment::{Assignment, AssignmentId};
use crate::model::project::ProjectId;
use crate::model::task::{Task, TaskDraft, TaskForm, TaskId};
use crate::model::user::UserId;
use crate::repo::assignment_repo::AssignmentRepository;
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoResult;
use log::info;

/// Use-case service over task and assignment repositories.
pub struct TaskService<T: TaskRepository, A: AssignmentRepository> {
    tasks: T,
    assignments: A,
}

impl<T: TaskRepository, A: AssignmentRepository> TaskService<T, A> {
    pub fn new(tasks: T, assignments: A) -> Self {
        Self { tasks, assignments }
    }

    pub fn create_task(&self, draft: &TaskDraft) -> RepoResult<TaskId> {
        let id = self.tasks.create_task(draft)?;
        info!(
            "event=task_create module=service status=ok task_id={id} project_id={} priority={} status={}",
            draft.project_id,
            draft.priority,
            draft.status.as_str()
        );
        Ok(id)
    }

    /// Validates raw form input, then creates the task.
    pub fn create_task_from_form(&self, form: TaskForm) -> RepoResult<TaskId> {
        let draft = TaskDraft::try_from(form)?;
        self.create_task(&draft)
    }

    pub fn update_task(&self, id: TaskId, draft: &TaskDraft) -> RepoResult<usize> {
        let changed = self.tasks.update_task(id, draft)?;
        info!("event=task_update module=service status=ok task_id={id} affected={changed}");
        Ok(changed)
    }

    pub fn update_task_from_form(&self, id: TaskId, form: TaskForm) -> RepoResult<usize> {
        let draft = TaskDraft::try_from(form)?;
        self.update_task(id, &draft)
    }

    /// Deletes one task together with its assignments.
    pub fn delete_task(&self, id: TaskId) -> RepoResult<usize> {
        let changed = self.tasks.delete_task(id)?;
        info!("event=task_delete module=service status=ok task_id={id} affected={changed}");
        Ok(changed)
    }

    pub fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.tasks.get_task(id)
    }

    pub fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        self.tasks.list_tasks()
    }

    pub fn list_tasks_for_project(&self, project_id: ProjectId) -> RepoResult<Vec<Task>> {
        self.tasks.list_tasks_for_project(project_id)
    }

    /// Links a task to a user. Duplicate links are allowed.
    pub fn assign_task(&self, task_id: TaskId, user_id: UserId) -> RepoResult<AssignmentId> {
        let id = self.assignments.create_assignment(task_id, user_id)?;
        info!(
            "event=task_assign module=service status=ok assignment_id={id} task_id={task_id} user_id={user_id}"
        );
        Ok(id)
    }

    pub fn unassign(&self, id: AssignmentId) -> RepoResult<usize> {
        let changed = self.assignments.delete_assignment(id)?;
        info!("event=task_unassign module=service status=ok assignment_id={id} affected={changed}");
        Ok(changed)
    }

    pub fn list_assignments_for_task(&self, task_id: TaskId) -> RepoResult<Vec<Assignment>> {
        self.assignments.list_assignments_for_task(task_id)
    }

    pub fn list_assignments_for_user(&self, user_id: UserId) -> RepoResult<Vec<Assignment>> {
        self.assignments.list_assignments_for_user(user_id)
    }
}
