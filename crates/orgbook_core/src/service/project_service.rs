//! Project use-case service.

use crate::model::project::{Project, ProjectDraft, ProjectId};
use crate::repo::project_repo::ProjectRepository;
use crate::repo::RepoResult;
use log::info;

pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_project(&self, draft: &ProjectDraft) -> RepoResult<ProjectId> {
        let id = self.repo.create_project(draft)?;
        info!("event=project_create module=service status=ok project_id={id}");
        Ok(id)
    }

    pub fn update_project(&self, id: ProjectId, draft: &ProjectDraft) -> RepoResult<usize> {
        let changed = self.repo.update_project(id, draft)?;
        info!("event=project_update module=service status=ok project_id={id} affected={changed}");
        Ok(changed)
    }

    /// Fails with a foreign-key constraint error while tasks still reference
    /// the project.
    pub fn delete_project(&self, id: ProjectId) -> RepoResult<usize> {
        let changed = self.repo.delete_project(id)?;
        info!("event=project_delete module=service status=ok project_id={id} affected={changed}");
        Ok(changed)
    }

    pub fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        self.repo.get_project(id)
    }

    pub fn list_projects(&self) -> RepoResult<Vec<Project>> {
        self.repo.list_projects()
    }
}
