//! Command dispatch: one facade call per action.

use crate::render::{affected, render_many, render_one};
use crate::{
    AssignmentCommand, CliError, Command, EmployeeArgs, EmployeeCommand, Outcome, ProjectArgs,
    ProjectCommand, TaskArgs, TaskCommand, UserCommand,
};
use orgbook_core::{render_hierarchy, EmployeeDraft, OrgBook, ProjectDraft, TaskForm};

pub(crate) fn dispatch(book: &OrgBook, command: Command, json: bool) -> Result<Outcome, CliError> {
    match command {
        Command::Employee { action } => employee(book, action, json),
        Command::User { action } => user(book, action, json),
        Command::Project { action } => project(book, action, json),
        Command::Task { action } => task(book, action, json),
        Command::Assignment { action } => assignment(book, action, json),
    }
}

fn employee(book: &OrgBook, action: EmployeeCommand, json: bool) -> Result<Outcome, CliError> {
    match action {
        EmployeeCommand::Add(fields) => {
            let id = book.add_employee(&employee_draft(fields))?;
            Ok(Outcome::Done(format!("employee {id} added")))
        }
        EmployeeCommand::Update { id, fields } => Ok(affected(
            book.update_employee(id, &employee_draft(fields))?,
            format!("employee {id} updated"),
            format!("employee {id} not found"),
        )),
        EmployeeCommand::Delete { id } => Ok(affected(
            book.delete_employee(id)?,
            format!("employee {id} deleted"),
            format!("employee {id} not found"),
        )),
        EmployeeCommand::Get { id } => {
            render_one(book.get_employee(id)?, json, format!("employee {id} not found"))
        }
        EmployeeCommand::List => render_many(&book.list_employees()?, json),
        EmployeeCommand::Search { field, value } => {
            render_many(&book.search_employees(&field, &value)?, json)
        }
        EmployeeCommand::Hierarchy { root_id } => {
            if book.get_employee(root_id)?.is_none() {
                return Ok(Outcome::Missing(format!("employee {root_id} not found")));
            }
            let entries = book.view_hierarchy(root_id)?;
            if json {
                return Ok(Outcome::Done(serde_json::to_string_pretty(&entries)?));
            }
            Ok(Outcome::Done(render_hierarchy(&entries)))
        }
    }
}

fn user(book: &OrgBook, action: UserCommand, json: bool) -> Result<Outcome, CliError> {
    match action {
        UserCommand::Register {
            username,
            password,
            email,
        } => {
            if book.register(&username, &password, email.as_deref())? {
                Ok(Outcome::Done("registered".to_string()))
            } else {
                Ok(Outcome::Missing("username already taken".to_string()))
            }
        }
        UserCommand::Login { username, password } => render_one(
            book.login(&username, &password)?,
            json,
            "invalid username or password".to_string(),
        ),
    }
}

fn project(book: &OrgBook, action: ProjectCommand, json: bool) -> Result<Outcome, CliError> {
    match action {
        ProjectCommand::Create(fields) => {
            let id = book.create_project(&project_draft(fields))?;
            Ok(Outcome::Done(format!("project {id} created")))
        }
        ProjectCommand::Update { id, fields } => Ok(affected(
            book.update_project(id, &project_draft(fields))?,
            format!("project {id} updated"),
            format!("project {id} not found"),
        )),
        ProjectCommand::Delete { id } => Ok(affected(
            book.delete_project(id)?,
            format!("project {id} deleted"),
            format!("project {id} not found"),
        )),
        ProjectCommand::Get { id } => {
            render_one(book.get_project(id)?, json, format!("project {id} not found"))
        }
        ProjectCommand::List => render_many(&book.list_projects()?, json),
    }
}

fn task(book: &OrgBook, action: TaskCommand, json: bool) -> Result<Outcome, CliError> {
    match action {
        TaskCommand::Create(fields) => {
            let id = book.create_task(task_form(fields))?;
            Ok(Outcome::Done(format!("task {id} created")))
        }
        TaskCommand::Update { id, fields } => Ok(affected(
            book.update_task(id, task_form(fields))?,
            format!("task {id} updated"),
            format!("task {id} not found"),
        )),
        TaskCommand::Delete { id } => Ok(affected(
            book.delete_task(id)?,
            format!("task {id} deleted"),
            format!("task {id} not found"),
        )),
        TaskCommand::Get { id } => {
            render_one(book.get_task(id)?, json, format!("task {id} not found"))
        }
        TaskCommand::List { project } => render_many(&book.list_tasks(project)?, json),
    }
}

fn assignment(
    book: &OrgBook,
    action: AssignmentCommand,
    json: bool,
) -> Result<Outcome, CliError> {
    match action {
        AssignmentCommand::Add { task_id, user_id } => {
            let id = book.assign_task(task_id, user_id)?;
            Ok(Outcome::Done(format!("assignment {id} created")))
        }
        AssignmentCommand::Remove { id } => Ok(affected(
            book.unassign(id)?,
            format!("assignment {id} removed"),
            format!("assignment {id} not found"),
        )),
        AssignmentCommand::List { task, user } => {
            let rows = match (task, user) {
                (Some(task_id), _) => book.list_assignments_for_task(task_id)?,
                (None, Some(user_id)) => book.list_assignments_for_user(user_id)?,
                (None, None) => Vec::new(),
            };
            render_many(&rows, json)
        }
    }
}

fn employee_draft(fields: EmployeeArgs) -> EmployeeDraft {
    EmployeeDraft::new(fields.name, fields.department, fields.position)
        .with_manager(fields.manager)
}

fn project_draft(fields: ProjectArgs) -> ProjectDraft {
    ProjectDraft::new(fields.name, fields.description)
}

fn task_form(fields: TaskArgs) -> TaskForm {
    TaskForm {
        title: fields.title,
        description: fields.description,
        due_date: fields.due,
        priority: fields.priority,
        status: fields.status,
        project_id: fields.project,
    }
}
