use chrono::NaiveDate;
use prettytable::{format, Table};
use std::io::Write;

use crate::error::{Result, TodoError};
use crate::memento::TaskMemento;
use crate::model::{Filter, Task};

const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// How a missing or malformed due date is handled when rendering the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePolicy {
    /// Render an empty cell.
    Lenient,
    /// Fail the render with an error.
    Strict,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub date_policy: DatePolicy,
    /// Descriptions wider than this are wrapped. 0 disables wrapping.
    pub wrap_width: usize,
}

impl Default for RenderOptions {
    fn default() -> RenderOptions {
        RenderOptions {
            date_policy: DatePolicy::Lenient,
            wrap_width: 40,
        }
    }
}

/// Result of an operation that looks a task up by description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    NotFound,
}

/// Owns the task list and the history of snapshots taken after each change.
#[derive(Debug, Default)]
pub struct ToDoListManager {
    tasks: Vec<Task>,
    mementos: Vec<TaskMemento>,
    options: RenderOptions,
}

impl ToDoListManager {
    pub fn new(options: RenderOptions) -> ToDoListManager {
        ToDoListManager {
            tasks: Vec::new(),
            mementos: Vec::new(),
            options,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn history(&self) -> &[TaskMemento] {
        &self.mementos
    }

    /// Append a task, snapshot the list and show every task.
    pub fn add_task(&mut self, task: Task, out: &mut dyn Write) -> Result<()> {
        log::debug!("Adding task '{}'.", task.description);
        self.tasks.push(task);
        self.save_state();
        self.display_tasks(out)
    }

    /// Remove the first task with exactly this description.
    pub fn delete_task(&mut self, description: &str, out: &mut dyn Write) -> Result<Outcome> {
        match self.position_of(description) {
            Some(index) => {
                self.tasks.remove(index);
                log::debug!("Deleted task '{}' at index {}.", description, index);
                self.save_state();
                self.display_tasks(out)?;
                writeln!(out, "Task deleted successfully!")?;
                Ok(Outcome::Done)
            }
            None => {
                report_not_found(description, out)?;
                Ok(Outcome::NotFound)
            }
        }
    }

    /// Mark the first task with exactly this description as completed.
    pub fn mark_completed(&mut self, description: &str, out: &mut dyn Write) -> Result<Outcome> {
        match self.position_of(description) {
            Some(index) => {
                self.tasks[index].mark_completed();
                log::debug!("Completed task '{}'.", description);
                self.save_state();
                self.display_tasks(out)?;
                Ok(Outcome::Done)
            }
            None => {
                report_not_found(description, out)?;
                Ok(Outcome::NotFound)
            }
        }
    }

    /// The tasks selected by `filter`, in list order.
    pub fn view_tasks(&self, filter: Filter) -> Vec<&Task> {
        self.tasks.iter().filter(|task| filter.matches(task)).collect()
    }

    pub fn save_state(&mut self) {
        let memento = TaskMemento::new(&self.tasks);
        log::debug!(
            "Saved snapshot #{} holding {} tasks.",
            self.mementos.len() + 1,
            memento.state().len()
        );
        self.mementos.push(memento);
    }

    pub fn display_tasks(&self, out: &mut dyn Write) -> Result<()> {
        self.display_view(Filter::All, out)
    }

    /// Print the heading of `filter` followed by its tasks, or a notice
    /// if there are none.
    pub fn display_view(&self, filter: Filter, out: &mut dyn Write) -> Result<()> {
        let tasks = self.view_tasks(filter);

        writeln!(out)?;
        writeln!(out, "{}", filter.heading())?;
        if tasks.is_empty() {
            writeln!(out, "No tasks available.")?;
        } else {
            self.display_table(&tasks, out)?;
        }
        Ok(())
    }

    pub fn display_table(&self, tasks: &[&Task], out: &mut dyn Write) -> Result<()> {
        let table = render_table(tasks, &self.options)?;
        write!(out, "{}", table)?;
        Ok(())
    }

    fn position_of(&self, description: &str) -> Option<usize> {
        self.tasks
            .iter()
            .position(|task| task.description == description)
    }
}

fn report_not_found(description: &str, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Task with description '{}' not found.", description)?;
    Ok(())
}

/// Build the Description / Status / Due Date / Tags table for `tasks`.
pub fn render_table(tasks: &[&Task], options: &RenderOptions) -> Result<Table> {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row!["Description", "Status", "Due Date", "Tags"]);

    for task in tasks {
        table.add_row(row![
            wrap(&task.description, options.wrap_width),
            task.state(),
            due_date_cell(task, options.date_policy)?,
            task.tags.join(", ")
        ]);
    }

    Ok(table)
}

fn wrap(text: &str, width: usize) -> String {
    if width == 0 {
        text.to_string()
    } else {
        textwrap::fill(text, width)
    }
}

/// Parse the due date as YYYY-MM-DD and render it back in the same form.
fn due_date_cell(task: &Task, policy: DatePolicy) -> Result<String> {
    let value = match task.due_date.as_deref() {
        Some(value) if !value.trim().is_empty() => value,
        _ => {
            return match policy {
                DatePolicy::Lenient => Ok(String::new()),
                DatePolicy::Strict => Err(TodoError::MissingDueDate {
                    description: task.description.clone(),
                }),
            }
        }
    };

    match NaiveDate::parse_from_str(value, DUE_DATE_FORMAT) {
        Ok(date) => Ok(date.format(DUE_DATE_FORMAT).to_string()),
        Err(source) => match policy {
            DatePolicy::Lenient => {
                log::warn!(
                    "Ignoring due date '{}' of task '{}': {}",
                    value,
                    task.description,
                    source
                );
                Ok(String::new())
            }
            DatePolicy::Strict => Err(TodoError::InvalidDueDate {
                description: task.description.clone(),
                value: value.to_string(),
                source,
            }),
        },
    }
}
