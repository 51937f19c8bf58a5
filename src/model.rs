use chrono::{DateTime, Local};
use std::fmt;
use std::rc::Rc;

/// A single entry of the to-do list.
#[derive(Debug, Clone)]
pub struct Task {
    pub description: String,
    pub completed: bool,
    created_at: DateTime<Local>,
    pub due_date: Option<String>, // expected as YYYY-MM-DD
    pub tags: Rc<[String]>,
}

/// The state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Completed,
    Pending,
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskState::Completed => write!(f, "Completed"),
            TaskState::Pending => write!(f, "Pending"),
        }
    }
}

impl Task {
    fn new(description: String) -> Task {
        Task {
            description,
            completed: false,
            created_at: Local::now(),
            due_date: None,
            tags: Rc::from(Vec::new()),
        }
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
    }

    pub fn mark_pending(&mut self) {
        self.completed = false;
    }

    /// When the task was built. It never changes afterwards.
    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn state(&self) -> TaskState {
        if self.completed {
            TaskState::Completed
        } else {
            TaskState::Pending
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}, Due: {}",
            self.description,
            self.state(),
            self.due_date.as_deref().unwrap_or("")
        )
    }
}

/// Fluent constructor for tasks. Nothing is validated here; a due date
/// is only checked when the task table is rendered.
#[derive(Debug)]
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    pub fn new(description: impl Into<String>) -> TaskBuilder {
        TaskBuilder {
            task: Task::new(description.into()),
        }
    }

    pub fn set_due_date(mut self, due_date: impl Into<String>) -> TaskBuilder {
        self.task.due_date = Some(due_date.into());
        self
    }

    pub fn set_tags<I, S>(mut self, tags: I) -> TaskBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.task.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}

/// Which subset of the list `view_tasks` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Completed,
    Pending,
}

impl Filter {
    /// Parse a filter name. Only "completed" and "pending" select a
    /// subset; anything else, including no name at all, means every task.
    pub fn from_name(name: Option<&str>) -> Filter {
        match name {
            Some("completed") => Filter::Completed,
            Some("pending") => Filter::Pending,
            None => Filter::All,
            Some(other) => {
                log::debug!("Unknown filter '{}', showing all tasks.", other);
                Filter::All
            }
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Completed => task.completed,
            Filter::Pending => !task.completed,
        }
    }

    /// Title printed above the listing of this subset.
    pub fn heading(self) -> &'static str {
        match self {
            Filter::All => "All tasks:",
            Filter::Completed => "Completed tasks:",
            Filter::Pending => "Pending tasks:",
        }
    }
}
