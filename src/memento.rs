use chrono::{DateTime, Local};
use std::rc::Rc;

use crate::model::Task;

/// The field values of one task at the moment a snapshot was taken.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Local>,
    pub due_date: Option<String>,
    pub tags: Rc<[String]>, // shared with the live task, not copied
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> TaskRecord {
        TaskRecord {
            description: task.description.clone(),
            completed: task.completed,
            created_at: task.created_at(),
            due_date: task.due_date.clone(),
            tags: Rc::clone(&task.tags),
        }
    }
}

/// An immutable snapshot of the whole task list.
#[derive(Debug)]
pub struct TaskMemento {
    state: Vec<TaskRecord>,
}

impl TaskMemento {
    pub fn new(tasks: &[Task]) -> TaskMemento {
        TaskMemento {
            state: tasks.iter().map(TaskRecord::from).collect(),
        }
    }

    pub fn state(&self) -> &[TaskRecord] {
        &self.state
    }
}
