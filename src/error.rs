use thiserror::Error;

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("Task '{description}' has no due date to render.")]
    MissingDueDate { description: String },

    #[error("Task '{description}' has a due date '{value}' not in YYYY-MM-DD form.")]
    InvalidDueDate {
        description: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TodoError>;
