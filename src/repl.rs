use std::io::{BufRead, Write};

use crate::error::Result;
use crate::manager::{Outcome, ToDoListManager};
use crate::model::{Filter, TaskBuilder};

/// A command typed at the interactive prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Show the tasks, optionally only the completed or pending ones.
    Tasks(Option<Filter>),
    Add,
    Completed,
    Delete,
    Exit,
    Invalid,
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let line = line.trim().to_lowercase();
        let mut words = line.split_whitespace();
        let command = match words.next() {
            Some("tasks") => Command::Tasks(words.next().map(|name| Filter::from_name(Some(name)))),
            Some("add") => Command::Add,
            Some("completed") => Command::Completed,
            Some("delete") => Command::Delete,
            Some("exit") => Command::Exit,
            _ => return Command::Invalid,
        };
        if words.next().is_some() {
            return Command::Invalid;
        }
        command
    }
}

pub fn welcome(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Welcome to your to-do list!")?;
    writeln!(out, "To view your tasks, please write \"Tasks\"")?;
    writeln!(out, "  (add \"completed\" or \"pending\" to only see those)")?;
    writeln!(out, "To add a task to your list, please write \"Add\"")?;
    writeln!(out, "To mark a task as completed, please write \"Completed\"")?;
    writeln!(out, "To delete a task, please write \"Delete\"")?;
    writeln!(out, "To exit the app, please write \"Exit\"")?;
    Ok(())
}

/// Read commands from `input` until "exit" or end of input, applying
/// them to `manager` and printing to `out`.
pub fn run<R: BufRead, W: Write>(
    manager: &mut ToDoListManager,
    mut input: R,
    mut out: W,
    banner: bool,
) -> Result<()> {
    if banner {
        welcome(&mut out)?;
    }

    loop {
        let line = match prompt(&mut input, &mut out, "Enter your command: ")? {
            Some(line) => line,
            None => return exit(manager, &mut out),
        };

        match Command::parse(&line) {
            Command::Tasks(filter) => show_tasks(manager, filter, &mut out)?,
            Command::Add => {
                if !add(manager, &mut input, &mut out)? {
                    return exit(manager, &mut out);
                }
            }
            Command::Completed => {
                manager.display_tasks(&mut out)?;
                let description = match prompt(
                    &mut input,
                    &mut out,
                    "Enter task description to mark as completed: ",
                )? {
                    Some(description) => description,
                    None => return exit(manager, &mut out),
                };
                if manager.mark_completed(&description, &mut out)? == Outcome::Done {
                    writeln!(out, "Task marked as completed!")?;
                }
            }
            Command::Delete => {
                let description =
                    match prompt(&mut input, &mut out, "Enter task description to delete: ")? {
                        Some(description) => description,
                        None => return exit(manager, &mut out),
                    };
                manager.delete_task(&description, &mut out)?;
            }
            Command::Exit => return exit(manager, &mut out),
            Command::Invalid => {
                writeln!(
                    out,
                    "Invalid command. Please enter a valid command from the options."
                )?;
            }
        }
    }
}

fn show_tasks(
    manager: &ToDoListManager,
    filter: Option<Filter>,
    out: &mut dyn Write,
) -> Result<()> {
    match filter {
        Some(filter) => manager.display_view(filter, out),
        None if manager.tasks().is_empty() => {
            writeln!(out, "No tasks available.")?;
            Ok(())
        }
        None => manager.display_tasks(out),
    }
}

/// Ask for the fields of a new task and add it. Returns false if the
/// input ended before every field was given.
fn add<R: BufRead>(
    manager: &mut ToDoListManager,
    input: &mut R,
    out: &mut dyn Write,
) -> Result<bool> {
    let description = match prompt(input, out, "Enter task description: ")? {
        Some(description) => description,
        None => return Ok(false),
    };
    let due_date = match prompt(
        input,
        out,
        "Enter due date (optional, leave blank if not applicable): ",
    )? {
        Some(due_date) => due_date,
        None => return Ok(false),
    };
    let tags = match prompt(
        input,
        out,
        "Enter tags (optional, separate with commas if multiple): ",
    )? {
        Some(tags) => tags,
        None => return Ok(false),
    };

    let mut builder = TaskBuilder::new(description).set_tags(split_tags(&tags));
    let due_date = due_date.trim();
    if !due_date.is_empty() {
        builder = builder.set_due_date(due_date);
    }

    manager.add_task(builder.build(), out)?;
    writeln!(out, "Task added successfully!")?;
    Ok(true)
}

fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

fn exit(manager: &ToDoListManager, out: &mut dyn Write) -> Result<()> {
    manager.display_tasks(out)?;
    writeln!(out, "Exiting...")?;
    Ok(())
}

/// Print `message` and read one line, without its line ending. `None`
/// at end of input.
fn prompt<R: BufRead>(input: &mut R, out: &mut dyn Write, message: &str) -> Result<Option<String>> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(None);
    }
    let len = line.trim_end_matches(&['\r', '\n'][..]).len();
    line.truncate(len);
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::{DatePolicy, RenderOptions};
    use crate::error::TodoError;
    use pretty_assertions::assert_eq;

    fn session(manager: &mut ToDoListManager, script: &str) -> String {
        let mut out = Vec::new();
        run(manager, script.as_bytes(), &mut out, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_commands_case_insensitively() {
        assert_eq!(Command::parse("Tasks"), Command::Tasks(None));
        assert_eq!(Command::parse("  ADD \n"), Command::Add);
        assert_eq!(Command::parse("Completed"), Command::Completed);
        assert_eq!(Command::parse("delete"), Command::Delete);
        assert_eq!(Command::parse("EXIT"), Command::Exit);
        assert_eq!(Command::parse("list"), Command::Invalid);
        assert_eq!(Command::parse(""), Command::Invalid);
        assert_eq!(Command::parse("add milk"), Command::Invalid);
    }

    #[test]
    fn parses_task_filters() {
        assert_eq!(
            Command::parse("tasks Completed"),
            Command::Tasks(Some(Filter::Completed))
        );
        assert_eq!(
            Command::parse("tasks pending"),
            Command::Tasks(Some(Filter::Pending))
        );
        assert_eq!(
            Command::parse("tasks whatever"),
            Command::Tasks(Some(Filter::All))
        );
    }

    #[test]
    fn banner_lists_commands() {
        let mut out = Vec::new();
        run(&mut ToDoListManager::default(), "exit\n".as_bytes(), &mut out, true).unwrap();
        let printed = String::from_utf8(out).unwrap();

        assert!(printed.starts_with("Welcome to your to-do list!\n"));
        for command in &["Tasks", "Add", "Completed", "Delete", "Exit"] {
            assert!(printed.contains(&format!("please write \"{}\"", command)));
        }
    }

    #[test]
    fn tasks_on_empty_list() {
        let printed = session(&mut ToDoListManager::default(), "tasks\nexit\n");
        assert!(printed.starts_with("Enter your command: No tasks available.\n"));
        assert!(printed.ends_with("\nAll tasks:\nNo tasks available.\nExiting...\n"));
    }

    #[test]
    fn add_complete_and_delete() {
        let mut manager = ToDoListManager::default();
        let printed = session(
            &mut manager,
            "add\nBuy milk\n2024-01-01\nerrand, home ,\ncompleted\nBuy milk\nexit\n",
        );

        assert!(printed.contains("Task added successfully!"));
        assert!(printed.contains("Task marked as completed!"));
        assert_eq!(manager.tasks().len(), 1);
        let task = &manager.tasks()[0];
        assert_eq!(task.description, "Buy milk");
        assert_eq!(task.due_date.as_deref(), Some("2024-01-01"));
        assert_eq!(&task.tags[..], &["errand".to_string(), "home".to_string()]);
        assert!(task.completed);
        assert_eq!(manager.history().len(), 2);

        let printed = session(&mut manager, "delete\nBuy milk\n");
        assert!(printed.contains("Task deleted successfully!"));
        assert!(manager.tasks().is_empty());
        assert_eq!(manager.history().len(), 3);
    }

    #[test]
    fn blank_due_date_and_tags() {
        let mut manager = ToDoListManager::default();
        session(&mut manager, "add\nSomeday\n   \n\nexit\n");

        let task = &manager.tasks()[0];
        assert_eq!(task.due_date, None);
        assert!(task.tags.is_empty());
    }

    #[test]
    fn completing_unknown_task_reports_not_found() {
        let mut manager = ToDoListManager::default();
        let printed = session(&mut manager, "completed\nnope\nexit\n");

        assert!(printed.contains("Task with description 'nope' not found.\n"));
        assert!(!printed.contains("Task marked as completed!"));
        assert!(manager.history().is_empty());
    }

    #[test]
    fn invalid_command_keeps_looping() {
        let printed = session(&mut ToDoListManager::default(), "undo\ntasks\n");

        assert!(printed
            .contains("Invalid command. Please enter a valid command from the options.\n"));
        assert!(printed.contains("No tasks available."));
        assert!(printed.ends_with("Exiting...\n"));
    }

    #[test]
    fn filtered_listing() {
        let mut manager = ToDoListManager::default();
        let printed = session(
            &mut manager,
            "add\nalpha\n2024-01-01\n\nadd\nbeta\n2024-01-02\n\ncompleted\nalpha\n\
             tasks pending\nexit\n",
        );

        let listing = printed
            .split("Pending tasks:\n")
            .nth(1)
            .and_then(|rest| rest.split("All tasks:").next())
            .unwrap();
        assert!(listing.contains("beta"));
        assert!(!listing.contains("alpha"));
    }

    #[test]
    fn strict_dates_abort_the_session() {
        let mut manager = ToDoListManager::new(RenderOptions {
            date_policy: DatePolicy::Strict,
            ..RenderOptions::default()
        });
        let mut out = Vec::new();

        let result = run(&mut manager, "add\nSomeday\n\n\ntasks\n".as_bytes(), &mut out, false);

        assert!(matches!(result, Err(TodoError::MissingDueDate { .. })));
        assert_eq!(manager.tasks().len(), 1);
    }

    #[test]
    fn split_tags_drops_blanks() {
        assert_eq!(split_tags(" a, ,b,"), vec!["a", "b"]);
        assert!(split_tags("").is_empty());
    }
}
