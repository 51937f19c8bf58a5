use structopt::StructOpt;

use crate::manager::{DatePolicy, RenderOptions};

#[derive(Debug, StructOpt)]
#[structopt(name = "todo", about = "An interactive command-line to-do list.")]
pub struct CommandLineArgs {
    /// Fail when a listed task has no due date, or one not in YYYY-MM-DD
    /// form, instead of leaving the cell blank.
    #[structopt(long)]
    pub strict_dates: bool,

    /// Wrap task descriptions longer than this in the table (0 to disable).
    #[structopt(long, default_value = "40")]
    pub wrap_width: usize,

    /// Do not print the welcome banner.
    #[structopt(short, long)]
    pub quiet: bool,

    /// Log debug messages to stderr.
    #[structopt(short, long)]
    pub verbose: bool,
}

impl CommandLineArgs {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            date_policy: if self.strict_dates {
                DatePolicy::Strict
            } else {
                DatePolicy::Lenient
            },
            wrap_width: self.wrap_width,
        }
    }
}
