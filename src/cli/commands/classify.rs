//! Classify command implementation.

use crate::cli::args::ClassifyArgs;
use crate::error::Result;
use crate::ui::Output;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The classify command implementation.
pub struct ClassifyCommand {
    context: CommandContext,
    args: ClassifyArgs,
}

impl ClassifyCommand {
    /// Create a new classify command.
    pub fn new(context: CommandContext, args: ClassifyArgs) -> Self {
        Self { context, args }
    }
}

impl Command for ClassifyCommand {
    fn execute(&self, out: &Output) -> Result<CommandResult> {
        let resolver = self.context.resolver()?;
        out.result(&resolver.classify(&self.args.identifier).to_string());
        Ok(CommandResult::success())
    }
}
