//! Packages command implementation.
//!
//! The `envload packages` command lists installed environment packages.

use serde_json::json;

use crate::cli::args::PackagesArgs;
use crate::error::Result;
use crate::package::InstalledPackage;
use crate::ui::Output;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The packages command implementation.
pub struct PackagesCommand {
    context: CommandContext,
    args: PackagesArgs,
}

impl PackagesCommand {
    /// Create a new packages command.
    pub fn new(context: CommandContext, args: PackagesArgs) -> Self {
        Self { context, args }
    }
}

impl Command for PackagesCommand {
    fn execute(&self, out: &Output) -> Result<CommandResult> {
        let installed = self.context.packages()?;
        let packages = installed.list();

        if self.args.json {
            let listing: Vec<_> = packages.iter().map(package_json).collect();
            out.result(&serde_json::to_string_pretty(&listing).map_err(anyhow::Error::from)?);
            return Ok(CommandResult::success());
        }

        if packages.is_empty() {
            out.status("No packages installed.");
            for root in installed.roots() {
                out.status(&format!(
                    "  {}",
                    out.theme().dim.apply_to(format!("searched {}", root.display()))
                ));
            }
            return Ok(CommandResult::success());
        }

        let theme = out.theme();
        for package in &packages {
            match package.description() {
                Some(desc) => out.result(&format!(
                    "  {} {}",
                    theme.highlight.apply_to(&package.name),
                    theme.dim.apply_to(desc)
                )),
                None => out.result(&format!("  {}", theme.highlight.apply_to(&package.name))),
            }
        }

        Ok(CommandResult::success())
    }
}

fn package_json(package: &InstalledPackage) -> serde_json::Value {
    json!({
        "name": package.name,
        "description": package.description(),
        "path": package.root,
        "entrypoint": package.entrypoint_path(),
        "defaults": package.manifest.defaults,
    })
}
