//! Resolve command implementation.
//!
//! The `envload resolve` command loads an environment and prints it.

use serde_json::Value;

use crate::cli::args::ResolveArgs;
use crate::environment::{load_args_file, parse_arg_pair, EnvArgs, Environment};
use crate::error::Result;
use crate::ui::Output;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The resolve command implementation.
pub struct ResolveCommand {
    context: CommandContext,
    args: ResolveArgs,
}

impl ResolveCommand {
    /// Create a new resolve command.
    pub fn new(context: CommandContext, args: ResolveArgs) -> Self {
        Self { context, args }
    }

    /// Collect environment arguments. `-a` pairs override the args file.
    fn env_args(&self) -> Result<EnvArgs> {
        let mut env_args = match &self.args.args_file {
            Some(path) => load_args_file(path)?,
            None => EnvArgs::new(),
        };
        for pair in &self.args.args {
            let (key, value) = parse_arg_pair(pair)?;
            env_args.insert(key, value);
        }
        Ok(env_args)
    }
}

impl Command for ResolveCommand {
    fn execute(&self, out: &Output) -> Result<CommandResult> {
        let env_args = self.env_args()?;
        let resolver = self.context.resolver()?;

        let env = match resolver.resolve(&self.args.identifier, &env_args) {
            Ok(env) => env,
            Err(e) if e.is_not_found() => {
                out.error(&e.to_string());
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        if self.args.json {
            out.result(&serde_json::to_string_pretty(&env).map_err(anyhow::Error::from)?);
        } else {
            for line in summary_lines(&env, out) {
                out.result(&line);
            }
        }
        out.success(&format!("Loaded {}", self.args.identifier));

        Ok(CommandResult::success())
    }
}

fn summary_lines(env: &Environment, out: &Output) -> Vec<String> {
    let theme = out.theme();
    let mut lines = vec![
        theme.format_key_value("id", &theme.highlight.apply_to(&env.env_id).to_string()),
        theme.format_key_value("args", &Value::Object(env.env_args.clone()).to_string()),
    ];
    for (key, value) in &env.attributes {
        lines.push(theme.format_key_value(key, &display_value(value)));
    }
    lines
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{EnvloadTheme, OutputMode};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn command(temp: &TempDir, args: ResolveArgs) -> ResolveCommand {
        ResolveCommand::new(CommandContext::new(temp.path().to_path_buf(), None), args)
    }

    fn resolve_args(identifier: &str) -> ResolveArgs {
        ResolveArgs {
            identifier: identifier.to_string(),
            args: vec![],
            args_file: None,
            json: false,
        }
    }

    #[test]
    fn pairs_override_args_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("args.yml");
        fs::write(&file, "turns: 6\nhard: false\n").unwrap();

        let mut args = resolve_args("wordle");
        args.args_file = Some(file);
        args.args = vec!["hard=true".to_string()];

        let env_args = command(&temp, args).env_args().unwrap();
        assert_eq!(env_args.get("turns"), Some(&json!(6)));
        assert_eq!(env_args.get("hard"), Some(&json!(true)));
    }

    #[test]
    fn malformed_pair_is_an_error() {
        let temp = TempDir::new().unwrap();
        let mut args = resolve_args("wordle");
        args.args = vec!["no-equals".to_string()];
        assert!(command(&temp, args).env_args().is_err());
    }

    #[test]
    fn missing_file_exits_with_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.py");
        let out = Output::with_theme(OutputMode::Quiet, EnvloadTheme::plain());

        let result = command(&temp, resolve_args(missing.to_str().unwrap()))
            .execute(&out)
            .unwrap();
        assert_eq!(result, CommandResult::failure(2));
    }

    #[test]
    fn blank_identifier_is_an_error() {
        let temp = TempDir::new().unwrap();
        let out = Output::with_theme(OutputMode::Quiet, EnvloadTheme::plain());
        assert!(command(&temp, resolve_args("  ")).execute(&out).is_err());
    }

    #[test]
    fn summary_lists_origin_and_attributes() {
        let out = Output::with_theme(OutputMode::Normal, EnvloadTheme::plain());
        let mut env = Environment::new().with_attribute("max_turns", 6);
        let mut args = EnvArgs::new();
        args.insert("hard".into(), json!(true));
        env.record_origin("wordle", &args);

        let lines = summary_lines(&env, &out);
        assert_eq!(lines[0], "  id:        wordle");
        assert_eq!(lines[1], "  args:      {\"hard\":true}");
        assert_eq!(lines[2], "  max_turns: 6");
    }
}
