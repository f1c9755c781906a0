//! JSON envelope spoken between envload and a module process.
//!
//! The host writes one [`Request`] line to the module's stdin and exports the
//! same data as environment variables:
//!
//! | Variable             | Contents                        |
//! |----------------------|---------------------------------|
//! | `ENVLOAD_PROTOCOL`   | protocol version (`1`)          |
//! | `ENVLOAD_MODULE`     | module name                     |
//! | `ENVLOAD_ENTRYPOINT` | function to call                |
//! | `ENVLOAD_ARGS`       | keyword arguments as JSON       |
//!
//! The module answers with a [`Response`] as the last non-empty line on
//! stdout. Anything printed before that line is treated as log output.
//!
//! ```text
//! {"status":"ok","environment":{"max_turns":6}}
//! {"status":"missing_entrypoint"}
//! {"status":"error","kind":"ValueError","message":"unknown split"}
//! ```

use serde::{Deserialize, Serialize};

use super::{ContractError, ModuleError};
use crate::environment::{EnvArgs, Environment};

/// Envelope protocol version.
pub const PROTOCOL_VERSION: u32 = 1;

pub const ENV_PROTOCOL: &str = "ENVLOAD_PROTOCOL";
pub const ENV_MODULE: &str = "ENVLOAD_MODULE";
pub const ENV_ENTRYPOINT: &str = "ENVLOAD_ENTRYPOINT";
pub const ENV_ARGS: &str = "ENVLOAD_ARGS";

/// Call request sent to a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub protocol: u32,
    pub module: String,
    pub entrypoint: String,
    pub args: EnvArgs,
}

impl Request {
    pub fn new(module: &str, entrypoint: &str, args: &EnvArgs) -> Self {
        Self {
            protocol: PROTOCOL_VERSION,
            module: module.to_string(),
            entrypoint: entrypoint.to_string(),
            args: args.clone(),
        }
    }

    /// Environment variables mirroring this request.
    pub fn env_vars(&self) -> Result<Vec<(&'static str, String)>, serde_json::Error> {
        Ok(vec![
            (ENV_PROTOCOL, self.protocol.to_string()),
            (ENV_MODULE, self.module.clone()),
            (ENV_ENTRYPOINT, self.entrypoint.clone()),
            (ENV_ARGS, serde_json::to_string(&self.args)?),
        ])
    }
}

/// A module's answer to a [`Request`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    /// The entry point returned an environment.
    Ok { environment: Environment },

    /// The module has no such entry point.
    MissingEntrypoint,

    /// The entry point raised.
    Error {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
    },
}

impl Response {
    /// Parse a response line.
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line.trim())
    }

    /// Turn the response into the call's outcome.
    pub fn into_result(self, module: &str, entrypoint: &str) -> Result<Environment, ModuleError> {
        match self {
            Self::Ok { environment } => Ok(environment),
            Self::MissingEntrypoint => Err(ContractError {
                module: module.to_string(),
                entrypoint: entrypoint.to_string(),
            }
            .into()),
            Self::Error { message, kind } => Err(ModuleError::Raised {
                module: module.to_string(),
                kind,
                message,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_as_single_line() {
        let mut args = EnvArgs::new();
        args.insert("turns".into(), json!(3));
        let request = Request::new("wordle", "load_environment", &args);

        let line = serde_json::to_string(&request).unwrap();
        assert!(!line.contains('\n'));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&line).unwrap(),
            json!({
                "protocol": 1,
                "module": "wordle",
                "entrypoint": "load_environment",
                "args": {"turns": 3}
            })
        );
    }

    #[test]
    fn request_env_vars_carry_args_as_json() {
        let mut args = EnvArgs::new();
        args.insert("split".into(), json!("test"));
        let request = Request::new("gsm8k", "load_environment", &args);

        let vars = request.env_vars().unwrap();
        assert!(vars.contains(&(ENV_MODULE, "gsm8k".to_string())));
        assert!(vars.contains(&(ENV_PROTOCOL, "1".to_string())));
        assert!(vars.contains(&(ENV_ARGS, r#"{"split":"test"}"#.to_string())));
    }

    #[test]
    fn parses_ok_response() {
        let response =
            Response::parse(r#"{"status":"ok","environment":{"env_id":"x","max_turns":6}}"#)
                .unwrap();
        let env = response.into_result("x", "load_environment").unwrap();
        assert_eq!(env.env_id, "x");
        assert_eq!(env.attribute("max_turns"), Some(&json!(6)));
    }

    #[test]
    fn ok_response_requires_environment() {
        assert!(Response::parse(r#"{"status":"ok"}"#).is_err());
    }

    #[test]
    fn missing_entrypoint_becomes_contract_error() {
        let response = Response::parse(r#"{"status":"missing_entrypoint"}"#).unwrap();
        let err = response.into_result("bare", "load_environment").unwrap_err();
        match err {
            ModuleError::Contract(contract) => assert_eq!(contract.module, "bare"),
            other => panic!("expected contract error, got {:?}", other),
        }
    }

    #[test]
    fn error_response_becomes_raised() {
        let response =
            Response::parse(r#"{"status":"error","kind":"KeyError","message":"'split'"}"#)
                .unwrap();
        let err = response.into_result("m", "load_environment").unwrap_err();
        assert!(matches!(
            err,
            ModuleError::Raised { ref kind, ref message, .. }
                if kind.as_deref() == Some("KeyError") && message == "'split'"
        ));
    }

    #[test]
    fn error_response_kind_is_optional() {
        let response = Response::parse(r#"{"status":"error","message":"boom"}"#).unwrap();
        assert_eq!(
            response,
            Response::Error {
                message: "boom".into(),
                kind: None
            }
        );
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(Response::parse(r#"{"status":"maybe"}"#).is_err());
        assert!(Response::parse("not json").is_err());
    }
}
