//! Action inputs
//!
//! The runner exposes each `with:` input as an `INPUT_<NAME>` environment
//! variable. Values are trimmed and an empty value counts as not supplied.

use std::collections::HashMap;

/// A source of raw, string-typed action inputs
pub trait InputSource {
    /// Raw value of the input `name`, `None` when unset or blank
    fn get(&self, name: &str) -> Option<String>;
}

/// Environment variable name the runner uses for an input
///
/// ```
/// use gh_actions_runtime::input_env_key;
/// assert_eq!(input_env_key("create_stub"), "INPUT_CREATE_STUB");
/// assert_eq!(input_env_key("my input"), "INPUT_MY_INPUT");
/// ```
pub fn input_env_key(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Inputs read from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvInputs;

impl InputSource for EnvInputs {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(input_env_key(name))
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

impl InputSource for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}
