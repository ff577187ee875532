use std::collections::HashMap;

/// Prefix the actions host puts in front of every declared input variable.
pub const INPUT_PREFIX: &str = "INPUT_";

/// Inputs declared by the action, as supplied by the host.
///
/// The host exports each input as `INPUT_<NAME>` where the name is
/// upper-cased and spaces become underscores. Lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct ActionInputs {
    inputs: HashMap<String, String>,
}

impl ActionInputs {
    /// Create an empty input set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every `INPUT_*` variable from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Collect inputs from an arbitrary variable listing. Variables without
    /// the `INPUT_` prefix are ignored.
    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let inputs = vars
            .into_iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(INPUT_PREFIX)
                    .filter(|name| !name.is_empty())
                    .map(|name| (name.to_string(), value))
            })
            .collect();
        Self { inputs }
    }

    /// Set (or override) an input value.
    pub fn set_input(&mut self, name: &str, value: impl Into<String>) {
        self.inputs.insert(Self::normalize(name), value.into());
    }

    /// Get an input value by name.
    ///
    /// Values are trimmed and an empty value counts as not supplied. If
    /// `required` is true and the input is not supplied, returns an error.
    pub fn get_input(&self, name: &str, required: bool) -> anyhow::Result<Option<String>> {
        let value = self
            .inputs
            .get(&Self::normalize(name))
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        if required && value.is_none() {
            anyhow::bail!("Input required and not supplied: {name}");
        }

        Ok(value)
    }

    fn normalize(name: &str) -> String {
        name.replace(' ', "_").to_uppercase()
    }
}
