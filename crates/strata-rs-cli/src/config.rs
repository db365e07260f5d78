//! Configuration of the `configure-me` binary.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use strata_rs_config::{
    Availability, ConfigError, Configuration, Content, DataDecoder, Name, OptionDefinition,
    Options, dotted_path,
};

const DEFAULT_CONFIG_DIR: &str = ".configure-me";
const DEFAULT_CONFIG_FILE: &str = "config.json5";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Lowercase,
    Uppercase,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GreeterConfig {
    pub style: Style,
    pub repeat_count: u32,
    pub greeting: String,
    pub is_uppercase: Option<bool>,
}

impl Configuration for GreeterConfig {
    fn configure<D: DataDecoder>(options: &mut Options<'_, D>) -> Result<Self, ConfigError> {
        Ok(Self {
            style: options
                .option("style", Style::Lowercase)
                .summary("Letter case applied to the greeting")
                .resolve()?,
            repeat_count: options
                .option("repeatCount", 10)
                .summary("How many times the greeting is printed")
                .resolve()?,
            greeting: options
                .option("greeting", "Hello, how are you?".to_string())
                .summary("The message to print")
                .resolve()?,
            is_uppercase: options
                .option("isUppercase", None)
                .deprecated("Renamed to 'style'")
                .hidden(true)
                .resolve()?,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.greeting.trim().is_empty() {
            return Err(ConfigError::Invalid("greeting must not be empty".to_string()));
        }
        Ok(())
    }
}

impl GreeterConfig {
    /// The greeting with `style` applied.
    pub fn message(&self) -> String {
        match self.style {
            Style::Lowercase => self.greeting.to_lowercase(),
            Style::Uppercase => self.greeting.to_uppercase(),
        }
    }
}

/// `~/.configure-me/config.json5`, when a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    directories::UserDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(DEFAULT_CONFIG_DIR)
            .join(DEFAULT_CONFIG_FILE)
    })
}

/// One line per option, depth first, hidden options included only when asked.
pub fn describe_definitions(definitions: &[OptionDefinition], include_hidden: bool) -> Vec<String> {
    let mut lines = Vec::new();
    describe_level(definitions, &[], include_hidden, &mut lines);
    lines
}

fn describe_level(
    definitions: &[OptionDefinition],
    path: &[Name],
    include_hidden: bool,
    lines: &mut Vec<String>,
) {
    for definition in definitions {
        if definition.documentation.hidden && !include_hidden {
            continue;
        }
        let mut location = path.to_vec();
        location.push(definition.name.clone());
        let key = dotted_path(&location);
        let mut line = match &definition.content {
            Content::DefaultValue(Value::Null) => key.clone(),
            Content::DefaultValue(value) => format!("{key} (default: {value})"),
            Content::Container(_) => format!("{key}."),
        };
        if !definition.documentation.summary.is_empty() {
            line.push_str(&format!("  {}", definition.documentation.summary));
        }
        if let Availability::Deprecated(message) = &definition.availability {
            line.push_str(&format!("  [deprecated: {message}]"));
        }
        lines.push(line);

        if let Content::Container(children) = &definition.content {
            describe_level(children, &location, include_hidden, lines);
        }
    }
}
