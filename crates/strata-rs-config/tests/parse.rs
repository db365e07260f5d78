//! End-to-end parsing through the public `Configuration` entry points.

use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use strata_rs_config::{
    ConfigError, Configuration, DataDecoder, IgnoreIssues, Issue, Json5Decoder, OptionOverride,
    Options, YamlDecoder,
};
use tempfile::TempDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Power {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq)]
struct Settings {
    default_power_level: Power,
    preferred_languages: Vec<String>,
    preferred_language: Option<String>,
    show_internal_menu: bool,
    author: Author,
}

#[derive(Debug, Clone, PartialEq)]
struct Author {
    name: String,
    email: String,
}

impl Configuration for Settings {
    fn configure<D: DataDecoder>(options: &mut Options<'_, D>) -> Result<Self, ConfigError> {
        Ok(Self {
            default_power_level: options
                .option("defaultPowerLevel", Power::Medium)
                .summary("The power level used if not otherwise specified.")
                .discussion("Raising the level increases daily consumption.")
                .resolve()?,
            preferred_languages: options
                .option(
                    "preferredLanguages",
                    vec!["en".to_string(), "fr".to_string(), "ar".to_string()],
                )
                .summary("Array of preferred spoken languages")
                .resolve()?,
            preferred_language: options
                .option("preferredLanguage", None)
                .deprecated("Replaced by 'preferredLanguages'")
                .summary("The preferred spoken language")
                .hidden(true)
                .resolve()?,
            show_internal_menu: options.option("showInternalMenu", false).resolve()?,
            author: options
                .nested("author")
                .summary("Details of the author used when creating commits")
                .resolve()?,
        })
    }
}

impl Configuration for Author {
    fn configure<D: DataDecoder>(options: &mut Options<'_, D>) -> Result<Self, ConfigError> {
        Ok(Self {
            name: options
                .option("name", "John Doe".to_string())
                .summary("The full name of the author")
                .resolve()?,
            email: options
                .option("email", "no-reply@example.com".to_string())
                .summary("The email address of the author")
                .resolve()?,
        })
    }
}

fn overrides(raw: &[&str]) -> Vec<OptionOverride> {
    raw.iter()
        .map(|entry| entry.parse().expect("override"))
        .collect()
}

fn rendered(issues: &[Issue]) -> BTreeSet<String> {
    issues.iter().map(ToString::to_string).collect()
}

/// Verify that defaults are used when nothing is supplied.
#[test]
fn default_configuration() {
    let settings = Settings::defaults();
    assert_eq!(settings.default_power_level, Power::Medium);
    assert_eq!(settings.preferred_languages, vec!["en", "fr", "ar"]);
    assert_eq!(settings.preferred_language, None);
    assert!(!settings.show_internal_menu);
    assert_eq!(settings.author.name, "John Doe");
    assert_eq!(settings.author.email, "no-reply@example.com");
}

/// Verify that document values are decoded, with defaults for missing keys.
#[test]
fn decodes_document() {
    let data = br#"{
        "defaultPowerLevel": "high",
        "preferredLanguages": ["es", "fr"],
        "preferredLanguage": "es",
        "showInternalMenu": true,
        "author": { "name": "Liam Nichols" }
    }"#;

    let settings = Settings::parse(data, &[], &mut IgnoreIssues).expect("parse");
    assert_eq!(settings.default_power_level, Power::High);
    assert_eq!(settings.preferred_languages, vec!["es", "fr"]);
    assert_eq!(settings.preferred_language.as_deref(), Some("es"));
    assert!(settings.show_internal_menu);
    assert_eq!(settings.author.name, "Liam Nichols");
    assert_eq!(settings.author.email, "no-reply@example.com");
}

/// Report unexpected and deprecated keys at every level.
#[test]
fn detects_issues_at_every_level() {
    let data = br#"{
        "defaultPowerlevel": "low",
        "preferredLanguage": "es",
        "author": { "isActive": true }
    }"#;

    let mut issues = Vec::new();
    Settings::parse(data, &[], &mut |issue: Issue| issues.push(issue)).expect("parse");

    assert_eq!(
        rendered(&issues),
        BTreeSet::from([
            "Found unexpected property 'defaultPowerlevel' while decoding.".to_string(),
            "Property 'preferredLanguage' is deprecated. Replaced by 'preferredLanguages'"
                .to_string(),
            "Found unexpected property 'isActive' (in 'author') while decoding.".to_string(),
        ])
    );
}

/// Ensure overrides win over the document and unknown overrides are reported.
#[test]
fn applies_overrides() {
    let data = br#"{ "defaultPowerLevel": "low", "author": { "name": "In the file" } }"#;
    let overrides = overrides(&[
        r#"defaultPowerLevel="high""#,
        r#"author.name="Foo""#,
        r#"preferredLanguages=["en"]"#,
        "unknownProperty=false",
    ]);

    let mut issues = Vec::new();
    let settings =
        Settings::parse(data, &overrides, &mut |issue: Issue| issues.push(issue)).expect("parse");

    assert_eq!(settings.default_power_level, Power::High);
    assert_eq!(settings.author.name, "Foo");
    assert_eq!(settings.preferred_languages, vec!["en"]);
    assert_eq!(
        rendered(&issues),
        BTreeSet::from(["Found unexpected property 'unknownProperty' while decoding.".to_string()])
    );
}

/// Resolve from overrides alone.
#[test]
fn overrides_without_document() {
    let settings =
        Settings::parse_overrides(&overrides(&[r#"author.email="a@b.c""#]), &mut IgnoreIssues)
            .expect("parse");
    assert_eq!(settings.author.email, "a@b.c");
    assert_eq!(settings.author.name, "John Doe");
}

/// Reject malformed and non-object documents.
#[test]
fn invalid_document_is_a_parse_error() {
    let err = Settings::parse(b"{ not json", &[], &mut IgnoreIssues).unwrap_err();
    assert!(matches!(err, ConfigError::ParseFailed(_)));

    let err = Settings::parse(b"[]", &[], &mut IgnoreIssues).unwrap_err();
    assert!(matches!(err, ConfigError::ParseFailed(_)));
}

/// Decode YAML overrides as plain scalars.
#[test]
fn yaml_overrides_accept_plain_scalars() {
    let settings = Settings::parse_with(
        &YamlDecoder,
        Some(b"showInternalMenu: true\n".as_slice()),
        &overrides(&["author.name=Foo Bar", "defaultPowerLevel=low"]),
        &mut IgnoreIssues,
    )
    .expect("parse");
    assert!(settings.show_internal_menu);
    assert_eq!(settings.author.name, "Foo Bar");
    assert_eq!(settings.default_power_level, Power::Low);
}

/// Pick the document format from the file extension.
#[test]
fn loads_files_by_extension() {
    let temp = TempDir::new().expect("tmp");

    let json = temp.path().join("settings.json");
    fs::write(&json, r#"{ "author": { "name": "json" } }"#).expect("write");
    let json5 = temp.path().join("settings.json5");
    fs::write(&json5, "{\n  // comment\n  author: { name: 'json5' },\n}").expect("write");
    let yaml = temp.path().join("settings.yml");
    fs::write(&yaml, "author:\n  name: yaml\n").expect("write");

    for (path, expected) in [(json, "json"), (json5, "json5"), (yaml, "yaml")] {
        let settings = Settings::load_from_path(&path, &[], &mut IgnoreIssues).expect("load");
        assert_eq!(settings.author.name, expected);
    }
}

/// Load a file with an explicit decoder.
#[test]
fn loads_with_explicit_decoder_and_overrides() {
    let temp = TempDir::new().expect("tmp");
    let path = temp.path().join("settings.conf");
    fs::write(&path, "{ showInternalMenu: true }").expect("write");

    let settings = Settings::load_from_path_with(
        &Json5Decoder,
        &path,
        &overrides(&["showInternalMenu=false"]),
        &mut IgnoreIssues,
    )
    .expect("load");
    assert!(!settings.show_internal_menu);
}

/// Report a missing config file as a read failure.
#[test]
fn missing_file_is_a_read_error() {
    let temp = TempDir::new().expect("tmp");
    let err = Settings::load_from_path(temp.path().join("missing.json"), &[], &mut IgnoreIssues)
        .unwrap_err();
    assert!(matches!(err, ConfigError::ReadFailed(_)));
}

/// Verify that rendered overrides parse back to the same override.
#[test]
fn override_strings_round_trip() {
    for raw in [r#"author.name="Foo""#, "showInternalMenu=true", r#"a.b.c=["x"]"#] {
        let parsed: OptionOverride = raw.parse().expect("override");
        assert_eq!(parsed.to_string(), raw);
        assert_eq!(parsed.to_string().parse::<OptionOverride>().expect("reparse"), parsed);
    }
}
