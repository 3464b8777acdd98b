//! Formatter configuration.
//!
//! Values come from defaults, an optional JSON file in the shape of a
//! `dprint.json` (global keys at the top level, plugin keys under
//! `"assignmentFixer"`), and finally command-line overrides.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

use crate::engine::IndentStyle;

/// Key of the plugin section inside a `dprint.json`-style file.
pub const PLUGIN_KEY: &str = "assignmentFixer";

const GLOBAL_KEYS: &[&str] = &["lineWidth", "indentWidth", "useTabs"];
const PLUGIN_KEYS: &[&str] = &[
    "lineWidth",
    "indentWidth",
    "useTabs",
    "wrapLongAssignments",
    "tieBreak",
];

/// How an estimated width exactly equal to the line width is resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    #[default]
    Inline,
    Wrapped,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    /// Maximum line width before an assignment is wrapped.
    pub line_width: usize,
    pub indent_style: IndentStyle,
    /// Put over-long initializers in parentheses on their own line.
    pub wrap_long_assignments: bool,
    pub tie_break: TieBreak,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            line_width: 80,
            indent_style: IndentStyle::Spaces { width: 2 },
            wrap_long_assignments: true,
            tie_break: TieBreak::Inline,
        }
    }
}

impl Configuration {
    pub fn indent_unit(&self) -> String {
        match self.indent_style {
            IndentStyle::Tabs => "\t".to_string(),
            IndentStyle::Spaces { width } => " ".repeat(width),
        }
    }
}

/// A configuration problem that does not stop formatting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigDiagnostic {
    pub property: String,
    pub message: String,
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.message)
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub config: Configuration,
    pub diagnostics: Vec<ConfigDiagnostic>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Section {
    line_width: Option<usize>,
    indent_width: Option<usize>,
    use_tabs: Option<bool>,
    wrap_long_assignments: Option<bool>,
    tie_break: Option<TieBreak>,
}

impl Section {
    fn apply(self, config: &mut Configuration) {
        if let Some(w) = self.line_width {
            config.line_width = w;
        }
        match (self.use_tabs, self.indent_width) {
            (Some(true), _) => config.indent_style = IndentStyle::Tabs,
            (Some(false) | None, Some(width)) => config.indent_style = IndentStyle::Spaces { width },
            (Some(false), None) => {
                if config.indent_style == IndentStyle::Tabs {
                    config.indent_style = IndentStyle::Spaces { width: 2 };
                }
            }
            (None, None) => {}
        }
        if let Some(wrap) = self.wrap_long_assignments {
            config.wrap_long_assignments = wrap;
        }
        if let Some(tie) = self.tie_break {
            config.tie_break = tie;
        }
    }
}

/// Resolve a JSON configuration document on top of `base`.
///
/// Global keys apply first, the plugin section overrides them. Unknown keys in
/// the plugin section are reported as diagnostics; unknown top-level keys
/// belong to other tools and are ignored.
pub fn resolve(text: &str, base: Configuration) -> Result<ResolvedConfig> {
    let root: Value = serde_json::from_str(text).context("configuration is not valid JSON")?;
    let Value::Object(mut root) = root else {
        anyhow::bail!("configuration must be a JSON object");
    };

    let mut diagnostics = Vec::new();
    let mut config = base;

    let plugin = match root.remove(PLUGIN_KEY) {
        Some(Value::Object(map)) => Some(map),
        Some(_) => {
            diagnostics.push(ConfigDiagnostic {
                property: PLUGIN_KEY.to_string(),
                message: "expected an object".to_string(),
            });
            None
        }
        None => None,
    };

    let global: Map<String, Value> = root
        .into_iter()
        .filter(|(k, _)| GLOBAL_KEYS.contains(&k.as_str()))
        .collect();
    section(global, "")?.apply(&mut config);

    if let Some(plugin) = plugin {
        for key in plugin.keys() {
            if !PLUGIN_KEYS.contains(&key.as_str()) {
                diagnostics.push(ConfigDiagnostic {
                    property: format!("{PLUGIN_KEY}.{key}"),
                    message: "unknown property".to_string(),
                });
            }
        }
        section(plugin, PLUGIN_KEY)?.apply(&mut config);
    }

    Ok(ResolvedConfig {
        config,
        diagnostics,
    })
}

pub fn load(path: &Path, base: Configuration) -> Result<ResolvedConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading configuration {}", path.display()))?;
    resolve(&text, base).with_context(|| format!("in configuration {}", path.display()))
}

fn section(map: Map<String, Value>, name: &str) -> Result<Section> {
    let map: Map<String, Value> = map
        .into_iter()
        .filter(|(k, _)| PLUGIN_KEYS.contains(&k.as_str()))
        .collect();
    serde_json::from_value(Value::Object(map)).with_context(|| {
        if name.is_empty() {
            "invalid global configuration value".to_string()
        } else {
            format!("invalid value in \"{name}\"")
        }
    })
}
