//! Static schema configuration.
//!
//! The configuration is an ordered list of schema descriptors, loaded once
//! before the [`SchemaRegistry`](crate::registry::SchemaRegistry) is built.
//! Two on-disk formats are accepted:
//!
//! - JSON: a bare array of descriptors (the format shipped with the web UI)
//! - TOML: a document with an optional `deployed` flag and `[[schemas]]` tables
//!
//! # Example
//!
//! ```
//! use imecontrol_core::SchemaConfig;
//!
//! let config = SchemaConfig::from_json_str(
//!     r#"[{ "id": "luna_pinyin", "name": "朙月拼音" }]"#,
//! ).unwrap();
//! assert_eq!(config.schemas[0].id, "luna_pinyin");
//! assert!(!config.deployed);
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Whether candidate comments are hidden while a schema is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(from = "CommentPolicyRepr", into = "CommentPolicyRepr")]
pub enum CommentPolicy {
    /// Comments are shown (`false` in configuration)
    #[default]
    Show,
    /// All comments are hidden (`true`)
    Hide,
    /// Only emoji comments are hidden (`"emoji"`)
    HideEmoji,
}

impl CommentPolicy {
    /// True for every policy other than [`CommentPolicy::Show`].
    pub fn hides_anything(self) -> bool {
        self != CommentPolicy::Show
    }
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(untagged)]
enum CommentPolicyRepr {
    Flag(bool),
    Keyword(CommentKeyword),
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
enum CommentKeyword {
    Emoji,
}

impl From<CommentPolicyRepr> for CommentPolicy {
    fn from(repr: CommentPolicyRepr) -> Self {
        match repr {
            CommentPolicyRepr::Flag(false) => CommentPolicy::Show,
            CommentPolicyRepr::Flag(true) => CommentPolicy::Hide,
            CommentPolicyRepr::Keyword(CommentKeyword::Emoji) => CommentPolicy::HideEmoji,
        }
    }
}

impl From<CommentPolicy> for CommentPolicyRepr {
    fn from(policy: CommentPolicy) -> Self {
        match policy {
            CommentPolicy::Show => CommentPolicyRepr::Flag(false),
            CommentPolicy::Hide => CommentPolicyRepr::Flag(true),
            CommentPolicy::HideEmoji => CommentPolicyRepr::Keyword(CommentKeyword::Emoji),
        }
    }
}

/// One configured variant of a schema (e.g. simplified vs. traditional output).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VariantDescriptor {
    /// Engine option id that enables this variant
    pub id: String,
    /// Display name
    pub name: String,
}

/// A sub-schema listed under a parent schema.
///
/// Family members inherit the parent's group, extended flag and comment
/// policy, but carry their own id, name and (optionally) variants.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FamilyMember {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
    /// `None` shares the parent's variant list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<VariantDescriptor>>,
}

/// Static description of one input schema.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SchemaDescriptor {
    pub id: String,
    pub name: String,
    /// Menu group label; schemas sharing a label are listed together
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub extended: bool,
    #[serde(
        default,
        rename = "hideComment",
        alias = "hide_comment",
        skip_serializing_if = "Option::is_none"
    )]
    pub hide_comment: Option<CommentPolicy>,
    /// `None` means "no variants field": a simplified/traditional pair is
    /// synthesized. `Some(vec![])` means the schema has no variants at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<VariantDescriptor>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub family: Vec<FamilyMember>,
}

impl SchemaDescriptor {
    /// Create an enabled descriptor with no optional fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            group: None,
            disabled: false,
            extended: false,
            hide_comment: None,
            variants: None,
            family: Vec::new(),
        }
    }
}

/// Ordered schema list plus deployment flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SchemaConfig {
    /// Variants are pinned by deployment config instead of being re-applied
    /// on every schema switch.
    #[serde(default)]
    pub deployed: bool,
    #[serde(default)]
    pub schemas: Vec<SchemaDescriptor>,
}

impl SchemaConfig {
    /// Build a config from an already-parsed schema list.
    pub fn new(schemas: Vec<SchemaDescriptor>) -> Self {
        Self {
            deployed: false,
            schemas,
        }
    }

    /// Parse the JSON format: a bare array of schema descriptors.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let schemas: Vec<SchemaDescriptor> =
            serde_json::from_str(content).context("invalid JSON schema list")?;
        Ok(Self::new(schemas))
    }

    /// Parse the TOML format.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid TOML schema config")
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize schema config")
    }

    /// Load a config file. `.json` files use the JSON format, anything else
    /// is read as TOML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
        .with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_toml_string()?)
            .with_context(|| format!("failed to write {}", path.display()))
    }
}
