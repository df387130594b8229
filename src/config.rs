//! Display and grouping configuration.
//!
//! [`NetworkConfig`] is what the embedding application hands over (usually
//! straight from its own JSON settings). Before a build starts it is
//! resolved into a [`ResolvedConfig`]: JSON-shaped option strings are parsed
//! exactly once and selectors are split into name and index.
//!
//! Malformed values never fail: they degrade to the unset setting and a
//! `warn!` is logged.

use std::fmt;

use hashbrown::HashMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as Json;
use tracing::warn;

use crate::Result;

/// Node label length used when the caller does not set one.
pub const DEFAULT_LABEL_MAX_LENGTH: usize = 10;

/// Key inside a per-label grouping entry: `{"airport": {"groupby": "code"}}`.
const GROUPBY_KEY: &str = "groupby";

// ============================================================================
// NetworkConfig
// ============================================================================

/// User-facing options, field names as the settings file spells them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkConfig {
    /// Forces every node into [`DEFAULT_GROUP`](crate::DEFAULT_GROUP).
    pub ignore_groups: bool,
    /// Property name, `~id`, or a JSON object `{label: {"groupby": prop}}`.
    #[serde(deserialize_with = "string_or_object")]
    pub group_by_property: Option<String>,
    /// Selector or JSON object `{label: selector}` for node labels.
    #[serde(deserialize_with = "string_or_object")]
    pub display_property: Option<String>,
    /// Selector or JSON object `{type: selector}` for edge labels.
    #[serde(deserialize_with = "string_or_object")]
    pub edge_display_property: Option<String>,
    /// Node labels longer than this are cut and suffixed with `...`. 0 = unbounded.
    pub label_max_length: usize,
    /// Same for edge labels. 0 = unbounded.
    pub edge_label_max_length: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            ignore_groups: false,
            group_by_property: None,
            display_property: None,
            edge_display_property: None,
            label_max_length: DEFAULT_LABEL_MAX_LENGTH,
            edge_label_max_length: 0,
        }
    }
}

impl NetworkConfig {
    /// Parse from a JSON settings document.
    pub fn from_json(value: Json) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn with_ignore_groups(mut self, ignore: bool) -> Self {
        self.ignore_groups = ignore;
        self
    }

    pub fn with_group_by_property(mut self, value: impl Into<String>) -> Self {
        self.group_by_property = Some(value.into());
        self
    }

    pub fn with_display_property(mut self, value: impl Into<String>) -> Self {
        self.display_property = Some(value.into());
        self
    }

    pub fn with_edge_display_property(mut self, value: impl Into<String>) -> Self {
        self.edge_display_property = Some(value.into());
        self
    }

    pub fn with_label_max_length(mut self, max: usize) -> Self {
        self.label_max_length = max;
        self
    }

    pub fn with_edge_label_max_length(mut self, max: usize) -> Self {
        self.edge_label_max_length = max;
        self
    }

    /// Parse every option into its typed setting.
    pub fn resolve(&self) -> ResolvedConfig {
        let group = if self.ignore_groups {
            GroupSetting::Disabled
        } else {
            self.group_by_property.as_deref().map_or(GroupSetting::Unset, GroupSetting::parse)
        };

        ResolvedConfig {
            group,
            node_display: self.display_property.as_deref().map_or(DisplaySetting::Unset, DisplaySetting::parse),
            edge_display: self.edge_display_property.as_deref().map_or(DisplaySetting::Unset, DisplaySetting::parse),
            label_max_length: non_zero(self.label_max_length),
            edge_label_max_length: non_zero(self.edge_label_max_length),
        }
    }
}

fn non_zero(max: usize) -> Option<usize> {
    (max > 0).then_some(max)
}

/// Accept either a plain string or an inline JSON object for options that
/// the settings file may spell both ways.
fn string_or_object<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Json>::deserialize(deserializer)? {
        None | Some(Json::Null) => None,
        Some(Json::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

// ============================================================================
// Selector
// ============================================================================

/// A display-property token: `name` or `name[index]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    pub property: String,
    pub index: Option<usize>,
}

impl Selector {
    /// `code[1]` selects element 1 of `code`. Anything that is not a
    /// well-formed trailing index is part of the property name.
    pub fn parse(raw: &str) -> Self {
        let indexed = raw
            .strip_suffix(']')
            .and_then(|head| head.rsplit_once('['))
            .and_then(|(name, index)| {
                let index = index.parse::<usize>().ok()?;
                (!name.is_empty()).then(|| (name, index))
            });

        match indexed {
            Some((name, index)) => Self { property: name.to_owned(), index: Some(index) },
            None => Self { property: raw.to_owned(), index: None },
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}[{i}]", self.property),
            None => f.write_str(&self.property),
        }
    }
}

// ============================================================================
// Resolved settings
// ============================================================================

/// How a node's group is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GroupSetting {
    /// Every node lands in the default group.
    Disabled,
    /// First label, or the default group.
    #[default]
    Unset,
    /// Value of this property (`~id` means the node id).
    Property(String),
    /// Label → property to group by.
    PerLabel(HashMap<String, String>),
}

impl GroupSetting {
    pub fn parse(raw: &str) -> Self {
        if !is_json_shaped(raw) {
            return GroupSetting::Property(raw.to_owned());
        }
        let Some(object) = parse_object(raw, "groupByProperty") else {
            return GroupSetting::Unset;
        };

        let mapping: HashMap<String, String> = object
            .into_iter()
            .filter_map(|(label, entry)| {
                let property = entry.get(GROUPBY_KEY)?.as_str()?.to_owned();
                Some((label, property))
            })
            .collect();
        GroupSetting::PerLabel(mapping)
    }
}

/// How a node or edge label is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplaySetting {
    /// Kind default: first label (nodes) or type (edges).
    #[default]
    Unset,
    /// One selector for every entity.
    Literal(Selector),
    /// Label or type → selector.
    PerKey(HashMap<String, Selector>),
}

impl DisplaySetting {
    pub fn parse(raw: &str) -> Self {
        if !is_json_shaped(raw) {
            return DisplaySetting::Literal(Selector::parse(raw));
        }
        let Some(object) = parse_object(raw, "displayProperty") else {
            return DisplaySetting::Unset;
        };

        let mapping: HashMap<String, Selector> = object
            .into_iter()
            .filter_map(|(key, selector)| Some((key, Selector::parse(selector.as_str()?))))
            .collect();
        DisplaySetting::PerKey(mapping)
    }

    /// Selector that applies to an entity whose label or type is `key`.
    pub fn selector_for(&self, key: Option<&str>) -> Option<&Selector> {
        match self {
            DisplaySetting::Unset => None,
            DisplaySetting::Literal(selector) => Some(selector),
            DisplaySetting::PerKey(mapping) => mapping.get(key?),
        }
    }
}

fn is_json_shaped(raw: &str) -> bool {
    raw.trim_start().starts_with('{')
}

fn parse_object(raw: &str, option: &str) -> Option<serde_json::Map<String, Json>> {
    match serde_json::from_str::<Json>(raw) {
        Ok(Json::Object(object)) => Some(object),
        Ok(other) => {
            warn!(option, got = %other, "expected a JSON object, ignoring setting");
            None
        }
        Err(e) => {
            warn!(option, error = %e, "invalid JSON, ignoring setting");
            None
        }
    }
}

/// Settings parsed once per builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub group: GroupSetting,
    pub node_display: DisplaySetting,
    pub edge_display: DisplaySetting,
    /// `None` = unbounded.
    pub label_max_length: Option<usize>,
    pub edge_label_max_length: Option<usize>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        NetworkConfig::default().resolve()
    }
}
