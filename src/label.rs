//! Label resolution: the short `label` drawn on an entity and the full
//! `title` shown on hover.
//!
//! Resolution either succeeds with a string from the configured selector or
//! falls back to the kind default (first label / `"node"` for nodes, type for
//! edges). Truncation is applied afterwards, whichever branch produced the
//! text.

use std::borrow::Cow;

use crate::config::{DisplaySetting, Selector};
use crate::model::{Edge, Node, Value, NODE_ENTITY};

/// Suffix appended to truncated labels.
const ELLIPSIS: &str = "...";

/// Resolved display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLabel {
    /// Possibly truncated.
    pub label: String,
    /// Always the full text.
    pub title: String,
}

/// Something that can be labelled: nodes and edges.
pub trait Displayable {
    /// Key used to pick a per-label / per-type selector.
    fn display_key(&self) -> Option<&str>;

    /// Text used when no selector applies or resolution fails.
    fn default_label(&self) -> String;

    /// Look up a property by selector name.
    fn lookup(&self, name: &str) -> Option<Cow<'_, Value>>;
}

impl Displayable for Node {
    fn display_key(&self) -> Option<&str> {
        self.first_label()
    }

    fn default_label(&self) -> String {
        self.first_label().unwrap_or(NODE_ENTITY).to_owned()
    }

    /// Real properties win; `id`, `label` and `type` are aliases for the
    /// node id, first label and entity type.
    fn lookup(&self, name: &str) -> Option<Cow<'_, Value>> {
        if let Some(value) = self.properties.get(name) {
            return Some(Cow::Borrowed(value));
        }
        let alias = match name {
            "id" => Value::String(self.id.to_string()),
            "label" => Value::from(self.first_label()?),
            "type" => Value::from(NODE_ENTITY),
            _ => return None,
        };
        Some(Cow::Owned(alias))
    }
}

impl Displayable for Edge {
    fn display_key(&self) -> Option<&str> {
        Some(&self.edge_type)
    }

    fn default_label(&self) -> String {
        self.edge_type.clone()
    }

    fn lookup(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.properties.get(name).map(Cow::Borrowed)
    }
}

/// Compute label and title for an entity.
///
/// Never fails: a missing mapping entry, a missing property, an index on a
/// scalar or an out-of-range index all yield the default.
pub fn resolve_label<E: Displayable + ?Sized>(
    entity: &E,
    setting: &DisplaySetting,
    max_length: Option<usize>,
) -> DisplayLabel {
    let title = setting
        .selector_for(entity.display_key())
        .and_then(|selector| evaluate(entity, selector))
        .unwrap_or_else(|| entity.default_label());

    DisplayLabel {
        label: truncate(&title, max_length),
        title,
    }
}

fn evaluate<E: Displayable + ?Sized>(entity: &E, selector: &Selector) -> Option<String> {
    let value = entity.lookup(&selector.property)?;
    match selector.index {
        None => Some(value.to_string()),
        Some(index) => value.as_list()?.get(index).map(ToString::to_string),
    }
}

/// Cut `text` to `max_length` characters, the last three being `...`.
///
/// `None` means unbounded. Lengths are counted in chars, not bytes.
pub fn truncate(text: &str, max_length: Option<usize>) -> String {
    match max_length {
        Some(max) if text.chars().count() > max => {
            let keep = max.saturating_sub(ELLIPSIS.len());
            let mut out: String = text.chars().take(keep).collect();
            out.push_str(ELLIPSIS);
            out
        }
        _ => text.to_owned(),
    }
}
