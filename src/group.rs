//! Group resolution: the visual bucket a node is colored by.

use crate::config::GroupSetting;
use crate::model::{Node, ID_KEY};

/// Group for nodes that have no label, or when grouping is disabled.
pub const DEFAULT_GROUP: &str = "DEFAULT_GROUP";

/// Compute the group tag for a node.
///
/// - `Disabled` → [`DEFAULT_GROUP`]
/// - `Property(name)` → the property rendered as a string; `~id` yields the
///   node id; a missing property yields [`DEFAULT_GROUP`]
/// - `PerLabel` → the property configured for the node's first label; a
///   label without an entry, or an entry naming a missing property, falls
///   through to `Unset`
/// - `Unset` → first label, else [`DEFAULT_GROUP`]
pub fn resolve_group(node: &Node, setting: &GroupSetting) -> String {
    match setting {
        GroupSetting::Disabled => DEFAULT_GROUP.to_owned(),
        GroupSetting::Property(name) => {
            property_group(node, name).unwrap_or_else(|| DEFAULT_GROUP.to_owned())
        }
        GroupSetting::PerLabel(mapping) => node
            .first_label()
            .and_then(|label| mapping.get(label))
            .and_then(|name| property_group(node, name))
            .unwrap_or_else(|| label_group(node)),
        GroupSetting::Unset => label_group(node),
    }
}

fn property_group(node: &Node, name: &str) -> Option<String> {
    if name == ID_KEY {
        return Some(node.id.to_string());
    }
    node.get(name).map(ToString::to_string)
}

fn label_group(node: &Node) -> String {
    node.first_label().unwrap_or(DEFAULT_GROUP).to_owned()
}
