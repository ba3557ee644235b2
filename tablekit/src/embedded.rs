//! Externally sourced serialized configuration.
//!
//! Hosts receive small JSON blobs from the page or a CMS (a floating action
//! button, per-table overrides). A blob that does not parse is logged and
//! treated as absent; it never reaches the caller as an error.

use log::warn;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::node::{ButtonVariant, Layout, Node, Role};

/// Parse an embedded JSON value, treating missing or malformed input as absent.
///
/// `source` names the blob in the log message.
pub fn parse_embedded<T: DeserializeOwned>(source: &str, raw: Option<&str>) -> Option<T> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Malformed {} configuration, ignoring: {}", source, e);
            None
        }
    }
}

/// Corner of the viewport a floating action sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FloatingPosition {
    #[default]
    BottomRight,
    BottomLeft,
}

/// Storefront floating action (chat launcher, contact button).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FloatingAction {
    pub label: String,
    pub href: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub position: FloatingPosition,
    #[serde(default)]
    pub variant: ButtonVariant,
}

impl FloatingAction {
    /// Render as a floating button.
    pub fn render(&self) -> Node {
        let position = match self.position {
            FloatingPosition::BottomRight => "floating-bottom-right",
            FloatingPosition::BottomLeft => "floating-bottom-left",
        };
        let mut layout = Layout::role(Role::FloatingAction)
            .id("floating-action")
            .class(position);
        layout.attrs.push(("href".to_string(), self.href.clone()));
        Node::row_with(
            layout,
            vec![Node::Button {
                id: "floating-action-button".to_string(),
                label: self.label.clone(),
                variant: self.variant,
                icon: self.icon.clone(),
                disabled: false,
                pressed: false,
            }],
        )
    }
}

/// Render the floating action described by `raw`, or nothing.
pub fn render_floating_action(raw: Option<&str>) -> Node {
    parse_embedded::<FloatingAction>("floating action", raw)
        .map(|action| action.render())
        .unwrap_or_default()
}
