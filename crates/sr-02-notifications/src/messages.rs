//! Message texts and the live summary embed.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};
use shared_types::InventoryItem;
use std::fmt;

/// Field limit per embed imposed by the webhook platform.
pub const MAX_EMBED_FIELDS: usize = 25;

/// Embed colour of the live summary (green).
const SUMMARY_COLOR: u32 = 0x00ff00;

/// One discrete audit line for the log channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    Added { user: String, name: String, quantity: i64 },
    Updated { user: String, name: String, quantity: i64 },
    Deleted { user: String, name: String, quantity: i64 },
    LowStock { name: String, quantity: i64 },
}

impl LogEvent {
    pub fn added(user: &str, item: &InventoryItem) -> Self {
        Self::Added {
            user: user.to_string(),
            name: item.name.clone(),
            quantity: item.quantity,
        }
    }

    pub fn updated(user: &str, item: &InventoryItem) -> Self {
        Self::Updated {
            user: user.to_string(),
            name: item.name.clone(),
            quantity: item.quantity,
        }
    }

    pub fn deleted(user: &str, item: &InventoryItem) -> Self {
        Self::Deleted {
            user: user.to_string(),
            name: item.name.clone(),
            quantity: item.quantity,
        }
    }

    pub fn low_stock(item: &InventoryItem) -> Self {
        Self::LowStock {
            name: item.name.clone(),
            quantity: item.quantity,
        }
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEvent::Added { user, name, quantity } => {
                write!(f, "📝 {user} added {name} ({quantity})")
            }
            LogEvent::Updated { user, name, quantity } => {
                write!(f, "✏️ {user} updated {name} ({quantity})")
            }
            LogEvent::Deleted { user, name, quantity } => {
                write!(f, "🗑️ {user} deleted {name} ({quantity})")
            }
            LogEvent::LowStock { name, quantity } => {
                write!(f, "⚠️ Low stock: {name} ({quantity})")
            }
        }
    }
}

/// Render the full inventory as a single webhook embed.
///
/// Rows past [`MAX_EMBED_FIELDS`] are counted in the footer instead of listed.
pub fn render_live_summary(items: &[InventoryItem], now: DateTime<Utc>) -> Value {
    let fields: Vec<Value> = items
        .iter()
        .take(MAX_EMBED_FIELDS)
        .map(|item| {
            json!({
                "name": item.name,
                "value": format!("Quantity: {}", item.quantity),
                "inline": true,
            })
        })
        .collect();

    let mut embed = json!({
        "title": "📦 Inventory",
        "color": SUMMARY_COLOR,
        "fields": fields,
        "timestamp": now.to_rfc3339_opts(SecondsFormat::Millis, true),
    });

    let hidden = items.len().saturating_sub(MAX_EMBED_FIELDS);
    if hidden > 0 {
        embed["footer"] = json!({ "text": format!("+{hidden} more items") });
    }

    json!({ "embeds": [embed] })
}
