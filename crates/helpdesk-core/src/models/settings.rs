//! Service settings: SLA policies and outgoing email configuration.

use serde::{Deserialize, Serialize};

use super::TicketPriority;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct SlaPolicy {
    pub id: i64,
    pub name: String,
    pub priority: TicketPriority,
    pub first_response_minutes: u32,
    pub resolution_minutes: u32,
}

impl SlaPolicy {
    /// Format a minute count as "2d 4h", "3h 15m" or "45m"
    pub fn format_minutes(minutes: u32) -> String {
        let days = minutes / 1440;
        let hours = (minutes % 1440) / 60;
        let mins = minutes % 60;
        if days > 0 {
            if hours > 0 {
                format!("{}d {}h", days, hours)
            } else {
                format!("{}d", days)
            }
        } else if hours > 0 {
            if mins > 0 {
                format!("{}h {}m", hours, mins)
            } else {
                format!("{}h", hours)
            }
        } else {
            format!("{}m", mins)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct NewSlaPolicy {
    pub name: String,
    pub priority: TicketPriority,
    pub first_response_minutes: u32,
    pub resolution_minutes: u32,
}

/// Outgoing mail server settings. The password is never returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: Option<String>,
    pub from_address: String,
    pub from_name: Option<String>,
    #[serde(default)]
    pub use_tls: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct EmailConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smtp_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smtp_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_tls: Option<bool>,
}
