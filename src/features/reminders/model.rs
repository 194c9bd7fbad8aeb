//! Reminder data model
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How often a reminder fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Once,
    Daily,
    Weekly,
    Custom,
}

impl Frequency {
    /// Parses the slash-command choice value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "once" => Some(Self::Once),
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Once => "once",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted reminder record. Never mutated once written.
///
/// The fields are mutually contextual: `once` uses `date` + `time`,
/// `daily`/`weekly` use `time` only, and `custom` uses `interval` only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    /// Assigned at creation; keys the live timer for this record.
    pub id: Uuid,
    /// Wall-clock time of day, `HH:MM`, UTC.
    pub time: String,
    /// Calendar date, `YYYY-MM-DD`, UTC. Meaningful for `once` only.
    pub date: String,
    /// Text payload delivered on each firing.
    pub message: String,
    pub frequency: Frequency,
    /// Minutes between firings. Present iff `frequency` is `custom`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<i64>,
    /// User or role id to mention in the delivered message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mention: Option<String>,
    /// Destination channel, captured from the invoking interaction.
    pub channel_id: String,
}

impl Reminder {
    /// The text delivered on every firing: the message with the mention
    /// reference appended. Computed once at registration time.
    pub fn render_message(&self) -> String {
        match &self.mention {
            Some(id) => format!("{} <@{}>", self.message, id),
            None => format!("{} ", self.message),
        }
    }
}

/// Creation input as parsed out of the slash-command interaction.
#[derive(Debug, Clone)]
pub struct ReminderRequest {
    pub time: String,
    pub date: String,
    pub message: String,
    pub frequency: Frequency,
    pub interval: Option<i64>,
    pub mention: Option<String>,
    pub channel_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reminder(message: &str, mention: Option<&str>) -> Reminder {
        Reminder {
            id: Uuid::new_v4(),
            time: "14:30".to_string(),
            date: "2025-03-01".to_string(),
            message: message.to_string(),
            frequency: Frequency::Daily,
            interval: None,
            mention: mention.map(|m| m.to_string()),
            channel_id: "C1".to_string(),
        }
    }

    #[test]
    fn test_render_message_without_mention_keeps_trailing_space() {
        assert_eq!(reminder("Standup", None).render_message(), "Standup ");
    }

    #[test]
    fn test_render_message_appends_mention_reference() {
        assert_eq!(
            reminder("Standup", Some("U42")).render_message(),
            "Standup <@U42>"
        );
    }

    #[test]
    fn test_frequency_parse_round_trip() {
        for value in ["once", "daily", "weekly", "custom"] {
            let freq = Frequency::parse(value).unwrap();
            assert_eq!(freq.as_str(), value);
        }
        assert!(Frequency::parse("hourly").is_none());
    }

    #[test]
    fn test_reminder_serde_preserves_all_fields() {
        let original = reminder("Standup", Some("U42"));
        let json = serde_json::to_string(&original).unwrap();
        let restored: Reminder = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_reminder_serde_omits_absent_optionals() {
        let json = serde_json::to_string(&reminder("Standup", None)).unwrap();
        assert!(!json.contains("interval"));
        assert!(!json.contains("mention"));
    }
}
