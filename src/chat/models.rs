use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::utils::{generate_id, DEFAULT_TITLE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub content: String,
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
    /// Transient "assistant is typing" placeholder. Never persisted.
    #[serde(default)]
    pub is_typing: bool,
}

impl Message {
    pub fn new(content: impl Into<String>, is_user: bool) -> Self {
        Self {
            id: generate_id(),
            content: content.into(),
            is_user,
            timestamp: Utc::now(),
            is_typing: false,
        }
    }

    pub fn typing_placeholder() -> Self {
        Self {
            is_typing: true,
            ..Self::new("", false)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            title: DEFAULT_TITLE.to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_default_title(&self) -> bool {
        self.title == DEFAULT_TITLE
    }

    /// Messages that are real content, i.e. not typing placeholders.
    pub fn visible_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| !m.is_typing)
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypingSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl TypingSpeed {
    pub fn base_delay(self) -> Duration {
        match self {
            TypingSpeed::Slow => Duration::from_millis(3000),
            TypingSpeed::Normal => Duration::from_millis(1500),
            TypingSpeed::Fast => Duration::from_millis(800),
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "slow" => Some(TypingSpeed::Slow),
            "normal" => Some(TypingSpeed::Normal),
            "fast" => Some(TypingSpeed::Fast),
            _ => None,
        }
    }
}

impl Theme {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatSettings {
    pub theme: Theme,
    pub typing_speed: TypingSpeed,
    pub sound_enabled: bool,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            typing_speed: TypingSpeed::Normal,
            sound_enabled: true,
        }
    }
}
