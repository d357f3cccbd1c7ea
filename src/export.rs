//! Conversation export as plain text, JSON or a standalone HTML page.
//!
//! Typing placeholders never appear in an export. Times are rendered in UTC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chat::models::{Conversation, Message};
use crate::error::Result;
use crate::utils::escape_html;

const APP_TITLE: &str = "Vyone & Hubertus Love Story";
const USER_LABEL: &str = "You";
const BOT_LABEL: &str = "Love Story Bot";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Json,
    Html,
}

impl ExportFormat {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(ExportFormat::Text),
            "json" => Some(ExportFormat::Json),
            "html" => Some(ExportFormat::Html),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Html => "html",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Text => "text/plain",
            ExportFormat::Json => "application/json",
            ExportFormat::Html => "text/html",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedMessage {
    pub content: String,
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedConversation {
    pub title: String,
    pub export_date: DateTime<Utc>,
    pub messages: Vec<ExportedMessage>,
}

pub fn export(conversation: &Conversation, format: ExportFormat, exported_at: DateTime<Utc>) -> Result<String> {
    match format {
        ExportFormat::Text => Ok(to_text(conversation, exported_at)),
        ExportFormat::Json => to_json(conversation, exported_at),
        ExportFormat::Html => Ok(to_html(conversation, exported_at)),
    }
}

fn sender(message: &Message) -> &'static str {
    if message.is_user { USER_LABEL } else { BOT_LABEL }
}

fn clock(ts: &DateTime<Utc>) -> String {
    ts.format("%H:%M").to_string()
}

fn export_stamp(ts: &DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y %H:%M").to_string()
}

pub fn to_text(conversation: &Conversation, exported_at: DateTime<Utc>) -> String {
    let header = format!("{} - {}\n", APP_TITLE, conversation.title);
    let date = format!("Exported on: {}\n", export_stamp(&exported_at));
    let separator = format!("{}\n\n", "=".repeat(51));
    let body = conversation
        .visible_messages()
        .map(|m| format!("[{}] {}: {}", clock(&m.timestamp), sender(m), m.content))
        .collect::<Vec<_>>()
        .join("\n\n");
    header + &date + &separator + &body
}

pub fn to_json(conversation: &Conversation, exported_at: DateTime<Utc>) -> Result<String> {
    let doc = ExportedConversation {
        title: conversation.title.clone(),
        export_date: exported_at,
        messages: conversation
            .visible_messages()
            .map(|m| ExportedMessage {
                content: m.content.clone(),
                is_user: m.is_user,
                timestamp: m.timestamp,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

const HTML_STYLE: &str = r#"
    body { font-family: 'Inter', Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); }
    .container { background: white; border-radius: 20px; padding: 30px; box-shadow: 0 20px 40px rgba(0,0,0,0.1); }
    .header { text-align: center; margin-bottom: 30px; }
    .header h1 { color: #667eea; font-family: 'Playfair Display', serif; }
    .message { margin-bottom: 20px; padding: 15px; border-radius: 15px; }
    .user-message { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; margin-left: 20%; }
    .bot-message { background: #f8fafc; border: 1px solid #e2e8f0; margin-right: 20%; }
    .message-header { display: flex; justify-content: space-between; margin-bottom: 8px; font-size: 12px; opacity: 0.8; }
    .message-content { line-height: 1.6; }
"#;

pub fn to_html(conversation: &Conversation, exported_at: DateTime<Utc>) -> String {
    let title = escape_html(&conversation.title);
    let mut body = String::new();
    for m in conversation.visible_messages() {
        let class = if m.is_user { "user-message" } else { "bot-message" };
        let content = escape_html(&m.content).replace('\n', "<br>");
        body.push_str(&format!(
            r#"
    <div class="message {class}">
      <div class="message-header">
        <strong>{sender}</strong>
        <span class="time">{time}</span>
      </div>
      <div class="message-content">{content}</div>
    </div>"#,
            sender = sender(m),
            time = clock(&m.timestamp),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <style>{style}</style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>💕 {app}</h1>
      <h2>{title}</h2>
      <p>Exported on: {stamp}</p>
    </div>{body}
  </div>
</body>
</html>
"#,
        style = HTML_STYLE,
        app = escape_html(APP_TITLE),
        stamp = export_stamp(&exported_at),
    )
}

/// Suggested file name, e.g. `how-did-they-meet.json`.
pub fn file_name(conversation: &Conversation, format: ExportFormat) -> String {
    let slug: String = conversation
        .title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();
    let slug = slug
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    let slug = if slug.is_empty() { "conversation".to_string() } else { slug };
    format!("{}.{}", slug, format.extension())
}
