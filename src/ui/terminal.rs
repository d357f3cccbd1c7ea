use chrono::Utc;
use log::{debug, warn};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::chat::models::{Message, Theme, TypingSpeed};
use crate::chat::quick_actions;
use crate::chat::store::ConversationStore;
use crate::error::{ChatError, Result};
use crate::export::{self, ExportFormat};

const HELP: &str = "\
Commands:
  /new                      start a new conversation
  /list                     list conversations
  /switch <n|id>            switch conversation
  /rename <title>           rename the current conversation
  /delete [n|id]            delete a conversation (current by default)
  /search <query>           search titles and messages
  /export <text|json|html> [path]
  /speed <slow|normal|fast> typing speed
  /theme <light|dark>
  /sound <on|off>
  /suggest                  suggested questions
  /clear                    delete all conversations and settings
  /help
  /quit
Anything else is sent as a message.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(String),
    New,
    List,
    Switch(String),
    Rename(String),
    Delete(Option<String>),
    Search(String),
    Export(String, Option<PathBuf>),
    Speed(String),
    Theme(String),
    Sound(String),
    Suggest,
    Clear,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Send(line.to_string());
        };
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        let arg = arg.to_string();
        match name {
            "new" => Command::New,
            "list" | "ls" => Command::List,
            "switch" => Command::Switch(arg),
            "rename" => Command::Rename(arg),
            "delete" | "rm" => Command::Delete(Some(arg).filter(|a| !a.is_empty())),
            "search" => Command::Search(arg),
            "export" => {
                let mut parts = arg.splitn(2, char::is_whitespace);
                let format = parts.next().unwrap_or_default().to_string();
                let path = parts.next().map(str::trim).filter(|p| !p.is_empty()).map(PathBuf::from);
                Command::Export(format, path)
            }
            "speed" => Command::Speed(arg),
            "theme" => Command::Theme(arg),
            "sound" => Command::Sound(arg),
            "suggest" => Command::Suggest,
            "clear" => Command::Clear,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Line-oriented front end over a [`ConversationStore`].
pub struct Terminal<W: Write> {
    store: Arc<ConversationStore>,
    out: W,
}

impl<W: Write> Terminal<W> {
    pub fn new(store: Arc<ConversationStore>, out: W) -> Self {
        Self { store, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<()> {
        writeln!(self.out, "💕 Vyone & Hubertus Love Story. Type /help for commands.")?;
        self.print_history()?;
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if self.handle_line(&line).await? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    pub async fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let command = Command::parse(line);
        debug!("command: {:?}", command);
        match command {
            Command::Send(text) => self.send(&text).await?,
            Command::New => {
                self.store.create_new_conversation();
                writeln!(self.out, "Started a new conversation.")?;
            }
            Command::List => self.list()?,
            Command::Switch(target) => match self.resolve_target(&target) {
                Some(id) => {
                    self.store.switch_conversation(&id)?;
                    self.print_history()?;
                }
                None => writeln!(self.out, "No such conversation: {}", target)?,
            },
            Command::Rename(title) => match self.store.current_conversation_id() {
                Some(id) if !title.trim().is_empty() => {
                    self.store.update_conversation_title(&id, &title)?;
                    writeln!(self.out, "Renamed to \"{}\".", title.trim())?;
                }
                Some(_) => writeln!(self.out, "Usage: /rename <title>")?,
                None => writeln!(self.out, "No active conversation.")?,
            },
            Command::Delete(target) => {
                let id = match target {
                    Some(t) => self.resolve_target(&t),
                    None => self.store.current_conversation_id(),
                };
                match id {
                    Some(id) => {
                        self.store.delete_conversation(&id)?;
                        writeln!(self.out, "Deleted.")?;
                    }
                    None => writeln!(self.out, "No such conversation.")?,
                }
            }
            Command::Search(query) => {
                let hits = self.store.search_conversations(&query);
                if hits.is_empty() {
                    writeln!(self.out, "No matches.")?;
                }
                for conv in hits {
                    writeln!(self.out, "  {}  {}", short_id(&conv.id), conv.title)?;
                }
            }
            Command::Export(format, path) => self.export(&format, path)?,
            Command::Speed(value) => match TypingSpeed::parse(&value) {
                Some(speed) => {
                    self.store.update_settings(|s| s.typing_speed = speed);
                    writeln!(self.out, "Typing speed set to {}.", value.trim().to_lowercase())?;
                }
                None => writeln!(self.out, "Usage: /speed <slow|normal|fast>")?,
            },
            Command::Theme(value) => match Theme::parse(&value) {
                Some(theme) => {
                    self.store.update_settings(|s| s.theme = theme);
                    writeln!(self.out, "Theme set to {}.", value.trim().to_lowercase())?;
                }
                None => writeln!(self.out, "Usage: /theme <light|dark>")?,
            },
            Command::Sound(value) => match value.trim() {
                "on" => self.store.update_settings(|s| s.sound_enabled = true),
                "off" => self.store.update_settings(|s| s.sound_enabled = false),
                _ => writeln!(self.out, "Usage: /sound <on|off>")?,
            },
            Command::Suggest => {
                for action in quick_actions::featured() {
                    writeln!(self.out, "  {} {}: {}", action.icon, action.label, action.message)?;
                }
            }
            Command::Clear => {
                self.store.clear_all();
                writeln!(self.out, "All conversations cleared.")?;
            }
            Command::Help => writeln!(self.out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(name) => writeln!(self.out, "Unknown command /{}. Try /help.", name)?,
        }
        Ok(Flow::Continue)
    }

    async fn send(&mut self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Ok(());
        }
        if self.store.is_typing() {
            writeln!(self.out, "Please wait for the current reply.")?;
            return Ok(());
        }
        writeln!(self.out, "Love Story Bot is typing...")?;
        self.out.flush()?;
        self.store.send_message(text).await?;
        if let Some(reply) = self.store.messages().iter().rev().find(|m| !m.is_user && !m.is_typing) {
            self.print_message(reply)?;
        }
        Ok(())
    }

    fn list(&mut self) -> Result<()> {
        let current = self.store.current_conversation_id();
        let conversations = self.store.conversations();
        if conversations.is_empty() {
            writeln!(self.out, "No conversations yet.")?;
        }
        for (i, conv) in conversations.iter().enumerate() {
            let marker = if current.as_deref() == Some(conv.id.as_str()) { "*" } else { " " };
            writeln!(
                self.out,
                "{} {:>2}. {}  ({} messages, {})",
                marker,
                i + 1,
                conv.title,
                conv.messages.len(),
                conv.updated_at.format("%d/%m/%Y %H:%M")
            )?;
        }
        Ok(())
    }

    fn export(&mut self, format: &str, path: Option<PathBuf>) -> Result<()> {
        let Some(format) = ExportFormat::parse(format) else {
            writeln!(self.out, "Usage: /export <text|json|html> [path]")?;
            return Ok(());
        };
        let Some(conv) = self.store.current_conversation() else {
            writeln!(self.out, "No active conversation.")?;
            return Ok(());
        };
        let path = path.unwrap_or_else(|| PathBuf::from(export::file_name(&conv, format)));
        let written = export::export(&conv, format, Utc::now())
            .and_then(|content| fs::write(&path, content).map_err(ChatError::from));
        match written {
            Ok(()) => writeln!(self.out, "Exported to {} ({}).", path.display(), format.mime_type())?,
            Err(e) => {
                warn!("export to {} failed: {}", path.display(), e);
                writeln!(self.out, "Export failed: {}", e)?;
            }
        }
        Ok(())
    }

    /// Accepts a 1-based list index or an id (or id prefix).
    fn resolve_target(&self, target: &str) -> Option<String> {
        let target = target.trim();
        let conversations = self.store.conversations();
        if let Ok(n) = target.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| conversations.get(i)).map(|c| c.id.clone());
        }
        if target.is_empty() {
            return None;
        }
        conversations.into_iter().find(|c| c.id.starts_with(target)).map(|c| c.id)
    }

    fn print_history(&mut self) -> Result<()> {
        for message in self.store.messages() {
            if !message.is_typing {
                self.print_message(&message)?;
            }
        }
        Ok(())
    }

    fn print_message(&mut self, message: &Message) -> Result<()> {
        let sender = if message.is_user { "You" } else { "Love Story Bot" };
        writeln!(self.out, "[{}] {}: {}", message.timestamp.format("%H:%M"), sender, message.content)?;
        Ok(())
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
