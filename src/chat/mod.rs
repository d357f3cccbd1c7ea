pub mod models;
pub mod quick_actions;
pub mod resolver;
pub mod store;

pub use models::{ChatSettings, Conversation, Message, Theme, TypingSpeed};
pub use resolver::{KeywordResolver, Language, Responder, Topic};
pub use store::{ConversationStore, ValidationMode};
