use chrono::Utc;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::chat::models::{ChatSettings, Conversation, Message};
use crate::chat::resolver::{error_reply, KeywordResolver, Language, Responder};
use crate::error::{ChatError, Result};
use crate::storage::Storage;
use crate::utils::derive_title;

/// Upper bound (exclusive) of the random extra typing delay.
const MAX_JITTER_MS: u64 = 1000;

/// How invalid arguments are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Invalid arguments are ignored and the call returns `Ok`.
    #[default]
    Forgiving,
    /// Invalid arguments and concurrent sends are returned as errors.
    Strict,
}

struct ChatState {
    conversations: Vec<Conversation>,
    current_id: Option<String>,
    messages: Vec<Message>,
    pending_replies: usize,
    settings: ChatSettings,
    rng: StdRng,
}

impl ChatState {
    fn position(&self, id: &str) -> Option<usize> {
        self.conversations.iter().position(|c| c.id == id)
    }

    fn is_current(&self, id: &str) -> bool {
        self.current_id.as_deref() == Some(id)
    }
}

/// Owns the conversation list, the active conversation and its live message
/// mirror, and the chat settings.
///
/// All methods take `&self`; the internal lock is never held across the
/// typing delay, so other operations may run while a reply is pending.
pub struct ConversationStore {
    storage: Storage,
    responder: Box<dyn Responder>,
    mode: ValidationMode,
    state: Mutex<ChatState>,
}

impl ConversationStore {
    /// Builds a store from whatever `storage` already holds.
    pub fn new(storage: Storage) -> Self {
        let conversations = storage.get_conversations();
        let settings = storage.get_settings();
        let mut current_id = None;
        let mut messages = Vec::new();
        if let Some(id) = storage.get_current_conversation_id() {
            if let Some(conv) = conversations.iter().find(|c| c.id == id) {
                messages = conv.messages.clone();
                current_id = Some(id);
            } else {
                debug!("stored active conversation {} no longer exists", id);
            }
        }
        info!("loaded {} conversation(s)", conversations.len());

        Self {
            storage,
            responder: Box::new(KeywordResolver::new()),
            mode: ValidationMode::default(),
            state: Mutex::new(ChatState {
                conversations,
                current_id,
                messages,
                pending_replies: 0,
                settings,
                rng: StdRng::from_entropy(),
            }),
        }
    }

    pub fn with_responder(mut self, responder: impl Responder + 'static) -> Self {
        self.responder = Box::new(responder);
        self
    }

    pub fn with_rng(self, rng: StdRng) -> Self {
        self.lock().rng = rng;
        self
    }

    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    fn lock(&self) -> MutexGuard<'_, ChatState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn reject(&self, err: ChatError) -> Result<()> {
        match self.mode {
            ValidationMode::Strict => Err(err),
            ValidationMode::Forgiving => {
                debug!("ignoring invalid request: {}", err);
                Ok(())
            }
        }
    }

    pub fn conversations(&self) -> Vec<Conversation> {
        self.lock().conversations.clone()
    }

    pub fn conversation(&self, id: &str) -> Option<Conversation> {
        let state = self.lock();
        state.position(id).map(|i| state.conversations[i].clone())
    }

    pub fn current_conversation_id(&self) -> Option<String> {
        self.lock().current_id.clone()
    }

    pub fn current_conversation(&self) -> Option<Conversation> {
        let state = self.lock();
        let id = state.current_id.as_deref()?;
        state.position(id).map(|i| state.conversations[i].clone())
    }

    /// Live message mirror of the active conversation, placeholders included.
    pub fn messages(&self) -> Vec<Message> {
        self.lock().messages.clone()
    }

    /// True while a reply is being typed.
    pub fn is_typing(&self) -> bool {
        self.lock().pending_replies > 0
    }

    pub fn settings(&self) -> ChatSettings {
        self.lock().settings.clone()
    }

    pub fn set_settings(&self, settings: ChatSettings) {
        self.storage.save_settings(&settings);
        self.lock().settings = settings;
    }

    pub fn update_settings(&self, f: impl FnOnce(&mut ChatSettings)) {
        let mut state = self.lock();
        f(&mut state.settings);
        self.storage.save_settings(&state.settings);
    }

    pub fn create_new_conversation(&self) -> String {
        let mut state = self.lock();
        self.create_locked(&mut state)
    }

    fn create_locked(&self, state: &mut ChatState) -> String {
        let conv = Conversation::new();
        let id = conv.id.clone();
        state.conversations.insert(0, conv);
        state.current_id = Some(id.clone());
        state.messages.clear();
        self.storage.set_current_conversation_id(&id);
        self.storage.save_conversations(&state.conversations);
        info!("created conversation {}", id);
        id
    }

    pub fn switch_conversation(&self, id: &str) -> Result<()> {
        let mut state = self.lock();
        let Some(pos) = state.position(id) else {
            drop(state);
            return self.reject(ChatError::UnknownConversation(id.to_string()));
        };
        Self::activate(&self.storage, &mut state, pos);
        Ok(())
    }

    fn activate(storage: &Storage, state: &mut ChatState, pos: usize) {
        let conv = &state.conversations[pos];
        let id = conv.id.clone();
        state.messages = conv.messages.clone();
        storage.set_current_conversation_id(&id);
        debug!("switched to conversation {}", id);
        state.current_id = Some(id);
    }

    pub fn update_conversation_title(&self, id: &str, title: &str) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            return self.reject(ChatError::EmptyTitle);
        }
        let mut state = self.lock();
        let Some(pos) = state.position(id) else {
            drop(state);
            return self.reject(ChatError::UnknownConversation(id.to_string()));
        };
        let conv = &mut state.conversations[pos];
        conv.title = title.to_string();
        conv.updated_at = Utc::now();
        self.storage.save_conversations(&state.conversations);
        Ok(())
    }

    /// Removes a conversation. Afterwards at least one conversation exists
    /// and one is active.
    pub fn delete_conversation(&self, id: &str) -> Result<()> {
        let mut state = self.lock();
        let Some(pos) = state.position(id) else {
            drop(state);
            return self.reject(ChatError::UnknownConversation(id.to_string()));
        };
        state.conversations.remove(pos);
        info!("deleted conversation {}", id);

        let lost_active = state.is_current(id) || state.current_id.is_none();
        if lost_active || state.conversations.is_empty() {
            if state.conversations.is_empty() {
                self.create_locked(&mut state);
            } else {
                Self::activate(&self.storage, &mut state, 0);
                self.storage.save_conversations(&state.conversations);
            }
        } else {
            self.storage.save_conversations(&state.conversations);
        }
        Ok(())
    }

    /// Appends to the live mirror and, unless it is a typing placeholder, to
    /// the active conversation. Returns the new message id.
    pub fn add_message(&self, content: &str, is_user: bool, is_typing: bool) -> String {
        let message = if is_typing {
            Message::typing_placeholder()
        } else {
            Message::new(content, is_user)
        };
        let mut state = self.lock();
        match state.current_id.clone() {
            Some(conv_id) => self.append_locked(&mut state, &conv_id, message),
            None => {
                let id = message.id.clone();
                state.messages.push(message);
                id
            }
        }
    }

    fn append_locked(&self, state: &mut ChatState, conv_id: &str, message: Message) -> String {
        let id = message.id.clone();
        if state.is_current(conv_id) {
            state.messages.push(message.clone());
        }
        if message.is_typing {
            return id;
        }
        let Some(pos) = state.position(conv_id) else {
            warn!("dropping message for missing conversation {}", conv_id);
            return id;
        };
        let conv = &mut state.conversations[pos];
        if message.is_user && conv.has_default_title() {
            conv.title = derive_title(&message.content);
        }
        conv.messages.push(message);
        conv.updated_at = Utc::now();
        self.storage.save_conversations(&state.conversations);
        id
    }

    pub fn remove_message(&self, id: &str) {
        let mut state = self.lock();
        let conv_id = state.current_id.clone();
        Self::remove_locked(&self.storage, &mut state, conv_id.as_deref(), id);
    }

    fn remove_locked(storage: &Storage, state: &mut ChatState, conv_id: Option<&str>, id: &str) {
        state.messages.retain(|m| m.id != id);
        let Some(pos) = conv_id.and_then(|c| state.position(c)) else {
            return;
        };
        let conv = &mut state.conversations[pos];
        let before = conv.messages.len();
        conv.messages.retain(|m| m.id != id);
        if conv.messages.len() != before {
            storage.save_conversations(&state.conversations);
        }
    }

    /// Sends a user message and waits out the simulated typing of the reply.
    ///
    /// The reply is always delivered to the conversation the message was sent
    /// in, even if the user switched away during the delay.
    pub async fn send_message(&self, content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return self.reject(ChatError::EmptyMessage);
        }

        let (conv_id, reply, placeholder_id, delay) = {
            let mut state = self.lock();
            if self.mode == ValidationMode::Strict && state.pending_replies > 0 {
                return Err(ChatError::Busy);
            }
            let conv_id = match state.current_id.clone() {
                Some(id) if state.position(&id).is_some() => id,
                _ => self.create_locked(&mut state),
            };
            self.append_locked(&mut state, &conv_id, Message::new(content, true));

            let reply = match self.responder.respond(content, &mut state.rng) {
                Ok(reply) => reply,
                Err(e) => {
                    warn!("Failed to get response: {}", e);
                    error_reply(Language::detect(content)).to_string()
                }
            };

            let placeholder_id = self.append_locked(&mut state, &conv_id, Message::typing_placeholder());
            state.pending_replies += 1;
            let jitter = state.rng.gen_range(0..MAX_JITTER_MS);
            let delay = state.settings.typing_speed.base_delay() + Duration::from_millis(jitter);
            (conv_id, reply, placeholder_id, delay)
        };

        debug!("typing reply for {} over {:?}", conv_id, delay);
        tokio::time::sleep(delay).await;

        let mut state = self.lock();
        Self::remove_locked(&self.storage, &mut state, Some(&conv_id), &placeholder_id);
        state.pending_replies = state.pending_replies.saturating_sub(1);
        self.append_locked(&mut state, &conv_id, Message::new(reply, false));
        Ok(())
    }

    /// Conversations whose title or any message contains `query`,
    /// case-insensitively. The query is matched as typed, spaces included;
    /// an empty query returns everything.
    pub fn search_conversations(&self, query: &str) -> Vec<Conversation> {
        let query = query.to_lowercase();
        let state = self.lock();
        state
            .conversations
            .iter()
            .filter(|c| {
                query.is_empty()
                    || c.title.to_lowercase().contains(&query)
                    || c.visible_messages().any(|m| m.content.to_lowercase().contains(&query))
            })
            .cloned()
            .collect()
    }

    /// Wipes persisted data and resets the store to its empty state.
    pub fn clear_all(&self) {
        self.storage.clear_all();
        let mut state = self.lock();
        state.conversations.clear();
        state.current_id = None;
        state.messages.clear();
        state.settings = ChatSettings::default();
        info!("cleared all conversations and settings");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::models::TypingSpeed;
    use crate::chat::resolver::{fixed_reply, relationship_replies, Topic};
    use crate::storage::{KeyValueStore, MemoryStore};
    use crate::utils::DEFAULT_TITLE;
    use rand::RngCore;
    use std::sync::Arc;

    struct FailingResponder;

    impl Responder for FailingResponder {
        fn respond(&self, _input: &str, _rng: &mut dyn RngCore) -> Result<String> {
            Err(ChatError::Responder("boom".into()))
        }
    }

    fn store() -> ConversationStore {
        ConversationStore::new(Storage::in_memory()).with_seed(42)
    }

    fn assert_one_active(store: &ConversationStore) {
        let convs = store.conversations();
        assert!(!convs.is_empty());
        let current = store.current_conversation_id().expect("an active conversation");
        assert_eq!(convs.iter().filter(|c| c.id == current).count(), 1);
    }

    #[test]
    fn create_inserts_at_front_and_activates() {
        let store = store();
        let first = store.create_new_conversation();
        let second = store.create_new_conversation();
        let ids: Vec<String> = store.conversations().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![second.clone(), first]);
        assert_eq!(store.current_conversation_id(), Some(second));
        assert!(store.messages().is_empty());
    }

    #[test]
    fn switch_mirrors_messages_and_ignores_unknown_ids() {
        let store = store();
        let first = store.create_new_conversation();
        store.add_message("question", true, false);
        let second = store.create_new_conversation();
        assert!(store.messages().is_empty());

        store.switch_conversation(&first).unwrap();
        assert_eq!(store.messages().len(), 1);
        assert_eq!(store.messages()[0].content, "question");

        store.switch_conversation("nope").unwrap();
        assert_eq!(store.current_conversation_id(), Some(first));
        assert_ne!(store.current_conversation_id(), Some(second));
    }

    #[test]
    fn delete_active_switches_to_first_remaining() {
        let store = store();
        let a = store.create_new_conversation();
        let b = store.create_new_conversation();
        let c = store.create_new_conversation();
        store.switch_conversation(&b).unwrap();
        store.delete_conversation(&b).unwrap();
        assert_eq!(store.current_conversation_id(), Some(c.clone()));
        assert_eq!(store.conversations().len(), 2);

        store.delete_conversation(&a).unwrap();
        assert_eq!(store.current_conversation_id(), Some(c));
        assert_one_active(&store);
    }

    #[test]
    fn deleting_last_conversation_creates_a_fresh_one() {
        let store = store();
        let only = store.create_new_conversation();
        store.delete_conversation(&only).unwrap();
        let convs = store.conversations();
        assert_eq!(convs.len(), 1);
        assert_ne!(convs[0].id, only);
        assert!(convs[0].messages.is_empty());
        assert_eq!(store.current_conversation_id(), Some(convs[0].id.clone()));
    }

    #[test]
    fn create_delete_sequences_keep_one_active() {
        let store = store();
        let mut ids = vec![store.create_new_conversation()];
        assert_one_active(&store);
        for step in 0..20 {
            if step % 3 == 0 {
                ids.push(store.create_new_conversation());
            } else {
                let victim = store.conversations()[step % store.conversations().len()].id.clone();
                store.delete_conversation(&victim).unwrap();
            }
            assert_one_active(&store);
        }
    }

    #[test]
    fn appending_a_message_refreshes_updated_at() {
        let store = store();
        let id = store.create_new_conversation();
        let before = store.conversation(&id).unwrap().updated_at;
        std::thread::sleep(Duration::from_millis(5));

        store.add_message("x", true, false);
        let after = store.conversation(&id).unwrap().updated_at;
        assert!(after > before);

        std::thread::sleep(Duration::from_millis(5));
        store.add_message("", false, true);
        assert_eq!(store.conversation(&id).unwrap().updated_at, after);
    }

    #[tokio::test(start_paused = true)]
    async fn delivered_reply_refreshes_updated_at() {
        let store = store();
        let id = store.create_new_conversation();
        let created = store.conversation(&id).unwrap().updated_at;
        std::thread::sleep(Duration::from_millis(5));

        store.send_message("How did they meet?").await.unwrap();
        let conv = store.conversation(&id).unwrap();
        let reply = conv.messages.last().unwrap();
        assert!(!reply.is_user);
        assert!(conv.updated_at > created);
        assert!(conv.updated_at >= reply.timestamp);
        assert!(reply.timestamp >= conv.messages[0].timestamp);
    }

    #[test]
    fn title_updates_trim_and_ignore_blank() {
        let store = store();
        let id = store.create_new_conversation();
        let before = store.conversation(&id).unwrap().updated_at;
        store.update_conversation_title(&id, "  Our story  ").unwrap();
        let conv = store.conversation(&id).unwrap();
        assert_eq!(conv.title, "Our story");
        assert!(conv.updated_at >= before);

        store.update_conversation_title(&id, "   ").unwrap();
        assert_eq!(store.conversation(&id).unwrap().title, "Our story");
    }

    #[test]
    fn strict_mode_reports_invalid_arguments() {
        let store = store().with_mode(ValidationMode::Strict);
        let id = store.create_new_conversation();
        assert!(matches!(store.update_conversation_title(&id, " "), Err(ChatError::EmptyTitle)));
        assert!(matches!(store.switch_conversation("missing"), Err(ChatError::UnknownConversation(_))));
        assert!(matches!(store.delete_conversation("missing"), Err(ChatError::UnknownConversation(_))));
    }

    #[test]
    fn first_user_message_sets_title_once() {
        let store = store();
        let id = store.create_new_conversation();
        store.add_message("Bot speaks first", false, false);
        assert_eq!(store.conversation(&id).unwrap().title, DEFAULT_TITLE);

        store.add_message("Hello there, this is a long first message exceeding thirty chars", true, false);
        assert_eq!(store.conversation(&id).unwrap().title, "Hello there, this is a long fi...");

        store.add_message("Second question", true, false);
        assert_eq!(store.conversation(&id).unwrap().title, "Hello there, this is a long fi...");
    }

    #[test]
    fn placeholders_live_only_in_the_mirror() {
        let store = store();
        let id = store.create_new_conversation();
        let placeholder = store.add_message("", false, true);
        assert_eq!(store.messages().len(), 1);
        assert!(store.conversation(&id).unwrap().messages.is_empty());

        store.remove_message(&placeholder);
        assert!(store.messages().is_empty());
    }

    #[test]
    fn remove_message_updates_both_views() {
        let store = store();
        let id = store.create_new_conversation();
        let msg = store.add_message("to be removed", true, false);
        store.remove_message(&msg);
        assert!(store.messages().is_empty());
        assert!(store.conversation(&id).unwrap().messages.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn blank_messages_are_ignored() {
        let store = store();
        store.send_message("").await.unwrap();
        store.send_message("   ").await.unwrap();
        assert!(store.conversations().is_empty());
        assert!(store.messages().is_empty());
        assert_eq!(store.current_conversation_id(), None);

        let strict = self::store().with_mode(ValidationMode::Strict);
        assert!(matches!(strict.send_message(" ").await, Err(ChatError::EmptyMessage)));
    }

    #[tokio::test(start_paused = true)]
    async fn send_message_on_fresh_store_delivers_reply() {
        let store = store();
        store.send_message("How did they meet?").await.unwrap();

        assert!(!store.is_typing());
        let conv = store.current_conversation().unwrap();
        assert_eq!(conv.messages.len(), 2);
        assert!(conv.messages[0].is_user);
        assert_eq!(conv.messages[0].content, "How did they meet?");
        assert!(!conv.messages[1].is_user);
        assert_eq!(
            conv.messages[1].content,
            fixed_reply(Topic::HowTheyMet, Language::English).unwrap()
        );

        let mirror = store.messages();
        assert!(mirror.iter().all(|m| !m.is_typing));
        assert_eq!(mirror.last().unwrap().content, conv.messages[1].content);
    }

    #[tokio::test(start_paused = true)]
    async fn typing_lasts_base_delay_plus_jitter() {
        let store = Arc::new(store());
        store.set_settings(ChatSettings {
            typing_speed: TypingSpeed::Fast,
            ..ChatSettings::default()
        });

        let start = tokio::time::Instant::now();
        let sender = {
            let store = store.clone();
            tokio::spawn(async move { store.send_message("Hello").await })
        };
        tokio::task::yield_now().await;

        assert!(store.is_typing());
        let mirror = store.messages();
        assert_eq!(mirror.len(), 2);
        assert!(mirror[1].is_typing);
        assert_eq!(store.current_conversation().unwrap().messages.len(), 1);

        sender.await.unwrap().unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(800));
        assert!(elapsed < Duration::from_millis(1800));
        assert!(!store.is_typing());
    }

    #[tokio::test(start_paused = true)]
    async fn responder_failure_sends_apology() {
        let store = store().with_responder(FailingResponder);
        store.send_message("Apa kabar?").await.unwrap();
        let messages = store.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content, error_reply(Language::Indonesian));
        assert!(!store.is_typing());
    }

    #[tokio::test(start_paused = true)]
    async fn random_branch_replies_come_from_the_pool() {
        let store = store();
        store.send_message("Tell me about them").await.unwrap();
        let reply = store.messages().last().unwrap().content.clone();
        assert!(relationship_replies(Language::English).contains(&reply.as_str()));
    }

    #[tokio::test(start_paused = true)]
    async fn reply_follows_its_conversation_after_switch() {
        let store = Arc::new(store());
        let first = store.create_new_conversation();
        let sender = {
            let store = store.clone();
            tokio::spawn(async move { store.send_message("How did they meet?").await })
        };
        tokio::task::yield_now().await;

        let second = store.create_new_conversation();
        sender.await.unwrap().unwrap();

        assert_eq!(store.current_conversation_id(), Some(second));
        assert!(store.messages().is_empty());
        let first_conv = store.conversation(&first).unwrap();
        assert_eq!(first_conv.messages.len(), 2);
        assert!(!first_conv.messages[1].is_user);
    }

    #[tokio::test(start_paused = true)]
    async fn reply_for_deleted_conversation_is_dropped() {
        let store = Arc::new(store());
        let first = store.create_new_conversation();
        let sender = {
            let store = store.clone();
            tokio::spawn(async move { store.send_message("Hello").await })
        };
        tokio::task::yield_now().await;

        store.delete_conversation(&first).unwrap();
        sender.await.unwrap().unwrap();

        let convs = store.conversations();
        assert_eq!(convs.len(), 1);
        assert!(convs[0].messages.is_empty());
        assert!(store.messages().is_empty());
        assert!(!store.is_typing());
    }

    #[tokio::test(start_paused = true)]
    async fn strict_mode_rejects_sends_while_typing() {
        let store = Arc::new(store().with_mode(ValidationMode::Strict));
        let sender = {
            let store = store.clone();
            tokio::spawn(async move { store.send_message("Hello").await })
        };
        tokio::task::yield_now().await;

        assert!(matches!(store.send_message("Again").await, Err(ChatError::Busy)));
        sender.await.unwrap().unwrap();
        assert_eq!(store.messages().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn state_survives_reload() {
        let backend = Arc::new(MemoryStore::new());
        let first_id = {
            let store = ConversationStore::new(Storage::new(SharedStore(backend.clone()))).with_seed(1);
            store.send_message("What are their future plans?").await.unwrap();
            store.set_settings(ChatSettings {
                typing_speed: TypingSpeed::Slow,
                ..ChatSettings::default()
            });
            store.current_conversation_id().unwrap()
        };

        let reloaded = ConversationStore::new(Storage::new(SharedStore(backend)));
        assert_eq!(reloaded.current_conversation_id(), Some(first_id));
        assert_eq!(reloaded.messages().len(), 2);
        assert_eq!(reloaded.settings().typing_speed, TypingSpeed::Slow);
    }

    #[test]
    fn search_matches_titles_and_messages() {
        let store = store();
        let a = store.create_new_conversation();
        store.add_message("When was their first date?", true, false);
        store.create_new_conversation();
        store.add_message("Tell me about them", true, false);

        let hits = store.search_conversations("FIRST DATE");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, a);
        assert_eq!(store.search_conversations("").len(), 2);
        assert!(store.search_conversations("florida").is_empty());
    }

    #[test]
    fn search_keeps_surrounding_spaces() {
        let store = store();
        let spaced = store.create_new_conversation();
        store.add_message("Their first date was lovely", true, false);
        store.create_new_conversation();
        store.add_message("Last update: nothing", true, false);

        let hits = store.search_conversations(" date");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, spaced);
        assert_eq!(store.search_conversations("date").len(), 2);
    }

    #[test]
    fn clear_all_resets_everything() {
        let store = store();
        store.create_new_conversation();
        store.update_settings(|s| s.sound_enabled = false);
        store.clear_all();
        assert!(store.conversations().is_empty());
        assert_eq!(store.current_conversation_id(), None);
        assert_eq!(store.settings(), ChatSettings::default());
    }

    struct SharedStore(Arc<MemoryStore>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.0.set(key, value)
        }
        fn remove(&self, key: &str) -> Result<()> {
            self.0.remove(key)
        }
    }
}
