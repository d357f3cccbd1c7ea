use std::io;
use std::sync::Arc;

use log::info;
use lovestory_chat::app::AppConfig;
use lovestory_chat::chat::{ConversationStore, ValidationMode};
use lovestory_chat::storage::{SqliteStore, Storage};
use lovestory_chat::ui::terminal::Terminal;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> lovestory_chat::Result<()> {
    let config = AppConfig::load();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str()))
        .target(env_logger::Target::Stderr)
        .init();

    let db_path = config.db_path()?;
    info!("using database {}", db_path.display());
    let storage = Storage::new(SqliteStore::open(&db_path)?);

    let mode = if config.strict_validation {
        ValidationMode::Strict
    } else {
        ValidationMode::Forgiving
    };
    let mut store = ConversationStore::new(storage).with_mode(mode);
    if let Some(seed) = config.seed {
        store = store.with_seed(seed);
    }

    let mut terminal = Terminal::new(Arc::new(store), io::stdout());
    terminal.run(BufReader::new(tokio::io::stdin())).await
}
