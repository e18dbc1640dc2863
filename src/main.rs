use std::sync::Arc;

use anyhow::Context;

use bookbuddy_app::books::{view, BookStore};
use bookbuddy_app::session::SessionStore;
use bookbuddy_kernel::settings::Settings;
use bookbuddy_storage::FileBackend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load BookBuddy settings")?;
    bookbuddy_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        data_dir = %settings.storage.data_dir.display(),
        "bookbuddy bootstrap starting"
    );

    let backend = Arc::new(FileBackend::new(&settings.storage.data_dir));
    let books = BookStore::new(backend.clone(), &settings.storage.books_key);
    let sessions = SessionStore::new(backend, &settings.storage.session_key);

    let collection = books.list().await?;
    let counts = view::shelf_counts(&collection);
    let signed_in = sessions.current().await?.is_some();

    tracing::info!(
        all = counts.all,
        read = counts.read,
        unread = counts.unread,
        signed_in,
        "bookbuddy bootstrap complete"
    );
    Ok(())
}
