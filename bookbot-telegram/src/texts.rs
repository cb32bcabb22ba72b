//! User-facing reply texts.

pub const WELCOME: &str = "📚 Hi! I'm a book-finder assistant bot.\n\n\
Available commands:\n\
/start - restart the bot\n\
/new - start a new dialog (general agent)\n\
/sber_new - start a new dialog (corporate library agent)\n\
/clear - clear the chat history\n\
/help - usage help";

pub const HELP: &str = "ℹ️ How to use this bot:\n\n\
/start - restart the bot\n\
/new - start a new dialog with the general agent\n\
/sber_new - start a new dialog with the corporate library agent\n\
/clear - delete recent messages in this chat\n\
/help - show this help\n\n\
Just tell me what you are looking for and I will help you find a matching book!";

pub const NEW_DIALOG: &str =
    "✅ Started a new dialog with the general agent. Send me your book requests.";

pub const NEW_LIBRARY_DIALOG: &str = "✅ Started a new dialog with the corporate library \
agent. Send me your requests for library books.";

pub const AUTO_STARTED: &str = "ℹ️ Automatically started a new dialog with the general agent.";

pub const CLEAR_CONFIRM: &str = "Are you sure you want to clear the whole chat? This cannot \
be undone.\nSend 'yes' to confirm or 'no' to cancel.";

pub const CLEAR_CANCELLED: &str = "Chat clearing cancelled.";

pub const AGENT_ERROR: &str =
    "⚠️ Something went wrong while processing your request. Please try again.";

pub const ACCESS_DENIED: &str = "🚫 Access denied.\n\n\
You must be a member of the corporate chat to use this bot.\n\
The /help command is available to everyone.";

/// Completion notice for the clear flow, with deletion counts.
pub fn clear_done(deleted: usize, failed: usize) -> String {
    format!(
        "The chat was cleared ({} messages deleted, {} skipped). Starting a new dialog.\n\
         How can I help you?",
        deleted, failed
    )
}
