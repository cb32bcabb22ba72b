//! Bounded bulk deletion of recent chat messages.
//!
//! Walks message ids downward from the last seen one, deleting each with a
//! short delay between calls. Individual failures are counted, not raised;
//! the whole batch stops early when the cancel flag is set. The report gives
//! the caller exact deleted/failed counts to surface to the user.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use bookbot_core::{Bot, Chat};
use tracing::{info, instrument};

/// How many message ids (counting down from the newest) one clear covers.
pub const CLEAR_WINDOW: i32 = 100;

/// Pause between delete calls, to stay under flood limits.
const DELETE_DELAY: Duration = Duration::from_millis(100);

/// Outcome of one bulk deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearReport {
    pub deleted: usize,
    pub failed: usize,
}

/// Deletes up to `window` messages ending at `last_message_id`, newest first.
/// Checks `cancel` before every delete; deletion failures (already-deleted
/// ids, other users' messages, transport errors) are counted as failed.
#[instrument(skip(bot, cancel))]
pub async fn clear_recent_messages(
    bot: &dyn Bot,
    chat: &Chat,
    last_message_id: i32,
    window: i32,
    cancel: &AtomicBool,
) -> ClearReport {
    let mut report = ClearReport::default();
    let lowest = (last_message_id - window + 1).max(1);

    for message_id in (lowest..=last_message_id).rev() {
        if cancel.load(Ordering::Relaxed) {
            info!(chat_id = chat.id, "Bulk deletion cancelled");
            break;
        }
        match bot.delete_message(chat, message_id).await {
            Ok(()) => report.deleted += 1,
            Err(_) => report.failed += 1,
        }
        tokio::time::sleep(DELETE_DELAY).await;
    }

    info!(
        chat_id = chat.id,
        deleted = report.deleted,
        failed = report.failed,
        "Bulk deletion finished"
    );
    report
}
