use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use courier_db::Database;

/// Background task that prunes expired messages.
///
/// Runs on an interval and deletes every message whose `expires_at` has
/// passed. Providers are left in place, so a drained provider polls as empty.
pub async fn run_cleanup_loop(db: Arc<Database>, interval_secs: u64) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        interval.tick().await;

        match cleanup_expired(db.clone()).await {
            Ok(count) => {
                if count > 0 {
                    info!("Cleanup: pruned {} expired messages", count);
                }
            }
            Err(e) => {
                warn!("Cleanup error: {}", e);
            }
        }
    }
}

async fn cleanup_expired(db: Arc<Database>) -> anyhow::Result<usize> {
    let now = chrono::Utc::now().timestamp();
    tokio::task::spawn_blocking(move || db.delete_expired_messages(now)).await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_db::models::NewMessage;

    #[tokio::test]
    async fn prunes_only_expired_messages() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let now = chrono::Utc::now().timestamp();
        let messages = [
            ("gone", Some(now - 10)),
            ("kept", Some(now + 3600)),
            ("pinned", None),
        ];
        for (id, expires_at) in messages {
            db.insert_message(&NewMessage {
                id,
                provider_id: "p",
                message: "x",
                access: "*",
                created_at: now - 20,
                expires_at,
            })
            .unwrap();
        }

        assert_eq!(cleanup_expired(db.clone()).await.unwrap(), 1);

        let ids: Vec<String> = db
            .get_messages("p", i64::MIN)
            .unwrap()
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, ["kept", "pinned"]);
        assert!(db.provider_exists("p").unwrap());
    }
}
