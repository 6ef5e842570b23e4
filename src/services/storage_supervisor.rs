use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    dao::{clubhouse_store::ClubhouseStore, storage::StorageError},
    state::SharedState,
};

const INITIAL_DELAY: Duration = Duration::from_millis(1_000);
const MAX_DELAY: Duration = Duration::from_secs(10);
const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(5);
const MAX_RECONNECT_ATTEMPTS: u32 = 3;

/// Keep a storage backend installed in the shared state, reconnecting with exponential backoff
/// and flagging degraded mode while it is unreachable.
pub async fn run<F, Fut>(state: SharedState, mut connect: F)
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Arc<dyn ClubhouseStore>, StorageError>> + Send,
{
    let mut delay = INITIAL_DELAY;

    loop {
        match connect().await {
            Ok(store) => {
                state.set_store(store.clone()).await;
                info!(
                    backend = store.backend_name(),
                    "storage connection established; leaving degraded mode"
                );
                delay = INITIAL_DELAY;

                watch_store(&state, store.as_ref()).await;

                warn!("exhausted storage reconnect attempts; dropping the connection");
                state.clear_store().await;
            }
            Err(err) => {
                warn!(error = %err, "storage connection attempt failed");
            }
        }

        sleep(delay).await;
        delay = next_delay(delay);
    }
}

/// Poll the store health until it stays unreachable after every reconnect attempt.
async fn watch_store(state: &SharedState, store: &dyn ClubhouseStore) {
    loop {
        match store.health_check().await {
            Ok(()) => {
                if state.is_degraded() {
                    info!("storage healthy again; leaving degraded mode");
                    state.update_degraded(false);
                }
            }
            Err(err) => {
                warn!(error = %err, "storage health check failed");
                if !reconnect(state, store).await {
                    return;
                }
                state.update_degraded(false);
            }
        }
        sleep(HEALTH_POLL_INTERVAL).await;
    }
}

async fn reconnect(state: &SharedState, store: &dyn ClubhouseStore) -> bool {
    let mut delay = INITIAL_DELAY;
    for attempt in 0..MAX_RECONNECT_ATTEMPTS {
        match store.try_reconnect().await {
            Ok(()) => {
                info!(attempt, "storage reconnection succeeded");
                return true;
            }
            Err(err) => {
                if attempt == 0 {
                    warn!(attempt, error = %err, "storage reconnect failed; entering degraded mode");
                    state.update_degraded(true);
                } else {
                    warn!(attempt, error = %err, "storage reconnect attempt failed");
                }
                sleep(delay).await;
                delay = next_delay(delay);
            }
        }
    }
    false
}

fn next_delay(delay: Duration) -> Duration {
    (delay * 2).min(MAX_DELAY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AppConfig, dao::clubhouse_store::MemoryClubhouseStore, state::AppState,
    };

    #[test]
    fn backoff_is_capped() {
        assert_eq!(next_delay(INITIAL_DELAY), Duration::from_secs(2));
        assert_eq!(next_delay(Duration::from_secs(8)), MAX_DELAY);
    }

    #[tokio::test]
    async fn installs_connected_store() {
        let state = AppState::new(AppConfig::default());
        let supervisor = tokio::spawn(run(state.clone(), || async {
            Ok::<_, StorageError>(Arc::new(MemoryClubhouseStore::new()) as Arc<dyn ClubhouseStore>)
        }));

        for _ in 0..100 {
            if !state.is_degraded() {
                break;
            }
            sleep(Duration::from_millis(10)).await;
        }
        supervisor.abort();

        assert!(!state.is_degraded());
        assert!(state.store().await.is_some());
    }
}
