use crate::ports::AnswersSource;
use answer_dns_domain::{AnswerStore, ConfigError};
use arc_swap::ArcSwap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Process-wide answers snapshot. Readers call `load_full()` and keep the `Arc`
/// for the lifetime of one query.
pub type SharedAnswerStore = Arc<ArcSwap<AnswerStore>>;

/// Rebuilds the answer store from its source and publishes it atomically.
pub struct ReloadAnswersUseCase {
    source: Arc<dyn AnswersSource>,
    store: SharedAnswerStore,
    reload_lock: Mutex<()>,
}

impl ReloadAnswersUseCase {
    pub fn new(source: Arc<dyn AnswersSource>, store: SharedAnswerStore) -> Self {
        Self {
            source,
            store,
            reload_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &SharedAnswerStore {
        &self.store
    }

    /// Loads and installs a new snapshot. On error the installed snapshot is left untouched.
    pub async fn execute(&self) -> Result<Arc<AnswerStore>, ConfigError> {
        let _guard = self.reload_lock.lock().await;

        match self.build().await {
            Ok(store) => {
                let store = Arc::new(store);
                self.store.store(Arc::clone(&store));
                info!(
                    source = %self.source.describe(),
                    selectors = store.selector_count(),
                    record_sets = store.record_set_count(),
                    recurse_targets = store.recurse_target_count(),
                    "Answers loaded"
                );
                Ok(store)
            }
            Err(e) => {
                error!(source = %self.source.describe(), error = %e, "Failed to load answers, keeping previous");
                Err(e)
            }
        }
    }

    async fn build(&self) -> Result<AnswerStore, ConfigError> {
        let contents = self.source.load().await?;
        AnswerStore::build(&contents)
    }
}
