use std::sync::Arc;

use jobboard_infra::lifecycle::LifecycleEngine;
use jobboard_infra::store::{EntityStore, InMemoryEntityStore};
use jobboard_trash::RetentionPolicy;

/// Everything a handler needs, shared behind one `Arc`.
pub struct AppServices {
    pub store: Arc<dyn EntityStore>,
    pub engine: Arc<LifecycleEngine>,
}

impl AppServices {
    pub fn new(store: Arc<dyn EntityStore>, policy: RetentionPolicy) -> Self {
        let engine = Arc::new(LifecycleEngine::new(store.clone(), policy));
        Self { store, engine }
    }

    pub fn in_memory(policy: RetentionPolicy) -> Self {
        Self::new(InMemoryEntityStore::arc(), policy)
    }
}
