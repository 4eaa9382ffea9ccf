//! Application state - the template registry shared by all workers.
//!
//! `store` owns every saved template and never evicts. `template_cache` sits
//! in front of it for reads and may drop entries on capacity or expiry; a
//! miss falls through to the store. Every write goes through the schema
//! validator first.
//! - `templates` - registry operations on `AppState`

mod templates;

use std::collections::HashMap;
use std::sync::Arc;

use moka::future::Cache;
use parking_lot::RwLock;

use crate::config::ServerConfig;
use crate::template::model::DocumentTemplate;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<HashMap<String, DocumentTemplate>>>,
    pub template_cache: Cache<String, DocumentTemplate>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        let mut builder = Cache::builder().max_capacity(config.template_cache_capacity);
        if let Some(ttl) = config.template_cache_ttl {
            builder = builder.time_to_live(ttl);
        }

        log::info!(
            "Template registry ready (cache capacity {}, ttl {:?})",
            config.template_cache_capacity,
            config.template_cache_ttl
        );

        AppState {
            store: Arc::new(RwLock::new(HashMap::new())),
            template_cache: builder.build(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&ServerConfig::default())
    }
}
