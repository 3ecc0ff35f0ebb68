// # Response Cache Implementations
//
// This module provides implementations of the ResponseCache trait.

pub mod memory;

pub use memory::MemoryCache;

use std::sync::Arc;

use crate::config::CacheConfig;
use crate::traits::ResponseCache;

/// Build the cache described by `config`, if any
pub fn from_config(config: CacheConfig) -> Option<Arc<dyn ResponseCache>> {
    match config {
        CacheConfig::Disabled => None,
        CacheConfig::Memory => Some(Arc::new(MemoryCache::new())),
    }
}
