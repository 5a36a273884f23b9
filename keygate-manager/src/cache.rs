//! In-memory license cache with TTL expiry.

use crate::error::LicenseResult;
use keygate_model::License;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Floor applied when the configured TTL is under one minute. The cache can
/// be shortened arbitrarily but never fully disabled.
pub(crate) const TTL_FLOOR_MILLIS: i64 = 10_000;

/// Converts a whole-minute TTL to milliseconds, applying the floor. A TTL
/// too large to represent saturates to "effectively forever".
pub(crate) fn ttl_millis(minutes: u64) -> i64 {
    if minutes < 1 {
        TTL_FLOOR_MILLIS
    } else {
        i64::try_from(minutes)
            .unwrap_or(i64::MAX)
            .saturating_mul(60_000)
    }
}

/// A cached license together with its absolute expiry timestamp.
struct CacheEntry {
    license: Arc<License>,
    expires_at: i64,
}

/// Map from context to cached license, guarded by a single mutex.
///
/// The whole lookup-or-populate sequence runs under the lock, so the map is
/// never observed partially updated and a stale entry is decrypted and
/// verified at most once.
pub(crate) struct LicenseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl_ms: i64,
}

impl LicenseCache {
    pub(crate) fn new(ttl_ms: i64) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl_ms,
        }
    }

    /// Returns the cached license for `context` if fresh at `now`, otherwise
    /// runs `populate` and stores its result under the same lock.
    ///
    /// A `None` from `populate` (no license exists) evicts any stale entry
    /// and is not cached.
    pub(crate) fn get_or_populate(
        &self,
        context: &str,
        now: i64,
        populate: impl FnOnce() -> LicenseResult<Option<Arc<License>>>,
    ) -> LicenseResult<Option<Arc<License>>> {
        let mut entries = self.entries.lock().expect("license cache lock poisoned");

        if let Some(entry) = entries.get(context) {
            if now < entry.expires_at {
                debug!(context, "license cache hit");
                return Ok(Some(Arc::clone(&entry.license)));
            }
            debug!(context, "license cache entry expired");
        }

        match populate()? {
            Some(license) => {
                entries.insert(
                    context.to_string(),
                    CacheEntry {
                        license: Arc::clone(&license),
                        expires_at: now.saturating_add(self.ttl_ms),
                    },
                );
                Ok(Some(license))
            }
            None => {
                entries.remove(context);
                Ok(None)
            }
        }
    }

    /// Drops all entries; subsequent lookups recompute from scratch.
    pub(crate) fn clear(&self) {
        self.entries
            .lock()
            .expect("license cache lock poisoned")
            .clear();
    }
}
