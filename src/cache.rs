use crate::api::Resource;
use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug)]
pub struct CachedPayload<T> {
    pub value: Arc<T>,
    pub fetched_at: DateTime<Utc>,
}

impl<T> CachedPayload<T> {
    pub fn is_stale(&self, max_age: Duration, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.fetched_at) >= max_age
    }
}

/// Time-based cache for one resource kind, keyed by season (`None` is the
/// all-time scope). Entries are never evicted, only replaced once stale.
#[derive(Debug)]
pub struct QueryCache<T> {
    resource: Resource,
    max_age: Duration,
    entries: Mutex<HashMap<Option<u32>, CachedPayload<T>>>,
}

impl<T> QueryCache<T> {
    pub fn new(resource: Resource) -> Self {
        let max_age = Duration::from_std(resource.stale_after()).unwrap_or_else(|_| Duration::zero());
        QueryCache {
            resource,
            max_age,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<Option<u32>, CachedPayload<T>>> {
        // a panic while holding the lock cannot leave a half-written entry
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get_fresh_at(&self, season: Option<u32>, now: DateTime<Utc>) -> Option<Arc<T>> {
        self.entries()
            .get(&season)
            .filter(|entry| !entry.is_stale(self.max_age, now))
            .map(|entry| Arc::clone(&entry.value))
    }

    pub fn insert_at(&self, season: Option<u32>, value: T, now: DateTime<Utc>) -> Arc<T> {
        let value = Arc::new(value);
        self.entries().insert(
            season,
            CachedPayload {
                value: Arc::clone(&value),
                fetched_at: now,
            },
        );
        value
    }

    pub fn invalidate(&self, season: Option<u32>) {
        self.entries().remove(&season);
    }

    /// Returns the cached payload while it is fresh, otherwise runs `fetch`
    /// and stores its result. Failed fetches leave the cache untouched.
    pub fn get_or_fetch<F>(&self, season: Option<u32>, fetch: F) -> Result<Arc<T>, AppError>
    where
        F: FnOnce() -> Result<T, AppError>,
    {
        if let Some(value) = self.get_fresh_at(season, Utc::now()) {
            debug!(resource = %self.resource, ?season, "cache hit");
            return Ok(value);
        }

        debug!(resource = %self.resource, ?season, "cache miss");
        let value = fetch()?;
        Ok(self.insert_at(season, value, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_is_fresh_inside_window() {
        let cache = QueryCache::new(Resource::Stats);
        let t0 = Utc::now();
        cache.insert_at(Some(1), 42u32, t0);

        let hit = cache.get_fresh_at(Some(1), t0 + Duration::seconds(19));
        assert_eq!(hit.as_deref(), Some(&42));
    }

    #[test]
    fn entry_expires_after_window() {
        let cache = QueryCache::new(Resource::Matches);
        let t0 = Utc::now();
        cache.insert_at(None, "matches".to_string(), t0);

        assert!(cache.get_fresh_at(None, t0 + Duration::seconds(2)).is_none());
    }

    #[test]
    fn seasons_are_cached_separately() {
        let cache = QueryCache::new(Resource::Placement);
        let t0 = Utc::now();
        cache.insert_at(Some(1), 1u8, t0);

        assert!(cache.get_fresh_at(Some(2), t0).is_none());
        assert!(cache.get_fresh_at(None, t0).is_none());
    }

    #[test]
    fn failed_fetch_does_not_replace_entry() {
        let cache: QueryCache<u32> = QueryCache::new(Resource::Stats);
        let result = cache.get_or_fetch(None, || Err(AppError::HttpError("offline".into())));
        assert!(result.is_err());

        let value = cache.get_or_fetch(None, || Ok(7)).unwrap();
        assert_eq!(*value, 7);
        // second call must be served from the cache
        let value = cache
            .get_or_fetch(None, || panic!("fetched twice"))
            .unwrap();
        assert_eq!(*value, 7);
    }

    #[test]
    fn invalidate_forces_refetch() {
        let cache = QueryCache::new(Resource::TrueSkill);
        cache.insert_at(None, 1u32, Utc::now());
        cache.invalidate(None);
        assert!(cache.get_fresh_at(None, Utc::now()).is_none());
    }
}
