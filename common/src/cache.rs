//! Time-based caching of query results.

use std::{
    collections::HashMap,
    hash::Hash,
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

/// Source of the current moment for a [`Cache`].
///
/// Injected explicitly so expiry can be driven deterministically in tests.
pub trait Clock {
    /// Returns the current moment.
    fn now(&self) -> Instant;
}

/// [`Clock`] reading the system's monotonic time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Cache of values living a fixed time after insertion.
///
/// Entries are unbounded in count and never evicted: expiry is checked at
/// read time only, and writes elsewhere never invalidate entries, so a
/// reader may observe values up to the TTL old.
#[derive(Debug)]
pub struct Cache<K, V, C = SystemClock> {
    /// Cached entries.
    entries: Mutex<HashMap<K, Entry<V>>>,

    /// Time entries of this [`Cache`] stay fresh after insertion.
    ttl: Duration,

    /// [`Clock`] expiry is measured against.
    clock: C,
}

/// Single [`Cache`] entry.
#[derive(Clone, Debug)]
struct Entry<V> {
    /// Cached value.
    value: V,

    /// Moment the value was stored at.
    stored_at: Instant,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Creates a new empty [`Cache`] with the provided TTL, measured against
    /// the [`SystemClock`].
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<K, V, C> Cache<K, V, C>
where
    K: Eq + Hash,
    V: Clone,
    C: Clock,
{
    /// Creates a new empty [`Cache`] with the provided TTL and [`Clock`].
    #[must_use]
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Returns the cached value for the provided key, if it's still fresh.
    ///
    /// An expired entry is left in place: it may still be served by
    /// [`Cache::get_stale()`] and is overwritten by the next
    /// [`Cache::insert()`].
    #[must_use]
    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        self.lock_entries()
            .get(key)
            .filter(|e| now.duration_since(e.stored_at) < self.ttl)
            .map(|e| e.value.clone())
    }

    /// Returns the cached value for the provided key regardless of its
    /// freshness.
    #[must_use]
    pub fn get_stale(&self, key: &K) -> Option<V> {
        self.lock_entries().get(key).map(|e| e.value.clone())
    }

    /// Stores the provided value with a fresh timestamp, overwriting any
    /// previous entry under the same key.
    pub fn insert(&self, key: K, value: V) {
        let stored_at = self.clock.now();
        drop(
            self.lock_entries()
                .insert(key, Entry { value, stored_at }),
        );
    }

    /// Locks the entries of this [`Cache`].
    fn lock_entries(
        &self,
    ) -> std::sync::MutexGuard<'_, HashMap<K, Entry<V>>> {
        // A poisoned map is still well-formed: value assignment is atomic at
        // the entry level.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod spec {
    use std::{
        cell::Cell,
        time::{Duration, Instant},
    };

    use super::{Cache, Clock};

    /// [`Clock`] advanced by hand.
    struct ManualClock(Cell<Instant>);

    impl ManualClock {
        fn start() -> Self {
            Self(Cell::new(Instant::now()))
        }

        fn advance(&self, by: Duration) {
            self.0.set(self.0.get() + by);
        }
    }

    impl Clock for &ManualClock {
        fn now(&self) -> Instant {
            self.0.get()
        }
    }

    const TTL: Duration = Duration::from_secs(300);

    #[test]
    fn serves_fresh_entries() {
        let clock = ManualClock::start();
        let cache = Cache::with_clock(TTL, &clock);

        cache.insert("key", 1);
        assert_eq!(cache.get(&"key"), Some(1));

        clock.advance(TTL - Duration::from_secs(1));
        assert_eq!(cache.get(&"key"), Some(1));
    }

    #[test]
    fn expires_after_ttl() {
        let clock = ManualClock::start();
        let cache = Cache::with_clock(TTL, &clock);

        cache.insert("key", 1);
        clock.advance(TTL);
        assert_eq!(cache.get(&"key"), None);
    }

    #[test]
    fn expired_entries_remain_for_stale_reads() {
        let clock = ManualClock::start();
        let cache = Cache::with_clock(TTL, &clock);

        cache.insert("key", 1);
        clock.advance(TTL * 2);
        assert_eq!(cache.get(&"key"), None);
        assert_eq!(cache.get_stale(&"key"), Some(1));
    }

    #[test]
    fn insert_refreshes_the_timestamp() {
        let clock = ManualClock::start();
        let cache = Cache::with_clock(TTL, &clock);

        cache.insert("key", 1);
        clock.advance(TTL);
        cache.insert("key", 2);
        assert_eq!(cache.get(&"key"), Some(2));
    }

    #[test]
    fn fresh_hit_skips_the_fetch() {
        let clock = ManualClock::start();
        let cache = Cache::with_clock(TTL, &clock);
        let fetches = Cell::new(0);

        let mut lookup = |key: &'static str| {
            cache.get(&key).unwrap_or_else(|| {
                fetches.set(fetches.get() + 1);
                cache.insert(key, 42);
                42
            })
        };

        assert_eq!(lookup("filters"), 42);
        assert_eq!(lookup("filters"), 42);
        assert_eq!(fetches.get(), 1);

        clock.advance(TTL);
        assert_eq!(lookup("filters"), 42);
        assert_eq!(fetches.get(), 2);
    }
}
