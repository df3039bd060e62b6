//! Compute-once availability cache.
//!
//! The provider owns the only mutable shared state of the service: a cell
//! that is empty at startup and filled by the first successful lookup. The
//! cell is guarded, so concurrent first requests wait for a single in-flight
//! lookup instead of each running their own. A failed lookup leaves the cell
//! empty and the error goes to the caller; the next call tries again.
//! Nothing ever clears a filled cell.

use crate::source::AvailabilitySource;
use efa_common::{Result, VersionedAvailability};
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

pub struct AvailabilityProvider {
    source: Arc<dyn AvailabilitySource>,
    cell: OnceCell<Arc<VersionedAvailability>>,
    lookups: AtomicUsize,
}

impl AvailabilityProvider {
    pub fn new(source: impl AvailabilitySource + 'static) -> Self {
        Self::from_shared(Arc::new(source))
    }

    pub fn from_shared(source: Arc<dyn AvailabilitySource>) -> Self {
        Self {
            source,
            cell: OnceCell::new(),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Return the cached data, running the lookup first if the cache is empty.
    pub fn ensure_loaded(&self) -> Result<Arc<VersionedAvailability>> {
        self.cell
            .get_or_try_init(|| self.lookup())
            .map(Arc::clone)
    }

    fn lookup(&self) -> Result<Arc<VersionedAvailability>> {
        let attempt = self.lookups.fetch_add(1, Ordering::SeqCst) + 1;
        let started = Instant::now();

        match self.source.load() {
            Ok(data) => {
                info!(
                    source = %self.source.name(),
                    versions = data.len(),
                    attempt,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "availability loaded"
                );
                Ok(Arc::new(data))
            }
            Err(e) => {
                error!(
                    source = %self.source.name(),
                    attempt,
                    error = %e,
                    "availability lookup failed"
                );
                Err(e)
            }
        }
    }

    /// Whether a lookup has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// How many times the source has been invoked, failures included.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{FnSource, StaticSource};
    use efa_common::{CategoryMap, Error, OperationDescriptor};
    use std::sync::atomic::AtomicBool;
    use std::sync::Barrier;
    use std::thread;
    use std::time::Duration;

    fn sample() -> VersionedAvailability {
        VersionedAvailability::new().with_version(
            "v1",
            CategoryMap::new().with_category(
                "apps",
                vec![OperationDescriptor::new("list", "get", "/app")],
            ),
        )
    }

    #[test]
    fn test_sequential_calls_look_up_once() {
        let provider = AvailabilityProvider::new(StaticSource::new(sample()));
        assert!(!provider.is_loaded());
        assert_eq!(provider.lookup_count(), 0);

        let first = provider.ensure_loaded().unwrap();
        for _ in 0..10 {
            let again = provider.ensure_loaded().unwrap();
            assert!(Arc::ptr_eq(&first, &again));
        }
        assert!(provider.is_loaded());
        assert_eq!(provider.lookup_count(), 1);
    }

    #[test]
    fn test_failure_leaves_cache_empty_and_retries() {
        let fail = Arc::new(AtomicBool::new(true));
        let flag = fail.clone();
        let provider = AvailabilityProvider::new(FnSource::new("flaky", move || {
            if flag.load(Ordering::SeqCst) {
                Err(Error::LookupFailed {
                    source_name: "flaky".into(),
                    reason: "unreachable".into(),
                })
            } else {
                Ok(sample())
            }
        }));

        let err = provider.ensure_loaded().unwrap_err();
        assert!(matches!(err, Error::LookupFailed { .. }));
        assert!(!provider.is_loaded());

        fail.store(false, Ordering::SeqCst);
        let data = provider.ensure_loaded().unwrap();
        assert!(data.category_map("v1").is_some());
        assert_eq!(provider.lookup_count(), 2);

        // Filled for good: a later failure of the source is never observed.
        fail.store(true, Ordering::SeqCst);
        assert!(provider.ensure_loaded().is_ok());
        assert_eq!(provider.lookup_count(), 2);
    }

    #[test]
    fn test_concurrent_first_calls_share_one_lookup() {
        let provider = Arc::new(AvailabilityProvider::new(FnSource::new("slow", || {
            thread::sleep(Duration::from_millis(50));
            Ok(sample())
        })));
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let provider = provider.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    provider.ensure_loaded().map(|d| d.len())
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), 1);
        }
        assert_eq!(provider.lookup_count(), 1);
    }
}
