use std::sync::atomic::{AtomicI64, Ordering};

/// Admits each webhook update at most once.
///
/// An update passes iff its id is strictly greater than every id seen so
/// far. `fetch_max` makes check-and-advance a single atomic step, so
/// overlapping deliveries of the same id admit exactly one of them.
#[derive(Debug, Default)]
pub struct Dedup {
    last_seen: AtomicI64,
}

impl Dedup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `update_id`; true when it should be dispatched
    pub fn admit(&self, update_id: i64) -> bool {
        let previous = self.last_seen.fetch_max(update_id, Ordering::AcqRel);
        update_id > previous
    }

    pub fn last_seen(&self) -> i64 {
        self.last_seen.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;

    #[test]
    fn repeated_id_is_rejected() {
        let dedup = Dedup::new();
        assert!(dedup.admit(42));
        assert!(!dedup.admit(42));
        assert!(!dedup.admit(41));
        assert!(dedup.admit(43));
        assert_eq!(dedup.last_seen(), 43);
    }

    #[test]
    fn zero_is_never_admitted() {
        assert!(!Dedup::new().admit(0));
    }

    #[test]
    fn concurrent_duplicates_admit_once() {
        let dedup = Arc::new(Dedup::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let dedup = Arc::clone(&dedup);
                std::thread::spawn(move || dedup.admit(7))
            })
            .collect();
        let admitted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|admitted| *admitted)
            .count();
        assert_eq!(admitted, 1);
    }

    proptest! {
        #[test]
        fn admits_exactly_the_prefix_maxima(ids in prop::collection::vec(0i64..50, 0..60)) {
            let dedup = Dedup::new();
            let mut max_seen = 0;
            for id in ids {
                let expected = id > max_seen;
                prop_assert_eq!(dedup.admit(id), expected);
                max_seen = max_seen.max(id);
            }
        }
    }
}
