//! Generic recyclable-object pool.
//!
//! [`ObjectPool`] hands out and reclaims mutable entities without allocating
//! on the hot path: entities live in a dense slot array, a free list tracks
//! reusable indices, and [`PoolHandle`]s are plain slot indices. Acquiring
//! from a non-empty free list and releasing back to it are both O(1) and
//! allocation-free; the pool only allocates when it grows.
//!
//! Growth policy is configurable: unbounded pools (the default) grow
//! transparently through their factory when exhausted, while pools built
//! with [`ObjectPool::with_capacity_limit`] refuse further growth and report
//! exhaustion by returning `None` from [`ObjectPool::acquire`].

/// Handle to a pooled entity. Valid until the entity is released; accessing
/// a released handle yields `None` rather than another caller's entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolHandle(usize);

impl PoolHandle {
    /// Raw slot index, exposed for diagnostics.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Read-only pool occupancy counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Entities on the free list.
    pub available: usize,
    /// Entities currently checked out.
    pub active: usize,
    /// All entities owned by the pool. Always `available + active`.
    pub total: usize,
}

/// Recyclable arena of reusable mutable entities.
pub struct ObjectPool<T> {
    factory: Box<dyn FnMut() -> T>,
    slots: Vec<T>,
    in_use: Vec<bool>,
    free: Vec<usize>,
    active_count: usize,
    max_size: Option<usize>,
}

impl<T> ObjectPool<T> {
    /// Creates a pool pre-populated with `initial_size` entities from
    /// `factory`.
    pub fn new(factory: impl FnMut() -> T + 'static, initial_size: usize) -> Self {
        let mut pool = Self {
            factory: Box::new(factory),
            slots: Vec::with_capacity(initial_size),
            in_use: Vec::with_capacity(initial_size),
            free: Vec::with_capacity(initial_size),
            active_count: 0,
            max_size: None,
        };
        pool.grow(initial_size);
        pool
    }

    /// Creates a pool with a hard capacity cap. The initial population is
    /// clamped to the cap; once `total` reaches the cap, `acquire` reports
    /// exhaustion instead of growing.
    pub fn with_capacity_limit(
        factory: impl FnMut() -> T + 'static,
        initial_size: usize,
        max_size: usize,
    ) -> Self {
        let mut pool = Self {
            factory: Box::new(factory),
            slots: Vec::with_capacity(initial_size.min(max_size)),
            in_use: Vec::with_capacity(initial_size.min(max_size)),
            free: Vec::with_capacity(initial_size.min(max_size)),
            active_count: 0,
            max_size: Some(max_size),
        };
        pool.grow(initial_size.min(max_size));
        pool
    }

    /// Checks out an entity, reusing a free slot or growing the pool.
    ///
    /// Returns `None` only when a capacity cap is set and every slot is
    /// active; unbounded pools always succeed. The returned handle is not
    /// shared with any other active handle.
    pub fn acquire(&mut self) -> Option<PoolHandle> {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                if self.at_capacity() {
                    return None;
                }
                self.slots.push((self.factory)());
                self.in_use.push(false);
                self.slots.len() - 1
            }
        };
        self.in_use[index] = true;
        self.active_count += 1;
        Some(PoolHandle(index))
    }

    /// [`ObjectPool::acquire`] followed by running `init` on the entity.
    pub fn acquire_with(&mut self, init: impl FnOnce(&mut T)) -> Option<PoolHandle> {
        let handle = self.acquire()?;
        init(&mut self.slots[handle.0]);
        Some(handle)
    }

    /// Shared access to an active entity. `None` for released or
    /// out-of-range handles.
    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        if self.is_active(handle) {
            Some(&self.slots[handle.0])
        } else {
            None
        }
    }

    /// Mutable access to an active entity. `None` for released or
    /// out-of-range handles.
    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        if self.is_active(handle) {
            Some(&mut self.slots[handle.0])
        } else {
            None
        }
    }

    /// True if `handle` refers to a currently checked-out entity.
    pub fn is_active(&self, handle: PoolHandle) -> bool {
        self.in_use.get(handle.0).copied().unwrap_or(false)
    }

    /// Returns an entity to the free list. Releasing a handle that is not
    /// active is a safe no-op: it cannot corrupt the free list, so a
    /// double release leaves the pool unchanged.
    pub fn release(&mut self, handle: PoolHandle) {
        if !self.is_active(handle) {
            return;
        }
        self.in_use[handle.0] = false;
        self.free.push(handle.0);
        self.active_count -= 1;
    }

    /// Runs `reset` on the entity, then releases it. No-op (and `reset` is
    /// not called) for non-active handles.
    pub fn release_with(&mut self, handle: PoolHandle, reset: impl FnOnce(&mut T)) {
        if !self.is_active(handle) {
            return;
        }
        reset(&mut self.slots[handle.0]);
        self.release(handle);
    }

    /// Releases every active entity (bulk teardown, e.g. scene reset).
    pub fn release_all(&mut self) {
        for (index, used) in self.in_use.iter_mut().enumerate() {
            if *used {
                *used = false;
                self.free.push(index);
            }
        }
        self.active_count = 0;
    }

    /// Pushes `count` freshly-factoried entities onto the free list without
    /// touching active entities. Capped pools grow to at most their cap.
    pub fn expand(&mut self, count: usize) {
        let count = match self.max_size {
            Some(max) => count.min(max.saturating_sub(self.slots.len())),
            None => count,
        };
        self.grow(count);
    }

    /// Runs `cleanup` over every entity, active and free, then empties the
    /// pool. The pool is spent afterward: `acquire` returns `None` forever.
    pub fn dispose(&mut self, mut cleanup: impl FnMut(&mut T)) {
        for entity in &mut self.slots {
            cleanup(entity);
        }
        self.slots.clear();
        self.in_use.clear();
        self.free.clear();
        self.active_count = 0;
        self.max_size = Some(0);
    }

    /// Current occupancy counts.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            available: self.free.len(),
            active: self.active_count,
            total: self.slots.len(),
        }
    }

    fn at_capacity(&self) -> bool {
        self.max_size
            .is_some_and(|max| self.slots.len() >= max)
    }

    fn grow(&mut self, count: usize) {
        for _ in 0..count {
            self.slots.push((self.factory)());
            self.in_use.push(false);
            self.free.push(self.slots.len() - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter_pool(initial: usize) -> ObjectPool<u32> {
        let mut next = 0;
        ObjectPool::new(
            move || {
                next += 1;
                next
            },
            initial,
        )
    }

    fn assert_conserved(pool: &ObjectPool<u32>) {
        let s = pool.stats();
        assert_eq!(
            s.available + s.active,
            s.total,
            "conservation violated: {s:?}"
        );
    }

    #[test]
    fn construction_prepopulates_free_list() {
        let pool = counter_pool(8);
        assert_eq!(
            pool.stats(),
            PoolStats {
                available: 8,
                active: 0,
                total: 8
            }
        );
    }

    #[test]
    fn acquire_moves_entity_to_active() {
        let mut pool = counter_pool(4);
        let handle = pool.acquire().unwrap();
        assert!(pool.is_active(handle));
        assert_eq!(pool.stats().active, 1);
        assert_eq!(pool.stats().available, 3);
        assert_conserved(&pool);
    }

    #[test]
    fn acquire_grows_transparently_when_exhausted() {
        // Initial 2, acquire three times: the third acquire must grow the
        // pool by one rather than fail.
        let mut pool = counter_pool(2);
        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();
        let c = pool.acquire().unwrap();
        assert_eq!(
            pool.stats(),
            PoolStats {
                available: 0,
                active: 3,
                total: 3
            }
        );
        assert!(a != b && b != c && a != c, "handles must be exclusive");
    }

    #[test]
    fn release_returns_entity_to_free_list() {
        let mut pool = counter_pool(2);
        let handle = pool.acquire().unwrap();
        pool.release(handle);
        assert_eq!(pool.stats().active, 0);
        assert_eq!(pool.stats().available, 2);
        assert!(!pool.is_active(handle));
        assert_conserved(&pool);
    }

    #[test]
    fn double_release_is_a_noop() {
        let mut pool = counter_pool(2);
        let handle = pool.acquire().unwrap();
        pool.release(handle);
        let before = pool.stats();
        pool.release(handle);
        pool.release(handle);
        assert_eq!(pool.stats(), before, "double release changed stats");
    }

    #[test]
    fn release_of_never_acquired_handle_is_a_noop() {
        let mut pool = counter_pool(1);
        let before = pool.stats();
        pool.release(PoolHandle(500));
        assert_eq!(pool.stats(), before);
    }

    #[test]
    fn released_handle_no_longer_dereferences() {
        let mut pool = counter_pool(1);
        let handle = pool.acquire().unwrap();
        assert!(pool.get(handle).is_some());
        pool.release(handle);
        assert!(pool.get(handle).is_none());
        assert!(pool.get_mut(handle).is_none());
    }

    #[test]
    fn acquire_with_runs_initializer() {
        let mut pool = counter_pool(1);
        let handle = pool.acquire_with(|v| *v = 99).unwrap();
        assert_eq!(*pool.get(handle).unwrap(), 99);
    }

    #[test]
    fn release_with_runs_reset_before_freeing() {
        let mut pool = counter_pool(1);
        let handle = pool.acquire_with(|v| *v = 42).unwrap();
        let mut saw = 0;
        pool.release_with(handle, |v| {
            saw = *v;
            *v = 0;
        });
        assert_eq!(saw, 42);
        assert!(!pool.is_active(handle));
    }

    #[test]
    fn release_with_skips_reset_for_inactive_handle() {
        let mut pool = counter_pool(1);
        let handle = pool.acquire().unwrap();
        pool.release(handle);
        let mut called = false;
        pool.release_with(handle, |_| called = true);
        assert!(!called, "reset ran for an inactive handle");
    }

    #[test]
    fn release_all_frees_every_active_entity() {
        let mut pool = counter_pool(3);
        for _ in 0..5 {
            pool.acquire().unwrap();
        }
        assert_eq!(pool.stats().active, 5);
        pool.release_all();
        assert_eq!(pool.stats().active, 0);
        assert_eq!(pool.stats().available, pool.stats().total);
        assert_conserved(&pool);
    }

    #[test]
    fn expand_adds_free_entities_without_touching_active() {
        let mut pool = counter_pool(2);
        let handle = pool.acquire_with(|v| *v = 7).unwrap();
        pool.expand(3);
        assert_eq!(
            pool.stats(),
            PoolStats {
                available: 4,
                active: 1,
                total: 5
            }
        );
        assert_eq!(*pool.get(handle).unwrap(), 7);
    }

    #[test]
    fn dispose_runs_cleanup_on_every_entity_then_empties() {
        let mut pool = counter_pool(3);
        pool.acquire().unwrap();
        pool.acquire().unwrap();
        let mut cleaned = 0;
        pool.dispose(|_| cleaned += 1);
        assert_eq!(cleaned, 3, "cleanup must visit active and free entities");
        assert_eq!(
            pool.stats(),
            PoolStats {
                available: 0,
                active: 0,
                total: 0
            }
        );
        assert!(pool.acquire().is_none(), "disposed pool must not grow");
    }

    #[test]
    fn capped_pool_reports_exhaustion_instead_of_growing() {
        let mut pool = ObjectPool::with_capacity_limit(|| 0u32, 2, 3);
        assert!(pool.acquire().is_some());
        assert!(pool.acquire().is_some());
        // Third acquire grows to the cap.
        assert!(pool.acquire().is_some());
        assert_eq!(pool.stats().total, 3);
        // Cap reached: exhaustion is surfaced, not silent growth.
        assert!(pool.acquire().is_none());
        assert_eq!(pool.stats().total, 3);
    }

    #[test]
    fn capped_pool_recovers_after_release() {
        let mut pool = ObjectPool::with_capacity_limit(|| 0u32, 1, 1);
        let handle = pool.acquire().unwrap();
        assert!(pool.acquire().is_none());
        pool.release(handle);
        assert!(pool.acquire().is_some());
    }

    #[test]
    fn expand_respects_capacity_cap() {
        let mut pool = ObjectPool::with_capacity_limit(|| 0u32, 1, 3);
        pool.expand(10);
        assert_eq!(pool.stats().total, 3);
    }

    #[test]
    fn capped_initial_population_is_clamped() {
        let pool = ObjectPool::with_capacity_limit(|| 0u32, 10, 4);
        assert_eq!(pool.stats().total, 4);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Conservation holds at every observation point of an
            /// arbitrary acquire/release interleaving, and total only
            /// moves when an acquire hits an empty free list.
            #[test]
            fn conservation_under_random_interleaving(ops in prop::collection::vec(any::<bool>(), 1..200)) {
                let mut pool = counter_pool(4);
                let mut handles: Vec<PoolHandle> = Vec::new();
                for (i, acquire) in ops.into_iter().enumerate() {
                    let before_total = pool.stats().total;
                    if acquire {
                        let free_before = pool.stats().available;
                        let handle = pool.acquire().unwrap();
                        handles.push(handle);
                        if free_before > 0 {
                            prop_assert_eq!(pool.stats().total, before_total,
                                "total changed without growth at op {}", i);
                        } else {
                            prop_assert_eq!(pool.stats().total, before_total + 1,
                                "growth not observable at op {}", i);
                        }
                    } else if let Some(handle) = handles.pop() {
                        pool.release(handle);
                        prop_assert_eq!(pool.stats().total, before_total,
                            "release changed total at op {}", i);
                    }
                    let s = pool.stats();
                    prop_assert_eq!(s.available + s.active, s.total,
                        "conservation violated at op {}: {:?}", i, s);
                    prop_assert_eq!(s.active, handles.len());
                }
            }

            /// Every live handle maps to a distinct slot.
            #[test]
            fn active_handles_are_exclusive(extra in 0usize..50) {
                let mut pool = counter_pool(2);
                let handles: Vec<PoolHandle> =
                    (0..2 + extra).map(|_| pool.acquire().unwrap()).collect();
                let mut indices: Vec<usize> = handles.iter().map(|h| h.index()).collect();
                indices.sort_unstable();
                indices.dedup();
                prop_assert_eq!(indices.len(), handles.len(), "duplicate slot handed out");
            }
        }
    }
}
