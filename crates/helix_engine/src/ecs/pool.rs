//! Generic object pool
//!
//! Reuse container for frequently created/destroyed objects (sparks,
//! particles, transient effects). At sustained spawn rates, allocating
//! per spawn causes frame-time spikes; the pool amortizes allocation to
//! a one-time warm-up and hands out stable [`PoolKey`]s instead of
//! owned objects.
//!
//! Invariants: a key is a member of at most one of {free list, active
//! set}; `release` on a non-active key is a no-op; `acquire` never
//! returns a key that is already active.

use std::collections::HashSet;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable handle to a pooled object
    pub struct PoolKey;
}

/// Factory used when the free list is empty
pub type CreateFn<T> = Box<dyn FnMut() -> T>;

/// Baseline re-initializer run on every acquire.
///
/// Must fully overwrite prior logical state so nothing leaks between
/// reuses; per-spawn fields are stamped by the closure passed to
/// [`Pool::acquire_with`].
pub type ResetFn<T> = Box<dyn Fn(&mut T)>;

/// Generic reuse container for high-churn objects
pub struct Pool<T> {
    objects: SlotMap<PoolKey, T>,
    free: Vec<PoolKey>,
    active: HashSet<PoolKey>,
    create: CreateFn<T>,
    reset: ResetFn<T>,
}

impl<T> Pool<T> {
    /// Create a pool from a factory and a baseline reset function
    pub fn new(create: impl FnMut() -> T + 'static, reset: impl Fn(&mut T) + 'static) -> Self {
        Self {
            objects: SlotMap::with_key(),
            free: Vec::new(),
            active: HashSet::new(),
            create: Box::new(create),
            reset: Box::new(reset),
        }
    }

    /// Pre-create `count` objects on the free list
    pub fn warm_up(&mut self, count: usize) {
        for _ in 0..count {
            let key = self.objects.insert((self.create)());
            self.free.push(key);
        }
    }

    /// Acquire an object: pop the free list, or grow via the factory.
    ///
    /// The baseline reset runs before the key is handed out. Exhaustion
    /// is not an error — the pool grows transparently.
    pub fn acquire(&mut self) -> PoolKey {
        let key = match self.free.pop() {
            Some(key) => key,
            None => self.objects.insert((self.create)()),
        };
        if let Some(object) = self.objects.get_mut(key) {
            (self.reset)(object);
        }
        self.active.insert(key);
        key
    }

    /// Acquire and stamp per-spawn state in one step
    pub fn acquire_with(&mut self, init: impl FnOnce(&mut T)) -> PoolKey {
        let key = self.acquire();
        if let Some(object) = self.objects.get_mut(key) {
            init(object);
        }
        key
    }

    /// Borrow an active object; free objects are not reachable
    pub fn get(&self, key: PoolKey) -> Option<&T> {
        if self.active.contains(&key) {
            self.objects.get(key)
        } else {
            None
        }
    }

    /// Mutably borrow an active object
    pub fn get_mut(&mut self, key: PoolKey) -> Option<&mut T> {
        if self.active.contains(&key) {
            self.objects.get_mut(key)
        } else {
            None
        }
    }

    /// Return an object to the free list.
    ///
    /// Idempotent: releasing a key that is not active (double release,
    /// stale key) is a no-op and returns `false`.
    pub fn release(&mut self, key: PoolKey) -> bool {
        if self.active.remove(&key) {
            self.free.push(key);
            true
        } else {
            false
        }
    }

    /// Move every active object to the free list (level/wave reset)
    pub fn release_all(&mut self) {
        self.free.extend(self.active.drain());
    }

    /// Iterate key/object pairs for every active object
    pub fn iter_active(&self) -> impl Iterator<Item = (PoolKey, &T)> {
        self.objects
            .iter()
            .filter(|(key, _)| self.active.contains(key))
    }

    /// Mutably iterate every active object
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (PoolKey, &mut T)> {
        let active = &self.active;
        self.objects
            .iter_mut()
            .filter(move |(key, _)| active.contains(key))
    }

    /// Number of objects currently held by callers
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Number of objects waiting on the free list
    pub fn available_count(&self) -> usize {
        self.free.len()
    }

    /// Total objects ever created by the factory
    pub fn total_count(&self) -> usize {
        self.objects.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Spark {
        age: f32,
        intensity: f32,
    }

    fn spark_pool() -> Pool<Spark> {
        Pool::new(
            || Spark {
                age: 0.0,
                intensity: 0.0,
            },
            |spark| {
                spark.age = 0.0;
                spark.intensity = 1.0;
            },
        )
    }

    #[test]
    fn test_grows_when_empty() {
        let mut pool = spark_pool();
        let a = pool.acquire();
        let b = pool.acquire();
        assert_ne!(a, b);
        assert_eq!(pool.active_count(), 2);
        assert_eq!(pool.available_count(), 0);
        assert_eq!(pool.total_count(), 2);
    }

    #[test]
    fn test_reuses_released_objects() {
        let mut pool = spark_pool();
        let a = pool.acquire();
        assert!(pool.release(a));
        let b = pool.acquire();
        // Slot reused, no growth.
        assert_eq!(pool.total_count(), 1);
        assert_eq!(pool.active_count(), 1);
        assert!(pool.get(b).is_some());
    }

    #[test]
    fn test_count_invariant_under_churn() {
        let mut pool = spark_pool();
        let mut keys = Vec::new();
        for _ in 0..10 {
            keys.push(pool.acquire());
        }
        for key in keys.drain(..5) {
            pool.release(key);
        }
        for _ in 0..3 {
            keys.push(pool.acquire());
        }
        assert_eq!(
            pool.active_count() + pool.available_count(),
            pool.total_count()
        );
        assert_eq!(pool.total_count(), 10);
    }

    #[test]
    fn test_double_release_is_noop() {
        let mut pool = spark_pool();
        let key = pool.acquire();
        assert!(pool.release(key));
        assert!(!pool.release(key));
        assert_eq!(pool.available_count(), 1);
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn test_reset_overwrites_stale_state() {
        let mut pool = spark_pool();
        let key = pool.acquire();
        pool.get_mut(key).unwrap().age = 99.0;
        pool.release(key);

        let key = pool.acquire();
        let spark = pool.get(key).unwrap();
        assert_eq!(spark.age, 0.0);
        assert_eq!(spark.intensity, 1.0);
    }

    #[test]
    fn test_acquire_with_stamps_spawn_state() {
        let mut pool = spark_pool();
        let key = pool.acquire_with(|spark| spark.intensity = 0.25);
        assert_eq!(pool.get(key).unwrap().intensity, 0.25);
    }

    #[test]
    fn test_released_key_not_reachable() {
        let mut pool = spark_pool();
        let key = pool.acquire();
        pool.release(key);
        assert!(pool.get(key).is_none());
        assert!(pool.get_mut(key).is_none());
    }

    #[test]
    fn test_release_all() {
        let mut pool = spark_pool();
        for _ in 0..4 {
            pool.acquire();
        }
        pool.release_all();
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.available_count(), 4);
        assert_eq!(pool.total_count(), 4);
    }

    #[test]
    fn test_warm_up() {
        let mut pool = spark_pool();
        pool.warm_up(8);
        assert_eq!(pool.available_count(), 8);
        let _key = pool.acquire();
        // Warm pool serves from the free list without growing.
        assert_eq!(pool.total_count(), 8);
    }
}
