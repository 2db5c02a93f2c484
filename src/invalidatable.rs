//! Lazily rebuilt derived data.
//!
//! Holds a cached value plus a dirty flag. Structural mutations call
//! [`Invalidatable::invalidate`]; reads go through
//! [`Invalidatable::get_or_rebuild`], which runs the rebuild function only
//! when the cache is dirty. Any number of invalidations between two reads
//! collapse into a single rebuild.

#[derive(Debug, Clone)]
pub struct Invalidatable<T> {
    value: T,
    dirty: bool,
    rebuild_count: u64,
}

impl<T: Default> Default for Invalidatable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Invalidatable<T> {
    /// Wrap an initial value. Starts dirty so the first read rebuilds.
    pub fn new(value: T) -> Self {
        Self {
            value,
            dirty: true,
            rebuild_count: 0,
        }
    }

    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of rebuilds performed so far
    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    /// Return the cached value, rebuilding it first if dirty
    pub fn get_or_rebuild<F>(&mut self, rebuild: F) -> &T
    where
        F: FnOnce() -> T,
    {
        if self.dirty {
            self.value = rebuild();
            self.dirty = false;
            self.rebuild_count += 1;
        }
        &self.value
    }

    /// Cached value if it is up to date
    pub fn peek(&self) -> Option<&T> {
        if self.dirty {
            None
        } else {
            Some(&self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_read_rebuilds() {
        let mut cache: Invalidatable<u32> = Invalidatable::default();
        assert!(cache.is_dirty());
        assert_eq!(*cache.get_or_rebuild(|| 5), 5);
        assert_eq!(cache.rebuild_count(), 1);
    }

    #[test]
    fn test_invalidations_coalesce() {
        let mut cache = Invalidatable::new(0u32);
        cache.get_or_rebuild(|| 1);
        cache.invalidate();
        cache.invalidate();
        cache.invalidate();
        assert_eq!(cache.peek(), None);
        assert_eq!(*cache.get_or_rebuild(|| 2), 2);
        assert_eq!(*cache.get_or_rebuild(|| 3), 2);
        assert_eq!(cache.rebuild_count(), 2);
        assert_eq!(cache.peek(), Some(&2));
    }
}
