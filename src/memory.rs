//! Bounded resource pool for effect staging data.
//!
//! [`MemoryManager`] holds byte-sized resources (vertex/instance staging
//! buffers, texture uploads, generated geometry) keyed by string, with
//! capacity-based eviction. Allocation is an explicit state transition
//! that either succeeds or returns an error; the pool never exceeds its
//! configured capacity.
//!
//! Eviction is deliberately coarse: an allocation that would overflow the
//! pool clears the *entire* pool before retrying. All access happens
//! synchronously on the host thread, so no locking is involved.

use rustc_hash::FxHashMap;

use crate::error::AnimaError;

/// Default pool capacity: 256 MiB.
pub const DEFAULT_MAX_USAGE: usize = 256 * 1024 * 1024;

/// Which keyed store a resource lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Raw staging buffers.
    Buffer,
    /// Texture pixel data.
    Texture,
    /// Generated geometry (vertices/indices).
    Geometry,
}

/// Capacity-bounded keyed store of reusable resources.
pub struct MemoryManager {
    buffers: FxHashMap<String, Vec<u8>>,
    textures: FxHashMap<String, Vec<u8>>,
    geometries: FxHashMap<String, Vec<u8>>,
    current_usage: usize,
    max_usage: usize,
}

impl MemoryManager {
    /// Pool with the default 256 MiB capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_USAGE)
    }

    /// Pool with an explicit byte capacity.
    #[must_use]
    pub fn with_capacity(max_usage: usize) -> Self {
        Self {
            buffers: FxHashMap::default(),
            textures: FxHashMap::default(),
            geometries: FxHashMap::default(),
            current_usage: 0,
            max_usage,
        }
    }

    /// Allocate a zeroed resource of `size` bytes under `key`.
    ///
    /// If the allocation would overflow the pool, the entire pool is
    /// evicted first and the allocation retried. Re-allocating an
    /// existing key releases the old resource.
    ///
    /// # Errors
    ///
    /// Returns [`AnimaError::PoolExhausted`] when `size` alone exceeds
    /// the pool capacity; the pool is left unchanged in that case.
    pub fn try_allocate(
        &mut self,
        kind: ResourceKind,
        key: &str,
        size: usize,
    ) -> Result<(), AnimaError> {
        if size > self.max_usage {
            return Err(AnimaError::PoolExhausted {
                requested: size,
                max_usage: self.max_usage,
            });
        }

        // Replacing an existing key must not double-count its bytes.
        let _ = self.release(kind, key);

        if self.current_usage + size > self.max_usage {
            log::warn!(
                "memory pool overflow ({} + {size} > {}), evicting pool",
                self.current_usage,
                self.max_usage
            );
            self.cleanup();
        }

        let _ = self.store_mut(kind).insert(key.to_owned(), vec![0; size]);
        self.current_usage += size;
        debug_assert!(self.current_usage <= self.max_usage);
        Ok(())
    }

    /// Convenience wrapper matching the buffer-allocation contract:
    /// returns the allocated bytes, or `None` when the request can never
    /// fit (pool unchanged).
    pub fn allocate_buffer(
        &mut self,
        key: &str,
        size: usize,
    ) -> Option<&mut [u8]> {
        self.try_allocate(ResourceKind::Buffer, key, size).ok()?;
        self.buffers.get_mut(key).map(Vec::as_mut_slice)
    }

    /// Release the resource under `key`, returning whether it existed.
    pub fn release(&mut self, kind: ResourceKind, key: &str) -> bool {
        if let Some(resource) = self.store_mut(kind).remove(key) {
            self.current_usage -= resource.len();
            true
        } else {
            false
        }
    }

    /// Borrow a resource's bytes.
    #[must_use]
    pub fn get(&self, kind: ResourceKind, key: &str) -> Option<&[u8]> {
        self.store(kind).get(key).map(Vec::as_slice)
    }

    /// Evict every resource and reset usage accounting to zero.
    pub fn cleanup(&mut self) {
        self.buffers.clear();
        self.textures.clear();
        self.geometries.clear();
        self.current_usage = 0;
    }

    /// Bytes currently allocated across all stores.
    #[must_use]
    pub fn current_usage(&self) -> usize {
        self.current_usage
    }

    /// Pool capacity in bytes.
    #[must_use]
    pub fn max_usage(&self) -> usize {
        self.max_usage
    }

    fn store(&self, kind: ResourceKind) -> &FxHashMap<String, Vec<u8>> {
        match kind {
            ResourceKind::Buffer => &self.buffers,
            ResourceKind::Texture => &self.textures,
            ResourceKind::Geometry => &self.geometries,
        }
    }

    fn store_mut(
        &mut self,
        kind: ResourceKind,
    ) -> &mut FxHashMap<String, Vec<u8>> {
        match kind {
            ResourceKind::Buffer => &mut self.buffers,
            ResourceKind::Texture => &mut self.textures,
            ResourceKind::Geometry => &mut self.geometries,
        }
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryManager")
            .field("buffers", &self.buffers.len())
            .field("textures", &self.textures.len())
            .field("geometries", &self.geometries.len())
            .field("current_usage", &self.current_usage)
            .field("max_usage", &self.max_usage)
            .finish()
    }
}
