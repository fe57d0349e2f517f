//! Lazily computed local/global transform pair

use std::cell::Cell;

/// Memoized local and global transforms of one spatial node.
///
/// `None` means "unknown, recompute on next read". Interior mutability lets
/// reads fill the cache through a shared borrow of the scene.
#[derive(Debug)]
pub(crate) struct TransformCache<M: Copy> {
    local: Cell<Option<M>>,
    global: Cell<Option<M>>,
    global_computations: Cell<u64>,
}

impl<M: Copy> Default for TransformCache<M> {
    fn default() -> Self {
        Self {
            local: Cell::new(None),
            global: Cell::new(None),
            global_computations: Cell::new(0),
        }
    }
}

impl<M: Copy> TransformCache<M> {
    pub(crate) fn local_or_compute(&self, compute: impl FnOnce() -> M) -> M {
        if let Some(local) = self.local.get() {
            return local;
        }
        let local = compute();
        self.local.set(Some(local));
        local
    }

    pub(crate) fn global(&self) -> Option<M> {
        self.global.get()
    }

    pub(crate) fn store_global(&self, global: M) {
        self.global_computations.set(self.global_computations.get() + 1);
        self.global.set(Some(global));
    }

    pub(crate) fn has_global(&self) -> bool {
        self.global.get().is_some()
    }

    pub(crate) fn clear(&self) {
        self.local.set(None);
        self.global.set(None);
    }

    pub(crate) fn global_computations(&self) -> u64 {
        self.global_computations.get()
    }
}
