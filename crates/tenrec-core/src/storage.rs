use crate::error::{Error, Result};

// Storage — the shared flat buffer behind tensor views
//
// A Storage owns the actual f64 elements. Tensors never hold it
// directly; they hold `Arc<RwLock<Storage>>`, so the reference count of
// the Arc is the buffer's refcount: retain is `Arc::clone`, release is
// drop, and the storage is freed exactly once, when the last handle
// goes away. Double release and use after the last release are
// unrepresentable.

/// Owned flat element storage, shared between tensor views.
#[derive(Debug)]
pub struct Storage {
    data: Vec<f64>,
}

impl Storage {
    /// Reserve storage for `len` elements, zero-filled.
    ///
    /// Reservation goes through `try_reserve_exact` so an impossible
    /// request surfaces as `AllocationFailure` instead of aborting.
    pub fn new(len: usize) -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| Error::AllocationFailure { elems: len })?;
        data.resize(len, 0.0);
        Ok(Storage { data })
    }

    /// Wrap an existing vector of elements.
    pub fn from_vec(data: Vec<f64>) -> Self {
        Storage { data }
    }

    /// Number of elements in the buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The elements as a slice.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// The elements as a mutable slice.
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }
}
