use std::{
    fmt,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
};

use crate::utilities::errors::ChromatogramError;

/// A thread-safe source of reusable fixed-capacity buffers.
///
/// `rent` hands out a buffer whose length (its capacity, from the caller's
/// point of view) is at least `minimum_length`; its contents are unspecified.
/// Every rented buffer must be handed back exactly once.
pub trait ArrayPool<T>: Send + Sync {
    fn rent(&self, minimum_length: usize) -> Vec<T>;
    fn give_back(&self, buffer: Vec<T>);
}

/// Mutex-guarded free list that keeps at most `max_retained` idle buffers.
pub struct SharedArrayPool<T> {
    free: Mutex<Vec<Vec<T>>>,
    max_retained: usize,
    rented: AtomicUsize,
    returned: AtomicUsize,
}

impl<T> SharedArrayPool<T> {
    pub fn new(max_retained: usize) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            max_retained,
            rented: AtomicUsize::new(0),
            returned: AtomicUsize::new(0),
        }
    }

    pub fn rented_count(&self) -> usize {
        self.rented.load(Ordering::Relaxed)
    }

    pub fn returned_count(&self) -> usize {
        self.returned.load(Ordering::Relaxed)
    }

    /// Buffers currently rented out and not yet handed back.
    pub fn outstanding(&self) -> usize {
        self.rented_count().saturating_sub(self.returned_count())
    }

    pub fn retained(&self) -> usize {
        self.free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<T> Default for SharedArrayPool<T> {
    fn default() -> Self {
        Self::new(64)
    }
}

impl<T> fmt::Debug for SharedArrayPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedArrayPool")
            .field("max_retained", &self.max_retained)
            .field("rented", &self.rented_count())
            .field("returned", &self.returned_count())
            .finish()
    }
}

impl<T: Clone + Default + Send> ArrayPool<T> for SharedArrayPool<T> {
    fn rent(&self, minimum_length: usize) -> Vec<T> {
        self.rented.fetch_add(1, Ordering::Relaxed);
        let reused = {
            let mut free = self.free.lock().unwrap_or_else(PoisonError::into_inner);
            let fit = free.iter().position(|b| b.len() >= minimum_length);
            fit.map(|i| free.swap_remove(i))
        };
        match reused {
            Some(buffer) => buffer,
            None => {
                let capacity = minimum_length.max(1).next_power_of_two();
                tracing::trace!(capacity, "array pool miss, allocating");
                vec![T::default(); capacity]
            }
        }
    }

    fn give_back(&self, buffer: Vec<T>) {
        self.returned.fetch_add(1, Ordering::Relaxed);
        let mut free = self.free.lock().unwrap_or_else(PoisonError::into_inner);
        if free.len() < self.max_retained {
            free.push(buffer);
        }
    }
}

/// A buffer rented from an [`ArrayPool`] together with its logical length.
///
/// Only the first `len()` elements are meaningful. The buffer goes back to its
/// pool when this value is dropped, which happens exactly once on every exit
/// path, unwinding included.
pub struct PooledBuffer<T> {
    buffer: Vec<T>,
    length: usize,
    pool: Arc<dyn ArrayPool<T>>,
}

impl<T> PooledBuffer<T> {
    /// Wraps an already rented buffer. On error the buffer is handed back
    /// before returning.
    pub fn new(
        buffer: Vec<T>,
        length: usize,
        pool: Arc<dyn ArrayPool<T>>,
    ) -> Result<Self, ChromatogramError> {
        if length > buffer.len() {
            let capacity = buffer.len();
            pool.give_back(buffer);
            return Err(ChromatogramError::LengthExceedsCapacity { length, capacity });
        }
        Ok(Self {
            buffer,
            length,
            pool,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.buffer[..self.length]
    }

    pub fn push(&mut self, value: T) -> Result<(), ChromatogramError> {
        if self.length >= self.buffer.len() {
            return Err(ChromatogramError::LengthExceedsCapacity {
                length: self.length + 1,
                capacity: self.buffer.len(),
            });
        }
        self.buffer[self.length] = value;
        self.length += 1;
        Ok(())
    }

    pub fn pool(&self) -> &Arc<dyn ArrayPool<T>> {
        &self.pool
    }
}

impl<T: Clone + Default> PooledBuffer<T> {
    /// Rents a buffer of at least `minimum_length` elements with a logical
    /// length of zero. A pool handing out a shorter buffer gets it grown in
    /// place, so the capacity guarantee always holds.
    pub fn rent(pool: Arc<dyn ArrayPool<T>>, minimum_length: usize) -> Self {
        let mut buffer = pool.rent(minimum_length);
        if buffer.len() < minimum_length {
            buffer.resize(minimum_length, T::default());
        }
        Self {
            buffer,
            length: 0,
            pool,
        }
    }

    /// Rents a buffer and fills it with `values`, taking at most
    /// `minimum_length` of them.
    pub fn rent_from_iter<I>(pool: Arc<dyn ArrayPool<T>>, minimum_length: usize, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut out = Self::rent(pool, minimum_length);
        for (slot, v) in out.buffer.iter_mut().take(minimum_length).zip(values) {
            *slot = v;
            out.length += 1;
        }
        out
    }
}

impl<T> Drop for PooledBuffer<T> {
    fn drop(&mut self) {
        let buffer = std::mem::take(&mut self.buffer);
        self.pool.give_back(buffer);
    }
}

impl<T: fmt::Debug> fmt::Debug for PooledBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledBuffer")
            .field("length", &self.length)
            .field("capacity", &self.buffer.len())
            .field("data", &self.as_slice())
            .finish()
    }
}
