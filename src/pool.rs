//! A small pool of reusable `String` buffers.
//!
//! Building a request URI needs a scratch buffer on every call. Instead of
//! allocating a fresh one, the geocoder borrows a buffer from this pool through a
//! [`PooledBuffer`] guard which clears it and hands it back when dropped, so
//! every exit path (including `?` early returns) releases it.

use parking_lot::Mutex;
use std::fmt;
use std::ops::{Deref, DerefMut};

const DEFAULT_MAX_IDLE: usize = 64;
const DEFAULT_BUFFER_CAPACITY: usize = 256;

/// Thread-safe registry of idle buffers.
pub struct BufferPool {
    idle: Mutex<Vec<String>>,
    max_idle: usize,
}

impl BufferPool {
    /// Creates an empty pool that keeps at most `max_idle` buffers around.
    pub fn new(max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            max_idle,
        }
    }

    /// Takes a buffer out of the pool, allocating one if none is idle.
    ///
    /// The buffer belongs exclusively to the returned guard until it is dropped.
    /// Callers should not rely on it being empty.
    pub fn acquire(&self) -> PooledBuffer<'_> {
        let buf = self
            .idle
            .lock()
            .pop()
            .unwrap_or_else(|| String::with_capacity(DEFAULT_BUFFER_CAPACITY));

        PooledBuffer { pool: self, buf }
    }

    /// Number of buffers currently idle in the pool.
    pub fn idle_len(&self) -> usize {
        self.idle.lock().len()
    }

    fn release(&self, mut buf: String) {
        buf.clear();
        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(buf);
        }
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IDLE)
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("idle", &self.idle_len())
            .field("max_idle", &self.max_idle)
            .finish()
    }
}

/// Scoped access to a pooled buffer. Returned to the pool on drop.
pub struct PooledBuffer<'a> {
    pool: &'a BufferPool,
    buf: String,
}

impl Deref for PooledBuffer<'_> {
    type Target = String;

    fn deref(&self) -> &String {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut String {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}

impl fmt::Debug for PooledBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PooledBuffer").field(&self.buf).finish()
    }
}
