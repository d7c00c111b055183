//! Reusable scratch buffers for rendering records
//!
//! Rendering happens into a buffer checked out of a bounded pool; the buffer
//! goes back when the `PooledBuffer` guard drops. Buffers that grew past
//! [`MAX_POOLED_CAPACITY`] are discarded instead of returned.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::ops::{Deref, DerefMut};
use std::sync::OnceLock;

/// Capacity of a freshly allocated buffer
pub const INITIAL_CAPACITY: usize = 1024;

/// Largest capacity a buffer may have and still be returned to the pool
pub const MAX_POOLED_CAPACITY: usize = 16 << 10;

/// Number of idle buffers the global pool keeps
pub const DEFAULT_POOL_SLOTS: usize = 64;

#[derive(Debug, Clone)]
pub struct BufferPool {
    sender: Sender<Vec<u8>>,
    receiver: Receiver<Vec<u8>>,
}

impl BufferPool {
    /// Create a pool holding at most `slots` idle buffers
    pub fn new(slots: usize) -> Self {
        let (sender, receiver) = bounded(slots.max(1));
        Self { sender, receiver }
    }

    /// The process-wide pool
    pub fn global() -> &'static BufferPool {
        static GLOBAL: OnceLock<BufferPool> = OnceLock::new();
        GLOBAL.get_or_init(|| BufferPool::new(DEFAULT_POOL_SLOTS))
    }

    /// Check out an empty buffer, reusing an idle one when available
    pub fn get(&self) -> PooledBuffer<'_> {
        let buf = self
            .receiver
            .try_recv()
            .unwrap_or_else(|_| Vec::with_capacity(INITIAL_CAPACITY));
        PooledBuffer { buf, pool: self }
    }

    /// Number of idle buffers currently pooled
    pub fn idle(&self) -> usize {
        self.receiver.len()
    }

    fn put(&self, mut buf: Vec<u8>) {
        if buf.capacity() > MAX_POOLED_CAPACITY {
            return;
        }
        buf.clear();
        // A full pool just drops the buffer.
        let _ = self.sender.try_send(buf);
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_SLOTS)
    }
}

/// Buffer exclusively owned until dropped
#[derive(Debug)]
pub struct PooledBuffer<'a> {
    buf: Vec<u8>,
    pool: &'a BufferPool,
}

impl Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.put(std::mem::take(&mut self.buf));
    }
}
