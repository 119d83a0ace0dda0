use crate::sample::Sample;
use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Number of samples retained when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 1_000;

/// Fixed-capacity, insertion-ordered store of [`Sample`]s.
///
/// Appending past capacity evicts from the front, so the buffer always holds
/// the most recent `capacity` samples, oldest first.
#[derive(Debug, Clone)]
pub struct BoundedBuffer {
    samples:  VecDeque<Sample>,
    capacity: usize,
}

impl BoundedBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `batch` in order, then evict the oldest samples until
    /// `len() <= capacity()`.
    pub fn append(&mut self, batch: &[Sample]) {
        // Only the tail of an oversized batch can survive.
        if batch.len() >= self.capacity {
            self.samples.clear();
            self.samples.extend(&batch[batch.len() - self.capacity..]);
            return;
        }

        let overflow = (self.samples.len() + batch.len()).saturating_sub(self.capacity);
        self.samples.drain(..overflow);
        self.samples.extend(batch);
    }

    /// Current contents, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for BoundedBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// A [`BoundedBuffer`] shared between request handlers.
///
/// Cloning is cheap and every clone refers to the same buffer.  Appends take
/// the write lock for the whole append+evict step, so readers never observe
/// a half-applied batch.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<RwLock<BoundedBuffer>>,
}

impl SharedBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(BoundedBuffer::new(capacity))),
        }
    }

    /// Append a batch atomically.  Returns the buffer length afterwards.
    pub fn append(&self, batch: &[Sample]) -> usize {
        let mut buffer = self.write();
        buffer.append(batch);
        buffer.len()
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<Sample> {
        self.read().snapshot()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.read().capacity()
    }

    // A panicking writer cannot leave the buffer half-appended, so a poisoned
    // lock still guards valid data.
    fn read(&self) -> RwLockReadGuard<'_, BoundedBuffer> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BoundedBuffer> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(range: std::ops::Range<u32>) -> Vec<Sample> {
        range
            .map(|i| Sample::new(f64::from(i), f64::from(i).sin(), f64::from(i).cos()))
            .collect()
    }

    fn times(samples: &[Sample]) -> Vec<f64> {
        samples.iter().map(|s| s.time).collect()
    }

    #[test]
    fn starts_empty() {
        let buf = BoundedBuffer::new(4);
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 4);
        assert!(buf.snapshot().is_empty());
    }

    #[test]
    fn capacity_holds_after_every_append() {
        let mut buf = BoundedBuffer::new(5);
        for (start, len) in [(0, 2), (2, 3), (5, 1), (6, 7), (13, 0), (13, 4)] {
            buf.append(&ramp(start..start + len));
            assert!(buf.len() <= 5, "len {} after batch at {start}", buf.len());
        }
        assert_eq!(buf.len(), 5);
    }

    #[test]
    fn preserves_order_across_batches() {
        let mut buf = BoundedBuffer::new(10);
        buf.append(&ramp(0..3));
        buf.append(&ramp(3..6));
        assert_eq!(times(&buf.snapshot()), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut buf = BoundedBuffer::new(4);
        buf.append(&ramp(0..3));
        buf.append(&ramp(3..6));
        assert_eq!(times(&buf.snapshot()), vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn oversized_batch_keeps_its_tail() {
        let input = ramp(0..25);
        let mut buf = BoundedBuffer::new(10);
        buf.append(&input);
        assert_eq!(buf.snapshot(), input[15..].to_vec());
    }

    #[test]
    fn oversized_batch_replaces_existing_contents() {
        let mut buf = BoundedBuffer::new(3);
        buf.append(&ramp(100..102));
        buf.append(&ramp(0..3));
        assert_eq!(times(&buf.snapshot()), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn empty_batch_is_noop() {
        let mut buf = BoundedBuffer::new(3);
        buf.append(&ramp(0..2));
        buf.append(&[]);
        assert_eq!(times(&buf.snapshot()), vec![0.0, 1.0]);
    }

    #[test]
    fn snapshot_is_idempotent() {
        let mut buf = BoundedBuffer::new(8);
        buf.append(&ramp(0..6));
        assert_eq!(buf.snapshot(), buf.snapshot());
    }

    #[test]
    fn zero_capacity_retains_nothing() {
        let mut buf = BoundedBuffer::new(0);
        buf.append(&ramp(0..3));
        assert!(buf.is_empty());
    }

    #[test]
    fn default_capacity() {
        assert_eq!(BoundedBuffer::default().capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn shared_clones_see_same_buffer() {
        let a = SharedBuffer::new(3);
        let b = a.clone();
        assert_eq!(a.append(&ramp(0..2)), 2);
        assert_eq!(b.len(), 2);
        assert_eq!(b.snapshot(), a.snapshot());
    }

    /// Panics unless `snapshot` is whole batches of `batch` contiguous times.
    fn assert_whole_batches(snapshot: &[Sample], batch: u32) {
        assert_eq!(snapshot.len() % batch as usize, 0, "partial batch: len {}", snapshot.len());
        for chunk in snapshot.chunks(batch as usize) {
            let first = chunk[0].time;
            assert_eq!(first % f64::from(batch), 0.0, "batch starts at {first}");
            for (offset, s) in chunk.iter().enumerate() {
                assert_eq!(s.time, first + offset as f64);
            }
        }
    }

    #[test]
    fn snapshots_during_appends_see_whole_batches() {
        use std::sync::atomic::{AtomicBool, Ordering};

        const BATCH: u32 = 40;
        const CAPACITY: usize = 400;
        let shared = SharedBuffer::new(CAPACITY);
        let done = Arc::new(AtomicBool::new(false));

        let reader = {
            let shared = shared.clone();
            let done = Arc::clone(&done);
            std::thread::spawn(move || {
                let mut observed = 0usize;
                loop {
                    let finished = done.load(Ordering::Acquire);
                    let snapshot = shared.snapshot();
                    assert!(snapshot.len() <= CAPACITY);
                    assert_whole_batches(&snapshot, BATCH);
                    observed += 1;
                    if finished {
                        return observed;
                    }
                }
            })
        };

        let writers: Vec<_> = (0..4)
            .map(|worker| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    for round in 0..50 {
                        let start = (worker * 50 + round) * BATCH;
                        shared.append(&ramp(start..start + BATCH));
                        std::thread::yield_now();
                    }
                })
            })
            .collect();

        for writer in writers {
            writer.join().unwrap();
        }
        done.store(true, Ordering::Release);

        let observed = reader.join().unwrap();
        assert!(observed > 0);
        assert_eq!(shared.len(), CAPACITY);
        assert_whole_batches(&shared.snapshot(), BATCH);
    }

    #[test]
    fn concurrent_appends_never_interleave() {
        const BATCH: u32 = 50;
        let shared = SharedBuffer::new(1_000);

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    for round in 0..5 {
                        let start = (worker * 5 + round) * BATCH;
                        shared.append(&ramp(start..start + BATCH));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = shared.snapshot();
        assert_eq!(snapshot.len(), 1_000);
        // Every batch is contiguous and starts on a batch boundary.
        for chunk in snapshot.chunks(BATCH as usize) {
            let first = chunk[0].time;
            assert_eq!(first % f64::from(BATCH), 0.0);
            for (offset, s) in chunk.iter().enumerate() {
                assert_eq!(s.time, first + offset as f64);
            }
        }
    }
}
