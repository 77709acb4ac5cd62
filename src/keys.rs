//! Input collection: owns key byte-strings and caller payloads prior to construction.

use crate::stats::{stat_add, stat_add_bytes, Stats};
use crate::warn::{self, WarnSink};

/// One collected key: an owned byte buffer, its logical length, and an opaque payload.
///
/// `data` may be longer than `len` by exactly one byte — the trailing null terminator appended
/// by [`Keys::add`] / [`Keys::add_safe`] for caller convenience. Keys inserted via
/// [`Keys::add_no_copy`] have no such guarantee; `len == data.len()` for those.
#[derive(Debug, Clone)]
pub struct KeyRecord<P> {
    data: Vec<u8>,
    len: usize,
    /// Caller-supplied payload, mutable through [`Keys::apply_mut`] / [`crate::Mphf::apply_mut`].
    pub payload: P,
}

impl<P> KeyRecord<P> {
    fn copied(bytes: &[u8], payload: P) -> Self {
        let mut data = Vec::with_capacity(bytes.len() + 1);
        data.extend_from_slice(bytes);
        data.push(0);
        Self {
            data,
            len: bytes.len(),
            payload,
        }
    }

    fn no_copy(data: Vec<u8>, payload: P) -> Self {
        let len = data.len();
        Self { data, len, payload }
    }

    /// The key's bytes, excluding any trailing terminator.
    #[inline]
    pub fn key_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// The key's length.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this record is guaranteed to carry a trailing zero byte after `key_bytes()`.
    #[inline]
    pub fn is_null_terminated(&self) -> bool {
        self.data.len() > self.len
    }
}

/// Ordered, append-only collection of [`KeyRecord`]s.
///
/// Insertion order determines each key's assigned index once [`crate::builder::Builder::build`]
/// succeeds. The collector does not itself enforce uniqueness — use [`Keys::add_safe`] for that,
/// at O(N) cost per call — since inserting the same key twice produces an undefined MPHF (two
/// graph edges sharing both endpoints and a label is a cycle by construction).
pub struct Keys<P> {
    records: Vec<KeyRecord<P>>,
    warn_sink: Option<WarnSink>,
    stats: Stats,
}

impl<P: std::fmt::Debug> std::fmt::Debug for Keys<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keys")
            .field("records", &self.records)
            .field("warn_sink", &self.warn_sink.as_ref().map(|_| "<closure>"))
            .field("stats", &self.stats)
            .finish()
    }
}

impl<P> Default for Keys<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Keys<P> {
    /// An empty collector.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            warn_sink: None,
            stats: Stats::new(),
        }
    }

    /// An empty collector pre-sized for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut k = Self::new();
        k.reserve(capacity);
        k
    }

    /// Install a callback that receives future warning text. Replaces any previous sink.
    pub fn on_warning(&mut self, sink: impl Fn(&str) + 'static) -> &mut Self {
        self.warn_sink = Some(Box::new(sink));
        self
    }

    /// Ensure room for at least `n` more keys without shrinking existing capacity.
    pub fn reserve(&mut self, n: usize) {
        let before = self.records.capacity();
        self.records.reserve(n);
        let after = self.records.capacity();
        if after != before {
            stat_add!(self.stats, input_growth_events, 1);
            stat_add_bytes!(self.stats, (after - before) * std::mem::size_of::<KeyRecord<P>>());
        }
        self.stats.input_capacity = self.records.capacity() as u64;
    }

    /// Grow capacity by `n` more keys on top of whatever is already reserved.
    pub fn grow_by(&mut self, n: usize) {
        let target = self.records.len() + n;
        if target > self.records.capacity() {
            self.reserve(target - self.records.capacity());
        }
    }

    /// Push `rec`, accounting any capacity growth against the input collector's stats.
    fn push_record(&mut self, rec: KeyRecord<P>) {
        let before = self.records.capacity();
        self.records.push(rec);
        let after = self.records.capacity();
        if after != before {
            stat_add!(self.stats, input_growth_events, 1);
            stat_add_bytes!(self.stats, (after - before) * std::mem::size_of::<KeyRecord<P>>());
        }
        self.stats.input_capacity = after as u64;
    }

    /// Append `bytes` (copied) with `payload`. A zero-length `bytes` emits a warning and is a
    /// no-op, returning `false`; otherwise returns `true`.
    ///
    /// Precondition (not checked): `bytes` has not previously been added. Violating this makes
    /// the resulting MPHF undefined.
    pub fn add(&mut self, bytes: &[u8], payload: P) -> bool {
        if bytes.is_empty() {
            warn::emit(self.warn_sink.as_ref(), "rejected a zero-length key");
            return false;
        }
        self.push_record(KeyRecord::copied(bytes, payload));
        true
    }

    /// Like [`Keys::add`], but first scans existing entries for a byte-equal match; on a hit this
    /// is a no-op. O(N) per call by design — a caller convenience, not a fast path.
    pub fn add_safe(&mut self, bytes: &[u8], payload: P) -> bool {
        if bytes.is_empty() {
            warn::emit(self.warn_sink.as_ref(), "rejected a zero-length key");
            return false;
        }
        if self.records.iter().any(|r| r.key_bytes() == bytes) {
            stat_add!(self.stats, safe_add_dedupe_hits, 1);
            return false;
        }
        stat_add!(self.stats, safe_add_dedupe_misses, 1);
        self.add(bytes, payload)
    }

    /// Take ownership of an already-owned buffer without copying it and without guaranteeing a
    /// trailing zero byte. A zero-length `bytes` emits a warning and is a no-op.
    pub fn add_no_copy(&mut self, bytes: Vec<u8>, payload: P) -> bool {
        if bytes.is_empty() {
            warn::emit(self.warn_sink.as_ref(), "rejected a zero-length key");
            return false;
        }
        self.push_record(KeyRecord::no_copy(bytes, payload));
        true
    }

    /// Visit every entry in insertion order.
    pub fn apply(&self, mut f: impl FnMut(&[u8], &P)) {
        for r in &self.records {
            f(r.key_bytes(), &r.payload);
        }
    }

    /// Visit every entry in insertion order with a mutable payload reference.
    pub fn apply_mut(&mut self, mut f: impl FnMut(&[u8], &mut P)) {
        for r in &mut self.records {
            f(&r.data[..r.len], &mut r.payload);
        }
    }

    /// Number of collected keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collector is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every payload, keeping only key storage.
    pub fn into_keys_only(self) -> Keys<()> {
        let records = self
            .records
            .into_iter()
            .map(|r| KeyRecord {
                data: r.data,
                len: r.len,
                payload: (),
            })
            .collect();
        Keys {
            records,
            warn_sink: None,
            stats: self.stats,
        }
    }

    /// A snapshot of the statistics gathered so far (all-zero unless the `stats` feature is on).
    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub(crate) fn into_records(self) -> (Vec<KeyRecord<P>>, Option<WarnSink>, Stats) {
        (self.records, self.warn_sink, self.stats)
    }

    pub(crate) fn from_records(
        records: Vec<KeyRecord<P>>,
        warn_sink: Option<WarnSink>,
        stats: Stats,
    ) -> Self {
        Self {
            records,
            warn_sink,
            stats,
        }
    }

    pub(crate) fn records(&self) -> &[KeyRecord<P>] {
        &self.records
    }
}
