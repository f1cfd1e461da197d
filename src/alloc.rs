//! Synthetic identifier allocation.
//!
//! Generated scaffolding has to be byte-identical across runs, so real GUID
//! and token values are replaced with values drawn from deterministic
//! monotonic sequences. One [`AllocationContext`] is threaded through an
//! entire run: the n-th allocation anywhere in the pipeline receives the
//! n-th value of its sequence, so call order is load-bearing and the context
//! is never reset mid-run.

use std::fmt::Write as _;

/// A 128-bit synthetic GUID.
///
/// Ordering is plain integer ordering. The value is write-only: it is
/// rendered as a C initializer list and never parsed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Guid(pub u128);

impl Guid {
    /// The all-zero GUID, seed of every allocation sequence.
    pub const ZERO: Guid = Guid(0);

    /// Render as an EDK2 C-style initializer list:
    /// `{0xaaaaaaaa, 0xbbbb, 0xcccc, {0xdd, 0xdd, 0xdd, 0xdd, 0xdd, 0xdd, 0xdd, 0xdd}}`.
    ///
    /// Pure function of the value; hex digits are lowercase.
    pub fn to_c_initializer(self) -> String {
        let b = self.0.to_be_bytes();
        let mut out = format!(
            "{{0x{:02x}{:02x}{:02x}{:02x}, 0x{:02x}{:02x}, 0x{:02x}{:02x}, {{0x{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7], b[8],
        );
        for byte in &b[9..] {
            // Writing to a String cannot fail.
            let _ = write!(out, ", 0x{byte:02x}");
        }
        out.push_str("}}");
        out
    }
}

/// Monotonic GUID sequence.
///
/// `next()` returns the current value and advances the 128-bit counter by
/// one, wrapping on overflow (unsigned modular arithmetic, not an error).
#[derive(Debug)]
pub struct GuidAllocator {
    current: Guid,
}

impl GuidAllocator {
    /// A fresh allocator seeded at the all-zero GUID.
    pub fn new() -> Self {
        Self { current: Guid::ZERO }
    }

    /// Return the current GUID, then advance the sequence.
    pub fn next(&mut self) -> Guid {
        let curr = self.current;
        self.current = Guid(curr.0.wrapping_add(1));
        curr
    }
}

impl Default for GuidAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Monotonic integer token sequence for PCD token values.
#[derive(Debug)]
pub struct TokenAllocator {
    next: u64,
}

impl TokenAllocator {
    /// A fresh allocator whose first `next()` returns 0.
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Return the current counter value, then increment it.
    pub fn next(&mut self) -> u64 {
        let curr = self.next;
        self.next += 1;
        curr
    }

    /// The counter value the next call to [`next`](Self::next) will return.
    pub fn current(&self) -> u64 {
        self.next
    }

    /// Whether `value` has already been handed out by this allocator.
    pub fn is_used(&self, value: u64) -> bool {
        value < self.next
    }

    /// Whether `value` has not yet been handed out by this allocator.
    pub fn is_unused(&self, value: u64) -> bool {
        !self.is_used(value)
    }
}

impl Default for TokenAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// The single allocation stream for one scaffolding run.
///
/// Owns both sequences and is passed `&mut` through the pipeline, so
/// exclusive access (and with it the sequential-allocation invariant) is
/// enforced by the borrow checker rather than a lock.
#[derive(Debug, Default)]
pub struct AllocationContext {
    pub guids: GuidAllocator,
    pub tokens: TokenAllocator,
}

impl AllocationContext {
    /// A fresh context with both sequences at their zero seeds.
    pub fn new() -> Self {
        Self::default()
    }
}
