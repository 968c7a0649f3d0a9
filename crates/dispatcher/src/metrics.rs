//! Dispatcher and transport counters

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use contracts::ErrorKind;

/// Counters for one dispatcher instance
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    transport_errors: AtomicU64,
    client_errors: AtomicU64,
    default_invocations: AtomicU64,
    default_failures: AtomicU64,
    remote_handoffs: AtomicU64,
    remote_failures: AtomicU64,
    remote_skipped: AtomicU64,
}

impl DispatchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one handled error of the given kind
    pub fn inc_handled(&self, kind: ErrorKind) {
        let counter = match kind {
            ErrorKind::Transport => &self.transport_errors,
            ErrorKind::Client => &self.client_errors,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_default_invocations(&self) {
        self.default_invocations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_default_failures(&self) {
        self.default_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_remote_handoffs(&self) {
        self.remote_handoffs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_remote_failures(&self) {
        self.remote_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_remote_skipped(&self) {
        self.remote_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> DispatchSnapshot {
        let transport_errors = self.transport_errors.load(Ordering::Relaxed);
        let client_errors = self.client_errors.load(Ordering::Relaxed);
        DispatchSnapshot {
            handled: transport_errors + client_errors,
            transport_errors,
            client_errors,
            default_invocations: self.default_invocations.load(Ordering::Relaxed),
            default_failures: self.default_failures.load(Ordering::Relaxed),
            remote_handoffs: self.remote_handoffs.load(Ordering::Relaxed),
            remote_failures: self.remote_failures.load(Ordering::Relaxed),
            remote_skipped: self.remote_skipped.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of dispatcher counters (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSnapshot {
    pub handled: u64,
    pub transport_errors: u64,
    pub client_errors: u64,
    pub default_invocations: u64,
    pub default_failures: u64,
    pub remote_handoffs: u64,
    pub remote_failures: u64,
    pub remote_skipped: u64,
}

/// Metrics for a single transport worker
#[derive(Debug, Default)]
pub struct TransportMetrics {
    /// Current queue length
    queue_len: AtomicUsize,
    /// Total successful deliveries
    delivered_count: AtomicU64,
    /// Total delivery failures
    failure_count: AtomicU64,
    /// Total records dropped due to full queue
    dropped_count: AtomicU64,
}

impl TransportMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current queue length
    pub fn queue_len(&self) -> usize {
        self.queue_len.load(Ordering::Relaxed)
    }

    /// Set current queue length
    pub fn set_queue_len(&self, len: usize) {
        self.queue_len.store(len, Ordering::Relaxed);
    }

    /// Get total delivered count
    pub fn delivered_count(&self) -> u64 {
        self.delivered_count.load(Ordering::Relaxed)
    }

    /// Increment delivered count
    pub fn inc_delivered_count(&self) {
        self.delivered_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get failure count
    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Increment failure count
    pub fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get dropped count
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    /// Increment dropped count
    pub fn inc_dropped_count(&self) {
        self.dropped_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> TransportSnapshot {
        TransportSnapshot {
            queue_len: self.queue_len(),
            delivered_count: self.delivered_count(),
            failure_count: self.failure_count(),
            dropped_count: self.dropped_count(),
        }
    }
}

/// Snapshot of transport metrics (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportSnapshot {
    pub queue_len: usize,
    pub delivered_count: u64,
    pub failure_count: u64,
    pub dropped_count: u64,
}
