//! Bounded invoice-history ledger.
//!
//! The ledger is the only state that outlives a single pipeline run. It
//! never exceeds [`LEDGER_CAPACITY`] entries; insertion is FIFO-evicting
//! and entries are removed only by capacity eviction.
//!
//! Access goes through a [`LedgerTxn`]: one transaction spans the
//! history observation and the final append, serialized against other
//! transactions, closing the check-then-act race between concurrent
//! submissions of the same invoice.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};

use invoicegate_types::LedgerEntry;

/// Maximum number of retained entries.
pub const LEDGER_CAPACITY: usize = 100;

/// Aggregates over prior ledger entries for one invoice key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerObservation {
    /// A prior entry matched on both invoice number and vendor
    pub duplicate: bool,
    /// The invoice number was seen before under a different vendor
    /// (informational, not a duplicate)
    pub same_number_other_vendor: bool,
    /// Prior same-vendor entries recorded within the last hour
    pub vendor_entries_last_hour: usize,
    /// Prior same-vendor entries recorded within the last 24 hours
    pub vendor_entries_last_day: usize,
}

/// One serialized unit of ledger work.
///
/// Holds exclusive access to the ledger until dropped. `observe` never
/// sees an entry appended by the same transaction, and `append` must be
/// the final action so an abandoned run leaves no partial state.
pub trait LedgerTxn {
    /// Aggregate prior history for the given key as of `now`.
    fn observe(
        &self,
        invoice_number: Option<&str>,
        vendor: Option<&str>,
        now: DateTime<Utc>,
        duplicate_window: Duration,
    ) -> LedgerObservation;

    /// Append an entry, evicting the oldest beyond capacity.
    fn append(&mut self, entry: LedgerEntry);
}

/// Injected history repository for the fraud scorer.
pub trait LedgerStore: Send + Sync {
    /// Begin a serialized unit of ledger work.
    fn begin(&self) -> Box<dyn LedgerTxn + '_>;

    /// Number of retained entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory FIFO ledger behind a single mutex.
#[derive(Default)]
pub struct InMemoryLedger {
    entries: Mutex<VecDeque<LedgerEntry>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the retained entries, oldest first.
    pub fn entries(&self) -> Vec<LedgerEntry> {
        self.entries
            .lock()
            .expect("ledger mutex poisoned")
            .iter()
            .cloned()
            .collect()
    }
}

impl LedgerStore for InMemoryLedger {
    fn begin(&self) -> Box<dyn LedgerTxn + '_> {
        Box::new(InMemoryTxn {
            entries: self.entries.lock().expect("ledger mutex poisoned"),
        })
    }

    fn len(&self) -> usize {
        self.entries.lock().expect("ledger mutex poisoned").len()
    }
}

struct InMemoryTxn<'a> {
    entries: MutexGuard<'a, VecDeque<LedgerEntry>>,
}

impl LedgerTxn for InMemoryTxn<'_> {
    fn observe(
        &self,
        invoice_number: Option<&str>,
        vendor: Option<&str>,
        now: DateTime<Utc>,
        duplicate_window: Duration,
    ) -> LedgerObservation {
        let mut duplicate = false;
        let mut same_number_other_vendor = false;
        let mut vendor_entries_last_hour = 0;
        let mut vendor_entries_last_day = 0;

        for entry in self.entries.iter() {
            if let Some(number) = invoice_number {
                let number_matches = entry.invoice_number.as_deref() == Some(number)
                    && now - entry.recorded_at <= duplicate_window;
                if number_matches {
                    if entry.vendor.as_deref() == vendor {
                        duplicate = true;
                    } else {
                        same_number_other_vendor = true;
                    }
                }
            }

            if let Some(vendor) = vendor {
                if entry.vendor.as_deref() == Some(vendor) {
                    let age = now - entry.recorded_at;
                    if age < Duration::hours(24) {
                        vendor_entries_last_day += 1;
                    }
                    if age < Duration::hours(1) {
                        vendor_entries_last_hour += 1;
                    }
                }
            }
        }

        LedgerObservation {
            duplicate,
            same_number_other_vendor,
            vendor_entries_last_hour,
            vendor_entries_last_day,
        }
    }

    fn append(&mut self, entry: LedgerEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > LEDGER_CAPACITY {
            self.entries.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(number: &str, vendor: &str, at: DateTime<Utc>) -> LedgerEntry {
        LedgerEntry::new(
            Some(number.to_string()),
            Some(vendor.to_string()),
            100.0,
            Some("2026-01-15".to_string()),
            at,
        )
    }

    fn window() -> Duration {
        Duration::days(90)
    }

    #[test]
    fn observation_excludes_entry_recorded_afterwards() {
        let ledger = InMemoryLedger::new();
        let now = Utc::now();
        let mut txn = ledger.begin();
        let obs = txn.observe(Some("INV-1"), Some("Acme"), now, window());
        assert!(!obs.duplicate);
        txn.append(entry("INV-1", "Acme", now));
        drop(txn);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn duplicate_requires_number_and_vendor() {
        let ledger = InMemoryLedger::new();
        let now = Utc::now();
        let mut txn = ledger.begin();
        txn.append(entry("INV-1", "Acme", now));
        let obs = txn.observe(Some("INV-1"), Some("Acme"), now, window());
        assert!(obs.duplicate);

        let other_vendor = txn.observe(Some("INV-1"), Some("Globex"), now, window());
        assert!(!other_vendor.duplicate);
        assert!(other_vendor.same_number_other_vendor);

        let other_number = txn.observe(Some("INV-2"), Some("Acme"), now, window());
        assert!(!other_number.duplicate);
        assert!(!other_number.same_number_other_vendor);
    }

    #[test]
    fn duplicate_honors_window() {
        let ledger = InMemoryLedger::new();
        let now = Utc::now();
        let mut txn = ledger.begin();
        txn.append(entry("INV-1", "Acme", now - Duration::days(120)));
        let obs = txn.observe(Some("INV-1"), Some("Acme"), now, window());
        assert!(!obs.duplicate);
    }

    #[test]
    fn vendor_frequency_windows() {
        let ledger = InMemoryLedger::new();
        let now = Utc::now();
        let mut txn = ledger.begin();
        txn.append(entry("A-1", "Acme", now - Duration::minutes(10)));
        txn.append(entry("A-2", "Acme", now - Duration::hours(5)));
        txn.append(entry("A-3", "Acme", now - Duration::days(2)));
        txn.append(entry("B-1", "Globex", now - Duration::minutes(1)));

        let obs = txn.observe(Some("A-9"), Some("Acme"), now, window());
        assert_eq!(obs.vendor_entries_last_hour, 1);
        assert_eq!(obs.vendor_entries_last_day, 2);
    }

    #[test]
    fn capacity_is_fifo_bounded() {
        let ledger = InMemoryLedger::new();
        let now = Utc::now();
        {
            let mut txn = ledger.begin();
            for i in 0..(LEDGER_CAPACITY + 20) {
                txn.append(entry(&format!("INV-{i}"), "Acme", now));
            }
        }
        assert_eq!(ledger.len(), LEDGER_CAPACITY);
        // Oldest entries were evicted.
        let numbers: Vec<_> = ledger
            .entries()
            .into_iter()
            .filter_map(|e| e.invoice_number)
            .collect();
        assert_eq!(numbers.first().map(String::as_str), Some("INV-20"));
        assert_eq!(
            numbers.last().map(String::as_str),
            Some(format!("INV-{}", LEDGER_CAPACITY + 19).as_str())
        );
    }

    #[test]
    fn missing_number_never_duplicates() {
        let ledger = InMemoryLedger::new();
        let now = Utc::now();
        let mut txn = ledger.begin();
        txn.append(LedgerEntry::new(None, Some("Acme".into()), 10.0, None, now));
        let obs = txn.observe(None, Some("Acme"), now, window());
        assert!(!obs.duplicate);
        assert!(!obs.same_number_other_vendor);
    }
}
