use std::sync::RwLock;

use crate::models::{Reading, Severity};

use super::types::{HistoryEntry, MonitoringError};

/// Append-only ledger of readings and their derived severities.
///
/// The public contract has no update or delete for past entries, and no
/// retention bound — callers wanting a cap apply their own externally.
/// Reads return insertion order — "most recent first" is a presentation
/// concern, not a ledger invariant.
pub struct HistoryLedger {
    entries: RwLock<Vec<HistoryEntry>>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Append one entry; returns the stored row.
    pub fn append(
        &self,
        reading: Reading,
        severity: Severity,
    ) -> Result<HistoryEntry, MonitoringError> {
        let entry = HistoryEntry {
            recorded_at: reading.recorded_at,
            reading,
            severity,
        };
        let mut entries = self
            .entries
            .write()
            .map_err(|_| MonitoringError::LockFailed)?;
        entries.push(entry.clone());
        Ok(entry)
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> Result<Vec<HistoryEntry>, MonitoringError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| MonitoringError::LockFailed)?;
        Ok(entries.clone())
    }

    pub fn len(&self) -> Result<usize, MonitoringError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| MonitoringError::LockFailed)?;
        Ok(entries.len())
    }

    pub fn is_empty(&self) -> Result<bool, MonitoringError> {
        Ok(self.len()? == 0)
    }

    /// Replace the ledger with previously persisted entries (session start).
    /// Crate-internal: the public contract stays append-only.
    pub(crate) fn restore(&self, entries: Vec<HistoryEntry>) -> Result<(), MonitoringError> {
        let mut current = self
            .entries
            .write()
            .map_err(|_| MonitoringError::LockFailed)?;
        *current = entries;
        Ok(())
    }

    /// Drop everything — called on logout.
    /// Crate-internal: the public contract stays append-only.
    pub(crate) fn clear(&self) -> Result<(), MonitoringError> {
        self.entries
            .write()
            .map_err(|_| MonitoringError::LockFailed)?
            .clear();
        Ok(())
    }
}

impl Default for HistoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_then_read_in_insertion_order() {
        let ledger = HistoryLedger::new();
        ledger
            .append(Reading::new(72.0, 118.0, 76.0, 98.0, 36.6), Severity::Normal)
            .unwrap();
        ledger
            .append(
                Reading::new(120.0, 145.0, 92.0, 93.0, 37.8),
                Severity::Warning,
            )
            .unwrap();

        let entries = ledger.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].severity, Severity::Normal);
        assert_eq!(entries[1].severity, Severity::Warning);
    }

    #[test]
    fn entry_keeps_reading_timestamp() {
        let ledger = HistoryLedger::new();
        let reading = Reading::new(72.0, 118.0, 76.0, 98.0, 36.6);
        let stamp = reading.recorded_at;
        let entry = ledger.append(reading, Severity::Normal).unwrap();
        assert_eq!(entry.recorded_at, stamp);
    }

    #[test]
    fn reads_do_not_mutate_the_ledger() {
        let ledger = HistoryLedger::new();
        ledger
            .append(Reading::new(72.0, 118.0, 76.0, 98.0, 36.6), Severity::Normal)
            .unwrap();

        let mut copy = ledger.entries().unwrap();
        copy.clear();

        assert_eq!(ledger.len().unwrap(), 1, "callers get a copy, not the ledger");
    }

    #[test]
    fn restore_replaces_contents() {
        let ledger = HistoryLedger::new();
        ledger
            .append(Reading::new(72.0, 118.0, 76.0, 98.0, 36.6), Severity::Normal)
            .unwrap();

        ledger.restore(Vec::new()).unwrap();
        assert!(ledger.is_empty().unwrap());
    }
}
