use std::collections::HashMap;

/// Outcome of holding a record in the pending-merge table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldOutcome {
    /// No record was waiting under this identifier.
    Held,
    /// Another record was already waiting and has been displaced.
    Replaced(usize),
}

/// Records waiting for their merge counterpart, keyed by longname.
///
/// Values are indices into the record slice of the current run. At most one
/// record waits per longname.
#[derive(Debug, Default, Clone)]
pub struct PendingMerges {
    by_longname: HashMap<String, usize>,
}

impl PendingMerges {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Holds `index` under `longname` until its counterpart shows up.
    pub fn hold(&mut self, longname: &str, index: usize) -> HoldOutcome {
        match self.by_longname.insert(longname.to_string(), index) {
            Some(previous) => HoldOutcome::Replaced(previous),
            None => HoldOutcome::Held,
        }
    }

    /// Removes and returns the record waiting under `longname`.
    pub fn take(&mut self, longname: &str) -> Option<usize> {
        self.by_longname.remove(longname)
    }

    pub fn len(&self) -> usize {
        self.by_longname.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_longname.is_empty()
    }

    /// Empties the table, returning the records that never found a
    /// counterpart, in scan order.
    pub fn drain_unpaired(&mut self) -> Vec<usize> {
        let mut unpaired: Vec<usize> = self.by_longname.drain().map(|(_, idx)| idx).collect();
        unpaired.sort_unstable();
        unpaired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_take() {
        let mut table = PendingMerges::new();

        assert_eq!(table.hold("A#m", 3), HoldOutcome::Held);
        assert_eq!(table.take("B#m"), None);
        assert_eq!(table.take("A#m"), Some(3));
        assert_eq!(table.take("A#m"), None);
        assert!(table.is_empty());
    }

    #[test]
    fn test_duplicate_hold_reports_replacement() {
        let mut table = PendingMerges::new();

        table.hold("A#m", 1);
        assert_eq!(table.hold("A#m", 4), HoldOutcome::Replaced(1));
        assert_eq!(table.len(), 1);
        assert_eq!(table.take("A#m"), Some(4));
    }

    #[test]
    fn test_drain_unpaired_in_scan_order() {
        let mut table = PendingMerges::new();
        table.hold("B#x", 7);
        table.hold("A#y", 2);

        assert_eq!(table.drain_unpaired(), vec![2, 7]);
        assert!(table.is_empty());
    }
}
