//! Inheritance and override merging for class members.
//!
//! Extractors emit a base definition and an inheriting or overriding
//! declaration of the same member as two records, in no particular order.
//! The resolver buffers whichever one appears first and completes the pair
//! when the second one arrives, so the merge does not depend on scan order.

use crate::pending::{HoldOutcome, PendingMerges};
use doclet_core::Record;
use tracing::trace;

/// Decision taken for one member record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing to attach: ignored, or an inherited member that is not treated.
    Dropped,
    /// Waiting for its counterpart. `replaced` is the record that was
    /// waiting under the same identifier before, if any.
    Held { replaced: Option<usize> },
    /// Attach `record`, documented with `parent_doc` when merged.
    Resolved {
        record: usize,
        parent_doc: Option<usize>,
    },
}

impl Resolution {
    fn pass(record: usize) -> Self {
        Self::Resolved {
            record,
            parent_doc: None,
        }
    }

    fn held(outcome: HoldOutcome) -> Self {
        match outcome {
            HoldOutcome::Held => Self::Held { replaced: None },
            HoldOutcome::Replaced(previous) => Self::Held {
                replaced: Some(previous),
            },
        }
    }
}

/// Pairs member records that describe the same logical member.
///
/// Scoped to one run: the pending table is never shared.
#[derive(Debug, Clone)]
pub struct MemberResolver {
    pending: PendingMerges,
    treat_inherited: bool,
}

impl MemberResolver {
    pub fn new(treat_inherited: bool) -> Self {
        Self {
            pending: PendingMerges::new(),
            treat_inherited,
        }
    }

    /// Decides what to do with `records[index]`.
    ///
    /// 1. A doc request (`@inheritdoc`/`@override`) is documented by
    ///    whatever record waits under its longname, or waits itself.
    /// 2. Ignored records are dropped.
    /// 3. An inherited override documents the record waiting under its
    ///    longname, which is the record kept, or waits itself. Other inherited members are kept only
    ///    when inherited elements are treated.
    /// 4. Anything else passes through.
    pub fn resolve(&mut self, records: &[Record], index: usize) -> Resolution {
        let record = &records[index];
        let longname = record.longname.as_str();

        if record.requests_doc_merge() {
            return match self.pending.take(longname) {
                Some(inherited) => {
                    trace!("{}: merged with held documentation", longname);
                    Resolution::Resolved {
                        record: index,
                        parent_doc: Some(inherited),
                    }
                }
                None => {
                    trace!("{}: held until its counterpart appears", longname);
                    Resolution::held(self.pending.hold(longname, index))
                }
            };
        }

        if record.ignore {
            trace!("{}: ignored", longname);
            return Resolution::Dropped;
        }

        if !record.inherited {
            return Resolution::pass(index);
        }

        if record.overrides.is_some() {
            match self.pending.take(longname) {
                Some(request) => {
                    trace!("{}: inherited documentation merged into held record", longname);
                    Resolution::Resolved {
                        record: request,
                        parent_doc: Some(index),
                    }
                }
                None => {
                    trace!("{}: inherited override held", longname);
                    Resolution::held(self.pending.hold(longname, index))
                }
            }
        } else if self.treat_inherited {
            Resolution::pass(index)
        } else {
            Resolution::Dropped
        }
    }

    /// Records still waiting for a counterpart. Empties the table.
    pub fn finish(&mut self) -> Vec<usize> {
        self.pending.drain_unpaired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(longname: &str) -> Record {
        let name = longname.rsplit('#').next().unwrap_or(longname);
        Record::new("function", longname, name).with_memberof("Child")
    }

    #[test]
    fn test_plain_member_passes_through() {
        let records = vec![method("Child#run")];
        let mut resolver = MemberResolver::new(true);

        assert_eq!(resolver.resolve(&records, 0), Resolution::pass(0));
    }

    #[test]
    fn test_ignored_member_is_dropped() {
        let records = vec![method("Child#run").with_ignore()];
        let mut resolver = MemberResolver::new(true);

        assert_eq!(resolver.resolve(&records, 0), Resolution::Dropped);
        assert!(resolver.finish().is_empty());
    }

    #[test]
    fn test_request_first_then_inherited() {
        let records = vec![
            method("Child#run").with_inheritdoc(),
            method("Child#run").with_inherited(Some("Base#run")),
        ];
        let mut resolver = MemberResolver::new(true);

        assert_eq!(
            resolver.resolve(&records, 0),
            Resolution::Held { replaced: None }
        );
        // the held request is kept, documented by the inherited copy
        assert_eq!(
            resolver.resolve(&records, 1),
            Resolution::Resolved {
                record: 0,
                parent_doc: Some(1)
            }
        );
        assert!(resolver.finish().is_empty());
    }

    #[test]
    fn test_inherited_first_then_request() {
        let records = vec![
            method("Child#run").with_inherited(Some("Base#run")),
            method("Child#run").with_override(),
        ];
        let mut resolver = MemberResolver::new(true);

        assert_eq!(
            resolver.resolve(&records, 0),
            Resolution::Held { replaced: None }
        );
        assert_eq!(
            resolver.resolve(&records, 1),
            Resolution::Resolved {
                record: 1,
                parent_doc: Some(0)
            }
        );
    }

    #[test]
    fn test_plain_inherited_follows_option() {
        let records = vec![method("Child#size").with_inherited(None)];

        let mut treated = MemberResolver::new(true);
        assert_eq!(treated.resolve(&records, 0), Resolution::pass(0));

        let mut skipped = MemberResolver::new(false);
        assert_eq!(skipped.resolve(&records, 0), Resolution::Dropped);
    }

    #[test]
    fn test_ignored_request_is_still_held() {
        // the doc request rule comes before the ignore rule
        let records = vec![method("Child#run").with_inheritdoc().with_ignore()];
        let mut resolver = MemberResolver::new(true);

        assert_eq!(
            resolver.resolve(&records, 0),
            Resolution::Held { replaced: None }
        );
    }

    #[test]
    fn test_second_request_pairs_with_first() {
        let records = vec![
            method("Child#run").with_inheritdoc(),
            method("Child#run").with_override(),
            method("Child#run").with_inherited(Some("Base#run")),
        ];
        let mut resolver = MemberResolver::new(true);

        resolver.resolve(&records, 0);
        // any record waiting under the longname completes the pair
        assert_eq!(
            resolver.resolve(&records, 1),
            Resolution::Resolved {
                record: 1,
                parent_doc: Some(0)
            }
        );
        assert_eq!(
            resolver.resolve(&records, 2),
            Resolution::Held { replaced: None }
        );
        assert_eq!(resolver.finish(), vec![2]);
    }

    #[test]
    fn test_two_inherited_overrides_pair() {
        let records = vec![
            method("Child#run").with_inherited(Some("Base#run")),
            method("Child#run").with_inherited(Some("Base#run")),
        ];
        let mut resolver = MemberResolver::new(true);

        resolver.resolve(&records, 0);
        assert_eq!(
            resolver.resolve(&records, 1),
            Resolution::Resolved {
                record: 0,
                parent_doc: Some(1)
            }
        );
        assert!(resolver.finish().is_empty());
    }

    #[test]
    fn test_unpaired_records_are_reported() {
        let records = vec![
            method("Child#run").with_inherited(Some("Base#run")),
            method("Child#stop").with_inheritdoc(),
        ];
        let mut resolver = MemberResolver::new(true);
        resolver.resolve(&records, 0);
        resolver.resolve(&records, 1);

        assert_eq!(resolver.finish(), vec![0, 1]);
    }
}
