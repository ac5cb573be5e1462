//! Filtered scans over record streams.

use crate::{
    filter::Filter,
    obs::sink::{self, MetricsEvent},
    record::Record,
};

///
/// FilterCursor
///
/// Iterator yielding the records a filter accepts. Scan counts are
/// reported to the metrics sink when the cursor is dropped.
///

pub struct FilterCursor<'f, I> {
    filter: &'f Filter,
    records: I,
    scanned: u64,
    matched: u64,
}

impl<'f, I> FilterCursor<'f, I> {
    pub(crate) const fn new(filter: &'f Filter, records: I) -> Self {
        Self {
            filter,
            records,
            scanned: 0,
            matched: 0,
        }
    }

    #[must_use]
    pub const fn filter(&self) -> &'f Filter {
        self.filter
    }

    /// Records pulled from the source so far.
    #[must_use]
    pub const fn scanned(&self) -> u64 {
        self.scanned
    }

    /// Records yielded so far.
    #[must_use]
    pub const fn matched(&self) -> u64 {
        self.matched
    }
}

impl<I> Iterator for FilterCursor<'_, I>
where
    I: Iterator,
    I::Item: Record,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        for record in self.records.by_ref() {
            self.scanned += 1;
            if self.filter.apply(&record) {
                self.matched += 1;
                return Some(record);
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.records.size_hint().1)
    }
}

impl<I> Drop for FilterCursor<'_, I> {
    fn drop(&mut self) {
        sink::record(MetricsEvent::CursorFinish {
            scanned: self.scanned,
            matched: self.matched,
        });
    }
}

impl Filter {
    /// Lazily keep the records this filter accepts.
    pub fn select<I>(&self, records: I) -> FilterCursor<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Record,
    {
        FilterCursor::new(self, records.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cql::parse, record::BasicRecord, value::Value};
    use std::collections::BTreeMap;

    fn people() -> Vec<BasicRecord> {
        vec![
            BasicRecord::new().with_id("p.1").with("age", 31).with("name", "ann"),
            BasicRecord::new().with_id("p.2").with("age", 17),
            BasicRecord::new().with_id("p.3").with("name", "cy"),
            BasicRecord::new().with_id("p.4").with("age", 64).with("name", "dee"),
        ]
    }

    #[test]
    fn select_yields_accepted_records_in_order() {
        let records = people();
        let filter = parse("age >= 18").expect("parse");

        let ids: Vec<_> = filter
            .select(&records)
            .map(|record| record.id().unwrap_or_default().to_string())
            .collect();

        assert_eq!(ids, ["p.1", "p.4"]);
    }

    #[test]
    fn counts_track_partial_consumption() {
        let records = people();
        let filter = parse("name IS NOT NULL").expect("parse");
        let mut cursor = filter.select(&records);

        assert!(cursor.next().is_some());
        assert_eq!((cursor.scanned(), cursor.matched()), (1, 1));

        assert!(cursor.next().is_some());
        assert_eq!((cursor.scanned(), cursor.matched()), (3, 2));

        assert!(cursor.next().is_some());
        assert!(cursor.next().is_none());
        assert_eq!((cursor.scanned(), cursor.matched()), (4, 3));
    }

    #[test]
    fn exclude_scans_everything_and_yields_nothing() {
        let records = people();
        let filter = Filter::Exclude;
        let mut cursor = filter.select(records.iter());

        assert!(cursor.next().is_none());
        assert_eq!(cursor.scanned(), 4);
        assert_eq!(cursor.matched(), 0);
    }

    #[test]
    fn select_accepts_owned_maps() {
        let rows: Vec<BTreeMap<String, Value>> = vec![
            BTreeMap::from([("k".to_string(), Value::from("a"))]),
            BTreeMap::from([("k".to_string(), Value::Null)]),
        ];
        let filter = parse("k LIKE 'a%'").expect("parse");

        let kept: Vec<_> = filter.select(rows).collect();
        assert_eq!(kept.len(), 1);
    }
}
