use crate::{
    cql,
    expr::Expression,
    filter::Filter,
    obs::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink},
    record::BasicRecord,
};
use std::{cell::RefCell, rc::Rc};

#[derive(Default)]
struct CaptureSink {
    events: RefCell<Vec<MetricsEvent>>,
}

impl MetricsSink for CaptureSink {
    fn record(&self, event: MetricsEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[test]
fn parse_counts_calls_and_errors() {
    metrics_reset_all();

    cql::parse("x = 1").expect("parse");
    cql::parse("x = ").expect_err("dangling operator");

    let ops = metrics_report().ops;
    assert_eq!(ops.parse_calls, 2);
    assert_eq!(ops.parse_errors, 1);
}

#[test]
fn cursor_counts_scanned_and_matched() {
    metrics_reset_all();

    let records = vec![
        BasicRecord::new().with("n", 1),
        BasicRecord::new().with("n", 5),
        BasicRecord::new().with("n", 9),
    ];
    let filter = Filter::gt(Expression::attribute("n"), Expression::literal(4));
    let kept = filter.select(&records).count();

    assert_eq!(kept, 2);
    let ops = metrics_report().ops;
    assert_eq!(ops.cursor_calls, 1);
    assert_eq!(ops.records_scanned, 3);
    assert_eq!(ops.records_matched, 2);
    assert_eq!(ops.match_ratio(), Some(2.0 / 3.0));
}

#[test]
fn reset_clears_counters() {
    cql::parse("INCLUDE").expect("parse");
    metrics_reset_all();

    assert_eq!(metrics_report().ops.parse_calls, 0);
    assert_eq!(metrics_report().ops.match_ratio(), None);
}

#[test]
fn override_sink_captures_events_and_is_restored() {
    metrics_reset_all();
    let capture = Rc::new(CaptureSink::default());

    with_metrics_sink(capture.clone(), || {
        cql::parse("a = 1").expect("parse");
    });
    cql::parse("b = 2").expect("parse");

    assert_eq!(
        capture.events.borrow().as_slice(),
        &[MetricsEvent::Parse { ok: true }]
    );
    assert_eq!(metrics_report().ops.parse_calls, 1);
}

#[test]
fn override_sink_is_restored_on_unwind() {
    metrics_reset_all();
    let capture = Rc::new(CaptureSink::default());

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        with_metrics_sink(capture.clone(), || panic!("boom"));
    }));
    assert!(result.is_err());

    cql::parse("a = 1").expect("parse");
    assert!(capture.events.borrow().is_empty());
    assert_eq!(metrics_report().ops.parse_calls, 1);
}
