use crate::{
    expr::Expression,
    filter::{Filter, LogicOp, SpatialOp},
    record::BasicRecord,
    value::{Value, parse_wkt},
};
use geo_types::point;

// ---- helpers -----------------------------------------------------------

fn attr(name: &str) -> Expression {
    Expression::attribute(name)
}

fn lit(value: impl Into<Value>) -> Expression {
    Expression::literal(value)
}

fn wkt(text: &str) -> Expression {
    Expression::Literal(Value::Geometry(parse_wkt(text).expect("valid wkt")))
}

fn x_is_five() -> BasicRecord {
    BasicRecord::new().with("x", 5)
}

// ---- missing attributes ------------------------------------------------

#[test]
fn comparisons_against_absent_attribute_are_false() {
    let record = x_is_five();

    for filter in [
        Filter::lt(attr("y"), lit(5)),
        Filter::eq(attr("y"), lit(5)),
        Filter::ne(attr("y"), lit(5)),
        Filter::gt(lit(5), attr("y")),
        Filter::eq(lit(5), attr("y")),
        Filter::ge(attr("y"), attr("y")),
    ] {
        assert!(!filter.apply(&record), "{filter:?}");
    }
}

#[test]
fn arithmetic_over_absent_attribute_is_false() {
    let record = x_is_five();

    assert!(!Filter::lt(attr("y"), Expression::add(attr("x"), lit(5))).apply(&record));
    assert!(!Filter::lt(Expression::add(attr("y"), lit(5)), attr("x")).apply(&record));
}

#[test]
fn or_does_not_short_circuit_on_absent_side() {
    let record = x_is_five();
    let absent = Filter::gt(attr("y"), lit(5));
    let present = Filter::eq(attr("x"), lit(5));

    assert!((absent.clone() | present.clone()).apply(&record));
    assert!((present | absent).apply(&record));
}

#[test]
fn membership_pattern_null_and_spatial_on_absent_are_false() {
    let record = x_is_five();

    assert!(!Filter::in_(attr("y"), vec![lit(5)]).apply(&record));
    assert!(!Filter::not_in(attr("y"), vec![lit(5)]).apply(&record));
    assert!(
        !Filter::like(attr("y"), "5", false)
            .expect("pattern")
            .apply(&record)
    );
    assert!(
        !Filter::not_like(attr("y"), "5", false)
            .expect("pattern")
            .apply(&record)
    );
    assert!(!Filter::is_null("y").apply(&record));
    assert!(!Filter::is_not_null("y").apply(&record));
    assert!(!Filter::spatial(SpatialOp::Contains, attr("y"), wkt("POINT(0 0)")).apply(&record));
    assert!(!Filter::id(vec![Value::from(5)]).apply(&record));
}

// ---- comparison --------------------------------------------------------

#[test]
fn numeric_equality_across_number_and_text() {
    let record = BasicRecord::new();

    assert!(Filter::eq(lit(1), lit(1.0)).apply(&record));
    assert!(Filter::eq(lit("1"), lit(1)).apply(&record));
    assert!(Filter::eq(lit(1.0), lit("1")).apply(&record));
}

#[test]
fn null_compares_to_nothing() {
    let record = BasicRecord::new().with("n", Value::Null);

    assert!(!Filter::eq(attr("n"), lit(Value::Null)).apply(&record));
    assert!(!Filter::ne(attr("n"), lit(1)).apply(&record));
    assert!(!Filter::lt(attr("n"), lit(1)).apply(&record));
}

#[test]
fn mismatched_kinds_fail_every_operator() {
    let record = BasicRecord::new().with("g", point!(x: 0.0, y: 0.0));

    assert!(!Filter::eq(attr("g"), lit(0)).apply(&record));
    assert!(!Filter::ne(attr("g"), lit(0)).apply(&record));
}

#[test]
fn geometry_equality_and_ordering() {
    let record = BasicRecord::new().with("g", point!(x: 1.0, y: 2.0));

    assert!(Filter::eq(attr("g"), wkt("POINT(1 2)")).apply(&record));
    assert!(Filter::ne(attr("g"), wkt("POINT(2 2)")).apply(&record));
    assert!(!Filter::lt(attr("g"), wkt("POINT(2 2)")).apply(&record));
    assert!(Filter::eq(attr("g"), lit("POINT(1 2)")).apply(&record));
}

#[test]
fn bool_ordering() {
    let record = BasicRecord::new().with("flag", true);

    assert!(Filter::gt(attr("flag"), lit(false)).apply(&record));
    assert!(Filter::eq(attr("flag"), lit("TRUE")).apply(&record));
    assert!(!Filter::eq(attr("flag"), lit("sure")).apply(&record));
}

// ---- logic -------------------------------------------------------------

#[test]
fn and_of_matching_comparisons() {
    let record = BasicRecord::new().with("str", "one").with("int", 1);
    let filter = Filter::and(vec![
        Filter::eq(attr("str"), lit("one")),
        Filter::eq(attr("int"), lit(1)),
    ]);

    assert!(filter.apply(&record));
    assert!(!(filter & Filter::Exclude).apply(&record));
}

#[test]
fn empty_logic_nodes() {
    let record = BasicRecord::new();

    assert!(Filter::and(vec![]).apply(&record));
    assert!(!Filter::or(vec![]).apply(&record));
    assert!(Filter::Logic { op: LogicOp::And, operands: vec![] }.apply(&record));
    assert!(!Filter::Logic { op: LogicOp::Or, operands: vec![] }.apply(&record));
    assert!(!Filter::Logic { op: LogicOp::Not, operands: vec![] }.apply(&record));
}

#[test]
fn logic_constructors_collapse_trivial_operand_lists() {
    let x = Filter::eq(attr("x"), lit(1));

    assert_eq!(Filter::and(vec![]), Filter::Include);
    assert_eq!(Filter::or(vec![]), Filter::Exclude);
    assert_eq!(Filter::and(vec![x.clone()]), x);
    assert_eq!(Filter::or(vec![x.clone()]), x);
    assert!(matches!(
        Filter::and(vec![x.clone(), x]),
        Filter::Logic { op: LogicOp::And, ref operands } if operands.len() == 2
    ));
}

#[test]
fn not_negates_its_operand() {
    let record = x_is_five();

    assert!((!Filter::eq(attr("x"), lit(4))).apply(&record));
    assert!(!Filter::not(Filter::Include).apply(&record));
    assert!(Filter::not(Filter::gt(attr("y"), lit(1))).apply(&record));
}

// ---- null test ---------------------------------------------------------

#[test]
fn is_null_truth_table() {
    let record = BasicRecord::new().with("x", Value::Null).with("y", 1);

    assert!(Filter::is_null("x").apply(&record));
    assert!(!Filter::is_not_null("x").apply(&record));
    assert!(!Filter::is_null("y").apply(&record));
    assert!(Filter::is_not_null("y").apply(&record));
    assert!(!Filter::is_null("z").apply(&record));
    assert!(!Filter::is_not_null("z").apply(&record));
}

// ---- membership --------------------------------------------------------

#[test]
fn in_truth_table() {
    let record = BasicRecord::new().with("str", "one");
    let candidates = || vec![lit("one"), lit("two")];

    assert!(Filter::in_(attr("str"), candidates()).apply(&record));
    assert!(!Filter::not_in(attr("str"), candidates()).apply(&record));
    assert!(!Filter::in_(attr("str"), vec![lit("three")]).apply(&record));
    assert!(Filter::not_in(attr("str"), vec![lit("three")]).apply(&record));
    assert!(!Filter::in_(attr("nope"), candidates()).apply(&record));
    assert!(!Filter::not_in(attr("nope"), candidates()).apply(&record));
}

#[test]
fn null_is_not_in_any_list() {
    let record = BasicRecord::new().with("n", Value::Null);

    assert!(!Filter::in_(attr("n"), vec![lit(Value::Null)]).apply(&record));
    assert!(Filter::not_in(attr("n"), vec![lit(1)]).apply(&record));
}

#[test]
fn in_uses_comparison_coercion() {
    let record = BasicRecord::new().with("code", "7");

    assert!(Filter::in_(attr("code"), vec![lit(3), lit(7.0)]).apply(&record));
}

// ---- pattern match -----------------------------------------------------

#[test]
fn like_truth_table() {
    let record = BasicRecord::new().with("str", "abcdef").with("num", 123_456);
    let like = |attribute: &str, pattern: &str, relaxed: bool| {
        Filter::like(attr(attribute), pattern, relaxed)
            .expect("pattern")
            .apply(&record)
    };

    assert!(like("str", "%cd%", false));
    assert!(!like("str", "%cd", false));
    assert!(!like("str", "cd%", false));
    assert!(like("str", "cd%", true));
    assert!(like("num", "123%", false));
}

#[test]
fn not_like_only_flips_matchable_values() {
    let record = BasicRecord::new().with("str", "abcdef").with("n", Value::Null);

    assert!(
        Filter::not_like(attr("str"), "x%", false)
            .expect("pattern")
            .apply(&record)
    );
    assert!(
        !Filter::not_like(attr("n"), "x%", false)
            .expect("pattern")
            .apply(&record)
    );
}

// ---- spatial -----------------------------------------------------------

#[test]
fn spatial_against_default_geometry() {
    let record = BasicRecord::new()
        .with("name", "park")
        .with("shape", parse_wkt("POLYGON((0 0,10 0,10 10,0 10,0 0))").expect("polygon"));

    assert!(
        Filter::spatial(
            SpatialOp::Contains,
            Expression::DefaultGeometry,
            wkt("POINT(5 5)")
        )
        .apply(&record)
    );
    assert!(Filter::spatial(SpatialOp::Within, wkt("POINT(5 5)"), attr("shape")).apply(&record));
    assert!(!Filter::spatial(SpatialOp::Within, attr("name"), attr("shape")).apply(&record));
}

#[test]
fn spatial_reads_wkt_text_attributes() {
    let record = BasicRecord::new().with("where", "POINT(1 1)");

    assert!(
        Filter::spatial(
            SpatialOp::Intersects,
            attr("where"),
            wkt("POLYGON((0 0,2 0,2 2,0 2,0 0))")
        )
        .apply(&record)
    );
}

#[test]
fn deeply_nested_wkt_text_attribute_is_not_a_geometry() {
    let nested = format!(
        "{}POINT(0 0){}",
        "GEOMETRYCOLLECTION(".repeat(3_000),
        ")".repeat(3_000)
    );
    let record = BasicRecord::new().with("g", nested);
    let filter = Filter::spatial(SpatialOp::Intersects, attr("g"), wkt("POINT(0 0)"));

    assert!(!filter.apply(&record));
}

#[test]
fn non_finite_geometry_attributes_match_no_spatial_predicate() {
    let record = BasicRecord::new()
        .with("nan", point!(x: f64::NAN, y: 0.0))
        .with("inf", point!(x: 1.0, y: f64::INFINITY));
    let triangle = wkt("POLYGON((0 0,2 0,2 2,0 0))");

    for op in SpatialOp::ALL {
        for name in ["nan", "inf"] {
            let filter = Filter::spatial(op, attr(name), triangle.clone());
            assert!(!filter.apply(&record), "{} on {name}", op.name());
        }
    }
}

#[test]
fn bbox_tests_rectangle_intersection() {
    let record = BasicRecord::new().with("geom", point!(x: 3.0, y: 4.0));

    assert!(Filter::bbox(attr("geom"), 0.0, 0.0, 5.0, 5.0).apply(&record));
    assert!(!Filter::bbox(attr("geom"), 10.0, 10.0, 20.0, 20.0).apply(&record));
}

// ---- ids and constants -------------------------------------------------

#[test]
fn id_filter_matches_canonical_text() {
    let record = BasicRecord::new().with_id("5");

    assert!(Filter::id(vec![Value::from(5)]).apply(&record));
    assert!(Filter::id(vec![Value::from("4"), Value::from("5")]).apply(&record));
    assert!(!Filter::id(vec![Value::from("6")]).apply(&record));
}

#[test]
fn constants() {
    let record = BasicRecord::new();

    assert!(Filter::Include.apply(&record));
    assert!(!Filter::Exclude.apply(&record));
}

// ---- between -----------------------------------------------------------

#[test]
fn between_is_inclusive() {
    let record = x_is_five();

    assert!(Filter::between(attr("x"), lit(5), lit(6)).apply(&record));
    assert!(!Filter::between(attr("x"), lit(6), lit(7)).apply(&record));
    assert!(Filter::not_between(attr("x"), lit(6), lit(7)).apply(&record));
    assert!(!Filter::not_between(attr("y"), lit(6), lit(7)).apply(&record));
}

// ---- attributes --------------------------------------------------------

#[test]
fn attributes_are_sorted_and_deduplicated() {
    let filter = Filter::and(vec![
        Filter::gt(attr("b"), Expression::add(attr("a"), lit(1))),
        Filter::is_null("c"),
        Filter::in_(attr("b"), vec![attr("d")]),
        Filter::id(vec![Value::from(1)]),
    ]);

    let names: Vec<String> = filter.attributes().into_iter().collect();
    assert_eq!(names, ["a", "b", "c", "d"]);
}
