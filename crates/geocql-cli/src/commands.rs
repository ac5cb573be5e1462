use crate::{
    context::Context,
    error::CliResult,
    input::{self, InputRecord},
};
use geocql::{obs, prelude::Filter};
use std::{
    io::{self, Write},
    path::Path,
};

/// `geocql check`: print the canonical form and the attributes read.
pub fn check(ctx: &Context, cql: &str) -> CliResult<()> {
    let filter = ctx.parse(cql)?;
    println!("{}", describe(&filter));

    Ok(())
}

/// `geocql filter`: echo the input lines the filter accepts.
pub fn filter(ctx: &Context, cql: &str, input: Option<&Path>) -> CliResult<()> {
    let filter = ctx.parse(cql)?;
    let records = input::read_records(input, &ctx.config.records)?;
    ctx.debug_log(format!("loaded {} record(s)", records.len()));

    let mut out = io::stdout().lock();
    let (scanned, matched) = write_matches(&filter, &records, &mut out)?;
    out.flush()?;

    ctx.debug_log(format!("scanned {scanned}, matched {matched}"));
    ctx.debug_log(format!("metrics: {:?}", obs::metrics_report().ops));

    Ok(())
}

pub fn describe(filter: &Filter) -> String {
    let attributes: Vec<_> = filter.attributes().into_iter().collect();
    let attributes = if attributes.is_empty() {
        "(none)".to_string()
    } else {
        attributes.join(", ")
    };

    format!("{filter}\nattributes: {attributes}")
}

/// Write each accepted record's source line; returns (scanned, matched).
pub fn write_matches(
    filter: &Filter,
    records: &[InputRecord],
    out: &mut impl Write,
) -> io::Result<(u64, u64)> {
    let mut cursor = filter.select(records);
    for record in cursor.by_ref() {
        writeln!(out, "{}", record.line)?;
    }

    Ok((cursor.scanned(), cursor.matched()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::RecordConfig, input::parse_lines};

    fn records() -> Vec<InputRecord> {
        let lines = [
            r#"{"fid": "a", "kind": "road", "lanes": 4, "geom": "LINESTRING(0 0, 5 5)"}"#,
            r#"{"fid": "b", "kind": "river", "geom": "LINESTRING(10 10, 20 20)"}"#,
            r#"{"fid": "c", "kind": "road", "lanes": 1, "geom": "POINT(30 30)"}"#,
        ];
        let config = RecordConfig {
            id_field: Some("fid".to_string()),
            geometry_field: Some("geom".to_string()),
        };

        parse_lines(lines.join("\n").as_bytes(), &config).expect("records")
    }

    fn run(cql: &str) -> (String, u64, u64) {
        let filter = geocql::parse(cql).expect("parse");
        let mut out = Vec::new();
        let (scanned, matched) =
            write_matches(&filter, &records(), &mut out).expect("write");

        (String::from_utf8(out).expect("utf8"), scanned, matched)
    }

    #[test]
    fn matches_echo_source_lines() {
        let (out, scanned, matched) = run("kind = 'road' AND lanes > 2");

        assert_eq!(out.lines().count(), 1);
        assert!(out.starts_with(r#"{"fid": "a""#));
        assert_eq!((scanned, matched), (3, 1));
    }

    #[test]
    fn spatial_and_id_filters_use_configured_fields() {
        let (out, _, matched) = run("BBOX(geometry(), 0, 0, 25, 25)");
        assert_eq!(matched, 2);
        assert!(!out.contains(r#""fid": "c""#));

        let (out, _, matched) = run("IN ('c')");
        assert_eq!(matched, 1);
        assert!(out.contains(r#""fid": "c""#));
    }

    #[test]
    fn absent_attributes_never_match() {
        let (out, _, matched) = run("lanes < 100");

        assert_eq!(matched, 2);
        assert!(!out.contains("river"));
    }

    #[test]
    fn describe_lists_attributes() {
        let filter = geocql::parse("b = 1 AND a LIKE 'x%'").expect("parse");
        assert_eq!(
            describe(&filter),
            "(b = 1 AND a LIKE 'x%')\nattributes: a, b"
        );

        assert_eq!(
            describe(&Filter::Include),
            "INCLUDE\nattributes: (none)"
        );
    }
}
