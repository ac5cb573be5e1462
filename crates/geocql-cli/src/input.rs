use crate::{
    config::RecordConfig,
    error::{CliError, CliResult},
};
use geocql::{
    core::value::{format_number, parse_wkt},
    prelude::*,
};
use geo_types::Geometry;
use serde_json::{Map, Value as Json};
use std::{
    borrow::Cow,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

///
/// InputRecord
///
/// One JSON-lines record together with the line it was read from, so
/// accepted records can be echoed back unchanged.
///

#[derive(Clone, Debug)]
pub struct InputRecord {
    pub line: String,
    pub record: BasicRecord,
}

impl Record for InputRecord {
    fn lookup(&self, name: &str) -> Cow<'_, Value> {
        self.record.lookup(name)
    }

    fn geometry(&self) -> Option<&Geometry<f64>> {
        self.record.geometry()
    }

    fn id(&self) -> Option<&str> {
        self.record.id()
    }
}

/// Read records from a file, or stdin when no path is given.
pub fn read_records(path: Option<&Path>, config: &RecordConfig) -> CliResult<Vec<InputRecord>> {
    match path {
        Some(path) => parse_lines(BufReader::new(File::open(path)?), config),
        None => parse_lines(io::stdin().lock(), config),
    }
}

/// Parse JSON-lines input. Blank lines are skipped.
pub fn parse_lines(reader: impl BufRead, config: &RecordConfig) -> CliResult<Vec<InputRecord>> {
    let mut records = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record = parse_record(&line, config).map_err(|message| CliError::input(i + 1, message))?;
        records.push(InputRecord { line, record });
    }

    Ok(records)
}

/// Map one JSON object onto a record.
///
/// Scalars map onto the matching value kind; nested arrays and objects are
/// kept as their JSON text. The configured geometry field must hold WKT.
pub fn parse_record(line: &str, config: &RecordConfig) -> Result<BasicRecord, String> {
    let object: Map<String, Json> = match serde_json::from_str(line) {
        Ok(Json::Object(object)) => object,
        Ok(_) => return Err("expected a JSON object".to_string()),
        Err(e) => return Err(e.to_string()),
    };

    let mut record = BasicRecord::new();
    for (name, json) in object {
        if config.id_field.as_deref() == Some(name.as_str())
            && let Some(id) = id_text(&json)
        {
            record.set_id(id);
        }

        let value = if config.geometry_field.as_deref() == Some(name.as_str()) {
            geometry_value(&name, json)?
        } else {
            json_value(json)
        };
        record.insert(name, value);
    }

    if let Some(field) = &config.geometry_field {
        record.set_default_geometry(field.clone());
    }

    Ok(record)
}

fn json_value(json: Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
        Json::String(s) => Value::Text(s),
        nested @ (Json::Array(_) | Json::Object(_)) => Value::Text(nested.to_string()),
    }
}

fn geometry_value(name: &str, json: Json) -> Result<Value, String> {
    match json {
        Json::Null => Ok(Value::Null),
        Json::String(wkt) => parse_wkt(&wkt)
            .map(Value::Geometry)
            .map_err(|e| format!("field '{name}': {e}")),
        _ => Err(format!("field '{name}' must hold WKT text")),
    }
}

fn id_text(json: &Json) -> Option<String> {
    match json {
        Json::String(s) => Some(s.clone()),
        Json::Number(n) => n.as_f64().map(format_number),
        _ => None,
    }
}
