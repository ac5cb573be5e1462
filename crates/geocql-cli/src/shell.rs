use crate::{
    commands::describe,
    context::Context,
    error::{CliError, CliResult},
    input::InputRecord,
};
use rustyline::{DefaultEditor, error::ReadlineError};

const PROMPT: &str = "geocql> ";

const HELP: &str = "\
enter a CQL filter to list the records it accepts
  .check <cql>   show the canonical form and attributes read
  .count         number of loaded records
  .help          this message
  .quit          leave the shell";

///
/// Reply
/// What the shell does after one input line.
///

#[derive(Debug, Eq, PartialEq)]
pub enum Reply {
    Print(String),
    Quit,
}

/// Run the interactive shell over the loaded records.
pub fn run(ctx: &Context, records: &[InputRecord]) -> CliResult<()> {
    let settings = &ctx.config.shell;
    let config = rustyline::Config::builder()
        .max_history_size(settings.history_size)?
        .build();
    let mut editor = DefaultEditor::with_config(config)?;

    if let Some(path) = &settings.history_file
        && editor.load_history(path).is_err()
    {
        ctx.debug_log(format!("no history at {}", path.display()));
    }

    println!(
        "geocql {}: {} record(s) loaded, .help for commands",
        geocql::VERSION,
        records.len()
    );

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line)?;

                match respond(ctx, line, records) {
                    Reply::Print(text) => println!("{text}"),
                    Reply::Quit => break,
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(path) = &settings.history_file {
        editor.save_history(path)?;
    }

    Ok(())
}

/// Handle one trimmed, non-empty input line.
pub fn respond(ctx: &Context, line: &str, records: &[InputRecord]) -> Reply {
    if line.starts_with('.') {
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));

        return match (command, rest.trim()) {
            (".quit" | ".exit", "") => Reply::Quit,
            (".help", "") => Reply::Print(HELP.to_string()),
            (".count", "") => Reply::Print(format!("{} record(s)", records.len())),
            (".check", cql) => match ctx.parse(cql) {
                Ok(filter) => Reply::Print(describe(&filter)),
                Err(e) => Reply::Print(e.to_string()),
            },
            _ => Reply::Print(format!("unknown command '{line}', try .help")),
        };
    }

    match ctx.parse(line) {
        Ok(filter) => {
            let mut cursor = filter.select(records);
            let mut text = String::new();
            for record in cursor.by_ref() {
                text.push_str(&record.line);
                text.push('\n');
            }
            text.push_str(&format!(
                "({} of {} records)",
                cursor.matched(),
                cursor.scanned()
            ));

            Reply::Print(text)
        }
        Err(e @ CliError::Cql { .. }) => Reply::Print(e.to_string()),
        Err(e) => Reply::Print(format!("error: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{Config, RecordConfig},
        input::parse_lines,
    };

    fn ctx() -> Context {
        Context::new(Config::default(), false)
    }

    fn records() -> Vec<InputRecord> {
        parse_lines(
            "{\"n\": 1}\n{\"n\": 2}\n{\"m\": 3}".as_bytes(),
            &RecordConfig::default(),
        )
        .expect("records")
    }

    #[test]
    fn filters_print_matches_and_summary() {
        let reply = respond(&ctx(), "n >= 2", &records());

        assert_eq!(
            reply,
            Reply::Print("{\"n\": 2}\n(1 of 3 records)".to_string())
        );
    }

    #[test]
    fn syntax_errors_are_printed_not_fatal() {
        let Reply::Print(text) = respond(&ctx(), "n >=", &records()) else {
            panic!("expected a printed reply");
        };

        assert!(text.contains("syntax error"));
        assert!(text.contains("n >="));
    }

    #[test]
    fn dot_commands() {
        let ctx = ctx();
        let records = records();

        assert_eq!(respond(&ctx, ".quit", &records), Reply::Quit);
        assert_eq!(
            respond(&ctx, ".count", &records),
            Reply::Print("3 record(s)".to_string())
        );
        assert_eq!(
            respond(&ctx, ".check n=1", &records),
            Reply::Print("n = 1\nattributes: n".to_string())
        );
        assert!(matches!(
            respond(&ctx, ".nope", &records),
            Reply::Print(text) if text.starts_with("unknown command")
        ));
    }

    #[test]
    fn command_names_must_end_at_whitespace() {
        let ctx = ctx();
        let records = records();

        for line in [".checkn=1", ".check_all n=1", ".countx", ".quitnow"] {
            assert_eq!(
                respond(&ctx, line, &records),
                Reply::Print(format!("unknown command '{line}', try .help")),
                "{line}"
            );
        }
        assert_eq!(
            respond(&ctx, ".check\tn=1", &records),
            Reply::Print("n = 1\nattributes: n".to_string())
        );
        assert!(matches!(
            respond(&ctx, ".count 2", &records),
            Reply::Print(text) if text.starts_with("unknown command")
        ));
    }
}
