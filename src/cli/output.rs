//! Output formatting for console views.

use crate::app_lib::{AppError, Notice, NoticeKind};
use serde::Serialize;
use std::str::FromStr;
use tabled::{Table, Tabled};

/// How views print their data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Bordered table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(AppError::Config(format!("Unknown output format: {other}"))),
        }
    }
}

/// Renders rows as a table, or the raw records as JSON. `empty` is printed
/// in table mode when there is nothing to show.
///
/// # Errors
/// Returns `AppError::Serialization` if JSON encoding fails.
pub fn render_rows<R, T>(
    rows: Vec<R>,
    records: &T,
    format: OutputFormat,
    empty: &str,
) -> Result<String, AppError>
where
    R: Tabled,
    T: Serialize + ?Sized,
{
    match format {
        OutputFormat::Table if rows.is_empty() => Ok(empty.to_string()),
        OutputFormat::Table => Ok(Table::new(rows).to_string()),
        OutputFormat::Json => to_json(records),
    }
}

/// Renders one record; tables get a two-column field/value layout.
///
/// # Errors
/// Returns `AppError::Serialization` if JSON encoding fails.
pub fn render_single<R, T>(row: R, record: &T, format: OutputFormat) -> Result<String, AppError>
where
    R: Tabled,
    T: Serialize + ?Sized,
{
    match format {
        OutputFormat::Table => Ok(Table::new([row]).to_string()),
        OutputFormat::Json => to_json(record),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|err| AppError::Serialization(format!("Failed to encode output: {err}")))
}

/// Prints a workflow notice; errors go to stderr.
pub fn print_notice(notice: &Notice) {
    match notice.kind {
        NoticeKind::Error => eprintln!("{notice}"),
        NoticeKind::Success | NoticeKind::Info => println!("{notice}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Tabled)]
    struct Row {
        id: i64,
        name: &'static str,
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
        assert_eq!("JSON".parse::<OutputFormat>().ok(), Some(OutputFormat::Json));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn empty_table_prints_placeholder() -> anyhow::Result<()> {
        let rendered = render_rows(
            Vec::<Row>::new(),
            &json!([]),
            OutputFormat::Table,
            "Nothing here.",
        )?;
        assert_eq!(rendered, "Nothing here.");
        Ok(())
    }

    #[test]
    fn table_and_json_modes() -> anyhow::Result<()> {
        let records = json!([{"id": 1, "name": "alice"}]);
        let rows = || vec![Row { id: 1, name: "alice" }];
        let table = render_rows(rows(), &records, OutputFormat::Table, "")?;
        assert!(table.contains("alice"));
        assert!(table.contains("name"));

        let rendered = render_rows(rows(), &records, OutputFormat::Json, "")?;
        let parsed: serde_json::Value = serde_json::from_str(&rendered)?;
        assert_eq!(parsed, records);
        Ok(())
    }
}
