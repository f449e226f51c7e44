use std::collections::HashMap;

use csv::ReaderBuilder;

use crate::errors::ParserError;
use crate::model::Table;
use crate::schema::SheetKind;

/// Parses exported CSV text and checks that the columns `kind` depends on are present.
pub fn parse_sheet(kind: SheetKind, content: &str) -> Result<Table, ParserError> {
    let table = parse_table(kind, content)?;
    for column in kind.required_columns() {
        if !table.has_column(column) {
            return Err(ParserError::MissingColumn {
                sheet: kind.label(),
                column,
            });
        }
    }
    Ok(table)
}

/// Parses exported CSV text into a [`Table`] without any schema checks.
pub fn parse_table(kind: SheetKind, content: &str) -> Result<Table, ParserError> {
    let sheet = kind.label();
    let content_hash = blake3::hash(content.as_bytes()).to_hex().to_string();
    let body = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());
    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record.map_err(|source| ParserError::Csv { sheet, source })?,
        None => return Err(ParserError::EmptyHeader { sheet }),
    };
    let columns = parse_header(sheet, &header)?;
    let width = columns.len();
    let mut table = Table::new(kind, content_hash, columns);

    for record in records {
        let record = record.map_err(|source| ParserError::Csv { sheet, source })?;
        let line_index = record.position().map(|pos| pos.line() as usize).unwrap_or(0);

        if record.len() > width && record.iter().skip(width).any(|cell| !cell.trim().is_empty()) {
            return Err(ParserError::DataRow {
                sheet,
                line_index,
                message: format!("expected at most {width} fields, found {}", record.len()),
            });
        }

        let row = record.iter().take(width).map(parse_cell).collect();
        table.push_row(row);
    }

    Ok(table)
}

fn parse_header(sheet: &'static str, header: &csv::StringRecord) -> Result<Vec<String>, ParserError> {
    if header.iter().all(|cell| cell.trim().is_empty()) {
        return Err(ParserError::EmptyHeader { sheet });
    }

    // Repeated names become `<name>.1`, `<name>.2`, ... skipping any name already taken.
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut columns = Vec::with_capacity(header.len());
    for (idx, cell) in header.iter().enumerate() {
        let trimmed = cell.trim();
        let mut name = if trimmed.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            trimmed.to_string()
        };

        let mut count = counts.get(&name).copied().unwrap_or(0);
        while count > 0 {
            counts.insert(name.clone(), count + 1);
            name = format!("{name}.{count}");
            count = counts.get(&name).copied().unwrap_or(0);
        }
        counts.insert(name.clone(), count + 1);
        columns.push(name);
    }
    Ok(columns)
}

fn parse_cell(cell: &str) -> Option<String> {
    if cell.trim().is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}
