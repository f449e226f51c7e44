use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("{sheet} CSV error: {source}")]
    Csv {
        sheet: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{sheet} sheet did not contain a header row")]
    EmptyHeader { sheet: &'static str },

    #[error("{sheet} sheet is missing required column '{column}'")]
    MissingColumn {
        sheet: &'static str,
        column: &'static str,
    },

    #[error("{sheet} data row {line_index} invalid: {message}")]
    DataRow {
        sheet: &'static str,
        line_index: usize,
        message: String,
    },
}
