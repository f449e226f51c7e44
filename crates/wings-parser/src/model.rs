use crate::schema::SheetKind;

/// A sheet held as opaque text: ordered columns and rectangular rows.
///
/// Cells are never type-inferred. `None` marks an empty cell; every other value is kept
/// exactly as exported so identifier-like text (leading zeros, "NA") survives untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub kind: SheetKind,
    pub content_hash: String,
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(kind: SheetKind, content_hash: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            kind,
            content_hash: content_hash.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding short rows with empty cells.
    pub fn push_row(&mut self, mut row: Vec<Option<String>>) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Returns the index of `name`, appending an all-empty column when it does not exist.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(None);
        }
        self.columns.len() - 1
    }

    pub fn drop_column(&mut self, name: &str) -> bool {
        let Some(idx) = self.column_index(name) else {
            return false;
        };
        self.columns.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
        true
    }

    /// Renames `from` to `to`. An existing `to` column is replaced. Returns false when `from`
    /// is absent.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        if from == to {
            return self.has_column(from);
        }
        if !self.has_column(from) {
            return false;
        }
        self.drop_column(to);
        if let Some(idx) = self.column_index(from) {
            self.columns[idx] = to.to_string();
        }
        true
    }

    /// Copies every value of `from` into `to`, creating `to` if needed.
    pub fn copy_column(&mut self, from: &str, to: &str) -> bool {
        let Some(src) = self.column_index(from) else {
            return false;
        };
        let dst = self.ensure_column(to);
        for row in &mut self.rows {
            row[dst] = row[src].clone();
        }
        true
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .and_then(|cell| cell.as_deref())
    }

    pub fn value(&self, row: usize, name: &str) -> Option<&str> {
        self.column_index(name).and_then(|idx| self.get(row, idx))
    }

    pub fn set(&mut self, row: usize, column: usize, value: Option<String>) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|cells| cells.get_mut(column)) {
            *cell = value;
        }
    }

    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[Option<String>]) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }

    /// Iterates rows as `(column, value)` pairs in column order.
    pub fn records(&self) -> impl Iterator<Item = Vec<(&str, Option<&str>)>> + '_ {
        self.rows.iter().map(move |row| {
            self.columns
                .iter()
                .zip(row.iter())
                .map(|(column, cell)| (column.as_str(), cell.as_deref()))
                .collect()
        })
    }
}
