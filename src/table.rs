use crate::error::{DealerDbError, Result};

/// Width every column is padded to when a table is rendered.
pub const COLUMN_WIDTH: usize = 20;

/// A result set from a read-only query: ordered column names and
/// row-major text cells. Every row holds exactly one cell per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ResultTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(DealerDbError::Table(format!(
                    "row {} has {} cells, expected {}",
                    idx,
                    row.len(),
                    columns.len()
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the header, a dashed separator sized to the column count,
    /// then each data row. Cells are left-aligned and padded to
    /// [`COLUMN_WIDTH`]; longer cells overflow rather than truncate.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for name in &self.columns {
            out.push_str(&pad(name));
        }
        out.push('\n');
        out.push_str(&"-".repeat(self.columns.len() * COLUMN_WIDTH));
        out.push('\n');
        for row in &self.rows {
            for cell in row {
                out.push_str(&pad(cell));
            }
            out.push('\n');
        }
        out
    }
}

fn pad(cell: &str) -> String {
    format!("{:<width$}", cell, width = COLUMN_WIDTH)
}
