//! Plain text tables for listings.

/// Table column definition
#[derive(Debug, Clone)]
pub struct Column {
    pub header: String,
    pub max_width: Option<usize>,
}

impl Column {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            max_width: None,
        }
    }

    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// Table structure
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<impl Into<String>>) {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Calculate column widths in characters
    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let content = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0);
                let width = content.max(col.header.chars().count());
                col.max_width.map_or(width, |max| width.min(max))
            })
            .collect()
    }

    /// Render the table to a string
    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut output = String::new();

        let header: Vec<_> = self.columns.iter().map(|c| c.header.as_str()).collect();
        push_line(&mut output, &header, &widths);

        let sep: Vec<_> = widths.iter().map(|&w| "-".repeat(w)).collect();
        push_line(&mut output, &sep.iter().map(String::as_str).collect::<Vec<_>>(), &widths);

        for row in &self.rows {
            let cells: Vec<_> = row.iter().map(String::as_str).collect();
            push_line(&mut output, &cells, &widths);
        }

        output
    }
}

fn push_line(output: &mut String, cells: &[&str], widths: &[usize]) {
    let line: Vec<_> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format_cell(cell, w))
        .collect();
    output.push_str(line.join("   ").trim_end());
    output.push('\n');
}

fn format_cell(content: &str, width: usize) -> String {
    let content = if content.chars().count() > width {
        let kept: String = content.chars().take(width.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        content.to_string()
    };

    format!("{content:<width$}")
}
