/// A simple text-based table generator for console output
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl Table {
    /// Create a new table with the given headers
    pub fn new(headers: Vec<&str>) -> Self {
        let col_widths = headers.iter().map(|h| h.chars().count()).collect();
        let headers = headers.iter().map(|h| h.to_string()).collect();
        Table {
            headers,
            rows: Vec::new(),
            col_widths,
        }
    }

    /// Add a row to the table
    pub fn add_row(&mut self, row: Vec<String>) {
        // Update column widths if needed
        for (i, col) in row.iter().enumerate() {
            if i < self.col_widths.len() {
                self.col_widths[i] = self.col_widths[i].max(col.chars().count());
            }
        }

        self.rows.push(row);
    }

    /// Render the table as a formatted string
    pub fn render(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.render_row(&self.headers));
        output.push('\n');

        output.push_str(&self.render_separator());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&self.render_row(row));
            output.push('\n');
        }

        output
    }

    /// Render a single row with proper spacing
    fn render_row(&self, row: &[String]) -> String {
        let mut line = String::new();
        let cols = row.len().min(self.col_widths.len());
        for (i, col) in row.iter().take(cols).enumerate() {
            let width = self.col_widths[i];
            line.push_str(&format!("{:<width$}", col, width = width));
            if i + 1 < cols {
                line.push_str(" | ");
            }
        }
        line.trim_end().to_string()
    }

    /// Render a separator line
    fn render_separator(&self) -> String {
        self.col_widths
            .iter()
            .map(|&width| "-".repeat(width))
            .collect::<Vec<_>>()
            .join("-+-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_table() {
        let mut table = Table::new(vec!["Name", "Email", "Coins"]);
        table.add_row(vec!["Amal".into(), "amal@example.com".into(), "120".into()]);
        table.add_row(vec!["Omar".into(), "omar@example.com".into(), "0".into()]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Name | Email            | Coins");
        assert_eq!(lines[1], "-----+------------------+------");
        assert!(lines[2].starts_with("Amal | amal@example.com | 120"));
    }

    #[test]
    fn test_width_counts_characters() {
        let mut table = Table::new(vec!["Zone"]);
        table.add_row(vec!["Lusail – Marina".into()]);
        let rendered = table.render();
        assert_eq!(rendered.lines().nth(1), Some("---------------"));
    }

    #[test]
    fn test_empty_table_keeps_header() {
        let table = Table::new(vec!["Code"]);
        assert_eq!(table.render(), "Code\n----\n");
    }
}
