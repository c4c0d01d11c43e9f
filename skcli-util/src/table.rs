//! Tabular rendering of command results.

use std::fmt;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

/// A titled table with named columns and ordered rows.
#[derive(Debug, Clone)]
pub struct TitledTable {
    title: String,
    table: Table,
}

impl TitledTable {
    pub fn new(title: &str, headers: &[&str]) -> Self {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Disabled)
            .set_header(headers.to_vec());
        Self {
            title: title.to_owned(),
            table,
        }
    }

    pub fn add_row<I, C>(&mut self, row: I) -> &mut Self
    where
        I: IntoIterator<Item = C>,
        C: ToString,
    {
        let cells: Vec<String> = row.into_iter().map(|c| c.to_string()).collect();
        self.table.add_row(cells);
        self
    }

    pub fn add_rows<R, I, C>(&mut self, rows: R) -> &mut Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = C>,
        C: ToString,
    {
        for row in rows {
            self.add_row(row);
        }
        self
    }

    pub fn row_count(&self) -> usize {
        self.table.row_iter().count()
    }
}

impl fmt::Display for TitledTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        write!(f, "{}", self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_title_headers_and_rows() {
        let mut table = TitledTable::new("Ranking", &["Name", "Points"]);
        table.add_rows(vec![vec!["Alice", "30"], vec!["Bob", "25"]]);
        let rendered = table.to_string();

        assert_eq!(table.row_count(), 2);
        assert!(rendered.starts_with("Ranking\n"));
        assert!(rendered.contains("Name"));
        assert!(rendered.contains("│"));
        let alice = rendered.find("Alice").unwrap();
        let bob = rendered.find("Bob").unwrap();
        assert!(alice < bob);
    }

    #[test]
    fn test_render_empty() {
        let table = TitledTable::new("Errors", &["Error", "Line", "Message"]);
        assert_eq!(table.row_count(), 0);
        assert!(table.to_string().contains("Message"));
    }
}
