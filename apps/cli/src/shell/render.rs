//! Plain-text table rendering for the shell.

/// Print a left-aligned table with a header row and a separator.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() && cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let line = |cells: &[String]| {
        let joined = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ");
        println!("  {}", joined.trim_end());
    };

    line(&headers.iter().map(|h| h.to_string()).collect::<Vec<_>>());
    line(&widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>());
    for row in rows {
        line(row);
    }
}

#[cfg(test)]
mod tests {
    use super::print_table;

    #[test]
    fn test_print_table_handles_ragged_widths() {
        // Rendering must not panic on rows wider than their header.
        print_table(
            &["A", "B"],
            &[
                vec!["short".to_string(), "x".to_string()],
                vec!["a-much-longer-cell".to_string(), "y".to_string()],
            ],
        );
    }
}
