use crate::models::Listing;

/// Width of a cell as shown in a terminal
fn width(text: &str) -> usize {
    text.chars().count()
}

fn pad(text: &str, target: usize) -> String {
    let mut padded = text.to_string();
    padded.extend(std::iter::repeat(' ').take(target.saturating_sub(width(text))));
    padded
}

/// Render rows as a left-aligned text table with a header rule
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(width(cell));
            } else {
                widths.push(width(cell));
            }
        }
    }

    let render_row = |cells: &[String]| -> String {
        widths
            .iter()
            .enumerate()
            .map(|(i, w)| pad(cells.get(i).map(String::as_str).unwrap_or(""), *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_row(headers));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(render_row(row));
    }
    lines.join("\n")
}

/// Render records through their [`Listing`] columns
pub fn render_listing<T: Listing>(records: &[T]) -> String {
    let rows: Vec<Vec<String>> = records.iter().map(Listing::cells).collect();
    render_table(&T::columns(), &rows)
}

/// Render one record as "column: value" lines
pub fn render_record<T: Listing>(record: &T) -> String {
    let columns = T::columns();
    let label_width = columns.iter().map(|c| width(c)).max().unwrap_or(0);
    columns
        .iter()
        .zip(record.cells())
        .map(|(column, value)| format!("{}  {}", pad(column, label_width), value))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn columns_align_to_widest_cell() {
        let table = render_table(
            &strings(&["Naam", "Groep"]),
            &[strings(&["Amina", "2B"]), strings(&["Yusuf", "Groep 10"])],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Naam   Groep");
        assert_eq!(lines[1], "-----  --------");
        assert_eq!(lines[2], "Amina  2B");
        assert_eq!(lines[3], "Yusuf  Groep 10");
    }

    #[test]
    fn multibyte_cells_count_characters() {
        let table = render_table(&strings(&["a"]), &[strings(&["é"]), strings(&["ab"])]);
        assert_eq!(table.lines().nth(2), Some("é"));
        assert_eq!(table.lines().nth(1), Some("--"));
    }
}
