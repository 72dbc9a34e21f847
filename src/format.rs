//! Text rendering for seat listings and the category summary

use unicode_width::UnicodeWidthStr;

use crate::inventory::{CategorySummary, Seat};

const HEADERS: [&str; 4] = ["Seat", "Category", "Reserved", "Reserved By"];

/// Display width of a string in terminal columns
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Left-align `s` in a field of `width` columns
fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(fill))
}

/// Render seats as an aligned table, one row per seat in the given order
pub fn seat_table<'a, I>(seats: I) -> String
where
    I: IntoIterator<Item = &'a Seat>,
{
    let rows: Vec<[String; 4]> = seats
        .into_iter()
        .map(|seat| {
            [
                seat.number().to_string(),
                seat.category().to_string(),
                seat.is_reserved().to_string(),
                seat.reserved_by().unwrap_or("-").to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(display_width);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(display_width(cell));
        }
    }

    let render = |cells: [&str; 4]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| pad(cell, *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(render(HEADERS));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &rows {
        out.push(render([row[0].as_str(), row[1].as_str(), row[2].as_str(), row[3].as_str()]));
    }
    out.join("\n")
}

pub fn category_lines(summary: &[CategorySummary]) -> String {
    summary
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
