//! Terminal rendering of the projected app view.
//!
//! Human output draws tables with comfy-table; JSON modes emit the view as
//! serialized by `watchlist_core::view`.

use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use watchlist_core::{AppView, DisplayItem, ResultsView};
use watchlist_models::{Candidate, MovieEntry, RatingSlot};
use crate::output::Output;

const DROP_MARKER: &str = "┄┄ drop here ┄┄";

fn styled_table() -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

/// Badge colour keyed on the first character of the content rating
fn advisory_color(class: Option<char>) -> Color {
    match class {
        Some('G') => Color::Green,
        Some('P') => Color::Yellow,
        Some('R') | Some('X') => Color::Red,
        Some('T') => Color::Cyan,
        _ => Color::Grey,
    }
}

fn advisory_cell(entry: &MovieEntry) -> Cell {
    Cell::new(&entry.rated).fg(advisory_color(entry.advisory_class()))
}

pub fn render_view(view: &AppView, output: &Output) {
    if !output.is_human() {
        output.data("view", view);
        return;
    }
    if output.is_quiet() {
        return;
    }

    println!();
    println!("{} {}", "Search:".bright_cyan().bold(), view.query);
    match &view.results {
        ResultsView::Hidden => {}
        ResultsView::NoMatches { message } => println!("  {}", message.yellow()),
        ResultsView::Matches { candidates } => println!("{}", candidate_table(candidates)),
    }

    println!();
    println!("{}", "Watchlist".bright_cyan().bold());
    if view.watchlist.is_empty() {
        println!("  {}", "Nothing here yet. Search for a title to add it.".dimmed());
        return;
    }
    println!("{}", watchlist_table(view));
    if let Some(id) = view.dragging {
        println!("  {} {}", "dragging".yellow(), id);
    }
}

pub fn candidate_table(candidates: &[Candidate]) -> Table {
    let mut table = styled_table();
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("IMDb ID").add_attribute(Attribute::Bold),
    ]);
    for (i, candidate) in candidates.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(candidate.display_title()),
            Cell::new(&candidate.id).fg(Color::DarkGrey),
        ]);
    }
    table
}

fn watchlist_table(view: &AppView) -> Table {
    let mut table = styled_table();
    let mut header = vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Rated").add_attribute(Attribute::Bold),
        Cell::new("Runtime").add_attribute(Attribute::Bold),
        Cell::new("Genre").add_attribute(Attribute::Bold),
    ];
    header.extend(RatingSlot::ALL.iter().map(|slot| Cell::new(slot.label()).add_attribute(Attribute::Bold)));
    table.set_header(header);

    for item in &view.watchlist {
        match item {
            // The dragged row is taken out of the flow while the placeholder shows
            DisplayItem::Row { hidden: true, .. } => {}
            DisplayItem::Row { index, entry, .. } => {
                let mut row = vec![
                    Cell::new(index + 1),
                    Cell::new(entry.display_title()),
                    advisory_cell(entry),
                    Cell::new(&entry.runtime),
                    Cell::new(entry.genres.join(", ")),
                ];
                row.extend(RatingSlot::ALL.iter().map(|slot| Cell::new(entry.rating_value(*slot))));
                table.add_row(row);
            }
            DisplayItem::Placeholder => {
                table.add_row(vec![
                    Cell::new(""),
                    Cell::new(DROP_MARKER).fg(Color::Yellow).add_attribute(Attribute::Italic),
                ]);
            }
        }
    }
    table
}

/// Full detail card for one entry, with the rating source links
pub fn render_movie(entry: &MovieEntry, output: &Output) {
    if !output.is_human() {
        output.data("movie", entry);
        return;
    }
    if output.is_quiet() {
        return;
    }

    let mut table = styled_table();
    table.set_header(vec![
        Cell::new(entry.display_title()).fg(Color::Cyan).add_attribute(Attribute::Bold),
        advisory_cell(entry),
    ]);
    table.add_row(vec![Cell::new("Runtime"), Cell::new(&entry.runtime)]);
    table.add_row(vec![Cell::new("Genre"), Cell::new(entry.genres.join(", "))]);
    table.add_row(vec![Cell::new("Director"), Cell::new(&entry.director)]);
    table.add_row(vec![Cell::new("Actors"), Cell::new(&entry.actors)]);
    table.add_row(vec![Cell::new("Language"), Cell::new(&entry.language)]);
    table.add_row(vec![Cell::new("Plot"), Cell::new(&entry.plot)]);
    table.add_row(vec![Cell::new("Poster"), Cell::new(&entry.poster)]);
    for slot in RatingSlot::ALL {
        table.add_row(vec![
            Cell::new(slot.label()),
            Cell::new(format!("{}  {}", entry.rating_value(slot), entry.rating_url(slot))),
        ]);
    }
    println!("{}", table);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advisory_color() {
        assert_eq!(advisory_color(Some('P')), Color::Yellow);
        assert_eq!(advisory_color(Some('R')), Color::Red);
        assert_eq!(advisory_color(Some('N')), Color::Grey);
        assert_eq!(advisory_color(None), Color::Grey);
    }

    #[test]
    fn test_candidate_table_numbers_rows_from_one() {
        let table = candidate_table(&[
            Candidate::new("tt0078748", "Alien", "1979"),
            Candidate::new("tt0090605", "Aliens", "1986"),
        ]);
        let rendered = table.to_string();
        assert!(rendered.contains("Alien (1979)"));
        assert!(rendered.contains("tt0090605"));
        assert_eq!(table.row_iter().count(), 2);
    }
}
