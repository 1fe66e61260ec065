//! Shell command parsing.
//!
//! Each typed line becomes a [`ShellCommand`]; [`to_events`] turns it into the
//! pointer and keyboard events a browser would have produced for the same
//! action. Rows and candidates are numbered from 1 on screen. Watchlist rows
//! are laid out `ROW_HEIGHT` apart, which gives the drag engine real pointer
//! heights to derive a direction from.

use std::fmt;
use watchlist_core::{App, HoverTarget, Key, PressTarget, UserEvent};

/// Screen height of one watchlist row
pub const ROW_HEIGHT: f64 = 40.0;

pub const HELP: &str = "\
Commands:
  search [title]        search for a title (uses the current text when omitted)
  type <text>           change the search box text without searching
  select <n>            add result n to the watchlist
  click <where>         press the pointer on input|button|results|row <n>|away
  drag <n>              pick up watchlist row n
  over <n>|placeholder  drag over row n or the placeholder (optional y after)
  move <y>              move the pointer to height y outside the list
  drop [where]          release over placeholder (default), row <n> or away
  cancel                press escape to abandon the drag
  mv <from> <to>        drag row <from> onto row <to> in one go
  list                  redraw the screen
  help                  show this help
  quit                  leave the shell";

/// Where a drag-over or drop lands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spot {
    Row(usize),
    Placeholder,
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Input,
    Button,
    Results,
    Row(usize),
    Away,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Empty,
    Search(Option<String>),
    Type(String),
    Select(usize),
    Click(ClickTarget),
    Drag(usize),
    Over { spot: Spot, y: Option<f64> },
    Move(f64),
    Drop(Spot),
    Cancel,
    Reorder { from: usize, to: usize },
    List,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputError(String);

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InputError {}

fn input_error(msg: impl Into<String>) -> InputError {
    InputError(msg.into())
}

fn parse_number(word: Option<&str>, what: &str) -> Result<usize, InputError> {
    let word = word.ok_or_else(|| input_error(format!("missing {}", what)))?;
    match word.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(input_error(format!("'{}' is not a valid {}", word, what))),
    }
}

fn parse_height(word: &str) -> Result<f64, InputError> {
    word.parse::<f64>()
        .ok()
        .filter(|y| y.is_finite())
        .ok_or_else(|| input_error(format!("'{}' is not a valid height", word)))
}

fn parse_spot(words: &[&str]) -> Result<Spot, InputError> {
    match words {
        [] | ["placeholder"] => Ok(Spot::Placeholder),
        ["away"] => Ok(Spot::Away),
        ["row", n] | [n] => parse_number(Some(*n), "row number").map(Spot::Row),
        _ => Err(input_error(format!("unknown drop target '{}'", words.join(" ")))),
    }
}

pub fn parse_command(line: &str) -> Result<ShellCommand, InputError> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match word.to_lowercase().as_str() {
        "" => ShellCommand::Empty,
        "search" | "s" => ShellCommand::Search((!rest.is_empty()).then(|| rest.to_string())),
        "type" => ShellCommand::Type(rest.to_string()),
        "select" | "add" => ShellCommand::Select(parse_number(args.first().copied(), "result number")?),
        "click" => ShellCommand::Click(match args.as_slice() {
            ["input"] => ClickTarget::Input,
            ["button"] => ClickTarget::Button,
            ["results"] => ClickTarget::Results,
            ["row", n] => ClickTarget::Row(parse_number(Some(*n), "row number")?),
            ["away"] | [] => ClickTarget::Away,
            _ => return Err(input_error(format!("unknown click target '{}'", rest))),
        }),
        "drag" => ShellCommand::Drag(parse_number(args.first().copied(), "row number")?),
        "over" => {
            let (spot_words, y) = match args.as_slice() {
                [spot @ .., last] if !spot.is_empty() && !matches!(spot, ["row"]) && last.parse::<f64>().is_ok() => {
                    (spot, Some(parse_height(last)?))
                }
                all => (all, None),
            };
            if spot_words.is_empty() {
                return Err(input_error("missing row number"));
            }
            ShellCommand::Over { spot: parse_spot(spot_words)?, y }
        }
        "move" => match args.as_slice() {
            [y] => ShellCommand::Move(parse_height(y)?),
            _ => return Err(input_error("usage: move <y>")),
        },
        "drop" => ShellCommand::Drop(parse_spot(&args)?),
        "cancel" | "esc" => ShellCommand::Cancel,
        "mv" => ShellCommand::Reorder {
            from: parse_number(args.first().copied(), "row number")?,
            to: parse_number(args.get(1).copied(), "row number")?,
        },
        "list" | "ls" => ShellCommand::List,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(input_error(format!("unknown command '{}' (try 'help')", other))),
    };
    Ok(command)
}

/// Pointer height at the middle of a zero-based row
pub fn row_center(index: usize) -> f64 {
    index as f64 * ROW_HEIGHT + ROW_HEIGHT / 2.0
}

fn row_id(app: &App, n: usize) -> Result<String, InputError> {
    app.watchlist()
        .get(n - 1)
        .map(|entry| entry.id.clone())
        .ok_or_else(|| input_error(format!("no watchlist row {}", n)))
}

fn hover_target(app: &App, spot: Spot) -> Result<HoverTarget, InputError> {
    Ok(match spot {
        Spot::Row(n) => HoverTarget::Row(row_id(app, n)?),
        Spot::Placeholder => HoverTarget::Placeholder,
        Spot::Away => HoverTarget::Other,
    })
}

/// Translate a command into the events it stands for. Commands that only
/// affect the shell itself (list, help, quit) produce no events.
pub fn to_events(command: &ShellCommand, app: &App) -> Result<Vec<UserEvent>, InputError> {
    let events = match command {
        ShellCommand::Search(Some(text)) => vec![
            UserEvent::QueryChanged(text.clone()),
            UserEvent::KeyUp(Key::Enter),
        ],
        ShellCommand::Search(None) => vec![UserEvent::SearchClicked],
        ShellCommand::Type(text) => vec![UserEvent::QueryChanged(text.clone())],
        ShellCommand::Select(n) => {
            let candidate = app
                .search()
                .candidates()
                .get(n - 1)
                .ok_or_else(|| input_error(format!("no search result {}", n)))?;
            vec![UserEvent::CandidateSelected(candidate.id.clone())]
        }
        ShellCommand::Click(target) => {
            let target = match target {
                ClickTarget::Input => PressTarget::SearchInput,
                ClickTarget::Button => PressTarget::SearchButton,
                ClickTarget::Results => PressTarget::SearchResults,
                ClickTarget::Row(n) => PressTarget::WatchlistRow(row_id(app, *n)?),
                ClickTarget::Away => PressTarget::Elsewhere,
            };
            vec![UserEvent::PointerPressed(target)]
        }
        ShellCommand::Drag(n) => vec![UserEvent::DragStarted { id: row_id(app, *n)?, y: row_center(n - 1) }],
        ShellCommand::Over { spot, y } => {
            let target = hover_target(app, *spot)?;
            let current = app.drag().gesture().and_then(|g| g.pointer().current());
            let y = match (y, spot) {
                (Some(y), _) => *y,
                (None, Spot::Row(n)) => row_center(n - 1),
                // Hovering the placeholder or outside keeps the pointer where it is
                (None, _) => current.unwrap_or_default(),
            };
            vec![UserEvent::DragOver { target, y }]
        }
        ShellCommand::Move(y) => vec![UserEvent::PointerMoved { y: *y }],
        // A browser always follows a drop with drag end
        ShellCommand::Drop(spot) => vec![UserEvent::Dropped(hover_target(app, *spot)?), UserEvent::DragEnded],
        ShellCommand::Cancel => vec![UserEvent::KeyUp(Key::Escape)],
        ShellCommand::Reorder { from, to } => {
            let dragged = row_id(app, *from)?;
            let over = row_id(app, *to)?;
            vec![
                UserEvent::DragStarted { id: dragged, y: row_center(from - 1) },
                UserEvent::DragOver { target: HoverTarget::Row(over), y: row_center(to - 1) },
                UserEvent::Dropped(HoverTarget::Placeholder),
                UserEvent::DragEnded,
            ]
        }
        ShellCommand::Empty | ShellCommand::List | ShellCommand::Help | ShellCommand::Quit => Vec::new(),
    };
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchlist_core::Completion;
    use watchlist_models::MovieEntry;

    fn movie(id: &str) -> MovieEntry {
        MovieEntry {
            id: id.to_string(),
            title: format!("Movie {}", id),
            year: "2000".to_string(),
            rated: "PG".to_string(),
            runtime: "100 min".to_string(),
            genres: vec!["Drama".to_string()],
            director: String::new(),
            actors: String::new(),
            plot: String::new(),
            language: String::new(),
            poster: String::new(),
            ratings: Vec::new(),
        }
    }

    fn app_with(ids: &[&str]) -> App {
        let mut app = App::new();
        for id in ids {
            app.complete(Completion::Detail { id: id.to_string(), result: Ok(movie(id)) });
        }
        app
    }

    fn run(app: &mut App, line: &str) {
        let command = parse_command(line).unwrap();
        for event in to_events(&command, app).unwrap() {
            app.handle(event);
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("  ").unwrap(), ShellCommand::Empty);
        assert_eq!(
            parse_command("search The Dark Knight").unwrap(),
            ShellCommand::Search(Some("The Dark Knight".to_string()))
        );
        assert_eq!(parse_command("search").unwrap(), ShellCommand::Search(None));
        assert_eq!(parse_command("select 2").unwrap(), ShellCommand::Select(2));
        assert_eq!(parse_command("click row 3").unwrap(), ShellCommand::Click(ClickTarget::Row(3)));
        assert_eq!(parse_command("click").unwrap(), ShellCommand::Click(ClickTarget::Away));
        assert_eq!(parse_command("over 2").unwrap(), ShellCommand::Over { spot: Spot::Row(2), y: None });
        assert_eq!(parse_command("over row 2").unwrap(), ShellCommand::Over { spot: Spot::Row(2), y: None });
        assert_eq!(
            parse_command("over row 2 75.5").unwrap(),
            ShellCommand::Over { spot: Spot::Row(2), y: Some(75.5) }
        );
        assert_eq!(
            parse_command("over placeholder").unwrap(),
            ShellCommand::Over { spot: Spot::Placeholder, y: None }
        );
        assert_eq!(parse_command("drop").unwrap(), ShellCommand::Drop(Spot::Placeholder));
        assert_eq!(parse_command("drop away").unwrap(), ShellCommand::Drop(Spot::Away));
        assert_eq!(parse_command("mv 3 1").unwrap(), ShellCommand::Reorder { from: 3, to: 1 });
        assert_eq!(parse_command("QUIT").unwrap(), ShellCommand::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("select").is_err());
        assert!(parse_command("select 0").is_err());
        assert!(parse_command("drag x").is_err());
        assert!(parse_command("over").is_err());
        assert!(parse_command("move").is_err());
        assert!(parse_command("mv 1").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn test_search_events() {
        let app = App::new();
        let events = to_events(&parse_command("search Alien").unwrap(), &app).unwrap();
        assert_eq!(events, vec![
            UserEvent::QueryChanged("Alien".to_string()),
            UserEvent::KeyUp(Key::Enter),
        ]);
    }

    #[test]
    fn test_select_out_of_range() {
        let app = App::new();
        assert!(to_events(&ShellCommand::Select(1), &app).is_err());
    }

    #[test]
    fn test_step_by_step_drag_moves_row_down() {
        let mut app = app_with(&["A", "B", "C"]);
        run(&mut app, "drag 1");
        run(&mut app, "over 2");
        assert_eq!(app.drag().placeholder_slot(), Some(2));
        run(&mut app, "over placeholder");
        run(&mut app, "drop");
        assert_eq!(app.watchlist().ids(), vec!["B", "A", "C"]);
        assert!(!app.drag().is_dragging());
    }

    #[test]
    fn test_reorder_macro_lands_on_target_row() {
        let mut app = app_with(&["A", "B", "C"]);
        run(&mut app, "mv 3 1");
        assert_eq!(app.watchlist().ids(), vec!["C", "A", "B"]);
        run(&mut app, "mv 1 3");
        assert_eq!(app.watchlist().ids(), vec!["A", "B", "C"]);
        run(&mut app, "mv 2 2");
        assert_eq!(app.watchlist().ids(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_drop_away_keeps_order() {
        let mut app = app_with(&["A", "B", "C"]);
        run(&mut app, "drag 3");
        run(&mut app, "over 1");
        run(&mut app, "drop away");
        assert_eq!(app.watchlist().ids(), vec!["A", "B", "C"]);
        assert!(!app.drag().is_dragging());
    }

    #[test]
    fn test_row_reference_out_of_range() {
        let app = app_with(&["A"]);
        assert!(to_events(&ShellCommand::Drag(2), &app).is_err());
    }
}
