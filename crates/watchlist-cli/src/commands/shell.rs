use super::input::{parse_command, to_events, ShellCommand, HELP};
use super::lookup::client_from_config;
use crate::output::Output;
use crate::render;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use owo_colors::OwoColorize;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use watchlist_config::Config;
use watchlist_core::{project, Outcome, Session};

const PROMPT: &str = "watchlist> ";

/// Interactive loop: typed commands become user events, finished lookups are
/// applied as they arrive, and the screen is redrawn after each change.
pub async fn run_shell(config: &Config, output: &Output) -> Result<()> {
    let client = client_from_config(config)?;
    let mut session = Session::new(Arc::new(client));
    info!("Shell started against {}", config.omdb.base_url);

    if output.is_human() && !output.is_quiet() {
        println!("{}", "Movie Watchlist".bright_cyan().bold());
        println!("{}", "Type 'help' for commands.".dimmed());
    }
    render::render_view(&project(session.app()), output);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        output.prompt(PROMPT).wrap_err("Failed to write prompt")?;

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.wrap_err("Failed to read input")? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(ShellCommand::Quit) => break,
                    Ok(ShellCommand::Help) => output.info(HELP),
                    Ok(ShellCommand::Empty) => {}
                    Ok(command) => apply(&mut session, &command, output),
                    Err(e) => output.error(e.to_string()),
                }
            }
            Some(outcome) = session.next_completion(), if session.in_flight() > 0 => {
                // Put the finished lookup on its own line below the prompt
                if output.is_human() {
                    println!();
                }
                report(&outcome, output);
                render::render_view(&project(session.app()), output);
            }
        }
    }

    let abandoned = session.in_flight();
    if abandoned > 0 {
        debug!("Shell exiting with {} lookups still in flight", abandoned);
    }
    Ok(())
}

fn apply(session: &mut Session, command: &ShellCommand, output: &Output) {
    let events = match to_events(command, session.app()) {
        Ok(events) => events,
        Err(e) => {
            output.error(e.to_string());
            return;
        }
    };
    for event in events {
        session.dispatch(event);
    }
    if session.in_flight() > 0 && output.is_human() {
        output.info("Looking up...".dimmed().to_string());
    }
    render::render_view(&project(session.app()), output);
}

fn report(outcome: &Outcome, output: &Output) {
    match outcome {
        Outcome::Appended { id, index } => output.success(format!("Added {} at position {}", id, index + 1)),
        Outcome::AppendSkipped { id, reason } => output.warn(format!("Could not add {}: {}", id, reason)),
        Outcome::ResultsUpdated => {}
        Outcome::StaleResultsIgnored => debug!("Dropped results from an older search"),
    }
}
