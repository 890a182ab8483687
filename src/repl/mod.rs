use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::mvu::game::GameModel;
use crate::mvu::session::Session;
use crate::view::leaderboard::render_final_scores;

pub mod commands;
pub mod parse;
pub mod render;

use commands::build_repl_help;
use parse::{ReplAction, parse_command};
use render::{render_leaderboard, render_screen};

/// Run the interactive scorecard until the user quits, then shut the session
/// down cleanly.
///
/// # Errors
/// Returns an error if the terminal cannot be read.
pub async fn run_play_repl(mut session: Session) -> Result<GameModel> {
    let help_text = build_repl_help();
    println!("Stableford scorecard. Type 'help' for commands, Ctrl-D to quit.");
    session.pump();
    print_status(&session);

    let mut rl = DefaultEditor::new().context("init repl")?;
    loop {
        let prompt = format!("{}> ", session.model().screen);
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("read repl input"),
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        rl.add_history_entry(input)?;
        session.pump();

        let action = match parse_command(input, session.model()) {
            Ok(action) => action,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match action {
            ReplAction::Help => println!("{help_text}"),
            ReplAction::Show => print_status(&session),
            ReplAction::Board => {
                session.pump();
                println!("{}", render_leaderboard(&session.model().leaderboard));
            }
            ReplAction::Export(path) => match export_final(session.model(), &path) {
                Ok(()) => println!("Wrote {}", path.display()),
                Err(e) => println!("Export failed: {e:#}"),
            },
            ReplAction::Dispatch(msgs) => {
                for msg in msgs {
                    if let Err(e) = session.dispatch(msg) {
                        println!("{e}");
                        break;
                    }
                }
                tokio::task::yield_now().await;
                session.pump();
                print_status(&session);
            }
            ReplAction::Quit => break,
        }
    }

    let model = session.shutdown().await;
    info!(screen = %model.screen, "round saved");
    Ok(model)
}

fn print_status(session: &Session) {
    let model = session.model();
    println!("{}", render_screen(model));
    if let Some(e) = model.error.as_ref().filter(|e| !e.is_user_error()) {
        println!("warning: {e}");
    }
}

fn export_final(model: &GameModel, path: &Path) -> Result<()> {
    let team_total = model.round.is_team_play.then(|| model.team_total());
    let markup = render_final_scores(&model.leaderboard, model.settings.order, team_total);
    let page = maud::html! {
        (maud::DOCTYPE)
        head { meta charset="UTF-8"; title { "Final Scores" } }
        body { (markup) }
    };
    fs::write(path, page.into_string()).with_context(|| format!("write {}", path.display()))
}
