use std::path::PathBuf;

use super::commands::{CommandId, find_command};
use crate::model::player::PlayerField;
use crate::model::screen::{MenuTarget, Screen};
use crate::mvu::game::{GameModel, Msg};

/// What a line of input asks the REPL to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplAction {
    Dispatch(Vec<Msg>),
    Help,
    Show,
    Board,
    Export(PathBuf),
    Quit,
}

/// Turn one input line into an action. Player and hole numbers are 1-based.
///
/// # Errors
///
/// Returns a message for the user when the command is unknown or its
/// arguments do not parse.
pub fn parse_command(input: &str, model: &GameModel) -> Result<ReplAction, String> {
    let input = input.trim();
    let (token, rest) = input
        .split_once(char::is_whitespace)
        .map_or((input, ""), |(t, r)| (t, r.trim()));
    let Some(command) = find_command(token) else {
        return Err(format!("Unknown command: {token}"));
    };
    let args: Vec<&str> = rest.split_whitespace().collect();
    let usage = || format!("usage: {} {}", command.name, command.usage);

    let one = |msg: Msg| Ok(ReplAction::Dispatch(vec![msg]));
    match command.id {
        CommandId::Help => Ok(ReplAction::Help),
        CommandId::Show => Ok(ReplAction::Show),
        CommandId::Board => Ok(ReplAction::Board),
        CommandId::Quit => Ok(ReplAction::Quit),
        CommandId::Singles => one(Msg::ChooseGameType { team: false }),
        CommandId::Team => one(Msg::ChooseGameType { team: true }),
        CommandId::Add => one(Msg::AddPlayer),
        CommandId::Continue => one(Msg::ContinueToScoring),
        CommandId::Next => one(Msg::NextHole),
        CommandId::Prev => one(Msg::PrevHole),
        CommandId::New => one(Msg::ResetRound),
        CommandId::Back => match model.screen {
            Screen::Scorecard => one(Msg::BackToSetup),
            Screen::Setup => one(Msg::BackToHome),
            other => Err(format!("nothing to go back to from the {other} screen")),
        },
        CommandId::Remove => {
            let [n] = args.as_slice() else {
                return Err(usage());
            };
            one(Msg::RemovePlayer(parse_position(n, "player")?))
        }
        CommandId::Name => {
            let Some((n, name)) = rest.split_once(char::is_whitespace) else {
                return Err(usage());
            };
            let index = parse_position(n, "player")?;
            one(Msg::UpdatePlayerInfo {
                index,
                field: PlayerField::Name(name.trim().to_string()),
            })
        }
        CommandId::Handicap => {
            let [n, hcp] = args.as_slice() else {
                return Err(usage());
            };
            let index = parse_position(n, "player")?;
            let handicap = parse_int(hcp, "handicap")?;
            one(Msg::UpdatePlayerInfo {
                index,
                field: PlayerField::Handicap(handicap),
            })
        }
        CommandId::Score => {
            let (n, gross, hole) = match args.as_slice() {
                [n, gross] => (n, gross, model.round.current_hole),
                [n, gross, hole] => (n, gross, parse_position(hole, "hole")?),
                _ => return Err(usage()),
            };
            one(Msg::RecordScore {
                player: parse_position(n, "player")?,
                hole,
                score: parse_int(gross, "score")?,
            })
        }
        CommandId::Scores => {
            if args.is_empty() || args.len() > model.round.players.len() {
                return Err(format!(
                    "{} (one score per player, {} players)",
                    usage(),
                    model.round.players.len()
                ));
            }
            let hole = model.round.current_hole;
            let msgs = args
                .iter()
                .enumerate()
                .map(|(player, gross)| {
                    parse_int(gross, "score").map(|score| Msg::RecordScore {
                        player,
                        hole,
                        score,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ReplAction::Dispatch(msgs))
        }
        CommandId::Menu => {
            let [target] = args.as_slice() else {
                return Err(usage());
            };
            MenuTarget::parse(target)
                .map(|t| ReplAction::Dispatch(vec![Msg::Navigate(t)]))
                .ok_or_else(usage)
        }
        CommandId::Export => {
            if rest.is_empty() {
                return Err(usage());
            }
            Ok(ReplAction::Export(PathBuf::from(rest)))
        }
    }
}

/// Parse a 1-based position into an index.
pub(crate) fn parse_position(token: &str, what: &str) -> Result<usize, String> {
    match token.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("{what} number must be 1 or more, got '{token}'")),
    }
}

pub(crate) fn parse_int(token: &str, what: &str) -> Result<i32, String> {
    token
        .parse::<i32>()
        .map_err(|_| format!("{what} must be a whole number, got '{token}'"))
}
