#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CommandId {
    Help,
    Show,
    Singles,
    Team,
    Add,
    Remove,
    Name,
    Handicap,
    Continue,
    Back,
    Score,
    Scores,
    Next,
    Prev,
    Menu,
    Board,
    New,
    Export,
    Quit,
}

pub struct ReplCommand {
    pub id: CommandId,
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
    pub aliases: &'static [&'static str],
}

pub const REPL_COMMANDS: &[ReplCommand] = &[
    ReplCommand {
        id: CommandId::Help,
        name: "help",
        usage: "",
        description: "Show this help.",
        aliases: &["?", "-h", "--help"],
    },
    ReplCommand {
        id: CommandId::Show,
        name: "show",
        usage: "",
        description: "Show the current screen again.",
        aliases: &["ls"],
    },
    ReplCommand {
        id: CommandId::Singles,
        name: "singles",
        usage: "",
        description: "Start a singles game.",
        aliases: &[],
    },
    ReplCommand {
        id: CommandId::Team,
        name: "team",
        usage: "",
        description: "Start a team game.",
        aliases: &[],
    },
    ReplCommand {
        id: CommandId::Add,
        name: "add",
        usage: "",
        description: "Add a player.",
        aliases: &[],
    },
    ReplCommand {
        id: CommandId::Remove,
        name: "remove",
        usage: "N",
        description: "Remove player N.",
        aliases: &["rm"],
    },
    ReplCommand {
        id: CommandId::Name,
        name: "name",
        usage: "N NAME",
        description: "Set the name of player N.",
        aliases: &[],
    },
    ReplCommand {
        id: CommandId::Handicap,
        name: "handicap",
        usage: "N HCP",
        description: "Set the handicap of player N.",
        aliases: &["hcp"],
    },
    ReplCommand {
        id: CommandId::Continue,
        name: "continue",
        usage: "",
        description: "Go from setup to scoring.",
        aliases: &["go"],
    },
    ReplCommand {
        id: CommandId::Back,
        name: "back",
        usage: "",
        description: "Scorecard to setup, or setup to home.",
        aliases: &[],
    },
    ReplCommand {
        id: CommandId::Score,
        name: "score",
        usage: "N GROSS [HOLE]",
        description: "Record a gross score for player N (current hole by default).",
        aliases: &["s"],
    },
    ReplCommand {
        id: CommandId::Scores,
        name: "scores",
        usage: "GROSS...",
        description: "Record the current hole for every player, in order.",
        aliases: &[],
    },
    ReplCommand {
        id: CommandId::Next,
        name: "next",
        usage: "",
        description: "Next hole; after the last hole, show final scores.",
        aliases: &["n"],
    },
    ReplCommand {
        id: CommandId::Prev,
        name: "prev",
        usage: "",
        description: "Previous hole.",
        aliases: &["p"],
    },
    ReplCommand {
        id: CommandId::Menu,
        name: "menu",
        usage: "home|setup|scorecard|leaderboard",
        description: "Jump to a screen.",
        aliases: &["go-to"],
    },
    ReplCommand {
        id: CommandId::Board,
        name: "board",
        usage: "",
        description: "Print the live leaderboard.",
        aliases: &["leaderboard"],
    },
    ReplCommand {
        id: CommandId::New,
        name: "new",
        usage: "",
        description: "Start a new round (players and scores are cleared).",
        aliases: &[],
    },
    ReplCommand {
        id: CommandId::Export,
        name: "export",
        usage: "FILE",
        description: "Write the final scores page as html.",
        aliases: &[],
    },
    ReplCommand {
        id: CommandId::Quit,
        name: "quit",
        usage: "",
        description: "Save and exit.",
        aliases: &["exit", "q"],
    },
];

#[must_use]
pub fn find_command(name: &str) -> Option<&'static ReplCommand> {
    REPL_COMMANDS
        .iter()
        .find(|command| command.name == name || command.aliases.contains(&name))
}

#[must_use]
pub fn build_repl_help() -> String {
    let mut help = String::from("Commands:");
    for command in REPL_COMMANDS {
        let mut names = if command.aliases.is_empty() {
            command.name.to_string()
        } else {
            let mut parts = Vec::with_capacity(command.aliases.len() + 1);
            parts.push(command.name);
            parts.extend(command.aliases);
            parts.join(", ")
        };
        if !command.usage.is_empty() {
            names.push(' ');
            names.push_str(command.usage);
        }
        help.push_str("\n  ");
        help.push_str(&names);
        let padding = 34usize.saturating_sub(names.len());
        help.push_str(&" ".repeat(padding.max(2)));
        help.push_str(command.description);
    }
    help
}
