/// Result of processing a slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Display a message to the user.
    Message(String),
    /// Quit the application.
    Quit,
    /// Sign out and return to the sign-in view.
    Logout,
    /// Reload and list the full persisted history.
    ShowHistory,
    /// Focus the transcript on `anchor` with the given radius.
    Window { anchor: usize, radius: usize },
    /// Delete the persisted history and reset the transcript.
    ClearHistory,
    /// Show the recently indexed documents feed.
    ShowUpdates,
    /// Show the signed-in account.
    ShowStatus,
    /// Not a command - treat as a chat query.
    NotACommand,
}

const DEFAULT_WINDOW_RADIUS: usize = 2;

pub fn handle_command(input: &str) -> CommandResult {
    let input = input.trim();
    if !input.starts_with('/') {
        return CommandResult::NotACommand;
    }
    let mut parts = input.split_whitespace();
    let cmd = parts.next().unwrap_or("");

    match cmd {
        "/help" | "/h" => show_help(),
        "/exit" | "/quit" | "/q" => CommandResult::Quit,
        "/logout" => CommandResult::Logout,
        "/history" => CommandResult::ShowHistory,
        "/clear" => CommandResult::ClearHistory,
        "/updates" => CommandResult::ShowUpdates,
        "/status" | "/whoami" => CommandResult::ShowStatus,
        "/window" => {
            let anchor = parts.next().and_then(|s| s.parse::<usize>().ok());
            let radius = parts.next().and_then(|s| s.parse::<usize>().ok());
            match anchor {
                Some(anchor) => CommandResult::Window {
                    anchor,
                    radius: radius.unwrap_or(DEFAULT_WINDOW_RADIUS),
                },
                None => CommandResult::Message(
                    "Usage: /window <anchor> [radius]\nExample: /window 4 2".into(),
                ),
            }
        }
        _ => CommandResult::Message(format!("Unknown command: {cmd}. Try /help")),
    }
}

fn show_help() -> CommandResult {
    CommandResult::Message(
        "The People's Agent commands:\n\
         /help              Show this help\n\
         /history           List your full conversation history\n\
         /window <n> [r]    Jump to exchange n of your history (radius r)\n\
         /clear             Delete your conversation history\n\
         /updates           Recently indexed government documents\n\
         /status            Show the signed-in account\n\
         /logout            Sign out\n\
         /quit              Exit"
            .into(),
    )
}
