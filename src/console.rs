//! The toy console shell that hosts the game, a pure command interpreter
//! with no I/O so every command is unit-testable.

/// Styling class for a line of console output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Text,
    Error,
    Success,
    System,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputLine {
    pub kind: OutputKind,
    pub content: String,
}

impl OutputLine {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: OutputKind::Text,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            kind: OutputKind::Error,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            kind: OutputKind::Success,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            kind: OutputKind::System,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Help,
    WhoAmI,
    Ls,
    Cat,
    Clear,
    Inspire,
    Play,
    Scores,
    Exit,
    Unknown,
}

impl From<&str> for Command {
    fn from(value: &str) -> Self {
        match value {
            "help" => Self::Help,
            "whoami" => Self::WhoAmI,
            "ls" => Self::Ls,
            "cat" => Self::Cat,
            "clear" => Self::Clear,
            "inspire" => Self::Inspire,
            "play" | "game" => Self::Play,
            "scores" => Self::Scores,
            "exit" | "quit" => Self::Exit,
            _ => Self::Unknown,
        }
    }
}

/// What the embedding UI should do after a command was interpreted
#[derive(Debug, PartialEq)]
pub enum ConsoleAction {
    None,
    StartGame,
    ShowScores,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub command: String,
    pub output: Vec<OutputLine>,
}

/// The virtual files of the creative console
const FILES: &[(&str, &str)] = &[
    (
        "manifesto.txt",
        "Design is not just what it looks like and feels like. Design is how it works.",
    ),
    (
        "ideas.md",
        "1. Exploring new typography trends\n2. Mastering color theory\n3. Creating immersive experiences",
    ),
    (
        "contact_card.json",
        "{\n  \"email\": \"rikuto@example.com\",\n  \"role\": \"UI/UX Designer\"\n}",
    ),
];

const COMMANDS: &[(&str, &str)] = &[
    ("help", "Show available commands"),
    ("whoami", "Display designer profile"),
    ("ls", "List creative assets"),
    ("cat [file]", "View content"),
    ("clear", "Clear history"),
    ("inspire", "Spark creativity"),
    ("play", "Start \"Creative Block Breaker\""),
    ("scores", "Review past game results"),
    ("exit", "Close the console"),
];

#[derive(Debug, Default)]
pub struct Console {
    pub history: Vec<HistoryEntry>,
    pub input: String,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn banner() -> Vec<OutputLine> {
        vec![
            OutputLine::system("Welcome to Creative Console."),
            OutputLine::system("Explore the hidden layer of design."),
            OutputLine::system("Type 'help' to reveal tools."),
            OutputLine::system("----------------------------------------"),
        ]
    }

    /// Interpret one input line. Appends a history entry for commands that
    /// produce output; `clear` wipes the history instead.
    pub fn interpret(&mut self, line: &str) -> ConsoleAction {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return ConsoleAction::None;
        }

        let mut args = trimmed.split_whitespace();
        let command = Command::from(args.next().unwrap_or("").to_lowercase().as_str());
        let mut output = Vec::new();
        let mut action = ConsoleAction::None;

        match command {
            Command::Help => {
                output.push(OutputLine::system("CREATIVE TOOLS:"));
                for (cmd, desc) in COMMANDS {
                    output.push(OutputLine::text(format!("  {cmd:<12} - {desc}")));
                }
            }
            Command::WhoAmI => {
                output.push(OutputLine::success(
                    "Role: UI/UX Designer\nMission: Crafting Digital Experiences\nStatus: Creative Flow",
                ));
            }
            Command::Ls => {
                for (name, _) in FILES {
                    output.push(OutputLine::text(*name));
                }
            }
            Command::Cat => match args.next() {
                Some(file_name) => {
                    match FILES.iter().find(|(name, _)| *name == file_name) {
                        Some((_, content)) => output.push(OutputLine::text(*content)),
                        None => {
                            output.push(OutputLine::error(format!("File not found: {file_name}")))
                        }
                    }
                }
                None => output.push(OutputLine::error("Usage: cat [filename]")),
            },
            Command::Clear => {
                self.history.clear();
                self.input.clear();
                return ConsoleAction::None;
            }
            Command::Inspire => {
                output.push(OutputLine::success("IGNITING CREATIVE SPARK..."));
                output.push(OutputLine::system("[**********] 100% INSPIRED"));
                output.push(OutputLine::success("READY TO CREATE SOMETHING AMAZING."));
            }
            Command::Play => {
                output.push(OutputLine::system("Starting Creative Block Breaker..."));
                action = ConsoleAction::StartGame;
            }
            Command::Scores => {
                action = ConsoleAction::ShowScores;
            }
            Command::Exit => {
                action = ConsoleAction::Quit;
            }
            Command::Unknown => {
                let name = trimmed.split_whitespace().next().unwrap_or_default();
                output.push(OutputLine::error(format!(
                    "Command not found: {name}. Type 'help' for list."
                )));
            }
        }

        self.history.push(HistoryEntry {
            command: trimmed.to_string(),
            output,
        });
        self.input.clear();
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::from("help"), Command::Help);
        assert_eq!(Command::from("play"), Command::Play);
        assert_eq!(Command::from("game"), Command::Play);
        assert_eq!(Command::from("quit"), Command::Exit);
        assert_eq!(Command::from("frobnicate"), Command::Unknown);
    }

    #[test]
    fn test_empty_input_is_ignored() {
        let mut console = Console::new();
        let action = console.interpret("   ");

        assert_eq!(action, ConsoleAction::None);
        assert!(console.history.is_empty());
    }

    #[test]
    fn test_help_lists_every_command() {
        let mut console = Console::new();
        console.interpret("help");

        let entry = &console.history[0];
        assert_eq!(entry.output[0].kind, OutputKind::System);
        // One header line plus one line per command
        assert_eq!(entry.output.len(), 1 + COMMANDS.len());
    }

    #[test]
    fn test_ls_lists_the_virtual_files() {
        let mut console = Console::new();
        console.interpret("ls");

        let names: Vec<&str> = console.history[0]
            .output
            .iter()
            .map(|l| l.content.as_str())
            .collect();
        assert_eq!(names, vec!["manifesto.txt", "ideas.md", "contact_card.json"]);
    }

    #[test]
    fn test_cat_shows_file_content() {
        let mut console = Console::new();
        console.interpret("cat manifesto.txt");

        let line = &console.history[0].output[0];
        assert_eq!(line.kind, OutputKind::Text);
        assert!(line.content.starts_with("Design is not just"));
    }

    #[test]
    fn test_cat_without_argument() {
        let mut console = Console::new();
        console.interpret("cat");

        let line = &console.history[0].output[0];
        assert_eq!(line.kind, OutputKind::Error);
        assert_eq!(line.content, "Usage: cat [filename]");
    }

    #[test]
    fn test_cat_missing_file() {
        let mut console = Console::new();
        console.interpret("cat nope.txt");

        let line = &console.history[0].output[0];
        assert_eq!(line.kind, OutputKind::Error);
        assert_eq!(line.content, "File not found: nope.txt");
    }

    #[test]
    fn test_unknown_command_error_message() {
        let mut console = Console::new();
        console.interpret("frobnicate now");

        let line = &console.history[0].output[0];
        assert_eq!(line.kind, OutputKind::Error);
        assert_eq!(
            line.content,
            "Command not found: frobnicate. Type 'help' for list."
        );
    }

    #[test]
    fn test_clear_wipes_history_without_an_entry() {
        let mut console = Console::new();
        console.interpret("ls");
        console.interpret("whoami");
        assert_eq!(console.history.len(), 2);

        let action = console.interpret("clear");

        assert_eq!(action, ConsoleAction::None);
        assert!(console.history.is_empty());
        assert!(console.input.is_empty());
    }

    #[test]
    fn test_play_starts_the_game() {
        let mut console = Console::new();
        let action = console.interpret("play");

        assert_matches!(action, ConsoleAction::StartGame);
        assert_eq!(
            console.history[0].output[0].content,
            "Starting Creative Block Breaker..."
        );
    }

    #[test]
    fn test_scores_and_exit_actions() {
        let mut console = Console::new();
        assert_matches!(console.interpret("scores"), ConsoleAction::ShowScores);
        assert_matches!(console.interpret("exit"), ConsoleAction::Quit);
    }

    #[test]
    fn test_commands_are_case_insensitive() {
        let mut console = Console::new();
        assert_matches!(console.interpret("PLAY"), ConsoleAction::StartGame);
    }

    #[test]
    fn test_interpret_records_the_command_as_typed() {
        let mut console = Console::new();
        console.interpret("  cat ideas.md  ");

        assert_eq!(console.history[0].command, "cat ideas.md");
    }
}
