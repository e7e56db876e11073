pub const HELP: &str = "Commands:
  search <text>   only show uncovered bins matching <text> (also: /<text>)
  clear           show all uncovered bins
  expand <n>      expand or collapse suggestion <n> (also: e <n>)
  reload          fetch the coverage analysis again
  help            show this help
  quit            leave the dashboard (also: q)
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Search(String),
    Toggle(usize),
    Reload,
    Redraw,
    Help,
    Quit,
    Invalid(String),
}

/// Parses one line typed at the dashboard prompt. Suggestion numbers are
/// 1-based on screen and 0-based in the returned action.
pub fn parse_action(line: &str) -> Action {
    let line = line.trim();
    if let Some(query) = line.strip_prefix('/') {
        return Action::Search(query.trim().to_string());
    }
    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim()),
        None => (line, ""),
    };
    match command {
        "search" | "s" => Action::Search(argument.to_string()),
        "clear" => Action::Search(String::new()),
        "expand" | "e" => match argument.parse::<usize>() {
            Ok(number) if number > 0 => Action::Toggle(number - 1),
            _ => Action::Invalid(format!("expected a suggestion number, got '{}'", argument)),
        },
        "reload" | "r" => Action::Reload,
        "help" | "h" | "?" => Action::Help,
        "quit" | "q" | "exit" => Action::Quit,
        "" => Action::Redraw,
        other => Action::Invalid(format!("unknown command '{}'", other)),
    }
}
