use reader_core::Signal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Back,
    Gesture(Signal),
    /// `None` clears the current selection.
    Select(Option<String>),
    FullQuiz,
    Dismiss,
    Status,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
commands:
  n            next paragraph
  b            previous paragraph
  p            pinch (summarize paragraph)
  h            head tilt (explain selection or paragraph)
  d            distracted (attention check)
  s <text>     select text to explain; `s` alone clears it
  f            full-article quiz
  x            dismiss attention check
  i            status
  ?            this help
  q            quit";

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "n" | "next" => Command::Next,
        "b" | "back" => Command::Back,
        "s" | "select" => Command::Select((!rest.is_empty()).then(|| rest.to_string())),
        "f" | "quiz" => Command::FullQuiz,
        "x" | "dismiss" => Command::Dismiss,
        "i" | "status" => Command::Status,
        "?" | "help" => Command::Help,
        "q" | "quit" => Command::Quit,
        key => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Signal::from_key(c)
                    .map(Command::Gesture)
                    .unwrap_or_else(|| Command::Unknown(line.to_string())),
                _ => Command::Unknown(line.to_string()),
            }
        }
    };
    Some(command)
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
