#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Fetch,         // /fetch
    Hours(String), // /hours <value>
    Tasks(String), // /tasks <value>
    Help,          // /help
    Quit,          // /quit or /exit
    Unknown(String),
}

pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return Command::Unknown(trimmed.to_string());
    }
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let verb = parts.next().unwrap_or_default();
    // Missing argument becomes the empty string on purpose; the estimator
    // coerces it like an untouched form field.
    let rest = parts.next().map(str::trim).unwrap_or_default();

    match verb {
        "/fetch" => Command::Fetch,
        "/hours" => Command::Hours(rest.to_string()),
        "/tasks" => Command::Tasks(rest.to_string()),
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fetch_and_quit() {
        assert_eq!(parse_command("/fetch"), Command::Fetch);
        assert_eq!(parse_command(" /quit "), Command::Quit);
        assert_eq!(parse_command("/exit"), Command::Quit);
    }

    #[test]
    fn parses_estimator_fields_with_raw_values() {
        assert_eq!(parse_command("/hours 2.5"), Command::Hours("2.5".into()));
        assert_eq!(parse_command("/tasks four"), Command::Tasks("four".into()));
        assert_eq!(parse_command("/hours"), Command::Hours(String::new()));
    }

    #[test]
    fn unknown_commands_are_preserved_verbatim() {
        assert_eq!(
            parse_command("/refresh now"),
            Command::Unknown("/refresh now".into())
        );
        assert_eq!(parse_command("hello"), Command::Unknown("hello".into()));
    }
}
