//! Command parser for the : command system

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Navigation commands
    Floors,
    Zones,
    Seats,
    Admins,
    Profile,
    Tab(i64),

    // Screen commands
    Reload,
    Settings,
    Help,
    Quit,

    // Unknown command
    Unknown(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim().to_string());

    match cmd.to_lowercase().as_str() {
        // Navigation
        "floors" | "floor" | "f" => Command::Floors,
        "zones" | "zone" | "z" => Command::Zones,
        "seats" | "seat" => Command::Seats,
        "admins" | "admin" => Command::Admins,
        "profile" | "me" => Command::Profile,
        "tab" => match args.as_deref().and_then(|s| s.parse::<i64>().ok()) {
            Some(index) => Command::Tab(index),
            None => Command::Unknown(input.to_string()),
        },

        // Screen
        "reload" | "refresh" => Command::Reload,
        "settings" | "set" => Command::Settings,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,

        _ => Command::Unknown(input.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation_commands() {
        assert_eq!(parse_command("floors"), Command::Floors);
        assert_eq!(parse_command("  Zones "), Command::Zones);
        assert_eq!(parse_command("seat"), Command::Seats);
        assert_eq!(parse_command("admins"), Command::Admins);
        assert_eq!(parse_command("profile"), Command::Profile);
    }

    #[test]
    fn test_parse_tab_index() {
        assert_eq!(parse_command("tab 2"), Command::Tab(2));
        assert_eq!(parse_command("tab -1"), Command::Tab(-1));
        assert_eq!(parse_command("tab 99"), Command::Tab(99));
        assert_eq!(parse_command("tab"), Command::Unknown("tab".to_string()));
        assert_eq!(
            parse_command("tab two"),
            Command::Unknown("tab two".to_string())
        );
    }

    #[test]
    fn test_parse_screen_commands() {
        assert_eq!(parse_command("reload"), Command::Reload);
        assert_eq!(parse_command("settings"), Command::Settings);
        assert_eq!(parse_command("help"), Command::Help);
        assert_eq!(parse_command("q"), Command::Quit);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse_command("book seat 4"),
            Command::Unknown("book seat 4".to_string())
        );
    }
}
