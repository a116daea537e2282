//! Inbound commands read from the simulation's stdout

/// One command decoded from a line of simulation output.
///
/// The vocabulary is closed: everything the host does not recognize lands
/// in [`SimCommand::Unrecognized`] so callers can match exhaustively.
/// Unrecognized commands are a forward-compatibility valve, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimCommand {
    /// `PlaySound <name>` - request playback of a named sound resource.
    /// The name is resolved case-folded under the bundle's sounds
    /// directory by the relay.
    PlaySound { name: String },

    /// `QuitMicropolis` - the game asked the host to close itself.
    Quit,

    /// Anything else. Kept with its command token for debug logging.
    Unrecognized { command: String },
}

/// Decode one line of simulation output.
///
/// Returns `None` for lines that are empty after trimming; those are
/// discarded without dispatch. Tokens are produced by splitting on the
/// single space character, which preserves empty tokens from consecutive
/// spaces - the sim's own tokenizer does the same, so we do not collapse
/// them.
pub fn parse_line(line: &str) -> Option<SimCommand> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut tokens = trimmed.split(' ');
    let command = tokens.next().unwrap_or_default();

    let parsed = match command {
        "PlaySound" => match tokens.next() {
            Some(name) => SimCommand::PlaySound {
                name: name.to_string(),
            },
            // A bare PlaySound names nothing to resolve.
            None => SimCommand::Unrecognized {
                command: command.to_string(),
            },
        },
        // Trailing tokens are ignored; the quit request stands on its own.
        "QuitMicropolis" => SimCommand::Quit,
        other => SimCommand::Unrecognized {
            command: other.to_string(),
        },
    };

    Some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_lines_decode_to_nothing() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("\t \r\n"), None);
    }

    #[test]
    fn play_sound_keeps_name_verbatim() {
        assert_eq!(
            parse_line("PlaySound FOO"),
            Some(SimCommand::PlaySound { name: "FOO".into() })
        );
    }

    #[test]
    fn play_sound_preserves_empty_token_from_double_space() {
        // Two spaces mean the first argument token is empty; the parser
        // must not collapse it into the next token.
        assert_eq!(
            parse_line("PlaySound  Honk"),
            Some(SimCommand::PlaySound { name: "".into() })
        );
    }

    #[test]
    fn bare_play_sound_is_unrecognized() {
        assert_eq!(
            parse_line("PlaySound"),
            Some(SimCommand::Unrecognized {
                command: "PlaySound".into()
            })
        );
    }

    #[test]
    fn quit_ignores_trailing_tokens() {
        assert_eq!(parse_line("QuitMicropolis"), Some(SimCommand::Quit));
        assert_eq!(parse_line("QuitMicropolis now"), Some(SimCommand::Quit));
    }

    #[test]
    fn match_is_case_sensitive() {
        assert_eq!(
            parse_line("playsound foo"),
            Some(SimCommand::Unrecognized {
                command: "playsound".into()
            })
        );
    }

    #[test]
    fn unknown_commands_are_unrecognized() {
        assert_eq!(
            parse_line("FrobnicateWidget 1 2"),
            Some(SimCommand::Unrecognized {
                command: "FrobnicateWidget".into()
            })
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_before_tokenizing() {
        assert_eq!(
            parse_line("  QuitMicropolis \n"),
            Some(SimCommand::Quit)
        );
    }
}
