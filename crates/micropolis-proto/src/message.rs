//! Outbound messages written to the simulation's stdin

use std::fmt;

/// Escape a string for embedding in a double-quoted TCL string literal.
///
/// Replaces every `"` with `\"` and changes nothing else. This matches the
/// quoting rules of the sim's command interpreter. Known limitation: a
/// literal newline in the input corrupts the line-oriented protocol, and
/// backslash sequences are passed through untouched. Callers embed
/// URIs and nicknames, which in practice contain neither.
pub fn quote_tcl(s: &str) -> String {
    s.replace('"', "\\\"")
}

/// One message sent from the host to the simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMessage {
    /// Startup URI handed to the activity (possibly empty).
    StartUp { uri: String },

    /// The current user's nickname (possibly empty).
    NickName { nick: String },

    /// The activity was shared with others.
    Share,

    /// The host window gained focus.
    Activate,

    /// The host window lost focus.
    Deactivate,
}

impl HostMessage {
    /// Wire encoding: one line, terminated by a single `\n`.
    pub fn to_line(&self) -> String {
        match self {
            HostMessage::StartUp { uri } => {
                format!("SugarStartUp \"{}\"\n", quote_tcl(uri))
            }
            HostMessage::NickName { nick } => {
                format!("SugarNickName \"{}\"\n", quote_tcl(nick))
            }
            HostMessage::Share => "SugarShare\n".to_string(),
            HostMessage::Activate => "SugarActivate\n".to_string(),
            HostMessage::Deactivate => "SugarDeactivate\n".to_string(),
        }
    }
}

impl fmt::Display for HostMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display without the trailing newline, for logging.
        write!(f, "{}", self.to_line().trim_end_matches('\n'))
    }
}
