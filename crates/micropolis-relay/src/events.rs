//! Events emitted by the relay's reader loop

/// Events the relay reports to its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayEvent {
    /// The sim asked the host to close itself (`QuitMicropolis`).
    /// Teardown after this event must not re-signal the child.
    QuitRequested,

    /// The sim's output stream closed (process exit or read error) and
    /// the reader loop has finished. Expected end of life, not an error.
    Closed,
}
