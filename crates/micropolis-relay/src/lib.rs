//! Child process ownership and line-protocol relay for the Micropolis sim
//!
//! The [`Relay`] owns one sim process, the pipe to its stdin, and a
//! background reader task over its stdout. Inbound lines are decoded into
//! commands and dispatched (sound playback, quit request); outbound
//! messages are written verbatim by the foreground. Responsibility is
//! partitioned by direction: only the reader task reads stdout, only the
//! control path writes stdin.

mod arch;
mod bundle;
mod error;
mod events;
mod process;
mod relay;

pub use arch::*;
pub use bundle::*;
pub use error::*;
pub use events::*;
pub use process::*;
pub use relay::*;
