//! Line protocol exchanged with the Micropolis simulation process
//!
//! The simulation speaks a newline-delimited, space-tokenized textual
//! command language over its stdio pipes:
//! - inbound (sim -> host): [`SimCommand`], decoded by [`parse_line`]
//! - outbound (host -> sim): [`HostMessage`], encoded by
//!   [`HostMessage::to_line`]
//!
//! One untrusted string field (a URI or a nickname) is embedded inside a
//! double-quoted TCL string literal on the outbound side; [`quote_tcl`]
//! makes it safe to embed.

mod command;
mod message;

pub use command::*;
pub use message::*;
