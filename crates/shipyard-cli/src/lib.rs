//! Shipyard CLI library.
//!
//! Rendering helpers shared by the `shipyard` binary's subcommands. Command
//! handlers live in the binary; everything here is plain formatting over
//! library types so it can be unit tested without a terminal.

pub mod output;
