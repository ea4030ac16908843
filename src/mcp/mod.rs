//! MCP (Model Context Protocol) server and tool types.
//!
//! This module provides an MCP server implementation for the MyAnimeList API,
//! allowing AI assistants to search anime, look up details, and browse
//! rankings, seasons and suggestions.
//!
//! # Example
//!
//! ```no_run
//! use malapi::mcp::MalServer;
//!
//! # fn main() -> malapi::Result<()> {
//! let server = MalServer::from_env()?;
//! // Server can now be used with rmcp transport
//! # Ok(())
//! # }
//! ```

mod params;
mod server;

pub use params::*;
pub use server::MalServer;
