//! osc-notify-core: assembles desktop notifications from chunked OSC 99
//! escape sequences.
//!
//! An upstream tokenizer isolates each sequence's bytes into a
//! [`sink::ScratchBuffer`]; a [`parser::Parser`] decodes the invocation,
//! accumulates title and body fragments across invocations that share an
//! identifier, and emits a [`notification::Notification`] once the sender
//! signals completion.
//!
//! # Architecture
//!
//! ```text
//! tokenizer → ScratchBuffer → Parser ─┬→ metadata  (p, d, e, i keys)
//!                                     ├→ payload   (base64, safe text)
//!                                     └→ session   (BoundedBuf title/body)
//!                                              ↓
//!                         Outcome::{Pending, Dropped, Emitted, Failed}
//! ```
//!
//! # Modules
//!
//! - `bounded`: fixed-capacity byte buffer that never reallocates
//! - `config`: TOML configuration
//! - `error`: error types
//! - `logging`: tracing subscriber setup
//! - `metadata`: `key=value` metadata decoding
//! - `notification`: outcome and result types
//! - `parser`: the per-connection parser
//! - `payload`: base64 and text-safety checks
//! - `session`: identifier-scoped accumulation
//! - `sink`: sentinel-terminated scratch buffer shared with the tokenizer
//!
//! # Example
//!
//! ```
//! use osc_notify_core::{Outcome, Parser};
//!
//! let mut parser = Parser::default();
//! assert!(parser.handle_invocation(b"i=build:d=0:p=title;Build").is_pending());
//! match parser.handle_invocation(b"i=build:p=body;finished") {
//!     Outcome::Emitted(n) => {
//!         assert_eq!(n.title(), "Build");
//!         assert_eq!(n.body(), "finished");
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

#![forbid(unsafe_code)]

pub mod bounded;
pub mod config;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod notification;
pub mod parser;
pub mod payload;
pub mod session;
pub mod sink;

pub use config::{Config, ParserConfig};
pub use error::{ConfigError, Error, ErrorKind, Result};
pub use notification::{Command, DropReason, Notification, Outcome};
pub use parser::{Parser, ParserState};
pub use sink::ScratchBuffer;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
