//! Reentrant POSIX/GNU option scanning primitives.
//!
//! This crate implements a getopt-style scanner with no hidden global
//! state:
//!
//! - [`ParserState`] — the reentrant cursor over a borrowed token list.
//! - [`ParserState::next_short`] — POSIX short options against a
//!   [`ShortSpec`] optstring (`"ab:c::"`).
//! - [`ParserState::next_long`] — GNU long options against a table of
//!   [`LongOpt`] descriptors, with unambiguous prefix matching and
//!   short-character fallback.
//! - [`ParserState::next_positional`] / [`ParserState::positionals`] —
//!   drain the non-option tokens once scanning is done.
//!
//! Every scan call returns one [`OptionEvent`], including the recoverable
//! error events ([`UnknownOption`](OptionEvent::UnknownOption),
//! [`AmbiguousOption`](OptionEvent::AmbiguousOption),
//! [`MissingArgument`](OptionEvent::MissingArgument),
//! [`UnexpectedArgument`](OptionEvent::UnexpectedArgument)); the parser
//! never prints and never panics on malformed input.
//!
//! Both scanners mutate the same cursor, so a caller may interleave them
//! between calls, and a handler invoked mid-scan may drive a second
//! [`ParserState`] over a subcommand's token slice — each state is an
//! independent value.
//!
//! # Example
//!
//! ```
//! use optscan_core::{OptionEvent, ParserState, ShortSpec};
//!
//! let spec: ShortSpec = "abc:".parse().unwrap();
//! let tokens = ["-ab", "-c", "red", "--", "-x", "file.txt"];
//! let mut state = ParserState::new(&tokens);
//!
//! assert_eq!(
//!     state.next_short(&spec),
//!     OptionEvent::Flag { short: Some('a'), value: None }
//! );
//! assert_eq!(
//!     state.next_short(&spec),
//!     OptionEvent::Flag { short: Some('b'), value: None }
//! );
//! assert_eq!(
//!     state.next_short(&spec),
//!     OptionEvent::Flag { short: Some('c'), value: Some("red") }
//! );
//! assert_eq!(state.next_short(&spec), OptionEvent::Done);
//!
//! let rest: Vec<&str> = state.positionals().collect();
//! assert_eq!(rest, ["-x", "file.txt"]);
//! ```

mod long;
mod short;
mod spec;
mod state;
mod types;
mod validate;

pub use spec::{ShortSpec, SpecError};
pub use state::{ParserState, Positionals};
pub use types::{Arity, LongOpt, OptName, OptionEvent};
pub use validate::{ValidationError, validate_table};
