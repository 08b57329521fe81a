//! Short-option scanning.
//!
//! The cluster-stepping machine here is the shared core of both scanners:
//! [`next_long`](crate::ParserState::next_long) reuses it for single-dash
//! tokens, resolving characters against descriptor short equivalents
//! instead of an optstring.

use tracing::{debug, trace};

use crate::{Arity, OptName, OptionEvent, ParserState, ShortSpec};

impl<'a, T: AsRef<str>> ParserState<'a, T> {
    /// Scans the next short option.
    ///
    /// Returns one event per call: a [`Flag`](OptionEvent::Flag) for each
    /// recognized character (clustered characters are split across calls),
    /// an error-class event for unrecognized characters or missing
    /// arguments, or [`Done`](OptionEvent::Done) once the cursor reaches
    /// the end of the list, a non-option token, a lone `-`, or a `--`
    /// terminator (which is consumed).
    ///
    /// Scanning is sequential, not permuting: the first non-option token
    /// stops the scan and stays under the cursor, so options must precede
    /// positional arguments for a single pass to pick them all up. Callers
    /// needing intermixed order can step over one token with
    /// [`next_positional`](ParserState::next_positional) and resume.
    ///
    /// # Examples
    ///
    /// ```
    /// use optscan_core::{OptionEvent, ParserState, ShortSpec};
    ///
    /// let spec: ShortSpec = "ac:".parse().unwrap();
    /// let tokens = ["-a", "-c", "red"];
    /// let mut state = ParserState::new(&tokens);
    ///
    /// assert_eq!(
    ///     state.next_short(&spec),
    ///     OptionEvent::Flag { short: Some('a'), value: None }
    /// );
    /// assert_eq!(
    ///     state.next_short(&spec),
    ///     OptionEvent::Flag { short: Some('c'), value: Some("red") }
    /// );
    /// assert_eq!(state.next_short(&spec), OptionEvent::Done);
    /// ```
    pub fn next_short(&mut self, spec: &ShortSpec) -> OptionEvent<'a> {
        self.begin_scan();
        self.scan_cluster(spec.quiet(), |c| spec.arity_of(c).map(|arity| (arity, None)))
    }

    /// Steps through the current short-option cluster, resolving each
    /// character through `lookup`, which yields the arity and, for
    /// table-backed lookups, the matched descriptor index.
    pub(crate) fn scan_cluster<F>(&mut self, quiet: bool, lookup: F) -> OptionEvent<'a>
    where
        F: Fn(char) -> Option<(Arity, Option<usize>)>,
    {
        loop {
            let Some(token) = self.token() else {
                return OptionEvent::Done;
            };
            if self.subposition == 0 {
                if token == "--" {
                    self.advance_token();
                    return OptionEvent::Done;
                }
                if !token.starts_with('-') || token.len() == 1 {
                    return OptionEvent::Done;
                }
                self.subposition = 1;
            }
            if self.subposition >= token.len() {
                // Cluster exhausted on a previous call.
                self.advance_token();
                continue;
            }
            let Some(c) = token[self.subposition..].chars().next() else {
                self.advance_token();
                continue;
            };
            self.subposition += c.len_utf8();

            let Some((arity, matched)) = lookup(c) else {
                if self.subposition >= token.len() {
                    self.advance_token();
                }
                self.record_error(quiet, OptName::Short(c), || format!("invalid option -- '{c}'"));
                debug!(option = %c, "unrecognized short option");
                return OptionEvent::UnknownOption(OptName::Short(c));
            };
            self.matched_long = matched;

            match arity {
                Arity::None => {
                    if self.subposition >= token.len() {
                        self.advance_token();
                    }
                    trace!(option = %c, "flag");
                    return OptionEvent::Flag {
                        short: Some(c),
                        value: None,
                    };
                }
                Arity::Required => {
                    let rest = &token[self.subposition..];
                    if !rest.is_empty() {
                        self.advance_token();
                        self.current_value = Some(rest);
                        trace!(option = %c, value = rest, "flag with inline value");
                        return OptionEvent::Flag {
                            short: Some(c),
                            value: Some(rest),
                        };
                    }
                    self.advance_token();
                    let Some(value) = self.token() else {
                        self.record_error(quiet, OptName::Short(c), || {
                            format!("option requires an argument -- '{c}'")
                        });
                        debug!(option = %c, "missing required argument");
                        return OptionEvent::MissingArgument(OptName::Short(c));
                    };
                    self.advance_token();
                    self.current_value = Some(value);
                    trace!(option = %c, value, "flag with following value");
                    return OptionEvent::Flag {
                        short: Some(c),
                        value: Some(value),
                    };
                }
                Arity::Optional => {
                    // Only the inline form supplies a value; the next token
                    // is never consumed.
                    let rest = &token[self.subposition..];
                    let value = (!rest.is_empty()).then_some(rest);
                    self.advance_token();
                    self.current_value = value;
                    return OptionEvent::Flag {
                        short: Some(c),
                        value,
                    };
                }
            }
        }
    }
}
