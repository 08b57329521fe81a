//! The reentrant scanning cursor.
//!
//! [`ParserState`] owns no tokens, only indices into the caller-supplied
//! token list. Each state value is independent: threads parsing different
//! token lists need no synchronization, and a handler invoked mid-scan may
//! drive its own state over a subcommand's token slice without corrupting
//! the caller's cursor.

use crate::OptName;

/// The scanning cursor over a borrowed token list.
///
/// Create one state per parse session with [`new`](ParserState::new); the
/// token list is exactly the tokens to be parsed — there is no skipped
/// program-name slot, and the cursor starts at index 0. The state must not
/// outlive the token list it borrows, which the lifetime parameter enforces.
///
/// Drive the state with [`next_short`](ParserState::next_short) and/or
/// [`next_long`](ParserState::next_long) until either returns
/// [`Done`](crate::OptionEvent::Done), then drain the rest with
/// [`next_positional`](ParserState::next_positional) or
/// [`positionals`](ParserState::positionals). The two scanners share this
/// cursor, so calls to them may be freely interleaved.
///
/// # Examples
///
/// ```
/// use optscan_core::{OptionEvent, ParserState, ShortSpec};
///
/// let spec: ShortSpec = "v".parse().unwrap();
/// let tokens = ["-v", "build", "--release"];
/// let mut state = ParserState::new(&tokens);
///
/// assert_eq!(
///     state.next_short(&spec),
///     OptionEvent::Flag { short: Some('v'), value: None }
/// );
/// assert_eq!(state.next_short(&spec), OptionEvent::Done);
///
/// // The subcommand and everything after it is left for the caller, who
/// // may hand `state.remaining()` to a nested parser.
/// assert_eq!(state.next_positional(), Some("build"));
/// assert_eq!(state.remaining().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ParserState<'a, T: AsRef<str>> {
    pub(crate) tokens: &'a [T],
    pub(crate) token_index: usize,
    pub(crate) subposition: usize,
    pub(crate) current_value: Option<&'a str>,
    pub(crate) error_message: Option<String>,
    pub(crate) offending: Option<OptName<'a>>,
    pub(crate) matched_long: Option<usize>,
}

impl<'a, T: AsRef<str>> ParserState<'a, T> {
    /// Binds a token list and returns a fresh cursor.
    pub fn new(tokens: &'a [T]) -> Self {
        Self {
            tokens,
            token_index: 0,
            subposition: 0,
            current_value: None,
            error_message: None,
            offending: None,
            matched_long: None,
        }
    }

    /// Fully reinitializes this state over the same or a different token
    /// list, discarding the cursor position and all diagnostics.
    ///
    /// This is the supported alternative to an in-place rewind, and the
    /// mechanism for reusing one state value across nested parse sessions.
    pub fn reset(&mut self, tokens: &'a [T]) {
        *self = Self::new(tokens);
    }

    /// Index of the token currently under the cursor.
    pub fn token_index(&self) -> usize {
        self.token_index
    }

    /// Value consumed by the most recently returned option, if any.
    pub fn current_value(&self) -> Option<&'a str> {
        self.current_value
    }

    /// Diagnostic text from the last error-class event, valid until the
    /// next scan call. Stays `None` under a quiet spec.
    pub fn last_error(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// The offending character or name from the last error-class event.
    pub fn offending(&self) -> Option<OptName<'a>> {
        self.offending
    }

    /// Index of the descriptor matched by the most recent
    /// [`next_long`](ParserState::next_long) call.
    pub fn matched_long(&self) -> Option<usize> {
        self.matched_long
    }

    /// The unconsumed tail of the token list, without advancing.
    pub fn remaining(&self) -> &'a [T] {
        &self.tokens[self.token_index..]
    }

    /// Returns the token under the cursor and advances, or `None` at
    /// exhaustion.
    ///
    /// Purely sequential: dash-prefixed tokens are not reinterpreted as
    /// options. Intended after a scanner returned
    /// [`Done`](crate::OptionEvent::Done); called mid-cluster it abandons
    /// the rest of the current token.
    pub fn next_positional(&mut self) -> Option<&'a str> {
        let token = self.tokens.get(self.token_index)?;
        self.token_index += 1;
        self.subposition = 0;
        Some(token.as_ref())
    }

    /// Draining iterator over the remaining positional tokens.
    ///
    /// # Examples
    ///
    /// ```
    /// use optscan_core::ParserState;
    ///
    /// let tokens = ["a", "b"];
    /// let mut state = ParserState::new(&tokens);
    /// let drained: Vec<&str> = state.positionals().collect();
    /// assert_eq!(drained, ["a", "b"]);
    /// assert_eq!(state.next_positional(), None);
    /// ```
    pub fn positionals(&mut self) -> Positionals<'_, 'a, T> {
        Positionals { state: self }
    }

    /// Current token as a string slice, without advancing.
    pub(crate) fn token(&self) -> Option<&'a str> {
        self.tokens.get(self.token_index).map(AsRef::as_ref)
    }

    /// Clears per-call fields at the start of a scan call.
    pub(crate) fn begin_scan(&mut self) {
        self.current_value = None;
        self.error_message = None;
        self.offending = None;
        self.matched_long = None;
    }

    /// Moves the cursor to the next token.
    pub(crate) fn advance_token(&mut self) {
        self.token_index += 1;
        self.subposition = 0;
    }

    /// Records the offender and, unless quiet, the diagnostic text.
    pub(crate) fn record_error(
        &mut self,
        quiet: bool,
        offending: OptName<'a>,
        message: impl FnOnce() -> String,
    ) {
        self.offending = Some(offending);
        if !quiet {
            self.error_message = Some(message());
        }
    }
}

/// Iterator returned by [`ParserState::positionals`].
#[derive(Debug)]
pub struct Positionals<'s, 'a, T: AsRef<str>> {
    state: &'s mut ParserState<'a, T>,
}

impl<'a, T: AsRef<str>> Iterator for Positionals<'_, 'a, T> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.state.next_positional()
    }
}
