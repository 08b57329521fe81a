//! Long-option scanning.

use tracing::{debug, trace};

use crate::{Arity, LongOpt, OptName, OptionEvent, ParserState};

impl<'a, T: AsRef<str>> ParserState<'a, T> {
    /// Scans the next long option.
    ///
    /// A `--name` or `--name=value` token is matched against the descriptor
    /// table: an exact name match wins immediately, otherwise a prefix that
    /// selects exactly one descriptor resolves to it, and a prefix matching
    /// several yields [`AmbiguousOption`](OptionEvent::AmbiguousOption).
    /// The returned [`Flag`](OptionEvent::Flag) carries the descriptor's
    /// short equivalent (`None` for long-only descriptors); the matched
    /// descriptor index is readable via
    /// [`matched_long`](ParserState::matched_long).
    ///
    /// A single-dash token of length ≥ 2 falls back to short-cluster
    /// semantics, resolving each character against the descriptors' short
    /// equivalents, so a table-driven caller gets both conventions from
    /// this one entry point. Gating and the non-permuting contract are
    /// otherwise identical to [`next_short`](ParserState::next_short).
    ///
    /// # Examples
    ///
    /// ```
    /// use optscan_core::{LongOpt, OptionEvent, ParserState};
    ///
    /// let table = [
    ///     LongOpt::with_value("message", Some('m')),
    ///     LongOpt::flag("amend", None),
    /// ];
    /// let tokens = ["--am", "-mfix", "--message=more"];
    /// let mut state = ParserState::new(&tokens);
    ///
    /// // Unique prefix of "amend"; a long-only descriptor.
    /// assert_eq!(
    ///     state.next_long(&table),
    ///     OptionEvent::Flag { short: None, value: None }
    /// );
    /// assert_eq!(state.matched_long(), Some(1));
    ///
    /// // Short fallback through the same table.
    /// assert_eq!(
    ///     state.next_long(&table),
    ///     OptionEvent::Flag { short: Some('m'), value: Some("fix") }
    /// );
    ///
    /// assert_eq!(
    ///     state.next_long(&table),
    ///     OptionEvent::Flag { short: Some('m'), value: Some("more") }
    /// );
    /// assert_eq!(state.next_long(&table), OptionEvent::Done);
    /// ```
    pub fn next_long(&mut self, table: &[LongOpt]) -> OptionEvent<'a> {
        self.begin_scan();
        if self.subposition == 0 {
            let Some(token) = self.token() else {
                return OptionEvent::Done;
            };
            if token == "--" {
                self.advance_token();
                return OptionEvent::Done;
            }
            if !token.starts_with('-') || token.len() == 1 {
                return OptionEvent::Done;
            }
            if let Some(body) = token.strip_prefix("--") {
                return self.match_long(body, table);
            }
        }
        self.scan_cluster(false, |c| {
            table
                .iter()
                .position(|opt| opt.short == Some(c))
                .map(|index| (table[index].arity, Some(index)))
        })
    }

    /// Resolves one `--` token body (already stripped of its dashes)
    /// against the table. The candidate token is consumed in every
    /// outcome.
    fn match_long(&mut self, body: &'a str, table: &[LongOpt]) -> OptionEvent<'a> {
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };
        self.advance_token();

        let resolved = if name.is_empty() {
            None
        } else {
            match table.iter().position(|opt| opt.name == name) {
                Some(index) => Some(index),
                None => {
                    let mut candidates = table
                        .iter()
                        .enumerate()
                        .filter(|(_, opt)| opt.name.starts_with(name));
                    match (candidates.next(), candidates.next()) {
                        (Some((index, _)), None) => Some(index),
                        (Some(_), Some(_)) => {
                            self.record_error(false, OptName::Long(name), || {
                                format!("option '--{name}' is ambiguous")
                            });
                            debug!(option = %name, "ambiguous long option");
                            return OptionEvent::AmbiguousOption(name);
                        }
                        (None, _) => None,
                    }
                }
            }
        };
        let Some(index) = resolved else {
            self.record_error(false, OptName::Long(name), || {
                format!("unrecognized option '--{name}'")
            });
            debug!(option = %name, "unrecognized long option");
            return OptionEvent::UnknownOption(OptName::Long(name));
        };

        let opt = &table[index];
        self.matched_long = Some(index);
        match opt.arity {
            Arity::None => {
                if inline.is_some() {
                    self.record_error(false, OptName::Long(name), || {
                        format!("option '--{}' doesn't allow an argument", opt.name)
                    });
                    debug!(option = %opt.name, "unexpected inline argument");
                    return OptionEvent::UnexpectedArgument(name);
                }
                trace!(option = %opt.name, "long flag");
                OptionEvent::Flag {
                    short: opt.short,
                    value: None,
                }
            }
            Arity::Required => {
                let value = match inline {
                    Some(value) => Some(value),
                    None => {
                        let next = self.token();
                        if next.is_some() {
                            self.advance_token();
                        }
                        next
                    }
                };
                let Some(value) = value else {
                    self.record_error(false, OptName::Long(name), || {
                        format!("option '--{}' requires an argument", opt.name)
                    });
                    debug!(option = %opt.name, "missing required argument");
                    return OptionEvent::MissingArgument(OptName::Long(name));
                };
                self.current_value = Some(value);
                trace!(option = %opt.name, value, "long flag with value");
                OptionEvent::Flag {
                    short: opt.short,
                    value: Some(value),
                }
            }
            Arity::Optional => {
                // Only the inline form supplies a value.
                self.current_value = inline;
                OptionEvent::Flag {
                    short: opt.short,
                    value: inline,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{LongOpt, OptName, OptionEvent, ParserState};

    fn git_table() -> Vec<LongOpt> {
        vec![
            LongOpt::with_value("message", Some('m')),
            LongOpt::flag("amend", Some('a')),
            LongOpt::flag("abort", None),
        ]
    }

    #[test]
    fn test_exact_match_wins() {
        let table = git_table();
        let tokens = ["--amend"];
        let mut state = ParserState::new(&tokens);
        assert_eq!(
            state.next_long(&table),
            OptionEvent::Flag {
                short: Some('a'),
                value: None
            }
        );
        assert_eq!(state.matched_long(), Some(1));
        assert_eq!(state.next_long(&table), OptionEvent::Done);
    }

    #[test]
    fn test_exact_match_beats_prefix() {
        let table = vec![
            LongOpt::flag("amend", None),
            LongOpt::flag("amends", None),
        ];
        let tokens = ["--amend"];
        let mut state = ParserState::new(&tokens);
        assert_eq!(
            state.next_long(&table),
            OptionEvent::Flag {
                short: None,
                value: None
            }
        );
        assert_eq!(state.matched_long(), Some(0));
    }

    #[test]
    fn test_unique_prefix_resolves() {
        let table = git_table();
        let tokens = ["--am"];
        let mut state = ParserState::new(&tokens);
        assert_eq!(
            state.next_long(&table),
            OptionEvent::Flag {
                short: Some('a'),
                value: None
            }
        );
        assert_eq!(state.matched_long(), Some(1));
    }

    #[test]
    fn test_ambiguous_prefix() {
        let table = git_table();
        let tokens = ["--a"];
        let mut state = ParserState::new(&tokens);
        assert_eq!(state.next_long(&table), OptionEvent::AmbiguousOption("a"));
        assert_eq!(state.offending(), Some(OptName::Long("a")));
        assert_eq!(state.last_error(), Some("option '--a' is ambiguous"));
        // The offending token was consumed; scanning resumes normally.
        assert_eq!(state.next_long(&table), OptionEvent::Done);
    }

    #[test]
    fn test_unknown_long_option() {
        let table = git_table();
        let tokens = ["--squash", "--amend"];
        let mut state = ParserState::new(&tokens);
        assert_eq!(
            state.next_long(&table),
            OptionEvent::UnknownOption(OptName::Long("squash"))
        );
        assert_eq!(state.last_error(), Some("unrecognized option '--squash'"));
        assert_eq!(
            state.next_long(&table),
            OptionEvent::Flag {
                short: Some('a'),
                value: None
            }
        );
    }

    #[test]
    fn test_inline_value() {
        let table = git_table();
        let tokens = ["--message=fix: typo"];
        let mut state = ParserState::new(&tokens);
        assert_eq!(
            state.next_long(&table),
            OptionEvent::Flag {
                short: Some('m'),
                value: Some("fix: typo")
            }
        );
        assert_eq!(state.current_value(), Some("fix: typo"));
    }

    #[test]
    fn test_inline_value_splits_at_first_equals() {
        let table = vec![LongOpt::with_value("define", Some('D'))];
        let tokens = ["--define=key=value"];
        let mut state = ParserState::new(&tokens);
        assert_eq!(
            state.next_long(&table),
            OptionEvent::Flag {
                short: Some('D'),
                value: Some("key=value")
            }
        );
    }

    #[test]
    fn test_value_from_next_token() {
        let table = git_table();
        let tokens = ["--message", "fix"];
        let mut state = ParserState::new(&tokens);
        assert_eq!(
            state.next_long(&table),
            OptionEvent::Flag {
                short: Some('m'),
                value: Some("fix")
            }
        );
        assert_eq!(state.token_index(), 2);
    }

    #[test]
    fn test_missing_argument() {
        let table = git_table();
        let tokens = ["--message"];
        let mut state = ParserState::new(&tokens);
        assert_eq!(
            state.next_long(&table),
            OptionEvent::MissingArgument(OptName::Long("message"))
        );
        assert_eq!(
            state.last_error(),
            Some("option '--message' requires an argument")
        );
        assert_eq!(state.next_long(&table), OptionEvent::Done);
    }

    #[test]
    fn test_unexpected_argument_on_no_arg_option() {
        let table = git_table();
        let tokens = ["--amend=now"];
        let mut state = ParserState::new(&tokens);
        assert_eq!(
            state.next_long(&table),
            OptionEvent::UnexpectedArgument("amend")
        );
        assert_eq!(
            state.last_error(),
            Some("option '--amend' doesn't allow an argument")
        );
        assert_eq!(state.next_long(&table), OptionEvent::Done);
    }

    #[test]
    fn test_optional_long_never_consumes_next_token() {
        let table = vec![LongOpt::with_optional_value("color", None)];
        let tokens = ["--color", "auto"];
        let mut state = ParserState::new(&tokens);
        assert_eq!(
            state.next_long(&table),
            OptionEvent::Flag {
                short: None,
                value: None
            }
        );
        assert_eq!(state.next_long(&table), OptionEvent::Done);
        assert_eq!(state.next_positional(), Some("auto"));
    }

    #[test]
    fn test_optional_long_inline_value() {
        let table = vec![LongOpt::with_optional_value("color", None)];
        let tokens = ["--color=always"];
        let mut state = ParserState::new(&tokens);
        assert_eq!(
            state.next_long(&table),
            OptionEvent::Flag {
                short: None,
                value: Some("always")
            }
        );
    }

    #[test]
    fn test_empty_name_is_unknown() {
        let table = git_table();
        let tokens = ["--=value"];
        let mut state = ParserState::new(&tokens);
        assert_eq!(
            state.next_long(&table),
            OptionEvent::UnknownOption(OptName::Long(""))
        );
        assert_eq!(state.next_long(&table), OptionEvent::Done);
    }

    #[test]
    fn test_single_dash_fallback_cluster() {
        let table = git_table();
        let tokens = ["-am", "fix"];
        let mut state = ParserState::new(&tokens);
        assert_eq!(
            state.next_long(&table),
            OptionEvent::Flag {
                short: Some('a'),
                value: None
            }
        );
        assert_eq!(state.matched_long(), Some(1));
        assert_eq!(
            state.next_long(&table),
            OptionEvent::Flag {
                short: Some('m'),
                value: Some("fix")
            }
        );
        assert_eq!(state.matched_long(), Some(0));
        assert_eq!(state.next_long(&table), OptionEvent::Done);
    }

    #[test]
    fn test_single_dash_fallback_unknown_character() {
        let table = git_table();
        let tokens = ["-z"];
        let mut state = ParserState::new(&tokens);
        assert_eq!(
            state.next_long(&table),
            OptionEvent::UnknownOption(OptName::Short('z'))
        );
    }

    #[test]
    fn test_terminator_and_positionals() {
        let table = git_table();
        let tokens = ["--amend", "--", "--message"];
        let mut state = ParserState::new(&tokens);
        assert_eq!(
            state.next_long(&table),
            OptionEvent::Flag {
                short: Some('a'),
                value: None
            }
        );
        assert_eq!(state.next_long(&table), OptionEvent::Done);
        assert_eq!(state.next_positional(), Some("--message"));
        assert_eq!(state.next_positional(), None);
    }
}
