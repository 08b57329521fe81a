//! Data model for option scanning.
//!
//! This module defines the descriptor types consumed by the scanners and the
//! discriminated event type they return. Descriptor types derive [`serde`]
//! traits and round-trip through JSON and YAML option tables.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Argument arity of an option.
///
/// # Examples
///
/// ```
/// use optscan_core::Arity;
///
/// let arity = Arity::default();
/// assert_eq!(arity, Arity::None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Arity {
    /// The option is a bare flag and takes no argument (the default).
    #[default]
    None,
    /// The option requires an argument, supplied inline or as the next token.
    Required,
    /// The option accepts an inline argument only; a following separate
    /// token is never consumed.
    Optional,
}

/// Descriptor for one long option.
///
/// A descriptor has a name (matched against `--name` tokens, without the
/// dashes), an optional single-character short equivalent, and an argument
/// arity. Build descriptors with [`flag`](LongOpt::flag),
/// [`with_value`](LongOpt::with_value), and
/// [`with_optional_value`](LongOpt::with_optional_value).
///
/// Table order matters only when two descriptors share a name: the first
/// exact match wins.
///
/// # Examples
///
/// ```
/// use optscan_core::{Arity, LongOpt};
///
/// let verbose = LongOpt::flag("verbose", Some('v'));
/// assert_eq!(verbose.arity, Arity::None);
///
/// let message = LongOpt::with_value("message", Some('m'));
/// assert_eq!(message.arity, Arity::Required);
///
/// // Long-only descriptor: no short equivalent
/// let color = LongOpt::with_optional_value("color", None);
/// assert!(color.short.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongOpt {
    /// Long name without the leading dashes (e.g. "verbose").
    pub name: String,
    /// Short single-character equivalent, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    /// Whether and how the option takes an argument.
    #[serde(default)]
    pub arity: Arity,
}

impl LongOpt {
    /// Creates a no-argument descriptor.
    pub fn flag(name: &str, short: Option<char>) -> Self {
        Self {
            name: name.to_string(),
            short,
            arity: Arity::None,
        }
    }

    /// Creates a descriptor with a required argument.
    pub fn with_value(name: &str, short: Option<char>) -> Self {
        Self {
            name: name.to_string(),
            short,
            arity: Arity::Required,
        }
    }

    /// Creates a descriptor with an optional (inline-only) argument.
    pub fn with_optional_value(name: &str, short: Option<char>) -> Self {
        Self {
            name: name.to_string(),
            short,
            arity: Arity::Optional,
        }
    }
}

/// Identity of the option an error-class event refers to.
///
/// Short options are named by character, long options by the name text the
/// caller supplied (which may be an abbreviation when prefix matching was
/// attempted). The `Display` impl renders the conventional dashed form.
///
/// # Examples
///
/// ```
/// use optscan_core::OptName;
///
/// assert_eq!(OptName::Short('x').to_string(), "-x");
/// assert_eq!(OptName::Long("colour").to_string(), "--colour");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OptName<'a> {
    /// A short option character.
    Short(char),
    /// A long option name, without the leading dashes.
    Long(&'a str),
}

impl fmt::Display for OptName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptName::Short(c) => write!(f, "-{c}"),
            OptName::Long(name) => write!(f, "--{name}"),
        }
    }
}

/// Result of a single scan call.
///
/// Every call to [`next_short`](crate::ParserState::next_short) or
/// [`next_long`](crate::ParserState::next_long) returns exactly one event.
/// Error-class events are recoverable: the cursor has already advanced past
/// the offending input, so scanning may simply continue.
///
/// # Examples
///
/// ```
/// use optscan_core::{OptionEvent, ParserState, ShortSpec};
///
/// let tokens = ["-n", "file"];
/// let spec: ShortSpec = "n".parse().unwrap();
/// let mut state = ParserState::new(&tokens);
///
/// assert_eq!(
///     state.next_short(&spec),
///     OptionEvent::Flag { short: Some('n'), value: None }
/// );
/// assert_eq!(state.next_short(&spec), OptionEvent::Done);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OptionEvent<'a> {
    /// A recognized option. `short` is the option character, or the matched
    /// descriptor's short equivalent (`None` for long-only descriptors).
    Flag {
        short: Option<char>,
        value: Option<&'a str>,
    },
    /// No more options. The cursor rests on the first positional token, with
    /// any `--` terminator already consumed.
    Done,
    /// Character or name not present in the spec/table.
    UnknownOption(OptName<'a>),
    /// Long-name prefix matched more than one descriptor.
    AmbiguousOption(&'a str),
    /// Required-argument option reached the end of the token list.
    MissingArgument(OptName<'a>),
    /// Inline value supplied to a no-argument long option.
    UnexpectedArgument(&'a str),
}

impl<'a> OptionEvent<'a> {
    /// Whether this event is one of the error-class variants.
    pub fn is_error(&self) -> bool {
        !matches!(self, OptionEvent::Flag { .. } | OptionEvent::Done)
    }

    /// The value carried by a `Flag` event, if any.
    pub fn value(&self) -> Option<&'a str> {
        match self {
            OptionEvent::Flag { value, .. } => *value,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_opt_constructors() {
        let flag = LongOpt::flag("verbose", Some('v'));
        assert_eq!(flag.name, "verbose");
        assert_eq!(flag.short, Some('v'));
        assert_eq!(flag.arity, Arity::None);

        let value = LongOpt::with_value("output", None);
        assert_eq!(value.arity, Arity::Required);
        assert!(value.short.is_none());

        let optional = LongOpt::with_optional_value("color", Some('c'));
        assert_eq!(optional.arity, Arity::Optional);
    }

    #[test]
    fn test_event_classification() {
        assert!(!OptionEvent::Done.is_error());
        assert!(
            !OptionEvent::Flag {
                short: Some('a'),
                value: None
            }
            .is_error()
        );
        assert!(OptionEvent::UnknownOption(OptName::Short('x')).is_error());
        assert!(OptionEvent::AmbiguousOption("a").is_error());
        assert!(OptionEvent::MissingArgument(OptName::Long("file")).is_error());
        assert!(OptionEvent::UnexpectedArgument("help").is_error());
    }

    #[test]
    fn test_event_value_accessor() {
        let event = OptionEvent::Flag {
            short: Some('c'),
            value: Some("red"),
        };
        assert_eq!(event.value(), Some("red"));
        assert_eq!(OptionEvent::Done.value(), None);
    }

    #[test]
    fn test_long_opt_round_trips_through_json() {
        let table = vec![
            LongOpt::with_value("message", Some('m')),
            LongOpt::flag("amend", None),
        ];
        let json = serde_json::to_string(&table).unwrap();
        let parsed: Vec<LongOpt> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_long_opt_arity_defaults_when_absent() {
        let opt: LongOpt = serde_json::from_str(r#"{"name": "amend"}"#).unwrap();
        assert_eq!(opt.arity, Arity::None);
        assert!(opt.short.is_none());
    }
}
