use regex::Regex;
use std::sync::OnceLock;

use crate::matcher::api::Token;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

// Registered names: `--long-name` (alphanumeric head, then alphanumerics/hyphens) or `-x` (one letter).
fn regex_option_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:--[a-zA-Z0-9][a-zA-Z0-9-]*|-[a-zA-Z])$")
            .expect("internal error - option name pattern must compile")
    })
}

fn regex_long_option() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)^(--[a-zA-Z0-9][a-zA-Z0-9-]*)(?:=(.*))?$")
            .expect("internal error - long option pattern must compile")
    })
}

fn regex_short_option() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)^-([a-zA-Z]+)(?:=(.*))?$")
            .expect("internal error - short option pattern must compile")
    })
}

/// Whether `name` may be registered as a flag/option name.
pub(crate) fn is_option_name(name: &str) -> bool {
    regex_option_name().is_match(name)
}

/// Classifies raw tokens, one at a time, for a single parse.
///
/// Once the delimiter has been seen, every following token is positional.
#[derive(Debug)]
pub(crate) struct Classifier<'d> {
    delimiter: &'d str,
    delimited: bool,
}

impl<'d> Classifier<'d> {
    pub(crate) fn new(delimiter: &'d str) -> Self {
        Self {
            delimiter,
            delimited: false,
        }
    }

    pub(crate) fn classify<'t>(&mut self, token: &'t str) -> Token<'t> {
        let class = if self.delimited {
            Token::Positional(token)
        } else if token == self.delimiter {
            self.delimited = true;
            Token::Delimiter
        } else if let Some(captures) = regex_long_option().captures(token) {
            Token::Long {
                name: captures
                    .get(1)
                    .expect("internal error - long option pattern always captures the name")
                    .as_str(),
                value: captures.get(2).map(|m| m.as_str()),
            }
        } else if let Some(captures) = regex_short_option().captures(token) {
            Token::Short {
                cluster: captures
                    .get(1)
                    .expect("internal error - short option pattern always captures the cluster")
                    .as_str(),
                value: captures.get(2).map(|m| m.as_str()),
            }
        } else {
            Token::Positional(token)
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Classified '{token}' as {class:?}.");
        }

        class
    }
}
