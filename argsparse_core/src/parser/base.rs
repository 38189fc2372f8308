use thiserror::Error;

/// The boxed error a converter may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Raised while registering flags, options, arguments and sub-commands.
///
/// Configuration errors describe a broken parser definition, never bad Cli input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A flag or option was registered without any names.
    #[error("Config error: {entity} has no names.")]
    EmptyNames {
        /// The offending flag/option.
        entity: String,
    },

    /// Names that are neither `--long-name` nor `-x`.
    #[error("Config error: invalid names {}; expected '--long-name' or '-x'.", quoted(.names))]
    InvalidNames {
        /// Every invalid name from the registration.
        names: Vec<String>,
    },

    /// The same name appears more than once within a single registration.
    #[error("Config error: duplicate names {} for {entity}.", quoted(.names))]
    DuplicateNames {
        /// The repeated names.
        names: Vec<String>,
        /// The flag/option being registered.
        entity: String,
    },

    /// A name is already taken by a previously registered flag or option.
    #[error("Config error: name '{name}' of {entity} conflicts with the existing {existing}.")]
    NameConflict {
        /// The conflicting name.
        name: String,
        /// The flag/option being registered.
        entity: String,
        /// The flag/option already holding the name.
        existing: String,
    },

    /// A `SpecificCount` argument with a count of zero.
    #[error("Config error: argument '{argument}' has multiplicity {multiplicity}; a specific count must be positive.")]
    InvalidMultiplicity {
        /// The argument placeholder.
        argument: String,
        /// The rejected multiplicity.
        multiplicity: String,
    },

    /// An argument registered in a position its predecessor does not allow.
    #[error("Config error: argument '{argument}' cannot follow argument '{predecessor}' ({reason}).")]
    ArgumentOrder {
        /// The argument being registered.
        argument: String,
        /// The last argument registered before it.
        predecessor: String,
        /// Why the predecessor forbids a successor.
        reason: &'static str,
    },

    /// The identity names of a parser are unusable.
    #[error("Config error: invalid parser names {}; {reason}.", quoted(.names))]
    InvalidParserNames {
        /// The parser names as given.
        names: Vec<String>,
        /// What is wrong with them.
        reason: &'static str,
    },

    /// A sub-command name is already mapped on this parser.
    #[error("Config error: cannot duplicate the sub-command '{0}'.")]
    DuplicateCommand(String),

    /// A sub-command name equal to the parser's positional delimiter.
    #[error("Config error: sub-command '{0}' is indistinguishable from the positional delimiter.")]
    InvalidCommandName(String),
}

/// Raised when a converter fails to turn a raw token into its typed value.
#[derive(Debug, Error)]
#[error("'{token}' cannot convert for '{name}': {source}")]
pub struct ConversionError {
    /// The option name (as written on the Cli) or argument placeholder.
    pub name: String,
    /// The raw token that failed to convert.
    pub token: String,
    /// The converter's own error.
    #[source]
    pub source: BoxError,
}

/// Raised while tokenizing, dispatching or validating the Cli input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    /// A well formed option token whose name is not registered.
    #[error("Option '{0}' does not exist.")]
    UnknownOption(String),

    /// A value attached to a flag (ex: `--verbose=1` or `-v=1`).
    #[error("Flag '{name}' does not take a value (found '{token}').")]
    FlagWithValue {
        /// The flag name.
        name: String,
        /// The full Cli token.
        token: String,
    },

    /// An empty attached value (ex: `--key=`).
    #[error("Option value missing in '{0}'.")]
    MissingValue(String),

    /// An option at the end of the input, with no token left for its value.
    #[error("Option '{0}' requires a value.")]
    RequiresValue(String),

    /// A flag or option given more than once.
    #[error("Repeated option '{0}'.")]
    RepeatedOption(String),

    /// A value-taking option that is not the final character of a short cluster.
    #[error("Cannot merge value-taking option '{name}' into '{token}'; only the final character of a short cluster may take a value.")]
    MergedOptions {
        /// The misplaced option name.
        name: String,
        /// The full Cli token.
        token: String,
    },

    /// A positional token with no argument slot left to take it.
    #[error("Too many arguments, starting with '{0}'.")]
    TooManyArguments(String),

    /// Required options/arguments not satisfied at the end of the parse.
    #[error("Missing required {}.", missing(.options, .arguments))]
    MissingRequired {
        /// Every required option never given.
        options: Vec<String>,
        /// Every argument whose multiplicity was not met.
        arguments: Vec<String>,
    },
}

/// The error returned by every parse entry point.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Bad Cli input.
    #[error("Parse error: {0}")]
    Runtime(#[from] RuntimeError),

    /// A converter rejected its token.
    #[error("Parse error: {0}")]
    Conversion(#[from] ConversionError),
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("'{n}'"))
        .collect::<Vec<String>>()
        .join(", ")
}

fn missing(options: &[String], arguments: &[String]) -> String {
    let mut parts = Vec::default();

    if !options.is_empty() {
        parts.push(format!("options: {}", options.join(", ")));
    }

    if !arguments.is_empty() {
        parts.push(format!("arguments: {}", arguments.join(", ")));
    }

    parts.join("; ")
}
