use crate::api::capture::{bind_flag, bind_value, FlagCapture, ValueCapture};
use crate::model::{Flow, Multiplicity};
use crate::parser::BoxError;

pub(crate) fn display_names(names: &[String]) -> String {
    names.join("/")
}

/// A zero-value option: its presence on the Cli is a single pulse to the callback.
///
/// ### Example
/// ```
/// # use argsparse_core as argsparse;
/// use argsparse::{Flag, Flow};
///
/// #[derive(Default)]
/// struct Config {
///     verbose: bool,
///     help: bool,
/// }
///
/// let verbose = Flag::new(["-v", "--verbose"], |c: &mut Config| c.verbose = true)
///     .description("Print more.");
/// // Returning `Flow::Halt` stops the parse right after this flag.
/// let help = Flag::new(["-h", "--help"], |c: &mut Config| {
///     c.help = true;
///     Flow::Halt
/// });
/// assert_eq!(verbose.names(), &["-v", "--verbose"]);
/// # let _ = help;
/// ```
pub struct Flag<'a, C> {
    pub(crate) names: Vec<String>,
    pub(crate) description: String,
    pub(crate) capture: FlagCapture<'a, C>,
}

impl<'a, C> Flag<'a, C> {
    /// Create a flag named by `names` (each `-x` or `--long-name`).
    /// Names are validated when the flag is registered on a [`Parser`](crate::Parser).
    pub fn new<A, R>(names: impl IntoIterator<Item = impl Into<String>>, action: A) -> Self
    where
        A: FnMut(&mut C) -> R + 'a,
        R: Into<Flow>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            description: String::default(),
            capture: bind_flag(action),
        }
    }

    /// Document the flag.
    /// If repeated, only the final description will apply.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The names of this flag.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl<'a, C> std::fmt::Debug for Flag<'a, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Flag[{}]", display_names(&self.names))
    }
}

impl<'a, C> std::fmt::Display for Flag<'a, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "flag '{}'", display_names(&self.names))
    }
}

/// A named option which takes exactly one value.
///
/// The value is either attached (`--key=value`, `-k=value`) or the following token (`--key value`, `-k value`).
/// An option may appear at most once per parse.
///
/// ### Example
/// ```
/// # use argsparse_core as argsparse;
/// use argsparse::Opt;
///
/// #[derive(Default)]
/// struct Config {
///     threads: usize,
/// }
///
/// let threads = Opt::new(
///     ["-t", "--threads"],
///     |s: &str| s.parse::<usize>(),
///     |c: &mut Config, value: usize| c.threads = value,
/// )
/// .placeholder("N")
/// .description("Worker threads to use.")
/// .required();
/// assert!(threads.is_required());
/// ```
pub struct Opt<'a, C> {
    pub(crate) names: Vec<String>,
    pub(crate) description: String,
    pub(crate) placeholder: String,
    pub(crate) required: bool,
    pub(crate) capture: ValueCapture<'a, C>,
}

impl<'a, C> Opt<'a, C> {
    /// Create an option named by `names` (each `-x` or `--long-name`).
    ///
    /// The `converter` turns the raw token into `V`; its error is reported as a [`ConversionError`](crate::ConversionError).
    /// The `action` then receives the live configuration and the converted value.
    pub fn new<V, E, F, A, R>(
        names: impl IntoIterator<Item = impl Into<String>>,
        converter: F,
        action: A,
    ) -> Self
    where
        F: Fn(&str) -> Result<V, E> + 'a,
        E: Into<BoxError>,
        A: FnMut(&mut C, V) -> R + 'a,
        R: Into<Flow>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            description: String::default(),
            placeholder: "VALUE".to_string(),
            required: false,
            capture: bind_value(converter, action),
        }
    }

    /// Document the option.
    /// If repeated, only the final description will apply.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The label of the value in help output (defaults to `VALUE`).
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Require this option to appear on the Cli.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The names of this option.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether this option must appear on the Cli.
    pub fn is_required(&self) -> bool {
        self.required
    }
}

impl<'a, C> std::fmt::Debug for Opt<'a, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Opt[{} {}, required={}]",
            display_names(&self.names),
            self.placeholder,
            self.required
        )
    }
}

impl<'a, C> std::fmt::Display for Opt<'a, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "option '{}'", display_names(&self.names))
    }
}

/// A positional argument, matched by order rather than by name.
///
/// How many tokens it takes is governed by its [`Multiplicity`], `SpecificCount { count: 1, required: true }` by default.
/// The callback runs once per consumed token.
///
/// ### Example
/// ```
/// # use argsparse_core as argsparse;
/// use argsparse::{Argument, Multiplicity};
///
/// #[derive(Default)]
/// struct Config {
///     items: Vec<u32>,
/// }
///
/// let items = Argument::new(
///     "ITEM",
///     |s: &str| s.parse::<u32>(),
///     |c: &mut Config, value: u32| c.items.push(value),
/// )
/// .multiplicity(Multiplicity::AllThatFollow { minimum: 1 })
/// .description("The items to sum.");
/// assert_eq!(items.placeholder(), "ITEM");
/// ```
pub struct Argument<'a, C> {
    pub(crate) placeholder: String,
    pub(crate) description: String,
    pub(crate) multiplicity: Multiplicity,
    pub(crate) capture: ValueCapture<'a, C>,
}

impl<'a, C> Argument<'a, C> {
    /// Create an argument labelled `placeholder` in help and error messages.
    pub fn new<V, E, F, A, R>(placeholder: impl Into<String>, converter: F, action: A) -> Self
    where
        F: Fn(&str) -> Result<V, E> + 'a,
        E: Into<BoxError>,
        A: FnMut(&mut C, V) -> R + 'a,
        R: Into<Flow>,
    {
        Self {
            placeholder: placeholder.into(),
            description: String::default(),
            multiplicity: Multiplicity::default(),
            capture: bind_value(converter, action),
        }
    }

    /// Document the argument.
    /// If repeated, only the final description will apply.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set how many positional tokens this argument consumes.
    pub fn multiplicity(mut self, multiplicity: Multiplicity) -> Self {
        self.multiplicity = multiplicity;
        self
    }

    /// The label of this argument.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

impl<'a, C> std::fmt::Debug for Argument<'a, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Argument[{}, {}]", self.placeholder, self.multiplicity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Config {
        verbose: bool,
        value: u32,
    }

    #[test]
    fn flag_builder() {
        let flag = Flag::new(["-v", "--verbose"], |c: &mut Config| c.verbose = true)
            .description("--this will get discarded--")
            .description("Verbose.");
        assert_eq!(flag.names(), &["-v", "--verbose"]);
        assert_eq!(flag.description, "Verbose.");
        assert_eq!(format!("{flag}"), "flag '-v/--verbose'");
        assert_eq!(format!("{flag:?}"), "Flag[-v/--verbose]");
    }

    #[test]
    fn flag_capture() {
        let mut flag = Flag::new(["-v"], |c: &mut Config| c.verbose = true);
        let mut config = Config::default();
        assert_eq!((flag.capture)(&mut config), Flow::Continue);
        assert!(config.verbose);
    }

    #[test]
    fn option_builder() {
        let option = Opt::new(
            vec!["--value".to_string()],
            |s: &str| s.parse::<u32>(),
            |c: &mut Config, v: u32| c.value = v,
        );
        assert!(!option.is_required());
        assert_eq!(option.placeholder, "VALUE");
        assert_eq!(format!("{option:?}"), "Opt[--value VALUE, required=false]");

        let option = option.placeholder("N").required();
        assert!(option.is_required());
        assert_eq!(format!("{option:?}"), "Opt[--value N, required=true]");
        assert_eq!(format!("{option}"), "option '--value'");
    }

    #[test]
    fn argument_builder() {
        let mut argument = Argument::new(
            "VALUE",
            |s: &str| s.parse::<u32>(),
            |c: &mut Config, v: u32| c.value = v,
        );
        assert_eq!(argument.multiplicity, Multiplicity::default());

        let mut config = Config::default();
        (argument.capture)(&mut config, "7").unwrap();
        assert_eq!(config.value, 7);

        argument = argument.multiplicity(Multiplicity::AllThatFollow { minimum: 2 });
        assert_eq!(
            format!("{argument:?}"),
            "Argument[VALUE, all that follow (min 2)]"
        );
    }
}
