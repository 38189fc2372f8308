use std::collections::{HashMap, HashSet};
use std::env;

use crate::api::{Argument, Flag, Opt};
use crate::constant::DEFAULT_DELIMITER;
use crate::model::{Outcome, Parsed};
use crate::parser::{resolve, ConfigError, ParseError, Registry, Schema};
use crate::prelude::{Command, HelpFormatter};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

type Factory<'a, C> = Box<dyn Fn() -> C + 'a>;
type RunCallback<'a, C> = Box<dyn FnMut(&C, &Parser<'a, C>) + 'a>;

/// A command line parser node, populating a configuration of type `C`.
///
/// Flags, options and arguments are registered up front; every registration is checked immediately.
/// Parsing then invokes the matched callbacks, in Cli order, against the live configuration.
///
/// A parse is not transactional: when an error is returned, callbacks already invoked have already taken effect.
///
/// ### Example
/// ```
/// # use argsparse_core as argsparse;
/// use argsparse::{Argument, Flag, Opt, Parser};
///
/// #[derive(Debug, Default)]
/// struct Config {
///     verbose: bool,
///     threads: usize,
///     file: String,
/// }
///
/// let mut parser = Parser::new(["program"], Config::default()).unwrap();
/// parser
///     .add_flag(Flag::new(["-v", "--verbose"], |c: &mut Config| c.verbose = true))
///     .unwrap()
///     .add_option(Opt::new(
///         ["-t", "--threads"],
///         |s: &str| s.parse::<usize>(),
///         |c: &mut Config, v: usize| c.threads = v,
///     ))
///     .unwrap()
///     .add_argument(Argument::new(
///         "FILE",
///         |s: &str| Ok::<String, std::convert::Infallible>(s.to_string()),
///         |c: &mut Config, v: String| c.file = v,
///     ))
///     .unwrap();
///
/// parser.parse_tokens(&["-v", "--threads=4", "notes.txt"]).unwrap();
///
/// let config = parser.take_config().unwrap();
/// assert!(config.verbose);
/// assert_eq!(config.threads, 4);
/// assert_eq!(config.file, "notes.txt");
/// ```
pub struct Parser<'a, C> {
    names: Vec<String>,
    description: String,
    delimiter: String,
    config: Option<C>,
    factory: Option<Factory<'a, C>>,
    registry: Registry<'a, C>,
    commands: Vec<Box<dyn Command + 'a>>,
    command_index: HashMap<String, usize>,
    run: Option<RunCallback<'a, C>>,
}

impl<'a, C> std::fmt::Debug for Parser<'a, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("names", &self.names)
            .field("delimiter", &self.delimiter)
            .field("flags", &self.registry.flags)
            .field("options", &self.registry.options)
            .field("arguments", &self.registry.arguments)
            .field("commands", &self.command_index.keys())
            .finish()
    }
}

impl<'a, C: 'a> Parser<'a, C> {
    /// Create a parser node over an existing configuration instance.
    ///
    /// The first of the `names` is the primary name (the program name, for a root parser).
    /// Names must be non-empty, distinct, and cannot start with `-`.
    pub fn new(
        names: impl IntoIterator<Item = impl Into<String>>,
        config: C,
    ) -> Result<Self, ConfigError> {
        Self::build(names, Some(config), None)
    }

    /// Create a parser node whose configuration is built by `factory`, lazily, right before the first parse.
    ///
    /// ### Example
    /// ```
    /// # use argsparse_core as argsparse;
    /// use argsparse::{Flag, Parser};
    ///
    /// let mut parser = Parser::with_factory(["program"], || vec!["start".to_string()]).unwrap();
    /// parser
    ///     .add_flag(Flag::new(["-x"], |c: &mut Vec<String>| c.push("x".to_string())))
    ///     .unwrap();
    /// assert!(parser.config().is_none());
    ///
    /// parser.parse_tokens(&["-x"]).unwrap();
    /// assert_eq!(parser.config().unwrap(), &vec!["start", "x"]);
    /// ```
    pub fn with_factory(
        names: impl IntoIterator<Item = impl Into<String>>,
        factory: impl Fn() -> C + 'a,
    ) -> Result<Self, ConfigError> {
        Self::build(names, None, Some(Box::new(factory)))
    }

    fn build(
        names: impl IntoIterator<Item = impl Into<String>>,
        config: Option<C>,
        factory: Option<Factory<'a, C>>,
    ) -> Result<Self, ConfigError> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        validate_names(&names)?;

        Ok(Self {
            names,
            description: String::default(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            config,
            factory,
            registry: Registry::default(),
            commands: Vec::default(),
            command_index: HashMap::default(),
            run: None,
        })
    }

    /// Document the parser.
    /// If repeated, only the final description will apply.
    pub fn description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    /// Set the positional delimiter (default `--`): every token after it is positional.
    ///
    /// Fails when a sub-command is already registered under the same name.
    pub fn delimiter(&mut self, delimiter: impl Into<String>) -> Result<&mut Self, ConfigError> {
        let delimiter = delimiter.into();

        if self.command_index.contains_key(&delimiter) {
            return Err(ConfigError::InvalidCommandName(delimiter));
        }

        self.delimiter = delimiter;
        Ok(self)
    }

    /// Register a flag.
    pub fn add_flag(&mut self, flag: Flag<'a, C>) -> Result<&mut Self, ConfigError> {
        self.registry.register_flag(flag)?;
        Ok(self)
    }

    /// Register several flags, stopping at the first failure.
    pub fn add_flags(
        &mut self,
        flags: impl IntoIterator<Item = Flag<'a, C>>,
    ) -> Result<&mut Self, ConfigError> {
        for flag in flags {
            self.registry.register_flag(flag)?;
        }

        Ok(self)
    }

    /// Register an option.
    pub fn add_option(&mut self, option: Opt<'a, C>) -> Result<&mut Self, ConfigError> {
        self.registry.register_option(option)?;
        Ok(self)
    }

    /// Register several options, stopping at the first failure.
    pub fn add_options(
        &mut self,
        options: impl IntoIterator<Item = Opt<'a, C>>,
    ) -> Result<&mut Self, ConfigError> {
        for option in options {
            self.registry.register_option(option)?;
        }

        Ok(self)
    }

    /// Register a positional argument.
    ///
    /// Arguments are matched in registration order.
    /// Nothing may follow an `AllThatFollow` or a non-required argument.
    pub fn add_argument(&mut self, argument: Argument<'a, C>) -> Result<&mut Self, ConfigError> {
        self.registry.register_argument(argument)?;
        Ok(self)
    }

    /// Register several positional arguments, in order, stopping at the first failure.
    pub fn add_arguments(
        &mut self,
        arguments: impl IntoIterator<Item = Argument<'a, C>>,
    ) -> Result<&mut Self, ConfigError> {
        for argument in arguments {
            self.registry.register_argument(argument)?;
        }

        Ok(self)
    }

    /// Mount `command` as a sub-command, selectable by any of its names.
    ///
    /// The sub-command may populate a different configuration type than its parent.
    ///
    /// ### Example
    /// ```
    /// # use argsparse_core as argsparse;
    /// use argsparse::{Argument, Parser};
    ///
    /// let mut total = 0;
    /// let mut add = Parser::new(["add", "a"], 0u32).unwrap();
    /// add.add_argument(Argument::new(
    ///     "VALUE",
    ///     |s: &str| s.parse::<u32>(),
    ///     |c: &mut u32, v: u32| *c += v,
    /// ))
    /// .unwrap()
    /// .on_run(|c, _| total = *c);
    ///
    /// let mut parser = Parser::new(["program"], ()).unwrap();
    /// parser.add_command(add).unwrap();
    ///
    /// let parsed = parser.run_tokens(&["a", "7"]).unwrap();
    /// assert_eq!(parsed.commands, vec!["a"]);
    /// drop(parser);
    /// assert_eq!(total, 7);
    /// ```
    pub fn add_command<D: 'a>(&mut self, command: Parser<'a, D>) -> Result<&mut Self, ConfigError> {
        for name in &command.names {
            if name == &self.delimiter {
                return Err(ConfigError::InvalidCommandName(name.clone()));
            }

            if self.command_index.contains_key(name) {
                return Err(ConfigError::DuplicateCommand(name.clone()));
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Mounting sub-command {:?} under {:?}.", command.names, self.names);
        }

        let index = self.commands.len();
        for name in &command.names {
            self.command_index.insert(name.clone(), index);
        }
        self.commands.push(Box::new(command));
        Ok(self)
    }

    /// Set the callback which [`Parser::run_tokens`] invokes after a complete parse of this node.
    /// If repeated, only the final callback will apply.
    pub fn on_run(&mut self, callback: impl FnMut(&C, &Parser<'a, C>) + 'a) -> &mut Self {
        self.run = Some(Box::new(callback));
        self
    }

    /// The identity names of this parser.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The configuration, once it exists.
    /// A factory based parser has no configuration until its first parse.
    pub fn config(&self) -> Option<&C> {
        self.config.as_ref()
    }

    /// Consume the parser, handing back its configuration (if any).
    pub fn take_config(self) -> Option<C> {
        self.config
    }

    /// A read-only view of this parser and its sub-commands.
    pub fn schema(&self) -> Schema<'_> {
        Schema {
            names: &self.names,
            description: &self.description,
            delimiter: &self.delimiter,
            flags: self.registry.flag_schemas(),
            options: self.registry.option_schemas(),
            arguments: self.registry.argument_schemas(),
            commands: self
                .commands
                .iter()
                .map(|command| command.schema())
                .collect(),
        }
    }

    /// Render help text for this parser with `formatter`.
    pub fn help(&self, formatter: &impl HelpFormatter) -> String {
        formatter.format(&self.schema())
    }

    /// Parse the `tokens` (excluding the program name).
    ///
    /// Sub-commands are resolved first; the remaining tokens are then parsed by the selected node.
    pub fn parse_tokens(&mut self, tokens: &[&str]) -> Result<Parsed, ParseError> {
        self.invoke(tokens, false)
    }

    /// Parse the `tokens` (excluding the program name), then invoke the selected node's [`Parser::on_run`] callback.
    ///
    /// The callback is skipped when a callback halts the parse.
    pub fn run_tokens(&mut self, tokens: &[&str]) -> Result<Parsed, ParseError> {
        self.invoke(tokens, true)
    }

    /// Parse the program's Cli arguments (via [`std::env::args`]).
    pub fn parse_args(&mut self) -> Result<Parsed, ParseError> {
        let command_input: Vec<String> = env::args().skip(1).collect();
        self.parse_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        )
    }

    /// Parse the program's Cli arguments (via [`std::env::args`]), then run.
    /// See [`Parser::run_tokens`].
    pub fn run_args(&mut self) -> Result<Parsed, ParseError> {
        let command_input: Vec<String> = env::args().skip(1).collect();
        self.run_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        )
    }

    fn invoke(&mut self, tokens: &[&str], run: bool) -> Result<Parsed, ParseError> {
        let (commands, remaining) = resolve(&*self, tokens);
        let outcome = self.dispatch(&commands, &remaining, run)?;
        Ok(Parsed { commands, outcome })
    }

    fn execute(&mut self, tokens: &[&str], run: bool) -> Result<Outcome, ParseError> {
        if self.config.is_none() {
            let factory = self
                .factory
                .as_ref()
                .expect("internal error - a parser holds either a config or a factory");
            self.config = Some(factory());
        }

        let config = self
            .config
            .as_mut()
            .expect("internal error - config must be materialized");
        let outcome = self.registry.consume(&self.delimiter, config, tokens)?;

        if run && outcome == Outcome::Complete {
            if let Some(mut callback) = self.run.take() {
                let config = self
                    .config
                    .as_ref()
                    .expect("internal error - config must be materialized");
                callback(config, self);
                self.run = Some(callback);
            }
        }

        Ok(outcome)
    }
}

impl<'a, C: 'a> Command for Parser<'a, C> {
    fn names(&self) -> &[String] {
        Parser::names(self)
    }

    fn schema(&self) -> Schema<'_> {
        Parser::schema(self)
    }

    fn positional_delimiter(&self) -> &str {
        &self.delimiter
    }

    fn find_command(&self, name: &str) -> Option<&dyn Command> {
        self.command_index
            .get(name)
            .map(|index| self.commands[*index].as_ref())
    }

    fn dispatch(
        &mut self,
        path: &[String],
        tokens: &[&str],
        run: bool,
    ) -> Result<Outcome, ParseError> {
        match path.split_first() {
            Some((name, rest)) => {
                let index = *self
                    .command_index
                    .get(name)
                    .expect("internal error - resolved sub-command must exist");
                self.commands[index].dispatch(rest, tokens, run)
            }
            None => self.execute(tokens, run),
        }
    }
}

fn validate_names(names: &[String]) -> Result<(), ConfigError> {
    let reason = if names.is_empty() {
        Some("expected at least one name")
    } else if names.iter().any(String::is_empty) {
        Some("names cannot be empty")
    } else if names.iter().any(|name| name.starts_with('-')) {
        Some("names cannot start with '-'")
    } else if names.iter().collect::<HashSet<_>>().len() != names.len() {
        Some("names must be distinct")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ConfigError::InvalidParserNames {
            names: names.to_vec(),
            reason,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Flow, Multiplicity};
    use crate::parser::RuntimeError;
    use crate::test::assert_contains;
    use rstest::rstest;
    use std::cell::Cell;

    #[derive(Debug, Default, PartialEq, Clone)]
    struct Config {
        verbose: bool,
        value: Option<u32>,
        items: Vec<String>,
    }

    fn parser<'a>() -> Parser<'a, Config> {
        let mut parser = Parser::new(["program"], Config::default()).unwrap();
        parser
            .add_flag(Flag::new(["-v", "--verbose"], |c: &mut Config| c.verbose = true))
            .unwrap()
            .add_option(Opt::new(
                ["--value"],
                |s: &str| s.parse::<u32>(),
                |c: &mut Config, v: u32| c.value = Some(v),
            ))
            .unwrap()
            .add_argument(
                Argument::new(
                    "ITEM",
                    |s: &str| Ok::<String, std::convert::Infallible>(s.to_string()),
                    |c: &mut Config, v: String| c.items.push(v),
                )
                .multiplicity(Multiplicity::AllThatFollow { minimum: 0 }),
            )
            .unwrap();
        parser
    }

    #[rstest]
    #[case(vec![], "expected at least one name")]
    #[case(vec![""], "names cannot be empty")]
    #[case(vec!["program", ""], "names cannot be empty")]
    #[case(vec!["-program"], "names cannot start with '-'")]
    #[case(vec!["a", "b", "a"], "names must be distinct")]
    fn invalid_parser_names(#[case] names: Vec<&str>, #[case] expected: &str) {
        assert_matches!(
            Parser::new(names, ()),
            Err(ConfigError::InvalidParserNames { reason, .. }) => {
                assert_eq!(reason, expected);
            }
        );
    }

    #[test]
    fn parse_tokens() {
        // Setup
        let mut parser = parser();

        // Execute
        let parsed = parser
            .parse_tokens(&["a", "--value", "3", "b", "-v"])
            .unwrap();

        // Verify
        assert_eq!(
            parsed,
            Parsed {
                commands: vec![],
                outcome: Outcome::Complete
            }
        );
        assert_eq!(
            parser.take_config().unwrap(),
            Config {
                verbose: true,
                value: Some(3),
                items: vec!["a".to_string(), "b".to_string()],
            }
        );
    }

    #[test]
    fn plural_registration() {
        // Setup
        let mut parser = Parser::new(["program"], Config::default()).unwrap();

        // Execute
        parser
            .add_flags([
                Flag::new(["-a"], |c: &mut Config| c.items.push("a".to_string())),
                Flag::new(["-b"], |c: &mut Config| c.items.push("b".to_string())),
            ])
            .unwrap()
            .add_options([Opt::new(
                ["-n"],
                |s: &str| s.parse::<u32>(),
                |c: &mut Config, v: u32| c.value = Some(v),
            )])
            .unwrap()
            .add_arguments([Argument::new(
                "X",
                |s: &str| s.parse::<u32>(),
                |c: &mut Config, v: u32| c.value = Some(v * 10),
            )])
            .unwrap();
        parser.parse_tokens(&["-ba", "1"]).unwrap();

        // Verify
        let config = parser.take_config().unwrap();
        assert_eq!(config.items, vec!["b", "a"]);
        assert_eq!(config.value, Some(10));
    }

    #[test]
    fn plural_registration_stops_at_failure() {
        let mut parser = Parser::new(["program"], Config::default()).unwrap();
        let result = parser.add_flags([
            Flag::new(["-a"], |c: &mut Config| c.verbose = true),
            Flag::new(["-a"], |c: &mut Config| c.verbose = true),
            Flag::new(["-b"], |c: &mut Config| c.verbose = true),
        ]);
        assert_matches!(result, Err(ConfigError::NameConflict { .. }));
        assert_eq!(parser.schema().flags.len(), 1);
    }

    #[test]
    fn factory_is_lazy() {
        // Setup
        let calls = Cell::new(0);
        let mut parser = Parser::with_factory(["program"], || {
            calls.set(calls.get() + 1);
            Config::default()
        })
        .unwrap();
        parser
            .add_flag(Flag::new(["-v"], |c: &mut Config| c.verbose = true))
            .unwrap();
        assert_eq!(calls.get(), 0);
        assert_eq!(parser.config(), None);

        // Execute
        parser.parse_tokens(&["-v"]).unwrap();
        parser.parse_tokens(&[]).unwrap();

        // Verify
        assert_eq!(calls.get(), 1);
        assert!(parser.config().unwrap().verbose);
    }

    #[test]
    fn run_callback() {
        // Setup
        let mut runs: Vec<Config> = Vec::default();
        let mut parser = parser();
        parser.on_run(|config, parser| {
            assert_eq!(parser.names(), &["program"]);
            runs.push(config.clone());
        });

        // Execute
        parser.parse_tokens(&["-v"]).unwrap();
        parser.run_tokens(&["--value=1"]).unwrap();
        drop(parser);

        // Verify
        assert_eq!(runs.len(), 1);
        assert!(runs[0].verbose);
        assert_eq!(runs[0].value, Some(1));
    }

    #[test]
    fn run_callback_skipped() {
        // Setup
        let runs = Cell::new(0);
        let mut parser = parser();
        parser
            .add_flag(Flag::new(["-h"], |_: &mut Config| Flow::Halt))
            .unwrap()
            .on_run(|_, _| runs.set(runs.get() + 1));

        // Execute
        let halted = parser.run_tokens(&["-h", "--value"]).unwrap();
        let failed = parser.run_tokens(&["--moot"]);

        // Verify
        assert!(halted.is_halted());
        assert_matches!(
            failed,
            Err(ParseError::Runtime(RuntimeError::UnknownOption(_)))
        );
        assert_eq!(runs.get(), 0);
    }

    #[test]
    fn sub_commands() {
        // Setup
        let mut child_value: Option<u32> = None;
        let root_runs = Cell::new(0);
        let mut child = Parser::new(["child", "c"], 0u32).unwrap();
        child
            .add_option(Opt::new(
                ["--value"],
                |s: &str| s.parse::<u32>(),
                |c: &mut u32, v: u32| *c = v,
            ))
            .unwrap()
            .on_run(|c, _| child_value = Some(*c));
        let mut parser = parser();
        parser
            .add_command(child)
            .unwrap()
            .on_run(|_, _| root_runs.set(root_runs.get() + 1));

        // Execute
        let parsed = parser.run_tokens(&["--value", "5", "c"]).unwrap();

        // Verify
        assert_eq!(parsed.commands, vec!["c"]);
        assert_eq!(parsed.outcome, Outcome::Complete);
        assert_eq!(parser.config(), Some(&Config::default()));
        drop(parser);
        assert_eq!(child_value, Some(5));
        assert_eq!(root_runs.get(), 0);
    }

    #[test]
    fn sub_command_errors() {
        // Setup
        let mut parser = parser();
        parser
            .add_command(Parser::new(["one", "uno"], ()).unwrap())
            .unwrap();

        parser.delimiter("::").unwrap();

        // Execute & Verify
        assert_eq!(
            parser
                .add_command(Parser::new(["two", "uno"], ()).unwrap())
                .unwrap_err(),
            ConfigError::DuplicateCommand("uno".to_string())
        );
        assert_eq!(
            parser
                .add_command(Parser::new(["::"], ()).unwrap())
                .unwrap_err(),
            ConfigError::InvalidCommandName("::".to_string())
        );
        assert_eq!(
            parser.delimiter("one").unwrap_err(),
            ConfigError::InvalidCommandName("one".to_string())
        );
        assert_eq!(parser.schema().commands.len(), 1);
    }

    #[test]
    fn custom_delimiter() {
        // Setup
        let mut parser = parser();
        parser.delimiter("::").unwrap();

        // Execute
        parser.parse_tokens(&["--", "::", "-v", "--value=1"]).unwrap();

        // Verify
        let config = parser.take_config().unwrap();
        assert!(!config.verbose);
        assert_eq!(config.items, vec!["--", "-v", "--value=1"]);
    }

    #[test]
    fn schema() {
        // Setup
        let mut parser = parser();
        parser.description("A program.");
        let mut child = Parser::new(["child"], ()).unwrap();
        child.description("A child.");
        parser.add_command(child).unwrap();

        // Execute
        let schema = parser.schema();

        // Verify
        assert_eq!(schema.name(), "program");
        assert_eq!(schema.description, "A program.");
        assert_eq!(schema.delimiter, "--");
        assert_eq!(schema.flags.len(), 1);
        assert_eq!(schema.options.len(), 1);
        assert_eq!(schema.arguments.len(), 1);
        assert_eq!(schema.commands.len(), 1);
        assert_eq!(schema.commands[0].name(), "child");
        assert_eq!(schema.commands[0].description, "A child.");
    }

    struct Listing;

    impl HelpFormatter for Listing {
        fn format(&self, schema: &Schema<'_>) -> String {
            let mut parts = vec![schema.name().to_string()];
            parts.extend(schema.flags.iter().map(|f| f.names.join("/")));
            parts.extend(schema.options.iter().map(|o| o.placeholder.to_string()));
            parts.extend(schema.arguments.iter().map(|a| a.placeholder.to_string()));
            parts.join(" ")
        }
    }

    #[test]
    fn help() {
        let parser = parser();
        let help = parser.help(&Listing);
        assert_eq!(help, "program -v/--verbose VALUE ITEM");
        assert_contains!(format!("{parser:?}"), "Flag[-v/--verbose]");
    }
}
