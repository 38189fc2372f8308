//! `argsparse` is a callback driven command line parser for Rust.
//!
//! A parser is declared up front, as a set of *flags*, *options*, positional *arguments* and *sub-commands*.
//! Parsing then walks the Cli tokens once, converting each value and handing it to a callback which populates a configuration type of your choosing.
//! `argsparse` prioritizes the following design concerns:
//! * *Fail fast configuration*:
//! Every registration is checked immediately (ex: a repeated name), returning a [`ConfigError`].
//! * *Eager callbacks*:
//! Each callback runs the moment its token is matched, in Cli order.
//! * *Precise errors*:
//! Bad Cli input is reported as a [`ParseError`], which is either a [`RuntimeError`] or a [`ConversionError`].
//! Missing required options/arguments are reported together.
//! * *No rendering*:
//! The parser exposes its [`Schema`]; producing help text is left to a [`HelpFormatter`](prelude::HelpFormatter).
//!
//! # Usage
//! ```
//! use argsparse::{Argument, Flag, Flow, Multiplicity, Opt, Parser};
//!
//! #[derive(Debug, Default)]
//! struct Config {
//!     help: bool,
//!     verbose: bool,
//!     base: u32,
//!     items: Vec<u32>,
//! }
//!
//! let mut parser = Parser::new(["summer"], Config::default()).unwrap();
//! parser
//!     .description("Sum the items.")
//!     .add_flag(Flag::new(["-h", "--help"], |c: &mut Config| {
//!         c.help = true;
//!         Flow::Halt
//!     }))
//!     .unwrap()
//!     .add_flag(Flag::new(["-v", "--verbose"], |c: &mut Config| c.verbose = true))
//!     .unwrap()
//!     .add_option(
//!         Opt::new(
//!             ["-b", "--base"],
//!             |s: &str| s.parse::<u32>(),
//!             |c: &mut Config, v: u32| c.base = v,
//!         )
//!         .placeholder("N")
//!         .description("The starting total."),
//!     )
//!     .unwrap()
//!     .add_argument(
//!         Argument::new(
//!             "ITEM",
//!             |s: &str| s.parse::<u32>(),
//!             |c: &mut Config, v: u32| c.items.push(v),
//!         )
//!         .multiplicity(Multiplicity::AllThatFollow { minimum: 1 }),
//!     )
//!     .unwrap();
//!
//! parser.parse_tokens(&["-vb", "10", "1", "2", "3"]).unwrap();
//!
//! let config = parser.take_config().unwrap();
//! assert!(config.verbose);
//! assert_eq!(config.base + config.items.iter().sum::<u32>(), 16);
//! ```
//!
//! # Cli syntax
//! * Flags take no value: `--verbose` or `-v`.
//! Short flags may be clustered: `-abc` is `-a -b -c`.
//! * Options take exactly one value, either attached or as the following token:
//! `--base=10`, `--base 10`, `-b=10`, `-b 10`.
//! Only the final character of a short cluster may take a value (ex: `-vb 10`).
//! The following token is taken as the value verbatim, even if it looks like an option.
//! * A flag or option may appear at most once.
//! * Every other token is positional.
//! The positional delimiter (default `--`, see [`Parser::delimiter`]) forces every following token to be positional.
//!
//! # Arguments
//! Arguments are matched by position, in registration order.
//! Each has a [`Multiplicity`]:
//! * `SpecificCount { count, required }`: exactly `count` tokens; when not required, also none at all.
//! * `AllThatFollow { minimum }`: every remaining positional token, at least `minimum` of them.
//!
//! Nothing may be registered after an `AllThatFollow` or a non-required argument.
//!
//! # Early termination
//! Every callback may return a [`Flow`]; returning `()` continues.
//! A callback returning [`Flow::Halt`] stops the parse immediately: no further tokens are processed, and required options/arguments are not checked.
//! This is how a `--help` style flag is expressed.
//!
//! ```
//! use argsparse::{Argument, Flag, Flow, Opt, Parser};
//!
//! let mut parser = Parser::new(["program"], false).unwrap();
//! parser
//!     .add_flag(Flag::new(["-h", "--help"], |help: &mut bool| {
//!         *help = true;
//!         Flow::Halt
//!     }))
//!     .unwrap()
//!     .add_option(
//!         Opt::new(["-s"], |s: &str| s.parse::<u32>(), |_: &mut bool, _: u32| {}).required(),
//!     )
//!     .unwrap()
//!     .add_argument(Argument::new("X", |s: &str| s.parse::<u32>(), |_: &mut bool, _: u32| {}))
//!     .unwrap();
//!
//! let parsed = parser.parse_tokens(&["--help"]).unwrap();
//! assert!(parsed.is_halted());
//! assert_eq!(parser.config(), Some(&true));
//! ```
//!
//! # Sub-commands
//! Any [`Parser`] may be mounted on another with [`Parser::add_command`], under each of its names.
//! Sub-commands are resolved before anything else: the tokens are scanned once, and every token naming a sub-command of the currently selected parser selects it.
//! Resolution stops at the selected parser's positional delimiter.
//! The remaining tokens are then parsed by the finally selected parser alone.
//!
//! ```
//! use argsparse::{Flag, Parser};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Build {
//!     release: bool,
//! }
//!
//! let mut release = false;
//! let mut build = Parser::new(["build", "b"], Build::default()).unwrap();
//! build
//!     .add_flag(Flag::new(["-r", "--release"], |c: &mut Build| c.release = true))
//!     .unwrap()
//!     .on_run(|c, _| release = c.release);
//!
//! let mut parser = Parser::new(["cargo"], ()).unwrap();
//! parser.add_command(build).unwrap();
//!
//! let parsed = parser.run_tokens(&["--release", "b"]).unwrap();
//! assert_eq!(parsed.commands, vec!["b"]);
//! drop(parser);
//! assert!(release);
//! ```
//!
//! # Errors
//! * [`ConfigError`]: a broken parser definition, returned by the registration methods.
//! * [`ParseError`]: bad Cli input, returned by the parse methods.
//! When a parse fails, callbacks invoked before the failure have already taken effect.
//!
//! # Logging
//! Enable the `tracing_debug` feature to record registration, classification and resolution decisions via `tracing::debug!`.
#![deny(missing_docs)]

pub use argsparse_core::*;
