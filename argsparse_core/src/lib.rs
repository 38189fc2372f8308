//! Engine module for `argsparse`.
//! See [documentation root](https://docs.rs/argsparse/latest/argsparse/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;
pub mod prelude;

pub use api::*;
pub use model::*;
pub use parser::{
    ArgumentSchema, BoxError, ConfigError, ConversionError, FlagSchema, OptionSchema, ParseError,
    RuntimeError, Schema,
};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
