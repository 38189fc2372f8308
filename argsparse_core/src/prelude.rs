//! Traits which, typically, may be imported without concern: `use argsparse::prelude::*`.

use crate::model::Outcome;
use crate::parser::{ParseError, Schema};

/// A parser node that may be mounted as a sub-command, regardless of its configuration type.
///
/// Implemented by every [`Parser`](crate::Parser); there is no need to implement it by hand.
pub trait Command {
    /// The identity names of this node.
    fn names(&self) -> &[String];

    /// A read-only view of this node and its sub-commands.
    fn schema(&self) -> Schema<'_>;

    #[doc(hidden)]
    fn positional_delimiter(&self) -> &str;

    #[doc(hidden)]
    fn find_command(&self, name: &str) -> Option<&dyn Command>;

    #[doc(hidden)]
    fn dispatch(
        &mut self,
        path: &[String],
        tokens: &[&str],
        run: bool,
    ) -> Result<Outcome, ParseError>;
}

/// Behaviour to render help text from a parser [`Schema`].
// Needs to be imported in order to implement a custom `HelpFormatter`.
pub trait HelpFormatter {
    /// Render the `schema`.
    fn format(&self, schema: &Schema<'_>) -> String;
}
