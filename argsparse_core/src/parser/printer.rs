use crate::model::Multiplicity;

/// A read-only view of one parser node, handed to a [`HelpFormatter`](crate::prelude::HelpFormatter).
///
/// The library performs no rendering of its own; formatting the view is entirely up to the formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema<'s> {
    /// The identity names of the node; the first is the primary (program or command) name.
    pub names: &'s [String],
    /// The node description.
    pub description: &'s str,
    /// The positional delimiter of the node.
    pub delimiter: &'s str,
    /// The flags, in registration order.
    pub flags: Vec<FlagSchema<'s>>,
    /// The options, in registration order.
    pub options: Vec<OptionSchema<'s>>,
    /// The arguments, in positional order.
    pub arguments: Vec<ArgumentSchema<'s>>,
    /// The sub-commands, in registration order.
    pub commands: Vec<Schema<'s>>,
}

impl<'s> Schema<'s> {
    /// The primary name of the node.
    pub fn name(&self) -> &'s str {
        self.names
            .first()
            .map(String::as_str)
            .expect("internal error - a parser always has at least one name")
    }
}

/// A read-only view of a flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSchema<'s> {
    /// The flag names.
    pub names: &'s [String],
    /// The flag description.
    pub description: &'s str,
}

/// A read-only view of an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSchema<'s> {
    /// The option names.
    pub names: &'s [String],
    /// The option description.
    pub description: &'s str,
    /// The label of the option value.
    pub placeholder: &'s str,
    /// Whether the option must be given.
    pub required: bool,
}

/// A read-only view of a positional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSchema<'s> {
    /// The argument label.
    pub placeholder: &'s str,
    /// The argument description.
    pub description: &'s str,
    /// How many tokens the argument takes.
    pub multiplicity: Multiplicity,
}
