/// How many positional tokens one [`Argument`](crate::Argument) consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    /// Precisely `count` tokens.
    /// When not `required`, the argument may also be absent entirely (zero tokens).
    SpecificCount {
        /// The number of tokens; must be positive.
        count: usize,
        /// Whether the argument must be present.
        required: bool,
    },
    /// Every remaining positional token, but at least `minimum` of them.
    AllThatFollow {
        /// The least number of tokens to accept.
        minimum: usize,
    },
}

impl Default for Multiplicity {
    fn default() -> Self {
        Multiplicity::SpecificCount {
            count: 1,
            required: true,
        }
    }
}

impl Multiplicity {
    /// Whether `consumed` tokens satisfy this multiplicity at the end of a parse.
    pub(crate) fn is_satisfied(&self, consumed: usize) -> bool {
        match self {
            Multiplicity::SpecificCount { count, required } => {
                consumed == *count || (!required && consumed == 0)
            }
            Multiplicity::AllThatFollow { minimum } => consumed >= *minimum,
        }
    }
}

impl std::fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Multiplicity::SpecificCount {
                count,
                required: true,
            } => write!(f, "{count}"),
            Multiplicity::SpecificCount {
                count,
                required: false,
            } => write!(f, "{count} (optional)"),
            Multiplicity::AllThatFollow { minimum } => {
                write!(f, "all that follow (min {minimum})")
            }
        }
    }
}

/// The control-flow signal returned by every flag, option and argument callback.
///
/// Callbacks returning `()` implicitly continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// Keep parsing.
    #[default]
    Continue,
    /// Stop parsing immediately; skip end-of-parse validation and the run callback.
    /// Typical for `--help` or `--version` style flags.
    Halt,
}

impl From<()> for Flow {
    fn from(_: ()) -> Self {
        Flow::Continue
    }
}

/// How a successful parse ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// All tokens were consumed and validated.
    Complete,
    /// A callback returned [`Flow::Halt`].
    Halted,
}

/// The result of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    /// The sub-command names selected during parsing, outermost first.
    pub commands: Vec<String>,
    /// How the parse ended.
    pub outcome: Outcome,
}

impl Parsed {
    /// Whether a callback halted the parse.
    pub fn is_halted(&self) -> bool {
        self.outcome == Outcome::Halted
    }
}
