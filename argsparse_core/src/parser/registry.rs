use std::collections::{HashMap, HashSet};

use crate::api::{display_names, Argument, Flag, Opt};
use crate::matcher::is_option_name;
use crate::model::Multiplicity;
use crate::parser::{ArgumentSchema, ConfigError, FlagSchema, OptionSchema};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// What a registered flag/option name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Flag(usize),
    Option(usize),
}

/// The flags, options and arguments of a single parser node.
///
/// Every check happens at registration, so a `Registry` is always internally consistent.
pub(crate) struct Registry<'a, C> {
    pub(crate) flags: Vec<Flag<'a, C>>,
    pub(crate) options: Vec<Opt<'a, C>>,
    pub(crate) arguments: Vec<Argument<'a, C>>,
    names: HashMap<String, Target>,
}

impl<'a, C> Default for Registry<'a, C> {
    fn default() -> Self {
        Self {
            flags: Vec::default(),
            options: Vec::default(),
            arguments: Vec::default(),
            names: HashMap::default(),
        }
    }
}

impl<'a, C> Registry<'a, C> {
    pub(crate) fn register_flag(&mut self, flag: Flag<'a, C>) -> Result<(), ConfigError> {
        self.check_names(&flag.names, "flag")?;
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Registering {flag:?}.");
        }

        let target = Target::Flag(self.flags.len());
        self.claim(&flag.names, target);
        self.flags.push(flag);
        Ok(())
    }

    pub(crate) fn register_option(&mut self, option: Opt<'a, C>) -> Result<(), ConfigError> {
        self.check_names(&option.names, "option")?;
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Registering {option:?}.");
        }

        let target = Target::Option(self.options.len());
        self.claim(&option.names, target);
        self.options.push(option);
        Ok(())
    }

    pub(crate) fn register_argument(&mut self, argument: Argument<'a, C>) -> Result<(), ConfigError> {
        if let Multiplicity::SpecificCount { count: 0, .. } = argument.multiplicity {
            return Err(ConfigError::InvalidMultiplicity {
                argument: argument.placeholder.clone(),
                multiplicity: argument.multiplicity.to_string(),
            });
        }

        if let Some(predecessor) = self.arguments.last() {
            let reason = match predecessor.multiplicity {
                Multiplicity::AllThatFollow { .. } => Some("it consumes all that follow"),
                Multiplicity::SpecificCount {
                    required: false, ..
                } => Some("it is not required"),
                Multiplicity::SpecificCount { required: true, .. } => None,
            };

            if let Some(reason) = reason {
                return Err(ConfigError::ArgumentOrder {
                    argument: argument.placeholder.clone(),
                    predecessor: predecessor.placeholder.clone(),
                    reason,
                });
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Registering {argument:?}.");
        }

        self.arguments.push(argument);
        Ok(())
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<Target> {
        self.names.get(name).copied()
    }

    pub(crate) fn flag_schemas(&self) -> Vec<FlagSchema<'_>> {
        self.flags
            .iter()
            .map(|flag| FlagSchema {
                names: &flag.names,
                description: &flag.description,
            })
            .collect()
    }

    pub(crate) fn option_schemas(&self) -> Vec<OptionSchema<'_>> {
        self.options
            .iter()
            .map(|option| OptionSchema {
                names: &option.names,
                description: &option.description,
                placeholder: &option.placeholder,
                required: option.required,
            })
            .collect()
    }

    pub(crate) fn argument_schemas(&self) -> Vec<ArgumentSchema<'_>> {
        self.arguments
            .iter()
            .map(|argument| ArgumentSchema {
                placeholder: &argument.placeholder,
                description: &argument.description,
                multiplicity: argument.multiplicity,
            })
            .collect()
    }

    fn check_names(&self, names: &[String], kind: &str) -> Result<(), ConfigError> {
        if names.is_empty() {
            return Err(ConfigError::EmptyNames {
                entity: kind.to_string(),
            });
        }

        let invalid: Vec<String> = names
            .iter()
            .filter(|name| !is_option_name(name))
            .cloned()
            .collect();

        if !invalid.is_empty() {
            return Err(ConfigError::InvalidNames { names: invalid });
        }

        let entity = format!("{kind} '{}'", display_names(names));
        let mut seen = HashSet::new();
        let mut duplicates: Vec<String> = Vec::default();

        for name in names {
            if !seen.insert(name) && !duplicates.contains(name) {
                duplicates.push(name.clone());
            }
        }

        if !duplicates.is_empty() {
            return Err(ConfigError::DuplicateNames {
                names: duplicates,
                entity,
            });
        }

        for name in names {
            if let Some(target) = self.lookup(name) {
                return Err(ConfigError::NameConflict {
                    name: name.clone(),
                    entity,
                    existing: self.describe(target),
                });
            }
        }

        Ok(())
    }

    fn claim(&mut self, names: &[String], target: Target) {
        for name in names {
            self.names.insert(name.clone(), target);
        }
    }

    fn describe(&self, target: Target) -> String {
        match target {
            Target::Flag(index) => self.flags[index].to_string(),
            Target::Option(index) => self.options[index].to_string(),
        }
    }
}
