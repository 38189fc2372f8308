use std::collections::HashSet;
use std::slice::Iter;

use crate::api::display_names;
use crate::matcher::{short_names, ArgumentCursor, Classifier, Token};
use crate::model::{Flow, Outcome};
use crate::parser::{ConversionError, ParseError, Registry, RuntimeError, Target};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

// Per-call tracking; rebuilt on every parse.
struct Progress {
    flags: HashSet<usize>,
    options: HashSet<usize>,
    counts: Vec<usize>,
}

impl Progress {
    fn new(arguments: usize) -> Self {
        Self {
            flags: HashSet::default(),
            options: HashSet::default(),
            counts: vec![0; arguments],
        }
    }
}

impl<'a, C> Registry<'a, C> {
    /// Walk the `tokens`, invoking each matched callback against `config` as soon as it is matched.
    ///
    /// Stops at the first error, leaving `config` with whatever the earlier callbacks have applied.
    pub(crate) fn consume(
        &mut self,
        delimiter: &str,
        config: &mut C,
        tokens: &[&str],
    ) -> Result<Outcome, ParseError> {
        let mut classifier = Classifier::new(delimiter);
        let mut cursor = ArgumentCursor::new(
            self.arguments
                .iter()
                .map(|argument| argument.multiplicity)
                .collect(),
        );
        let mut progress = Progress::new(self.arguments.len());
        let mut token_iter = tokens.iter();

        while let Some(&token) = token_iter.next() {
            let flow = match classifier.classify(token) {
                Token::Delimiter => Flow::Continue,
                Token::Long { name, value } => {
                    self.dispatch_long(token, name, value, &mut token_iter, &mut progress, config)?
                }
                Token::Short { cluster, value } => self.dispatch_short(
                    token,
                    cluster,
                    value,
                    &mut token_iter,
                    &mut progress,
                    config,
                )?,
                Token::Positional(value) => {
                    self.dispatch_positional(value, &mut cursor, &mut progress, config)?
                }
            };

            if flow == Flow::Halt {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Halted at '{token}'.");
                }
                return Ok(Outcome::Halted);
            }
        }

        self.validate(&progress)?;
        Ok(Outcome::Complete)
    }

    fn dispatch_long(
        &mut self,
        token: &str,
        name: &str,
        value: Option<&str>,
        remaining: &mut Iter<&str>,
        progress: &mut Progress,
        config: &mut C,
    ) -> Result<Flow, ParseError> {
        match (self.lookup(name), value) {
            (None, _) => Err(RuntimeError::UnknownOption(name.to_string()).into()),
            (Some(Target::Flag(_)), Some(_)) => Err(RuntimeError::FlagWithValue {
                name: name.to_string(),
                token: token.to_string(),
            }
            .into()),
            (Some(Target::Flag(index)), None) => self.invoke_flag(index, name, progress, config),
            (Some(Target::Option(index)), Some(value)) => {
                if value.is_empty() {
                    return Err(RuntimeError::MissingValue(token.to_string()).into());
                }

                self.invoke_option(index, name, value, progress, config)
            }
            (Some(Target::Option(index)), None) => {
                let value = remaining
                    .next()
                    .copied()
                    .ok_or_else(|| RuntimeError::RequiresValue(name.to_string()))?;
                self.invoke_option(index, name, value, progress, config)
            }
        }
    }

    fn dispatch_short(
        &mut self,
        token: &str,
        cluster: &str,
        value: Option<&str>,
        remaining: &mut Iter<&str>,
        progress: &mut Progress,
        config: &mut C,
    ) -> Result<Flow, ParseError> {
        let names = short_names(cluster);
        let last = names.len() - 1;
        let mut targets = Vec::with_capacity(names.len());

        // Resolve the entire cluster before invoking anything.
        for (position, name) in names.iter().enumerate() {
            match self.lookup(name) {
                None => return Err(RuntimeError::UnknownOption(name.clone()).into()),
                Some(Target::Option(_)) if position != last => {
                    return Err(RuntimeError::MergedOptions {
                        name: name.clone(),
                        token: token.to_string(),
                    }
                    .into());
                }
                Some(Target::Option(_)) if value == Some("") => {
                    return Err(RuntimeError::MissingValue(token.to_string()).into());
                }
                Some(Target::Flag(_)) if position == last && value.is_some() => {
                    return Err(RuntimeError::FlagWithValue {
                        name: name.clone(),
                        token: token.to_string(),
                    }
                    .into());
                }
                Some(target) => targets.push(target),
            }
        }

        for (name, target) in names.iter().zip(targets) {
            let flow = match target {
                Target::Flag(index) => self.invoke_flag(index, name, progress, config)?,
                Target::Option(index) => {
                    let value = match value {
                        Some(value) => value,
                        None => remaining
                            .next()
                            .copied()
                            .ok_or_else(|| RuntimeError::RequiresValue(name.clone()))?,
                    };
                    self.invoke_option(index, name, value, progress, config)?
                }
            };

            if flow == Flow::Halt {
                return Ok(Flow::Halt);
            }
        }

        Ok(Flow::Continue)
    }

    fn dispatch_positional(
        &mut self,
        value: &str,
        cursor: &mut ArgumentCursor,
        progress: &mut Progress,
        config: &mut C,
    ) -> Result<Flow, ParseError> {
        let index = cursor
            .advance()
            .ok_or_else(|| RuntimeError::TooManyArguments(value.to_string()))?;
        progress.counts[index] += 1;
        let argument = &mut self.arguments[index];
        (argument.capture)(config, value).map_err(|source| {
            ParseError::from(ConversionError {
                name: argument.placeholder.clone(),
                token: value.to_string(),
                source,
            })
        })
    }

    fn invoke_flag(
        &mut self,
        index: usize,
        name: &str,
        progress: &mut Progress,
        config: &mut C,
    ) -> Result<Flow, ParseError> {
        if !progress.flags.insert(index) {
            return Err(RuntimeError::RepeatedOption(name.to_string()).into());
        }

        Ok((self.flags[index].capture)(config))
    }

    fn invoke_option(
        &mut self,
        index: usize,
        name: &str,
        value: &str,
        progress: &mut Progress,
        config: &mut C,
    ) -> Result<Flow, ParseError> {
        if !progress.options.insert(index) {
            return Err(RuntimeError::RepeatedOption(name.to_string()).into());
        }

        (self.options[index].capture)(config, value).map_err(|source| {
            ParseError::from(ConversionError {
                name: name.to_string(),
                token: value.to_string(),
                source,
            })
        })
    }

    fn validate(&self, progress: &Progress) -> Result<(), RuntimeError> {
        let options: Vec<String> = self
            .options
            .iter()
            .enumerate()
            .filter(|(index, option)| option.required && !progress.options.contains(index))
            .map(|(_, option)| display_names(&option.names))
            .collect();
        let arguments: Vec<String> = self
            .arguments
            .iter()
            .zip(progress.counts.iter())
            .filter(|(argument, count)| !argument.multiplicity.is_satisfied(**count))
            .map(|(argument, _)| argument.placeholder.clone())
            .collect();

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Validated: missing options {options:?}, missing arguments {arguments:?}.");
        }

        if options.is_empty() && arguments.is_empty() {
            Ok(())
        } else {
            Err(RuntimeError::MissingRequired { options, arguments })
        }
    }
}
