use crate::model::Flow;
use crate::parser::BoxError;

// We need a (dyn .. [ignoring V] ..) here in order to put every option/argument of varying value types V under one collection.
// The typed converter and callback are bound together at construction, leaving only the configuration type C visible.
pub(crate) type FlagCapture<'a, C> = Box<dyn FnMut(&mut C) -> Flow + 'a>;
pub(crate) type ValueCapture<'a, C> = Box<dyn FnMut(&mut C, &str) -> Result<Flow, BoxError> + 'a>;

pub(crate) fn bind_flag<'a, C, A, R>(mut action: A) -> FlagCapture<'a, C>
where
    A: FnMut(&mut C) -> R + 'a,
    R: Into<Flow>,
{
    Box::new(move |config: &mut C| action(config).into())
}

/// Bind a converter `&str -> V` to a callback `(C, V)`.
///
/// Only a converter failure surfaces as an error; the callback always runs once conversion succeeds.
pub(crate) fn bind_value<'a, C, V, E, F, A, R>(converter: F, mut action: A) -> ValueCapture<'a, C>
where
    F: Fn(&str) -> Result<V, E> + 'a,
    E: Into<BoxError>,
    A: FnMut(&mut C, V) -> R + 'a,
    R: Into<Flow>,
{
    Box::new(move |config: &mut C, token: &str| {
        let value = converter(token).map_err(Into::<BoxError>::into)?;
        Ok(action(config, value).into())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn flag_unit_continues() {
        let mut capture = bind_flag(|count: &mut u32| *count += 1);
        let mut count = 0;
        assert_eq!(capture(&mut count), Flow::Continue);
        assert_eq!(capture(&mut count), Flow::Continue);
        assert_eq!(count, 2);
    }

    #[test]
    fn flag_halts() {
        let mut capture = bind_flag(|_: &mut u32| Flow::Halt);
        assert_eq!(capture(&mut 0), Flow::Halt);
    }

    #[test]
    fn value_converts() {
        let mut capture = bind_value(|s: &str| s.parse::<u32>(), |total: &mut u32, v: u32| {
            *total += v
        });
        let mut total = 1;
        assert_eq!(capture(&mut total, "41").unwrap(), Flow::Continue);
        assert_eq!(total, 42);
    }

    #[test]
    fn value_conversion_fails() {
        let mut called = false;
        {
            let mut capture = bind_value(|s: &str| s.parse::<u32>(), |_: &mut (), _: u32| {
                called = true;
            });
            let error = capture(&mut (), "not-u32").unwrap_err();
            assert_eq!(error.to_string(), "invalid digit found in string");
        }
        assert!(!called);
    }

    #[test]
    fn value_string_errors() {
        let mut capture = bind_value(
            |s: &str| {
                if s.is_empty() {
                    Err("empty".to_string())
                } else {
                    Ok(s.len())
                }
            },
            |length: &mut usize, v: usize| *length = v,
        );
        let mut length = 0;
        capture(&mut length, "abc").unwrap();
        assert_eq!(length, 3);
        assert_eq!(capture(&mut length, "").unwrap_err().to_string(), "empty");
    }

    #[test]
    fn value_infallible() {
        let mut capture = bind_value(
            |s: &str| Ok::<String, Infallible>(s.to_string()),
            |out: &mut String, v: String| {
                out.push_str(&v);
                Flow::Halt
            },
        );
        let mut out = String::default();
        assert_eq!(capture(&mut out, "x").unwrap(), Flow::Halt);
        assert_eq!(out, "x");
    }
}
