/// The positional delimiter used when a parser does not configure its own.
pub(crate) const DEFAULT_DELIMITER: &str = "--";
