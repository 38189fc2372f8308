/// The lexical class of one raw Cli token.
///
/// Classification is purely lexical; whether a name is actually registered is decided downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'t> {
    /// The positional delimiter itself (produces no value).
    Delimiter,
    /// `--name` or `--name=value`.
    /// The `name` keeps its `--` prefix, matching how names are registered.
    Long {
        name: &'t str,
        value: Option<&'t str>,
    },
    /// `-x`, `-xyz` or `-xyz=value`.
    /// The `cluster` is the run of letters without the leading `-`.
    Short {
        cluster: &'t str,
        value: Option<&'t str>,
    },
    /// Anything else, or any token after the delimiter.
    Positional(&'t str),
}

/// Expand a short cluster into the registered names it refers to (ex: `"ab"` -> `["-a", "-b"]`).
pub(crate) fn short_names(cluster: &str) -> Vec<String> {
    cluster.chars().map(|c| format!("-{c}")).collect()
}
