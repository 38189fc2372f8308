use crate::prelude::Command;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Split the `tokens` into the selected sub-command path and the tokens left for the selected node.
///
/// Resolution completes before any option or argument is interpreted.
/// Matching stops at the selected node's positional delimiter, which is passed through along with everything after it.
pub(crate) fn resolve<'t>(root: &dyn Command, tokens: &[&'t str]) -> (Vec<String>, Vec<&'t str>) {
    let mut path = Vec::default();
    let mut remaining = Vec::default();
    let mut selected = root;
    let mut token_iter = tokens.iter();

    while let Some(&token) = token_iter.next() {
        if token == selected.positional_delimiter() {
            remaining.push(token);
            remaining.extend(token_iter.by_ref());
            break;
        }

        match selected.find_command(token) {
            Some(command) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Selected sub-command '{token}'.");
                }
                path.push(token.to_string());
                selected = command;
            }
            None => remaining.push(token),
        }
    }

    (path, remaining)
}
