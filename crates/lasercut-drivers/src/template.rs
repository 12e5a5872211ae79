//! Comma separated G-code templates
//!
//! Pre- and post-job sequences are stored as one string of commands
//! separated by commas, e.g. `G21,G90,G28 XY,M5`. Driver variants adjust
//! the defaults they inherit by cutting known fragments out of that string.

/// Remove the first occurrence of `fragment` from `template`.
///
/// Returns the template unchanged when the fragment is absent.
pub fn remove_fragment(template: &str, fragment: &str) -> String {
    match template.find(fragment) {
        Some(start) => {
            let mut result = String::with_capacity(template.len() - fragment.len());
            result.push_str(&template[..start]);
            result.push_str(&template[start + fragment.len()..]);
            result
        }
        None => {
            tracing::debug!("Template fragment '{}' not found in '{}'", fragment, template);
            template.to_string()
        }
    }
}

/// Split a template into trimmed, non-empty commands.
pub fn commands(template: &str) -> Vec<String> {
    template
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
