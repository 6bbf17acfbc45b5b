use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;
use tracing::trace;

lazy_static! {
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\{\{([A-Za-z_][A-Za-z0-9_]*)\}\}").expect("placeholder pattern is valid");
}

/// Replaces every `{{name}}` with the value bound to `name`
///
/// Placeholders with no bound variable are left as written. Substitution is
/// a single left-to-right pass, so a value that itself contains `{{other}}`
/// is inserted literally and not expanded again.
pub fn render_template(template: &str, variables: &HashMap<String, String>) -> String {
    if !template.contains("{{") {
        return template.to_string();
    }

    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match variables.get(&caps[1]) {
            Some(value) => {
                trace!(name = &caps[1], "substituted placeholder");
                value.clone()
            }
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_substitutes_every_occurrence() {
        let v = vars(&[("name", "Alice")]);
        assert_eq!(
            render_template("hi {{name}}, bye {{name}}", &v),
            "hi Alice, bye Alice"
        );
    }

    #[test]
    fn test_unknown_placeholder_left_verbatim() {
        let v = vars(&[("name", "Alice")]);
        assert_eq!(
            render_template("{{name}} ordered {{item}}", &v),
            "Alice ordered {{item}}"
        );
    }

    #[test]
    fn test_spaced_placeholder_is_not_a_placeholder() {
        let v = vars(&[("name", "Alice")]);
        assert_eq!(render_template("{{ name }}", &v), "{{ name }}");
    }

    #[test]
    fn test_substituted_value_is_not_expanded() {
        let v = vars(&[("a", "{{b}}"), ("b", "x")]);
        assert_eq!(render_template("{{a}}-{{b}}", &v), "{{b}}-x");
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(render_template("no placeholders", &HashMap::new()), "no placeholders");
    }
}
