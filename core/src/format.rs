//! Message templates.
//!
//! Two placeholder styles are supported: positional `%s` (used by the
//! precondition helpers) and named `{name}` (used by
//! [`ValidationError`](crate::ValidationError) reasons). In both styles
//! arguments that no placeholder consumed are appended in square
//! brackets, so no information is silently dropped.

use std::fmt::Display;

/// Substitutes each `%s` in `template` with the next argument.
///
/// Surplus arguments are appended as ` [a, b]`; surplus placeholders are
/// left as-is.
///
/// # Examples
///
/// ```
/// use odt_commons_core::format_template;
///
/// assert_eq!(format_template("a%sc", &["b"]), "abc");
/// assert_eq!(format_template("%s and %s", &[1]), "1 and %s");
/// assert_eq!(format_template("x", &[1, 2]), "x [1, 2]");
/// ```
pub fn format_template<T: Display>(template: &str, args: &[T]) -> String {
    let mut result = String::with_capacity(template.len() + 16 * args.len());
    let mut rest = template;
    let mut args = args.iter();
    let mut next = args.next();

    while let Some(arg) = next {
        let Some(pos) = rest.find("%s") else {
            break;
        };
        result.push_str(&rest[..pos]);
        result.push_str(&arg.to_string());
        rest = &rest[pos + 2..];
        next = args.next();
    }
    result.push_str(rest);

    if let Some(first) = next {
        result.push_str(" [");
        result.push_str(&first.to_string());
        for arg in args {
            result.push_str(", ");
            result.push_str(&arg.to_string());
        }
        result.push(']');
    }

    result
}

/// Substitutes `{name}` tokens from `args`, also accepting `{0}`, `{1}`...
/// to address arguments by position.
///
/// Unknown tokens and unclosed braces are kept verbatim. Arguments no
/// token referred to are appended as ` [name=value, ...]`.
pub(crate) fn interpolate_named(template: &str, args: &[(&str, String)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut used = vec![false; args.len()];
    let mut chars = template.chars();

    while let Some(ch) = chars.next() {
        if ch != '{' {
            result.push(ch);
            continue;
        }

        let mut token = String::new();
        let mut closed = false;
        for c in chars.by_ref() {
            if c == '}' {
                closed = true;
                break;
            }
            token.push(c);
        }

        if !closed {
            result.push('{');
            result.push_str(&token);
            break;
        }

        let index = args
            .iter()
            .position(|(name, _)| *name == token)
            .or_else(|| token.parse::<usize>().ok().filter(|&i| i < args.len()));
        match index {
            Some(i) => {
                used[i] = true;
                result.push_str(&args[i].1);
            }
            None => {
                result.push('{');
                result.push_str(&token);
                result.push('}');
            }
        }
    }

    let unused: Vec<String> = args
        .iter()
        .zip(&used)
        .filter(|(_, used)| !**used)
        .map(|((name, value), _)| format!("{name}={value}"))
        .collect();
    if !unused.is_empty() {
        result.push_str(" [");
        result.push_str(&unused.join(", "));
        result.push(']');
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&'static str, &str)]) -> Vec<(&'static str, String)> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn test_format_template_no_args() {
        assert_eq!(format_template::<&str>("plain %s", &[]), "plain %s");
    }

    #[test]
    fn test_format_template_surplus_args() {
        assert_eq!(format_template("%s-", &["a", "b", "c"]), "a- [b, c]");
    }

    #[test]
    fn test_interpolate_by_name_and_position() {
        let a = args(&[("col", "3"), ("row", "7")]);
        assert_eq!(
            interpolate_named("bad cell at {row}:{col}", &a),
            "bad cell at 7:3"
        );
        assert_eq!(interpolate_named("first is {0}", &a), "first is 3 [row=7]");
    }

    #[test]
    fn test_interpolate_keeps_unknown_tokens() {
        let a = args(&[("x", "1")]);
        assert_eq!(interpolate_named("{y} {x}", &a), "{y} 1");
        assert_eq!(interpolate_named("open {x", &a), "open {x [x=1]");
    }
}
