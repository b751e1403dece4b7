//! Selector compilation.
//!
//! Selectors starting with `/` are path expressions in the style of XPath
//! location paths and are rewritten to CSS before being handed to `scraper`.
//! The supported subset is:
//!
//! - `/` (child) and `//` (descendant) steps
//! - element names or `*`
//! - predicates `[@a]`, `[@a='v']`, `[n]`, `[last()]`,
//!   `[contains(@a,'v')]` and `[starts-with(@a,'v')]`
//! - a final `text()` step, which is accepted and ignored
//!
//! Positional predicates map to `:nth-of-type`/`:last-of-type` (or the
//! `-child` forms for `*`), so they count siblings of the same name rather
//! than siblings that passed earlier predicates.
//!
//! Everything else is parsed as CSS directly.

use scraper::Selector;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("unsupported path expression {expression:?}: {reason}")]
    UnsupportedPath { expression: String, reason: String },
    #[error("invalid selector {selector:?}: {message}")]
    Invalid { selector: String, message: String },
}

pub fn compile_selector(raw: &str) -> Result<Selector, SelectorError> {
    let trimmed = raw.trim();
    let css = if trimmed.starts_with('/') {
        path_to_css(trimmed)?
    } else {
        trimmed.to_string()
    };
    Selector::parse(&css).map_err(|err| SelectorError::Invalid {
        selector: trimmed.to_string(),
        message: err.to_string(),
    })
}

fn path_to_css(expression: &str) -> Result<String, SelectorError> {
    let unsupported = |reason: String| SelectorError::UnsupportedPath {
        expression: expression.to_string(),
        reason,
    };

    let mut css = String::new();
    let mut rest = expression;
    while !rest.is_empty() {
        let descendant = if let Some(after) = rest.strip_prefix("//") {
            rest = after;
            true
        } else if let Some(after) = rest.strip_prefix('/') {
            rest = after;
            false
        } else {
            return Err(unsupported("expected '/' between steps".into()));
        };

        let (step, remainder) = split_step(rest);
        rest = remainder;
        if step.is_empty() {
            return Err(unsupported("empty step".into()));
        }
        if step == "text()" {
            if !rest.is_empty() {
                return Err(unsupported("text() must be the last step".into()));
            }
            break;
        }

        let compound = step_to_css(step).map_err(unsupported)?;
        if css.is_empty() {
            css.push_str(&compound);
            if !descendant {
                css.push_str(":root");
            }
        } else {
            css.push_str(if descendant { " " } else { " > " });
            css.push_str(&compound);
        }
    }

    if css.is_empty() {
        return Err(unsupported("no element steps".into()));
    }
    Ok(css)
}

/// Splits off the next step, stopping at a `/` outside predicates and quotes.
fn split_step(input: &str) -> (&str, &str) {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (idx, ch) in input.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(ch),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, '/') if depth == 0 => return (&input[..idx], &input[idx..]),
            _ => {}
        }
    }
    (input, "")
}

fn step_to_css(step: &str) -> Result<String, String> {
    let name_end = step.find('[').unwrap_or(step.len());
    let name = &step[..name_end];
    let wildcard = name == "*";
    if !wildcard && !is_name(name) {
        return Err(format!("unsupported step {step:?}"));
    }

    let mut css = name.to_string();
    let mut predicates = &step[name_end..];
    while !predicates.is_empty() {
        let close = closing_bracket(predicates).ok_or_else(|| format!("unclosed predicate in {step:?}"))?;
        css.push_str(&predicate_to_css(predicates[1..close].trim(), wildcard)?);
        predicates = &predicates[close + 1..];
    }
    Ok(css)
}

/// Index of the `]` closing the predicate that `input` starts with.
fn closing_bracket(input: &str) -> Option<usize> {
    if !input.starts_with('[') {
        return None;
    }
    let mut quote: Option<char> = None;
    for (idx, ch) in input.char_indices().skip(1) {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(ch),
            (None, ']') => return Some(idx),
            _ => {}
        }
    }
    None
}

fn predicate_to_css(predicate: &str, wildcard: bool) -> Result<String, String> {
    if let Ok(position) = predicate.parse::<u32>() {
        if position == 0 {
            return Err("positions start at 1".into());
        }
        let pseudo = if wildcard { "nth-child" } else { "nth-of-type" };
        return Ok(format!(":{pseudo}({position})"));
    }
    if predicate == "last()" {
        return Ok(if wildcard { ":last-child" } else { ":last-of-type" }.to_string());
    }
    if let Some(attr) = predicate.strip_prefix('@') {
        return match attr.split_once('=') {
            Some((name, value)) => attribute_css(name, "=", value),
            None => attribute_css(attr, "", ""),
        };
    }
    for (function, operator) in [("contains(", "*="), ("starts-with(", "^=")] {
        if let Some(args) = predicate
            .strip_prefix(function)
            .and_then(|args| args.strip_suffix(')'))
        {
            let (name, value) = args
                .split_once(',')
                .ok_or_else(|| format!("{function}) expects two arguments"))?;
            let name = name
                .trim()
                .strip_prefix('@')
                .ok_or_else(|| format!("{function}) only supports attributes"))?;
            return attribute_css(name, operator, value);
        }
    }
    Err(format!("unsupported predicate [{predicate}]"))
}

fn attribute_css(name: &str, operator: &str, value: &str) -> Result<String, String> {
    let name = name.trim();
    if !is_name(name) {
        return Err(format!("invalid attribute name {name:?}"));
    }
    if operator.is_empty() {
        return Ok(format!("[{name}]"));
    }
    let literal = string_literal(value.trim()).ok_or_else(|| format!("expected quoted value, got {value:?}"))?;
    let escaped = literal.replace('\\', "\\\\").replace('"', "\\\"");
    Ok(format!("[{name}{operator}\"{escaped}\"]"))
}

fn string_literal(value: &str) -> Option<&str> {
    let quote = value.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    value
        .strip_prefix(quote)?
        .strip_suffix(quote)
}

fn is_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
