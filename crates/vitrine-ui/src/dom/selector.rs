//! The subset of CSS selectors the headless document understands.
//!
//! Compound selectors only: an optional tag followed by any number of
//! `#id`, `.class`, `[attr]` and `[attr="value"]` parts, optionally grouped
//! with commas. Combinators are rejected.

use thiserror::Error;

/// Selector parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unsupported selector `{0}`: combinators are not supported")]
    Combinator(String),
    #[error("malformed selector `{0}`")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Tag(String),
    Id(String),
    Class(String),
    Attr(String, Option<String>),
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Vec<Part>>,
}

impl Selector {
    pub fn parse(raw: &str) -> Result<Self, SelectorError> {
        let alternatives = raw
            .split(',')
            .map(parse_compound)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { alternatives })
    }

    /// Whether an element described by `tag`, `has_class` and `attribute`
    /// matches any alternative.
    pub fn matches(
        &self,
        tag: &str,
        has_class: impl Fn(&str) -> bool,
        attribute: impl Fn(&str) -> Option<String>,
    ) -> bool {
        self.alternatives.iter().any(|parts| {
            parts.iter().all(|part| match part {
                Part::Tag(t) => t.eq_ignore_ascii_case(tag),
                Part::Id(id) => attribute("id").as_deref() == Some(id.as_str()),
                Part::Class(c) => has_class(c),
                Part::Attr(name, None) => attribute(name).is_some(),
                Part::Attr(name, Some(value)) => {
                    attribute(name).as_deref() == Some(value.as_str())
                }
            })
        })
    }
}

fn parse_compound(raw: &str) -> Result<Vec<Part>, SelectorError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(SelectorError::Empty);
    }
    if raw.contains(|c: char| c.is_whitespace() || c == '>' || c == '+' || c == '~') {
        // whitespace is allowed inside quoted attribute values only
        if !whitespace_only_in_brackets(raw) {
            return Err(SelectorError::Combinator(raw.to_string()));
        }
    }

    let mut parts = Vec::new();
    let mut rest = raw;

    let tag_len = rest
        .find(|c: char| matches!(c, '#' | '.' | '['))
        .unwrap_or(rest.len());
    if tag_len > 0 {
        let tag = &rest[..tag_len];
        if tag != "*" {
            if !is_ident(tag) {
                return Err(SelectorError::Malformed(raw.to_string()));
            }
            parts.push(Part::Tag(tag.to_string()));
        }
        rest = &rest[tag_len..];
    }

    while let Some(first) = rest.chars().next() {
        match first {
            '#' | '.' => {
                let body = &rest[1..];
                let len = body
                    .find(|c: char| matches!(c, '#' | '.' | '['))
                    .unwrap_or(body.len());
                let name = &body[..len];
                if !is_ident(name) {
                    return Err(SelectorError::Malformed(raw.to_string()));
                }
                parts.push(if first == '#' {
                    Part::Id(name.to_string())
                } else {
                    Part::Class(name.to_string())
                });
                rest = &body[len..];
            }
            '[' => {
                let close = rest
                    .find(']')
                    .ok_or_else(|| SelectorError::Malformed(raw.to_string()))?;
                parts.push(parse_attr(&rest[1..close], raw)?);
                rest = &rest[close + 1..];
            }
            _ => return Err(SelectorError::Malformed(raw.to_string())),
        }
    }

    Ok(parts)
}

fn parse_attr(inner: &str, raw: &str) -> Result<Part, SelectorError> {
    match inner.split_once('=') {
        None => {
            let name = inner.trim();
            if !is_ident(name) {
                return Err(SelectorError::Malformed(raw.to_string()));
            }
            Ok(Part::Attr(name.to_string(), None))
        }
        Some((name, value)) => {
            let name = name.trim();
            if !is_ident(name) {
                return Err(SelectorError::Malformed(raw.to_string()));
            }
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            Ok(Part::Attr(name.to_string(), Some(value.to_string())))
        }
    }
}

fn whitespace_only_in_brackets(raw: &str) -> bool {
    let mut depth = 0usize;
    for c in raw.chars() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            c if (c.is_whitespace() || matches!(c, '>' | '+' | '~')) && depth == 0 => {
                return false
            }
            _ => {}
        }
    }
    true
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(selector: &str, tag: &str, classes: &[&str], attrs: &[(&str, &str)]) -> bool {
        Selector::parse(selector).unwrap().matches(
            tag,
            |c| classes.contains(&c),
            |name| {
                attrs
                    .iter()
                    .find(|(k, _)| *k == name)
                    .map(|(_, v)| v.to_string())
            },
        )
    }

    #[test]
    fn test_class_selector() {
        assert!(matches(".produto-thumb", "a", &["produto-thumb", "active"], &[]));
        assert!(!matches(".produto-thumb", "a", &["thumb"], &[]));
    }

    #[test]
    fn test_tag_and_class() {
        assert!(matches("form.needs-validation", "form", &["needs-validation"], &[]));
        assert!(!matches("form.needs-validation", "div", &["needs-validation"], &[]));
    }

    #[test]
    fn test_attribute_presence_and_value() {
        assert!(matches("[data-confirm]", "a", &[], &[("data-confirm", "Sure?")]));
        assert!(!matches("[data-confirm]", "a", &[], &[]));
        assert!(matches(
            r#"button[type="submit"]"#,
            "button",
            &[],
            &[("type", "submit")]
        ));
    }

    #[test]
    fn test_id_selector() {
        assert!(matches("#cart-count", "span", &[], &[("id", "cart-count")]));
        assert!(!matches("#cart-count", "span", &[], &[("id", "other")]));
    }

    #[test]
    fn test_selector_list() {
        assert!(matches(".a, .b", "div", &["b"], &[]));
    }

    #[test]
    fn test_quoted_value_with_space() {
        assert!(matches(r#"[data-confirm="Tem certeza?"]"#, "a", &[], &[("data-confirm", "Tem certeza?")]));
    }

    #[test]
    fn test_combinators_are_rejected() {
        assert!(matches!(
            Selector::parse(".cart-item .btn"),
            Err(SelectorError::Combinator(_))
        ));
        assert!(matches!(Selector::parse("ul > li"), Err(SelectorError::Combinator(_))));
        assert_eq!(Selector::parse(" , .a"), Err(SelectorError::Empty));
    }
}
