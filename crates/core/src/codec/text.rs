//! `label: value` line format
//!
//! Fields are joined with `, ` in a fixed order. Values escape `\`, `,`,
//! CR and LF with a backslash so a title may contain commas; a value without
//! those characters is written verbatim.

use std::borrow::Cow;

use crate::{Error, Result};

const FIELD_SEPARATOR: &str = ", ";

/// Render `labels[i]: values[i]` pairs as one line.
pub fn encode(labels: &[&str], values: &[String]) -> String {
    labels
        .iter()
        .zip(values)
        .map(|(label, value)| format!("{}: {}", label, escape(value)))
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR)
}

fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', ',', '\n', '\r']) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 4);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Split on commas that are not preceded by an escaping backslash.
fn split_unescaped(line: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (idx, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            ',' => {
                parts.push(&line[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&line[start..]);
    parts
}

/// Decoded field values of one line, addressed by label.
#[derive(Debug)]
pub struct TextFields<'a> {
    labels: &'a [&'a str],
    values: Vec<String>,
}

impl<'a> TextFields<'a> {
    /// Tokenize `line` and check it has exactly `labels`, in order.
    pub fn parse(kind: &str, labels: &'a [&'a str], line: &str) -> Result<Self> {
        let parts = split_unescaped(line);
        if parts.len() != labels.len() {
            return Err(Error::parse(format!("{} string", kind), line));
        }

        let mut values = Vec::with_capacity(labels.len());
        for (expected, part) in labels.iter().zip(parts) {
            let (key, value) = part
                .split_once(':')
                .ok_or_else(|| Error::parse(format!("{} field", expected), part.trim()))?;

            let key = key.trim();
            if key != *expected {
                return Err(Error::parse(format!("{} label", expected), key));
            }
            // Only the separator space after the colon is dropped; the
            // value itself keeps any edge whitespace.
            let value = value.strip_prefix(' ').unwrap_or(value);
            values.push(unescape(value));
        }

        Ok(Self { labels, values })
    }

    fn raw(&self, label: &str) -> Result<&str> {
        self.labels
            .iter()
            .position(|candidate| *candidate == label)
            .map(|idx| self.values[idx].as_str())
            .ok_or_else(|| Error::parse("label", label))
    }

    pub fn string(&self, label: &str) -> Result<String> {
        self.raw(label).map(str::to_string)
    }

    pub fn int(&self, label: &str) -> Result<i64> {
        let raw = self.raw(label)?.trim();
        raw.parse::<i64>().map_err(|_| Error::parse(label, raw))
    }

    pub fn boolean(&self, label: &str) -> Result<bool> {
        match self.raw(label)?.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(Error::parse(label, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: &[&str] = &["id", "title", "color", "userID"];

    #[test]
    fn test_encode_plain_values() {
        let values = vec![
            "1".to_string(),
            "Work".to_string(),
            "blue".to_string(),
            "2".to_string(),
        ];
        assert_eq!(
            encode(LABELS, &values),
            "id: 1, title: Work, color: blue, userID: 2"
        );
    }

    #[test]
    fn test_parse_by_label() {
        let fields =
            TextFields::parse("category", LABELS, "id: 7, title: Home, color: green, userID: 3")
                .unwrap();
        assert_eq!(fields.int("id").unwrap(), 7);
        assert_eq!(fields.string("title").unwrap(), "Home");
        assert_eq!(fields.string("color").unwrap(), "green");
        assert_eq!(fields.int("userID").unwrap(), 3);
    }

    #[test]
    fn test_wrong_field_count() {
        let err = TextFields::parse("category", LABELS, "id: 1, title: Work").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid category string: id: 1, title: Work"
        );
    }

    #[test]
    fn test_wrong_label() {
        let err =
            TextFields::parse("category", LABELS, "id: 1, name: Work, color: blue, userID: 2")
                .unwrap_err();
        assert_eq!(err.to_string(), "invalid title label: name");
    }

    #[test]
    fn test_missing_colon() {
        let err = TextFields::parse("category", LABELS, "id: 1, Work, color: blue, userID: 2")
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid title field: Work");
    }

    #[test]
    fn test_bad_int_names_field_and_value() {
        let fields = TextFields::parse(
            "category",
            LABELS,
            "id: invalid, title: None, color: black, userID: 6",
        )
        .unwrap();
        assert_eq!(fields.int("id").unwrap_err().to_string(), "invalid id: invalid");
    }

    #[test]
    fn test_boolean_literals_only() {
        let labels: &[&str] = &["isDone"];
        let yes = TextFields::parse("task", labels, "isDone: true").unwrap();
        assert!(yes.boolean("isDone").unwrap());

        let no = TextFields::parse("task", labels, "isDone: false").unwrap();
        assert!(!no.boolean("isDone").unwrap());

        let bad = TextFields::parse("task", labels, "isDone: yes").unwrap();
        assert_eq!(
            bad.boolean("isDone").unwrap_err().to_string(),
            "invalid isDone: yes"
        );
    }

    #[test]
    fn test_value_may_contain_colon() {
        let labels: &[&str] = &["id", "dueDate"];
        let fields = TextFields::parse("task", labels, "id: 1, dueDate: 2024-01-01T10:00").unwrap();
        assert_eq!(fields.string("dueDate").unwrap(), "2024-01-01T10:00");
    }

    #[test]
    fn test_commas_are_escaped() {
        let values = vec![
            "1".to_string(),
            "Milk, eggs\\bread".to_string(),
            "red".to_string(),
            "4".to_string(),
        ];
        let line = encode(LABELS, &values);
        assert_eq!(
            line,
            "id: 1, title: Milk\\, eggs\\\\bread, color: red, userID: 4"
        );

        let fields = TextFields::parse("category", LABELS, &line).unwrap();
        assert_eq!(fields.string("title").unwrap(), "Milk, eggs\\bread");
    }

    #[test]
    fn test_newlines_are_escaped() {
        let escaped = escape("two\nlines");
        assert_eq!(escaped, "two\\nlines");
        assert_eq!(unescape(&escaped), "two\nlines");
    }

    #[test]
    fn test_edge_whitespace_in_values_is_kept() {
        let values = vec![
            "1".to_string(),
            " padded title ".to_string(),
            "  ".to_string(),
            "2".to_string(),
        ];
        let line = encode(LABELS, &values);
        assert_eq!(line, "id: 1, title:  padded title , color:   , userID: 2");

        let fields = TextFields::parse("category", LABELS, &line).unwrap();
        assert_eq!(fields.string("title").unwrap(), " padded title ");
        assert_eq!(fields.string("color").unwrap(), "  ");
        assert_eq!(fields.int("userID").unwrap(), 2);
    }

    #[test]
    fn test_numbers_tolerate_extra_spaces() {
        let fields =
            TextFields::parse("category", LABELS, "id:  5 , title: A, color: b, userID:3").unwrap();
        assert_eq!(fields.int("id").unwrap(), 5);
        assert_eq!(fields.int("userID").unwrap(), 3);
        assert_eq!(fields.string("title").unwrap(), "A");
    }
}
