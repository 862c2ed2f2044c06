pub mod settings;

use anyhow::{anyhow, Result};
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// A parsed parameter list literal.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamList(pub Vec<ParamValue>);

#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
}

/// Parse a textual list literal such as `['customer']` or `[1, 'a']`.
///
/// Values are single- or double-quoted strings (with `\\ \' \" \n \t`
/// escapes) or signed integers. A trailing comma is allowed. Anything left
/// over after the closing bracket is an error.
pub fn parse_param_literal(input: &str) -> Result<ParamList> {
    let mut chars = input.chars().peekable();

    skip_whitespace(&mut chars);
    if chars.next() != Some('[') {
        return Err(anyhow!("Expected a list literal starting with '['"));
    }

    let mut values = Vec::new();
    loop {
        skip_whitespace(&mut chars);
        match chars.peek() {
            None => return Err(anyhow!("Unterminated list literal, missing ']'")),
            Some(']') => {
                chars.next();
                break;
            }
            _ => {}
        }

        let value = match chars.peek() {
            Some('\'') | Some('"') => parse_string(&mut chars)?,
            Some(c) if c.is_ascii_digit() || *c == '-' || *c == '+' => parse_integer(&mut chars)?,
            Some(c) => return Err(anyhow!("Unexpected character '{}' in list literal", c)),
            None => return Err(anyhow!("Unterminated list literal, missing ']'")),
        };
        values.push(value);

        skip_whitespace(&mut chars);
        match chars.peek() {
            Some(',') => {
                chars.next();
            }
            Some(']') => {}
            Some(c) => return Err(anyhow!("Expected ',' or ']', found '{}'", c)),
            None => return Err(anyhow!("Unterminated list literal, missing ']'")),
        }
    }

    skip_whitespace(&mut chars);
    if let Some(c) = chars.next() {
        return Err(anyhow!("Trailing characters after list literal: '{}'", c));
    }

    Ok(ParamList(values))
}

fn skip_whitespace(chars: &mut Peekable<Chars>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}

fn parse_string(chars: &mut Peekable<Chars>) -> Result<ParamValue> {
    let quote = chars.next().expect("caller checked the quote");
    let mut value = String::new();

    loop {
        match chars.next() {
            None => return Err(anyhow!("Unterminated string in list literal")),
            Some(c) if c == quote => return Ok(ParamValue::Str(value)),
            Some('\\') => match chars.next() {
                Some('\\') => value.push('\\'),
                Some('\'') => value.push('\''),
                Some('"') => value.push('"'),
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some(c) => return Err(anyhow!("Unsupported escape sequence '\\{}'", c)),
                None => return Err(anyhow!("Unterminated string in list literal")),
            },
            Some(c) => value.push(c),
        }
    }
}

fn parse_integer(chars: &mut Peekable<Chars>) -> Result<ParamValue> {
    let mut digits = String::new();
    if matches!(chars.peek(), Some('-') | Some('+')) {
        digits.push(chars.next().expect("peeked"));
    }
    while chars.peek().is_some_and(|c| c.is_ascii_digit()) {
        digits.push(chars.next().expect("peeked"));
    }

    let value = digits
        .parse::<i64>()
        .map_err(|_| anyhow!("Invalid integer '{}' in list literal", digits))?;
    Ok(ParamValue::Int(value))
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => {
                let escaped = s.replace('\\', "\\\\");
                // repr-style quote selection: double quotes when the string
                // holds a single quote but no double quote
                if s.contains('\'') && !s.contains('"') {
                    write!(f, "\"{}\"", escaped)
                } else {
                    write!(f, "'{}'", escaped.replace('\'', "\\'"))
                }
            }
            ParamValue::Int(i) => write!(f, "{}", i),
        }
    }
}

// Canonical form, matching what the notebook expects in `list1`:
// single quotes, ", " separators.
impl fmt::Display for ParamList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (index, value) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}
