//! Composite object names.
//!
//! An object name has the shape `domain:key=value[,key=value]*`. Names are
//! compared by their canonical form (properties sorted by key), so
//! `test:type=Cat,name=x` and `test:name=x,type=Cat` address the same bean.
//!
//! A name becomes a pattern when any of these holds:
//! - the domain contains `*` or `?` (`*:type=Cat`)
//! - the property list has a `*` entry (`test:type=Cat,*`)
//! - a value contains an unescaped `*` or `?` (`test:type=Cat,name=*`)
//!
//! Patterns can be used to query a registry but never to register a bean.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error returned when text is not a valid object name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectNameError {
    #[error("Malformed object name '{name}': {reason}")]
    Malformed { name: String, reason: String },
}

#[derive(Debug, Clone)]
struct KeyProperty {
    key: String,
    /// Raw value text; quoted values keep their quotes and escapes.
    value: String,
    pattern: bool,
}

/// A parsed `domain:key=value,...` identifier.
#[derive(Debug, Clone)]
pub struct ObjectName {
    domain: String,
    properties: Vec<KeyProperty>,
    domain_pattern: bool,
    property_list_pattern: bool,
    canonical: String,
}

impl ObjectName {
    /// Parse the textual form of an object name.
    pub fn parse(name: &str) -> Result<Self, ObjectNameError> {
        Parser { input: name }.parse()
    }

    /// Build a name from a domain and ordered key properties.
    ///
    /// The parts are joined into the textual form and parsed. The result must
    /// hold exactly the given keys with exactly the given values, so a value
    /// such as `x,color=black` that would smuggle in extra properties is
    /// rejected rather than parsed into a different name.
    pub fn from_properties<'a, I>(domain: &str, properties: I) -> Result<Self, ObjectNameError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let properties: Vec<(&str, &str)> = properties.into_iter().collect();
        let text = format!(
            "{domain}:{}",
            properties
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect::<Vec<_>>()
                .join(",")
        );
        let parsed = Self::parse(&text)?;

        let same_shape = parsed.domain == domain
            && !parsed.property_list_pattern
            && parsed.properties.len() == properties.len()
            && parsed
                .properties
                .iter()
                .zip(&properties)
                .all(|(property, (key, value))| property.key == *key && property.value == *value);
        if !same_shape {
            return Err(ObjectNameError::Malformed {
                name: text,
                reason: "a key or value holds reserved characters".to_string(),
            });
        }
        Ok(parsed)
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Raw value of a key property, if present.
    pub fn key_property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    /// Domain plus key properties sorted by key.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub const fn is_domain_pattern(&self) -> bool {
        self.domain_pattern
    }

    pub const fn is_property_list_pattern(&self) -> bool {
        self.property_list_pattern
    }

    pub fn is_property_value_pattern(&self) -> bool {
        self.properties.iter().any(|p| p.pattern)
    }

    pub fn is_pattern(&self) -> bool {
        self.domain_pattern || self.property_list_pattern || self.is_property_value_pattern()
    }

    /// Check whether a concrete name is selected by this name.
    ///
    /// A non-pattern name only matches itself. Pattern names never match.
    pub fn matches(&self, name: &Self) -> bool {
        if name.is_pattern() {
            return false;
        }

        let domain_ok = if self.domain_pattern {
            glob_matches(&self.domain, &name.domain)
        } else {
            self.domain == name.domain
        };
        if !domain_ok {
            return false;
        }

        if !self.property_list_pattern && self.properties.len() != name.properties.len() {
            return false;
        }

        self.properties.iter().all(|wanted| {
            name.key_property(&wanted.key).is_some_and(|value| {
                if wanted.pattern {
                    glob_matches(&wanted.value, value)
                } else {
                    wanted.value == value
                }
            })
        })
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.domain)?;
        let mut first = true;
        for property in &self.properties {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{}={}", property.key, property.value)?;
            first = false;
        }
        if self.property_list_pattern {
            f.write_str(if first { "*" } else { ",*" })?;
        }
        Ok(())
    }
}

impl PartialEq for ObjectName {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for ObjectName {}

impl Hash for ObjectName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for ObjectName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ObjectName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

impl FromStr for ObjectName {
    type Err = ObjectNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ObjectName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct Parser<'a> {
    input: &'a str,
}

impl<'a> Parser<'a> {
    fn malformed(&self, reason: impl Into<String>) -> ObjectNameError {
        ObjectNameError::Malformed {
            name: self.input.to_string(),
            reason: reason.into(),
        }
    }

    fn parse(&self) -> Result<ObjectName, ObjectNameError> {
        if self.input.contains('\n') {
            return Err(self.malformed("newline is not allowed"));
        }
        let Some((domain, mut rest)) = self.input.split_once(':') else {
            return Err(self.malformed("missing ':' after the domain"));
        };
        if rest.is_empty() {
            return Err(self.malformed("key property list is empty"));
        }

        let mut properties: Vec<KeyProperty> = Vec::new();
        let mut property_list_pattern = false;

        loop {
            let wildcard_entry = rest
                .strip_prefix('*')
                .filter(|after| after.is_empty() || after.starts_with(','));

            let remaining = if let Some(after) = wildcard_entry {
                if property_list_pattern {
                    return Err(self.malformed("'*' appears twice in the key property list"));
                }
                property_list_pattern = true;
                after.strip_prefix(',')
            } else {
                let (property, remaining) = self.key_property(rest)?;
                if properties.iter().any(|p| p.key == property.key) {
                    return Err(self.malformed(format!("duplicate key '{}'", property.key)));
                }
                properties.push(property);
                remaining
            };

            match remaining {
                None => break,
                Some("") => return Err(self.malformed("trailing ',' in key property list")),
                Some(next) => rest = next,
            }
        }

        let canonical = canonical_form(domain, &properties, property_list_pattern);

        Ok(ObjectName {
            domain: domain.to_string(),
            domain_pattern: domain.contains(['*', '?']),
            properties,
            property_list_pattern,
            canonical,
        })
    }

    /// Parse one `key=value` entry, returning the text after its `,`.
    fn key_property(&self, text: &'a str) -> Result<(KeyProperty, Option<&'a str>), ObjectNameError> {
        let Some((key, after_key)) = text.split_once('=') else {
            return Err(self.malformed(format!("'{text}' is not a key=value pair")));
        };
        if key.is_empty() {
            return Err(self.malformed("empty key"));
        }
        if key.contains([':', ',', '*', '?', '"']) {
            return Err(self.malformed(format!("invalid character in key '{key}'")));
        }

        let (value, pattern, remaining) = if after_key.starts_with('"') {
            self.quoted_value(after_key)?
        } else {
            let (value, remaining) = match after_key.split_once(',') {
                Some((value, remaining)) => (value, Some(remaining)),
                None => (after_key, None),
            };
            if value.is_empty() {
                return Err(self.malformed(format!("empty value for key '{key}'")));
            }
            if value.contains([':', '=', '"']) {
                return Err(self.malformed(format!("invalid character in value '{value}'")));
            }
            (value, value.contains(['*', '?']), remaining)
        };

        Ok((
            KeyProperty {
                key: key.to_string(),
                value: value.to_string(),
                pattern,
            },
            remaining,
        ))
    }

    /// Parse a `"..."` value, returning the raw quoted text.
    fn quoted_value(&self, text: &'a str) -> Result<(&'a str, bool, Option<&'a str>), ObjectNameError> {
        let mut pattern = false;
        let mut chars = text.char_indices().skip(1);

        while let Some((index, c)) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some((_, '"' | '\\' | '*' | '?' | 'n')) => {}
                    _ => return Err(self.malformed("invalid escape sequence in quoted value")),
                },
                '*' | '?' => pattern = true,
                '"' => {
                    let (value, after) = text.split_at(index + 1);
                    return match after.strip_prefix(',') {
                        Some(remaining) => Ok((value, pattern, Some(remaining))),
                        None if after.is_empty() => Ok((value, pattern, None)),
                        None => Err(self.malformed("unexpected text after quoted value")),
                    };
                }
                _ => {}
            }
        }

        Err(self.malformed("unterminated quoted value"))
    }
}

fn canonical_form(domain: &str, properties: &[KeyProperty], property_list_pattern: bool) -> String {
    let mut sorted: Vec<&KeyProperty> = properties.iter().collect();
    sorted.sort_by(|a, b| a.key.cmp(&b.key));

    let mut canonical = format!("{domain}:");
    canonical.push_str(
        &sorted
            .iter()
            .map(|p| format!("{}={}", p.key, p.value))
            .collect::<Vec<_>>()
            .join(","),
    );
    if property_list_pattern {
        canonical.push_str(if sorted.is_empty() { "*" } else { ",*" });
    }
    canonical
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Any,
    One,
    Literal(char),
}

fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '*' => tokens.push(Token::Any),
            '?' => tokens.push(Token::One),
            // Escaped wildcards are literal; the escape stays part of the raw value.
            '\\' => {
                tokens.push(Token::Literal('\\'));
                if let Some(escaped) = chars.next() {
                    tokens.push(Token::Literal(escaped));
                }
            }
            other => tokens.push(Token::Literal(other)),
        }
    }
    tokens
}

fn glob_matches(pattern: &str, text: &str) -> bool {
    let tokens = tokenize(pattern);
    let text: Vec<char> = text.chars().collect();

    let (mut t, mut p) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match tokens.get(p) {
            Some(Token::One) => {
                t += 1;
                p += 1;
            }
            Some(Token::Literal(c)) if *c == text[t] => {
                t += 1;
                p += 1;
            }
            Some(Token::Any) => {
                backtrack = Some((p, t));
                p += 1;
            }
            _ => match backtrack {
                Some((star, consumed)) => {
                    p = star + 1;
                    t = consumed + 1;
                    backtrack = Some((star, consumed + 1));
                }
                None => return false,
            },
        }
    }

    tokens[p..].iter().all(|token| *token == Token::Any)
}
