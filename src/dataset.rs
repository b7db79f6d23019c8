//! In-memory RDF dataset and N-Triples reader.
//!
//! This is the minimal triple store the classifiers read from: no graph
//! names, no inference, lookups by subject and predicate only.

use serde::{Deserialize, Serialize};

use crate::vocab;
use crate::{Error, Result};

/// An RDF term.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "termType", rename_all = "camelCase")]
pub enum Term {
    Iri {
        value: String,
    },
    Literal {
        value: String,
        datatype: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
    Blank {
        id: String,
    },
}

impl Term {
    pub fn iri(value: impl Into<String>) -> Self {
        Term::Iri {
            value: value.into(),
        }
    }

    pub fn literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            datatype: datatype.into(),
            language: None,
        }
    }

    /// The IRI, if this term is one.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri { value } => Some(value),
            _ => None,
        }
    }

    /// Lexical value of a literal or IRI.
    pub fn value(&self) -> &str {
        match self {
            Term::Iri { value } | Term::Literal { value, .. } => value,
            Term::Blank { id } => id,
        }
    }

    /// Decode an `xsd:integer` or integral `xsd:decimal` literal.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Term::Literal {
                value, datatype, ..
            } if datatype == vocab::XSD_INTEGER => value.trim().parse().ok(),
            Term::Literal {
                value, datatype, ..
            } if datatype == vocab::XSD_DECIMAL => {
                let value = value.trim();
                let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
                if fraction.chars().all(|c| c == '0') {
                    whole.parse().ok()
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Decode an `xsd:dateTime` literal.
    pub fn as_datetime(&self) -> Option<jiff::Timestamp> {
        match self {
            Term::Literal {
                value, datatype, ..
            } if datatype == vocab::XSD_DATE_TIME => value.trim().parse().ok(),
            _ => None,
        }
    }
}

/// A single subject, predicate, object statement.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
}

/// A set of triples describing one or more resources.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    triples: Vec<Triple>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a statement. Exact duplicates are ignored.
    pub fn insert(&mut self, subject: Term, predicate: impl Into<String>, object: Term) {
        let triple = Triple {
            subject,
            predicate: predicate.into(),
            object,
        };
        if !self.triples.contains(&triple) {
            self.triples.push(triple);
        }
    }

    /// Objects of every statement about the IRI `subject` via `predicate`.
    pub fn objects<'a>(
        &'a self,
        subject: &'a str,
        predicate: &'a str,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.triples
            .iter()
            .filter(move |t| t.subject.as_iri() == Some(subject) && t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// First object of `subject` via `predicate`.
    pub fn object(&self, subject: &str, predicate: &str) -> Option<&Term> {
        self.triples
            .iter()
            .find(|t| t.subject.as_iri() == Some(subject) && t.predicate == predicate)
            .map(|t| &t.object)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Parse an N-Triples document.
    pub fn from_ntriples(input: &str) -> Result<Self> {
        let mut dataset = Dataset::new();
        for (idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let triple = Cursor::new(line, idx + 1).triple()?;
            dataset.insert(triple.subject, triple.predicate, triple.object);
        }
        Ok(dataset)
    }
}

struct Cursor<'a> {
    rest: &'a str,
    line: usize,
}

impl<'a> Cursor<'a> {
    fn new(rest: &'a str, line: usize) -> Self {
        Self { rest, line }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::Parse {
            line: self.line,
            message: message.into(),
        }
    }

    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn triple(mut self) -> Result<Triple> {
        self.skip_ws();
        let subject = match self.rest.chars().next() {
            Some('<') => Term::iri(self.iri()?),
            Some('_') => self.blank()?,
            _ => return Err(self.error("expected subject")),
        };
        self.skip_ws();
        if !self.rest.starts_with('<') {
            return Err(self.error("expected predicate IRI"));
        }
        let predicate = self.iri()?;
        self.skip_ws();
        let object = match self.rest.chars().next() {
            Some('<') => Term::iri(self.iri()?),
            Some('_') => self.blank()?,
            Some('"') => self.literal()?,
            _ => return Err(self.error("expected object")),
        };
        self.skip_ws();
        let tail = self
            .rest
            .strip_prefix('.')
            .ok_or_else(|| self.error("expected '.'"))?
            .trim();
        if !(tail.is_empty() || tail.starts_with('#')) {
            return Err(self.error("trailing content after '.'"));
        }
        Ok(Triple {
            subject,
            predicate,
            object,
        })
    }

    fn iri(&mut self) -> Result<String> {
        let rest = self.rest;
        let body = &rest[1..];
        let end = body.find('>').ok_or_else(|| self.error("unterminated IRI"))?;
        let iri = unescape(&body[..end]).ok_or_else(|| self.error("bad escape in IRI"))?;
        self.rest = &body[end + 1..];
        Ok(iri)
    }

    fn blank(&mut self) -> Result<Term> {
        let rest = self.rest;
        let body = rest
            .strip_prefix("_:")
            .ok_or_else(|| self.error("expected blank node label"))?;
        let end = body.find(char::is_whitespace).unwrap_or(body.len());
        // A label never ends with '.', so a glued statement terminator stays behind.
        let end = body[..end].trim_end_matches('.').len();
        if end == 0 {
            return Err(self.error("empty blank node label"));
        }
        let id = body[..end].to_string();
        self.rest = &body[end..];
        Ok(Term::Blank { id })
    }

    fn literal(&mut self) -> Result<Term> {
        let rest = self.rest;
        let body = &rest[1..];
        let mut end = None;
        let mut escaped = false;
        for (i, c) in body.char_indices() {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => {
                    end = Some(i);
                    break;
                }
                _ => {}
            }
        }
        let end = end.ok_or_else(|| self.error("unterminated literal"))?;
        let value = unescape(&body[..end]).ok_or_else(|| self.error("bad escape in literal"))?;
        self.rest = &body[end + 1..];

        if let Some(rest) = self.rest.strip_prefix("^^") {
            self.rest = rest;
            if !self.rest.starts_with('<') {
                return Err(self.error("expected datatype IRI"));
            }
            let datatype = self.iri()?;
            return Ok(Term::literal(value, datatype));
        }
        if let Some(rest) = self.rest.strip_prefix('@') {
            let end = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
                .unwrap_or(rest.len());
            let language = rest[..end].to_string();
            self.rest = &rest[end..];
            return Ok(Term::Literal {
                value,
                datatype: "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString".into(),
                language: Some(language),
            });
        }
        Ok(Term::literal(value, vocab::XSD_STRING))
    }
}

fn unescape(raw: &str) -> Option<String> {
    if !raw.contains('\\') {
        return Some(raw.to_string());
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'f' => out.push('\u{c}'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            '\\' => out.push('\\'),
            'u' => out.push(hex_char(&mut chars, 4)?),
            'U' => out.push(hex_char(&mut chars, 8)?),
            _ => return None,
        }
    }
    Some(out)
}

fn hex_char(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
    let hex: String = chars.by_ref().take(digits).collect();
    if hex.len() != digits {
        return None;
    }
    char::from_u32(u32::from_str_radix(&hex, 16).ok()?)
}
