//! Parsed CSS selector subset.
//!
//! Supports what the site behaviors need to find their elements: type
//! (`a`), class (`.main-nav`), id (`#site-menu`), universal (`*`) and
//! attribute filters (`[data-fab]`, `[role=dialog]`, `[href^="#"]`),
//! combined into compounds (`a[href^="#"]`) and comma lists (`a, button`).
//! Combinators are rejected; scoped queries cover descendant lookups.

use std::fmt;
use std::str::FromStr;

use crate::error::{DomError, Result};

/// Read access to an element for selector matching.
pub trait Matchable {
	/// Lowercase tag name.
	fn tag(&self) -> &str;
	fn attribute(&self, name: &str) -> Option<&str>;
	fn has_class(&self, class: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrOp {
	Present,
	Equals(String),
	Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrFilter {
	name: String,
	op: AttrOp,
}

impl AttrFilter {
	fn matches<E: Matchable + ?Sized>(&self, el: &E) -> bool {
		let Some(value) = el.attribute(&self.name) else {
			return false;
		};
		match &self.op {
			AttrOp::Present => true,
			AttrOp::Equals(expected) => value == expected,
			AttrOp::Prefix(prefix) => value.starts_with(prefix.as_str()),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
	universal: bool,
	tag: Option<String>,
	id: Option<String>,
	classes: Vec<String>,
	attrs: Vec<AttrFilter>,
}

impl Compound {
	fn is_empty(&self) -> bool {
		!self.universal
			&& self.tag.is_none()
			&& self.id.is_none()
			&& self.classes.is_empty()
			&& self.attrs.is_empty()
	}

	fn matches<E: Matchable + ?Sized>(&self, el: &E) -> bool {
		if let Some(tag) = &self.tag
			&& !el.tag().eq_ignore_ascii_case(tag)
		{
			return false;
		}
		if let Some(id) = &self.id
			&& el.attribute("id") != Some(id.as_str())
		{
			return false;
		}
		self.classes.iter().all(|c| el.has_class(c)) && self.attrs.iter().all(|a| a.matches(el))
	}
}

/// A selector list; matches when any alternative matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
	source: String,
	alternatives: Vec<Compound>,
}

impl Selector {
	pub fn parse(source: &str) -> Result<Self> {
		let mut parser = Parser {
			source,
			chars: source.chars().collect(),
			pos: 0,
		};
		let mut alternatives = Vec::new();
		loop {
			parser.skip_ws();
			alternatives.push(parser.compound()?);
			parser.skip_ws();
			match parser.peek() {
				None => break,
				Some(',') => parser.pos += 1,
				Some(_) => return Err(parser.error("combinators are not supported")),
			}
		}
		Ok(Self {
			source: source.to_string(),
			alternatives,
		})
	}

	/// Builds a type-selector list such as `a, button` without parsing.
	pub fn tags(tags: &[&str]) -> Self {
		Self {
			source: tags.join(", "),
			alternatives: tags
				.iter()
				.map(|tag| Compound {
					tag: Some(tag.to_ascii_lowercase()),
					..Compound::default()
				})
				.collect(),
		}
	}

	pub fn matches<E: Matchable + ?Sized>(&self, el: &E) -> bool {
		self.alternatives.iter().any(|c| c.matches(el))
	}

	pub fn as_str(&self) -> &str {
		&self.source
	}
}

impl FromStr for Selector {
	type Err = DomError;

	fn from_str(s: &str) -> Result<Self> {
		Self::parse(s)
	}
}

impl fmt::Display for Selector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.source)
	}
}

struct Parser<'a> {
	source: &'a str,
	chars: Vec<char>,
	pos: usize,
}

impl Parser<'_> {
	fn peek(&self) -> Option<char> {
		self.chars.get(self.pos).copied()
	}

	fn error(&self, reason: impl Into<String>) -> DomError {
		DomError::selector(self.source, reason)
	}

	fn skip_ws(&mut self) {
		while self.peek().is_some_and(char::is_whitespace) {
			self.pos += 1;
		}
	}

	fn ident(&mut self) -> Option<String> {
		let start = self.pos;
		while self
			.peek()
			.is_some_and(|c| c.is_alphanumeric() || c == '-' || c == '_')
		{
			self.pos += 1;
		}
		(self.pos > start).then(|| self.chars[start..self.pos].iter().collect())
	}

	fn expect_ident(&mut self, what: &str) -> Result<String> {
		self.ident()
			.ok_or_else(|| self.error(format!("expected {what} at offset {}", self.pos)))
	}

	fn compound(&mut self) -> Result<Compound> {
		let mut compound = Compound::default();
		if self.peek() == Some('*') {
			self.pos += 1;
			compound.universal = true;
		} else if let Some(tag) = self.ident() {
			compound.tag = Some(tag.to_ascii_lowercase());
		}

		loop {
			match self.peek() {
				Some('.') => {
					self.pos += 1;
					compound.classes.push(self.expect_ident("class name")?);
				}
				Some('#') => {
					self.pos += 1;
					let id = self.expect_ident("id")?;
					if compound.id.replace(id).is_some() {
						return Err(self.error("more than one id in a compound"));
					}
				}
				Some('[') => {
					self.pos += 1;
					compound.attrs.push(self.attr()?);
				}
				_ => break,
			}
		}

		if compound.is_empty() {
			return Err(self.error(format!("empty selector at offset {}", self.pos)));
		}
		Ok(compound)
	}

	fn attr(&mut self) -> Result<AttrFilter> {
		self.skip_ws();
		let name = self.expect_ident("attribute name")?.to_ascii_lowercase();
		self.skip_ws();
		let op = match self.peek() {
			Some(']') => AttrOp::Present,
			Some('=') => {
				self.pos += 1;
				AttrOp::Equals(self.value()?)
			}
			Some('^') if self.chars.get(self.pos + 1) == Some(&'=') => {
				self.pos += 2;
				AttrOp::Prefix(self.value()?)
			}
			_ => return Err(self.error(format!("unsupported attribute operator in [{name}]"))),
		};
		self.skip_ws();
		if self.peek() != Some(']') {
			return Err(self.error(format!("unterminated attribute filter [{name}")));
		}
		self.pos += 1;
		Ok(AttrFilter { name, op })
	}

	fn value(&mut self) -> Result<String> {
		self.skip_ws();
		match self.peek() {
			Some(quote @ ('"' | '\'')) => {
				self.pos += 1;
				let start = self.pos;
				while self.peek().is_some_and(|c| c != quote) {
					self.pos += 1;
				}
				if self.peek().is_none() {
					return Err(self.error("unterminated string"));
				}
				let value = self.chars[start..self.pos].iter().collect();
				self.pos += 1;
				Ok(value)
			}
			_ => self.expect_ident("attribute value"),
		}
	}
}
