//! CSS selector queries over the arena DOM.
//!
//! Supports what the page script needs from `querySelector`: type, class,
//! id, universal and attribute selectors (`[a]`, `[a=v]`, `[a^=v]`,
//! `[a$=v]`, `[a*=v]`, `[a~=v]`), compounds of those, descendant and
//! child combinators, and comma-separated lists.

use folio_types::error::{FolioError, Result};

use crate::dom::{Document, NodeId};

// -------------------------------------------------------------------
// Selector types
// -------------------------------------------------------------------

/// A single, atomic selector component.
#[derive(Debug, Clone, PartialEq)]
pub enum SimpleSelector {
    /// Type selector: `div`, `section`.
    Type(String),
    /// Class selector: `.classname`.
    Class(String),
    /// ID selector: `#idname`.
    Id(String),
    /// Universal selector: `*`.
    Universal,
    /// Attribute selector: `[name]`, `[name^="v"]`.
    Attribute(AttributeSelector),
}

/// Attribute test inside `[...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    /// `None` for a bare presence test.
    pub matcher: Option<(AttrOp, String)>,
}

/// Attribute value operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrOp {
    /// `=`
    Equals,
    /// `^=`
    Prefix,
    /// `$=`
    Suffix,
    /// `*=`
    Substring,
    /// `~=`
    Word,
}

/// Combinator linking two compound selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Descendant: `div p` (whitespace).
    Descendant,
    /// Child: `div > p`.
    Child,
}

/// Simple selectors that must all match the same element.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSelector {
    pub parts: Vec<SimpleSelector>,
}

/// A chain of compound selectors. Each entry stores the combinator that
/// *preceded* it (`None` for the first in the chain).
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    pub parts: Vec<(CompoundSelector, Option<Combinator>)>,
}

/// Comma-separated list of selectors.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    pub selectors: Vec<Selector>,
}

impl SelectorList {
    /// Parse a selector list such as `section[id], header[id]`.
    pub fn parse(input: &str) -> Result<Self> {
        SelectorParser::new(input).parse_list().inspect_err(|e| {
            log::debug!("rejected selector {input:?}: {e}");
        })
    }

    /// Whether any selector in the list matches `node_id`.
    pub fn matches(&self, doc: &Document, node_id: NodeId) -> bool {
        self.selectors
            .iter()
            .any(|sel| matches_selector(doc, node_id, sel))
    }
}

// -------------------------------------------------------------------
// Parser
// -------------------------------------------------------------------

struct SelectorParser<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, what: &str) -> FolioError {
        FolioError::Selector(format!("{what} at offset {} in `{}`", self.pos, self.input))
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos != start
    }

    fn parse_list(&mut self) -> Result<SelectorList> {
        let mut selectors = Vec::new();
        loop {
            self.skip_whitespace();
            selectors.push(self.parse_selector()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => self.pos += 1,
                None => break,
                Some(_) => return Err(self.error("unexpected character")),
            }
        }
        Ok(SelectorList { selectors })
    }

    fn parse_selector(&mut self) -> Result<Selector> {
        let first = self
            .parse_compound()?
            .ok_or_else(|| self.error("expected selector"))?;
        let mut parts = vec![(first, None)];
        loop {
            let had_ws = self.skip_whitespace();
            let combinator = match self.peek() {
                Some('>') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    Combinator::Child
                },
                Some(',') | None => break,
                Some(_) if had_ws => Combinator::Descendant,
                Some(_) => return Err(self.error("unexpected character")),
            };
            let compound = self
                .parse_compound()?
                .ok_or_else(|| self.error("expected selector after combinator"))?;
            parts.push((compound, Some(combinator)));
        }
        Ok(Selector { parts })
    }

    fn parse_compound(&mut self) -> Result<Option<CompoundSelector>> {
        let mut parts = Vec::new();
        loop {
            match self.peek() {
                Some('*') => {
                    self.pos += 1;
                    parts.push(SimpleSelector::Universal);
                },
                Some('#') => {
                    self.pos += 1;
                    parts.push(SimpleSelector::Id(self.parse_ident()?));
                },
                Some('.') => {
                    self.pos += 1;
                    parts.push(SimpleSelector::Class(self.parse_ident()?));
                },
                Some('[') => {
                    self.pos += 1;
                    parts.push(SimpleSelector::Attribute(self.parse_attribute()?));
                },
                Some(c) if is_ident_char(c) && parts.is_empty() => {
                    parts.push(SimpleSelector::Type(self.parse_ident()?.to_ascii_lowercase()));
                },
                _ => break,
            }
        }
        Ok(if parts.is_empty() {
            None
        } else {
            Some(CompoundSelector { parts })
        })
    }

    fn parse_ident(&mut self) -> Result<String> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.error("expected identifier"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector> {
        self.skip_whitespace();
        let name = self.parse_ident()?;
        self.skip_whitespace();
        let op = match self.peek() {
            Some(']') => {
                self.pos += 1;
                return Ok(AttributeSelector {
                    name,
                    matcher: None,
                });
            },
            Some('=') => {
                self.pos += 1;
                AttrOp::Equals
            },
            Some(c @ ('^' | '$' | '*' | '~')) if self.chars.get(self.pos + 1) == Some(&'=') => {
                self.pos += 2;
                match c {
                    '^' => AttrOp::Prefix,
                    '$' => AttrOp::Suffix,
                    '*' => AttrOp::Substring,
                    _ => AttrOp::Word,
                }
            },
            _ => return Err(self.error("expected attribute operator")),
        };
        self.skip_whitespace();
        let value = match self.peek() {
            Some(q @ ('"' | '\'')) => {
                self.pos += 1;
                let start = self.pos;
                while self.peek().is_some_and(|c| c != q) {
                    self.pos += 1;
                }
                if self.peek().is_none() {
                    return Err(self.error("unterminated string"));
                }
                let value: String = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                value
            },
            _ => self.parse_ident()?,
        };
        self.skip_whitespace();
        if self.peek() != Some(']') {
            return Err(self.error("expected `]`"));
        }
        self.pos += 1;
        Ok(AttributeSelector {
            name,
            matcher: Some((op, value)),
        })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

// -----------------------------------------------------------------------
// Selector matching
// -----------------------------------------------------------------------

/// Check if a parsed selector matches a given element.
///
/// The last compound is the subject; the remaining parts are matched
/// right-to-left towards the root.
fn matches_selector(doc: &Document, node_id: NodeId, selector: &Selector) -> bool {
    let parts = &selector.parts;
    let Some(last_idx) = parts.len().checked_sub(1) else {
        return false;
    };
    if !matches_compound(doc, node_id, &parts[last_idx].0) {
        return false;
    }

    let mut current = node_id;
    for i in (0..last_idx).rev() {
        let compound = &parts[i].0;
        match parts[i + 1].1 {
            Some(Combinator::Child) => match parent_element(doc, current) {
                Some(pid) if matches_compound(doc, pid, compound) => current = pid,
                _ => return false,
            },
            Some(Combinator::Descendant) | None => {
                let mut ancestor = parent_element(doc, current);
                loop {
                    match ancestor {
                        Some(anc) if matches_compound(doc, anc, compound) => {
                            current = anc;
                            break;
                        },
                        Some(anc) => ancestor = parent_element(doc, anc),
                        None => return false,
                    }
                }
            },
        }
    }
    true
}

fn parent_element(doc: &Document, node_id: NodeId) -> Option<NodeId> {
    doc.get(node_id).parent.filter(|&p| doc.element(p).is_some())
}

fn matches_compound(doc: &Document, node_id: NodeId, compound: &CompoundSelector) -> bool {
    compound
        .parts
        .iter()
        .all(|simple| matches_simple(doc, node_id, simple))
}

fn matches_simple(doc: &Document, node_id: NodeId, simple: &SimpleSelector) -> bool {
    let Some(elem) = doc.element(node_id) else {
        return false;
    };
    match simple {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(tag) => elem.tag.as_str().eq_ignore_ascii_case(tag),
        SimpleSelector::Class(cls) => elem.has_class(cls),
        SimpleSelector::Id(id) => elem.id() == Some(id.as_str()),
        SimpleSelector::Attribute(attr) => {
            let Some(actual) = elem.get_attribute(&attr.name) else {
                return false;
            };
            match &attr.matcher {
                None => true,
                Some((AttrOp::Equals, v)) => actual == v,
                Some((AttrOp::Prefix, v)) => !v.is_empty() && actual.starts_with(v.as_str()),
                Some((AttrOp::Suffix, v)) => !v.is_empty() && actual.ends_with(v.as_str()),
                Some((AttrOp::Substring, v)) => !v.is_empty() && actual.contains(v.as_str()),
                Some((AttrOp::Word, v)) => actual.split_ascii_whitespace().any(|w| w == v),
            }
        },
    }
}

// -----------------------------------------------------------------------
// Document queries
// -----------------------------------------------------------------------

impl Document {
    /// First connected element matching `selector`, in document order.
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .descendants(self.root)
            .find(|&n| list.matches(self, n)))
    }

    /// Every connected element matching `selector`, in document order.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .descendants(self.root)
            .filter(|&n| list.matches(self, n))
            .collect())
    }

    /// Nearest inclusive ancestor of `id` matching `selector`.
    pub fn closest(&self, id: NodeId, selector: &str) -> Result<Option<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .ancestors_inclusive(id)
            .find(|&n| list.matches(self, n)))
    }

    /// Whether element `id` matches `selector`.
    pub fn matches(&self, id: NodeId, selector: &str) -> Result<bool> {
        Ok(SelectorList::parse(selector)?.matches(self, id))
    }
}
