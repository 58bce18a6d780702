// Dweve ICMX - Intercompany Message Extraction
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Lenient XML tree for tolerant message parsing.
//!
//! Intercompany messages arrive malformed often enough that a validating
//! parser is the wrong tool: truncated documents, unclosed elements, stray
//! end tags, and trailing garbage must all still yield whatever structure can
//! be recovered. This module drives a [`quick_xml`] event reader with end-tag
//! name checking disabled and folds the event stream into a plain owned tree.
//!
//! Recovery rules:
//!
//! - Element and attribute names are stored as *local* names; namespace
//!   prefixes are dropped, so queries work identically on prefixed and
//!   unprefixed documents.
//! - A stray end tag with no matching open element is ignored.
//! - An end tag matching an outer element implicitly closes everything the
//!   document left dangling in between.
//! - Elements still open at end of input are closed implicitly.
//! - A reader error stops parsing and keeps the tree built so far.
//!
//! The single hard failure is input from which no root element can be
//! recovered at all.

use crate::error::{IcmxError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;

/// Maximum element nesting depth. Content below this depth is dropped
/// rather than treated as an error (prevents stack overflow in recursive
/// queries over hostile input).
const MAX_ELEMENT_DEPTH: usize = 200;

/// One node of the recovered tree: an element or a run of character data.
///
/// Text nodes are kept verbatim (no whitespace normalization); field
/// consumers decide what to trim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(Element),
    Text(String),
}

/// An element of the recovered tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Local element name (namespace prefix stripped).
    pub name: String,
    /// Attributes in document order, keys as local names.
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<XmlNode>,
}

impl Element {
    /// Value of the named attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct child elements in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(el) => Some(el),
            XmlNode::Text(_) => None,
        })
    }

    /// Direct child elements with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.child_elements().filter(move |el| el.name == name)
    }

    /// Direct text nodes in document order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Text(text) => Some(text.as_str()),
            XmlNode::Element(_) => None,
        })
    }

    /// Resolve a descendant chain of element names, returning every match in
    /// document order.
    ///
    /// The first step matches this element itself or any descendant; each
    /// subsequent step matches any descendant of the previous matches. This
    /// mirrors a `a//b//c`-style path where intermediate structure may sit
    /// between the named elements.
    pub fn find_path<'a>(&'a self, path: &[&str]) -> Vec<&'a Element> {
        let mut current: Vec<&Element> = Vec::new();
        match path.split_first() {
            None => return vec![self],
            Some((first, rest)) => {
                if self.name == *first {
                    current.push(self);
                }
                collect_descendants_named(self, first, &mut current);
                for step in rest {
                    let mut next = Vec::new();
                    for el in current {
                        collect_descendants_named(el, step, &mut next);
                    }
                    current = next;
                }
            }
        }
        current
    }
}

fn collect_descendants_named<'a>(el: &'a Element, name: &str, out: &mut Vec<&'a Element>) {
    for child in el.child_elements() {
        if child.name == name {
            out.push(child);
        }
        collect_descendants_named(child, name, out);
    }
}

fn local_name(name: QName<'_>) -> String {
    String::from_utf8_lossy(name.local_name().as_ref()).into_owned()
}

fn element_from(start: &BytesStart<'_>) -> Element {
    let name = local_name(start.name());
    let mut attributes = Vec::new();
    for attr in start.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        attributes.push((key, value));
    }
    Element {
        name,
        attributes,
        children: Vec::new(),
    }
}

/// Attach a finished element to the innermost open element, or promote it to
/// root when nothing is open. Extra top-level siblings after the root are
/// dropped; the scanner isolates one message per call.
fn attach(el: Element, stack: &mut Vec<Element>, root: &mut Option<Element>) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlNode::Element(el));
    } else if root.is_none() {
        *root = Some(el);
    }
}

/// Parse one message into a recovered element tree.
///
/// Never fails on malformed content as long as at least one element can be
/// recovered; returns a `ParseError` only when the input contains no usable
/// element at all.
pub fn parse_lenient(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    reader.check_end_names(false);

    let mut root: Option<Element> = None;
    let mut stack: Vec<Element> = Vec::new();
    // Number of open elements beyond MAX_ELEMENT_DEPTH, tracked so their
    // end tags do not desynchronize the stack.
    let mut dropped_depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                if dropped_depth > 0 || stack.len() >= MAX_ELEMENT_DEPTH {
                    dropped_depth += 1;
                    continue;
                }
                stack.push(element_from(&start));
            }
            Ok(Event::Empty(start)) => {
                if dropped_depth > 0 || stack.len() >= MAX_ELEMENT_DEPTH {
                    continue;
                }
                attach(element_from(&start), &mut stack, &mut root);
            }
            Ok(Event::End(end)) => {
                if dropped_depth > 0 {
                    dropped_depth -= 1;
                    continue;
                }
                let name = local_name(end.name());
                if let Some(pos) = stack.iter().rposition(|el| el.name == name) {
                    // Implicitly close anything left dangling above the match.
                    while stack.len() > pos + 1 {
                        if let Some(unclosed) = stack.pop() {
                            attach(unclosed, &mut stack, &mut root);
                        }
                    }
                    if let Some(el) = stack.pop() {
                        attach(el, &mut stack, &mut root);
                    }
                }
                // Stray end tag without a matching open element: ignored.
            }
            Ok(Event::Text(text)) => {
                if dropped_depth > 0 {
                    continue;
                }
                let value = match text.unescape() {
                    Ok(value) => value.into_owned(),
                    Err(_) => String::from_utf8_lossy(text.as_ref()).into_owned(),
                };
                if let Some(open) = stack.last_mut() {
                    open.children.push(XmlNode::Text(value));
                }
                // Character data outside any element is chunk noise; dropped.
            }
            Ok(Event::CData(cdata)) => {
                if dropped_depth > 0 {
                    continue;
                }
                let value = String::from_utf8_lossy(cdata.as_ref()).into_owned();
                if let Some(open) = stack.last_mut() {
                    open.children.push(XmlNode::Text(value));
                }
            }
            Ok(Event::Eof) => break,
            // Declarations, processing instructions, comments, doctypes.
            Ok(_) => {}
            // Best-effort recovery: keep whatever tree exists so far.
            Err(_) => break,
        }
    }

    // Close elements left open at end of input.
    while let Some(el) = stack.pop() {
        attach(el, &mut stack, &mut root);
    }

    root.ok_or_else(|| IcmxError::parse("no element could be recovered from message text"))
}
