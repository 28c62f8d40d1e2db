//! Parsed theory store replies.
//!
//! Replies are OMDoc/HTML fragments. Only a handful of shapes are read, so
//! the reply is kept as a small owned element tree with namespace prefixes
//! dropped from element and attribute names.

use std::ptr;

use quick_xml::Error as XmlError;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use mosis_types::StoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    /// Local name, without namespace prefix.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Direct child elements, in document order.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// Concatenated direct text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                XmlNode::Text(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    /// This element and everything below it, in document order.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// The siblings following `target` among this element's children.
    fn following_siblings<'a>(&'a self, target: &XmlElement) -> Option<Vec<&'a XmlElement>> {
        let children: Vec<&XmlElement> = self.elements().collect();
        let at = children.iter().position(|child| ptr::eq(*child, target))?;
        Some(children[at + 1..].to_vec())
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(XmlError::from)?;
            let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
            let value = attribute.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }
}

/// Pre-order iterator over an element subtree.
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        let children: Vec<&XmlElement> = next.elements().collect();
        self.stack.extend(children.into_iter().rev());
        Some(next)
    }
}

fn parse_document(xml: &str) -> Result<Option<XmlElement>, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(XmlElement::from_start(&start)?),
            Event::Empty(start) => {
                let element = XmlElement::from_start(&start)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element);
                }
            }
            Event::Text(text) => {
                if let Some(parent) = stack.last_mut() {
                    parent
                        .children
                        .push(XmlNode::Text(text.unescape()?.into_owned()));
                }
            }
            Event::CData(data) => {
                if let Some(parent) = stack.last_mut() {
                    let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                    parent.children.push(XmlNode::Text(text));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(root)
}

fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

/// A successful reply from the theory store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreReply {
    raw: String,
    root: Option<XmlElement>,
}

impl StoreReply {
    /// Parse a reply body. Bodies that do not start with `<` have no tree.
    ///
    /// Any element with `class="error"` turns the reply into a [`StoreError`],
    /// using the text of its `class="message"` child when there is one.
    pub fn parse(body: impl Into<String>) -> Result<Self, StoreError> {
        let raw = body.into();
        let root = if raw.trim_start().starts_with('<') {
            parse_document(&raw).map_err(|err| {
                StoreError::with_detail(
                    format!("could not parse the theory store's reply: {err}"),
                    raw.clone(),
                )
            })?
        } else {
            None
        };

        if let Some(root) = &root {
            let mut failed = false;
            for element in root.descendants() {
                if element.attribute("class") != Some("error") {
                    continue;
                }
                failed = true;
                if let Some(message) = element
                    .elements()
                    .find(|child| child.attribute("class") == Some("message"))
                {
                    return Err(StoreError::with_detail(message.text(), raw));
                }
            }
            if failed {
                return Err(StoreError::with_detail(
                    "the theory store reported an error",
                    raw,
                ));
            }
        }

        Ok(Self { raw, root })
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn root(&self) -> Option<&XmlElement> {
        self.root.as_ref()
    }

    fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.root
            .iter()
            .flat_map(XmlElement::descendants)
            .filter(move |element| element.name() == name)
    }

    #[must_use]
    pub fn constant(&self, name: &str) -> Option<&XmlElement> {
        self.elements_named("constant")
            .find(|element| element.attribute("name") == Some(name))
    }

    #[must_use]
    pub fn definition(&self, name: &str) -> Option<&XmlElement> {
        self.constant(name)?
            .elements()
            .find(|child| child.name() == "definition")
    }

    #[must_use]
    pub fn has_definition(&self, name: &str) -> bool {
        self.definition(name).is_some()
    }

    /// Head symbol of a constant's declared type; arrow applications are
    /// rendered as `A ⟶ B`.
    #[must_use]
    pub fn constant_type(&self, name: &str) -> Option<String> {
        let declared = self
            .constant(name)?
            .elements()
            .find(|child| child.name() == "type")?;
        for parent in declared.descendants() {
            let Some(head) = parent.elements().find(|child| child.name() == "OMS") else {
                continue;
            };
            let head_name = head.attribute("name")?;
            if head_name != "arrow" {
                return Some(head_name.to_owned());
            }
            let operands = parent.following_siblings(head)?;
            let names: Vec<&str> = operands
                .iter()
                .filter_map(|operand| operand.attribute("name"))
                .collect();
            return Some(names.join(" ⟶ "));
        }
        None
    }

    /// Lower and upper `value` of the `interval` application in `name`'s definition.
    #[must_use]
    pub fn interval_boundaries(&self, name: &str) -> Option<(String, String)> {
        let definition = self.definition(name)?;
        for parent in definition.descendants() {
            let Some(head) = parent
                .elements()
                .find(|child| child.name() == "OMS" && child.attribute("name") == Some("interval"))
            else {
                continue;
            };
            let operands = parent.following_siblings(head)?;
            let lower = operands.first()?.attribute("value")?;
            let upper = operands.get(1)?.attribute("value")?;
            return Some((lower.to_owned(), upper.to_owned()));
        }
        None
    }

    /// The rendered type of a type-inference reply: all `mo` texts, space separated.
    #[must_use]
    pub fn inferred_type(&self) -> String {
        let symbols: Vec<String> = self
            .elements_named("mo")
            .map(XmlElement::text)
            .filter(|text| !text.trim().is_empty())
            .collect();
        symbols.join(" ").trim().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN_REPLY: &str = r#"<omdoc xmlns:om="http://www.openmath.org/OpenMath">
  <theory name="ephdomain">
    <constant name="Ω">
      <type><om:OMOBJ><om:OMS base="http://cds.omdoc.org/urtheories" module="Typed" name="type"/></om:OMOBJ></type>
      <definition><om:OMOBJ><om:OMA>
        <om:OMS base="http://mathhub.info/MitM/smglom/calculus" module="Interval" name="interval"/>
        <om:OMLIT value="0" type="real"/>
        <om:OMLIT value="1" type="real"/>
      </om:OMA></om:OMOBJ></definition>
    </constant>
    <constant name="u">
      <type><om:OMOBJ><om:OMA>
        <om:OMS name="arrow"/><om:OMS name="Ω"/><om:OMS name="ℝ"/>
      </om:OMA></om:OMOBJ></type>
    </constant>
  </theory>
</omdoc>"#;

    #[test]
    fn reads_interval_boundaries() {
        let reply = StoreReply::parse(DOMAIN_REPLY).unwrap();
        assert!(reply.has_definition("Ω"));
        assert!(!reply.has_definition("u"));
        assert_eq!(
            reply.interval_boundaries("Ω"),
            Some(("0".to_owned(), "1".to_owned()))
        );
        assert_eq!(reply.interval_boundaries("u"), None);
    }

    #[test]
    fn renders_constant_types() {
        let reply = StoreReply::parse(DOMAIN_REPLY).unwrap();
        assert_eq!(reply.constant_type("Ω").as_deref(), Some("type"));
        assert_eq!(reply.constant_type("u").as_deref(), Some("Ω ⟶ ℝ"));
        assert_eq!(reply.constant_type("missing"), None);
    }

    #[test]
    fn joins_inferred_type_symbols() {
        let reply = StoreReply::parse(
            "<math><mrow><mo>Ω</mo><mo>→</mo><mo>ℝ</mo></mrow></math>",
        )
        .unwrap();
        assert_eq!(reply.inferred_type(), "Ω → ℝ");
    }

    #[test]
    fn error_class_becomes_store_error() {
        let body = r#"<div class="error"><div class="message">unbound token: foo</div></div>"#;
        let err = StoreReply::parse(body).unwrap_err();
        assert_eq!(err.message(), "unbound token: foo");
        assert_eq!(err.detail(), Some(body));

        let err = StoreReply::parse(r#"<div><span class="error">boom</span></div>"#).unwrap_err();
        assert_eq!(err.message(), "the theory store reported an error");
    }

    #[test]
    fn plain_text_has_no_tree() {
        let reply = StoreReply::parse("ok").unwrap();
        assert!(reply.root().is_none());
        assert_eq!(reply.raw(), "ok");
        assert_eq!(reply.inferred_type(), "");
    }

    #[test]
    fn malformed_xml_is_a_store_error() {
        let err = StoreReply::parse("<a><b></a>").unwrap_err();
        assert!(err.message().starts_with("could not parse"));
    }

    #[test]
    fn unescapes_text_and_attributes() {
        let reply = StoreReply::parse(r#"<r><constant name="a&amp;b"><definition/></constant><mo>&lt;</mo></r>"#)
            .unwrap();
        assert!(reply.has_definition("a&b"));
        assert_eq!(reply.inferred_type(), "<");
    }
}
