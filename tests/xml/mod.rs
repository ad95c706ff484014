use std::fmt::Write;

use markup_fuse::{Attributes, Codec, Element, ElementId, Event, NamespaceMap};
use thiserror::Error;

/// Just enough XML to drive `fuse` from fixtures: elements with quoted
/// attributes, comments, processing instructions and the three basic
/// entities. No DTDs, CDATA or namespaces handling beyond declarations.
#[derive(Debug)]
pub struct Xml;

#[derive(Error, Debug)]
pub enum XmlError {
    #[error("unterminated {0} at byte {1}")]
    Unterminated(&'static str, usize),

    #[error("</{found}> doesn't close <{expected}>")]
    Mismatched { expected: String, found: String },

    #[error("<{0}> is never closed")]
    Unclosed(String),

    #[error("malformed attributes in <{0}>")]
    Attributes(String),

    #[error("exit of {0} without an open element")]
    StrayExit(ElementId),
}

impl Codec for Xml {
    type Document = String;
    type Error = XmlError;

    fn scan(&self, document: &String) -> Result<Vec<Event>, XmlError> {
        let mut events = Vec::new();
        let mut open: Vec<(ElementId, String)> = Vec::new();
        let mut next_id = 0;
        let mut rest = document.as_str();

        while !rest.is_empty() {
            let position = document.len() - rest.len();

            if let Some(after) = rest.strip_prefix("<!--") {
                let end = after
                    .find("-->")
                    .ok_or(XmlError::Unterminated("comment", position))?;
                events.push(Event::Comment(after[..end].to_owned()));
                rest = &after[end + 3..];
            } else if let Some(after) = rest.strip_prefix("<?") {
                let end = after
                    .find("?>")
                    .ok_or(XmlError::Unterminated("processing instruction", position))?;
                events.push(Event::ProcessingInstruction(after[..end].to_owned()));
                rest = &after[end + 2..];
            } else if let Some(after) = rest.strip_prefix("</") {
                let end = after
                    .find('>')
                    .ok_or(XmlError::Unterminated("closing tag", position))?;
                let found = after[..end].trim();
                match open.pop() {
                    Some((peer, expected)) if expected == found => {
                        events.push(Event::Exit { peer });
                    }
                    Some((_, expected)) => {
                        return Err(XmlError::Mismatched {
                            expected,
                            found: found.to_owned(),
                        });
                    }
                    None => {
                        return Err(XmlError::Mismatched {
                            expected: String::new(),
                            found: found.to_owned(),
                        });
                    }
                }
                rest = &after[end + 1..];
            } else if let Some(after) = rest.strip_prefix('<') {
                let end = after
                    .find('>')
                    .ok_or(XmlError::Unterminated("opening tag", position))?;
                let (body, is_empty) = match after[..end].strip_suffix('/') {
                    Some(body) => (body, true),
                    None => (&after[..end], false),
                };

                let (tag, attributes) = parse_tag(body)?;
                let id = ElementId(next_id);
                next_id += 1;

                events.push(Event::Enter(Element::new(id, tag.clone(), attributes)));
                if is_empty {
                    events.push(Event::Exit { peer: id });
                } else {
                    open.push((id, tag));
                }
                rest = &after[end + 1..];
            } else {
                let end = rest.find('<').unwrap_or(rest.len());
                events.push(Event::Text(unescape(&rest[..end])));
                rest = &rest[end..];
            }
        }

        match open.pop() {
            Some((_, tag)) => Err(XmlError::Unclosed(tag)),
            None => Ok(events),
        }
    }

    fn unscan<I>(&self, events: I, namespaces: Option<&NamespaceMap>) -> Result<String, XmlError>
    where
        I: Iterator<Item = Event>,
    {
        let mut events = events.peekable();
        let mut open = Vec::new();
        let mut declarations = namespaces.filter(|namespaces| !namespaces.is_empty());
        let mut result = String::new();

        while let Some(event) = events.next() {
            match event {
                Event::Enter(element) => {
                    let _ = write!(result, "<{}", element.tag);
                    for (prefix, uri) in declarations.take().into_iter().flatten() {
                        let _ = write!(result, " xmlns:{prefix}=\"{}\"", escape(uri, true));
                    }
                    for (name, value) in &element.attributes {
                        let _ = write!(result, " {name}=\"{}\"", escape(value, true));
                    }

                    if matches!(events.peek(), Some(Event::Exit { peer }) if *peer == element.id) {
                        events.next();
                        result.push_str("/>");
                    } else {
                        result.push('>');
                        open.push((element.id, element.tag));
                    }
                }
                Event::Exit { peer } => match open.pop() {
                    Some((id, tag)) if id == peer => {
                        let _ = write!(result, "</{tag}>");
                    }
                    _ => return Err(XmlError::StrayExit(peer)),
                },
                Event::Text(text) => result.push_str(&escape(&text, false)),
                Event::ProcessingInstruction(data) => {
                    let _ = write!(result, "<?{data}?>");
                }
                Event::Comment(content) => {
                    let _ = write!(result, "<!--{content}-->");
                }
            }
        }

        match open.pop() {
            Some((_, tag)) => Err(XmlError::Unclosed(tag)),
            None => Ok(result),
        }
    }
}

fn parse_tag(body: &str) -> Result<(String, Attributes), XmlError> {
    let body = body.trim();
    let (tag, mut rest) = body
        .split_once(char::is_whitespace)
        .unwrap_or((body, ""));

    let mut attributes = Attributes::new();
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        let malformed = || XmlError::Attributes(tag.to_owned());

        let (name, value) = rest.split_once('=').ok_or_else(malformed)?;
        let value = value.trim_start();
        let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'');
        let quote = quote.ok_or_else(malformed)?;
        let (value, after) = value[1..].split_once(quote).ok_or_else(malformed)?;

        attributes.push((name.trim().to_owned(), unescape(value)));
        rest = after;
    }

    Ok((tag.to_owned(), attributes))
}

fn escape(text: &str, in_attribute: bool) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' if in_attribute => result.push_str("&quot;"),
            c => result.push(c),
        }
    }
    result
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
