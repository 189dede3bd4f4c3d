//! Forward-only XML event cursors
//!
//! The dimension prevalidator walks XML one event at a time, the way a
//! pull parser is used. [`XmlCursor`] is that contract; two implementations
//! exist:
//!
//! - [`ReaderCursor`] streams raw XML text through quick-xml without building
//!   a tree, for prevalidating documents before anything else is done.
//! - [`TreeCursor`] replays an already parsed [`Element`] subtree, used when
//!   the orchestration has the geometry element in hand.
//!
//! Both start positioned *before* the first event, like a fresh pull parser,
//! and report empty elements as a start event followed by an end event.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::dom::{Element, Node, get_local_name};
use crate::error::{Error, Result};

/// Kind of the event a cursor is positioned on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorEvent {
    /// Before the first event
    StartDocument,
    /// Start of an element
    StartElement,
    /// End of an element
    EndElement,
    /// Character data
    Characters,
    /// Comments, processing instructions, declarations
    Other,
    /// The stream is exhausted
    EndDocument,
}

/// A forward-only cursor over XML events
pub trait XmlCursor {
    /// The event the cursor is positioned on
    fn event(&self) -> CursorEvent;

    /// Returns `true` while further events can be read
    fn has_next(&self) -> bool {
        self.event() != CursorEvent::EndDocument
    }

    /// Advance to the next event and return its kind
    fn advance(&mut self) -> Result<CursorEvent>;

    /// Local name of the current element (start or end event)
    fn local_name(&self) -> Option<&str>;

    /// Attribute of the current start element, looked up by local name
    fn attribute(&self, local_name: &str) -> Option<&str>;
}

/// Cursor streaming raw XML text
pub struct ReaderCursor<'a> {
    reader: Reader<&'a [u8]>,
    buf: Vec<u8>,
    event: CursorEvent,
    local_name: String,
    attributes: Vec<(String, String)>,
    pending_end: bool,
}

impl<'a> ReaderCursor<'a> {
    /// Create a cursor over an XML string
    pub fn from_str(xml: &'a str) -> Self {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        Self {
            reader,
            buf: Vec::with_capacity(1024),
            event: CursorEvent::StartDocument,
            local_name: String::new(),
            attributes: Vec::new(),
            pending_end: false,
        }
    }

    fn capture_start(&mut self, e: &BytesStart) -> Result<()> {
        let qname = e.name();
        let name =
            std::str::from_utf8(qname.as_ref()).map_err(|e| Error::InvalidXml(e.to_string()))?;
        self.local_name = get_local_name(name).to_string();
        self.attributes.clear();

        for attr in e.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| Error::InvalidXml(e.to_string()))?;
            if key == "xmlns" || key.starts_with("xmlns:") {
                continue;
            }
            let value =
                std::str::from_utf8(&attr.value).map_err(|e| Error::InvalidXml(e.to_string()))?;
            self.attributes
                .push((get_local_name(key).to_string(), value.to_string()));
        }
        Ok(())
    }
}

impl XmlCursor for ReaderCursor<'_> {
    fn event(&self) -> CursorEvent {
        self.event
    }

    fn advance(&mut self) -> Result<CursorEvent> {
        if self.event == CursorEvent::EndDocument {
            return Err(Error::InvalidXml(
                "Cannot advance past the end of the document".to_string(),
            ));
        }

        if self.pending_end {
            self.pending_end = false;
            self.event = CursorEvent::EndElement;
            return Ok(self.event);
        }

        self.buf.clear();
        // Detach the buffer so the reader borrow does not overlap `capture_start`
        let mut buf = std::mem::take(&mut self.buf);
        let result = match self.reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => self.capture_start(e).map(|_| CursorEvent::StartElement),
            Ok(Event::Empty(ref e)) => self.capture_start(e).map(|_| {
                self.pending_end = true;
                CursorEvent::StartElement
            }),
            Ok(Event::End(ref e)) => std::str::from_utf8(e.name().as_ref())
                .map_err(|e| Error::InvalidXml(e.to_string()))
                .map(|name| {
                    self.local_name = get_local_name(name).to_string();
                    self.attributes.clear();
                    CursorEvent::EndElement
                }),
            Ok(Event::Text(_)) | Ok(Event::CData(_)) => Ok(CursorEvent::Characters),
            Ok(Event::Eof) => Ok(CursorEvent::EndDocument),
            Ok(_) => Ok(CursorEvent::Other),
            Err(e) => Err(Error::Xml(e)),
        };
        self.buf = buf;

        match result {
            Ok(event) => {
                self.event = event;
                Ok(event)
            }
            Err(e) => {
                // A broken stream cannot be resumed
                self.event = CursorEvent::EndDocument;
                Err(e)
            }
        }
    }

    fn local_name(&self) -> Option<&str> {
        match self.event {
            CursorEvent::StartElement | CursorEvent::EndElement => Some(&self.local_name),
            _ => None,
        }
    }

    fn attribute(&self, local_name: &str) -> Option<&str> {
        if self.event != CursorEvent::StartElement {
            return None;
        }
        self.attributes
            .iter()
            .find(|(key, _)| key == local_name)
            .map(|(_, value)| value.as_str())
    }
}

enum TreeEvent<'e> {
    Start(&'e Element),
    End(&'e Element),
    Text,
}

/// Cursor replaying an element subtree
pub struct TreeCursor<'e> {
    events: Vec<TreeEvent<'e>>,
    // Index of the current event; `None` before the first one
    position: Option<usize>,
}

impl<'e> TreeCursor<'e> {
    /// Create a cursor over `root` and its descendants
    pub fn new(root: &'e Element) -> Self {
        let mut events = Vec::new();
        flatten(root, &mut events);
        Self {
            events,
            position: None,
        }
    }

    fn current(&self) -> Option<&TreeEvent<'e>> {
        self.position.and_then(|i| self.events.get(i))
    }
}

fn flatten<'e>(element: &'e Element, events: &mut Vec<TreeEvent<'e>>) {
    events.push(TreeEvent::Start(element));
    for node in &element.children {
        match node {
            Node::Element(child) => flatten(child, events),
            Node::Text(_) => events.push(TreeEvent::Text),
        }
    }
    events.push(TreeEvent::End(element));
}

impl XmlCursor for TreeCursor<'_> {
    fn event(&self) -> CursorEvent {
        match self.position {
            None => CursorEvent::StartDocument,
            Some(i) => match self.events.get(i) {
                Some(TreeEvent::Start(_)) => CursorEvent::StartElement,
                Some(TreeEvent::End(_)) => CursorEvent::EndElement,
                Some(TreeEvent::Text) => CursorEvent::Characters,
                None => CursorEvent::EndDocument,
            },
        }
    }

    fn advance(&mut self) -> Result<CursorEvent> {
        let next = match self.position {
            None => 0,
            Some(i) if i < self.events.len() => i + 1,
            Some(_) => {
                return Err(Error::InvalidXml(
                    "Cannot advance past the end of the document".to_string(),
                ));
            }
        };
        self.position = Some(next);
        Ok(self.event())
    }

    fn local_name(&self) -> Option<&str> {
        match self.current() {
            Some(TreeEvent::Start(e)) | Some(TreeEvent::End(e)) => Some(e.local_name()),
            _ => None,
        }
    }

    fn attribute(&self, local_name: &str) -> Option<&str> {
        match self.current() {
            Some(TreeEvent::Start(e)) => e.attribute(local_name),
            _ => None,
        }
    }
}
