//! Parse sitemap.xml and sitemap index documents.

use crate::ScoutError;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Locations found in one sitemap document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitemapDocument {
    /// Every `loc` value in document order, whatever its parent
    pub locs: Vec<String>,

    /// `loc` values whose parent is `sitemap`, i.e. nested sitemaps
    pub nested: Vec<String>,
}

/// Parses a sitemap or sitemap index
///
/// Namespace prefixes are ignored, so `<ns:loc>` and `<loc>` are the same
/// element. Malformed or truncated XML is an error; nothing partial is
/// returned. `url` only labels the error.
pub fn parse_sitemap(url: &str, xml: &[u8]) -> Result<SitemapDocument, ScoutError> {
    let malformed = |message: String| ScoutError::SitemapParse {
        url: url.to_string(),
        message,
    };

    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut doc = SitemapDocument::default();
    let mut buf = Vec::new();
    // Local names of the currently open elements
    let mut stack: Vec<String> = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_lowercase();
                if name == "loc" {
                    text.clear();
                }
                stack.push(name);
            }
            Ok(Event::Text(e)) => {
                if stack.last().map(String::as_str) == Some("loc") {
                    let value = e.unescape().map_err(|e| malformed(e.to_string()))?;
                    text.push_str(&value);
                }
            }
            Ok(Event::CData(e)) => {
                if stack.last().map(String::as_str) == Some("loc") {
                    text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::End(_)) => {
                let Some(name) = stack.pop() else {
                    continue;
                };
                if name != "loc" {
                    continue;
                }
                let loc = text.trim();
                if !loc.is_empty() {
                    doc.locs.push(loc.to_string());
                    if stack.last().map(String::as_str) == Some("sitemap") {
                        doc.nested.push(loc.to_string());
                    }
                }
                text.clear();
            }
            Ok(Event::Eof) => {
                if let Some(open) = stack.last() {
                    return Err(malformed(format!(
                        "unexpected end of document inside <{}>",
                        open
                    )));
                }
                break;
            }
            Err(e) => {
                return Err(malformed(format!(
                    "XML error at position {}: {}",
                    reader.error_position(),
                    e
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(doc)
}
