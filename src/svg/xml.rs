use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::svg::document::{DiagnosticKind, SvgDiagnostic};

/// Element of the tolerant XML tree. Names are local names (`svg:rect` becomes `rect`).
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct XmlElement {
    pub(crate) name: String,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) children: Vec<XmlElement>,
}

impl XmlElement {
    /// Attribute by local name; later duplicates win.
    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Parse `src` into its top-level elements.
///
/// Never fails: syntax errors end the parse early (with every open element closed) and are
/// reported as diagnostics. An end tag closes back to the nearest open element of that name;
/// an end tag with no matching open element is ignored. Elements nested deeper than
/// `max_depth` are dropped with their subtree.
pub(crate) fn parse_tree(
    src: &str,
    max_depth: usize,
    diagnostics: &mut Vec<SvgDiagnostic>,
) -> Vec<XmlElement> {
    let mut reader = Reader::from_str(src);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.check_comments = false;

    let mut roots: Vec<XmlElement> = Vec::new();
    let mut open: Vec<XmlElement> = Vec::new();
    // Depth inside a subtree that is being skipped for exceeding `max_depth`.
    let mut skipping = 0usize;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if skipping > 0 {
                    skipping += 1;
                } else if open.len() >= max_depth {
                    diagnostics.push(too_deep(&e, max_depth));
                    skipping = 1;
                } else {
                    open.push(element(&e, diagnostics));
                }
            }
            Ok(Event::Empty(e)) if skipping == 0 => {
                if open.len() >= max_depth {
                    diagnostics.push(too_deep(&e, max_depth));
                } else {
                    let el = element(&e, diagnostics);
                    attach(&mut open, &mut roots, el);
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if skipping > 0 {
                    skipping -= 1;
                } else if let Some(pos) = open.iter().rposition(|el| el.name == name) {
                    while open.len() > pos {
                        if let Some(el) = open.pop() {
                            attach(&mut open, &mut roots, el);
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                diagnostics.push(SvgDiagnostic::new(
                    DiagnosticKind::MalformedMarkup,
                    "document",
                    format!("xml syntax error: {err}"),
                ));
                break;
            }
        }
        buf.clear();
    }

    while let Some(el) = open.pop() {
        attach(&mut open, &mut roots, el);
    }
    roots
}

fn attach(open: &mut [XmlElement], roots: &mut Vec<XmlElement>, el: XmlElement) {
    match open.last_mut() {
        Some(parent) => parent.children.push(el),
        None => roots.push(el),
    }
}

fn too_deep(e: &BytesStart<'_>, max_depth: usize) -> SvgDiagnostic {
    SvgDiagnostic::new(
        DiagnosticKind::ResourceExhaustion,
        local_name(e),
        format!("nesting deeper than {max_depth} levels; subtree skipped"),
    )
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn element(e: &BytesStart<'_>, diagnostics: &mut Vec<SvgDiagnostic>) -> XmlElement {
    let name = local_name(e);
    let mut attrs = Vec::new();
    for attr in e.html_attributes().with_checks(false) {
        let attr = match attr {
            Ok(a) => a,
            Err(err) => {
                diagnostics.push(SvgDiagnostic::new(
                    DiagnosticKind::MalformedMarkup,
                    name.clone(),
                    format!("bad attribute: {err}"),
                ));
                break;
            }
        };
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = match attr.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        attrs.push((key, value));
    }
    XmlElement {
        name,
        attrs,
        children: Vec::new(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/svg/xml.rs"]
mod tests;
