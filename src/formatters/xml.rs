use crate::error::FormatError;
use crate::formatters::{DisplayEntry, EntryFormatter};

const FLOW_TAG: &str = "flow";
const ATTR_TAG: &str = "attribute";
const NAME_TAG: &str = "name";
const VALUE_TAG: &str = "value";

/// Renders each flow as a `<flow>` element of name/value attributes
#[derive(Default)]
pub struct XmlFormatter;

impl XmlFormatter {
    pub fn new() -> Self {
        Self
    }

    fn wrap_attribute(out: &mut String, name: &str, value: &str) {
        out.push_str(&format!(
            "<{ATTR_TAG}><{NAME_TAG}>{}</{NAME_TAG}><{VALUE_TAG}>{}</{VALUE_TAG}></{ATTR_TAG}>",
            escape(name),
            escape(value)
        ));
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl EntryFormatter for XmlFormatter {
    fn format_entry(&self, display: &DisplayEntry) -> Result<String, FormatError> {
        let entry = display.entry;
        let mut out = format!("<{FLOW_TAG}>");

        Self::wrap_attribute(&mut out, "sourceAddr", display.source_host);
        Self::wrap_attribute(&mut out, "sourcePort", &entry.source_port.to_string());
        Self::wrap_attribute(&mut out, "destAddr", display.dest_host);
        Self::wrap_attribute(&mut out, "destPort", &entry.dest_port.to_string());
        Self::wrap_attribute(&mut out, "numOctets", &entry.byte_count.to_string());
        for (name, value) in entry.extra_attributes() {
            Self::wrap_attribute(&mut out, name, &value);
        }

        out.push_str(&format!("</{FLOW_TAG}>"));
        Ok(out)
    }

    fn format_marker(&self, marker: &str) -> String {
        // A comment keeps the stream a sequence of <flow> elements
        format!("<!-- {} -->", marker.replace("--", "- -"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::FlowEntry;

    #[test]
    fn test_flow_element() {
        let entry = FlowEntry::new("10.0.0.1", 80, "10.0.0.2", 443, 1500);
        let display = DisplayEntry::new(&entry, "web", "10.0.0.2");

        let xml = XmlFormatter::new().format_entry(&display).unwrap();
        assert!(xml.starts_with("<flow><attribute><name>sourceAddr</name><value>web</value></attribute>"));
        assert!(xml.contains("<name>numOctets</name><value>1500</value>"));
        assert!(xml.ends_with("</flow>"));
    }

    #[test]
    fn test_markup_is_escaped() {
        let entry = FlowEntry::new("<a&b>", 1, "b", 2, 3);
        let display = DisplayEntry::new(&entry, &entry.source_host, &entry.dest_host);

        let xml = XmlFormatter::new().format_entry(&display).unwrap();
        assert!(xml.contains("<value>&lt;a&amp;b&gt;</value>"));
    }

    #[test]
    fn test_line_breaks_are_escaped() {
        let mut entry = FlowEntry::new("a", 1, "b", 2, 3);
        entry.next_hop = Some("10.0.0.1\r\nx".to_string());
        let display = DisplayEntry::new(&entry, "a", "b");

        let xml = XmlFormatter::new().format_entry(&display).unwrap();
        assert_eq!(xml.lines().count(), 1);
        assert!(xml.contains("<value>10.0.0.1&#13;&#10;x</value>"));
    }

    #[test]
    fn test_marker_is_comment() {
        assert_eq!(
            XmlFormatter::new().format_marker("This is the config"),
            "<!-- This is the config -->"
        );
    }
}
