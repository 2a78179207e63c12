use crate::error::FormatError;
use crate::formatters::line::DEFAULT_LABEL;
use crate::formatters::{DisplayEntry, EntryFormatter};
use serde_json::{Map, Value};

/// One JSON object per flow, keys in a stable order
pub struct JsonlFormatter {
    label: String,
}

impl JsonlFormatter {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL)
    }
}

impl EntryFormatter for JsonlFormatter {
    fn format_entry(&self, display: &DisplayEntry) -> Result<String, FormatError> {
        let fields = match serde_json::to_value(display.entry)? {
            Value::Object(fields) => fields,
            other => {
                return Err(FormatError::Invalid(format!(
                    "flow serialized to non-object: {}",
                    other
                )))
            }
        };

        let mut obj = Map::new();
        obj.insert("label".to_string(), Value::String(self.label.clone()));
        for (key, value) in fields {
            let value = match key.as_str() {
                "source_host" => Value::String(display.source_host.to_string()),
                "dest_host" => Value::String(display.dest_host.to_string()),
                _ => value,
            };
            obj.insert(key, value);
        }

        Ok(serde_json::to_string(&Value::Object(obj))?)
    }

    fn format_marker(&self, marker: &str) -> String {
        serde_json::json!({ "label": self.label, "msg": marker }).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::FlowEntry;

    #[test]
    fn test_resolved_hosts_replace_raw() {
        let entry = FlowEntry::new("10.0.0.1", 80, "10.0.0.2", 443, 1500);
        let display = DisplayEntry::new(&entry, "web.internal", "10.0.0.2");

        let line = JsonlFormatter::new("f").format_entry(&display).unwrap();
        assert_eq!(
            line,
            r#"{"label":"f","source_host":"web.internal","source_port":80,"dest_host":"10.0.0.2","dest_port":443,"byte_count":1500}"#
        );
    }

    #[test]
    fn test_optional_attributes_included_when_present() {
        let mut entry = FlowEntry::new("a", 1, "b", 2, 3);
        entry.tcp_flags = Some(0x12);
        let display = DisplayEntry::new(&entry, "a", "b");

        let line = JsonlFormatter::default().format_entry(&display).unwrap();
        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["tcp_flags"], 18);
        assert!(parsed.get("protocol").is_none());
    }

    #[test]
    fn test_marker_is_json() {
        let marker = JsonlFormatter::default().format_marker("This is the config");
        let parsed: Value = serde_json::from_str(&marker).unwrap();
        assert_eq!(parsed["msg"], "This is the config");
        assert_eq!(parsed["label"], "JS Proof!");
    }
}
