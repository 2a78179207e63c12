use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single observed network session as reported by the collector.
///
/// Only the endpoint pair and byte count are required; the remaining
/// NetFlow v5 attributes are carried through to the structured output
/// formats when the collector supplies them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlowEntry {
    pub source_host: String,
    pub source_port: u16,
    pub dest_host: String,
    pub dest_port: u16,
    #[serde(alias = "bytes", alias = "num_octets")]
    pub byte_count: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_hop: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packet_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp_flags: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tos: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_as: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_as: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snmp_in: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snmp_out: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_seen: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
}

impl FlowEntry {
    pub fn new(
        source_host: impl Into<String>,
        source_port: u16,
        dest_host: impl Into<String>,
        dest_port: u16,
        byte_count: u64,
    ) -> Self {
        FlowEntry {
            source_host: source_host.into(),
            source_port,
            dest_host: dest_host.into(),
            dest_port,
            byte_count,
            ..Default::default()
        }
    }

    /// Optional attributes that are present, in a fixed order, rendered as text
    pub fn extra_attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = Vec::new();
        if let Some(ref hop) = self.next_hop {
            attrs.push(("next_hop", hop.clone()));
        }
        let numeric = [
            ("packet_count", self.packet_count),
            ("protocol", self.protocol.map(u64::from)),
            ("tcp_flags", self.tcp_flags.map(u64::from)),
            ("tos", self.tos.map(u64::from)),
            ("source_as", self.source_as.map(u64::from)),
            ("dest_as", self.dest_as.map(u64::from)),
            ("snmp_in", self.snmp_in.map(u64::from)),
            ("snmp_out", self.snmp_out.map(u64::from)),
        ];
        for (name, value) in numeric {
            if let Some(v) = value {
                attrs.push((name, v.to_string()));
            }
        }
        if let Some(ts) = self.first_seen {
            attrs.push(("first_seen", ts.to_rfc3339()));
        }
        if let Some(ts) = self.last_seen {
            attrs.push(("last_seen", ts.to_rfc3339()));
        }
        attrs
    }
}

/// A batch of flows reported together for one interval, in capture order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlowRecord {
    #[serde(default)]
    pub flows: Vec<FlowEntry>,
}

impl FlowRecord {
    pub fn new(flows: Vec<FlowEntry>) -> Self {
        FlowRecord { flows }
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Parse one record from a JSON line
    pub fn from_json(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line.trim())
    }
}

impl From<Vec<FlowEntry>> for FlowRecord {
    fn from(flows: Vec<FlowEntry>) -> Self {
        FlowRecord::new(flows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_record() {
        let record = FlowRecord::from_json(
            r#"{"flows":[{"source_host":"10.0.0.1","source_port":80,"dest_host":"10.0.0.2","dest_port":443,"bytes":1500}]}"#,
        )
        .unwrap();

        assert_eq!(record.len(), 1);
        assert_eq!(record.flows[0].byte_count, 1500);
        assert_eq!(record.flows[0].protocol, None);
    }

    #[test]
    fn test_missing_flows_is_empty() {
        let record = FlowRecord::from_json("{}").unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn test_port_out_of_range_rejected() {
        let result = FlowRecord::from_json(
            r#"{"flows":[{"source_host":"a","source_port":70000,"dest_host":"b","dest_port":1,"byte_count":1}]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_extra_attributes_order() {
        let mut entry = FlowEntry::new("a", 1, "b", 2, 3);
        entry.tos = Some(4);
        entry.protocol = Some(6);
        entry.next_hop = Some("10.0.0.254".to_string());

        let names: Vec<&str> = entry.extra_attributes().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["next_hop", "protocol", "tos"]);
    }
}
