use flowlog::{
    FlowBackend, FlowEntry, FlowRecord, FlowRecordFormatter, HostResolver, OutputFormat,
    RawResolver, ResolveError, Settings,
};

struct BrokenDns;

impl HostResolver for BrokenDns {
    fn resolve(&self, host: &str) -> Result<String, ResolveError> {
        Err(ResolveError::Timeout {
            host: host.to_string(),
            timeout: std::time::Duration::from_millis(1),
        })
    }
}

fn record_of(count: u16) -> FlowRecord {
    (0..count)
        .map(|i| FlowEntry::new(format!("10.0.0.{}", i), 1000 + i, "10.1.0.1", 80, u64::from(i)))
        .collect::<Vec<_>>()
        .into()
}

#[test]
fn test_one_line_per_entry_in_order() {
    let mut backend = FlowRecordFormatter::default();

    for count in [0u16, 1, 7, 50] {
        let mut sink = Vec::new();
        let summary = backend.write(&record_of(count), &mut sink).unwrap();
        let output = String::from_utf8(sink).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(summary.lines_written, count as usize);
        assert_eq!(lines.len(), count as usize);
        for (i, line) in lines.iter().enumerate() {
            assert!(line.starts_with(&format!("JS Proof! source=10.0.0.{}:{},", i, 1000 + i)));
        }
    }
}

#[test]
fn test_two_writes_do_not_interleave() {
    let mut backend = FlowRecordFormatter::default();
    let first = FlowRecord::new(vec![
        FlowEntry::new("a", 1, "b", 2, 10),
        FlowEntry::new("c", 3, "d", 4, 20),
    ]);
    let second = FlowRecord::new(vec![FlowEntry::new("e", 5, "f", 6, 30)]);
    let mut sink = Vec::new();

    backend.write(&first, &mut sink).unwrap();
    backend.write(&second, &mut sink).unwrap();

    assert_eq!(
        String::from_utf8(sink).unwrap(),
        "JS Proof! source=a:1, dest=b:2, bytes=10\n\
         JS Proof! source=c:3, dest=d:4, bytes=20\n\
         JS Proof! source=e:5, dest=f:6, bytes=30\n"
    );
}

#[test]
fn test_resolver_failure_keeps_raw_addresses() {
    let mut backend = FlowRecordFormatter::new(
        OutputFormat::Line.formatter("JS Proof!"),
        Box::new(BrokenDns),
    );
    let record = FlowRecord::new(vec![FlowEntry::new("192.0.2.10", 123, "2001:db8::1", 123, 76)]);
    let mut sink = Vec::new();

    let summary = backend.write(&record, &mut sink).unwrap();

    assert_eq!(summary.entries_failed, 0);
    assert_eq!(
        String::from_utf8(sink).unwrap(),
        "JS Proof! source=192.0.2.10:123, dest=2001:db8::1:123, bytes=76\n"
    );
}

#[test]
fn test_record_is_left_untouched() {
    let mut backend = FlowRecordFormatter::new(
        OutputFormat::Jsonl.formatter("x"),
        Box::new(RawResolver),
    );
    let record = record_of(3);
    let before = record.clone();

    backend.write(&record, &mut Vec::<u8>::new()).unwrap();
    assert_eq!(record, before);
}

#[test]
fn test_initialize_accepts_any_config() {
    let settings = Settings {
        resolve: false,
        ..Settings::default()
    };
    let mut backend = FlowRecordFormatter::from_settings(&settings);
    let (_, document) = Settings::from_yaml("anything: [1, 2, 3]").unwrap();
    let mut sink = Vec::new();

    backend.initialize(None, &mut sink).unwrap();
    backend.initialize(Some(&document), &mut sink).unwrap();
    backend
        .initialize(Some(&serde_yaml::Value::Null), &mut sink)
        .unwrap();

    assert_eq!(String::from_utf8(sink).unwrap().lines().count(), 3);
}
