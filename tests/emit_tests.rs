mod common;

use common::{scratch_dir, valid_record};
use recifetch::CandidateRecord;
use recifetch::engine::parse_search_output;
use recifetch::pipeline::{BatchSink, JsonFileSink};
use recifetch::utils::temp_path_for;

#[test]
fn test_writes_pretty_json_with_korean_text() {
    let dir = scratch_dir("emit_pretty");
    let out = dir.join("filtered_videos.json");
    let mut sink = JsonFileSink::new(&out);
    sink.write_batch(&[valid_record("a"), valid_record("b")])
        .unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains("백종원"), "non-ASCII must not be escaped");
    assert!(text.contains("\n  {"), "output should be indented");
    let parsed: Vec<CandidateRecord> = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, vec![valid_record("a"), valid_record("b")]);
    assert!(!temp_path_for(&out).exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_record_keys() {
    let value = serde_json::to_value(valid_record("k")).unwrap();
    for key in [
        "id",
        "title",
        "description",
        "duration",
        "view_count",
        "categories",
        "channel",
    ] {
        assert!(value.get(key).is_some(), "missing key {key}");
    }
}

#[test]
fn test_extractor_extras_written_back_out() {
    let dir = scratch_dir("emit_extra");
    let out = dir.join("out.json");
    let line = r#"{"id":"x9","title":"떡볶이","thumbnail":"https://i.ytimg.com/vi/x9/hq.jpg","chapters":[{"title":"소스","start_time":30.0}]}"#;
    let records = parse_search_output(line, 20).unwrap();
    JsonFileSink::new(&out).write_batch(&records).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc[0]["thumbnail"], "https://i.ytimg.com/vi/x9/hq.jpg");
    assert_eq!(doc[0]["chapters"][0]["start_time"], 30.0);
    assert!(doc[0].get("extra").is_none(), "extras sit beside the known keys");

    let parsed: Vec<CandidateRecord> = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, records);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_empty_batch_is_empty_array() {
    let dir = scratch_dir("emit_empty");
    let out = dir.join("out.json");
    JsonFileSink::new(&out).write_batch(&[]).unwrap();
    assert_eq!(std::fs::read_to_string(&out).unwrap().trim(), "[]");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_overwrites_previous_batch_and_clears_stale_temp() {
    let dir = scratch_dir("emit_overwrite");
    let out = dir.join("out.json");
    std::fs::write(&out, "old").unwrap();
    std::fs::write(temp_path_for(&out), "half-written").unwrap();

    JsonFileSink::new(&out)
        .write_batch(&[valid_record("new")])
        .unwrap();
    let parsed: Vec<CandidateRecord> =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(parsed[0].id, "new");
    assert!(!temp_path_for(&out).exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_unwritable_destination_fails_and_leaves_nothing() {
    let dir = scratch_dir("emit_fail");
    let out = dir.join("missing_subdir").join("out.json");
    let err = JsonFileSink::new(&out).write_batch(&[valid_record("a")]);
    assert!(err.is_err());
    assert!(!out.exists());
    let _ = std::fs::remove_dir_all(&dir);
}
