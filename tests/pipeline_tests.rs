mod common;

use anyhow::anyhow;
use common::{FakeHistory, FakeSource, FakeVocabulary, scratch_dir, valid_record};
use recifetch::engine::VideoFetcher;
use recifetch::pipeline::{
    BatchSink, CollectSettings, JsonFileSink, MemorySink, Pipeline, Unavailable, ValidationRules,
    Validator,
};
use recifetch::{CandidateRecord, Opts};
use std::collections::HashSet;

fn pipeline(fetcher: &VideoFetcher) -> Pipeline<'_> {
    Pipeline::new(
        fetcher,
        Validator::new(ValidationRules::default()),
        CollectSettings::default(),
    )
}

fn ids(batch: &[CandidateRecord]) -> Vec<&str> {
    batch.iter().map(|r| r.id.as_str()).collect()
}

struct FailingSink;

impl BatchSink for FailingSink {
    fn write_batch(&mut self, _batch: &[CandidateRecord]) -> anyhow::Result<()> {
        Err(anyhow!("disk full"))
    }
}

#[test]
fn test_end_to_end_single_term() {
    let mut unpopular = valid_record("low");
    unpopular.view_count = Some(100);
    let source = FakeSource::default().with("한식 레시피", vec![valid_record("good"), unpopular]);
    let calls = source.calls.clone();
    let fetcher = VideoFetcher::new(source);
    let mut p = pipeline(&fetcher);
    p.seed(&FakeHistory(Vec::new()), &FakeVocabulary(vec!["한식".to_string()]));

    let collected = p.collect();
    assert_eq!(collected.len(), 2);
    let batch = p.filter(collected);
    assert_eq!(ids(&batch), ["good"]);
    assert_eq!(p.summary().queries, 4);
    assert_eq!(p.summary().rejected, [0, 1, 0, 0, 0]);

    let mut queried: Vec<String> = calls
        .lock()
        .unwrap()
        .iter()
        .map(|(q, _)| q.clone())
        .collect();
    queried.sort();
    assert_eq!(queried, ["간단한 요리", "자취생 요리", "한식 레시피", "한식 만들기"]);
}

#[test]
fn test_fetch_failure_is_isolated() {
    let fetcher = VideoFetcher::new(
        FakeSource::default()
            .failing("A")
            .with("B", vec![valid_record("b1"), valid_record("b2")]),
    );
    let mut p = pipeline(&fetcher);
    let mut sink = MemorySink::default();
    let collected = p.collect_queries(&["A".to_string(), "B".to_string()]);
    let batch = p.filter(collected);
    p.emit(&batch, &mut sink).unwrap();

    assert_eq!(sink.batches.len(), 1);
    let got: HashSet<&str> = ids(&sink.batches[0]).into_iter().collect();
    assert_eq!(got, HashSet::from(["b1", "b2"]));
}

#[test]
fn test_seeded_ids_never_accepted() {
    let fetcher = VideoFetcher::new(
        FakeSource::default().with("q", vec![valid_record("old"), valid_record("new")]),
    );
    let mut p = pipeline(&fetcher);
    p.seed(
        &FakeHistory(vec!["old".to_string()]),
        &FakeVocabulary(Vec::new()),
    );
    let collected = p_collect(&mut p, &["q"]);
    let batch = p.filter(collected);
    assert_eq!(ids(&batch), ["new"]);
    assert_eq!(p.summary().duplicates, 1);
}

fn p_collect(p: &mut Pipeline<'_>, queries: &[&str]) -> Vec<CandidateRecord> {
    let queries: Vec<String> = queries.iter().map(|q| q.to_string()).collect();
    p.collect_queries(&queries)
}

#[test]
fn test_same_video_from_two_queries_collected_once() {
    let fetcher = VideoFetcher::new(
        FakeSource::default()
            .with("q1", vec![valid_record("shared"), valid_record("a")])
            .with("q2", vec![valid_record("shared"), valid_record("b")]),
    );
    let mut p = pipeline(&fetcher);
    let batch = {
        let collected = p_collect(&mut p, &["q1", "q2"]);
        p.filter(collected)
    };
    assert_eq!(batch.len(), 3);
    let unique: HashSet<&str> = ids(&batch).into_iter().collect();
    assert_eq!(unique.len(), 3);
}

#[test]
fn test_invalid_duplicate_still_marks_seen() {
    let mut short = valid_record("x");
    short.duration = Some(5);
    let fetcher = VideoFetcher::new(
        FakeSource::default()
            .with("q1", vec![short])
            .with("q2", vec![valid_record("x")]),
    );
    let mut p = pipeline(&fetcher);
    let collected = p_collect(&mut p, &["q1", "q2"]);
    assert_eq!(collected.len(), 1);
    assert!(p.filter(collected).is_empty());
}

#[test]
fn test_second_collection_with_same_history_is_empty() {
    let history = FakeHistory(vec!["seeded".to_string()]);
    let vocabulary = FakeVocabulary(vec!["김밥".to_string()]);
    let fetcher = VideoFetcher::new(
        FakeSource::default().with("김밥 레시피", vec![valid_record("k1"), valid_record("k2")]),
    );
    let mut p = pipeline(&fetcher);

    p.seed(&history, &vocabulary);
    let first = p.collect();
    let first = p.filter(first);
    assert_eq!(first.len(), 2);

    p.seed(&history, &vocabulary);
    let second = p.collect();
    let second = p.filter(second);
    assert!(second.is_empty());
}

#[test]
fn test_max_results_passed_to_source_and_enforced() {
    let source = FakeSource::default().with(
        "q",
        (0..10).map(|i| valid_record(&format!("v{i}"))).collect(),
    );
    let calls = source.calls.clone();
    let fetcher = VideoFetcher::new(source);
    let mut p = Pipeline::new(
        &fetcher,
        Validator::default(),
        CollectSettings {
            max_results: 3,
            ..Default::default()
        },
    );
    let collected = p_collect(&mut p, &["q"]);
    assert_eq!(collected.len(), 3);
    assert_eq!(calls.lock().unwrap().as_slice(), [("q".to_string(), 3)]);
}

#[test]
fn test_parallel_collection_matches_sequential() {
    let build = || {
        FakeSource::default()
            .with("q1", vec![valid_record("shared"), valid_record("a")])
            .with("q2", vec![valid_record("shared"), valid_record("b")])
            .with("q3", vec![valid_record("c")])
            .failing("q4")
    };
    let queries = ["q1", "q2", "q3", "q4"];

    let seq_fetcher = VideoFetcher::new(build());
    let mut seq = pipeline(&seq_fetcher);
    let seq_ids: HashSet<String> = p_collect(&mut seq, &queries)
        .into_iter()
        .map(|r| r.id)
        .collect();

    let par_fetcher = VideoFetcher::new(build());
    let mut par = Pipeline::new(
        &par_fetcher,
        Validator::default(),
        CollectSettings {
            fetch_threads: 4,
            ..Default::default()
        },
    );
    let par_batch = p_collect(&mut par, &queries);
    assert_eq!(par_batch.len(), 4);
    let par_ids: HashSet<String> = par_batch.into_iter().map(|r| r.id).collect();
    assert_eq!(seq_ids, par_ids);
}

#[test]
fn test_run_emits_exactly_once() {
    let fetcher = VideoFetcher::new(FakeSource::default().with("한식 레시피", vec![valid_record("v")]));
    let mut p = pipeline(&fetcher);
    let mut sink = MemorySink::default();
    let summary = p
        .run(
            &Unavailable("offline".to_string()),
            &Unavailable("offline".to_string()),
            &mut sink,
        )
        .unwrap();
    assert_eq!(sink.batches.len(), 1);
    assert_eq!(ids(&sink.batches[0]), ["v"]);
    assert_eq!(summary.queries, 8);
    assert_eq!(summary.accepted, 1);
}

#[test]
fn test_emit_failure_is_fatal() {
    let fetcher = VideoFetcher::new(FakeSource::default());
    let mut p = pipeline(&fetcher);
    let err = p
        .run(
            &FakeHistory(Vec::new()),
            &FakeVocabulary(Vec::new()),
            &mut FailingSink,
        )
        .unwrap_err();
    assert!(format!("{:#}", err).contains("disk full"));
}

#[test]
fn test_crawl_writes_json_file() {
    let dir = scratch_dir("crawl");
    let out = dir.join("batch.json");
    let mut sink = JsonFileSink::new(&out);
    let mut unpopular = valid_record("low");
    unpopular.view_count = Some(100);
    let source = FakeSource::default()
        .with("된장 레시피", vec![valid_record("ok"), unpopular])
        .failing("된장 만들기");
    let summary = recifetch::crawl(
        source,
        &FakeHistory(Vec::new()),
        &FakeVocabulary(vec!["된장".to_string()]),
        ValidationRules::default(),
        &Opts::default(),
        &mut sink,
    )
    .unwrap();
    assert_eq!(summary.accepted, 1);

    let written: Vec<CandidateRecord> =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(ids(&written), ["ok"]);
    let _ = std::fs::remove_dir_all(&dir);
}
