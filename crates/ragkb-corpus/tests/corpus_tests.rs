use ragkb_core::error::Error;
use ragkb_core::traits::KvStorage;
use ragkb_core::types::{OutcomeTag, SourceTag};
use ragkb_corpus::store::{JsonFileStore, MemoryStore};
use ragkb_corpus::CorpusManager;

#[test]
fn seed_if_empty_is_idempotent() {
    let manager = CorpusManager::open(Box::new(MemoryStore::new()));
    let first = manager.seed_if_empty().expect("seed");
    assert!(first > 0, "empty corpus gets seeded");
    let second = manager.seed_if_empty().expect("seed again");
    assert_eq!(second, 0, "non-empty corpus is never overwritten");
    assert_eq!(manager.len(), first);
    assert_eq!(manager.stats().builtin, first);
}

#[test]
fn add_free_text_splits_on_blank_lines() {
    let manager = CorpusManager::open(Box::new(MemoryStore::new()));
    let added = manager.add_free_text("A\n\nB\n\n\nC").expect("add");
    assert_eq!(added, 3);

    let snapshot = manager.snapshot();
    let texts: Vec<&str> = snapshot.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["A", "B", "C"]);
    assert!(snapshot.iter().all(|c| c.source == SourceTag::User));
}

#[test]
fn add_free_text_keeps_intra_segment_newlines() {
    let manager = CorpusManager::open(Box::new(MemoryStore::new()));
    let added = manager.add_free_text("line one\nline two\n\nsecond chunk").expect("add");
    assert_eq!(added, 2);
    let snapshot = manager.snapshot();
    assert_eq!(snapshot[0].text, "line one\nline two");
    assert_eq!(snapshot[1].text, "second chunk");
}

#[test]
fn blank_input_is_rejected_and_appends_nothing() {
    let manager = CorpusManager::open(Box::new(MemoryStore::new()));
    let err = manager.add_free_text("   \n\n  ").expect_err("blank input");
    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(manager.is_empty());
}

#[test]
fn chunk_ids_are_unique() {
    let manager = CorpusManager::open(Box::new(MemoryStore::new()));
    manager.seed_if_empty().expect("seed");
    manager.add_free_text("one\n\ntwo\n\nthree").expect("add");
    let snapshot = manager.snapshot();
    let mut ids: Vec<&str> = snapshot.iter().map(|c| c.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), snapshot.len());
}

#[test]
fn qa_pair_renders_outcome_question_answer() {
    let manager = CorpusManager::open(Box::new(MemoryStore::new()));
    manager
        .save_qa_pair("How do I center a div?", "Use flexbox.", OutcomeTag::Helpful)
        .expect("save");
    let snapshot = manager.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(
        snapshot[0].text,
        "Outcome: helpful\nQuestion: How do I center a div?\nAnswer: Use flexbox."
    );
}

#[test]
fn snapshot_orders_builtin_before_user() {
    let mixed = CorpusManager::open(Box::new(MemoryStore::new()));
    mixed.seed_if_empty().expect("seed");
    mixed.add_free_text("user addition").expect("add");
    let snapshot = mixed.snapshot();
    let first_user = snapshot.iter().position(|c| c.source == SourceTag::User).expect("user chunk");
    assert!(snapshot[..first_user].iter().all(|c| c.source == SourceTag::Builtin));
    assert!(snapshot[first_user..].iter().all(|c| c.source == SourceTag::User));
}

#[test]
fn corpus_round_trips_through_storage() {
    let snapshot = {
        let manager = CorpusManager::open(Box::new(MemoryStore::new()));
        manager.seed_if_empty().expect("seed");
        manager.add_free_text("remember me").expect("add");
        manager.snapshot()
    };
    let serialized = serde_json::to_string(snapshot.as_ref()).expect("serialize");
    let store = MemoryStore::with_value("corpus", &serialized);
    let reloaded = CorpusManager::open(Box::new(store));
    assert_eq!(reloaded.len(), snapshot.len());
    assert_eq!(reloaded.snapshot()[0].id, snapshot[0].id);
}

/// Accepts reads but refuses every write.
struct ReadOnlyStore;

impl KvStorage for ReadOnlyStore {
    fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
        anyhow::bail!("disk full")
    }
}

#[test]
fn failed_persist_leaves_corpus_unchanged() {
    let manager = CorpusManager::open(Box::new(ReadOnlyStore));

    let err = manager.add_free_text("dragon lore").expect_err("write fails");
    assert!(matches!(err, Error::Storage(_)));
    assert!(manager.is_empty(), "a reported-failed add must not grow the corpus");

    let err = manager.seed_if_empty().expect_err("write fails");
    assert!(matches!(err, Error::Storage(_)));
    assert!(manager.is_empty());

    let err = manager
        .save_qa_pair("q", "a", OutcomeTag::Helpful)
        .expect_err("write fails");
    assert!(matches!(err, Error::Storage(_)));
    assert!(manager.is_empty());

    assert!(manager.snapshot().is_empty(), "snapshots never see uncommitted chunks");
}

#[test]
fn corrupt_stored_corpus_reads_as_empty() {
    let store = MemoryStore::with_value("corpus", "{not json at all");
    let manager = CorpusManager::open(Box::new(store));
    assert!(manager.is_empty(), "corrupt data is tolerated, never fatal");
}

#[test]
fn json_file_store_round_trip() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = JsonFileStore::new(tmp.path().to_path_buf()).expect("store");
    assert_eq!(store.get("corpus").expect("get"), None);
    store.set("corpus", "[]").expect("set");
    assert_eq!(store.get("corpus").expect("get").as_deref(), Some("[]"));

    let manager = CorpusManager::open(Box::new(store));
    manager.add_free_text("persisted chunk").expect("add");

    let reopened =
        CorpusManager::open(Box::new(JsonFileStore::new(tmp.path().to_path_buf()).expect("store")));
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.snapshot()[0].text, "persisted chunk");
}
