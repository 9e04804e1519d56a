//! Tests for all-or-nothing deck loading.

use std::fs;

use strictly_imposter::{DeckId, DeckStore, DirectorySource, LoadError, StaticSource, WordEntry};

const FOOD: &str = r#"[
    {"word": "Pizza", "hint": "Italian"},
    {"word": "Sushi", "hint": "Japanese"}
]"#;

const ANIMALS: &str = r#"[{"word": "Otter", "hint": "River"}]"#;

fn ids(names: &[&str]) -> Vec<DeckId> {
    names.iter().map(|n| DeckId::from(*n)).collect()
}

#[tokio::test]
async fn test_static_source_loads_all_decks() {
    let source = StaticSource::new()
        .with_deck("food", FOOD)
        .with_deck("animals", ANIMALS);

    let store = DeckStore::load(&source, &ids(&["food", "animals"]))
        .await
        .expect("both decks valid");

    assert_eq!(store.len(), 2);
    let food = store.get(&"food".into()).expect("food loaded");
    assert_eq!(food.entries()[1], WordEntry::new("Sushi", "Japanese"));
    assert_eq!(
        store.ids().map(DeckId::as_str).collect::<Vec<_>>(),
        vec!["animals", "food"]
    );
}

#[tokio::test]
async fn test_one_missing_deck_fails_everything() {
    let source = StaticSource::new().with_deck("food", FOOD);

    let result = DeckStore::load(&source, &ids(&["food", "animals"])).await;
    assert!(matches!(
        result,
        Err(LoadError::Unreachable { ref id, .. }) if id.as_str() == "animals"
    ));
}

#[tokio::test]
async fn test_one_malformed_deck_fails_everything() {
    let source = StaticSource::new()
        .with_deck("food", FOOD)
        .with_deck("broken", "[{\"word\": \"Pizza\"");

    let result = DeckStore::load(&source, &ids(&["food", "broken"])).await;
    assert!(matches!(result, Err(LoadError::Malformed { .. })));
}

#[tokio::test]
async fn test_no_decks_requested() {
    let result = DeckStore::load(&StaticSource::new(), &[]).await;
    assert_eq!(result, Err(LoadError::NoDecks));
}

#[tokio::test]
async fn test_directory_source_reads_json_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("food.json"), FOOD).expect("write food");
    fs::write(dir.path().join("animals.json"), ANIMALS).expect("write animals");
    fs::write(dir.path().join("notes.txt"), "not a deck").expect("write notes");

    let discovered = DirectorySource::discover(dir.path())
        .await
        .expect("readable dir");
    assert_eq!(discovered, ids(&["animals", "food"]));

    let source = DirectorySource::new(dir.path());
    let store = DeckStore::load(&source, &discovered)
        .await
        .expect("valid decks");
    assert_eq!(store.get(&"animals".into()).map(|d| d.len()), Some(1));
}

#[tokio::test]
async fn test_directory_source_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = DirectorySource::new(dir.path());

    let result = DeckStore::load(&source, &ids(&["food"])).await;
    let err = result.expect_err("no food.json");
    assert!(err.to_string().starts_with("Deck 'food' is unreachable"));
}

#[tokio::test]
async fn test_discover_missing_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("nope");
    let result = DirectorySource::discover(&missing).await;
    assert!(matches!(result, Err(LoadError::Directory { .. })));
}
