//! End-to-end tests for the bank over scripted services.

use hcore::testing::{ScriptedCompletion, SeedEmbedder};
use hindsight_bank::{Bank, Granularity};
use json::JsonStore;

const ITEM: &str = r#"[{"title":"T","description":"D","content":"C"}]"#;

fn bank(completion: ScriptedCompletion) -> Bank<JsonStore, SeedEmbedder, ScriptedCompletion> {
    Bank::new(JsonStore::in_memory(), SeedEmbedder::new(8), completion)
}

#[tokio::test]
async fn successful_experience_is_stored_and_retrievable() {
    let bank = bank(ScriptedCompletion::new(["Success", ITEM]));

    bank.add_experience("searched the index and found X in the second result", "find X")
        .await
        .unwrap();
    assert_eq!(bank.store.len(), 1);

    let memories = bank.retrieve_memories("related query to X", 1).await.unwrap();
    assert_eq!(memories.len(), 1);
    assert_eq!(memories[0]["content"], "C");
    assert_eq!(memories[0]["title"], "T");
}

#[tokio::test]
async fn malformed_distillation_stores_nothing() {
    let bank = bank(ScriptedCompletion::new(["Success", "not json at all"]));
    bank.add_experience("trajectory", "query").await.unwrap();
    assert!(bank.store.is_empty());
}

#[tokio::test]
async fn non_list_distillation_stores_nothing() {
    let bank = bank(ScriptedCompletion::new(["Failure", r#"{"title":"T"}"#]));
    bank.add_experience("trajectory", "query").await.unwrap();
    assert!(bank.store.is_empty());
}

#[tokio::test]
async fn judgment_service_failure_is_a_silent_noop() {
    // Empty script: the judgment call itself fails.
    let bank = bank(ScriptedCompletion::new(Vec::<String>::new()));
    bank.add_experience("trajectory", "query").await.unwrap();
    assert!(bank.store.is_empty());
}

#[tokio::test]
async fn embedding_failure_propagates() {
    struct BrokenEmbedder;
    impl hcore::Embedder for BrokenEmbedder {
        async fn embed(&self, _text: &str) -> anyhow::Result<Vec<f32>> {
            anyhow::bail!("embedding service is down")
        }
    }

    let bank = Bank::new(
        JsonStore::in_memory(),
        BrokenEmbedder,
        ScriptedCompletion::new(["Success", ITEM]),
    );
    let err = bank.add_experience("trajectory", "query").await.unwrap_err();
    assert!(err.to_string().contains("embedding service is down"));
    assert!(bank.store.is_empty());
}

#[tokio::test]
async fn per_item_granularity_stores_one_record_per_item() {
    let items = r#"[
        {"title":"A","description":"da","content":"ca"},
        {"title":"B","description":"db","content":"cb"}
    ]"#;
    let bank = bank(ScriptedCompletion::new(["Success", items]));
    bank.add_experience("trajectory", "query").await.unwrap();
    assert_eq!(bank.store.len(), 2);
}

#[tokio::test]
async fn per_experience_granularity_stores_whole_episode() {
    let bank = bank(ScriptedCompletion::new(["Success", ITEM]))
        .with_granularity(Granularity::PerExperience);
    bank.add_experience("the full trajectory", "find X").await.unwrap();
    assert_eq!(bank.store.len(), 1);

    let memories = bank.retrieve_memories("find X", 1).await.unwrap();
    let episode = &memories[0];
    assert_eq!(episode["query"], "find X");
    assert_eq!(episode["trajectory"], "the full trajectory");
    assert_eq!(episode["verdict"], true);
    assert_eq!(episode["items"][0]["content"], "C");
}

#[tokio::test]
async fn retrieval_from_empty_store_returns_nothing() {
    let bank = bank(ScriptedCompletion::new(Vec::<String>::new()));
    let memories = bank.retrieve_memories("anything", 3).await.unwrap();
    assert!(memories.is_empty());
}
