// Chunk payloads as seen by the ingestion target

use crate::common::{create_test_services, TestRepo};
use kbindex::core::types::ChunkKind;
use std::collections::HashSet;

#[tokio::test]
async fn test_python_class_methods_carry_enclosing_class() {
    let repo = TestRepo::mixed();
    let (services, client, _state) = create_test_services();
    services.scheduler.expand(repo.path(), 100).await.unwrap();

    let chunks = client.chunks_for("app/models.py");
    let names: Vec<&str> = chunks.iter().map(|c| c.metadata.name.as_str()).collect();
    assert_eq!(names, vec!["models.py", "User", "__init__", "greet", "load"]);

    let greet = &chunks[3];
    assert_eq!(greet.metadata.kind, ChunkKind::Function);
    assert_eq!(greet.metadata.class.as_deref(), Some("User"));
    assert_eq!(greet.metadata.language, "python");

    let load = &chunks[4];
    assert_eq!(load.metadata.class, None);
}

#[tokio::test]
async fn test_chunks_reassemble_source_file() {
    let repo = TestRepo::mixed();
    let (services, client, _state) = create_test_services();
    services.scheduler.expand(repo.path(), 100).await.unwrap();

    for file in ["src/main.rs", "src/store.rs", "web/app.js"] {
        let original = std::fs::read_to_string(repo.path().join(file)).unwrap();
        let rebuilt: String = client
            .chunks_for(file)
            .into_iter()
            .map(|c| c.content)
            .collect();
        assert_eq!(rebuilt, original, "chunks of {file} should cover it exactly");
    }
}

#[tokio::test]
async fn test_documentation_is_one_file_chunk() {
    let repo = TestRepo::mixed();
    let (services, client, _state) = create_test_services();
    services.scheduler.expand(repo.path(), 100).await.unwrap();

    let readme = client.chunks_for("README.md");
    assert_eq!(readme.len(), 1);
    assert_eq!(readme[0].metadata.kind, ChunkKind::File);
    assert_eq!(readme[0].source_key, "README.md#L0-3");
}

#[tokio::test]
async fn test_source_keys_are_unique() {
    let repo = TestRepo::mixed();
    let (services, client, _state) = create_test_services();
    services.scheduler.expand(repo.path(), 100).await.unwrap();

    let payloads = client.payloads();
    let keys: HashSet<&str> = payloads.iter().map(|p| p.source_key.as_str()).collect();
    assert_eq!(keys.len(), payloads.len());
}

#[tokio::test]
async fn test_multibyte_content_survives() {
    let source = "// 中文注释\nfn 测试() {\n    println!(\"你好世界 🚀\");\n}\n";
    let repo = TestRepo::with_files(&[("src/unicode.rs", source)]);
    let (services, client, _state) = create_test_services();

    let report = services.scheduler.expand(repo.path(), 10).await.unwrap();
    assert_eq!(report.files_indexed_this_batch, 1);

    let rebuilt: String = client
        .chunks_for("src/unicode.rs")
        .into_iter()
        .map(|c| c.content)
        .collect();
    assert_eq!(rebuilt, source);
}
