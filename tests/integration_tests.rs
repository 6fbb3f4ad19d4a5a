use anyhow::Result;
use std::sync::Arc;
use sweepbox::domain::{CandidateSet, ContainerSummary, NameClassifier, is_auto_generated_name};
use sweepbox::services::{ContainerDiscovery, ContainerRemover};
use sweepbox::test_support::MockRuntime;
use tokio_util::sync::CancellationToken;

fn summary(id: &str, name: &str) -> ContainerSummary {
    ContainerSummary::new(id, vec![name.to_string()], "alpine:latest")
}

async fn discover(mock: &Arc<MockRuntime>) -> Result<CandidateSet> {
    let discovery = ContainerDiscovery::new(mock.clone(), NameClassifier::default());
    Ok(discovery.find_candidates(&CancellationToken::new()).await?)
}

#[tokio::test]
async fn test_clean_auto_named_containers_removes_matches() -> Result<()> {
    let mock = Arc::new(MockRuntime::new());
    mock.add_container(summary("id1", "/inspiring_franklin"));
    mock.add_container(summary("id2", "/custom_app"));
    mock.add_container(summary("id3", "/agitated_wescoff7"));
    mock.set_remove_not_found("id3");

    let candidates = discover(&mock).await?;
    let outcome = ContainerRemover::new(mock.clone())
        .remove_all(&CancellationToken::new(), &candidates)
        .await;

    assert!(outcome.error.is_none(), "unexpected error: {:?}", outcome.error);
    assert_eq!(outcome.removed, ["inspiring_franklin"]);
    assert!(
        !mock.get_commands().contains(&"remove:id2".to_string()),
        "custom container should not be removed"
    );
    assert!(mock.container_exists("id2"));

    Ok(())
}

#[tokio::test]
async fn test_clean_auto_named_containers_aggregates_errors() -> Result<()> {
    let mock = Arc::new(MockRuntime::new());
    mock.add_container(summary("id1", "/inspiring_franklin"));
    mock.add_container(summary("id3", "/agitated_wescoff7"));
    mock.set_remove_error("id1", "permission denied");

    let candidates = discover(&mock).await?;
    let outcome = ContainerRemover::new(mock.clone())
        .remove_all(&CancellationToken::new(), &candidates)
        .await;

    let err = outcome.error.expect("expected aggregated error");
    assert_eq!(outcome.removed, ["agitated_wescoff7"]);
    assert_eq!(err.failures().len(), 1);
    assert_eq!(err.failures()[0].id, "id1");
    assert!(err.to_string().contains("inspiring_franklin"));
    assert!(err.to_string().contains("permission denied"));

    let commands = mock.get_commands();
    assert!(commands.contains(&"remove:id1".to_string()));
    assert!(commands.contains(&"remove:id3".to_string()));

    Ok(())
}

#[tokio::test]
async fn test_one_removal_call_per_candidate_in_order() -> Result<()> {
    let mock = Arc::new(MockRuntime::new());
    let names = [
        "/zen_turing",
        "/my-api",
        "/eager_lovelace3",
        "/Quirky_Knuth",
        "/hungry_hopper",
        "/jolly_euler",
    ];
    for (i, name) in names.iter().enumerate() {
        mock.add_container(summary(&format!("id{i}"), name));
    }
    mock.set_remove_error("id2", "conflict");
    mock.set_remove_not_found("id4");

    let candidates = discover(&mock).await?;
    let outcome = ContainerRemover::new(mock.clone())
        .remove_all(&CancellationToken::new(), &candidates)
        .await;

    assert_eq!(candidates.len(), 4);
    assert_eq!(mock.remove_calls(), candidates.len());
    assert_eq!(
        mock.get_commands(),
        ["list:all", "remove:id0", "remove:id2", "remove:id4", "remove:id5"]
    );
    assert_eq!(outcome.removed, ["zen_turing", "jolly_euler"]);
    assert_eq!(outcome.error.map(|e| e.failures().len()), Some(1));

    Ok(())
}

#[tokio::test]
async fn test_all_success_removes_every_candidate() -> Result<()> {
    let mock = Arc::new(MockRuntime::new());
    for (i, name) in ["/zen_turing", "/eager_lovelace", "/hungry_hopper7"]
        .iter()
        .enumerate()
    {
        mock.add_container(summary(&format!("id{i}"), name));
    }

    let candidates = discover(&mock).await?;
    let outcome = ContainerRemover::new(mock.clone())
        .remove_all(&CancellationToken::new(), &candidates)
        .await;

    assert!(outcome.is_clean());
    assert_eq!(outcome.removed.len(), candidates.len());
    assert!(!mock.container_exists("id0"));
    assert!(!mock.container_exists("id2"));

    Ok(())
}

#[tokio::test]
async fn test_candidates_never_contain_custom_names() -> Result<()> {
    let mock = Arc::new(MockRuntime::new());
    let names = [
        "/inspiring_franklin",
        "/custom_app",
        "/postgres",
        "/web_1",
        "/inspiring_franklin_backup",
        "/Inspiring_franklin",
        "/inspiring.franklin",
        "/agitated_wescoff7",
        "",
    ];
    for (i, name) in names.iter().enumerate() {
        mock.add_container(summary(&format!("id{i}"), name));
    }
    mock.add_container(ContainerSummary::new("nameless", vec![], "alpine"));

    let candidates = discover(&mock).await?;

    assert!(!candidates.is_empty());
    for candidate in &candidates {
        let name = candidate.primary_name().expect("candidates always have a name");
        assert!(is_auto_generated_name(name), "{name} should not be a candidate");
    }
    let ids: Vec<_> = candidates.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["id0", "id7"]);

    Ok(())
}
