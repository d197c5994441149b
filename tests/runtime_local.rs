// ABOUTME: Integration tests against a local Docker or Podman daemon.
// ABOUTME: Each test skips when no runtime socket is found.

use dockhand::config::Config;
use dockhand::provider::{ContainerProvider, CreationRequest, ErrorKind};
use dockhand::runtime::{BollardClient, ImageOps, NetworkOps, SystemOps};
use dockhand::types::{ContainerId, ContainerName, ImageRef};
use std::time::Duration;

/// Connect to the local runtime, or `None` when there is none.
async fn local_provider() -> Option<ContainerProvider<BollardClient>> {
    let config = Config {
        connect_timeout: Duration::from_secs(30),
        call_timeout: Some(Duration::from_secs(300)),
        ..Config::default()
    };
    ContainerProvider::connect(&config).await.ok()
}

/// Skip test if no local runtime available.
macro_rules! require_runtime {
    () => {
        match local_provider().await {
            Some(provider) => provider,
            None => {
                eprintln!("Skipping test: no local container runtime found");
                return;
            }
        }
    };
}

fn unique(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or_default();
    format!("{}-{}-{}", prefix, std::process::id(), nanos)
}

#[tokio::test]
async fn runtime_ping() {
    let provider = require_runtime!();
    provider.client().ping().await.expect("ping should succeed");
}

#[tokio::test]
async fn server_info_reports_cgroup_driver() {
    let provider = require_runtime!();

    let caps = provider.server_info().await.expect("server info");
    assert!(!caps.cgroup_driver.is_empty());
    assert!(!caps.storage_driver.is_empty());
}

#[tokio::test]
async fn fetch_image_pulls_and_resolves_id() {
    let provider = require_runtime!();
    let image = ImageRef::parse("alpine:latest").unwrap();

    let id = provider.fetch_image(&image).await.expect("fetch");
    assert!(!id.is_empty());

    let inspected = provider.client().inspect_image(&image).await.unwrap();
    assert_eq!(inspected, id);
}

#[tokio::test]
async fn prepare_network_is_idempotent() {
    let provider = require_runtime!();
    let name = unique("dockhand-test-net");

    let first = provider.prepare_network(&name).await.expect("create");
    let second = provider.prepare_network(&name).await.expect("reuse");
    assert_eq!(first, second);

    let found = provider.client().find_network(&name).await.unwrap();
    assert_eq!(found, Some(first));

    provider.remove_network(&name).await.expect("remove");
    assert_eq!(provider.client().find_network(&name).await.unwrap(), None);
}

#[tokio::test]
async fn run_inspect_and_remove_node() {
    let provider = require_runtime!();
    let network = unique("dockhand-test-net");
    let name = unique("dockhand-node");

    let request = CreationRequest::new(
        ContainerName::new(&name).unwrap(),
        ImageRef::parse("alpine:latest").unwrap(),
        &network,
    )
    .label("dockhand.test", "true");

    let id = match provider.run_container(&request).await {
        Ok(id) => id,
        // Rootless engines may refuse privileged containers.
        Err(e) if e.kind() == ErrorKind::Start => {
            eprintln!("Skipping test: runtime refused to start node: {}", e);
            let _ = provider.remove_network(&network).await;
            return;
        }
        Err(e) => panic!("run_container failed: {}", e),
    };

    let record = provider.container_info(&id, &network).await.unwrap();
    assert_eq!(record.name, name);
    assert_eq!(record.labels.get("dockhand.test").map(String::as_str), Some("true"));

    if let Some(ip) = record.ip_address {
        let found = provider.container_id_by_ip(ip, &network).await.unwrap();
        if record.is_running() {
            assert_eq!(found, Some(id.clone()));
        }
    }

    let dup = provider.run_container(&request).await.unwrap_err();
    assert!(dup.is_conflict(), "expected conflict, got {}", dup);

    provider.remove_container(&id).await.expect("remove");
    let err = provider.container_info(&id, &network).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    provider.remove_network(&network).await.expect("remove network");
}

#[tokio::test]
async fn remove_unknown_container_fails() {
    let provider = require_runtime!();

    let err = provider
        .remove_container(&ContainerId::new(unique("no-such-container")))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
