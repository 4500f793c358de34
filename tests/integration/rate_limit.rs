use std::path::Path;
use std::time::Duration;

use wiremock::MockServer;

use hypermod_deploy::github::{GithubProvider, PullRequestService};

use crate::mocks::github::{search_pull_requests_mock, search_rate_limited_mock};
use crate::repo::create_config;

fn create_provider(github_server: &MockServer) -> GithubProvider {
    GithubProvider {
        config: create_config(Path::new("."), "sha", None, Some(github_server.uri())),
        retry_delay: Duration::from_millis(10),
    }
}

#[tokio::test]
async fn retries_twice_on_rate_limits_then_succeeds() {
    let github_server = MockServer::start().await;

    search_rate_limited_mock()
        .up_to_n_times(2)
        .expect(2)
        .mount(&github_server)
        .await;
    search_pull_requests_mock(serde_json::json!([{ "number": 3 }]))
        .expect(1)
        .mount(&github_server)
        .await;

    let provider = create_provider(&github_server);
    let instance = provider
        .configure_provider(Some(github_server.uri()))
        .unwrap();

    let found = provider
        .search_open_pull_request(instance, "hypermod-transform/dep-1", "main")
        .await
        .unwrap();

    assert_eq!(found, Some(3));

    github_server.verify().await;
}

#[tokio::test]
async fn a_third_consecutive_rate_limit_is_fatal() {
    let github_server = MockServer::start().await;

    search_rate_limited_mock()
        .expect(3)
        .mount(&github_server)
        .await;

    let provider = create_provider(&github_server);
    let instance = provider
        .configure_provider(Some(github_server.uri()))
        .unwrap();

    let result = provider
        .search_open_pull_request(instance, "hypermod-transform/dep-1", "main")
        .await;

    assert!(result.is_err());

    github_server.verify().await;
}
