use std::path::Path;

use wiremock::MockServer;

use hypermod_deploy::deployment::{ActionName, ArgumentKey};
use hypermod_deploy::fixtures::deployment::{
    create_action_entry, create_argument, create_deployment,
};
use hypermod_deploy::hypermod::HypermodClient;

use crate::mocks::hypermod::{
    get_deployment_failure_mock, get_deployment_mock, report_result_mock,
};
use crate::repo::create_config;

#[tokio::test]
async fn fetches_and_decodes_the_deployment() {
    let api_server = MockServer::start().await;

    let deployment = create_deployment(
        "dep-1",
        "Upgrade lodash",
        "Bumps lodash everywhere",
        vec![create_action_entry(
            ActionName::InstallDependency,
            vec![
                create_argument(ArgumentKey::DependencyName, "lodash"),
                create_argument(ArgumentKey::Version, "4.17.21"),
            ],
        )],
    );

    get_deployment_mock(
        "dep-1",
        "secret-key",
        "owner",
        "repo1",
        serde_json::to_value(&deployment).unwrap(),
    )
    .expect(1)
    .mount(&api_server)
    .await;

    let config = create_config(Path::new("."), "sha", Some(api_server.uri()), None);
    let client = HypermodClient::new(config.api_base.clone());

    let fetched = client.fetch_deployment(&config).await.unwrap();

    assert_eq!(fetched, deployment);

    api_server.verify().await;
}

#[tokio::test]
async fn a_non_success_status_is_an_error() {
    let api_server = MockServer::start().await;

    get_deployment_failure_mock("dep-1", "secret-key", "owner", "repo1", 404)
        .expect(1)
        .mount(&api_server)
        .await;

    let config = create_config(Path::new("."), "sha", Some(api_server.uri()), None);
    let client = HypermodClient::new(config.api_base.clone());

    let result = client.fetch_deployment(&config).await;

    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("404"));

    api_server.verify().await;
}

#[tokio::test]
async fn reports_the_pull_request_number() {
    let api_server = MockServer::start().await;

    report_result_mock("dep-1", "secret-key", "owner", "repo1")
        .expect(1)
        .mount(&api_server)
        .await;

    let config = create_config(Path::new("."), "sha", Some(api_server.uri()), None);
    let client = HypermodClient::new(config.api_base.clone());

    client.report_result(&config, 17).await.unwrap();

    api_server.verify().await;
}
