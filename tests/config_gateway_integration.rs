//! End-to-end tests: TOML config on disk → gateway → mock Solr.

use concept_search::{gateway_from_config, AppConfig};
use serde_json::json;
use solr_gateway::{ConceptDbId, Cui, SearchError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_config(dir: &tempfile::TempDir, server: &MockServer) -> std::path::PathBuf {
    let addr = server.address();
    let path = dir.path().join("config.toml");
    let content = format!(
        "[solr]\nhost = \"{}\"\nport = {}\n\n[concept_dbs]\n1 = \"snomed\"\n",
        addr.ip(),
        addr.port()
    );
    std::fs::write(&path, content).expect("write config");
    path
}

#[tokio::test]
async fn search_through_configured_directory() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/solr/snomed_id_1/schema"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "schema": {"fields": [{"name": "cui", "type": "plongs"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/solr/snomed_id_1/select"))
        .and(query_param("q", "name:fever OR name:fever*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"docs": [{"cui": [386661006], "pretty_name": ["Fever"]}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let config = AppConfig::from_file(&write_config(&dir, &server)).expect("load");
    let gateway = gateway_from_config(&config).expect("gateway");

    let resp = gateway
        .search_collection(&[ConceptDbId(1)], "fever")
        .await
        .expect("search");
    let body = resp.ok().expect("200 response");
    assert_eq!(body.results.len(), 1);
    assert_eq!(body.results[0].cui, Cui::Numeric(386661006));
}

#[tokio::test]
async fn unconfigured_concept_db_is_rejected() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let config = AppConfig::from_file(&write_config(&dir, &server)).expect("load");
    let gateway = gateway_from_config(&config).expect("gateway");

    let err = gateway
        .search_collection(&[ConceptDbId(2)], "fever")
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::UnknownConceptDb(ConceptDbId(2))));
}

#[tokio::test]
async fn availability_over_configured_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/solr/admin/collections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collections": ["snomed_id_1"]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/solr/snomed_id_1/schema"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "schema": {"fields": [{"name": "cui", "type": "plongs"}]}
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let config = AppConfig::from_file(&write_config(&dir, &server)).expect("load");
    let gateway = gateway_from_config(&config).expect("gateway");

    let ids = gateway.directory().ids();
    let resp = gateway.collections_available(&ids).await.expect("availability");
    assert_eq!(resp.body().expect("json"), r#"{"results":{"1":true}}"#);
}

#[test]
fn config_save_and_load_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("config.toml");

    let mut config = AppConfig::default();
    config.solr.host = "solr.internal".into();
    config.concept_dbs.insert("7".into(), "icd".into());
    config.save_to_file(&path).expect("save");

    let mut loaded = AppConfig::from_file(&path).expect("load");
    loaded.apply_env_overrides(|_| None).expect("no overrides");
    loaded.validate().expect("valid");
    assert_eq!(loaded.solr.host, "solr.internal");
    assert_eq!(loaded.concept_dbs.get("7").map(String::as_str), Some("icd"));
}
