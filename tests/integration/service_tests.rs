use crate::{fleet_json, service_for, service_with_config};
use crawler_fleet::config::ApiConfig;
use crawler_fleet::fleet::{
    CrawlerEdit, CrawlerId, CrawlerStatus, DataSize, EditField, StatusCounts,
};
use crawler_fleet::service::{CrawlerService, LIST_PATH};
use crawler_fleet::ApiError;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_all_sends_fixed_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .and(header("locale", "pt-br"))
        .and(header("accept", "*/*"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fleet_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let crawlers = service_for(&mock_server)
        .fetch_all()
        .await
        .expect("Fetch should succeed");

    assert_eq!(crawlers.len(), 2);

    let alpha = &crawlers[0];
    assert_eq!(alpha.id, CrawlerId::from(1));
    assert_eq!(alpha.status, CrawlerStatus::Online);
    assert_eq!(alpha.ano, 2024);
    assert_eq!(alpha.pagina_final, 10);
    assert_eq!(alpha.memory, 82);
    assert_eq!(alpha.data, DataSize::from_megabytes(1.5));
    assert!(!alpha.pause);
    assert_eq!(alpha.file_count(), 1);
    assert_eq!(alpha.failed_pages(), 1);

    let beta = &crawlers[1];
    assert!(beta.pause);
    assert!(!beta.send_file);
    assert!(beta.is_blocked());
    assert_eq!(beta.data, DataSize::from_megabytes(0.25));
}

#[tokio::test]
async fn test_fetch_all_tolerates_partial_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Alpha", "status": "online", "pause": "false"},
            {"id": 2, "name": "Beta", "status": null, "files_consolidateds": null, "paginas": null},
            {"id": 3, "name": "Gamma", "pause": "True", "send_file": "FALSE"},
            {"id": "c-4", "name": "Delta", "status": 7, "send_file": "pending"}
        ])))
        .mount(&mock_server)
        .await;

    let crawlers = service_for(&mock_server)
        .fetch_all()
        .await
        .expect("Partial records should still decode");

    assert_eq!(crawlers.len(), 4);
    assert_eq!(crawlers[0].status, CrawlerStatus::Online);
    assert!(!crawlers[1].status.is_known());
    assert!(crawlers[1].files_consolidateds.is_empty());
    assert!(crawlers[1].paginas.is_empty());
    assert!(!crawlers[2].status.is_known());
    assert!(crawlers[2].pause);
    assert!(!crawlers[2].send_file);
    assert_eq!(crawlers[3].status, CrawlerStatus::Unknown("7".to_string()));
    assert!(!crawlers[3].send_file);

    let counts = StatusCounts::from_crawlers(&crawlers);
    assert_eq!(counts.online, 1);
    assert_eq!(counts.total(), 1);
}

#[tokio::test]
async fn test_save_config_posts_whole_form() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crawler"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fleet_json()))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/crawler/edit"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "id": 1,
            "name": "Alpha",
            "cidade": "Natal",
            "codigo_municipio": "2408102",
            "codigo_entidade": "77",
            "nome_entidade": "Prefeitura de Natal",
            "ano": 2024,
            "pagina_inicial": 1,
            "pagina_final": 42,
            "cookie_session": "c=1",
            "session_token": "s",
            "user_session_token": "u"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let crawlers = service.fetch_all().await.unwrap();

    let mut edit = CrawlerEdit::from_record(&crawlers[0]);
    edit.set(EditField::PaginaFinal, "042").unwrap();

    let ack = service.save_config(&edit).await.expect("Save should succeed");
    assert_eq!(ack.0["ok"], true);
}

#[tokio::test]
async fn test_toggle_pause_sends_string_flag() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/crawler/pause"))
        .and(body_json(json!({"id": 1, "pause": "true"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Empty success body is accepted
    let ack = service_for(&mock_server)
        .toggle_pause(&CrawlerId::from(1), true)
        .await
        .expect("Toggle should succeed");
    assert!(ack.0.is_null());
}

#[tokio::test]
async fn test_request_archive_keeps_text_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/crawler/generate-zip"))
        .and(body_json(json!({"id": "c-7"})))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"queued": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ack = service_for(&mock_server)
        .request_archive(&CrawlerId::from("c-7"))
        .await
        .expect("Archive request should succeed");
    assert_eq!(ack.0["queued"], true);
}

#[tokio::test]
async fn test_http_error_status_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crawler"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let result = service_for(&mock_server).fetch_all().await;
    match result {
        Err(e @ ApiError::Http { .. }) => assert_eq!(e.status(), Some(500)),
        other => panic!("expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crawler"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let result = service_for(&mock_server).fetch_all().await;
    assert!(matches!(result, Err(ApiError::Decode { .. })));
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crawler"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fleet_json())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let config = ApiConfig {
        request_timeout_ms: Some(200),
        connect_timeout_ms: None,
    };
    let result = service_with_config(&mock_server, &config).fetch_all().await;
    assert!(matches!(result, Err(ApiError::Timeout { .. })));
}

#[tokio::test]
async fn test_unreachable_backend() {
    let client = crawler_fleet::api::ApiClient::with_base_url(
        "http://127.0.0.1:1",
        &ApiConfig::default(),
    )
    .unwrap();
    let service = crawler_fleet::service::RemoteCrawlerService::new(client);

    let result = service.fetch_all().await;
    assert!(matches!(result, Err(ApiError::NetworkUnavailable { .. })));
}
