use crate::{fleet_json, service_for};
use crawler_fleet::controller::{Action, FleetController};
use crawler_fleet::fleet::{CrawlerId, EditField, FleetQuery, StatusFilter};
use crawler_fleet::state::RunState;
use crawler_fleet::{ApiError, CrawlerStatus, FleetError};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves the fleet on every GET /crawler
async fn mount_fleet(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/crawler"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fleet_json()))
        .mount(server)
        .await;
}

/// Method and path of every request the server saw, in order
async fn request_log(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .expect("Request recording is enabled")
        .iter()
        .map(|r| format!("{} {}", r.method, r.url.path()))
        .collect()
}

#[tokio::test]
async fn test_mount_and_filter() {
    let mock_server = MockServer::start().await;
    mount_fleet(&mock_server).await;

    let controller = FleetController::with_query(
        service_for(&mock_server),
        FleetQuery::new("", StatusFilter::Only(CrawlerStatus::Error)),
    );
    assert_eq!(controller.mount().await.unwrap(), 2);

    let visible = controller.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "Beta");

    controller.set_status_filter(StatusFilter::All);
    controller.set_search("NAT");
    let visible = controller.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "Alpha");

    // Counters always cover the whole fleet
    let counts = controller.status_counts();
    assert_eq!(counts.online, 1);
    assert_eq!(counts.error, 1);
}

#[tokio::test]
async fn test_toggle_pause_then_refresh() {
    let mock_server = MockServer::start().await;

    // Before the toggle the crawler is running; afterwards the backend reports it paused
    Mock::given(method("GET"))
        .and(path("/crawler"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fleet_json()))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    let mut paused = fleet_json();
    paused[0]["pause"] = json!("true");
    Mock::given(method("GET"))
        .and(path("/crawler"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paused))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/crawler/pause"))
        .and(body_json(json!({"id": 1, "pause": "false"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let controller = FleetController::new(service_for(&mock_server));
    controller.mount().await.unwrap();

    let id = CrawlerId::from(1);
    assert_eq!(
        RunState::of(&controller.find(&id).unwrap()),
        RunState::Running
    );

    controller.toggle_pause(&id).await.expect("Toggle should succeed");

    assert_eq!(
        request_log(&mock_server).await,
        vec!["GET /crawler", "POST /crawler/pause", "GET /crawler"]
    );
    assert_eq!(
        RunState::of(&controller.find(&id).unwrap()),
        RunState::PausedPending
    );
    assert!(controller.archive_available(&id));
    assert!(!controller.is_pending(&id, Action::TogglePause));
}

#[tokio::test]
async fn test_failed_toggle_keeps_view_and_reports() {
    let mock_server = MockServer::start().await;
    mount_fleet(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/crawler/pause"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let controller = FleetController::new(service_for(&mock_server));
    controller.mount().await.unwrap();

    let result = controller.toggle_pause(&CrawlerId::from(1)).await;
    assert!(matches!(
        result,
        Err(FleetError::Api(ApiError::Http { status: 503, .. }))
    ));

    // No refresh after a failed action
    assert_eq!(
        request_log(&mock_server).await,
        vec!["GET /crawler", "POST /crawler/pause"]
    );
    assert_eq!(controller.crawlers().len(), 2);
    assert!(controller.last_error().unwrap().contains("pause-toggle failed"));
}

#[tokio::test]
async fn test_edit_round_trip() {
    let mock_server = MockServer::start().await;
    mount_fleet(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/crawler/edit"))
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

    let controller = FleetController::new(service_for(&mock_server));
    controller.mount().await.unwrap();

    let id = CrawlerId::from(1);
    let form = controller.open_edit(&id).unwrap();
    assert_eq!(form.pagina_final, 10);

    controller
        .set_edit_field(EditField::PaginaFinal, "042")
        .unwrap();
    controller.submit_edit().await.expect("Save should succeed");

    assert!(controller.edit_form().is_none());
    assert_eq!(
        request_log(&mock_server).await,
        vec!["GET /crawler", "POST /crawler/edit", "GET /crawler"]
    );
}

#[tokio::test]
async fn test_archive_is_gated_on_pause() {
    let mock_server = MockServer::start().await;
    mount_fleet(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/crawler/generate-zip"))
        .and(body_json(json!({"id": 2})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let controller = FleetController::new(service_for(&mock_server));
    controller.mount().await.unwrap();

    // Running crawler: refused locally, nothing sent
    let result = controller.request_archive(&CrawlerId::from(1)).await;
    assert!(matches!(result, Err(FleetError::ArchiveUnavailable { .. })));

    // Paused and not yet sent: one archive request, then a refresh
    controller
        .request_archive(&CrawlerId::from(2))
        .await
        .expect("Archive request should succeed");

    assert_eq!(
        request_log(&mock_server).await,
        vec!["GET /crawler", "POST /crawler/generate-zip", "GET /crawler"]
    );
}

#[tokio::test]
async fn test_duplicate_action_refused_while_in_flight() {
    let mock_server = MockServer::start().await;
    mount_fleet(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/crawler/pause"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let controller = FleetController::new(service_for(&mock_server));
    controller.mount().await.unwrap();
    let id = CrawlerId::from(1);

    let (first, second) = tokio::join!(controller.toggle_pause(&id), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        let pending = controller.is_pending(&id, Action::TogglePause);
        (pending, controller.toggle_pause(&id).await)
    });

    assert!(first.is_ok());
    let (was_pending, second) = second;
    assert!(was_pending);
    assert!(matches!(
        second,
        Err(FleetError::ActionInFlight {
            action: Action::TogglePause,
            ..
        })
    ));
    assert!(!controller.is_pending(&id, Action::TogglePause));
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_collection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crawler"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fleet_json()))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/crawler"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let controller = FleetController::new(service_for(&mock_server));
    controller.mount().await.unwrap();

    assert!(controller.refresh().await.is_err());
    assert_eq!(controller.crawlers().len(), 2);
    assert!(controller
        .last_error()
        .unwrap()
        .starts_with("Could not load crawlers"));
}

#[tokio::test]
async fn test_record_without_status_is_listed_but_not_counted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crawler"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Alpha", "cidade": "Natal", "status": "online"},
            {"id": 2, "name": "Beta", "cidade": "Recife", "status": null}
        ])))
        .mount(&mock_server)
        .await;

    let controller = FleetController::new(service_for(&mock_server));
    assert_eq!(controller.mount().await.unwrap(), 2);

    assert_eq!(controller.visible().len(), 2);
    let counts = controller.status_counts();
    assert_eq!(counts.online, 1);
    assert_eq!(counts.total(), 1);

    controller.set_status_filter(StatusFilter::Only(CrawlerStatus::Online));
    assert_eq!(controller.visible().len(), 1);
}

#[tokio::test]
async fn test_slow_older_refresh_does_not_overwrite_newer() {
    let mock_server = MockServer::start().await;

    // The first fetch is slow and answers with the old fleet
    Mock::given(method("GET"))
        .and(path("/crawler"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fleet_json())
                .set_delay(Duration::from_millis(500)),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    let mut newer = fleet_json();
    newer[0]["pause"] = json!("true");
    Mock::given(method("GET"))
        .and(path("/crawler"))
        .respond_with(ResponseTemplate::new(200).set_body_json(newer))
        .mount(&mock_server)
        .await;

    let controller = FleetController::new(service_for(&mock_server));

    let (older, newer) = tokio::join!(controller.refresh(), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        controller.refresh().await
    });

    assert_eq!(older.unwrap(), 2);
    assert_eq!(newer.unwrap(), 2);

    let alpha = controller.find(&CrawlerId::from(1)).unwrap();
    assert!(alpha.pause, "the older fetch replaced the newer collection");
}
