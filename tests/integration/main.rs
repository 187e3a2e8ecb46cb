//! Integration tests against a mock control API
//!
//! These tests use wiremock to stand in for the backend and exercise the
//! HTTP transport, the service facade and the fleet controller end-to-end.

mod controller_tests;
mod service_tests;

use crawler_fleet::api::ApiClient;
use crawler_fleet::config::ApiConfig;
use crawler_fleet::service::RemoteCrawlerService;
use serde_json::{json, Value};
use wiremock::MockServer;

/// Builds a service pointed at the mock server
pub fn service_for(server: &MockServer) -> RemoteCrawlerService {
    service_with_config(server, &ApiConfig::default())
}

pub fn service_with_config(server: &MockServer, config: &ApiConfig) -> RemoteCrawlerService {
    let client = ApiClient::with_base_url(&server.uri(), config).expect("Failed to build client");
    RemoteCrawlerService::new(client)
}

/// Two crawlers the way the backend reports them: string-encoded flags and
/// a mix of numeric and string-typed numbers
pub fn fleet_json() -> Value {
    json!([
        {
            "id": 1,
            "name": "Alpha",
            "status": "online",
            "cidade": "Natal",
            "codigo_municipio": "2408102",
            "codigo_entidade": "77",
            "nome_entidade": "Prefeitura de Natal",
            "ano": "2024",
            "pagina_inicial": "1",
            "pagina_final": "10",
            "pagina_atual": 4,
            "cpu": 65,
            "memory": "82",
            "gbs": 1.5,
            "pause": "false",
            "send_file": "false",
            "cookie_session": "c=1",
            "session_token": "s",
            "user_session_token": "u",
            "files_consolidateds": [{"name": "natal-2024-consolidated.json"}],
            "paginas": [{"id": 1, "state": 1}, {"id": 2, "state": 0}]
        },
        {
            "id": 2,
            "name": "Beta",
            "status": "error",
            "cidade": "Recife",
            "codigo_municipio": "2611606",
            "codigo_entidade": "12",
            "nome_entidade": "Camara do Recife",
            "ano": 2023,
            "pagina_inicial": 1,
            "pagina_final": 10,
            "pagina_atual": 10,
            "cpu": 10,
            "memory": 20,
            "gbs": "0.25",
            "pause": "true",
            "send_file": "false",
            "cookie_session": "",
            "session_token": "",
            "user_session_token": "",
            "files_consolidateds": [],
            "paginas": []
        }
    ])
}
