use chrono::TimeZone;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zammad_digest::config::Config;
use zammad_digest::error::ReportError;
use zammad_digest::run::run;
use zammad_digest::telegram::notifier::TelegramNotifier;
use zammad_digest::zammad::client::ZammadClient;

/// teloxide names Bot API methods in PascalCase.
const SEND_MESSAGE: &str = "/bottest-token/SendMessage";

fn sent_message(text: &str) -> serde_json::Value {
    json!({
        "ok": true,
        "result": {
            "message_id": 7,
            "date": 1_754_924_521,
            "chat": { "id": 42, "type": "private", "first_name": "Ops" },
            "from": { "id": 1, "is_bot": true, "first_name": "Digest", "username": "digest_bot" },
            "text": text
        }
    })
}

fn chat_not_found() -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_json(json!({
        "ok": false,
        "error_code": 400,
        "description": "Bad Request: chat not found"
    }))
}

fn notifier(server: &MockServer) -> TelegramNotifier {
    TelegramNotifier::new(
        "test-token",
        "42",
        reqwest::Url::parse(&server.uri()).unwrap(),
        Duration::from_secs(5),
    )
    .unwrap()
}

/// Texts of every `sendMessage` call the mock server saw, in order.
async fn sent_texts(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == SEND_MESSAGE)
        .map(|r| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            body["text"].as_str().unwrap_or_default().to_string()
        })
        .collect()
}

#[tokio::test]
async fn send_posts_chat_text_and_disables_previews() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_MESSAGE))
        .and(body_partial_json(json!({
            "chat_id": 42,
            "text": "hello",
            "link_preview_options": { "is_disabled": true }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sent_message("hello")))
        .expect(1)
        .mount(&server)
        .await;

    notifier(&server).send("hello").await.unwrap();
}

#[tokio::test]
async fn send_surfaces_bot_api_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_MESSAGE))
        .respond_with(chat_not_found())
        .mount(&server)
        .await;

    let err = notifier(&server).send("hello").await.unwrap_err();

    assert!(matches!(err, ReportError::Telegram(_)));
}

fn pipeline_config(zammad: &MockServer, telegram: &MockServer) -> Config {
    Config::from_vars(
        [
            ("ZAMMAD_URL", zammad.uri()),
            ("ZAMMAD_TOKEN", "secret".to_string()),
            ("TG_TOKEN", "test-token".to_string()),
            ("TG_CHAT_ID", "42".to_string()),
            ("TELEGRAM_API_URL", telegram.uri()),
            ("HTTP_TIMEOUT_SECONDS", "5".to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v)),
    )
    .unwrap()
}

async fn run_pipeline(config: &Config) -> Result<(), ReportError> {
    let counter = ZammadClient::new(
        &config.zammad_url,
        &config.zammad_token,
        config.http_timeout,
    )
    .unwrap();
    let notifier = TelegramNotifier::new(
        &config.telegram_bot_token,
        &config.telegram_chat_id,
        config.telegram_api_url.clone(),
        config.http_timeout,
    )
    .unwrap();
    let now = config
        .timezone
        .with_ymd_and_hms(2025, 8, 11, 20, 2, 1)
        .single()
        .unwrap();
    run(config, &counter, &notifier, &now).await
}

#[tokio::test]
async fn pipeline_delivers_one_report() {
    let zammad = MockServer::start().await;
    let telegram = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total_count": 5 })))
        .expect(4)
        .mount(&zammad)
        .await;
    Mock::given(method("POST"))
        .and(path(SEND_MESSAGE))
        .respond_with(ResponseTemplate::new(200).set_body_json(sent_message("report")))
        .expect(1)
        .mount(&telegram)
        .await;

    run_pipeline(&pipeline_config(&zammad, &telegram))
        .await
        .unwrap();

    let texts = sent_texts(&telegram).await;
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("Дата отчета: 11/08/2025, 20:02:01"));
}

#[tokio::test]
async fn pipeline_reports_zammad_failure_to_chat() {
    let zammad = MockServer::start().await;
    let telegram = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&zammad)
        .await;
    Mock::given(method("POST"))
        .and(path(SEND_MESSAGE))
        .respond_with(ResponseTemplate::new(200).set_body_json(sent_message("failure")))
        .mount(&telegram)
        .await;

    let err = run_pipeline(&pipeline_config(&zammad, &telegram))
        .await
        .unwrap_err();

    assert!(matches!(err, ReportError::ZammadStatus { status: 500, .. }));
    let texts = sent_texts(&telegram).await;
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("\u{26a0}\u{fe0f} Zammad report failed:"));
    assert!(texts[0].contains("500"));
}

#[tokio::test]
async fn pipeline_keeps_zammad_error_when_chat_is_unreachable() {
    let zammad = MockServer::start().await;
    let telegram = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&zammad)
        .await;
    Mock::given(method("POST"))
        .and(path(SEND_MESSAGE))
        .respond_with(chat_not_found())
        .expect(1)
        .mount(&telegram)
        .await;

    let err = run_pipeline(&pipeline_config(&zammad, &telegram))
        .await
        .unwrap_err();

    assert!(matches!(err, ReportError::ZammadStatus { status: 500, .. }));
}

#[tokio::test]
async fn pipeline_retries_failed_delivery_once_as_failure_notice() {
    let zammad = MockServer::start().await;
    let telegram = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total_count": 1 })))
        .mount(&zammad)
        .await;
    Mock::given(method("POST"))
        .and(path(SEND_MESSAGE))
        .respond_with(chat_not_found())
        .expect(2)
        .mount(&telegram)
        .await;

    let err = run_pipeline(&pipeline_config(&zammad, &telegram))
        .await
        .unwrap_err();

    assert!(matches!(err, ReportError::Telegram(_)));
    let texts = sent_texts(&telegram).await;
    assert_eq!(texts.len(), 2);
    assert!(texts[1].starts_with("\u{26a0}\u{fe0f} Zammad report failed:"));
}
