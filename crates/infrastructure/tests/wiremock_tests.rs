//! Integration tests for infrastructure crate
//!
//! Wires the update routine to the real adapters and runs it against mocked
//! HaFAS and Home Assistant servers.

use std::sync::Arc;

use application::{DepartureSensorService, SensorConfig, UpdateOutcome};
use chrono::{DateTime, Utc};
use domain::{GeoLocation, SensorId};
use infrastructure::{
    HafasJourneyAdapter, HomeAssistantScheduleAdapter, HomeAssistantSensorPublisher,
};
use integration_hafas::HafasConfig;
use integration_homeassistant::{HomeAssistantConfig, HomeAssistantRestClient};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const TRIPS: &str = r#"{
    "Trip": [{
        "LegList": {
            "Leg": [{
                "Origin": {
                    "name": "Aachen, Elisenbrunnen",
                    "date": "2024-07-01",
                    "time": "07:41:00",
                    "rtDate": "2024-07-01",
                    "rtTime": "07:43:00",
                    "platform": { "text": "H.3" }
                },
                "Destination": {
                    "name": "Aachen Hbf",
                    "date": "2024-07-01",
                    "time": "07:49:00"
                },
                "type": "JNY",
                "category": "Bus",
                "number": "5"
            }]
        }
    }]
}"#;

fn sensor() -> SensorConfig {
    SensorConfig {
        unique_id: SensorId::new(),
        name: "To Work".to_string(),
        interval_minutes: 5,
        schedule: "schedule.commute".parse().unwrap(),
        origin: GeoLocation::new(50.7753, 6.0839).unwrap(),
        destination: GeoLocation::new(50.768, 6.091).unwrap(),
    }
}

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-07-01T05:30:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn schedule_body(state: &str) -> Value {
    json!({
        "entity_id": "schedule.commute",
        "state": state,
        "attributes": { "friendly_name": "Commute" },
        "last_changed": "2024-07-01T05:00:00+00:00",
        "last_updated": "2024-07-01T05:00:00+00:00"
    })
}

fn echo_state(request: &Request) -> ResponseTemplate {
    let mut body: Value = serde_json::from_slice(&request.body).unwrap_or_default();
    body["entity_id"] = json!("sensor.to_work");
    ResponseTemplate::new(200).set_body_json(body)
}

fn service(hafas: &MockServer, home_assistant: &MockServer) -> DepartureSensorService {
    let ha_client = Arc::new(
        HomeAssistantRestClient::new(&HomeAssistantConfig::new(home_assistant.uri(), "ha-token"))
            .unwrap(),
    );
    let journeys = HafasJourneyAdapter::new(&HafasConfig::new(hafas.uri(), "hafas-key")).unwrap();

    DepartureSensorService::new(
        sensor(),
        Arc::new(journeys),
        Arc::new(HomeAssistantScheduleAdapter::new(ha_client.clone())),
        Arc::new(HomeAssistantSensorPublisher::new(ha_client)),
    )
}

#[tokio::test]
async fn update_publishes_next_departure() {
    let hafas = MockServer::start().await;
    let home_assistant = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trip"))
        .and(query_param("originCoordLat", "50.7753"))
        .and(header("authorization", "Bearer hafas-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TRIPS))
        .expect(1)
        .mount(&hafas)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/states/schedule.commute"))
        .and(header("authorization", "Bearer ha-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(schedule_body("on")))
        .expect(1)
        .mount(&home_assistant)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/states/sensor.to_work"))
        .and(body_partial_json(json!({
            "state": "2024-07-01T07:43:00+02:00",
            "attributes": {
                "active": true,
                "device_class": "timestamp",
                "icon": "mdi:timetable",
                "friendly_name": "To Work",
                "last_query": "2024-07-01T05:30:00+00:00"
            }
        })))
        .respond_with(echo_state)
        .expect(1)
        .mount(&home_assistant)
        .await;

    let service = service(&hafas, &home_assistant);
    let outcome = service.update_at(now()).await;

    assert_eq!(outcome, UpdateOutcome::Updated { connections: 1 });
    let state = service.state();
    let leg = &state.connections[0].legs[0];
    assert_eq!(leg.delay.to_string(), "00:02:00");
    assert_eq!(leg.platform.as_deref(), Some("H.3"));
    assert_eq!(
        state.native_value,
        Some(DateTime::parse_from_rfc3339("2024-07-01T07:43:00+02:00").unwrap())
    );
}

#[tokio::test]
async fn inactive_schedule_skips_query_but_publishes() {
    let hafas = MockServer::start().await;
    let home_assistant = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trip"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TRIPS))
        .expect(0)
        .mount(&hafas)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/states/schedule.commute"))
        .respond_with(ResponseTemplate::new(200).set_body_json(schedule_body("off")))
        .mount(&home_assistant)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/states/sensor.to_work"))
        .and(body_partial_json(json!({
            "state": "unknown",
            "attributes": { "active": false, "connections": [] }
        })))
        .respond_with(echo_state)
        .expect(1)
        .mount(&home_assistant)
        .await;

    let outcome = service(&hafas, &home_assistant).update_at(now()).await;
    assert_eq!(outcome, UpdateOutcome::Inactive);
}

#[tokio::test]
async fn missing_schedule_changes_nothing() {
    let hafas = MockServer::start().await;
    let home_assistant = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/states/schedule.commute"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Entity not found." })))
        .mount(&home_assistant)
        .await;

    Mock::given(method("POST"))
        .respond_with(echo_state)
        .expect(0)
        .mount(&home_assistant)
        .await;

    let service = service(&hafas, &home_assistant);
    assert_eq!(
        service.update_at(now()).await,
        UpdateOutcome::ScheduleUnavailable
    );
    assert!(service.state().active);
}

#[tokio::test]
async fn gateway_error_keeps_previous_connections() {
    let hafas = MockServer::start().await;
    let home_assistant = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trip"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TRIPS))
        .up_to_n_times(1)
        .mount(&hafas)
        .await;

    Mock::given(method("GET"))
        .and(path("/trip"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&hafas)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/states/schedule.commute"))
        .respond_with(ResponseTemplate::new(200).set_body_json(schedule_body("on")))
        .mount(&home_assistant)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/states/sensor.to_work"))
        .respond_with(echo_state)
        .expect(2)
        .mount(&home_assistant)
        .await;

    let service = service(&hafas, &home_assistant);
    let first = service.update_at(now()).await;
    assert_eq!(first, UpdateOutcome::Updated { connections: 1 });
    let before = service.state();

    let later = now() + chrono::TimeDelta::minutes(5);
    assert_eq!(service.update_at(later).await, UpdateOutcome::Failed);
    assert_eq!(service.state(), before);
}
