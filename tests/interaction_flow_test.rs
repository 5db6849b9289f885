/*
Integration tests for the interaction handling flow

These tests exercise the full path through the HTTP delivery layer:
inbound interaction -> action router -> click tracker (store mutation) ->
card renderer -> invoke response, asserting both the response contract and
the resulting store state.
*/

use actix_web::{http::StatusCode, test, App};
use cardrelay::application::ports::output::store_port::{
    DeliveryStorePort, NotificationStorePort,
};
use cardrelay::delivery::router::{configure, InteractionEnvelope};
use cardrelay::domain::entities::interaction::InteractionPayload;
use cardrelay::test_utils::common::{sample_delivery, sample_notification, seeded_state};

fn acknowledge_request(from: &str, notification_id: &str) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/interactions")
        .set_json(InteractionEnvelope {
            from: from.to_string(),
            value: InteractionPayload::acknowledge(notification_id),
        })
        .to_request()
}

#[actix_web::test]
async fn test_acknowledge_end_to_end() {
    // NotificationRecord n1 (ack-capable, important, High Priority) was
    // delivered to recipient u1 and is not yet acknowledged.
    let (state, notifications, deliveries) = seeded_state(
        vec![sample_notification("n1")],
        vec![sample_delivery("n1", "u1")],
    );
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    let resp = test::call_service(&app, acknowledge_request("u1", "n1")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["type"], "application/vnd.card.adaptive");

    // The returned card carries the acknowledgment notice and no submit
    // action, so the client can update optimistically.
    let card = body["value"].to_string();
    assert!(card.contains("You have acknowledged this message"));
    assert!(!card.contains("Action.Execute"));

    let notification = notifications.fetch("n1").await.unwrap().unwrap().record;
    assert_eq!(notification.button_clicks["Acknowledged"], 1);
    let delivery = deliveries.fetch("n1", "u1").await.unwrap().unwrap().record;
    assert!(delivery.acknowledge_status);
    assert!(delivery.acknowledged_at.is_some());
    assert_eq!(delivery.click_history["Acknowledged"].count, 1);
}

#[actix_web::test]
async fn test_repeat_acknowledge_keeps_first_timestamp() {
    let (state, notifications, deliveries) = seeded_state(
        vec![sample_notification("n1")],
        vec![sample_delivery("n1", "u1")],
    );
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    let first = test::call_service(&app, acknowledge_request("u1", "n1")).await;
    assert_eq!(first.status(), StatusCode::OK);
    let first_ack_at = deliveries
        .fetch("n1", "u1")
        .await
        .unwrap()
        .unwrap()
        .record
        .acknowledged_at
        .unwrap();

    let second = test::call_service(&app, acknowledge_request("u1", "n1")).await;
    assert_eq!(second.status(), StatusCode::OK);

    let delivery = deliveries.fetch("n1", "u1").await.unwrap().unwrap().record;
    assert_eq!(delivery.acknowledged_at, Some(first_ack_at));
    assert_eq!(delivery.click_history["Acknowledged"].count, 2);

    let notification = notifications.fetch("n1").await.unwrap().unwrap().record;
    assert_eq!(notification.button_clicks["Acknowledged"], 2);
}

#[actix_web::test]
async fn test_interactions_from_distinct_recipients_aggregate() {
    let (state, notifications, _) = seeded_state(
        vec![sample_notification("n1")],
        vec![
            sample_delivery("n1", "u1"),
            sample_delivery("n1", "u2"),
            sample_delivery("n1", "u3"),
        ],
    );
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    for recipient in ["u1", "u2", "u3"] {
        let resp = test::call_service(&app, acknowledge_request(recipient, "n1")).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let notification = notifications.fetch("n1").await.unwrap().unwrap().record;
    assert_eq!(notification.button_clicks["Acknowledged"], 3);
}

#[actix_web::test]
async fn test_unknown_verb_rejected_without_mutation() {
    let (state, notifications, deliveries) = seeded_state(
        vec![sample_notification("n1")],
        vec![sample_delivery("n1", "u1")],
    );
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    let mut payload = InteractionPayload::acknowledge("n1");
    payload.action.verb = "foo".to_string();
    let req = test::TestRequest::post()
        .uri("/api/interactions")
        .set_json(InteractionEnvelope {
            from: "u1".to_string(),
            value: payload,
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let body = test::read_body(resp).await;
    assert!(body.is_empty());

    let notification = notifications.fetch("n1").await.unwrap().unwrap();
    assert!(notification.record.button_clicks.is_empty());
    assert_eq!(notification.version, 1);
    let delivery = deliveries.fetch("n1", "u1").await.unwrap().unwrap();
    assert!(!delivery.record.acknowledge_status);
    assert_eq!(delivery.version, 1);
}

#[actix_web::test]
async fn test_unknown_notification_rejected_without_mutation() {
    let (state, _, deliveries) = seeded_state(vec![], vec![sample_delivery("n1", "u1")]);
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    let resp = test::call_service(&app, acknowledge_request("u1", "n1")).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let delivery = deliveries.fetch("n1", "u1").await.unwrap().unwrap();
    assert!(!delivery.record.acknowledge_status);
    assert_eq!(delivery.version, 1);
}

#[actix_web::test]
async fn test_malformed_button_list_fails_the_render() {
    let mut record = sample_notification("n1");
    record.buttons_json = Some("not json".to_string());
    let (state, _, _) = seeded_state(vec![record], vec![sample_delivery("n1", "u1")]);
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    let resp = test::call_service(&app, acknowledge_request("u1", "n1")).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
