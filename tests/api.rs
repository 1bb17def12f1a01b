//! HTTP tests for the REST API, run against an in-process actix service.

use actix_web::{http::StatusCode, test, web::Data, App};
use serde_json::{json, Value};
use std::sync::RwLock;
use tournament_fixtures_web::{api, FixtureStore};
use uuid::Uuid;

fn state() -> Data<RwLock<FixtureStore>> {
    Data::new(RwLock::new(FixtureStore::default()))
}

fn event_url(tournament: Uuid, event: Uuid, rest: &str) -> String {
    format!("/api/tournaments/{tournament}/events/{event}/{rest}")
}

#[actix_web::test]
async fn health_reports_ok() {
    let app = test::init_service(App::new().app_data(state()).configure(api::configure)).await;
    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["ok"], true);
}

#[actix_web::test]
async fn invalid_ids_are_rejected_with_message() {
    let app = test::init_service(App::new().app_data(state()).configure(api::configure)).await;
    let req = test::TestRequest::get()
        .uri(&format!("/api/tournaments/not-a-uuid/events/{}/bracket", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid tournament id");

    let req = test::TestRequest::get().uri("/api/fixtures/42").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn unknown_event_and_fixture_are_not_found() {
    let app = test::init_service(App::new().app_data(state()).configure(api::configure)).await;
    let (t, e) = (Uuid::new_v4(), Uuid::new_v4());

    let req = test::TestRequest::get().uri(&event_url(t, e, "bracket")).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri(&event_url(t, e, "fixtures/generate"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/api/fixtures/{}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Fixture not found");

    // listing an event nobody registered for is just empty
    let req = test::TestRequest::get().uri(&event_url(t, e, "fixtures")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn full_knockout_flow() {
    let app = test::init_service(App::new().app_data(state()).configure(api::configure)).await;
    let (t, e) = (Uuid::new_v4(), Uuid::new_v4());

    let mut ids = Vec::new();
    for name in ["Asha", "Bela", "Chen", "Dara"] {
        let req = test::TestRequest::post()
            .uri(&event_url(t, e, "participants"))
            .set_json(json!({ "name": name }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        ids.push(body["id"].as_str().unwrap().to_string());
    }

    let req = test::TestRequest::post()
        .uri(&event_url(t, e, "participants"))
        .set_json(json!({ "name": "asha" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri(&event_url(t, e, "fixtures/generate"))
        .set_json(json!({ "seed_order": ids, "config": { "max_sets": 3, "points_to_win": 21 } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let bracket: Value = test::read_body_json(resp).await;
    assert_eq!(bracket["total_rounds"], 2);
    assert_eq!(bracket["rounds"][0]["name"], "Semi-Final");
    assert_eq!(bracket["rounds"][1]["name"], "Final");
    let first = &bracket["rounds"][0]["matches"][0];
    assert_eq!(first["team_a_name"], "Asha");
    assert_eq!(first["team_b_name"], "Bela");
    assert_eq!(first["draft"], false);
    assert_eq!(bracket["rounds"][1]["matches"][0]["draft"], true);

    let req = test::TestRequest::post()
        .uri(&event_url(t, e, "fixtures/generate"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::put()
        .uri(&event_url(t, e, "matches/0/0/score"))
        .set_json(json!({ "set_index": 0, "side": "team_a", "score": 21 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fixture: Value = test::read_body_json(resp).await;
    assert_eq!(fixture["status"], "ongoing");
    assert_eq!(fixture["sets"][0]["completed"], true);
    let fixture_id = fixture["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/fixtures/{fixture_id}"))
        .set_json(json!({ "sets": [
            { "team_a_score": 21, "team_b_score": 10 },
            { "team_a_score": 21, "team_b_score": 12 }
        ] }))
        .to_request();
    let fixture: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fixture["status"], "completed");
    assert_eq!(fixture["winner"], ids[0].as_str());
    assert_eq!(fixture["winner_name"], "Asha");

    let req = test::TestRequest::get().uri(&event_url(t, e, "bracket")).to_request();
    let bracket: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(bracket["rounds"][1]["matches"][0]["team_a"], ids[0].as_str());

    let req = test::TestRequest::get().uri(&event_url(t, e, "live")).to_request();
    let live: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(live["active"]["round"], 0);
    assert_eq!(live["champion"], Value::Null);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/fixtures/{fixture_id}/winner"))
        .to_request();
    let fixture: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fixture["winner"], Value::Null);
    assert_eq!(fixture["status"], "scheduled");

    let req = test::TestRequest::get().uri(&event_url(t, e, "bracket")).to_request();
    let bracket: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(bracket["rounds"][1]["matches"][0]["team_a"], Value::Null);

    let req = test::TestRequest::delete()
        .uri(&event_url(t, e, "fixtures"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["deleted"], 2);

    let req = test::TestRequest::get().uri(&event_url(t, e, "fixtures")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn draft_fixture_can_be_created_explicitly() {
    let app = test::init_service(App::new().app_data(state()).configure(api::configure)).await;
    let (t, e) = (Uuid::new_v4(), Uuid::new_v4());
    for name in ["Asha", "Bela", "Chen", "Dara"] {
        let req = test::TestRequest::post()
            .uri(&event_url(t, e, "participants"))
            .set_json(json!({ "name": name }))
            .to_request();
        test::call_service(&app, req).await;
    }
    let req = test::TestRequest::post()
        .uri(&event_url(t, e, "fixtures/generate"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let body = json!({
        "tournament_id": t,
        "event_id": e,
        "round": 1,
        "match_index": 0,
        "scheduled_at": "2026-03-01T10:00:00Z"
    });
    let req = test::TestRequest::post()
        .uri("/api/fixtures")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let fixture: Value = test::read_body_json(resp).await;
    assert_eq!(fixture["draft"], false);
    assert_eq!(fixture["scheduled_at"], "2026-03-01T10:00:00Z");

    let req = test::TestRequest::post()
        .uri("/api/fixtures")
        .set_json(&body)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn csv_import_registers_everyone() {
    let app = test::init_service(App::new().app_data(state()).configure(api::configure)).await;
    let (t, e) = (Uuid::new_v4(), Uuid::new_v4());
    let req = test::TestRequest::post()
        .uri(&event_url(t, e, "participants/import"))
        .insert_header(("content-type", "text/csv"))
        .set_payload("name,partner,group\nAsha,Bela,North\nChen,,\n")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(body[0]["partner"], "Bela");

    let req = test::TestRequest::post()
        .uri(&event_url(t, e, "participants/import"))
        .insert_header(("content-type", "text/csv"))
        .set_payload("name\nDara\nchen\n")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri(&event_url(t, e, "participants"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn malformed_bodies_are_bad_requests() {
    let app = test::init_service(App::new().app_data(state()).configure(api::configure)).await;
    let (t, e) = (Uuid::new_v4(), Uuid::new_v4());
    for name in ["Asha", "Bela"] {
        let req = test::TestRequest::post()
            .uri(&event_url(t, e, "participants"))
            .set_json(json!({ "name": name }))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::post()
        .uri(&event_url(t, e, "fixtures/generate"))
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);

    let req = test::TestRequest::post()
        .uri(&event_url(t, e, "fixtures/generate"))
        .set_json(json!({ "seed_order": ["nope"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid participant id in seed order");

    let req = test::TestRequest::post()
        .uri(&event_url(t, e, "participants"))
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"nickname\": 3}")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn round_schedule_global_config_and_byes() {
    let app = test::init_service(App::new().app_data(state()).configure(api::configure)).await;
    let (t, e) = (Uuid::new_v4(), Uuid::new_v4());
    let mut ids = Vec::new();
    for name in ["Asha", "Bela", "Chen"] {
        let req = test::TestRequest::post()
            .uri(&event_url(t, e, "participants"))
            .set_json(json!({ "name": name }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        ids.push(body["id"].as_str().unwrap().to_string());
    }
    let req = test::TestRequest::post()
        .uri(&event_url(t, e, "fixtures/generate"))
        .set_json(json!({ "seed_order": ids }))
        .to_request();
    let bracket: Value = test::call_and_read_body_json(&app, req).await;
    let bye = &bracket["rounds"][0]["matches"][1];
    assert_eq!(bye["status"], "completed");
    assert_eq!(bye["winner"], ids[2].as_str());
    let bye_id = bye["id"].as_str().unwrap().to_string();
    let first_id = bracket["rounds"][0]["matches"][0]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&event_url(t, e, "rounds/1/schedule"))
        .set_json(json!({ "scheduled_at": "2026-03-01T10:00:00Z" }))
        .to_request();
    let round: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(round["name"], "Final");
    assert_eq!(round["matches"][0]["scheduled_at"], "2026-03-01T10:00:00Z");
    assert_eq!(round["matches"][0]["draft"], false);
    let final_id = round["matches"][0]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&event_url(t, e, "rounds/7/schedule"))
        .set_json(json!({ "scheduled_at": "2026-03-01T10:00:00Z" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri(&event_url(t, e, "config"))
        .set_json(json!({ "max_sets": 5, "points_to_win": 15, "deuce": false, "court_number": 2 }))
        .to_request();
    let bracket: Value = test::call_and_read_body_json(&app, req).await;
    for round in bracket["rounds"].as_array().unwrap() {
        for fixture in round["matches"].as_array().unwrap() {
            assert_eq!(fixture["config"]["max_sets"], 5);
            assert_eq!(fixture["config"]["court_number"], 2);
        }
    }

    let req = test::TestRequest::put()
        .uri(&event_url(t, e, "config"))
        .set_json(json!({ "max_sets": 0 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    // undo the bye, then decide the other semi: the final still has an open side
    let req = test::TestRequest::delete()
        .uri(&format!("/api/fixtures/{bye_id}/winner"))
        .to_request();
    let fixture: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fixture["status"], "scheduled");

    let req = test::TestRequest::put()
        .uri(&format!("/api/fixtures/{first_id}"))
        .set_json(json!({ "winner": "team_a" }))
        .to_request();
    let fixture: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fixture["winner"], ids[0].as_str());

    let req = test::TestRequest::put()
        .uri(&format!("/api/fixtures/{final_id}"))
        .set_json(json!({ "winner": "team_a" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Both participants must be decided before scoring");

    let req = test::TestRequest::put()
        .uri(&event_url(t, e, "matches/0/1/score"))
        .set_json(json!({ "set_index": 0, "side": "team_a", "score": 15 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri(&event_url(t, e, "byes/advance"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["advanced"], 1);
    let final_match = &body["bracket"]["rounds"][1]["matches"][0];
    assert_eq!(final_match["team_a"], ids[0].as_str());
    assert_eq!(final_match["team_b"], ids[2].as_str());
    assert_eq!(final_match["status"], "scheduled");

    let req = test::TestRequest::post()
        .uri(&event_url(t, e, "byes/advance"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["advanced"], 0);
}
