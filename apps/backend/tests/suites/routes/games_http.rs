//! Game session endpoints driven over HTTP.

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::json;

use crate::common::read_json;
use crate::support::app_builder::create_test_app;
use crate::support::test_state::test_state;

#[actix_web::test]
async fn test_create_join_start_and_snapshot() {
    let app = create_test_app(test_state().await).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/games")
            .set_json(json!({ "host_name": "Ann", "round_count": 2, "max_players": 4 }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = read_json(resp).await;
    let game_id = created["game"]["id"].as_i64().unwrap();
    let host_id = created["player"]["id"].as_i64().unwrap();
    let code = created["game"]["join_code"].as_str().unwrap().to_string();
    assert_eq!(created["game"]["status"], "waiting");
    assert_eq!(created["game"]["leader_player_id"], host_id);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/games/join")
            .set_json(json!({ "join_code": code.to_lowercase(), "display_name": "Ben" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let joined = read_json(resp).await;
    let ben = joined["player"]["id"].as_i64().unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/games/{game_id}/start"))
            .set_json(json!({ "player_id": ben }))
            .to_request(),
    )
    .await;
    assert_problem_details_from_service_response(resp, "NOT_LEADER", StatusCode::FORBIDDEN, None)
        .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/games/{game_id}/start"))
            .set_json(json!({ "player_id": host_id }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let started = read_json(resp).await;
    assert_eq!(started["status"], "playing");
    assert_eq!(started["current_round"], 1);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/games/{game_id}/snapshot"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let snap = read_json(resp).await;
    assert_eq!(snap["players"].as_array().unwrap().len(), 2);
    assert!(snap["round"].is_null());
    assert!(snap["server_time"].is_string());
}

#[actix_web::test]
async fn test_disconnect_leader_then_promote() {
    let app = create_test_app(test_state().await).await;

    let created = read_json(
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/games")
                .set_json(json!({ "host_name": "Ann", "round_count": 1, "max_players": 4 }))
                .to_request(),
        )
        .await,
    )
    .await;
    let game_id = created["game"]["id"].as_i64().unwrap();
    let host_id = created["player"]["id"].as_i64().unwrap();
    let code = created["game"]["join_code"].as_str().unwrap().to_string();

    let joined = read_json(
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/games/join")
                .set_json(json!({ "join_code": code, "display_name": "Ben" }))
                .to_request(),
        )
        .await,
    )
    .await;
    let ben = joined["player"]["id"].as_i64().unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/games/players/{host_id}/disconnect"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let change = read_json(resp).await;
    assert_eq!(change["leader_disconnected"], true);
    assert_eq!(change["player"]["is_connected"], false);

    let promote = || {
        test::TestRequest::post()
            .uri(&format!("/api/games/{game_id}/leader/promote"))
            .set_json(json!({ "disconnected_player_id": host_id }))
            .to_request()
    };
    let first = read_json(test::call_service(&app, promote()).await).await;
    assert_eq!(first["outcome"], "promoted");
    assert_eq!(first["new_leader_id"], ben);

    let second = read_json(test::call_service(&app, promote()).await).await;
    assert_eq!(second["outcome"], "not_needed");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/games/players/{host_id}/connect"))
            .to_request(),
    )
    .await;
    let back = read_json(resp).await;
    assert_eq!(back["player"]["is_connected"], true);
    assert_eq!(back["leader_disconnected"], false);
}

#[actix_web::test]
async fn test_join_unknown_code_is_not_found() {
    let app = create_test_app(test_state().await).await;
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/games/join")
            .set_json(json!({ "join_code": "not a code!", "display_name": "Ben" }))
            .to_request(),
    )
    .await;
    assert_problem_details_from_service_response(
        resp,
        "GAME_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;
}
