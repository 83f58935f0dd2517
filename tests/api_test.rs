use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use station_watch::{app, AppState};
use tower::ServiceExt;

// ===== Helper Functions =====

async fn body_string(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn post_form(router: &Router, body: &str) -> axum::response::Response {
    router.clone().oneshot(form_request(body)).await.unwrap()
}

// ===== Control Page =====

mod control_page {
    use super::*;

    #[tokio::test]
    async fn should_render_page() {
        let router = app(AppState::new(false));

        let response = router.oneshot(get_request("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
        let html = body_string(response.into_body()).await;
        assert!(html.contains("Station Watch"));
        assert!(html.contains("No stations monitored."));
    }

    #[tokio::test]
    async fn should_add_station_and_redirect() {
        // Arrange
        let state = AppState::new(false);
        let router = app(state.clone());

        // Act
        let response = post_form(&router, "station=+egll_twr+&add_station=1").await;

        // Assert
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        assert!(state.stations.read().await.monitored.contains("EGLL_TWR"));
    }

    #[tokio::test]
    async fn should_render_stations_sorted() {
        let router = app(AppState::new(false));
        post_form(&router, "station=LFPG_TWR&add_station=1").await;
        post_form(&router, "station=EDDF_GND&add_station=1").await;
        post_form(&router, "station=KJFK_TWR&add_station=1").await;

        let response = router.clone().oneshot(get_request("/")).await.unwrap();
        let html = body_string(response.into_body()).await;

        let eddf = html.find("EDDF_GND").unwrap();
        let kjfk = html.find("KJFK_TWR").unwrap();
        let lfpg = html.find("LFPG_TWR").unwrap();
        assert!(eddf < kjfk && kjfk < lfpg);
    }

    #[tokio::test]
    async fn should_ignore_blank_station() {
        let state = AppState::new(false);
        let router = app(state.clone());

        let response = post_form(&router, "station=+++&add_station=1").await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(state.stations.read().await.monitored.is_empty());
        assert!(state.activity_snapshot().is_empty());
    }

    #[tokio::test]
    async fn should_remove_station_and_its_status() {
        // Arrange
        let state = AppState::new(false);
        let router = app(state.clone());
        post_form(&router, "station=EGLL_TWR&add_station=1").await;
        state
            .stations
            .write()
            .await
            .statuses
            .insert("EGLL_TWR".to_string(), true);

        // Act
        let response = post_form(&router, "remove_station=EGLL_TWR").await;

        // Assert
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let stations = state.stations.read().await;
        assert!(stations.monitored.is_empty());
        assert!(stations.statuses.is_empty());
    }

    #[tokio::test]
    async fn should_toggle_debug_mode() {
        let state = AppState::new(false);
        let router = app(state.clone());

        post_form(&router, "toggle_debug=1").await;
        assert!(state.stations.read().await.debug_mode);

        post_form(&router, "toggle_debug=1").await;
        assert!(!state.stations.read().await.debug_mode);

        let logs = state.activity_snapshot();
        assert!(logs[0].ends_with("Debug mode ENABLED"));
        assert!(logs[1].ends_with("Debug mode DISABLED"));
    }

    #[tokio::test]
    async fn should_redirect_on_form_without_action() {
        let state = AppState::new(false);
        let router = app(state.clone());

        let response = post_form(&router, "station=EGLL_TWR").await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(state.stations.read().await.monitored.is_empty());
    }

    #[tokio::test]
    async fn should_return_400_for_overlong_station() {
        let state = AppState::new(false);
        let router = app(state.clone());
        let body = format!("station={}&add_station=1", "X".repeat(40));

        let response = post_form(&router, &body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["isSuccess"], false);
        assert_eq!(json["code"], "STATION400");
        assert!(state.stations.read().await.monitored.is_empty());
    }

    #[tokio::test]
    async fn should_reject_station_longer_than_limit_once_uppercased() {
        // Arrange
        let state = AppState::new(false);
        let router = app(state.clone());
        let body = format!("station={}&add_station=1", "%C3%9F".repeat(20));

        // Act
        let response = post_form(&router, &body).await;

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["code"], "STATION400");
        assert!(state.stations.read().await.monitored.is_empty());
    }

    #[tokio::test]
    async fn should_accept_padded_station_at_limit() {
        let state = AppState::new(false);
        let router = app(state.clone());
        let station = "A".repeat(32);
        let body = format!("station=++++{}++++&add_station=1", station);

        let response = post_form(&router, &body).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(state.stations.read().await.monitored.contains(&station));
    }

    #[tokio::test]
    async fn should_remove_any_monitored_station_regardless_of_length() {
        // Arrange
        let state = AppState::new(false);
        let router = app(state.clone());
        let station = "SS".repeat(20);
        state.stations.write().await.monitored.insert(station.clone());

        // Act
        let response = post_form(&router, &format!("remove_station={}", station)).await;

        // Assert
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(state.stations.read().await.monitored.is_empty());
    }

    #[tokio::test]
    async fn should_return_400_for_wrong_content_type() {
        let router = app(AppState::new(false));
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["code"], "COMMON400");
    }
}

// ===== JSON API =====

mod state_api {
    use super::*;

    #[tokio::test]
    async fn should_return_current_state() {
        // Arrange
        let state = AppState::new(false);
        let router = app(state.clone());
        post_form(&router, "station=kjfk_twr&add_station=1").await;
        post_form(&router, "station=egll_twr&add_station=1").await;
        post_form(&router, "toggle_debug=1").await;

        // Act
        let response = router
            .clone()
            .oneshot(get_request("/api/state"))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["isSuccess"], true);
        assert_eq!(json["result"]["stations"][0], "EGLL_TWR");
        assert_eq!(json["result"]["stations"][1], "KJFK_TWR");
        assert_eq!(json["result"]["debugMode"], true);
        assert_eq!(json["result"]["logs"].as_array().unwrap().len(), 3);
    }
}

// ===== Health Check =====

mod health {
    use super::*;

    #[tokio::test]
    async fn should_report_degraded_without_notifications() {
        let router = app(AppState::new(false));

        let response = router.oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["checks"]["notificationsEnabled"], false);
    }

    #[tokio::test]
    async fn should_report_healthy_with_notifications() {
        let router = app(AppState::new(true));

        let response = router.oneshot(get_request("/health")).await.unwrap();

        let json = body_json(response.into_body()).await;
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn should_echo_request_id_header() {
        let router = app(AppState::new(false));
        let request = Request::builder()
            .uri("/health")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }
}
