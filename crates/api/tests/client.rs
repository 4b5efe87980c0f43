use std::time::Duration;

use axum::{
	http::{header, HeaderMap, StatusCode},
	response::IntoResponse,
	routing::{get, post},
	Json, Router,
};
use bs_api::{auth, faction, feature_access, stats, Error, RequestConfig};
use bs_metrics::{battle_metrics, parse_edited_form, NumberLocale};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tracing_test::traced_test;

mod common;

use common::{config, serve, SESSION};

fn cookie(headers: &HeaderMap) -> Option<&str> {
	headers.get(header::COOKIE).and_then(|v| v.to_str().ok())
}

#[tokio::test]
#[traced_test]
async fn stats_are_fetched_with_the_session() {
	let app = Router::new().route(
		"/stats",
		get(|headers: HeaderMap| async move {
			assert_eq!(cookie(&headers), Some(SESSION));
			Json(json!({
				"total_wins": { "current": 150, "previous": 145 },
				"kills": 500,
			}))
		}),
	);
	let addr = serve(app).await;

	let body = stats::get(config(addr)).await.unwrap();

	assert_eq!(body["kills"], json!(500));
	assert_eq!(body["total_wins"]["previous"], json!(145));
	assert!(logs_contain("Fetching stats"));
}

#[tokio::test]
#[traced_test]
async fn error_body_wins_over_success_status() {
	let app = Router::new().route(
		"/stats",
		get(|| async { Json(json!({ "error": "Not logged in" })) }),
	);
	let addr = serve(app).await;

	let err = stats::get(config(addr)).await.unwrap_err();

	assert!(
		matches!(&err, Error::Remote { status, message, details: None }
			if *status == StatusCode::OK && message == "Not logged in"),
		"{err:?}"
	);
}

#[tokio::test]
#[traced_test]
async fn submit_sends_every_editable_metric() {
	let app = Router::new().route(
		"/stats",
		post(|Json(body): Json<Value>| async move {
			let body = body.as_object().unwrap();
			assert_eq!(body.len(), 15);
			assert!(!body.contains_key("win_rate"));
			assert_eq!(body["kills"], json!(1234));
			Json(json!({ "message": "Stats updated successfully" }))
		}),
	);
	let addr = serve(app).await;

	let mut raw = battle_metrics()
		.editable()
		.map(|def| (def.key().to_string(), "0".to_string()))
		.collect::<std::collections::HashMap<_, _>>();
	raw.insert("kills".into(), "1,234".into());
	let edited = parse_edited_form(battle_metrics(), &raw, NumberLocale::EN_US).unwrap();

	let message = stats::update(config(addr), &edited).await.unwrap();

	assert_eq!(message, "Stats updated successfully");
}

#[tokio::test]
#[traced_test]
async fn rejected_submit_keeps_details() {
	let app = Router::new().route(
		"/stats",
		post(|| async {
			(
				StatusCode::BAD_REQUEST,
				Json(json!({ "error": "Invalid data", "details": "kills must be positive" })),
			)
		}),
	);
	let addr = serve(app).await;

	let edited = bs_metrics::EditDraft::from_values(
		battle_metrics(),
		&bs_metrics::MetricValues::zeroed(battle_metrics()),
		NumberLocale::EN_US,
	)
	.parse()
	.unwrap();

	let err = stats::update(config(addr), &edited).await.unwrap_err();

	assert_eq!(err.to_string(), "Invalid data: kills must be positive");
}

#[tokio::test]
#[traced_test]
async fn failure_status_without_body() {
	let app = Router::new().route(
		"/faction/join",
		post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
	);
	let addr = serve(app).await;

	let err = faction::join(config(addr), "ABCD1234").await.unwrap_err();

	assert!(
		matches!(err, Error::Status(status) if status == StatusCode::INTERNAL_SERVER_ERROR),
		"{err:?}"
	);
	assert_eq!(err.to_string(), "server answered 500 Internal Server Error");
}

#[tokio::test]
#[traced_test]
async fn login_captures_cookie_and_destination() {
	let app = Router::new()
		.route(
			"/login",
			post(|Json(body): Json<Value>| async move {
				assert_eq!(body, json!({ "username": "ada", "password": "hunter2" }));
				(
					[(header::SET_COOKIE, "session=xyz; HttpOnly; Path=/")],
					Json(json!({
						"message": "Logged in successfully",
						"is_admin": true,
						"redirect": "/dashboard",
					})),
				)
			}),
		)
		.route(
			"/register",
			post(|| async { (StatusCode::CREATED, Json(json!({}))) }),
		);
	let addr = serve(app).await;
	let config = RequestConfig::new(format!("http://{addr}"), Duration::from_secs(5)).unwrap();

	let login = auth::login(config.clone(), "ada", "hunter2").await.unwrap();

	assert_eq!(login.destination(), "/admin/dashboard");
	assert_eq!(login.session.as_ref().map(auth::SessionCookie::as_str), Some("session=xyz"));

	let message = auth::register(config, "bob", "bob@example.com", "pw")
		.await
		.unwrap();
	assert_eq!(message, "Registration successful. Please log in.");
}

#[tokio::test]
#[traced_test]
async fn faction_lifecycle() {
	let app = Router::new()
		.route(
			"/faction/create",
			post(|Json(body): Json<Value>| async move {
				assert_eq!(body, json!({ "name": "Iron Wolves" }));
				(
					StatusCode::CREATED,
					Json(json!({ "message": "Faction created", "invitation_code": "K3Y9Q2ZA" })),
				)
			}),
		)
		.route(
			"/faction/members",
			get(|| async { Json(json!({ "members": [{ "username": "ada" }, "bob"] })) }),
		);
	let addr = serve(app).await;

	let created = faction::create(config(addr), "Iron Wolves").await.unwrap();
	assert_eq!(
		created.confirmation(),
		"Faction created successfully. Invitation code: K3Y9Q2ZA"
	);

	let members = faction::members(config(addr)).await.unwrap();
	assert_eq!(members, vec!["ada".to_string(), "bob".to_string()]);
}

#[tokio::test]
#[traced_test]
async fn feature_access_posts_full_grid() {
	let app = Router::new()
		.route(
			feature_access::DEFAULT_UPDATE_PATH,
			post(|Json(body): Json<Value>| async move {
				assert_eq!(
					body,
					json!({ "1": { "edit_stats": true, "export": false } })
				);
				Json(json!({ "success": true }))
			}),
		)
		.route(
			"/custom/access",
			post(|| async { Json(json!({ "success": false, "error": "Admins only" })).into_response() }),
		);
	let addr = serve(app).await;

	let mut matrix = feature_access::FeatureAccessMatrix::new([1], ["Edit Stats", "Export"]);
	matrix.grant(1, "edit_stats").unwrap();

	feature_access::update(config(addr), feature_access::DEFAULT_UPDATE_PATH, &matrix)
		.await
		.unwrap();

	let err = feature_access::update(config(addr), "custom/access", &matrix)
		.await
		.unwrap_err();
	assert_eq!(err.to_string(), "Admins only");
}

#[tokio::test]
#[traced_test]
async fn slow_server_times_out() {
	let app = Router::new().route(
		"/stats",
		get(|| async {
			tokio::time::sleep(Duration::from_secs(2)).await;
			Json(json!({}))
		}),
	);
	let addr = serve(app).await;
	let config =
		RequestConfig::new(format!("http://{addr}"), Duration::from_millis(100)).unwrap();

	let err = stats::get(config).await.unwrap_err();

	assert!(err.is_timeout(), "{err:?}");
}
