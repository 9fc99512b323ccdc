use actix_web::{http::StatusCode, test, web, App};
use common::{db::establish_connection, reasons::ReasonSet, utils::SaveVariant};
use remarks_server::{configure, AppState};
use serde_json::{json, Value};
use sqlx::AnyPool;

type Row = (
    i64,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
);

async fn seeded_pool() -> AnyPool {
    let pool = establish_connection("sqlite::memory:").await.unwrap();
    sqlx::query(
        "CREATE TABLE customers (id INTEGER PRIMARY KEY, Name TEXT, Mobno TEXT, \
         JCNo TEXT, Model TEXT, Remarks TEXT, Date TEXT, FollowUpDate TEXT, \
         BookingDate TEXT, SelectedReason TEXT)",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO customers (id, Name, Mobno, JCNo, Model) VALUES \
         (1, 'Ravi Kumar', '98450 12345', 'JC001', 'Activa'), \
         (2, 'Meena', '99000 11111', 'JC002', 'Splendor'), \
         (3, 'Arjun', NULL, 'JC003', 'Pulsar')",
    )
    .execute(&pool)
    .await
    .unwrap();
    pool
}

async fn stored_rows(pool: &AnyPool) -> Vec<Row> {
    sqlx::query_as(
        "SELECT id, Remarks, Date, FollowUpDate, BookingDate, SelectedReason \
         FROM customers ORDER BY id",
    )
    .fetch_all(pool)
    .await
    .unwrap()
}

fn state(pool: &AnyPool, save_variant: SaveVariant) -> web::Data<AppState> {
    web::Data::new(AppState {
        pool: pool.clone(),
        save_variant,
        reasons: ReasonSet::default(),
    })
}

fn save_request(body: Value) -> test::TestRequest {
    test::TestRequest::post().uri("/saveRemarks").set_json(body)
}

#[actix_web::test]
async fn lists_customers_without_touching_the_store() {
    let pool = seeded_pool().await;
    let before = stored_rows(&pool).await;
    let app = test::init_service(
        App::new()
            .app_data(state(&pool, SaveVariant::Extended))
            .configure(configure),
    )
    .await;

    let first: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/customers").to_request(),
    )
    .await;
    let second: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/customers").to_request(),
    )
    .await;

    assert_eq!(first, second);
    assert_eq!(
        first[0],
        json!({
            "id": 1,
            "Name": "Ravi Kumar",
            "Mobno": "98450 12345",
            "JCNo": "JC001",
            "Model": "Activa"
        })
    );
    assert_eq!(first.as_array().unwrap().len(), 3);
    assert_eq!(first[2]["Mobno"], Value::Null);
    assert_eq!(stored_rows(&pool).await, before);
}

#[actix_web::test]
async fn extended_save_updates_only_the_matching_row() {
    let pool = seeded_pool().await;
    let app = test::init_service(
        App::new()
            .app_data(state(&pool, SaveVariant::Extended))
            .configure(configure),
    )
    .await;

    let resp = test::call_service(
        &app,
        save_request(json!({
            "id": 1,
            "remarks": "Called, will visit",
            "followUpDate": "2024-06-01",
            "bookingDate": "2024-06-03",
            "selectedReason": ""
        })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "success": true, "selectedReason": "" }));

    let rows = stored_rows(&pool).await;
    assert_eq!(
        rows[0],
        (
            1,
            Some("Called, will visit".to_string()),
            None,
            Some("2024-06-01".to_string()),
            Some("2024-06-03".to_string()),
            Some(String::new()),
        )
    );
    assert_eq!(rows[1], (2, None, None, None, None, None));
    assert_eq!(rows[2], (3, None, None, None, None, None));
}

#[actix_web::test]
async fn extended_save_stores_the_not_coming_reason() {
    let pool = seeded_pool().await;
    let app = test::init_service(
        App::new()
            .app_data(state(&pool, SaveVariant::Extended))
            .configure(configure),
    )
    .await;

    let body: Value = test::call_and_read_body_json(
        &app,
        save_request(json!({
            "id": 2,
            "remarks": "Not Coming",
            "followUpDate": "2024-06-01",
            "bookingDate": "2024-06-03",
            "selectedReason": "Vehicle Sold"
        })).to_request(),
    )
    .await;
    assert_eq!(body, json!({ "success": true, "selectedReason": "Vehicle Sold" }));

    let rows = stored_rows(&pool).await;
    assert_eq!(rows[1].1.as_deref(), Some("Not Coming"));
    assert_eq!(rows[1].5.as_deref(), Some("Vehicle Sold"));
}

#[actix_web::test]
async fn missing_fields_are_rejected_and_nothing_changes() {
    let pool = seeded_pool().await;
    let before = stored_rows(&pool).await;
    let app = test::init_service(
        App::new()
            .app_data(state(&pool, SaveVariant::Extended))
            .configure(configure),
    )
    .await;

    let incomplete = [
        json!({ "remarks": "x", "followUpDate": "2024-06-01", "bookingDate": "2024-06-03" }),
        json!({ "id": 1, "remarks": "", "followUpDate": "2024-06-01", "bookingDate": "2024-06-03" }),
        json!({ "id": 1, "remarks": "x", "bookingDate": "2024-06-03" }),
        json!({ "id": 1, "remarks": "x", "followUpDate": "2024-06-01" }),
    ];
    for body in incomplete {
        let resp = test::call_service(&app, save_request(body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["error"],
            "id, remarks, followUpDate, and bookingDate are required"
        );
    }

    assert_eq!(stored_rows(&pool).await, before);
}

#[actix_web::test]
async fn unknown_id_still_reports_success() {
    let pool = seeded_pool().await;
    let before = stored_rows(&pool).await;
    let app = test::init_service(
        App::new()
            .app_data(state(&pool, SaveVariant::Extended))
            .configure(configure),
    )
    .await;

    let body: Value = test::call_and_read_body_json(
        &app,
        save_request(json!({
            "id": 404,
            "remarks": "Called",
            "followUpDate": "2024-06-01",
            "bookingDate": "2024-06-03",
            "selectedReason": ""
        })).to_request(),
    )
    .await;

    assert_eq!(body["success"], true);
    assert_eq!(stored_rows(&pool).await, before);
}

#[actix_web::test]
async fn basic_variant_writes_remarks_and_date() {
    let pool = seeded_pool().await;
    let app = test::init_service(
        App::new()
            .app_data(state(&pool, SaveVariant::Basic))
            .configure(configure),
    )
    .await;

    let body: Value = test::call_and_read_body_json(
        &app,
        save_request(json!({ "id": 3, "remarks": "Switched off", "date": "2024-06-05" })).to_request(),
    )
    .await;
    assert_eq!(body, json!({ "success": true }));

    let rows = stored_rows(&pool).await;
    assert_eq!(rows[2].1.as_deref(), Some("Switched off"));
    assert_eq!(rows[2].2.as_deref(), Some("2024-06-05"));
    assert_eq!(rows[2].3, None);

    let resp = test::call_service(
        &app,
        save_request(json!({ "id": 3, "remarks": "Switched off" })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "id, remarks, and date are required");
}

#[actix_web::test]
async fn malformed_body_is_a_bad_request() {
    let pool = seeded_pool().await;
    let app = test::init_service(
        App::new()
            .app_data(state(&pool, SaveVariant::Extended))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/saveRemarks")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(&app, save_request(json!({ "id": "one" })).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("Malformed request"));
}

#[actix_web::test]
async fn storage_failure_is_an_internal_error() {
    let pool = seeded_pool().await;
    sqlx::query("DROP TABLE customers")
        .execute(&pool)
        .await
        .unwrap();
    let app = test::init_service(
        App::new()
            .app_data(state(&pool, SaveVariant::Extended))
            .configure(configure),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/customers").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Internal server error" }));
}

#[actix_web::test]
async fn serves_configured_reasons_and_health() {
    let pool = seeded_pool().await;
    let app = test::init_service(
        App::new()
            .app_data(state(&pool, SaveVariant::Extended))
            .configure(configure),
    )
    .await;

    let reasons: Vec<String> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/reasons").to_request(),
    )
    .await;
    assert_eq!(reasons.len(), ReasonSet::default().len());
    assert_eq!(reasons[0], "High Distance From Home");

    let health: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/health").to_request(),
    )
    .await;
    assert_eq!(health, json!({ "status": "ok" }));
}
