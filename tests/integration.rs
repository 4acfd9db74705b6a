//! Integration tests for the diária engine.
//!
//! This test suite drives the HTTP API with the shipped CBMMG tables and
//! covers:
//! - Day counting (DI/PA) across clock-time boundaries
//! - Destination classification and location floors
//! - Seniority and tenure factors
//! - Lodging surcharge
//! - Request-supplied override tables
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use diaria_engine::api::{AppState, create_router};
use diaria_engine::calculation::calculate_diaria;
use diaria_engine::config::ConfigLoader;
use diaria_engine::report::parse_report;

// =============================================================================
// Test Helpers
// =============================================================================

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/cbmmg").expect("Failed to load config")
}

fn create_router_for_test() -> Router {
    create_router(AppState::new(load_config()))
}

fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

async fn post_calculate(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn create_request(rank: &str, municipality: &str, start: &str, end: &str) -> Value {
    json!({
        "rank": rank,
        "municipality": municipality,
        "start": start,
        "end": end
    })
}

fn assert_money(result: &Value, field: &str, expected: &str) {
    let actual = result["result"][field].as_str().unwrap();
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected {} {}, got {}",
        field,
        expected,
        actual
    );
}

fn assert_days(result: &Value, di: u64, pa: u64) {
    assert_eq!(result["result"]["full_days"], di, "DI");
    assert_eq!(result["result"]["half_days"], pa, "PA");
}

// =============================================================================
// SECTION 1: Day counting
// =============================================================================

#[tokio::test]
async fn test_four_days_twelve_hours() {
    let request = create_request("CAP", "Belo Horizonte", "2026-12-01 06:00", "2026-12-05 18:00");

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_days(&result, 4, 1);
    assert_money(&result, "total", "1916.59");
}

#[tokio::test]
async fn test_short_remainder_has_no_half_day() {
    // 2 days 5h59m, return clock later than departure
    let request = create_request("CAP", "Belo Horizonte", "2026-12-01 06:00", "2026-12-03 11:59");

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_days(&result, 2, 0);
}

#[tokio::test]
async fn test_exactly_six_hours_is_a_half_day() {
    let request = create_request("CAP", "Belo Horizonte", "2026-12-01 08:00", "2026-12-01 14:00");

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_days(&result, 0, 1);
    // 509.22 / 2 − 74.98
    assert_money(&result, "total", "179.63");
}

#[tokio::test]
async fn test_return_clock_before_departure_adds_a_day() {
    // 1 day 20h elapsed, but 02:00 < 06:00 on the clock
    let request = create_request("CAP", "Belo Horizonte", "2026-12-01 06:00", "2026-12-03 02:00");

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_days(&result, 2, 0);
}

#[tokio::test]
async fn test_overnight_trip_under_a_day() {
    let request = create_request("CAP", "Belo Horizonte", "2026-12-01 22:00", "2026-12-02 03:00");

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_days(&result, 1, 0);
}

// =============================================================================
// SECTION 2: Destination classification and floors
// =============================================================================

#[tokio::test]
async fn test_state_capital_outside_home_state_is_capital() {
    let mut request = create_request("CAP", "São Paulo", "2026-12-01 06:00", "2026-12-02 06:00");
    request["outside_state"] = json!(true);

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["result"]["destination"], "capital");
}

#[tokio::test]
async fn test_special_municipality_from_list_ignores_accents() {
    let request = create_request("CAP", "uberlandia", "2026-12-01 06:00", "2026-12-02 06:00");

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["result"]["destination"], "special_municipality");
}

#[tokio::test]
async fn test_outside_state_non_capital_is_special() {
    let mut request = create_request("CAP", "Campinas", "2026-12-01 06:00", "2026-12-02 06:00");
    request["outside_state"] = json!(true);

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["result"]["destination"], "special_municipality");
}

#[tokio::test]
async fn test_unlisted_in_state_is_other() {
    let request = create_request("CAP", "Araxá", "2026-12-01 06:00", "2026-12-02 06:00");

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["result"]["destination"], "other_municipality");
}

#[tokio::test]
async fn test_low_rank_raised_to_capital_floor() {
    let request = create_request("SD", "Belo Horizonte", "2026-12-01 06:00", "2026-12-02 06:00");

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_money(&result, "unit_rate", "470.00");
    // 470.00 − 74.98
    assert_money(&result, "total", "395.02");
    let warnings = result["result"]["audit_trace"]["warnings"].as_array().unwrap();
    assert!(warnings.iter().any(|w| w["code"] == "LOCATION_FLOOR_APPLIED"));
}

// =============================================================================
// SECTION 3: Seniority and tenure factors
// =============================================================================

#[tokio::test]
async fn test_spreadsheet_reference_case() {
    let mut request = create_request("CAP", "Araxá", "2026-12-01 06:00", "2026-12-05 18:00");
    request["quinquennia"] = json!(3);

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_money(&result, "tenure_multiplier", "1.3");
    assert_money(&result, "unit_rate", "661.99");
    assert_money(&result, "total", "2604.06");
}

#[tokio::test]
async fn test_ade_override_replaces_quinquennia() {
    let mut request = create_request("CAP", "Araxá", "2026-12-01 06:00", "2026-12-05 18:00");
    request["quinquennia"] = json!(1);
    request["seniority_override"] = json!("30");

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_money(&result, "seniority_factor", "3");
    assert_money(&result, "total", "2604.06");
}

#[tokio::test]
async fn test_pre_2007_tenure_bonus_by_label() {
    let mut request = create_request("CAP", "Araxá", "2026-12-01 06:00", "2026-12-02 06:00");
    request["quinquennia"] = json!(3);
    request["tenure_bonus"] = json!("Sim - anterior a 1ºSet07");

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    // H = 1.3 × 1.1 = 1.43; 1.43 × 509.22 = 728.1846
    assert_money(&result, "tenure_multiplier", "1.43");
    assert_money(&result, "unit_rate", "728.18");
}

#[tokio::test]
async fn test_post_2007_tenure_bonus() {
    let mut request = create_request("CAP", "Araxá", "2026-12-01 06:00", "2026-12-02 06:00");
    request["quinquennia"] = json!(3);
    request["tenure_bonus"] = json!("post_september_2007");

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    // H = 1.1 + 0.3 = 1.4; 1.4 × 509.22 = 712.908
    assert_money(&result, "unit_rate", "712.91");
}

// =============================================================================
// SECTION 4: Lodging and allowance
// =============================================================================

#[tokio::test]
async fn test_lodging_surcharge_per_full_day() {
    let mut request = create_request("CAP", "Belo Horizonte", "2026-12-01 06:00", "2026-12-05 18:00");
    request["lodging"] = json!(true);

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["result"]["lodging_units"], 4);
    assert_money(&result, "total", "2935.03");
}

#[tokio::test]
async fn test_custom_incidental_allowance() {
    let mut request = create_request("CAP", "Belo Horizonte", "2026-12-01 06:00", "2026-12-02 06:00");
    request["incidental_allowance"] = json!("100.00");

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_money(&result, "total", "409.22");
}

// =============================================================================
// SECTION 5: Overrides, envelope and audit
// =============================================================================

#[tokio::test]
async fn test_override_special_list_applies_to_request_only() {
    let mut request = create_request("CAP", "Araxá", "2026-12-01 06:00", "2026-12-02 06:00");
    request["special_municipalities"] = json!(["Araxá"]);
    let router = create_router_for_test();

    let (status, result) = post_calculate(router.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["result"]["destination"], "special_municipality");

    let plain = create_request("CAP", "Uberlândia", "2026-12-01 06:00", "2026-12-02 06:00");
    let (_, result) = post_calculate(router, plain).await;
    assert_eq!(result["result"]["destination"], "special_municipality");
}

#[tokio::test]
async fn test_envelope_metadata() {
    let request = create_request("CAP", "Belo Horizonte", "2026-12-01 06:00", "2026-12-02 06:00");

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(result["calculation_id"].as_str().is_some());
    assert!(result["timestamp"].as_str().is_some());
    assert_eq!(result["engine_version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(result["tables_version"], "2026-01");
}

#[tokio::test]
async fn test_audit_trace_steps_in_order() {
    let request = create_request("CAP", "Belo Horizonte", "2026-12-01 06:00", "2026-12-05 18:00");

    let (_, result) = post_calculate(create_router_for_test(), request).await;

    let steps = result["result"]["audit_trace"]["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 6);
    for (index, step) in steps.iter().enumerate() {
        assert_eq!(step["step_number"], index as u64 + 1);
        assert!(!step["reasoning"].as_str().unwrap().is_empty());
    }
    assert_eq!(steps[5]["rule_id"], "total_amount");
}

#[tokio::test]
async fn test_rank_by_display_name() {
    let request = create_request("1º Tenente", "Belo Horizonte", "2026-12-01 06:00", "2026-12-02 06:00");

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_money(&result, "base_daily_rate", "452.87");
}

// =============================================================================
// SECTION 6: Error cases
// =============================================================================

#[tokio::test]
async fn test_end_equal_to_start_rejected() {
    let request = create_request("CAP", "Belo Horizonte", "2026-12-01 06:00", "2026-12-01 06:00");

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_RANGE");
}

#[tokio::test]
async fn test_unknown_rank_rejected() {
    let request = create_request("ALMIRANTE", "Belo Horizonte", "2026-12-01 06:00", "2026-12-02 06:00");

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "UNKNOWN_RATE");
}

#[tokio::test]
async fn test_invalid_timestamp_rejected() {
    let request = create_request("CAP", "Belo Horizonte", "2026-13-01 06:00", "2026-12-02 06:00");

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_TIMESTAMP");
}

#[tokio::test]
async fn test_missing_field_rejected() {
    let request = json!({"rank": "CAP", "start": "2026-12-01 06:00", "end": "2026-12-02 06:00"});

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_tenure_bonus_rejected() {
    let mut request = create_request("CAP", "Belo Horizonte", "2026-12-01 06:00", "2026-12-02 06:00");
    request["tenure_bonus"] = json!("sometimes");

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
}

// =============================================================================
// SECTION 7: Report to calculation
// =============================================================================

#[test]
fn test_report_member_calculated_with_shipped_tables() {
    let text = "\
01 BOA 047.600.536-11 147.857-7 Bruno França Gonçalves  Capitão - 30 Belo Horizonte - MG Teófilo Otoni/Uberlândia 441 km - 1 - Itaú - 341 6662 05749-3
N. MILITAR: :
147.857-7
N° Seq. LOCAL DE PARTIDA DATA DE PARTIDA HORÁRIO DE PARTIDA LOCAL DE DESTINO DATA DE DESTINO HORÁRIO DE DESTINO
01
Belo horizonte
23/12/2025
10:01
Teófilo Otoni
23/12/2025
18:34
Criado por 08761724602";
    let loader = load_config();
    let report = parse_report(text);

    let request = diaria_engine::cli::member_request(&report, loader.config()).unwrap();
    let result = calculate_diaria(&request, loader.config()).unwrap();

    // 8h33 same day: half day only; Teófilo Otoni is on the special list.
    assert_eq!((result.full_days, result.half_days), (0, 1));
    assert_eq!(result.destination.label(), "Município Especial");
    // H = 1.3; 1.3 × 509.22 = 661.986 → 661.99; 330.995 − 74.98 → 256.02
    assert_eq!(result.total, Decimal::from_str("256.02").unwrap());
}
