mod common;

use common::{assign_role, bearer, body_json, setup_app_data, test_client};
use poem::http::StatusCode;
use serde_json::json;
use sppg_monitor::types::internal::Role;

const IMPORT_CSV: &str = "\
id_sppg,nama_sppg,provinsi,kabupaten,prog_stat
ABCDEFGH,SPPG Bogor,JAWA BARAT,KABUPATEN BOGOR,
,,JAWA BARAT,,APPROVED
,SPPG Denpasar,BALI,KOTA DENPASAR,ON HOLD
,   ,BALI,,
";

#[tokio::test]
async fn test_csv_import_reports_only_valid_rows() {
    let app_data = setup_app_data().await;
    assign_role(&app_data, "admin", Role::SuperUser).await;
    let client = test_client(app_data.clone());

    let response = client
        .post("/api/sppg/import")
        .header("Authorization", bearer(&app_data, "admin"))
        .content_type("text/plain")
        .body(IMPORT_CSV)
        .send()
        .await;

    response.assert_status_is_ok();
    let body = body_json(response).await;
    assert_eq!(body["imported"], json!(2));
    assert_eq!(body["skipped"], json!(2));

    let response = client
        .get("/api/sppg/summary")
        .header("Authorization", bearer(&app_data, "admin"))
        .send()
        .await;
    let body = body_json(response).await;
    assert_eq!(body["total"], json!(2));
}

#[tokio::test]
async fn test_set_status_then_refetch_shows_new_status() {
    let app_data = setup_app_data().await;
    assign_role(&app_data, "admin", Role::SuperUser).await;
    let client = test_client(app_data.clone());
    let auth = bearer(&app_data, "admin");

    client
        .post("/api/sppg/import")
        .header("Authorization", auth.clone())
        .content_type("text/plain")
        .body(IMPORT_CSV)
        .send()
        .await
        .assert_status_is_ok();

    let response = client
        .put("/api/sppg")
        .header("Authorization", auth.clone())
        .body_json(&json!({ "id_sppg": "ABCDEFGH", "prog_stat": "APPROVED" }))
        .send()
        .await;
    response.assert_status_is_ok();
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["record"]["prog_stat"], json!("APPROVED"));

    let response = client
        .get("/api/sppg/ABCDEFGH")
        .header("Authorization", auth.clone())
        .send()
        .await;
    let body = body_json(response).await;
    assert_eq!(body["prog_stat"], json!("APPROVED"));

    let response = client
        .get("/api/sppg")
        .query("status", &"APPROVED")
        .header("Authorization", auth)
        .send()
        .await;
    let body = body_json(response).await;
    assert_eq!(body["total"], json!(1));
    assert_eq!(body["items"][0]["id_sppg"], json!("ABCDEFGH"));
}

#[tokio::test]
async fn test_read_only_user_cannot_write() {
    let app_data = setup_app_data().await;
    assign_role(&app_data, "viewer", Role::UserGranted).await;
    let client = test_client(app_data.clone());
    let auth = bearer(&app_data, "viewer");

    client
        .put("/api/sppg")
        .header("Authorization", auth.clone())
        .body_json(&json!({ "id_sppg": "ABCDEFGH", "prog_stat": "APPROVED" }))
        .send()
        .await
        .assert_status(StatusCode::FORBIDDEN);

    client
        .post("/api/sppg")
        .header("Authorization", auth.clone())
        .body_json(&json!({ "nama_sppg": "SPPG Baru" }))
        .send()
        .await
        .assert_status(StatusCode::FORBIDDEN);

    client
        .post("/api/sppg/import")
        .header("Authorization", auth)
        .content_type("text/plain")
        .body(IMPORT_CSV)
        .send()
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_errors() {
    let app_data = setup_app_data().await;
    assign_role(&app_data, "admin", Role::SuperUser).await;
    let client = test_client(app_data.clone());
    let auth = bearer(&app_data, "admin");

    client
        .put("/api/sppg")
        .header("Authorization", auth.clone())
        .body_json(&json!({ "id_sppg": "ZZZZZZZZ", "prog_stat": "APPROVED" }))
        .send()
        .await
        .assert_status(StatusCode::NOT_FOUND);

    client
        .post("/api/sppg")
        .header("Authorization", auth.clone())
        .body_json(&json!({ "id_sppg": "ABCDEFGH", "nama_sppg": "SPPG Bogor" }))
        .send()
        .await
        .assert_status_is_ok();

    client
        .put("/api/sppg")
        .header("Authorization", auth.clone())
        .body_json(&json!({ "id_sppg": "ABCDEFGH", "prog_stat": "SELESAI" }))
        .send()
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    client
        .put("/api/sppg")
        .header("Authorization", auth.clone())
        .body_json(&json!({ "id_sppg": "ABCDEFGH" }))
        .send()
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    client
        .post("/api/sppg")
        .header("Authorization", auth)
        .body_json(&json!({ "id_sppg": "abcdefgh", "nama_sppg": "SPPG Lain" }))
        .send()
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_export_includes_reference_marker() {
    let app_data = setup_app_data().await;
    assign_role(&app_data, "admin", Role::SuperUser).await;
    let client = test_client(app_data.clone());
    let auth = bearer(&app_data, "admin");

    client
        .post("/api/sppg")
        .header("Authorization", auth.clone())
        .body_json(&json!({ "id_sppg": "ABCDEFGH", "nama_sppg": "SPPG Bogor", "provinsi": "JAWA BARAT" }))
        .send()
        .await
        .assert_status_is_ok();
    client
        .put("/api/sppg")
        .header("Authorization", auth.clone())
        .body_json(&json!({ "id_sppg": "ABCDEFGH", "reff_attention": "ATTENTION" }))
        .send()
        .await
        .assert_status_is_ok();

    let response = client
        .get("/api/sppg/export")
        .header("Authorization", auth)
        .send()
        .await;
    response.assert_status_is_ok();
    let csv = response.0.into_body().into_string().await.unwrap();
    let lines: Vec<_> = csv.lines().collect();

    assert_eq!(
        lines[0],
        "id_sppg,nama_sppg,provinsi,kabupaten,kecamatan,alamat,prog_stat,reff_attention"
    );
    assert_eq!(lines[1], "ABCDEFGH,SPPG Bogor,JAWA BARAT,,,,PENDING UPDATE,ATTENTION");
}

#[tokio::test]
async fn test_huge_page_number_returns_empty_page() {
    let app_data = setup_app_data().await;
    assign_role(&app_data, "admin", Role::SuperUser).await;
    let client = test_client(app_data.clone());

    client
        .post("/api/sppg/import")
        .header("Authorization", bearer(&app_data, "admin"))
        .content_type("text/plain")
        .body(IMPORT_CSV)
        .send()
        .await
        .assert_status_is_ok();

    let response = client
        .get("/api/sppg")
        .query("page", &u64::MAX)
        .query("per_page", &100)
        .header("Authorization", bearer(&app_data, "admin"))
        .send()
        .await;

    response.assert_status_is_ok();
    let body = body_json(response).await;
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["total"], json!(2));
    assert_eq!(body["total_pages"], json!(1));
}
