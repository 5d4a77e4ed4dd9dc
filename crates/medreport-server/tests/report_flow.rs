//! End-to-end tests over real HTTP: form submission → prompt → stub generator
//! → rendered page and downloadable .docx.

use std::io::{Cursor, Read};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use medreport_genai::{MockGenerator, ServiceCallFailure};
use medreport_server::test_helpers::spawn_test_server;

const DOCX_PREFIX: &str =
    "data:application/vnd.openxmlformats-officedocument.wordprocessingml.document;base64,";

fn scenario_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("gender", "Male"),
        ("age", "45"),
        ("height_cm", "175"),
        ("weight_kg", "80"),
        ("blood_type", "O+"),
        ("allergies", "None"),
        ("symptoms", "fever for 3 days"),
        ("duration", "1-3 days"),
        ("medical_history", "diabetes type 2"),
        ("current_medications", "metformin 500mg"),
    ]
}

fn document_xml(docx: &[u8]) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut file = archive.by_name("word/document.xml").unwrap();
    let mut xml = String::new();
    file.read_to_string(&mut xml).unwrap();
    xml
}

#[tokio::test]
async fn form_submission_produces_report_and_docx() {
    let mock = Arc::new(MockGenerator::success("# Diagnosis\n..."));
    let server = spawn_test_server(mock.clone()).await;

    let html = reqwest::Client::new()
        .post(format!("{}/", server.base_url))
        .form(&scenario_form())
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains("<h1>Diagnosis</h1>"));

    let prompts = mock.prompts();
    assert_eq!(prompts.len(), 1);
    for value in [
        "Male",
        "45",
        "175",
        "80",
        "O+",
        "None",
        "fever for 3 days",
        "1-3 days",
        "diabetes type 2",
        "metformin 500mg",
    ] {
        assert!(prompts[0].contains(value), "prompt missing {value:?}");
    }

    let start = html.find(DOCX_PREFIX).expect("download link") + DOCX_PREFIX.len();
    let end = start + html[start..].find('"').unwrap();
    let docx = B64.decode(&html[start..end]).unwrap();
    let xml = document_xml(&docx);
    assert!(xml.contains(
        "<w:p><w:r><w:t xml:space=\"preserve\"># Diagnosis</w:t><w:br/><w:t xml:space=\"preserve\">...</w:t></w:r></w:p>"
    ));
}

#[tokio::test]
async fn json_api_download_matches_page_semantics() {
    let server = spawn_test_server(Arc::new(MockGenerator::success("plain report"))).await;

    let resp = reqwest::Client::new()
        .post(format!("{}/api/report", server.base_url))
        .json(&serde_json::json!({ "age": 200, "weight_kg": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let v: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(v["case"]["age"], 120);
    assert_eq!(v["case"]["weight_kg"], 10);

    let href = v["download"]["href"].as_str().unwrap();
    let docx = B64.decode(href.strip_prefix(DOCX_PREFIX).unwrap()).unwrap();
    assert!(document_xml(&docx).contains("<w:t xml:space=\"preserve\">plain report</w:t>"));
}

#[tokio::test]
async fn service_failure_is_shown_inline() {
    let server = spawn_test_server(Arc::new(MockGenerator::failure(
        ServiceCallFailure::Timeout(std::time::Duration::from_secs(120)),
    )))
    .await;

    let resp = reqwest::Client::new()
        .post(format!("{}/", server.base_url))
        .form(&scenario_form())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Error generating report: request timed out after 120s"));
    assert!(!html.contains(DOCX_PREFIX));
}
