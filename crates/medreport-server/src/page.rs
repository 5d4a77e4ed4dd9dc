//! Server-rendered form page.
//!
//! The page is rebuilt on every request from the effective `PatientCase`, so a
//! clamped number shows up clamped after submission.

use medreport_core::patient::{AGE_RANGE, HEIGHT_CM_RANGE, WEIGHT_KG_RANGE};
use medreport_core::{BloodType, Gender, PatientCase, SymptomDuration};
use medreport_report::ReportOutcome;

use crate::markdown::render_markdown;

pub const PAGE_TITLE: &str = "AI-Powered Medical Diagnosis System";
pub const BUTTON_LABEL: &str = "Generate Medical Report";
pub const PENDING_LABEL: &str = "Generating report ...";

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0 auto;max-width:1100px;padding:1rem 2rem}\
.columns{display:grid;grid-template-columns:1fr 1fr;gap:1.5rem}\
label{display:block;margin:.6rem 0 .2rem;font-weight:600}\
input,select,textarea{width:100%;box-sizing:border-box;padding:.4rem}\
textarea{min-height:5rem}\
button{margin-top:1rem;padding:.6rem 1.2rem}\
#pending{display:none;margin-left:1rem}\
.error{background:#fde8e8;color:#8a1c1c;padding:.8rem;border-radius:4px;margin-top:1rem}\
.report{border-top:1px solid #ddd;margin-top:1.5rem}";

const SUBMIT_SCRIPT: &str = "\
document.getElementById('case-form').addEventListener('submit',function(){\
var b=document.getElementById('generate');b.disabled=true;\
document.getElementById('pending').style.display='inline';});";

pub fn render(case: &PatientCase, outcome: Option<&ReportOutcome>) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    html.push_str(&format!("<title>{PAGE_TITLE}</title><style>{STYLE}</style></head><body>"));
    html.push_str(&format!("<h1>{PAGE_TITLE}</h1>"));
    html.push_str("<form id=\"case-form\" method=\"post\" action=\"/\">");

    html.push_str("<h2>Patient Information</h2><div class=\"columns\"><div>");
    push_select(&mut html, "gender", "Gender", Gender::ALL, case.gender, Gender::as_str);
    push_number(&mut html, "age", "Age", *AGE_RANGE.start(), *AGE_RANGE.end(), case.age);
    push_number(
        &mut html,
        "height_cm",
        "Height (cm)",
        *HEIGHT_CM_RANGE.start(),
        *HEIGHT_CM_RANGE.end(),
        case.height_cm,
    );
    html.push_str("</div><div>");
    push_number(
        &mut html,
        "weight_kg",
        "Weight (kg)",
        *WEIGHT_KG_RANGE.start(),
        *WEIGHT_KG_RANGE.end(),
        case.weight_kg,
    );
    push_select(
        &mut html,
        "blood_type",
        "Blood Type",
        BloodType::ALL,
        case.blood_type,
        BloodType::as_str,
    );
    html.push_str(&format!(
        "<label for=\"allergies\">Known Allergies</label>\
         <input type=\"text\" id=\"allergies\" name=\"allergies\" value=\"{}\">",
        escape_html(&case.allergies)
    ));
    html.push_str("</div></div>");

    html.push_str("<h2>Symptoms and Medical History</h2>");
    push_textarea(&mut html, "symptoms", "Current Symptoms", &case.symptoms);
    push_select(
        &mut html,
        "duration",
        "Duration of Symptoms",
        SymptomDuration::ALL,
        case.duration,
        SymptomDuration::as_str,
    );
    push_textarea(&mut html, "medical_history", "Medical History", &case.medical_history);
    push_textarea(
        &mut html,
        "current_medications",
        "Current Medications",
        &case.current_medications,
    );

    html.push_str(&format!(
        "<button type=\"submit\" id=\"generate\">{BUTTON_LABEL}</button>\
         <span id=\"pending\" role=\"status\">{PENDING_LABEL}</span></form>"
    ));

    match outcome {
        Some(ReportOutcome::Ready(rendered)) => {
            html.push_str("<section class=\"report\" id=\"report\">");
            html.push_str(&render_markdown(&rendered.report));
            html.push_str("</section><p class=\"download\">");
            html.push_str(&rendered.download.to_html());
            html.push_str("</p>");
        }
        Some(ReportOutcome::Failed { message, .. }) => {
            html.push_str(&format!(
                "<div class=\"error\" role=\"alert\">{}</div>",
                escape_html(message)
            ));
        }
        None => {}
    }

    html.push_str(&format!("<script>{SUBMIT_SCRIPT}</script></body></html>"));
    html
}

fn push_select<T: Copy + PartialEq>(
    html: &mut String,
    name: &str,
    label: &str,
    options: &[T],
    selected: T,
    as_str: fn(&T) -> &'static str,
) {
    html.push_str(&format!(
        "<label for=\"{name}\">{label}</label><select id=\"{name}\" name=\"{name}\">"
    ));
    for option in options {
        let value = escape_html(as_str(option));
        let mark = if *option == selected { " selected" } else { "" };
        html.push_str(&format!("<option value=\"{value}\"{mark}>{value}</option>"));
    }
    html.push_str("</select>");
}

fn push_number(html: &mut String, name: &str, label: &str, min: i64, max: i64, value: u32) {
    html.push_str(&format!(
        "<label for=\"{name}\">{label}</label>\
         <input type=\"number\" id=\"{name}\" name=\"{name}\" min=\"{min}\" max=\"{max}\" step=\"1\" value=\"{value}\" required>"
    ));
}

fn push_textarea(html: &mut String, name: &str, label: &str, value: &str) {
    html.push_str(&format!(
        "<label for=\"{name}\">{label}</label><textarea id=\"{name}\" name=\"{name}\">{}</textarea>",
        escape_html(value)
    ));
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
