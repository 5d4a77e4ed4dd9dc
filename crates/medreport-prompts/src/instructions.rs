/// The report sections requested from the model, in the order they are asked for.
pub const REPORT_SECTIONS: [&str; 5] = [
    "Differential diagnosis (list 3 most likely conditions)",
    "Recommended diagnostic tests",
    "Treatment plan (medications + lifestyle)",
    "Follow-up recommendations",
    "Red flags to watch for",
];

/// Append the report-format instructions to the prompt.
pub fn append_instructions(prompt: &mut String) {
    prompt.push_str("Provide a comprehensive report with:\n");
    for (i, section) in REPORT_SECTIONS.iter().enumerate() {
        prompt.push_str(&format!("{}. {section}\n", i + 1));
    }
    prompt.push_str("\nFormat the response in clear markdown with headings.\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_are_numbered() {
        let mut out = String::new();
        append_instructions(&mut out);
        assert!(out.contains("1. Differential diagnosis"));
        assert!(out.contains("5. Red flags to watch for\n"));
        assert!(out.ends_with("clear markdown with headings.\n"));
    }
}
