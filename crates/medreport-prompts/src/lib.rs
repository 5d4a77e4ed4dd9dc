pub mod case;
pub mod instructions;

pub use instructions::REPORT_SECTIONS;
use medreport_core::PatientCase;

/// Assemble the full diagnostic prompt for a patient case.
///
/// Sections are always emitted in the same order: role, profile, symptoms,
/// medical background, report instructions.
pub fn build_prompt(case: &PatientCase) -> String {
    let mut prompt = String::new();
    prompt.push_str("Act as an expert medical diagnostician. Analyze this patient case:\n\n");
    case::append_profile(&mut prompt, case);
    case::append_symptoms(&mut prompt, case);
    case::append_background(&mut prompt, case);
    instructions::append_instructions(&mut prompt);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use medreport_core::{BloodType, Gender, PatientForm, SymptomDuration};

    fn scenario_case() -> PatientCase {
        PatientCase {
            gender: Gender::Male,
            age: 45,
            height_cm: 175,
            weight_kg: 80,
            blood_type: BloodType::OPositive,
            allergies: "None".into(),
            symptoms: "fever for 3 days".into(),
            duration: SymptomDuration::OneToThreeDays,
            medical_history: "diabetes type 2".into(),
            current_medications: "metformin 500mg".into(),
        }
    }

    fn position(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("missing {needle:?} in prompt:\n{haystack}"))
    }

    #[test]
    fn scenario_prompt_contains_every_value() {
        let prompt = build_prompt(&scenario_case());
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
            assert!(prompt.contains(value), "missing {value:?}");
        }
    }

    #[test]
    fn scenario_prompt_exact_text() {
        let expected = "Act as an expert medical diagnostician. Analyze this patient case:\n\n\
Patient Profile:\n\
- Gender: Male\n\
- Age: 45\n\
- Height: 175 cm\n\
- Weight: 80 kg\n\
- Blood Type: O+\n\
- Allergies: None\n\n\
Symptoms:\n\
- fever for 3 days (Duration: 1-3 days)\n\n\
Medical Background:\n\
- History: diabetes type 2\n\
- Current Medications: metformin 500mg\n\n\
Provide a comprehensive report with:\n\
1. Differential diagnosis (list 3 most likely conditions)\n\
2. Recommended diagnostic tests\n\
3. Treatment plan (medications + lifestyle)\n\
4. Follow-up recommendations\n\
5. Red flags to watch for\n\n\
Format the response in clear markdown with headings.\n";
        assert_eq!(build_prompt(&scenario_case()), expected);
    }

    #[test]
    fn prompt_is_deterministic() {
        let case = scenario_case();
        assert_eq!(build_prompt(&case), build_prompt(&case));
    }

    #[test]
    fn blocks_appear_in_fixed_order() {
        let prompt = build_prompt(&scenario_case());
        let profile = position(&prompt, "Patient Profile:");
        let gender = position(&prompt, "- Gender: Male");
        let allergies = position(&prompt, "- Allergies: None");
        let symptoms = position(&prompt, "Symptoms:\n- fever for 3 days");
        let history = position(&prompt, "- History: diabetes type 2");
        let meds = position(&prompt, "- Current Medications: metformin 500mg");
        let instructions = position(&prompt, "Provide a comprehensive report with:");
        assert!(profile < gender);
        assert!(gender < allergies);
        assert!(allergies < symptoms);
        assert!(symptoms < history);
        assert!(history < meds);
        assert!(meds < instructions);
    }

    #[test]
    fn report_sections_always_present_in_order() {
        let odd = PatientCase {
            allergies: "1. Differential diagnosis".into(),
            symptoms: String::new(),
            medical_history: "Red flags".into(),
            ..PatientCase::default()
        };
        for case in [scenario_case(), PatientCase::default(), odd] {
            let prompt = build_prompt(&case);
            let tail = &prompt[position(&prompt, "Provide a comprehensive report with:")..];
            let mut last = 0;
            for section in REPORT_SECTIONS {
                let at = position(tail, section);
                assert!(at >= last, "{section:?} out of order");
                last = at;
            }
        }
    }

    #[test]
    fn unedited_placeholders_are_interpolated() {
        let case = PatientForm::default().into_case();
        let prompt = build_prompt(&case);
        assert!(prompt.contains(
            "- e.g., fever for 3 days, sharp pain in lower right abdomen (Duration: Less than 24 hours)"
        ));
        assert!(prompt.contains("- History: e.g., diabetes type 2 diagnosed 2018, hypertension"));
    }

    #[test]
    fn free_text_is_not_escaped() {
        let case = PatientCase {
            symptoms: "pain <left> & \"sharp\"\nsecond line".into(),
            ..PatientCase::default()
        };
        let prompt = build_prompt(&case);
        assert!(prompt.contains("- pain <left> & \"sharp\"\nsecond line (Duration:"));
    }
}
