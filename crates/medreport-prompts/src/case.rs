use medreport_core::PatientCase;

/// Render the patient profile block: demographics, blood type and allergies.
pub fn append_profile(prompt: &mut String, case: &PatientCase) {
    prompt.push_str("Patient Profile:\n");
    prompt.push_str(&format!("- Gender: {}\n", case.gender));
    prompt.push_str(&format!("- Age: {}\n", case.age));
    prompt.push_str(&format!("- Height: {} cm\n", case.height_cm));
    prompt.push_str(&format!("- Weight: {} kg\n", case.weight_kg));
    prompt.push_str(&format!("- Blood Type: {}\n", case.blood_type));
    prompt.push_str(&format!("- Allergies: {}\n\n", case.allergies));
}

pub fn append_symptoms(prompt: &mut String, case: &PatientCase) {
    prompt.push_str("Symptoms:\n");
    prompt.push_str(&format!(
        "- {} (Duration: {})\n\n",
        case.symptoms, case.duration
    ));
}

pub fn append_background(prompt: &mut String, case: &PatientCase) {
    prompt.push_str("Medical Background:\n");
    prompt.push_str(&format!("- History: {}\n", case.medical_history));
    prompt.push_str(&format!(
        "- Current Medications: {}\n\n",
        case.current_medications
    ));
}
