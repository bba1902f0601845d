use serde_json::{json, Value};

use shared_config::AppConfig;

pub fn test_config(base_url: &str) -> AppConfig {
    AppConfig {
        supabase_url: base_url.to_string(),
        supabase_anon_key: "test-anon-key".to_string(),
        api_gateway_url: base_url.to_string(),
        collaborator_timeout_secs: 2,
    }
}

/// An appointment row as PostgREST would return it.
pub fn appointment_row(id: i64, doctor_id: i64, patient_id: i64, date: &str, time: &str, status: &str) -> Value {
    json!({
        "id": id,
        "doctor_id": doctor_id,
        "patient_id": patient_id,
        "patient_name": "Asha Rao",
        "age": 34,
        "gender": "F",
        "description": "Persistent cough",
        "date": date,
        "appointment_time": time,
        "status": status,
        "type": "checkup",
        "payment_mode": "UPI",
        "transaction_id": "TXN-1",
        "address": "12 Lake Road",
        "amount_paid": 500,
        "doctor_name": "Dr. Mehta"
    })
}

pub fn new_appointment_body(doctor_id: i64, patient_id: i64, date: &str, time: &str) -> Value {
    json!({
        "doctor_id": doctor_id,
        "patient_id": patient_id,
        "patient_name": "Asha Rao",
        "age": 34,
        "gender": "F",
        "description": "Persistent cough",
        "date": date,
        "appointment_time": time,
        "status": "Not Accepted",
        "type": "checkup",
        "payment_mode": "UPI",
        "transaction_id": "TXN-1",
        "address": "12 Lake Road",
        "amount_paid": 500,
        "doctor_name": "Dr. Mehta"
    })
}
