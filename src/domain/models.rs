use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Debug, Serialize, Clone)]
pub struct ExtractReport {
    pub policy_name: String,
    pub path: String,
    pub controls: usize,
    /// Name of the repair strategy that reshaped the model output, if any.
    pub repair_strategy: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct DatasetFile {
    pub dataset: String,
    pub path: String,
    pub rows: usize,
}

#[derive(Debug, Serialize, Clone)]
pub struct GenerateReport {
    pub out_dir: String,
    pub seed: u64,
    pub users: usize,
    pub files: Vec<DatasetFile>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserRecord {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: String,
    pub employment_type: String,
    pub privilege_level: String,
    pub critical_asset_access: u8,
    pub hire_date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PhishingRecord {
    pub user_id: String,
    pub timestamp: NaiveDateTime,
    pub opened: u8,
    pub clicked: u8,
    pub reported: u8,
    pub creds_submitted: u8,
    pub origin_type: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AccessRecord {
    pub user_id: String,
    pub timestamp: NaiveDateTime,
    pub action: String,
    pub data_gb: f64,
    pub after_hours: u8,
    pub anomalous_geo: u8,
    pub origin_type: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ViolationRecord {
    pub user_id: String,
    pub timestamp: NaiveDateTime,
    pub violation_type: String,
    pub severity: String,
    pub repeat_count: u8,
    pub origin_type: String,
}
