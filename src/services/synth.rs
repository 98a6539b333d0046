//! Synthetic insider-risk telemetry: user directory, phishing simulations,
//! access logs and policy violations, written as CSV.
//!
//! Every draw comes from one seeded `StdRng` in a fixed order, so a seed and
//! a reference time fully determine the output.

use crate::domain::models::{
    AccessRecord, DatasetFile, GenerateReport, PhishingRecord, UserRecord, ViolationRecord,
};
use anyhow::Context;
use chrono::{Duration, Local, NaiveDateTime, SubsecRound, Timelike};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::path::PathBuf;

const ROLES: [&str; 6] = [
    "Analyst",
    "Manager",
    "Engineer",
    "Finance Officer",
    "HR Specialist",
    "Contractor",
];
const DEPARTMENTS: [&str; 5] = ["Finance", "HR", "Engineering", "Marketing", "Operations"];
const PRIVILEGE_LEVELS: [(&str, f64); 3] = [("normal", 0.70), ("elevated", 0.25), ("admin", 0.05)];
const CRITICAL_ACCESS_RATE: f64 = 0.12;
const HIRE_WINDOW_DAYS: i64 = 5 * 365;

const FIRST_NAMES: [&str; 16] = [
    "Alice", "Bob", "Carol", "David", "Emma", "Frank", "Grace", "Henry", "Irene", "Jack",
    "Karen", "Leo", "Maria", "Nikhil", "Olivia", "Priya",
];
const LAST_NAMES: [&str; 16] = [
    "Johnson", "Smith", "Davis", "Martinez", "Wilson", "Brown", "Lee", "Taylor", "Anderson",
    "Thomas", "White", "Jackson", "Garcia", "Patel", "Nguyen", "Okafor",
];
const EMAIL_DOMAINS: [&str; 4] = [
    "hera-corp.example",
    "northwind.example",
    "contoso.example",
    "fabrikam.example",
];

const ACTIONS: [(&str, f64); 6] = [
    ("read", 0.50),
    ("write", 0.15),
    ("delete", 0.02),
    ("escalate", 0.03),
    ("download", 0.20),
    ("modify", 0.10),
];
const BULK_ACTIONS: [&str; 3] = ["download", "write", "modify"];
const WORKDAY_START_HOUR: u32 = 7;
const WORKDAY_END_HOUR: u32 = 19;

const VIOLATION_TYPES: [&str; 4] = [
    "Access Violation",
    "Data Transfer Without Approval",
    "Policy Breach",
    "Phishing Response",
];
const SEVERITIES: [(&str, f64); 3] = [("low", 0.6), ("medium", 0.3), ("high", 0.1)];
const VIOLATION_COUNTS: [(usize, f64); 4] = [(0, 0.70), (1, 0.20), (2, 0.08), (3, 0.02)];

/// Per-role phishing click probability.
fn base_click_rate(role: &str) -> f64 {
    match role {
        "Analyst" => 0.10,
        "Manager" => 0.12,
        "Engineer" => 0.08,
        "Finance Officer" => 0.18,
        "HR Specialist" => 0.14,
        "Contractor" => 0.20,
        _ => 0.10,
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub users: usize,
    pub seed: u64,
    pub days: u32,
    pub out_dir: PathBuf,
    /// Reference time; events fall in `[now - days, now]`.
    pub now: NaiveDateTime,
}

impl GeneratorConfig {
    pub fn new(users: usize, seed: u64, days: u32, out_dir: PathBuf) -> Self {
        Self {
            users,
            seed,
            days,
            out_dir,
            now: Local::now().naive_local().trunc_subsecs(0),
        }
    }
}

pub struct SyntheticGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl SyntheticGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    /// Generate all four datasets and write them into `out_dir`.
    pub fn run(&mut self) -> anyhow::Result<GenerateReport> {
        self.window_start()?;
        std::fs::create_dir_all(&self.config.out_dir)
            .with_context(|| format!("cannot create {}", self.config.out_dir.display()))?;
        log::info!(
            "generating synthetic datasets for {} users (seed={})",
            self.config.users,
            self.config.seed
        );

        let users = self.users()?;
        let phishing = self.phishing(&users)?;
        let access = self.access_logs(&users)?;
        let violations = self.violations(&users)?;

        let files = vec![
            self.write_dataset("user_directory", &users)?,
            self.write_dataset("phishing_simulation", &phishing)?,
            self.write_dataset("access_logs", &access)?,
            self.write_dataset("policy_violations", &violations)?,
        ];

        Ok(GenerateReport {
            out_dir: self.config.out_dir.to_string_lossy().to_string(),
            seed: self.config.seed,
            users: users.len(),
            files,
        })
    }

    pub fn users(&mut self) -> anyhow::Result<Vec<UserRecord>> {
        let today = self.config.now.date();
        let mut rows = Vec::with_capacity(self.config.users);
        for i in 0..self.config.users {
            let role = self.pick(&ROLES);
            let first = self.pick(&FIRST_NAMES);
            let last = self.pick(&LAST_NAMES);
            let domain = self.pick(&EMAIL_DOMAINS);
            let employment_type = if role == "Contractor" {
                "contractor"
            } else {
                "employee"
            };
            rows.push(UserRecord {
                user_id: format!("USR{:04}", i + 1),
                name: format!("{first} {last}"),
                email: format!(
                    "{}.{}@{domain}",
                    first.to_lowercase(),
                    last.to_lowercase()
                ),
                department: self.pick(&DEPARTMENTS).to_string(),
                role: role.to_string(),
                employment_type: employment_type.to_string(),
                privilege_level: self.pick_weighted(&PRIVILEGE_LEVELS)?.to_string(),
                critical_asset_access: u8::from(self.chance(CRITICAL_ACCESS_RATE)),
                hire_date: today
                    .checked_sub_signed(Duration::days(self.rng.gen_range(0..=HIRE_WINDOW_DAYS)))
                    .ok_or_else(|| anyhow::anyhow!("hire date before {today} is out of range"))?,
            });
        }
        Ok(rows)
    }

    pub fn phishing(&mut self, users: &[UserRecord]) -> anyhow::Result<Vec<PhishingRecord>> {
        let mut rows = Vec::new();
        for u in users {
            let attempts = self.rng.gen_range(2..=4);
            let base_click = base_click_rate(&u.role);
            for timestamp in self.random_times(attempts)? {
                let opened = self.chance((base_click + 0.15).min(0.9));
                let clicked = opened && self.chance(base_click);
                let reported = opened && self.chance(0.25);
                let creds_submitted = clicked && self.chance(0.02);
                let origin_type = if self.chance(0.98) {
                    "employee"
                } else {
                    "external_attacker"
                };
                rows.push(PhishingRecord {
                    user_id: u.user_id.clone(),
                    timestamp,
                    opened: u8::from(opened),
                    clicked: u8::from(clicked),
                    reported: u8::from(reported),
                    creds_submitted: u8::from(creds_submitted),
                    origin_type: origin_type.to_string(),
                });
            }
        }
        rows.sort_by_key(|r| r.timestamp);
        Ok(rows)
    }

    pub fn access_logs(&mut self, users: &[UserRecord]) -> anyhow::Result<Vec<AccessRecord>> {
        let mut rows = Vec::new();
        for u in users {
            let events = self.rng.gen_range(8..=25);
            for timestamp in self.random_times(events)? {
                let action = self.pick_weighted(&ACTIONS)?;
                let data_gb = if BULK_ACTIONS.contains(&action) {
                    self.rng.gen_range(0.01..=5.0)
                } else {
                    self.rng.gen_range(0.0..=0.5)
                };
                let hour = timestamp.hour();
                let anomalous_geo = self.chance(0.02);
                let r: f64 = self.rng.gen();
                let origin_type = if r < 0.96 {
                    u.employment_type.as_str()
                } else if r < 0.99 {
                    "vendor"
                } else {
                    "external_attacker"
                };
                rows.push(AccessRecord {
                    user_id: u.user_id.clone(),
                    timestamp,
                    action: action.to_string(),
                    data_gb: round2(data_gb),
                    after_hours: u8::from(hour < WORKDAY_START_HOUR || hour > WORKDAY_END_HOUR),
                    anomalous_geo: u8::from(anomalous_geo),
                    origin_type: origin_type.to_string(),
                });
            }
        }
        rows.sort_by_key(|r| r.timestamp);
        Ok(rows)
    }

    pub fn violations(&mut self, users: &[UserRecord]) -> anyhow::Result<Vec<ViolationRecord>> {
        let mut rows = Vec::new();
        for u in users {
            let count = self.pick_weighted(&VIOLATION_COUNTS)?;
            for timestamp in self.random_times(count)? {
                let violation_type = self.pick(&VIOLATION_TYPES);
                let severity = self.pick_weighted(&SEVERITIES)?;
                let origin_type = if self.chance(0.98) {
                    "employee"
                } else {
                    "contractor"
                };
                rows.push(ViolationRecord {
                    user_id: u.user_id.clone(),
                    timestamp,
                    violation_type: violation_type.to_string(),
                    severity: severity.to_string(),
                    repeat_count: self.rng.gen_range(0..=3),
                    origin_type: origin_type.to_string(),
                });
            }
        }
        rows.sort_by_key(|r| r.timestamp);
        Ok(rows)
    }

    /// `n` whole-second timestamps uniformly spread over the history window.
    fn random_times(&mut self, n: usize) -> anyhow::Result<Vec<NaiveDateTime>> {
        let start = self.window_start()?;
        let span = (self.config.now - start).num_seconds();
        Ok((0..n)
            .map(|_| start + Duration::seconds(self.rng.gen_range(0..=span)))
            .collect())
    }

    fn window_start(&self) -> anyhow::Result<NaiveDateTime> {
        self.config
            .now
            .checked_sub_signed(Duration::days(i64::from(self.config.days)))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "history window of {} days is out of range",
                    self.config.days
                )
            })
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.rng.gen_range(0..items.len())]
    }

    fn pick_weighted<T: Copy>(&mut self, items: &[(T, f64)]) -> anyhow::Result<T> {
        Ok(items.choose_weighted(&mut self.rng, |(_, w)| *w)?.0)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    fn write_dataset<T: Serialize>(&self, dataset: &str, rows: &[T]) -> anyhow::Result<DatasetFile> {
        let path = self.config.out_dir.join(format!("{dataset}.csv"));
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        log::info!("{} rows written to {}", rows.len(), path.display());
        Ok(DatasetFile {
            dataset: dataset.to_string(),
            path: path.to_string_lossy().to_string(),
            rows: rows.len(),
        })
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
