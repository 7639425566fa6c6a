//! Common test utilities and helpers for awscost tests
//!
//! In-memory stand-ins for Cost Explorer and S3, response builders and an
//! environment guard.

#![allow(dead_code)]

use async_trait::async_trait;
use awscost::{
    aws::{CostPage, CostSource, ObjectStore},
    config::Config,
    date_window::{DateSelection, DateWindow},
    error::{CostError, Result},
    persist::CsvOutput,
    response::{CostAndUsage, Group, ResultByTime, TimePeriod},
    timezone::TimezoneConfig,
};
use once_cell::sync::Lazy;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

// Global mutex to serialize environment variable modifications in tests
pub static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Every variable the CLI reads from the environment
pub const CONFIG_VARS: &[&str] = &[
    "AWS_PROFILE",
    "COST_S3_BUCKET",
    "COST_S3_PREFIX",
    "COST_DATE",
    "COST_START",
    "COST_END",
    "COST_OUTPUT_DIR",
];

/// A result period with the given `(service, amount)` groups, all in USD
pub fn period(start: &str, groups: &[(&str, &str)]) -> ResultByTime {
    ResultByTime {
        time_period: TimePeriod {
            start: start.to_string(),
            end: String::new(),
        },
        groups: groups
            .iter()
            .map(|(service, amount)| Group::unblended(*service, *amount, "USD"))
            .collect(),
    }
}

/// A single page holding `periods`
pub fn page(periods: Vec<ResultByTime>, next_page_token: Option<&str>) -> CostPage {
    CostPage {
        response: CostAndUsage {
            results_by_time: periods,
        },
        next_page_token: next_page_token.map(str::to_string),
    }
}

/// Cost source serving canned pages in order
pub struct FakeCostSource {
    pages: Vec<CostPage>,
    fail_with: Option<String>,
    pub calls: Mutex<Vec<(DateWindow, Option<String>)>>,
}

impl FakeCostSource {
    /// Serve `pages` one after another
    pub fn with_pages(pages: Vec<CostPage>) -> Self {
        Self {
            pages,
            fail_with: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Serve a single page with `periods`
    pub fn single(periods: Vec<ResultByTime>) -> Self {
        Self::with_pages(vec![page(periods, None)])
    }

    /// Fail every request with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            pages: Vec::new(),
            fail_with: Some(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CostSource for FakeCostSource {
    async fn fetch_page(&self, window: &DateWindow, page_token: Option<&str>) -> Result<CostPage> {
        let mut calls = self.calls.lock().unwrap();
        let index = calls.len();
        calls.push((window.clone(), page_token.map(str::to_string)));

        if let Some(message) = &self.fail_with {
            return Err(CostError::CostQuery(message.clone()));
        }
        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| CostError::CostQuery(format!("no page {index}")))
    }
}

/// Object store that keeps uploaded file contents in memory
#[derive(Default)]
pub struct MemoryStore {
    pub objects: Mutex<Vec<(String, String, Vec<u8>)>>,
    pub fail_on_suffix: Option<String>,
}

impl MemoryStore {
    /// Store that rejects keys ending in `suffix`
    pub fn failing_on(suffix: &str) -> Self {
        Self {
            objects: Mutex::new(Vec::new()),
            fail_on_suffix: Some(suffix.to_string()),
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .map(|(_, key, _)| key.clone())
            .collect()
    }

    pub fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .find(|(_, k, _)| k == key)
            .map(|(_, _, body)| body.clone())
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put_file(&self, bucket: &str, key: &str, path: &Path) -> Result<()> {
        if let Some(suffix) = &self.fail_on_suffix {
            if key.ends_with(suffix.as_str()) {
                return Err(CostError::Upload {
                    key: key.to_string(),
                    message: "AccessDenied".to_string(),
                });
            }
        }
        let body = std::fs::read(path)?;
        self.objects
            .lock()
            .unwrap()
            .push((bucket.to_string(), key.to_string(), body));
        Ok(())
    }
}

/// Configuration writing into `output_dir`, reporting `selection`
pub fn test_config(output_dir: &Path, selection: DateSelection, csv: CsvOutput) -> Config {
    Config {
        profile: None,
        bucket: "billing-reports".to_string(),
        prefix: "aws-costs/".to_string(),
        selection,
        output_dir: output_dir.to_path_buf(),
        csv,
        timezone: TimezoneConfig::from_cli(None, true).unwrap(),
    }
}

/// Path of the report file for `label` in `dir`
pub fn report_path(dir: &Path, label: &str, ext: &str) -> PathBuf {
    dir.join(format!("aws_costs_{label}.{ext}"))
}

/// RAII guard for environment variable manipulation in tests
///
/// This guard ensures that environment variables are always restored
/// to their original state, even if a panic occurs during the test.
pub struct EnvVarGuard {
    vars: Vec<(String, Option<String>)>,
}

impl EnvVarGuard {
    /// Create a new environment variable guard
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    /// Guard that starts with every config variable removed
    pub fn clean() -> Self {
        let mut guard = Self::new();
        for var in CONFIG_VARS {
            guard.remove(var);
        }
        guard
    }

    /// Set an environment variable and save its original value for restoration
    pub fn set(&mut self, key: &str, value: &str) {
        let original = env::var(key).ok();
        self.vars.push((key.to_string(), original));
        // Note: env::set_var is unsafe in Rust 1.82+ due to thread-safety concerns
        unsafe {
            env::set_var(key, value);
        }
    }

    /// Remove an environment variable and save its original value for restoration
    pub fn remove(&mut self, key: &str) {
        let original = env::var(key).ok();
        self.vars.push((key.to_string(), original));
        unsafe {
            env::remove_var(key);
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        // Restore all environment variables in reverse order
        for (key, value) in self.vars.iter().rev() {
            unsafe {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }
    }
}

impl Default for EnvVarGuard {
    fn default() -> Self {
        Self::new()
    }
}
