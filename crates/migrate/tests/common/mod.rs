#![allow(dead_code)]

use anyhow::{bail, Result};
use assert_cmd::Command;
use bson::Document;
use medidata_migrate::DocumentSink;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

pub const PATIENTS_CSV: &str = "\
Name,Age,Gender,Blood Type
 Fatou Diop ,25,F,O+
Jean Martin,61,M,A-
Ada Lovelace ,36,F,B+
Omar Sy,45,M,AB+
Lina Haddad,29,F,O-
";

pub const PATIENTS_WITH_IDS_CSV: &str = "\
patient_id,Name,Age,Gender
p-1,Fatou Diop,25,F
,Jean Martin,61,M
";

/// Collection stand-in that keeps documents in memory.
#[derive(Default)]
pub struct MemorySink {
    pub documents: Mutex<Vec<Document>>,
    pub batch_sizes: Mutex<Vec<usize>>,
    pub fail_on_batch: Option<usize>,
}

impl MemorySink {
    pub fn with_documents(count: usize) -> Self {
        let documents = (0..count).map(|i| bson::doc! { "old": i as i64 }).collect();
        Self {
            documents: Mutex::new(documents),
            ..Self::default()
        }
    }

    pub fn failing_on_batch(batch: usize) -> Self {
        Self {
            fail_on_batch: Some(batch),
            ..Self::default()
        }
    }

    pub fn documents(&self) -> Vec<Document> {
        self.documents.lock().unwrap().clone()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batch_sizes.lock().unwrap().clone()
    }
}

impl DocumentSink for MemorySink {
    async fn clear(&self) -> Result<u64> {
        let mut documents = self.documents.lock().unwrap();
        let deleted = documents.len() as u64;
        documents.clear();
        Ok(deleted)
    }

    async fn insert_batch(&self, documents: Vec<Document>) -> Result<usize> {
        let mut batch_sizes = self.batch_sizes.lock().unwrap();
        if self.fail_on_batch == Some(batch_sizes.len() + 1) {
            bail!("connection reset by peer");
        }
        batch_sizes.push(documents.len());

        let inserted = documents.len();
        self.documents.lock().unwrap().extend(documents);
        Ok(inserted)
    }
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    pub fn path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    /// `csv-migrate` run in the test directory with a clean environment.
    pub fn csv_migrate(&self) -> Command {
        let mut cmd = Command::cargo_bin("csv-migrate").expect("Failed to find csv-migrate binary");
        cmd.current_dir(&self.root)
            .env("CSV_SOURCE", self.path("seed/patients.csv"))
            .env("CSV_PATH", self.path("data/patients.csv"));
        for key in ["MONGO_DB", "MONGO_COLLECTION", "MONGO_HOST", "MONGO_PORT"] {
            cmd.env_remove(key);
        }
        cmd
    }
}

pub fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
