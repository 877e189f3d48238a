#![allow(dead_code)]

use anyhow::{bail, Result};
use assert_cmd::Command;
use medidata_provision::{CreateUserRequest, UserAdmin};
use std::collections::HashSet;
use std::sync::Mutex;

/// Every call the fake server received, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCall {
    Select(String),
    CreateUser {
        database: String,
        request: CreateUserRequest,
    },
}

/// In-memory admin interface that behaves like a fresh server: usernames are
/// unique per database and creating one twice fails.
#[derive(Default)]
pub struct FakeServer {
    calls: Mutex<Vec<AdminCall>>,
    users: Mutex<HashSet<(String, String)>>,
    fail_on: Option<String>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(username: &str) -> Self {
        Self {
            fail_on: Some(username.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<AdminCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn create_user_calls(&self) -> Vec<(String, CreateUserRequest)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                AdminCall::CreateUser { database, request } => Some((database, request)),
                AdminCall::Select(_) => None,
            })
            .collect()
    }

    pub fn has_user(&self, database: &str, username: &str) -> bool {
        self.users
            .lock()
            .unwrap()
            .contains(&(database.to_string(), username.to_string()))
    }
}

impl UserAdmin for FakeServer {
    type Context = String;

    fn select_database(&self, name: &str) -> String {
        self.calls
            .lock()
            .unwrap()
            .push(AdminCall::Select(name.to_string()));
        name.to_string()
    }

    async fn create_user(&self, database: &String, request: &CreateUserRequest) -> Result<()> {
        self.calls.lock().unwrap().push(AdminCall::CreateUser {
            database: database.clone(),
            request: request.clone(),
        });

        if self.fail_on.as_deref() == Some(request.username.as_str()) {
            bail!("not authorized on {} to execute command createUser", database);
        }

        let key = (database.clone(), request.username.clone());
        if !self.users.lock().unwrap().insert(key) {
            bail!("User \"{}@{}\" already exists", request.username, database);
        }

        Ok(())
    }
}

pub fn lookup(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |key: &str| {
        vars.iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.to_string())
    }
}

/// `mongo-init` with a clean `MONGO_*` environment.
pub fn mongo_init() -> Command {
    let mut cmd = Command::cargo_bin("mongo-init").expect("Failed to find mongo-init binary");
    for key in [
        "MONGO_APP_DB",
        "MONGO_APPUSER",
        "MONGO_APPUSER_PWD",
        "MONGO_READUSER",
        "MONGO_READUSER_PWD",
        "MONGO_BACKUPUSER",
        "MONGO_BACKUPUSER_PWD",
        "MONGO_HOST",
        "MONGO_PORT",
        "MONGO_USERNAME",
        "MONGO_PASSWORD",
        "MONGO_AUTH_SOURCE",
        "MONGO_TIMEOUT_MS",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

pub fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
