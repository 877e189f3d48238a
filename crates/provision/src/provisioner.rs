use anyhow::{Context, Result};
use medidata_db::database::ADMIN_DATABASE;

use crate::admin::UserAdmin;
use crate::config::ProvisionConfig;
use crate::models::user::{CreateUserRequest, RoleGrant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionStep {
    pub database: String,
    pub request: CreateUserRequest,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    /// Usernames in creation order.
    pub created: Vec<String>,
}

/// The fixed creation sequence: application user and read-only user on the
/// business database, then the backup user on `admin`.
pub fn plan(config: &ProvisionConfig) -> Vec<ProvisionStep> {
    let db = config.db_name.as_str();

    vec![
        ProvisionStep {
            database: db.to_string(),
            request: CreateUserRequest {
                username: config.app.username.clone(),
                password: config.app.password.clone(),
                roles: vec![RoleGrant::new("readWrite", db)],
            },
        },
        ProvisionStep {
            database: db.to_string(),
            request: CreateUserRequest {
                username: config.read.username.clone(),
                password: config.read.password.clone(),
                roles: vec![RoleGrant::new("read", db)],
            },
        },
        ProvisionStep {
            database: ADMIN_DATABASE.to_string(),
            request: CreateUserRequest {
                username: config.backup.username.clone(),
                password: config.backup.password.clone(),
                roles: vec![
                    RoleGrant::new("backup", ADMIN_DATABASE),
                    RoleGrant::new("restore", ADMIN_DATABASE),
                ],
            },
        },
    ]
}

/// Runs the plan one call at a time. The first failure stops the run; users
/// created before it are left in place.
pub async fn provision<A: UserAdmin>(
    admin: &A,
    config: &ProvisionConfig,
) -> Result<ProvisionReport> {
    let mut report = ProvisionReport::default();
    let mut selected: Option<(String, A::Context)> = None;

    for step in plan(config) {
        let active = match selected.take() {
            Some((name, context)) if name == step.database => (name, context),
            _ => {
                log::info!("Using database '{}'", step.database);
                let context = admin.select_database(&step.database);
                (step.database.clone(), context)
            }
        };
        let (_, context) = selected.insert(active);

        let request = &step.request;
        admin.create_user(context, request).await.with_context(|| {
            format!(
                "Failed to create user '{}' on database '{}'",
                request.username, step.database
            )
        })?;

        log::info!(
            "Created user '{}' on '{}' [{}]",
            request.username,
            step.database,
            request.role_summary()
        );
        report.created.push(request.username.clone());
    }

    Ok(report)
}
