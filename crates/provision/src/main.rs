use anyhow::Result;
use clap::Parser;
use medidata_db::{connect, MongoSettings};
use medidata_provision::{plan, provision, MongoAdmin, ProvisionConfig};

const APP_NAME: &str = "mongo-init";

#[derive(Parser)]
#[command(name = "mongo-init")]
#[command(about = "Create the application, read-only and backup MongoDB users")]
#[command(version)]
struct Cli {
    /// Print the users that would be created without connecting
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ProvisionConfig::from_env();
    let settings = MongoSettings::from_env()?;

    for username in config.default_password_users() {
        log::warn!("User '{}' is using its default password", username);
    }

    if cli.dry_run {
        print_plan(&config, &settings);
        return Ok(());
    }

    let client = connect(&settings, APP_NAME).await?;
    let admin = MongoAdmin::new(client);
    let report = provision(&admin, &config).await?;

    println!("✅ Provisioning complete: {} users created", report.created.len());

    Ok(())
}

fn print_plan(config: &ProvisionConfig, settings: &MongoSettings) {
    println!("Dry run: no users will be created");
    println!("   Server: {}\n", settings.redacted_uri());

    for (index, step) in plan(config).iter().enumerate() {
        println!(
            "{}. [{}] {} (password ********) roles: {}",
            index + 1,
            step.database,
            step.request.username,
            step.request.role_summary()
        );
    }
}
