//! Create, read, update and delete one row of `demo_users`, then close the pool.

use matchboard::config::Settings;
use matchboard::services::{PostgresClient, PostgresError};
use tracing::{error, info};

async fn run(postgres: &PostgresClient) -> Result<(), PostgresError> {
    info!("Performing CRUD operations...");

    let created = postgres.create_demo_user("Admin User", "admin@example.com").await?;
    info!(id = created.id, name = %created.name, email = %created.email, "CREATE: new user created");

    let found = postgres
        .get_demo_user(created.id)
        .await?
        .ok_or_else(|| PostgresError::NotFound(format!("demo user {}", created.id)))?;
    info!(id = found.id, name = %found.name, "READ: found user");

    let updated = postgres.rename_demo_user(created.id, "Super Admin").await?;
    info!(id = updated.id, name = %updated.name, "UPDATE: user updated");

    if !postgres.delete_demo_user(created.id).await? {
        return Err(PostgresError::NotFound(format!("demo user {}", created.id)));
    }
    info!(id = created.id, "DELETE: user deleted");

    info!("CRUD operations completed successfully");
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    settings.logging.clone().with_env_overrides().init_tracing();

    let postgres = match PostgresClient::from_settings(
        &settings.database.url,
        Some(1),
        Some(1),
        settings.database.acquire_timeout_secs,
        settings.database.idle_timeout_secs,
    )
    .await
    {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to connect to PostgreSQL: {}", e);
            std::process::exit(1);
        }
    };

    let result = run(&postgres).await;

    postgres.close().await;
    info!("Database pool closed");

    if let Err(e) = result {
        error!("Error performing CRUD operations: {}", e);
        std::process::exit(1);
    }
}
