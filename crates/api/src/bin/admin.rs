//! Catalog maintenance tool.
//!
//! ```text
//! biblioteca-admin init          bootstrap the table for APP_ENV
//! biblioteca-admin init --all    bootstrap every environment table
//! biblioteca-admin reset         drop the table for APP_ENV
//! biblioteca-admin summary       row count per environment table
//! ```
//!
//! Reads the same environment variables as the server.

use std::process::ExitCode;

use biblioteca_api::config::ServerConfig;
use biblioteca_api::logging::init_tracing;
use biblioteca_core::environment::Environment;
use biblioteca_core::seed::seed_books;
use biblioteca_db::bootstrap::{bootstrap, reset};
use biblioteca_db::store::{CatalogStore, PgCatalogStore, StoreError};
use biblioteca_db::DbPool;

const USAGE: &str = "usage: biblioteca-admin <init [--all] | reset | summary>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Init { all: bool },
    Reset,
    Summary,
}

#[derive(Debug, thiserror::Error)]
enum AdminError {
    #[error("{0}")]
    Usage(String),

    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,

    #[error("CATALOG_BACKEND=memory has no table to manage")]
    MemoryBackend,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn parse_args<I>(args: I) -> Result<Command, AdminError>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        ["init"] => Ok(Command::Init { all: false }),
        ["init", "--all"] => Ok(Command::Init { all: true }),
        ["reset"] => Ok(Command::Reset),
        ["summary"] => Ok(Command::Summary),
        [] => Err(AdminError::Usage(format!("missing command\n{USAGE}"))),
        other => Err(AdminError::Usage(format!(
            "unrecognised arguments: {}\n{USAGE}",
            other.join(" ")
        ))),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing("biblioteca_admin=info,biblioteca_db=info");

    let result = match parse_args(std::env::args().skip(1)) {
        Ok(command) => run(command, &ServerConfig::from_env()).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Maintenance command failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &ServerConfig) -> Result<(), AdminError> {
    let table = config
        .backend
        .table_name(config.environment)
        .ok_or(AdminError::MemoryBackend)?;

    let database_url = config
        .database_url
        .as_deref()
        .ok_or(AdminError::MissingDatabaseUrl)?;
    let pool = biblioteca_db::create_pool(database_url, config.db_max_connections).await?;
    biblioteca_db::health_check(&pool).await?;

    let outcome = match command {
        Command::Init { all: false } => {
            let store = PgCatalogStore::new(pool.clone(), table)?;
            bootstrap(&store, &seed_books(config.environment))
                .await
                .map(|_| ())
        }
        Command::Init { all: true } => init_all(&pool).await,
        Command::Reset => {
            let store = PgCatalogStore::new(pool.clone(), table)?;
            reset(&store).await
        }
        Command::Summary => summary(&pool).await,
    };

    pool.close().await;
    outcome.map_err(AdminError::from)
}

/// Bootstrap every environment table, then report row counts.
async fn init_all(pool: &DbPool) -> Result<(), StoreError> {
    for environment in Environment::ALL {
        let store = PgCatalogStore::new(pool.clone(), environment.table_name())?;
        bootstrap(&store, &seed_books(environment)).await?;
    }
    summary(pool).await
}

/// Log the row count of each environment table.
async fn summary(pool: &DbPool) -> Result<(), StoreError> {
    for environment in Environment::ALL {
        let store = PgCatalogStore::new(pool.clone(), environment.table_name())?;
        if store.table_exists().await? {
            let count = store.count().await?;
            tracing::info!(
                environment = environment.key(),
                table = store.table(),
                count,
                "Catalog table"
            );
        } else {
            tracing::info!(
                environment = environment.key(),
                table = store.table(),
                "Catalog table missing"
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_known_commands() {
        assert_eq!(parse_args(args(&["init"])).unwrap(), Command::Init { all: false });
        assert_eq!(
            parse_args(args(&["init", "--all"])).unwrap(),
            Command::Init { all: true }
        );
        assert_eq!(parse_args(args(&["reset"])).unwrap(), Command::Reset);
        assert_eq!(parse_args(args(&["summary"])).unwrap(), Command::Summary);
    }

    #[test]
    fn rejects_missing_or_unknown_commands() {
        assert_matches!(parse_args(args(&[])), Err(AdminError::Usage(_)));
        assert_matches!(parse_args(args(&["migrate"])), Err(AdminError::Usage(_)));
        assert_matches!(parse_args(args(&["reset", "--all"])), Err(AdminError::Usage(_)));
    }
}
