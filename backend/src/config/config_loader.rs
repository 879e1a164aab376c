use anyhow::{Context, Result};
use tourish::domain::value_objects::pagination::DEFAULT_PAGE_SIZE;

use super::config_model::{Auth, BackendServer, BlobStorage, Database, DotEnvyConfig, Listing};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let backend_server = BackendServer {
        port: required("SERVER_PORT_BACKEND")?
            .parse()
            .context("SERVER_PORT_BACKEND is invalid")?,
        body_limit: required("SERVER_BODY_LIMIT")?
            .parse()
            .context("SERVER_BODY_LIMIT is invalid")?,
        timeout: required("SERVER_TIMEOUT")?
            .parse()
            .context("SERVER_TIMEOUT is invalid")?,
    };

    let database = Database {
        url: required("DATABASE_URL")?,
        max_connections: optional("DATABASE_MAX_CONNECTIONS")
            .map(|raw| raw.parse())
            .transpose()
            .context("DATABASE_MAX_CONNECTIONS is invalid")?,
    };

    let blob_storage = BlobStorage {
        endpoint: required("BLOB_S3_ENDPOINT")?,
        region: optional("BLOB_S3_REGION").unwrap_or_else(|| "us-east-1".to_string()),
        access_key_id: required("BLOB_S3_ACCESS_KEY_ID")?,
        secret_access_key: required("BLOB_S3_SECRET_ACCESS_KEY")?,
    };

    let listing = Listing {
        default_page_size: optional("DEFAULT_PAGE_SIZE")
            .map(|raw| raw.parse())
            .transpose()
            .context("DEFAULT_PAGE_SIZE is invalid")?
            .filter(|size: &i64| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE),
    };

    Ok(DotEnvyConfig {
        backend_server,
        database,
        blob_storage,
        auth: Auth {
            jwt_secret: required("JWT_SECRET")?,
        },
        listing,
    })
}

fn required(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("{key} is invalid"))
}

fn optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
