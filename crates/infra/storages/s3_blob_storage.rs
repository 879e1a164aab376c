use std::{str::FromStr, time::Duration};

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, timeout::TimeoutConfig};
use aws_credential_types::Credentials;
use aws_sdk_s3::{
    Client,
    config::{Region, StalledStreamProtectionConfig},
    error::SdkError,
    primitives::ByteStream,
};
use http::Uri;
use tracing::{debug, info};

use crate::domain::repositories::storage::BlobStorage;

#[derive(Debug, Clone)]
pub struct BlobStorageConfig {
    pub endpoint: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    pub force_path_style: bool,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
}

impl BlobStorageConfig {
    pub fn new(endpoint: String, region: String, access_key: String, secret_key: String) -> Self {
        Self {
            endpoint,
            region,
            access_key,
            secret_key,
            force_path_style: true,
            connect_timeout_secs: 10,
            read_timeout_secs: 30,
        }
    }
}

pub async fn build_s3_client(config: &BlobStorageConfig) -> Result<Client> {
    let endpoint = format!("{}/", config.endpoint.trim_end_matches('/'));
    Uri::from_str(&endpoint).context("invalid blob storage endpoint URL")?;

    let credentials = Credentials::new(
        config.access_key.clone(),
        config.secret_key.clone(),
        None,
        None,
        "s3-compatible",
    );

    let region = Region::new(config.region.clone());
    let shared_config = aws_config::defaults(BehaviorVersion::latest())
        .region(region.clone())
        .credentials_provider(credentials)
        .timeout_config(
            TimeoutConfig::builder()
                .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
                .read_timeout(Duration::from_secs(config.read_timeout_secs))
                .build(),
        )
        .load()
        .await;

    let s3_config = aws_sdk_s3::config::Builder::from(&shared_config)
        .endpoint_url(endpoint)
        .force_path_style(config.force_path_style)
        .region(region)
        .stalled_stream_protection(StalledStreamProtectionConfig::disabled())
        .build();

    Ok(Client::from_conf(s3_config))
}

/// S3 answers 404 both for missing keys and missing buckets.
fn is_missing<E>(err: &SdkError<E>) -> bool {
    match err {
        SdkError::ServiceError(service_err) => service_err.raw().status().as_u16() == 404,
        _ => false,
    }
}

/// Blob store backed by an S3-compatible service. Containers map to buckets.
pub struct S3BlobStorage {
    client: Client,
}

impl S3BlobStorage {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn connect(config: &BlobStorageConfig) -> Result<Self> {
        Ok(Self::new(build_s3_client(config).await?))
    }

    /// Creates the bucket backing `container` when it does not exist yet.
    pub async fn ensure_container(&self, container: &str) -> Result<()> {
        match self.client.head_bucket().bucket(container).send().await {
            Ok(_) => Ok(()),
            Err(err) if is_missing(&err) => {
                self.client
                    .create_bucket()
                    .bucket(container)
                    .send()
                    .await
                    .with_context(|| format!("failed to create container {container}"))?;
                info!(container, "blob_storage: container created");
                Ok(())
            }
            Err(err) => Err(anyhow::Error::new(err))
                .with_context(|| format!("failed to check container {container}")),
        }
    }

    async fn exists(&self, container: &str, key: &str) -> Result<bool> {
        match self
            .client
            .head_object()
            .bucket(container)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) if is_missing(&err) => Ok(false),
            Err(err) => Err(anyhow::Error::new(err))
                .with_context(|| format!("failed to look up blob {container}/{key}")),
        }
    }
}

#[async_trait]
impl BlobStorage for S3BlobStorage {
    async fn upload(
        &self,
        container: String,
        text: String,
        content_type: String,
        key: String,
    ) -> Result<()> {
        self.client
            .put_object()
            .bucket(&container)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(text.into_bytes()))
            .send()
            .await
            .with_context(|| format!("failed to upload blob {container}/{key}"))?;

        debug!(%container, %key, "blob_storage: uploaded");
        Ok(())
    }

    async fn fetch(&self, container: String, key: String) -> Result<String> {
        let output = match self
            .client
            .get_object()
            .bucket(&container)
            .key(&key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) if is_missing(&err) => return Ok(String::new()),
            Err(err) => {
                return Err(anyhow::Error::new(err))
                    .with_context(|| format!("failed to fetch blob {container}/{key}"));
            }
        };

        let bytes = output
            .body
            .collect()
            .await
            .with_context(|| format!("failed to read blob {container}/{key}"))?
            .into_bytes();

        String::from_utf8(bytes.to_vec())
            .with_context(|| format!("blob {container}/{key} is not valid UTF-8"))
    }

    async fn rename(&self, container: String, old_key: String, new_key: String) -> Result<bool> {
        if !self.exists(&container, &old_key).await? {
            return Ok(false);
        }

        self.client
            .copy_object()
            .bucket(&container)
            .copy_source(format!("{container}/{old_key}"))
            .key(&new_key)
            .send()
            .await
            .with_context(|| format!("failed to copy blob {container}/{old_key} to {new_key}"))?;

        self.client
            .delete_object()
            .bucket(&container)
            .key(&old_key)
            .send()
            .await
            .with_context(|| format!("failed to remove renamed blob {container}/{old_key}"))?;

        debug!(%container, %old_key, %new_key, "blob_storage: renamed");
        Ok(true)
    }

    async fn delete(&self, container: String, key: String) -> Result<bool> {
        if !self.exists(&container, &key).await? {
            return Ok(false);
        }

        self.client
            .delete_object()
            .bucket(&container)
            .key(&key)
            .send()
            .await
            .with_context(|| format!("failed to delete blob {container}/{key}"))?;

        debug!(%container, %key, "blob_storage: deleted");
        Ok(true)
    }
}
