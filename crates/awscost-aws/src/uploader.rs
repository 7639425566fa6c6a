//! Report upload to S3
//!
//! Every local report file is stored under `<prefix>/<file name>` in the
//! configured bucket, so the bucket layout mirrors the output directory.

use crate::sdk::DEFAULT_REGION;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use awscost_core::error::{CostError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Object key for `file_name` under `prefix`
///
/// Trailing slashes on the prefix are dropped; an empty prefix puts the file
/// at the bucket root.
///
/// # Examples
/// ```
/// use awscost_aws::object_key;
///
/// assert_eq!(object_key("aws-costs/", "a.json"), "aws-costs/a.json");
/// assert_eq!(object_key("", "a.json"), "a.json");
/// ```
pub fn object_key(prefix: &str, file_name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        file_name.to_string()
    } else {
        format!("{prefix}/{file_name}")
    }
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => "application/json",
        Some("csv") => "text/csv",
        _ => "application/octet-stream",
    }
}

/// Destination for report files
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store the file at `path` as `bucket/key`
    async fn put_file(&self, bucket: &str, key: &str, path: &Path) -> Result<()>;
}

/// [`ObjectStore`] backed by Amazon S3
pub struct S3Store {
    client: Client,
}

impl S3Store {
    /// Create an S3 client from shared SDK configuration
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self::from_conf(client_config(sdk_config).build())
    }

    /// Create a store from a fully built client configuration
    pub fn from_conf(config: aws_sdk_s3::Config) -> Self {
        Self {
            client: Client::from_conf(config),
        }
    }
}

/// Client configuration for `sdk_config`
///
/// Falls back to [`DEFAULT_REGION`] when the provider chain found no region,
/// since S3 refuses to sign requests without one.
pub fn client_config(sdk_config: &SdkConfig) -> aws_sdk_s3::config::Builder {
    let builder = aws_sdk_s3::config::Builder::from(sdk_config);
    if sdk_config.region().is_some() {
        builder
    } else {
        debug!("No AWS region configured, using {} for S3", DEFAULT_REGION);
        builder.region(Region::new(DEFAULT_REGION))
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_file(&self, bucket: &str, key: &str, path: &Path) -> Result<()> {
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| CostError::Upload {
                key: key.to_string(),
                message: format!("cannot read {}: {e}", path.display()),
            })?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type(path))
            .body(body)
            .send()
            .await
            .map_err(|e| CostError::Upload {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(())
    }
}

/// Uploads report files to one bucket and prefix
pub struct Uploader<'a, S: ObjectStore> {
    store: &'a S,
    bucket: &'a str,
    prefix: &'a str,
}

impl<'a, S: ObjectStore> Uploader<'a, S> {
    /// Create an uploader writing to `bucket` under `prefix`
    pub fn new(store: &'a S, bucket: &'a str, prefix: &'a str) -> Self {
        Self {
            store,
            bucket,
            prefix,
        }
    }

    /// Upload each file in order, returning the object keys written
    ///
    /// Stops at the first failure. Files uploaded before it stay in the
    /// bucket.
    pub async fn upload_all(&self, files: &[PathBuf]) -> Result<Vec<String>> {
        let mut keys = Vec::with_capacity(files.len());

        for path in files {
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| CostError::Upload {
                    key: path.display().to_string(),
                    message: "path has no usable file name".to_string(),
                })?;
            let key = object_key(self.prefix, file_name);

            debug!("Uploading {} to s3://{}/{}", path.display(), self.bucket, key);
            self.store.put_file(self.bucket, &key, path).await?;
            keys.push(key);
        }

        info!("Uploaded {} file(s) to s3://{}", keys.len(), self.bucket);
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_config::BehaviorVersion;
    use aws_sdk_s3::config::Credentials;
    use aws_smithy_runtime::client::http::test_util::capture_request;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        puts: Mutex<Vec<(String, String, PathBuf)>>,
        fail_on: Option<String>,
    }

    #[async_trait]
    impl ObjectStore for RecordingStore {
        async fn put_file(&self, bucket: &str, key: &str, path: &Path) -> Result<()> {
            if self.fail_on.as_deref() == Some(key) {
                return Err(CostError::Upload {
                    key: key.to_string(),
                    message: "AccessDenied".to_string(),
                });
            }
            self.puts
                .lock()
                .unwrap()
                .push((bucket.to_string(), key.to_string(), path.to_path_buf()));
            Ok(())
        }
    }

    #[test]
    fn test_object_key() {
        assert_eq!(
            object_key("aws-costs/", "aws_costs_2024-01-01.json"),
            "aws-costs/aws_costs_2024-01-01.json"
        );
        assert_eq!(object_key("reports", "x.csv"), "reports/x.csv");
        assert_eq!(object_key("a/b//", "x.csv"), "a/b/x.csv");
        assert_eq!(object_key("/", "x.csv"), "x.csv");
        assert_eq!(object_key("", "x.csv"), "x.csv");
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type(Path::new("out/a.json")), "application/json");
        assert_eq!(content_type(Path::new("out/a.csv")), "text/csv");
        assert_eq!(content_type(Path::new("out/a")), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_upload_all_mirrors_file_names() {
        let store = RecordingStore::default();
        let uploader = Uploader::new(&store, "billing", "aws-costs/");
        let files = vec![
            PathBuf::from("output/aws_costs_2024-01-01.json"),
            PathBuf::from("output/aws_costs_2024-01-01.csv"),
        ];

        let keys = uploader.upload_all(&files).await.unwrap();
        assert_eq!(
            keys,
            vec![
                "aws-costs/aws_costs_2024-01-01.json",
                "aws-costs/aws_costs_2024-01-01.csv"
            ]
        );

        let puts = store.puts.lock().unwrap();
        assert_eq!(puts.len(), 2);
        assert_eq!(puts[0].0, "billing");
        assert_eq!(puts[1].2, files[1]);
    }

    #[tokio::test]
    async fn test_upload_failure_stops() {
        let store = RecordingStore {
            fail_on: Some("p/a.json".to_string()),
            ..Default::default()
        };
        let uploader = Uploader::new(&store, "billing", "p");
        let files = vec![PathBuf::from("out/a.json"), PathBuf::from("out/a.csv")];

        let err = uploader.upload_all(&files).await.unwrap_err();
        assert!(err.is_remote());
        assert!(store.puts.lock().unwrap().is_empty());
    }

    fn region_less_config() -> SdkConfig {
        SdkConfig::builder()
            .behavior_version(BehaviorVersion::latest())
            .build()
    }

    #[test]
    fn test_missing_region_falls_back() {
        let sdk_config = region_less_config();
        assert!(sdk_config.region().is_none());

        let config = client_config(&sdk_config).build();
        assert_eq!(config.region().map(|r| r.as_ref()), Some(DEFAULT_REGION));
    }

    #[test]
    fn test_configured_region_is_kept() {
        let sdk_config = SdkConfig::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("eu-central-1"))
            .build();

        let config = client_config(&sdk_config).build();
        assert_eq!(config.region().map(|r| r.as_ref()), Some("eu-central-1"));
    }

    #[tokio::test]
    async fn test_put_file_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aws_costs_2024-01-01.json");
        std::fs::write(&path, "[]").unwrap();

        let (http_client, requests) = capture_request(None);
        let config = client_config(&region_less_config())
            .credentials_provider(Credentials::new("AKIDTEST", "secret", None, None, "test"))
            .http_client(http_client)
            .build();
        let store = S3Store::from_conf(config);

        // The canned reply is empty; only the outgoing request is checked
        let _ = store
            .put_file("billing-reports", "aws-costs/aws_costs_2024-01-01.json", &path)
            .await;

        let request = requests.expect_request();
        assert_eq!(request.method(), "PUT");
        assert!(request.uri().starts_with("https://billing-reports.s3."));
        assert!(
            request
                .uri()
                .contains("amazonaws.com/aws-costs/aws_costs_2024-01-01.json")
        );
        assert_eq!(
            request.headers().get("content-type"),
            Some("application/json")
        );
        assert!(
            request
                .headers()
                .get("authorization")
                .unwrap()
                .contains("/us-east-1/s3/aws4_request")
        );
    }
}
