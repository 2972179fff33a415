use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{
    Client,
    error::DisplayErrorContext,
    operation::create_bucket::CreateBucketError,
    primitives::ByteStream,
    types::{BucketLocationConstraint, CreateBucketConfiguration},
};

use super::{ObjectStore, StorageError};

/// [`ObjectStore`] backed by Amazon S3.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client for `region` from the standard AWS credential chain.
    pub async fn connect(region: &str) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        Self::new(Client::new(&sdk_config))
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn create_bucket(
        &self,
        bucket: &str,
        location_constraint: Option<&str>,
    ) -> Result<(), StorageError> {
        let mut req = self.client.create_bucket().bucket(bucket);

        if let Some(region) = location_constraint {
            let cfg = CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(region))
                .build();
            req = req.create_bucket_configuration(cfg);
        }

        match req.send().await {
            Ok(_) => Ok(()),
            Err(err) => Err(match err.into_service_error() {
                CreateBucketError::BucketAlreadyExists(_) => {
                    StorageError::BucketAlreadyExists { bucket: bucket.to_string() }
                }
                CreateBucketError::BucketAlreadyOwnedByYou(_) => {
                    StorageError::BucketAlreadyOwnedByYou { bucket: bucket.to_string() }
                }
                other => StorageError::Service {
                    operation: "CreateBucket",
                    message: DisplayErrorContext(&other).to_string(),
                },
            }),
        }
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map(|_| ())
            .map_err(|err| StorageError::Service {
                operation: "PutObject",
                message: DisplayErrorContext(&err).to_string(),
            })
    }
}
