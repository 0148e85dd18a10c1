//! S3-backed object store.

use aws_sdk_s3::Client;
use aws_sdk_s3::operation::get_object::GetObjectError;
use failswitch_core::store::{FetchFuture, ObjectStore};
use failswitch_core::{BoxError, ConfigLocation};
use tracing::debug;

/// Reads objects with `GetObject`. A missing key is `Ok(None)`.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

impl ObjectStore for S3ObjectStore {
    fn fetch<'a>(&'a self, location: &'a ConfigLocation) -> FetchFuture<'a> {
        Box::pin(async move {
            let output = match self
                .client
                .get_object()
                .bucket(&location.bucket)
                .key(&location.key)
                .send()
                .await
            {
                Ok(output) => output,
                Err(err) if err.as_service_error().is_some_and(is_missing) => {
                    debug!(bucket = %location.bucket, key = %location.key, "object not found");
                    return Ok(None);
                }
                Err(err) => return Err(BoxError::from(err)),
            };

            let bytes = output.body.collect().await?.into_bytes();
            debug!(
                bucket = %location.bucket,
                key = %location.key,
                len = bytes.len(),
                "fetched object from s3"
            );
            Ok::<_, BoxError>(Some(bytes.to_vec()))
        })
    }
}

fn is_missing(err: &GetObjectError) -> bool {
    err.is_no_such_key()
}
