use super::{ObjectPage, ObjectStore, RemoteMetadata, UploadHeaders, METADATA_HASH_KEY};
use crate::config::SyncOptions;
use crate::error::{Result, SyncError};
use async_trait::async_trait;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use std::path::Path;
use tracing::debug;

pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
    name: String,
}

impl S3Store {
    /// 根据同步选项创建 S3 客户端
    ///
    /// 未提供凭证时走 SDK 默认凭证链（环境变量、profile、实例角色）。
    pub async fn connect(options: &SyncOptions) -> Result<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(region) = &options.region {
            loader = loader.region(Region::new(region.clone()));
        }

        if let Some(endpoint) = &options.endpoint {
            loader = loader.endpoint_url(endpoint.clone());
        }

        if let (Some(access_key_id), Some(secret_access_key)) =
            (&options.access_key_id, &options.secret_access_key)
        {
            loader = loader.credentials_provider(Credentials::new(
                access_key_id.clone(),
                secret_access_key.clone(),
                options.session_token.clone(),
                None,
                "bucketsync",
            ));
        }

        let config = loader.load().await;
        let client = aws_sdk_s3::Client::new(&config);
        let name = format!("s3://{}", options.bucket);

        debug!("初始化 S3 存储: {}", name);

        Ok(Self {
            client,
            bucket: options.bucket.clone(),
            name,
        })
    }

    fn remote_err<E>(op: &'static str, key: &str, err: E) -> SyncError
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SyncError::remote(op, key, DisplayErrorContext(err))
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn head_object(&self, key: &str) -> Result<RemoteMetadata> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(out) => Ok(RemoteMetadata {
                stored_hash: out
                    .metadata()
                    .and_then(|m| m.get(METADATA_HASH_KEY))
                    .cloned(),
                last_modified: out.last_modified().map(|t| t.secs()),
            }),
            // 404 不是错误，表示远端还没有这个对象
            Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found()) => {
                Ok(RemoteMetadata::missing())
            }
            Err(err) => Err(Self::remote_err("head", key, err)),
        }
    }

    async fn put_object(
        &self,
        key: &str,
        source: &Path,
        headers: &UploadHeaders,
    ) -> Result<String> {
        let body = ByteStream::from_path(source)
            .await
            .map_err(|e| SyncError::LocalIo {
                path: source.display().to_string(),
                source: std::io::Error::other(e),
            })?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .acl(ObjectCannedAcl::from(headers.acl.as_str()))
            .cache_control(headers.cache_control.as_str())
            .content_type(headers.content_type.as_str())
            .metadata(METADATA_HASH_KEY, headers.hash.as_str())
            .send()
            .await
            .map_err(|e| Self::remote_err("put", key, e))?;

        Ok(key.to_string())
    }

    async fn list_page(&self, token: Option<String>) -> Result<ObjectPage> {
        let mut request = self.client.list_objects_v2().bucket(&self.bucket);
        if let Some(token) = token {
            request = request.continuation_token(token);
        }

        let out = request
            .send()
            .await
            .map_err(|e| Self::remote_err("list", &self.bucket, e))?;

        let keys = out
            .contents()
            .iter()
            .filter_map(|object| object.key().map(str::to_string))
            .collect();

        Ok(ObjectPage {
            keys,
            next_token: out.next_continuation_token().map(str::to_string),
        })
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| Self::remote_err("delete", key, e))?;

        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
