//! 上传与删除执行器

use crate::config::Policy;
use crate::core::content_type::content_type_for;
use crate::core::planner::UploadCandidate;
use crate::error::Result;
use crate::storage::{ObjectStore, UploadHeaders};
use tracing::info;

/// 上传执行器
pub struct Uploader<'a> {
    store: &'a dyn ObjectStore,
    acl: &'a Policy<String>,
    max_age: &'a Policy<u64>,
}

impl<'a> Uploader<'a> {
    pub fn new(
        store: &'a dyn ObjectStore,
        acl: &'a Policy<String>,
        max_age: &'a Policy<u64>,
    ) -> Self {
        Self {
            store,
            acl,
            max_age,
        }
    }

    /// 执行一次上传，返回远端回显的 key
    ///
    /// ACL 和 max-age 策略在上传时解析，同一候选只解析一次；
    /// 内容哈希写入对象元数据，供后续同步做无变化判定。
    pub async fn upload(&self, candidate: &UploadCandidate) -> Result<String> {
        let headers = UploadHeaders {
            content_type: content_type_for(&candidate.path).to_string(),
            cache_control: format!("max-age={}", self.max_age.resolve(candidate)),
            acl: self.acl.resolve(candidate),
            hash: candidate.hash.clone(),
        };

        let key = self
            .store
            .put_object(&candidate.path, &candidate.full_path, &headers)
            .await?;

        info!("已上传: {}", key);
        Ok(key)
    }
}

/// 删除执行器
pub struct Deleter<'a> {
    store: &'a dyn ObjectStore,
}

impl<'a> Deleter<'a> {
    pub fn new(store: &'a dyn ObjectStore) -> Self {
        Self { store }
    }

    /// 删除一个远端对象，返回被删除的 key
    pub async fn delete(&self, key: &str) -> Result<String> {
        self.store.delete_object(key).await?;
        info!("已删除: {}", key);
        Ok(key.to_string())
    }
}
