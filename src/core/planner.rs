//! 上传与删除决策
//!
//! 上传决策基于内容哈希比较，删除决策只看本地文件是否存在，
//! 两者规则有意不对称：删除后若本地仍有该文件，下一次上传阶段
//! 会重新创建它。

use crate::core::hasher;
use crate::core::scanner::LocalEntry;
use crate::error::{Result, SyncError};
use crate::storage::{ObjectStore, RemoteMetadata};
use std::path::PathBuf;
use tracing::debug;

/// 上传候选：本地文件 + 远端元数据 + 已计算的内容哈希
#[derive(Debug, Clone)]
pub struct UploadCandidate {
    /// 远端对象 key（相对路径，/ 分隔）
    pub path: String,
    /// 本地绝对路径
    pub full_path: PathBuf,
    /// 远端元数据，两个字段都为 None 表示远端不存在
    pub remote: RemoteMetadata,
    /// 本地内容哈希
    pub hash: String,
}

/// 单个文件的上传决策
#[derive(Debug)]
pub enum UploadDecision {
    Upload(UploadCandidate),
    Skip,
}

/// 上传决策器
pub struct UploadPlanner<'a> {
    store: &'a dyn ObjectStore,
    force: bool,
}

impl<'a> UploadPlanner<'a> {
    pub fn new(store: &'a dyn ObjectStore, force: bool) -> Self {
        Self { store, force }
    }

    /// 对单个本地文件做上传决策
    ///
    /// 每个文件都重新查询远端元数据，不跨文件缓存；文件之间互不比较。
    /// 远端 404 是有效结果（表示没有历史副本），其余 head 错误向上传播。
    pub async fn plan(&self, entry: &LocalEntry) -> Result<UploadDecision> {
        let remote = self.store.head_object(&entry.path).await?;
        let hash = hasher::hash_file(&entry.full_path).await?;

        if self.force || remote.stored_hash.as_deref() != Some(hash.as_str()) {
            Ok(UploadDecision::Upload(UploadCandidate {
                path: entry.path.clone(),
                full_path: entry.full_path.clone(),
                remote,
                hash,
            }))
        } else {
            debug!("哈希一致，跳过: {}", entry.path);
            Ok(UploadDecision::Skip)
        }
    }
}

/// 单个远端 key 的删除决策
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteDecision {
    Delete,
    Keep,
}

/// 删除决策器
pub struct DeletionPlanner {
    root: PathBuf,
}

impl DeletionPlanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// key 统一为 / 分隔，重新拆分后拼接，保证跨平台
    fn local_path(&self, key: &str) -> PathBuf {
        let mut path = self.root.clone();
        for part in key.split('/').filter(|p| !p.is_empty()) {
            path.push(part);
        }
        path
    }

    /// 对单个远端 key 做删除决策
    ///
    /// 只做存在性检查，不比较内容；检查失败是致命错误，
    /// 不能当作「文件不存在」。
    pub async fn plan(&self, key: &str) -> Result<DeleteDecision> {
        let local = self.local_path(key);
        match tokio::fs::try_exists(&local).await {
            Ok(true) => Ok(DeleteDecision::Keep),
            Ok(false) => Ok(DeleteDecision::Delete),
            Err(e) => Err(SyncError::FsCheck {
                path: local.display().to_string(),
                source: e,
            }),
        }
    }
}
