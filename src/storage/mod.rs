pub mod memory;
pub mod s3;

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub use memory::MemoryStore;
pub use s3::S3Store;

/// 对象元数据中内容哈希的 key
pub const METADATA_HASH_KEY: &str = "hash";

/// 远端对象元数据
///
/// 两个字段都为 `None` 表示远端不存在该对象。每个本地文件都重新查询，
/// 不跨文件缓存。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteMetadata {
    /// 上次上传时记录的内容哈希
    pub stored_hash: Option<String>,
    /// 最后修改时间（Unix 时间戳）
    pub last_modified: Option<i64>,
}

impl RemoteMetadata {
    /// 「远端不存在该对象」
    pub fn missing() -> Self {
        Self::default()
    }
}

/// 一页对象列表
#[derive(Debug, Clone, Default)]
pub struct ObjectPage {
    /// 本页的对象 key，按存储返回的顺序
    pub keys: Vec<String>,
    /// 继续翻页的游标；`None` 表示没有更多页
    pub next_token: Option<String>,
}

/// 上传请求头
#[derive(Debug, Clone)]
pub struct UploadHeaders {
    pub content_type: String,
    /// 完整的 Cache-Control 指令，如 "max-age=86400"
    pub cache_control: String,
    /// 对象 ACL，如 "private"、"public-read"
    pub acl: String,
    /// 写入对象元数据的内容哈希，供后续同步做无变化判定
    pub hash: String,
}

/// 对象存储抽象接口
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// 查询对象元数据
    ///
    /// 对象不存在不是错误，返回 [`RemoteMetadata::missing`]；
    /// 其他失败向上传播。
    async fn head_object(&self, key: &str) -> Result<RemoteMetadata>;

    /// 上传对象，内容从本地文件流式读取，返回远端回显的 key
    async fn put_object(&self, key: &str, source: &Path, headers: &UploadHeaders)
        -> Result<String>;

    /// 拉取一页对象列表
    ///
    /// `token` 为 `None` 时从头开始；返回的 `next_token` 为 `None`
    /// 表示列表已经取完。
    async fn list_page(&self, token: Option<String>) -> Result<ObjectPage>;

    /// 删除对象
    async fn delete_object(&self, key: &str) -> Result<()>;

    /// 存储名称（用于日志）
    fn name(&self) -> &str;
}
