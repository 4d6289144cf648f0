//! 同步配置模块

use crate::core::planner::UploadCandidate;
use crate::core::scanner::ScanConfig;
use crate::error::{Result, SyncError};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// 按文件解析的策略值：固定值或由候选条目计算
///
/// 计算型策略在上传时解析，同一候选条目只解析一次（函数每次调用
/// 可能返回不同的值，因此不跨文件缓存结果）。
pub enum Policy<T> {
    /// 固定值，对所有文件相同
    Fixed(T),
    /// 由上传候选计算得出
    Computed(Arc<dyn Fn(&UploadCandidate) -> T + Send + Sync>),
}

impl<T: Clone> Policy<T> {
    /// 构造固定值策略
    pub fn fixed(value: T) -> Self {
        Policy::Fixed(value)
    }

    /// 构造计算型策略
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&UploadCandidate) -> T + Send + Sync + 'static,
    {
        Policy::Computed(Arc::new(f))
    }

    /// 对某个候选条目解析策略值
    pub fn resolve(&self, candidate: &UploadCandidate) -> T {
        match self {
            Policy::Fixed(value) => value.clone(),
            Policy::Computed(f) => f(candidate),
        }
    }
}

impl<T: Clone> Clone for Policy<T> {
    fn clone(&self) -> Self {
        match self {
            Policy::Fixed(value) => Policy::Fixed(value.clone()),
            Policy::Computed(f) => Policy::Computed(f.clone()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Policy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            Policy::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for Policy<String> {
    fn from(value: &str) -> Self {
        Policy::Fixed(value.to_string())
    }
}

impl From<String> for Policy<String> {
    fn from(value: String) -> Self {
        Policy::Fixed(value)
    }
}

impl From<u64> for Policy<u64> {
    fn from(value: u64) -> Self {
        Policy::Fixed(value)
    }
}

/// 同步选项
///
/// `root` 与 `bucket` 为必填项；其余选项均有默认值，可链式覆盖：
///
/// ```no_run
/// use bucketsync::config::SyncOptions;
///
/// let options = SyncOptions::new("./public", "my-bucket")
///     .acl("public-read")
///     .max_age(3600)
///     .delete(true);
/// ```
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// 本地根目录（必填，不存在则在任何 I/O 之前报错）
    pub root: PathBuf,
    /// 目标 bucket 名称（必填）
    pub bucket: String,
    /// 对象 ACL，默认 "private"
    pub acl: Policy<String>,
    /// Cache-Control max-age（秒），默认 86400（一天）
    pub max_age: Policy<u64>,
    /// 即使哈希一致也强制上传
    pub force: bool,
    /// 删除远端存在而本地不存在的对象
    pub delete: bool,
    /// 访问凭证；为空时走 SDK 默认凭证链
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
    /// 区域；为空时走 SDK 默认配置
    pub region: Option<String>,
    /// 自定义 endpoint（MinIO 等 S3 兼容服务）
    pub endpoint: Option<String>,
    /// 本地扫描配置（默认不排除任何文件）
    pub scan: ScanConfig,
}

impl SyncOptions {
    pub fn new(root: impl Into<PathBuf>, bucket: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            bucket: bucket.into(),
            acl: Policy::Fixed("private".to_string()),
            max_age: Policy::Fixed(86400),
            force: false,
            delete: false,
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
            region: None,
            endpoint: None,
            scan: ScanConfig::default(),
        }
    }

    pub fn acl(mut self, acl: impl Into<Policy<String>>) -> Self {
        self.acl = acl.into();
        self
    }

    pub fn max_age(mut self, max_age: impl Into<Policy<u64>>) -> Self {
        self.max_age = max_age.into();
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn delete(mut self, delete: bool) -> Self {
        self.delete = delete;
        self
    }

    pub fn credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    pub fn session_token(mut self, session_token: impl Into<String>) -> Self {
        self.session_token = Some(session_token.into());
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn scan(mut self, scan: ScanConfig) -> Self {
        self.scan = scan;
        self
    }

    /// 校验必填项，在任何远端 I/O 之前快速失败
    pub fn validate(&self) -> Result<()> {
        if self.bucket.trim().is_empty() {
            return Err(SyncError::Config("bucket 不能为空".to_string()));
        }
        if !self.root.is_dir() {
            return Err(SyncError::Config(format!(
                "root 目录不存在: {}",
                self.root.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RemoteMetadata;

    fn candidate(path: &str) -> UploadCandidate {
        UploadCandidate {
            path: path.to_string(),
            full_path: PathBuf::from(path),
            remote: RemoteMetadata::missing(),
            hash: "abc123".to_string(),
        }
    }

    #[test]
    fn test_fixed_policy_resolve() {
        let policy: Policy<u64> = 3600.into();
        assert_eq!(policy.resolve(&candidate("a.txt")), 3600);
        assert_eq!(policy.resolve(&candidate("b.txt")), 3600);
    }

    #[test]
    fn test_computed_policy_resolve() {
        let policy = Policy::computed(|c: &UploadCandidate| c.path.len() as u64);
        assert_eq!(policy.resolve(&candidate("a.txt")), 5);
        assert_eq!(policy.resolve(&candidate("abcd.txt")), 8);
    }

    #[test]
    fn test_validate_rejects_empty_bucket() {
        let options = SyncOptions::new(std::env::temp_dir(), "");
        assert!(matches!(options.validate(), Err(SyncError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_missing_root() {
        let options = SyncOptions::new("/nonexistent/bucketsync-root", "bucket");
        assert!(matches!(options.validate(), Err(SyncError::Config(_))));
    }
}
