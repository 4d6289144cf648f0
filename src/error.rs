//! 错误类型定义

use thiserror::Error;

/// 同步过程中的错误
///
/// 任何错误都会立即终止当前阶段并返回给 `sync()` 的调用方，核心不做重试。
#[derive(Error, Debug)]
pub enum SyncError {
    /// 配置错误（缺少必需选项等），在任何 I/O 之前抛出
    #[error("配置错误: {0}")]
    Config(String),

    /// 远端存储操作失败（head/put/list/delete 中除「对象不存在」以外的错误）
    #[error("远端 {op} 操作失败 [{key}]: {message}")]
    Remote {
        op: &'static str,
        key: String,
        message: String,
    },

    /// 本地 IO 错误（哈希计算、读取文件内容等）
    #[error("本地 IO 错误 [{path}]: {source}")]
    LocalIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 本地文件存在性检查失败（不能当作「文件不存在」处理）
    #[error("本地文件检查失败 [{path}]: {source}")]
    FsCheck {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    /// 构造远端操作错误
    pub fn remote(op: &'static str, key: impl Into<String>, message: impl ToString) -> Self {
        SyncError::Remote {
            op,
            key: key.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
