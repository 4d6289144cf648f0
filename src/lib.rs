//! bucketsync —— 本地目录到对象存储的单向同步库
//!
//! 以内容哈希判定是否需要上传：本地文件哈希与远端对象元数据中记录的
//! 哈希一致则跳过，否则上传并把新哈希写入对象元数据；可选地删除
//! 远端存在而本地不存在的对象。
//!
//! ```no_run
//! use bucketsync::SyncOptions;
//!
//! # async fn run() -> bucketsync::Result<()> {
//! let report = bucketsync::sync(
//!     SyncOptions::new("./public", "my-bucket")
//!         .region("us-east-1")
//!         .delete(true),
//! )
//! .await?;
//! println!("上传 {} 个, 删除 {} 个", report.uploaded_files.len(), report.deleted_files.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod storage;

pub use crate::config::{Policy, SyncOptions};
pub use crate::core::{ScanConfig, SyncEngine, SyncReport, UploadCandidate};
pub use crate::error::{Result, SyncError};
pub use crate::storage::{MemoryStore, ObjectStore, S3Store};

/// 一次性同步入口：连接存储并执行一次同步
pub async fn sync(options: SyncOptions) -> Result<SyncReport> {
    let engine = SyncEngine::connect(options).await?;
    engine.sync().await
}
