//! 同步引擎

use crate::config::SyncOptions;
use crate::core::enumerator::RemoteEnumerator;
use crate::core::planner::{DeleteDecision, DeletionPlanner, UploadDecision, UploadPlanner};
use crate::core::scanner::Scanner;
use crate::core::transfer::{Deleter, Uploader};
use crate::error::Result;
use crate::storage::{ObjectStore, S3Store};
use futures::TryStreamExt;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// 同步结果报告
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    /// 已上传的 key，按扫描顺序
    pub uploaded_files: Vec<String>,
    /// 已删除的 key，按枚举顺序
    pub deleted_files: Vec<String>,
    pub files_scanned: u32,
    pub files_skipped: u32,
    pub started_at: i64,
    pub finished_at: i64,
}

/// 同步引擎
///
/// 先执行上传阶段；删除阶段（如启用）在上传阶段完全结束后才开始。
/// 任何阶段出现致命错误都立即终止整个同步，已提交的部分结果不再返回。
/// 假定同一 bucket/root 同时只有一个同步在运行。
pub struct SyncEngine {
    options: SyncOptions,
    store: Arc<dyn ObjectStore>,
}

impl SyncEngine {
    /// 连接 S3 并创建引擎
    pub async fn connect(options: SyncOptions) -> Result<Self> {
        options.validate()?;
        let store = S3Store::connect(&options).await?;
        Ok(Self {
            options,
            store: Arc::new(store),
        })
    }

    /// 使用外部注入的存储创建引擎（测试或自定义后端）
    pub fn with_store(options: SyncOptions, store: Arc<dyn ObjectStore>) -> Result<Self> {
        options.validate()?;
        Ok(Self { options, store })
    }

    /// 执行一次同步
    pub async fn sync(&self) -> Result<SyncReport> {
        let started_at = chrono::Utc::now().timestamp();
        info!(
            "开始同步: {} -> {}",
            self.options.root.display(),
            self.store.name()
        );

        let scanner = Scanner::with_config(self.options.scan.clone());
        let entries = scanner.scan(&self.options.root).await?;
        let files_scanned = entries.len() as u32;

        // 上传阶段：逐个文件决策并执行，第一个错误即终止
        let planner = UploadPlanner::new(self.store.as_ref(), self.options.force);
        let uploader = Uploader::new(self.store.as_ref(), &self.options.acl, &self.options.max_age);
        let mut uploaded_files = Vec::new();
        let mut files_skipped = 0u32;

        for entry in &entries {
            match planner.plan(entry).await? {
                UploadDecision::Upload(candidate) => {
                    uploaded_files.push(uploader.upload(&candidate).await?);
                }
                UploadDecision::Skip => files_skipped += 1,
            }
        }
        info!(
            "上传阶段完成: {} 个上传, {} 个跳过",
            uploaded_files.len(),
            files_skipped
        );

        // 删除阶段：先完整枚举远端，枚举全部成功后才开始删除，
        // 绝不对不完整的列表做删除
        let mut deleted_files = Vec::new();
        if self.options.delete {
            let enumerator = RemoteEnumerator::new(self.store.clone());
            let keys: Vec<String> = enumerator.keys().try_collect().await?;
            debug!("远端枚举完成: {} 个对象", keys.len());

            let planner = DeletionPlanner::new(&self.options.root);
            let deleter = Deleter::new(self.store.as_ref());
            for key in keys {
                match planner.plan(&key).await? {
                    DeleteDecision::Delete => {
                        deleted_files.push(deleter.delete(&key).await?);
                    }
                    DeleteDecision::Keep => {
                        debug!("本地存在，保留远端对象: {}", key);
                    }
                }
            }
            info!("删除阶段完成: {} 个删除", deleted_files.len());
        }

        Ok(SyncReport {
            uploaded_files,
            deleted_files,
            files_scanned,
            files_skipped,
            started_at,
            finished_at: chrono::Utc::now().timestamp(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_camel_case() {
        let report = SyncReport {
            uploaded_files: vec!["a.txt".to_string()],
            deleted_files: vec![],
            files_scanned: 1,
            files_skipped: 0,
            started_at: 1,
            finished_at: 2,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["uploadedFiles"][0], "a.txt");
        assert_eq!(json["deletedFiles"].as_array().unwrap().len(), 0);
        assert_eq!(json["filesScanned"], 1);
    }
}
