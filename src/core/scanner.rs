//! 本地文件扫描器

use crate::error::{Result, SyncError};
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::{debug, info};
use walkdir::WalkDir;

/// 本地文件条目
///
/// `path` 即远端对象 key：相对根目录，统一使用 `/` 分隔。
#[derive(Debug, Clone)]
pub struct LocalEntry {
    pub path: String,
    pub full_path: PathBuf,
}

/// 扫描配置
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// 排除规则（glob patterns）；默认为空，所有常规文件都参与同步
    pub exclude_patterns: Vec<String>,
}

/// 文件扫描器
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            config: ScanConfig::default(),
        }
    }

    pub fn with_config(config: ScanConfig) -> Self {
        Self { config }
    }

    /// 检查路径是否应该被排除
    fn should_exclude(&self, path: &str) -> bool {
        self.config
            .exclude_patterns
            .iter()
            .any(|pattern| Self::matches_pattern(path, pattern))
    }

    /// 简单的 glob 模式匹配
    fn matches_pattern(path: &str, pattern: &str) -> bool {
        let path = path.to_lowercase();
        let pattern = pattern.to_lowercase();

        // 处理 ** 通配符
        if pattern.contains("**") {
            let parts: Vec<&str> = pattern.split("**").collect();
            if parts.len() == 2 {
                let prefix = parts[0].trim_end_matches('/');
                let suffix = parts[1].trim_start_matches('/');

                if prefix.is_empty() && suffix.is_empty() {
                    return true;
                }
                if !prefix.is_empty() && !path.starts_with(prefix) {
                    return false;
                }
                if !suffix.is_empty() && !path.ends_with(suffix) {
                    return false;
                }
                return true;
            }
        }

        // 处理 * 通配符
        if pattern.contains('*') {
            let regex_pattern = pattern.replace('.', "\\.").replace('*', ".*");
            if let Ok(re) = regex::Regex::new(&format!("^{}$", regex_pattern)) {
                return re.is_match(&path);
            }
        }

        // 精确匹配
        path == pattern || path.ends_with(&format!("/{}", pattern))
    }

    /// 规范化路径分隔符（统一使用 /）
    fn normalize_path(path: &str) -> String {
        path.replace('\\', "/")
    }

    /// 扫描根目录下的所有常规文件，返回按 key 排序的条目列表
    pub async fn scan(&self, root: &Path) -> Result<Vec<LocalEntry>> {
        let base = root.to_path_buf();
        let display = root.display().to_string();

        // 使用 spawn_blocking 避免阻塞 async runtime
        let mut entries: Vec<LocalEntry> = task::spawn_blocking(move || {
            WalkDir::new(&base)
                .follow_links(false)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .filter_map(|entry| {
                    let relative = entry.path().strip_prefix(&base).ok()?.to_str()?;
                    if relative.is_empty() {
                        return None;
                    }
                    Some(LocalEntry {
                        path: Self::normalize_path(relative),
                        full_path: entry.path().to_path_buf(),
                    })
                })
                .collect()
        })
        .await
        .map_err(|e| SyncError::LocalIo {
            path: display,
            source: std::io::Error::other(e),
        })?;

        let before = entries.len();
        entries.retain(|entry| {
            let excluded = self.should_exclude(&entry.path);
            if excluded {
                debug!("排除文件: {}", entry.path);
            }
            !excluded
        });

        // 排序保证每次运行的处理顺序稳定
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        info!(
            "扫描完成: {} 个文件, {} 个被排除",
            entries.len(),
            before - entries.len()
        );

        Ok(entries)
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_file(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    #[tokio::test]
    async fn test_scan_lists_regular_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "b.txt", "b");
        write_file(dir.path(), "a.txt", "a");
        write_file(dir.path(), "nested/c.json", "{}");

        let entries = Scanner::new().scan(dir.path()).await.unwrap();
        let keys: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(keys, vec!["a.txt", "b.txt", "nested/c.json"]);
    }

    #[tokio::test]
    async fn test_scan_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("empty")).unwrap();
        write_file(dir.path(), "a.txt", "a");

        let entries = Scanner::new().scan(dir.path()).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, "a.txt");
    }

    #[tokio::test]
    async fn test_exclude_patterns() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "a.txt", "a");
        write_file(dir.path(), "b.tmp", "b");
        write_file(dir.path(), ".git/config", "x");

        let scanner = Scanner::with_config(ScanConfig {
            exclude_patterns: vec!["*.tmp".to_string(), ".git/**".to_string()],
        });
        let entries = scanner.scan(dir.path()).await.unwrap();
        let keys: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(keys, vec!["a.txt"]);
    }
}
