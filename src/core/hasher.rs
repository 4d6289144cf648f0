//! 内容哈希计算（BLAKE3）

use crate::error::{Result, SyncError};
use std::fs::File;
use std::path::Path;
use tokio::task;

/// 哈希十六进制长度。只取前 16 字节（32 个十六进制字符），足够检测变化
const HASH_HEX_LEN: usize = 32;

/// 计算字节内容的哈希
pub fn hash_bytes(data: &[u8]) -> String {
    let hash = blake3::hash(data);
    hash.to_hex()[..HASH_HEX_LEN].to_string()
}

/// 流式计算文件内容的哈希，不把整个文件读入内存
pub async fn hash_file(path: &Path) -> Result<String> {
    let file_path = path.to_path_buf();
    let display = path.display().to_string();

    let digest = task::spawn_blocking(move || -> std::io::Result<String> {
        let file = File::open(&file_path)?;
        let mut hasher = blake3::Hasher::new();
        hasher.update_reader(file)?;
        Ok(hasher.finalize().to_hex()[..HASH_HEX_LEN].to_string())
    })
    .await
    .map_err(|e| SyncError::LocalIo {
        path: display.clone(),
        source: std::io::Error::other(e),
    })?
    .map_err(|e| SyncError::LocalIo {
        path: display,
        source: e,
    })?;

    Ok(digest)
}
