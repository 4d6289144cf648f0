use super::{ObjectPage, ObjectStore, RemoteMetadata, UploadHeaders};
use crate::error::{Result, SyncError};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::path::Path;
use tokio::sync::RwLock;

/// 内存存储中的对象
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: String,
    pub cache_control: String,
    pub acl: String,
    pub hash: Option<String>,
    pub last_modified: i64,
}

/// 内存对象存储
///
/// 带真实分页语义（翻页游标为上一页最后一个 key），供集成测试
/// 和离线演练使用。
pub struct MemoryStore {
    objects: RwLock<BTreeMap<String, StoredObject>>,
    page_size: usize,
    name: String,
}

impl MemoryStore {
    pub fn new() -> Self {
        // 与 S3 ListObjectsV2 的默认单页上限一致
        Self::with_page_size(1000)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            objects: RwLock::new(BTreeMap::new()),
            page_size: page_size.max(1),
            name: "memory".to_string(),
        }
    }

    /// 预置一个对象（测试用）
    pub async fn insert(&self, key: impl Into<String>, data: impl Into<Bytes>, hash: Option<String>) {
        let mut objects = self.objects.write().await;
        objects.insert(
            key.into(),
            StoredObject {
                data: data.into(),
                content_type: "application/octet-stream".to_string(),
                cache_control: String::new(),
                acl: "private".to_string(),
                hash,
                last_modified: chrono::Utc::now().timestamp(),
            },
        );
    }

    /// 读取一个对象（测试用）
    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    /// 当前所有 key，按字典序
    pub async fn keys(&self) -> Vec<String> {
        self.objects.read().await.keys().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn head_object(&self, key: &str) -> Result<RemoteMetadata> {
        let objects = self.objects.read().await;
        Ok(match objects.get(key) {
            Some(object) => RemoteMetadata {
                stored_hash: object.hash.clone(),
                last_modified: Some(object.last_modified),
            },
            None => RemoteMetadata::missing(),
        })
    }

    async fn put_object(
        &self,
        key: &str,
        source: &Path,
        headers: &UploadHeaders,
    ) -> Result<String> {
        let data = tokio::fs::read(source)
            .await
            .map_err(|e| SyncError::LocalIo {
                path: source.display().to_string(),
                source: e,
            })?;

        let mut objects = self.objects.write().await;
        objects.insert(
            key.to_string(),
            StoredObject {
                data: data.into(),
                content_type: headers.content_type.clone(),
                cache_control: headers.cache_control.clone(),
                acl: headers.acl.clone(),
                hash: Some(headers.hash.clone()),
                last_modified: chrono::Utc::now().timestamp(),
            },
        );

        Ok(key.to_string())
    }

    async fn list_page(&self, token: Option<String>) -> Result<ObjectPage> {
        let objects = self.objects.read().await;

        let keys: Vec<String> = match &token {
            Some(token) => objects
                .range::<str, _>((Bound::Excluded(token.as_str()), Bound::Unbounded))
                .take(self.page_size)
                .map(|(k, _)| k.clone())
                .collect(),
            None => objects.keys().take(self.page_size).cloned().collect(),
        };

        let next_token = match keys.last() {
            Some(last) => {
                let has_more = objects
                    .range::<str, _>((Bound::Excluded(last.as_str()), Bound::Unbounded))
                    .next()
                    .is_some();
                has_more.then(|| last.clone())
            }
            None => None,
        };

        Ok(ObjectPage { keys, next_token })
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        // 与 S3 一致：删除不存在的对象不报错
        self.objects.write().await.remove(key);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_head_missing_object() {
        let store = MemoryStore::new();
        let meta = store.head_object("nope").await.unwrap();
        assert_eq!(meta, RemoteMetadata::missing());
    }

    #[tokio::test]
    async fn test_list_pagination() {
        let store = MemoryStore::with_page_size(2);
        for key in ["a", "b", "c", "d", "e"] {
            store.insert(key, "data", None).await;
        }

        let mut all = Vec::new();
        let mut token = None;
        let mut pages = 0;
        loop {
            let page = store.list_page(token.take()).await.unwrap();
            pages += 1;
            all.extend(page.keys);
            match page.next_token {
                Some(t) => token = Some(t),
                None => break,
            }
        }

        assert_eq!(pages, 3);
        assert_eq!(all, vec!["a", "b", "c", "d", "e"]);
    }

    #[tokio::test]
    async fn test_list_exact_page_boundary() {
        let store = MemoryStore::with_page_size(2);
        store.insert("a", "data", None).await;
        store.insert("b", "data", None).await;

        let page = store.list_page(None).await.unwrap();
        assert_eq!(page.keys, vec!["a", "b"]);
        assert!(page.next_token.is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let store = MemoryStore::new();
        assert!(store.delete_object("nope").await.is_ok());
    }
}
