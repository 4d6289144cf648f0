//! 远端 key 枚举器
//!
//! 逐页拉取远端对象列表，展开为逐个 key 的流。页间顺序跟随存储返回，
//! 不做任何一致性保证（部分存储的列表是最终一致的），只保证一次
//! 完整的「先读后动」遍历。

use crate::error::Result;
use crate::storage::ObjectStore;
use futures::stream::{self, Stream};
use std::collections::VecDeque;
use std::sync::Arc;

struct PageState {
    store: Arc<dyn ObjectStore>,
    token: Option<String>,
    pending: VecDeque<String>,
    finished: bool,
}

/// 远端对象枚举器
pub struct RemoteEnumerator {
    store: Arc<dyn ObjectStore>,
}

impl RemoteEnumerator {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// 将多页列表展开为逐个 key 的流
    ///
    /// 翻页游标由存储返回，游标为空即终止；key 逐个产出，
    /// 不在枚举器内积累整个列表。任何一页出错立即终止整个流。
    pub fn keys(&self) -> impl Stream<Item = Result<String>> {
        let state = PageState {
            store: self.store.clone(),
            token: None,
            pending: VecDeque::new(),
            finished: false,
        };

        stream::try_unfold(state, |mut state| async move {
            loop {
                if let Some(key) = state.pending.pop_front() {
                    return Ok(Some((key, state)));
                }
                if state.finished {
                    return Ok(None);
                }
                let page = state.store.list_page(state.token.take()).await?;
                state.finished = page.next_token.is_none();
                state.token = page.next_token;
                state.pending = page.keys.into();
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use futures::TryStreamExt;

    #[tokio::test]
    async fn test_keys_drains_all_pages() {
        let store = MemoryStore::with_page_size(2);
        for key in ["a", "b", "c", "d", "e"] {
            store.insert(key, "data", None).await;
        }

        let enumerator = RemoteEnumerator::new(Arc::new(store));
        let keys: Vec<String> = enumerator.keys().try_collect().await.unwrap();
        assert_eq!(keys, vec!["a", "b", "c", "d", "e"]);
    }

    #[tokio::test]
    async fn test_keys_empty_store() {
        let enumerator = RemoteEnumerator::new(Arc::new(MemoryStore::new()));
        let keys: Vec<String> = enumerator.keys().try_collect().await.unwrap();
        assert!(keys.is_empty());
    }
}
