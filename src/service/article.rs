//! Pass-through article service.

use futures_util::future::BoxFuture;
use std::sync::Arc;

use crate::model::{Article, ArticleDraft};
use crate::service::ArticleService;
use crate::store::{ArticleStore, StoreResult};

/// Forwards each use case to the store unchanged.
#[derive(Clone)]
pub struct Articles {
    store: Arc<dyn ArticleStore>,
}

impl Articles {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self { store }
    }
}

impl ArticleService for Articles {
    fn create(&self, draft: ArticleDraft) -> BoxFuture<'_, StoreResult<Article>> {
        self.store.create(draft)
    }

    fn get_all(&self) -> BoxFuture<'_, StoreResult<Vec<Article>>> {
        self.store.get_all()
    }

    fn get_one<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<Article>> {
        self.store.get_one(id)
    }

    fn update<'a>(
        &'a self,
        id: &'a str,
        draft: ArticleDraft,
    ) -> BoxFuture<'a, StoreResult<Article>> {
        self.store.update(id, draft)
    }

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<()>> {
        self.store.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryArticleStore, StoreError};

    #[tokio::test]
    async fn forwards_to_store() {
        let store = InMemoryArticleStore::new();
        let service = Articles::new(Arc::new(store.clone()));

        let created = service
            .create(ArticleDraft::new("T", "X", "A"))
            .await
            .unwrap();
        assert_eq!(store.get_all().await.unwrap().len(), 1);
        assert_eq!(service.get_one(&created.id).await.unwrap(), created);
        assert_eq!(service.get_all().await.unwrap(), vec![created.clone()]);

        let updated = service
            .update(&created.id, ArticleDraft::new("T2", "X", "A"))
            .await
            .unwrap();
        assert_eq!(updated.title, "T2");

        service.delete(&created.id).await.unwrap();
        assert!(matches!(
            service.get_one(&created.id).await,
            Err(StoreError::NotFound)
        ));
    }
}
