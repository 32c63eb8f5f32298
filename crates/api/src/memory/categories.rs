use northwind_core::{
    CategoryId, CategoryService, Page, ProductCategory, ReservedHeaderCodec, ServiceResult,
    allocator,
};

use super::{MemoryStore, WithBlob, row_count};

impl CategoryService for MemoryStore {
    async fn list_categories(&self, page: Page) -> ServiceResult<Vec<ProductCategory>> {
        let tables = self.tables.read().await;
        Ok(page
            .apply(tables.categories.values())
            .map(|entry| entry.record.clone())
            .collect())
    }

    async fn get_category(&self, id: CategoryId) -> ServiceResult<Option<ProductCategory>> {
        let tables = self.tables.read().await;
        Ok(tables.categories.get(&id).map(|entry| entry.record.clone()))
    }

    async fn create_category(
        &self,
        mut category: ProductCategory,
    ) -> ServiceResult<Option<CategoryId>> {
        let mut tables = self.tables.write().await;
        let Some(id) = allocator::allocate(&tables.categories) else {
            tracing::warn!("category id range exhausted");
            return Ok(None);
        };
        category.id = id;
        tables.categories.insert(id, WithBlob::new(category));
        Ok(Some(id))
    }

    async fn update_category(
        &self,
        id: CategoryId,
        category: ProductCategory,
    ) -> ServiceResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(stored) = tables.categories.get_mut(&id) else {
            return Ok(false);
        };
        stored.record.overwrite_with(category);
        Ok(true)
    }

    async fn delete_category(&self, id: CategoryId) -> ServiceResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.categories.remove(&id).is_some())
    }

    async fn count_categories(&self) -> ServiceResult<u64> {
        let tables = self.tables.read().await;
        Ok(row_count(&tables.categories))
    }

    async fn lookup_categories_by_name(
        &self,
        names: &[String],
    ) -> ServiceResult<Vec<ProductCategory>> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .values()
            .filter(|entry| entry.record.matches_any_name(names))
            .map(|entry| entry.record.clone())
            .collect())
    }

    async fn get_category_picture(&self, id: CategoryId) -> ServiceResult<Option<Vec<u8>>> {
        let tables = self.tables.read().await;
        let Some(entry) = tables.categories.get(&id) else {
            return Ok(None);
        };
        let picture = ReservedHeaderCodec::decode(entry.blob.as_deref())?;
        Ok(Some(picture.to_vec()))
    }

    async fn update_category_picture(
        &self,
        id: CategoryId,
        picture: Vec<u8>,
    ) -> ServiceResult<bool> {
        let encoded = self.codec.encode(&picture)?;
        let mut tables = self.tables.write().await;
        let Some(entry) = tables.categories.get_mut(&id) else {
            return Ok(false);
        };
        entry.blob = Some(encoded);
        Ok(true)
    }

    async fn delete_category_picture(&self, id: CategoryId) -> ServiceResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(entry) = tables.categories.get_mut(&id) else {
            return Ok(false);
        };
        entry.blob = None;
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use northwind_core::{RESERVED_HEADER_LEN, ServiceError};

    use super::*;

    fn category(name: &str) -> ProductCategory {
        ProductCategory {
            id: CategoryId::default(),
            name: name.to_string(),
            description: None,
        }
    }

    async fn with_beverages(max: usize) -> (MemoryStore, CategoryId) {
        let store = MemoryStore::new(max);
        let id = store
            .create_category(category("Beverages"))
            .await
            .unwrap()
            .unwrap();
        (store, id)
    }

    #[tokio::test]
    async fn test_picture_is_stored_with_reserved_header() {
        let (store, id) = with_beverages(1024).await;
        let payload = vec![0xAB_u8; 100];

        assert!(
            store
                .update_category_picture(id, payload.clone())
                .await
                .unwrap()
        );

        {
            let tables = store.tables.read().await;
            let stored = tables.categories[&id].blob.as_ref().unwrap();
            assert_eq!(stored.len(), 178);
            assert!(stored[..RESERVED_HEADER_LEN].iter().all(|&b| b == 0));
        }

        assert_eq!(
            store.get_category_picture(id).await.unwrap(),
            Some(payload)
        );
    }

    #[tokio::test]
    async fn test_picture_of_missing_category() {
        let (store, _) = with_beverages(1024).await;
        let missing = CategoryId::new(42);

        assert_eq!(store.get_category_picture(missing).await.unwrap(), None);
        assert!(!store.update_category_picture(missing, vec![1]).await.unwrap());
        assert!(!store.delete_category_picture(missing).await.unwrap());
    }

    #[tokio::test]
    async fn test_oversized_picture_is_rejected_and_not_written() {
        let (store, id) = with_beverages(1024).await;

        let result = store.update_category_picture(id, vec![1; 2000]).await;

        assert!(matches!(
            result,
            Err(ServiceError::PayloadTooLarge {
                len: 2000,
                max: 1024
            })
        ));
        assert_eq!(store.get_category_picture(id).await.unwrap(), Some(vec![]));
    }

    #[tokio::test]
    async fn test_truncated_picture_is_corruption() {
        let (store, id) = with_beverages(1024).await;
        store
            .tables
            .write()
            .await
            .categories
            .get_mut(&id)
            .unwrap()
            .blob = Some(vec![1; 40]);

        let result = store.get_category_picture(id).await;
        assert!(matches!(result, Err(ServiceError::DataCorruption(_))));
    }

    #[tokio::test]
    async fn test_delete_picture_clears_it() {
        let (store, id) = with_beverages(1024).await;
        store.update_category_picture(id, vec![5; 10]).await.unwrap();

        assert!(store.delete_category_picture(id).await.unwrap());
        assert_eq!(store.get_category_picture(id).await.unwrap(), Some(vec![]));
        assert!(store.get_category(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_lookup_by_name() {
        let (store, _) = with_beverages(1024).await;
        store.create_category(category("Condiments")).await.unwrap();

        let found = store
            .lookup_categories_by_name(&["beverages".to_string()])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Beverages");
    }
}
