use northwind_core::{CategoryId, Page, Product, ProductId, ProductService, ServiceResult, allocator};

use super::{MemoryStore, row_count};

impl ProductService for MemoryStore {
    async fn list_products(&self, page: Page) -> ServiceResult<Vec<Product>> {
        let tables = self.tables.read().await;
        Ok(page.apply(tables.products.values()).cloned().collect())
    }

    async fn get_product(&self, id: ProductId) -> ServiceResult<Option<Product>> {
        let tables = self.tables.read().await;
        Ok(tables.products.get(&id).cloned())
    }

    async fn create_product(&self, mut product: Product) -> ServiceResult<Option<ProductId>> {
        let mut tables = self.tables.write().await;
        let Some(id) = allocator::allocate(&tables.products) else {
            tracing::warn!("product id range exhausted");
            return Ok(None);
        };
        product.id = id;
        tables.products.insert(id, product);
        Ok(Some(id))
    }

    async fn update_product(&self, id: ProductId, product: Product) -> ServiceResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(stored) = tables.products.get_mut(&id) else {
            return Ok(false);
        };
        stored.overwrite_with(product);
        Ok(true)
    }

    async fn delete_product(&self, id: ProductId) -> ServiceResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.products.remove(&id).is_some())
    }

    async fn count_products(&self) -> ServiceResult<u64> {
        let tables = self.tables.read().await;
        Ok(row_count(&tables.products))
    }

    async fn lookup_products_by_name(&self, names: &[String]) -> ServiceResult<Vec<Product>> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .values()
            .filter(|product| product.matches_any_name(names))
            .cloned()
            .collect())
    }

    async fn list_products_for_category(
        &self,
        category_id: CategoryId,
    ) -> ServiceResult<Vec<Product>> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .values()
            .filter(|product| product.category_id == Some(category_id))
            .cloned()
            .collect())
    }
}
