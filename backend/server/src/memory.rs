use std::{collections::HashSet, path::Path};

use async_trait::async_trait;
use ordering::{OrderAssignment, Product};
use tokio::{fs::read_to_string, sync::RwLock};

use crate::{
    database::{ProductStore, StoreError},
    utils::sanitize,
};

/// Process-local store for development and tests. Optionally seeded from a
/// JSON array of products.
#[derive(Default)]
pub struct MemoryStore {
    products: RwLock<Vec<Product>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    pub async fn from_seed(path: &Path) -> Result<Self, StoreError> {
        let contents = read_to_string(path).await?;
        let products: Vec<Product> = serde_json::from_str(&contents)?;

        Self::seeded(products)
    }

    /// Seed products get the same category slugs the API uses. Ids must be unique.
    pub fn seeded(mut products: Vec<Product>) -> Result<Self, StoreError> {
        let mut ids = HashSet::new();

        for product in products.iter_mut() {
            if !ids.insert(product.id.clone()) {
                return Err(StoreError::AlreadyExists(product.id.clone()));
            }

            let category_id = sanitize(&product.category_id);
            if category_id.is_empty() {
                return Err(StoreError::InvalidSeed(format!(
                    "product {} has no usable category {:?}",
                    product.id, product.category_id
                )));
            }
            product.category_id = category_id;
        }

        Ok(Self::with_products(products))
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list(&self, category_id: Option<&str>) -> Result<Vec<Product>, StoreError> {
        let products = self.products.read().await;

        Ok(products
            .iter()
            .filter(|p| category_id.is_none_or(|category_id| p.in_category(category_id)))
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Product, StoreError> {
        let products = self.products.read().await;

        products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn insert(&self, product: Product) -> Result<(), StoreError> {
        let mut products = self.products.write().await;

        if products.iter().any(|p| p.id == product.id) {
            return Err(StoreError::AlreadyExists(product.id));
        }

        products.push(product);
        Ok(())
    }

    async fn set_order(&self, id: &str, display_order: Option<i64>) -> Result<Product, StoreError> {
        let mut products = self.products.write().await;

        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        product.display_order = display_order;
        Ok(product.clone())
    }

    async fn apply(&self, category_id: &str, plan: &[OrderAssignment]) -> Result<usize, StoreError> {
        let mut products = self.products.write().await;

        if let Some(missing) = plan.iter().find(|assignment| {
            !products
                .iter()
                .any(|p| p.id == assignment.item_id && p.in_category(category_id))
        }) {
            return Err(StoreError::NotInCategory {
                id: missing.item_id.clone(),
                category_id: category_id.to_string(),
            });
        }

        Ok(ordering::apply_plan(&mut products, plan))
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;

    fn product(id: &str, category: &str, order: Option<i64>) -> Product {
        Product {
            id: id.to_string(),
            category_id: category.to_string(),
            display_order: order,
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_apply_rejects_foreign_products() {
        let store = MemoryStore::with_products(vec![
            product("a", "benches", Some(1)),
            product("b", "planters", Some(1)),
        ]);

        let plan = vec![
            OrderAssignment { item_id: "a".into(), new_order: 2 },
            OrderAssignment { item_id: "b".into(), new_order: 3 },
        ];

        let err = store.apply("benches", &plan).await.unwrap_err();
        assert!(matches!(err, StoreError::NotInCategory { ref id, .. } if id == "b"));

        // nothing written
        assert_eq!(store.get("a").await.unwrap().display_order, Some(1));
    }

    #[tokio::test]
    async fn test_insert_and_filter() {
        let store = MemoryStore::new();
        store.insert(product("a", "benches", None)).await.unwrap();
        store.insert(product("b", "planters", Some(2))).await.unwrap();

        assert!(matches!(
            store.insert(product("a", "benches", None)).await,
            Err(StoreError::AlreadyExists(_))
        ));

        assert_eq!(store.list(None).await.unwrap().len(), 2);
        assert_eq!(store.list(Some("planters")).await.unwrap().len(), 1);
        assert!(store.list(Some("swings")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_seed_uses_category_slugs() {
        let store = MemoryStore::seeded(vec![
            product("a", "Outdoor Benches", Some(2)),
            product("b", "outdoor_benches", Some(2)),
        ])
        .unwrap();

        let benches = store.list(Some("outdoor-benches")).await.unwrap();
        assert_eq!(benches.len(), 2);
        assert_eq!(ordering::count_duplicates(&benches, "outdoor-benches"), 1);

        let plan = ordering::plan_duplicate_repair(&benches, "outdoor-benches");
        assert_eq!(store.apply("outdoor-benches", &plan).await.unwrap(), 1);
    }

    #[test]
    fn test_seed_rejects_bad_products() {
        let duplicate_ids = MemoryStore::seeded(vec![
            product("a", "benches", Some(1)),
            product("a", "planters", Some(1)),
        ]);
        assert!(matches!(duplicate_ids, Err(StoreError::AlreadyExists(ref id)) if id == "a"));

        let no_category = MemoryStore::seeded(vec![product("a", "!!!", None)]);
        assert!(matches!(no_category, Err(StoreError::InvalidSeed(_))));
    }

    #[tokio::test]
    async fn test_set_order_clears() {
        let store = MemoryStore::with_products(vec![product("a", "benches", Some(4))]);

        let updated = store.set_order("a", None).await.unwrap();
        assert_eq!(updated.display_order, None);
        assert!(matches!(
            store.set_order("missing", Some(1)).await,
            Err(StoreError::NotFound(_))
        ));
    }
}
