use std::sync::Arc;

use crate::error::GatewayError;
use crate::gateway::{Action, GatewayClient};
use crate::types::{Product, ProductDraft};

/// Typed façade over the product actions. Stateless; the backend owns the
/// catalog and every mutation is a round trip.
pub struct ProductService {
    gateway: Arc<GatewayClient>,
}

impl ProductService {
    pub fn new(gateway: Arc<GatewayClient>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<Product>, GatewayError> {
        let products: Option<Vec<Product>> = self.gateway.dispatch_data(&Action::GetProducts).await?;
        Ok(products.unwrap_or_default())
    }

    /// Validate the draft locally, then create. Returns the created record
    /// when the backend echoes it back.
    pub async fn create(&self, draft: ProductDraft) -> Result<Option<Product>, GatewayError> {
        let draft = draft.validated()?;
        self.gateway.dispatch_data(&Action::CreateProduct { draft }).await
    }

    pub async fn update(&self, id: i64, draft: ProductDraft) -> Result<(), GatewayError> {
        let draft = draft.validated()?;
        self.gateway.dispatch(&Action::UpdateProduct { id, draft }).await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), GatewayError> {
        self.gateway.dispatch(&Action::DeleteProduct { id }).await?;
        Ok(())
    }

    /// Case-insensitive search over name, domain and description, applied
    /// to the in-memory list the way the Products screen did.
    pub fn search<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
        let term = term.to_lowercase();
        products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&term)
                    || p.domain.to_lowercase().contains(&term)
                    || p.description.to_lowercase().contains(&term)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, domain: &str, description: &str) -> Product {
        Product {
            name: name.into(),
            domain: domain.into(),
            description: description.into(),
            ..Product::default()
        }
    }

    #[test]
    fn search_matches_name_domain_and_description() {
        let products = vec![
            product("TaskMaster Pro", "taskmaster.com", "Project management tool"),
            product("CodeReview AI", "codereview-ai.io", "AI-powered code review assistant"),
        ];

        assert_eq!(ProductService::search(&products, "taskmaster").len(), 1);
        assert_eq!(ProductService::search(&products, "AI.IO").len(), 1);
        assert_eq!(ProductService::search(&products, "review").len(), 1);
        assert_eq!(ProductService::search(&products, "tool").len(), 1);
        assert_eq!(ProductService::search(&products, "").len(), 2);
        assert!(ProductService::search(&products, "nothing").is_empty());
    }
}
