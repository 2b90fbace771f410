use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_collection, output_empty_collection, output_success};
use crate::cli::{AppContext, OutputFormat};
use crate::services::ProductService;
use crate::types::{Product, ProductDraft};

#[derive(Subcommand)]
pub enum ProductCommands {
    #[command(about = "List products in the catalog")]
    List {
        #[arg(long, help = "Filter by name, domain, or description")]
        search: Option<String>,
    },

    #[command(about = "Add a product")]
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        domain: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        detail: String,
        #[arg(long = "keyword", help = "Target keyword (repeatable)")]
        keywords: Vec<String>,
        #[arg(long)]
        price: Option<f64>,
    },

    #[command(about = "Edit an existing product (unset flags keep their current value)")]
    Update {
        #[arg(help = "Product id")]
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        domain: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        detail: Option<String>,
        #[arg(long = "keyword", help = "Target keyword (repeatable, replaces the list)")]
        keywords: Vec<String>,
        #[arg(long)]
        price: Option<f64>,
    },

    #[command(about = "Delete a product")]
    Delete {
        #[arg(help = "Product id")]
        id: i64,
    },
}

pub async fn handle(cmd: ProductCommands, ctx: &AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    ctx.require_auth()?;
    let service = ProductService::new(ctx.gateway.clone());

    match cmd {
        ProductCommands::List { search } => {
            let products = service.list().await?;
            let visible: Vec<&Product> = match &search {
                Some(term) => ProductService::search(&products, term),
                None => products.iter().collect(),
            };

            if visible.is_empty() {
                return output_empty_collection(&output_format, "products", "No products found");
            }

            output_collection(&output_format, "products", &visible, |p| {
                format!("#{} {} ({}) - ${:.2}", p.id, p.name, p.domain, p.price)
            })
        }

        ProductCommands::Create { name, domain, description, detail, keywords, price } => {
            let draft = ProductDraft {
                name,
                domain,
                description,
                detail,
                target_keywords: keywords,
                price,
            };
            let created = service.create(draft).await?;
            let data = created.map(|p| json!({ "product": p }));
            output_success(&output_format, "Product added successfully", data)
        }

        ProductCommands::Update { id, name, domain, description, detail, keywords, price } => {
            // Prefill from the current record, the way the edit form did
            let products = service.list().await?;
            let existing = products
                .into_iter()
                .find(|p| p.id == id)
                .ok_or_else(|| anyhow::anyhow!("Product {} not found", id))?;

            let draft = ProductDraft {
                name: name.unwrap_or(existing.name),
                domain: domain.unwrap_or(existing.domain),
                description: description.unwrap_or(existing.description),
                detail: detail.unwrap_or(existing.detail),
                target_keywords: if keywords.is_empty() { existing.target_keywords } else { keywords },
                price: price.or(Some(existing.price)),
            };

            service.update(id, draft).await?;
            output_success(&output_format, "Product updated successfully", None)
        }

        ProductCommands::Delete { id } => {
            service.delete(id).await?;
            output_success(&output_format, "Product deleted successfully", None)
        }
    }
}
