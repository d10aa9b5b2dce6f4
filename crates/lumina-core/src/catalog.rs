//! The product catalog.
//!
//! The built-in catalog is fixed at compile time. An alternative catalog can be
//! loaded from a TOML file made of `[[product]]` tables; it is validated once
//! and never mutated afterwards.

use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{LuminaError, Result};
use crate::product::{Category, Product};

static BUILTIN: Lazy<Catalog> = Lazy::new(|| Catalog {
    products: vec![
        Product::new(
            "1",
            "Nordic Lounge Chair",
            899.0,
            Category::LivingRoom,
            "A sculpted oak frame cradling a deep bouclé seat. Scandinavian lines built for long afternoons.",
            "https://picsum.photos/seed/lounge/800/800",
            4.8,
        ),
        Product::new(
            "2",
            "Aria Velvet Sofa",
            2499.0,
            Category::LivingRoom,
            "Three-seat sofa in sage velvet with feather-wrapped cushions and brushed brass legs.",
            "https://picsum.photos/seed/sofa/800/800",
            4.9,
        ),
        Product::new(
            "3",
            "Haven Platform Bed",
            1799.0,
            Category::Bedroom,
            "Low-profile walnut platform bed with an upholstered linen headboard.",
            "https://picsum.photos/seed/bed/800/800",
            4.7,
        ),
        Product::new(
            "4",
            "Forge Dining Table",
            1499.0,
            Category::Dining,
            "Solid reclaimed elm top on a blackened steel base. Seats six.",
            "https://picsum.photos/seed/table/800/800",
            4.6,
        ),
        Product::new(
            "5",
            "Atlas Writing Desk",
            749.0,
            Category::Office,
            "Compact ash desk with a hidden cable tray and a single soft-close drawer.",
            "https://picsum.photos/seed/desk/800/800",
            4.5,
        ),
        Product::new(
            "6",
            "Ergo Task Chair",
            549.0,
            Category::Office,
            "Mesh-back task chair with adjustable lumbar support and walnut armrests.",
            "https://picsum.photos/seed/taskchair/800/800",
            4.4,
        ),
        Product::new(
            "7",
            "Luna Pendant Lamp",
            329.0,
            Category::Lighting,
            "Hand-blown opal glass globe suspended from a slim brass stem.",
            "https://picsum.photos/seed/pendant/800/800",
            4.8,
        ),
        Product::new(
            "8",
            "Drift Nightstand",
            399.0,
            Category::Bedroom,
            "Two-drawer oak nightstand with a rounded silhouette and leather pulls.",
            "https://picsum.photos/seed/nightstand/800/800",
            4.6,
        ),
    ],
});

/// An ordered, read-only list of products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "product", default)]
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog from an explicit product list after validating it.
    pub fn new(products: Vec<Product>) -> Result<Self> {
        let catalog = Self { products };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Parses a catalog from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads and parses a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            products = catalog.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks up a product by identifier.
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Like [`Catalog::find`], but a miss is a `NotFound` error.
    pub fn get(&self, id: &str) -> Result<&Product> {
        self.find(id)
            .ok_or_else(|| LuminaError::not_found("product", id))
    }

    /// The first `n` products in catalog order.
    pub fn featured(&self, n: usize) -> &[Product] {
        &self.products[..n.min(self.products.len())]
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for product in &self.products {
            if product.id.trim().is_empty() {
                return Err(LuminaError::catalog(format!(
                    "product '{}' has an empty id",
                    product.name
                )));
            }
            if !seen.insert(product.id.as_str()) {
                return Err(LuminaError::catalog(format!(
                    "duplicate product id '{}'",
                    product.id
                )));
            }
            if !product.price.is_finite() || product.price < 0.0 {
                return Err(LuminaError::catalog(format!(
                    "product '{}' has an invalid price {}",
                    product.id, product.price
                )));
            }
        }
        Ok(())
    }
}
