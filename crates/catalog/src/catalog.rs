use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shelfwatch_core::{DomainError, DomainResult, ProductId};

use crate::product::Product;

/// Fields supplied by the entry form when adding a product.
///
/// The catalog assigns the identifier and the added-on date itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub quantity: u32,
    #[serde(with = "crate::product::lenient_date")]
    pub expiry_date: Option<NaiveDate>,
    pub average_sales_per_day: f64,
    pub cost_price: f64,
    pub selling_price: f64,
}

/// Partial field replacement for an existing product.
///
/// `None` leaves a field untouched. `expiry_date` is doubly optional so the
/// caller can overwrite a valid date with the invalid sentinel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<u32>,
    pub expiry_date: Option<Option<NaiveDate>>,
    pub average_sales_per_day: Option<f64>,
    pub cost_price: Option<f64>,
    pub selling_price: Option<f64>,
    pub is_ignored: Option<bool>,
    pub ignored_reason: Option<String>,
    pub marked_as_sold: Option<bool>,
}

/// The in-memory product collection for a single session.
///
/// The catalog is the only mutable state in the system; the engine takes
/// `products()` as a read-only snapshot and never mutates records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products participating in engine computations.
    pub fn active(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.is_active())
    }

    /// Validate and append a new product, stamping it with a fresh id and
    /// the supplied added-on date.
    pub fn add(&mut self, new: NewProduct, added_on: NaiveDate) -> DomainResult<ProductId> {
        validate_name(&new.name)?;
        validate_rate("averageSalesPerDay", new.average_sales_per_day)?;
        validate_rate("costPrice", new.cost_price)?;
        validate_rate("sellingPrice", new.selling_price)?;

        let id = ProductId::new();
        self.products.push(Product {
            id,
            name: new.name,
            category: new.category,
            quantity: new.quantity,
            expiry_date: new.expiry_date,
            average_sales_per_day: new.average_sales_per_day,
            cost_price: new.cost_price,
            selling_price: new.selling_price,
            date_added: added_on,
            is_ignored: false,
            ignored_reason: None,
            marked_as_sold: false,
        });
        Ok(id)
    }

    /// Apply a partial update, revalidating any touched field.
    pub fn update(&mut self, id: ProductId, patch: ProductPatch) -> DomainResult<()> {
        if let Some(name) = &patch.name {
            validate_name(name)?;
        }
        if let Some(rate) = patch.average_sales_per_day {
            validate_rate("averageSalesPerDay", rate)?;
        }
        if let Some(price) = patch.cost_price {
            validate_rate("costPrice", price)?;
        }
        if let Some(price) = patch.selling_price {
            validate_rate("sellingPrice", price)?;
        }

        let product = self.get_mut(id)?;
        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(category) = patch.category {
            product.category = category;
        }
        if let Some(quantity) = patch.quantity {
            product.quantity = quantity;
        }
        if let Some(expiry) = patch.expiry_date {
            product.expiry_date = expiry;
        }
        if let Some(rate) = patch.average_sales_per_day {
            product.average_sales_per_day = rate;
        }
        if let Some(price) = patch.cost_price {
            product.cost_price = price;
        }
        if let Some(price) = patch.selling_price {
            product.selling_price = price;
        }
        if let Some(ignored) = patch.is_ignored {
            product.is_ignored = ignored;
            if !ignored {
                product.ignored_reason = None;
            }
        }
        if let Some(reason) = patch.ignored_reason {
            product.ignored_reason = Some(reason);
        }
        if let Some(sold) = patch.marked_as_sold {
            product.marked_as_sold = sold;
        }
        Ok(())
    }

    /// Suppress alerts for a product, recording why.
    pub fn ignore(&mut self, id: ProductId, reason: Option<String>) -> DomainResult<()> {
        let product = self.get_mut(id)?;
        product.is_ignored = true;
        product.ignored_reason = Some(
            reason
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| "No reason provided".to_string()),
        );
        Ok(())
    }

    /// Flag a product as sold out, removing it from engine computations.
    pub fn mark_as_sold(&mut self, id: ProductId) -> DomainResult<()> {
        let product = self.get_mut(id)?;
        product.marked_as_sold = true;
        Ok(())
    }

    pub fn remove(&mut self, id: ProductId) -> DomainResult<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(DomainError::not_found)?;
        Ok(self.products.remove(index))
    }

    fn get_mut(&mut self, id: ProductId) -> DomainResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(DomainError::not_found)
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(())
}

fn validate_rate(field: &str, value: f64) -> DomainResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::validation(format!(
            "{field} must be a finite non-negative number"
        )));
    }
    Ok(())
}
