//! Catalog Module - Products and the ordered product catalog.
//!
//! Product attributes are closed enumerations validated once, when a
//! [`ProductDraft`] is converted into a [`Product`]. The decision engine only
//! ever sees validated products.

mod catalog;
mod product;

pub use catalog::{CatalogError, ProductCatalog};
pub use product::{
    ActiveTag, Category, Moment, Product, ProductDraft, ProductName, RoutineSlot,
};
