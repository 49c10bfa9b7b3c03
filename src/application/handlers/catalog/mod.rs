//! Catalog command handlers.
//!
//! Handlers for adding, removing and AI-proposing products.

mod add_product;
mod errors;
mod propose_product;
mod remove_product;

pub use add_product::{AddProductCommand, AddProductHandler, AddProductResult};
pub use errors::CatalogCommandError;
pub use propose_product::{ProposeProductCommand, ProposeProductHandler, ProposeProductResult};
pub use remove_product::{RemoveProductCommand, RemoveProductHandler, RemoveProductResult};
