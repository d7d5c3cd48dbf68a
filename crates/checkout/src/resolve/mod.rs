//! Resolution stages: fetch and validate the entities a draft references.

pub mod merchant;
pub mod product;

pub(crate) use merchant::resolve_merchant;
pub(crate) use product::resolve_products;
