//! Repository implementations for data access.
//!
//! Repositories implement the core store ports, hiding the `SeaORM`
//! implementation details from the rest of the application.

pub mod recipe;

pub use recipe::SeaOrmRecipeStore;
