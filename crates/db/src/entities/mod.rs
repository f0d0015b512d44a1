//! `SeaORM` entities.

pub mod recipes;
