//! SeaORM entities for the import tables.

pub mod identity;
pub mod profile;
