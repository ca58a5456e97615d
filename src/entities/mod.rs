//! Entity module - Contains the SeaORM entity definitions for the local store.
//! Each entity has a Model struct for data and an Entity struct for operations,
//! plus a conversion into the wire records in [`crate::models`].

pub mod planning;
pub mod plantation;

// Re-export specific types to avoid conflicts
pub use planning::{Entity as Planning, Model as PlanningModel};
pub use plantation::{Entity as Plantation, Model as PlantationModel};
