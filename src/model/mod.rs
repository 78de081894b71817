//src/model/mod.rs
pub mod composition;
pub mod dict;
pub mod elements;
pub mod lattice;
pub mod molecule;
pub mod structure;

// Re-exports for cleaner imports
pub use lattice::Lattice;
pub use molecule::Molecule;
pub use structure::Structure;
