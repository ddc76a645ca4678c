pub mod design;

pub use design::Design;
