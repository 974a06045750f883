/// Domain layer: parsed repository state and the accessor built on it.
pub mod entities;
pub mod value_objects;
