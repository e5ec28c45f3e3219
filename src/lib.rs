pub mod fmt;
pub mod generator;
pub mod models;
pub mod render;

pub use generator::{generate, GenerateError, GeneratedClass};
pub use models::{DelegateBinding, Input, Interface, Target};
