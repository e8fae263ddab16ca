pub mod color;
pub mod validation;
