pub mod product;
pub mod validation;

pub use product::Product;
pub use validation::{validate, RuleViolation, PRODUCT_RULES};
