use std::fmt;

use super::Product;

pub const SKU_MAX_LEN: usize = 100;
pub const MANUFACTURER_MAX_LEN: usize = 200;

/// One field constraint. `check` returns true when the product satisfies it.
pub struct Rule {
    pub field: &'static str,
    pub check: fn(&Product) -> bool,
    pub message: &'static str,
}

/// Field constraints in evaluation order. Only the first failure is reported.
pub static PRODUCT_RULES: &[Rule] = &[
    Rule {
        field: "product_id",
        check: |p: &Product| p.product_id >= 1,
        message: "product_id must be >= 1",
    },
    Rule {
        field: "sku",
        check: |p: &Product| (1..=SKU_MAX_LEN).contains(&p.sku.len()),
        message: "sku must be between 1 and 100 characters",
    },
    Rule {
        field: "manufacturer",
        check: |p: &Product| (1..=MANUFACTURER_MAX_LEN).contains(&p.manufacturer.len()),
        message: "manufacturer must be between 1 and 200 characters",
    },
    Rule {
        field: "category_id",
        check: |p: &Product| p.category_id >= 1,
        message: "category_id must be >= 1",
    },
    Rule {
        field: "weight",
        check: |p: &Product| p.weight >= 0,
        message: "weight must be >= 0",
    },
    Rule {
        field: "some_other_id",
        check: |p: &Product| p.some_other_id >= 1,
        message: "some_other_id must be >= 1",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleViolation {
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

pub fn validate(product: &Product) -> Result<(), RuleViolation> {
    match PRODUCT_RULES.iter().find(|rule| !(rule.check)(product)) {
        Some(rule) => Err(RuleViolation {
            field: rule.field,
            message: rule.message,
        }),
        None => Ok(()),
    }
}
