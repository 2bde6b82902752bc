//! # Display Order
//!
//! Ranking rules for products within a category.
//!
//! Every category is its own ordering namespace. A product either carries a
//! positive display order or none at all, in which case it is shown after the
//! ordered ones, newest first.
//!
//! ## Invariants after a repair
//! - Ordered products within one category hold distinct values
//! - Category membership never changes
//! - Planning again right after applying a plan yields nothing to do
//! - Products sharing a value keep their relative rank, oldest first
//! - Unordered products only receive a value through auto-organize
//!
//! ## Usage
//!
//! Everything here is a pure function over a snapshot of products. Callers
//! fetch the list, compute a plan, send it to the store as one batch and then
//! fetch again instead of patching their local copy.
//!
//! ```
//! use ordering::{Product, count_duplicates, plan_duplicate_repair};
//!
//! let products: Vec<Product> = Vec::new();
//! assert_eq!(count_duplicates(&products, "benches"), 0);
//! assert!(plan_duplicate_repair(&products, "benches").is_empty());
//! ```

pub mod models;
pub mod reconcile;

pub use models::{MissingOrderPlan, OrderAssignment, OrderRange, OrderingSummary, Product};
pub use reconcile::{
    apply_plan, count_duplicates, count_unordered, display_sort, duplicate_groups,
    next_available_order, plan_duplicate_repair, plan_missing_order_repair, summarize,
    unordered_items,
};
