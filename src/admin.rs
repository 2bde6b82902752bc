//! # Admin Products Page
//!
//! How the back office uses the ordering endpoints.
//!
//! ## Endpoints
//!
//! ### List
//! `GET /products?categoryId=benches`
//! - Products in display order: ordered ones by rank, then unordered ones newest first
//!
//! ### Summary
//! `GET /categories/benches/ordering`
//! - `{categoryId, total, nextAvailableOrder, unordered, duplicates}`
//!
//! ### Create
//! `POST /products` with `{id?, categoryId, displayOrder?}`
//! - Without `displayOrder` the product is stored unordered
//! - The page fills in `nextAvailableOrder` as a suggestion when a category is picked, the user may change it
//!
//! ### Edit Order
//! `PATCH /products/{id}/order` with `{displayOrder}`
//! - `null` clears the order, the only way a product goes back to unordered
//!
//! ### Auto-Organize
//! `POST /products/auto-organize` with `{categoryId}`
//! - Orders every unordered product, oldest first, after the current maximum
//! - `{organized, startOrder, endOrder}`, the range is `null` when nothing changed
//!
//! ### Fix Duplicates
//! `POST /products/fix-duplicates` with `{categoryId}`
//! - Renumbers shared orders, oldest product keeps the lower value
//! - `{updated}`
//!
//! ### Errors
//! - Any non-2xx response carries `{error}`
//! - 400 bad payload, category or order; 404 unknown product; 409 conflicting write; 500 store failure
//!
//!
//!
//! ## Flow
//!
//! - Badges show the unordered and duplicate counts for the selected category
//! - Auto-Organize only shows when something is unordered, Fix Duplicates only when something is shared
//! - Both buttons are disabled while either request is running
//! - Each action asks for confirmation first, naming how many products change
//! - After the response, success or not, the page fetches the list again and recomputes the badges
//! - A failed batch writes nothing; the user retries and the plan is computed again from fresh data
