//! # Showroom Documentation
//!
//! Catalog backend for an outdoor furniture and playground equipment maker.
//!
//! Brands hold categories, categories hold products. This workspace covers the
//! part of the admin back office that keeps products in a deliberate order
//! inside each category.
//!
//!
//!
//! # Crates
//! - `ordering`: ranking rules, duplicate detection and repair plans. Pure functions, no I/O
//! - `showroom-server`: axum service over a Redis (or in-memory) product store
//! - `backend`: server binary
//! - `admin`: command line client that runs the repair flow against a server
//!
//!
//!
//! # Notes
//!
//! ## Why re-fetch after every write
//! The admin page never patches its own list after a repair. It sends the
//! batch, then reads the category again and recomputes every count. The store
//! is the only source of truth.
//!
//! Two admins repairing the same category at the same moment can interleave.
//! Nothing on the server prevents it. The next read shows whatever duplicates
//! are left and running the repair again clears them. Products per category
//! are in the tens to low hundreds and repairs are human paced, so this is
//! accepted.
//!
//! ## Duplicate repair start
//! Repair renumbers from the lowest order already present, not from 1. A
//! category at `[5, 5, 5]` becomes `[5, 6, 7]`.
//!
//!
//!
//! # Setup
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```
//!
//! Run the server against a local Redis.
//! ```sh
//! RUST_LOG=info cargo run -p backend
//! ```
//!
//! Run without Redis, seeded from a JSON array of products.
//! ```sh
//! STORE_BACKEND=memory CATALOG_SEED=catalog.json cargo run -p backend
//! ```
//!
//!
//!
//! # Configuration
//!
//! | Variable | Default | |
//! |----------|---------|-|
//! | `RUST_PORT` | `8080` | Listen port |
//! | `REDIS_URL` | `redis://127.0.0.1:6379` | Redis connection |
//! | `STORE_BACKEND` | `redis` | `redis` or `memory` |
//! | `CATALOG_SEED` | unset | Seed file for the memory store |
//! | `RUST_LOG` | unset | Log filter |
//!
//! A Docker secret at `/run/secrets/REDIS_PASSWORD` is added to `REDIS_URL`
//! when the URL carries no credentials of its own.

pub mod admin;
