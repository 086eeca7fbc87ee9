//! # Repository Module
//!
//! Database repository implementations for the catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  Repository Pattern Explained                       │
//! │                                                                     │
//! │  Catalog use-case                                                   │
//! │       │                                                             │
//! │       │  db.products().list(&filter)                                │
//! │       ▼                                                             │
//! │  ProductRepository                                                  │
//! │  ├── list(&self, filter)                                            │
//! │  ├── get_by_id(&self, id)                                           │
//! │  ├── insert(&self, product)                                         │
//! │  └── update(&self, product)                                         │
//! │       │                                                             │
//! │       │  SQL                                                        │
//! │       ▼                                                             │
//! │  SQLite Database                                                    │
//! │                                                                     │
//! │  SQL lives here and nowhere else; business rules live in            │
//! │  fromagerie-core and never see a connection.                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Catalog CRUD, filtering and ordering
//! - [`product_type::ProductTypeRepository`] - Cheese categories
//! - [`user::UserRepository`] - Accounts and roles
//! - [`batch::BatchRepository`] - Draft orders and their line items

pub mod batch;
pub mod product;
pub mod product_type;
pub mod user;
