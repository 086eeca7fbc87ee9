//! # fromagerie-db: Persistence Layer for the Fromagerie Catalog
//!
//! This crate provides database access and use-case orchestration for
//! the wholesale cheese catalog. It uses SQLite for storage with sqlx
//! for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Fromagerie Data Flow                           │
//! │                                                                     │
//! │  Request layer (HTTP handlers, CLI, ...)                            │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                 fromagerie-db (THIS CRATE)                    │  │
//! │  │                                                               │  │
//! │  │  ┌────────────┐  ┌──────────────┐  ┌─────────────────────┐   │  │
//! │  │  │  Catalog   │  │ Repositories │  │     Migrations      │   │  │
//! │  │  │(service.rs)│─►│ product.rs   │  │     (embedded)      │   │  │
//! │  │  │            │  │ batch.rs ... │  │ 001_initial_...sql  │   │  │
//! │  │  │ authorize  │  └──────────────┘  └─────────────────────┘   │  │
//! │  │  │ validate   │         │                                    │  │
//! │  │  │ act        │         ▼                                    │  │
//! │  │  └────────────┘   SqlitePool (pool.rs, WAL mode)             │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite database file (or :memory: in tests)                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Business rules never live here: pricing, aggregation, validation, and
//! the access rule table all come from `fromagerie-core`. This crate
//! decides WHEN they run and persists the outcome.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//! - [`service`] - The [`service::Catalog`] use-case facade
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fromagerie_db::{Catalog, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("fromagerie.db")).await?;
//! let catalog = Catalog::new(db);
//!
//! let batch = catalog.create_batch(Some(&manager)).await?;
//! catalog.add_batch_item(Some(&manager), &batch.id, &brynza.id, 7).await?;
//! let summary = catalog.batch_summary(Some(&manager), &batch.id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use service::{BatchSummary, Catalog, LineView, ServiceError, ServiceResult};

// Repository re-exports for convenience
pub use repository::batch::BatchRepository;
pub use repository::product::{ProductFilter, ProductOrder, ProductRepository};
pub use repository::product_type::ProductTypeRepository;
pub use repository::user::UserRepository;
