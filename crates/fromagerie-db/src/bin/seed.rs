//! # Seed Data Generator
//!
//! Populates the database with demo cheeses, accounts, and a sample
//! draft batch for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p fromagerie-db --bin seed
//!
//! # Specify database path
//! cargo run -p fromagerie-db --bin seed -- --db ./data/fromagerie.db
//! ```
//!
//! ## Generated Data
//! - One cheese type per family (soft, hard, blue, brined, fresh)
//! - A spread of cheeses, most with wholesale tiers configured
//! - One account per role (admin / product manager / sales manager / guest)
//! - A demo draft batch owned by the sales manager

use std::env;

use fromagerie_core::{Product, ProductType, Role, User};
use fromagerie_db::{Catalog, Database, DbConfig};

/// Demo catalog: (family, [(name, base, small tier, big tier, grams)]).
/// Prices are cents; a `None` tier stays unconfigured.
type TierSpec = Option<(i64, i64)>;
const CHEESES: &[(&str, &[(&str, i64, TierSpec, TierSpec, i64)])] = &[
    (
        "soft",
        &[
            ("Brie de Meaux", 14_500, Some((12_900, 5)), Some((10_900, 12)), 800),
            ("Camembert", 9_800, Some((8_900, 6)), None, 250),
            ("Reblochon", 12_400, None, Some((9_900, 10)), 450),
        ],
    ),
    (
        "hard",
        &[
            ("Comte 18mo", 24_000, Some((21_500, 4)), Some((18_900, 10)), 1_000),
            ("Gruyere", 19_800, Some((17_900, 5)), None, 1_000),
            ("Parmigiano Reggiano", 28_500, None, Some((23_900, 8)), 1_000),
            ("Manchego", 16_200, None, None, 900),
        ],
    ),
    (
        "blue",
        &[
            ("Roquefort", 21_000, Some((18_500, 4)), Some((15_900, 10)), 600),
            ("Stilton", 17_400, None, None, 500),
        ],
    ),
    (
        "brined",
        &[
            ("Brynza", 10_000, Some((7_000, 5)), Some((5_000, 10)), 500),
            ("Feta", 8_600, Some((7_400, 6)), None, 400),
            ("Halloumi", 11_200, None, None, 250),
        ],
    ),
    (
        "fresh",
        &[
            ("Mozzarella di Bufala", 9_400, Some((8_200, 8)), None, 300),
            ("Ricotta", 5_600, None, None, 500),
            ("Chevre", 7_800, Some((6_900, 6)), Some((5_900, 15)), 200),
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./fromagerie_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Fromagerie Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./fromagerie_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🧀 Fromagerie Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Accounts, one per role
    let admin = User::new("admin", Role::Admin);
    let product_manager = User::new("affineur", Role::ProductManager);
    let sales_manager = User::new("rivka", Role::SalesManager);
    let guest = User::new("visitor", Role::Guest);
    for user in [&admin, &product_manager, &sales_manager, &guest] {
        db.users().insert(user).await?;
    }
    println!("✓ Created 4 accounts (one per role)");

    // Catalog
    let catalog = Catalog::new(db.clone());
    let mut product_count = 0;
    let mut first_tiered: Option<Product> = None;

    for (family, cheeses) in CHEESES {
        let cheese_type = ProductType::new(*family);
        db.product_types().insert(&cheese_type).await?;

        for (name, base, small, big, grams) in *cheeses {
            let mut product =
                Product::new(*name, *base, &cheese_type.id).with_weight_grams(*grams);
            if let Some((price, min_qty)) = small {
                product = product.with_small_tier(*price, *min_qty);
            }
            if let Some((price, min_qty)) = big {
                product = product.with_big_tier(*price, *min_qty);
            }

            let created = catalog
                .create_product(Some(&product_manager), product)
                .await?;
            if first_tiered.is_none() && created.small_tier().is_some() {
                first_tiered = Some(created);
            }
            product_count += 1;
        }
    }
    println!("✓ Created {} cheeses across {} families", product_count, CHEESES.len());

    // Demo draft so the batch views have something to show
    if let Some(product) = first_tiered {
        let batch = catalog.create_batch(Some(&sales_manager)).await?;
        catalog
            .add_batch_item(Some(&sales_manager), &batch.id, &product.id, 3)
            .await?;
        catalog
            .add_batch_item(Some(&sales_manager), &batch.id, &product.id, 7)
            .await?;

        let summary = catalog
            .batch_summary(Some(&sales_manager), &batch.id)
            .await?;
        println!(
            "✓ Created demo batch: total {} ({} off)",
            summary.totals.total_price, summary.totals.total_discount_percent
        );
    }

    println!();
    println!("Done.");
    Ok(())
}
