//! # Seed Data Generator
//!
//! Populates the database with demo accounts for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p bank-db --bin seed
//!
//! # Specify database path
//! cargo run -p bank-db --bin seed -- --db ./data/bank.db
//! ```
//!
//! Creates a fixed set of holders. A few get a balance, and one is left
//! INACTIVE so every lifecycle state is visible.

use std::env;

use bank_core::{Account, AccountUpdate};
use bank_db::{Database, DbConfig};
use rust_decimal::Decimal;

/// (name, document, balance in cents)
const HOLDERS: &[(&str, &str, i64)] = &[
    ("João Silva", "12345678901", 0),
    ("Maria Souza", "98765432100", 15_000),
    ("Ana Pereira", "45678912345", 250_075),
    ("Carlos Oliveira", "32165498700", 0),
    ("Comercial Lima Ltda", "12345678000195", 1_000_000),
    ("Beatriz Costa", "74185296300", 9_990),
];

/// Seeded as INACTIVE (must have a zero balance).
const INACTIVE_DOCUMENT: &str = "32165498700";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./bank_dev.db");

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
                println!("Bank Services Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./bank_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Bank Services Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.accounts().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} accounts", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let accounts = db.accounts();
    let mut generated = 0;

    for (name, document, cents) in HOLDERS {
        let mut account = match accounts.insert(&Account::open(*name, *document)).await {
            Ok(account) => account,
            Err(e) => {
                eprintln!("Failed to insert {}: {}", document, e);
                continue;
            }
        };

        if *cents != 0 {
            account.apply_update(AccountUpdate {
                balance: Some(Decimal::new(*cents, 2)),
                ..Default::default()
            });
            account = accounts.update(&account).await?;
        }

        if *document == INACTIVE_DOCUMENT {
            account.deactivate()?;
            account = accounts.update(&account).await?;
        }

        println!(
            "  {} {:<22} {:>12} {}",
            account.public_id(),
            account.name(),
            account.balance(),
            account.status().as_str()
        );
        generated += 1;
    }

    println!();
    println!("✓ Seeded {} accounts", generated);

    Ok(())
}
