//! # Seed Data Generator
//!
//! Populates a data directory with a demo pet-shop dataset for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the default ./data directory
//! cargo run -p pawshop-app --bin seed
//!
//! # Specify a data directory
//! cargo run -p pawshop-app --bin seed -- --data ./demo-data
//! ```
//!
//! Seeds suppliers, a catalog across the pet categories (food, toys,
//! accessories, health, aquarium), and a couple of registered customers.
//! Refuses to run over a directory that already has products.

use std::env;

use pawshop_app::{AppConfig, Shop};
use pawshop_core::{Money, NewCustomer, NewProduct, NewSupplier, SupplierStatus};

/// (name, barcode, category, brand, purchase cents, sale cents, quantity, unit)
const PRODUCTS: &[(&str, &str, &str, &str, i64, i64, i64, &str)] = &[
    ("Premium Dog Food 10kg", "PF001", "food", "PawNutrition", 3000, 4599, 45, "bag"),
    ("Adult Cat Food 5kg", "PF002", "food", "PawNutrition", 1800, 2799, 38, "bag"),
    ("Puppy Starter Mix 3kg", "PF003", "food", "PawNutrition", 1400, 2199, 12, "bag"),
    ("Bird Seed Blend 2kg", "PF004", "food", "FeatherFeast", 600, 999, 60, "bag"),
    ("Rope Tug Toy", "TY001", "toys", "ChewCo", 250, 599, 80, "piece"),
    ("Squeaky Ball 3-Pack", "TY002", "toys", "ChewCo", 300, 749, 55, "pack"),
    ("Cat Teaser Wand", "TY003", "toys", "WhiskerPlay", 150, 449, 8, "piece"),
    ("Adjustable Dog Collar", "AC001", "accessories", "TailGear", 400, 899, 30, "piece"),
    ("Retractable Leash 5m", "AC002", "accessories", "TailGear", 700, 1499, 22, "piece"),
    ("Pet Carrier Medium", "AC003", "accessories", "TailGear", 1800, 3499, 6, "piece"),
    ("Flea & Tick Shampoo", "HL001", "health", "VetCare", 450, 899, 40, "bottle"),
    ("Joint Support Chews", "HL002", "health", "VetCare", 900, 1699, 25, "jar"),
    ("Aquarium Starter Kit 60L", "AQ001", "aquarium", "AquaWorld", 4500, 7999, 4, "kit"),
    ("Tropical Fish Flakes", "AQ002", "aquarium", "AquaWorld", 200, 499, 70, "tub"),
    ("Water Conditioner 250ml", "AQ003", "aquarium", "AquaWorld", 300, 649, 35, "bottle"),
];

const SUPPLIERS: &[(&str, &str, &str, &str)] = &[
    ("Pet Supplies Co", "Alex Morgan", "orders@petsupplies.example", "food"),
    ("Aqua World Distribution", "Sam Lee", "sales@aquaworld.example", "aquarium"),
    ("TailGear Wholesale", "Riley Chen", "hello@tailgear.example", "accessories"),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pawshop=info".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let mut config = AppConfig::from_env();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data" | "-d" => {
                if i + 1 < args.len() {
                    config.data_dir = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Pawshop Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --data <DIR>   Data directory (default: ./data)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Pawshop Seed Data Generator");
    println!("==============================");
    println!("Data directory: {}", config.data_dir.display());
    println!();

    let mut shop = Shop::open(config)?;

    if !shop.products().is_empty() {
        println!("⚠ Data directory already has {} products", shop.products().len());
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    for (name, contact, email, category) in SUPPLIERS {
        shop.add_supplier(NewSupplier {
            name: name.to_string(),
            contact: contact.to_string(),
            phone: "555 010 0200".to_string(),
            email: email.to_string(),
            address: "12 Harbor Rd".to_string(),
            category: category.to_string(),
            status: SupplierStatus::Active,
            payment_terms: "Net 30".to_string(),
        })?;
    }
    println!("✓ Seeded {} suppliers", shop.suppliers().len());

    for (name, barcode, category, brand, cost, price, quantity, unit) in PRODUCTS {
        let supplier = shop
            .suppliers()
            .iter()
            .find(|s| s.category == *category)
            .map(|s| s.id.clone());

        shop.add_product(NewProduct {
            barcode: barcode.to_string(),
            sku: format!("{category}-{barcode}").to_uppercase(),
            name: name.to_string(),
            category: category.to_string(),
            brand: brand.to_string(),
            supplier_id: supplier,
            supplier_name: String::new(),
            description: String::new(),
            image: format!("/images/{}.jpg", barcode.to_lowercase()),
            purchase_price: Money::from_cents(*cost),
            sale_price: Money::from_cents(*price),
            mrp: Money::from_cents(*price + *price / 10),
            quantity: *quantity,
            min_stock: 5,
            reorder_level: 10,
            unit: unit.to_string(),
            discount_percent: None,
        })?;
    }
    println!("✓ Seeded {} products", shop.products().len());

    for (name, phone, pet_name, pet_type) in [
        ("Jane Smith", "555 010 0100", "Rex", "Dog"),
        ("Omar Haddad", "555 010 0101", "Misha", "Cat"),
    ] {
        shop.add_customer(NewCustomer {
            name: name.to_string(),
            phone: phone.to_string(),
            email: String::new(),
            address: String::new(),
            pet_name: pet_name.to_string(),
            pet_type: pet_type.to_string(),
            pet_breed: String::new(),
        })?;
    }
    println!("✓ Seeded {} customers", shop.customers().len());

    let low = shop.low_stock_products().len();
    println!();
    println!("✓ Seed complete! ({low} products start below their reorder level)");
    Ok(())
}
