//! Command handlers.

use std::path::{Path, PathBuf};

use anyhow::Context;

use larder_catalog::Catalog;
use larder_core::{DomainError, DomainResult};
use larder_draft::ItemEntry;
use larder_store::{FileStore, default_state_path};

use crate::args::{Cli, Command};
use crate::book::PurchaseBook;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Catalog { query, category } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            show_catalog(&catalog, query.as_deref(), category.as_deref())
        }
        Command::Add {
            category,
            product,
            quantity,
        } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let mut book = open_book(cli.store)?;
            add_item(&mut book, &catalog, &category, &product, &quantity)
        }
        Command::List => show_draft(&open_book(cli.store)?),
        Command::Update { position, quantity } => {
            update_item(&mut open_book(cli.store)?, position, &quantity)
        }
        Command::Remove { position } => remove_item(&mut open_book(cli.store)?, position),
        Command::Commit => commit_draft(&mut open_book(cli.store)?),
        Command::Ledger => show_ledger(&open_book(cli.store)?),
        Command::Summary => show_summary(&open_book(cli.store)?),
    }
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<Catalog> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading catalog {}", path.display()))?;
            let catalog = Catalog::from_json_str(&text)
                .with_context(|| format!("parsing catalog {}", path.display()))?;
            Ok(catalog)
        }
        None => Ok(Catalog::builtin()),
    }
}

fn open_book(path: Option<PathBuf>) -> anyhow::Result<PurchaseBook<FileStore>> {
    let path = path.unwrap_or_else(default_state_path);
    let store = FileStore::open(&path)
        .with_context(|| format!("opening state file {}", path.display()))?;
    Ok(PurchaseBook::open(store)?)
}

fn show_catalog(
    catalog: &Catalog,
    query: Option<&str>,
    category: Option<&str>,
) -> anyhow::Result<()> {
    let query = query.unwrap_or("");
    match category {
        Some(name) => {
            let entries = catalog.search_products(name, query).ok_or_else(|| {
                DomainError::invalid_input(format!("unknown category {name:?}"))
            })?;
            if entries.is_empty() {
                println!("No products match.");
                return Ok(());
            }
            for entry in entries {
                println!("{}  {}/kg", entry.name, format_price(entry.unit_price));
            }
        }
        None => {
            let categories = catalog.search_categories(query);
            if categories.is_empty() {
                println!("No categories match.");
                return Ok(());
            }
            for cat in categories {
                println!("{}", cat.name());
                for entry in cat.products() {
                    println!("  {}  {}/kg", entry.name, format_price(entry.unit_price));
                }
            }
        }
    }
    Ok(())
}

fn add_item(
    book: &mut PurchaseBook<FileStore>,
    catalog: &Catalog,
    category: &str,
    product: &str,
    quantity: &str,
) -> anyhow::Result<()> {
    let mut entry = ItemEntry::new();
    entry.select_category(catalog, category)?;
    entry.select_product(catalog, product)?;
    entry.set_quantity(quantity);
    if entry.quantity().is_none() {
        return Err(
            DomainError::invalid_input(format!("quantity {quantity:?} is not a number")).into(),
        );
    }

    let item = entry.build()?;
    let line = format!(
        "Added {}: {} kg = {}",
        item.name,
        format_quantity(item.quantity),
        format_price(item.price)
    );
    book.upsert(item)?;
    println!("{line}");
    Ok(())
}

fn show_draft(book: &PurchaseBook<FileStore>) -> anyhow::Result<()> {
    if book.draft().is_empty() {
        println!("Draft is empty.");
        return Ok(());
    }
    for (i, item) in book.draft().items().iter().enumerate() {
        println!(
            "{:>3}. {:<16} {:>8} kg  @ {:>8}  = {:>10}",
            i + 1,
            item.name,
            format_quantity(item.quantity),
            format_price(item.effective_unit_price()),
            format_price(item.price)
        );
    }
    Ok(())
}

fn update_item(
    book: &mut PurchaseBook<FileStore>,
    position: usize,
    quantity: &str,
) -> anyhow::Result<()> {
    let id = book.id_at(position_to_index(position)?)?;
    let updated = book.update_quantity(id, parse_quantity(quantity)?)?;
    println!(
        "Updated {}: {} kg = {}",
        updated.name,
        format_quantity(updated.quantity),
        format_price(updated.price)
    );
    Ok(())
}

fn remove_item(book: &mut PurchaseBook<FileStore>, position: usize) -> anyhow::Result<()> {
    let removed = book.remove_at(position_to_index(position)?)?;
    println!(
        "Removed {} ({} kg = {})",
        removed.name,
        format_quantity(removed.quantity),
        format_price(removed.price)
    );
    Ok(())
}

fn commit_draft(book: &mut PurchaseBook<FileStore>) -> anyhow::Result<()> {
    let receipt = book.commit()?;
    println!(
        "Committed {} item(s); {} total in ledger.",
        receipt.committed, receipt.ledger_len
    );
    Ok(())
}

fn show_ledger(book: &PurchaseBook<FileStore>) -> anyhow::Result<()> {
    if book.ledger().is_empty() {
        println!("No committed purchases.");
        return Ok(());
    }
    for (i, entry) in book.ledger().entries().iter().enumerate() {
        println!(
            "{:>3}. {:<16} {:>8} kg {:>12}",
            i + 1,
            entry.name,
            format_quantity(entry.quantity),
            format_price(entry.price)
        );
    }
    println!("Total: {}", format_price(book.total_amount()));
    Ok(())
}

fn show_summary(book: &PurchaseBook<FileStore>) -> anyhow::Result<()> {
    let rows = book.summary();
    if rows.is_empty() {
        println!("Nothing committed yet.");
        return Ok(());
    }
    println!(
        "{:<16} {:>14} {:>12} {:>14}",
        "Product", "Quantity (kg)", "Value", "Avg price/kg"
    );
    for row in rows {
        let average = if row.zero_quantity {
            "-".to_string()
        } else {
            format_price(row.average_unit_price)
        };
        println!(
            "{:<16} {:>14} {:>12} {:>14}",
            row.name,
            format_quantity(row.total_quantity),
            format_price(row.total_value),
            average
        );
    }
    Ok(())
}

fn position_to_index(position: usize) -> DomainResult<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| DomainError::invalid_input("positions start at 1"))
}

fn parse_quantity(input: &str) -> DomainResult<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|q| q.is_finite())
        .ok_or_else(|| DomainError::invalid_input(format!("quantity {input:?} is not a number")))
}

fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 && quantity.abs() < 1e15 {
        format!("{}", quantity as i64)
    } else {
        format!("{quantity}")
    }
}

fn format_price(price: f64) -> String {
    format!("{price:.2}")
}
