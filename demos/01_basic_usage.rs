//! Example 01: Basic Usage
//!
//! This example adds, lists and removes tasks with a `TaskStore` backed by a
//! temporary TSV file, printing the file after each step.
//!
//! Run with: cargo run --example 01_basic_usage

use eyre::Result;
use std::fs;
use todone::{FixedClock, Removal, SortKey, TaskStore, report};

fn main() -> Result<()> {
    // Create a temporary directory for this example
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("todo.tsv");

    println!("ToDone Basic Usage Example");
    println!("==========================\n");
    println!("Task file: {}\n", path.display());

    // A fixed clock keeps the output stable between runs
    let clock = FixedClock::parse("2024-01-01 09:00:00")?;
    let mut store = TaskStore::with_clock(&path, clock)?;

    // ADD: two tasks at rank 2, one at rank 1
    println!("1. ADD - Adding tasks...");
    let added = store.add_tasks(2, &["Water the plants", "Call mum"])?;
    println!("   {}", report::format_added(added));
    let added = store.add_tasks(1, &["Renew passport"])?;
    println!("   {}\n", report::format_added(added));

    println!("   File now contains:");
    for line in fs::read_to_string(&path)?.lines() {
        println!("   | {}", line);
    }
    println!();

    // LIST: sorted by rank, asking for more than exist
    println!("2. LIST - Five tasks by rank...");
    let listing = store.list_tasks(Some(5), SortKey::Rank)?;
    for line in report::format_listing(&listing).lines() {
        println!("   {}", line);
    }
    if let Some(missing) = listing.shortfall() {
        println!("   ({} fewer than requested)", missing);
    }
    println!();

    // REMOVE: one real task and one that does not exist
    println!("3. REMOVE - Completing tasks...");
    let outcomes = store.remove_tasks(&["Call mum", "Walk the dog"])?;
    for outcome in &outcomes {
        println!("   {}", report::format_removal(outcome, "todo.tsv"));
    }
    let deleted = outcomes.iter().filter(|o| matches!(o, Removal::Deleted { .. })).count();
    println!("   {} of {} requests matched\n", deleted, outcomes.len());

    println!("   File now contains:");
    for line in fs::read_to_string(&path)?.lines() {
        println!("   | {}", line);
    }

    println!("\nExample complete!");
    Ok(())
}
