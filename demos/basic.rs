//! Basic example: decomposing the statistics of a shield
//!
//! This example demonstrates:
//! - Parsing an item from JSON
//! - Decomposing it with the standard counters
//! - Reading the detected rarity modifier and per-statistic results

use bonus_decomposer::*;

fn main() -> Result<(), serde_json::Error> {
    let item = Item::from_json(
        r#"{
            "type": "shield",
            "rarity": "common",
            "level": 50,
            "stats": {
                "armor": 310,
                "block": 92,
                "fireRes": 23,
                "damageReflect": 4
            }
        }"#,
    )?;

    println!("Decomposing level {} {}:", item.base_level(), item.item_type);
    let decomposed = decompose_item(&item);

    match decomposed.rarity_modifier {
        Some(modifier) => println!("  Rarity modifier: {}", modifier),
        None => println!("  Rarity modifier: unknown"),
    }

    println!("\n=== Statistics ===");
    for (stat, result) in decomposed.iter() {
        let value = item.stats.get(stat).unwrap_or_default();
        match result {
            DecompositionResult::Success { count, native, .. } => {
                let native = if *native { "native + " } else { "" };
                println!("  {}: {} = {}{} bonus(es)", stat, value, native, count);
            }
            DecompositionResult::Failure { error } => {
                println!("  {}: {} could not be decomposed: {}", stat, value, error);
            }
        }
    }

    println!("\nJSON:\n{}", serde_json::to_string_pretty(&decomposed)?);

    Ok(())
}
