use std::collections::BTreeMap;

use packkb_core::config::{expand_path, Config, EmbedJobConfig};
use packkb_core::loader::load_knowledge_base;
use packkb_core::types::KnowledgeItem;
use packkb_embed::get_default_provider;
use packkb_export::writer::write_export;
use packkb_export::BatchEmbedder;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {e}");
        e
    })?;
    let csv_path: String = config
        .get("data.knowledge_csv")
        .unwrap_or_else(|_| "data/packing-knowledge.csv".to_string());
    let output_path: String = config
        .get("data.output_json")
        .unwrap_or_else(|_| "data/packing-embeddings.json".to_string());
    let csv_path = expand_path(&csv_path);
    let output_path = expand_path(&output_path);

    let job = EmbedJobConfig::default();

    println!("{}", "=".repeat(70));
    println!("  Smart Packing Assistant - Embedding Generation");
    println!("{}", "=".repeat(70));

    // Credential check happens here, before touching any file.
    let provider = get_default_provider(&job)?;

    let items = load_knowledge_base(&csv_path)?;
    print_statistics(&items);

    let embedder = BatchEmbedder::new(provider.as_ref(), job.clone());
    let points = embedder.run(&items)?;

    write_export(&output_path, points, &job)?;

    println!("\n{}", "=".repeat(70));
    println!("✅ Embedding generation complete!");
    println!("{}", "=".repeat(70));
    println!("\nNext step: import {} into the vector database", output_path.display());
    Ok(())
}

fn print_statistics(items: &[KnowledgeItem]) {
    println!("\n📊 Knowledge Base Statistics:");
    println!("   Total items: {}", items.len());

    let mut categories: BTreeMap<&str, usize> = BTreeMap::new();
    for item in items {
        *categories.entry(item.category.as_str()).or_default() += 1;
    }
    println!("   Items by category:");
    for (category, count) in &categories {
        println!("      - {category}: {count}");
    }

    let mut travel_types: BTreeMap<&str, usize> = BTreeMap::new();
    for item in items {
        *travel_types.entry(item.travel_type.as_str()).or_default() += 1;
    }
    println!("   Items by travel type:");
    for (travel_type, count) in &travel_types {
        println!("      - {travel_type}: {count}");
    }

    let mut importance: BTreeMap<&str, usize> = BTreeMap::new();
    for item in items {
        *importance.entry(item.importance.as_str()).or_default() += 1;
    }
    let mut ranked: Vec<(&str, usize)> = importance.into_iter().collect();
    ranked.sort_by_key(|(level, _)| std::cmp::Reverse(importance_rank(level)));
    println!("   Items by importance:");
    for (level, count) in ranked {
        println!("      - {level}: {count}");
    }
}

/// critical > high > medium > low; anything else sorts last.
fn importance_rank(level: &str) -> u8 {
    match level {
        "critical" => 4,
        "high" => 3,
        "medium" => 2,
        "low" => 1,
        _ => 0,
    }
}
