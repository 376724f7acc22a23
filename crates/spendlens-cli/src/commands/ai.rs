//! Text-generation backend status command

use anyhow::Result;
use spendlens_core::{BackendKind, GenerationClient, GenerationConfig, TextGenerator};

pub async fn cmd_ai_status(generation: &GenerationConfig) -> Result<()> {
    println!("🔍 Checking text-generation backend...\n");

    println!("  Backend: {}", generation.backend);
    if let Some(host) = &generation.host {
        println!("  Host:    {}", host);
    }
    println!("  Model:   {}", generation.model);
    println!("  Timeout: {}s\n", generation.timeout.as_secs());

    let client = GenerationClient::from_config(generation);
    if client.is_disabled() {
        if generation.backend == BackendKind::Ollama {
            println!("⚠️  Ollama selected but no host configured. Set OLLAMA_HOST.");
        } else {
            println!("💡 Generation disabled. Recommendations are rule-based.");
            println!("   Set SPENDLENS_AI_BACKEND=ollama and OLLAMA_HOST to enable it.");
        }
        return Ok(());
    }

    print!("Checking {} availability... ", client.name());
    if client.try_load().await {
        println!("✅ Connected");
        println!("\nRecommendations will be model-assisted, with rule-based fallback.");
    } else {
        println!("❌ Unavailable");
        println!("\nRecommendations will fall back to rule-based text.");
    }

    Ok(())
}
