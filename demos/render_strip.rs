//! Render a small link strip and verify it decodes back
//!
//! Usage: cargo run --example render_strip

use qrstrip::{LinkEntry, StripConfig, StripGenerator};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut config = StripConfig::default();
    config.links = vec![
        LinkEntry::new("Docs", "https://docs.rs/qrstrip"),
        LinkEntry::new("Source", "https://github.com/ghostkellz/qrstrip"),
    ];
    config.output.image = "strip_demo.jpeg".into();

    let generator = StripGenerator::new(config)?;
    let artifacts = generator.run()?;

    println!("✓ Strip generated and saved to {}", artifacts.image.display());
    println!("✓ Manifest saved to {}", artifacts.manifest.display());

    generator.verify_written(&artifacts)?;
    println!("✓ Every tile decoded back to its URL");

    Ok(())
}
