//! Enrich a catalog and print the features that do not work in any WebView.

use webview_compat::prelude::*;
use std::path::Path;

fn main() -> Result<(), WebviewCompatError> {
    let mut args = std::env::args().skip(1);
    let (Some(features), Some(bcd)) = (args.next(), args.next()) else {
        eprintln!("Usage: cargo run --example enrich_catalog <web-features.json> <bcd.json>");
        std::process::exit(1);
    };

    let options = EnrichOptions::with_builtin_overrides()?;
    let result = WebviewCompatCore::enrich_files(Path::new(&features), Path::new(&bcd), &options)?;

    println!("Enriched {} features", result.stats.features);
    println!();

    for (id, entry) in &result.catalog {
        let Some(support) = entry.as_feature().and_then(|f| f.webview_support.as_ref()) else {
            continue;
        };
        if support.all() == Some(SupportLevel::Unsupported) {
            println!("  - {}", id);
        }
    }

    println!();
    print!("{}", WebviewStats::from_catalog(&result.catalog).render_text());
    Ok(())
}
