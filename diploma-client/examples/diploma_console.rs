// diploma-client/examples/diploma_console.rs
// Load the registry and optionally run a search

use anyhow::Context;
use diploma_client::models::DiplomaSearchParams;
use diploma_client::{ClientConfig, DiplomaApi, DiplomaStore, logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ClientConfig::from_env();
    logger::init_logger(&config.log_level, None);

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("Usage: {} [<full_name> <student_id>]", args[0]);
        println!("  Example: {} \"Nguyen Van A\" SV001", args[0]);
        return Ok(());
    }

    let http = config
        .build_http_client()
        .context("failed to build HTTP client")?;
    let store = DiplomaStore::new(DiplomaApi::from_config(http, &config));

    tracing::info!("Connecting to {}", config.base_url);
    if let Some(report) = store.initialize().await
        && !report.is_complete()
    {
        for collection in &report.failed {
            tracing::warn!("Could not load {}", collection);
        }
    }

    let state = store.snapshot().await;
    println!("Diploma books:        {}", state.books.len());
    println!("Graduation decisions: {}", state.decisions.len());
    println!("Form fields:          {}", state.form_fields.len());
    println!("Diploma infos:        {}", state.infos.len());

    if let [_, full_name, student_id, ..] = args.as_slice() {
        let params = DiplomaSearchParams {
            full_name: Some(full_name.clone()),
            student_id: Some(student_id.clone()),
            ..Default::default()
        };
        let results = store.search_info(&params).await?;
        println!("Found {} record(s)", results.len());
        for info in results {
            println!(
                "  {} | {} | {} | {}",
                info.diploma_number, info.student_id, info.full_name, info.date_of_birth
            );
        }
    }

    Ok(())
}
