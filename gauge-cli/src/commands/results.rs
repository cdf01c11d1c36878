//! Results command handler

use anyhow::Result;
use colored::*;
use gauge_client::ControlClient;
use gauge_core::domain::result::ResultRow;

/// Print the latest results as a table
pub async fn show_results(client: &ControlClient) -> Result<()> {
    let results = client.results().await?;

    if results.data.is_empty() {
        let message = results.message.as_deref().unwrap_or("No results yet");
        println!("{}", message.yellow());
        return Ok(());
    }

    println!("{}", format!("{} result(s)", results.count).bold());
    if let Some(last_update) = &results.last_update {
        println!("Updated: {}", last_update.dimmed());
    }
    println!();

    println!(
        "  {}",
        format_row("IP", "Speed (MB/s)", "Latency", "Loss", "Region").bold()
    );
    for row in &results.data {
        println!("  {}", format_result(row));
    }

    Ok(())
}

fn format_result(row: &ResultRow) -> String {
    format_row(
        &row.address,
        &row.throughput,
        &row.latency,
        &row.loss_rate,
        &row.region_code,
    )
}

fn format_row(ip: &str, speed: &str, latency: &str, loss: &str, region: &str) -> String {
    format!("{:<40} {:>12} {:>10} {:>8} {:<6}", ip, speed, latency, loss, region)
}
