//! `departures` — month-by-month departure breakdown

use anyhow::Result;
use colored::*;

use super::Ctx;
use crate::pipeline::load_snapshot;

pub async fn handle(ctx: &Ctx) -> Result<()> {
    let snapshot = load_snapshot(&ctx.config, &ctx.store, ctx.today).await?;
    let stats = &snapshot.departure_stats;

    println!("{}", "Ayrılan Personel".bold());
    println!("  Toplam: {}", stats.total);
    if stats.peak_count > 0 {
        println!("  Zirve Ay: {} ({})", stats.peak_month.bold(), stats.peak_count);
    }
    println!();

    for (month, count) in &stats.by_month {
        let bar = "█".repeat(*count);
        println!("  {:<10} {:>3}  {}", month, count, bar.cyan());
    }

    let undetermined = stats.total - stats.by_month.iter().map(|(_, c)| c).sum::<usize>();
    if undetermined > 0 {
        println!();
        println!(
            "  {} kayıtta çıkış tarihi çözümlenemedi (BELİRSİZ).",
            undetermined.to_string().yellow()
        );
    }

    Ok(())
}
