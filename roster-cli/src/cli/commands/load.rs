//! `load` — run a load cycle and print the dashboard summary

use anyhow::Result;
use colored::*;

use super::Ctx;
use crate::filter::distinct_values;
use crate::pipeline::load_snapshot;
use crate::types::Severity;

pub async fn handle(ctx: &Ctx) -> Result<()> {
    let snapshot = load_snapshot(&ctx.config, &ctx.store, ctx.today).await?;

    println!(
        "Veri Kaynağı: Excel | Son Güncelleme: {}",
        snapshot
            .loaded_at
            .format("%d.%m.%Y %H:%M:%S")
            .to_string()
            .dimmed()
    );
    println!();

    let metrics = &snapshot.metrics;
    println!("{}", "KPI".bold());
    println!("  Toplam Personel:   {}", metrics.total_inventory);
    println!("  Takip Kayıtları:   {}", metrics.total_process);
    println!("  İzin Kayıtları:    {}", snapshot.leave.len());
    println!("  Ayrılan Personel:  {}", snapshot.departures.len());
    if let Some(max) = &metrics.max_category {
        println!("  En Büyük Kategori: {} ({})", max.name, max.count);
    }

    if !metrics.category_counts.is_empty() {
        println!();
        println!("{}", "Kategoriler".bold());
        for category in &metrics.category_order {
            println!("  {:<12} {}", category, metrics.category_counts[category]);
        }
    }

    if !metrics.focus_roles.is_empty() {
        println!();
        println!("{}", format!("{} Rolleri", ctx.config.focus_category).bold());
        let mut roles: Vec<_> = metrics.focus_roles.iter().collect();
        roles.sort_by(|a, b| a.0.cmp(b.0));
        for (role, count) in roles {
            println!("  {:<12} {}", role, count);
        }
    }

    if !metrics.status_breakdown.is_empty() {
        println!();
        println!("{}", "Süreç Durumları".bold());
        let mut statuses: Vec<_> = metrics.status_breakdown.iter().collect();
        statuses.sort_by(|a, b| a.0.cmp(b.0));
        for (status, count) in statuses {
            println!("  {:<24} {}", status, count);
        }
    }

    let tags = distinct_values(&snapshot.inventory, |r| r.record.tag.clone());
    let references = distinct_values(&snapshot.process, |r| {
        r.merged.record.reference.to_string()
    });
    if !tags.is_empty() {
        println!();
        println!("{} {}", "Etiketler:".bold(), tags.join(", "));
    }
    if !references.is_empty() {
        println!("{} {}", "Sorumlular:".bold(), references.join(", "));
    }

    println!();
    println!("{}", "Veri Kalitesi".bold());
    for note in &snapshot.quality {
        let badge = match note.severity {
            Severity::Ok => "  ok  ".green(),
            Severity::Warn => " warn ".yellow(),
            Severity::Fail => " fail ".red(),
        };
        println!("  [{}] {}: {}", badge, note.label.bold(), note.message);
    }

    let modified = snapshot.inventory.iter().filter(|r| r.modified).count()
        + snapshot.process.iter().filter(|r| r.merged.modified).count()
        + snapshot.leave.iter().filter(|r| r.modified).count()
        + snapshot.departures.iter().filter(|r| r.modified).count();
    if modified > 0 {
        println!();
        println!("{}", format!("{} kayıt manuel düzenleme içeriyor.", modified).cyan());
    }

    Ok(())
}
