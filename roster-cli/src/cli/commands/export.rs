//! `export` — write filtered merged records as CSV

use anyhow::Result;
use colored::*;

use super::Ctx;
use crate::cli::ExportArgs;
use crate::export::export_csv_file;
use crate::filter::{InventoryFilter, ProcessFilter};
use crate::pipeline::load_snapshot;
use crate::types::{Domain, Merged};

pub async fn handle(ctx: &Ctx, args: &ExportArgs) -> Result<()> {
    let domain: Domain = args.domain.parse()?;
    let snapshot = load_snapshot(&ctx.config, &ctx.store, ctx.today).await?;

    let count = match domain {
        Domain::Inventory => {
            let filter = InventoryFilter {
                search: args.search.clone(),
                category: args.category.clone(),
                tag: args.tag.clone(),
            };
            let rows: Vec<_> = filter.apply(&snapshot.inventory).into_iter().cloned().collect();
            export_csv_file(&rows, &args.output)?;
            rows.len()
        }
        Domain::Process => {
            let filter = ProcessFilter {
                search: args.search.clone(),
                status: args.status.clone(),
                reference: args.reference.clone(),
                late_only: args.late_only,
            };
            let rows: Vec<_> = filter.apply(&snapshot.process).into_iter().cloned().collect();
            export_csv_file(&rows, &args.output)?;
            rows.len()
        }
        Domain::Leave => {
            let rows = search_by_name(&snapshot.leave, &args.search, |r| &r.record.full_name);
            export_csv_file(&rows, &args.output)?;
            rows.len()
        }
        Domain::Departure => {
            let rows = search_by_name(&snapshot.departures, &args.search, |r| &r.record.full_name);
            export_csv_file(&rows, &args.output)?;
            rows.len()
        }
    };

    println!(
        "{} {} kayıt: {}",
        "Dışa aktarıldı".green(),
        count,
        args.output.display()
    );
    Ok(())
}

fn search_by_name<T: Clone>(
    rows: &[Merged<T>],
    search: &str,
    name_of: impl Fn(&Merged<T>) -> &String,
) -> Vec<Merged<T>> {
    let needle = search.to_lowercase();
    rows.iter()
        .filter(|r| needle.is_empty() || name_of(r).to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
