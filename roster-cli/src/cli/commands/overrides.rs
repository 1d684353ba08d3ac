//! `override set` / `override clear` — manage persisted row edits

use anyhow::{Context, Result, bail};
use colored::*;
use dialoguer::Confirm;
use serde_json::{Map, Value};

use super::Ctx;
use crate::overrides::OverrideStore;
use crate::types::Domain;

pub async fn handle_set(ctx: &Ctx, domain: &str, identity: &str, fields: &[String]) -> Result<()> {
    let domain: Domain = domain.parse()?;
    let fields = parse_fields(fields)?;
    let count = fields.len();

    ctx.store.save(domain, identity, fields).await?;

    println!(
        "{} {} alan kaydedildi: {} ({})",
        "Tamam".green(),
        count,
        identity.bold(),
        domain
    );
    println!("Bir sonraki yüklemede uygulanır.");
    Ok(())
}

pub async fn handle_clear(ctx: &Ctx, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Tüm manuel değişiklikler silinecek. Emin misiniz?")
            .default(false)
            .interact()
            .context("Confirmation prompt failed")?;
        if !confirmed {
            println!("Vazgeçildi.");
            return Ok(());
        }
    }

    ctx.store.clear().await?;
    println!("{}", "Tüm değişiklikler sıfırlandı.".green());
    Ok(())
}

/// Parse `field=value` pairs. Values that read as numbers stay numbers so
/// the overlay keeps the scalar kind the extractors produce.
fn parse_fields(pairs: &[String]) -> Result<Map<String, Value>> {
    let mut fields = Map::new();
    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            bail!("Expected field=value, got '{}'", pair);
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("Empty field name in '{}'", pair);
        }
        fields.insert(key.to_string(), parse_value(raw.trim()));
    }
    Ok(fields)
}

fn parse_value(raw: &str) -> Value {
    if raw.is_empty() || raw == "null" {
        return Value::Null;
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::from(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Value::from(f);
    }
    Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_fields() {
        let fields = parse_fields(&[
            "tag=KALIP".to_string(),
            "s_nu=12".to_string(),
            "note=".to_string(),
        ])
        .unwrap();
        assert_eq!(fields["tag"], json!("KALIP"));
        assert_eq!(fields["s_nu"], json!(12));
        assert_eq!(fields["note"], Value::Null);
    }

    #[test]
    fn test_parse_fields_rejects_bare_words() {
        assert!(parse_fields(&["KALIP".to_string()]).is_err());
        assert!(parse_fields(&["=x".to_string()]).is_err());
    }

    #[test]
    fn test_value_with_equals_sign_kept_whole() {
        let fields = parse_fields(&["note=a=b".to_string()]).unwrap();
        assert_eq!(fields["note"], json!("a=b"));
    }
}
