//! Override-merge: overlay persisted edits onto freshly-extracted records

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::identity::HasIdentity;
use super::store::OverrideMap;
use crate::types::{Domain, Merged};

/// Overlay any stored overrides onto `records`.
///
/// Total and order-preserving: every input record yields exactly one
/// `Merged` in input order. Field overlay is shallow — override values win
/// per field, raw fields without an override pass through, and override
/// fields with no typed counterpart land in the record's extras. Re-running
/// with the same store and input is idempotent.
pub fn merge_with_overrides<T>(
    records: Vec<T>,
    domain: Domain,
    overrides: &OverrideMap,
) -> Result<Vec<Merged<T>>>
where
    T: Serialize + DeserializeOwned + HasIdentity,
{
    let domain_overrides = overrides.get(&domain);
    let mut merged = Vec::with_capacity(records.len());

    for record in records {
        let id = record.identity();
        let record = match domain_overrides.and_then(|m| m.get(&id)) {
            Some(fields) => {
                let overlaid = overlay(&record, fields)
                    .with_context(|| format!("Failed to apply override for {}", id))?;
                Merged {
                    id,
                    modified: true,
                    record: overlaid,
                }
            }
            None => Merged {
                id,
                modified: false,
                record,
            },
        };
        merged.push(record);
    }

    Ok(merged)
}

fn overlay<T>(record: &T, fields: &serde_json::Map<String, Value>) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(record).context("Record is not serializable")?;
    let object = value
        .as_object_mut()
        .context("Record did not serialize to an object")?;
    for (key, field_value) in fields {
        object.insert(key.clone(), field_value.clone());
    }
    serde_json::from_value(value).context("Overlaid record no longer deserializes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InventoryRecord, ProcessRecord, Scalar};
    use serde_json::{Map, json};

    fn inventory(name: &str, category: &str, tag: &str) -> InventoryRecord {
        InventoryRecord {
            full_name: name.into(),
            category: category.into(),
            tag: tag.into(),
            extra: Default::default(),
        }
    }

    fn store_with(domain: Domain, id: &str, pairs: &[(&str, Value)]) -> OverrideMap {
        let fields: Map<String, Value> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        let mut map = OverrideMap::default();
        map.entry(domain).or_default().insert(id.to_string(), fields);
        map
    }

    #[test]
    fn test_overlay_wins_per_field_and_keeps_unknown_fields() {
        let raws = vec![inventory("AHMET YILMAZ", "REPSAM", "USTA")];
        let overrides = store_with(
            Domain::Inventory,
            "AHMET_YILMAZ_REPSAM",
            &[("tag", json!("KALIP")), ("shift", json!(3))],
        );

        let merged = merge_with_overrides(raws, Domain::Inventory, &overrides).unwrap();
        assert_eq!(merged.len(), 1);
        assert!(merged[0].modified);
        assert_eq!(merged[0].record.full_name, "AHMET YILMAZ");
        assert_eq!(merged[0].record.tag, "KALIP");
        assert_eq!(merged[0].record.extra["shift"], json!(3));
    }

    #[test]
    fn test_merge_is_total_and_order_preserving() {
        let raws = vec![
            inventory("A B", "X", ""),
            inventory("C D", "Y", ""),
            inventory("E F", "Z", ""),
        ];
        let overrides = store_with(Domain::Inventory, "C_D_Y", &[("tag", json!("T"))]);

        let merged = merge_with_overrides(raws, Domain::Inventory, &overrides).unwrap();
        assert_eq!(merged.len(), 3);
        assert_eq!(
            merged.iter().map(|m| m.record.full_name.as_str()).collect::<Vec<_>>(),
            ["A B", "C D", "E F"]
        );
        assert_eq!(
            merged.iter().map(|m| m.modified).collect::<Vec<_>>(),
            [false, true, false]
        );
    }

    #[test]
    fn test_merge_idempotent() {
        let overrides = store_with(Domain::Inventory, "A_B_X", &[("tag", json!("T"))]);
        let raws = || vec![inventory("A B", "X", ""), inventory("C D", "Y", "")];

        let once = merge_with_overrides(raws(), Domain::Inventory, &overrides).unwrap();
        // Strip back to raw records and merge again with the same store
        let again = merge_with_overrides(
            once.iter().map(|m| m.record.clone()).collect(),
            Domain::Inventory,
            &overrides,
        )
        .unwrap();
        assert_eq!(once, again);
    }

    #[test]
    fn test_empty_store_marks_nothing_modified() {
        let merged = merge_with_overrides(
            vec![inventory("A B", "X", "")],
            Domain::Inventory,
            &OverrideMap::default(),
        )
        .unwrap();
        assert!(!merged[0].modified);
        assert_eq!(merged[0].id, "A_B_X");
    }

    #[test]
    fn test_override_in_other_domain_does_not_apply() {
        let overrides = store_with(Domain::Process, "A_B_X", &[("tag", json!("T"))]);
        let merged =
            merge_with_overrides(vec![inventory("A B", "X", "")], Domain::Inventory, &overrides)
                .unwrap();
        assert!(!merged[0].modified);
    }

    #[test]
    fn test_process_scalar_field_override() {
        let record = ProcessRecord {
            s_nu: Scalar::Number(3.0),
            full_name: "A B".into(),
            job: Scalar::Null,
            app_no: Scalar::Null,
            status: Scalar::Text("BEKLEMEDE".into()),
            description: Scalar::Null,
            reference: Scalar::Null,
            extra: Default::default(),
        };
        let overrides = store_with(Domain::Process, "3_PROCESS", &[("status", json!("ONAYLANDI"))]);

        let merged = merge_with_overrides(vec![record], Domain::Process, &overrides).unwrap();
        assert!(merged[0].modified);
        assert_eq!(merged[0].record.status, Scalar::Text("ONAYLANDI".into()));
    }
}
