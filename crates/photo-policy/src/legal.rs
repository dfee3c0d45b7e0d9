use crate::schema::{LegalRef, PolicyConfig};

/// Look up citation entries for the given catalog keys.
///
/// Input order is preserved. Keys missing from the catalog are skipped.
pub fn resolve_legal_refs<'a>(
    config: &'a PolicyConfig,
    keys: Option<&[String]>,
) -> Vec<&'a LegalRef> {
    let catalog = &config.legal_ref_catalog;
    let keys = keys.unwrap_or_default();
    keys.iter().filter_map(|key| catalog.get(key)).collect()
}
