//! Local copy of uploaded-document metadata.
//!
//! Some uploads are not listed by the server yet, so their metadata is kept in
//! `localStorage` and merged into the list. The server list always wins.

use contracts::domain::a005_document::DocumentMeta;

pub const CACHE_KEY: &str = "documentCache";

/// Corrupt data is logged and treated as an empty cache
pub fn parse_cache(raw: &str) -> Vec<DocumentMeta> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<DocumentMeta>>(raw) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Ignoring corrupt {}: {}", CACHE_KEY, e);
            Vec::new()
        }
    }
}

/// Server entries first, then cached entries the server does not return
pub fn merge_cached(server: Vec<DocumentMeta>, cached: &[DocumentMeta]) -> Vec<DocumentMeta> {
    let mut merged = server;
    let extra: Vec<DocumentMeta> = cached
        .iter()
        .filter(|c| !merged.iter().any(|s| s.id == c.id))
        .cloned()
        .collect();
    merged.extend(extra);
    merged
}

/// Adds or replaces an entry by id
pub fn remember(cache: &mut Vec<DocumentMeta>, doc: DocumentMeta) {
    match cache.iter_mut().find(|c| c.id == doc.id) {
        Some(existing) => *existing = doc,
        None => cache.push(doc),
    }
}

pub fn forget(cache: &mut Vec<DocumentMeta>, id: &str) -> bool {
    let before = cache.len();
    cache.retain(|c| c.id != id);
    cache.len() != before
}

/// Drops entries the server already knows about
pub fn prune(cache: &mut Vec<DocumentMeta>, server: &[DocumentMeta]) -> bool {
    let before = cache.len();
    cache.retain(|c| !server.iter().any(|s| s.id == c.id));
    cache.len() != before
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn load() -> Vec<DocumentMeta> {
    storage()
        .and_then(|s| s.get_item(CACHE_KEY).ok().flatten())
        .map(|raw| parse_cache(&raw))
        .unwrap_or_default()
}

pub fn save(cache: &[DocumentMeta]) {
    let Some(storage) = storage() else {
        return;
    };
    let result = if cache.is_empty() {
        storage.remove_item(CACHE_KEY)
    } else {
        match serde_json::to_string(cache) {
            Ok(raw) => storage.set_item(CACHE_KEY, &raw),
            Err(e) => {
                log::warn!("Failed to serialize {}: {}", CACHE_KEY, e);
                return;
            }
        }
    };
    if result.is_err() {
        log::warn!("Failed to write {}", CACHE_KEY);
    }
}

/// Applies `edit` to the stored cache and writes it back when it changed
pub fn update(edit: impl FnOnce(&mut Vec<DocumentMeta>) -> bool) {
    let mut cache = load();
    if edit(&mut cache) {
        save(&cache);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, name: &str) -> DocumentMeta {
        DocumentMeta {
            id: id.to_string(),
            name: name.to_string(),
            file_url: None,
            mime_type: None,
            size: None,
            buyer_id: None,
            uploaded_at: None,
        }
    }

    #[test]
    fn corrupt_cache_reads_as_empty() {
        assert!(parse_cache("{not json").is_empty());
        assert!(parse_cache("").is_empty());
        assert_eq!(parse_cache(r#"[{"_id":"d1","name":"Contract.pdf"}]"#)[0].id, "d1");
    }

    #[test]
    fn server_entries_win_over_cached_ones() {
        let server = vec![doc("1", "server copy")];
        let cached = vec![doc("1", "stale copy"), doc("2", "pending")];
        let merged = merge_cached(server, &cached);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name, "server copy");
        assert_eq!(merged[1].id, "2");
    }

    #[test]
    fn remember_replaces_by_id() {
        let mut cache = vec![doc("1", "old")];
        remember(&mut cache, doc("1", "new"));
        remember(&mut cache, doc("2", "other"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache[0].name, "new");
    }

    #[test]
    fn prune_and_forget_report_changes() {
        let mut cache = vec![doc("1", "a"), doc("2", "b")];
        assert!(prune(&mut cache, &[doc("1", "a")]));
        assert!(!prune(&mut cache, &[doc("1", "a")]));
        assert!(forget(&mut cache, "2"));
        assert!(!forget(&mut cache, "2"));
        assert!(cache.is_empty());
    }
}
