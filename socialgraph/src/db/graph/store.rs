//! Named graph snapshots shared across readers.
//!
//! The store never mutates a snapshot in place. Loading or reloading a dataset builds a complete
//! new [`GraphSnapshot`] outside the lock and then swaps the `Arc` in one step, so a reader holds
//! either the old graph or the new one, never a mix.

use crate::{
    core::utils::errors::{GraphError, GraphResult},
    db::graph::snapshot::GraphSnapshot,
    graph_loader::GraphFormat,
};
use parking_lot::RwLock;
use std::{collections::HashMap, fs, path::Path, sync::Arc};
use tracing::{info, warn};
use walkdir::WalkDir;

#[derive(Clone, Default)]
pub struct GraphStore {
    graphs: Arc<RwLock<HashMap<String, Arc<GraphSnapshot>>>>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every `*.json` snapshot below `directory_path`, keyed by file stem. Files that fail
    /// to load are logged and skipped.
    pub fn load_from_directory<P: AsRef<Path>>(directory_path: P) -> GraphResult<Self> {
        let directory_path = directory_path.as_ref();
        if !directory_path.is_dir() {
            return Err(GraphError::Validation(format!(
                "{} is not a directory",
                directory_path.display()
            )));
        }
        let store = Self::new();
        for entry in WalkDir::new(directory_path)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            let is_snapshot = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if !is_snapshot || name.starts_with('.') {
                continue;
            }
            match GraphSnapshot::load_from_file(path) {
                Ok(snapshot) => {
                    store.insert(name, snapshot);
                }
                Err(err) => warn!("Skipping {}: {err}", path.display()),
            }
        }
        Ok(store)
    }

    /// Writes every graph to `directory_path` as `<name>.json`.
    pub fn save_to_directory<P: AsRef<Path>>(&self, directory_path: P) -> GraphResult<()> {
        let directory_path = directory_path.as_ref();
        fs::create_dir_all(directory_path)?;
        for (name, snapshot) in self.graphs.read().iter() {
            snapshot.save_to_file(directory_path.join(format!("{name}.json")))?;
        }
        Ok(())
    }

    /// Installs `snapshot` under `name`, returning the one it replaced.
    pub fn insert(&self, name: &str, snapshot: GraphSnapshot) -> Option<Arc<GraphSnapshot>> {
        let snapshot = Arc::new(snapshot);
        info!(
            "Installing graph {name}: {} nodes, {} edges",
            snapshot.num_nodes(),
            snapshot.num_edges()
        );
        self.graphs.write().insert(name.to_string(), snapshot)
    }

    /// Parses `raw` and replaces the graph under `name`. On failure the old graph stays.
    pub fn reload(
        &self,
        name: &str,
        raw: &[u8],
        format: GraphFormat,
    ) -> GraphResult<Arc<GraphSnapshot>> {
        let snapshot = GraphSnapshot::load(raw, format)?;
        let config = self.graphs.read().get(name).map(|old| *old.config());
        let snapshot = match config {
            Some(config) => snapshot.with_config(config),
            None => snapshot,
        };
        self.insert(name, snapshot);
        self.get(name)
    }

    pub fn get(&self, name: &str) -> GraphResult<Arc<GraphSnapshot>> {
        self.graphs
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| GraphError::GraphNotFound(name.to_string()))
    }

    pub fn remove(&self, name: &str) -> Option<Arc<GraphSnapshot>> {
        self.graphs.write().remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.graphs.read().contains_key(name)
    }

    /// Dataset names in alphabetical order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.graphs.read().keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod store_test {
    use super::*;
    use crate::config::AnalyticsConfig;
    use std::thread;

    #[test]
    fn reload_swaps_the_whole_graph() {
        let store = GraphStore::new();
        store.reload("facebook", b"0 1\n1 2", GraphFormat::EdgeList).unwrap();
        let before = store.get("facebook").unwrap();

        store.reload("facebook", b"5 6", GraphFormat::EdgeList).unwrap();
        let after = store.get("facebook").unwrap();

        // readers holding the old snapshot keep a consistent view
        assert_eq!(before.num_nodes(), 3);
        assert_eq!(before.num_edges(), 2);
        assert_eq!(after.num_nodes(), 2);
        assert_eq!(after.num_edges(), 1);
    }

    #[test]
    fn failed_reload_keeps_the_old_graph() {
        let store = GraphStore::new();
        store.reload("g", b"0 1", GraphFormat::EdgeList).unwrap();
        let err = store.reload("g", b"# nothing", GraphFormat::EdgeList).unwrap_err();
        assert!(matches!(err, GraphError::Parse(_)));
        assert_eq!(store.get("g").unwrap().num_edges(), 1);
    }

    #[test]
    fn reload_keeps_the_config() {
        let store = GraphStore::new();
        let config = AnalyticsConfig {
            neighbor_list_cap: 3,
            ..AnalyticsConfig::default()
        };
        let snapshot = GraphSnapshot::load(b"0 1", GraphFormat::EdgeList)
            .unwrap()
            .with_config(config);
        store.insert("g", snapshot);
        let reloaded = store.reload("g", b"0 2", GraphFormat::EdgeList).unwrap();
        assert_eq!(*reloaded.config(), config);
    }

    #[test]
    fn missing_graph() {
        let store = GraphStore::new();
        assert!(matches!(store.get("nope"), Err(GraphError::GraphNotFound(_))));
        assert!(!store.contains("nope"));

        store.reload("g", b"0 1", GraphFormat::EdgeList).unwrap();
        assert!(store.remove("g").is_some());
        assert!(store.remove("g").is_none());
        assert!(store.names().is_empty());
    }

    #[test]
    fn concurrent_readers_see_whole_snapshots() {
        let store = GraphStore::new();
        store.reload("g", b"0 1\n1 2\n2 0", GraphFormat::EdgeList).unwrap();
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        let g = store.get("g").unwrap();
                        assert_eq!(g.degrees().total(), 2 * g.num_edges());
                    }
                })
            })
            .collect();
        for i in 0..20 {
            let raw = format!("0 1\n1 {}", i + 2);
            store.reload("g", raw.as_bytes(), GraphFormat::EdgeList).unwrap();
        }
        for reader in readers {
            reader.join().unwrap();
        }
    }

    #[test]
    fn directory_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = GraphStore::new();
        store.reload("alpha", b"0 1\n1 2", GraphFormat::EdgeList).unwrap();
        store.reload("beta", b"source,target\n10,20", GraphFormat::Csv).unwrap();
        store.save_to_directory(dir.path()).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a graph").unwrap();
        fs::write(dir.path().join("broken.json"), "{").unwrap();

        let loaded = GraphStore::load_from_directory(dir.path()).unwrap();
        assert_eq!(loaded.names(), vec!["alpha".to_string(), "beta".to_string()]);
        assert_eq!(loaded.get("alpha").unwrap().num_edges(), 2);
        assert_eq!(loaded.get("beta").unwrap().nodes()[0].id, 10);
    }
}
