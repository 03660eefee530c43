use crate::IdGenerator;
use crate::IndexError;
use crate::UuidGenerator;
use crate::model::ElementKey;
use crate::model::IndexElement;
use mediadir_config::is_well_known_id;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::HashSet;
use std::collections::VecDeque;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use tracing::warn;

/// Shared handle on the id ↔ element registry. Cloning is cheap and every
/// clone sees the same entries.
///
/// Reads run in parallel; every mutation takes the write lock so `add` can
/// never interleave with the removal phase of [`MediaIndex::clean`].
#[derive(Clone)]
pub struct MediaIndex {
    inner: Arc<Inner>,
}

struct Inner {
    entries: RwLock<Entries>,
    ids: Arc<dyn IdGenerator>,
}

#[derive(Default)]
struct Entries {
    by_id: HashMap<String, IndexElement>,
    by_key: HashMap<ElementKey, String>,
}

/// Outcome of one sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Entries whose parent chain no longer reaches a locked or root entry.
    pub orphaned: usize,
    /// Local entries whose backing path is gone.
    pub missing: usize,
}

impl CleanReport {
    pub fn removed(&self) -> usize {
        self.orphaned + self.missing
    }
}

impl Default for MediaIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MediaIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaIndex")
            .field("entries", &self.len())
            .finish()
    }
}

impl MediaIndex {
    pub fn new() -> Self {
        Self::with_id_generator(Arc::new(UuidGenerator))
    }

    pub fn with_id_generator(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: RwLock::new(Entries::default()),
                ids,
            }),
        }
    }

    pub fn get(&self, id: &str) -> Option<IndexElement> {
        self.inner.entries.read().by_id.get(id).cloned()
    }

    pub fn lookup(&self, id: &str) -> Result<IndexElement, IndexError> {
        self.get(id)
            .ok_or_else(|| IndexError::UnknownNode(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.entries.read().by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.inner.entries.read().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of every entry, ordered by id.
    pub fn entries(&self) -> Vec<(String, IndexElement)> {
        let entries = self.inner.entries.read();
        let ordered: BTreeMap<&String, &IndexElement> = entries.by_id.iter().collect();
        ordered
            .into_iter()
            .map(|(id, element)| (id.clone(), element.clone()))
            .collect()
    }

    /// Returns the id of the structurally equal element when there is one,
    /// otherwise registers `element` under a fresh id.
    pub fn add(&self, element: IndexElement) -> String {
        let key = element.key();
        {
            let entries = self.inner.entries.read();
            if let Some(id) = entries.by_key.get(&key) {
                return id.clone();
            }
        }

        let mut entries = self.inner.entries.write();
        // Another writer may have registered the same node since the read.
        if let Some(id) = entries.by_key.get(&key) {
            return id.clone();
        }
        let id = self.fresh_id(&entries);
        debug!("add entry {element} to media index as {id}");
        entries.insert(id.clone(), element);
        id
    }

    /// Registers `element` under a caller-owned id. Never overwrites: returns
    /// false and leaves the registry untouched when `id` is already present.
    pub fn put(&self, id: &str, element: IndexElement) -> bool {
        self.inner.entries.write().put(id, element)
    }

    /// Swaps whatever is registered under `id` for `element` under a single
    /// write lock. With `cascade`, every descendant of `id` is dropped too.
    /// Returns the number of removed descendants.
    pub fn replace(&self, id: &str, element: IndexElement, cascade: bool) -> usize {
        let mut entries = self.inner.entries.write();
        if let Some(previous) = entries.remove(id) {
            debug!("replace entry {previous} with {element}");
        }
        let removed = if cascade {
            entries.remove_descendants(id)
        } else {
            0
        };
        entries.put(id, element);
        removed
    }

    pub fn remove(&self, id: &str) -> Option<IndexElement> {
        let removed = self.inner.entries.write().remove(id);
        if let Some(element) = &removed {
            debug!("remove entry {element} from media index");
        }
        removed
    }

    /// Removes every descendant of `id`, leaving `id` itself in place.
    /// Returns the number of removed entries.
    pub fn remove_children(&self, id: &str) -> usize {
        self.inner.entries.write().remove_descendants(id)
    }

    /// Drops unlocked entries that are orphaned or whose local path is gone.
    ///
    /// Paths are checked without holding the lock; the removal set is then
    /// recomputed under the write lock against the current entries.
    pub fn clean(&self) -> CleanReport {
        let candidates: Vec<(String, IndexElement)> = {
            let entries = self.inner.entries.read();
            entries
                .by_id
                .iter()
                .filter(|(_, element)| !element.locked && element.local_path)
                .map(|(id, element)| (id.clone(), element.clone()))
                .collect()
        };
        let gone: Vec<(String, IndexElement)> = candidates
            .into_iter()
            .filter(|(_, element)| path_is_missing(&element.path))
            .collect();

        let mut entries = self.inner.entries.write();
        let missing: HashSet<String> = gone
            .into_iter()
            .filter(|(id, element)| entries.by_id.get(id) == Some(element))
            .map(|(id, _)| id)
            .collect();
        let reachable = entries.reachable(&missing);
        let doomed: Vec<String> = entries
            .by_id
            .iter()
            .filter(|(id, element)| !element.locked && !reachable.contains(id.as_str()))
            .map(|(id, _)| id.clone())
            .collect();

        let mut report = CleanReport::default();
        for id in doomed {
            let Some(element) = entries.remove(&id) else {
                continue;
            };
            if missing.contains(&id) {
                report.missing += 1;
                debug!("remove entry {element} from media index (path does not exist)");
            } else {
                report.orphaned += 1;
                debug!("remove entry {element} from media index (invalid parent id)");
            }
        }
        report
    }

    fn fresh_id(&self, entries: &Entries) -> String {
        loop {
            let id = self.inner.ids.next_id();
            if !entries.by_id.contains_key(&id) && !is_well_known_id(&id) {
                return id;
            }
            warn!("id generator returned a used id {id}; retrying");
        }
    }
}

impl Entries {
    fn insert(&mut self, id: String, element: IndexElement) {
        self.by_key.insert(element.key(), id.clone());
        self.by_id.insert(id, element);
    }

    fn remove(&mut self, id: &str) -> Option<IndexElement> {
        let element = self.by_id.remove(id)?;
        let key = element.key();
        if self.by_key.get(&key).is_some_and(|owner| owner == id) {
            self.by_key.remove(&key);
        }
        Some(element)
    }

    fn put(&mut self, id: &str, element: IndexElement) -> bool {
        if self.by_id.contains_key(id) {
            return false;
        }
        if let Some(previous) = self.by_key.get(&element.key()).cloned() {
            // Keep the mapping one-to-one; the caller-owned id wins.
            debug!("rebind entry {element} from {previous} to {id}");
            self.remove(&previous);
        }
        self.insert(id.to_string(), element);
        true
    }

    fn remove_descendants(&mut self, id: &str) -> usize {
        let descendants = self.descendants(id);
        for child in &descendants {
            if let Some(element) = self.remove(child) {
                debug!("remove child entry {element} from media index");
            }
        }
        descendants.len()
    }

    fn children_by_parent(&self) -> HashMap<&str, Vec<&str>> {
        let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
        for (id, element) in &self.by_id {
            children
                .entry(element.parent_id.as_str())
                .or_default()
                .push(id.as_str());
        }
        children
    }

    /// Ids reachable from `start` through child links, `start` excluded.
    fn descendants(&self, start: &str) -> Vec<String> {
        let children = self.children_by_parent();
        let mut seen: HashSet<&str> = HashSet::from([start]);
        let mut queue: VecDeque<&str> = VecDeque::from([start]);
        let mut found = Vec::new();
        while let Some(current) = queue.pop_front() {
            for &child in children.get(current).into_iter().flatten() {
                if seen.insert(child) {
                    found.push(child.to_string());
                    queue.push_back(child);
                }
            }
        }
        found
    }

    /// Ids whose parent chain ends at a locked entry or a well-known root id.
    /// Entries in `excluded` are treated as absent, cutting off their subtree.
    fn reachable(&self, excluded: &HashSet<String>) -> HashSet<String> {
        let children = self.children_by_parent();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        for (id, element) in &self.by_id {
            if element.locked && seen.insert(id.as_str()) {
                queue.push_back(id.as_str());
            }
        }
        for &parent in children.keys() {
            if is_well_known_id(parent) && seen.insert(parent) {
                queue.push_back(parent);
            }
        }
        while let Some(current) = queue.pop_front() {
            for &child in children.get(current).into_iter().flatten() {
                if !excluded.contains(child) && seen.insert(child) {
                    queue.push_back(child);
                }
            }
        }
        seen.into_iter().map(str::to_string).collect()
    }
}

fn path_is_missing(path: &str) -> bool {
    match Path::new(path).try_exists() {
        Ok(exists) => !exists,
        Err(err) => {
            warn!("cannot check {path}: {err}; keeping index entry");
            false
        }
    }
}
