// src/registry.rs
//
// Account registry (`id|display name` per line) plus optional employee
// groupings (`group name|id,id,...`). Both live in one `Registry` value that
// the front end owns and replaces wholesale on reload.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::config::consts::{GROUPS_FILE, REGISTRY_FILE, UNASSIGNED_GROUP};
use crate::error::ConfigError;
use crate::model::AccountRecord;

/// Where the registry files live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryPaths {
    pub accounts: PathBuf,
    /// Missing groups file means "no groups", not an error.
    pub groups: PathBuf,
}

impl Default for RegistryPaths {
    fn default() -> Self {
        Self { accounts: PathBuf::from(REGISTRY_FILE), groups: PathBuf::from(GROUPS_FILE) }
    }
}

impl RegistryPaths {
    /// Both default file names, resolved inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self { accounts: dir.join(REGISTRY_FILE), groups: dir.join(GROUPS_FILE) }
    }
}

/// Which accounts a run covers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    All,
    Ids(Vec<u32>),
    Group(String),
}

#[derive(Clone, Debug, Default)]
pub struct Registry {
    paths: Option<RegistryPaths>,
    accounts: IndexMap<u32, String>,
    groups: Vec<(String, Vec<u32>)>,
}

impl Registry {
    pub fn load(paths: RegistryPaths) -> Result<Self, ConfigError> {
        let accounts = load_accounts(&paths.accounts)?;
        let groups = load_groups(&paths.groups)?;
        logf!("Registry: {} accounts, {} groups", accounts.len(), groups.len());
        Ok(Self { paths: Some(paths), accounts, groups })
    }

    /// Build from already-parsed text. Used by tests and embedders.
    pub fn from_text(accounts: &str, groups: &str) -> Self {
        Self { paths: None, accounts: parse_accounts(accounts), groups: parse_groups(groups) }
    }

    /// Re-read both files. On failure the current contents stay untouched.
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        let Some(paths) = self.paths.clone() else {
            return Ok(());
        };
        match Self::load(paths) {
            Ok(fresh) => {
                *self = fresh;
                Ok(())
            }
            Err(e) => {
                logw!("Registry reload failed, keeping previous contents: {e}");
                Err(e)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// All accounts, in file order.
    pub fn accounts(&self) -> Vec<AccountRecord> {
        self.accounts.iter().map(|(id, name)| AccountRecord::new(*id, name.clone())).collect()
    }

    pub fn get(&self, id: u32) -> Option<AccountRecord> {
        self.accounts.get(&id).map(|name| AccountRecord::new(id, name.clone()))
    }

    pub fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// First group (file order) listing `id`, else `Unassigned`.
    pub fn group_of(&self, id: u32) -> &str {
        self.groups
            .iter()
            .find(|(_, ids)| ids.contains(&id))
            .map(|(name, _)| name.as_str())
            .unwrap_or(UNASSIGNED_GROUP)
    }

    /// Resolve a selection to registry records, in file order.
    ///
    /// Unknown ids are dropped with a warning. `name_filter` narrows by a
    /// case-insensitive substring of the display name; empty means no filter.
    pub fn select(&self, selection: &Selection, name_filter: Option<&str>) -> Vec<AccountRecord> {
        let needle = name_filter.map(|f| f.trim().to_lowercase()).filter(|f| !f.is_empty());
        let keep = |id: &u32, name: &String| -> bool {
            let in_sel = match selection {
                Selection::All => true,
                Selection::Ids(ids) => ids.contains(id),
                Selection::Group(g) if g.eq_ignore_ascii_case(UNASSIGNED_GROUP) => {
                    self.group_of(*id) == UNASSIGNED_GROUP
                }
                Selection::Group(g) => {
                    self.groups.iter().any(|(n, ids)| n.eq_ignore_ascii_case(g) && ids.contains(id))
                }
            };
            in_sel && needle.as_ref().is_none_or(|n| name.to_lowercase().contains(n))
        };

        if let Selection::Ids(ids) = selection {
            for id in ids.iter().filter(|id| !self.accounts.contains_key(*id)) {
                logw!("Selection: unknown account id {id}");
            }
        }

        self.accounts
            .iter()
            .filter(|(id, name)| keep(*id, *name))
            .map(|(id, name)| AccountRecord::new(*id, name.clone()))
            .collect()
    }
}

fn load_accounts(path: &Path) -> Result<IndexMap<u32, String>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::Missing(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    let accounts = parse_accounts(&text);
    if accounts.is_empty() {
        return Err(ConfigError::Empty(path.to_path_buf()));
    }
    Ok(accounts)
}

fn load_groups(path: &Path) -> Result<Vec<(String, Vec<u32>)>, ConfigError> {
    if !path.exists() {
        logd!("No groups file at {}", path.display());
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    Ok(parse_groups(&text))
}

/// `id|name` per line. The name keeps any further `|` (aliases).
/// A repeated id keeps its first position and takes the later name.
pub fn parse_accounts(text: &str) -> IndexMap<u32, String> {
    let mut out = IndexMap::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((id, name)) = line.split_once('|') else {
            logd!("Registry line {}: no separator, skipped", n + 1);
            continue;
        };
        let (Ok(id), name) = (id.trim().parse::<u32>(), name.trim()) else {
            logd!("Registry line {}: bad id, skipped", n + 1);
            continue;
        };
        if name.is_empty() {
            continue;
        }
        if out.insert(id, s!(name)).is_some() {
            logw!("Registry: duplicate id {id}, later line wins");
        }
    }
    out
}

/// `group|id,id,...` per line. Unparseable ids are skipped.
pub fn parse_groups(text: &str) -> Vec<(String, Vec<u32>)> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter_map(|l| l.split_once('|'))
        .map(|(name, ids)| {
            let ids = ids.split(',').filter_map(|p| p.trim().parse::<u32>().ok()).collect();
            (s!(name.trim()), ids)
        })
        .filter(|(name, _)| !name.is_empty())
        .collect()
}
