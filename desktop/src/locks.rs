//! Lock files other processes drop to take over the buttons or the panel.

use std::fs;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Locks {
    pub buttons: bool,
    pub display: bool,
}

fn is_lock(name: &str, kind: &str) -> bool {
    name.ends_with(".lock") && name.contains(kind)
}

/// Lists `dir` for `*-buttons-*.lock` and `*-display-*.lock` files. A
/// directory that cannot be read holds no locks.
pub fn scan(dir: &Path) -> Locks {
    let mut locks = Locks::default();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::debug!("Cannot read lock dir {}: {}", dir.display(), err);
            return locks;
        }
    };
    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        locks.buttons |= is_lock(&name, "-buttons-");
        locks.display |= is_lock(&name, "-display-");
    }
    locks
}
