use rustyline::history::DefaultHistory;
use rustyline::{Editor, Helper};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const HISTORY_FILE: &str = ".jsonrpc_history";

/// `$HOME/.jsonrpc_history`, or the platform home directory when `HOME` is unset.
pub fn default_path() -> Option<PathBuf> {
    path_from_home(std::env::var_os("HOME"))
}

fn path_from_home(home: Option<OsString>) -> Option<PathBuf> {
    home.filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .map(|home| home.join(HISTORY_FILE))
}

/// Missing or unreadable history is not an error.
pub fn load<H: Helper>(editor: &mut Editor<H, DefaultHistory>, path: &Path) {
    match editor.load_history(path) {
        Ok(()) => debug!("loaded history from {}", path.display()),
        Err(e) => debug!("no history loaded from {}: {}", path.display(), e),
    }
}

pub fn save<H: Helper>(editor: &mut Editor<H, DefaultHistory>, path: &Path) {
    if let Err(e) = editor.save_history(path) {
        warn!("failed to write history to {}: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interactive::completion::{MethodCatalog, MethodCompleter};
    use crate::interactive::{line_editor, LineSource};
    use rustyline::history::History;

    fn editor() -> Editor<MethodCompleter, DefaultHistory> {
        line_editor(MethodCatalog::new(Vec::new())).unwrap()
    }

    #[test]
    fn test_path_from_home() {
        assert_eq!(
            path_from_home(Some(OsString::from("/home/u"))),
            Some(PathBuf::from("/home/u/.jsonrpc_history"))
        );
        let fallback = dirs::home_dir().map(|h| h.join(HISTORY_FILE));
        assert_eq!(path_from_home(Some(OsString::new())), fallback);
        assert_eq!(path_from_home(None), fallback);
    }

    #[test]
    fn test_load_missing_file_leaves_history_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut ed = editor();
        load(&mut ed, &dir.path().join(HISTORY_FILE));
        assert_eq!(ed.history().len(), 0);
    }

    #[test]
    fn test_save_then_load_restores_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(HISTORY_FILE);

        let mut ed = editor();
        ed.remember("add(1, 2)");
        ed.remember("help add");
        save(&mut ed, &path);
        assert!(path.exists());

        let mut fresh = editor();
        load(&mut fresh, &path);
        let entries: Vec<&str> = fresh.history().iter().map(String::as_str).collect();
        assert_eq!(entries, ["add(1, 2)", "help add"]);
    }

    #[test]
    fn test_save_to_unwritable_path_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(HISTORY_FILE);

        let mut ed = editor();
        ed.remember("add(1)");
        save(&mut ed, &path);
        assert!(!path.exists());
    }
}
