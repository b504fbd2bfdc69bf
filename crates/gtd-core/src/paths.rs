use std::path::{Path, PathBuf};

pub const GTD_DIR: &str = ".gtd";
pub const CONFIG_FILE: &str = ".gtd/config.yaml";
pub const DEFAULT_DB_FILE: &str = ".gtd/gtd.db";

pub fn gtd_dir(root: &Path) -> PathBuf {
    root.join(GTD_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_hang_off_root() {
        let root = Path::new("/home/me/notes");
        assert_eq!(gtd_dir(root), PathBuf::from("/home/me/notes/.gtd"));
        assert_eq!(
            config_path(root),
            PathBuf::from("/home/me/notes/.gtd/config.yaml")
        );
    }
}
