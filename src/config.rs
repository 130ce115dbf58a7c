//! Runtime configuration from the environment

use std::path::PathBuf;

/// Environment variable overriding the database location
pub const DATABASE_PATH_VAR: &str = "LADLE_DATABASE_PATH";

/// Database path from `LADLE_DATABASE_PATH`, or `data/ladle.db` at the project root
pub fn database_path() -> PathBuf {
    std::env::var(DATABASE_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_database_path())
}

fn default_database_path() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut path = project_root(exe_dir);
    path.push("data");
    path.push("ladle.db");
    path
}

/// Step out of `target/release` or `target/debug` to the project root
fn project_root(exe_dir: PathBuf) -> PathBuf {
    if exe_dir.ends_with("release") || exe_dir.ends_with("debug") {
        if let Some(grandparent) = exe_dir.parent().and_then(|p| p.parent()) {
            return grandparent.to_path_buf();
        }
    }
    exe_dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_root_from_target_dir() {
        assert_eq!(
            project_root(PathBuf::from("/home/cook/ladle/target/release")),
            PathBuf::from("/home/cook/ladle")
        );
        assert_eq!(
            project_root(PathBuf::from("/home/cook/ladle/target/debug")),
            PathBuf::from("/home/cook/ladle")
        );
    }

    #[test]
    fn test_project_root_elsewhere() {
        assert_eq!(
            project_root(PathBuf::from("/usr/local/bin")),
            PathBuf::from("/usr/local/bin")
        );
    }

    #[test]
    fn test_default_path_file_name() {
        assert!(default_database_path().ends_with("data/ladle.db"));
    }
}
