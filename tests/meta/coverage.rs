//! Layout checks: `tests/unit` mirrors the `src` module tree and every mirror is compiled

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::{Path, PathBuf};

    const SRC_ROOT: &str = "src";
    const UNIT_ROOT: &str = "tests/unit";
    const UNIT_HARNESS: &str = "tests/unit.rs";

    // Module files below `root`, relative to it; crate roots and mod.rs only declare modules
    fn module_files(root: &Path) -> BTreeSet<PathBuf> {
        let mut files = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir).expect("readable directory") {
                let path = entry.expect("readable directory entry").path();
                if path.is_dir() {
                    pending.push(path);
                    continue;
                }

                let is_rust = path.extension().is_some_and(|ext| ext == "rs");
                let declares_only = matches!(
                    path.file_name().and_then(|name| name.to_str()),
                    Some("lib.rs" | "main.rs" | "mod.rs")
                );
                if is_rust && !declares_only {
                    let relative = path.strip_prefix(root).expect("entry below its root");
                    files.insert(relative.to_path_buf());
                }
            }
        }

        files
    }

    fn listing<'a>(paths: impl IntoIterator<Item = &'a PathBuf>) -> String {
        paths
            .into_iter()
            .map(|path| format!("  - {}", path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn declares(module_file: &Path, name: &str) -> bool {
        let declaration = format!("mod {name};");
        fs::read_to_string(module_file)
            .is_ok_and(|content| content.lines().any(|line| line.trim() == declaration))
    }

    // Tests each source module has a unit test file at the same relative path
    // Verified by adding a source file without a mirror
    #[test]
    fn test_every_source_module_is_mirrored() {
        let sources = module_files(Path::new(SRC_ROOT));
        let mirrors = module_files(Path::new(UNIT_ROOT));
        assert!(!sources.is_empty(), "no source modules found under {SRC_ROOT}");

        let missing: Vec<_> = sources.difference(&mirrors).collect();
        assert!(
            missing.is_empty(),
            "source modules without a file under {UNIT_ROOT}:\n{}",
            listing(missing)
        );
    }

    // Tests each unit test file still has a source module to cover
    // Verified by renaming a source file
    #[test]
    fn test_every_mirror_has_a_source_module() {
        let sources = module_files(Path::new(SRC_ROOT));
        let mirrors = module_files(Path::new(UNIT_ROOT));

        let orphaned: Vec<_> = mirrors.difference(&sources).collect();
        assert!(
            orphaned.is_empty(),
            "unit test files without a module under {SRC_ROOT}:\n{}",
            listing(orphaned)
        );
    }

    // Tests each mirror and its directories are declared, so cargo compiles them
    // Verified by removing a `mod` line from a mod.rs
    #[test]
    fn test_every_mirror_is_declared() {
        let mut undeclared = BTreeSet::new();

        for relative in module_files(Path::new(UNIT_ROOT)) {
            let names: Vec<String> = relative
                .with_extension("")
                .components()
                .map(|component| component.as_os_str().to_string_lossy().into_owned())
                .collect();

            let mut parent = PathBuf::from(UNIT_ROOT);
            for (depth, name) in names.iter().enumerate() {
                let module_file = if depth == 0 {
                    PathBuf::from(UNIT_HARNESS)
                } else {
                    parent.join("mod.rs")
                };
                if !declares(&module_file, name) {
                    undeclared.insert(relative.clone());
                }
                parent.push(name);
            }
        }

        assert!(
            undeclared.is_empty(),
            "unit test files not reachable from {UNIT_HARNESS}:\n{}",
            listing(&undeclared)
        );
    }

    // Tests each mirror contains at least one test function
    // Verified by emptying a mirror's test module
    #[test]
    fn test_every_mirror_contains_tests() {
        let empty: Vec<_> = module_files(Path::new(UNIT_ROOT))
            .into_iter()
            .filter(|relative| {
                let content = fs::read_to_string(Path::new(UNIT_ROOT).join(relative))
                    .expect("readable unit test file");
                !content.contains("#[test]")
            })
            .collect();

        assert!(
            empty.is_empty(),
            "unit test files without a #[test] function:\n{}",
            listing(&empty)
        );
    }
}
