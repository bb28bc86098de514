use crate::{CONFIG_FILE_NAME, I18nConfig, I18nConfigError};
use std::path::{Path, PathBuf};

/// Emits Cargo rebuild hints for `i18n.toml` and the configured dictionary files.
///
/// Call this from a `build.rs` that embeds dictionaries so that editing a
/// translation triggers a rebuild.
pub fn track_i18n_files() {
    let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") else {
        println!("cargo:warning=CARGO_MANIFEST_DIR is not set; i18n files are not tracked");
        return;
    };

    match rerun_hints(Path::new(&manifest_dir)) {
        Ok(paths) => {
            for path in paths {
                println!("cargo:rerun-if-changed={}", path.display());
            }
        },
        Err(e) => println!("cargo:warning=Failed to read i18n.toml: {}", e),
    }
}

/// Lists the files whose changes should re-run a build script.
pub fn rerun_hints(manifest_dir: &Path) -> Result<Vec<PathBuf>, I18nConfigError> {
    let config = I18nConfig::from_manifest_dir(manifest_dir)?;
    let mut paths = vec![manifest_dir.join(CONFIG_FILE_NAME)];

    if let Some(sources) = config.dictionary_paths_from_base(Some(manifest_dir))? {
        paths.push(sources.global);
        paths.extend(sources.namespaces);
    }

    Ok(paths)
}
