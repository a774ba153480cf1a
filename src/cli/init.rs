use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::configs::{LOCALES_DIR, paths::RAILHEAD_CONFIG_NAME};

const ENVIRONMENT_FILE: &str = "config/environments/development.lua";
const LOCALE_FILE: &str = "en.yml";
const MODEL_FILE: &str = "app/models/application_record.lua";
const EMPTY_DIRS: [&str; 3] = ["config/initializers", "vendor/plugins", "lib"];

const BOOT_TOML_TEMPLATE: &str = include_str!("../../scaffold_templates/boot.toml");
const ENVIRONMENT_TEMPLATE: &str = include_str!("../../scaffold_templates/development.lua");
const LOCALE_TEMPLATE: &str = include_str!("../../scaffold_templates/en.yml");
const MODEL_TEMPLATE: &str = include_str!("../../scaffold_templates/application_record.lua");

/// Writes `content` to `path` unless the file already exists. Returns
/// whether it was written.
fn write_template(content: &str, path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write template to {}", path.display()))?;
    Ok(true)
}

/// Creates an application skeleton under `dir`.
///
/// Existing files are left untouched and reported as skipped.
pub fn create_app_scaffold(dir: &Path) -> Result<()> {
    for empty in EMPTY_DIRS {
        let path = dir.join(empty);
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
    }

    let locale_path = Path::new(LOCALES_DIR).join(LOCALE_FILE);
    let templates = [
        (Path::new(RAILHEAD_CONFIG_NAME), BOOT_TOML_TEMPLATE),
        (Path::new(ENVIRONMENT_FILE), ENVIRONMENT_TEMPLATE),
        (locale_path.as_path(), LOCALE_TEMPLATE),
        (Path::new(MODEL_FILE), MODEL_TEMPLATE),
    ];

    let mut skipped = Vec::new();
    for (relative, content) in templates {
        if !write_template(content, &dir.join(relative))? {
            skipped.push(relative.display().to_string());
        }
    }

    println!("Application initialized at:\n  {}", dir.display());

    if !skipped.is_empty() {
        println!("\nSkipped existing files:");
        for file in &skipped {
            println!("  - {}", file);
        }
    }

    println!(
        "\nNext steps:\n  1. Edit {}\n  2. Boot it: railhead --root {} boot",
        RAILHEAD_CONFIG_NAME,
        dir.display()
    );

    Ok(())
}
