use std::path::PathBuf;

use serde::Serialize;
use toml::Table;

use crate::{
    app::App,
    configs::Framework,
    initializer::ViewConsumer,
    registry::{self, Shell},
};

/// What a boot left behind, gathered from the configuration, the host and
/// the process-wide registry.
#[derive(Debug, Clone, Serialize)]
pub struct BootReport {
    pub root: PathBuf,
    pub environment: String,
    pub completed_steps: Vec<String>,
    pub environment_loaded: bool,
    pub frameworks: Vec<Framework>,
    pub load_path: Vec<PathBuf>,
    pub autoload_paths: Vec<PathBuf>,
    pub autoload_once_paths: Vec<PathBuf>,
    pub plugins: Vec<String>,
    pub locale_files: Vec<PathBuf>,
    pub default_locale: String,
    pub generator_options: Table,
    pub generator_aliases: Table,
    pub colorized_shell: bool,
    pub middleware: Vec<String>,
    pub view_reloads: Vec<ViewConsumer>,
    pub classes: Vec<String>,
}

impl BootReport {
    pub fn collect(app: &App) -> Self {
        let registry = registry::snapshot();
        let state = app.initializer.state();

        Self {
            root: app.config.root_path.clone(),
            environment: app.config.environment.clone(),
            completed_steps: state.completed_steps().to_vec(),
            environment_loaded: state.environment_loaded(),
            frameworks: registry.required_frameworks.iter().copied().collect(),
            load_path: registry.load_path.to_vec(),
            autoload_paths: registry.autoload_paths.to_vec(),
            autoload_once_paths: registry.autoload_once_paths.to_vec(),
            plugins: app.config.loaded_plugin_names(),
            locale_files: registry.i18n.load_path(),
            default_locale: registry.i18n.default_locale.clone(),
            generator_options: registry.generators.options.clone(),
            generator_aliases: registry.generators.aliases.clone(),
            colorized_shell: registry.generators.shell == Shell::Color,
            middleware: app.host.middleware_stack().components().to_vec(),
            view_reloads: app.host.view_reloads().to_vec(),
            classes: registry.classes.keys().cloned().collect(),
        }
    }

    /// Human-readable summary printed by `railhead boot`.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("Booted {} ({})\n", self.root.display(), self.environment));
        out.push_str(&format!("Steps: {}\n", self.completed_steps.join(", ")));

        let frameworks: Vec<&str> = self.frameworks.iter().map(|f| f.as_str()).collect();
        out.push_str(&format!("Frameworks: {}\n", frameworks.join(", ")));

        push_paths(&mut out, "Load path", &self.load_path);
        push_paths(&mut out, "Autoload paths", &self.autoload_paths);

        if self.plugins.is_empty() {
            out.push_str("Plugins: none\n");
        } else {
            out.push_str(&format!("Plugins: {}\n", self.plugins.join(", ")));
        }

        push_paths(&mut out, "Locale files", &self.locale_files);
        out.push_str(&format!("Default locale: {}\n", self.default_locale));

        if !self.middleware.is_empty() {
            out.push_str("Middleware:\n");
            for component in &self.middleware {
                out.push_str(&format!("  {}\n", component));
            }
        }

        if !self.classes.is_empty() {
            out.push_str(&format!("Classes: {}\n", self.classes.join(", ")));
        }

        out
    }
}

fn push_paths(out: &mut String, label: &str, paths: &[PathBuf]) {
    if paths.is_empty() {
        return;
    }
    out.push_str(&format!("{}:\n", label));
    for path in paths {
        out.push_str(&format!("  {}\n", path.display()));
    }
}
