use std::path::PathBuf;

use crate::{
    configs::{Configuration, Framework, locale_files_in, sorted_entries},
    error::{BootError, BootResult, ConfigError},
    initializer::{
        Boot, CONNECTION_MANAGEMENT, QUERY_CACHE, RECORD_SESSION_STORE, ViewConsumer, eager_load,
    },
    lua::{evaluate_file, expose_configuration, expose_plugin},
    plugins::{LocateError, Plugin, PluginLocator},
    registry,
};

type BuiltinStep = fn(&mut Boot<'_>) -> BootResult<()>;

const INITIALIZERS_DIR: &str = "config/initializers";

/// Built-in steps in boot order.
pub(super) const DEFAULT_STEPS: [(&str, BuiltinStep); 14] = [
    ("set_root_path", set_root_path),
    ("set_load_path", set_load_path),
    ("require_frameworks", require_frameworks),
    ("set_autoload_paths", set_autoload_paths),
    ("add_plugin_load_paths", add_plugin_load_paths),
    ("load_environment", load_environment),
    ("load_plugins", load_plugins),
    ("initialize_i18n", initialize_i18n),
    ("initialize_generators", initialize_generators),
    ("load_application_initializers", load_application_initializers),
    ("after_initialize", after_initialize),
    ("initialize_database_middleware", initialize_database_middleware),
    ("load_view_paths", load_view_paths),
    ("load_application_classes", load_application_classes),
];

fn set_root_path(boot: &mut Boot<'_>) -> BootResult<()> {
    let root = boot.config.root_path.clone();
    if !root.is_dir() {
        return Err(ConfigError::RootPathMissing(root).into());
    }

    let resolved = root
        .canonicalize()
        .map_err(|source| BootError::Io { path: root, source })?;
    tracing::debug!("Application root is {}", resolved.display());
    boot.config.root_path = resolved;
    Ok(())
}

fn set_load_path(boot: &mut Boot<'_>) -> BootResult<()> {
    let config = &boot.config;
    let dirs: Vec<PathBuf> = config
        .load_paths
        .iter()
        .map(|path| config.resolve(path))
        .chain(config.framework_paths())
        .filter(|dir| dir.is_dir())
        .collect();

    registry::with(|registry| {
        for dir in dirs {
            if registry.load_path.append(dir.clone()) {
                tracing::debug!("Added {} to the load path", dir.display());
            }
        }
    });
    Ok(())
}

fn require_frameworks(boot: &mut Boot<'_>) -> BootResult<()> {
    // Every identifier is checked before anything is loaded
    let frameworks = boot
        .config
        .frameworks
        .iter()
        .map(|identifier| {
            identifier
                .parse::<Framework>()
                .map_err(BootError::UnknownFramework)
        })
        .collect::<BootResult<Vec<_>>>()?;

    for framework in frameworks {
        boot.host.require_framework(framework)?;
        registry::with(|registry| registry.required_frameworks.insert(framework));
    }
    Ok(())
}

fn set_autoload_paths(boot: &mut Boot<'_>) -> BootResult<()> {
    let config = &boot.config;

    if let Some(outside) = config.autoload_once_path_outside_load_paths() {
        return Err(ConfigError::AutoloadOnceOutsideLoadPaths(outside.clone()).into());
    }

    let existing = |paths: &[PathBuf]| -> Vec<PathBuf> {
        paths
            .iter()
            .map(|path| config.resolve(path))
            .filter(|dir| dir.is_dir())
            .collect()
    };
    let autoload = existing(&config.load_paths);
    let autoload_once = existing(&config.autoload_once_paths);

    registry::with(|registry| {
        for dir in autoload {
            registry.autoload_paths.append(dir);
        }
        for dir in autoload_once {
            registry.autoload_once_paths.append(dir);
        }
    });
    Ok(())
}

fn add_plugin_load_paths(boot: &mut Boot<'_>) -> BootResult<()> {
    // Missing plugins are reported by load_plugins
    let plugins = match locate_plugins(boot.config) {
        Ok(plugins) => plugins,
        Err(LocateError::Missing { located, .. }) => located,
        Err(error) => return Err(error.into()),
    };

    registry::with(|registry| {
        for plugin in &plugins {
            for path in plugin.load_paths() {
                tracing::debug!("Adding {} from plugin {}", path.display(), plugin.name);
                registry.load_path.append(path.clone());
                registry.autoload_paths.append(path);
            }
        }
    });
    Ok(())
}

fn load_environment(boot: &mut Boot<'_>) -> BootResult<()> {
    if boot.state.environment_loaded {
        tracing::debug!("Environment already loaded");
        return Ok(());
    }

    let Some(path) = boot.config.environment_path() else {
        tracing::debug!("No environment file configured");
        return Ok(());
    };

    let lua = boot.state.lua();
    expose_configuration(lua, boot.config).map_err(BootError::Runtime)?;
    evaluate_file(lua, &path)?;

    tracing::info!("Loaded environment from {}", path.display());
    boot.state.environment_loaded = true;
    Ok(())
}

fn load_plugins(boot: &mut Boot<'_>) -> BootResult<()> {
    let (plugins, missing) = match locate_plugins(boot.config) {
        Ok(plugins) => (plugins, None),
        Err(LocateError::Missing { located, missing }) => (located, Some(missing)),
        Err(error) => return Err(error.into()),
    };

    let lua = boot.state.lua();
    expose_configuration(lua, boot.config).map_err(BootError::Runtime)?;

    for plugin in plugins {
        if boot
            .config
            .loaded_plugins
            .iter()
            .any(|loaded| loaded.name == plugin.name)
        {
            continue;
        }

        if let Some(init) = plugin.init_file() {
            expose_plugin(lua, Some(&plugin)).map_err(BootError::Runtime)?;
            let evaluated = evaluate_file(lua, &init);
            expose_plugin(lua, None).map_err(BootError::Runtime)?;
            evaluated?;
        }

        tracing::info!("Loaded plugin {}", plugin.name);
        boot.config.loaded_plugins.push(plugin);
    }

    match missing {
        Some(missing) => Err(BootError::MissingPlugins { missing }),
        None => Ok(()),
    }
}

fn initialize_i18n(boot: &mut Boot<'_>) -> BootResult<()> {
    let config = &boot.config;

    let mut paths: Vec<PathBuf> = Vec::new();
    for dir in config.framework_locale_dirs() {
        paths.extend(locale_files_in(&dir)?);
    }
    for plugin in &config.loaded_plugins {
        paths.extend(plugin.locale_files()?);
    }
    paths.extend(config.i18n_load_path()?);

    tracing::debug!("Publishing {} locale files", paths.len());
    registry::with(|registry| {
        registry.i18n.set_load_path(paths);
        registry
            .i18n
            .set_default_locale(&config.i18n.default_locale);
    });
    Ok(())
}

fn initialize_generators(boot: &mut Boot<'_>) -> BootResult<()> {
    let generators = &boot.config.generators;

    registry::with(|registry| {
        if !generators.colorize_logging {
            registry.generators.no_color();
        }
        registry.generators.set_aliases(&generators.aliases);
        registry.generators.set_options(&generators.options);
    });
    Ok(())
}

fn load_application_initializers(boot: &mut Boot<'_>) -> BootResult<()> {
    let dir = boot.config.root_path.join(INITIALIZERS_DIR);
    let files: Vec<PathBuf> = sorted_entries(&dir)?
        .into_iter()
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "lua"))
        .collect();
    if files.is_empty() {
        tracing::debug!("No initializers in {}", dir.display());
        return Ok(());
    }

    let lua = boot.state.lua();
    expose_configuration(lua, boot.config).map_err(BootError::Runtime)?;
    for file in files {
        tracing::debug!("Running initializer {}", file.display());
        evaluate_file(lua, &file)?;
    }
    Ok(())
}

fn after_initialize(boot: &mut Boot<'_>) -> BootResult<()> {
    if !boot.host.dependencies_loaded() {
        tracing::info!("Dependencies not loaded, skipping after_initialize callbacks");
        return Ok(());
    }

    for callback in boot.config.after_initialize_callbacks.iter_mut() {
        callback();
    }
    Ok(())
}

fn initialize_database_middleware(boot: &mut Boot<'_>) -> BootResult<()> {
    if !boot.config.has_framework(Framework::ActiveRecord) {
        return Ok(());
    }

    let record_session_store = boot.config.has_framework(Framework::ActionController)
        && boot.host.session_store() == RECORD_SESSION_STORE;

    let middleware = boot.host.middleware();
    if record_session_store {
        middleware.insert_before(RECORD_SESSION_STORE, CONNECTION_MANAGEMENT);
        middleware.insert_before(RECORD_SESSION_STORE, QUERY_CACHE);
    } else {
        middleware.append(CONNECTION_MANAGEMENT);
        middleware.append(QUERY_CACHE);
    }
    Ok(())
}

fn load_view_paths(boot: &mut Boot<'_>) -> BootResult<()> {
    if !boot.config.has_framework(Framework::ActionView) {
        return Ok(());
    }

    if boot.config.has_framework(Framework::ActionController) {
        boot.host.reload_view_paths(ViewConsumer::Controller);
    }
    if boot.config.has_framework(Framework::ActionMailer) {
        boot.host.reload_view_paths(ViewConsumer::Mailer);
    }
    Ok(())
}

fn load_application_classes(boot: &mut Boot<'_>) -> BootResult<()> {
    if !boot.config.cache_classes {
        tracing::debug!("cache_classes is off, classes load on demand");
        return Ok(());
    }

    let config = &boot.config;
    let dirs: Vec<PathBuf> = config
        .eager_load_paths
        .iter()
        .map(|path| config.resolve(path))
        .collect();

    let lua = boot.state.lua();
    expose_configuration(lua, config).map_err(BootError::Runtime)?;
    let loaded = eager_load(lua, &dirs)?;
    tracing::info!("Eager loaded {} application files", loaded);
    Ok(())
}

fn locate_plugins(config: &Configuration) -> Result<Vec<Plugin>, LocateError> {
    PluginLocator::new(config.plugin_search_paths()).locate(config.plugins.as_deref())
}
