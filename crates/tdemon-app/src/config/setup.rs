//! First-run setup detection

use std::path::PathBuf;

use tdemon_core::Environment;

use super::store::ConfigStore;

/// Which templates and merged configs are present
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupStatus {
    /// Both environment templates are installed
    pub has_templates: bool,
    pub has_prod_config: bool,
    pub has_nonprod_config: bool,
    /// Expected files that were not found
    pub missing_files: Vec<PathBuf>,
}

impl SetupStatus {
    /// Setup is needed without both templates or without any merged config
    pub fn needs_setup(&self) -> bool {
        !self.has_templates || (!self.has_prod_config && !self.has_nonprod_config)
    }
}

/// Inspect the store for templates and merged configs
pub fn check_setup_status(store: &ConfigStore) -> SetupStatus {
    let mut status = SetupStatus {
        has_templates: true,
        ..SetupStatus::default()
    };

    for env in Environment::ALL {
        let template = store.template_path(env);
        if !store.exists(&template) {
            status.has_templates = false;
            status.missing_files.push(template);
        }
    }

    for env in Environment::ALL {
        let config = store.config_path(env);
        let present = store.exists(&config);
        match env {
            Environment::Production => status.has_prod_config = present,
            Environment::NonProduction => status.has_nonprod_config = present,
        }
        if !present {
            status.missing_files.push(config);
        }
    }

    status
}
