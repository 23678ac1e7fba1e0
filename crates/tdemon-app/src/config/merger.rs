//! Merge a user-supplied config with the matching environment template
//!
//! The user file carries identity (keys, address); the template carries
//! routing policy (`DNS`, `AllowedIPs`). Merging replaces exactly those two
//! directives and passes every other line through untouched and in order.

use std::path::Path;

use tdemon_core::prelude::*;
use tdemon_core::Environment;

use super::store::ConfigStore;
use super::templates::{first_line_with_prefix, ConfigTemplate, ALLOWED_IPS_KEY, DNS_KEY};
use super::types::EndpointSettings;

const ENDPOINT_TOKEN: &str = "Endpoint";

/// Classifies, merges and persists user configs
#[derive(Debug, Clone)]
pub struct ConfigMerger {
    store: ConfigStore,
    endpoints: EndpointSettings,
}

impl ConfigMerger {
    pub fn new(store: ConfigStore, endpoints: EndpointSettings) -> Self {
        Self { store, endpoints }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn endpoints(&self) -> &EndpointSettings {
        &self.endpoints
    }

    /// Merge the config at `path` into the environment it belongs to
    ///
    /// Returns the environment whose merged config was written.
    pub fn process_user_config(&self, path: &Path) -> Result<Environment> {
        if !path.is_file() {
            return Err(Error::UserConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let user_lines = self.store.read_lines(path)?;
        let env = self.classify(path, &user_lines)?;

        let template_path = self.store.template_path(env);
        if !self.store.exists(&template_path) {
            return Err(Error::TemplateMissing {
                path: template_path,
            });
        }

        let template = self.store.read_to_string(&template_path)?;
        let dns = first_line_with_prefix(&template, DNS_KEY).ok_or_else(|| {
            Error::TemplateMalformed {
                path: template_path.clone(),
                key: DNS_KEY.to_string(),
            }
        })?;
        let allowed_ips = first_line_with_prefix(&template, ALLOWED_IPS_KEY).ok_or_else(|| {
            Error::TemplateMalformed {
                path: template_path.clone(),
                key: ALLOWED_IPS_KEY.to_string(),
            }
        })?;

        let merged = merge_lines(&user_lines, dns, allowed_ips);
        let output_path = self.store.config_path(env);
        self.store.write_lines(&output_path, &merged)?;

        info!(
            "Generated {} config {} from {}",
            env,
            output_path.display(),
            path.display()
        );
        Ok(env)
    }

    /// Resolve the environment a user config belongs to by its endpoint
    pub fn classify<S: AsRef<[u8]>>(&self, path: &Path, lines: &[S]) -> Result<Environment> {
        let endpoint = extract_endpoint(lines).ok_or_else(|| Error::NoEndpointFound {
            path: path.to_path_buf(),
        })?;

        self.endpoints
            .classify(endpoint)
            .ok_or_else(|| Error::UnrecognizedEndpoint {
                path: path.to_path_buf(),
                endpoint: endpoint.to_string(),
            })
    }

    /// Write both embedded templates, overwriting existing files
    pub fn install_templates(&self) -> Result<()> {
        self.store.ensure_dir()?;
        for template in ConfigTemplate::all() {
            let path = self.store.template_path(template.environment);
            self.store.write(&path, template.contents)?;
            info!("Installed {} template to {}", template.environment, path.display());
        }
        Ok(())
    }

    /// Install templates, then merge each supplied user config
    pub fn run_setup(
        &self,
        production: Option<&Path>,
        non_production: Option<&Path>,
    ) -> Result<Vec<Environment>> {
        self.install_templates()?;

        let mut merged = Vec::new();
        for path in [production, non_production].into_iter().flatten() {
            merged.push(self.process_user_config(path)?);
        }
        Ok(merged)
    }
}

/// Third whitespace field of a line mentioning `Endpoint`
pub fn endpoint_field(line: &str) -> Option<&str> {
    if line.contains(ENDPOINT_TOKEN) {
        line.split_whitespace().nth(2)
    } else {
        None
    }
}

/// Endpoint of the first `Endpoint` line that has a value
pub fn extract_endpoint<S: AsRef<[u8]>>(lines: &[S]) -> Option<&str> {
    lines
        .iter()
        .find_map(|line| endpoint_field(utf8_prefix(line.as_ref())))
}

/// Longest valid UTF-8 prefix of a raw line
fn utf8_prefix(bytes: &[u8]) -> &str {
    match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => std::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
    }
}

/// Substitute the policy lines, passing everything else through in order
pub fn merge_lines<S: AsRef<[u8]>>(
    user_lines: &[S],
    dns_line: &str,
    allowed_ips_line: &str,
) -> Vec<Vec<u8>> {
    user_lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            if line.starts_with(ALLOWED_IPS_KEY.as_bytes()) {
                allowed_ips_line.as_bytes().to_vec()
            } else if line.starts_with(DNS_KEY.as_bytes()) {
                dns_line.as_bytes().to_vec()
            } else {
                line.to_vec()
            }
        })
        .collect()
}
