//! Tunnel backend abstraction
//!
//! The background task layer only talks to a [`TunnelBackend`], so the
//! WireGuard implementation can be swapped for a test double.

use std::path::PathBuf;
use std::sync::Arc;

use tdemon_core::prelude::*;
use tdemon_core::{Environment, TunnelSession};
use tdemon_daemon::{CommandRunner, SessionController, SessionProbe, SystemRunner};

use crate::config::{redact_config, ConfigMerger, ConfigStore, Settings};

/// Everything the UI can ask of a tunnel backend
#[trait_variant::make(TunnelBackend: Send)]
pub trait LocalTunnelBackend {
    /// Current session; never fails
    async fn probe(&self) -> TunnelSession;

    /// Bring up `env`, stopping any active session first
    async fn start(&self, env: Environment) -> Result<()>;

    /// Bring down the active session, if any
    async fn stop(&self) -> Result<()>;

    /// Merge a user config; returns the environment it was written for
    async fn merge_config(&self, path: PathBuf) -> Result<Environment>;

    /// Merged config for `env`, redacted for display
    async fn read_config(&self, env: Environment) -> Result<String>;

    /// Write both templates into the config directory
    async fn install_templates(&self) -> Result<()>;
}

/// `wg` / `wg-quick` backed implementation
#[derive(Debug, Clone)]
pub struct WireGuardBackend<R> {
    controller: SessionController<R>,
    merger: Arc<ConfigMerger>,
}

impl WireGuardBackend<SystemRunner> {
    /// Build the production backend from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_runner(SystemRunner::new(settings.tools.timeout()), settings)
    }
}

impl<R: CommandRunner + Sync> WireGuardBackend<R> {
    pub fn with_runner(runner: R, settings: &Settings) -> Self {
        let prefix = settings.paths.prefix().to_string();
        let probe = SessionProbe::new(runner, settings.tools.wg_tools(), prefix.clone());
        let store = ConfigStore::new(settings.paths.config_dir.clone(), prefix);
        Self {
            controller: SessionController::new(probe),
            merger: Arc::new(ConfigMerger::new(store, settings.endpoints.clone())),
        }
    }

    pub fn controller(&self) -> &SessionController<R> {
        &self.controller
    }

    pub fn merger(&self) -> &ConfigMerger {
        &self.merger
    }

    /// Run blocking config-file work off the async worker threads
    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&ConfigMerger) -> Result<T> + Send + 'static,
    {
        let merger = Arc::clone(&self.merger);
        tokio::task::spawn_blocking(move || f(&merger))
            .await
            .map_err(std::io::Error::from)?
    }
}

impl<R: CommandRunner + Sync> TunnelBackend for WireGuardBackend<R> {
    async fn probe(&self) -> TunnelSession {
        self.controller.probe().probe().await
    }

    async fn start(&self, env: Environment) -> Result<()> {
        self.controller.start(env).await
    }

    async fn stop(&self) -> Result<()> {
        self.controller.stop().await
    }

    async fn merge_config(&self, path: PathBuf) -> Result<Environment> {
        self.blocking(move |merger| merger.process_user_config(&path))
            .await
    }

    async fn read_config(&self, env: Environment) -> Result<String> {
        self.blocking(move |merger| {
            let store = merger.store();
            let contents = store.read(&store.config_path(env))?;
            Ok(redact_config(&String::from_utf8_lossy(&contents)))
        })
        .await
    }

    async fn install_templates(&self) -> Result<()> {
        self.blocking(|merger| merger.install_templates()).await
    }
}

#[cfg(test)]
mod tests {
    // Glob import would bring both backend traits into scope
    use super::{TunnelBackend, WireGuardBackend};
    use crate::config::Settings;
    use tdemon_core::Environment;
    use tdemon_daemon::test_utils::{wg_show_all, wg_show_interface, RecordingRunner};
    use tempfile::tempdir;
    use tokio_test::{assert_err, assert_ok};

    fn settings_in(dir: &std::path::Path) -> Settings {
        let mut settings = Settings::default();
        settings.paths.config_dir = dir.to_path_buf();
        settings
    }

    #[tokio::test]
    async fn test_probe_and_start_use_runner() {
        let temp = tempdir().unwrap();
        let runner = RecordingRunner::new();
        runner.respond_ok("wg show all", &wg_show_all(&["julo-prod"]));
        runner.respond_ok(
            "wg show julo-prod",
            &wg_show_interface("julo-prod", "34.101.166.184:51820", "3 minutes ago", "1 KiB received, 2 KiB sent"),
        );
        let backend = WireGuardBackend::with_runner(runner.clone(), &settings_in(temp.path()));

        let session = backend.probe().await;
        assert!(session.connected);
        assert_eq!(session.bytes_sent, 2048);

        assert_ok!(backend.start(Environment::NonProduction).await);
        let down = runner.position("wg-quick down julo-prod").unwrap();
        let up = runner.position("wg-quick up julo-nonprod").unwrap();
        assert!(down < up);
    }

    #[tokio::test]
    async fn test_blank_prefix_leaves_foreign_interfaces_alone() {
        let temp = tempdir().unwrap();
        let mut settings = settings_in(temp.path());
        settings.paths.interface_prefix = String::new();

        let runner = RecordingRunner::new();
        runner.respond_ok("wg show all", &wg_show_all(&["wg0", "tailscale0", "julo-prod"]));
        runner.respond_ok(
            "wg show julo-prod",
            &wg_show_interface("julo-prod", "34.101.166.184:51820", "5 seconds ago", "1 KiB, 1 KiB"),
        );
        let backend = WireGuardBackend::with_runner(runner.clone(), &settings);

        let session = backend.probe().await;

        assert_eq!(session.interface_name, "julo-prod");
        assert_eq!(session.environment, Some(Environment::Production));
        assert!(!runner.calls().iter().any(|c| c.starts_with("wg-quick down")));
        assert_eq!(runner.calls(), vec!["wg show all", "wg show julo-prod"]);
    }

    #[tokio::test]
    async fn test_install_merge_and_read_config() {
        let temp = tempdir().unwrap();
        let backend = WireGuardBackend::with_runner(RecordingRunner::new(), &settings_in(temp.path()));

        assert_ok!(backend.install_templates().await);

        let user = temp.path().join("user.conf");
        std::fs::write(
            &user,
            "[Interface]\nPrivateKey = c2VjcmV0\nDNS = 1.1.1.1\n[Peer]\nEndpoint = 34.128.85.147:51820\nAllowedIPs = 0.0.0.0/0\n",
        )
        .unwrap();

        let env = backend.merge_config(user).await.unwrap();
        assert_eq!(env, Environment::NonProduction);

        let view = backend.read_config(env).await.unwrap();
        assert!(view.contains("PrivateKey = [HIDDEN]"));
        assert!(!view.contains("c2VjcmV0"));
        assert!(view.contains("AllowedIPs =\n  172.30.0.0/16"));
    }

    #[tokio::test]
    async fn test_read_missing_config_fails() {
        let temp = tempdir().unwrap();
        let backend = WireGuardBackend::with_runner(RecordingRunner::new(), &settings_in(temp.path()));
        assert_err!(backend.read_config(Environment::Production).await);
    }
}
