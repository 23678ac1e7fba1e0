//! Start/stop transitions for the managed tunnel
//!
//! Switching environments is always `down A` followed by `up B`; `wg-quick`
//! cannot replace an interface in place.

use tdemon_core::prelude::*;
use tdemon_core::{Environment, TunnelSession};

use crate::probe::SessionProbe;
use crate::runner::{command_line, CommandRunner};

/// Brings the managed tunnel up and down, one session at a time
#[derive(Debug, Clone)]
pub struct SessionController<R> {
    probe: SessionProbe<R>,
}

impl<R: CommandRunner + Sync> SessionController<R> {
    pub fn new(probe: SessionProbe<R>) -> Self {
        Self { probe }
    }

    pub fn probe(&self) -> &SessionProbe<R> {
        &self.probe
    }

    /// Bring up the tunnel for `env`, stopping any active session first
    #[instrument(skip(self))]
    pub async fn start(&self, env: Environment) -> Result<()> {
        let current = self.probe.probe().await;
        if current.connected {
            info!(
                "Stopping {} before starting {}",
                current.interface_name, env
            );
            self.stop_session(&current)
                .await
                .map_err(|e| Error::stop_before_start(current.interface_name.clone(), e))?;
        }

        let interface = env.interface_name(self.probe.prefix());
        self.wg_quick("up", &interface).await?;
        info!("Started {}", interface);
        Ok(())
    }

    /// Bring down the active session; a no-op when nothing is connected
    #[instrument(skip(self))]
    pub async fn stop(&self) -> Result<()> {
        let current = self.probe.probe().await;
        self.stop_session(&current).await
    }

    /// Bring down the interface described by an already-probed session
    pub(crate) async fn stop_session(&self, session: &TunnelSession) -> Result<()> {
        if !session.connected {
            debug!("Stop requested with no active session");
            return Ok(());
        }

        if !session.interface_name.is_empty() {
            self.wg_quick("down", &session.interface_name).await?;
            info!("Stopped {}", session.interface_name);
            return Ok(());
        }

        // Probe reported connected without a name; try both well-known names
        for env in Environment::ALL {
            let interface = env.interface_name(self.probe.prefix());
            match self.wg_quick("down", &interface).await {
                Ok(()) => {
                    info!("Stopped {}", interface);
                    return Ok(());
                }
                Err(e) => debug!("Fallback stop of {} failed: {}", interface, e),
            }
        }

        Err(Error::NoActiveInterface)
    }

    async fn wg_quick(&self, verb: &str, interface: &str) -> Result<()> {
        let program = &self.probe.tools().wg_quick;
        let args = [verb, interface];
        let output = self.probe.runner().run(program, &args).await?;

        if output.success() {
            Ok(())
        } else {
            Err(Error::command_failed(
                command_line(program, &args),
                output.code,
                output.combined(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::WgTools;
    use crate::test_utils::{wg_show_all, RecordingRunner};

    fn controller_with(runner: &RecordingRunner) -> SessionController<RecordingRunner> {
        SessionController::new(SessionProbe::new(
            runner.clone(),
            WgTools::default(),
            "julo-",
        ))
    }

    #[tokio::test]
    async fn test_stop_when_disconnected_is_noop() {
        let runner = RecordingRunner::new();
        runner.respond_ok("wg show all", "");

        tokio_test::assert_ok!(controller_with(&runner).stop().await);
        assert!(runner.calls().iter().all(|c| !c.starts_with("wg-quick")));
    }

    #[tokio::test]
    async fn test_stop_brings_down_probed_interface() {
        let runner = RecordingRunner::new();
        runner.respond_ok("wg show all", &wg_show_all(&["julo-nonprod"]));

        tokio_test::assert_ok!(controller_with(&runner).stop().await);
        assert_eq!(runner.count("wg-quick down julo-nonprod"), 1);
    }

    #[tokio::test]
    async fn test_stop_failure_carries_output() {
        let runner = RecordingRunner::new();
        runner.respond_ok("wg show all", &wg_show_all(&["julo-prod"]));
        runner.respond_fail("wg-quick down julo-prod", 1, "wg-quick: `julo-prod' is not a WireGuard interface");

        let err = tokio_test::assert_err!(controller_with(&runner).stop().await);
        match err {
            Error::CommandFailed { command, code, output } => {
                assert_eq!(command, "wg-quick down julo-prod");
                assert_eq!(code, Some(1));
                assert!(output.contains("is not a WireGuard interface"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_start_from_disconnected() {
        let runner = RecordingRunner::new();
        runner.respond_ok("wg show all", "");

        tokio_test::assert_ok!(controller_with(&runner).start(Environment::Production).await);
        assert_eq!(runner.calls(), vec!["wg show all", "wg-quick up julo-prod"]);
    }

    #[tokio::test]
    async fn test_switch_stops_before_start() {
        let runner = RecordingRunner::new();
        runner.respond_ok("wg show all", &wg_show_all(&["julo-prod"]));

        tokio_test::assert_ok!(
            controller_with(&runner)
                .start(Environment::NonProduction)
                .await
        );

        let down = runner.position("wg-quick down julo-prod").unwrap();
        let up = runner.position("wg-quick up julo-nonprod").unwrap();
        assert!(down < up);
    }

    #[tokio::test]
    async fn test_restart_same_environment_cycles_interface() {
        let runner = RecordingRunner::new();
        runner.respond_ok("wg show all", &wg_show_all(&["julo-prod"]));

        tokio_test::assert_ok!(controller_with(&runner).start(Environment::Production).await);

        let down = runner.position("wg-quick down julo-prod").unwrap();
        let up = runner.position("wg-quick up julo-prod").unwrap();
        assert!(down < up);
    }

    #[tokio::test]
    async fn test_failed_stop_aborts_start() {
        let runner = RecordingRunner::new();
        runner.respond_ok("wg show all", &wg_show_all(&["julo-prod"]));
        runner.respond_fail("wg-quick down julo-prod", 1, "device busy");

        let err = tokio_test::assert_err!(
            controller_with(&runner)
                .start(Environment::NonProduction)
                .await
        );

        assert!(matches!(err, Error::StopBeforeStart { ref interface, .. } if interface == "julo-prod"));
        assert_eq!(runner.count("wg-quick up julo-nonprod"), 0);
    }

    #[tokio::test]
    async fn test_start_failure_reports_command() {
        let runner = RecordingRunner::new();
        runner.respond_ok("wg show all", "");
        runner.respond_fail("wg-quick up julo-prod", 1, "RTNETLINK answers: Operation not permitted");

        let err = tokio_test::assert_err!(controller_with(&runner).start(Environment::Production).await);
        assert!(err.to_string().contains("wg-quick up julo-prod failed"));
        assert!(err.to_string().contains("Operation not permitted"));
    }

    #[tokio::test]
    async fn test_start_spawn_error_propagates() {
        let runner = RecordingRunner::new();
        runner.respond_ok("wg show all", "");
        runner.respond_spawn_error("wg-quick up julo-prod");

        let err = tokio_test::assert_err!(controller_with(&runner).start(Environment::Production).await);
        assert!(matches!(err, Error::CommandSpawn { .. }));
    }

    #[tokio::test]
    async fn test_unnamed_session_falls_back_to_well_known_names() {
        let runner = RecordingRunner::new();
        runner.respond_fail("wg-quick down julo-prod", 1, "not found");

        let session = TunnelSession {
            connected: true,
            ..TunnelSession::default()
        };
        tokio_test::assert_ok!(controller_with(&runner).stop_session(&session).await);
        assert_eq!(
            runner.calls(),
            vec!["wg-quick down julo-prod", "wg-quick down julo-nonprod"]
        );
    }

    #[tokio::test]
    async fn test_unnamed_session_with_no_interfaces_fails() {
        let runner = RecordingRunner::new();
        runner.respond_fail("wg-quick down julo-prod", 1, "not found");
        runner.respond_fail("wg-quick down julo-nonprod", 1, "not found");

        let session = TunnelSession {
            connected: true,
            ..TunnelSession::default()
        };
        let err = tokio_test::assert_err!(controller_with(&runner).stop_session(&session).await);
        assert!(matches!(err, Error::NoActiveInterface));
    }
}
