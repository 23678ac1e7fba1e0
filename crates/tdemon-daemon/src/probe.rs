//! Session probing and duplicate-interface reconciliation
//!
//! [`SessionProbe::probe`] never fails: every subprocess or parse problem
//! degrades to [`TunnelSession::disconnected`].

use chrono::Local;
use tdemon_core::prelude::*;
use tdemon_core::TunnelSession;

use crate::runner::{CommandOutput, CommandRunner, WgTools};
use crate::status::{managed_interfaces, parse_interface_status};

/// Observes the managed tunnel through `wg show`
#[derive(Debug, Clone)]
pub struct SessionProbe<R> {
    runner: R,
    tools: WgTools,
    prefix: String,
}

impl<R: CommandRunner + Sync> SessionProbe<R> {
    pub fn new(runner: R, tools: WgTools, prefix: impl Into<String>) -> Self {
        Self {
            runner,
            tools,
            prefix: prefix.into(),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn tools(&self) -> &WgTools {
        &self.tools
    }

    /// Prefix shared by every managed interface name
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Query the current session
    ///
    /// If more than one managed interface is up, the first one listed is
    /// kept and every other one is brought down.
    #[instrument(skip(self), level = "debug")]
    pub async fn probe(&self) -> TunnelSession {
        let Some(listing) = self.query(&["show", "all"]).await else {
            return TunnelSession::disconnected();
        };

        let names = managed_interfaces(&listing.stdout, &self.prefix);
        let Some((retained, extras)) = names.split_first() else {
            trace!("No managed interfaces active");
            return TunnelSession::disconnected();
        };

        if !extras.is_empty() {
            self.reconcile(retained, extras).await;
        }

        let Some(detail) = self.query(&["show", retained.as_str()]).await else {
            return TunnelSession::disconnected();
        };

        parse_interface_status(retained, &detail.stdout, Local::now())
    }

    /// Bring down every extra interface, ignoring individual failures
    async fn reconcile(&self, retained: &str, extras: &[String]) {
        warn!(
            "Multiple managed interfaces active; keeping {} and bringing down {:?}",
            retained, extras
        );

        for name in extras {
            match self
                .runner
                .run(&self.tools.wg_quick, &["down", name.as_str()])
                .await
            {
                Ok(output) if output.success() => info!("Brought down duplicate interface {}", name),
                Ok(output) => warn!(
                    "Failed to bring down duplicate interface {}: {}",
                    name,
                    output.combined()
                ),
                Err(e) => warn!("Failed to bring down duplicate interface {}: {}", name, e),
            }
        }
    }

    /// Run `wg` and keep the output only on a zero exit
    async fn query(&self, args: &[&str]) -> Option<CommandOutput> {
        match self.runner.run(&self.tools.wg, args).await {
            Ok(output) if output.success() => Some(output),
            Ok(output) => {
                debug!(
                    "{} {} exited with {:?}: {}",
                    self.tools.wg,
                    args.join(" "),
                    output.code,
                    output.combined()
                );
                None
            }
            Err(e) => {
                debug!("{} {} failed: {}", self.tools.wg, args.join(" "), e);
                None
            }
        }
    }
}
