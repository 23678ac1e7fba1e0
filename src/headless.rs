//! Headless subcommands: setup, update-config and status
//!
//! Each writes human-readable (or JSON) results to the given writer and
//! returns an error on failure so the binary exits non-zero.

use std::io::Write;
use std::path::Path;

use tdemon_app::config::ConfigMerger;
use tdemon_app::TunnelBackend;
use tdemon_core::prelude::*;
use tdemon_core::{format_bytes, Environment, TunnelSession};

fn write_out(out: &mut impl Write, text: impl std::fmt::Display) -> Result<()> {
    writeln!(out, "{text}")?;
    Ok(())
}

/// Install both templates, then merge any supplied user configs
pub fn setup(
    merger: &ConfigMerger,
    production: Option<&Path>,
    non_production: Option<&Path>,
    out: &mut impl Write,
) -> Result<Vec<Environment>> {
    let merged = merger.run_setup(production, non_production)?;

    let store = merger.store();
    for env in Environment::ALL {
        write_out(
            out,
            format_args!("✅ Installed {} template: {}", env, store.template_path(env).display()),
        )?;
    }
    for env in &merged {
        write_out(
            out,
            format_args!("✅ Wrote {} config: {}", env, store.config_path(*env).display()),
        )?;
    }
    if merged.is_empty() {
        write_out(
            out,
            "No user configs given. Run `tdemon update-config <PATH>` to add one.",
        )?;
    }
    Ok(merged)
}

/// Merge one user config and report where it went
pub fn update_config(merger: &ConfigMerger, path: &Path, out: &mut impl Write) -> Result<Environment> {
    let env = merger.process_user_config(path)?;
    write_out(
        out,
        format_args!(
            "✅ {} config updated from {}: {}",
            env,
            path.display(),
            merger.store().config_path(env).display()
        ),
    )?;
    Ok(env)
}

/// Probe once and print the session
pub async fn status<B: TunnelBackend>(backend: &B, json: bool, out: &mut impl Write) -> Result<TunnelSession> {
    let session = backend.probe().await;

    if json {
        let text = serde_json::to_string(&session)
            .map_err(|e| Error::config(format!("Failed to serialize status: {}", e)))?;
        write_out(out, text)?;
    } else {
        write_out(out, describe_session(&session))?;
    }
    Ok(session)
}

/// Multi-line plain-text rendering of a session
pub fn describe_session(session: &TunnelSession) -> String {
    if !session.connected {
        return "Status:      Disconnected".to_string();
    }

    let environment = session
        .environment
        .map(|env| env.display_name())
        .unwrap_or("Unknown");
    let handshake = session
        .handshake_age(chrono::Local::now())
        .map(|age| format!("{}s ago", age.num_seconds().max(0)))
        .unwrap_or_else(|| "-".to_string());

    [
        "Status:      Connected".to_string(),
        format!("Environment: {environment}"),
        format!("Interface:   {}", session.interface_name),
        format!("Endpoint:    {}", session.endpoint.as_deref().unwrap_or("-")),
        format!("Handshake:   {handshake}"),
        format!(
            "Transfer:    {} received, {} sent",
            format_bytes(session.bytes_received),
            format_bytes(session.bytes_sent)
        ),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_disconnected() {
        assert_eq!(
            describe_session(&TunnelSession::disconnected()),
            "Status:      Disconnected"
        );
    }

    #[test]
    fn test_describe_connected() {
        let mut session = TunnelSession::connected("julo-prod");
        session.bytes_received = 2048;
        let text = describe_session(&session);
        assert!(text.contains("Environment: Production"));
        assert!(text.contains("Interface:   julo-prod"));
        assert!(text.contains("2.0 KiB received"));
        assert!(text.contains("Handshake:   -"));
    }
}
