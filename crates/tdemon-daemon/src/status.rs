//! Parsing of `wg show` text output
//!
//! `wg show` prints one block per interface:
//!
//! ```text
//! interface: julo-prod
//!   public key: ...
//!   listening port: 51820
//!
//! peer: ...
//!   endpoint: 34.101.166.184:51820
//!   latest handshake: 45 seconds ago
//!   transfer: 1.50 MiB received, 200 KiB sent
//! ```
//!
//! All parsers here are lenient: anything unexpected leaves the field at its
//! default instead of failing.

use std::sync::LazyLock;

use chrono::{DateTime, Duration, Local};
use regex::Regex;
use tdemon_core::TunnelSession;

const INTERFACE_PREFIX: &str = "interface:";
const ENDPOINT_PREFIX: &str = "endpoint:";
const HANDSHAKE_PREFIX: &str = "latest handshake:";
const TRANSFER_PREFIX: &str = "transfer:";

/// Leading `<N> second(s)` or `<N> minute(s)` of a handshake phrase
static HANDSHAKE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(second|minute)s?\b").expect("Invalid handshake regex")
});

/// Names of managed interfaces in `wg show all` output, in discovery order
pub fn managed_interfaces(output: &str, prefix: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.trim().strip_prefix(INTERFACE_PREFIX))
        .map(str::trim)
        .filter(|name| !name.is_empty() && name.starts_with(prefix))
        .map(str::to_string)
        .collect()
}

/// Build a connected session from `wg show <name>` output
pub fn parse_interface_status(name: &str, output: &str, now: DateTime<Local>) -> TunnelSession {
    let mut session = TunnelSession::connected(name);

    for line in output.lines().map(str::trim) {
        if let Some(value) = line.strip_prefix(ENDPOINT_PREFIX) {
            let value = value.trim();
            if session.endpoint.is_none() && !value.is_empty() {
                session.endpoint = Some(value.to_string());
            }
        } else if let Some(value) = line.strip_prefix(HANDSHAKE_PREFIX) {
            if session.last_handshake.is_none() {
                session.last_handshake = parse_handshake(value.trim(), now);
            }
        } else if let Some(value) = line.strip_prefix(TRANSFER_PREFIX) {
            let (received, sent) = parse_transfer(value.trim());
            session.bytes_received = received;
            session.bytes_sent = sent;
        }
    }

    session
}

/// Convert a relative handshake phrase into an absolute timestamp
///
/// Only a leading `<N> second(s)` or `<N> minute(s)` is understood; `0`,
/// empty strings and coarser units (hours, days) yield `None`.
pub fn parse_handshake(value: &str, now: DateTime<Local>) -> Option<DateTime<Local>> {
    let caps = HANDSHAKE_REGEX.captures(value)?;
    let amount: i64 = caps[1].parse().ok()?;
    let elapsed = match &caps[2] {
        "second" => Duration::try_seconds(amount)?,
        "minute" => Duration::try_minutes(amount)?,
        _ => return None,
    };
    now.checked_sub_signed(elapsed)
}

/// Parse a transfer pair into `(received, sent)` byte counts
///
/// Accepts both `1.50 MiB, 200 KiB` and the `wg` form
/// `1.50 MiB received, 200 KiB sent`. An unparsable side stays at 0.
pub fn parse_transfer(value: &str) -> (u64, u64) {
    let mut parts = value.split(',');
    let received = parts.next().and_then(parse_bytes).unwrap_or(0);
    let sent = parts.next().and_then(parse_bytes).unwrap_or(0);
    (received, sent)
}

/// Parse `<value> <unit>` with binary units `B` through `TiB`
pub fn parse_bytes(value: &str) -> Option<u64> {
    let mut fields = value.split_whitespace();
    let number: f64 = fields.next()?.parse().ok()?;
    let multiplier: u64 = match fields.next()? {
        "B" => 1,
        "KiB" => 1024,
        "MiB" => 1024 * 1024,
        "GiB" => 1024 * 1024 * 1024,
        "TiB" => 1024 * 1024 * 1024 * 1024,
        _ => return None,
    };
    if !number.is_finite() || number < 0.0 {
        return None;
    }
    Some((number * multiplier as f64) as u64)
}
