//! Redacted presentation of a merged config

/// Replacement shown instead of key material
pub const REDACTED: &str = "[HIDDEN]";

const SECRET_KEYS: [&str; 3] = ["PrivateKey", "PresharedKey", "PublicKey"];

/// Render a config for display
///
/// Blank and `#` lines are dropped, every line is trimmed, key values are
/// replaced with [`REDACTED`] and `AllowedIPs` is split one range per line.
pub fn redact_config(contents: &str) -> String {
    let mut out: Vec<String> = Vec::new();

    for line in contents.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if SECRET_KEYS.iter().any(|key| line.starts_with(key)) {
            if let Some((key, _)) = line.split_once('=') {
                out.push(format!("{} = {}", key.trim(), REDACTED));
            }
        } else if line.starts_with("AllowedIPs") {
            if let Some((key, ranges)) = line.split_once('=') {
                out.push(format!("{} =", key.trim()));
                out.extend(ranges.trim().split(',').map(|r| format!("  {}", r.trim())));
            }
        } else {
            out.push(line.to_string());
        }
    }

    out.join("\n")
}
