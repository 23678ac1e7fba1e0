//! Embedded per-environment config templates
//!
//! A template carries the operator-controlled routing policy (`DNS` and
//! `AllowedIPs`). Key material in the templates is placeholder text only.

use tdemon_core::Environment;

const PRODUCTION_CONTENTS: &str = include_str!("../../templates/prod-template.conf");
const NON_PRODUCTION_CONTENTS: &str = include_str!("../../templates/nonprod-template.conf");

/// Line prefix of the DNS directive
pub const DNS_KEY: &str = "DNS";

/// Line prefix of the routing-policy directive
pub const ALLOWED_IPS_KEY: &str = "AllowedIPs";

/// One embedded template file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigTemplate {
    pub environment: Environment,
    pub contents: &'static str,
}

impl ConfigTemplate {
    pub fn for_environment(environment: Environment) -> Self {
        let contents = match environment {
            Environment::Production => PRODUCTION_CONTENTS,
            Environment::NonProduction => NON_PRODUCTION_CONTENTS,
        };
        Self {
            environment,
            contents,
        }
    }

    pub fn all() -> [ConfigTemplate; 2] {
        Environment::ALL.map(Self::for_environment)
    }

    /// The template's `DNS` line, verbatim
    pub fn dns_line(&self) -> Option<&'static str> {
        first_line_with_prefix(self.contents, DNS_KEY)
    }

    /// The template's `AllowedIPs` line, verbatim
    pub fn allowed_ips_line(&self) -> Option<&'static str> {
        first_line_with_prefix(self.contents, ALLOWED_IPS_KEY)
    }

    /// The peer endpoint baked into the template
    pub fn endpoint(&self) -> Option<&'static str> {
        self.contents.lines().find_map(super::merger::endpoint_field)
    }

    pub fn interface_name(&self, prefix: &str) -> String {
        self.environment.interface_name(prefix)
    }
}

/// First line starting with `prefix`, returned whole
pub fn first_line_with_prefix<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    text.lines().find(|line| line.starts_with(prefix))
}
