//! Configuration schema for stackdeploy.toml

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::manager::DEFAULT_TOOL;
use crate::types::{EndpointDescriptor, StackDescriptor};

/// Root configuration structure for stackdeploy.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackDeployConfig {
    /// Orchestration tool name or path (defaults to `docker`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,

    /// Target engines keyed by name
    #[serde(default)]
    pub endpoints: BTreeMap<String, EndpointDescriptor>,

    /// Stacks keyed by stack name
    #[serde(default)]
    pub stacks: BTreeMap<String, StackEntry>,
}

/// A stack as declared in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEntry {
    /// Directory holding `docker-compose.yml`
    pub project_path: PathBuf,
    /// Name of the endpoint in `[endpoints]`
    pub endpoint: String,
}

impl StackDeployConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> &str {
        self.tool.as_deref().unwrap_or(DEFAULT_TOOL)
    }

    /// Rewrite scheme-less endpoint addresses to `tcp://`, as `docker -H` does.
    pub fn normalize_endpoints(&mut self) {
        for endpoint in self.endpoints.values_mut() {
            endpoint.url = normalize_host_url(&endpoint.url);
        }
    }

    /// Validate cross references, endpoint URLs and TLS settings.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(tool) = &self.tool
            && tool.trim().is_empty()
        {
            anyhow::bail!("tool must not be empty");
        }

        for (name, endpoint) in &self.endpoints {
            validate_endpoint(endpoint).with_context(|| format!("Invalid endpoint '{}'", name))?;
        }

        for (name, stack) in &self.stacks {
            if name.is_empty() {
                anyhow::bail!("Stack names must not be empty");
            }
            if !self.endpoints.contains_key(&stack.endpoint) {
                anyhow::bail!(
                    "Stack '{}' references unknown endpoint '{}'",
                    name,
                    stack.endpoint
                );
            }
        }

        Ok(())
    }

    /// Resolve a configured stack into the records the manager consumes.
    pub fn resolve(&self, name: &str) -> anyhow::Result<(StackDescriptor, EndpointDescriptor)> {
        let entry = self
            .stacks
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Stack '{}' is not configured", name))?;
        let endpoint = self.endpoints.get(&entry.endpoint).ok_or_else(|| {
            anyhow::anyhow!(
                "Stack '{}' references unknown endpoint '{}'",
                name,
                entry.endpoint
            )
        })?;

        Ok((
            StackDescriptor::new(name, entry.project_path.clone()),
            endpoint.clone(),
        ))
    }
}

/// Host address schemes understood by `docker -H`.
const HOST_SCHEMES: [&str; 5] = ["tcp", "unix", "npipe", "ssh", "fd"];

/// `10.0.0.5:2376` -> `tcp://10.0.0.5:2376`; addresses with a scheme are kept.
pub fn normalize_host_url(address: &str) -> String {
    let address = address.trim();
    if address.is_empty() || address.contains("://") {
        address.to_string()
    } else {
        format!("tcp://{}", address)
    }
}

fn validate_endpoint(endpoint: &EndpointDescriptor) -> anyhow::Result<()> {
    if endpoint.url.is_empty() {
        anyhow::bail!("url must not be empty");
    }
    if !endpoint.url.contains("://") {
        anyhow::bail!(
            "url must include a scheme ({}): {}",
            HOST_SCHEMES.join(", "),
            endpoint.url
        );
    }
    let parsed = url::Url::parse(&endpoint.url)
        .with_context(|| format!("url is not a valid address: {}", endpoint.url))?;
    if !HOST_SCHEMES.contains(&parsed.scheme()) {
        anyhow::bail!(
            "unsupported url scheme '{}' (expected one of {})",
            parsed.scheme(),
            HOST_SCHEMES.join(", ")
        );
    }
    if let Some(tls) = &endpoint.tls {
        tls.validate()?;
    }
    Ok(())
}
