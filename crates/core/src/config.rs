//! Client configuration: where requests go and in which order
//!
//! The backend is reachable through two path conventions. The serverless
//! deployment exposes underscored paths (`/api/generate_website`) and the
//! standalone server exposes hyphenated ones (`/api/generate-website`). A
//! [`ClientConfig`] holds an ordered chain of [`Target`]s per operation; the
//! client tries them in order and stops at the first successful response.

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001";

pub const GENERATE_PATH: &str = "/api/generate_website";
pub const GENERATE_FALLBACK_PATH: &str = "/api/generate-website";
pub const MODIFY_PATH: &str = "/api/modify_website";
pub const MODIFY_FALLBACK_PATH: &str = "/api/modify-website";

/// Deployment context the client runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deployment {
    Production,
    #[default]
    Development,
}

impl Deployment {
    pub fn from_production_flag(production: bool) -> Self {
        if production {
            Deployment::Production
        } else {
            Deployment::Development
        }
    }
}

/// Externally injected values the base URL is resolved from
#[derive(Debug, Clone, Default)]
pub struct BaseUrlSources<'a> {
    /// Explicit backend URL
    pub backend_url: Option<&'a str>,
    /// Host name injected by the deployment platform at build time, without scheme
    pub deploy_host: Option<&'a str>,
    /// Origin (`scheme://host`) the application is publicly served from
    pub public_origin: Option<&'a str>,
    pub deployment: Deployment,
}

/// Resolve the backend base URL once at startup.
///
/// In production the public origin wins, since the backend is served from the
/// same host as the application. Otherwise the explicit backend URL is used,
/// then `https://<deploy host>`, then [`DEFAULT_BACKEND_URL`]. Blank values
/// count as absent and trailing slashes are removed.
pub fn resolve_base_url(sources: &BaseUrlSources) -> String {
    let production_origin = match sources.deployment {
        Deployment::Production => non_blank(sources.public_origin).map(str::to_string),
        Deployment::Development => None,
    };

    let url = production_origin
        .or_else(|| non_blank(sources.backend_url).map(str::to_string))
        .or_else(|| non_blank(sources.deploy_host).map(|host| format!("https://{host}")))
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

    url.trim_end_matches('/').to_string()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Operations supported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Generate,
    Modify,
}

/// One endpoint a request can be sent to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub path: String,
    /// Send `Accept: text/event-stream` to ask for a streamed response
    pub accept_event_stream: bool,
}

impl Target {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            accept_event_stream: false,
        }
    }

    pub fn streaming(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            accept_event_stream: true,
        }
    }
}

/// Default target chain for an operation.
///
/// Production deployments only talk to the serverless paths; everywhere else
/// the standalone server paths are tried next.
pub fn default_targets(operation: Operation, deployment: Deployment) -> Vec<Target> {
    let (primary, fallback) = match operation {
        Operation::Generate => (Target::new(GENERATE_PATH), Target::new(GENERATE_FALLBACK_PATH)),
        Operation::Modify => (Target::new(MODIFY_PATH), Target::streaming(MODIFY_FALLBACK_PATH)),
    };

    match deployment {
        Deployment::Production => vec![primary],
        Deployment::Development => vec![primary, fallback],
    }
}

/// Read-only configuration shared by every request of a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub generate: Vec<Target>,
    pub modify: Vec<Target>,
}

impl ClientConfig {
    pub fn for_deployment(base_url: impl Into<String>, deployment: Deployment) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            generate: default_targets(Operation::Generate, deployment),
            modify: default_targets(Operation::Modify, deployment),
        }
    }

    pub fn with_generate_targets(mut self, targets: Vec<Target>) -> Self {
        self.generate = targets;
        self
    }

    pub fn with_modify_targets(mut self, targets: Vec<Target>) -> Self {
        self.modify = targets;
        self
    }

    pub fn targets(&self, operation: Operation) -> &[Target] {
        match operation {
            Operation::Generate => &self.generate,
            Operation::Modify => &self.modify,
        }
    }

    /// Absolute URL of a target
    pub fn url(&self, target: &Target) -> String {
        format!("{}{}", self.base_url, target.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // resolve_base_url tests
    // ============================================================================

    #[test]
    fn test_resolve_defaults_to_localhost() {
        assert_eq!(resolve_base_url(&BaseUrlSources::default()), "http://localhost:3001");
    }

    #[test]
    fn test_resolve_uses_backend_url() {
        let sources = BaseUrlSources {
            backend_url: Some("http://api.internal:8080/"),
            deploy_host: Some("ignored.example.app"),
            ..Default::default()
        };
        assert_eq!(resolve_base_url(&sources), "http://api.internal:8080");
    }

    #[test]
    fn test_resolve_uses_deploy_host_when_backend_url_blank() {
        let sources = BaseUrlSources {
            backend_url: Some(""),
            deploy_host: Some("sitegen-abc.example.app"),
            ..Default::default()
        };
        assert_eq!(resolve_base_url(&sources), "https://sitegen-abc.example.app");
    }

    #[test]
    fn test_resolve_production_prefers_public_origin() {
        let sources = BaseUrlSources {
            backend_url: Some("http://localhost:3001"),
            public_origin: Some("https://sitegen.example.com"),
            deployment: Deployment::Production,
            ..Default::default()
        };
        assert_eq!(resolve_base_url(&sources), "https://sitegen.example.com");
    }

    #[test]
    fn test_resolve_public_origin_ignored_outside_production() {
        let sources = BaseUrlSources {
            public_origin: Some("https://sitegen.example.com"),
            ..Default::default()
        };
        assert_eq!(resolve_base_url(&sources), DEFAULT_BACKEND_URL);
    }

    // ============================================================================
    // target chain tests
    // ============================================================================

    #[test]
    fn test_development_chain_has_fallback() {
        let config = ClientConfig::for_deployment("http://localhost:3001", Deployment::Development);

        assert_eq!(
            config.targets(Operation::Generate),
            &[Target::new("/api/generate_website"), Target::new("/api/generate-website")]
        );
        assert_eq!(
            config.targets(Operation::Modify),
            &[Target::new("/api/modify_website"), Target::streaming("/api/modify-website")]
        );
    }

    #[test]
    fn test_production_chain_has_primary_only() {
        let config = ClientConfig::for_deployment("https://sitegen.example.com", Deployment::Production);
        assert_eq!(config.targets(Operation::Generate), &[Target::new(GENERATE_PATH)]);
        assert_eq!(config.targets(Operation::Modify), &[Target::new(MODIFY_PATH)]);
    }

    #[test]
    fn test_injected_targets() {
        let config = ClientConfig::for_deployment("http://a", Deployment::Production)
            .with_generate_targets(vec![Target::streaming("/v2/generate"), Target::new("/v1/generate")]);

        assert_eq!(config.generate.len(), 2);
        assert_eq!(config.modify, vec![Target::new(MODIFY_PATH)]);
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let config = ClientConfig::for_deployment("http://localhost:3001/", Deployment::Development);
        assert_eq!(
            config.url(&config.generate[0]),
            "http://localhost:3001/api/generate_website"
        );
    }

    #[test]
    fn test_deployment_from_flag() {
        assert_eq!(Deployment::from_production_flag(true), Deployment::Production);
        assert_eq!(Deployment::from_production_flag(false), Deployment::Development);
    }
}
