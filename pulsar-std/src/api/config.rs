//! Service configuration and environment detection.

use std::fmt;

/// Where the page is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    /// A developer machine (`localhost`).
    Local,
    /// The test deployment (`*.tst.<domain>`).
    Test,
    /// Everything else.
    Production,
}

impl Environment {
    /// Work out the environment from the page's host name.
    pub fn detect(hostname: &str, domain: &str) -> Self {
        if hostname == "localhost" {
            Environment::Local
        } else if hostname.ends_with(&format!("tst.{domain}")) {
            Environment::Test
        } else {
            Environment::Production
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Environment::Local => "local",
            Environment::Test => "test",
            Environment::Production => "production",
        })
    }
}

const DEFAULT_DOMAIN: &str = "example.com";
const DEFAULT_LOCAL_PORT: u16 = 8084;
const DEFAULT_SIGN_IN: &str = "/sign-in";
const DEFAULT_FATAL_STATUSES: [u16; 5] = [403, 500, 518, 522, 527];

/// Configuration of an [`ApiAdapter`](super::ApiAdapter) for one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    service: String,
    environment: Environment,
    domain: String,
    local_port: u16,
    sign_in_location: String,
    fatal_statuses: Vec<u16>,
}

impl ApiConfig {
    /// Configuration for `service` in an explicit environment.
    pub fn new(service: impl Into<String>, environment: Environment) -> Self {
        Self {
            service: service.into(),
            environment,
            domain: DEFAULT_DOMAIN.to_owned(),
            local_port: DEFAULT_LOCAL_PORT,
            sign_in_location: DEFAULT_SIGN_IN.to_owned(),
            fatal_statuses: DEFAULT_FATAL_STATUSES.to_vec(),
        }
    }

    /// Configuration for `service` with the environment detected from
    /// `hostname` against the default domain.
    pub fn for_host(service: impl Into<String>, hostname: &str) -> Self {
        Self::new(service, Environment::detect(hostname, DEFAULT_DOMAIN))
    }

    /// Set the domain services are published under.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Set the port local services listen on.
    pub fn with_local_port(mut self, port: u16) -> Self {
        self.local_port = port;
        self
    }

    /// Set where unauthenticated users are sent.
    pub fn with_sign_in_location(mut self, location: impl Into<String>) -> Self {
        self.sign_in_location = location.into();
        self
    }

    /// Replace the set of statuses reported as [`ApiError::Status`].
    ///
    /// [`ApiError::Status`]: pulsar_core::ApiError::Status
    pub fn with_fatal_statuses(mut self, statuses: impl IntoIterator<Item = u16>) -> Self {
        self.fatal_statuses = statuses.into_iter().collect();
        self
    }

    /// Service name.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Environment the adapter targets.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Where unauthenticated users are sent.
    pub fn sign_in_location(&self) -> &str {
        &self.sign_in_location
    }

    pub(crate) fn is_fatal(&self, status: u16) -> bool {
        self.fatal_statuses.contains(&status)
    }

    /// Base URL for the service, always ending in `/`.
    pub fn base_url(&self) -> String {
        match self.environment {
            Environment::Local => format!("http://localhost:{}/{}/", self.local_port, self.service),
            Environment::Test => format!("https://{}.tst.{}/", self.service, self.domain),
            Environment::Production => format!("https://{}.{}/", self.service, self.domain),
        }
    }
}
