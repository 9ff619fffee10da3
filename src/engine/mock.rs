use crate::config::{BuildSpec, RegistryLogin};
use crate::domain::Tag;
use crate::engine::{Authenticator, Builder, Publisher};
use crate::error::{ImagePublishError, Result};
use std::sync::Mutex;

/// One recorded engine invocation
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Build { image: String },
    Login { username: String },
    Tag { source: String, target: String },
    Push { target: String },
}

/// Stage at which a [MockEngine] reports failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    Build,
    Login,
    Tag,
    Push,
}

/// Mock engine for testing without real container tooling.
///
/// Records every call, including the failing one, and fails the first call
/// of the configured stage.
pub struct MockEngine {
    calls: Mutex<Vec<EngineCall>>,
    fail_at: Option<FailPoint>,
}

impl MockEngine {
    /// Create a mock engine on which every call succeeds
    pub fn new() -> Self {
        MockEngine {
            calls: Mutex::new(Vec::new()),
            fail_at: None,
        }
    }

    /// Create a mock engine that fails at `point`
    pub fn failing_at(point: FailPoint) -> Self {
        MockEngine {
            calls: Mutex::new(Vec::new()),
            fail_at: Some(point),
        }
    }

    /// All calls recorded so far, in order
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }

    /// References that were pushed, in order
    pub fn pushed(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                EngineCall::Push { target } => Some(target),
                _ => None,
            })
            .collect()
    }

    /// Number of calls that reached the registry (login and push)
    pub fn registry_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, EngineCall::Login { .. } | EngineCall::Push { .. }))
            .count()
    }

    fn record(&self, call: EngineCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn fails_at(&self, point: FailPoint) -> bool {
        self.fail_at == Some(point)
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder for MockEngine {
    fn build(&self, spec: &BuildSpec) -> Result<()> {
        self.record(EngineCall::Build {
            image: spec.image_name.clone(),
        });
        if self.fails_at(FailPoint::Build) {
            return Err(ImagePublishError::build("mock build failure"));
        }
        Ok(())
    }
}

impl Authenticator for MockEngine {
    fn login(&self, login: &RegistryLogin) -> Result<()> {
        self.record(EngineCall::Login {
            username: login.username.clone(),
        });
        if self.fails_at(FailPoint::Login) {
            return Err(ImagePublishError::authentication("mock credential rejected"));
        }
        Ok(())
    }
}

impl Publisher for MockEngine {
    fn tag(&self, source: &str, target: &Tag) -> Result<()> {
        self.record(EngineCall::Tag {
            source: source.to_string(),
            target: target.to_string(),
        });
        if self.fails_at(FailPoint::Tag) {
            return Err(ImagePublishError::tag("mock tag failure"));
        }
        Ok(())
    }

    fn push(&self, target: &Tag) -> Result<()> {
        self.record(EngineCall::Push {
            target: target.to_string(),
        });
        if self.fails_at(FailPoint::Push) {
            return Err(ImagePublishError::push("mock push failure"));
        }
        Ok(())
    }
}
