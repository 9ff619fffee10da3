//! Container engine abstraction layer
//!
//! The pipeline talks to the build engine and the registry through three
//! capability traits so tests can substitute fakes for real container tooling.
//!
//! - [Builder]: builds the local image
//! - [Authenticator]: logs in to the registry
//! - [Publisher]: tags and pushes references
//!
//! Implementations:
//!
//! - [docker::DockerEngine]: drives a docker-compatible CLI
//! - [mock::MockEngine]: records calls and injects failures for testing

pub mod docker;
pub mod mock;

pub use docker::DockerEngine;
pub use mock::{EngineCall, FailPoint, MockEngine};

use crate::config::{BuildSpec, RegistryLogin};
use crate::domain::Tag;
use crate::error::Result;

/// Builds a local image from a build definition and context.
pub trait Builder: Send + Sync {
    /// Build the image described by `spec`, labelling it `spec.image_name`.
    ///
    /// Any prior local image of the same name is replaced.
    ///
    /// # Returns
    /// * `Ok(())` - The engine exited successfully
    /// * `Err(ImagePublishError::Build)` - The engine failed or could not start
    fn build(&self, spec: &BuildSpec) -> Result<()>;
}

/// Establishes a registry session.
pub trait Authenticator: Send + Sync {
    /// Log in with the credential carried by `login`.
    ///
    /// A missing credential is reported here, as an authentication failure.
    fn login(&self, login: &RegistryLogin) -> Result<()>;
}

/// Creates tag references and pushes them to the registry.
pub trait Publisher: Send + Sync {
    /// Point `target` at the local image `source`.
    fn tag(&self, source: &str, target: &Tag) -> Result<()>;

    /// Push `target` to the registry using the current session.
    fn push(&self, target: &Tag) -> Result<()>;
}

/// The three capabilities one pipeline run uses.
#[derive(Clone, Copy)]
pub struct Capabilities<'a> {
    pub builder: &'a dyn Builder,
    pub authenticator: &'a dyn Authenticator,
    pub publisher: &'a dyn Publisher,
}

impl<'a> Capabilities<'a> {
    /// Use a single engine for every capability.
    pub fn from_engine<E>(engine: &'a E) -> Self
    where
        E: Builder + Authenticator + Publisher,
    {
        Capabilities {
            builder: engine,
            authenticator: engine,
            publisher: engine,
        }
    }
}
