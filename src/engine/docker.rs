use crate::config::{BuildSpec, RegistryLogin};
use crate::domain::Tag;
use crate::engine::{Authenticator, Builder, Publisher};
use crate::error::{ImagePublishError, Result};
use secrecy::ExposeSecret;
use std::io::Write;
use std::process::{Command, ExitStatus, Stdio};

/// Drives a docker-compatible CLI (`docker`, `podman`, ...).
///
/// Output of the engine is inherited so build logs and native error messages
/// reach the operator's console unchanged.
#[derive(Debug, Clone)]
pub struct DockerEngine {
    program: String,
}

impl DockerEngine {
    pub fn new(program: impl Into<String>) -> Self {
        DockerEngine {
            program: program.into(),
        }
    }

    fn command(&self) -> Command {
        Command::new(&self.program)
    }

    fn build_args(spec: &BuildSpec) -> Vec<String> {
        vec![
            "build".to_string(),
            "-f".to_string(),
            spec.dockerfile.display().to_string(),
            "-t".to_string(),
            spec.image_name.clone(),
            spec.context.display().to_string(),
        ]
    }

    fn login_args(login: &RegistryLogin) -> Vec<String> {
        let mut args = vec![
            "login".to_string(),
            "--username".to_string(),
            login.username.clone(),
            "--password-stdin".to_string(),
        ];
        if let Some(server) = &login.server {
            args.push(server.clone());
        }
        args
    }
}

/// Renders an exit status for error messages.
fn describe_status(status: &ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl Builder for DockerEngine {
    fn build(&self, spec: &BuildSpec) -> Result<()> {
        let status = self
            .command()
            .args(Self::build_args(spec))
            .status()
            .map_err(|e| {
                ImagePublishError::build(format!("Failed to run {}: {}", self.program, e))
            })?;

        if !status.success() {
            return Err(ImagePublishError::build(format!(
                "{} build of '{}' failed with {}",
                self.program,
                spec.image_name,
                describe_status(&status)
            )));
        }

        Ok(())
    }
}

impl Authenticator for DockerEngine {
    fn login(&self, login: &RegistryLogin) -> Result<()> {
        let credential = login.credential.as_ref().ok_or_else(|| {
            ImagePublishError::authentication(format!(
                "No credential found in environment variable {}",
                login.credential_env
            ))
        })?;

        let mut child = self
            .command()
            .args(Self::login_args(login))
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| {
                ImagePublishError::authentication(format!(
                    "Failed to run {}: {}",
                    self.program, e
                ))
            })?;

        // stdin is dropped at the end of this block so the engine sees EOF
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(credential.expose_secret().as_bytes())
                .map_err(|e| {
                    ImagePublishError::authentication(format!(
                        "Failed to pass credential to {}: {}",
                        self.program, e
                    ))
                })?;
        }

        let status = child.wait().map_err(|e| {
            ImagePublishError::authentication(format!("Failed to wait for {}: {}", self.program, e))
        })?;

        if !status.success() {
            return Err(ImagePublishError::authentication(format!(
                "{} login as '{}' failed with {}",
                self.program,
                login.username,
                describe_status(&status)
            )));
        }

        Ok(())
    }
}

impl Publisher for DockerEngine {
    fn tag(&self, source: &str, target: &Tag) -> Result<()> {
        let reference = target.to_string();
        let status = self
            .command()
            .args(["tag", source, reference.as_str()])
            .status()
            .map_err(|e| ImagePublishError::tag(format!("Failed to run {}: {}", self.program, e)))?;

        if !status.success() {
            return Err(ImagePublishError::tag(format!(
                "{} tag {} {} failed with {}",
                self.program,
                source,
                reference,
                describe_status(&status)
            )));
        }

        Ok(())
    }

    fn push(&self, target: &Tag) -> Result<()> {
        let reference = target.to_string();
        let status = self
            .command()
            .args(["push", reference.as_str()])
            .status()
            .map_err(|e| {
                ImagePublishError::push(format!("Failed to run {}: {}", self.program, e))
            })?;

        if !status.success() {
            return Err(ImagePublishError::push(format!(
                "{} push {} failed with {}",
                self.program,
                reference,
                describe_status(&status)
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImageRepository;
    use secrecy::SecretString;

    fn login(server: Option<&str>, credential: Option<&str>) -> RegistryLogin {
        RegistryLogin {
            server: server.map(str::to_string),
            username: "acme".to_string(),
            credential_env: "DOCKER_PASSWORD".to_string(),
            credential: credential.map(|c| SecretString::new(c.to_string().into())),
        }
    }

    #[test]
    fn test_build_args() {
        let spec = BuildSpec {
            dockerfile: "Dockerfile".into(),
            context: ".".into(),
            image_name: "electrs".to_string(),
        };
        assert_eq!(
            DockerEngine::build_args(&spec),
            vec!["build", "-f", "Dockerfile", "-t", "electrs", "."]
        );
    }

    #[test]
    fn test_login_args_never_include_secret() {
        let args = DockerEngine::login_args(&login(Some("ghcr.io"), Some("s3cret")));
        assert_eq!(
            args,
            vec!["login", "--username", "acme", "--password-stdin", "ghcr.io"]
        );
        assert!(!args.iter().any(|a| a.contains("s3cret")));
    }

    #[test]
    fn test_login_without_credential_fails_before_spawning() {
        let engine = DockerEngine::new("/nonexistent/engine");
        let err = engine.login(&login(None, None)).unwrap_err();
        assert!(matches!(err, ImagePublishError::Authentication(_)));
        assert!(err.to_string().contains("DOCKER_PASSWORD"));
    }

    #[test]
    fn test_missing_program_maps_to_stage_error() {
        let engine = DockerEngine::new("/nonexistent/engine");
        let tag = Tag::latest(ImageRepository::new("acme", "electrs"));

        assert!(matches!(
            engine.tag("electrs", &tag),
            Err(ImagePublishError::Tag(_))
        ));
        assert!(matches!(engine.push(&tag), Err(ImagePublishError::Push(_))));
    }
}
