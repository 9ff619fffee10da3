use crate::domain::VersionString;
use std::fmt;

/// Registry repository an image is published to (`namespace/name`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRepository {
    pub namespace: String,
    pub name: String,
}

impl ImageRepository {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        ImageRepository {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ImageRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Represents an image tag. A missing suffix is the implicit "latest" reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub repository: ImageRepository,
    pub suffix: Option<String>,
}

impl Tag {
    /// Version-pinned tag (`ns/img:1.2.3`)
    pub fn versioned(repository: ImageRepository, version: impl Into<String>) -> Self {
        Tag {
            repository,
            suffix: Some(version.into()),
        }
    }

    /// Unversioned tag (`ns/img`)
    pub fn latest(repository: ImageRepository) -> Self {
        Tag {
            repository,
            suffix: None,
        }
    }

    pub fn is_versioned(&self) -> bool {
        self.suffix.is_some()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.suffix {
            Some(suffix) => write!(f, "{}:{}", self.repository, suffix),
            None => write!(f, "{}", self.repository),
        }
    }
}

/// Why the versioned tag was left out of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    PreRelease,
    MissingVersion,
}

/// The tags a single run creates and pushes.
#[derive(Debug, Clone, PartialEq)]
pub struct TagPlan {
    pub versioned: Option<Tag>,
    pub latest: Tag,
    pub skipped: Option<SkipReason>,
}

impl TagPlan {
    /// Build the plan for a version.
    ///
    /// Pre-release versions never get a version-pinned tag, and an empty
    /// version never produces the degenerate `ns/img:` reference. The
    /// unversioned tag is always present.
    pub fn new(repository: &ImageRepository, version: &VersionString) -> Self {
        let latest = Tag::latest(repository.clone());

        if version.is_prerelease() {
            return TagPlan {
                versioned: None,
                latest,
                skipped: Some(SkipReason::PreRelease),
            };
        }

        if version.is_empty() {
            return TagPlan {
                versioned: None,
                latest,
                skipped: Some(SkipReason::MissingVersion),
            };
        }

        TagPlan {
            versioned: Some(Tag::versioned(repository.clone(), version.as_str())),
            latest,
            skipped: None,
        }
    }

    /// Planned tags in creation/push order, versioned first.
    pub fn tags(&self) -> Vec<&Tag> {
        self.versioned
            .iter()
            .chain(std::iter::once(&self.latest))
            .collect()
    }
}
