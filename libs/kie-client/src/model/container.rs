use serde::{Deserialize, Serialize};

use super::KieDate;

/// Maven coordinates of a deployed kjar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReleaseId {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl std::fmt::Display for ReleaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// Lifecycle state of a container on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KieContainerStatus {
    Creating,
    Started,
    Failed,
    Disposing,
    Stopped,
    Deactivated,
}

/// Message attached to a container by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerMessage {
    pub severity: String,

    #[serde(default)]
    pub timestamp: Option<KieDate>,

    #[serde(default)]
    pub content: Vec<String>,
}

/// A deployed container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KieContainerResource {
    pub container_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_alias: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_id: Option<ReleaseId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_release_id: Option<ReleaseId>,

    pub status: KieContainerStatus,

    #[serde(default)]
    pub messages: Vec<ContainerMessage>,
}

impl KieContainerResource {
    /// A started container with the given id and release.
    pub fn started(container_id: impl Into<String>, release_id: ReleaseId) -> Self {
        Self {
            container_id: container_id.into(),
            container_alias: None,
            release_id: Some(release_id.clone()),
            resolved_release_id: Some(release_id),
            status: KieContainerStatus::Started,
            messages: Vec::new(),
        }
    }
}

/// Container inventory, `{"kie-container": [...]}` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KieContainerResourceList {
    #[serde(rename = "kie-container", default)]
    containers: Vec<KieContainerResource>,
}

impl KieContainerResourceList {
    pub fn new(containers: Vec<KieContainerResource>) -> Self {
        Self { containers }
    }

    pub fn containers(&self) -> &[KieContainerResource] {
        &self.containers
    }

    pub fn into_containers(self) -> Vec<KieContainerResource> {
        self.containers
    }
}

/// `{"kie-containers": {...}}` wrapper used in the response payload.
#[derive(Debug, Deserialize)]
pub(crate) struct ContainerListEnvelope {
    #[serde(rename = "kie-containers", default)]
    pub kie_containers: KieContainerResourceList,
}
