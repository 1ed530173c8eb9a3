//! Generation request types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::DeploymentKey;

/// Author of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    System,
    Assistant,
}

/// A single conversation message passed to a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Request to invoke a deployment.
///
/// Carries the symbolic deployment, named template variables, and the
/// conversation content the deployment should respond to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub deployment: DeploymentKey,
    pub inputs: BTreeMap<String, String>,
    pub messages: Vec<Message>,
}

impl GenerationRequest {
    /// Creates an empty request for the given deployment.
    pub fn new(deployment: DeploymentKey) -> Self {
        Self {
            deployment,
            inputs: BTreeMap::new(),
            messages: Vec::new(),
        }
    }

    /// Sets a named template variable.
    #[must_use]
    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.insert(name.into(), value.into());
        self
    }

    /// Appends a user message.
    #[must_use]
    pub fn with_user_message(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::user(content));
        self
    }

    /// Returns the total length of all message contents in bytes.
    pub fn content_len(&self) -> usize {
        self.messages.iter().map(|m| m.content.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_inputs_and_messages() {
        let request = GenerationRequest::new(DeploymentKey::Simplification)
            .with_input("language", "Dutch")
            .with_input("level", "Basic")
            .with_user_message("{}");

        assert_eq!(request.inputs.len(), 2);
        assert_eq!(request.inputs["language"], "Dutch");
        assert_eq!(request.messages, vec![Message::user("{}")]);
        assert_eq!(request.content_len(), 2);
    }

    #[test]
    fn message_serializes_lowercase_role() {
        let json = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hi");
    }
}
