use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// An installed model as reported by the model server.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
    /// Size on disk in bytes.
    pub size: u64,
}

impl ModelDescriptor {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Display label for the model selector, e.g. `llama3.1 (4.7 Gb)`.
    pub fn label(&self) -> String {
        let gigabytes = (self.size as f64 / 1e9 * 10.0).round() / 10.0;
        format!("{} ({:.1} Gb)", self.name, gigabytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_to_one_decimal() {
        assert_eq!(ModelDescriptor::new("a", 1_000_000_000).label(), "a (1.0 Gb)");
        assert_eq!(ModelDescriptor::new("b", 2_500_000_000).label(), "b (2.5 Gb)");
        assert_eq!(
            ModelDescriptor::new("llama3.1:latest", 4_661_224_676).label(),
            "llama3.1:latest (4.7 Gb)"
        );
        assert_eq!(ModelDescriptor::new("tiny", 0).label(), "tiny (0.0 Gb)");
    }

    #[test]
    fn roles_serialize_lowercase() {
        let msg = ChatMessage::system("be brief");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"role":"system","content":"be brief"}"#);

        let parsed: ChatMessage =
            serde_json::from_str(r#"{"role":"assistant","content":"ok"}"#).unwrap();
        assert_eq!(parsed, ChatMessage::assistant("ok"));

        for role in [Role::System, Role::User, Role::Assistant] {
            assert_eq!(serde_json::to_value(role).unwrap(), role.as_str());
        }
    }
}
