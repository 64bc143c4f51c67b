use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Bot => "bot",
        }
    }

    pub fn is_user(self) -> bool {
        self == Role::User
    }
}

impl AsRef<str> for Role {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<&str> for Role {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(Role::User),
            "bot" => Ok(Role::Bot),
            _ => Err(format!("invalid message role: {value}")),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

/// Whether a message body is prose or the contents of a fenced code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MessageKind {
    Text,
    Code,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Code => "code",
        }
    }
}

impl TryFrom<&str> for MessageKind {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "text" => Ok(MessageKind::Text),
            "code" => Ok(MessageKind::Code),
            _ => Err(format!("invalid message kind: {value}")),
        }
    }
}

impl TryFrom<String> for MessageKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<MessageKind> for String {
    fn from(value: MessageKind) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Stored under the `type` key in serialized history.
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            role,
            content: content.into(),
            kind,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content, MessageKind::Text)
    }

    pub fn bot_text(content: impl Into<String>) -> Self {
        Self::new(Role::Bot, content, MessageKind::Text)
    }

    pub fn bot_code(content: impl Into<String>) -> Self {
        Self::new(Role::Bot, content, MessageKind::Code)
    }

    pub fn is_code(&self) -> bool {
        self.kind == MessageKind::Code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_strings_round_trip() {
        for role in [Role::User, Role::Bot] {
            assert_eq!(Role::try_from(role.as_str()), Ok(role));
        }
    }

    #[test]
    fn invalid_role_strings_are_rejected() {
        assert!(Role::try_from("assistant").is_err());
        assert!(Role::try_from("").is_err());
    }

    #[test]
    fn kind_serializes_as_type_field() {
        let encoded = serde_json::to_string(&Message::bot_code("fn main() {}")).unwrap();
        assert!(encoded.contains(r#""type":"code""#));
        assert!(encoded.contains(r#""role":"bot""#));
    }

    #[test]
    fn constructors_set_roles_and_kinds() {
        assert_eq!(Message::user("hi").role, Role::User);
        assert_eq!(Message::user("hi").kind, MessageKind::Text);
        assert!(Message::bot_code("x").is_code());
        assert!(!Message::bot_text("x").is_code());
    }
}
