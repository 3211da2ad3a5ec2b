//! Wire types for the chat backend.
//!
//! Field names follow the backend's JSON (camelCase). Response types only
//! declare the fields the client reads; anything else in the body is ignored.

use serde::{Deserialize, Serialize};

/// The user profile sent along with the bootstrap request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub role: String,
}

/// Body of `POST /api/chat/saveResponse`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SaveResponseRequest {
    pub user: UserProfile,
    pub role: String,
    pub step: u32,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponseReply {
    pub next_question: String,
}

/// Body of `POST /api/explain`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExplainRequest {
    pub topic: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExplainReply {
    pub explanation: String,
    /// Mermaid source for the accompanying diagram
    pub diagram: String,
}

/// Body of `POST /api/chat/furtherRequest`.
///
/// `role` is omitted from the JSON when no role is configured.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FurtherRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FurtherReply {
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_response_request_serializes_user_object() {
        let req = SaveResponseRequest {
            user: UserProfile {
                role: "student".to_string(),
            },
            role: "student".to_string(),
            step: 0,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "user": { "role": "student" }, "role": "student", "step": 0 })
        );
    }

    #[test]
    fn save_response_reply_reads_camel_case() {
        let reply: SaveResponseReply =
            serde_json::from_str(r#"{"nextQuestion":"What is your name?","extra":1}"#).unwrap();
        assert_eq!(reply.next_question, "What is your name?");
    }

    #[test]
    fn further_request_omits_missing_role() {
        let req = FurtherRequest {
            message: "hello".to_string(),
            role: None,
        };
        assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"message":"hello"}"#);
    }

    #[test]
    fn explain_reply_requires_diagram() {
        let parsed = serde_json::from_str::<ExplainReply>(r#"{"explanation":"text"}"#);
        assert!(parsed.is_err());
    }
}
