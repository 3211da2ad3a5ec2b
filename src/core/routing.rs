//! Free-form message routing: explain request or follow-up.

use crate::api::{ExplainRequest, FurtherRequest, Request};

/// Keyword that turns a free-form message into an explain request.
pub const EXPLAIN_KEYWORD: &str = "explain";

/// Case-insensitive check for the explain keyword anywhere in the message.
pub fn is_explain_request(message: &str) -> bool {
    message.to_lowercase().contains(EXPLAIN_KEYWORD)
}

/// Removes the first literal (lowercase) `explain` and trims the rest.
///
/// Only the lowercase spelling is stripped, so `"Explain gravity"` keeps
/// its leading word.
pub fn explain_topic(message: &str) -> String {
    message.replacen(EXPLAIN_KEYWORD, "", 1).trim().to_string()
}

/// Builds the request for a free-form message.
pub fn route(message: &str, role: Option<&str>) -> Request {
    if is_explain_request(message) {
        Request::Explain(ExplainRequest {
            topic: explain_topic(message),
        })
    } else {
        Request::FollowUp(FurtherRequest {
            message: message.to_string(),
            role: role.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explain_keyword_is_case_insensitive() {
        assert!(is_explain_request("explain photosynthesis"));
        assert!(is_explain_request("Can you EXPLAIN this?"));
        assert!(!is_explain_request("explanation please"));
        assert!(!is_explain_request("hello"));
    }

    #[test]
    fn topic_strips_keyword_and_trims() {
        assert_eq!(explain_topic("explain photosynthesis"), "photosynthesis");
        assert_eq!(explain_topic("  please explain   gravity  "), "please    gravity");
    }

    #[test]
    fn topic_strips_only_first_occurrence() {
        assert_eq!(explain_topic("explain explain"), "explain");
    }

    #[test]
    fn capitalized_keyword_is_not_stripped() {
        assert_eq!(explain_topic("Explain gravity"), "Explain gravity");
    }

    #[test]
    fn route_explain() {
        assert_eq!(
            route("explain photosynthesis", Some("student")),
            Request::Explain(ExplainRequest {
                topic: "photosynthesis".to_string()
            })
        );
    }

    #[test]
    fn route_follow_up_keeps_raw_message() {
        assert_eq!(
            route("  hello ", Some("student")),
            Request::FollowUp(FurtherRequest {
                message: "  hello ".to_string(),
                role: Some("student".to_string()),
            })
        );
    }
}
