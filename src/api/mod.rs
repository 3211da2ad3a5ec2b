pub mod backend;
pub mod client;
pub mod dispatch;
pub mod types;

pub use backend::{ApiError, ChatBackend};
pub use client::HttpBackend;
pub use dispatch::{Outcome, Request, perform};
pub use types::{
    ExplainReply, ExplainRequest, FurtherReply, FurtherRequest, SaveResponseReply,
    SaveResponseRequest, UserProfile,
};
