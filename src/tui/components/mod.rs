//! # TUI Components
//!
//! Stateless components receive everything as props:
//! - `TitleBar`: role, phase, status, spinner
//! - `Message`: one transcript entry (markdown or diagram panel)
//!
//! Stateful components keep local state and emit events:
//! - `InputBox`: multi-line editor, disabled while a request is in flight
//! - `MessageList`: scrollable transcript with layout caching and stick-to-bottom
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── message.rs
//! ├── diagram.rs       (diagram panel content)
//! ├── message_list.rs
//! └── input_box/
//! ```

pub mod diagram;
pub mod input_box;
pub mod message;
pub mod message_list;
mod title_bar;

pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use title_bar::{SPINNER_FRAMES, TitleBar};
