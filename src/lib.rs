//! Post comments modal widget on a deterministic in-memory browser host.
//!
//! The [`Harness`] owns a parsed page, a virtual clock, a mocked fetch
//! transport and captured `alert`/`console.error` output. Installing the
//! comments widget wires its listeners into the page; tests then drive the
//! page with user actions and settle network traffic explicitly:
//!
//! ```no_run
//! use comments_widget::{FetchMock, Harness, Method, Result, WidgetConfig};
//!
//! fn demo(page_html: &str) -> Result<()> {
//!     let mut h = Harness::from_html(page_html)?;
//!     h.install_comments_widget(WidgetConfig::default())?;
//!     h.set_fetch_mock(
//!         Method::Get,
//!         "/comments/42",
//!         FetchMock::json(200, r#"{"comments":[]}"#),
//!     );
//!     h.click("#open-42")?;
//!     h.settle_fetches()?;
//!     h.assert_text("#comments-list", "No comments yet. Be the first to comment!")?;
//!     Ok(())
//! }
//! ```

use std::collections::{HashMap, HashSet, VecDeque};

mod dom;
mod fetch;
mod harness;
mod html;
mod runtime_state;
mod selector;
mod widget;


use dom::{Dom, NodeId};
use runtime_state::{
    EventState, Listener, ListenerAction, ListenerStore, NetworkState, PlatformCaptureState,
    ScheduledTask, SchedulerState, TargetFilter, TraceState,
};

pub use fetch::{Credentials, FetchId, FetchMock, FetchOutcome, FetchRequest, FetchResponse, Method};
pub use harness::Harness;
pub use runtime_state::{PendingTimer, TimerKind};
pub use widget::{
    AddCommentResult, Comment, CommentListResponse, ErrorPresentation, WidgetConfig,
    avatar_initials, profile_href,
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("html parse error: {0}")]
    HtmlParse(String),
    #[error("runtime error: {0}")]
    Runtime(String),
    #[error("selector not found: {0}")]
    SelectorNotFound(String),
    #[error("unsupported selector: {0}")]
    UnsupportedSelector(String),
    #[error("type mismatch for {selector}: expected {expected}, actual {actual}")]
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    #[error(
        "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
    )]
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
    #[error("fetch mock not found for request: {method} {url}")]
    FetchMockNotFound { method: String, url: String },
    #[error("invalid widget config: {0}")]
    Config(String),
}
