use super::*;

use crate::selector::Selector;

mod client;
mod config;
mod modal;
mod model;
mod render;
mod router;

pub(crate) use client::{InFlight, RequestSequencer};
pub use config::{ErrorPresentation, WidgetConfig};
pub use model::{AddCommentResult, Comment, CommentListResponse};
pub(crate) use render::{render_comment_list, render_load_error};
pub use render::{avatar_initials, profile_href};

/// Comments modal state attached to one page.
///
/// The widget owns no DOM nodes. Every operation resolves its elements by id
/// through the host, so markup replaced after installation is picked up.
#[derive(Debug)]
pub(crate) struct CommentsWidget {
    config: WidgetConfig,
    trigger: Selector,
    content_panel: Selector,
    sequencer: RequestSequencer,
    in_flight: HashMap<FetchId, InFlight>,
    /// Post the modal was last opened for.
    displayed_post: Option<String>,
    pending_frame: Option<i64>,
    pending_hide: Option<i64>,
}

impl CommentsWidget {
    pub(crate) fn new(config: WidgetConfig) -> Result<Self> {
        config.validate()?;
        let trigger = Selector::parse(&config.trigger_selector)?;
        let content_panel = Selector::parse(&config.content_selector)?;
        Ok(Self {
            config,
            trigger,
            content_panel,
            sequencer: RequestSequencer::default(),
            in_flight: HashMap::new(),
            displayed_post: None,
            pending_frame: None,
            pending_hide: None,
        })
    }

    fn field_value(&self, host: &Harness, element_id: &str) -> Result<String> {
        match host.dom.by_id(element_id) {
            Some(node) => host.dom.value(node),
            None => Ok(String::new()),
        }
    }
}
