use super::*;

use crate::html::parse_html;
use crate::widget::{CommentsWidget, WidgetConfig};

mod assertions;
mod events;
mod network;
mod timers;
mod trace;

/// A parsed page with its own clock, fetch transport and captured output.
#[derive(Debug)]
pub struct Harness {
    pub(crate) dom: Dom,
    pub(crate) listeners: ListenerStore,
    pub(crate) scheduler: SchedulerState,
    pub(crate) network: NetworkState,
    pub(crate) platform: PlatformCaptureState,
    pub(crate) trace_state: TraceState,
    pub(crate) widget: Option<CommentsWidget>,
}

impl Harness {
    pub fn from_html(html: &str) -> Result<Self> {
        let parsed = parse_html(html)?;
        tracing::debug!(nodes = parsed.dom.nodes.len(), "page parsed");
        Ok(Self {
            dom: parsed.dom,
            listeners: ListenerStore::default(),
            scheduler: SchedulerState::default(),
            network: NetworkState::default(),
            platform: PlatformCaptureState::default(),
            trace_state: TraceState::default(),
            widget: None,
        })
    }

    /// Wires the comments widget into the current page.
    ///
    /// Listeners are registered once here; later calls to the widget never
    /// attach more. Installing twice on the same page is an error.
    pub fn install_comments_widget(&mut self, config: WidgetConfig) -> Result<()> {
        if self.widget.is_some() {
            return Err(Error::Runtime(
                "comments widget is already installed on this page".into(),
            ));
        }
        let widget = CommentsWidget::new(config)?;
        widget.register_listeners(self)?;
        self.widget = Some(widget);
        self.trace_widget_line(format!(
            "[widget] installed listeners={}",
            self.listeners.len()
        ));
        Ok(())
    }

    pub fn widget_installed(&self) -> bool {
        self.widget.is_some()
    }

    /// Number of event listeners currently registered on the page.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Shows the modal for `post_id` without requesting its comments.
    pub fn open_comments_modal(&mut self, post_id: &str) -> Result<()> {
        self.with_installed_widget(|widget, host| widget.open(host, post_id))
    }

    pub fn close_comments_modal(&mut self) -> Result<()> {
        self.with_installed_widget(|widget, host| widget.close(host))
    }

    /// Requests the comment list for `post_id`; it renders once the request settles.
    pub fn load_comments(&mut self, post_id: &str) -> Result<()> {
        self.with_installed_widget(|widget, host| widget.load_comments(host, post_id))
    }

    pub fn submit_comment(&mut self, post_id: &str, content: &str) -> Result<()> {
        self.with_installed_widget(|widget, host| widget.submit_comment(host, post_id, content))
    }

    pub(crate) fn with_widget<R>(
        &mut self,
        f: impl FnOnce(&mut CommentsWidget, &mut Harness) -> Result<R>,
    ) -> Result<Option<R>> {
        let Some(mut widget) = self.widget.take() else {
            return Ok(None);
        };
        let result = f(&mut widget, self);
        self.widget = Some(widget);
        result.map(Some)
    }

    fn with_installed_widget<R>(
        &mut self,
        f: impl FnOnce(&mut CommentsWidget, &mut Harness) -> Result<R>,
    ) -> Result<R> {
        self.with_widget(f)?
            .ok_or_else(|| Error::Runtime("comments widget is not installed".into()))
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }
}
