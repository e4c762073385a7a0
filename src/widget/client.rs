use super::*;

use crate::fetch::RequestInit;
use crate::widget::model::error_message_from_body;

/// Issues monotonically increasing tickets and remembers the newest one per post.
///
/// Posts with an accepted submission also owe a badge refresh, which the
/// next applied list response for that post pays off.
#[derive(Debug, Default)]
pub(crate) struct RequestSequencer {
    issued: u64,
    latest: HashMap<String, u64>,
    badge_owed: HashSet<String>,
}

impl RequestSequencer {
    pub(crate) fn issue(&mut self, post_id: &str) -> u64 {
        self.issued += 1;
        self.latest.insert(post_id.to_string(), self.issued);
        self.issued
    }

    pub(crate) fn is_latest(&self, post_id: &str, ticket: u64) -> bool {
        self.latest.get(post_id) == Some(&ticket)
    }

    pub(crate) fn owe_badge(&mut self, post_id: &str) {
        self.badge_owed.insert(post_id.to_string());
    }

    pub(crate) fn take_badge_owed(&mut self, post_id: &str) -> bool {
        self.badge_owed.remove(post_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InFlight {
    List {
        post_id: String,
        ticket: u64,
    },
    Submit {
        post_id: String,
    },
}

impl CommentsWidget {
    pub(crate) fn load_comments(&mut self, host: &mut Harness, post_id: &str) -> Result<()> {
        let ticket = self.sequencer.issue(post_id);
        let id = host.start_fetch(RequestInit::get(self.config.comments_url(post_id)));
        host.trace_widget_line(format!(
            "[widget] load post={post_id} ticket={ticket} fetch={id}"
        ));
        self.in_flight.insert(
            id,
            InFlight::List {
                post_id: post_id.to_string(),
                ticket,
            },
        );
        Ok(())
    }

    /// Posts trimmed `content` for `post_id`. Blank content sends nothing.
    pub(crate) fn submit_comment(
        &mut self,
        host: &mut Harness,
        post_id: &str,
        content: &str,
    ) -> Result<()> {
        let content = content.trim();
        if content.is_empty() {
            host.trace_widget_line(format!("[widget] submit post={post_id} skipped: empty"));
            return Ok(());
        }
        let init = RequestInit::post_form(
            self.config.add_comment_url.clone(),
            &[("post_id", post_id), ("content", content)],
        );
        let id = host.start_fetch(init);
        host.trace_widget_line(format!("[widget] submit post={post_id} fetch={id}"));
        self.in_flight.insert(
            id,
            InFlight::Submit {
                post_id: post_id.to_string(),
            },
        );
        Ok(())
    }

    pub(crate) fn on_fetch_settled(
        &mut self,
        host: &mut Harness,
        id: FetchId,
        outcome: FetchOutcome,
    ) -> Result<()> {
        match self.in_flight.remove(&id) {
            Some(InFlight::List { post_id, ticket }) => {
                self.on_list_settled(host, &post_id, ticket, outcome)
            }
            Some(InFlight::Submit { post_id }) => self.on_submit_settled(host, &post_id, outcome),
            None => Ok(()),
        }
    }

    fn on_list_settled(
        &mut self,
        host: &mut Harness,
        post_id: &str,
        ticket: u64,
        outcome: FetchOutcome,
    ) -> Result<()> {
        if !self.sequencer.is_latest(post_id, ticket) {
            host.trace_widget_line(format!(
                "[widget] discard post={post_id} ticket={ticket}: superseded"
            ));
            return Ok(());
        }

        let parsed = match outcome {
            FetchOutcome::Response(response) if response.ok() => response
                .json::<CommentListResponse>()
                .map_err(|err| format!("invalid comments payload: {err}")),
            FetchOutcome::Response(response) => Err(format!("HTTP {}", response.status)),
            FetchOutcome::NetworkError(message) => Err(message),
        };

        // A failed load keeps the debt for the next response.
        if let Ok(data) = &parsed {
            if self.sequencer.take_badge_owed(post_id) {
                let badge_id = self.config.count_badge_id(post_id);
                if let Some(badge) = host.dom.by_id(&badge_id) {
                    host.dom
                        .set_text_content(badge, &data.comments().len().to_string())?;
                }
            }
        }

        let shown = self
            .displayed_post
            .as_deref()
            .is_none_or(|shown| shown == post_id);
        if !shown {
            host.trace_widget_line(format!(
                "[widget] discard post={post_id} ticket={ticket}: modal shows another post"
            ));
        } else if let Some(list) = host.dom.by_id(&self.config.list_id) {
            match &parsed {
                Ok(data) => {
                    let rows =
                        render_comment_list(&mut host.dom, list, data.comments(), &self.config)?;
                    host.trace_widget_line(format!(
                        "[widget] render post={post_id} ticket={ticket} rows={rows}"
                    ));
                }
                Err(_) => render_load_error(&mut host.dom, list, &self.config)?,
            }
        }

        if let Err(detail) = parsed {
            host.console_error(format!("Failed to load comments: {detail}"));
        }
        Ok(())
    }

    fn on_submit_settled(
        &mut self,
        host: &mut Harness,
        post_id: &str,
        outcome: FetchOutcome,
    ) -> Result<()> {
        let response = match outcome {
            FetchOutcome::Response(response) => response,
            FetchOutcome::NetworkError(message) => {
                host.console_error(format!("Error posting comment: {message}"));
                return self.report_submit_error(host, &self.config.submit_error_text);
            }
        };

        if !response.ok() {
            host.console_error(format!("Error posting comment: HTTP {}", response.status));
            let message = error_message_from_body(&response.body)
                .unwrap_or_else(|| self.config.submit_error_text.clone());
            return self.report_submit_error(host, &message);
        }

        match AddCommentResult::from_json(&response.body) {
            Ok(AddCommentResult::Accepted) => {
                if let Some(input) = host.dom.by_id(&self.config.content_input_id) {
                    host.dom.set_value(input, "")?;
                }
                self.clear_notice(host)?;
                self.sequencer.owe_badge(post_id);
                self.load_comments(host, post_id)
            }
            Ok(AddCommentResult::Rejected(message)) => self.report_submit_error(host, &message),
            Ok(AddCommentResult::Ignored) => {
                host.trace_widget_line(format!(
                    "[widget] submit post={post_id} response ignored"
                ));
                Ok(())
            }
            Err(err) => {
                host.console_error(format!("Error posting comment: {err}"));
                self.report_submit_error(host, &self.config.submit_error_text)
            }
        }
    }

    fn report_submit_error(&self, host: &mut Harness, message: &str) -> Result<()> {
        if let ErrorPresentation::Notice { element_id } = &self.config.error_presentation {
            if let Some(notice) = host.dom.by_id(element_id) {
                return host.dom.set_text_content(notice, message);
            }
        }
        host.alert(message);
        Ok(())
    }

    fn clear_notice(&self, host: &mut Harness) -> Result<()> {
        if let ErrorPresentation::Notice { element_id } = &self.config.error_presentation {
            if let Some(notice) = host.dom.by_id(element_id) {
                host.dom.set_text_content(notice, "")?;
            }
        }
        Ok(())
    }
}
