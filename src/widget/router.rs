use super::*;

impl CommentsWidget {
    /// Attaches the page listeners. Runs once per installation.
    pub(crate) fn register_listeners(&self, host: &mut Harness) -> Result<()> {
        let delegate = host
            .dom
            .query_selector(&self.config.delegate_root)?
            .unwrap_or(host.dom.root);
        host.listeners.add(
            delegate,
            "click".into(),
            Listener {
                filter: TargetFilter::Matches(self.trigger.clone()),
                action: ListenerAction::OpenFromTrigger,
            },
        );

        if let Some(close) = host.dom.by_id(&self.config.close_button_id) {
            host.listeners.add(
                close,
                "click".into(),
                Listener {
                        filter: TargetFilter::Any,
                    action: ListenerAction::CloseModal,
                },
            );
        }

        if let Some(form) = host.dom.by_id(&self.config.form_id) {
            host.listeners.add(
                form,
                "submit".into(),
                Listener {
                        filter: TargetFilter::Any,
                    action: ListenerAction::SubmitForm,
                },
            );
        }
        Ok(())
    }

    pub(crate) fn handle_action(
        &mut self,
        host: &mut Harness,
        action: ListenerAction,
        event: &mut EventState,
    ) -> Result<()> {
        match action {
            ListenerAction::OpenFromTrigger => {
                let Some(post_id) = host.dom.attr(event.target, &self.config.post_id_attribute)
                else {
                    let label = host.trace_node_label(event.target);
                    host.trace_widget_line(format!(
                        "[widget] trigger {label} has no {}",
                        self.config.post_id_attribute
                    ));
                    return Ok(());
                };
                self.open(host, &post_id)?;
                self.load_comments(host, &post_id)
            }
            ListenerAction::CloseModal => self.close(host),
            ListenerAction::SubmitForm => {
                event.prevent_default();
                let post_id = self.field_value(host, &self.config.post_id_input_id)?;
                let content = self.field_value(host, &self.config.content_input_id)?;
                self.submit_comment(host, &post_id, &content)
            }
        }
    }
}
