use super::*;

impl CommentsWidget {
    /// Shows the modal for `post_id` with the loading placeholder in place.
    pub(crate) fn open(&mut self, host: &mut Harness, post_id: &str) -> Result<()> {
        if let Some(hide) = self.pending_hide.take() {
            host.clear_timeout(hide);
        }
        if let Some(frame) = self.pending_frame.take() {
            host.clear_timeout(frame);
        }

        if let Some(input) = host.dom.by_id(&self.config.post_id_input_id) {
            host.dom.set_value(input, post_id)?;
        }
        if let Some(list) = host.dom.by_id(&self.config.list_id) {
            host.dom.set_text_content(list, &self.config.loading_text)?;
        }
        self.displayed_post = Some(post_id.to_string());

        let Some(modal) = host.dom.by_id(&self.config.modal_id) else {
            host.trace_widget_line(format!(
                "[widget] open post={post_id} skipped: #{} missing",
                self.config.modal_id
            ));
            return Ok(());
        };
        host.dom.style_set(modal, "display", "block")?;

        if let Some(panel) = self.find_content_panel(host, modal) {
            let ms = self.config.transition_ms;
            host.dom.style_set(panel, "opacity", "0")?;
            host.dom.style_set(panel, "transform", "scale(0.96) translateY(-6px)")?;
            host.dom.style_set(
                panel,
                "transition",
                &format!("transform {ms}ms ease-out, opacity {ms}ms ease-out"),
            )?;
            self.pending_frame = Some(host.request_animation_frame());
        }
        host.trace_widget_line(format!("[widget] open post={post_id}"));
        Ok(())
    }

    pub(crate) fn close(&mut self, host: &mut Harness) -> Result<()> {
        if let Some(frame) = self.pending_frame.take() {
            host.clear_timeout(frame);
        }
        let Some(modal) = host.dom.by_id(&self.config.modal_id) else {
            return Ok(());
        };

        match self.find_content_panel(host, modal) {
            Some(panel) => {
                host.dom.style_set(panel, "opacity", "0")?;
                host.dom.style_set(panel, "transform", "scale(0.98) translateY(-6px)")?;
                if let Some(previous) = self.pending_hide.take() {
                    host.clear_timeout(previous);
                }
                self.pending_hide = Some(host.set_timeout(i64::from(self.config.transition_ms)));
            }
            None => host.dom.style_set(modal, "display", "none")?,
        }
        host.trace_widget_line("[widget] close".into());
        Ok(())
    }

    pub(crate) fn on_timer(&mut self, host: &mut Harness, timer_id: i64) -> Result<()> {
        if self.pending_frame == Some(timer_id) {
            self.pending_frame = None;
            let panel = match host.dom.by_id(&self.config.modal_id) {
                Some(modal) => self.find_content_panel(host, modal),
                None => None,
            };
            if let Some(panel) = panel {
                host.dom.style_set(panel, "opacity", "1")?;
                host.dom.style_set(panel, "transform", "scale(1) translateY(0)")?;
            }
        } else if self.pending_hide == Some(timer_id) {
            self.pending_hide = None;
            if let Some(modal) = host.dom.by_id(&self.config.modal_id) {
                host.dom.style_set(modal, "display", "none")?;
            }
            host.trace_widget_line("[widget] hidden".into());
        }
        Ok(())
    }

    fn find_content_panel(&self, host: &Harness, modal: NodeId) -> Option<NodeId> {
        host.dom
            .select_all_from(modal, &self.content_panel)
            .into_iter()
            .next()
    }
}
