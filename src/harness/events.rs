use super::*;

impl Harness {
    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.click_node(target)
    }

    /// Replaces the value of a text control and fires `input`.
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let tag = self.dom.tag_name(target).unwrap_or_default().to_string();
        let input_type = self
            .dom
            .attr(target, "type")
            .unwrap_or_else(|| "text".to_string())
            .to_ascii_lowercase();
        let typable = tag.eq_ignore_ascii_case("textarea")
            || (tag.eq_ignore_ascii_case("input")
                && !matches!(
                    input_type.as_str(),
                    "hidden" | "checkbox" | "radio" | "submit" | "button" | "reset" | "image"
                ));
        if !typable {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "text input or textarea".into(),
                actual: if tag.eq_ignore_ascii_case("input") {
                    format!("input[type={input_type}]")
                } else {
                    tag
                },
            });
        }
        if self.dom.has_attr(target, "disabled") || self.dom.has_attr(target, "readonly") {
            return Ok(());
        }
        self.dom.set_value(target, text)?;
        self.dispatch_event(target, "input")?;
        Ok(())
    }

    /// Requests submission of the form owning `selector`, as pressing Enter would.
    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let form = self.resolve_form_for_submit(target).ok_or_else(|| {
            Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "form or form control".into(),
                actual: self.dom.tag_name(target).unwrap_or_default().to_string(),
            }
        })?;
        self.request_form_submit(form)
    }

    /// Dispatches a bubbling event. Returns `false` when a listener called
    /// `preventDefault`.
    pub fn dispatch(&mut self, selector: &str, event_type: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        let event = self.dispatch_event(target, event_type)?;
        Ok(!event.default_prevented)
    }

    /// Inserts markup at the end of the first element matching `selector`.
    pub fn append_html(&mut self, selector: &str, html: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dom.append_html(target, html)
    }

    pub fn set_inner_html(&mut self, selector: &str, html: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dom.set_inner_html(target, html)
    }

    pub(crate) fn click_node(&mut self, target: NodeId) -> Result<()> {
        if self.dom.has_attr(target, "disabled") {
            let label = self.trace_node_label(target);
            self.trace_event_line(format!("[event] click skipped target={label} disabled"));
            return Ok(());
        }

        let click = self.dispatch_event(target, "click")?;
        if click.default_prevented {
            return Ok(());
        }

        if is_submit_control(&self.dom, target) {
            if let Some(form) = self.dom.find_ancestor_by_tag(target, "form") {
                self.request_form_submit(form)?;
            }
        }
        Ok(())
    }

    pub(crate) fn resolve_form_for_submit(&self, target: NodeId) -> Option<NodeId> {
        if self
            .dom
            .tag_name(target)
            .is_some_and(|tag| tag.eq_ignore_ascii_case("form"))
        {
            return Some(target);
        }
        self.dom.find_ancestor_by_tag(target, "form")
    }

    pub(crate) fn request_form_submit(&mut self, form: NodeId) -> Result<()> {
        let outcome = self.dispatch_event(form, "submit")?;
        if outcome.default_prevented {
            return Ok(());
        }
        let action = self.dom.attr(form, "action").unwrap_or_default();
        let label = self.trace_node_label(form);
        self.trace_event_line(format!("[event] navigation form={label} action={action}"));
        self.platform.navigations.push(action);
        Ok(())
    }

    /// Runs listeners on the target, then on each ancestor up to the document.
    pub(crate) fn dispatch_event(&mut self, target: NodeId, event_type: &str) -> Result<EventState> {
        let mut event = EventState::new(event_type, target, self.scheduler.now_ms);

        self.invoke_listeners(target, &mut event)?;

        event.event_phase = 3;
        let mut cursor = self.dom.parent(target);
        while let Some(node) = cursor {
            event.current_target = node;
            self.invoke_listeners(node, &mut event)?;
            cursor = self.dom.parent(node);
        }

        self.trace_event_done(&event);
        Ok(event)
    }

    fn invoke_listeners(&mut self, node_id: NodeId, event: &mut EventState) -> Result<()> {
        let listeners = self.listeners.get(node_id, &event.event_type);
        for listener in listeners {
            if let TargetFilter::Matches(selector) = &listener.filter {
                if !self.dom.matches(event.target, selector) {
                    continue;
                }
            }
            if self.trace_state.enabled {
                let target_label = self.trace_node_label(event.target);
                let current_label = self.trace_node_label(event.current_target);
                self.trace_event_line(format!(
                    "[event] {} target={} current={} phase={} action={:?}",
                    event.event_type,
                    target_label,
                    current_label,
                    event.event_phase,
                    listener.action
                ));
            }
            self.with_widget(|widget, host| widget.handle_action(host, listener.action, event))?;
        }
        Ok(())
    }

    fn trace_event_done(&mut self, event: &EventState) {
        if !self.trace_state.enabled {
            return;
        }
        let target_label = self.trace_node_label(event.target);
        self.trace_event_line(format!(
            "[event] done {} target={} default_prevented={} at={}",
            event.event_type, target_label, event.default_prevented, event.time_stamp_ms
        ));
    }
}

fn is_submit_control(dom: &Dom, node: NodeId) -> bool {
    let Some(tag) = dom.tag_name(node) else {
        return false;
    };
    let kind = dom.attr(node, "type").map(|kind| kind.to_ascii_lowercase());
    if tag.eq_ignore_ascii_case("button") {
        return kind.is_none_or(|kind| kind == "submit");
    }
    tag.eq_ignore_ascii_case("input")
        && kind.is_some_and(|kind| kind == "submit" || kind == "image")
}
