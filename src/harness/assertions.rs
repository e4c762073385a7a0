use super::*;

use crate::dom::truncate_chars;

impl Harness {
    pub fn text(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.text_content(target))
    }

    /// Text content of every element matching `selector`, in document order.
    pub fn texts(&self, selector: &str) -> Result<Vec<String>> {
        Ok(self
            .dom
            .query_selector_all(selector)?
            .into_iter()
            .map(|node| self.dom.text_content(node))
            .collect())
    }

    pub fn value(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.dom.value(target)
    }

    pub fn attr(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let target = self.select_one(selector)?;
        Ok(self.dom.attr(target, name))
    }

    /// Attribute `name` of every element matching `selector`, in document order.
    pub fn attrs(&self, selector: &str, name: &str) -> Result<Vec<Option<String>>> {
        Ok(self
            .dom
            .query_selector_all(selector)?
            .into_iter()
            .map(|node| self.dom.attr(node, name))
            .collect())
    }

    /// Reads an inline style property; accepts `camelCase` or `kebab-case` names.
    pub fn style(&self, selector: &str, property: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.dom.style_get(target, property)
    }

    pub fn count(&self, selector: &str) -> Result<usize> {
        Ok(self.dom.query_selector_all(selector)?.len())
    }

    pub fn exists(&self, selector: &str) -> Result<bool> {
        Ok(self.dom.query_selector(selector)?.is_some())
    }

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.value(target)?;
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_count(&self, selector: &str, expected: usize) -> Result<()> {
        let nodes = self.dom.query_selector_all(selector)?;
        if nodes.len() != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual: nodes.len().to_string(),
                dom_snippet: nodes
                    .first()
                    .map(|node| self.node_snippet(*node))
                    .unwrap_or_default(),
            });
        }
        Ok(())
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        let _ = self.select_one(selector)?;
        Ok(())
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.dump_node(target))
    }

    pub fn take_alert_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.platform.alert_messages)
    }

    pub fn take_console_errors(&mut self) -> Vec<String> {
        std::mem::take(&mut self.platform.console_errors)
    }

    /// Actions of forms whose `submit` was not default-prevented.
    pub fn take_navigations(&mut self) -> Vec<String> {
        std::mem::take(&mut self.platform.navigations)
    }

    pub(crate) fn alert(&mut self, message: &str) {
        self.trace_widget_line(format!("[widget] alert {message}"));
        self.platform.alert_messages.push(message.to_string());
    }

    pub(crate) fn console_error(&mut self, message: String) {
        tracing::error!("{message}");
        self.trace_widget_line(format!("[widget] console.error {message}"));
        self.platform.console_errors.push(message);
    }

    pub(crate) fn node_snippet(&self, node_id: NodeId) -> String {
        truncate_chars(&self.dom.dump_node(node_id), 200)
    }
}
