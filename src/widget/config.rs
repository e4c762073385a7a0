use serde::Deserialize;

use crate::selector::Selector;
use crate::{Error, Result};

/// Where submission failures are shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ErrorPresentation {
    /// Blocking `alert`, as the page has always done.
    #[default]
    Alert,
    /// Text written into an existing element; falls back to `alert` when the
    /// element is missing.
    Notice { element_id: String },
}

/// DOM contract, endpoints and messages used by the comments widget.
///
/// `Default` matches the stock page markup. Every field may be overridden
/// from JSON; omitted fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WidgetConfig {
    pub modal_id: String,
    pub content_selector: String,
    pub post_id_input_id: String,
    pub list_id: String,
    pub content_input_id: String,
    pub form_id: String,
    pub close_button_id: String,
    pub count_badge_prefix: String,
    pub trigger_selector: String,
    pub post_id_attribute: String,
    pub delegate_root: String,
    /// Must contain a `{post_id}` placeholder.
    pub comments_url_template: String,
    pub add_comment_url: String,
    pub profile_url_prefix: String,
    pub transition_ms: u32,
    pub loading_text: String,
    pub empty_text: String,
    pub load_error_text: String,
    pub submit_error_text: String,
    pub error_presentation: ErrorPresentation,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            modal_id: "comments-modal".into(),
            content_selector: ".comments-modal-content".into(),
            post_id_input_id: "comment-post-id".into(),
            list_id: "comments-list".into(),
            content_input_id: "comment-content".into(),
            form_id: "comment-form".into(),
            close_button_id: "close-comments".into(),
            count_badge_prefix: "comment-count-".into(),
            trigger_selector: ".comment-btn".into(),
            post_id_attribute: "data-post-id".into(),
            delegate_root: "body".into(),
            comments_url_template: "/comments/{post_id}".into(),
            add_comment_url: "/add_comment".into(),
            profile_url_prefix: "/profile/".into(),
            transition_ms: 180,
            loading_text: "Loading...".into(),
            empty_text: "No comments yet. Be the first to comment!".into(),
            load_error_text: "Could not load comments. Please try again.".into(),
            submit_error_text: "Could not post comment".into(),
            error_presentation: ErrorPresentation::Alert,
        }
    }
}

impl WidgetConfig {
    pub fn from_json(src: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(src).map_err(|err| Error::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("modal_id", &self.modal_id),
            ("post_id_input_id", &self.post_id_input_id),
            ("list_id", &self.list_id),
            ("content_input_id", &self.content_input_id),
            ("form_id", &self.form_id),
            ("close_button_id", &self.close_button_id),
            ("post_id_attribute", &self.post_id_attribute),
            ("add_comment_url", &self.add_comment_url),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{name} must not be empty")));
            }
        }

        if !self.comments_url_template.contains("{post_id}") {
            return Err(Error::Config(format!(
                "comments_url_template must contain {{post_id}}: {}",
                self.comments_url_template
            )));
        }

        for (name, selector) in [
            ("content_selector", &self.content_selector),
            ("trigger_selector", &self.trigger_selector),
            ("delegate_root", &self.delegate_root),
        ] {
            Selector::parse(selector)
                .map_err(|err| Error::Config(format!("{name}: {err}")))?;
        }

        if let ErrorPresentation::Notice { element_id } = &self.error_presentation {
            if element_id.trim().is_empty() {
                return Err(Error::Config(
                    "notice error presentation requires an element_id".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn comments_url(&self, post_id: &str) -> String {
        self.comments_url_template.replace("{post_id}", post_id)
    }

    pub fn count_badge_id(&self, post_id: &str) -> String {
        format!("{}{}", self.count_badge_prefix, post_id)
    }
}
