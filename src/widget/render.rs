use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::*;

/// Characters `encodeURIComponent` leaves untouched besides ASCII alphanumerics.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const DEFAULT_PROFILE_PREFIX: &str = "/profile/";

/// Uppercased first two characters of the trimmed username, or `?`.
///
/// Trimming also drops the byte order mark, matching `String.prototype.trim`.
pub fn avatar_initials(username: &str) -> String {
    let initials = username
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
        .chars()
        .take(2)
        .collect::<String>();
    if initials.is_empty() {
        "?".to_string()
    } else {
        initials.to_uppercase()
    }
}

pub fn profile_href(username: &str) -> String {
    profile_href_with_prefix(DEFAULT_PROFILE_PREFIX, username)
}

pub(crate) fn profile_href_with_prefix(prefix: &str, username: &str) -> String {
    format!("{prefix}{}", utf8_percent_encode(username, URI_COMPONENT))
}

/// Replaces the content of `list` with one row per comment, or with the
/// empty placeholder. Returns the number of rows written.
pub(crate) fn render_comment_list(
    dom: &mut Dom,
    list: NodeId,
    comments: &[Comment],
    config: &WidgetConfig,
) -> Result<usize> {
    dom.set_text_content(list, "")?;
    if comments.is_empty() {
        append_message(dom, list, "comments-empty", "#666", &config.empty_text)?;
        return Ok(0);
    }
    for comment in comments {
        append_comment_row(dom, list, comment, config)?;
    }
    Ok(comments.len())
}

pub(crate) fn render_load_error(dom: &mut Dom, list: NodeId, config: &WidgetConfig) -> Result<()> {
    dom.set_text_content(list, "")?;
    append_message(dom, list, "comments-error", "#900", &config.load_error_text)?;
    Ok(())
}

fn append_comment_row(
    dom: &mut Dom,
    list: NodeId,
    comment: &Comment,
    config: &WidgetConfig,
) -> Result<()> {
    let row = append_styled(
        dom,
        list,
        "div",
        "comment-row",
        &[("borderBottom", "1px solid #222"), ("padding", "8px 0")],
    )?;
    let header = append_styled(
        dom,
        row,
        "div",
        "comment-header",
        &[
            ("display", "flex"),
            ("justifyContent", "space-between"),
            ("alignItems", "center"),
        ],
    )?;
    let author = append_styled(
        dom,
        header,
        "div",
        "comment-author",
        &[("display", "flex"), ("alignItems", "center")],
    )?;

    let avatar = append_styled(dom, author, "div", "avatar-badge", &[])?;
    append_text(dom, avatar, &avatar_initials(&comment.username));

    let link = append_styled(
        dom,
        author,
        "a",
        "comment-username",
        &[
            ("color", "#9fd4ff"),
            ("textDecoration", "none"),
            ("fontWeight", "600"),
        ],
    )?;
    dom.set_attr(
        link,
        "href",
        &profile_href_with_prefix(&config.profile_url_prefix, &comment.username),
    )?;
    append_text(dom, link, &comment.username);

    let timestamp = append_styled(
        dom,
        header,
        "small",
        "comment-timestamp",
        &[("color", "#9aa0a6"), ("fontSize", "0.85rem")],
    )?;
    append_text(dom, timestamp, &comment.timestamp);

    let body = append_styled(
        dom,
        row,
        "div",
        "comment-body",
        &[("color", "#ddd"), ("marginTop", "6px")],
    )?;
    append_text(dom, body, &comment.content);
    Ok(())
}

fn append_message(
    dom: &mut Dom,
    list: NodeId,
    class_name: &str,
    color: &str,
    text: &str,
) -> Result<()> {
    let message = append_styled(dom, list, "p", class_name, &[("color", color)])?;
    append_text(dom, message, text);
    Ok(())
}

fn append_styled(
    dom: &mut Dom,
    parent: NodeId,
    tag: &str,
    class_name: &str,
    styles: &[(&str, &str)],
) -> Result<NodeId> {
    let node = dom.append_element(parent, tag);
    dom.set_attr(node, "class", class_name)?;
    for (property, value) in styles {
        dom.style_set(node, property, value)?;
    }
    Ok(node)
}

// Text is inserted as a node, never parsed as markup.
fn append_text(dom: &mut Dom, parent: NodeId, text: &str) {
    if !text.is_empty() {
        dom.create_text(parent, text.to_string());
    }
}
