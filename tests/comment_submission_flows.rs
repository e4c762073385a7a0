use comments_widget::{FetchMock, Harness, Method, Result, WidgetConfig};

const PAGE: &str = r#"
<body>
  <article id="post-42">
    <button class="comment-btn" id="open-42" data-post-id="42">Comments</button>
    <span id="comment-count-42">0</span>
  </article>
  <article id="post-7">
    <button class="comment-btn" id="open-7" data-post-id="7">Comments</button>
    <span id="comment-count-7">3</span>
  </article>
  <div id="comments-modal" style="display: none;">
    <div class="comments-modal-content">
      <button id="close-comments" type="button">Close</button>
      <div id="comments-list"></div>
      <form id="comment-form" action="/add_comment">
        <input type="hidden" id="comment-post-id">
        <textarea id="comment-content"></textarea>
        <button id="send-comment" type="submit">Post</button>
      </form>
    </div>
  </div>
</body>
"#;

const ONE_COMMENT: &str = r#"{"comments":[{"username":"alice","content":"hi","timestamp":"1 hour ago"}]}"#;
const TWO_COMMENTS: &str = r#"{"comments":[
    {"username":"alice","content":"hi","timestamp":"1 hour ago"},
    {"username":"me","content":"nice post","timestamp":"just now"}
]}"#;

fn opened_on_42() -> Result<Harness> {
    let mut harness = Harness::from_html(PAGE)?;
    harness.install_comments_widget(WidgetConfig::default())?;
    harness.set_fetch_mock(Method::Get, "/comments/42", FetchMock::json(200, ONE_COMMENT));
    harness.click("#open-42")?;
    harness.flush()?;
    harness.take_fetch_calls();
    Ok(harness)
}

fn post_comment(harness: &mut Harness, text: &str) -> Result<()> {
    harness.type_text("#comment-content", text)?;
    harness.click("#send-comment")?;
    harness.settle_fetches()?;
    Ok(())
}

#[test]
fn accepted_comment_clears_input_and_refreshes_list_and_badge() -> Result<()> {
    let mut harness = opened_on_42()?;
    harness.assert_count(".comment-row", 1)?;
    harness.assert_text("#comment-count-42", "0")?;

    harness.set_fetch_mock(
        Method::Post,
        "/add_comment",
        FetchMock::json(200, r#"{"success":true}"#),
    );
    harness.set_fetch_mock(Method::Get, "/comments/42", FetchMock::json(200, TWO_COMMENTS));
    post_comment(&mut harness, "nice post")?;

    harness.assert_value("#comment-content", "")?;
    harness.assert_count(".comment-row", 2)?;
    harness.assert_text("#comment-count-42", "2")?;
    harness.assert_text("#comment-count-7", "3")?;

    let calls = harness.take_fetch_calls();
    let urls = calls
        .iter()
        .map(|call| format!("{} {}", call.method, call.url))
        .collect::<Vec<_>>();
    assert_eq!(urls, vec!["POST /add_comment", "GET /comments/42"]);
    assert!(harness.take_alert_messages().is_empty());
    assert!(harness.take_console_errors().is_empty());
    Ok(())
}

#[test]
fn rejected_comment_alerts_server_message_and_keeps_draft() -> Result<()> {
    let mut harness = opened_on_42()?;
    harness.set_fetch_mock(
        Method::Post,
        "/add_comment",
        FetchMock::json(200, r#"{"success":false,"error":"too long"}"#),
    );
    post_comment(&mut harness, "a very long comment")?;

    assert_eq!(harness.take_alert_messages(), vec!["too long"]);
    harness.assert_value("#comment-content", "a very long comment")?;
    let gets = harness
        .take_fetch_calls()
        .into_iter()
        .filter(|call| call.method == Method::Get)
        .count();
    assert_eq!(gets, 0);
    harness.assert_text("#comment-count-42", "0")?;
    Ok(())
}

#[test]
fn http_error_prefers_error_field_from_body() -> Result<()> {
    let mut harness = opened_on_42()?;
    harness.set_fetch_mock(
        Method::Post,
        "/add_comment",
        FetchMock::json(429, r#"{"error":"slow down"}"#),
    );
    post_comment(&mut harness, "spam")?;
    assert_eq!(harness.take_alert_messages(), vec!["slow down"]);
    assert_eq!(
        harness.take_console_errors(),
        vec!["Error posting comment: HTTP 429"]
    );
    harness.assert_value("#comment-content", "spam")?;
    Ok(())
}

#[test]
fn http_error_without_message_uses_fallback_text() -> Result<()> {
    let mut harness = opened_on_42()?;
    harness.set_fetch_mock(
        Method::Post,
        "/add_comment",
        FetchMock::json(500, "<html>Internal Server Error</html>"),
    );
    post_comment(&mut harness, "hello")?;
    assert_eq!(harness.take_alert_messages(), vec!["Could not post comment"]);
    Ok(())
}

#[test]
fn network_failure_alerts_fallback_and_logs() -> Result<()> {
    let mut harness = opened_on_42()?;
    harness.set_fetch_mock(
        Method::Post,
        "/add_comment",
        FetchMock::network_error("connection reset"),
    );
    post_comment(&mut harness, "hello")?;
    assert_eq!(harness.take_alert_messages(), vec!["Could not post comment"]);
    assert_eq!(
        harness.take_console_errors(),
        vec!["Error posting comment: connection reset"]
    );
    harness.assert_value("#comment-content", "hello")?;
    Ok(())
}

#[test]
fn response_without_success_or_error_changes_nothing() -> Result<()> {
    let mut harness = opened_on_42()?;
    harness.set_fetch_mock(Method::Post, "/add_comment", FetchMock::json(200, "{}"));
    post_comment(&mut harness, "hello")?;
    assert!(harness.take_alert_messages().is_empty());
    harness.assert_value("#comment-content", "hello")?;
    assert_eq!(harness.take_fetch_calls().len(), 1);
    Ok(())
}

#[test]
fn unparsable_success_body_is_reported() -> Result<()> {
    let mut harness = opened_on_42()?;
    harness.set_fetch_mock(Method::Post, "/add_comment", FetchMock::json(200, "ok"));
    post_comment(&mut harness, "hello")?;
    assert_eq!(harness.take_alert_messages(), vec!["Could not post comment"]);
    let errors = harness.take_console_errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Error posting comment: "), "{errors:?}");
    Ok(())
}

#[test]
fn submission_posts_for_post_in_hidden_field() -> Result<()> {
    let mut harness = Harness::from_html(PAGE)?;
    harness.install_comments_widget(WidgetConfig::default())?;
    harness.set_fetch_mock(Method::Get, "/comments/7", FetchMock::json(200, "{}"));
    harness.click("#open-7")?;
    harness.settle_fetches()?;
    harness.take_fetch_calls();

    harness.type_text("#comment-content", "first")?;
    harness.submit("#comment-content")?;
    let calls = harness.take_fetch_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].form_field("post_id").as_deref(), Some("7"));
    assert_eq!(calls[0].form_field("content").as_deref(), Some("first"));
    assert!(harness.take_navigations().is_empty());
    Ok(())
}

#[test]
fn refresh_after_accept_updates_badge_even_when_modal_moved_on() -> Result<()> {
    let mut harness = opened_on_42()?;
    harness.set_fetch_mock(
        Method::Post,
        "/add_comment",
        FetchMock::json(200, r#"{"success":true}"#),
    );
    harness.set_fetch_mock(Method::Get, "/comments/42", FetchMock::json(200, TWO_COMMENTS));
    harness.set_fetch_mock(Method::Get, "/comments/7", FetchMock::json(200, "{}"));

    harness.type_text("#comment-content", "nice post")?;
    harness.click("#send-comment")?;
    harness.click("#open-7")?;
    harness.settle_fetches()?;

    harness.assert_text("#comment-count-42", "2")?;
    harness.assert_value("#comment-post-id", "7")?;
    harness.assert_text(
        "#comments-list",
        "No comments yet. Be the first to comment!",
    )?;
    Ok(())
}

#[test]
fn badge_updates_when_reopen_supersedes_post_submit_refresh() -> Result<()> {
    let mut harness = opened_on_42()?;
    harness.set_fetch_mock(
        Method::Post,
        "/add_comment",
        FetchMock::json(200, r#"{"success":true}"#),
    );
    harness.set_fetch_mock(Method::Get, "/comments/42", FetchMock::json(200, TWO_COMMENTS));
    harness.type_text("#comment-content", "nice post")?;
    harness.click("#send-comment")?;

    let post = harness.pending_fetches()[0].id;
    assert!(harness.settle_fetch(post)?);
    assert_eq!(harness.pending_fetches().len(), 1);

    harness.click("#open-42")?;
    assert_eq!(harness.settle_fetches()?, 2);
    harness.assert_count(".comment-row", 2)?;
    harness.assert_text("#comment-count-42", "2")?;
    Ok(())
}

#[test]
fn badge_debt_survives_a_failed_refresh() -> Result<()> {
    let mut harness = opened_on_42()?;
    harness.set_fetch_mock(
        Method::Post,
        "/add_comment",
        FetchMock::json(200, r#"{"success":true}"#),
    );
    harness.set_fetch_mock(Method::Get, "/comments/42", FetchMock::json(503, ""));
    post_comment(&mut harness, "nice post")?;
    harness.assert_text("#comment-count-42", "0")?;
    harness.take_console_errors();

    harness.set_fetch_mock(Method::Get, "/comments/42", FetchMock::json(200, TWO_COMMENTS));
    harness.click("#open-42")?;
    harness.settle_fetches()?;
    harness.assert_text("#comment-count-42", "2")?;

    harness.set_fetch_mock(Method::Get, "/comments/42", FetchMock::json(200, ONE_COMMENT));
    harness.click("#open-42")?;
    harness.settle_fetches()?;
    harness.assert_text("#comment-count-42", "2")?;
    Ok(())
}

#[test]
fn programmatic_operations_require_installation() -> Result<()> {
    let mut harness = Harness::from_html(PAGE)?;
    assert!(!harness.widget_installed());
    assert!(harness.submit_comment("42", "x").is_err());
    assert!(harness.open_comments_modal("42").is_err());
    assert!(harness.load_comments("42").is_err());
    assert!(harness.close_comments_modal().is_err());

    harness.click("#open-42")?;
    assert!(harness.take_fetch_calls().is_empty());
    Ok(())
}
