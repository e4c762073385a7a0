use super::*;

const TWO_COMMENTS: &str = r#"{"comments":[
    {"username":"alice","content":"first!","timestamp":"2 minutes ago"},
    {"username":"Bob Smith","content":"<b>second</b>","timestamp":"just now"}
]}"#;

#[test]
fn open_sets_field_placeholder_and_starts_transition() -> Result<()> {
    let mut h = installed_page()?;
    h.click("#open-42")?;

    h.assert_value("#comment-post-id", "42")?;
    h.assert_text("#comments-list", "Loading...")?;
    assert_eq!(h.style("#comments-modal", "display")?, "block");
    assert_eq!(h.style(".comments-modal-content", "opacity")?, "0");
    assert_eq!(
        h.style(".comments-modal-content", "transform")?,
        "scale(0.96) translateY(-6px)"
    );
    assert_eq!(
        h.style(".comments-modal-content", "transition")?,
        "transform 180ms ease-out, opacity 180ms ease-out"
    );

    let calls = h.take_fetch_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, Method::Get);
    assert_eq!(calls[0].url, "/comments/42");
    assert_eq!(calls[0].credentials, Credentials::SameOrigin);

    let pending = h.pending_timers();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].kind, TimerKind::AnimationFrame);
    h.run_next_timer()?;
    assert_eq!(h.style(".comments-modal-content", "opacity")?, "1");
    assert_eq!(
        h.style(".comments-modal-content", "transform")?,
        "scale(1) translateY(0)"
    );
    Ok(())
}

#[test]
fn loaded_comments_replace_placeholder() -> Result<()> {
    let mut h = installed_page()?;
    h.set_fetch_mock(Method::Get, "/comments/42", FetchMock::json(200, TWO_COMMENTS));
    h.click("#open-42")?;
    assert_eq!(h.settle_fetches()?, 1);

    h.assert_count("#comments-list .comment-row", 2)?;
    assert_eq!(h.texts(".comment-username")?, vec!["alice", "Bob Smith"]);
    assert_eq!(
        h.attr(".comment-row + .comment-row .comment-username", "href")?,
        Some("/profile/Bob%20Smith".to_string())
    );
    assert_eq!(h.texts(".avatar-badge")?, vec!["AL", "BO"]);
    assert_eq!(h.texts(".comment-body")?, vec!["first!", "<b>second</b>"]);
    h.assert_count("#comments-list b", 0)?;
    Ok(())
}

#[test]
fn close_fades_then_hides_after_transition() -> Result<()> {
    let mut h = installed_page()?;
    h.set_fetch_mock(Method::Get, "/comments/42", FetchMock::json(200, "{}"));
    h.click("#open-42")?;
    h.flush()?;

    h.click("#close-comments")?;
    assert_eq!(h.style(".comments-modal-content", "opacity")?, "0");
    assert_eq!(
        h.style(".comments-modal-content", "transform")?,
        "scale(0.98) translateY(-6px)"
    );
    assert_eq!(h.style("#comments-modal", "display")?, "block");

    h.advance_time(179)?;
    assert_eq!(h.style("#comments-modal", "display")?, "block");
    h.advance_time(1)?;
    assert_eq!(h.style("#comments-modal", "display")?, "none");
    Ok(())
}

#[test]
fn reopening_before_hide_keeps_modal_visible() -> Result<()> {
    let mut h = installed_page()?;
    h.set_fetch_mock(Method::Get, "/comments/42", FetchMock::json(200, "{}"));
    h.click("#open-42")?;
    h.flush()?;
    h.click("#close-comments")?;
    h.advance_time(100)?;
    h.click("#open-42")?;
    h.flush()?;
    assert_eq!(h.style("#comments-modal", "display")?, "block");
    assert_eq!(h.style(".comments-modal-content", "opacity")?, "1");
    Ok(())
}

#[test]
fn close_without_content_panel_hides_immediately() -> Result<()> {
    let mut h = Harness::from_html(
        r#"
        <body>
          <button class="comment-btn" id="open-1" data-post-id="1">c</button>
          <div id="comments-modal">
            <button id="close-comments">x</button>
            <div id="comments-list"></div>
            <input type="hidden" id="comment-post-id">
          </div>
        </body>
        "#,
    )?;
    h.install_comments_widget(WidgetConfig::default())?;
    h.click("#open-1")?;
    assert!(h.pending_timers().is_empty());
    h.click("#close-comments")?;
    assert_eq!(h.style("#comments-modal", "display")?, "none");
    assert!(h.pending_timers().is_empty());
    Ok(())
}

#[test]
fn delegated_listener_ignores_non_trigger_targets() -> Result<()> {
    let mut h = installed_page()?;
    h.append_html(
        "#post-42",
        r#"<button class="other-btn" id="share-42" data-post-id="42">share</button>
           <button class="comment-btn" id="late-7" data-post-id="7">late</button>
           <button class="comment-btn" id="no-id">broken</button>"#,
    )?;
    h.click("#share-42")?;
    h.click("#no-id")?;
    assert!(h.take_fetch_calls().is_empty());

    h.click("#late-7")?;
    let calls = h.take_fetch_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].url, "/comments/7");
    Ok(())
}

#[test]
fn listener_count_is_stable_across_reopens() -> Result<()> {
    let mut h = installed_page()?;
    assert_eq!(h.listener_count(), 3);
    h.set_fetch_mock(Method::Get, "/comments/42", FetchMock::json(200, "{}"));
    for _ in 0..5 {
        h.click("#open-42")?;
        h.click("#close-comments")?;
        h.flush()?;
    }
    assert_eq!(h.listener_count(), 3);
    assert!(matches!(
        h.install_comments_widget(WidgetConfig::default()),
        Err(Error::Runtime(_))
    ));
    Ok(())
}

#[test]
fn submit_posts_form_encoded_body_and_prevents_navigation() -> Result<()> {
    let mut h = installed_page()?;
    h.set_fetch_mock(Method::Get, "/comments/42", FetchMock::json(200, "{}"));
    h.click("#open-42")?;
    h.settle_fetches()?;
    h.take_fetch_calls();

    h.type_text("#comment-content", "  tea & cake = 100%  ")?;
    h.click("#send-comment")?;

    assert!(h.take_navigations().is_empty());
    let calls = h.take_fetch_calls();
    assert_eq!(calls.len(), 1);
    let post = &calls[0];
    assert_eq!(post.method, Method::Post);
    assert_eq!(post.url, "/add_comment");
    assert_eq!(
        post.header("content-type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(
        post.body.as_deref(),
        Some("post_id=42&content=tea+%26+cake+%3D+100%25")
    );
    assert_eq!(post.form_field("content").as_deref(), Some("tea & cake = 100%"));
    Ok(())
}

#[test]
fn blank_submission_sends_nothing() -> Result<()> {
    let mut h = installed_page()?;
    h.type_text("#comment-content", "   ")?;
    h.submit("#comment-form")?;
    assert!(h.take_fetch_calls().is_empty());
    h.assert_value("#comment-content", "   ")?;
    assert!(h.take_navigations().is_empty());
    Ok(())
}

#[test]
fn notice_presentation_writes_error_text() -> Result<()> {
    let mut h = Harness::from_html(&format!(
        "{COMMENTS_PAGE}<p id='comment-error'></p>"
    ))?;
    let config = WidgetConfig {
        error_presentation: ErrorPresentation::Notice {
            element_id: "comment-error".into(),
        },
        ..WidgetConfig::default()
    };
    h.install_comments_widget(config)?;
    h.set_fetch_mock(
        Method::Post,
        "/add_comment",
        FetchMock::json(200, r#"{"error":"too long"}"#),
    );
    h.submit_comment("42", "hello")?;
    h.settle_fetches()?;
    h.assert_text("#comment-error", "too long")?;
    assert!(h.take_alert_messages().is_empty());
    Ok(())
}
