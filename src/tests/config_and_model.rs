use super::*;

#[test]
fn default_config_matches_stock_markup() {
    let config = WidgetConfig::default();
    assert_eq!(config.modal_id, "comments-modal");
    assert_eq!(config.trigger_selector, ".comment-btn");
    assert_eq!(config.transition_ms, 180);
    assert_eq!(config.comments_url("42"), "/comments/42");
    assert_eq!(config.count_badge_id("42"), "comment-count-42");
    assert_eq!(config.error_presentation, ErrorPresentation::Alert);
    assert!(config.validate().is_ok());
}

#[test]
fn config_from_json_keeps_defaults_for_omitted_fields() -> Result<()> {
    let config = WidgetConfig::from_json(
        r#"{
            "transition_ms": 250,
            "comments_url_template": "/api/posts/{post_id}/comments",
            "error_presentation": { "kind": "notice", "element_id": "comment-error" }
        }"#,
    )?;
    assert_eq!(config.transition_ms, 250);
    assert_eq!(config.comments_url("9"), "/api/posts/9/comments");
    assert_eq!(config.list_id, "comments-list");
    assert_eq!(
        config.error_presentation,
        ErrorPresentation::Notice {
            element_id: "comment-error".into()
        }
    );
    Ok(())
}

#[test]
fn config_from_json_rejects_unknown_fields_and_bad_values() {
    for src in [
        r#"{ "modal": "x" }"#,
        r#"{ "transition_ms": -1 }"#,
        r#"{ "comments_url_template": "/comments/" }"#,
        r#"{ "list_id": "  " }"#,
        r#"{ "trigger_selector": ".comment-btn:hover" }"#,
        r#"{ "error_presentation": { "kind": "notice", "element_id": "" } }"#,
        "not json",
    ] {
        assert!(
            matches!(WidgetConfig::from_json(src), Err(Error::Config(_))),
            "{src} should be rejected"
        );
    }
}

#[test]
fn comment_fields_default_to_empty_strings() -> Result<()> {
    let list: CommentListResponse = serde_json::from_str(
        r#"{ "comments": [
            { "username": null, "content": "hi", "id": 3 },
            { "timestamp": "2024-01-01 10:00" }
        ] }"#,
    )
    .map_err(|err| Error::Runtime(err.to_string()))?;
    assert_eq!(
        list.comments(),
        [
            Comment {
                username: String::new(),
                content: "hi".into(),
                timestamp: String::new(),
            },
            Comment {
                username: String::new(),
                content: String::new(),
                timestamp: "2024-01-01 10:00".into(),
            },
        ]
    );
    Ok(())
}

#[test]
fn absent_or_null_comment_list_reads_as_empty() -> Result<()> {
    for body in ["{}", r#"{ "comments": null }"#, r#"{ "comments": [] }"#] {
        let list: CommentListResponse =
            serde_json::from_str(body).map_err(|err| Error::Runtime(err.to_string()))?;
        assert!(list.comments().is_empty(), "{body}");
    }
    Ok(())
}

#[test]
fn add_comment_result_follows_truthiness() -> Result<()> {
    let cases = [
        (r#"{ "success": true }"#, AddCommentResult::Accepted),
        (r#"{ "success": 1, "error": "ignored" }"#, AddCommentResult::Accepted),
        (
            r#"{ "success": false, "error": "too long" }"#,
            AddCommentResult::Rejected("too long".into()),
        ),
        (r#"{ "error": 42 }"#, AddCommentResult::Rejected("42".into())),
        (r#"{ "error": "" }"#, AddCommentResult::Ignored),
        (r#"{ "success": 0 }"#, AddCommentResult::Ignored),
        ("[]", AddCommentResult::Ignored),
    ];
    for (body, expected) in cases {
        let actual =
            AddCommentResult::from_json(body).map_err(|err| Error::Runtime(err.to_string()))?;
        assert_eq!(actual, expected, "{body}");
    }
    assert!(AddCommentResult::from_json("<html>").is_err());
    Ok(())
}
