use super::*;

use crate::html::parse_html;
use crate::selector::Selector;

#[test]
fn parser_builds_id_index_and_text() -> Result<()> {
    let dom = parse_html("<div id='a'><p id='b'>Hi &amp; bye</p></div>")?.dom;
    let b = dom.by_id("b").ok_or_else(|| Error::SelectorNotFound("#b".into()))?;
    assert_eq!(dom.text_content(b), "Hi & bye");
    assert_eq!(dom.tag_name(b), Some("p"));
    Ok(())
}

#[test]
fn parser_keeps_first_duplicate_attribute_and_ignores_stray_end_tags() -> Result<()> {
    let dom = parse_html("<span id='x' class='one' class='two'>a</div>b</span>")?.dom;
    let x = dom.by_id("x").ok_or_else(|| Error::SelectorNotFound("#x".into()))?;
    assert_eq!(dom.attr(x, "class").as_deref(), Some("one"));
    assert_eq!(dom.text_content(x), "ab");
    Ok(())
}

#[test]
fn parser_initializes_textarea_value_from_body() -> Result<()> {
    let dom = parse_html("<textarea id='t'>a &lt; b</textarea>")?.dom;
    let t = dom.by_id("t").ok_or_else(|| Error::SelectorNotFound("#t".into()))?;
    assert_eq!(dom.value(t)?, "a < b");
    Ok(())
}

#[test]
fn parser_keeps_stray_less_than_as_text() -> Result<()> {
    let dom = parse_html("<p id='m'>1 < 2 &lt; 3 <3 a<</p><p id='n'>x</p>")?.dom;
    let m = dom.by_id("m").ok_or_else(|| Error::SelectorNotFound("#m".into()))?;
    assert_eq!(dom.text_content(m), "1 < 2 < 3 <3 a<");
    assert_eq!(dom.children(m).len(), 1);
    assert!(dom.by_id("n").is_some());
    Ok(())
}

#[test]
fn parser_rejects_unclosed_comment() {
    assert!(matches!(
        parse_html("<div><!-- open"),
        Err(Error::HtmlParse(_))
    ));
}

#[test]
fn selectors_cover_combinators_and_attribute_operators() -> Result<()> {
    let h = Harness::from_html(
        r#"
        <ul id="list">
          <li class="item first" data-kind="a-1">one</li>
          <li class="item" data-kind="b">two</li>
          <li class="item last" data-kind="a-2">three</li>
        </ul>
        "#,
    )?;
    assert_eq!(h.count("#list > li")?, 3);
    assert_eq!(h.text(".first + .item")?, "two");
    assert_eq!(h.texts(".first ~ li")?, vec!["two", "three"]);
    assert_eq!(h.texts("[data-kind^=a]")?, vec!["one", "three"]);
    assert_eq!(h.texts("li[data-kind|=a]")?, vec!["one", "three"]);
    assert_eq!(h.text("[data-kind$='2']")?, "three");
    assert_eq!(h.texts(".last, .first")?, vec!["one", "three"]);
    Ok(())
}

#[test]
fn unsupported_selectors_are_reported() {
    for selector in ["li:first-child", "", "a >", "[data-x"] {
        assert!(
            matches!(Selector::parse(selector), Err(Error::UnsupportedSelector(_))),
            "{selector:?} should be rejected"
        );
    }
}

#[test]
fn style_declarations_round_through_camel_case_names() -> Result<()> {
    let mut dom = parse_html("<div id='m' style='display: none;'></div>")?.dom;
    let m = dom.by_id("m").ok_or_else(|| Error::SelectorNotFound("#m".into()))?;
    dom.style_set(m, "display", "block")?;
    dom.style_set(m, "borderBottom", "1px solid #222")?;
    assert_eq!(dom.style_get(m, "border-bottom")?, "1px solid #222");
    assert_eq!(
        dom.attr(m, "style").as_deref(),
        Some("display: block; border-bottom: 1px solid #222;")
    );
    dom.style_set(m, "display", "")?;
    assert_eq!(dom.style_get(m, "display")?, "");
    Ok(())
}

#[test]
fn text_content_is_escaped_when_serialized() -> Result<()> {
    let mut dom = parse_html("<div id='c'></div>")?.dom;
    let c = dom.by_id("c").ok_or_else(|| Error::SelectorNotFound("#c".into()))?;
    dom.set_text_content(c, "<b>bold</b> & more")?;
    assert_eq!(dom.dump_node(c), "<div id=\"c\">&lt;b&gt;bold&lt;/b&gt; &amp; more</div>");
    assert_eq!(dom.children(c).len(), 1);
    Ok(())
}

#[test]
fn inner_html_replacement_refreshes_id_index() -> Result<()> {
    let mut h = Harness::from_html("<div id='host'><p id='old'>x</p></div>")?;
    h.set_inner_html("#host", "<p id='new'>y</p>")?;
    assert!(!h.exists("#old")?);
    h.assert_text("#new", "y")?;
    h.append_html("#host", "<p id='tail'>z</p>")?;
    h.assert_text("#host", "yz")?;
    Ok(())
}
