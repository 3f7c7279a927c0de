use super::*;

#[test]
fn renders_emphasis_and_lists() {
    let out = render_markdown_html("The effect is **small**.\n\n- smoke\n- lung");
    assert!(out.contains("<strong>small</strong>"));
    assert!(out.contains("<li>smoke</li>"));
}

#[test]
fn strips_raw_html() {
    let out = render_markdown_html("before <script>alert(1)</script> after\n\n<div onclick=\"x\">block</div>");
    assert!(!out.contains("<script>"));
    assert!(!out.contains("<div"));
    assert!(out.contains("before"));
}

#[test]
fn renders_tables() {
    let out = render_markdown_html("| metric | value |\n|---|---|\n| yes | 0.4 |");
    assert!(out.contains("<table>"));
}
