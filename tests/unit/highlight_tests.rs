/*!
 * Tests for keyword highlighting and HTML escaping
 */

use docuflow::text::{escape_html, highlight, HighlightRenderer};

/// True when every `<`, `>`, `"`, `'` and bare `&` in `html` belongs to our own markup
fn only_safe_markup(html: &str) -> bool {
    let stripped = html
        .replace("<mark>", "")
        .replace("</mark>", "")
        .replace("<br/>", "")
        .replace("&amp;", "")
        .replace("&lt;", "")
        .replace("&gt;", "")
        .replace("&quot;", "")
        .replace("&#39;", "");
    !stripped.contains(['<', '>', '"', '\'', '&'])
}

#[test]
fn test_escapeHtml_shouldEscapeAllFiveCharacters() {
    assert_eq!(
        escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
        "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
    );
    assert_eq!(escape_html("plain text"), "plain text");
}

#[test]
fn test_highlight_withEmptyKeyword_shouldOnlyEscape() {
    assert_eq!(highlight("a&b", ""), "a&amp;b");
    assert_eq!(highlight("a&b", "   "), "a&amp;b");
}

#[test]
fn test_highlight_shouldMarkEveryCaseInsensitiveSubstring() {
    assert_eq!(
        highlight("cat CAT Cats", "cat"),
        "<mark>cat</mark> <mark>CAT</mark> <mark>Cat</mark>s"
    );
}

#[test]
fn test_highlight_shouldEscapeAroundMarks() {
    let html = highlight("<script>alert('x')</script> & \"q\"", "alert");
    assert_eq!(
        html,
        "&lt;script&gt;<mark>alert</mark>(&#39;x&#39;)&lt;/script&gt; &amp; &quot;q&quot;"
    );
    assert!(only_safe_markup(&html));
}

#[test]
fn test_highlight_withRegexMetacharacters_shouldMatchLiterally() {
    assert_eq!(
        highlight("cost is $5.00 (approx) or 5x00", "5.00"),
        "cost is $<mark>5.00</mark> (approx) or 5x00"
    );
    assert_eq!(
        highlight("cost (approx)", "(approx)"),
        "cost <mark>(approx)</mark>"
    );
}

#[test]
fn test_highlight_withSpecialCharsInKeyword_shouldEscapeMatch() {
    assert_eq!(highlight("Tom & Jerry", "m & j"), "To<mark>m &amp; J</mark>erry");
}

#[test]
fn test_highlight_shouldNeverMatchInsideEntities() {
    assert_eq!(highlight("a&b amp", "amp"), "a&amp;b <mark>amp</mark>");
    assert_eq!(highlight("x < y", "lt"), "x &lt; y");
}

#[test]
fn test_highlight_shouldRenderLineBreaks() {
    assert_eq!(
        highlight("line1\nline2", "line"),
        "<mark>line</mark>1<br/><mark>line</mark>2"
    );
    assert_eq!(highlight("a\n\nb", ""), "a<br/><br/>b");
}

#[test]
fn test_highlight_outputShouldContainOnlySafeMarkup() {
    let inputs = [
        "Tom & Jerry <3 \"quotes\" 'single'",
        "<<>>&&\"\"''",
        "nothing special here",
        "multi\nline & <tags>",
    ];
    for input in inputs {
        for keyword in ["", "&", "<", "e", "tom", "'"] {
            let html = highlight(input, keyword);
            assert!(only_safe_markup(&html), "unsafe output for {:?}/{:?}: {}", input, keyword, html);
        }
    }
}

#[test]
fn test_highlightRenderer_shouldCountMatches() {
    let renderer = HighlightRenderer::new("energy");
    assert!(renderer.has_keyword());
    assert_eq!(renderer.count_matches("Energy is energy, ENERGY!"), 3);
    assert!(!HighlightRenderer::new("").has_keyword());
    assert_eq!(HighlightRenderer::new("").count_matches("anything"), 0);
}

#[test]
fn test_highlightRenderer_withOversizedKeyword_shouldFallBackToEscaping() {
    let keyword = "a".repeat(1_000_000);
    let renderer = HighlightRenderer::new(&keyword);
    assert!(!renderer.has_keyword());
    assert_eq!(renderer.render("a<b\nc"), "a&lt;b<br/>c");
}
