//! Markdown Rendering for Assistant Replies
//!
//! pulldown-cmark with tables and strikethrough. Replies come from a remote
//! model, so raw HTML is shown as text, images are reduced to their alt
//! text and links outside http(s)/mailto keep only their label. Fenced code
//! keeps its language as a CSS class.

use pulldown_cmark::{html::push_html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

/// Render markdown to HTML
pub fn parse_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES
}

enum State {
    Normal,
    InCodeBlock { lang: Option<String>, content: String },
    InImage { depth: usize },
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;
    // Per open link: whether its tags were kept
    let mut links: Vec<bool> = Vec::new();

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(l) if !l.is_empty() => Some(l.to_string()),
                        _ => None,
                    };
                    state = State::InCodeBlock { lang, content: String::new() };
                }
                // Keep the alt text, drop the remote fetch
                Event::Start(Tag::Image { .. }) => state = State::InImage { depth: 0 },
                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
                Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
                    let keep = is_safe_url(&dest_url);
                    links.push(keep);
                    if keep {
                        events.push(Event::Start(Tag::Link { link_type, dest_url, title, id }));
                    }
                }
                Event::End(TagEnd::Link) => {
                    if links.pop().unwrap_or(true) {
                        events.push(Event::End(TagEnd::Link));
                    }
                }
                other => events.push(other),
            },

            State::InCodeBlock { ref lang, ref mut content } => match event {
                Event::Text(t) => content.push_str(&t),
                Event::End(TagEnd::CodeBlock) => {
                    events.push(Event::Html(CowStr::from(render_code(content, lang.as_deref()))));
                    state = State::Normal;
                }
                _ => {}
            },

            State::InImage { ref mut depth } => match event {
                Event::Start(_) => *depth += 1,
                Event::End(_) if *depth == 0 => state = State::Normal,
                Event::End(_) => *depth -= 1,
                Event::Text(t) => events.push(Event::Text(t)),
                _ => {}
            },
        }
    }

    events
}

fn is_safe_url(url: &str) -> bool {
    let url = url.trim().to_ascii_lowercase();
    ["http://", "https://", "mailto:"].iter().any(|scheme| url.starts_with(scheme))
}

fn render_code(code: &str, lang: Option<&str>) -> String {
    match lang {
        Some(lang) => format!(
            "<pre><code class=\"language-{}\">{}</code></pre>",
            escape_html(lang),
            escape_html(code)
        ),
        None => format!("<pre><code>{}</code></pre>", escape_html(code)),
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_formatting() {
        let html = parse_markdown("**Low stock:** 2 items\n\n- Monitor\n- Cable");
        assert!(html.contains("<strong>Low stock:</strong>"));
        assert!(html.contains("<li>Monitor</li>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = parse_markdown("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_code_block_keeps_language() {
        let html = parse_markdown("```csv\nName,Stock\n```");
        assert_eq!(html, "<pre><code class=\"language-csv\">Name,Stock\n</code></pre>");
    }

    #[test]
    fn test_image_reduced_to_alt_text() {
        let html = parse_markdown("![chart of stock](http://example.test/x.png)");
        assert!(!html.contains("<img"));
        assert!(html.contains("chart of stock"));
    }

    #[test]
    fn test_script_links_keep_only_label() {
        let html = parse_markdown("[reorder now](javascript:alert(1)) and <JavaScript:void(0)>");
        assert!(!html.contains("<a"));
        assert!(!html.to_lowercase().contains("href"));
        assert!(html.contains("reorder now"));
    }

    #[test]
    fn test_web_and_mail_links_survive() {
        let html = parse_markdown("[supplier](https://example.test/parts) or [mail](mailto:ops@example.test)");
        assert!(html.contains("<a href=\"https://example.test/parts\">supplier</a>"));
        assert!(html.contains("<a href=\"mailto:ops@example.test\">mail</a>"));
    }

    #[test]
    fn test_table() {
        let html = parse_markdown("| Item | Stock |\n|---|---|\n| Chair | 45 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>45</td>"));
    }
}
