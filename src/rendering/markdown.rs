use pulldown_cmark::{html, Event, Options, Parser, TagEnd};

fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// Render a raw Markdown string to sanitized HTML.
///
/// Supports GitHub Flavored Markdown (GFM) features: tables,
/// footnotes, strikethrough, task lists, and smart punctuation.
/// Script tags, event handler attributes and similar are stripped.
pub fn render_markdown(raw: &str) -> String {
    let parser = Parser::new_ext(raw, markdown_options() | Options::ENABLE_SMART_PUNCTUATION);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    ammonia::clean(&html_output)
}

/// Strip markdown syntax for a plain-text preview of at most `max_chars` characters.
///
/// Inline runs are joined as written, so `hel**lo**` reads `hello`. Block
/// boundaries and line breaks become a single space.
pub fn strip_markdown_for_preview(raw: &str, max_chars: usize) -> String {
    let parser = Parser::new_ext(raw, markdown_options());
    let mut text = String::new();

    for event in parser {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(tag) if ends_block(tag) => text.push(' '),
            _ => {}
        }
    }

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(max_chars).collect::<String>().trim_end().to_string()
}

fn ends_block(tag: TagEnd) -> bool {
    matches!(
        tag,
        TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::BlockQuote(_)
            | TagEnd::CodeBlock
            | TagEnd::Item
            | TagEnd::List(_)
            | TagEnd::Table
            | TagEnd::TableHead
            | TagEnd::TableRow
            | TagEnd::TableCell
            | TagEnd::FootnoteDefinition
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_paragraph() {
        let result = render_markdown("Merhaba dünya!");
        assert_eq!(result.trim(), "<p>Merhaba dünya!</p>");
    }

    #[test]
    fn test_heading() {
        let result = render_markdown("# Spor Şartı");
        assert_eq!(result.trim(), "<h1>Spor Şartı</h1>");
    }

    #[test]
    fn test_bold_and_italic() {
        let result = render_markdown("**kalın** ve *italik*");
        assert!(result.contains("<strong>kalın</strong>"));
        assert!(result.contains("<em>italik</em>"));
    }

    #[test]
    fn test_table() {
        let input = "| Yıl | Katkı |\n|---|---|\n| 2024 | 1.2 |";
        let result = render_markdown(input);
        assert!(result.contains("<table>"));
        assert!(result.contains("<td>2024</td>"));
    }

    #[test]
    fn test_links_are_kept() {
        let result = render_markdown("[SPOLDER](https://example.com)");
        assert!(result.contains("href=\"https://example.com\""));
        assert!(result.contains(">SPOLDER</a>"));
    }

    #[test]
    fn test_script_is_removed() {
        let result = render_markdown("Metin <script>alert('x')</script>");
        assert!(!result.contains("<script>"));
        assert!(result.contains("Metin"));
    }

    #[test]
    fn test_empty_input() {
        let result = render_markdown("");
        assert_eq!(result, "");
    }

    #[test]
    fn test_strip_markdown_for_preview() {
        let md = "# Spor Ekonomisi\n\nBu **rapor** ve *analiz* metni.\n\n- Madde 1\n- Madde 2";
        let preview = strip_markdown_for_preview(md, 200);
        assert!(preview.contains("Spor Ekonomisi"));
        assert!(preview.contains("rapor"));
        assert!(!preview.contains("**"));
        assert!(!preview.contains('#'));
    }

    #[test]
    fn test_strip_markdown_truncates_on_char_boundary() {
        let md = "# Uzun\n\n".to_string() + &"ığüşöç ".repeat(100);
        let preview = strip_markdown_for_preview(&md, 50);
        assert!(preview.chars().count() <= 50);
    }

    #[test]
    fn test_preview_joins_inline_runs() {
        assert_eq!(strip_markdown_for_preview("hel**lo**", 50), "hello");
        assert_eq!(
            strip_markdown_for_preview("**bir araya** geldi", 50),
            "bir araya geldi"
        );
        assert_eq!(strip_markdown_for_preview("`kod`lar ve *vurgu*.", 50), "kodlar ve vurgu.");
    }

    #[test]
    fn test_preview_separates_blocks_with_one_space() {
        let md = "# Başlık\n\nİlk   paragraf\nikinci satır.\n\n- bir\n- iki";
        assert_eq!(
            strip_markdown_for_preview(md, 200),
            "Başlık İlk paragraf ikinci satır. bir iki"
        );
    }
}
