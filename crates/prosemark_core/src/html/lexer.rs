//! HTML token lexer.

use logos::Logos;

/// Tokens produced over a rendered HTML stream.
///
/// The walker asks the lexer for its current span, so variants carry no
/// payload; the raw bytes are sliced out of the input on demand.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlToken {
    /// `<!-- ... -->`, skipped for prose analysis.
    ///
    /// Outranks the tag pattern, which would otherwise claim the same span.
    #[regex(r"<!--([^-]|-[^-]|--[^>])*-->", priority = 10)]
    Comment,

    /// Start, end, or self-closing tag, including doctype declarations.
    #[regex(r"</?[a-zA-Z!][^>]*>")]
    Tag,

    /// Run of character data between tags.
    #[regex(r"[^<]+")]
    Text,

    /// A `<` that never closed into a tag; treated as literal text.
    #[token("<")]
    StrayLt,
}

impl HtmlToken {
    /// Whether this token carries character data.
    pub fn is_text(self) -> bool {
        matches!(self, Self::Text | Self::StrayLt)
    }
}

/// Splits a raw tag token into its lowercase name and closing flag.
///
/// Doctype and other `<!` declarations yield an empty name.
pub(crate) fn tag_name(raw: &str) -> (String, bool) {
    let body = raw.trim_start_matches('<');
    let closing = body.starts_with('/');
    let body = body.trim_start_matches('/');
    let name: String = body
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    (name.to_ascii_lowercase(), closing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use logos::Logos;

    fn lex(input: &str) -> Vec<(HtmlToken, &str)> {
        let mut lexer = HtmlToken::lexer(input);
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next() {
            tokens.push((token.expect("lexer covers all input"), lexer.slice()));
        }
        tokens
    }

    #[test]
    fn tags_and_text_are_split() {
        let tokens = lex("<p>Hello, world.</p>");
        assert_eq!(
            tokens,
            vec![
                (HtmlToken::Tag, "<p>"),
                (HtmlToken::Text, "Hello, world."),
                (HtmlToken::Tag, "</p>"),
            ]
        );
    }

    #[test]
    fn comments_are_single_tokens() {
        let tokens = lex("a<!-- skip - me -->b");
        assert_eq!(
            tokens,
            vec![
                (HtmlToken::Text, "a"),
                (HtmlToken::Comment, "<!-- skip - me -->"),
                (HtmlToken::Text, "b"),
            ]
        );
    }

    #[test]
    fn doctype_is_a_tag_token() {
        let tokens = lex("<!DOCTYPE html><p>x</p>");
        assert_eq!(tokens[0], (HtmlToken::Tag, "<!DOCTYPE html>"));
    }

    #[test]
    fn stray_angle_bracket_is_text_like() {
        let tokens = lex("1 < 2");
        assert_eq!(
            tokens,
            vec![
                (HtmlToken::Text, "1 "),
                (HtmlToken::StrayLt, "<"),
                (HtmlToken::Text, " 2"),
            ]
        );
    }

    #[test]
    fn tag_name_extraction() {
        assert_eq!(tag_name("<p>"), ("p".to_string(), false));
        assert_eq!(tag_name("</h2>"), ("h2".to_string(), true));
        assert_eq!(
            tag_name("<code class=\"x\">"),
            ("code".to_string(), false)
        );
        assert_eq!(tag_name("<!DOCTYPE html>"), (String::new(), false));
    }
}
