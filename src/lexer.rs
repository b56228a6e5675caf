/// A single lexical unit of XPR source.
///
/// Tokens do not carry a kind: the parsers classify each token on demand
/// against the patterns in [`crate::patterns`]. The byte offsets point into the
/// original source text (comments included) so diagnostics can label them.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub value: String,
    pub pos_start: usize,
    pub pos_end: usize,
}

impl Token {
    pub fn new(value: impl Into<String>, pos_start: usize, pos_end: usize) -> Token {
        Token {
            value: value.into(),
            pos_start,
            pos_end,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

/// Splits XPR text into tokens.
///
/// Comments are dropped while scanning:
/// - `%- ... -%` is a block comment. It opens at a `%-` that starts a word and
///   closes at the first `-%` followed by whitespace or the end of the text.
///   It may span lines.
/// - Any other `%`, including a `%-` with no closing `-%` after it, starts a
///   line comment running to the end of the line.
///
/// `{`, `}` and `,` are always single-character tokens. Every other maximal
/// run of characters that are not whitespace, braces or commas is one token.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    position: usize,
    last: Option<char>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: 0,
            last: None,
        }
    }

    pub fn lex(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }

    /// Returns the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            let before = self.last;
            let start_pos = self.position;
            let char = self.advance()?;

            match char {
                '{' | '}' | ',' => {
                    return Some(Token::new(char.to_string(), start_pos, self.position));
                }
                '%' => {
                    let at_word_start = before.map_or(true, is_separator);
                    let opens_block = at_word_start && self.peek() == Some(&'-');
                    if opens_block && self.block_comment_closes() {
                        self.skip_block_comment();
                    } else {
                        self.skip_line_comment();
                    }
                }
                c if c.is_whitespace() => {}
                c => return Some(self.read_word(c, start_pos)),
            }
        }
    }

    fn advance(&mut self) -> Option<char> {
        let char = self.chars.next();
        if let Some(c) = char {
            self.position += c.len_utf8();
            self.last = Some(c);
        }
        char
    }

    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if *c == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Looks ahead, without consuming, for the `-%` closing a block comment
    /// whose `%` was just read.
    fn block_comment_closes(&self) -> bool {
        let mut ahead = self.chars.clone();
        ahead.next(); // the '-' of the opening "%-"
        while let Some(c) = ahead.next() {
            if c == '-' && ahead.peek() == Some(&'%') {
                ahead.next();
                if ahead.peek().map_or(true, |c| c.is_whitespace()) {
                    return true;
                }
            }
        }
        false
    }

    fn skip_block_comment(&mut self) {
        self.advance(); // the '-' of the opening "%-"
        while let Some(c) = self.advance() {
            if c == '-' && self.peek() == Some(&'%') {
                self.advance();
                if self.peek().map_or(true, |c| c.is_whitespace()) {
                    return;
                }
            }
        }
    }

    fn read_word(&mut self, first_char: char, start_pos: usize) -> Token {
        let mut word = String::new();
        word.push(first_char);

        while let Some(&c) = self.peek() {
            if is_separator(c) || c == '%' {
                break;
            }
            word.push(c);
            self.advance();
        }

        Token::new(word, start_pos, self.position)
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '{' | '}' | ',')
}

/// Convenience wrapper returning only the token values.
pub fn tokenize(input: &str) -> Vec<String> {
    Lexer::new(input).lex().into_iter().map(|t| t.value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_tokens(input: &str, expected: &[&str]) {
        assert_eq!(tokenize(input), expected);
    }

    #[test]
    fn test_empty() {
        assert_tokens("", &[]);
        assert_tokens("   \n\t ", &[]);
    }

    #[test]
    fn test_single_char_tokens() {
        assert_tokens("{},", &["{", "}", ","]);
        assert_tokens("a{b}c,d", &["a", "{", "b", "}", "c", ",", "d"]);
    }

    #[test]
    fn test_words() {
        assert_tokens(
            "@name FOO, /html/body * [href] 'bold'",
            &["@name", "FOO", ",", "/html/body", "*", "[href]", "'bold'"],
        );
    }

    #[test]
    fn test_xpath_with_predicates_stays_one_token() {
        assert_tokens("/div[@class='x']/a,", &["/div[@class='x']/a", ","]);
    }

    #[test]
    fn test_line_comments() {
        let input = "% header comment\nKEY /a, % trailing\n/b,";
        assert_tokens(input, &["KEY", "/a", ",", "/b", ","]);
    }

    #[test]
    fn test_line_comment_at_end_of_input() {
        assert_tokens("KEY /a, %no newline", &["KEY", "/a", ","]);
    }

    #[test]
    fn test_line_comment_cuts_word() {
        assert_tokens("/a%b\n/c", &["/a", "/c"]);
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let input = "@name X, %- this\n spans { many } ,\n lines -% @includes";
        assert_tokens(input, &["@name", "X", ",", "@includes"]);
    }

    #[test]
    fn test_block_comment_at_end_of_input() {
        assert_tokens("A %- closed -%", &["A"]);
    }

    #[test]
    fn test_unclosed_block_opener_is_a_line_comment() {
        assert_tokens("A %- never closed", &["A"]);
        assert_tokens(
            "@name A,\n%-------- nodes --------\nROOT /r { K /k, }",
            &["@name", "A", ",", "ROOT", "/r", "{", "K", "/k", ",", "}"],
        );
    }

    #[test]
    fn test_divider_before_real_block_comment() {
        assert_tokens("%- note -% A\n%--- divider ---\nB", &["A", "B"]);
    }

    #[test]
    fn test_divider_pairs_with_a_later_closer() {
        assert_tokens("%--- divider\nA %- note -% B", &["B"]);
    }

    #[test]
    fn test_block_close_must_end_a_word() {
        // "-%x" does not close the block.
        assert_tokens("%- a -%x b -% C", &["C"]);
    }

    #[test]
    fn test_positions_point_into_original_source() {
        let tokens = Lexer::new("% c\nKEY {").lex();
        assert_eq!(tokens[0], Token::new("KEY", 4, 7));
        assert_eq!(tokens[1], Token::new("{", 8, 9));
    }

    #[test]
    fn test_no_empty_tokens() {
        let tokens = tokenize(" ,, {  } % x\n ,");
        assert!(tokens.iter().all(|t| !t.is_empty()));
        assert_eq!(tokens, vec![",", ",", "{", "}", ","]);
    }
}
