use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Token {
    /// Bracket-quoted identifier, `]]` unescaped
    Ident(String),

    /// Bare word: keywords and type names
    Word(String),

    Number(u64),

    /// `@p0`, `@p1`, ...
    Param(String),

    Comma,
    Period,
    Star,
    Eq,
    LParen,
    RParen,
    SemiColon,
}

pub(super) struct Lexer<'a> {
    src: &'a str,
    next: VecDeque<Token>,
}

impl<'a> Lexer<'a> {
    pub(super) fn new(src: &'a str) -> Lexer<'a> {
        Lexer {
            src,
            next: VecDeque::new(),
        }
    }

    pub(super) fn next(&mut self) -> Result<Option<Token>, String> {
        self.lex_n(1)?;
        Ok(self.next.pop_front())
    }

    pub(super) fn peek(&mut self) -> Result<Option<&Token>, String> {
        self.lex_n(1)?;
        Ok(self.next.front())
    }

    fn lex_n(&mut self, n: usize) -> Result<(), String> {
        while self.next.len() < n {
            self.skip_whitespace();

            let Some(ch) = self.try_next_char() else {
                return Ok(());
            };

            let token = match ch {
                ',' => Token::Comma,
                '.' => Token::Period,
                '*' => Token::Star,
                '=' => Token::Eq,
                '(' => Token::LParen,
                ')' => Token::RParen,
                ';' => Token::SemiColon,
                '[' => Token::Ident(self.quoted()?),
                '@' => {
                    let mut param = String::from("@");
                    while let Some(ch) = self.take_if(ident_ch) {
                        param.push(ch);
                    }
                    Token::Param(param)
                }
                ch if ch.is_ascii_digit() => {
                    let mut digits = String::from(ch);
                    while let Some(ch) = self.take_if(|ch| ch.is_ascii_digit()) {
                        digits.push(ch);
                    }
                    Token::Number(digits.parse().map_err(|err| format!("{err}"))?)
                }
                ch if ch.is_alphabetic() => {
                    let mut word = String::from(ch);
                    while let Some(ch) = self.take_if(ident_ch) {
                        word.push(ch);
                    }
                    Token::Word(word.to_ascii_uppercase())
                }
                ch => return Err(format!("unexpected character {ch:?}")),
            };

            self.next.push_back(token);
        }

        Ok(())
    }

    fn quoted(&mut self) -> Result<String, String> {
        let mut ident = String::new();

        loop {
            match self.try_next_char() {
                Some(']') if self.peek_char() == Some(']') => {
                    self.consume(1);
                    ident.push(']');
                }
                Some(']') => return Ok(ident),
                Some(ch) => ident.push(ch),
                None => return Err("unterminated identifier".to_string()),
            }
        }
    }

    fn try_next_char(&mut self) -> Option<char> {
        let ch = self.src.chars().next()?;
        self.consume(ch.len_utf8());
        Some(ch)
    }

    fn peek_char(&self) -> Option<char> {
        self.src.chars().next()
    }

    fn take_if<P>(&mut self, predicate: P) -> Option<char>
    where
        P: FnOnce(char) -> bool,
    {
        match self.peek_char() {
            Some(ch) if predicate(ch) => {
                self.consume(ch.len_utf8());
                Some(ch)
            }
            _ => None,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if !ch.is_whitespace() {
                return;
            }
            self.consume(ch.len_utf8());
        }
    }

    fn consume(&mut self, amount: usize) {
        let (_, src) = self.src.split_at(amount);
        self.src = src;
    }
}

fn ident_ch(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(src);
        let mut tokens = vec![];
        while let Some(token) = lexer.next().unwrap() {
            tokens.push(token);
        }
        tokens
    }

    #[test]
    fn lexes_bracketed_identifiers() {
        assert_eq!(
            lex("[M1].[a]]b] = @p12"),
            [
                Token::Ident("M1".into()),
                Token::Period,
                Token::Ident("a]b".into()),
                Token::Eq,
                Token::Param("@p12".into()),
            ]
        );
    }

    #[test]
    fn words_are_uppercased() {
        assert_eq!(
            lex("nvarchar(40)"),
            [
                Token::Word("NVARCHAR".into()),
                Token::LParen,
                Token::Number(40),
                Token::RParen,
            ]
        );
    }
}
