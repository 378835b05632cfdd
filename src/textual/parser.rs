use std::iter::Peekable;

use logos::{Logos, Span, SpannedIter};

use crate::ast::{AppTerm, Const, Query, Rule, Term, Var};

use super::lexer::Token;

struct TokenStream<'a> {
    source: &'a str,
    lexer: Peekable<SpannedIter<'a, Token>>,
}

impl<'a> TokenStream<'a> {
    pub fn new(source: &'a str) -> Self {
        let lexer = Token::lexer(source).spanned().peekable();

        Self { source, lexer }
    }

    pub fn next(&mut self) -> Option<(Result<Token, ()>, Span)> {
        self.lexer.next()
    }

    pub fn advance(&mut self) {
        self.lexer.next();
    }

    pub fn peek_token(&mut self) -> Option<Result<Token, ()>> {
        self.lexer.peek().map(|(tok, _)| tok).cloned()
    }

    pub fn slice(&self, span: Span) -> &str {
        &self.source[span]
    }

    pub fn eof(&self) -> Span {
        self.source.len()..self.source.len()
    }
}

/// A parse error originating from [`Parser`].
#[derive(Debug)]
pub struct ParseError {
    /// The range in the source text where the error occurred.
    pub span: Span,
    /// The type of error that occurred.
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(span: Span, kind: ParseErrorKind) -> Self {
        Self { span, kind }
    }
}

/// The various types of parse errors reported by [`Parser`].
#[derive(Debug)]
pub enum ParseErrorKind {
    /// The parser reached the end of the input, but expected more tokens to follow.
    UnexpectedEof,
    /// The parser encountered a token that doesn't belong in that place.
    UnexpectedToken(Token),
    /// The parser encountered input that could not be recognized as a token.
    UnrecognizedToken,
    /// The parser encountered more tokens after the input should have ended.
    ExpectedEof,
}

impl ParseErrorKind {
    /// Translate an unexpected item in the token stream (either an unexpected token or a lexer
    /// error) into the matching [`ParseErrorKind`].
    pub fn unexpected(res: Result<Token, ()>) -> Self {
        match res {
            Ok(tok) => Self::UnexpectedToken(tok),
            Err(()) => Self::UnrecognizedToken,
        }
    }
}

/// A parser for the Prolog-like syntax of the [TextualProgram](super::TextualProgram).
///
/// Since terms carry their names inline, the parser needs no symbol table; its only state is the
/// counter distinguishing wildcard occurrences from each other.
pub struct Parser {
    next_wildcard: usize,
}

impl Parser {
    pub fn new() -> Self {
        Self { next_wildcard: 0 }
    }

    // //////////////////////////////// PUBLIC PARSER ////////////////////////////////

    pub fn parse_query_str(&mut self, query: &str) -> Result<Query, ParseError> {
        let mut tokens = TokenStream::new(query);
        let goals = self.parse_conjunction1(&mut tokens)?;
        self.expect_eof(&mut tokens)?;
        Ok(Query::with_goals(goals))
    }

    pub fn parse_rule_str(&mut self, rule: &str) -> Result<Rule, ParseError> {
        let mut tokens = TokenStream::new(rule);
        let result = self.parse_rule(&mut tokens)?;
        self.expect_eof(&mut tokens)?;
        Ok(result)
    }

    pub fn parse_rules_str(&mut self, rules: &str) -> Result<Vec<Rule>, ParseError> {
        let mut tokens = TokenStream::new(rules);
        let mut result = vec![];
        while tokens.peek_token().is_some() {
            result.push(self.parse_rule(&mut tokens)?);
        }
        Ok(result)
    }

    pub fn parse_term_str(&mut self, term: &str) -> Result<Term, ParseError> {
        let mut tokens = TokenStream::new(term);
        let result = self.parse_term(&mut tokens)?;
        self.expect_eof(&mut tokens)?;
        Ok(result)
    }

    // //////////////////////////////// PARSER INTERNALS ////////////////////////////////

    fn parse_rule(&mut self, tokens: &mut TokenStream) -> Result<Rule, ParseError> {
        let head = self.parse_appterm(tokens)?;
        let tail = match tokens.peek_token() {
            Some(Ok(Token::ImpliedBy)) => {
                tokens.advance();
                self.parse_conjunction1(tokens)?
            }
            Some(Ok(Token::Period)) => {
                tokens.advance();
                Vec::new()
            }
            Some(other) => {
                let (_, span) = tokens.next().unwrap();
                return Err(ParseError::new(span, ParseErrorKind::unexpected(other)));
            }
            None => return Err(ParseError::new(tokens.eof(), ParseErrorKind::UnexpectedEof)),
        };
        Ok(Rule { head, tail })
    }

    fn parse_conjunction1(&mut self, tokens: &mut TokenStream) -> Result<Vec<Term>, ParseError> {
        let mut goals = vec![self.parse_term(tokens)?];
        loop {
            match tokens.peek_token() {
                Some(Ok(Token::Comma)) => {
                    tokens.advance();
                    goals.push(self.parse_term(tokens)?);
                }
                Some(Ok(Token::Period)) => {
                    tokens.advance();
                    break;
                }
                Some(other) => {
                    let (_, span) = tokens.next().unwrap();
                    return Err(ParseError::new(span, ParseErrorKind::unexpected(other)));
                }
                None => return Err(ParseError::new(tokens.eof(), ParseErrorKind::UnexpectedEof)),
            }
        }
        Ok(goals)
    }

    fn expect_eof(&mut self, tokens: &mut TokenStream) -> Result<(), ParseError> {
        if let Some((other, span)) = tokens.next() {
            Err(ParseError::new(span, ParseErrorKind::unexpected(other)))
        } else {
            Ok(())
        }
    }

    fn expect_token(&mut self, tokens: &mut TokenStream, expected: Token) -> Result<Span, ParseError> {
        if let Some((actual, span)) = tokens.next() {
            if actual == Ok(expected) {
                Ok(span)
            } else {
                Err(ParseError::new(span, ParseErrorKind::unexpected(actual)))
            }
        } else {
            Err(ParseError::new(tokens.eof(), ParseErrorKind::UnexpectedEof))
        }
    }

    /// Parse an application term, i.e. a functor with an optional parenthesized argument list.
    fn parse_appterm(&mut self, tokens: &mut TokenStream) -> Result<AppTerm, ParseError> {
        let span = self.expect_token(tokens, Token::Symbol)?;
        let functor = tokens.slice(span).to_owned();
        let mut args = vec![];
        if let Some(Ok(Token::LParen)) = tokens.peek_token() {
            tokens.advance();
            loop {
                args.push(self.parse_term(tokens)?);
                match tokens.peek_token() {
                    Some(Ok(Token::Comma)) => {
                        tokens.advance();
                    }
                    Some(Ok(Token::RParen)) => {
                        tokens.advance();
                        break;
                    }
                    Some(other) => {
                        let (_, span) = tokens.next().unwrap();
                        return Err(ParseError::new(span, ParseErrorKind::unexpected(other)));
                    }
                    None => {
                        return Err(ParseError::new(tokens.eof(), ParseErrorKind::UnexpectedEof))
                    }
                }
            }
        }
        Ok(AppTerm::new(functor, args))
    }

    fn parse_term(&mut self, tokens: &mut TokenStream) -> Result<Term, ParseError> {
        match tokens.peek_token() {
            Some(Ok(Token::Variable)) => {
                let (_, span) = tokens.next().unwrap();
                Ok(Term::Var(Var::new(tokens.slice(span))))
            }
            Some(Ok(Token::Wildcard)) => {
                tokens.advance();
                self.next_wildcard += 1;
                Ok(Term::Var(Var::new(format!("_{}", self.next_wildcard))))
            }
            Some(Ok(Token::Int(i))) => {
                tokens.advance();
                Ok(Term::Const(Const::Int(i)))
            }
            Some(Ok(Token::Symbol)) => {
                let (_, span) = tokens.next().unwrap();
                let name = tokens.slice(span).to_owned();
                // a bare symbol is an atomic constant, a symbol followed by `(` an application
                if let Some(Ok(Token::LParen)) = tokens.peek_token() {
                    tokens.advance();
                    let mut args = vec![];
                    loop {
                        args.push(self.parse_term(tokens)?);
                        match tokens.peek_token() {
                            Some(Ok(Token::Comma)) => {
                                tokens.advance();
                            }
                            Some(Ok(Token::RParen)) => {
                                tokens.advance();
                                break;
                            }
                            Some(other) => {
                                let (_, span) = tokens.next().unwrap();
                                return Err(ParseError::new(
                                    span,
                                    ParseErrorKind::unexpected(other),
                                ));
                            }
                            None => {
                                return Err(ParseError::new(
                                    tokens.eof(),
                                    ParseErrorKind::UnexpectedEof,
                                ))
                            }
                        }
                    }
                    Ok(Term::App(AppTerm::new(name, args)))
                } else {
                    Ok(Term::Const(Const::Atom(name)))
                }
            }
            Some(other) => {
                let (_, span) = tokens.next().unwrap();
                Err(ParseError::new(span, ParseErrorKind::unexpected(other)))
            }
            None => Err(ParseError::new(tokens.eof(), ParseErrorKind::UnexpectedEof)),
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn query_roundtrip_test(input: &str) {
        let mut p = Parser::new();
        let q = p.parse_query_str(input).unwrap();
        assert_eq!(q.to_string(), input);
    }

    #[test]
    fn query_parsing() {
        query_roundtrip_test("grandparent(bob, X).");
        query_roundtrip_test("grandparent(bob, X), female(X).");

        query_roundtrip_test("add(s(s(s(s(z)))), s(s(z)), X).");
    }

    fn rule_roundtrip_test(input: &str) {
        let mut p = Parser::new();
        let r = p.parse_rule_str(input).unwrap();
        assert_eq!(r.to_string(), input);
    }

    #[test]
    fn rule_parsing() {
        rule_roundtrip_test("is_natural(z).");
        rule_roundtrip_test("is_natural(s(X)) :- is_natural(X).");
        rule_roundtrip_test("grandparent(X, Y) :- parent(X, Z), parent(Z, Y).");
        rule_roundtrip_test("halt.");
    }

    #[test]
    fn bare_symbols_are_constants_functors_are_applications() {
        let mut p = Parser::new();
        let t = p.parse_term_str("likes(mary, wine)").unwrap();
        assert_eq!(
            t,
            Term::App(AppTerm::new(
                "likes",
                vec![
                    Term::Const(Const::Atom("mary".into())),
                    Term::Const(Const::Atom("wine".into())),
                ]
            ))
        );
    }

    #[test]
    fn integer_parsing() {
        let mut p = Parser::new();
        assert_eq!(
            p.parse_term_str("age(bob, 42)").unwrap(),
            Term::App(AppTerm::new(
                "age",
                vec![
                    Term::Const(Const::Atom("bob".into())),
                    Term::Const(Const::Int(42)),
                ]
            ))
        );
        assert_eq!(p.parse_term_str("-7").unwrap(), Term::Const(Const::Int(-7)));
    }

    #[test]
    fn wildcards_are_pairwise_distinct() {
        let mut p = Parser::new();
        let q = p.parse_query_str("pair(_, _).").unwrap();
        match &q.goals[0] {
            Term::App(pair) => assert_ne!(pair.args[0], pair.args[1]),
            other => panic!("unexpected goal: {:?}", other),
        }
    }

    #[test]
    fn comment_parsing() {
        let mut p = Parser::new();
        let with_comment = p.parse_rule_str("foo. % example comment").unwrap();
        let no_comment = p.parse_rule_str("foo.").unwrap();
        assert_eq!(with_comment, no_comment);
        let with_comment = p.parse_rule_str("foo. % bar.").unwrap();
        assert_eq!(with_comment, no_comment);

        let no_comment = p
            .parse_rules_str(
                "foo.
    bar.",
            )
            .unwrap();
        let with_comment = p
            .parse_rules_str(
                "foo. % comment
    bar.",
            )
            .unwrap();
        assert_eq!(with_comment, no_comment);
        let with_comment = p
            .parse_rules_str(
                "%comment
    foo.
    bar.",
            )
            .unwrap();
        assert_eq!(with_comment, no_comment);
    }

    #[test]
    fn parse_errors_are_reported() {
        let mut p = Parser::new();
        assert!(p.parse_rule_str("foo").is_err());
        assert!(p.parse_rule_str("foo(").is_err());
        assert!(p.parse_query_str("foo. bar.").is_err());
        assert!(p.parse_rule_str("Foo(x).").is_err());
    }
}
