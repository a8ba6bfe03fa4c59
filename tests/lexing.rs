use minil::lang::{tokenize, TokenKind};

// ============================================================================
// Tokens
// ============================================================================

#[test]
fn test_keywords() {
    let kinds = kinds_of("read print if else while end");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Read,
            TokenKind::Print,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::End,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_identifiers() {
    let tokens = tokenize("x _tmp v2 readx").unwrap();
    for token in &tokens[..4] {
        assert_eq!(token.kind, TokenKind::Ident);
    }
    assert_eq!(tokens[0].lexeme, "x");
    assert_eq!(tokens[1].lexeme, "_tmp");
    assert_eq!(tokens[2].lexeme, "v2");
    // A keyword prefix does not make a keyword
    assert_eq!(tokens[3].lexeme, "readx");
}

#[test]
fn test_numbers() {
    let tokens = tokenize("0 42 007").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Number(0));
    assert_eq!(tokens[1].kind, TokenKind::Number(42));
    // Leading zeros are decimal, not octal
    assert_eq!(tokens[2].kind, TokenKind::Number(7));
    assert_eq!(tokens[2].lexeme, "007");
}

#[test]
fn test_operators() {
    let kinds = kinds_of("+ - * / ( ) { } ; = == < <= > >= !=");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::Semicolon,
            TokenKind::Assign,
            TokenKind::EqEq,
            TokenKind::Lt,
            TokenKind::LtEq,
            TokenKind::Gt,
            TokenKind::GtEq,
            TokenKind::NotEq,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_two_char_operators_without_spaces() {
    let kinds = kinds_of("a<=b==c");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Ident,
            TokenKind::LtEq,
            TokenKind::Ident,
            TokenKind::EqEq,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
}

// ============================================================================
// Locations
// ============================================================================

#[test]
fn test_locations_are_one_indexed() {
    let tokens = tokenize("read a;\n  print a;").unwrap();
    assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
    assert_eq!((tokens[1].line, tokens[1].column), (1, 6));
    assert_eq!((tokens[2].line, tokens[2].column), (1, 7));
    // Indentation counts toward the column
    assert_eq!((tokens[3].line, tokens[3].column), (2, 3));
}

/// Re-emitting identifier and number tokens must reproduce the source
/// slice at their reported location.
#[test]
fn test_lexemes_match_source_slices() {
    let source = "read alpha;\nbeta = alpha + 42;\nprint beta;\nend";
    let tokens = tokenize(source).unwrap();
    for token in &tokens {
        if matches!(token.kind, TokenKind::Ident | TokenKind::Number(_)) {
            let line: Vec<char> = source.lines().nth(token.line - 1).unwrap().chars().collect();
            let start = token.column - 1;
            let slice: String = line[start..start + token.lexeme.chars().count()]
                .iter()
                .collect();
            assert_eq!(slice, token.lexeme);
        }
    }
}

// ============================================================================
// Comments
// ============================================================================

#[test]
fn test_line_comment_runs_to_newline() {
    let kinds = kinds_of("read a; // the rest is ignored = != @\nprint a;");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Read,
            TokenKind::Ident,
            TokenKind::Semicolon,
            TokenKind::Print,
            TokenKind::Ident,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_block_comment_spans_lines() {
    let tokens = tokenize("read /* a\nblock\ncomment */ a;").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Read);
    assert_eq!(tokens[1].kind, TokenKind::Ident);
    // The identifier sits on the comment's closing line
    assert_eq!((tokens[1].line, tokens[1].column), (3, 12));
}

#[test]
fn test_unterminated_block_comment() {
    let e = tokenize("read a; /* never closed").unwrap_err();
    assert!(e.message.contains("unterminated block comment"));
    // Reported at the comment's opening
    assert_eq!((e.line, e.column), (1, 9));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unexpected_character() {
    let e = tokenize("x = @;").unwrap_err();
    assert!(e.message.contains("unexpected character '@'"));
    assert_eq!((e.line, e.column), (1, 5));
    // The excerpt carries a caret under the offending column
    assert_eq!(e.excerpt, "x = @;\n    ^");
}

#[test]
fn test_bare_bang_is_an_error() {
    let e = tokenize("x = !y;").unwrap_err();
    assert!(e.message.contains("expected '=' after '!'"));
    assert_eq!((e.line, e.column), (1, 5));
}

#[test]
fn test_oversized_literal() {
    let e = tokenize("x = 99999999999999999999;").unwrap_err();
    assert!(e.message.contains("too large"));
}

#[test]
fn test_error_location_on_later_line() {
    let e = tokenize("read a;\nread b;\n   ?\n").unwrap_err();
    assert_eq!((e.line, e.column), (3, 4));
}

// ============================================================================
// Helpers
// ============================================================================

fn kinds_of(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}
