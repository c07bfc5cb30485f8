#[cfg(test)]
use super::*;

#[test]
fn test_config_assignment_tokens() {
    let input = "$CONFIG = array('dbname' => 'nextcloud', 'installed' => true);";
    let mut lexer = Lexer::new(input);

    let expected_tokens = vec![
        Token::Variable("CONFIG".into()),
        Token::Assign,
        Token::Ident("array".into()),
        Token::LParen,
        Token::String("dbname".into()),
        Token::Arrow,
        Token::String("nextcloud".into()),
        Token::Comma,
        Token::String("installed".into()),
        Token::Arrow,
        Token::Bool(true),
        Token::RParen,
        Token::Semicolon,
        Token::Eof,
    ];

    for expected in expected_tokens {
        let tok = lexer.next_token();
        assert_eq!(tok, Ok(expected));
    }
}

#[test]
fn test_single_quote_escapes() {
    let input = r"'it\'s a \\ path \n'";
    let mut lexer = Lexer::new(input);
    let tok = lexer.next_token();
    // \n is not an escape inside single quotes
    assert_eq!(tok, Ok(Token::String("it's a \\ path \\n".into())));
}

#[test]
fn test_double_quote_escapes() {
    let input = r#""line\none\ttwo \$x""#;
    let mut lexer = Lexer::new(input);
    let tok = lexer.next_token();
    assert_eq!(tok, Ok(Token::String("line\none\ttwo $x".into())));
}

#[test]
fn test_interpolated_string_kept_raw() {
    let input = r#""host-$instance""#;
    let mut lexer = Lexer::new(input);
    let tok = lexer.next_token();
    assert_eq!(tok, Ok(Token::InterpString("\"host-$instance\"".into())));
}

#[test]
fn test_lone_dollar_is_not_interpolation() {
    let input = r#""costs $5""#;
    let mut lexer = Lexer::new(input);
    let tok = lexer.next_token();
    assert_eq!(tok, Ok(Token::String("costs $5".into())));
}

#[test]
fn test_number_literals() {
    let input = "42 3.5 1_000 0x1A 0755 1e3 .5";
    let mut lexer = Lexer::new(input);

    let expected_tokens = vec![
        Token::Int(42),
        Token::Float(3.5),
        Token::Int(1000),
        Token::Int(26),
        Token::Int(493),
        Token::Float(1000.0),
        Token::Float(0.5),
        Token::Eof,
    ];

    for expected in expected_tokens {
        let tok = lexer.next_token().unwrap();
        assert_eq!(tok, expected);
    }
}

#[test]
fn test_operator_disambiguation() {
    let input = "=> = -> - :: ** * . .5";
    let mut lexer = Lexer::new(input);

    let expected_tokens = vec![
        Token::Arrow,
        Token::Assign,
        Token::ObjectArrow,
        Token::Minus,
        Token::DoubleColon,
        Token::Pow,
        Token::Star,
        Token::Dot,
        Token::Float(0.5),
        Token::Eof,
    ];

    for expected in expected_tokens {
        let tok = lexer.next_token().unwrap();
        assert_eq!(tok, expected);
    }
}

#[test]
fn test_equality_is_outside_grammar() {
    let input = "== ===";
    let mut lexer = Lexer::new(input);
    assert_eq!(lexer.next_token(), Ok(Token::Other('=')));
    assert_eq!(lexer.next_token(), Ok(Token::Other('=')));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_comments_are_skipped() {
    let input = "1 // line comment\n# hash comment\n/* block\ncomment */ 2";
    let mut lexer = Lexer::new(input);
    assert_eq!(lexer.next_token(), Ok(Token::Int(1)));
    assert_eq!(lexer.next_token(), Ok(Token::Int(2)));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_keywords_case_insensitive() {
    let input = "TRUE False NULL Array";
    let mut lexer = Lexer::new(input);
    assert_eq!(lexer.next_token(), Ok(Token::Bool(true)));
    assert_eq!(lexer.next_token(), Ok(Token::Bool(false)));
    assert_eq!(lexer.next_token(), Ok(Token::Null));
    assert_eq!(lexer.next_token(), Ok(Token::Ident("Array".into())));
}

#[test]
fn test_unclosed_string_error() {
    let input = "'never ends";
    let mut lexer = Lexer::new(input);
    let err = lexer.next_token().unwrap_err();
    match err {
        PatchError::UnclosedString { quote, code, .. } => {
            assert_eq!(quote, '\'');
            assert_eq!(code, Some(101));
        }
        _ => panic!("Expected UnclosedString"),
    }
}

#[test]
fn test_unclosed_block_comment_error() {
    let input = "/* never ends";
    let mut lexer = Lexer::new(input);
    let err = lexer.next_token().unwrap_err();
    match err {
        PatchError::UnexpectedEof { code, .. } => {
            assert_eq!(code, Some(103));
        }
        _ => panic!("Expected UnexpectedEof"),
    }
}

#[test]
fn test_token_start_skips_trivia() {
    let input = "  // note\n  $CONFIG = 1;";
    let mut lexer = Lexer::new(input);
    let tok = lexer.next_token().unwrap();
    assert_eq!(tok, Token::Variable("CONFIG".into()));
    assert_eq!(&input[..lexer.token_start()], "  // note\n  ");
}

#[test]
fn test_qualified_name_tokens() {
    let input = r"\OC\Memcache\APCu";
    let mut lexer = Lexer::new(input);
    assert_eq!(lexer.next_token(), Ok(Token::Backslash));
    assert_eq!(lexer.next_token(), Ok(Token::Ident("OC".into())));
    assert_eq!(lexer.next_token(), Ok(Token::Backslash));
    assert_eq!(lexer.next_token(), Ok(Token::Ident("Memcache".into())));
    assert_eq!(lexer.next_token(), Ok(Token::Backslash));
    assert_eq!(lexer.next_token(), Ok(Token::Ident("APCu".into())));
}
