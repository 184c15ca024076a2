use nom::branch::alt;
use nom::bytes::complete::{tag, take_while, take_while1};
use nom::character::complete::{space0, space1};
use nom::combinator::map;
use nom::multi::separated_list;

pub type ParseError<'a> = nom::error::VerboseError<&'a str>;
pub type ParseResult<'a, T> = nom::IResult<&'a str, T, ParseError<'a>>;

/// One whitespace-delimited chunk of a raw event description.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Token<'a> {
    /// A `key=value` chunk.
    Param(&'a str, &'a str),
    /// Anything else: the event name, meta punctuation, etc.
    Word(&'a str),
}

fn is_param_char(c: char) -> bool {
    c != '=' && !c.is_whitespace()
}

fn parse_param(input: &str) -> ParseResult<Token> {
    let (input, key) = take_while1(is_param_char)(input)?;
    let (input, _) = tag("=")(input)?;
    let (input, value) = take_while(is_param_char)(input)?;
    // A second `=` cuts the value short; the rest of the chunk is dropped.
    let (input, _) = take_while(|c: char| !c.is_whitespace())(input)?;
    Ok((input, Token::Param(key, value)))
}

fn parse_word(input: &str) -> ParseResult<Token> {
    map(take_while1(|c: char| !c.is_whitespace()), Token::Word)(input)
}

pub fn parse_tokens(input: &str) -> ParseResult<Vec<Token>> {
    let (input, _) = space0(input)?;
    let (input, tokens) = separated_list(space1, alt((parse_param, parse_word)))(input)?;
    let (input, _) = space0(input)?;
    Ok((input, tokens))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_and_words() {
        let (rest, tokens) =
            parse_tokens("note_on channel=0 note=72 velocity=100 time=480").unwrap();
        assert!(rest.is_empty());
        assert_eq!(
            tokens,
            vec![
                Token::Word("note_on"),
                Token::Param("channel", "0"),
                Token::Param("note", "72"),
                Token::Param("velocity", "100"),
                Token::Param("time", "480"),
            ]
        );
    }

    #[test]
    fn test_double_equals_truncates_value() {
        let (_, tokens) = parse_tokens("a=b=c").unwrap();
        assert_eq!(tokens, vec![Token::Param("a", "b")]);
    }

    #[test]
    fn test_empty_input() {
        let (_, tokens) = parse_tokens("").unwrap();
        assert!(tokens.is_empty());
    }
}
