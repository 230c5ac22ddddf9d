//! A `nom`-based parser for the JJQ filter language.
//!
//! Precedence, loosest first: `|`, then `,`, then terms. Object values are
//! single terms, so `{"a": 1, 2}` is rejected and `{"a": (1, 2)}` is needed.
use crate::error::SyntaxError;
use crate::tree::{AccessStep, Pair, ParseTree};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{is_not, tag, take_while},
    character::complete::{alpha1, anychar, char, digit0, digit1, multispace0, one_of},
    combinator::{map, opt, recognize, value},
    multi::{many0, many1, separated_list0, separated_list1},
    sequence::{delimited, pair, preceded, terminated},
};

/// Deepest allowed nesting of `(`, `[` and `{`. Parsing, building and
/// evaluation all recurse once per level, so this bounds their stack use.
pub const MAX_NESTING_DEPTH: usize = 64;

// --- Main Public Parser ---

pub fn parse_filter(input: &str) -> Result<ParseTree, SyntaxError> {
    log::trace!("Parsing filter '{}'", input);
    let result = if exceeds_nesting_limit(input) {
        Err(SyntaxError::MalformedExpression {
            input: input.to_string(),
            message: format!("nesting too deep (limit is {} levels)", MAX_NESTING_DEPTH),
        })
    } else {
        parse_tree(input)
    };
    if let Err(e) = &result {
        log::debug!("{}", e);
    }
    result
}

fn parse_tree(input: &str) -> Result<ParseTree, SyntaxError> {
    match pipeline(input.trim()) {
        Ok(("", tree)) => Ok(tree),
        Ok((rem, _)) => Err(SyntaxError::MalformedExpression {
            input: input.to_string(),
            message: format!("Parser did not consume all input. Remainder: '{}'", rem),
        }),
        Err(e) => Err(SyntaxError::MalformedExpression {
            input: input.to_string(),
            message: e.to_string(),
        }),
    }
}

/// Scans for brackets outside string tokens, before any recursive descent.
fn exceeds_nesting_limit(input: &str) -> bool {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for c in input.chars() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '(' | '[' | '{' => {
                depth += 1;
                if depth > MAX_NESTING_DEPTH {
                    return true;
                }
            }
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    false
}

// --- Combinators & Helpers ---

/// A combinator that takes a parser `inner` and produces a parser that consumes surrounding whitespace.
fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: nom::error::ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

// --- Composition (in order of precedence) ---

fn pipeline(input: &str) -> IResult<&str, ParseTree> {
    map(separated_list1(char('|'), comma), ParseTree::Pipe).parse(input)
}

fn comma(input: &str) -> IResult<&str, ParseTree> {
    map(separated_list1(char(','), term), ParseTree::Comma).parse(input)
}

fn term(input: &str) -> IResult<&str, ParseTree> {
    ws(alt((parenthesized, operation))).parse(input)
}

fn parenthesized(input: &str) -> IResult<&str, ParseTree> {
    map(delimited(char('('), pipeline, char(')')), |inner| {
        ParseTree::Paren(Box::new(inner))
    })
    .parse(input)
}

fn operation(input: &str) -> IResult<&str, ParseTree> {
    alt((
        map(many1(access_step), ParseTree::Access), // Must be before identity to parse `.a` not `.`
        value(ParseTree::Identity, char('.')),
        map(string_token, |s| ParseTree::StringLiteral(s.to_string())),
        map(number_token, |s| ParseTree::NumberLiteral(s.to_string())),
        array_literal,
        object_literal,
    ))
    .parse(input)
}

// --- Access Parsers ---

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))
    .parse(input)
}

fn bracket_step(input: &str) -> IResult<&str, AccessStep> {
    delimited(
        terminated(char('['), multispace0),
        alt((
            map(string_token, |s| AccessStep::QuotedField(s.to_string())),
            map(number_token, |s| AccessStep::Index(s.to_string())),
        )),
        preceded(multispace0, char(']')),
    )
    .parse(input)
}

fn access_step(input: &str) -> IResult<&str, AccessStep> {
    preceded(
        char('.'),
        alt((
            bracket_step,
            map(identifier, |s| AccessStep::Field(s.to_string())),
        )),
    )
    .parse(input)
}

// --- Literal Tokens ---

/// Recognizes a JSON string token, quotes and escapes included.
fn string_token(input: &str) -> IResult<&str, &str> {
    recognize((
        char('"'),
        many0(alt((is_not("\"\\"), recognize(pair(char('\\'), anychar))))),
        char('"'),
    ))
    .parse(input)
}

/// Recognizes a JSON number token: optional sign, fraction and exponent.
fn number_token(input: &str) -> IResult<&str, &str> {
    recognize((
        opt(char('-')),
        alt((tag("0"), recognize(pair(one_of("123456789"), digit0)))),
        opt(pair(char('.'), digit1)),
        opt((one_of("eE"), opt(one_of("+-")), digit1)),
    ))
    .parse(input)
}

// --- Constructors ---

fn array_literal(input: &str) -> IResult<&str, ParseTree> {
    map(
        delimited(
            terminated(char('['), multispace0),
            opt(pipeline),
            preceded(multispace0, char(']')),
        ),
        |contents| ParseTree::ArrayLiteral(contents.map(Box::new)),
    )
    .parse(input)
}

fn object_pair(input: &str) -> IResult<&str, Pair> {
    map(
        (ws(string_token), char(':'), term),
        |(key, _, value)| Pair {
            key: key.to_string(),
            value,
        },
    )
    .parse(input)
}

fn object_literal(input: &str) -> IResult<&str, ParseTree> {
    map(
        delimited(
            char('{'),
            separated_list0(char(','), object_pair),
            preceded(multispace0, char('}')),
        ),
        ParseTree::ObjectLiteral,
    )
    .parse(input)
}
