//! Statement parser for Lineage source text.
//!
//! The parser reads the source directly with winnow over a [`LocatingSlice`],
//! one `;`-terminated statement at a time. A statement that fails to parse
//! produces a single [`Diagnostic`]; the parser then skips past the next `;`
//! and carries on, so every broken statement in a file is reported in one pass.

use winnow::{
    Parser as _,
    ascii::{digit1, multispace1},
    combinator::{alt, cut_err, delimited, not, opt, peek, preceded, repeat, separated, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location},
    token::{literal, none_of, one_of, take_till, take_while},
};

use lineage_core::{identifier::MemberId, semantic::RelationKind};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    span::Span,
};

const STATEMENT_HELP: &str =
    "statements start with `canvas`, `member`, `child`, `spouse` or `sibling`";

/// Diagnostic information attached to winnow errors via `.context()`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StatementDiagnostic {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
    /// Start of the offending construct. `None` labels the error position only.
    start: Option<usize>,
}

impl StatementDiagnostic {
    const fn expected(message: &'static str, help: Option<&'static str>) -> Self {
        Self {
            code: ErrorCode::E100,
            message,
            help,
            start: None,
        }
    }
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<StatementDiagnostic>>;

/// A parsed `key="value"` member attribute.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Attribute<'a> {
    pub key: &'a str,
    pub value: String,
    pub span: Span,
}

/// A single parsed statement.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Statement<'a> {
    Canvas {
        width: f32,
        height: f32,
    },
    Member {
        id: MemberId,
        name: String,
        attributes: Vec<Attribute<'a>>,
    },
    Relation {
        kind: RelationKind,
        from: MemberId,
        to: MemberId,
    },
}

#[derive(Debug, Clone, Copy)]
enum Keyword {
    Canvas,
    Member,
    Relation(RelationKind),
}

/// Skip whitespace and `//` line comments.
fn trivia(input: &mut Input<'_>) -> IResult<()> {
    repeat(0.., alt((multispace1.void(), line_comment))).parse_next(input)
}

fn line_comment(input: &mut Input<'_>) -> IResult<()> {
    preceded("//", take_while(0.., |c: char| c != '\n'))
        .void()
        .parse_next(input)
}

fn keyword(input: &mut Input<'_>) -> IResult<Keyword> {
    terminated(
        alt((
            literal("canvas").value(Keyword::Canvas),
            literal("member").value(Keyword::Member),
            literal("child").value(Keyword::Relation(RelationKind::Child)),
            literal("spouse").value(Keyword::Relation(RelationKind::Spouse)),
            literal("sibling").value(Keyword::Relation(RelationKind::Sibling)),
        )),
        // Word boundary: `children` is not `child`
        peek(not(one_of(|c: char| c.is_ascii_alphanumeric() || c == '_'))),
    )
    .parse_next(input)
}

fn member_id(input: &mut Input<'_>) -> IResult<MemberId> {
    digit1
        .try_map(str::parse::<u64>)
        .map(MemberId::new)
        .parse_next(input)
}

/// Non-negative decimal such as `1200` or `640.5`.
fn dimension(input: &mut Input<'_>) -> IResult<f32> {
    take_while(1.., |c: char| c.is_ascii_digit() || c == '.')
        .try_map(str::parse::<f32>)
        .parse_next(input)
}

/// Parse an escape sequence after the backslash.
fn string_escape(input: &mut Input<'_>) -> IResult<char> {
    let escape_start = input.current_token_start();

    '\\'.parse_next(input)?;

    cut_err(one_of(['"', '\\', 'n', 't']))
        .map(|c| match c {
            'n' => '\n',
            't' => '\t',
            other => other,
        })
        .context(StatementDiagnostic {
            code: ErrorCode::E002,
            message: "invalid escape sequence",
            help: Some("valid escapes: `\\\"`, `\\\\`, `\\n`, `\\t`"),
            start: Some(escape_start),
        })
        .parse_next(input)
}

/// Parse a double-quoted string literal on a single line.
fn string_literal(input: &mut Input<'_>) -> IResult<String> {
    let start = input.current_token_start();

    '"'.parse_next(input)?;

    let content = repeat(0.., alt((string_escape, none_of(['"', '\\', '\n', '\r'])))).fold(
        String::new,
        |mut acc, ch| {
            acc.push(ch);
            acc
        },
    );

    cut_err(terminated(content, '"'))
        .context(StatementDiagnostic {
            code: ErrorCode::E001,
            message: "unterminated string literal",
            help: Some("add a closing `\"` before the end of the line"),
            start: Some(start),
        })
        .parse_next(input)
}

fn attribute<'a>(input: &mut Input<'a>) -> IResult<Attribute<'a>> {
    let (key, range) = take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || c == '_' || c == '-'
    })
    .with_span()
    .parse_next(input)?;

    trivia(input)?;
    '='.context(StatementDiagnostic::expected(
        "expected `=` after attribute name",
        Some("attributes are written as `key=\"value\"`"),
    ))
    .parse_next(input)?;
    trivia(input)?;

    let value = string_literal
        .context(StatementDiagnostic::expected(
            "expected a quoted attribute value",
            Some("attributes are written as `key=\"value\"`"),
        ))
        .parse_next(input)?;

    Ok(Attribute {
        key,
        value,
        span: Span::new(range),
    })
}

/// Parse `[key="value", ...]`.
fn attribute_list<'a>(input: &mut Input<'a>) -> IResult<Vec<Attribute<'a>>> {
    '['.parse_next(input)?;

    cut_err(terminated(
        separated(0.., delimited(trivia, attribute, trivia), ','),
        preceded(
            trivia,
            ']'.context(StatementDiagnostic::expected("expected `,` or `]`", None)),
        ),
    ))
    .parse_next(input)
}

fn canvas_body<'a>(input: &mut Input<'a>) -> IResult<Statement<'a>> {
    const HELP: Option<&str> = Some("write the canvas size as `canvas WIDTH HEIGHT;`");

    trivia(input)?;
    let width = dimension
        .context(StatementDiagnostic::expected("expected canvas width", HELP))
        .parse_next(input)?;
    trivia(input)?;
    let height = dimension
        .context(StatementDiagnostic::expected("expected canvas height", HELP))
        .parse_next(input)?;

    Ok(Statement::Canvas { width, height })
}

fn member_body<'a>(input: &mut Input<'a>) -> IResult<Statement<'a>> {
    const HELP: Option<&str> = Some("write members as `member ID \"NAME\";`");

    trivia(input)?;
    let id = member_id
        .context(StatementDiagnostic::expected("expected a member id", HELP))
        .parse_next(input)?;
    trivia(input)?;
    let name = string_literal
        .context(StatementDiagnostic::expected(
            "expected a quoted member name",
            HELP,
        ))
        .parse_next(input)?;
    let attributes = opt(preceded(trivia, attribute_list))
        .parse_next(input)?
        .unwrap_or_default();

    Ok(Statement::Member {
        id,
        name,
        attributes,
    })
}

fn relation_body<'a>(input: &mut Input<'a>, kind: RelationKind) -> IResult<Statement<'a>> {
    const HELP: Option<&str> = Some("write relations as `child PARENT CHILD;`");

    trivia(input)?;
    let from = member_id
        .context(StatementDiagnostic::expected("expected a member id", HELP))
        .parse_next(input)?;
    trivia(input)?;
    let to = member_id
        .context(StatementDiagnostic::expected(
            "expected a second member id",
            HELP,
        ))
        .parse_next(input)?;

    Ok(Statement::Relation { kind, from, to })
}

fn statement<'a>(input: &mut Input<'a>) -> IResult<Statement<'a>> {
    let keyword = keyword
        .context(StatementDiagnostic::expected(
            "expected a statement",
            Some(STATEMENT_HELP),
        ))
        .parse_next(input)?;

    let statement = match keyword {
        Keyword::Canvas => canvas_body(input)?,
        Keyword::Member => member_body(input)?,
        Keyword::Relation(kind) => relation_body(input, kind)?,
    };

    trivia(input)?;
    ';'.context(StatementDiagnostic::expected(
        "expected `;`",
        Some("statements end with `;`"),
    ))
    .parse_next(input)?;

    Ok(statement)
}

/// Skip to just past the next `;`, or to the end of input.
fn recover(input: &mut Input<'_>) -> IResult<()> {
    (take_till(0.., ';'), opt(';')).void().parse_next(input)
}

/// Parser state: statements read so far and the diagnostics emitted.
struct StatementParser<'a> {
    source: &'a str,
    statements: Vec<(Statement<'a>, Span)>,
    diagnostics: DiagnosticCollector,
}

impl<'a> StatementParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            statements: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn run(&mut self) {
        let mut input = LocatingSlice::new(self.source);

        loop {
            if trivia(&mut input).is_err() || input.is_empty() {
                break;
            }

            let start = input.current_token_start();
            match statement(&mut input) {
                Ok(statement) => {
                    let end = input.current_token_start();
                    self.statements.push((statement, Span::new(start..end)));
                }
                Err(err) => {
                    let error_pos = input.current_token_start();
                    self.diagnostics.emit(self.convert_err_mode(err, error_pos));

                    if recover(&mut input).is_err() {
                        break;
                    }
                }
            }
        }
    }

    /// Convert a winnow error at `error_pos` into a [`Diagnostic`].
    ///
    /// Syntax errors at the end of input are reported as incomplete
    /// statements (E101).
    fn convert_err_mode(
        &self,
        err: ErrMode<ContextError<StatementDiagnostic>>,
        error_pos: usize,
    ) -> Diagnostic {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        let found = self
            .source
            .get(error_pos..)
            .and_then(|rest| rest.chars().next());
        let found_len = found.map_or(0, char::len_utf8);

        let Some(ctx) = context_error.context().next() else {
            let span = Span::new(error_pos..error_pos + found_len);
            return Diagnostic::error("unexpected input")
                .with_code(ErrorCode::E100)
                .with_label(span, ErrorCode::E100.description());
        };

        let span = Span::new(ctx.start.unwrap_or(error_pos)..error_pos + found_len);
        let (code, message) = match (ctx.code, found) {
            (ErrorCode::E100, None) => (
                ErrorCode::E101,
                format!("{}, found end of input", ctx.message),
            ),
            (ErrorCode::E100, Some(ch)) => (
                ErrorCode::E100,
                format!("{}, found `{}`", ctx.message, ch.escape_default()),
            ),
            (code, _) => (code, ctx.message.to_string()),
        };

        let mut diag = Diagnostic::error(message)
            .with_code(code)
            .with_label(span, code.description());
        if let Some(help) = ctx.help {
            diag = diag.with_help(help);
        }
        diag
    }
}

/// Parse every statement in `source`.
///
/// Returns the statements that parsed cleanly with their spans, plus a
/// collector holding one diagnostic per statement that did not.
pub(crate) fn parse_statements(
    source: &str,
) -> (Vec<(Statement<'_>, Span)>, DiagnosticCollector) {
    let mut parser = StatementParser::new(source);
    parser.run();
    (parser.statements, parser.diagnostics)
}
