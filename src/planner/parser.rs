use crate::{
    planner::{error::PrepareError, statement::Statement},
    types::row::Row,
};
use sqlparser::{
    ast::{Expr, SelectItem, SetExpr, Statement as SqlStatement, UnaryOperator, Value},
    dialect::SQLiteDialect,
    parser::Parser,
};

/// Turns user text into a [`Statement`].
///
/// Two forms are understood: the shorthand `insert <id> <username> <email>` /
/// `select`, and SQL `INSERT INTO t VALUES (...)` / `SELECT * FROM t`. There is
/// a single fixed-schema table, so the table name in SQL is not checked.
#[derive(Debug, Default)]
pub struct SqlParser;

impl SqlParser {
    pub fn new() -> Self {
        Self
    }

    pub fn prepare(&self, input: &str) -> Result<Statement, PrepareError> {
        let input = input.trim();
        let mut words = input.split_whitespace();
        let keyword = words.next().unwrap_or_default().to_ascii_lowercase();

        match keyword.as_str() {
            "insert" => {
                let args: Vec<&str> = words.collect();
                if args.first().is_some_and(|w| w.eq_ignore_ascii_case("into")) {
                    self.parse_sql(input)
                } else {
                    Self::prepare_insert(&args)
                }
            }
            "select" => match words.next() {
                None => Ok(Statement::Select),
                Some(_) => self.parse_sql(input),
            },
            _ => Err(PrepareError::UnrecognizedStatement(input.to_string())),
        }
    }

    fn prepare_insert(args: &[&str]) -> Result<Statement, PrepareError> {
        let [id, username, email] = args else {
            return Err(PrepareError::SyntaxError(format!(
                "insert expects <id> <username> <email>, got {} argument(s)",
                args.len()
            )));
        };
        let id = parse_id(id)?;
        Ok(Statement::Insert(Row::new(id, username, email)?))
    }

    pub fn parse_sql(&self, sql: &str) -> Result<Statement, PrepareError> {
        let dialect = SQLiteDialect {};
        let statements = Parser::parse_sql(&dialect, sql)?;

        if statements.len() != 1 {
            return Err(PrepareError::SyntaxError(
                "Expected exactly one statement".to_string(),
            ));
        }

        self.to_statement(&statements[0], sql)
    }

    fn to_statement(&self, statement: &SqlStatement, sql: &str) -> Result<Statement, PrepareError> {
        match statement {
            SqlStatement::Insert(insert) => {
                let source = insert.source.as_ref().ok_or_else(|| {
                    PrepareError::SyntaxError("INSERT requires a VALUES list".to_string())
                })?;
                let SetExpr::Values(values) = source.body.as_ref() else {
                    return Err(PrepareError::SyntaxError(
                        "INSERT requires a VALUES list".to_string(),
                    ));
                };
                let [exprs] = values.rows.as_slice() else {
                    return Err(PrepareError::SyntaxError(
                        "INSERT takes exactly one row".to_string(),
                    ));
                };
                let [id, username, email] = exprs.as_slice() else {
                    return Err(PrepareError::SyntaxError(format!(
                        "expected (id, username, email), got {} value(s)",
                        exprs.len()
                    )));
                };
                let row = Row::new(id_from_expr(id)?, &text_from_expr(username)?, &text_from_expr(email)?)?;
                Ok(Statement::Insert(row))
            }
            SqlStatement::Query(query) => match query.body.as_ref() {
                SetExpr::Select(select)
                    if !select.projection.is_empty()
                        && select
                            .projection
                            .iter()
                            .all(|item| matches!(item, SelectItem::Wildcard(_))) =>
                {
                    Ok(Statement::Select)
                }
                _ => Err(PrepareError::SyntaxError(
                    "only SELECT * is supported".to_string(),
                )),
            },
            _ => Err(PrepareError::UnrecognizedStatement(sql.to_string())),
        }
    }
}

fn parse_id(text: &str) -> Result<u32, PrepareError> {
    let id: i64 = text
        .parse()
        .map_err(|_| PrepareError::SyntaxError(format!("'{text}' is not a valid id")))?;
    if id < 0 {
        return Err(PrepareError::NegativeId);
    }
    u32::try_from(id).map_err(|_| PrepareError::SyntaxError(format!("id {id} is out of range")))
}

fn id_from_expr(expr: &Expr) -> Result<u32, PrepareError> {
    match expr {
        Expr::Value(Value::Number(digits, _)) => parse_id(digits),
        Expr::UnaryOp {
            op: UnaryOperator::Minus,
            expr,
        } => match expr.as_ref() {
            Expr::Value(Value::Number(digits, _)) => match parse_id(digits)? {
                0 => Ok(0),
                _ => Err(PrepareError::NegativeId),
            },
            other => Err(PrepareError::SyntaxError(format!("expected an integer id, got -{other}"))),
        },
        other => Err(PrepareError::SyntaxError(format!("expected an integer id, got {other}"))),
    }
}

fn text_from_expr(expr: &Expr) -> Result<String, PrepareError> {
    match expr {
        Expr::Value(Value::SingleQuotedString(text) | Value::DoubleQuotedString(text)) => {
            Ok(text.clone())
        }
        other => Err(PrepareError::SyntaxError(format!("expected a quoted string, got {other}"))),
    }
}
