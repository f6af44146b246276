use super::lexer::{Lexer, Token};

/// Statements of the bracket-quoted dialect the engine emits.
#[derive(Debug, PartialEq)]
pub(super) enum Statement {
    CreateTable {
        name: String,
        columns: Vec<ColumnDef>,
    },
    Insert {
        table: String,
        columns: Vec<String>,
        values: Vec<String>,
    },
    Update {
        target: String,
        assignments: Vec<(ColumnRef, String)>,
        from: TableRef,
        filter: Vec<Vec<Predicate>>,
    },
    Delete {
        target: String,
        from: TableRef,
        filter: Vec<Vec<Predicate>>,
    },
    Select {
        projection: Vec<String>,
        from: TableRef,
        joins: Vec<Join>,
        filter: Vec<Vec<Predicate>>,
    },
}

#[derive(Debug, PartialEq)]
pub(super) struct ColumnDef {
    pub(super) name: String,
    pub(super) not_null: bool,
    pub(super) primary_key: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct TableRef {
    pub(super) name: String,
    pub(super) alias: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct ColumnRef {
    pub(super) alias: String,
    pub(super) column: String,
}

#[derive(Debug, PartialEq)]
pub(super) struct Join {
    pub(super) outer: bool,
    pub(super) table: TableRef,
    pub(super) lhs: ColumnRef,
    pub(super) rhs: ColumnRef,
}

/// `[alias].[column] = @pN`
#[derive(Debug, PartialEq)]
pub(super) struct Predicate {
    pub(super) column: ColumnRef,
    pub(super) param: String,
}

pub(super) struct Parser<'a> {
    lexer: Lexer<'a>,
}

type Result<T> = std::result::Result<T, String>;

pub(super) fn parse(sql: &str) -> Result<Statement> {
    let mut parser = Parser {
        lexer: Lexer::new(sql),
    };

    let stmt = parser.statement()?;

    if parser.lexer.peek()? == Some(&Token::SemiColon) {
        parser.lexer.next()?;
    }

    match parser.lexer.next()? {
        None => Ok(stmt),
        Some(token) => Err(format!("unexpected trailing {token:?}")),
    }
}

impl Parser<'_> {
    fn statement(&mut self) -> Result<Statement> {
        match self.word()?.as_str() {
            "CREATE" => {
                self.keyword("TABLE")?;
                self.create_table()
            }
            "INSERT" => {
                self.keyword("INTO")?;
                self.insert()
            }
            "UPDATE" => self.update(),
            "DELETE" => {
                self.keyword("FROM")?;
                self.delete()
            }
            "SELECT" => self.select(),
            word => Err(format!("unsupported statement {word}")),
        }
    }

    fn create_table(&mut self) -> Result<Statement> {
        let name = self.ident()?;
        self.expect(Token::LParen)?;

        let mut columns = vec![];
        loop {
            columns.push(self.column_def()?);

            match self.next()? {
                Token::Comma => continue,
                Token::RParen => break,
                token => return Err(format!("unexpected {token:?} in column list")),
            }
        }

        Ok(Statement::CreateTable { name, columns })
    }

    /// `[name] TYPE[(args)] [NOT NULL] [PRIMARY KEY]`
    fn column_def(&mut self) -> Result<ColumnDef> {
        let name = self.ident()?;
        self.word()?;

        if self.lexer.peek()? == Some(&Token::LParen) {
            while self.next()? != Token::RParen {}
        }

        let mut def = ColumnDef {
            name,
            not_null: false,
            primary_key: false,
        };

        while self.peek_word()? {
            match self.word()?.as_str() {
                "NOT" => {
                    self.keyword("NULL")?;
                    def.not_null = true;
                }
                "PRIMARY" => {
                    self.keyword("KEY")?;
                    def.primary_key = true;
                }
                word => return Err(format!("unexpected {word} in column definition")),
            }
        }

        Ok(def)
    }

    fn insert(&mut self) -> Result<Statement> {
        let table = self.ident()?;

        self.expect(Token::LParen)?;
        let columns = self.comma_separated(Self::ident)?;
        self.expect(Token::RParen)?;

        self.keyword("VALUES")?;
        self.expect(Token::LParen)?;
        let values = self.comma_separated(Self::param)?;
        self.expect(Token::RParen)?;

        Ok(Statement::Insert {
            table,
            columns,
            values,
        })
    }

    fn update(&mut self) -> Result<Statement> {
        let target = self.ident()?;
        self.keyword("SET")?;

        let assignments = self.comma_separated(|parser| {
            let column = parser.column_ref()?;
            parser.expect(Token::Eq)?;
            Ok((column, parser.param()?))
        })?;

        self.keyword("FROM")?;
        let from = self.table_ref()?;
        self.keyword("WHERE")?;
        let filter = self.condition()?;

        Ok(Statement::Update {
            target,
            assignments,
            from,
            filter,
        })
    }

    fn delete(&mut self) -> Result<Statement> {
        let target = self.ident()?;
        self.keyword("FROM")?;
        let from = self.table_ref()?;
        self.keyword("WHERE")?;
        let filter = self.condition()?;

        Ok(Statement::Delete {
            target,
            from,
            filter,
        })
    }

    fn select(&mut self) -> Result<Statement> {
        let projection = self.comma_separated(|parser| {
            let alias = parser.ident()?;
            parser.expect(Token::Period)?;
            parser.expect(Token::Star)?;
            Ok(alias)
        })?;

        self.keyword("FROM")?;
        let from = self.table_ref()?;

        let mut joins = vec![];
        let mut filter = vec![];

        while self.peek_word()? {
            let outer = match self.word()?.as_str() {
                "INNER" => false,
                "LEFT" => {
                    self.keyword("OUTER")?;
                    true
                }
                "WHERE" => {
                    filter = self.condition()?;
                    break;
                }
                word => return Err(format!("unexpected {word} in SELECT")),
            };

            self.keyword("JOIN")?;
            let table = self.table_ref()?;
            self.keyword("ON")?;
            let lhs = self.column_ref()?;
            self.expect(Token::Eq)?;
            let rhs = self.column_ref()?;

            joins.push(Join {
                outer,
                table,
                lhs,
                rhs,
            });
        }

        Ok(Statement::Select {
            projection,
            from,
            joins,
            filter,
        })
    }

    /// AND-combined terms, each a predicate or a parenthesized OR of
    /// predicates.
    fn condition(&mut self) -> Result<Vec<Vec<Predicate>>> {
        let mut terms = vec![];

        loop {
            if self.lexer.peek()? == Some(&Token::LParen) {
                self.next()?;

                let mut operands = vec![self.predicate()?];
                while self.lexer.peek()? != Some(&Token::RParen) {
                    self.keyword("OR")?;
                    operands.push(self.predicate()?);
                }
                self.expect(Token::RParen)?;

                terms.push(operands);
            } else {
                terms.push(vec![self.predicate()?]);
            }

            if self.lexer.peek()? == Some(&Token::Word("AND".to_string())) {
                self.next()?;
            } else {
                return Ok(terms);
            }
        }
    }

    fn predicate(&mut self) -> Result<Predicate> {
        let column = self.column_ref()?;
        self.expect(Token::Eq)?;
        let param = self.param()?;

        Ok(Predicate { column, param })
    }

    fn table_ref(&mut self) -> Result<TableRef> {
        let name = self.ident()?;
        self.keyword("AS")?;
        let alias = self.ident()?;

        Ok(TableRef { name, alias })
    }

    fn column_ref(&mut self) -> Result<ColumnRef> {
        let alias = self.ident()?;
        self.expect(Token::Period)?;
        let column = self.ident()?;

        Ok(ColumnRef { alias, column })
    }

    fn comma_separated<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let mut items = vec![item(self)?];

        while self.lexer.peek()? == Some(&Token::Comma) {
            self.next()?;
            items.push(item(self)?);
        }

        Ok(items)
    }

    fn peek_word(&mut self) -> Result<bool> {
        Ok(matches!(self.lexer.peek()?, Some(Token::Word(_))))
    }

    fn ident(&mut self) -> Result<String> {
        match self.next()? {
            Token::Ident(ident) => Ok(ident),
            token => Err(format!("expected identifier, got {token:?}")),
        }
    }

    fn param(&mut self) -> Result<String> {
        match self.next()? {
            Token::Param(param) => Ok(param),
            token => Err(format!("expected parameter, got {token:?}")),
        }
    }

    fn word(&mut self) -> Result<String> {
        match self.next()? {
            Token::Word(word) => Ok(word),
            token => Err(format!("expected keyword, got {token:?}")),
        }
    }

    fn keyword(&mut self, keyword: &str) -> Result<()> {
        match self.word()? {
            word if word == keyword => Ok(()),
            word => Err(format!("expected {keyword}, got {word}")),
        }
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        match self.next()? {
            token if token == expected => Ok(()),
            token => Err(format!("expected {expected:?}, got {token:?}")),
        }
    }

    fn next(&mut self) -> Result<Token> {
        self.lexer
            .next()?
            .ok_or_else(|| "unexpected end of statement".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_select_with_or() {
        let stmt = parse(
            "SELECT [M1].*, [T1].* FROM [Base] AS [M1] \
             INNER JOIN [Derived] AS [T1] ON [M1].[Id] = [T1].[Id] \
             WHERE ([T1].[A] = @p0 OR [M1].[A] = @p0) AND [M1].[B] = @p1",
        )
        .unwrap();

        let Statement::Select {
            projection,
            joins,
            filter,
            ..
        } = stmt
        else {
            panic!("not a select");
        };

        assert_eq!(projection, ["M1", "T1"]);
        assert_eq!(joins.len(), 1);
        assert!(!joins[0].outer);
        assert_eq!(filter.len(), 2);
        assert_eq!(filter[0].len(), 2);
        assert_eq!(filter[1][0].param, "@p1");
    }

    #[test]
    fn parses_create_table() {
        let stmt = parse(
            "CREATE TABLE [T] ([Id] UNIQUEIDENTIFIER NOT NULL PRIMARY KEY, \
             [Amount] DECIMAL(10, 2), [Name] NVARCHAR(MAX) NOT NULL);",
        )
        .unwrap();

        let Statement::CreateTable { name, columns } = stmt else {
            panic!("not a create table");
        };

        assert_eq!(name, "T");
        assert_eq!(columns.len(), 3);
        assert!(columns[0].primary_key);
        assert!(!columns[1].not_null);
        assert!(columns[2].not_null);
    }
}
