//! XPath parser
//!
//! Recursive descent over the token stream, producing the prefix parse
//! tree in [`crate::ast`]. The parser understands the full XPath 1.0 step
//! grammar (all axes, node tests, nested predicates); restricting the
//! language to the searchable subset is left to the compiler so that the
//! error messages can distinguish "not XPath" from "not supported".

use crate::ast::{Axis, QName, XpNode};
use crate::lexer::{tokenize, Token};
use xsift_core::{Error, Result};

/// Parse an XPath expression into its prefix tree
pub fn parse(input: &str) -> Result<XpNode> {
    let tokens = tokenize(input)?;
    let mut parser = Parser::new(tokens);
    let tree = parser.parse_path()?;
    if let Some(token) = parser.peek() {
        return Err(Error::Parse(format!(
            "trailing input after path expression: {token:?}"
        )));
    }
    Ok(tree)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// absolute path: `/` step (`[` predicate `]`)* (`/` step ...)*
    fn parse_path(&mut self) -> Result<XpNode> {
        if !self.consume(&Token::Slash) {
            return Err(Error::Parse(
                "expected absolute path starting with '/'".to_string(),
            ));
        }

        let mut items = Vec::new();
        loop {
            items.push(self.parse_step()?);

            while self.check(&Token::LBracket) {
                self.advance();
                let expr = self.parse_or()?;
                self.expect(&Token::RBracket)?;
                items.push(XpNode::Predicate(Box::new(expr)));
            }

            if !self.consume(&Token::Slash) {
                break;
            }
        }

        Ok(XpNode::Document(items))
    }

    /// One location step: `@name`, `axis::test`, `prefix:name`, `name`, `*`
    fn parse_step(&mut self) -> Result<XpNode> {
        if self.consume(&Token::At) {
            let name = self.parse_qname()?;
            return Ok(XpNode::Step {
                axis: Axis::Attribute,
                name,
            });
        }

        if self.consume(&Token::Star) {
            return Ok(XpNode::Step {
                axis: Axis::Child,
                name: QName::local("*"),
            });
        }

        let name = self.parse_name()?;

        if self.consume(&Token::DoubleColon) {
            let axis = Axis::from_name(&name)
                .ok_or_else(|| Error::Parse(format!("unknown axis '{name}'")))?;
            let test = self.parse_node_test()?;
            return Ok(XpNode::Step { axis, name: test });
        }

        let qname = if self.consume(&Token::Colon) {
            QName {
                prefix: Some(name),
                name: self.parse_name()?,
            }
        } else {
            // A node-type test such as `node()` at the default axis
            if self.check(&Token::LParen) {
                self.advance();
                self.expect(&Token::RParen)?;
            }
            QName::local(name)
        };

        Ok(XpNode::Step {
            axis: Axis::Child,
            name: qname,
        })
    }

    /// The test after an explicit axis: `*`, `node()`, `name`, `prefix:name`
    fn parse_node_test(&mut self) -> Result<QName> {
        if self.consume(&Token::Star) {
            return Ok(QName::local("*"));
        }
        let name = self.parse_name()?;
        if self.check(&Token::LParen) {
            self.advance();
            self.expect(&Token::RParen)?;
            return Ok(QName::local(name));
        }
        if self.consume(&Token::Colon) {
            return Ok(QName {
                prefix: Some(name),
                name: self.parse_name()?,
            });
        }
        Ok(QName::local(name))
    }

    /// or-expr := and-expr (`or` and-expr)*
    fn parse_or(&mut self) -> Result<XpNode> {
        let mut left = self.parse_and()?;
        while self.consume_name("or") {
            let right = self.parse_and()?;
            left = XpNode::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    /// and-expr := comparison (`and` comparison)*
    fn parse_and(&mut self) -> Result<XpNode> {
        let mut left = self.parse_comparison()?;
        while self.consume_name("and") {
            let right = self.parse_comparison()?;
            left = XpNode::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    /// comparison := primary ((`=` | `!=`) primary)?
    fn parse_comparison(&mut self) -> Result<XpNode> {
        let left = self.parse_primary()?;
        if self.consume(&Token::Equals) {
            let right = self.parse_primary()?;
            return Ok(XpNode::Eq(Box::new(left), Box::new(right)));
        }
        if self.consume(&Token::NotEquals) {
            let right = self.parse_primary()?;
            return Ok(XpNode::Neq(Box::new(left), Box::new(right)));
        }
        Ok(left)
    }

    /// primary := `(` or-expr `)` | literal | `@name` | call | relative path
    fn parse_primary(&mut self) -> Result<XpNode> {
        match self.peek().cloned() {
            Some(Token::LParen) => {
                self.advance();
                let expr = self.parse_or()?;
                self.expect(&Token::RParen)?;
                Ok(expr)
            }
            Some(Token::StringSingle(s)) | Some(Token::StringDouble(s)) => {
                self.advance();
                Ok(XpNode::Literal(s))
            }
            Some(Token::Number(n)) => {
                self.advance();
                Ok(XpNode::Literal(n))
            }
            Some(Token::At) => {
                self.advance();
                let name = self.parse_qname()?;
                Ok(XpNode::Attribute(name))
            }
            Some(Token::Name(_)) => {
                let name = self.parse_name()?;
                if self.check(&Token::LParen) {
                    self.advance();
                    let mut args = Vec::new();
                    if !self.check(&Token::RParen) {
                        loop {
                            args.push(self.parse_or()?);
                            if !self.consume(&Token::Comma) {
                                break;
                            }
                        }
                    }
                    self.expect(&Token::RParen)?;
                    return Ok(XpNode::Call(name, args));
                }
                self.parse_relative_path(name)
            }
            other => Err(Error::Parse(format!(
                "unexpected token in predicate: {other:?}"
            ))),
        }
    }

    /// The remainder of a relative path whose first name is already
    /// consumed: `person/@userid`, `issue/owner/@login`, bare `title`
    fn parse_relative_path(&mut self, first: String) -> Result<XpNode> {
        let qname = if self.consume(&Token::Colon) {
            QName {
                prefix: Some(first),
                name: self.parse_name()?,
            }
        } else {
            QName::local(first)
        };

        let rest = if self.consume(&Token::Slash) {
            Some(Box::new(self.parse_relative_rest()?))
        } else if self.check(&Token::LBracket) {
            // A nested step with its own predicate, `person[@userid='x']`
            self.advance();
            let expr = self.parse_or()?;
            self.expect(&Token::RBracket)?;
            Some(Box::new(XpNode::Predicate(Box::new(expr))))
        } else {
            None
        };

        Ok(XpNode::Child { name: qname, rest })
    }

    fn parse_relative_rest(&mut self) -> Result<XpNode> {
        if self.consume(&Token::At) {
            let name = self.parse_qname()?;
            return Ok(XpNode::Attribute(name));
        }
        let name = self.parse_name()?;
        self.parse_relative_path(name)
    }

    fn parse_qname(&mut self) -> Result<QName> {
        let name = self.parse_name()?;
        if self.consume(&Token::Colon) {
            return Ok(QName {
                prefix: Some(name),
                name: self.parse_name()?,
            });
        }
        Ok(QName::local(name))
    }

    fn parse_name(&mut self) -> Result<String> {
        match self.peek().cloned() {
            Some(Token::Name(s)) => {
                self.advance();
                Ok(s)
            }
            other => Err(Error::Parse(format!("expected name, found {other:?}"))),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn check(&self, token: &Token) -> bool {
        self.peek() == Some(token)
    }

    fn consume(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume_name(&mut self, name: &str) -> bool {
        if matches!(self.peek(), Some(Token::Name(s)) if s == name) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token) -> Result<()> {
        if self.consume(token) {
            Ok(())
        } else {
            Err(Error::Parse(format!(
                "expected {token:?}, found {:?}",
                self.peek()
            )))
        }
    }
}
