//! AST construction over the token sequence.
//!
//! The builder does not invent a grammar: statement boundaries are
//! already present in the stream (`;`, `{`, `}`, control-flow headers),
//! and expression roots are discovered from token values and positions.
//! From each root the compiler runs a recursive-descent precedence chain
//! and threads `ast_op1`/`ast_op2`/`ast_parent` links through the
//! existing nodes in place.
//!
//! Conventional C/C++ rules apply: unary binds tighter than any binary
//! operator, assignment and the conditional compile right-associatively,
//! everything else left-associatively. `::` participates only when the
//! stream is C++.
//!
//! Exceeding the depth cap is a structural failure reported on the fatal
//! channel, not a recoverable outcome.

use tracing::trace;

use lintel_ir::{InternalError, TokenId, TokenStream};

use crate::stack::ensure_sufficient_stack;

/// Hard cap on expression tree depth.
pub const AST_MAX_DEPTH: usize = 512;

type CompileResult = Result<Option<TokenId>, InternalError>;

/// Build the expression-tree layer over the whole sequence.
pub fn build_ast(stream: &mut TokenStream<'_>) -> Result<(), InternalError> {
    let mut tok = stream.front();
    while let Some(t) = tok {
        if let Some(start) = root_start(stream, t) {
            trace!(root = stream.text(start), "compiling expression");
            let mut builder = Builder {
                stream,
                cur: Some(start),
                depth: 0,
            };
            builder.compile_expression()?;
            let end = builder.cur;
            tok = end.and_then(|e| stream.next(e));
        } else {
            tok = stream.next(t);
        }
    }
    Ok(())
}

/// Decide whether an expression root begins at `t`; returns the token the
/// compiler should start from.
fn root_start(s: &TokenStream<'_>, t: TokenId) -> Option<TokenId> {
    let text = s.text(t);
    if text == "return" {
        return Some(t);
    }
    // Control-flow headers: compile the condition inside the parenthesis.
    // `for` clauses after the first start themselves at the `;` boundaries.
    if matches!(text, "if" | "while" | "switch" | "for") {
        let paren = s.next(t)?;
        if s.text(paren) == "(" {
            return s.next(paren);
        }
        return None;
    }
    if s.flags(t).is_keyword() {
        return None;
    }
    if s.get(t).has_ast() {
        return None;
    }
    // A name followed by one of `( [ . =` starts an expression wherever
    // it stands; this is what catches declarator initializers.
    if s.is_name(t) {
        if let Some(n) = s.next(t) {
            if matches!(s.text(n), "(" | "[" | "." | "=") {
                return Some(t);
            }
        }
    }
    // After a statement boundary, any expression-leading token is a root.
    let prev = s.prev(t);
    let at_boundary = match prev {
        None => true,
        Some(p) => matches!(s.text(p), ";" | "{" | "}"),
    };
    if at_boundary && starts_expression(s, t) {
        return Some(t);
    }
    None
}

/// Tokens that can begin an expression statement.
fn starts_expression(s: &TokenStream<'_>, t: TokenId) -> bool {
    if s.is_literal(t) {
        return true;
    }
    if s.is_name(t) && !s.flags(t).is_keyword() {
        return true;
    }
    matches!(s.text(t), "(" | "*" | "&" | "!" | "~" | "++" | "--" | "+" | "-")
}

/// One in-place expression compilation, cursor included.
struct Builder<'a, 'cfg> {
    stream: &'a mut TokenStream<'cfg>,
    cur: Option<TokenId>,
    depth: usize,
}

impl Builder<'_, '_> {
    /// Value of the cursor token, `""` at sequence end.
    fn text(&self) -> &'static str {
        self.cur.map_or("", |t| self.stream.text(t))
    }

    fn advance(&mut self) {
        self.cur = self.cur.and_then(|t| self.stream.next(t));
    }

    fn attach(&mut self, op: TokenId, left: Option<TokenId>, right: Option<TokenId>) {
        if let Some(l) = left {
            self.stream.ast_set_operand1(op, l);
        }
        if let Some(r) = right {
            self.stream.ast_set_operand2(op, r);
        }
    }

    /// Entry point for a (sub)expression; depth-capped and stack-guarded.
    fn compile_expression(&mut self) -> CompileResult {
        self.depth += 1;
        if self.depth > AST_MAX_DEPTH {
            let location = self
                .cur
                .map_or_else(|| "end of stream".to_owned(), |t| location_of(self.stream, t));
            return Err(InternalError::new(location, "maximum AST depth exceeded"));
        }
        let result = ensure_sufficient_stack(|| self.compile_comma());
        self.depth -= 1;
        result
    }

    /// Left-associative binary level over `ops`.
    fn binary_level(
        &mut self,
        ops: &[&str],
        next: fn(&mut Self) -> CompileResult,
    ) -> CompileResult {
        let mut left = next(self)?;
        while let Some(op) = self.cur {
            if !ops.contains(&self.stream.text(op)) {
                break;
            }
            self.advance();
            let right = next(self)?;
            self.attach(op, left, right);
            left = Some(op);
        }
        Ok(left)
    }

    fn compile_comma(&mut self) -> CompileResult {
        self.binary_level(&[","], Self::compile_assign)
    }

    /// Assignment, right-associative over all compound operators.
    fn compile_assign(&mut self) -> CompileResult {
        let left = self.compile_ternary()?;
        if let Some(op) = self.cur {
            if matches!(
                self.stream.text(op),
                "=" | "+=" | "-=" | "*=" | "/=" | "%=" | "&=" | "|=" | "^=" | "<<=" | ">>="
            ) {
                self.advance();
                let right = self.compile_assign()?;
                self.attach(op, left, right);
                return Ok(Some(op));
            }
        }
        Ok(left)
    }

    /// Conditional operator: `?` node over a `:` node.
    fn compile_ternary(&mut self) -> CompileResult {
        let mut left = self.compile_logic_or()?;
        while let Some(q) = self.cur {
            if self.stream.text(q) != "?" {
                break;
            }
            self.advance();
            let then_part = self.compile_expression()?;
            if let Some(colon) = self.cur {
                if self.stream.text(colon) == ":" {
                    self.advance();
                    let else_part = self.compile_assign()?;
                    self.attach(colon, then_part, else_part);
                    self.attach(q, left, Some(colon));
                    left = Some(q);
                    continue;
                }
            }
            // Malformed conditional; keep what we have.
            self.attach(q, left, then_part);
            left = Some(q);
        }
        Ok(left)
    }

    fn compile_logic_or(&mut self) -> CompileResult {
        self.binary_level(&["||"], Self::compile_logic_and)
    }

    fn compile_logic_and(&mut self) -> CompileResult {
        self.binary_level(&["&&"], Self::compile_bit_or)
    }

    fn compile_bit_or(&mut self) -> CompileResult {
        self.binary_level(&["|"], Self::compile_bit_xor)
    }

    fn compile_bit_xor(&mut self) -> CompileResult {
        self.binary_level(&["^"], Self::compile_bit_and)
    }

    fn compile_bit_and(&mut self) -> CompileResult {
        self.binary_level(&["&"], Self::compile_equality)
    }

    fn compile_equality(&mut self) -> CompileResult {
        self.binary_level(&["==", "!="], Self::compile_relational)
    }

    fn compile_relational(&mut self) -> CompileResult {
        self.binary_level(&["<", "<=", ">=", ">"], Self::compile_shift)
    }

    fn compile_shift(&mut self) -> CompileResult {
        self.binary_level(&["<<", ">>"], Self::compile_additive)
    }

    fn compile_additive(&mut self) -> CompileResult {
        self.binary_level(&["+", "-"], Self::compile_multiplicative)
    }

    /// Multiplicative level, with the historical guard: a `*` directly
    /// before `,` or `)` is not a binary operator.
    fn compile_multiplicative(&mut self) -> CompileResult {
        let mut left = self.compile_member()?;
        while let Some(op) = self.cur {
            if !matches!(self.stream.text(op), "*" | "/" | "%") {
                break;
            }
            if self.stream.text(op) == "*" {
                let next_text = self.stream.next(op).map(|n| self.stream.text(n));
                if matches!(next_text, Some(",") | Some(")")) {
                    break;
                }
            }
            self.advance();
            let right = self.compile_member()?;
            self.attach(op, left, right);
            left = Some(op);
        }
        Ok(left)
    }

    /// Member access chains, then postfix increment/decrement.
    fn compile_member(&mut self) -> CompileResult {
        let mut left = self.binary_level(&[".", "->"], Self::compile_scope)?;
        while let Some(op) = self.cur {
            if left.is_none() || !matches!(self.stream.text(op), "++" | "--") {
                break;
            }
            self.advance();
            self.attach(op, left, None);
            left = Some(op);
        }
        Ok(left)
    }

    /// `::` chains; C++ only.
    fn compile_scope(&mut self) -> CompileResult {
        if self.stream.is_cpp() {
            self.binary_level(&["::"], Self::compile_term)
        } else {
            self.compile_term()
        }
    }

    fn compile_term(&mut self) -> CompileResult {
        let Some(tok) = self.cur else {
            return Ok(None);
        };
        let text = self.stream.text(tok);

        if self.stream.is_literal(tok)
            || matches!(text, "true" | "false" | "nullptr" | "this")
        {
            self.advance();
            return Ok(Some(tok));
        }

        // Prefix unary; chains like `!*p` recurse through the term level
        // so unary binds tighter than any binary operator.
        if matches!(text, "+" | "-" | "~" | "*" | "&" | "!" | "++" | "--") {
            self.advance();
            let operand = self.compile_term()?;
            if let Some(o) = operand {
                self.stream.ast_set_operand1(tok, o);
            }
            return Ok(Some(tok));
        }

        // `sizeof x` / `sizeof (x)`.
        if text == "sizeof" {
            self.advance();
            let operand = self.compile_term()?;
            if let Some(o) = operand {
                self.stream.ast_set_operand1(tok, o);
            }
            return Ok(Some(tok));
        }

        // `return` compiles the whole rest of the statement.
        if text == "return" {
            self.advance();
            let operand = self.compile_expression()?;
            if let Some(o) = operand {
                self.stream.ast_set_operand1(tok, o);
            }
            return Ok(Some(tok));
        }

        // Parenthesized subexpression; transparent in the AST.
        if text == "(" {
            self.advance();
            let inner = self.compile_expression()?;
            if self.text() == ")" {
                self.advance();
            }
            return Ok(inner);
        }

        if self.stream.is_name(tok) && !self.stream.flags(tok).is_keyword() {
            // Call `f(args)` and index `a[i]` become `(`/`[` nodes with
            // the name as operand 1 and the argument tree as operand 2.
            if let Some(bracket) = self.stream.next(tok) {
                let open = self.stream.text(bracket);
                if open == "(" || open == "[" {
                    let close = if open == "(" { ")" } else { "]" };
                    self.cur = self.stream.next(bracket);
                    if self.text() == close {
                        self.advance();
                        self.stream.ast_set_operand1(bracket, tok);
                    } else {
                        let args = self.compile_expression()?;
                        if self.text() == close {
                            self.advance();
                        }
                        self.stream.ast_set_operand1(bracket, tok);
                        if let Some(a) = args {
                            self.stream.ast_set_operand2(bracket, a);
                        }
                    }
                    return Ok(Some(bracket));
                }
            }
            self.advance();
            return Ok(Some(tok));
        }

        // Not an expression start (keyword, closing bracket, `;`, ...).
        Ok(None)
    }
}

/// Best-effort location string for error reporting.
pub(crate) fn location_of(stream: &TokenStream<'_>, tok: TokenId) -> String {
    let token = stream.get(tok);
    if (token.file_index() as usize) < stream.get_files().len() {
        stream.file_line(tok)
    } else {
        format!("line {}", token.line())
    }
}
