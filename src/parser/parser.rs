//! Recursive descent parser for Go declarations
//!
//! Builds a rowan GreenNode tree from tokens. Top-level declarations and
//! type expressions get full structure; function bodies and value
//! initializers are kept as flat, balanced token runs.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Get the typed root
    pub fn source_file(&self) -> super::ast::SourceFile {
        super::ast::SourceFile::from_root(self.syntax())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse Go source code into a CST
pub fn parse_go(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// Token kinds that can start a type expression.
const TYPE_START: &[SyntaxKind] = &[
    SyntaxKind::IDENT,
    SyntaxKind::STAR,
    SyntaxKind::L_BRACKET,
    SyntaxKind::MAP_KW,
    SyntaxKind::CHAN_KW,
    SyntaxKind::ARROW,
    SyntaxKind::FUNC_KW,
    SyntaxKind::STRUCT_KW,
    SyntaxKind::INTERFACE_KW,
    SyntaxKind::L_PAREN,
];

const DECL_START: &[SyntaxKind] = &[
    SyntaxKind::IMPORT_KW,
    SyntaxKind::TYPE_KW,
    SyntaxKind::FUNC_KW,
    SyntaxKind::VAR_KW,
    SyntaxKind::CONST_KW,
];

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    /// Index of the last significant token consumed.
    last_significant: Option<usize>,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            last_significant: None,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    /// Index of the n-th significant token at or after the cursor.
    fn nth_index(&self, n: usize) -> Option<usize> {
        let mut count = 0;
        for idx in self.pos..self.tokens.len() {
            if !self.tokens[idx].kind.is_trivia() {
                if count == n {
                    return Some(idx);
                }
                count += 1;
            }
        }
        None
    }

    /// Look ahead, skipping trivia
    fn nth(&self, n: usize) -> SyntaxKind {
        self.nth_index(n)
            .map(|idx| self.tokens[idx].kind)
            .unwrap_or(SyntaxKind::ERROR)
    }

    fn peek(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.peek() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.peek())
    }

    fn at_eof(&self) -> bool {
        self.nth_index(0).is_none()
    }

    /// True when a newline separates the last consumed significant token
    /// from the next one.
    fn newline_before_next(&self) -> bool {
        let start = self.last_significant.map(|idx| idx + 1).unwrap_or(0);
        let end = self.nth_index(0).unwrap_or(self.tokens.len());
        self.tokens[start..end].iter().any(|t| {
            matches!(t.kind, SyntaxKind::WHITESPACE | SyntaxKind::BLOCK_COMMENT)
                && t.text.contains('\n')
        })
    }

    /// Go inserts a semicolon at a newline after certain tokens.
    fn at_implicit_semicolon(&self) -> bool {
        let ends = self
            .last_significant
            .map(|idx| self.tokens[idx].kind.ends_statement())
            .unwrap_or(false);
        ends && self.newline_before_next()
    }

    /// Position of the token closing the bracket at significant offset `n`.
    fn matching_close(&self, n: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut offset = n;
        loop {
            match self.nth(offset) {
                SyntaxKind::L_BRACKET | SyntaxKind::L_PAREN | SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::R_BRACKET | SyntaxKind::R_PAREN | SyntaxKind::R_BRACE => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(offset);
                    }
                }
                _ if self.nth_index(offset).is_none() => return None,
                _ => {}
            }
            offset += 1;
        }
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump_raw(&mut self) {
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            if !token.kind.is_trivia() {
                self.last_significant = Some(self.pos);
            }
            self.pos += 1;
        }
    }

    fn skip_trivia(&mut self) {
        while self
            .tokens
            .get(self.pos)
            .map(|t| t.kind.is_trivia())
            .unwrap_or(false)
        {
            self.bump_raw();
        }
    }

    /// Consume leading trivia and the next significant token
    fn bump(&mut self) {
        self.skip_trivia();
        self.bump_raw();
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}, found {:?}", kind, self.peek()));
            false
        }
    }

    /// Accept `;` or an implicit terminator before `closer`.
    fn expect_terminator(&mut self, closer: Option<SyntaxKind>) {
        if self.eat(SyntaxKind::SEMICOLON) || self.at_eof() || self.newline_before_next() {
            return;
        }
        if closer.is_some_and(|c| self.at(c)) {
            return;
        }
        self.error(format!("expected ';' or newline, found {:?}", self.peek()));
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .nth_index(0)
            .map(|idx| {
                let t = &self.tokens[idx];
                TextRange::at(t.offset, TextSize::of(t.text))
            })
            .unwrap_or_else(|| {
                let end = self
                    .tokens
                    .last()
                    .map(|t| t.offset + TextSize::of(t.text))
                    .unwrap_or_default();
                TextRange::empty(end)
            });
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.skip_trivia();
        self.builder.start_node(SyntaxKind::ERROR.into());
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
            consumed = true;
        }
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.builder.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    /// Start a node at the next significant token, leaving trivia outside.
    fn start_node(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn name(&mut self) -> bool {
        if self.at(SyntaxKind::IDENT) {
            self.start_node(SyntaxKind::NAME);
            self.bump();
            self.finish_node();
            true
        } else {
            self.error(format!("expected identifier, found {:?}", self.peek()));
            false
        }
    }

    /// Parse `( item ; item ; ... )` or a single item.
    fn group_or_single(&mut self, mut item: impl FnMut(&mut Self)) {
        if !self.eat(SyntaxKind::L_PAREN) {
            item(self);
            return;
        }
        while !self.at(SyntaxKind::R_PAREN) && !self.at_eof() {
            let before = self.pos;
            item(self);
            self.expect_terminator(Some(SyntaxKind::R_PAREN));
            if self.pos == before {
                self.error_recover("unexpected token in declaration group", &[SyntaxKind::R_PAREN]);
            }
        }
        self.expect(SyntaxKind::R_PAREN);
    }

    // =========================================================================
    // Grammar rules: declarations
    // =========================================================================

    /// SourceFile = PackageClause ";" { ImportDecl ";" } { TopLevelDecl ";" }
    fn parse_source_file(&mut self) {
        self.builder.start_node(SyntaxKind::SOURCE_FILE.into());
        self.skip_trivia();

        if self.at(SyntaxKind::PACKAGE_KW) {
            self.parse_package_clause();
            self.expect_terminator(None);
        } else {
            self.error("expected package clause");
        }

        while !self.at_eof() {
            let pos_before = self.pos;
            match self.peek() {
                SyntaxKind::IMPORT_KW => self.parse_import_decl(),
                SyntaxKind::TYPE_KW => self.parse_type_decl(),
                SyntaxKind::FUNC_KW => self.parse_func_decl(),
                SyntaxKind::VAR_KW => self.parse_value_decl(SyntaxKind::VAR_DECL),
                SyntaxKind::CONST_KW => self.parse_value_decl(SyntaxKind::CONST_DECL),
                SyntaxKind::SEMICOLON => {
                    self.bump();
                    continue;
                }
                _ => {
                    self.error_recover(
                        format!("expected declaration, found {:?}", self.peek()),
                        DECL_START,
                    );
                    continue;
                }
            }
            self.expect_terminator(None);
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.peek()));
                self.bump();
            }
        }

        self.skip_trivia();
        self.builder.finish_node();
    }

    /// PackageClause = "package" PackageName
    fn parse_package_clause(&mut self) {
        self.start_node(SyntaxKind::PACKAGE_CLAUSE);
        self.bump();
        self.name();
        self.finish_node();
    }

    /// ImportDecl = "import" ( ImportSpec | "(" { ImportSpec ";" } ")" )
    fn parse_import_decl(&mut self) {
        self.start_node(SyntaxKind::IMPORT_DECL);
        self.bump();
        self.group_or_single(Self::parse_import_spec);
        self.finish_node();
    }

    /// ImportSpec = [ "." | PackageName ] ImportPath
    fn parse_import_spec(&mut self) {
        self.start_node(SyntaxKind::IMPORT_SPEC);
        if self.at(SyntaxKind::DOT) {
            self.bump();
        } else if self.at(SyntaxKind::IDENT) {
            self.name();
        }
        if self.at_any(&[SyntaxKind::STRING, SyntaxKind::RAW_STRING]) {
            self.bump();
        } else {
            self.error(format!("expected import path, found {:?}", self.peek()));
        }
        self.finish_node();
    }

    /// TypeDecl = "type" ( TypeSpec | "(" { TypeSpec ";" } ")" )
    fn parse_type_decl(&mut self) {
        self.start_node(SyntaxKind::TYPE_DECL);
        self.bump();
        self.group_or_single(Self::parse_type_spec);
        self.finish_node();
    }

    /// TypeSpec = identifier [ TypeParameters ] [ "=" ] Type
    fn parse_type_spec(&mut self) {
        self.start_node(SyntaxKind::TYPE_SPEC);
        self.name();
        if self.at(SyntaxKind::L_BRACKET) && self.at_type_params() {
            self.parse_type_params();
        }
        self.eat(SyntaxKind::EQ);
        self.parse_type();
        self.finish_node();
    }

    /// Distinguish `type T[P any] ...` from `type A [N]int`.
    fn at_type_params(&self) -> bool {
        self.nth(1) == SyntaxKind::IDENT
            && matches!(
                self.nth(2),
                SyntaxKind::IDENT
                    | SyntaxKind::COMMA
                    | SyntaxKind::TILDE
                    | SyntaxKind::INTERFACE_KW
                    | SyntaxKind::MAP_KW
                    | SyntaxKind::CHAN_KW
                    | SyntaxKind::FUNC_KW
                    | SyntaxKind::STRUCT_KW
                    | SyntaxKind::L_BRACKET
            )
    }

    /// TypeParameters = "[" TypeParamDecl { "," TypeParamDecl } [ "," ] "]"
    fn parse_type_params(&mut self) {
        self.start_node(SyntaxKind::TYPE_PARAM_LIST);
        self.bump();
        while !self.at(SyntaxKind::R_BRACKET) && !self.at_eof() {
            self.start_node(SyntaxKind::TYPE_PARAM);
            self.name();
            while self.eat(SyntaxKind::COMMA) {
                self.name();
            }
            self.parse_type_elem();
            self.finish_node();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_BRACKET);
        self.finish_node();
    }

    /// FunctionDecl = "func" [ Receiver ] FunctionName [ TypeParameters ] Signature [ FunctionBody ]
    fn parse_func_decl(&mut self) {
        self.start_node(SyntaxKind::FUNC_DECL);
        self.bump();
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_param_list(SyntaxKind::RECEIVER);
        }
        self.name();
        if self.at(SyntaxKind::L_BRACKET) {
            self.parse_type_params();
        }
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_param_list(SyntaxKind::PARAM_LIST);
        } else {
            self.error(format!("expected parameter list, found {:?}", self.peek()));
        }
        self.parse_result_opt();
        if self.at(SyntaxKind::L_BRACE) {
            self.parse_block();
        }
        self.finish_node();
    }

    /// Function body, kept as a balanced token run.
    fn parse_block(&mut self) {
        self.start_node(SyntaxKind::BLOCK);
        let mut depth = 0usize;
        loop {
            if self.at_eof() {
                self.error("unterminated block");
                break;
            }
            match self.peek() {
                SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::R_BRACE => depth -= 1,
                _ => {}
            }
            self.bump();
            if depth == 0 {
                break;
            }
        }
        self.finish_node();
    }

    /// VarDecl / ConstDecl; only the declared names are structured.
    fn parse_value_decl(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.group_or_single(Self::parse_value_spec);
        self.finish_node();
    }

    /// ValueSpec = IdentifierList [ Type ] [ "=" ExpressionList ]
    fn parse_value_spec(&mut self) {
        self.start_node(SyntaxKind::VALUE_SPEC);
        self.name();
        while self.eat(SyntaxKind::COMMA) {
            self.name();
        }
        if self.at_any(TYPE_START) && !self.at_implicit_semicolon() {
            self.parse_type();
        }
        let mut depth = 0usize;
        while !self.at_eof() {
            if depth == 0 {
                if self.at_any(&[
                    SyntaxKind::SEMICOLON,
                    SyntaxKind::R_PAREN,
                    SyntaxKind::R_BRACE,
                    SyntaxKind::R_BRACKET,
                ]) || self.at_implicit_semicolon()
                {
                    break;
                }
            }
            match self.peek() {
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => depth -= 1,
                _ => {}
            }
            self.bump();
        }
        self.finish_node();
    }

    // =========================================================================
    // Grammar rules: signatures
    // =========================================================================

    /// Parameters = "(" [ ParameterList [ "," ] ] ")"
    ///
    /// Each comma-separated entry becomes a PARAM node holding an optional
    /// NAME and a type. Whether a bare identifier is a name or a type is
    /// decided by the AST layer using Go's grouping rule.
    fn parse_param_list(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        // (named, bare entry is a plain identifier)
        let mut entries: Vec<(bool, bool)> = Vec::new();
        while !self.at(SyntaxKind::R_PAREN) && !self.at_eof() {
            let before = self.pos;
            entries.push(self.parse_param());
            if self.pos == before {
                self.error_recover("expected parameter", &[SyntaxKind::COMMA, SyntaxKind::R_PAREN]);
            }
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();

        let any_named = entries.iter().any(|(named, _)| *named);
        let trailing_bare = entries.last().is_some_and(|(named, _)| !named);
        let non_ident_bare = entries.iter().any(|(named, plain)| !named && !plain);
        if any_named && (trailing_bare || non_ident_bare) {
            self.error("mixed named and unnamed parameters");
        }
    }

    fn parse_param(&mut self) -> (bool, bool) {
        self.start_node(SyntaxKind::PARAM);
        let named = self.at(SyntaxKind::IDENT) && self.at_named_param();
        let mut plain_ident = false;
        if named {
            self.name();
            self.parse_param_type();
        } else {
            plain_ident = self.at(SyntaxKind::IDENT)
                && matches!(self.nth(1), SyntaxKind::COMMA | SyntaxKind::R_PAREN);
            self.parse_param_type();
        }
        self.finish_node();
        (named, plain_ident)
    }

    /// At an identifier inside a parameter list: is it `name Type`?
    fn at_named_param(&self) -> bool {
        match self.nth(1) {
            SyntaxKind::COMMA | SyntaxKind::R_PAREN | SyntaxKind::DOT => false,
            SyntaxKind::L_BRACKET => {
                // `xs []T` / `xs [N]T` versus an instantiated type `List[T]`
                if self.nth(2) == SyntaxKind::R_BRACKET {
                    return true;
                }
                match self.matching_close(1) {
                    Some(close) => !matches!(
                        self.nth(close + 1),
                        SyntaxKind::COMMA | SyntaxKind::R_PAREN
                    ),
                    None => true,
                }
            }
            _ => true,
        }
    }

    fn parse_param_type(&mut self) {
        if self.at(SyntaxKind::ELLIPSIS) {
            self.start_node(SyntaxKind::VARIADIC_TYPE);
            self.bump();
            self.parse_type();
            self.finish_node();
        } else {
            self.parse_type();
        }
    }

    /// Result = Parameters | Type
    fn parse_result_opt(&mut self) {
        if self.newline_before_next() {
            return;
        }
        if self.at(SyntaxKind::L_PAREN) {
            self.start_node(SyntaxKind::RESULT);
            self.parse_param_list(SyntaxKind::PARAM_LIST);
            self.finish_node();
        } else if self.at_any(TYPE_START) {
            self.start_node(SyntaxKind::RESULT);
            self.parse_type();
            self.finish_node();
        }
    }

    // =========================================================================
    // Grammar rules: types
    // =========================================================================

    fn parse_type(&mut self) {
        match self.peek() {
            SyntaxKind::IDENT => self.parse_type_name(),
            SyntaxKind::STAR => {
                self.start_node(SyntaxKind::POINTER_TYPE);
                self.bump();
                self.parse_type();
                self.finish_node();
            }
            SyntaxKind::L_BRACKET => {
                if self.nth(1) == SyntaxKind::R_BRACKET {
                    self.start_node(SyntaxKind::SLICE_TYPE);
                    self.bump();
                    self.bump();
                } else {
                    self.start_node(SyntaxKind::ARRAY_TYPE);
                    self.bump();
                    self.parse_array_len();
                    self.expect(SyntaxKind::R_BRACKET);
                }
                self.parse_type();
                self.finish_node();
            }
            SyntaxKind::MAP_KW => {
                self.start_node(SyntaxKind::MAP_TYPE);
                self.bump();
                self.expect(SyntaxKind::L_BRACKET);
                self.parse_type();
                self.expect(SyntaxKind::R_BRACKET);
                self.parse_type();
                self.finish_node();
            }
            SyntaxKind::CHAN_KW => {
                self.start_node(SyntaxKind::CHAN_TYPE);
                self.bump();
                self.eat(SyntaxKind::ARROW);
                self.parse_type();
                self.finish_node();
            }
            SyntaxKind::ARROW => {
                self.start_node(SyntaxKind::CHAN_TYPE);
                self.bump();
                self.expect(SyntaxKind::CHAN_KW);
                self.parse_type();
                self.finish_node();
            }
            SyntaxKind::FUNC_KW => {
                self.start_node(SyntaxKind::FUNC_TYPE);
                self.bump();
                if self.at(SyntaxKind::L_PAREN) {
                    self.parse_param_list(SyntaxKind::PARAM_LIST);
                } else {
                    self.error("expected parameter list");
                }
                self.parse_result_opt();
                self.finish_node();
            }
            SyntaxKind::STRUCT_KW => self.parse_struct_type(),
            SyntaxKind::INTERFACE_KW => self.parse_interface_type(),
            SyntaxKind::L_PAREN => {
                self.start_node(SyntaxKind::PAREN_TYPE);
                self.bump();
                self.parse_type();
                self.expect(SyntaxKind::R_PAREN);
                self.finish_node();
            }
            other => self.error(format!("expected type, found {:?}", other)),
        }
    }

    /// TypeName = identifier | PackageName "." identifier, with optional type arguments
    fn parse_type_name(&mut self) {
        self.start_node(SyntaxKind::TYPE_NAME);
        self.bump();
        if self.at(SyntaxKind::DOT) {
            self.bump();
            if !self.eat(SyntaxKind::IDENT) {
                self.error("expected identifier after '.'");
            }
        }
        if self.at(SyntaxKind::L_BRACKET) && !self.newline_before_next() {
            self.start_node(SyntaxKind::TYPE_ARG_LIST);
            self.bump();
            while !self.at(SyntaxKind::R_BRACKET) && !self.at_eof() {
                self.parse_type();
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
            self.expect(SyntaxKind::R_BRACKET);
            self.finish_node();
        }
        self.finish_node();
    }

    /// Array length expression, kept as raw tokens.
    fn parse_array_len(&mut self) {
        self.start_node(SyntaxKind::ARRAY_LEN);
        let mut depth = 0usize;
        while !self.at_eof() {
            match self.peek() {
                SyntaxKind::R_BRACKET if depth == 0 => break,
                SyntaxKind::L_BRACKET | SyntaxKind::L_PAREN => depth += 1,
                SyntaxKind::R_BRACKET | SyntaxKind::R_PAREN => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.bump();
        }
        self.finish_node();
    }

    /// StructType = "struct" "{" { FieldDecl ";" } "}"
    fn parse_struct_type(&mut self) {
        self.start_node(SyntaxKind::STRUCT_TYPE);
        self.bump();
        self.expect(SyntaxKind::L_BRACE);
        while !self.at(SyntaxKind::R_BRACE) && !self.at_eof() {
            let before = self.pos;
            self.parse_field();
            self.expect_terminator(Some(SyntaxKind::R_BRACE));
            if self.pos == before {
                self.error_recover("expected field", &[SyntaxKind::R_BRACE]);
            }
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    /// FieldDecl = (IdentifierList Type | EmbeddedField) [ Tag ]
    fn parse_field(&mut self) {
        self.start_node(SyntaxKind::FIELD);
        if self.at(SyntaxKind::IDENT) && self.at_named_field() {
            self.name();
            while self.eat(SyntaxKind::COMMA) {
                self.name();
            }
            self.parse_type();
        } else {
            self.parse_type();
        }
        if self.at_any(&[SyntaxKind::STRING, SyntaxKind::RAW_STRING]) && !self.newline_before_next()
        {
            self.start_node(SyntaxKind::FIELD_TAG);
            self.bump();
            self.finish_node();
        }
        self.finish_node();
    }

    fn at_named_field(&self) -> bool {
        let after_ident = |parser: &Self, offset: usize| -> bool {
            // Embedded when the field ends right after the type name.
            let kind = parser.nth(offset);
            !matches!(
                kind,
                SyntaxKind::SEMICOLON
                    | SyntaxKind::R_BRACE
                    | SyntaxKind::STRING
                    | SyntaxKind::RAW_STRING
                    | SyntaxKind::DOT
            )
        };
        if self.nth_line_break_after(0) {
            return false;
        }
        match self.nth(1) {
            SyntaxKind::L_BRACKET => {
                if self.nth(2) == SyntaxKind::R_BRACKET {
                    return true;
                }
                match self.matching_close(1) {
                    Some(close) => {
                        !self.nth_line_break_after(close) && after_ident(self, close + 1)
                    }
                    None => true,
                }
            }
            _ => after_ident(self, 1),
        }
    }

    /// True when a newline follows the n-th significant token.
    fn nth_line_break_after(&self, n: usize) -> bool {
        let (Some(from), to) = (self.nth_index(n), self.nth_index(n + 1)) else {
            return true;
        };
        let to = to.unwrap_or(self.tokens.len());
        self.tokens[from + 1..to].iter().any(|t| {
            matches!(t.kind, SyntaxKind::WHITESPACE | SyntaxKind::BLOCK_COMMENT)
                && t.text.contains('\n')
        })
    }

    /// InterfaceType = "interface" "{" { InterfaceElem ";" } "}"
    fn parse_interface_type(&mut self) {
        self.start_node(SyntaxKind::INTERFACE_TYPE);
        self.bump();
        self.expect(SyntaxKind::L_BRACE);
        while !self.at(SyntaxKind::R_BRACE) && !self.at_eof() {
            let before = self.pos;
            if self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::L_PAREN {
                self.start_node(SyntaxKind::METHOD_ELEM);
                self.name();
                self.parse_param_list(SyntaxKind::PARAM_LIST);
                self.parse_result_opt();
                self.finish_node();
            } else {
                self.parse_type_elem();
            }
            self.expect_terminator(Some(SyntaxKind::R_BRACE));
            if self.pos == before {
                self.error_recover("expected interface element", &[SyntaxKind::R_BRACE]);
            }
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    /// TypeElem = TypeTerm { "|" TypeTerm }, TypeTerm = [ "~" ] Type
    fn parse_type_elem(&mut self) {
        self.start_node(SyntaxKind::TYPE_ELEM);
        loop {
            self.start_node(SyntaxKind::TYPE_TERM);
            self.eat(SyntaxKind::TILDE);
            self.parse_type();
            self.finish_node();
            if !self.eat(SyntaxKind::PIPE) {
                break;
            }
        }
        self.finish_node();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_parses(input: &str) -> Parse {
        let parse = parse_go(input);
        assert!(parse.ok(), "errors for {:?}: {:?}", input, parse.errors);
        parse
    }

    #[test]
    fn test_parse_is_lossless() {
        let input = "package main\n\n// doc\ntype Msg string //mimetype text/plain\n\nfunc (h *H) Greet(name string) (Msg, int) {\n\treturn Msg(\"hi \" + name), 200\n}\n";
        let parse = assert_parses(input);
        assert_eq!(parse.syntax().text().to_string(), input);
    }

    #[test]
    fn test_parse_grouped_declarations() {
        assert_parses(
            "package main\nimport (\n\t\"io\"\n\th \"net/http\"\n\t_ \"embed\"\n)\ntype (\n\tA int\n\tB = string\n)\nconst (\n\tX = iota\n\tY\n)\nvar z, w = f(1,\n\t2), map[string]int{\"a\": 1}\n",
        );
    }

    #[test]
    fn test_parse_value_spec_types() {
        let parse = assert_parses(
            "package main\nvar cfg Config\nvar a, b *http.Client = nil, nil\nvar n = 3\nconst (\n\tX int = iota\n\tY\n)\n",
        );
        let types: Vec<_> = parse
            .source_file()
            .value_specs()
            .map(|spec| spec.ty().map(|ty| ty.text()))
            .collect();
        assert_eq!(
            types,
            vec![
                Some("Config".to_string()),
                Some("*http.Client".to_string()),
                None,
                Some("int".to_string()),
                None,
            ]
        );
    }

    #[test]
    fn test_parse_semicolons_and_single_line() {
        assert_parses("package p; import \"io\"; type T struct{ A int; B string }; func (T) M() {}");
    }

    #[test]
    fn test_parse_body_with_nested_braces_and_strings() {
        assert_parses("package p\nfunc f() {\n\tif x { y := \"}\" }\n\tswitch { case true: }\n}\n");
    }

    #[test]
    fn test_parse_types() {
        assert_parses(
            "package p\ntype T struct {\n\ta, b []int `json:\"a\"`\n\t*Embedded\n\thttp.Handler\n\tm map[string][]*int\n\tc <-chan int\n\td chan<- func(int) (string, error)\n\tarr [N * 2]byte\n\tg List[int]\n}\ntype I interface {\n\tM(x int) string\n\tfmt.Stringer\n\t~int | ~string\n}\ntype G[K comparable, V any] map[K]V\n",
        );
    }

    #[test]
    fn test_parse_generic_func_and_variadic() {
        assert_parses("package p\nfunc Map[T, U any](xs []T, f func(T) U, rest ...string) []U { return nil }\n");
    }

    #[test]
    fn test_parse_missing_package_clause() {
        let parse = parse_go("func f() {}");
        assert!(!parse.ok());
        assert!(parse.errors[0].message.contains("package clause"));
    }

    #[test]
    fn test_parse_mixed_parameters_is_error() {
        let parse = parse_go("package p\nfunc f(a int, string) {}\n");
        assert!(
            parse
                .errors
                .iter()
                .any(|e| e.message.contains("mixed named and unnamed"))
        );
    }

    #[test]
    fn test_parse_unterminated_block() {
        let parse = parse_go("package p\nfunc f() {\n");
        assert!(parse.errors.iter().any(|e| e.message == "unterminated block"));
    }

    #[test]
    fn test_parse_missing_terminator() {
        let parse = parse_go("package p\ntype A int type B int\n");
        assert!(!parse.ok());
    }
}
