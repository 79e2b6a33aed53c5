//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! Nodes follow the Go declaration grammar; function bodies
//! and value initializers are kept as flat token runs.

/// All syntax kinds (tokens and nodes) of a Go source file
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (declarations, types, parameter lists).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,       // identifier
    INT_NUMBER,  // 42, 0x2a, 1_000
    FLOAT_NUMBER, // 3.14, 1e9
    IMAGINARY,   // 2i
    RUNE,        // 'a'
    STRING,      // "hello"
    RAW_STRING,  // `hello`

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,     // {
    R_BRACE,     // }
    L_BRACKET,   // [
    R_BRACKET,   // ]
    L_PAREN,     // (
    R_PAREN,     // )
    SEMICOLON,   // ;
    COLON,       // :
    COMMA,       // ,
    DOT,         // .
    ELLIPSIS,    // ...
    PLUS,        // +
    MINUS,       // -
    STAR,        // *
    SLASH,       // /
    PERCENT,     // %
    AMP,         // &
    PIPE,        // |
    CARET,       // ^
    SHL,         // <<
    SHR,         // >>
    AMP_CARET,   // &^
    PLUS_EQ,     // +=
    MINUS_EQ,    // -=
    STAR_EQ,     // *=
    SLASH_EQ,    // /=
    PERCENT_EQ,  // %=
    AMP_EQ,      // &=
    PIPE_EQ,     // |=
    CARET_EQ,    // ^=
    SHL_EQ,      // <<=
    SHR_EQ,      // >>=
    AMP_CARET_EQ, // &^=
    AMP_AMP,     // &&
    PIPE_PIPE,   // ||
    ARROW,       // <-
    PLUS_PLUS,   // ++
    MINUS_MINUS, // --
    EQ_EQ,       // ==
    BANG_EQ,     // !=
    LT,          // <
    GT,          // >
    LT_EQ,       // <=
    GT_EQ,       // >=
    EQ,          // =
    COLON_EQ,    // :=
    BANG,        // !
    TILDE,       // ~

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    BREAK_KW,
    CASE_KW,
    CHAN_KW,
    CONST_KW,
    CONTINUE_KW,
    DEFAULT_KW,
    DEFER_KW,
    ELSE_KW,
    FALLTHROUGH_KW,
    FOR_KW,
    FUNC_KW,
    GO_KW,
    GOTO_KW,
    IF_KW,
    IMPORT_KW,
    INTERFACE_KW,
    MAP_KW,
    PACKAGE_KW,
    RANGE_KW,
    RETURN_KW,
    SELECT_KW,
    STRUCT_KW,
    SWITCH_KW,
    TYPE_KW,
    VAR_KW,

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,
    PACKAGE_CLAUSE,
    NAME,

    // Declarations
    IMPORT_DECL,
    IMPORT_SPEC,
    TYPE_DECL,
    TYPE_SPEC,
    TYPE_PARAM_LIST,
    TYPE_PARAM,
    FUNC_DECL,
    RECEIVER,
    PARAM_LIST,
    PARAM,
    RESULT,
    BLOCK,
    VAR_DECL,
    CONST_DECL,
    VALUE_SPEC,

    // Types
    TYPE_NAME,
    TYPE_ARG_LIST,
    POINTER_TYPE,
    SLICE_TYPE,
    ARRAY_TYPE,
    ARRAY_LEN,
    MAP_TYPE,
    CHAN_TYPE,
    FUNC_TYPE,
    STRUCT_TYPE,
    FIELD,
    FIELD_TAG,
    INTERFACE_TYPE,
    METHOD_ELEM,
    TYPE_ELEM,
    TYPE_TERM,
    PAREN_TYPE,
    VARIADIC_TYPE,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::BREAK_KW as u16) && (self as u16) <= (Self::VAR_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::TILDE as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INT_NUMBER
                | Self::FLOAT_NUMBER
                | Self::IMAGINARY
                | Self::RUNE
                | Self::STRING
                | Self::RAW_STRING
        )
    }

    /// Tokens after which a newline terminates the statement
    /// (Go's automatic semicolon insertion rule).
    pub fn ends_statement(self) -> bool {
        self == Self::IDENT
            || self.is_literal()
            || matches!(
                self,
                Self::BREAK_KW
                    | Self::CONTINUE_KW
                    | Self::FALLTHROUGH_KW
                    | Self::RETURN_KW
                    | Self::PLUS_PLUS
                    | Self::MINUS_MINUS
                    | Self::R_PAREN
                    | Self::R_BRACKET
                    | Self::R_BRACE
            )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GoLanguage {}

impl rowan::Language for GoLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<GoLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<GoLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<GoLanguage>;
