//! SyntaxKind enum - every lexeme category the scanner can produce.
//!
//! Tree nodes are separate typed enums (see `node.rs`); this enum covers
//! tokens only.

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SyntaxKind {
    // ========================================================================
    // Tokens
    // ========================================================================
    EndOfFileToken = 0,

    // Literals
    NumericLiteral,
    StringLiteral,
    RegularExpressionLiteral,
    Identifier,

    // Punctuation
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    DotDotDotToken,
    MinusGreaterThanToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    BarBarToken,
    AmpersandAmpersandToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    ColonColonToken,
    AsteriskToken,
    SlashToken,
    MinusToken,
    PlusToken,
    ExclamationToken,
    OpenParenToken,
    CloseParenToken,
    OpenBraceToken,
    CloseBraceToken,
    OpenBracketToken,
    CloseBracketToken,
    LessThanToken,
    GreaterThanToken,
    DotToken,
    CommaToken,
    SemicolonToken,
    ColonToken,
    CaretToken,
    EqualsToken,
    PercentToken,
    DoubleQuoteToken,
    SingleQuoteToken,
    AtToken,
    QuestionToken,

    // Reserved words
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    ReturnKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,
    NullKeyword,
    TrueKeyword,
    FalseKeyword,
    ClassKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    ImportKeyword,
    SuperKeyword,
    ImplementsKeyword,
    InterfaceKeyword,
    LetKeyword,
    PackageKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    StaticKeyword,
    YieldKeyword,

    // Pragma markers
    IncludePragma,
    DeclarePragma,
}

impl SyntaxKind {
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::YieldKeyword;

    /// Punctuation in scan priority order: longer strings precede any
    /// shorter string they start with.
    pub const PUNCTUATION: &'static [(&'static str, SyntaxKind)] = &[
        ("===", SyntaxKind::EqualsEqualsEqualsToken),
        ("!==", SyntaxKind::ExclamationEqualsEqualsToken),
        ("...", SyntaxKind::DotDotDotToken),
        ("->", SyntaxKind::MinusGreaterThanToken),
        ("==", SyntaxKind::EqualsEqualsToken),
        ("!=", SyntaxKind::ExclamationEqualsToken),
        ("+=", SyntaxKind::PlusEqualsToken),
        ("-=", SyntaxKind::MinusEqualsToken),
        ("*=", SyntaxKind::AsteriskEqualsToken),
        ("/=", SyntaxKind::SlashEqualsToken),
        ("%=", SyntaxKind::PercentEqualsToken),
        ("||", SyntaxKind::BarBarToken),
        ("&&", SyntaxKind::AmpersandAmpersandToken),
        ("<=", SyntaxKind::LessThanEqualsToken),
        (">=", SyntaxKind::GreaterThanEqualsToken),
        ("::", SyntaxKind::ColonColonToken),
        ("*", SyntaxKind::AsteriskToken),
        ("/", SyntaxKind::SlashToken),
        ("-", SyntaxKind::MinusToken),
        ("+", SyntaxKind::PlusToken),
        ("!", SyntaxKind::ExclamationToken),
        ("(", SyntaxKind::OpenParenToken),
        (")", SyntaxKind::CloseParenToken),
        ("{", SyntaxKind::OpenBraceToken),
        ("}", SyntaxKind::CloseBraceToken),
        ("[", SyntaxKind::OpenBracketToken),
        ("]", SyntaxKind::CloseBracketToken),
        ("<", SyntaxKind::LessThanToken),
        (">", SyntaxKind::GreaterThanToken),
        (".", SyntaxKind::DotToken),
        (",", SyntaxKind::CommaToken),
        (";", SyntaxKind::SemicolonToken),
        (":", SyntaxKind::ColonToken),
        ("^", SyntaxKind::CaretToken),
        ("=", SyntaxKind::EqualsToken),
        ("%", SyntaxKind::PercentToken),
        ("\"", SyntaxKind::DoubleQuoteToken),
        ("'", SyntaxKind::SingleQuoteToken),
        ("@", SyntaxKind::AtToken),
        ("?", SyntaxKind::QuestionToken),
    ];

    /// Whether this kind represents a reserved word.
    #[inline]
    pub fn is_keyword(self) -> bool {
        self >= SyntaxKind::FIRST_KEYWORD && self <= SyntaxKind::LAST_KEYWORD
    }

    /// Whether this kind is an assignment operator (`=` or a compound form).
    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            SyntaxKind::EqualsToken
                | SyntaxKind::PlusEqualsToken
                | SyntaxKind::MinusEqualsToken
                | SyntaxKind::AsteriskEqualsToken
                | SyntaxKind::SlashEqualsToken
                | SyntaxKind::PercentEqualsToken
        )
    }

    /// Whether this kind opens a quoted literal (string or regex).
    #[inline]
    pub fn is_quote(self) -> bool {
        matches!(
            self,
            SyntaxKind::DoubleQuoteToken
                | SyntaxKind::SingleQuoteToken
                | SyntaxKind::SlashToken
                | SyntaxKind::SlashEqualsToken
        )
    }

    /// Get the keyword text for a keyword kind, or None if not a keyword.
    pub fn keyword_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::BreakKeyword => Some("break"),
            SyntaxKind::CaseKeyword => Some("case"),
            SyntaxKind::CatchKeyword => Some("catch"),
            SyntaxKind::ContinueKeyword => Some("continue"),
            SyntaxKind::DebuggerKeyword => Some("debugger"),
            SyntaxKind::DefaultKeyword => Some("default"),
            SyntaxKind::DeleteKeyword => Some("delete"),
            SyntaxKind::DoKeyword => Some("do"),
            SyntaxKind::ElseKeyword => Some("else"),
            SyntaxKind::FinallyKeyword => Some("finally"),
            SyntaxKind::ForKeyword => Some("for"),
            SyntaxKind::FunctionKeyword => Some("function"),
            SyntaxKind::IfKeyword => Some("if"),
            SyntaxKind::InKeyword => Some("in"),
            SyntaxKind::InstanceOfKeyword => Some("instanceof"),
            SyntaxKind::NewKeyword => Some("new"),
            SyntaxKind::ReturnKeyword => Some("return"),
            SyntaxKind::SwitchKeyword => Some("switch"),
            SyntaxKind::ThisKeyword => Some("this"),
            SyntaxKind::ThrowKeyword => Some("throw"),
            SyntaxKind::TryKeyword => Some("try"),
            SyntaxKind::TypeOfKeyword => Some("typeof"),
            SyntaxKind::VarKeyword => Some("var"),
            SyntaxKind::VoidKeyword => Some("void"),
            SyntaxKind::WhileKeyword => Some("while"),
            SyntaxKind::WithKeyword => Some("with"),
            SyntaxKind::NullKeyword => Some("null"),
            SyntaxKind::TrueKeyword => Some("true"),
            SyntaxKind::FalseKeyword => Some("false"),
            SyntaxKind::ClassKeyword => Some("class"),
            SyntaxKind::EnumKeyword => Some("enum"),
            SyntaxKind::ExportKeyword => Some("export"),
            SyntaxKind::ExtendsKeyword => Some("extends"),
            SyntaxKind::ImportKeyword => Some("import"),
            SyntaxKind::SuperKeyword => Some("super"),
            SyntaxKind::ImplementsKeyword => Some("implements"),
            SyntaxKind::InterfaceKeyword => Some("interface"),
            SyntaxKind::LetKeyword => Some("let"),
            SyntaxKind::PackageKeyword => Some("package"),
            SyntaxKind::PrivateKeyword => Some("private"),
            SyntaxKind::ProtectedKeyword => Some("protected"),
            SyntaxKind::PublicKeyword => Some("public"),
            SyntaxKind::StaticKeyword => Some("static"),
            SyntaxKind::YieldKeyword => Some("yield"),
            _ => None,
        }
    }

    /// Look up a keyword SyntaxKind from text.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        match text {
            "break" => Some(SyntaxKind::BreakKeyword),
            "case" => Some(SyntaxKind::CaseKeyword),
            "catch" => Some(SyntaxKind::CatchKeyword),
            "continue" => Some(SyntaxKind::ContinueKeyword),
            "debugger" => Some(SyntaxKind::DebuggerKeyword),
            "default" => Some(SyntaxKind::DefaultKeyword),
            "delete" => Some(SyntaxKind::DeleteKeyword),
            "do" => Some(SyntaxKind::DoKeyword),
            "else" => Some(SyntaxKind::ElseKeyword),
            "finally" => Some(SyntaxKind::FinallyKeyword),
            "for" => Some(SyntaxKind::ForKeyword),
            "function" => Some(SyntaxKind::FunctionKeyword),
            "if" => Some(SyntaxKind::IfKeyword),
            "in" => Some(SyntaxKind::InKeyword),
            "instanceof" => Some(SyntaxKind::InstanceOfKeyword),
            "new" => Some(SyntaxKind::NewKeyword),
            "return" => Some(SyntaxKind::ReturnKeyword),
            "switch" => Some(SyntaxKind::SwitchKeyword),
            "this" => Some(SyntaxKind::ThisKeyword),
            "throw" => Some(SyntaxKind::ThrowKeyword),
            "try" => Some(SyntaxKind::TryKeyword),
            "typeof" => Some(SyntaxKind::TypeOfKeyword),
            "var" => Some(SyntaxKind::VarKeyword),
            "void" => Some(SyntaxKind::VoidKeyword),
            "while" => Some(SyntaxKind::WhileKeyword),
            "with" => Some(SyntaxKind::WithKeyword),
            "null" => Some(SyntaxKind::NullKeyword),
            "true" => Some(SyntaxKind::TrueKeyword),
            "false" => Some(SyntaxKind::FalseKeyword),
            "class" => Some(SyntaxKind::ClassKeyword),
            "enum" => Some(SyntaxKind::EnumKeyword),
            "export" => Some(SyntaxKind::ExportKeyword),
            "extends" => Some(SyntaxKind::ExtendsKeyword),
            "import" => Some(SyntaxKind::ImportKeyword),
            "super" => Some(SyntaxKind::SuperKeyword),
            "implements" => Some(SyntaxKind::ImplementsKeyword),
            "interface" => Some(SyntaxKind::InterfaceKeyword),
            "let" => Some(SyntaxKind::LetKeyword),
            "package" => Some(SyntaxKind::PackageKeyword),
            "private" => Some(SyntaxKind::PrivateKeyword),
            "protected" => Some(SyntaxKind::ProtectedKeyword),
            "public" => Some(SyntaxKind::PublicKeyword),
            "static" => Some(SyntaxKind::StaticKeyword),
            "yield" => Some(SyntaxKind::YieldKeyword),
            _ => None,
        }
    }

    /// Get the punctuation text for a punctuation kind, or None.
    pub fn punctuation_text(self) -> Option<&'static str> {
        SyntaxKind::PUNCTUATION
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(text, _)| *text)
    }

    /// Text used for this kind in "expected ..." messages.
    pub fn describe(self) -> &'static str {
        match self {
            SyntaxKind::EndOfFileToken => "end of file",
            SyntaxKind::NumericLiteral => "number",
            SyntaxKind::StringLiteral => "string",
            SyntaxKind::RegularExpressionLiteral => "regular expression",
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::IncludePragma => "#include",
            SyntaxKind::DeclarePragma => "#declare",
            _ => self
                .punctuation_text()
                .or_else(|| self.keyword_text())
                .unwrap_or("token"),
        }
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}
