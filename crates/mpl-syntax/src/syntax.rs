//! Syntax kinds for MPL.
//!
//! The same enum names compound events (grammar productions), terminal events
//! (tokens) and error tokens. Only the structural kinds ever become interior
//! nodes of the tree; every other compound is visible to event consumers only.

/// All compound, terminal and error kinds produced by the MPL parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
#[allow(clippy::upper_case_acronyms)]
pub enum SyntaxKind {
    // =========================================================================
    // COMPOUND KINDS
    // =========================================================================
    /// A sequence of expressions: the whole file or the body of a block.
    Program,
    /// Any single expression.
    Expression,
    /// An expression that must be separated from its predecessor by whitespace.
    WSSeparableExpression,
    /// An expression that may directly follow its predecessor.
    NonWSSeparableExpression,
    /// A name or a prefixed name (`@x`, `!x`, `x`).
    NameExpression,
    /// A member access (`.x`, `.@x`, `.!x`).
    MemberNameExpression,
    /// `{ ... }`
    Object,
    /// `( ... )`
    List,
    /// `[ ... ]`
    Code,
    /// `name: ... ;` or `name:! ... ;`
    Label,
    /// Names a `name:! ... ;` block in diagnostics; the tree uses [`SyntaxKind::Label`].
    LabelReset,

    // =========================================================================
    // TERMINAL KINDS
    // =========================================================================
    /// `{`
    LCurly,
    /// `}`
    RCurly,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBrack,
    /// `]`
    RBrack,
    /// `:` opening a label body.
    Colon,
    /// `:!` opening a label reset body.
    ColonBang,
    /// `;` closing a label body.
    Semicolon,
    /// `,`
    Comma,
    /// A plain name, a label name or a bare `@`/`!`.
    Name,
    /// `@name`
    NameRead,
    /// `!name`
    NameWrite,
    /// `.name`
    NameMember,
    /// `.@name`
    NameReadMember,
    /// `.!name`
    NameWriteMember,
    /// A quoted (`"..."`) or raw (`«...»`) string.
    String,
    /// An integer literal, optionally with an `i`/`n` width suffix.
    Number,
    /// A real literal.
    Real,
    /// `# ...` up to the end of the line, without trailing blanks.
    Comment,
    /// `\n`
    LF,
    /// `\r\n`
    CRLF,
    /// A `\r` not followed by `\n`.
    CR,
    /// The zero-width terminal at the end of input.
    EOF,
    /// Text the grammar could not make sense of.
    SomeError,
}

impl SyntaxKind {
    /// Returns the symbolic name used for this kind in event streams and
    /// diagnostics, e.g. `Object`, `'{'` or `':!'`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Program => "Program",
            Self::Expression => "Expression",
            Self::WSSeparableExpression => "WSSeparableExpression",
            Self::NonWSSeparableExpression => "NonWSSeparableExpression",
            Self::NameExpression => "NameExpression",
            Self::MemberNameExpression => "MemberNameExpression",
            Self::Object => "Object",
            Self::List => "List",
            Self::Code => "Code",
            Self::Label => "Label",
            Self::LabelReset => "LabelReset",
            Self::LCurly => "'{'",
            Self::RCurly => "'}'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBrack => "'['",
            Self::RBrack => "']'",
            Self::Colon => "':'",
            Self::ColonBang => "':!'",
            Self::Semicolon => "';'",
            Self::Comma => "','",
            Self::Name => "Name",
            Self::NameRead => "NameRead",
            Self::NameWrite => "NameWrite",
            Self::NameMember => "NameMember",
            Self::NameReadMember => "NameReadMember",
            Self::NameWriteMember => "NameWriteMember",
            Self::String => "String",
            Self::Number => "Number",
            Self::Real => "Real",
            Self::Comment => "Comment",
            Self::LF => "LF",
            Self::CRLF => "CRLF",
            Self::CR => "CR",
            Self::EOF => "EOF",
            Self::SomeError => "SomeError",
        }
    }

    /// Compound kinds that become interior nodes of the tree.
    #[must_use]
    pub const fn is_structural(self) -> bool {
        matches!(self, Self::Object | Self::List | Self::Code | Self::Label)
    }

    /// Alias of [`SyntaxKind::is_structural`] in navigation vocabulary.
    #[must_use]
    pub const fn is_scope(self) -> bool {
        self.is_structural()
    }

    /// Returns true for kinds that are only ever emitted as compounds.
    #[must_use]
    pub const fn is_compound(self) -> bool {
        matches!(
            self,
            Self::Program
                | Self::Expression
                | Self::WSSeparableExpression
                | Self::NonWSSeparableExpression
                | Self::NameExpression
                | Self::MemberNameExpression
                | Self::Object
                | Self::List
                | Self::Code
                | Self::Label
                | Self::LabelReset
        )
    }

    /// Returns true for kinds that are emitted as terminals.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !self.is_compound()
    }

    /// Opening delimiters of scopes, including both label openers.
    #[must_use]
    pub const fn is_scope_start(self) -> bool {
        matches!(
            self,
            Self::LCurly | Self::LParen | Self::LBrack | Self::Colon | Self::ColonBang
        )
    }

    /// Closing delimiters of scopes.
    #[must_use]
    pub const fn is_scope_end(self) -> bool {
        matches!(
            self,
            Self::RCurly | Self::RParen | Self::RBrack | Self::Semicolon
        )
    }

    /// The closing delimiter matching an opening one.
    #[must_use]
    pub const fn closing_pair(self) -> Option<Self> {
        match self {
            Self::LCurly => Some(Self::RCurly),
            Self::LParen => Some(Self::RParen),
            Self::LBrack => Some(Self::RBrack),
            Self::Colon | Self::ColonBang => Some(Self::Semicolon),
            _ => None,
        }
    }

    /// Line break terminals.
    #[must_use]
    pub const fn is_eol(self) -> bool {
        matches!(self, Self::LF | Self::CRLF | Self::CR)
    }

    /// The end-of-input terminal.
    #[must_use]
    pub const fn is_eof(self) -> bool {
        matches!(self, Self::EOF)
    }

    /// Label blocks, resets included.
    #[must_use]
    pub const fn is_label(self) -> bool {
        matches!(self, Self::Label)
    }

    /// Comments.
    #[must_use]
    pub const fn is_comment(self) -> bool {
        matches!(self, Self::Comment)
    }

    /// Quoted and raw strings.
    #[must_use]
    pub const fn is_string(self) -> bool {
        matches!(self, Self::String)
    }

    /// Integer literals.
    #[must_use]
    pub const fn is_number(self) -> bool {
        matches!(self, Self::Number)
    }

    /// Real literals.
    #[must_use]
    pub const fn is_real(self) -> bool {
        matches!(self, Self::Real)
    }

    /// Error terminals.
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::SomeError)
    }

    /// The six name terminals.
    #[must_use]
    pub const fn looks_like_name(self) -> bool {
        matches!(
            self,
            Self::Name
                | Self::NameRead
                | Self::NameWrite
                | Self::NameMember
                | Self::NameReadMember
                | Self::NameWriteMember
        )
    }

    /// Length of the access prefix carried by a name terminal (`@`, `.`, `.!`, ...).
    #[must_use]
    pub const fn name_prefix_len(self) -> usize {
        match self {
            Self::NameRead | Self::NameWrite | Self::NameMember => 1,
            Self::NameReadMember | Self::NameWriteMember => 2,
            _ => 0,
        }
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
