// AST (Abstract Syntax Tree) definitions for the tailscript interpreter

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic (`Add` also concatenates two texts)
    Add,
    Sub,
    Mul,
    Div,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical (both operands always evaluated; no short-circuit)
    And,
    Or,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg, // -x (integer)
    Not, // !x (boolean)
}

/// Target of an explicit conversion expression (`int(e)`, `str(e)`, `bool(e)`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertTarget {
    Int,
    Text,
    Bool,
}

/// Function or lambda parameter
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    /// Declared with `&`: binds an alias to the caller's storage cell
    pub by_ref: bool,
}

/// A single requirement inside an `interface` block
#[derive(Debug, Clone)]
pub enum InterfaceMember {
    /// Required member name (`vali;`)
    Field { name: String },
    /// Required method name; parameter names are recorded but never checked
    Method { name: String, params: Vec<String> },
}

/// AST nodes representing declarations, statements and expressions
#[derive(Debug, Clone)]
pub enum AstNode {
    // Top-level declarations
    FunctionDef {
        name: String,
        params: Vec<Param>,
        body: Vec<AstNode>,
        location: SourceLocation,
    },
    InterfaceDef {
        name: String,
        members: Vec<InterfaceMember>,
        location: SourceLocation,
    },

    // Statements
    VarDecl {
        name: String,
        /// `local` declarations stay in the current frame; `var` declarations
        /// are placed one frame out (see the scope placement rules)
        block_scoped: bool,
        location: SourceLocation,
    },
    Assignment {
        /// Dot-separated target path, already split into segments
        target: Vec<String>,
        expr: Box<AstNode>,
        location: SourceLocation,
    },
    If {
        condition: Box<AstNode>,
        then_branch: Vec<AstNode>,
        else_branch: Option<Vec<AstNode>>,
        location: SourceLocation,
    },
    While {
        condition: Box<AstNode>,
        body: Vec<AstNode>,
        location: SourceLocation,
    },
    Return {
        expr: Option<Box<AstNode>>,
        location: SourceLocation,
    },

    // Expressions (`Call` doubles as the bare-call statement)
    Call {
        callee: Vec<String>,
        args: Vec<AstNode>,
        location: SourceLocation,
    },
    IntLiteral(i64, SourceLocation),
    TextLiteral(String, SourceLocation),
    BoolLiteral(bool, SourceLocation),
    NilLiteral(SourceLocation),
    /// `@` — a fresh empty object
    EmptyObject(SourceLocation),
    /// Variable or dotted member read
    PathRef {
        path: Vec<String>,
        location: SourceLocation,
    },
    BinaryOp {
        op: BinOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
        location: SourceLocation,
    },
    UnaryOp {
        op: UnOp,
        operand: Box<AstNode>,
        location: SourceLocation,
    },
    Lambda {
        /// The surface name (`lambdai`, `lambdav`, ...); its suffix is the
        /// lambda's return type code
        name: String,
        params: Vec<Param>,
        body: Vec<AstNode>,
        location: SourceLocation,
    },
    Convert {
        target: ConvertTarget,
        expr: Box<AstNode>,
        location: SourceLocation,
    },
}

impl AstNode {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            AstNode::FunctionDef { location, .. } => *location,
            AstNode::InterfaceDef { location, .. } => *location,
            AstNode::VarDecl { location, .. } => *location,
            AstNode::Assignment { location, .. } => *location,
            AstNode::If { location, .. } => *location,
            AstNode::While { location, .. } => *location,
            AstNode::Return { location, .. } => *location,
            AstNode::Call { location, .. } => *location,
            AstNode::IntLiteral(_, loc) => *loc,
            AstNode::TextLiteral(_, loc) => *loc,
            AstNode::BoolLiteral(_, loc) => *loc,
            AstNode::NilLiteral(loc) => *loc,
            AstNode::EmptyObject(loc) => *loc,
            AstNode::PathRef { location, .. } => *location,
            AstNode::BinaryOp { location, .. } => *location,
            AstNode::UnaryOp { location, .. } => *location,
            AstNode::Lambda { location, .. } => *location,
            AstNode::Convert { location, .. } => *location,
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub nodes: Vec<AstNode>, // All top-level declarations (FunctionDef, InterfaceDef)
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}
