use indexmap::IndexMap;

/// A PHP expression as far as this crate models it.
///
/// Strings hold their cooked value and are re-emitted single-quoted;
/// double-quoted strings containing interpolation keep their raw source
/// text instead, since they cannot be evaluated here.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Raw source of a double-quoted string with `$` interpolation,
    /// quotes included.
    InterpString(String),
    /// `array(...)` when `long_syntax`, `[...]` otherwise.
    Array {
        items: Vec<ArrayItem>,
        long_syntax: bool,
    },
    Variable(String),
    /// Bare or qualified constant name, e.g. `PHP_EOL` or `\OC\Memcache\APCu`.
    Const(String),
    ClassConst {
        class: Box<Expr>,
        name: String,
    },
    Property {
        target: Box<Expr>,
        name: String,
    },
    Index {
        target: Box<Expr>,
        index: Box<Expr>,
    },
    Call {
        target: Box<Expr>,
        args: Vec<Expr>,
    },
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

/// One `key => value` (or positional) item of an array literal.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayItem {
    pub key: Option<Expr>,
    pub value: Expr,
}

impl ArrayItem {
    /// The item's key if it is a plain string literal.
    pub fn string_key(&self) -> Option<&str> {
        match &self.key {
            Some(Expr::String(s)) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinaryOp {
    Concat,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOp {
    /// Binding power and right-associativity, PHP 8 precedence.
    /// `.` binds below `+`/`-` since PHP 8.
    pub fn precedence(&self) -> (u8, bool) {
        match self {
            BinaryOp::Pow => (40, true),
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => (30, false),
            BinaryOp::Add | BinaryOp::Sub => (20, false),
            BinaryOp::Concat => (10, false),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Concat => ".",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
        }
    }
}

/// One top-level statement of the source file.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A statement this crate does not model. The raw slice, leading trivia
    /// and trailing `;` included, is reproduced byte-for-byte on render.
    Opaque(String),
    /// A parsed `$VAR = <expr>;` statement for the storage variable.
    /// `leading` keeps the comments/whitespace that preceded it.
    Assign {
        leading: String,
        var: String,
        value: Expr,
    },
}

/// The parsed representation of a whole file: the `<?php` header plus an
/// ordered sequence of top-level statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub header: String,
    pub statements: Vec<Stmt>,
}

impl Document {
    /// Index of the first statement assigning an array literal to `var`.
    pub fn storage_assignment(&self, var: &str) -> Option<usize> {
        self.statements.iter().position(|stmt| {
            matches!(stmt, Stmt::Assign { var: v, value: Expr::Array { .. }, .. } if v == var)
        })
    }
}

/// A native configuration value, decoupled from PHP syntax.
///
/// Maps preserve insertion order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        if let Value::Map(map) = self {
            Some(map)
        } else {
            None
        }
    }
}
