//! Syntax-tree data model for the toolchain handoff.
//!
//! The language toolchain parses and doc-extracts a package, then hands the
//! result to pkgdoc as a single JSON document. This module defines that
//! document: package metadata plus the merged file with its declaration tree.
//! The tree is read-only once loaded; the only nodes pkgdoc ever fabricates
//! are the elision marker field and the carried-over type identifier injected
//! into iota-style value groups.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// A complete package description as produced by the language toolchain.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PackageInput {
	/// Package-level metadata.
	pub package: PackageMeta,
	/// The merged parse of all files belonging to the package.
	pub file: File,
}

impl PackageInput {
	/// Decode a package description from its JSON text.
	pub fn from_json(text: &str) -> Result<Self> {
		Ok(serde_json::from_str(text)?)
	}

	/// Read and decode a package description file.
	pub fn load(path: &Path) -> Result<Self> {
		let text = fs::read_to_string(path)?;
		Self::from_json(&text)
	}
}

/// Metadata describing the loaded package.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PackageMeta {
	/// Declared package name.
	pub name: String,
	/// Resolved import path.
	#[serde(default)]
	pub import_path: String,
	/// Canonical import path override; empty when the source carries none.
	#[serde(default)]
	pub import_comment: String,
	/// Source directory the package was loaded from.
	#[serde(default)]
	pub dir: String,
	/// Files merged into the parse.
	#[serde(default)]
	pub files: Vec<String>,
	/// Whether the package builds a command rather than a library.
	#[serde(default)]
	pub is_command: bool,
}

/// The merged parse of a package's files.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct File {
	/// Package doc comment text.
	#[serde(default)]
	pub doc: String,
	/// Top-level declarations in source order.
	#[serde(default)]
	pub decls: Vec<Decl>,
	/// Note bodies grouped by category, e.g. `"BUG"`.
	#[serde(default)]
	pub notes: BTreeMap<String, Vec<Note>>,
}

/// A single extracted note, such as a known-issue marker.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Note {
	/// Who recorded the note.
	#[serde(default)]
	pub uid: String,
	/// Note text.
	pub body: String,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "decl", rename_all = "snake_case")]
pub enum Decl {
	/// A `const`, `var`, or `type` declaration, possibly grouped.
	Gen(GenDecl),
	/// A function or method declaration.
	Func(FuncDecl),
}

/// Keyword introducing a generic declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tok {
	/// `const`
	Const,
	/// `var`
	Var,
	/// `type`
	Type,
}

impl fmt::Display for Tok {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Const => write!(f, "const"),
			Self::Var => write!(f, "var"),
			Self::Type => write!(f, "type"),
		}
	}
}

/// A `const`/`var`/`type` declaration carrying one or more specs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenDecl {
	/// Declaration keyword.
	pub tok: Tok,
	/// Doc comment attached to the whole declaration.
	#[serde(default)]
	pub doc: Option<String>,
	/// Whether the source used a parenthesized group.
	#[serde(default)]
	pub grouped: bool,
	/// The declaration's specs.
	pub specs: Vec<Spec>,
}

/// One spec within a generic declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "spec", rename_all = "snake_case")]
pub enum Spec {
	/// A constant or variable binding group.
	Value(ValueSpec),
	/// A named type definition.
	Type(TypeSpec),
}

/// Names bound to an optional type and optional value expressions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValueSpec {
	/// Doc comment attached to this spec.
	#[serde(default)]
	pub doc: Option<String>,
	/// Declared names; never empty.
	pub names: Vec<String>,
	/// Explicit type, when the source gives one.
	#[serde(default, rename = "type")]
	pub typ: Option<Expr>,
	/// Value expressions, when the source gives any.
	#[serde(default)]
	pub values: Vec<Expr>,
}

/// A named type and its underlying type expression.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypeSpec {
	/// Doc comment attached to this spec.
	#[serde(default)]
	pub doc: Option<String>,
	/// Declared type name.
	pub name: String,
	/// Underlying type expression.
	#[serde(rename = "type")]
	pub typ: Expr,
}

/// A function or method declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FuncDecl {
	/// Doc comment attached to the declaration.
	#[serde(default)]
	pub doc: Option<String>,
	/// Declared name.
	pub name: String,
	/// Receiver list; `None` for free functions.
	#[serde(default)]
	pub recv: Option<FieldList>,
	/// The signature.
	#[serde(rename = "type")]
	pub typ: FuncType,
	/// Opaque body marker; stripped before any emission.
	#[serde(default)]
	pub body: Option<Block>,
}

/// Opaque stand-in for a function body. Bodies are never rendered, so the
/// toolchain handoff carries only their presence.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Block {}

/// A function signature: parameter and result fields.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct FuncType {
	/// Parameters in declaration order.
	#[serde(default)]
	pub params: Vec<Field>,
	/// Results in declaration order.
	#[serde(default)]
	pub results: Vec<Field>,
}

/// An ordered list of fields, as found in struct bodies, interface bodies,
/// and receiver lists.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(transparent)]
pub struct FieldList {
	/// The fields in declaration order.
	pub list: Vec<Field>,
}

/// A struct field, interface method, receiver, parameter, or result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Field {
	/// Declared names; empty for embedded/anonymous members.
	#[serde(default)]
	pub names: Vec<String>,
	/// The member's type expression.
	#[serde(rename = "type")]
	pub typ: Expr,
	/// Doc comment lines above the member.
	#[serde(default)]
	pub doc: Option<String>,
	/// Trailing comment on the member's line.
	#[serde(default)]
	pub comment: Option<String>,
}

impl Field {
	/// Synthetic trailing member standing in for elided non-public members.
	/// Renders as a comment line only.
	pub fn elision_marker(what: &str) -> Self {
		Self {
			names: Vec::new(),
			typ: Expr::Ident {
				name: String::new(),
			},
			doc: None,
			comment: Some(format!("Has unexported {what}.")),
		}
	}

	/// Whether this field is the synthetic elision marker.
	pub fn is_elision_marker(&self) -> bool {
		self.names.is_empty()
			&& self.comment.is_some()
			&& matches!(&self.typ, Expr::Ident { name } if name.is_empty())
	}
}

/// Direction of a channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
	/// Bidirectional `chan T`.
	#[default]
	Both,
	/// Send-only `chan<- T`.
	Send,
	/// Receive-only `<-chan T`.
	Recv,
}

/// A type or value expression node.
///
/// The enumeration is closed; consumers that walk it keep a catch-all arm so
/// node kinds without special handling still render through the full printer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
	/// A bare identifier.
	Ident {
		/// The identifier text.
		name: String,
	},
	/// A literal token, carried verbatim from the source.
	Lit {
		/// The literal's source text.
		value: String,
	},
	/// A qualified name `expr.sel`.
	Selector {
		/// The qualifier.
		expr: Box<Expr>,
		/// The selected name.
		sel: String,
	},
	/// A pointer type or dereference `*expr`.
	Star {
		/// The operand.
		expr: Box<Expr>,
	},
	/// A unary operation such as `&x` or `-x`.
	Unary {
		/// Operator text.
		op: String,
		/// The operand.
		expr: Box<Expr>,
	},
	/// A binary operation.
	Binary {
		/// Left operand.
		left: Box<Expr>,
		/// Operator text.
		op: String,
		/// Right operand.
		right: Box<Expr>,
	},
	/// A parenthesized expression.
	Paren {
		/// The wrapped expression.
		expr: Box<Expr>,
	},
	/// A call `func(args)`.
	Call {
		/// The callee.
		func: Box<Expr>,
		/// Arguments in order.
		#[serde(default)]
		args: Vec<Expr>,
	},
	/// An index expression `expr[index]`.
	Index {
		/// The indexed expression.
		expr: Box<Expr>,
		/// The index.
		index: Box<Expr>,
	},
	/// A key-value entry inside a composite literal.
	KeyValue {
		/// The key.
		key: Box<Expr>,
		/// The value.
		value: Box<Expr>,
	},
	/// A composite literal `Type{...}`.
	Composite {
		/// Literal type; absent inside nested literals.
		#[serde(default, rename = "type")]
		typ: Option<Box<Expr>>,
		/// The literal's elements.
		#[serde(default)]
		elts: Vec<Expr>,
	},
	/// An array or slice type; `len` is absent for slices.
	Array {
		/// Array length expression, if any.
		#[serde(default)]
		len: Option<Box<Expr>>,
		/// Element type.
		elt: Box<Expr>,
	},
	/// A map type.
	Map {
		/// Key type.
		key: Box<Expr>,
		/// Value type.
		value: Box<Expr>,
	},
	/// A channel type.
	Chan {
		/// Channel direction.
		#[serde(default)]
		dir: ChanDir,
		/// Element type.
		elem: Box<Expr>,
	},
	/// A variadic parameter type `...T`.
	Ellipsis {
		/// Element type, if present.
		#[serde(default)]
		elt: Option<Box<Expr>>,
	},
	/// A function type.
	Func {
		/// The signature.
		#[serde(rename = "type")]
		typ: FuncType,
	},
	/// A function literal. The body is never carried.
	FuncLit {
		/// The literal's signature.
		#[serde(rename = "type")]
		typ: FuncType,
	},
	/// A struct type.
	Struct {
		/// Declared fields.
		#[serde(default)]
		fields: FieldList,
	},
	/// An interface type.
	Interface {
		/// Declared methods and embedded interfaces.
		#[serde(default)]
		methods: FieldList,
	},
}
