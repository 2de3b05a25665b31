//! Native-syntax rendering of declarations and expressions.
//!
//! This is the full, multi-line form used when a single symbol is shown in
//! detail. One-line overview summaries live in [`crate::query::summary`];
//! that module falls back onto this printer for node kinds it has no special
//! casing for.

pub mod text;

use crate::syntax::{Decl, Expr, Field, FieldList, FuncDecl, FuncType, GenDecl, Spec};

/// Render a declaration in its full native-syntax form.
///
/// Function bodies are never expanded: a declaration still carrying a body
/// marker renders with a ` { ... }` placeholder, a stripped one renders as a
/// bare signature.
pub fn decl(decl: &Decl) -> String {
	match decl {
		Decl::Gen(r#gen) => gen_decl(r#gen),
		Decl::Func(func) => func_decl(func),
	}
}

/// Render an expression. Struct and interface types print inline on a single
/// line here; only type declarations expand them into blocks.
pub fn expr(expr: &Expr) -> String {
	match expr {
		Expr::Ident { name } => name.clone(),
		Expr::Lit { value } => value.clone(),
		Expr::Selector { expr, sel } => format!("{}.{sel}", self::expr(expr)),
		Expr::Star { expr } => format!("*{}", self::expr(expr)),
		Expr::Unary { op, expr } => format!("{op}{}", self::expr(expr)),
		Expr::Binary { left, op, right } => {
			format!("{} {op} {}", self::expr(left), self::expr(right))
		}
		Expr::Paren { expr } => format!("({})", self::expr(expr)),
		Expr::Call { func, args } => format!("{}({})", self::expr(func), expr_list(args)),
		Expr::Index { expr, index } => format!("{}[{}]", self::expr(expr), self::expr(index)),
		Expr::KeyValue { key, value } => format!("{}: {}", self::expr(key), self::expr(value)),
		Expr::Composite { typ, elts } => {
			let typ = typ.as_deref().map(self::expr).unwrap_or_default();
			format!("{typ}{{{}}}", expr_list(elts))
		}
		Expr::Array { len, elt } => {
			let len = len.as_deref().map(self::expr).unwrap_or_default();
			format!("[{len}]{}", self::expr(elt))
		}
		Expr::Map { key, value } => {
			format!("map[{}]{}", self::expr(key), self::expr(value))
		}
		Expr::Chan { dir, elem } => {
			use crate::syntax::ChanDir;
			let elem = self::expr(elem);
			match dir {
				ChanDir::Both => format!("chan {elem}"),
				ChanDir::Send => format!("chan<- {elem}"),
				ChanDir::Recv => format!("<-chan {elem}"),
			}
		}
		Expr::Ellipsis { elt } => {
			format!("...{}", elt.as_deref().map(self::expr).unwrap_or_default())
		}
		Expr::Func { typ } => format!("func{}", signature(typ)),
		Expr::FuncLit { typ } => format!("func{} {{ ... }}", signature(typ)),
		Expr::Struct { fields } => composite_inline("struct", fields, false),
		Expr::Interface { methods } => composite_inline("interface", methods, true),
	}
}

/// Render a signature without the leading `func` keyword: parameter list,
/// then results, parenthesized only when there is more than one or any
/// result is named.
pub fn signature(typ: &FuncType) -> String {
	let params: Vec<String> = typ.params.iter().map(field_inline).collect();
	let mut need_parens = typ.results.len() > 1;
	let mut results = Vec::with_capacity(typ.results.len());
	for field in &typ.results {
		need_parens = need_parens || !field.names.is_empty();
		results.push(field_inline(field));
	}

	let params = params.join(", ");
	if results.is_empty() {
		return format!("({params})");
	}
	let results = results.join(", ");
	if need_parens {
		format!("({params}) ({results})")
	} else {
		format!("({params}) {results}")
	}
}

fn expr_list(exprs: &[Expr]) -> String {
	exprs.iter().map(expr).collect::<Vec<_>>().join(", ")
}

/// Render a field for inline positions: parameters, results, receivers, and
/// single-line struct/interface types.
fn field_inline(field: &Field) -> String {
	if field.names.is_empty() {
		return expr(&field.typ);
	}
	format!("{} {}", field.names.join(", "), expr(&field.typ))
}

fn composite_inline(keyword: &str, fields: &FieldList, is_interface: bool) -> String {
	if fields.list.is_empty() {
		return format!("{keyword}{{}}");
	}
	let members: Vec<String> = fields
		.list
		.iter()
		.filter(|field| !field.is_elision_marker())
		.map(|field| member_text(field, is_interface))
		.collect();
	format!("{keyword}{{ {} }}", members.join("; "))
}

fn gen_decl(decl: &GenDecl) -> String {
	if decl.grouped {
		let mut out = format!("{} (\n", decl.tok);
		for s in &decl.specs {
			for line in spec(s).lines() {
				out.push('\t');
				out.push_str(line);
				out.push('\n');
			}
		}
		out.push(')');
		return out;
	}
	match decl.specs.as_slice() {
		[single] => format!("{} {}", decl.tok, spec(single)),
		_ => {
			// Multiple specs without group parens cannot round-trip; fall
			// back to the grouped form.
			let grouped = GenDecl {
				grouped: true,
				..decl.clone()
			};
			gen_decl(&grouped)
		}
	}
}

fn spec(spec: &Spec) -> String {
	match spec {
		Spec::Value(value) => {
			let mut out = value.names.join(", ");
			if let Some(typ) = &value.typ {
				out.push(' ');
				out.push_str(&expr(typ));
			}
			if !value.values.is_empty() {
				out.push_str(" = ");
				out.push_str(&expr_list(&value.values));
			}
			out
		}
		Spec::Type(typ) => format!("{} {}", typ.name, type_block(&typ.typ)),
	}
}

/// Render the underlying type of a type declaration. Struct and interface
/// types expand into tab-indented blocks; everything else is inline.
fn type_block(typ: &Expr) -> String {
	match typ {
		Expr::Struct { fields } if !fields.list.is_empty() => block("struct", fields, false),
		Expr::Interface { methods } if !methods.list.is_empty() => {
			block("interface", methods, true)
		}
		other => expr(other),
	}
}

fn block(keyword: &str, fields: &FieldList, is_interface: bool) -> String {
	let mut out = format!("{keyword} {{\n");
	for field in &fields.list {
		write_member(&mut out, field, is_interface);
	}
	out.push('}');
	out
}

fn write_member(out: &mut String, field: &Field, is_interface: bool) {
	if let Some(doc) = &field.doc {
		for line in doc.trim_end().lines() {
			out.push_str("\t// ");
			out.push_str(line);
			out.push('\n');
		}
	}
	if field.is_elision_marker() {
		// The marker renders as its comment alone.
		if let Some(comment) = &field.comment {
			out.push_str("\t// ");
			out.push_str(comment);
			out.push('\n');
		}
		return;
	}
	out.push('\t');
	out.push_str(&member_text(field, is_interface));
	if let Some(comment) = &field.comment {
		out.push_str(" // ");
		out.push_str(comment);
	}
	out.push('\n');
}

fn member_text(field: &Field, is_interface: bool) -> String {
	// Interface methods print as `Name(params) results`.
	if is_interface
		&& field.names.len() == 1
		&& let Expr::Func { typ } = &field.typ
	{
		return format!("{}{}", field.names[0], signature(typ));
	}
	field_inline(field)
}

fn func_decl(decl: &FuncDecl) -> String {
	let mut out = String::from("func ");
	if let Some(recv) = &decl.recv
		&& let Some(field) = recv.list.first()
	{
		out.push('(');
		out.push_str(&field_inline(field));
		out.push_str(") ");
	}
	out.push_str(&decl.name);
	out.push_str(&signature(&decl.typ));
	if decl.body.is_some() {
		out.push_str(" { ... }");
	}
	out
}
