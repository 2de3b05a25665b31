//! Depth-bounded one-line summaries of declarations and expressions.
//!
//! Overview listings show each declaration as a single line. The walk is
//! bounded: past `MAX_DEPTH` levels everything collapses to an ellipsis, and
//! node kinds without special casing render through the full printer with
//! multi-line output collapsed the same way. Output never contains a line
//! break, whatever the input tree looks like.

use super::matching::is_exported;
use crate::render;
use crate::syntax::{Decl, Expr, Field, FieldList, FuncDecl, FuncType, GenDecl, Spec, TypeSpec};

/// Placeholder for exhausted depth, elided members, and collapsed output.
pub const ELLIPSIS: &str = "...";

/// Maximum node depth a one-line summary descends through.
pub const MAX_DEPTH: usize = 10;

/// One-line summary of any declaration.
pub fn one_line_decl(decl: &Decl, depth: usize) -> String {
	match decl {
		Decl::Gen(r#gen) => one_line_gen_decl(r#gen, depth),
		Decl::Func(func) => one_line_func_decl(func, depth),
	}
}

/// One-line summary of a const or var declaration group: the first spec
/// whose leading name is exported, with an ellipsis trailer when the group
/// holds more than one spec. Returns the empty string when no spec
/// qualifies.
pub fn one_line_gen_decl(decl: &GenDecl, depth: usize) -> String {
	if depth == 0 {
		return ELLIPSIS.to_string();
	}
	let depth = depth - 1;

	let trailer = if decl.specs.len() > 1 {
		format!(" {ELLIPSIS}")
	} else {
		String::new()
	};

	// The type name may carry over from a previous spec in the case of
	// constants and iota.
	let mut typ = String::new();
	for (i, spec) in decl.specs.iter().enumerate() {
		let Spec::Value(value) = spec else { continue };
		if let Some(spec_typ) = &value.typ {
			typ = format!(" {}", one_line_expr(spec_typ, depth));
		} else if !value.values.is_empty() {
			typ.clear();
		}

		let Some(first) = value.names.first() else {
			continue;
		};
		if !is_exported(first) {
			continue;
		}
		let val = match value.values.get(i) {
			Some(v) => format!(" = {}", one_line_expr(v, depth)),
			None => String::new(),
		};
		return format!("{} {first}{typ}{val}{trailer}", decl.tok);
	}
	String::new()
}

/// One-line summary of a function or method declaration.
pub fn one_line_func_decl(decl: &FuncDecl, depth: usize) -> String {
	if depth == 0 {
		return ELLIPSIS.to_string();
	}
	let depth = depth - 1;

	let recv = match &decl.recv {
		None => String::new(),
		Some(list) => one_line_field_list(list, depth),
	};
	let recv = if recv.is_empty() {
		recv
	} else {
		format!("({recv}) ")
	};

	let sig = if depth == 0 {
		ELLIPSIS.to_string()
	} else {
		one_line_func_type(&decl.typ, depth - 1)
	};
	// The nested signature renderer supplies its own `func` keyword.
	let sig = match sig.strip_prefix("func") {
		Some(stripped) => stripped.to_string(),
		None => sig,
	};
	format!("func {recv}{}{sig}", decl.name)
}

/// One-line summary of a type declaration spec.
pub fn one_line_type_spec(spec: &TypeSpec, depth: usize) -> String {
	if depth == 0 {
		return ELLIPSIS.to_string();
	}
	format!("type {} {}", spec.name, one_line_expr(&spec.typ, depth - 1))
}

/// One-line summary of a field list: nothing for an empty list, the single
/// field when there is exactly one, an ellipsis otherwise.
pub fn one_line_field_list(list: &FieldList, depth: usize) -> String {
	if depth == 0 {
		return ELLIPSIS.to_string();
	}
	let depth = depth - 1;
	match list.list.as_slice() {
		[] => String::new(),
		[field] => one_line_field(field, depth),
		_ => ELLIPSIS.to_string(),
	}
}

/// One-line summary of a single field: `names type`, or the bare type when
/// the field is unnamed.
pub fn one_line_field(field: &Field, depth: usize) -> String {
	if field.names.is_empty() {
		return one_line_expr(&field.typ, depth);
	}
	format!("{} {}", field.names.join(", "), one_line_expr(&field.typ, depth))
}

/// One-line summary of an expression node.
pub fn one_line_expr(expr: &Expr, depth: usize) -> String {
	if depth == 0 {
		return ELLIPSIS.to_string();
	}
	let depth = depth - 1;

	match expr {
		Expr::Ident { name } => name.clone(),
		Expr::Func { typ } => one_line_func_type(typ, depth),
		Expr::FuncLit { typ } => {
			let sig = if depth == 0 {
				ELLIPSIS.to_string()
			} else {
				one_line_func_type(typ, depth - 1)
			};
			format!("{sig} {{ {ELLIPSIS} }}")
		}
		Expr::Struct { fields } => {
			if fields.list.is_empty() {
				"struct{}".to_string()
			} else {
				format!("struct{{ {ELLIPSIS} }}")
			}
		}
		Expr::Interface { methods } => {
			if methods.list.is_empty() {
				"interface{}".to_string()
			} else {
				format!("interface{{ {ELLIPSIS} }}")
			}
		}
		Expr::Composite { typ, elts } => {
			let typ = typ
				.as_deref()
				.map(|t| one_line_expr(t, depth))
				.unwrap_or_default();
			if elts.is_empty() {
				format!("{typ}{{}}")
			} else {
				format!("{typ}{{ {ELLIPSIS} }}")
			}
		}
		Expr::Array { len, elt } => {
			let len = len
				.as_deref()
				.map(|l| one_line_expr(l, depth))
				.unwrap_or_default();
			format!("[{len}]{}", one_line_expr(elt, depth))
		}
		Expr::Map { key, value } => {
			format!(
				"map[{}]{}",
				one_line_expr(key, depth),
				one_line_expr(value, depth)
			)
		}
		Expr::Call { func, args } => {
			let args: Vec<String> = args.iter().map(|arg| one_line_expr(arg, depth)).collect();
			format!("{}({})", one_line_expr(func, depth), args.join(", "))
		}
		Expr::Unary { op, expr } => format!("{op}{}", one_line_expr(expr, depth)),
		// Everything else renders through the full printer; the single-line
		// contract holds by collapsing any multi-line result.
		other => {
			let rendered = render::expr(other);
			if rendered.contains('\n') {
				ELLIPSIS.to_string()
			} else {
				rendered
			}
		}
	}
}

/// Signature summary including the leading `func` keyword, with the fields
/// rendered at the given depth.
fn one_line_func_type(typ: &FuncType, depth: usize) -> String {
	let params: Vec<String> = typ
		.params
		.iter()
		.map(|field| one_line_field(field, depth))
		.collect();

	let mut need_parens = typ.results.len() > 1;
	let mut results = Vec::with_capacity(typ.results.len());
	for field in &typ.results {
		need_parens = need_parens || !field.names.is_empty();
		results.push(one_line_field(field, depth));
	}

	let params = params.join(", ");
	if results.is_empty() {
		return format!("func({params})");
	}
	let results = results.join(", ");
	if need_parens {
		format!("func({params}) ({results})")
	} else {
		format!("func({params}) {results}")
	}
}
