//! Export-visibility filtering of struct fields and interface methods.
//!
//! Redaction is copy-on-write: the borrowed original comes back whenever
//! nothing had to be removed, so callers can tell "nothing elided" apart
//! without comparing contents. When members are removed, a single synthetic
//! trailing marker takes their place and renders as a comment.

use std::borrow::Cow;

use tracing::warn;

use super::Config;
use super::matching::is_exported;
use crate::syntax::{Expr, Field, FieldList, TypeSpec};

/// Redact non-public members from a type spec. Only struct and interface
/// types carry members; any other underlying type passes through untouched,
/// as does everything when the show-unexported switch is set.
pub fn trim_unexported_elems<'a>(cfg: &Config, spec: &'a TypeSpec) -> Cow<'a, TypeSpec> {
	if cfg.unexported {
		return Cow::Borrowed(spec);
	}
	match &spec.typ {
		Expr::Struct { fields } => match trim_unexported_fields(fields, false) {
			Cow::Borrowed(_) => Cow::Borrowed(spec),
			Cow::Owned(fields) => Cow::Owned(TypeSpec {
				typ: Expr::Struct { fields },
				..spec.clone()
			}),
		},
		Expr::Interface { methods } => match trim_unexported_fields(methods, true) {
			Cow::Borrowed(_) => Cow::Borrowed(spec),
			Cow::Owned(methods) => Cow::Owned(TypeSpec {
				typ: Expr::Interface { methods },
				..spec.clone()
			}),
		},
		_ => Cow::Borrowed(spec),
	}
}

/// Trim a field list of members that are not part of the public surface.
///
/// A member with explicit names is kept only when every name is exported.
/// An embedded member's effective name is derived from its type: a plain
/// identifier uses the type name, pointer-to-identifier (structs only)
/// unwraps one level, a qualified selector uses the trailing name, and the
/// builtin `error` capability embedded in an interface is always kept.
pub fn trim_unexported_fields(fields: &FieldList, is_interface: bool) -> Cow<'_, FieldList> {
	let what = if is_interface { "methods" } else { "fields" };

	let mut trimmed = false;
	let mut list = Vec::with_capacity(fields.list.len());
	for field in &fields.list {
		if field.is_elision_marker() {
			// An already-redacted list passes through unchanged.
			list.push(field.clone());
			continue;
		}
		let mut names: Vec<&str> = field.names.iter().map(String::as_str).collect();
		if names.is_empty() {
			// Embedded member: derive the effective name from the type.
			match &field.typ {
				Expr::Ident { name } => {
					if is_interface && name == "error" {
						list.push(field.clone());
						continue;
					}
					names.push(name);
				}
				Expr::Star { expr } => {
					if let Expr::Ident { name } = expr.as_ref()
						&& !is_interface
					{
						names.push(name);
					}
				}
				Expr::Selector { sel, .. } => names.push(sel),
				_ => {}
			}
			if names.is_empty() {
				// The input tree is inconsistent; keep the member and move on.
				warn!("invalid program: unexpected type for embedded field");
			}
		}
		// Drop the member if any of its names is unexported.
		if names.iter().copied().all(is_exported) {
			list.push(field.clone());
		} else {
			trimmed = true;
		}
	}
	if !trimmed {
		return Cow::Borrowed(fields);
	}
	list.push(Field::elision_marker(what));
	Cow::Owned(FieldList { list })
}
