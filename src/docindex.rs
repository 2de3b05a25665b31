//! Documentation index: declarations grouped by kind, with constants,
//! variables, constructor functions, and methods associated to their owning
//! type.
//!
//! The index owns arenas of value groups and functions addressed by small id
//! newtypes. Type-associated declarations are additionally appended to the
//! package-level id lists ("re-homed") so exact-name symbol lookup reaches
//! them; overview printing excludes them again through grouped-id sets.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::syntax::{Decl, Expr, Field, FieldList, File, FuncDecl, GenDecl, Note, Spec, Tok};

/// Index of a value declaration group within the package arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueId(pub usize);

/// Index of a function or method within the package arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FuncId(pub usize);

/// A const or var declaration group and its extracted documentation.
#[derive(Debug, Clone)]
pub struct DocValue {
	/// All names bound by the group, in source order.
	pub names: Vec<String>,
	/// Doc comment text; empty when none.
	pub doc: String,
	/// The declaration, owned by the index.
	pub decl: GenDecl,
}

/// A function or method and its extracted documentation.
#[derive(Debug, Clone)]
pub struct DocFunc {
	/// Declared name.
	pub name: String,
	/// Doc comment text; empty when none.
	pub doc: String,
	/// Base type name of the receiver, for methods.
	pub recv: Option<String>,
	/// The declaration, owned by the index.
	pub decl: FuncDecl,
}

/// A named type with back-references to its associated declarations.
#[derive(Debug, Clone)]
pub struct DocType {
	/// Declared name.
	pub name: String,
	/// Doc comment text; empty when none.
	pub doc: String,
	/// Single-spec declaration for this type.
	pub decl: GenDecl,
	/// Constant groups declared with this type.
	pub consts: Vec<ValueId>,
	/// Variable groups declared with this type.
	pub vars: Vec<ValueId>,
	/// Constructor functions returning this type.
	pub funcs: Vec<FuncId>,
	/// Methods declared on this type.
	pub methods: Vec<FuncId>,
}

/// The documentation index for one package.
#[derive(Debug, Clone, Default)]
pub struct PackageDoc {
	/// Package doc comment text.
	pub doc: String,
	/// Arena of value declaration groups.
	pub value_decls: Vec<DocValue>,
	/// Arena of functions and methods.
	pub func_decls: Vec<DocFunc>,
	/// Package-level constant groups, including re-homed typed groups.
	pub consts: Vec<ValueId>,
	/// Package-level variable groups, including re-homed typed groups.
	pub vars: Vec<ValueId>,
	/// Package-level functions, including re-homed constructors.
	pub funcs: Vec<FuncId>,
	/// Declared types, sorted by name.
	pub types: Vec<DocType>,
	/// Note bodies by category.
	pub notes: BTreeMap<String, Vec<Note>>,
}

impl PackageDoc {
	/// The value group behind an id.
	pub fn value(&self, id: ValueId) -> &DocValue {
		&self.value_decls[id.0]
	}

	/// The function or method behind an id.
	pub fn func(&self, id: FuncId) -> &DocFunc {
		&self.func_decls[id.0]
	}
}

/// Build the documentation index for a merged file.
pub fn build(file: &File) -> PackageDoc {
	let mut doc = PackageDoc {
		doc: file.doc.clone(),
		notes: file.notes.clone(),
		..PackageDoc::default()
	};

	// Types first, so value and function association can resolve them.
	for decl in &file.decls {
		let Decl::Gen(r#gen) = decl else { continue };
		if r#gen.tok != Tok::Type {
			continue;
		}
		for spec in &r#gen.specs {
			let Spec::Type(spec) = spec else { continue };
			doc.types.push(DocType {
				name: spec.name.clone(),
				doc: spec
					.doc
					.clone()
					.or_else(|| r#gen.doc.clone())
					.unwrap_or_default(),
				// Grouped type declarations are split one spec per type.
				decl: GenDecl {
					tok: Tok::Type,
					doc: r#gen.doc.clone(),
					grouped: false,
					specs: vec![Spec::Type(spec.clone())],
				},
				consts: Vec::new(),
				vars: Vec::new(),
				funcs: Vec::new(),
				methods: Vec::new(),
			});
		}
	}
	doc.types.sort_by(|a, b| a.name.cmp(&b.name));
	let type_index: HashMap<String, usize> = doc
		.types
		.iter()
		.enumerate()
		.map(|(i, typ)| (typ.name.clone(), i))
		.collect();

	for decl in &file.decls {
		match decl {
			Decl::Gen(r#gen) if r#gen.tok != Tok::Type => {
				let names: Vec<String> = r#gen
					.specs
					.iter()
					.filter_map(|spec| match spec {
						Spec::Value(value) => Some(value.names.clone()),
						Spec::Type(_) => None,
					})
					.flatten()
					.collect();
				let id = ValueId(doc.value_decls.len());
				doc.value_decls.push(DocValue {
					names,
					doc: r#gen.doc.clone().unwrap_or_default(),
					decl: r#gen.clone(),
				});

				let list = match (value_owner(r#gen, &type_index), r#gen.tok) {
					(Some(t), Tok::Const) => &mut doc.types[t].consts,
					(Some(t), _) => &mut doc.types[t].vars,
					(None, Tok::Const) => &mut doc.consts,
					(None, _) => &mut doc.vars,
				};
				list.push(id);
			}
			Decl::Func(func) => {
				let recv = func.recv.as_ref().and_then(receiver_base);
				let id = FuncId(doc.func_decls.len());
				doc.func_decls.push(DocFunc {
					name: func.name.clone(),
					doc: func.doc.clone().unwrap_or_default(),
					recv: recv.clone(),
					decl: func.clone(),
				});

				if let Some(recv_name) = recv {
					match type_index.get(&recv_name) {
						Some(&t) => doc.types[t].methods.push(id),
						None => debug!(
							receiver = %recv_name,
							method = %func.name,
							"dropping method of undeclared receiver type"
						),
					}
				} else if let Some(t) = constructor_owner(&func.typ.results, &type_index) {
					doc.types[t].funcs.push(id);
				} else {
					doc.funcs.push(id);
				}
			}
			Decl::Gen(_) => {}
		}
	}

	doc.funcs
		.sort_by(|a, b| doc.func_decls[a.0].name.cmp(&doc.func_decls[b.0].name));
	for typ in &mut doc.types {
		typ.consts
			.sort_by(|a, b| doc.value_decls[a.0].names.cmp(&doc.value_decls[b.0].names));
		typ.vars
			.sort_by(|a, b| doc.value_decls[a.0].names.cmp(&doc.value_decls[b.0].names));
		typ.funcs
			.sort_by(|a, b| doc.func_decls[a.0].name.cmp(&doc.func_decls[b.0].name));
		typ.methods
			.sort_by(|a, b| doc.func_decls[a.0].name.cmp(&doc.func_decls[b.0].name));
	}

	// Re-home type-associated declarations onto the package-level lists so
	// exact-name lookup can reach them. Overview printing filters them back
	// out through grouped-id sets.
	for t in 0..doc.types.len() {
		let consts = doc.types[t].consts.clone();
		let vars = doc.types[t].vars.clone();
		let funcs = doc.types[t].funcs.clone();
		doc.consts.extend(consts);
		doc.vars.extend(vars);
		doc.funcs.extend(funcs);
	}

	doc
}

/// The type a value declaration group belongs to: every spec with an
/// explicit type must name the same locally declared type. Untyped specs
/// inherit from their predecessor and do not veto the association.
fn value_owner(decl: &GenDecl, type_index: &HashMap<String, usize>) -> Option<usize> {
	let mut owner: Option<usize> = None;
	for spec in &decl.specs {
		let Spec::Value(value) = spec else { continue };
		let Some(typ) = &value.typ else { continue };
		let base = base_type_name(typ)?;
		let &t = type_index.get(base)?;
		if owner.is_some_and(|previous| previous != t) {
			return None;
		}
		owner = Some(t);
	}
	owner
}

/// The base type name of a receiver: an identifier or pointer-to-identifier.
fn receiver_base(recv: &FieldList) -> Option<String> {
	let field = recv.list.first()?;
	base_type_name(&field.typ).map(str::to_string)
}

/// A function is a constructor of the one locally declared type its results
/// name; results naming several declared types make it an ordinary function.
fn constructor_owner(results: &[Field], type_index: &HashMap<String, usize>) -> Option<usize> {
	let mut owner: Option<usize> = None;
	for field in results {
		let Some(base) = base_type_name(&field.typ) else {
			continue;
		};
		let Some(&t) = type_index.get(base) else {
			continue;
		};
		if owner.is_some_and(|previous| previous != t) {
			return None;
		}
		owner = Some(t);
	}
	owner
}

/// A plain identifier, or an identifier behind one pointer level.
fn base_type_name(typ: &Expr) -> Option<&str> {
	match typ {
		Expr::Ident { name } => Some(name),
		Expr::Star { expr } => match expr.as_ref() {
			Expr::Ident { name } => Some(name),
			_ => None,
		},
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::syntax::PackageInput;

	fn fixture() -> File {
		let input = PackageInput::from_json(
			r#"{
				"package": {"name": "demo", "import_path": "example.com/demo"},
				"file": {
					"doc": "Package demo does X.",
					"decls": [
						{"decl": "gen", "tok": "type", "specs": [
							{"spec": "type", "name": "Weekday",
							 "type": {"kind": "ident", "name": "int"}}
						]},
						{"decl": "gen", "tok": "type", "specs": [
							{"spec": "type", "name": "Buffer",
							 "type": {"kind": "struct", "fields": []}}
						]},
						{"decl": "gen", "tok": "const", "grouped": true, "specs": [
							{"spec": "value", "names": ["Sunday"],
							 "type": {"kind": "ident", "name": "Weekday"},
							 "values": [{"kind": "lit", "value": "iota"}]},
							{"spec": "value", "names": ["Monday"]}
						]},
						{"decl": "gen", "tok": "const", "specs": [
							{"spec": "value", "names": ["MaxWidth"],
							 "values": [{"kind": "lit", "value": "80"}]}
						]},
						{"decl": "func", "name": "NewBuffer",
						 "type": {"results": [{"type": {"kind": "star",
							"expr": {"kind": "ident", "name": "Buffer"}}}]},
						 "body": {}},
						{"decl": "func", "name": "Grow",
						 "recv": [{"names": ["b"], "type": {"kind": "star",
							"expr": {"kind": "ident", "name": "Buffer"}}}],
						 "type": {"params": [{"names": ["n"],
							"type": {"kind": "ident", "name": "int"}}]},
						 "body": {}},
						{"decl": "func", "name": "Width",
						 "type": {"results": [{"type": {"kind": "ident", "name": "int"}}]},
						 "body": {}}
					]
				}
			}"#,
		)
		.expect("valid fixture");
		input.file
	}

	#[test]
	fn test_types_sorted_and_split() {
		let doc = build(&fixture());
		let names: Vec<&str> = doc.types.iter().map(|t| t.name.as_str()).collect();
		assert_eq!(names, vec!["Buffer", "Weekday"]);
		for typ in &doc.types {
			assert_eq!(typ.decl.specs.len(), 1);
		}
	}

	#[test]
	fn test_typed_const_group_belongs_to_type() {
		let doc = build(&fixture());
		let weekday = doc.types.iter().find(|t| t.name == "Weekday").unwrap();
		assert_eq!(weekday.consts.len(), 1);
		assert_eq!(
			doc.value(weekday.consts[0]).names,
			vec!["Sunday".to_string(), "Monday".to_string()]
		);
	}

	#[test]
	fn test_constructor_and_method_association() {
		let doc = build(&fixture());
		let buffer = doc.types.iter().find(|t| t.name == "Buffer").unwrap();
		assert_eq!(buffer.funcs.len(), 1);
		assert_eq!(doc.func(buffer.funcs[0]).name, "NewBuffer");
		assert_eq!(buffer.methods.len(), 1);
		let grow = doc.func(buffer.methods[0]);
		assert_eq!(grow.name, "Grow");
		assert_eq!(grow.recv.as_deref(), Some("Buffer"));
	}

	#[test]
	fn test_rehoming_reaches_package_level_lists() {
		let doc = build(&fixture());
		// The typed group joins the package-level const list for lookup.
		assert_eq!(doc.consts.len(), 2);
		let all_names: Vec<&str> = doc
			.consts
			.iter()
			.flat_map(|&id| doc.value(id).names.iter().map(String::as_str))
			.collect();
		assert!(all_names.contains(&"Sunday"));
		assert!(all_names.contains(&"MaxWidth"));
		// The constructor joins the package-level function list; methods
		// never do.
		let func_names: Vec<&str> = doc
			.funcs
			.iter()
			.map(|&id| doc.func(id).name.as_str())
			.collect();
		assert_eq!(func_names, vec!["Width", "NewBuffer"]);
	}

	#[test]
	fn test_untyped_const_stays_top_level() {
		let doc = build(&fixture());
		let top: Vec<&str> = doc.consts[..1]
			.iter()
			.flat_map(|&id| doc.value(id).names.iter().map(String::as_str))
			.collect();
		assert_eq!(top, vec!["MaxWidth"]);
	}

	#[test]
	fn test_mixed_type_group_is_not_associated() {
		let file = PackageInput::from_json(
			r#"{
				"package": {"name": "demo"},
				"file": {"decls": [
					{"decl": "gen", "tok": "type", "specs": [
						{"spec": "type", "name": "A", "type": {"kind": "ident", "name": "int"}},
						{"spec": "type", "name": "B", "type": {"kind": "ident", "name": "int"}}
					]},
					{"decl": "gen", "tok": "var", "grouped": true, "specs": [
						{"spec": "value", "names": ["X"], "type": {"kind": "ident", "name": "A"}},
						{"spec": "value", "names": ["Y"], "type": {"kind": "ident", "name": "B"}}
					]}
				]}
			}"#,
		)
		.expect("valid fixture")
		.file;
		let doc = build(&file);
		assert_eq!(doc.vars.len(), 1);
		for typ in &doc.types {
			assert!(typ.vars.is_empty());
		}
	}
}
