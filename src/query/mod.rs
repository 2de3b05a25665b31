//! Query execution over a loaded package: symbol resolution, visibility
//! filtering, and output rendering.
//!
//! A [`Package`] owns the documentation index, the output buffer, and the
//! configuration for the lifetime of one query. Output accumulates in the
//! buffer and is flushed to the sink exactly once per top-level query, on
//! every exit path.

/// Export-visibility filtering of struct fields and interface methods.
pub mod filter;
/// Symbol-name matching rules.
pub mod matching;
/// Depth-bounded one-line summaries.
pub mod summary;

use std::collections::HashSet;
use std::io::Write;

use crate::docindex::{self, FuncId, PackageDoc, ValueId};
use crate::error::{Error, Result};
use crate::render::{self, text};
use crate::syntax::{Decl, Expr, GenDecl, PackageInput, PackageMeta, Spec, TypeSpec};

pub use self::filter::{trim_unexported_elems, trim_unexported_fields};
pub use self::matching::{is_exported, matches};
pub use self::summary::MAX_DEPTH;

const PUNCHED_CARD_WIDTH: usize = 80;
const INDENT: &str = "    ";
const INDENTED_WIDTH: usize = PUNCHED_CARD_WIDTH - INDENT.len();

/// Immutable switches consulted by the resolver, the visibility filter, and
/// the emitters. Fixed for the lifetime of a [`Package`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
	/// Show unexported symbols and disable all redaction.
	pub unexported: bool,
	/// Require symbol matches to respect case exactly.
	pub match_case: bool,
	/// Show full internals even for command packages.
	pub show_cmd: bool,
}

impl Config {
	/// Create a configuration with every switch off.
	pub fn new() -> Self {
		Self::default()
	}

	/// Show unexported symbols as well as exported ones.
	pub fn with_unexported(mut self, unexported: bool) -> Self {
		self.unexported = unexported;
		self
	}

	/// Require symbol matches to respect case exactly.
	pub fn with_match_case(mut self, match_case: bool) -> Self {
		self.match_case = match_case;
		self
	}

	/// Show full internals even for command packages.
	pub fn with_show_cmd(mut self, show_cmd: bool) -> Self {
		self.show_cmd = show_cmd;
		self
	}
}

/// A loaded package plus everything needed to answer queries about it.
///
/// Each instance serves exactly one logical query; nothing it owns is shared
/// with any other query.
pub struct Package<W: Write> {
	writer: W,
	meta: PackageMeta,
	user_path: String,
	doc: PackageDoc,
	cfg: Config,
	buf: String,
}

impl<W: Write> Package<W> {
	/// Build a query context from a decoded package description.
	///
	/// `user_path` is the string the user used to locate the package; it
	/// controls whether symbol queries repeat the package clause.
	pub fn new(input: PackageInput, user_path: &str, cfg: Config, writer: W) -> Self {
		let doc = docindex::build(&input.file);
		Self {
			writer,
			meta: input.package,
			user_path: user_path.to_string(),
			doc,
			cfg,
			buf: String::new(),
		}
	}

	/// The package metadata this query context was built from.
	pub fn meta(&self) -> &PackageMeta {
		&self.meta
	}

	/// The documentation index this query context was built from.
	pub fn doc(&self) -> &PackageDoc {
		&self.doc
	}

	/// Print the package clause and docs, followed by one-line summaries of
	/// the package contents. Command packages show only the doc text unless
	/// the show-cmd switch is set.
	pub fn package_doc(&mut self) -> Result<()> {
		let result = self.package_doc_body();
		self.flush()?;
		result
	}

	/// Print the docs for a symbol. A symbol matching a type also lists its
	/// associated constants, variables, constructors, and methods; a symbol
	/// matching nothing at the top level is retried as a bare method name.
	/// Returns false when nothing matched at all.
	pub fn symbol_doc(&mut self, symbol: &str) -> Result<bool> {
		let result = self.symbol_doc_body(symbol);
		self.flush()?;
		result
	}

	/// Print the docs for matches of `symbol.method`. Returns false when no
	/// method matched; fails when `symbol` is not a type at all.
	pub fn method_doc(&mut self, symbol: &str, method: &str) -> Result<bool> {
		let result = self.print_method_doc(symbol, method);
		self.flush()?;
		result
	}

	fn flush(&mut self) -> Result<()> {
		self.writer.write_all(self.buf.as_bytes())?;
		self.buf.clear();
		Ok(())
	}

	/// Guarantee there are `n` newlines at the end of the buffer. Only ever
	/// appends; existing content is never touched.
	fn newlines(&mut self, n: usize) {
		let suffix = &"\n\n"[..n];
		while !self.buf.ends_with(suffix) {
			self.buf.push('\n');
		}
	}

	/// Render a declaration, then its word-wrapped doc comment.
	fn emit(&mut self, comment: &str, decl: &Decl) {
		self.buf.push_str(&render::decl(decl));
		if comment.is_empty() {
			self.newlines(1);
		} else {
			self.newlines(1);
			text::to_text(&mut self.buf, comment, INDENT, INDENT, INDENTED_WIDTH);
			// Blank line after the comment to separate the next item.
			self.newlines(2);
		}
	}

	/// Print the package clause. With `check_user_path` set the clause is
	/// suppressed when the user's argument already names the import path (or
	/// is empty, meaning the current directory).
	fn package_clause(&mut self, check_user_path: bool) {
		if check_user_path && (self.user_path.is_empty() || self.user_path == self.meta.import_path)
		{
			return;
		}
		let import_path = if self.meta.import_comment.is_empty() {
			self.meta.import_path.clone()
		} else {
			self.meta.import_comment.clone()
		};
		self.buf.push_str(&format!(
			"package {} // import {:?}\n\n",
			self.meta.name, import_path
		));
		if import_path != self.meta.import_path {
			self.buf.push_str(&format!(
				"WARNING: package source is installed in {:?}\n",
				self.meta.import_path
			));
		}
	}

	/// Whether to show the internals of the package as opposed to just the
	/// package docs. Commands keep their internals private by default.
	fn show_internals(&self) -> bool {
		!self.meta.is_command || self.cfg.show_cmd
	}

	fn package_doc_body(&mut self) -> Result<()> {
		if self.show_internals() {
			self.package_clause(false);
		}

		text::to_text(&mut self.buf, &self.doc.doc, "", INDENT, INDENTED_WIDTH);
		self.newlines(1);

		if !self.show_internals() {
			// Only the package docs for commands.
			return Ok(());
		}

		// Blank line before the component listings.
		self.newlines(2);
		let consts = self.doc.consts.clone();
		self.value_summary(&consts, false);
		let vars = self.doc.vars.clone();
		self.value_summary(&vars, false);
		let funcs = self.doc.funcs.clone();
		self.func_summary(&funcs, false);
		self.type_summary();
		self.bugs();
		Ok(())
	}

	/// Print a one-line summary for each value group. Groups whose type
	/// gathers them under an exported type are suppressed unless
	/// `show_grouped` is set, since the type summary prints them instead.
	fn value_summary(&mut self, values: &[ValueId], show_grouped: bool) {
		let mut is_grouped = HashSet::new();
		if !show_grouped {
			for typ in &self.doc.types {
				if !is_exported(&typ.name) {
					continue;
				}
				is_grouped.extend(typ.consts.iter().copied());
				is_grouped.extend(typ.vars.iter().copied());
			}
		}

		for &id in values {
			if is_grouped.contains(&id) {
				continue;
			}
			let line = summary::one_line_gen_decl(&self.doc.value(id).decl, MAX_DEPTH);
			if !line.is_empty() {
				self.buf.push_str(&line);
				self.buf.push('\n');
			}
		}
	}

	/// Print a one-line summary for each exported function. Constructors are
	/// suppressed unless `show_constructors` is set, since the type summary
	/// prints them instead.
	fn func_summary(&mut self, funcs: &[FuncId], show_constructors: bool) {
		let mut is_constructor = HashSet::new();
		if !show_constructors {
			for typ in &self.doc.types {
				if is_exported(&typ.name) {
					is_constructor.extend(typ.funcs.iter().copied());
				}
			}
		}

		for &id in funcs {
			let func = self.doc.func(id);
			if !is_exported(&func.name) || is_constructor.contains(&id) {
				continue;
			}
			let line = summary::one_line_func_decl(&func.decl, MAX_DEPTH);
			self.buf.push_str(&line);
			self.buf.push('\n');
		}
	}

	/// Print a one-line summary for each exported type, followed by its
	/// grouped constants, variables, and constructors.
	fn type_summary(&mut self) {
		for t in 0..self.doc.types.len() {
			let typ = &self.doc.types[t];
			let Some(spec) = find_type_spec(&typ.decl, &typ.name) else {
				continue;
			};
			if !is_exported(&spec.name) {
				continue;
			}
			self.buf
				.push_str(&summary::one_line_type_spec(spec, MAX_DEPTH));
			self.buf.push('\n');

			let typ = &self.doc.types[t];
			for &id in typ.consts.iter().chain(&typ.vars) {
				let line = summary::one_line_gen_decl(&self.doc.value(id).decl, MAX_DEPTH);
				if !line.is_empty() {
					self.buf.push_str(INDENT);
					self.buf.push_str(&line);
					self.buf.push('\n');
				}
			}
			for &id in &typ.funcs {
				let constructor = self.doc.func(id);
				if !is_exported(&constructor.name) {
					continue;
				}
				let line = summary::one_line_func_decl(&constructor.decl, MAX_DEPTH);
				self.buf.push_str(INDENT);
				self.buf.push_str(&line);
				self.buf.push('\n');
			}
		}
	}

	/// Print the known-issue notes for the package.
	fn bugs(&mut self) {
		let Some(notes) = self.doc.notes.get("BUG") else {
			return;
		};
		self.buf.push('\n');
		for note in notes {
			self.buf.push_str(&format!("BUG: {}\n", note.body));
		}
	}

	/// The value groups binding a name matching the symbol.
	fn find_values(&self, symbol: &str, ids: &[ValueId]) -> Vec<ValueId> {
		ids.iter()
			.copied()
			.filter(|&id| {
				self.doc
					.value(id)
					.names
					.iter()
					.any(|name| matches(&self.cfg, symbol, name))
			})
			.collect()
	}

	/// The package-level functions matching the symbol.
	fn find_funcs(&self, symbol: &str) -> Vec<FuncId> {
		self.doc
			.funcs
			.iter()
			.copied()
			.filter(|&id| matches(&self.cfg, symbol, &self.doc.func(id).name))
			.collect()
	}

	/// The types matching the symbol. An empty symbol selects every exported
	/// type; for values and functions an empty symbol selects nothing.
	fn find_types(&self, symbol: &str) -> Vec<usize> {
		self.doc
			.types
			.iter()
			.enumerate()
			.filter(|(_, typ)| {
				(symbol.is_empty() && is_exported(&typ.name))
					|| matches(&self.cfg, symbol, &typ.name)
			})
			.map(|(t, _)| t)
			.collect()
	}

	fn symbol_doc_body(&mut self, symbol: &str) -> Result<bool> {
		let mut found = false;

		// Functions.
		for id in self.find_funcs(symbol) {
			let (decl, doc_text) = {
				let func = self.doc.func(id);
				let mut decl = func.decl.clone();
				// Signature only.
				decl.body = None;
				(decl, func.doc.clone())
			};
			if !found {
				self.package_clause(true);
			}
			self.emit(&doc_text, &Decl::Func(decl));
			found = true;
		}

		// Constants and variables behave the same.
		let mut value_ids = self.find_values(symbol, &self.doc.consts);
		value_ids.extend(self.find_values(symbol, &self.doc.vars));
		for id in value_ids {
			let Some((decl, doc_text)) = ({
				let value = self.doc.value(id);
				filtered_value_decl(&value.decl).map(|decl| (decl, value.doc.clone()))
			}) else {
				continue;
			};
			if !found {
				self.package_clause(true);
			}
			self.emit(&doc_text, &Decl::Gen(decl));
			found = true;
		}

		// Types.
		for t in self.find_types(symbol) {
			let (decl, doc_text, consts, vars, funcs, methods) = {
				let typ = &self.doc.types[t];
				let Some(spec) = find_type_spec(&typ.decl, &typ.name) else {
					return Err(Error::MissingTypeSpec {
						symbol: typ.name.clone(),
					});
				};
				let spec = trim_unexported_elems(&self.cfg, spec).into_owned();
				let decl = GenDecl {
					specs: vec![Spec::Type(spec)],
					..typ.decl.clone()
				};
				(
					decl,
					typ.doc.clone(),
					typ.consts.clone(),
					typ.vars.clone(),
					typ.funcs.clone(),
					typ.methods.clone(),
				)
			};
			if !found {
				self.package_clause(true);
			}
			self.emit(&doc_text, &Decl::Gen(decl));
			// Show the associated declarations.
			if !(consts.is_empty() && vars.is_empty() && funcs.is_empty() && methods.is_empty()) {
				self.buf.push('\n');
			}
			self.value_summary(&consts, true);
			self.value_summary(&vars, true);
			self.func_summary(&funcs, true);
			self.func_summary(&methods, true);
			found = true;
		}

		if !found {
			// Perhaps the symbol is a method name across the exported types.
			return self.print_method_doc("", symbol);
		}
		Ok(true)
	}

	fn print_method_doc(&mut self, symbol: &str, method: &str) -> Result<bool> {
		let types = self.find_types(symbol);
		if types.is_empty() {
			if symbol.is_empty() {
				return Ok(false);
			}
			return Err(Error::NotAType {
				symbol: symbol.to_string(),
				package: self.meta.name.clone(),
				import_path: self.meta.import_path.clone(),
			});
		}
		let mut found = false;
		for t in types {
			for id in self.doc.types[t].methods.clone() {
				let Some((decl, doc_text)) = ({
					let meth = self.doc.func(id);
					matches(&self.cfg, method, &meth.name).then(|| {
						let mut decl = meth.decl.clone();
						decl.body = None;
						(decl, meth.doc.clone())
					})
				}) else {
					continue;
				};
				self.emit(&doc_text, &Decl::Func(decl));
				found = true;
			}
		}
		Ok(found)
	}
}

/// The type spec within a declaration defining the symbol. The name must
/// match exactly.
fn find_type_spec<'a>(decl: &'a GenDecl, symbol: &str) -> Option<&'a TypeSpec> {
	decl.specs.iter().find_map(|spec| match spec {
		Spec::Type(typ) if typ.name == symbol => Some(typ),
		_ => None,
	})
}

/// Rebuild a value declaration keeping only the specs with at least one
/// exported name. A bare spec under an iota-style group gets the carried-over
/// type injected so it still reads correctly on its own. Returns `None` when
/// no spec survives.
fn filtered_value_decl(decl: &GenDecl) -> Option<GenDecl> {
	let mut specs = Vec::with_capacity(decl.specs.len());
	let mut carried: Option<Expr> = None;
	for spec in &decl.specs {
		let Spec::Value(value) = spec else { continue };
		// The type name may carry over from a previous spec in the case of
		// constants and iota.
		if value.typ.is_some() {
			carried = value.typ.clone();
		}
		if !value.names.iter().any(|name| is_exported(name)) {
			continue;
		}
		let mut value = value.clone();
		if value.typ.is_none()
			&& value.values.is_empty()
			&& let Some(typ) = &carried
		{
			value.typ = Some(Expr::Ident {
				name: summary::one_line_expr(typ, MAX_DEPTH),
			});
		}
		specs.push(Spec::Value(value));
		// Only inject the carried-over type on the first surviving spec.
		carried = None;
	}
	if specs.is_empty() {
		return None;
	}
	Some(GenDecl {
		tok: decl.tok,
		doc: decl.doc.clone(),
		grouped: decl.grouped,
		specs,
	})
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::syntax::{Tok, ValueSpec};

	fn empty_package(sink: Vec<u8>) -> Package<Vec<u8>> {
		let input = PackageInput::from_json(
			r#"{"package": {"name": "demo", "import_path": "example.com/demo"},
			    "file": {}}"#,
		)
		.expect("valid fixture");
		Package::new(input, "example.com/demo", Config::new(), sink)
	}

	#[test]
	fn test_newlines_appends_until_suffix_holds() {
		let mut pkg = empty_package(Vec::new());
		pkg.newlines(2);
		assert_eq!(pkg.buf, "\n\n");

		// Already satisfied: a no-op.
		pkg.newlines(2);
		assert_eq!(pkg.buf, "\n\n");

		pkg.buf = "text".to_string();
		pkg.newlines(1);
		assert_eq!(pkg.buf, "text\n");
		pkg.newlines(2);
		assert_eq!(pkg.buf, "text\n\n");
		pkg.newlines(1);
		assert_eq!(pkg.buf, "text\n\n");
	}

	#[test]
	fn test_package_clause_respects_user_path() {
		let mut pkg = empty_package(Vec::new());
		// The user path equals the import path: suppressed for symbols.
		pkg.package_clause(true);
		assert_eq!(pkg.buf, "");
		pkg.package_clause(false);
		assert_eq!(pkg.buf, "package demo // import \"example.com/demo\"\n\n");
	}

	#[test]
	fn test_package_clause_warns_on_canonical_path() {
		let input = PackageInput::from_json(
			r#"{"package": {"name": "demo",
			                "import_path": "example.com/mirror/demo",
			                "import_comment": "example.com/demo"},
			    "file": {}}"#,
		)
		.expect("valid fixture");
		let mut pkg = Package::new(input, "demo", Config::new(), Vec::new());
		pkg.package_clause(false);
		assert_eq!(
			pkg.buf,
			"package demo // import \"example.com/demo\"\n\n\
			 WARNING: package source is installed in \"example.com/mirror/demo\"\n"
		);
	}

	#[test]
	fn test_filtered_value_decl_injects_carried_type() {
		let decl = GenDecl {
			tok: Tok::Const,
			doc: None,
			grouped: true,
			specs: vec![
				Spec::Value(ValueSpec {
					doc: None,
					names: vec!["a".into()],
					typ: Some(Expr::Ident {
						name: "Weekday".into(),
					}),
					values: vec![Expr::Lit {
						value: "iota".into(),
					}],
				}),
				Spec::Value(ValueSpec {
					doc: None,
					names: vec!["Monday".into()],
					typ: None,
					values: Vec::new(),
				}),
			],
		};
		let filtered = filtered_value_decl(&decl).expect("one spec survives");
		assert_eq!(filtered.specs.len(), 1);
		let Spec::Value(value) = &filtered.specs[0] else {
			panic!("expected a value spec");
		};
		assert_eq!(value.names, vec!["Monday".to_string()]);
		assert_eq!(
			value.typ,
			Some(Expr::Ident {
				name: "Weekday".into()
			})
		);
	}

	#[test]
	fn test_filtered_value_decl_drops_unexported_only_groups() {
		let decl = GenDecl {
			tok: Tok::Var,
			doc: None,
			grouped: false,
			specs: vec![Spec::Value(ValueSpec {
				doc: None,
				names: vec!["x".into(), "y".into()],
				typ: None,
				values: Vec::new(),
			})],
		};
		assert!(filtered_value_decl(&decl).is_none());
	}
}
