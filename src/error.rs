use std::fmt;

use serde_json::Error as SerdeError;

/// Aggregate errors produced by the pkgdoc core.
///
/// Only unrecoverable conditions live here. A query that simply finds no
/// matching symbol is reported as an empty/false result, not an error.
#[derive(Debug)]
pub enum Error {
	/// Failed to perform IO operations on the input or the output sink.
	Io(std::io::Error),
	/// Failed to decode a package description document.
	Parse(SerdeError),
	/// A method query named a symbol that is not a type in the package.
	NotAType {
		/// The symbol the user asked about.
		symbol: String,
		/// Name of the package that was searched.
		package: String,
		/// Resolved import path of the package.
		import_path: String,
	},
	/// A resolved type carries no matching type spec in its declaration.
	MissingTypeSpec {
		/// Name of the type whose spec is missing.
		symbol: String,
	},
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Io(err) => write!(f, "{err}"),
			Self::Parse(err) => write!(f, "{err}"),
			Self::NotAType {
				symbol,
				package,
				import_path,
			} => write!(
				f,
				"symbol {symbol} is not a type in package {package} installed in {import_path:?}"
			),
			Self::MissingTypeSpec { symbol } => {
				write!(f, "symbol {symbol} is a type but has no type declaration")
			}
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Io(err) => Some(err),
			Self::Parse(err) => Some(err),
			Self::NotAType { .. } | Self::MissingTypeSpec { .. } => None,
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<SerdeError> for Error {
	fn from(err: SerdeError) -> Self {
		Self::Parse(err)
	}
}

/// Result type returned by the pkgdoc library.
pub type Result<T> = std::result::Result<T, Error>;
