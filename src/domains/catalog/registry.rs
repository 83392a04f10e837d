//! Function Registry - the fixed set of callable calculation functions.
//!
//! Functions are registered at compile time through [`fi_library!`], which
//! reads each function's signature and doc comments and produces a
//! [`FunctionEntry`]. [`discover`] collects the entries into a name-keyed
//! map once at startup.
//!
//! [`fi_library!`]: crate::fi_library

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use tracing::{debug, warn};

use super::error::InvocationError;
use super::types::{ArgType, TypeDescriptor};

/// Leading character that marks a function as internal.
pub const PRIVATE_MARKER: char = '_';

/// Positional entry point generated for each registered function.
pub type Invoker = fn(&[Value]) -> Result<String, InvocationError>;

/// Name-keyed map of every discovered function.
pub type Registry = BTreeMap<String, FunctionEntry>;

/// Structural description of one function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    /// Parameter name as declared.
    pub name: &'static str,

    /// Declared type.
    pub kind: TypeDescriptor,

    /// Declared default, in protocol form.
    pub default: Option<Value>,

    /// Zero-based position in the call.
    pub position: usize,
}

impl ParameterSpec {
    /// Create a required parameter. Position is assigned on registration.
    pub fn new(name: &'static str, kind: TypeDescriptor) -> Self {
        Self {
            name,
            kind,
            default: None,
            position: 0,
        }
    }

    /// Attach a default value, making the parameter optional.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// A parameter is required iff it declares no default.
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// A registered function: identity, signature, documentation and entry point.
#[derive(Clone)]
pub struct FunctionEntry {
    name: &'static str,
    doc: Option<&'static str>,
    params: Vec<ParameterSpec>,
    invoker: Invoker,
}

impl FunctionEntry {
    /// Create an entry. Blank documentation is recorded as absent.
    pub fn new(
        name: &'static str,
        raw_doc: &'static str,
        params: Vec<ParameterSpec>,
        invoker: Invoker,
    ) -> Self {
        let params = params
            .into_iter()
            .enumerate()
            .map(|(position, spec)| ParameterSpec { position, ..spec })
            .collect();

        Self {
            name,
            doc: Some(raw_doc).filter(|doc| !doc.trim().is_empty()),
            params,
            invoker,
        }
    }

    /// The function name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Raw documentation text, if any.
    pub fn doc(&self) -> Option<&'static str> {
        self.doc
    }

    /// Parameters in declaration order.
    pub fn params(&self) -> &[ParameterSpec] {
        &self.params
    }

    /// The generated positional entry point.
    pub fn invoker(&self) -> Invoker {
        self.invoker
    }

    /// Call the function with a positional argument list.
    pub fn invoke(&self, args: &[Value]) -> Result<String, InvocationError> {
        (self.invoker)(args)
    }
}

impl fmt::Debug for FunctionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionEntry")
            .field("name", &self.name)
            .field("documented", &self.doc.is_some())
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Discover every public function of the calculation library.
pub fn discover() -> Registry {
    discover_from(crate::domains::library::exports())
}

/// Build a registry from raw entries.
///
/// Names starting with [`PRIVATE_MARKER`] are skipped. The first entry
/// registered under a name wins.
pub fn discover_from(entries: impl IntoIterator<Item = FunctionEntry>) -> Registry {
    let mut registry = Registry::new();

    for entry in entries {
        if entry.name().starts_with(PRIVATE_MARKER) {
            debug!("Skipping internal function: {}", entry.name());
            continue;
        }
        if registry.contains_key(entry.name()) {
            warn!("Duplicate function name ignored: {}", entry.name());
            continue;
        }
        registry.insert(entry.name().to_string(), entry);
    }

    registry
}

/// Pull the next positional argument and convert it.
///
/// Used by code generated through [`fi_library!`](crate::fi_library).
#[doc(hidden)]
pub fn next_arg<'a, T: ArgType>(
    args: &mut impl Iterator<Item = &'a Value>,
    name: &str,
) -> Result<T, InvocationError> {
    let value = args
        .next()
        .ok_or_else(|| InvocationError::Unbound(name.to_string()))?;
    Ok(T::from_arg(name, value)?)
}

/// Declare library functions and their registration entries.
///
/// Each function's `///` lines become its raw documentation, its
/// parameters become [`ParameterSpec`]s (a trailing `= expr` declares a
/// typed default), and a positional invoker converts bound arguments back
/// into the declared Rust types. Functions return `Result<T, E>` with
/// `T: Display` and `E: Display`.
///
/// The invocation also generates `pub fn exports() -> Vec<FunctionEntry>`
/// for the enclosing module.
#[macro_export]
macro_rules! fi_library {
    ($(
        $(#[doc = $doc:literal])*
        pub fn $name:ident($($param:ident: $ty:ty $(= $default:expr)?),* $(,)?) -> $ret:ty $body:block
    )*) => {
        $(
            $(#[doc = $doc])*
            pub fn $name($($param: $ty),*) -> $ret $body
        )*

        /// Registration entries for every function declared in this module.
        pub fn exports() -> Vec<$crate::domains::catalog::FunctionEntry> {
            vec![$(
                $crate::domains::catalog::FunctionEntry::new(
                    stringify!($name),
                    concat!($($doc, "\n"),*),
                    vec![$(
                        $crate::domains::catalog::ParameterSpec::new(
                            stringify!($param),
                            <$ty as $crate::domains::catalog::ArgType>::descriptor(),
                        )
                        $(.with_default(<$ty as $crate::domains::catalog::ArgType>::to_arg(&$default)))?
                    ),*],
                    |args: &[::serde_json::Value]| {
                        let expected = [$(stringify!($param)),*].len();
                        if args.len() != expected {
                            return Err($crate::domains::catalog::InvocationError::Arity {
                                expected,
                                received: args.len(),
                            });
                        }
                        let mut args = args.iter();
                        $(
                            let $param: $ty =
                                $crate::domains::catalog::next_arg(&mut args, stringify!($param))?;
                        )*
                        $name($($param),*)
                            .map(|value| value.to_string())
                            .map_err(|err| {
                                $crate::domains::catalog::InvocationError::Calculation(err.to_string())
                            })
                    },
                ),
            )*]
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(name: &'static str) -> FunctionEntry {
        FunctionEntry::new(name, " Does a thing.\n", vec![], |_| Ok(String::new()))
    }

    #[test]
    fn test_discover_finds_library_functions() {
        let registry = discover();
        assert!(!registry.is_empty());
        assert!(registry.contains_key("future_value"));
        assert!(registry.contains_key("take_home_pay"));
        assert!(registry.keys().all(|name| !name.starts_with(PRIVATE_MARKER)));
    }

    #[test]
    fn test_discover_is_idempotent() {
        let first: Vec<String> = discover().into_keys().collect();
        let second: Vec<String> = discover().into_keys().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_private_names_are_excluded() {
        let registry = discover_from([entry("public_one"), entry("_helper"), entry("other")]);
        let names: Vec<_> = registry.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["other", "public_one"]);
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let first = FunctionEntry::new("dup", "First.", vec![], |_| Ok("1".into()));
        let second = FunctionEntry::new("dup", "Second.", vec![], |_| Ok("2".into()));
        let registry = discover_from([first, second]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry["dup"].invoke(&[]), Ok("1".to_string()));
    }

    #[test]
    fn test_positions_follow_declaration_order() {
        let entry = FunctionEntry::new(
            "f",
            "",
            vec![
                ParameterSpec::new("a", TypeDescriptor::Number),
                ParameterSpec::new("b", TypeDescriptor::Integer).with_default(json!(3)),
            ],
            |_| Ok(String::new()),
        );
        let positions: Vec<_> = entry.params().iter().map(|p| (p.name, p.position)).collect();
        assert_eq!(positions, vec![("a", 0), ("b", 1)]);
        assert!(entry.params()[0].is_required());
        assert!(!entry.params()[1].is_required());
        assert!(entry.doc().is_none());
    }

    #[test]
    fn test_generated_entry_matches_signature() {
        let registry = discover();
        let entry = &registry["future_value"];
        let names: Vec<_> = entry.params().iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec!["present_value", "annual_rate", "periods_per_year", "years"]
        );
        assert_eq!(entry.params()[2].default, Some(json!(1)));
        assert!(entry.doc().is_some_and(|doc| doc.contains("### Args:")));
    }

    #[test]
    fn test_generated_invoker_checks_arity() {
        let registry = discover();
        let result = registry["future_value"].invoke(&[json!(1000)]);
        assert_eq!(
            result,
            Err(InvocationError::Arity {
                expected: 4,
                received: 1
            })
        );
    }
}
