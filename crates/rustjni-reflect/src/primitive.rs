//! Primitive type maps between the native and host sides
//!
//! Every [`PrimitiveType`] has one native spelling and one spelling per host
//! [`Dialect`]. Anything that is not in the table resolves to
//! [`TypeResolution::Opaque`], which keeps the original text but behaves as
//! the opaque-object tag. That direction is lossy: an opaque host type
//! renders back as `jobject`, and `jobject` renders as `Any` / `Object`.

use std::fmt;

/// Semantic type tag shared by both sides of the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveType {
    Int,
    Long,
    Boolean,
    Byte,
    Char,
    Double,
    Float,
    Short,
    String,
    Object,
    Void,
}

/// Host source syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Kotlin,
    Java,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::Kotlin, Dialect::Java];

    /// Select the dialect from a source file extension (`kt` / `java`)
    pub fn from_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("kt") {
            Some(Self::Kotlin)
        } else if ext.eq_ignore_ascii_case("java") {
            Some(Self::Java)
        } else {
            None
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            Self::Kotlin => "kt",
            Self::Java => "java",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kotlin => f.write_str("Kotlin"),
            Self::Java => f.write_str("Java"),
        }
    }
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 11] = [
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Boolean,
        PrimitiveType::Byte,
        PrimitiveType::Char,
        PrimitiveType::Double,
        PrimitiveType::Float,
        PrimitiveType::Short,
        PrimitiveType::String,
        PrimitiveType::Object,
        PrimitiveType::Void,
    ];

    /// Tag name used in diagnostics
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Int => "int32",
            Self::Long => "int64",
            Self::Boolean => "boolean",
            Self::Byte => "int8",
            Self::Char => "char16",
            Self::Double => "float64",
            Self::Float => "float32",
            Self::Short => "int16",
            Self::String => "utf16-string",
            Self::Object => "opaque-object",
            Self::Void => "void",
        }
    }

    /// Native spelling; `None` for void, which has no return clause
    pub fn native_name(&self) -> Option<&'static str> {
        match self {
            Self::Int => Some("jint"),
            Self::Long => Some("jlong"),
            Self::Boolean => Some("jboolean"),
            Self::Byte => Some("jbyte"),
            Self::Char => Some("jchar"),
            Self::Double => Some("jdouble"),
            Self::Float => Some("jfloat"),
            Self::Short => Some("jshort"),
            Self::String => Some("jstring"),
            Self::Object => Some("jobject"),
            Self::Void => None,
        }
    }

    pub fn host_name(&self, dialect: Dialect) -> &'static str {
        match dialect {
            Dialect::Kotlin => match self {
                Self::Int => "Int",
                Self::Long => "Long",
                Self::Boolean => "Boolean",
                Self::Byte => "Byte",
                Self::Char => "Char",
                Self::Double => "Double",
                Self::Float => "Float",
                Self::Short => "Short",
                Self::String => "String",
                Self::Object => "Any",
                Self::Void => "Unit",
            },
            Dialect::Java => match self {
                Self::Int => "int",
                Self::Long => "long",
                Self::Boolean => "boolean",
                Self::Byte => "byte",
                Self::Char => "char",
                Self::Double => "double",
                Self::Float => "float",
                Self::Short => "short",
                Self::String => "String",
                Self::Object => "Object",
                Self::Void => "void",
            },
        }
    }

    /// Placeholder expression returned by generated native stubs.
    ///
    /// Strings are built through the environment and are not a literal, so
    /// they have no sample here; neither do void and opaque objects.
    pub fn sample_value(&self) -> Option<&'static str> {
        match self {
            Self::Int => Some("42"),
            Self::Long => Some("1234567890"),
            Self::Boolean => Some("jni::sys::JNI_TRUE"),
            Self::Byte => Some("42"),
            Self::Char => Some("'A' as jchar"),
            Self::Double => Some("3.14159"),
            Self::Float => Some("2.71828"),
            Self::Short => Some("32767"),
            Self::String | Self::Object | Self::Void => None,
        }
    }

    /// Resolve a native spelling.
    ///
    /// Path-qualified spellings (`jni::sys::jint`) resolve by their last
    /// segment. An empty spelling is void.
    pub fn from_native(spelling: &str) -> TypeResolution {
        let trimmed = spelling.trim();
        if trimmed.is_empty() {
            return TypeResolution::Exact(Self::Void);
        }

        let last = trimmed.rsplit("::").next().unwrap_or(trimmed).trim();
        Self::ALL
            .iter()
            .find(|t| t.native_name() == Some(last))
            .map(|t| TypeResolution::Exact(*t))
            .unwrap_or_else(|| TypeResolution::Opaque(trimmed.to_string()))
    }

    /// Resolve a host spelling.
    ///
    /// The dialect's own spelling is matched exactly first, then any
    /// dialect's spelling case-insensitively (so `Int` is accepted in Java
    /// sources and `boolean` in Kotlin ones). Nullable markers are ignored.
    pub fn from_host(spelling: &str, dialect: Dialect) -> TypeResolution {
        let trimmed = spelling.trim().trim_end_matches('?').trim();
        if trimmed.is_empty() {
            return TypeResolution::Exact(Self::Void);
        }

        if let Some(t) = Self::ALL.iter().find(|t| t.host_name(dialect) == trimmed) {
            return TypeResolution::Exact(*t);
        }

        Self::ALL
            .iter()
            .find(|t| {
                Dialect::ALL
                    .iter()
                    .any(|d| t.host_name(*d).eq_ignore_ascii_case(trimmed))
            })
            .map(|t| TypeResolution::Exact(*t))
            .unwrap_or_else(|| TypeResolution::Opaque(trimmed.to_string()))
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Outcome of resolving a spelling against the type table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeResolution {
    /// Spelling found in the table
    Exact(PrimitiveType),
    /// Unknown spelling, kept verbatim; behaves as the opaque-object tag
    Opaque(String),
}

impl TypeResolution {
    /// Semantic tag used for comparison
    pub fn tag(&self) -> PrimitiveType {
        match self {
            Self::Exact(t) => *t,
            Self::Opaque(_) => PrimitiveType::Object,
        }
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, Self::Opaque(_))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Self::Exact(PrimitiveType::Void))
    }

    /// Native spelling for generated code
    pub fn native_name(&self) -> Option<&'static str> {
        self.tag().native_name()
    }

    /// Host spelling for generated code
    pub fn host_name(&self, dialect: Dialect) -> &'static str {
        self.tag().host_name(dialect)
    }

    /// Spelling as it was originally written (table spelling for exact matches)
    pub fn describe(&self, dialect: Dialect) -> String {
        match self {
            Self::Exact(t) => t.host_name(dialect).to_string(),
            Self::Opaque(raw) => raw.clone(),
        }
    }
}

impl From<PrimitiveType> for TypeResolution {
    fn from(t: PrimitiveType) -> Self {
        Self::Exact(t)
    }
}
