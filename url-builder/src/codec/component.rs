use crate::{
    chars_sets::{
        SafeCharSet, FRAGMENT, MATRIX_PARAM, PATH_SEGMENT, QUERY_PARAM, REG_NAME,
        UNSTRUCTURED_QUERY,
    },
    codec::{Charset, ErrorPolicy, PercentEncoder},
};
use std::fmt;

/// The parts of a URL that are escaped with different safe sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// A registered host name such as `foo.com`.
    RegName,
    /// One `/`-delimited path segment, without its matrix params.
    PathSegment,
    /// A key or value of a `;key=value` matrix param.
    MatrixParam,
    /// A query that is not `key=value` pairs.
    UnstructuredQuery,
    /// A key or value of a `key=value` query pair.
    QueryParam,
    Fragment,
}

impl Component {
    pub const ALL: [Component; 6] = [
        Component::RegName,
        Component::PathSegment,
        Component::MatrixParam,
        Component::UnstructuredQuery,
        Component::QueryParam,
        Component::Fragment,
    ];

    pub fn safe_chars(self) -> &'static SafeCharSet {
        match self {
            Component::RegName => &REG_NAME,
            Component::PathSegment => &PATH_SEGMENT,
            Component::MatrixParam => &MATRIX_PARAM,
            Component::UnstructuredQuery => &UNSTRUCTURED_QUERY,
            Component::QueryParam => &QUERY_PARAM,
            Component::Fragment => &FRAGMENT,
        }
    }

    /// A UTF-8 encoder that replaces anything it can't encode.
    pub fn encoder(self) -> PercentEncoder<'static> {
        self.encoder_with(Charset::utf_8(), ErrorPolicy::Replace)
    }

    pub fn encoder_with(self, charset: Charset, policy: ErrorPolicy) -> PercentEncoder<'static> {
        PercentEncoder::new(self.safe_chars(), charset, policy)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::RegName => write!(f, "reg-name"),
            Component::PathSegment => write!(f, "path segment"),
            Component::MatrixParam => write!(f, "matrix param"),
            Component::UnstructuredQuery => write!(f, "unstructured query"),
            Component::QueryParam => write!(f, "query param"),
            Component::Fragment => write!(f, "fragment"),
        }
    }
}
