//! Domain types shared by the store and search crates.

use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A loosely-typed record as returned by a store.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// The logical document kinds that can be searched.
///
/// The declaration order is the registration order used whenever results from
/// several categories are laid out side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Users,
    Jobs,
    QuickJobs,
    BusinessServices,
    Discover,
    Articles,
}

const COMMON_FIELDS: &[&str] = &["_id", "createdAt", "updatedAt", "__v"];

const USER_FIELDS: &[&str] = &[
    "fullName",
    "username",
    "email",
    "phone",
    "password",
    "otp",
    "resetPasswordToken",
    "jobTitle",
    "bio",
    "skills",
    "location",
    "address.city",
    "address.country",
    "profilePicture",
    "followers",
    "following",
    "role",
];

const JOB_FIELDS: &[&str] = &[
    "title",
    "description",
    "companyName",
    "location",
    "skills",
    "jobType",
    "category",
    "salary.min",
    "salary.max",
    "salary.currency",
    "postedBy",
    "applicants",
    "status",
];

const QUICK_JOB_FIELDS: &[&str] = &[
    "title",
    "description",
    "location",
    "category",
    "skills",
    "budget",
    "duration",
    "postedBy",
    "status",
];

const BUSINESS_SERVICE_FIELDS: &[&str] = &[
    "serviceName",
    "description",
    "category",
    "tags",
    "location",
    "price",
    "provider.name",
    "provider.email",
    "images",
];

const DISCOVER_FIELDS: &[&str] = &[
    "title",
    "description",
    "content",
    "category",
    "tags",
    "media",
    "author",
    "likes",
];

const ARTICLE_FIELDS: &[&str] = &[
    "title",
    "summary",
    "content",
    "author",
    "tags",
    "coverImage",
    "readTime",
];

impl Category {
    /// Every category, in registration order.
    pub const ALL: [Category; 6] = [
        Category::Users,
        Category::Jobs,
        Category::QuickJobs,
        Category::BusinessServices,
        Category::Discover,
        Category::Articles,
    ];

    /// Wire name used in query strings, file names and response keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Users => "users",
            Category::Jobs => "jobs",
            Category::QuickJobs => "quickJobs",
            Category::BusinessServices => "businessServices",
            Category::Discover => "discover",
            Category::Articles => "articles",
        }
    }

    /// Fields specific to this category, excluding the bookkeeping fields every record carries.
    fn own_fields(self) -> &'static [&'static str] {
        match self {
            Category::Users => USER_FIELDS,
            Category::Jobs => JOB_FIELDS,
            Category::QuickJobs => QUICK_JOB_FIELDS,
            Category::BusinessServices => BUSINESS_SERVICE_FIELDS,
            Category::Discover => DISCOVER_FIELDS,
            Category::Articles => ARTICLE_FIELDS,
        }
    }

    /// The closed set of dot-paths a record of this category may carry.
    pub fn known_fields(self) -> impl Iterator<Item = &'static str> {
        COMMON_FIELDS.iter().chain(self.own_fields().iter()).copied()
    }

    pub fn is_known_field(self, name: &str) -> bool {
        self.known_fields().any(|f| f == name)
    }

    /// Resolve a field name into a checked [`FieldPath`].
    ///
    /// This is the only way to obtain a `FieldPath`, so every path that reaches
    /// a store or the scorer has been validated against the category schema.
    pub fn field(self, name: &str) -> Result<FieldPath> {
        if self.is_known_field(name) {
            Ok(FieldPath::new(name))
        } else {
            Err(Error::UnknownField { category: self, field: name.to_string() })
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

/// A validated dot-notation path into a document (e.g. `salary.currency`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    fn new(raw: &str) -> Self {
        Self { raw: raw.to_string(), segments: raw.split('.').map(str::to_string).collect() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// Selection criteria understood by every [`crate::traits::DocumentStore`].
#[derive(Debug, Clone)]
pub enum Filter {
    /// The field's text (or any element of an array-valued field) matches the pattern.
    Matches { field: FieldPath, pattern: Regex },
    /// At least one branch matches. An empty disjunction matches nothing.
    Or(Vec<Filter>),
}

impl Filter {
    /// Disjunction of `field matches pattern` over every given field.
    pub fn any_field_matches(fields: &[FieldPath], pattern: &Regex) -> Self {
        Filter::Or(
            fields
                .iter()
                .map(|field| Filter::Matches { field: field.clone(), pattern: pattern.clone() })
                .collect(),
        )
    }
}

/// Paging and projection for `find`.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    pub skip: usize,
    pub limit: Option<usize>,
    pub exclude: Vec<FieldPath>,
}
