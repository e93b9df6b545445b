use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Ordered, immutable list of column references (by name) assigned to one drop target.
///
/// Like [`crate::ColumnCatalog`], clones share identity and [`FieldList::same_as`] compares
/// that identity.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct FieldList {
    names: Arc<[String]>,
}

impl FieldList {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(Into::<String>::into).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.iter().any(|n| n == name)
    }

    pub fn same_as(&self, other: &FieldList) -> bool {
        Arc::ptr_eq(&self.names, &other.names)
    }
}

impl Default for FieldList {
    fn default() -> Self {
        Vec::<String>::new().into()
    }
}

impl PartialEq for FieldList {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other) || self.names[..] == other.names[..]
    }
}

impl Eq for FieldList {}

impl From<Vec<String>> for FieldList {
    fn from(names: Vec<String>) -> Self {
        Self {
            names: names.into(),
        }
    }
}

impl From<FieldList> for Vec<String> {
    fn from(list: FieldList) -> Self {
        list.names.to_vec()
    }
}

impl FromIterator<String> for FieldList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

/// The user's current assignment of columns into the dimension and measure drop targets.
///
/// A column may appear in both lists when the policy allows it. Names that no longer exist in
/// the catalog are tolerated; classification only walks the catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAssignment {
    pub dimension_columns: FieldList,
    pub measure_columns: FieldList,
}

impl FieldAssignment {
    pub fn new(dimension_columns: FieldList, measure_columns: FieldList) -> Self {
        Self {
            dimension_columns,
            measure_columns,
        }
    }
}
