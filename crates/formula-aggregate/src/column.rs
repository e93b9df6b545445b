use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Column types that can never be dragged into a dimension or measure slot.
pub const NOT_SUPPORTED_TYPES: [ColumnType; 2] = [ColumnType::Map, ColumnType::List];

/// Type tag attached to a catalog column.
///
/// Tags are matched exactly (catalogs emit upper-case tags). Anything unrecognized is kept
/// verbatim in [`ColumnType::Other`] and treated as a supported scalar type.
///
/// Equality, hashing and support are decided by [`ColumnType::tag`], so `Other("MAP")` behaves
/// exactly like `Map`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnType {
    Boolean,
    Integer,
    BigInt,
    Float,
    Double,
    Decimal,
    Varchar,
    Varbinary,
    Date,
    Time,
    Timestamp,
    Interval,
    Map,
    List,
    Struct,
    Geo,
    Mixed,
    Any,
    Other(String),
}

impl ColumnType {
    pub fn from_tag(tag: &str) -> Self {
        known_tag(tag).unwrap_or_else(|| ColumnType::Other(tag.to_string()))
    }

    pub fn tag(&self) -> &str {
        match self {
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Integer => "INTEGER",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Float => "FLOAT",
            ColumnType::Double => "DOUBLE",
            ColumnType::Decimal => "DECIMAL",
            ColumnType::Varchar => "VARCHAR",
            ColumnType::Varbinary => "VARBINARY",
            ColumnType::Date => "DATE",
            ColumnType::Time => "TIME",
            ColumnType::Timestamp => "TIMESTAMP",
            ColumnType::Interval => "INTERVAL",
            ColumnType::Map => "MAP",
            ColumnType::List => "LIST",
            ColumnType::Struct => "STRUCT",
            ColumnType::Geo => "GEO",
            ColumnType::Mixed => "MIXED",
            ColumnType::Any => "ANY",
            ColumnType::Other(tag) => tag,
        }
    }

    /// Whether columns of this type may be assigned to a dimension or a measure at all.
    pub fn is_supported(&self) -> bool {
        !NOT_SUPPORTED_TYPES.iter().any(|ty| ty.tag() == self.tag())
    }
}

impl PartialEq for ColumnType {
    fn eq(&self, other: &Self) -> bool {
        self.tag() == other.tag()
    }
}

impl Eq for ColumnType {}

impl Hash for ColumnType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag().hash(state);
    }
}

fn known_tag(tag: &str) -> Option<ColumnType> {
    let ty = match tag {
        "BOOLEAN" => ColumnType::Boolean,
        "INTEGER" => ColumnType::Integer,
        "BIGINT" => ColumnType::BigInt,
        "FLOAT" => ColumnType::Float,
        "DOUBLE" => ColumnType::Double,
        "DECIMAL" => ColumnType::Decimal,
        "VARCHAR" => ColumnType::Varchar,
        "VARBINARY" => ColumnType::Varbinary,
        "DATE" => ColumnType::Date,
        "TIME" => ColumnType::Time,
        "TIMESTAMP" => ColumnType::Timestamp,
        "INTERVAL" => ColumnType::Interval,
        "MAP" => ColumnType::Map,
        "LIST" => ColumnType::List,
        "STRUCT" => ColumnType::Struct,
        "GEO" => ColumnType::Geo,
        "MIXED" => ColumnType::Mixed,
        "ANY" => ColumnType::Any,
        _ => return None,
    };
    Some(ty)
}

impl From<String> for ColumnType {
    fn from(tag: String) -> Self {
        known_tag(&tag).unwrap_or(ColumnType::Other(tag))
    }
}

impl From<&str> for ColumnType {
    fn from(tag: &str) -> Self {
        ColumnType::from_tag(tag)
    }
}

impl From<ColumnType> for String {
    fn from(ty: ColumnType) -> Self {
        match ty {
            ColumnType::Other(tag) => tag,
            other => other.tag().to_string(),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One selectable data field of the current dataset.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: impl Into<ColumnType>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
        }
    }
}

/// Ordered, immutable list of every column available for the current dataset.
///
/// Clones share the same backing allocation. [`ColumnCatalog::same_as`] compares that
/// allocation, while `==` compares contents.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "Vec<Column>", into = "Vec<Column>")]
pub struct ColumnCatalog {
    columns: Arc<[Column]>,
}

impl ColumnCatalog {
    pub fn new(columns: impl IntoIterator<Item = Column>) -> Self {
        columns.into_iter().collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Identity comparison: true only when both catalogs share one allocation.
    pub fn same_as(&self, other: &ColumnCatalog) -> bool {
        Arc::ptr_eq(&self.columns, &other.columns)
    }
}

impl Default for ColumnCatalog {
    fn default() -> Self {
        Vec::<Column>::new().into()
    }
}

impl PartialEq for ColumnCatalog {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other) || self.columns[..] == other.columns[..]
    }
}

impl Eq for ColumnCatalog {}

impl From<Vec<Column>> for ColumnCatalog {
    fn from(columns: Vec<Column>) -> Self {
        Self {
            columns: columns.into(),
        }
    }
}

impl From<ColumnCatalog> for Vec<Column> {
    fn from(catalog: ColumnCatalog) -> Self {
        catalog.columns.to_vec()
    }
}

impl FromIterator<Column> for ColumnCatalog {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ColumnCatalog {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tags_round_trip_verbatim() {
        let ty = ColumnType::from_tag("UUID");
        assert_eq!(ty, ColumnType::Other("UUID".to_string()));
        assert!(ty.is_supported());
        assert_eq!(String::from(ty), "UUID");
    }

    #[test]
    fn tags_are_case_sensitive() {
        assert_eq!(ColumnType::from_tag("MAP"), ColumnType::Map);
        assert_eq!(ColumnType::from_tag("map"), ColumnType::Other("map".to_string()));
        assert!(ColumnType::from_tag("map").is_supported());
    }

    #[test]
    fn only_map_and_list_are_unsupported() {
        for ty in [ColumnType::Map, ColumnType::List] {
            assert!(!ty.is_supported(), "{ty} should be unsupported");
        }
        for tag in ["VARCHAR", "STRUCT", "ANY", "DECIMAL"] {
            assert!(ColumnType::from_tag(tag).is_supported(), "{tag} should be supported");
        }
    }

    #[test]
    fn other_with_a_known_tag_behaves_like_the_known_type() {
        for (other, known) in [("MAP", ColumnType::Map), ("LIST", ColumnType::List)] {
            let ty = ColumnType::Other(other.to_string());
            assert!(!ty.is_supported(), "{ty} should be unsupported");
            assert_eq!(ty, known);
        }
        assert_eq!(ColumnType::Other("VARCHAR".to_string()), ColumnType::Varchar);
        assert!(ColumnType::Other("VARCHAR".to_string()).is_supported());
    }

    #[test]
    fn clones_share_identity_but_rebuilds_do_not() {
        let a = ColumnCatalog::new([Column::new("a", "VARCHAR")]);
        let b = a.clone();
        let c = ColumnCatalog::new([Column::new("a", "VARCHAR")]);

        assert!(a.same_as(&b));
        assert!(!a.same_as(&c));
        assert_eq!(a, c);
    }

    #[test]
    fn catalog_lookup_by_name() {
        let catalog = ColumnCatalog::new([Column::new("a", "VARCHAR"), Column::new("b", "MAP")]);
        assert_eq!(catalog.get("b").map(|c| &c.column_type), Some(&ColumnType::Map));
        assert!(!catalog.contains("z"));
        assert_eq!(catalog.len(), 2);
    }
}
