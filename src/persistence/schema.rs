use std::fmt::Display;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::RelationError;

/// The declared type of an attribute.
///
/// A value is only ever accepted into a column of exactly its own domain;
/// there is no widening from [`DomainType::Integer`] to [`DomainType::Long`]
/// or from [`DomainType::Float`] to [`DomainType::Double`].
///
/// The declaration order doubles as the order between values of different
/// domains, see [`super::Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DomainType {
    Integer,
    Long,
    Short,
    Byte,
    Double,
    Float,
    Character,
    String,
}

impl DomainType {
    pub const ALL: [DomainType; 8] = [
        DomainType::Integer,
        DomainType::Long,
        DomainType::Short,
        DomainType::Byte,
        DomainType::Double,
        DomainType::Float,
        DomainType::Character,
        DomainType::String,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DomainType::Integer => "Integer",
            DomainType::Long => "Long",
            DomainType::Short => "Short",
            DomainType::Byte => "Byte",
            DomainType::Double => "Double",
            DomainType::Float => "Float",
            DomainType::Character => "Character",
            DomainType::String => "String",
        }
    }
}

impl Display for DomainType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DomainType {
    type Err = RelationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DomainType::ALL
            .iter()
            .find(|domain| domain.name() == s)
            .copied()
            .ok_or_else(|| {
                RelationError::InvalidDefinition(format!("invalid datatype {}: not supported", s))
            })
    }
}

/// Ordered attribute names with their domains.
///
/// Backed by an [`IndexMap`] so the column order is the insertion order and
/// names stay unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema(IndexMap<String, DomainType>);

impl Schema {
    pub fn new(columns: Vec<(String, DomainType)>) -> Result<Schema, RelationError> {
        //! Create a schema from a vector of attribute names and their
        //! [`DomainType`]s, in column order.
        //!
        //! Fails on an empty column list or a repeated attribute name.

        if columns.is_empty() {
            return Err(RelationError::InvalidDefinition(String::from(
                "0 attributes does not make a schema",
            )));
        }

        let mut schema = IndexMap::with_capacity(columns.len());
        for (name, domain) in columns {
            if schema.contains_key(&name) {
                return Err(RelationError::InvalidDefinition(format!(
                    "duplicate attribute {}",
                    name
                )));
            }
            schema.insert(name, domain);
        }

        Ok(Schema(schema))
    }

    pub fn parse(attributes: &str, domains: &str) -> Result<Schema, RelationError> {
        //! Build a schema from the space-separated forms, e.g.
        //! `"title year"` and `"String Integer"`.

        let names: Vec<&str> = attributes.split_whitespace().collect();
        let domains = domains
            .split_whitespace()
            .map(DomainType::from_str)
            .collect::<Result<Vec<_>, _>>()?;

        if names.len() != domains.len() {
            return Err(RelationError::InvalidDefinition(format!(
                "{} attribute(s) but {} domain(s)",
                names.len(),
                domains.len()
            )));
        }

        Schema::new(
            names
                .into_iter()
                .map(String::from)
                .zip(domains)
                .collect(),
        )
    }

    pub fn get(&self, index: usize) -> Option<(&String, &DomainType)> {
        //! Get the attribute name and its domain at column `index`.

        self.0.get_index(index)
    }

    pub fn position(&self, attribute: &str) -> Option<usize> {
        self.0.get_index_of(attribute)
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.0.contains_key(attribute)
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn domains(&self) -> impl Iterator<Item = &DomainType> {
        self.0.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &DomainType)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let schema: Vec<String> = self
            .0
            .iter()
            .map(|(name, domain)| format!("{} ({})", name, domain))
            .collect();
        write!(f, "{}", schema.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_space_separated_definition() {
        let schema = Schema::parse("title year", "String Integer").unwrap();

        assert_eq!(schema.len(), 2);
        assert_eq!(schema.position("year"), Some(1));
        assert_eq!(schema.get(0), Some((&"title".to_string(), &DomainType::String)));
    }

    #[test]
    fn rejects_unknown_domain() {
        assert!(Schema::parse("id", "Decimal").is_err());
    }

    #[test]
    fn rejects_duplicate_attribute() {
        assert!(Schema::parse("id id", "Integer Integer").is_err());
    }

    #[test]
    fn rejects_count_disagreement() {
        assert!(Schema::parse("id name", "Integer").is_err());
    }

    #[test]
    fn domain_names_round_trip() {
        for domain in DomainType::ALL {
            assert_eq!(domain.name().parse::<DomainType>().unwrap(), domain);
        }
    }
}
