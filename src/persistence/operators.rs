//! The five relational algebra operators over [`Table`].
//!
//! - project: keep a subset of the columns
//! - select: keep the rows matching a predicate, or a key through the index
//! - union / minus: combine two compatible tables
//! - join: equi-join on paired attribute lists
//!
//! None of them touch their inputs. Each returns a fresh table whose name is
//! derived from the left-hand table.

use log::{info, warn};

use super::index::KeyValue;
use super::schema::{DomainType, Schema};
use super::table::Table;
use super::tuple::Tuple;
use crate::error::RelationError;

impl Table {
    pub fn project(&self, attributes: &[&str]) -> Result<Table, RelationError> {
        //! Keep only `attributes`, in the given order, for every row.
        //!
        //! The original key survives when all of its attributes are kept;
        //! otherwise the projected attributes together become the key. Rows
        //! are not deduplicated.

        info!("RA> {}.project ({})", self.name(), attributes.join(" "));

        let mut columns = Vec::with_capacity(attributes.len());
        let mut positions = Vec::with_capacity(attributes.len());
        for attribute in attributes {
            let (position, domain) = self.attribute(attribute)?;
            columns.push((attribute.to_string(), domain));
            positions.push(position);
        }
        let schema = Schema::new(columns)?;

        let key = if self.key().iter().all(|k| attributes.contains(&k.as_str())) {
            self.key().to_vec()
        } else {
            attributes.iter().map(|name| name.to_string()).collect()
        };

        let rows = self
            .tuples()
            .iter()
            .map(|tuple| Tuple::new(tuple.pick(&positions)))
            .collect();

        self.derived(schema, key, rows)
    }

    pub fn project_str(&self, attributes: &str) -> Result<Table, RelationError> {
        //! [`Table::project`] with a space-separated attribute list.

        let attributes: Vec<&str> = attributes.split_whitespace().collect();
        self.project(&attributes)
    }

    pub fn select<F>(&self, predicate: F) -> Table
    where
        F: Fn(&Tuple) -> bool,
    {
        //! Keep the rows for which `predicate` holds, in table order.
        //!
        //! The rows go through the same indexing as an insert, so the result
        //! has its own consistent index.

        info!("RA> {}.select (<predicate>)", self.name());

        let rows = self
            .tuples()
            .iter()
            .filter(|tuple| predicate(tuple))
            .cloned()
            .collect();

        self.derived_like(rows)
    }

    pub fn select_key(&self, key: &KeyValue) -> Table {
        //! Keep the row(s) stored under `key` in the index.
        //!
        //! This is an ordered-map lookup rather than a scan. With a repeated
        //! key only the most recently inserted row is indexed, so the result
        //! can be smaller than a predicate select on the same key.

        info!("RA> {}.select ({})", self.name(), key);

        self.derived_like(self.lookup(key))
    }

    pub fn union(&self, other: &Table) -> Result<Table, RelationError> {
        //! Every row of this table, followed by the rows of `other` that are
        //! not equal to any row of this table.
        //!
        //! Only the left side is used for deduplication; repeated rows within
        //! `other` are all kept.

        info!("RA> {}.union ({})", self.name(), other.name());

        self.compatible(other)?;

        let mut rows: Vec<Tuple> = self.tuples().to_vec();
        rows.extend(
            other
                .tuples()
                .iter()
                .filter(|tuple| !self.tuples().contains(tuple))
                .cloned(),
        );

        Ok(self.derived_like(rows))
    }

    pub fn minus(&self, other: &Table) -> Result<Table, RelationError> {
        //! The rows of this table that are not equal to any row of `other`.

        info!("RA> {}.minus ({})", self.name(), other.name());

        self.compatible(other)?;

        let rows = self
            .tuples()
            .iter()
            .filter(|tuple| !other.tuples().contains(tuple))
            .cloned()
            .collect();

        Ok(self.derived_like(rows))
    }

    pub fn join(
        &self,
        attributes1: &[&str],
        attributes2: &[&str],
        other: &Table,
    ) -> Result<Table, RelationError> {
        //! Equi-join: pair every row of this table with every row of `other`
        //! where `attributes1[i] == attributes2[i]` for all `i`, and
        //! concatenate the pair.
        //!
        //! The output schema is this schema followed by `other`'s. A name from
        //! `other` that is already taken gets a numeric suffix, starting at
        //! `2` (`name` -> `name2` -> `name3` ...). The key is this table's key.

        info!(
            "RA> {}.join ({}, {}, {})",
            self.name(),
            attributes1.join(" "),
            attributes2.join(" "),
            other.name()
        );

        if attributes1.len() != attributes2.len() {
            return Err(RelationError::JoinArity {
                left: attributes1.len(),
                right: attributes2.len(),
            });
        }

        let left_positions = self.match_attributes(attributes1)?;
        let right_positions = other.match_attributes(attributes2)?;

        let mut columns: Vec<(String, DomainType)> = self
            .schema()
            .iter()
            .map(|(name, domain)| (name.clone(), *domain))
            .collect();
        for (name, domain) in other.schema().iter() {
            let name = disambiguate(name, &columns);
            columns.push((name, *domain));
        }
        let schema = Schema::new(columns)?;

        let mut rows = Vec::new();
        for left in self.tuples() {
            for right in other.tuples() {
                let matched = left_positions
                    .iter()
                    .zip(right_positions.iter())
                    .all(|(&l, &r)| left[l] == right[r]);

                if matched {
                    rows.push(left.concat(right));
                }
            }
        }

        self.derived(schema, self.key().to_vec(), rows)
    }

    pub fn join_str(
        &self,
        attributes1: &str,
        attributes2: &str,
        other: &Table,
    ) -> Result<Table, RelationError> {
        //! [`Table::join`] with space-separated attribute lists.

        let attributes1: Vec<&str> = attributes1.split_whitespace().collect();
        let attributes2: Vec<&str> = attributes2.split_whitespace().collect();
        self.join(&attributes1, &attributes2, other)
    }

    pub fn compatible(&self, other: &Table) -> Result<(), RelationError> {
        //! Check that both tables have the same arity and the same domain at
        //! every position. Attribute names are not compared.

        if self.schema().len() != other.schema().len() {
            let reason = format!(
                "tables have different arity ({} vs {})",
                self.schema().len(),
                other.schema().len()
            );
            warn!("compatible: {}", reason);
            return Err(RelationError::incompatible(self.name(), other.name(), reason));
        }

        for (position, (left, right)) in self
            .schema()
            .domains()
            .zip(other.schema().domains())
            .enumerate()
        {
            if left != right {
                let reason = RelationError::domain_disagreement(position, *left, *right);
                warn!("compatible: {}", reason);
                return Err(RelationError::incompatible(self.name(), other.name(), reason));
            }
        }

        Ok(())
    }

    fn match_attributes(&self, attributes: &[&str]) -> Result<Vec<usize>, RelationError> {
        //! Column positions of `attributes`; any unknown name fails the whole
        //! match.

        attributes
            .iter()
            .map(|attribute| self.attribute(attribute).map(|(position, _)| position))
            .collect()
    }

    fn attribute(&self, attribute: &str) -> Result<(usize, DomainType), RelationError> {
        self.schema()
            .iter()
            .enumerate()
            .find(|(_, (name, _))| name.as_str() == attribute)
            .map(|(position, (_, domain))| (position, *domain))
            .ok_or_else(|| RelationError::AttributeNotFound {
                table: self.name().to_string(),
                attribute: attribute.to_string(),
            })
    }
}

fn disambiguate(name: &str, taken: &[(String, DomainType)]) -> String {
    let is_taken = |candidate: &str| taken.iter().any(|(existing, _)| existing == candidate);

    if !is_taken(name) {
        return name.to_string();
    }

    let mut suffix = 2;
    loop {
        let candidate = format!("{}{}", name, suffix);
        if !is_taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
