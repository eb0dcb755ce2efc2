use super::Selector;
use crate::errors::{DesignError, DesignResult, ErrorKind};
use serde_json::{Map, Value};

/// Starts a selector condition on the given field.
///
/// # Arguments
///
/// * `field_name` - The field to test, dotted paths such as `"address.city"` included
///
/// # Returns
///
/// A `FieldSelector` whose methods produce the finished [`Selector`]
pub fn field(field_name: &str) -> FieldSelector {
    FieldSelector {
        field_name: field_name.to_string(),
    }
}

/// A fluent builder for a condition on a single field.
///
/// Each method consumes the builder and returns a selector of the form
/// `{"<field>": {"<operator>": <argument>}}`.
pub struct FieldSelector {
    field_name: String,
}

impl FieldSelector {
    /// Matches documents where the field equals `value` (`$eq`).
    #[inline]
    pub fn eq<T: Into<Value>>(self, value: T) -> Selector {
        self.condition("$eq", value.into())
    }

    /// Matches documents where the field differs from `value` (`$ne`).
    #[inline]
    pub fn ne<T: Into<Value>>(self, value: T) -> Selector {
        self.condition("$ne", value.into())
    }

    /// Matches documents where the field is greater than `value` (`$gt`).
    #[inline]
    pub fn gt<T: Into<Value>>(self, value: T) -> Selector {
        self.condition("$gt", value.into())
    }

    /// Matches documents where the field is greater than or equal to `value` (`$gte`).
    #[inline]
    pub fn gte<T: Into<Value>>(self, value: T) -> Selector {
        self.condition("$gte", value.into())
    }

    /// Matches documents where the field is less than `value` (`$lt`).
    #[inline]
    pub fn lt<T: Into<Value>>(self, value: T) -> Selector {
        self.condition("$lt", value.into())
    }

    /// Matches documents where the field is less than or equal to `value` (`$lte`).
    #[inline]
    pub fn lte<T: Into<Value>>(self, value: T) -> Selector {
        self.condition("$lte", value.into())
    }

    /// Matches documents where the field is present (`true`) or missing (`false`).
    pub fn exists(self, exists: bool) -> Selector {
        self.condition("$exists", Value::Bool(exists))
    }

    /// Matches documents where the field has the given JSON type, such as `"string"`.
    pub fn type_of(self, type_name: &str) -> Selector {
        self.condition("$type", Value::from(type_name))
    }

    /// Matches documents where the field equals one of `values` (`$in`).
    ///
    /// # Errors
    /// Fails with `ErrorKind::InvalidSelector` when fewer than two values are given;
    /// use [`FieldSelector::eq`] for a single value.
    pub fn in_values<T: Into<Value>>(self, values: Vec<T>) -> DesignResult<Selector> {
        self.list_condition("$in", values)
    }

    /// Matches documents where the field equals none of `values` (`$nin`).
    pub fn not_in<T: Into<Value>>(self, values: Vec<T>) -> DesignResult<Selector> {
        self.list_condition("$nin", values)
    }

    /// Matches documents where the array field contains all of `values` (`$all`).
    pub fn all<T: Into<Value>>(self, values: Vec<T>) -> DesignResult<Selector> {
        self.list_condition("$all", values)
    }

    /// Matches documents where the array field has exactly `length` elements.
    pub fn size(self, length: u64) -> Selector {
        self.condition("$size", Value::from(length))
    }

    /// Matches documents where `field % divisor == remainder` (`$mod`).
    ///
    /// # Errors
    /// Fails with `ErrorKind::InvalidSelector` when `divisor` is zero.
    pub fn modulo(self, divisor: i64, remainder: i64) -> DesignResult<Selector> {
        if divisor == 0 {
            log::error!("Divisor of $mod on '{}' cannot be zero", self.field_name);
            return Err(DesignError::new(
                "Divisor of $mod cannot be zero",
                ErrorKind::InvalidSelector,
            ));
        }
        Ok(self.condition(
            "$mod",
            Value::Array(vec![Value::from(divisor), Value::from(remainder)]),
        ))
    }

    /// Matches documents where the string field matches the regular expression `pattern`.
    pub fn regex(self, pattern: &str) -> Selector {
        self.condition("$regex", Value::from(pattern))
    }

    /// Matches documents where at least one element of the array field satisfies every
    /// predicate (`$elemMatch`).
    ///
    /// # Errors
    /// Fails with `ErrorKind::InvalidSelector` when no predicate is given or when an
    /// operator appears twice.
    pub fn elem_match(self, predicates: Vec<PredicateExpression>) -> DesignResult<Selector> {
        if predicates.is_empty() {
            log::error!("$elemMatch on '{}' needs at least one predicate", self.field_name);
            return Err(DesignError::new(
                "$elemMatch needs at least one predicate",
                ErrorKind::InvalidSelector,
            ));
        }

        let mut body = Map::new();
        for predicate in predicates {
            if body.contains_key(predicate.operator) {
                log::error!("Operator {} repeated inside $elemMatch", predicate.operator);
                return Err(DesignError::new(
                    &format!("Operator {} is repeated inside $elemMatch", predicate.operator),
                    ErrorKind::InvalidSelector,
                ));
            }
            body.insert(predicate.operator.to_string(), predicate.argument);
        }
        Ok(self.condition("$elemMatch", Value::Object(body)))
    }

    fn condition(self, operator: &str, argument: Value) -> Selector {
        let mut condition = Map::new();
        condition.insert(operator.to_string(), argument);

        let mut selector = Map::new();
        selector.insert(self.field_name, Value::Object(condition));
        Selector::from_map(selector)
    }

    fn list_condition<T: Into<Value>>(
        self,
        operator: &str,
        values: Vec<T>,
    ) -> DesignResult<Selector> {
        if values.len() < 2 {
            log::error!("{} on '{}' needs at least two values", operator, self.field_name);
            return Err(DesignError::new(
                &format!("{} needs at least two values", operator),
                ErrorKind::InvalidSelector,
            ));
        }
        let values = values.into_iter().map(Into::into).collect();
        Ok(self.condition(operator, Value::Array(values)))
    }
}

/// A single comparison without a field name, used inside `$elemMatch`.
#[derive(Clone, Debug, PartialEq)]
pub struct PredicateExpression {
    operator: &'static str,
    argument: Value,
}

impl PredicateExpression {
    pub fn eq<T: Into<Value>>(value: T) -> Self {
        PredicateExpression::new("$eq", value.into())
    }

    pub fn ne<T: Into<Value>>(value: T) -> Self {
        PredicateExpression::new("$ne", value.into())
    }

    pub fn gt<T: Into<Value>>(value: T) -> Self {
        PredicateExpression::new("$gt", value.into())
    }

    pub fn gte<T: Into<Value>>(value: T) -> Self {
        PredicateExpression::new("$gte", value.into())
    }

    pub fn lt<T: Into<Value>>(value: T) -> Self {
        PredicateExpression::new("$lt", value.into())
    }

    pub fn lte<T: Into<Value>>(value: T) -> Self {
        PredicateExpression::new("$lte", value.into())
    }

    pub fn operator(&self) -> &str {
        self.operator
    }

    pub fn argument(&self) -> &Value {
        &self.argument
    }

    fn new(operator: &'static str, argument: Value) -> Self {
        PredicateExpression { operator, argument }
    }
}

/// Matches documents satisfying every selector (`$and`).
pub fn and(selectors: Vec<Selector>) -> Selector {
    combine("$and", selectors)
}

/// Matches documents satisfying at least one selector (`$or`).
pub fn or(selectors: Vec<Selector>) -> Selector {
    combine("$or", selectors)
}

/// Matches documents satisfying none of the selectors (`$nor`).
pub fn nor(selectors: Vec<Selector>) -> Selector {
    combine("$nor", selectors)
}

/// Matches documents that do not satisfy `selector` (`$not`).
pub fn not(selector: Selector) -> Selector {
    let mut map = Map::new();
    map.insert("$not".to_string(), selector.into_value());
    Selector::from_map(map)
}

fn combine(operator: &str, selectors: Vec<Selector>) -> Selector {
    let operands = selectors.into_iter().map(Selector::into_value).collect();
    let mut map = Map::new();
    map.insert(operator.to_string(), Value::Array(operands));
    Selector::from_map(map)
}
