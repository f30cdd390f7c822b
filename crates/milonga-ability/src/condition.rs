//! # Conditions
//!
//! The declarative predicate grammar that scopes rules to matching
//! resource instances, and the matcher that evaluates it.
//!
//! A condition is a small recursive expression over named resource
//! fields. On the wire it uses the same Mongo-style document grammar the
//! stored rule documents use:
//!
//! ```text
//! {"userId": 7}                          literal equality
//! {"groupId": {"$in": [3, 4]}}           membership
//! {"trustLevel": {"$lte": 2}}            comparison ($lt/$lte/$gt/$gte)
//! {"$or": [{"senderId": 7}, {"recipientId": 7}]}   disjunction
//! {"isPublic": true, "trustLevel": {"$lte": 2}}    implicit conjunction
//! ```
//!
//! Matching is fail-closed and total: a missing field, a
//! type-incompatible comparison, or an empty `$or` all evaluate to
//! `false`, never an error. Grammar violations are rejected when the
//! document is parsed ([`Condition::from_json`]), strictly before any
//! rule is evaluated.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::cmp::Ordering;

use crate::error::BuildError;

/// A scalar field value exposed by a [`FieldView`] and used as a
/// condition operand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum FieldValue {
    /// An explicit null (distinct from a missing field).
    Null,
    /// A boolean flag, e.g. `isPublic`.
    Bool(bool),
    /// An integer, e.g. ids and trust levels.
    Int(i64),
    /// A string, e.g. an analytics scope.
    Str(String),
}

impl FieldValue {
    fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Int(n) => Value::from(*n),
            FieldValue::Str(s) => Value::from(s.as_str()),
        }
    }

    fn from_json(value: &Value) -> Result<Self, BuildError> {
        match value {
            Value::Null => Ok(FieldValue::Null),
            Value::Bool(b) => Ok(FieldValue::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(FieldValue::Int)
                .ok_or_else(|| BuildError::InvalidCondition(format!("non-integer number {n}"))),
            Value::String(s) => Ok(FieldValue::Str(s.clone())),
            other => Err(BuildError::InvalidCondition(format!(
                "expected a scalar operand, got {other}"
            ))),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

/// A typed projection of a candidate resource's fields.
///
/// Concrete resource types implement this instead of exposing dynamic
/// property access; the matcher only ever sees scalars. Returning `None`
/// for an unknown or absent field is how adapters fail closed.
pub trait FieldView {
    /// Look up a named field on the candidate resource.
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// Loosely-typed payloads can be checked without a dedicated adapter:
/// a JSON object projects its scalar members, and anything else (arrays,
/// nested objects, non-objects) projects nothing.
impl FieldView for Value {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match self.get(name)? {
            Value::Null => Some(FieldValue::Null),
            Value::Bool(b) => Some(FieldValue::Bool(*b)),
            Value::Number(n) => n.as_i64().map(FieldValue::Int),
            Value::String(s) => Some(FieldValue::Str(s.clone())),
            _ => None,
        }
    }
}

/// The check applied to a single field's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOp {
    /// Field equals the operand exactly (type-sensitive).
    Eq(FieldValue),
    /// Field equals one of the operands.
    In(Vec<FieldValue>),
    /// Field is numerically less than the operand.
    Lt(FieldValue),
    /// Field is numerically at most the operand.
    Lte(FieldValue),
    /// Field is numerically greater than the operand.
    Gt(FieldValue),
    /// Field is numerically at least the operand.
    Gte(FieldValue),
}

impl FieldOp {
    fn eval(&self, value: &FieldValue) -> bool {
        match self {
            FieldOp::Eq(expected) => value == expected,
            FieldOp::In(candidates) => candidates.contains(value),
            FieldOp::Lt(bound) => compare(value, bound) == Some(Ordering::Less),
            FieldOp::Lte(bound) => {
                matches!(compare(value, bound), Some(Ordering::Less | Ordering::Equal))
            }
            FieldOp::Gt(bound) => compare(value, bound) == Some(Ordering::Greater),
            FieldOp::Gte(bound) => matches!(
                compare(value, bound),
                Some(Ordering::Greater | Ordering::Equal)
            ),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            FieldOp::Eq(_) => "$eq",
            FieldOp::In(_) => "$in",
            FieldOp::Lt(_) => "$lt",
            FieldOp::Lte(_) => "$lte",
            FieldOp::Gt(_) => "$gt",
            FieldOp::Gte(_) => "$gte",
        }
    }

    fn operand_json(&self) -> Value {
        match self {
            FieldOp::Eq(v) | FieldOp::Lt(v) | FieldOp::Lte(v) | FieldOp::Gt(v) | FieldOp::Gte(v) => {
                v.to_json()
            }
            FieldOp::In(vs) => Value::Array(vs.iter().map(FieldValue::to_json).collect()),
        }
    }
}

/// Ordered comparisons are only defined between integers; mixed types
/// compare as incomparable, which the operators treat as a non-match.
fn compare(value: &FieldValue, bound: &FieldValue) -> Option<Ordering> {
    Some(value.as_int()?.cmp(&bound.as_int()?))
}

/// A declarative predicate over a resource's fields.
///
/// # Example
///
/// ```
/// use milonga_ability::Condition;
/// use serde_json::json;
///
/// let own = Condition::eq("userId", 7);
/// assert!(own.matches(&json!({"userId": 7})));
/// assert!(!own.matches(&json!({"userId": 8})));
/// assert!(!own.matches(&json!({}))); // missing field fails closed
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// A single-field check.
    Field {
        /// The wire name of the field, e.g. `"organizerId"`.
        field: String,
        /// The check applied to the field's value.
        op: FieldOp,
    },
    /// Conjunction: every part must match. Empty is vacuously true.
    And(Vec<Condition>),
    /// Disjunction (`$or`): at least one part must match. Empty is false.
    Or(Vec<Condition>),
}

impl Condition {
    /// Literal equality on a field.
    pub fn eq(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Condition::Field {
            field: field.into(),
            op: FieldOp::Eq(value.into()),
        }
    }

    /// Membership of a field's value in a list.
    pub fn is_in<V>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<FieldValue>,
    {
        Condition::Field {
            field: field.into(),
            op: FieldOp::In(values.into_iter().map(Into::into).collect()),
        }
    }

    /// Numeric `<` on a field.
    pub fn lt(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Condition::Field {
            field: field.into(),
            op: FieldOp::Lt(value.into()),
        }
    }

    /// Numeric `<=` on a field.
    pub fn lte(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Condition::Field {
            field: field.into(),
            op: FieldOp::Lte(value.into()),
        }
    }

    /// Numeric `>` on a field.
    pub fn gt(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Condition::Field {
            field: field.into(),
            op: FieldOp::Gt(value.into()),
        }
    }

    /// Numeric `>=` on a field.
    pub fn gte(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Condition::Field {
            field: field.into(),
            op: FieldOp::Gte(value.into()),
        }
    }

    /// Conjunction of the given conditions.
    pub fn all_of(parts: impl IntoIterator<Item = Condition>) -> Self {
        Condition::And(parts.into_iter().collect())
    }

    /// Disjunction (`$or`) of the given conditions.
    pub fn any_of(parts: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Or(parts.into_iter().collect())
    }

    /// Evaluate this condition against a candidate resource.
    ///
    /// Pure, total, and fail-closed: missing fields and
    /// type-incompatible checks evaluate to `false`.
    pub fn matches(&self, view: &dyn FieldView) -> bool {
        match self {
            Condition::Field { field, op } => match view.field(field) {
                Some(value) => op.eval(&value),
                None => false,
            },
            Condition::And(parts) => parts.iter().all(|part| part.matches(view)),
            Condition::Or(parts) => parts.iter().any(|part| part.matches(view)),
        }
    }

    /// Parse a condition from its Mongo-style JSON document form.
    ///
    /// # Example
    ///
    /// ```
    /// use milonga_ability::Condition;
    /// use serde_json::json;
    ///
    /// let cond = Condition::from_json(&json!({"trustLevel": {"$lte": 2}})).unwrap();
    /// assert!(cond.matches(&json!({"trustLevel": 1})));
    /// assert!(!cond.matches(&json!({"trustLevel": 3})));
    /// ```
    pub fn from_json(value: &Value) -> Result<Self, BuildError> {
        let object = value.as_object().ok_or_else(|| {
            BuildError::InvalidCondition(format!("condition must be an object, got {value}"))
        })?;

        let mut parts = Vec::new();
        for (key, entry) in object {
            if key == "$or" {
                let arr = entry.as_array().ok_or_else(|| {
                    BuildError::InvalidCondition("$or expects an array".to_string())
                })?;
                let subs = arr
                    .iter()
                    .map(Condition::from_json)
                    .collect::<Result<Vec<_>, _>>()?;
                parts.push(Condition::Or(subs));
            } else if key.starts_with('$') {
                return Err(BuildError::InvalidCondition(format!(
                    "unsupported operator {key}"
                )));
            } else if let Some(ops) = entry.as_object() {
                if ops.is_empty() {
                    return Err(BuildError::InvalidCondition(format!(
                        "empty operator object for field {key}"
                    )));
                }
                for (op, operand) in ops {
                    parts.push(Condition::Field {
                        field: key.clone(),
                        op: parse_op(op, operand)?,
                    });
                }
            } else {
                parts.push(Condition::Field {
                    field: key.clone(),
                    op: FieldOp::Eq(FieldValue::from_json(entry)?),
                });
            }
        }

        Ok(match parts.len() {
            1 => parts.remove(0),
            _ => Condition::And(parts),
        })
    }

    /// Render this condition back into its JSON document form.
    ///
    /// Round-trips every condition expressible in the document grammar;
    /// sibling operator checks on the same field merge into one operator
    /// object.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        self.merge_into(&mut map);
        Value::Object(map)
    }

    fn merge_into(&self, map: &mut Map<String, Value>) {
        match self {
            Condition::Field { field, op } => match op {
                FieldOp::Eq(value) => {
                    map.insert(field.clone(), value.to_json());
                }
                other => {
                    let slot = map
                        .entry(field.clone())
                        .or_insert_with(|| Value::Object(Map::new()));
                    match slot {
                        Value::Object(ops) => {
                            ops.insert(other.name().to_string(), other.operand_json());
                        }
                        _ => {
                            let mut ops = Map::new();
                            ops.insert(other.name().to_string(), other.operand_json());
                            *slot = Value::Object(ops);
                        }
                    }
                }
            },
            Condition::And(parts) => {
                for part in parts {
                    part.merge_into(map);
                }
            }
            Condition::Or(parts) => {
                map.insert(
                    "$or".to_string(),
                    Value::Array(parts.iter().map(Condition::to_json).collect()),
                );
            }
        }
    }
}

fn parse_op(op: &str, operand: &Value) -> Result<FieldOp, BuildError> {
    match op {
        "$eq" => Ok(FieldOp::Eq(FieldValue::from_json(operand)?)),
        "$in" => {
            let arr = operand.as_array().ok_or_else(|| {
                BuildError::InvalidCondition("$in expects an array".to_string())
            })?;
            let values = arr
                .iter()
                .map(FieldValue::from_json)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(FieldOp::In(values))
        }
        "$lt" => Ok(FieldOp::Lt(FieldValue::from_json(operand)?)),
        "$lte" => Ok(FieldOp::Lte(FieldValue::from_json(operand)?)),
        "$gt" => Ok(FieldOp::Gt(FieldValue::from_json(operand)?)),
        "$gte" => Ok(FieldOp::Gte(FieldValue::from_json(operand)?)),
        other => Err(BuildError::InvalidCondition(format!(
            "unsupported operator {other}"
        ))),
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Condition::from_json(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_equality_matches() {
        let cond = Condition::eq("userId", 7);
        assert!(cond.matches(&json!({"userId": 7})));
        assert!(!cond.matches(&json!({"userId": 8})));
    }

    #[test]
    fn test_missing_field_fails_closed() {
        let cond = Condition::eq("isPublic", true);
        assert!(!cond.matches(&json!({})));
        assert!(!cond.matches(&json!({"somethingElse": true})));
    }

    #[test]
    fn test_null_is_distinct_from_missing() {
        let cond = Condition::eq("deletedAt", FieldValue::Null);
        assert!(cond.matches(&json!({"deletedAt": null})));
        assert!(!cond.matches(&json!({})));
    }

    #[test]
    fn test_type_mismatch_fails_closed() {
        // $lte against a string is a non-match, never an error
        let cond = Condition::lte("trustLevel", 2);
        assert!(!cond.matches(&json!({"trustLevel": "high"})));
        assert!(!cond.matches(&json!({"trustLevel": true})));
    }

    #[test]
    fn test_membership() {
        let cond = Condition::is_in("groupId", [3i64, 4]);
        assert!(cond.matches(&json!({"groupId": 3})));
        assert!(cond.matches(&json!({"groupId": 4})));
        assert!(!cond.matches(&json!({"groupId": 5})));
    }

    #[test]
    fn test_comparisons() {
        let cond = Condition::lte("trustLevel", 2);
        assert!(cond.matches(&json!({"trustLevel": 1})));
        assert!(cond.matches(&json!({"trustLevel": 2})));
        assert!(!cond.matches(&json!({"trustLevel": 3})));

        assert!(Condition::lt("n", 5).matches(&json!({"n": 4})));
        assert!(!Condition::lt("n", 5).matches(&json!({"n": 5})));
        assert!(Condition::gt("n", 5).matches(&json!({"n": 6})));
        assert!(Condition::gte("n", 5).matches(&json!({"n": 5})));
    }

    #[test]
    fn test_disjunction() {
        let cond = Condition::any_of([
            Condition::eq("senderId", 7),
            Condition::eq("recipientId", 7),
        ]);
        assert!(cond.matches(&json!({"senderId": 7, "recipientId": 9})));
        assert!(cond.matches(&json!({"senderId": 2, "recipientId": 7})));
        assert!(!cond.matches(&json!({"senderId": 2, "recipientId": 9})));
    }

    #[test]
    fn test_empty_or_is_false() {
        let cond = Condition::any_of([]);
        assert!(!cond.matches(&json!({"anything": 1})));
    }

    #[test]
    fn test_empty_conjunction_is_true() {
        let cond = Condition::all_of([]);
        assert!(cond.matches(&json!({})));
    }

    #[test]
    fn test_implicit_conjunction() {
        let cond = Condition::all_of([
            Condition::eq("isPublic", true),
            Condition::lte("trustLevel", 2),
        ]);
        assert!(cond.matches(&json!({"isPublic": true, "trustLevel": 1})));
        assert!(!cond.matches(&json!({"isPublic": false, "trustLevel": 1})));
        assert!(!cond.matches(&json!({"isPublic": true, "trustLevel": 3})));
    }

    #[test]
    fn test_from_json_equality() {
        let cond = Condition::from_json(&json!({"userId": 7})).unwrap();
        assert_eq!(cond, Condition::eq("userId", 7));
    }

    #[test]
    fn test_from_json_full_grammar() {
        let doc = json!({
            "isPublic": true,
            "trustLevel": {"$lte": 2},
            "groupId": {"$in": [3, 4]},
            "$or": [{"senderId": 7}, {"recipientId": 7}]
        });
        let cond = Condition::from_json(&doc).unwrap();
        assert!(cond.matches(&json!({
            "isPublic": true, "trustLevel": 1, "groupId": 3, "senderId": 7
        })));
        assert!(!cond.matches(&json!({
            "isPublic": true, "trustLevel": 1, "groupId": 3, "senderId": 1
        })));
    }

    #[test]
    fn test_from_json_rejects_unknown_operator() {
        let err = Condition::from_json(&json!({"userId": {"$regex": "x"}})).unwrap_err();
        assert!(matches!(err, BuildError::InvalidCondition(_)));

        let err = Condition::from_json(&json!({"$nor": []})).unwrap_err();
        assert!(matches!(err, BuildError::InvalidCondition(_)));
    }

    #[test]
    fn test_from_json_rejects_empty_operator_object() {
        // an empty operator map carries no check; accepting it would
        // collapse the field predicate into match-all
        let err = Condition::from_json(&json!({"userId": {}})).unwrap_err();
        assert!(matches!(err, BuildError::InvalidCondition(_)));

        let doc = json!({"isPublic": true, "userId": {}});
        assert!(Condition::from_json(&doc).is_err());
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(Condition::from_json(&json!(true)).is_err());
        assert!(Condition::from_json(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_from_json_rejects_float_operand() {
        assert!(Condition::from_json(&json!({"trustLevel": {"$lte": 2.5}})).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let doc = json!({
            "trustLevel": {"$lte": 2},
            "$or": [{"senderId": 7}, {"recipientId": 7}]
        });
        let cond = Condition::from_json(&doc).unwrap();
        assert_eq!(Condition::from_json(&cond.to_json()).unwrap(), cond);
    }

    #[test]
    fn test_serde_round_trip() {
        let cond = Condition::all_of([
            Condition::eq("isPublic", true),
            Condition::is_in("groupId", [3i64]),
        ]);
        let encoded = serde_json::to_value(&cond).unwrap();
        let decoded: Condition = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, cond);
    }
}
