//! Comparison protocol over runtime values.
//!
//! `equal` and `less` are the primitives; the remaining operators derive
//! from them the way the source language defines them.

use std::rc::Rc;
use std::slice;

use crate::runtime::class::{EQ_METHOD, Instance, LT_METHOD};
use crate::runtime::context::Context;
use crate::runtime::error::RuntimeError;
use crate::runtime::value::Value;

/// Structural equality for primitives, `__eq__/1` dispatch for instances.
/// Two `None` values are equal.
pub fn equal(lhs: &Value, rhs: &Value, context: &mut dyn Context) -> Result<bool, RuntimeError> {
    match (lhs, rhs) {
        (Value::None, Value::None) => Ok(true),
        (Value::Number(left), Value::Number(right)) => Ok(left == right),
        (Value::Bool(left), Value::Bool(right)) => Ok(left == right),
        (Value::String(left), Value::String(right)) => Ok(left == right),
        (Value::ClassInstance(instance), _) if instance.has_method(EQ_METHOD, 1) => {
            dunder_comparison(instance, EQ_METHOD, rhs, context)
        }
        _ => Err(incomparable(lhs, rhs)),
    }
}

/// Strict ordering: numbers numerically, strings lexicographically, `False`
/// before `True`; `__lt__/1` dispatch for instances. `None` does not order
/// against anything.
pub fn less(lhs: &Value, rhs: &Value, context: &mut dyn Context) -> Result<bool, RuntimeError> {
    match (lhs, rhs) {
        (Value::Number(left), Value::Number(right)) => Ok(left < right),
        (Value::Bool(left), Value::Bool(right)) => Ok(left < right),
        (Value::String(left), Value::String(right)) => Ok(left < right),
        (Value::ClassInstance(instance), _) if instance.has_method(LT_METHOD, 1) => {
            dunder_comparison(instance, LT_METHOD, rhs, context)
        }
        _ => Err(incomparable(lhs, rhs)),
    }
}

pub fn not_equal(lhs: &Value, rhs: &Value, context: &mut dyn Context) -> Result<bool, RuntimeError> {
    Ok(!equal(lhs, rhs, context)?)
}

pub fn greater(lhs: &Value, rhs: &Value, context: &mut dyn Context) -> Result<bool, RuntimeError> {
    Ok(!less(lhs, rhs, context)? && not_equal(lhs, rhs, context)?)
}

pub fn less_or_equal(
    lhs: &Value,
    rhs: &Value,
    context: &mut dyn Context,
) -> Result<bool, RuntimeError> {
    Ok(less(lhs, rhs, context)? || equal(lhs, rhs, context)?)
}

pub fn greater_or_equal(
    lhs: &Value,
    rhs: &Value,
    context: &mut dyn Context,
) -> Result<bool, RuntimeError> {
    Ok(!less(lhs, rhs, context)?)
}

fn dunder_comparison(
    instance: &Rc<Instance>,
    method: &str,
    rhs: &Value,
    context: &mut dyn Context,
) -> Result<bool, RuntimeError> {
    match Instance::call(instance, method, slice::from_ref(rhs), context)? {
        Value::Bool(value) => Ok(value),
        other => Err(RuntimeError::NonBoolComparisonResult {
            method: method.to_string(),
            type_name: other.type_name(),
        }),
    }
}

fn incomparable(lhs: &Value, rhs: &Value) -> RuntimeError {
    RuntimeError::IncomparableTypes {
        lhs: lhs.type_name(),
        rhs: rhs.type_name(),
    }
}
