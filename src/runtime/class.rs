use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::{Statement, Unwind};
use crate::runtime::context::Context;
use crate::runtime::error::RuntimeError;
use crate::runtime::value::{Closure, Value};

pub const INIT_METHOD: &str = "__init__";
pub const STR_METHOD: &str = "__str__";
pub const EQ_METHOD: &str = "__eq__";
pub const LT_METHOD: &str = "__lt__";
pub const ADD_METHOD: &str = "__add__";

/// A named method of a user-defined class.
#[derive(Debug)]
pub struct Method {
    pub name: String,
    pub formal_params: Vec<String>,
    pub body: Statement,
}

/// Class descriptor: an ordered method table and an optional parent class.
#[derive(Debug)]
pub struct Class {
    name: String,
    methods: Vec<Method>,
    parent: Option<Rc<Class>>,
}

impl Class {
    pub fn new(name: impl Into<String>, methods: Vec<Method>, parent: Option<Rc<Class>>) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            methods,
            parent,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// First method of the given name in declaration order, walking the
    /// inheritance chain on a miss. Arity is the caller's concern.
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods
            .iter()
            .find(|method| method.name == name)
            .or_else(|| self.parent.as_deref().and_then(|parent| parent.method(name)))
    }
}

/// Heap-allocated object of a user-defined class. Shared via `Rc`; every
/// binding to the same instance observes the same fields.
#[derive(Debug)]
pub struct Instance {
    class: Rc<Class>,
    fields: RefCell<Closure>,
}

impl Instance {
    pub fn new(class: Rc<Class>) -> Rc<Self> {
        Rc::new(Self {
            class,
            fields: RefCell::new(Closure::new()),
        })
    }

    pub fn class(&self) -> &Class {
        &self.class
    }

    pub fn field(&self, name: &str) -> Option<Value> {
        self.fields.borrow().get(name).cloned()
    }

    pub fn set_field(&self, name: impl Into<String>, value: Value) {
        self.fields.borrow_mut().insert(name.into(), value);
    }

    /// True when the first `name` match in the class chain takes exactly
    /// `argument_count` arguments.
    pub fn has_method(&self, name: &str, argument_count: usize) -> bool {
        self.class
            .method(name)
            .is_some_and(|method| method.formal_params.len() == argument_count)
    }

    /// Invokes a method on `receiver`.
    ///
    /// A fresh closure binds `self` to the receiver and each formal
    /// parameter to its positional argument; the closure is dropped when the
    /// call finishes, so no binding leaks back to the caller. A `return`
    /// raised inside the body becomes the call result; a body that completes
    /// without one yields `None`.
    pub fn call(
        receiver: &Rc<Instance>,
        method: &str,
        args: &[Value],
        context: &mut dyn Context,
    ) -> Result<Value, RuntimeError> {
        let found = receiver
            .class
            .method(method)
            .filter(|found| found.formal_params.len() == args.len())
            .ok_or_else(|| RuntimeError::UnknownMethod {
                method: method.to_string(),
                arguments: args.len(),
                class: receiver.class.name().to_string(),
            })?;

        let mut closure = Closure::new();
        closure.insert("self".to_string(), Value::ClassInstance(Rc::clone(receiver)));
        for (param, arg) in found.formal_params.iter().zip(args) {
            closure.insert(param.clone(), arg.clone());
        }

        match found.body.execute(&mut closure, context) {
            Ok(value) => Ok(value),
            Err(Unwind::Return(value)) => Ok(value),
            Err(Unwind::Failure(error)) => Err(error),
        }
    }
}
