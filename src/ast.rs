//! Statement tree and its tree-walking evaluator.
//!
//! Every language construct is a [`Statement`]; executing one yields a
//! [`Value`] or raises an [`Unwind`] — either a runtime failure or the
//! non-local `return` signal, which travels through every intervening node
//! until a method body catches it.

use std::rc::Rc;

use crate::runtime::{
    self, ADD_METHOD, Class, Closure, Context, INIT_METHOD, Instance, RuntimeError, Value,
};

/// Out-of-band outcome of executing a statement.
#[derive(Debug)]
pub enum Unwind {
    /// Raised by `return`; caught by the nearest enclosing method body.
    Return(Value),
    /// A runtime failure, propagated to the host untouched.
    Failure(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Failure(error)
    }
}

pub type ExecResult = Result<Value, Unwind>;

/// A dotted read path. The head resolves in the enclosing closure, every
/// further segment in the fields of the instance the previous segment
/// produced.
#[derive(Debug, Clone)]
pub struct VariableValue {
    dotted_ids: Vec<String>,
}

impl VariableValue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            dotted_ids: vec![name.into()],
        }
    }

    pub fn dotted(dotted_ids: Vec<String>) -> Self {
        Self { dotted_ids }
    }

    fn resolve(&self, closure: &Closure) -> Result<Value, RuntimeError> {
        let mut segments = self.dotted_ids.iter();
        let mut value = match segments.next() {
            Some(head) => lookup(closure, head)?,
            None => Value::None,
        };
        for segment in segments {
            let instance = match &value {
                Value::ClassInstance(instance) => Rc::clone(instance),
                other => {
                    return Err(RuntimeError::NotAnInstance {
                        type_name: other.type_name(),
                    });
                }
            };
            value = instance
                .field(segment)
                .ok_or_else(|| RuntimeError::UnknownAttribute {
                    attribute: segment.clone(),
                    type_name: instance.class().name().to_string(),
                })?;
        }
        Ok(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Less,
    Greater,
    LessOrEq,
    GreaterOrEq,
}

impl CompareOp {
    fn apply(
        self,
        lhs: &Value,
        rhs: &Value,
        context: &mut dyn Context,
    ) -> Result<bool, RuntimeError> {
        match self {
            CompareOp::Eq => runtime::equal(lhs, rhs, context),
            CompareOp::NotEq => runtime::not_equal(lhs, rhs, context),
            CompareOp::Less => runtime::less(lhs, rhs, context),
            CompareOp::Greater => runtime::greater(lhs, rhs, context),
            CompareOp::LessOrEq => runtime::less_or_equal(lhs, rhs, context),
            CompareOp::GreaterOrEq => runtime::greater_or_equal(lhs, rhs, context),
        }
    }
}

/// One evaluable node of the program tree.
#[derive(Debug)]
pub enum Statement {
    /// Literal payload.
    Constant(Value),
    /// `var = rv`: binds in the enclosing closure, yields the bound value.
    Assignment { var: String, rv: Box<Statement> },
    /// Read of a (possibly dotted) variable path.
    Variable(VariableValue),
    /// `object.field = rv`.
    FieldAssignment {
        object: VariableValue,
        field: String,
        rv: Box<Statement>,
    },
    /// `print a, b, ...`: space-separated, one trailing newline.
    Print(Vec<Statement>),
    /// `object.method(args...)`.
    MethodCall {
        object: Box<Statement>,
        method: String,
        args: Vec<Statement>,
    },
    /// `Class(args...)`: constructs an instance, running `__init__` when
    /// the class chain defines it with matching arity.
    NewInstance {
        class: Rc<Class>,
        args: Vec<Statement>,
    },
    /// `str(arg)`: the printed form as a fresh string value.
    Stringify(Box<Statement>),
    Add {
        lhs: Box<Statement>,
        rhs: Box<Statement>,
    },
    Sub {
        lhs: Box<Statement>,
        rhs: Box<Statement>,
    },
    Mult {
        lhs: Box<Statement>,
        rhs: Box<Statement>,
    },
    Div {
        lhs: Box<Statement>,
        rhs: Box<Statement>,
    },
    Or {
        lhs: Box<Statement>,
        rhs: Box<Statement>,
    },
    And {
        lhs: Box<Statement>,
        rhs: Box<Statement>,
    },
    Not(Box<Statement>),
    Comparison {
        op: CompareOp,
        lhs: Box<Statement>,
        rhs: Box<Statement>,
    },
    /// Statement sequence; yields `None`.
    Compound(Vec<Statement>),
    /// Raises the non-local return signal carrying its operand's value.
    Return(Box<Statement>),
    /// Binds the class name in the enclosing closure.
    ClassDefinition(Rc<Class>),
    IfElse {
        condition: Box<Statement>,
        then_body: Box<Statement>,
        else_body: Option<Box<Statement>>,
    },
    /// Method frame: catches the return signal raised inside `body`.
    MethodBody(Box<Statement>),
}

impl Statement {
    /// Evaluates this node in `closure` against `context`.
    pub fn execute(&self, closure: &mut Closure, context: &mut dyn Context) -> ExecResult {
        match self {
            Statement::Constant(value) => Ok(value.clone()),
            Statement::Assignment { var, rv } => {
                let value = rv.execute(closure, context)?;
                closure.insert(var.clone(), value.clone());
                Ok(value)
            }
            Statement::Variable(path) => Ok(path.resolve(closure)?),
            Statement::FieldAssignment { object, field, rv } => {
                let target = object.resolve(closure)?;
                let instance = match target {
                    Value::ClassInstance(instance) => instance,
                    other => {
                        return Err(Unwind::from(RuntimeError::NotAnInstance {
                            type_name: other.type_name(),
                        }));
                    }
                };
                let value = rv.execute(closure, context)?;
                instance.set_field(field.clone(), value.clone());
                Ok(value)
            }
            Statement::Print(args) => {
                for (index, arg) in args.iter().enumerate() {
                    let value = arg.execute(closure, context)?;
                    let rendered = value.to_output(context)?;
                    if index > 0 {
                        write_output(context, " ")?;
                    }
                    write_output(context, &rendered)?;
                }
                write_output(context, "\n")?;
                Ok(Value::None)
            }
            Statement::MethodCall {
                object,
                method,
                args,
            } => {
                let receiver = object.execute(closure, context)?;
                let instance = match receiver {
                    Value::ClassInstance(instance) => instance,
                    other => {
                        return Err(Unwind::from(RuntimeError::NotAnInstance {
                            type_name: other.type_name(),
                        }));
                    }
                };
                let mut arguments = Vec::with_capacity(args.len());
                for arg in args {
                    arguments.push(arg.execute(closure, context)?);
                }
                Ok(Instance::call(&instance, method, &arguments, context)?)
            }
            Statement::NewInstance { class, args } => {
                let instance = Instance::new(Rc::clone(class));
                if instance.has_method(INIT_METHOD, args.len()) {
                    let mut arguments = Vec::with_capacity(args.len());
                    for arg in args {
                        arguments.push(arg.execute(closure, context)?);
                    }
                    Instance::call(&instance, INIT_METHOD, &arguments, context)?;
                }
                Ok(Value::ClassInstance(instance))
            }
            Statement::Stringify(arg) => {
                let value = arg.execute(closure, context)?;
                Ok(Value::String(value.to_output(context)?))
            }
            Statement::Add { lhs, rhs } => {
                let left = lhs.execute(closure, context)?;
                let right = rhs.execute(closure, context)?;
                match (&left, &right) {
                    (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.wrapping_add(*b))),
                    (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
                    (Value::ClassInstance(instance), _) if instance.has_method(ADD_METHOD, 1) => {
                        Ok(Instance::call(instance, ADD_METHOD, std::slice::from_ref(&right), context)?)
                    }
                    _ => Err(unsupported('+', &left, &right)),
                }
            }
            Statement::Sub { lhs, rhs } => {
                arithmetic('-', lhs, rhs, closure, context, |a, b| Ok(a.wrapping_sub(b)))
            }
            Statement::Mult { lhs, rhs } => {
                arithmetic('*', lhs, rhs, closure, context, |a, b| Ok(a.wrapping_mul(b)))
            }
            Statement::Div { lhs, rhs } => arithmetic('/', lhs, rhs, closure, context, |a, b| {
                // Truncating division; only strictly positive divisors are
                // accepted, a quirk carried over from the source semantics.
                if b > 0 {
                    Ok(a / b)
                } else {
                    Err(RuntimeError::DivisionByZero)
                }
            }),
            Statement::Or { lhs, rhs } => {
                let mut truth = lhs.execute(closure, context)?.is_truthy();
                if !truth {
                    truth = rhs.execute(closure, context)?.is_truthy();
                }
                Ok(Value::Bool(truth))
            }
            Statement::And { lhs, rhs } => {
                let mut truth = lhs.execute(closure, context)?.is_truthy();
                if truth {
                    truth = rhs.execute(closure, context)?.is_truthy();
                }
                Ok(Value::Bool(truth))
            }
            Statement::Not(arg) => Ok(Value::Bool(!arg.execute(closure, context)?.is_truthy())),
            Statement::Comparison { op, lhs, rhs } => {
                let left = lhs.execute(closure, context)?;
                let right = rhs.execute(closure, context)?;
                Ok(Value::Bool(op.apply(&left, &right, context)?))
            }
            Statement::Compound(statements) => {
                for statement in statements {
                    statement.execute(closure, context)?;
                }
                Ok(Value::None)
            }
            Statement::Return(rv) => {
                let value = rv.execute(closure, context)?;
                Err(Unwind::Return(value))
            }
            Statement::ClassDefinition(class) => {
                let value = Value::Class(Rc::clone(class));
                closure.insert(class.name().to_string(), value.clone());
                Ok(value)
            }
            Statement::IfElse {
                condition,
                then_body,
                else_body,
            } => {
                if condition.execute(closure, context)?.is_truthy() {
                    then_body.execute(closure, context)
                } else if let Some(else_body) = else_body {
                    else_body.execute(closure, context)
                } else {
                    Ok(Value::None)
                }
            }
            Statement::MethodBody(body) => match body.execute(closure, context) {
                Ok(_) => Ok(Value::None),
                Err(Unwind::Return(value)) => Ok(value),
                Err(failure) => Err(failure),
            },
        }
    }
}

/// Executes a program's root statement; the host entry point.
///
/// A `return` signal unwinding past the root is a malformed program and
/// surfaces as [`RuntimeError::ReturnOutsideMethod`].
pub fn execute_program(
    root: &Statement,
    closure: &mut Closure,
    context: &mut dyn Context,
) -> Result<Value, RuntimeError> {
    match root.execute(closure, context) {
        Ok(value) => Ok(value),
        Err(Unwind::Return(_)) => Err(RuntimeError::ReturnOutsideMethod),
        Err(Unwind::Failure(error)) => Err(error),
    }
}

fn lookup(closure: &Closure, name: &str) -> Result<Value, RuntimeError> {
    closure
        .get(name)
        .cloned()
        .ok_or_else(|| RuntimeError::UndefinedName {
            name: name.to_string(),
        })
}

fn arithmetic(
    operator: char,
    lhs: &Statement,
    rhs: &Statement,
    closure: &mut Closure,
    context: &mut dyn Context,
    apply: fn(i64, i64) -> Result<i64, RuntimeError>,
) -> ExecResult {
    let left = lhs.execute(closure, context)?;
    let right = rhs.execute(closure, context)?;
    match (&left, &right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(apply(*a, *b)?)),
        _ => Err(unsupported(operator, &left, &right)),
    }
}

fn unsupported(operator: char, lhs: &Value, rhs: &Value) -> Unwind {
    RuntimeError::UnsupportedOperands {
        operator,
        lhs: lhs.type_name(),
        rhs: rhs.type_name(),
    }
    .into()
}

fn write_output(context: &mut dyn Context, text: &str) -> Result<(), RuntimeError> {
    use std::io::Write;

    context
        .output()
        .write_all(text.as_bytes())
        .map_err(|error| RuntimeError::OutputFailure {
            message: error.to_string(),
        })
}
