use std::collections::HashMap;
use std::rc::Rc;

use crate::runtime::class::{Class, Instance, STR_METHOD};
use crate::runtime::context::Context;
use crate::runtime::error::RuntimeError;

/// A lexical scope: the name-to-value bindings of a running method or of
/// the global program.
pub type Closure = HashMap<String, Value>;

/// Runtime value handle.
///
/// Primitives are stored inline; classes and instances are shared
/// reference-counted handles, so cloning a `Value` never copies heap state.
/// `Value::None` is a first-class inhabitant and the result of statements
/// that do not compute one.
#[derive(Debug, Clone)]
pub enum Value {
    Number(i64),
    String(String),
    Bool(bool),
    ClassInstance(Rc<Instance>),
    Class(Rc<Class>),
    None,
}

impl Value {
    pub fn type_name(&self) -> String {
        match self {
            Value::Number(_) => "int".to_string(),
            Value::String(_) => "str".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::ClassInstance(instance) => instance.class().name().to_string(),
            Value::Class(_) => "type".to_string(),
            Value::None => "NoneType".to_string(),
        }
    }

    /// Truthiness: `None` is false, numbers are true iff non-zero, strings
    /// iff non-empty, booleans are themselves. Classes and instances are
    /// always false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(value) => *value != 0,
            Value::Bool(value) => *value,
            Value::String(value) => !value.is_empty(),
            Value::ClassInstance(_) | Value::Class(_) | Value::None => false,
        }
    }

    /// Renders the value the way `print` shows it. An instance whose class
    /// chain provides `__str__/0` delegates to it; other instances render
    /// their heap address.
    pub fn to_output(&self, context: &mut dyn Context) -> Result<String, RuntimeError> {
        match self {
            Value::Number(value) => Ok(value.to_string()),
            Value::Bool(true) => Ok("True".to_string()),
            Value::Bool(false) => Ok("False".to_string()),
            Value::String(value) => Ok(value.clone()),
            Value::None => Ok("None".to_string()),
            Value::Class(class) => Ok(format!("Class {}", class.name())),
            Value::ClassInstance(instance) => {
                if instance.has_method(STR_METHOD, 0) {
                    let rendered = Instance::call(instance, STR_METHOD, &[], context)?;
                    rendered.to_output(context)
                } else {
                    Ok(format!("{:p}", Rc::as_ptr(instance)))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::context::BufferContext;

    fn render(value: &Value) -> String {
        let mut context = BufferContext::new();
        value.to_output(&mut context).expect("to_output")
    }

    #[test]
    fn primitives_render_their_printed_form() {
        assert_eq!(render(&Value::Number(-17)), "-17");
        assert_eq!(render(&Value::Bool(true)), "True");
        assert_eq!(render(&Value::Bool(false)), "False");
        assert_eq!(render(&Value::String("hi there".to_string())), "hi there");
        assert_eq!(render(&Value::None), "None");
    }

    #[test]
    fn classes_render_their_name() {
        let class = Class::new("Point", Vec::new(), None);
        assert_eq!(render(&Value::Class(class)), "Class Point");
    }

    #[test]
    fn truthiness_follows_value_payloads() {
        assert!(!Value::None.is_truthy());
        assert!(!Value::Number(0).is_truthy());
        assert!(Value::Number(-1).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::String(String::new()).is_truthy());
        assert!(Value::String("x".to_string()).is_truthy());
    }

    #[test]
    fn classes_and_instances_are_never_truthy() {
        let class = Class::new("Point", Vec::new(), None);
        let instance = Instance::new(Rc::clone(&class));
        assert!(!Value::Class(class).is_truthy());
        assert!(!Value::ClassInstance(instance).is_truthy());
    }

    #[test]
    fn type_names_are_python_flavoured() {
        assert_eq!(Value::Number(0).type_name(), "int");
        assert_eq!(Value::None.type_name(), "NoneType");
        let class = Class::new("Point", Vec::new(), None);
        assert_eq!(Value::ClassInstance(Instance::new(class)).type_name(), "Point");
    }
}
