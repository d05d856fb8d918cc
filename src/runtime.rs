//! Shared runtime value and class model.
//!
//! Backend-agnostic pieces used by every evaluated statement: value handles,
//! class descriptors and instances, scope closures, the comparison protocol,
//! and the host-facing output context.
mod class;
mod compare;
mod context;
mod error;
mod value;

pub use class::{ADD_METHOD, Class, EQ_METHOD, INIT_METHOD, Instance, LT_METHOD, Method, STR_METHOD};
pub use compare::{equal, greater, greater_or_equal, less, less_or_equal, not_equal};
pub use context::{BufferContext, Context, WriterContext};
pub use error::RuntimeError;
pub use value::{Closure, Value};
