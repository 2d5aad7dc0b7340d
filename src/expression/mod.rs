mod model;
pub mod parser;
mod registry;

pub use model::{Expression, ExpressionStatus};
pub use parser::{BinaryOp, ParseError};
pub use registry::ExpressionRegistry;
