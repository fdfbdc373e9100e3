// Operator evaluation, split by arity. Most of it is `impl Interpreter`;
// the value-level helpers are free functions so they can be tested alone.
pub mod binary;
pub mod cast;
pub mod unary;
