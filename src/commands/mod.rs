pub mod arith;
pub mod plot;
