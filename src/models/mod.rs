pub mod normal;
pub mod strike;
pub mod volatility;

pub use strike::{strike_probability, StrikeParams};
pub use volatility::{estimate_volatility, estimate_volatility_default};
