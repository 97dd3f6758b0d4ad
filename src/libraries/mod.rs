pub mod distance;
pub mod proximity;
