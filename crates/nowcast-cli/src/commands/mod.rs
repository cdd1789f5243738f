pub mod forecast;
pub mod future_value;
pub mod scenarios;
