//! Services bridging the pure domain with persistence and delivery.

pub mod draft;
pub mod series;

#[cfg(test)]
mod tests_series;
