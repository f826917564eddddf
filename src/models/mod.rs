pub mod filter;
pub mod offer;
