pub mod contain;
pub mod intersect;
