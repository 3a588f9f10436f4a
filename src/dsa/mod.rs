pub mod bitset;
pub mod element;
pub mod growth;
pub mod render;
