pub mod dsa;

pub use dsa::bitset::BitSet;
pub use dsa::element::Element;
pub use dsa::growth::GrowthPolicy;
pub use dsa::render::ParseBitSetError;
