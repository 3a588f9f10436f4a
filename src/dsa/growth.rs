// How the backing storage grows when a value lands past the last unit.
// ExactFit appends just enough units, Doubling at least doubles the unit count.
#[derive(Clone,Copy,Debug,Default,PartialEq,Eq)]
pub enum GrowthPolicy {
    #[default]
    ExactFit,
    Doubling
}

impl GrowthPolicy {
    /// New unit count needed so that `index` becomes addressable.
    /// Callers only ask when `index >= current`.
    pub fn target_len(self,current:usize,index:usize) -> usize {
        debug_assert!(index >= current);
        let needed = index.checked_add(1).expect("unit index overflow, allocation impossible");
        match self {
            GrowthPolicy::ExactFit => needed,
            GrowthPolicy::Doubling => needed.max(current.saturating_mul(2))
        }
    }
}
