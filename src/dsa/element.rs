// Unsigned integer types a BitSet can store.
// Every width is widened to u64 before addressing, so the
// unit index / bit offset math is the same for all of them.
pub trait Element: Copy {
    const BITS:u32;
    fn widen(self) -> u64;
}

macro_rules! impl_element {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                const BITS:u32 = <$t>::BITS;
                #[inline]
                fn widen(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

impl_element!(u8,u16,u32,u64,usize);
