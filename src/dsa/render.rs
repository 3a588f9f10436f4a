// Text form of a BitSet, used in logs and debug output.
// Each unit is printed most significant byte first as eight 8-digit
// binary groups separated by a space, and every unit, the last one
// included, is followed by ", ". Downstream log parsers rely on the
// trailing separator, keep it.
use std::fmt::{self,Debug,Display};
use std::str::FromStr;

use lazy_static::lazy_static;
use thiserror::Error;

use crate::dsa::bitset::{BitSet,Unit};
use crate::dsa::element::Element;

const BYTE_DIGITS:usize = 8;
const BYTES_PER_UNIT:usize = std::mem::size_of::<Unit>();
const UNIT_SEPARATOR:&str = ", ";

lazy_static! {
    //"00000000" ..= "11111111", indexed by the byte value
    static ref BYTE_TABLE:Vec<String> = (0..=u8::MAX).map(|b| format!("{b:08b}")).collect();
}

#[derive(Error,Debug,Clone,PartialEq,Eq)]
pub enum ParseBitSetError {
    #[error("Cannot parse a bitset from an empty string")]
    Empty,
    #[error("Unit {unit} is not terminated by \", \"")]
    MissingTrailingSeparator{unit:usize},
    #[error("Unit {unit} has {found} byte groups, expected 8")]
    ByteCount{unit:usize,found:usize},
    #[error("Byte {byte} of unit {unit} has {found} digits, expected 8")]
    ByteWidth{unit:usize,byte:usize,found:usize},
    #[error("Byte {byte} of unit {unit} contains {digit:?}, which isn't a binary digit")]
    InvalidDigit{unit:usize,byte:usize,digit:char}
}

type Result<T> = std::result::Result<T,ParseBitSetError>;

fn write_units(f:&mut fmt::Formatter<'_>,units:&[Unit]) -> fmt::Result {
    for unit in units {
        for (i,byte) in unit.to_be_bytes().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&BYTE_TABLE[*byte as usize])?;
        }
        f.write_str(UNIT_SEPARATOR)?;
    }
    Ok(())
}

impl<T:Element> Display for BitSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_units(f,self.units())
    }
}

impl<T:Element> Debug for BitSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_units(f,self.units())
    }
}

fn parse_unit(unit:usize,text:&str) -> Result<Unit> {
    let groups:Vec<&str> = text.split(' ').collect();
    if groups.len() != BYTES_PER_UNIT {
        return Err(ParseBitSetError::ByteCount { unit, found: groups.len() })
    }
    let mut value:Unit = 0;
    for (byte,group) in groups.into_iter().enumerate() {
        let found = group.chars().count();
        if found != BYTE_DIGITS {
            return Err(ParseBitSetError::ByteWidth { unit, byte, found })
        }
        for digit in group.chars() {
            let bit = match digit {
                '0' => 0,
                '1' => 1,
                _ => return Err(ParseBitSetError::InvalidDigit { unit, byte, digit })
            };
            value = (value << 1) | bit;
        }
    }
    Ok(value)
}

impl<T:Element> FromStr for BitSet<T> {
    type Err = ParseBitSetError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(ParseBitSetError::Empty)
        }
        let mut units = vec![];
        let mut rest = s;
        while !rest.is_empty() {
            let unit = units.len();
            let (text,tail) = rest
                .split_once(UNIT_SEPARATOR)
                .ok_or(ParseBitSetError::MissingTrailingSeparator { unit })?;
            units.push(parse_unit(unit,text)?);
            rest = tail;
        }
        Ok(BitSet::from_units(units))
    }
}

#[cfg(test)]
mod tests {
    use super::{BitSet,ParseBitSetError};
    use rand::Rng;

    fn zero_bytes(n:usize) -> String {
        "00000000 ".repeat(n)
    }

    #[test]
    fn test_render_empty() {
        let set = BitSet::<u64>::new();
        let expected = format!("{}00000000, ",zero_bytes(7));
        assert_eq!(set.to_string(),expected);
        assert_eq!(format!("{set:?}"),expected);
    }
    #[test]
    fn test_render_5_and_70() {
        let mut set = BitSet::<u64>::new();
        set.add(5);
        set.add(70);
        let zeros = zero_bytes(7);
        assert_eq!(set.to_string(),format!("{zeros}00100000, {zeros}01000000, "));
    }
    #[test]
    fn test_render_byte_order() {
        let mut set = BitSet::<u8>::new();
        //bit 63 is the top bit of the first printed byte
        set.add(63);
        set.add(8);
        let expected = format!("10000000 {}00000001 00000000, ",zero_bytes(5));
        assert_eq!(set.to_string(),expected);
    }
    #[test]
    fn test_render_sizes() {
        let set = BitSet::with_max(200u32);
        let text = set.to_string();
        assert!(text.ends_with(", "));
        assert_eq!(text.matches(", ").count(),4);
        // 4 units * (64 digits + 7 spaces + ", ")
        assert_eq!(text.len(),4*(64 + 7 + 2));
    }
    #[test]
    fn test_parse() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let mut set = BitSet::<u64>::new();
            for _ in 0..rng.random_range(0..200) {
                set.add(rng.random_range(0..2000));
            }
            let parsed:BitSet<u64> = set.to_string().parse().unwrap();
            assert_eq!(parsed,set);
            assert_eq!(parsed.size(),set.size());
        }
    }
    #[test]
    fn test_parse_errors() {
        let good = format!("{}00000001, ",zero_bytes(7));
        assert!(good.parse::<BitSet<u16>>().unwrap().contains(0));

        assert_eq!("".parse::<BitSet<u64>>(),Err(ParseBitSetError::Empty));

        let trimmed = good.trim_end_matches(", ");
        assert_eq!(trimmed.parse::<BitSet<u64>>(),
            Err(ParseBitSetError::MissingTrailingSeparator { unit: 0 }));

        let twice = format!("{good}{trimmed}");
        assert_eq!(twice.parse::<BitSet<u64>>(),
            Err(ParseBitSetError::MissingTrailingSeparator { unit: 1 }));

        let short = format!("{}00000001, ",zero_bytes(6));
        assert_eq!(short.parse::<BitSet<u64>>(),
            Err(ParseBitSetError::ByteCount { unit: 0, found: 7 }));

        let narrow = format!("{}0000001, ",zero_bytes(7));
        assert_eq!(narrow.parse::<BitSet<u64>>(),
            Err(ParseBitSetError::ByteWidth { unit: 0, byte: 7, found: 7 }));

        let bad_digit = format!("{}00000002, ",zero_bytes(7));
        assert_eq!(bad_digit.parse::<BitSet<u64>>(),
            Err(ParseBitSetError::InvalidDigit { unit: 0, byte: 7, digit: '2' }));
    }
    #[test]
    fn test_error_message() {
        let err = ParseBitSetError::ByteCount { unit: 2, found: 3 };
        assert_eq!(err.to_string(),"Unit 2 has 3 byte groups, expected 8");
    }
}
