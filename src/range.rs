//! Array-instance ranges such as `[7:0]` and `[0x1f : 0]`.

use combine::error::ParseError;
use combine::stream::state::State;
use combine::*;

/// `[msb:lsb]` suffix on an instance name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRange {
    pub msb: i64,
    pub lsb: i64,
}

impl BitRange {
    /// Parses the text between the brackets. Anything but two integer
    /// literals separated by `:` yields `None`.
    pub fn parse(inside: &str) -> Option<BitRange> {
        let colon = inside.find(':')?;
        let msb = parse_int(&inside[..colon])?;
        let lsb = parse_int(&inside[colon + 1..])?;
        Some(BitRange { msb, lsb })
    }

    /// Number of instances the range replicates, `|msb - lsb| + 1`.
    pub fn multiplicity(&self) -> u64 {
        self.msb.abs_diff(self.lsb).saturating_add(1)
    }
}

fn parse_int(s: &str) -> Option<i64> {
    int_literal()
        .easy_parse(State::new(s))
        .ok()
        .and_then(|(value, _)| value)
}

/// `(["_"] digit)+` in the given radix.
fn underscored_digits<I>(radix: u32) -> impl Parser<Input = I, Output = String>
where
    I: Stream<Item = char>,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    many1::<String, _>(attempt(
        optional(token('_')).with(satisfy(move |c: char| c.is_digit(radix))),
    ))
}

parser! {
    fn int_literal[I]()(I) -> Option<i64>
    where [I: Stream<Item = char>]
    {
        use combine::parser::char::{char as cmb_char, spaces};

        let radix = |r: u32| move |digits: String| (r, digits);
        let prefixed = cmb_char('0').with(choice((
            one_of("xX".chars()).with(underscored_digits(16)).map(radix(16)),
            one_of("oO".chars()).with(underscored_digits(8)).map(radix(8)),
            one_of("bB".chars()).with(underscored_digits(2)).map(radix(2)),
            skip_many(attempt(optional(cmb_char('_')).with(cmb_char('0'))))
                .map(|_| (10, String::from("0"))),
        )));
        let decimal = satisfy(|c: char| c.is_ascii_digit() && c != '0')
            .and(many::<String, _>(attempt(
                optional(cmb_char('_')).with(satisfy(|c: char| c.is_ascii_digit())),
            )))
            .map(|(first, rest): (char, String)| {
                let mut digits = String::with_capacity(rest.len() + 1);
                digits.push(first);
                digits.push_str(&rest);
                (10, digits)
            });

        spaces()
            .with(optional(one_of("+-".chars())))
            .and(prefixed.or(decimal))
            .skip(spaces())
            .skip(eof())
            .map(|(sign, (radix, digits)): (Option<char>, (u32, String))| {
                let signed = if sign == Some('-') {
                    format!("-{}", digits)
                } else {
                    digits
                };
                i64::from_str_radix(&signed, radix).ok()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(s: &str) -> Option<(i64, i64)> {
        BitRange::parse(s).map(|r| (r.msb, r.lsb))
    }

    #[test]
    fn decimal_ranges() {
        assert_eq!(range("3:0"), Some((3, 0)));
        assert_eq!(range(" 0 : 15 "), Some((0, 15)));
        assert_eq!(range("-2:+2"), Some((-2, 2)));
    }

    #[test]
    fn prefixed_literals() {
        assert_eq!(range("0x1F:0b0"), Some((31, 0)));
        assert_eq!(range("0o17:0_0"), Some((15, 0)));
        assert_eq!(range("1_000:0X_a"), Some((1000, 10)));
    }

    #[test]
    fn rejects_non_literals() {
        assert_eq!(range("W-1:0"), None);
        assert_eq!(range("4'd3:0"), None);
        assert_eq!(range("07:0"), None);
        assert_eq!(range("1__0:0"), None);
        assert_eq!(range("10_:0"), None);
        assert_eq!(range("3:0:1"), None);
        assert_eq!(range("3"), None);
        assert_eq!(range(":"), None);
    }

    #[test]
    fn overflow_is_rejected() {
        assert_eq!(range("99999999999999999999:0"), None);
    }

    #[test]
    fn multiplicity_is_inclusive_and_symmetric() {
        assert_eq!(BitRange { msb: 3, lsb: 0 }.multiplicity(), 4);
        assert_eq!(BitRange { msb: 0, lsb: 3 }.multiplicity(), 4);
        assert_eq!(BitRange { msb: 5, lsb: 5 }.multiplicity(), 1);
        assert_eq!(BitRange { msb: -1, lsb: 1 }.multiplicity(), 3);
    }
}
