/// Whitespace-delimited field lexer for PLG records
use nom::{
    branch::alt,
    bytes::complete::{is_not, tag_no_case},
    character::complete::{digit1, hex_digit1, i64 as signed, space0},
    combinator::{all_consuming, map_res},
    number::complete::float,
    sequence::preceded,
    IResult,
};

/// Iterator over the whitespace-separated tokens of one logical line
pub struct Fields<'a> {
    rest: &'a str,
}

impl<'a> Fields<'a> {
    pub fn new(line: &'a str) -> Self {
        Self { rest: line }
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        match next_token(self.rest) {
            Ok((rest, token)) => {
                self.rest = rest;
                Some(token)
            }
            Err(_) => {
                self.rest = "";
                None
            }
        }
    }
}

fn next_token(input: &str) -> IResult<&str, &str> {
    preceded(space0, is_not(" \t"))(input)
}

/// Parse a whole token as a float
pub fn parse_f32(token: &str) -> Option<f32> {
    whole_float(token).ok().map(|(_, value)| value)
}

/// Parse a whole token as a signed decimal integer
pub fn parse_int(token: &str) -> Option<i64> {
    whole_int(token).ok().map(|(_, value)| value)
}

/// Parse a color descriptor: hexadecimal after a `0x`/`0X` prefix, decimal otherwise
pub fn parse_color_descriptor(token: &str) -> Option<u32> {
    all_consuming(alt((hex_descriptor, decimal_descriptor)))(token)
        .ok()
        .map(|(_, value)| value)
}

fn whole_float(input: &str) -> IResult<&str, f32> {
    all_consuming(float)(input)
}

fn whole_int(input: &str) -> IResult<&str, i64> {
    all_consuming(signed)(input)
}

fn hex_descriptor(input: &str) -> IResult<&str, u32> {
    map_res(preceded(tag_no_case("0x"), hex_digit1), |digits: &str| {
        u32::from_str_radix(digits, 16)
    })(input)
}

fn decimal_descriptor(input: &str) -> IResult<&str, u32> {
    map_res(digit1, str::parse::<u32>)(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_split_on_spaces_and_tabs() {
        let fields: Vec<&str> = Fields::new("0x1001  4\t0 1 2   3").collect();
        assert_eq!(fields, vec!["0x1001", "4", "0", "1", "2", "3"]);
    }

    #[test]
    fn test_fields_empty_line() {
        assert_eq!(Fields::new("").count(), 0);
        assert_eq!(Fields::new("   ").count(), 0);
    }

    #[test]
    fn test_parse_f32() {
        assert_eq!(parse_f32("1.5"), Some(1.5));
        assert_eq!(parse_f32("-2"), Some(-2.0));
        assert_eq!(parse_f32("1e2"), Some(100.0));
        assert_eq!(parse_f32("1.5x"), None);
        assert_eq!(parse_f32("abc"), None);
        assert_eq!(parse_f32(""), None);
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int("0"), Some(0));
        assert_eq!(parse_int("4.0"), None);
        assert_eq!(parse_int("seven"), None);
    }

    #[test]
    fn test_parse_color_descriptor() {
        assert_eq!(parse_color_descriptor("0x1003"), Some(0x1003));
        assert_eq!(parse_color_descriptor("0X1aF"), Some(0x1af));
        assert_eq!(parse_color_descriptor("4099"), Some(4099));
        assert_eq!(parse_color_descriptor("0"), Some(0));
        assert_eq!(parse_color_descriptor("0x"), None);
        assert_eq!(parse_color_descriptor("0xZZ"), None);
        assert_eq!(parse_color_descriptor("-5"), None);
        assert_eq!(parse_color_descriptor("0x100000000"), None);
    }
}
