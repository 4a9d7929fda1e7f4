//! Syntactic decomposition of numeric literals.
//!
//! [`split_number`] breaks a lexed numeric literal into its parts without
//! computing its value; [`join_number`] is its inverse. The value-level
//! conversion (with base and exponent applied) lives in the lexer's cooking
//! layer — this module is pure string surgery so it can be reused by the
//! serializer and by round-trip tests.

/// Classification of a numeric literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FloatLiteralKind {
    /// An ordinary finite literal.
    Finite,
    /// `nan`
    NotANumber,
    /// `inf` or `+inf`
    PositiveInfinity,
    /// `-inf`
    NegativeInfinity,
}

/// Radix selected by a numeric literal's prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumberBase {
    Decimal,
    Hex,
    Octal,
    Binary,
}

impl NumberBase {
    /// Radix for `from_str_radix`.
    pub fn radix(self) -> u32 {
        match self {
            NumberBase::Decimal => 10,
            NumberBase::Hex => 16,
            NumberBase::Octal => 8,
            NumberBase::Binary => 2,
        }
    }

    /// Canonical lowercase prefix (`""` for decimal).
    pub fn prefix(self) -> &'static str {
        match self {
            NumberBase::Decimal => "",
            NumberBase::Hex => "0x",
            NumberBase::Octal => "0o",
            NumberBase::Binary => "0b",
        }
    }
}

/// The parts of a numeric literal, each borrowing the literal text.
///
/// Invariant: [`join_number`] over these parts reproduces the original
/// literal byte-for-byte. For `nan`/`inf` literals, `int_digits` holds the
/// literal word so the invariant holds uniformly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberSplit<'a> {
    /// `""`, `"+"`, or `"-"`.
    pub sign: &'a str,
    /// Base prefix as written (`"0x"`, `"0X"`, …), `""` for decimal.
    pub prefix: &'a str,
    /// Integer digits (or the word `inf`/`nan`).
    pub int_digits: &'a str,
    /// Fractional digits, without the leading `.`; empty if none.
    pub frac_digits: &'a str,
    /// Raw exponent substring including `e`/`E` and sign (`"e-2"`), empty if none.
    pub exp: &'a str,
    /// Parsed exponent value; `0` when absent.
    pub exponent: i32,
    /// Unit suffix (`px`, `%`), empty if none.
    pub suffix: &'a str,
    pub kind: FloatLiteralKind,
}

impl NumberSplit<'_> {
    /// Radix of the literal.
    pub fn base(&self) -> NumberBase {
        match self.prefix.as_bytes().get(1) {
            Some(b'x' | b'X') => NumberBase::Hex,
            Some(b'o' | b'O') => NumberBase::Octal,
            Some(b'b' | b'B') => NumberBase::Binary,
            _ => NumberBase::Decimal,
        }
    }

    /// `true` when the literal denotes a floating-point value: it has a
    /// fractional part or a negative exponent, or is `nan`/`inf`.
    pub fn is_floating_point(&self) -> bool {
        self.kind != FloatLiteralKind::Finite || !self.frac_digits.is_empty() || self.exponent < 0
    }

    /// `true` when the literal is negative.
    pub fn is_negative(&self) -> bool {
        self.sign == "-"
    }
}

/// Reconstruct the original literal from its parts.
pub fn join_number(split: &NumberSplit<'_>) -> String {
    let mut out = String::with_capacity(
        split.sign.len()
            + split.prefix.len()
            + split.int_digits.len()
            + split.frac_digits.len()
            + split.exp.len()
            + split.suffix.len()
            + 1,
    );
    out.push_str(split.sign);
    out.push_str(split.prefix);
    out.push_str(split.int_digits);
    if !split.frac_digits.is_empty() {
        out.push('.');
        out.push_str(split.frac_digits);
    }
    out.push_str(split.exp);
    out.push_str(split.suffix);
    out
}

fn digit_run(text: &str, radix: u32) -> usize {
    text.bytes()
        .take_while(|b| (*b as char).is_digit(radix))
        .count()
}

fn valid_suffix(suffix: &str) -> bool {
    if suffix == "%" {
        return true;
    }
    let mut chars = suffix.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Split a numeric literal into its syntactic parts.
///
/// Accepts the full grammar: optional sign, optional base prefix (integers
/// only), digits, optional fraction, optional exponent, optional suffix,
/// plus the literals `nan`, `inf`, `+inf`, `-inf`.
///
/// Errors return a plain message; callers attach the source span.
pub fn split_number(text: &str) -> Result<NumberSplit<'_>, String> {
    let (sign, rest) = match text.as_bytes().first() {
        Some(b'+') => (&text[..1], &text[1..]),
        Some(b'-') => (&text[..1], &text[1..]),
        Some(_) => (&text[..0], text),
        None => return Err("empty numeric literal".to_string()),
    };

    let empty = &text[..0];
    if rest == "inf" {
        let kind = if sign == "-" {
            FloatLiteralKind::NegativeInfinity
        } else {
            FloatLiteralKind::PositiveInfinity
        };
        return Ok(NumberSplit {
            sign,
            prefix: empty,
            int_digits: rest,
            frac_digits: empty,
            exp: empty,
            exponent: 0,
            suffix: empty,
            kind,
        });
    }
    if rest == "nan" {
        return Ok(NumberSplit {
            sign,
            prefix: empty,
            int_digits: rest,
            frac_digits: empty,
            exp: empty,
            exponent: 0,
            suffix: empty,
            kind: FloatLiteralKind::NotANumber,
        });
    }

    // Base prefix (integer literals only). The prefix is taken only when a
    // digit of that base follows, so `0b` stays the decimal `0` with suffix
    // `b` rather than an empty binary literal.
    let bytes = rest.as_bytes();
    let (prefix, base, digits_start) = if bytes.first() == Some(&b'0') {
        let base = match bytes.get(1) {
            Some(b'x' | b'X') => Some(NumberBase::Hex),
            Some(b'o' | b'O') => Some(NumberBase::Octal),
            Some(b'b' | b'B') => Some(NumberBase::Binary),
            _ => None,
        };
        match base {
            Some(base)
                if bytes
                    .get(2)
                    .is_some_and(|b| (*b as char).is_digit(base.radix())) =>
            {
                (&rest[..2], base, 2)
            }
            _ => (&rest[..0], NumberBase::Decimal, 0),
        }
    } else {
        (&rest[..0], NumberBase::Decimal, 0)
    };

    let after_prefix = &rest[digits_start..];
    let int_len = digit_run(after_prefix, base.radix());
    if int_len == 0 {
        return Err(format!("invalid numeric literal {text:?}"));
    }
    let int_digits = &after_prefix[..int_len];
    let mut cursor = &after_prefix[int_len..];

    // Fraction and exponent apply to decimal literals only; for prefixed
    // literals anything left over must be a suffix.
    let mut frac_digits = empty;
    let mut exp = empty;
    let mut exponent = 0i32;
    if base == NumberBase::Decimal {
        if cursor.as_bytes().first() == Some(&b'.') {
            let frac_len = digit_run(&cursor[1..], 10);
            if frac_len == 0 {
                return Err("expected digit after decimal point".to_string());
            }
            frac_digits = &cursor[1..1 + frac_len];
            cursor = &cursor[1 + frac_len..];
        }
        if matches!(cursor.as_bytes().first(), Some(b'e' | b'E')) {
            let exp_body = &cursor[1..];
            let (exp_sign_len, exp_digits_part) = match exp_body.as_bytes().first() {
                Some(b'+' | b'-') => (1, &exp_body[1..]),
                _ => (0, exp_body),
            };
            let exp_digit_len = digit_run(exp_digits_part, 10);
            if exp_digit_len > 0 {
                let total = 1 + exp_sign_len + exp_digit_len;
                exp = &cursor[..total];
                exponent = exp[1..]
                    .parse::<i32>()
                    .map_err(|_| format!("exponent out of range in {text:?}"))?;
                cursor = &cursor[total..];
            }
            // No digits after `e` — the `e` starts a suffix instead.
        }
    }

    let suffix = cursor;
    if !suffix.is_empty() && !valid_suffix(suffix) {
        return Err(format!("invalid numeric suffix {suffix:?}"));
    }

    Ok(NumberSplit {
        sign,
        prefix,
        int_digits,
        frac_digits,
        exp,
        exponent,
        suffix,
        kind: FloatLiteralKind::Finite,
    })
}
