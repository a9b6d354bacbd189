//! Coordinate formatting for generated G-code
//!
//! Generated coordinates always use two decimals and a period separator. Rust
//! formatting never consults the host locale; rounding is done here by hand
//! so that it is half-up on the shortest decimal representation of the value
//! (`1.005` -> `1.01`) rather than on its exact binary expansion.

/// Number of decimals emitted for machine coordinates
const COORDINATE_DECIMALS: usize = 2;

/// Format a coordinate with exactly two decimals
///
/// Non-finite values are rendered as `NaN`, `Infinity` or `-Infinity`;
/// validating them is up to whoever supplies the configuration.
pub fn format_coordinate(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() {
            "-Infinity".to_string()
        } else {
            "Infinity".to_string()
        };
    }

    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(
            frac_part
                .bytes()
                .chain(std::iter::repeat(b'0'))
                .take(COORDINATE_DECIMALS),
        )
        .map(|b| b - b'0')
        .collect();

    let round_up = frac_part
        .as_bytes()
        .get(COORDINATE_DECIMALS)
        .is_some_and(|&d| d >= b'5');

    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let split = digits.len() - COORDINATE_DECIMALS;
    let render = |ds: &[u8]| ds.iter().map(|d| char::from(b'0' + d)).collect::<String>();

    format!(
        "{}{}.{}",
        if value.is_sign_negative() { "-" } else { "" },
        render(&digits[..split]),
        render(&digits[split..])
    )
}
