/// Resource names are cut to this many characters
pub const RESOURCE_NAME_LIMIT: usize = 30;

const BYTES_PER_KB: i128 = 1000;
const BYTES_PER_MB: i128 = 1024 * 1024;
/// Milliseconds to seconds moves the decimal point this many places
const MS_PER_SECOND_DIGITS: usize = 3;

/// Bytes as kilobytes (1000 bytes), 2 decimals
pub fn format_kb(bytes: i64) -> String {
    format_ratio(i128::from(bytes), BYTES_PER_KB, 2)
}

/// Bytes as megabytes (1024 * 1024 bytes), 2 decimals
pub fn format_mb(bytes: i128) -> String {
    format_ratio(bytes, BYTES_PER_MB, 2)
}

/// Milliseconds as seconds, 3 decimals
pub fn format_seconds(ms: f64) -> String {
    if !ms.is_finite() {
        return ms.to_string();
    }
    round_decimal_text(&ms.to_string(), MS_PER_SECOND_DIGITS, 3)
}

/// `numerator / denominator` rounded half away from zero to `places`
/// decimals, in integer arithmetic. `denominator` must be positive.
fn format_ratio(numerator: i128, denominator: i128, places: u32) -> String {
    let scaled = numerator.saturating_mul(10i128.pow(places));
    let mut units = scaled / denominator;
    if (scaled % denominator).abs().saturating_mul(2) >= denominator {
        units += scaled.signum();
    }

    let magnitude = units.unsigned_abs();
    let factor = 10u128.pow(places);
    let fraction = format!("{:0width$}", magnitude % factor, width = places as usize);
    join_decimal(units < 0, &(magnitude / factor).to_string(), &fraction)
}

/// Divide the plain decimal number in `text` by `10^shift` and round the
/// result half away from zero to `places` decimals. Works on the digits
/// themselves, so `1.005` is a true half and rounds to `1.01`.
fn round_decimal_text(text: &str, shift: usize, places: usize) -> String {
    let (negative, magnitude) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (whole, fraction) = magnitude.split_once('.').unwrap_or((magnitude, ""));

    let mut digits: Vec<u8> = whole
        .bytes()
        .chain(fraction.bytes())
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();

    // position of the decimal point within `digits`, at least one whole digit
    let mut point = whole.len() as isize - shift as isize;
    while point < 1 {
        digits.insert(0, 0);
        point += 1;
    }
    let mut point = point as usize;

    digits.resize(digits.len().max(point + places + 1), 0);
    let round_up = digits[point + places] >= 5;
    digits.truncate(point + places);

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
            point += 1;
        }
    }

    let render = |part: &[u8]| part.iter().map(|d| char::from(b'0' + d)).collect::<String>();
    join_decimal(negative, &render(&digits[..point]), &render(&digits[point..]))
}

/// Shortest form of `whole.fraction`, keeping at least one fractional
/// digit: `0` prints as `0.0`, `52.950` as `52.95`. A value that rounded
/// to zero carries no sign.
fn join_decimal(negative: bool, whole: &str, fraction: &str) -> String {
    let whole = match whole.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };
    let fraction = match fraction.trim_end_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };

    if negative && (whole != "0" || fraction != "0") {
        format!("-{}.{}", whole, fraction)
    } else {
        format!("{}.{}", whole, fraction)
    }
}

/// The part of `url` from its last `/` onwards, or the whole URL when it
/// ends in `/` or has no `/` at all. Cut to [`RESOURCE_NAME_LIMIT`]
/// characters.
pub fn resource_name(url: &str) -> String {
    let resource = if url.ends_with('/') {
        url
    } else {
        url.rfind('/').map_or(url, |idx| &url[idx..])
    };

    resource.chars().take(RESOURCE_NAME_LIMIT).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_kb() {
        assert_eq!(format_kb(0), "0.0");
        assert_eq!(format_kb(52_949), "52.95");
        assert_eq!(format_kb(1_060), "1.06");
        assert_eq!(format_kb(110), "0.11");
        assert_eq!(format_kb(2_000), "2.0");
    }

    #[test]
    fn test_format_mb() {
        assert_eq!(format_mb(380_160), "0.36");
        assert_eq!(format_mb(1024 * 1024), "1.0");
        assert_eq!(format_mb(0), "0.0");
        assert_eq!(format_mb(524_288), "0.5");
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(54.0), "0.054");
        assert_eq!(format_seconds(6745.0), "6.745");
        assert_eq!(format_seconds(1060.0), "1.06");
        assert_eq!(format_seconds(2290.0), "2.29");
        assert_eq!(format_seconds(3000.0), "3.0");
        assert_eq!(format_seconds(12.3456), "0.012");
    }

    #[test]
    fn test_exact_halves_round_away_from_zero() {
        assert_eq!(format_kb(1_005), "1.01");
        assert_eq!(format_kb(1_015), "1.02");
        assert_eq!(format_kb(125), "0.13");
        assert_eq!(format_kb(-1_005), "-1.01");
        assert_eq!(format_seconds(1_000.5), "1.001");
        assert_eq!(format_seconds(-0.5), "-0.001");
    }

    #[test]
    fn test_rounding_to_zero_drops_the_sign() {
        assert_eq!(format_kb(-1), "0.0");
        assert_eq!(format_seconds(-0.4), "0.0");
    }

    #[test]
    fn test_rounding_carries_into_whole_part() {
        assert_eq!(format_kb(999_995), "1000.0");
        assert_eq!(format_seconds(999.9995), "1.0");
        assert_eq!(format_seconds(9_999.6), "10.0");
    }

    #[test]
    fn test_format_mb_handles_totals_beyond_i64() {
        let total = i128::from(i64::MAX) + 1;
        assert_eq!(format_mb(total), "8796093022208.0");
    }

    #[test]
    fn test_resource_is_last_segment() {
        assert_eq!(resource_name("http://a.com/x/y.js"), "/y.js");
        assert_eq!(
            resource_name("http://www.janodvarko.cz/blog/index.php"),
            "/index.php"
        );
    }

    #[test]
    fn test_trailing_slash_keeps_full_url() {
        assert_eq!(resource_name("http://a.com/"), "http://a.com/");
    }

    #[test]
    fn test_trailing_slash_url_is_truncated() {
        let resource = resource_name("http://www.janodvarko.cz/blog/2013/05/");
        assert_eq!(resource, "http://www.janodvarko.cz/blog/");
    }

    #[test]
    fn test_long_resource_is_truncated_to_thirty_chars() {
        let segment = "a".repeat(50);
        let url = format!("http://a.com/{}", segment);

        let resource = resource_name(&url);
        assert_eq!(resource.chars().count(), 30);
        assert!(resource.starts_with("/aaaa"));
    }

    #[test]
    fn test_truncation_counts_characters() {
        let url = format!("http://a.com/{}", "é".repeat(40));
        assert_eq!(resource_name(&url).chars().count(), 30);
    }

    #[test]
    fn test_url_without_slash_is_kept() {
        assert_eq!(resource_name("about:blank"), "about:blank");
    }
}
