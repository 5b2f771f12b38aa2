use crate::error::CheckError;

/// Parse a zpool size literal ("2T", "512M", "1,5G") into gigabytes.
///
/// The value is a numeric body (comma accepted as decimal separator, as
/// printed under some locales) followed by exactly one unit suffix.
/// Petabyte suffixes are not supported.
pub fn to_gb(raw: &str) -> Result<f64, CheckError> {
    let norm = raw.trim().replace(',', ".");
    let suffix = norm.chars().last().ok_or_else(|| malformed(raw))?;
    let body = &norm[..norm.len() - suffix.len_utf8()];
    let value: f64 = body.parse().map_err(|_| malformed(raw))?;

    match suffix {
        'K' => Ok(value / (1024.0 * 1024.0)),
        'M' => Ok(value / 1024.0),
        'G' => Ok(value),
        'T' => Ok(value * 1024.0),
        _   => Err(malformed(raw)),
    }
}

fn malformed(raw: &str) -> CheckError {
    CheckError::MalformedSizeValue(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terabytes_scale_up() {
        assert_eq!(to_gb("2T").unwrap(), 2048.0);
    }

    #[test]
    fn megabytes_scale_down() {
        assert_eq!(to_gb("512M").unwrap(), 0.5);
    }

    #[test]
    fn gigabytes_pass_through() {
        assert_eq!(to_gb("3.5G").unwrap(), 3.5);
    }

    #[test]
    fn kilobytes_scale_down_twice() {
        assert_eq!(to_gb("1024K").unwrap(), 1.0 / 1024.0);
    }

    #[test]
    fn comma_decimal_separator_accepted() {
        assert_eq!(to_gb("1,5G").unwrap(), 1.5);
    }

    #[test]
    fn unknown_suffix_is_malformed() {
        assert!(matches!(to_gb("5P"), Err(CheckError::MalformedSizeValue(_))));
        assert!(matches!(to_gb("12%"), Err(CheckError::MalformedSizeValue(_))));
    }

    #[test]
    fn non_numeric_body_is_malformed() {
        assert!(matches!(to_gb("-"), Err(CheckError::MalformedSizeValue(_))));
        assert!(matches!(to_gb("G"), Err(CheckError::MalformedSizeValue(_))));
    }

    #[test]
    fn empty_string_is_malformed() {
        assert!(matches!(to_gb(""), Err(CheckError::MalformedSizeValue(_))));
    }
}
