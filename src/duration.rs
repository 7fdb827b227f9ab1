// ============================================================================
// Duration Text
// ============================================================================

/// Formats whole seconds as zero-padded `MM:SS`. Minutes do not wrap into
/// hours, so an hour reads `60:00`.
pub fn format_duration(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Inverse of [`format_duration`].
pub fn parse_duration(s: &str) -> Result<u32, String> {
    let (mins, secs) = s.trim().split_once(':').ok_or("Expected MM:SS")?;
    let mins: u32 = mins.parse().map_err(|_| "Invalid minutes")?;
    let secs: u32 = secs.parse().map_err(|_| "Invalid seconds")?;
    if secs >= 60 {
        return Err("Seconds must be below 60".into());
    }
    mins.checked_mul(60)
        .and_then(|m| m.checked_add(secs))
        .ok_or_else(|| "Duration too long".into())
}

/// Parses a command-line duration into seconds. Accepts `MM:SS` as well as
/// unit suffixes such as `25m`, `1.5h`, `1h30m` or `90s`; a bare number is
/// minutes. Fractions round to the nearest second.
pub fn parse_duration_arg(s: &str) -> Result<u32, String> {
    let s = s.trim().to_lowercase();
    if s.contains(':') {
        return positive(parse_duration(&s)?);
    }

    let mut total = 0.0;
    let mut num = String::new();

    for c in s.chars() {
        match c {
            '0'..='9' | '.' => num.push(c),
            'h' => { total += take(&mut num, "Invalid hours")? * 3600.0; }
            'm' => { total += take(&mut num, "Invalid minutes")? * 60.0; }
            's' => { total += take(&mut num, "Invalid seconds")?; }
            _ => return Err("Invalid format".into()),
        }
    }
    if !num.is_empty() {
        total += take(&mut num, "Invalid minutes")? * 60.0;
    }

    let total = total.round();
    if !total.is_finite() || total > u32::MAX as f64 {
        return Err("Duration too long".into());
    }
    positive(total as u32)
}

fn take(num: &mut String, err: &str) -> Result<f64, String> {
    let value = num.parse::<f64>().map_err(|_| err.to_string())?;
    num.clear();
    Ok(value)
}

fn positive(secs: u32) -> Result<u32, String> {
    if secs > 0 { Ok(secs) } else { Err("Duration must be > 0".into()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{BREAK_MAX_SECS, FOCUS_MAX_SECS};

    #[test]
    fn formats_zero_padded() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(59), "00:59");
        assert_eq!(format_duration(300), "05:00");
        assert_eq!(format_duration(1500), "25:00");
        assert_eq!(format_duration(3600), "60:00");
        assert_eq!(format_duration(61), "01:01");
    }

    #[test]
    fn parse_recovers_formatted_seconds() {
        for secs in 0..=FOCUS_MAX_SECS.max(BREAK_MAX_SECS) {
            assert_eq!(parse_duration(&format_duration(secs)), Ok(secs));
        }
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(parse_duration("25").is_err());
        assert!(parse_duration("aa:00").is_err());
        assert!(parse_duration("05:60").is_err());
        assert!(parse_duration("05:-1").is_err());
    }

    #[test]
    fn cli_units() {
        assert_eq!(parse_duration_arg("25m"), Ok(1500));
        assert_eq!(parse_duration_arg("1h"), Ok(3600));
        assert_eq!(parse_duration_arg("1h30m"), Ok(5400));
        assert_eq!(parse_duration_arg("90s"), Ok(90));
        assert_eq!(parse_duration_arg("5"), Ok(300));
        assert_eq!(parse_duration_arg(" 10M "), Ok(600));
        assert_eq!(parse_duration_arg("15:00"), Ok(900));
    }

    #[test]
    fn cli_fractional_units() {
        assert_eq!(parse_duration_arg("1.5h"), Ok(5400));
        assert_eq!(parse_duration_arg("2.5m"), Ok(150));
        assert_eq!(parse_duration_arg("0.5"), Ok(30));
        assert!(parse_duration_arg("1.2.3m").is_err());
    }

    #[test]
    fn cli_rejects_overflowing_values() {
        assert!(parse_duration_arg("9999999999999999h").is_err());
        assert!(parse_duration_arg("99999999999m").is_err());
        assert!(parse_duration_arg("4294967296s").is_err());
        assert_eq!(parse_duration_arg("4294967295s"), Ok(u32::MAX));
    }

    #[test]
    fn cli_rejects_zero_and_garbage() {
        assert!(parse_duration_arg("0m").is_err());
        assert!(parse_duration_arg("00:00").is_err());
        assert!(parse_duration_arg("m").is_err());
        assert!(parse_duration_arg("ten").is_err());
        assert!(parse_duration_arg("").is_err());
    }
}
