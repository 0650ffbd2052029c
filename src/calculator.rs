//! Newton's second law calculator (a = F / m)

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Please enter valid values!")]
    InvalidInput,
}

/// Acceleration in m/s² from force (N) and mass (kg) given as text.
///
/// Input is read like a form field: surrounding whitespace is ignored and a
/// numeric prefix is accepted ("12 kg" reads as 12). Mass must be positive.
pub fn acceleration(force: &str, mass: &str) -> Result<f64, CalcError> {
    let f = parse_leading_number(force).ok_or(CalcError::InvalidInput)?;
    let m = parse_leading_number(mass).ok_or(CalcError::InvalidInput)?;
    if m <= 0.0 {
        return Err(CalcError::InvalidInput);
    }
    Ok(f / m)
}

/// Result line shown under the form
pub fn format_acceleration(a: f64) -> String {
    format!("Acceleration: {:.2} m/s²", a)
}

fn parse_leading_number(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let mut ends: Vec<usize> = s.char_indices().map(|(i, _)| i).skip(1).collect();
    ends.push(s.len());
    ends.into_iter()
        .rev()
        .find_map(|end| s[..end].parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        let a = acceleration("20", "5").unwrap();
        assert_eq!(a, 4.0);
        assert_eq!(format_acceleration(a), "Acceleration: 4.00 m/s²");
        assert_eq!(format_acceleration(10.0 / 3.0), "Acceleration: 3.33 m/s²");
    }

    #[test]
    fn test_lenient_parsing() {
        assert_eq!(acceleration(" 10 ", "2kg").unwrap(), 5.0);
        assert_eq!(acceleration("-9.8", "1").unwrap(), -9.8);
        assert_eq!(acceleration("1e2", "4").unwrap(), 25.0);
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(acceleration("", "5"), Err(CalcError::InvalidInput));
        assert_eq!(acceleration("10", "abc"), Err(CalcError::InvalidInput));
        assert_eq!(acceleration("10", "0"), Err(CalcError::InvalidInput));
        assert_eq!(acceleration("10", "-2"), Err(CalcError::InvalidInput));
        assert_eq!(acceleration("nan", "2"), Err(CalcError::InvalidInput));
        assert_eq!(
            CalcError::InvalidInput.to_string(),
            "Please enter valid values!"
        );
    }
}
