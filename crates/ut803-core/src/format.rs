//! Magnitude scaling for the live monitor line.

/// Scale a value into a convenient magnitude and prepend the matching SI
/// prefix to the unit. Zero passes through unchanged; the prefix is picked
/// on the absolute value so negative readings scale like positive ones.
///
/// # Examples
/// ```
/// use ut803_core::format::scale_for_display;
///
/// assert_eq!(scale_for_display(1500.0, "Hz"), (1.5, "kHz".to_string()));
/// assert_eq!(scale_for_display(0.0, "V"), (0.0, "V".to_string()));
/// ```
pub fn scale_for_display(value: f64, unit: &str) -> (f64, String) {
    if value == 0.0 {
        return (value, unit.to_string());
    }
    let magnitude = value.abs();
    let (factor, prefix) = if magnitude < 1e-12 {
        (1e12, "p")
    } else if magnitude < 1e-6 {
        (1e9, "n")
    } else if magnitude < 1e-3 {
        (1e6, "u")
    } else if magnitude < 1.0 {
        (1e3, "m")
    } else if magnitude < 1e3 {
        return (value, unit.to_string());
    } else if magnitude < 1e6 {
        (1e-3, "k")
    } else {
        (1e-6, "M")
    };
    (value * factor, format!("{prefix}{unit}"))
}
