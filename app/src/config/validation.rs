//! Setting value validation.

use dot_pattern::params::parse_color;

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "GRID_SIZE" => validate_int_range(value, 5, 50)?,
        "PADDING" => validate_int_range(value, 0, 49)?,
        "CONTRAST" | "SATURATION" => validate_float_range(value, 0.0, 4.0)?,
        "PREVIEW_SIZE" => validate_int_range(value, 16, 1024)?,
        "DISPLAY_WIDTH" => validate_int_range(value, 1, 8192)?,
        "BACKGROUND_COLOR" | "ACCENT_COLOR" => {
            if parse_color(value).is_none() {
                return Err("must be a hex color like #1e293b, or 'black' / 'white'".into());
            }
        }
        "EXPORT_FILE_NAME" => {
            if value.trim().is_empty() || value.len() > 255 {
                return Err("file name must be 1-255 characters".into());
            }
            if value.contains(['/', '\\']) {
                return Err("file name must not contain path separators".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: u32, max: u32) -> Result<(), String> {
    let v: u32 = value.trim().parse().map_err(|_| "must be a non-negative integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

fn validate_float_range(value: &str, min: f32, max: f32) -> Result<(), String> {
    let v: f32 = value.trim().parse().map_err(|_| "must be a float")?;
    if !v.is_finite() || v < min || v > max {
        return Err(format!("must be between {min:.1} and {max:.1}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_grid_size() {
        assert!(validate_setting("GRID_SIZE", "5").is_ok());
        assert!(validate_setting("GRID_SIZE", "50").is_ok());
        assert!(validate_setting("GRID_SIZE", "4").is_err());
        assert!(validate_setting("GRID_SIZE", "51").is_err());
        assert!(validate_setting("GRID_SIZE", "ten").is_err());
        assert!(validate_setting("GRID_SIZE", "-3").is_err());
    }

    #[test]
    fn test_valid_factors() {
        assert!(validate_setting("CONTRAST", "1.0").is_ok());
        assert!(validate_setting("SATURATION", "0").is_ok());
        assert!(validate_setting("SATURATION", "4.0").is_ok());
        assert!(validate_setting("CONTRAST", "4.5").is_err());
        assert!(validate_setting("CONTRAST", "NaN").is_err());
        assert!(validate_setting("SATURATION", "-0.1").is_err());
    }

    #[test]
    fn test_valid_colors() {
        assert!(validate_setting("BACKGROUND_COLOR", "#000000").is_ok());
        assert!(validate_setting("BACKGROUND_COLOR", "white").is_ok());
        assert!(validate_setting("ACCENT_COLOR", "#3B82F6").is_ok());
        assert!(validate_setting("ACCENT_COLOR", "blue-ish").is_err());
    }

    #[test]
    fn test_valid_export_file_name() {
        assert!(validate_setting("EXPORT_FILE_NAME", "dots.png").is_ok());
        assert!(validate_setting("EXPORT_FILE_NAME", "  ").is_err());
        assert!(validate_setting("EXPORT_FILE_NAME", "../dots.png").is_err());
    }

    #[test]
    fn test_unknown_keys_are_accepted() {
        assert!(validate_setting("SOMETHING_ELSE", "whatever").is_ok());
    }
}
