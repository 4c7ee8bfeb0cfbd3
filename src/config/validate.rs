//! Sanity checks applied to a loaded configuration.

use crate::config::Config;
use crate::constants::quantile;
use crate::error::{Error, Result};

/// Check every section of `config`, reporting the first problem found.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_detection(config)?;
    validate_filters(config)?;
    Ok(())
}

/// Validate detection settings.
fn validate_detection(config: &Config) -> Result<()> {
    let detection = &config.detection;

    // The rank-select threshold needs a quantile strictly inside (0, 1).
    if detection.quantile <= quantile::MIN || detection.quantile >= quantile::MAX {
        return Err(Error::ConfigInvalid {
            message: format!(
                "quantile must be strictly between {} and {}, got {}",
                quantile::MIN,
                quantile::MAX,
                detection.quantile
            ),
        });
    }

    if detection.merge_gap < 0.0 {
        return Err(Error::ConfigInvalid {
            message: format!("merge_gap must be non-negative, got {}", detection.merge_gap),
        });
    }

    Ok(())
}

/// Validate filter settings.
fn validate_filters(config: &Config) -> Result<()> {
    let filters = &config.filters;

    for (name, value) in [
        ("background_quantile", filters.background_quantile),
        ("peak_quantile", filters.peak_quantile),
    ] {
        if !(quantile::MIN..=quantile::MAX).contains(&value) {
            return Err(Error::ConfigInvalid {
                message: format!(
                    "{name} must be between {} and {}, got {value}",
                    quantile::MIN,
                    quantile::MAX
                ),
            });
        }
    }

    if filters.trim_top_db <= 0.0 {
        return Err(Error::ConfigInvalid {
            message: format!("trim_top_db must be positive, got {}", filters.trim_top_db),
        });
    }

    if filters.marker_buffer < 0.0 {
        return Err(Error::ConfigInvalid {
            message: format!(
                "marker_buffer must be non-negative, got {}",
                filters.marker_buffer
            ),
        });
    }

    if filters.speed <= 0.0 || !filters.speed.is_finite() {
        return Err(Error::ConfigInvalid {
            message: format!("speed must be a positive number, got {}", filters.speed),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_quantile_bounds_are_exclusive() {
        let mut config = Config::default();
        config.detection.quantile = 1.0;
        assert!(validate_config(&config).is_err());

        config.detection.quantile = 0.0;
        assert!(validate_config(&config).is_err());

        config.detection.quantile = 0.999;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_negative_merge_gap() {
        let mut config = Config::default();
        config.detection.merge_gap = -1.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_filter_quantiles_inclusive_bounds() {
        let mut config = Config::default();
        config.filters.background_quantile = 0.0;
        config.filters.peak_quantile = 1.0;
        assert!(validate_config(&config).is_ok());

        config.filters.background_quantile = -0.1;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_trim_top_db() {
        let mut config = Config::default();
        config.filters.trim_top_db = 0.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_negative_marker_buffer() {
        let mut config = Config::default();
        config.filters.marker_buffer = -2.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_speed() {
        let mut config = Config::default();
        config.filters.speed = 0.0;
        assert!(validate_config(&config).is_err());

        config.filters.speed = f64::INFINITY;
        assert!(validate_config(&config).is_err());

        config.filters.speed = 1.25;
        assert!(validate_config(&config).is_ok());
    }
}
