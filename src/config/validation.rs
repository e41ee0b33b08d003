use super::models::Config;
use crate::humanize::HumanDuration;
use thiserror::Error;

/// Upper bound on the pause between chart calls
const MAX_CALL_DELAY: HumanDuration = HumanDuration(std::time::Duration::from_secs(60));

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} must be an http:// or https:// URL, got '{value}'")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("astro_api.call_delay ({actual}) exceeds limit of {limit}")]
    CallDelayTooLong {
        actual: HumanDuration,
        limit: HumanDuration,
    },
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_urls(config)?;
    validate_timeouts(config)?;
    validate_call_delay(config)?;
    Ok(())
}

fn validate_urls(config: &Config) -> Result<(), ValidationError> {
    let urls = [
        ("astro_api.base_url", &config.astro_api.base_url),
        ("geocode.url", &config.geocode.url),
    ];

    for (field, value) in urls {
        if !value.starts_with("http://") && !value.starts_with("https://") {
            return Err(ValidationError::InvalidUrl {
                field,
                value: value.clone(),
            });
        }
    }

    Ok(())
}

fn validate_timeouts(config: &Config) -> Result<(), ValidationError> {
    if config.astro_api.request_timeout.is_zero() {
        return Err(ValidationError::ZeroTimeout {
            field: "astro_api.request_timeout",
        });
    }
    if config.geocode.request_timeout.is_zero() {
        return Err(ValidationError::ZeroTimeout {
            field: "geocode.request_timeout",
        });
    }
    Ok(())
}

fn validate_call_delay(config: &Config) -> Result<(), ValidationError> {
    if config.astro_api.call_delay > MAX_CALL_DELAY {
        return Err(ValidationError::CallDelayTooLong {
            actual: config.astro_api.call_delay,
            limit: MAX_CALL_DELAY,
        });
    }
    Ok(())
}
