/// A rejected configuration.
///
/// Everything that would otherwise turn into NaN or an infinite loop during
/// interpolation is caught when the owning value is built.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// An extent that must be strictly positive and finite was not.
    NonPositiveExtent { name: &'static str, value: f32 },
    NegativeSpacing { value: f32 },
    ThresholdOutOfRange { value: f32 },
    ZeroVisibleDepth,
    NonPositiveDampenFactor { value: f32 },
    /// A channel value (opacity, scale, falloff) outside its legal range.
    ChannelOutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    LabelCountMismatch { labels: usize, pages: usize },
    WrapContentTooSmall { content: f32, viewport: f32 },
    InsufficientDuplicates { duplicates: usize, required: usize },
    /// Layout metrics built from a different extent or spacing than the
    /// pager config.
    MetricsMismatch {
        name: &'static str,
        config: f32,
        metrics: f32,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositiveExtent { name, value } => {
                write!(f, "{name} must be positive and finite, got {value}")
            }
            ConfigError::NegativeSpacing { value } => {
                write!(f, "spacing must be non-negative, got {value}")
            }
            ConfigError::ThresholdOutOfRange { value } => {
                write!(f, "commit threshold must be in (0, 1], got {value}")
            }
            ConfigError::ZeroVisibleDepth => write!(f, "visible cards count must be at least 1"),
            ConfigError::NonPositiveDampenFactor { value } => {
                write!(f, "velocity dampen factor must be positive, got {value}")
            }
            ConfigError::ChannelOutOfRange {
                name,
                value,
                min,
                max,
            } => write!(f, "{name} must be in [{min}, {max}], got {value}"),
            ConfigError::LabelCountMismatch { labels, pages } => {
                write!(f, "{labels} labels supplied for {pages} pages")
            }
            ConfigError::WrapContentTooSmall { content, viewport } => write!(
                f,
                "wrapped content ({content}) must be larger than the viewport ({viewport})"
            ),
            ConfigError::InsufficientDuplicates {
                duplicates,
                required,
            } => write!(
                f,
                "{duplicates} duplicated items cannot cover {required} fully visible items"
            ),
            ConfigError::MetricsMismatch {
                name,
                config,
                metrics,
            } => write!(
                f,
                "config {name} is {config} but the layout metrics use {metrics}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

pub(crate) fn positive_extent(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositiveExtent { name, value })
    }
}

pub(crate) fn channel(
    name: &'static str,
    value: f32,
    min: f32,
    max: f32,
) -> Result<f32, ConfigError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::ChannelOutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}
