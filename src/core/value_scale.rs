use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::types::Rect;
use crate::error::{ChartError, ChartResult};

/// Smallest visible value span scroll and zoom may produce.
pub const MIN_VALUE_RANGE: f64 = 0.1;

/// Floor used when a logarithmic autoscale meets a non-positive minimum,
/// as a fraction of the visible maximum.
const LOG_MIN_LIFT_RATIO: f64 = 1e-3;

/// Range shown by a logarithmic scale that has not been autoscaled yet.
const LOG_PLACEHOLDER_RANGE: (f64, f64) = (1.0, 10.0);

/// Mapping mode used by the value scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScaleKind {
    /// Uniform spacing in raw value units.
    #[default]
    Linear,
    /// Uniform spacing in natural-log value units (all values must be > 0).
    Logarithmic,
}

impl ScaleKind {
    fn to_domain(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Logarithmic => value.ln(),
        }
    }

    fn from_domain(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Logarithmic => value.exp(),
        }
    }
}

/// Values that autoscale, scroll and zoom must keep visible.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueRangeHint {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl ValueRangeHint {
    fn widen(self, mut min: f64, mut max: f64) -> (f64, f64) {
        if let Some(hint_min) = self.min
            && min > hint_min
        {
            min = hint_min;
        }
        if let Some(hint_max) = self.max
            && max < hint_max
        {
            max = hint_max;
        }
        (min, max)
    }
}

/// Limits applied to interactive value scrolling and zooming.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScaleOptions {
    #[serde(default)]
    pub min_allowed_value: Option<f64>,
    #[serde(default)]
    pub max_allowed_value: Option<f64>,
    /// Max share of the view that may lie below the data minimum.
    pub min_allowed_value_ratio: Option<f64>,
    /// Max share of the view that may lie above the data maximum.
    pub max_allowed_value_ratio: Option<f64>,
    /// Lower bound of `data span / visible span`, in `(0, 1]`.
    pub min_value_range_ratio: Option<f64>,
    /// Upper bound of `data span / visible span`, `>= 1`.
    pub max_value_range_ratio: Option<f64>,
    #[serde(default)]
    pub range: ValueRangeHint,
}

impl Default for ValueScaleOptions {
    fn default() -> Self {
        Self {
            min_allowed_value: None,
            max_allowed_value: None,
            min_allowed_value_ratio: Some(0.8),
            max_allowed_value_ratio: Some(0.8),
            min_value_range_ratio: Some(0.1),
            max_value_range_ratio: Some(5.0),
            range: ValueRangeHint::default(),
        }
    }
}

impl ValueScaleOptions {
    pub fn validate(self) -> ChartResult<Self> {
        for value in [self.min_allowed_value, self.max_allowed_value]
            .into_iter()
            .flatten()
        {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(
                    "allowed values must be finite".to_owned(),
                ));
            }
        }
        if let (Some(min), Some(max)) = (self.min_allowed_value, self.max_allowed_value)
            && min >= max
        {
            return Err(ChartError::InvalidValueRange { min, max });
        }

        for ratio in [self.min_allowed_value_ratio, self.max_allowed_value_ratio]
            .into_iter()
            .flatten()
        {
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(ChartError::InvalidData(
                    "allowed value ratio must be finite and > 0".to_owned(),
                ));
            }
        }
        if let Some(ratio) = self.min_value_range_ratio
            && !(ratio > 0.0 && ratio <= 1.0)
        {
            return Err(ChartError::InvalidData(
                "min value range ratio must be in (0, 1]".to_owned(),
            ));
        }
        if let Some(ratio) = self.max_value_range_ratio
            && !(ratio.is_finite() && ratio >= 1.0)
        {
            return Err(ChartError::InvalidData(
                "max value range ratio must be finite and >= 1".to_owned(),
            ));
        }

        for value in [self.range.min, self.range.max].into_iter().flatten() {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(
                    "range hint values must be finite".to_owned(),
                ));
            }
        }
        Ok(self)
    }
}

/// Value axis mapped to an inverted y pixel axis (larger values sit higher).
#[derive(Debug, Clone, PartialEq)]
pub struct ValueScale {
    options: ValueScaleOptions,
    kind: ScaleKind,
    min_visible_value: f64,
    max_visible_value: f64,
    needs_auto_scale: bool,
    projection_frame: Option<Rect>,
    data_extent: Option<(f64, f64)>,
}

impl Default for ValueScale {
    fn default() -> Self {
        Self {
            options: ValueScaleOptions::default(),
            kind: ScaleKind::Linear,
            min_visible_value: -1.0,
            max_visible_value: 1.0,
            needs_auto_scale: true,
            projection_frame: None,
            data_extent: None,
        }
    }
}

impl ValueScale {
    /// Linear scale showing `min..max`.
    pub fn new(min: f64, max: f64) -> ChartResult<Self> {
        let mut scale = Self::default();
        scale.set_visible_range(min, max)?;
        Ok(scale)
    }

    pub fn with_options(options: ValueScaleOptions) -> ChartResult<Self> {
        Ok(Self {
            options: options.validate()?,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn options(&self) -> ValueScaleOptions {
        self.options
    }

    pub fn set_options(&mut self, options: ValueScaleOptions) -> ChartResult<()> {
        self.options = options.validate().inspect_err(|err| {
            warn!(error = %err, "rejected value scale options");
        })?;
        Ok(())
    }

    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    /// Switches the mapping mode; the current range must be valid for `kind`.
    ///
    /// A scale still awaiting autoscale accepts any kind. Its placeholder
    /// range is replaced by `1..10` when it is not valid for `kind`.
    pub fn set_kind(&mut self, kind: ScaleKind) -> ChartResult<()> {
        let valid = validate_visible_range(self.min_visible_value, self.max_visible_value, kind);
        if self.needs_auto_scale {
            if valid.is_err() {
                (self.min_visible_value, self.max_visible_value) = LOG_PLACEHOLDER_RANGE;
            }
        } else {
            valid?;
        }
        debug!(?kind, "set value scale kind");
        self.kind = kind;
        Ok(())
    }

    /// Sets mode and range together, validating the range against `kind`.
    pub fn set_kind_and_range(&mut self, kind: ScaleKind, min: f64, max: f64) -> ChartResult<()> {
        validate_visible_range(min, max, kind)?;
        self.kind = kind;
        self.commit_visible(min, max);
        Ok(())
    }

    #[must_use]
    pub fn min_visible_value(&self) -> f64 {
        self.min_visible_value
    }

    #[must_use]
    pub fn max_visible_value(&self) -> f64 {
        self.max_visible_value
    }

    #[must_use]
    pub fn visible_range(&self) -> (f64, f64) {
        (self.min_visible_value, self.max_visible_value)
    }

    pub fn set_visible_range(&mut self, min: f64, max: f64) -> ChartResult<()> {
        validate_visible_range(min, max, self.kind)?;
        self.commit_visible(min, max);
        Ok(())
    }

    pub fn set_min_visible_value(&mut self, min: f64) -> ChartResult<()> {
        self.set_visible_range(min, self.max_visible_value)
    }

    pub fn set_max_visible_value(&mut self, max: f64) -> ChartResult<()> {
        self.set_visible_range(self.min_visible_value, max)
    }

    #[must_use]
    pub fn needs_auto_scale(&self) -> bool {
        self.needs_auto_scale
    }

    pub fn set_needs_auto_scale(&mut self) {
        self.needs_auto_scale = true;
    }

    /// Data min/max recorded by the last autoscale.
    #[must_use]
    pub fn data_extent(&self) -> Option<(f64, f64)> {
        self.data_extent
    }

    #[must_use]
    pub fn projection_frame(&self) -> Option<Rect> {
        self.projection_frame
    }

    pub fn set_projection_frame(&mut self, frame: Rect) {
        debug!(
            top = frame.top,
            height = frame.height,
            "set value scale projection frame"
        );
        self.projection_frame = Some(frame);
    }

    #[must_use]
    pub fn has_resolvable_frame(&self) -> bool {
        self.projection_frame.is_some_and(|frame| !frame.is_degenerate())
    }

    /// `top + (max - value) / (max - min) * height`, in the kind's domain.
    #[must_use]
    pub fn y_by_value(&self, value: f64) -> f64 {
        let frame = self.projection_frame.unwrap_or_default();
        let min = self.kind.to_domain(self.min_visible_value);
        let max = self.kind.to_domain(self.max_visible_value);
        frame.top + (max - self.kind.to_domain(value)) / (max - min) * frame.height
    }

    #[must_use]
    pub fn value_by_y(&self, y: f64) -> f64 {
        let frame = self.projection_frame.unwrap_or_default();
        let min = self.kind.to_domain(self.min_visible_value);
        let max = self.kind.to_domain(self.max_visible_value);
        self.kind
            .from_domain(max - (y - frame.top) / frame.height * (max - min))
    }

    /// Fits the visible range to a data extent.
    ///
    /// A missing extent becomes `-1..1` and a flat one is widened by 1 on
    /// each side. The range hint is then included.
    pub fn auto_scale(&mut self, extent: Option<(f64, f64)>) {
        let (mut min, mut max) = extent
            .filter(|(low, high)| low.is_finite() && high.is_finite())
            .map_or((-1.0, 1.0), |(low, high)| (low.min(high), low.max(high)));
        if min == max {
            min -= 1.0;
            max += 1.0;
        }
        self.data_extent = Some((min, max));

        let (mut min, mut max) = self.options.range.widen(min, max);
        if self.kind == ScaleKind::Logarithmic && min <= 0.0 {
            if max <= 0.0 {
                max = 1.0;
            }
            min = max * LOG_MIN_LIFT_RATIO;
        }
        self.commit_visible(min, max);
    }

    /// Value span covered by `pixels` of frame height.
    #[must_use]
    pub fn value_offset(&self, pixels: f64) -> f64 {
        match self.projection_frame {
            Some(frame) if !frame.is_degenerate() => {
                (self.max_visible_value - self.min_visible_value) / frame.height * pixels
            }
            _ => 0.0,
        }
    }

    pub fn scroll_on_pixels(&mut self, pixels: f64) -> ChartResult<bool> {
        if !pixels.is_finite() {
            return Err(ChartError::InvalidData(
                "scroll pixels must be finite".to_owned(),
            ));
        }
        if pixels == 0.0 {
            return Ok(false);
        }
        Ok(self.scroll_on_value(self.value_offset(pixels)))
    }

    /// Shifts both visible bounds by `offset`.
    pub fn scroll_on_value(&mut self, offset: f64) -> bool {
        if offset == 0.0 || !offset.is_finite() {
            return false;
        }
        let (min, max) = self.options.range.widen(
            self.min_visible_value + offset,
            self.max_visible_value + offset,
        );
        if !self.can_set_visible_range(min, max) {
            return false;
        }
        trace!(offset, min, max, "scroll value scale");
        self.commit_visible(min, max);
        true
    }

    pub fn zoom_on_pixels(&mut self, pixels: f64) -> ChartResult<bool> {
        if !pixels.is_finite() {
            return Err(ChartError::InvalidData(
                "zoom pixels must be finite".to_owned(),
            ));
        }
        if pixels == 0.0 {
            return Ok(false);
        }
        Ok(self.zoom_on_value(self.value_offset(pixels)))
    }

    /// Grows both bounds outwards by `offset`; negative offsets zoom in.
    ///
    /// When the full move is not allowed, moving only one bound is tried.
    pub fn zoom_on_value(&mut self, offset: f64) -> bool {
        if offset == 0.0 || !offset.is_finite() {
            return false;
        }
        let (old_min, old_max) = self.visible_range();
        let mut min = old_min - offset;
        let mut max = old_max + offset;

        let has_hint = self.options.range.min.is_some() || self.options.range.max.is_some();
        if !self.can_set_visible_range(min, max) {
            if self.can_set_visible_range(old_min, max) {
                min = old_min;
            } else if self.can_set_visible_range(min, old_max) {
                max = old_max;
            } else if !has_hint {
                return false;
            }
        }
        (min, max) = self.options.range.widen(min, max);

        let changed = min != old_min || max != old_max;
        if !changed || max - min < MIN_VALUE_RANGE {
            return false;
        }
        if validate_visible_range(min, max, self.kind).is_err() {
            return false;
        }
        trace!(offset, min, max, "zoom value scale");
        self.commit_visible(min, max);
        true
    }

    /// Whether interactive scroll or zoom may show `min..max`.
    #[must_use]
    pub fn can_set_visible_range(&self, min: f64, max: f64) -> bool {
        let range = max - min;
        if !(range >= MIN_VALUE_RANGE) {
            return false;
        }
        if self.kind == ScaleKind::Logarithmic && min <= 0.0 {
            return false;
        }
        if self.options.min_allowed_value.is_some_and(|allowed| min < allowed) {
            return false;
        }
        if self.options.max_allowed_value.is_some_and(|allowed| max > allowed) {
            return false;
        }

        let Some((data_min, data_max)) = self.data_extent else {
            return true;
        };
        if self
            .options
            .min_allowed_value_ratio
            .is_some_and(|limit| (data_min - min) / range > limit)
        {
            return false;
        }
        if self
            .options
            .max_allowed_value_ratio
            .is_some_and(|limit| (max - data_max) / range > limit)
        {
            return false;
        }

        let coverage = (data_max - data_min) / range;
        if self
            .options
            .min_value_range_ratio
            .is_some_and(|limit| coverage < limit)
        {
            return false;
        }
        !self
            .options
            .max_value_range_ratio
            .is_some_and(|limit| coverage > limit)
    }

    fn commit_visible(&mut self, min: f64, max: f64) {
        debug!(min, max, "visible values changed");
        self.min_visible_value = min;
        self.max_visible_value = max;
        self.needs_auto_scale = false;
    }
}

fn validate_visible_range(min: f64, max: f64, kind: ScaleKind) -> ChartResult<()> {
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(ChartError::InvalidValueRange { min, max });
    }
    if kind == ScaleKind::Logarithmic && min <= 0.0 {
        return Err(ChartError::InvalidValueRange { min, max });
    }
    Ok(())
}
