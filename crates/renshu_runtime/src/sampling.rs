//! Sampling parameters and the ranges the chat surfaces expose for them.

use serde::{Deserialize, Serialize};

/// A bounded numeric input control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderSpec<T> {
    pub label: &'static str,
    pub min: T,
    pub max: T,
    pub default: T,
    pub step: T,
}

pub const MAX_TOKENS_SLIDER: SliderSpec<u32> = SliderSpec {
    label: "Max Tokens",
    min: 128,
    max: 1024,
    default: 512,
    step: 32,
};

pub const TEMPERATURE_SLIDER: SliderSpec<f32> = SliderSpec {
    label: "Temperature",
    min: 0.1,
    max: 2.0,
    default: 0.7,
    step: 0.1,
};

pub const TOP_P_SLIDER: SliderSpec<f32> = SliderSpec {
    label: "Top-p",
    min: 0.1,
    max: 1.0,
    default: 0.9,
    step: 0.05,
};

/// Per-turn generation controls.
///
/// The responder forwards these untouched; surfaces call [`SamplingParams::clamped`]
/// on anything that came from user input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_tokens: MAX_TOKENS_SLIDER.default,
            temperature: TEMPERATURE_SLIDER.default,
            top_p: TOP_P_SLIDER.default,
        }
    }
}

impl SamplingParams {
    pub fn new(max_tokens: u32, temperature: f32, top_p: f32) -> Self {
        Self {
            max_tokens,
            temperature,
            top_p,
        }
    }

    /// Fill unset values from `self`.
    pub fn overridden_by(
        self,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        top_p: Option<f32>,
    ) -> Self {
        Self {
            max_tokens: max_tokens.unwrap_or(self.max_tokens),
            temperature: temperature.unwrap_or(self.temperature),
            top_p: top_p.unwrap_or(self.top_p),
        }
    }

    /// Pin every value into its slider range. Non-finite floats fall back to the
    /// slider default.
    pub fn clamped(self) -> Self {
        Self {
            max_tokens: self
                .max_tokens
                .clamp(MAX_TOKENS_SLIDER.min, MAX_TOKENS_SLIDER.max),
            temperature: clamp_float(self.temperature, &TEMPERATURE_SLIDER),
            top_p: clamp_float(self.top_p, &TOP_P_SLIDER),
        }
    }
}

fn clamp_float(value: f32, spec: &SliderSpec<f32>) -> f32 {
    if value.is_finite() {
        value.clamp(spec.min, spec.max)
    } else {
        spec.default
    }
}
