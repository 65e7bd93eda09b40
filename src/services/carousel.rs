// src/services/carousel.rs

//! Chip strip scroll planning.
//!
//! Selecting a chip far away from the current scroll position jumps
//! straight there; nearby chips are scrolled to with animation. An always
//! animated scroll sweeps across the whole strip for distant selections.

use crate::models::CarouselConfig;

/// Distance, as a fraction of the visible width, beyond which scrolling jumps.
pub const JUMP_THRESHOLD_RATIO: f64 = 0.9;

/// Visible window of the scroll container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_left: f64,
    pub client_width: f64,
}

/// Horizontal extent of one item inside the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemBox {
    pub offset_left: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    Instant,
    Smooth,
}

impl ScrollMode {
    /// Value for the DOM `scrollTo` `behavior` option.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrollMode::Instant => "instant",
            ScrollMode::Smooth => "smooth",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPlan {
    pub target: f64,
    pub mode: ScrollMode,
}

/// Compute the scroll offset that centers `item`, and how to get there.
pub fn plan_scroll(viewport: Viewport, item: ItemBox) -> ScrollPlan {
    let target = (item.offset_left - (viewport.client_width - item.width) / 2.0).max(0.0);
    let distance = (target - viewport.scroll_left).abs();

    let mode = if distance > viewport.client_width * JUMP_THRESHOLD_RATIO {
        ScrollMode::Instant
    } else {
        ScrollMode::Smooth
    };

    ScrollPlan { target, mode }
}

/// Box of the chip at `index` for a strip laid out with fixed geometry.
pub fn chip_box(config: &CarouselConfig, index: usize) -> ItemBox {
    ItemBox {
        offset_left: index as f64 * (config.chip_width + config.chip_gap),
        width: config.chip_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(scroll_left: f64) -> Viewport {
        Viewport {
            scroll_left,
            client_width: 1000.0,
        }
    }

    #[test]
    fn test_centers_item() {
        let plan = plan_scroll(
            viewport(0.0),
            ItemBox {
                offset_left: 900.0,
                width: 200.0,
            },
        );
        assert_eq!(plan.target, 500.0);
        assert_eq!(plan.mode, ScrollMode::Smooth);
    }

    #[test]
    fn test_clamped_at_zero() {
        let plan = plan_scroll(
            viewport(300.0),
            ItemBox {
                offset_left: 50.0,
                width: 100.0,
            },
        );
        assert_eq!(plan.target, 0.0);
        assert_eq!(plan.mode, ScrollMode::Smooth);
    }

    #[test]
    fn test_far_selection_jumps() {
        let item = ItemBox {
            offset_left: 5000.0,
            width: 200.0,
        };
        let plan = plan_scroll(viewport(0.0), item);
        assert_eq!(plan.target, 4600.0);
        assert_eq!(plan.mode, ScrollMode::Instant);
    }

    #[test]
    fn test_threshold_boundary() {
        let item = ItemBox {
            offset_left: 1300.0,
            width: 200.0,
        };
        // target 900, distance exactly 900 == 90% of width: still animated
        assert_eq!(plan_scroll(viewport(0.0), item).mode, ScrollMode::Smooth);
        // distance 901 crosses it
        assert_eq!(plan_scroll(viewport(-1.0), item).mode, ScrollMode::Instant);
    }

    #[test]
    fn test_chip_box() {
        let config = CarouselConfig {
            chip_width: 100.0,
            chip_gap: 10.0,
            viewport_width: 500.0,
        };
        assert_eq!(chip_box(&config, 0).offset_left, 0.0);
        assert_eq!(chip_box(&config, 3).offset_left, 330.0);
    }
}
