//! Random display colors.

use rand::Rng;

use crate::domain::{ColorGenerator, DisplayColor};

/// Exclusive upper bound of generated values (`#fffffe` is the largest color)
const COLOR_UPPER_BOUND: u32 = 0x00FF_FFFF;

/// Uniformly random 24-bit colors from the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomColorGenerator;

impl ColorGenerator for RandomColorGenerator {
    fn generate(&self) -> DisplayColor {
        let value = rand::thread_rng().gen_range(0..COLOR_UPPER_BOUND);
        DisplayColor::from_rgb(value)
    }
}
