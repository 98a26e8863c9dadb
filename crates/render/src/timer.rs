/// Fixed-step simulation clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTimer {
    time: f32,
    step: f32,
    frames: u64,
}

impl FrameTimer {
    pub fn new(start: f32, step: f32) -> Self {
        Self {
            time: start,
            step,
            frames: 0,
        }
    }

    /// Advance by one step and return the new time.
    pub fn advance(&mut self) -> f32 {
        self.time += self.step;
        self.frames += 1;
        self.time
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Number of completed iterations.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_by_fixed_step() {
        let mut timer = FrameTimer::new(0.0, 0.025);
        for _ in 0..40 {
            timer.advance();
        }
        assert!((timer.time() - 1.0).abs() < 1e-5);
        assert_eq!(timer.frames(), 40);
    }

    #[test]
    fn starts_at_offset() {
        let mut timer = FrameTimer::new(42.0, 0.5);
        assert_eq!(timer.time(), 42.0);
        assert_eq!(timer.advance(), 42.5);
    }
}
