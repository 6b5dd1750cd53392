/// Seconds left before another verification code may be requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeCountdown {
    remaining: u32,
}

impl CodeCountdown {
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn can_send(&self) -> bool {
        self.remaining == 0
    }

    pub fn start(&mut self, seconds: u32) {
        self.remaining = seconds;
    }

    /// One second elapsed. Returns what is left; stays at 0 once there.
    pub fn tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_to_zero() {
        let mut countdown = CodeCountdown::default();
        assert!(countdown.can_send());

        countdown.start(3);
        assert!(!countdown.can_send());
        assert_eq!(countdown.tick(), 2);
        assert_eq!(countdown.tick(), 1);
        assert_eq!(countdown.tick(), 0);
        assert!(countdown.can_send());
        assert_eq!(countdown.tick(), 0);
    }
}
